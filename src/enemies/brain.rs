//! Enemy pursuit state machine.
//!
//! Every tick, in order:
//!
//! 1. Suspended sequences advance (the wait-to-return timer and roaming).
//! 2. If anything was sensed, the highest priority match becomes the target
//!    and the state is forced to `FollowTarget`.
//! 3. Otherwise a `FollowTarget` enemy that lost everything starts waiting.
//! 4. Otherwise an enemy standing exactly on its spawn point goes `Idle`.
//! 5. The action for the resulting state is dispatched.
//!
//! The target is never forgotten when lost; waiting keeps heading for where
//! it was last seen until the wait timer fires.

use bevy::prelude::*;
use rand::Rng;

use super::components::{EnemyState, PriorityTag};
use crate::core::{PhaseTimer, Tick};

/// Behaviour tuning for one enemy.
#[derive(Debug, Clone, PartialEq)]
pub struct BrainConfig {
    pub priority_tags: Vec<PriorityTag>,
    pub roam_duration: f32,
    pub roam_cooldown: f32,
    /// Inclusive offset range sampled on both axes around the spawn point.
    pub roam_range: (f32, f32),
    pub return_delay: f32,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            priority_tags: vec![PriorityTag::Player, PriorityTag::Npc, PriorityTag::Tower],
            roam_duration: 2.0,
            roam_cooldown: 1.5,
            roam_range: (-2.0, 2.0),
            return_delay: 3.0,
        }
    }
}

/// One entity reported by the view sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensedEntity {
    pub entity: Entity,
    pub tag: Option<PriorityTag>,
    pub position: Vec2,
}

/// Sensor readings for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnemyInput<'a> {
    pub position: Vec2,
    /// View sensor snapshot, in sensor order.
    pub sensed: &'a [SensedEntity],
    /// Live position of the remembered target, if it still exists.
    pub target_position: Option<Vec2>,
}

/// Actuator commands, applied in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyCommand {
    SetDestination(Vec2),
}

/// The entity being chased and where it was last seen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetMemory {
    pub entity: Entity,
    pub last_position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum RoamPhase {
    /// Waiting before setting off. State changes are not checked here.
    Cooldown { timer: PhaseTimer, destination: Vec2 },
    Roaming { timer: PhaseTimer, destination: Vec2 },
}

/// First sensed entity matching the earliest tag in `priority_tags`.
pub fn select_target<'a>(
    priority_tags: &[PriorityTag],
    sensed: &'a [SensedEntity],
) -> Option<&'a SensedEntity> {
    priority_tags
        .iter()
        .find_map(|tag| sensed.iter().find(|candidate| candidate.tag == Some(*tag)))
}

#[derive(Component, Debug, Clone)]
pub struct EnemyBrain {
    config: BrainConfig,
    state: EnemyState,
    spawn_point: Vec2,
    target: Option<TargetMemory>,
    roam: Option<RoamPhase>,
    wait: Option<PhaseTimer>,
}

impl EnemyBrain {
    pub fn new(config: BrainConfig, spawn_point: Vec2) -> Self {
        Self {
            config,
            state: EnemyState::Idle,
            spawn_point,
            target: None,
            roam: None,
            wait: None,
        }
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.spawn_point
    }

    pub fn target(&self) -> Option<TargetMemory> {
        self.target
    }

    pub fn is_roaming(&self) -> bool {
        self.roam.is_some()
    }

    pub fn is_waiting(&self) -> bool {
        self.wait.is_some()
    }

    fn set_state(&mut self, state: EnemyState) {
        if self.state != state {
            debug!("Enemy state {:?} -> {:?}", self.state, state);
        }
        self.state = state;
    }

    pub fn tick(&mut self, tick: Tick, input: &EnemyInput, rng: &mut impl Rng) -> Vec<EnemyCommand> {
        let mut commands = Vec::new();

        if let (Some(target), Some(position)) = (self.target.as_mut(), input.target_position) {
            target.last_position = position;
        }

        self.advance_wait(tick.dt);
        self.advance_roam(tick.dt, &mut commands);

        if !input.sensed.is_empty() {
            if let Some(found) = select_target(&self.config.priority_tags, input.sensed) {
                self.target = Some(TargetMemory {
                    entity: found.entity,
                    last_position: found.position,
                });
            }
            self.set_state(EnemyState::FollowTarget);
        } else if self.state == EnemyState::FollowTarget {
            self.set_state(EnemyState::WaitToReturn);
        } else if input.position == self.spawn_point {
            self.set_state(EnemyState::Idle);
        }

        self.play_action(rng, &mut commands);
        commands
    }

    fn play_action(&mut self, rng: &mut impl Rng, commands: &mut Vec<EnemyCommand>) {
        match self.state {
            EnemyState::Idle => {
                if self.roam.is_none() {
                    self.start_roam(rng);
                }
            }
            EnemyState::FollowTarget => {
                if let Some(target) = self.target {
                    commands.push(EnemyCommand::SetDestination(target.last_position));
                }
            }
            EnemyState::WaitToReturn => {
                if let Some(target) = self.target {
                    commands.push(EnemyCommand::SetDestination(target.last_position));
                }
                if self.wait.is_none() {
                    self.wait = Some(PhaseTimer::new(self.config.return_delay));
                }
            }
            EnemyState::ReturnToSpawn => {
                commands.push(EnemyCommand::SetDestination(self.spawn_point));
            }
        }
    }

    fn start_roam(&mut self, rng: &mut impl Rng) {
        let (min, max) = self.config.roam_range;
        let offset = Vec2::new(rng.gen_range(min..=max), rng.gen_range(min..=max));
        self.roam = Some(RoamPhase::Cooldown {
            timer: PhaseTimer::new(self.config.roam_cooldown),
            destination: self.spawn_point + offset,
        });
    }

    fn advance_wait(&mut self, dt: f32) {
        let Some(timer) = self.wait.as_mut() else {
            return;
        };
        if timer.advance(dt) {
            self.wait = None;
            self.set_state(EnemyState::ReturnToSpawn);
        }
    }

    fn advance_roam(&mut self, dt: f32, commands: &mut Vec<EnemyCommand>) {
        if let Some(RoamPhase::Cooldown { timer, destination }) = self.roam.as_mut() {
            if !timer.advance(dt) {
                return;
            }
            let destination = *destination;
            self.roam = Some(RoamPhase::Roaming {
                timer: PhaseTimer::new(self.config.roam_duration),
                destination,
            });
        }

        let Some(RoamPhase::Roaming { timer, destination }) = self.roam.as_mut() else {
            return;
        };
        if timer.is_finished() || self.state != EnemyState::Idle {
            self.roam = None;
            return;
        }
        timer.advance(dt);
        commands.push(EnemyCommand::SetDestination(*destination));
    }
}
