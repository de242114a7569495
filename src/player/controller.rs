//! Player movement state machine.
//!
//! Each tick the guards run in a fixed priority order:
//!
//! 1. An active dash forces `Dash` and skips everything else.
//! 2. Walk sets the baseline speed, or forces `Idle` without directional input.
//! 3. Sprint needs movement, the sprint button and some stamina.
//! 4. A dash starts on the dash button edge when not idle, not already
//!    dashing or recovering, and stamina covers the flat cost.

use bevy::prelude::*;

use super::components::{Facing, MovementState, PlayerConfig};
use super::stamina::StaminaPool;
use crate::core::{PhaseTimer, Tick};

/// Animation parameter toggled while dashing.
pub const IS_DASH_PARAM: &str = "IsDash";

/// Sensed input for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementInput {
    /// Directional axis, each component in `[-1, 1]`.
    pub axis: Vec2,
    pub sprint_held: bool,
    /// True only on the tick the dash button went down.
    pub dash_pressed: bool,
    /// An attack animation is playing; the body must not move.
    pub attack_locked: bool,
}

/// Presentation signals for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementAnimation {
    pub trigger: &'static str,
    pub is_dash: bool,
}

/// Commands produced by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementOutput {
    pub velocity: Vec2,
    pub state: MovementState,
    /// `None` while attack locked.
    pub animation: Option<MovementAnimation>,
    pub facing: Option<Facing>,
}

/// Resumable dash sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DashPhase {
    #[default]
    Ready,
    Dashing(PhaseTimer),
    Recovering(PhaseTimer),
}

#[derive(Component, Debug, Clone)]
pub struct MovementController {
    config: PlayerConfig,
    state: MovementState,
    dash: DashPhase,
    current_speed: f32,
}

impl MovementController {
    pub fn new(config: PlayerConfig) -> Self {
        let current_speed = config.walk_speed;
        Self {
            config,
            state: MovementState::Idle,
            dash: DashPhase::Ready,
            current_speed,
        }
    }

    pub fn state(&self) -> MovementState {
        self.state
    }

    pub fn is_dash(&self) -> bool {
        matches!(self.dash, DashPhase::Dashing(_))
    }

    /// True from dash start until the post-dash lockout ends.
    pub fn is_dash_cooldown(&self) -> bool {
        !matches!(self.dash, DashPhase::Ready)
    }

    /// Back to defaults, used on respawn.
    pub fn reset(&mut self) {
        self.set_state(MovementState::Idle);
        self.dash = DashPhase::Ready;
        self.current_speed = self.config.walk_speed;
    }

    /// Run one tick of movement followed by stamina regeneration.
    pub fn tick(&mut self, tick: Tick, input: &MovementInput, stamina: &mut StaminaPool) -> MovementOutput {
        self.advance_dash(tick.dt);

        let output = if input.attack_locked {
            MovementOutput {
                velocity: Vec2::ZERO,
                state: self.state,
                animation: None,
                facing: None,
            }
        } else {
            self.walk(input);
            self.sprint(input, stamina, tick.dt);
            self.start_dash(input, stamina);

            let velocity = (input.axis * self.current_speed).clamp_length_max(self.current_speed);
            let facing = if input.axis.x < 0.0 {
                Some(Facing::Left)
            } else if input.axis.x > 0.0 {
                Some(Facing::Right)
            } else {
                None
            };

            MovementOutput {
                velocity,
                state: self.state,
                animation: Some(MovementAnimation {
                    trigger: self.state.name(),
                    is_dash: self.is_dash(),
                }),
                facing,
            }
        };

        stamina.regen(self.state, tick.dt);
        output
    }

    fn advance_dash(&mut self, dt: f32) {
        match &mut self.dash {
            DashPhase::Ready => {}
            DashPhase::Dashing(timer) => {
                if timer.advance(dt) {
                    self.dash = DashPhase::Recovering(PhaseTimer::new(self.config.dash_cooldown));
                    self.set_state(MovementState::Idle);
                }
            }
            DashPhase::Recovering(timer) => {
                if timer.advance(dt) {
                    self.dash = DashPhase::Ready;
                }
            }
        }
    }

    fn walk(&mut self, input: &MovementInput) {
        if self.is_dash() {
            self.set_state(MovementState::Dash);
            return;
        }
        self.current_speed = self.config.walk_speed;

        if input.axis == Vec2::ZERO {
            self.set_state(MovementState::Idle);
            return;
        }
        self.set_state(MovementState::Walk);
    }

    fn sprint(&mut self, input: &MovementInput, stamina: &mut StaminaPool, dt: f32) {
        if matches!(self.state, MovementState::Dash | MovementState::Idle) {
            return;
        }
        if stamina.current <= 0.0 || !input.sprint_held {
            return;
        }

        self.current_speed = self.config.sprint_speed;
        self.set_state(MovementState::Sprint);
        stamina.drain(self.config.sprint_stamina_drain * dt);
    }

    fn start_dash(&mut self, input: &MovementInput, stamina: &mut StaminaPool) {
        if self.state == MovementState::Idle || self.is_dash_cooldown() {
            return;
        }
        if stamina.current < self.config.dash_stamina_cost || !input.dash_pressed {
            return;
        }

        self.dash = DashPhase::Dashing(PhaseTimer::new(self.config.dash_duration));
        self.current_speed = self.config.dash_speed;
        self.set_state(MovementState::Dash);
        stamina.drain(self.config.dash_stamina_cost);
    }

    fn set_state(&mut self, state: MovementState) {
        if self.state != state {
            debug!("Movement state {:?} -> {:?}", self.state, state);
        }
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.1;

    fn config() -> PlayerConfig {
        PlayerConfig {
            walk_speed: 2.0,
            sprint_speed: 4.0,
            dash_speed: 10.0,
            dash_duration: 0.2,
            dash_cooldown: 0.5,
            max_stamina: 100.0,
            stamina_regen_rate: 10.0,
            stamina_regen_cooldown: 2.0,
            sprint_stamina_drain: 20.0,
            dash_stamina_cost: 25.0,
        }
    }

    fn setup() -> (MovementController, StaminaPool) {
        let config = config();
        let stamina = StaminaPool::from_config(&config);
        (MovementController::new(config), stamina)
    }

    fn moving() -> MovementInput {
        MovementInput {
            axis: Vec2::new(1.0, 0.0),
            ..default()
        }
    }

    fn step(
        controller: &mut MovementController,
        stamina: &mut StaminaPool,
        input: MovementInput,
    ) -> MovementOutput {
        controller.tick(Tick::new(0.0, DT), &input, stamina)
    }

    #[test]
    fn idle_without_input() {
        let (mut controller, mut stamina) = setup();
        let out = step(&mut controller, &mut stamina, MovementInput::default());

        assert_eq!(out.state, MovementState::Idle);
        assert_eq!(out.velocity, Vec2::ZERO);
        assert_eq!(out.animation.map(|a| a.trigger), Some("Idle"));
        assert_eq!(out.facing, None);
    }

    #[test]
    fn walk_with_input_and_clamped_velocity() {
        let (mut controller, mut stamina) = setup();
        let out = step(
            &mut controller,
            &mut stamina,
            MovementInput {
                axis: Vec2::new(1.0, 1.0),
                ..default()
            },
        );

        assert_eq!(out.state, MovementState::Walk);
        assert!((out.velocity.length() - 2.0).abs() < 1e-5);
        assert_eq!(out.facing, Some(Facing::Right));
    }

    #[test]
    fn sprint_needs_movement_and_button() {
        let (mut controller, mut stamina) = setup();

        let idle_sprint = MovementInput {
            sprint_held: true,
            ..default()
        };
        assert_eq!(step(&mut controller, &mut stamina, idle_sprint).state, MovementState::Idle);
        assert_eq!(stamina.current, 100.0);

        let out = step(
            &mut controller,
            &mut stamina,
            MovementInput {
                sprint_held: true,
                ..moving()
            },
        );
        assert_eq!(out.state, MovementState::Sprint);
        assert_eq!(out.velocity, Vec2::new(4.0, 0.0));
        assert!((stamina.current - 98.0).abs() < 1e-4);
    }

    #[test]
    fn sprint_blocked_on_empty_stamina() {
        let (mut controller, mut stamina) = setup();
        stamina.current = 0.0;

        let out = step(
            &mut controller,
            &mut stamina,
            MovementInput {
                sprint_held: true,
                ..moving()
            },
        );
        assert_eq!(out.state, MovementState::Walk);
        assert_eq!(out.velocity, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn dash_runs_for_duration_then_recovers() {
        let (mut controller, mut stamina) = setup();
        let dash = MovementInput {
            dash_pressed: true,
            ..moving()
        };

        let out = step(&mut controller, &mut stamina, dash);
        assert_eq!(out.state, MovementState::Dash);
        assert_eq!(out.velocity, Vec2::new(10.0, 0.0));
        assert_eq!(out.animation.map(|a| a.is_dash), Some(true));
        assert_eq!(stamina.current, 75.0);

        // Still dashing even without input.
        let out = step(&mut controller, &mut stamina, MovementInput::default());
        assert_eq!(out.state, MovementState::Dash);

        // Dash duration (0.2s) elapses on this tick.
        let out = step(&mut controller, &mut stamina, moving());
        assert_eq!(out.state, MovementState::Walk);
        assert!(!controller.is_dash());
        assert!(controller.is_dash_cooldown());
        assert_eq!(out.animation.map(|a| a.is_dash), Some(false));
    }

    #[test]
    fn dash_cannot_retrigger_while_dashing_or_recovering() {
        let (mut controller, mut stamina) = setup();
        let dash = MovementInput {
            dash_pressed: true,
            ..moving()
        };

        step(&mut controller, &mut stamina, dash);
        step(&mut controller, &mut stamina, dash);
        assert_eq!(stamina.current, 75.0);

        // Recovery lasts 0.5s after the dash ends.
        for _ in 0..4 {
            step(&mut controller, &mut stamina, dash);
            assert!(controller.is_dash_cooldown());
            assert!(!controller.is_dash());
        }
        assert_eq!(stamina.current, 75.0);

        for _ in 0..3 {
            step(&mut controller, &mut stamina, moving());
        }
        assert!(!controller.is_dash_cooldown());

        let out = step(&mut controller, &mut stamina, dash);
        assert_eq!(out.state, MovementState::Dash);
        assert_eq!(stamina.current, 50.0);
    }

    #[test]
    fn dash_requires_movement_and_stamina() {
        let (mut controller, mut stamina) = setup();

        let standing_dash = MovementInput {
            dash_pressed: true,
            ..default()
        };
        assert_eq!(step(&mut controller, &mut stamina, standing_dash).state, MovementState::Idle);

        stamina.current = 24.0;
        let out = step(
            &mut controller,
            &mut stamina,
            MovementInput {
                dash_pressed: true,
                ..moving()
            },
        );
        assert_eq!(out.state, MovementState::Walk);
        assert!(!controller.is_dash_cooldown());
    }

    #[test]
    fn attack_lock_freezes_body_but_regenerates() {
        let (mut controller, mut stamina) = setup();
        stamina.current = 50.0;
        stamina.regen_timer = 5.0;

        let out = step(
            &mut controller,
            &mut stamina,
            MovementInput {
                attack_locked: true,
                ..moving()
            },
        );

        assert_eq!(out.velocity, Vec2::ZERO);
        assert_eq!(out.animation, None);
        assert_eq!(out.state, MovementState::Idle);
        assert!((stamina.current - 51.0).abs() < 1e-4);
    }

    #[test]
    fn facing_follows_horizontal_axis() {
        let (mut controller, mut stamina) = setup();
        let out = step(
            &mut controller,
            &mut stamina,
            MovementInput {
                axis: Vec2::new(-0.5, 0.0),
                ..default()
            },
        );
        assert_eq!(out.facing, Some(Facing::Left));

        let out = step(
            &mut controller,
            &mut stamina,
            MovementInput {
                axis: Vec2::new(0.0, 1.0),
                ..default()
            },
        );
        assert_eq!(out.facing, None);
    }

    #[test]
    fn reset_returns_to_defaults() {
        let (mut controller, mut stamina) = setup();
        step(
            &mut controller,
            &mut stamina,
            MovementInput {
                dash_pressed: true,
                ..moving()
            },
        );

        controller.reset();
        assert_eq!(controller.state(), MovementState::Idle);
        assert!(!controller.is_dash());
        assert!(!controller.is_dash_cooldown());
    }
}
