//! Melee attack pattern cycle.
//!
//! A controller walks an ordered list of [`AttackPattern`]s. Each attack
//! stamps its start time, waits out the pattern's wind-up delay, hits
//! everything in the attack area and then moves on to the next pattern. The
//! chain falls back to the first pattern after the last one, or when more
//! than [`COMBO_WINDOW`] seconds passed between the attack starting and
//! landing.

use bevy::prelude::*;
use serde::Deserialize;

use super::components::CombatDefinition;
use crate::core::{ConfigError, Cooldown};

/// Seconds from an attack's start after which the chain restarts.
pub const COMBO_WINDOW: f32 = 2.0;

/// One step of an attack chain.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AttackPattern {
    /// Damage multiplier applied to the attacker's attack stat
    pub power: f32,
    /// Wind-up before the hit lands
    pub delay: f32,
    /// Lockout before the next attack can start, measured from this one's start
    pub cooldown: f32,
    /// Animation trigger fired when the attack starts
    pub tag: String,
}

impl AttackPattern {
    pub fn new(power: f32, delay: f32, cooldown: f32, tag: impl Into<String>) -> Self {
        Self {
            power,
            delay,
            cooldown,
            tag: tag.into(),
        }
    }
}

/// Reported when an attack begins.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackStarted {
    pub index: usize,
    pub trigger: String,
}

/// Reported when an attack lands.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackResolved {
    pub index: usize,
    pub damage: f32,
    pub targets: Vec<Entity>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct InFlight {
    started_at: f32,
    resume_at: f32,
}

#[derive(Component, Debug, Clone)]
pub struct CombatController {
    patterns: Vec<AttackPattern>,
    attack_stat: f32,
    /// Pattern the next attack will use.
    index: usize,
    /// Pattern of the most recent attack; its cooldown gates the next one.
    current: usize,
    cooldown: Cooldown,
    in_flight: Option<InFlight>,
}

impl CombatController {
    pub fn new(patterns: Vec<AttackPattern>, attack_stat: f32) -> Result<Self, ConfigError> {
        Self::named("unnamed", patterns, attack_stat)
    }

    pub fn from_definition(definition: &CombatDefinition) -> Result<Self, ConfigError> {
        Self::named(
            &definition.name,
            definition.patterns.clone(),
            definition.attack_stat,
        )
    }

    fn named(name: &str, patterns: Vec<AttackPattern>, attack_stat: f32) -> Result<Self, ConfigError> {
        let Some(first) = patterns.first() else {
            return Err(ConfigError::EmptyAttackPatterns(name.to_string()));
        };
        let cooldown = Cooldown::new(first.cooldown);

        Ok(Self {
            patterns,
            attack_stat,
            index: 0,
            current: 0,
            cooldown,
            in_flight: None,
        })
    }

    /// Index of the pattern the next attack will use.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_attacking(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Try to start an attack at `now`.
    ///
    /// Does nothing while the previous attack's cooldown runs or while an
    /// attack is still in flight.
    pub fn attack_handle(&mut self, now: f32) -> Option<AttackStarted> {
        if !self.cooldown.ready(now) || self.in_flight.is_some() {
            return None;
        }

        self.current = self.index;
        let pattern = &self.patterns[self.current];
        self.cooldown.set_interval(pattern.cooldown);
        self.cooldown.trigger(now);
        self.in_flight = Some(InFlight {
            started_at: now,
            resume_at: now + pattern.delay,
        });

        debug!("Attack {} started at {:.2}", self.current, now);
        Some(AttackStarted {
            index: self.current,
            trigger: pattern.tag.clone(),
        })
    }

    /// Land the in-flight attack once its delay has passed.
    ///
    /// `targets` is the attack area snapshot for this tick. An attack never
    /// lands on the tick it started.
    pub fn advance(&mut self, now: f32, targets: &[Entity]) -> Option<AttackResolved> {
        let flight = self.in_flight?;
        if now <= flight.started_at || now < flight.resume_at {
            return None;
        }

        let resolved = AttackResolved {
            index: self.current,
            damage: self.patterns[self.current].power * self.attack_stat,
            targets: targets.to_vec(),
        };

        let at_end = self.index >= self.patterns.len() - 1;
        if at_end || now - flight.started_at > COMBO_WINDOW {
            self.index = 0;
        } else {
            self.index += 1;
        }
        self.in_flight = None;

        debug!(
            "Attack {} landed on {} target(s), next {}",
            resolved.index,
            resolved.targets.len(),
            self.index
        );
        Some(resolved)
    }

    /// Abort the in-flight attack without damage or chain advance.
    pub fn cancel(&mut self) -> bool {
        if self.in_flight.take().is_some() {
            debug!("Attack {} cancelled", self.current);
            true
        } else {
            false
        }
    }
}
