//! Bounded stamina resource.
//!
//! Draining is done by the movement handlers; this type only clamps and
//! regenerates.

use bevy::prelude::*;

use super::components::{MovementState, PlayerConfig};

#[derive(Component, Debug, Clone, PartialEq)]
pub struct StaminaPool {
    pub current: f32,
    pub max: f32,
    pub regen_rate: f32,
    /// Seconds without draining required before regeneration starts
    pub regen_cooldown: f32,
    /// Time since the last drain
    pub regen_timer: f32,
}

impl StaminaPool {
    pub fn new(max: f32, regen_rate: f32, regen_cooldown: f32) -> Self {
        Self {
            current: max,
            max,
            regen_rate,
            regen_cooldown,
            regen_timer: 0.0,
        }
    }

    pub fn from_config(config: &PlayerConfig) -> Self {
        Self::new(
            config.max_stamina,
            config.stamina_regen_rate,
            config.stamina_regen_cooldown,
        )
    }

    /// Subtract `amount`. Clamping happens on the next regen pass.
    pub fn drain(&mut self, amount: f32) {
        self.current -= amount;
    }

    /// Per-tick regeneration for the controller's current `state`.
    pub fn regen(&mut self, state: MovementState, dt: f32) {
        self.clamp();
        if state.drains_stamina() {
            self.regen_timer = 0.0;
            return;
        }

        self.regen_timer += dt;
        if self.regen_timer < self.regen_cooldown {
            return;
        }
        self.current += self.regen_rate * dt;
        self.clamp();
    }

    /// Full pool with the regen delay cleared, used on respawn.
    pub fn refill(&mut self) {
        self.current = self.max;
        self.regen_timer = 0.0;
    }

    pub fn clamp(&mut self) {
        self.current = self.current.clamp(0.0, self.max);
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> StaminaPool {
        StaminaPool::new(100.0, 10.0, 2.0)
    }

    #[test]
    fn no_regen_while_draining_states() {
        let mut stamina = pool();
        stamina.current = 50.0;
        stamina.regen_timer = 5.0;

        stamina.regen(MovementState::Sprint, 1.0);
        assert_eq!(stamina.current, 50.0);
        assert_eq!(stamina.regen_timer, 0.0);

        stamina.regen(MovementState::Dash, 1.0);
        assert_eq!(stamina.current, 50.0);
    }

    #[test]
    fn regen_waits_for_cooldown() {
        let mut stamina = pool();
        stamina.current = 50.0;

        stamina.regen(MovementState::Idle, 1.0);
        assert_eq!(stamina.current, 50.0);

        stamina.regen(MovementState::Walk, 1.0);
        // Timer reached the cooldown this tick, so this tick regenerates.
        assert_eq!(stamina.current, 60.0);
    }

    #[test]
    fn drain_resets_the_cooldown_window() {
        let mut stamina = pool();
        stamina.current = 50.0;

        stamina.regen(MovementState::Idle, 1.5);
        stamina.regen(MovementState::Sprint, 0.1);
        stamina.regen(MovementState::Idle, 1.5);
        assert_eq!(stamina.current, 50.0);
    }

    #[test]
    fn stays_within_bounds() {
        let mut stamina = pool();
        stamina.current = 99.0;
        stamina.regen_timer = 10.0;
        stamina.regen(MovementState::Idle, 1.0);
        assert_eq!(stamina.current, 100.0);

        stamina.drain(150.0);
        stamina.regen(MovementState::Sprint, 0.1);
        assert_eq!(stamina.current, 0.0);
        assert_eq!(stamina.fraction(), 0.0);
    }

    #[test]
    fn refill_restores_full_pool() {
        let mut stamina = pool();
        stamina.drain(70.0);
        stamina.regen_timer = 1.5;
        assert_eq!(stamina.fraction(), 0.3);

        stamina.refill();
        assert_eq!(stamina.current, 100.0);
        assert_eq!(stamina.regen_timer, 0.0);
        assert_eq!(stamina.fraction(), 1.0);
    }
}
