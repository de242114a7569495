//! Frame-time driven timing primitives.
//!
//! Every suspended behaviour in the game (dash, attack wind-up, roaming,
//! waiting before returning home) is a small resumable timer advanced by the
//! frame delta. Nothing here sleeps or reads a wall clock.

use bevy::prelude::*;

/// Clock snapshot for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tick {
    /// Seconds since the app started.
    pub now: f32,
    /// Seconds elapsed since the previous tick.
    pub dt: f32,
}

impl Tick {
    pub fn new(now: f32, dt: f32) -> Self {
        Self { now, dt }
    }

    /// Build a tick from Bevy's virtual clock.
    pub fn from_time(time: &Time) -> Self {
        Self {
            now: time.elapsed_secs(),
            dt: time.delta_secs(),
        }
    }
}

/// "Time since last action" gate.
///
/// Ready when no action has happened yet, or when `now >= last + interval`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    pub interval: f32,
    last: Option<f32>,
}

impl Cooldown {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn ready(&self, now: f32) -> bool {
        match self.last {
            Some(last) => now >= last + self.interval,
            None => true,
        }
    }

    /// Record an action at `now`.
    pub fn trigger(&mut self, now: f32) {
        self.last = Some(now);
    }

    /// Change the required interval without touching the last timestamp.
    pub fn set_interval(&mut self, interval: f32) {
        self.interval = interval;
    }
}

/// Accumulating one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseTimer {
    pub duration: f32,
    pub elapsed: f32,
}

impl PhaseTimer {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
        }
    }

    /// Accumulate `dt` and report whether the timer has run out.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Fraction of the duration elapsed, 1.0 for zero-length timers.
    pub fn fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }
}
