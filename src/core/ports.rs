//! Sensor and actuator ports.
//!
//! Behaviour controllers never touch physics, navigation or animation
//! directly. Bevy systems read sensors into plain values, feed them to the
//! controllers, and apply the returned commands through these traits.

use std::collections::{HashMap, VecDeque};

use bevy::prelude::*;

/// Shape of an area query, centred on a point in the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorShape {
    Ball { center: Vec2, radius: f32 },
    /// Axis aligned box given by its half extents.
    Cuboid { center: Vec2, half_extents: Vec2 },
}

/// Read-only overlap query against the world.
pub trait AreaSensor {
    /// All entities overlapping `shape` whose collision groups intersect `mask`,
    /// as a snapshot taken at call time.
    fn query(&self, shape: SensorShape, mask: u32) -> Vec<Entity>;
}

/// Advisory movement target. Pathing itself happens elsewhere.
pub trait Navigator {
    fn set_destination(&mut self, position: Vec2);
}

/// Fire-and-forget presentation signals.
pub trait AnimationSink {
    fn set_trigger(&mut self, name: &str);
    fn set_bool(&mut self, name: &str, value: bool);
}

/// Anything that can be hurt.
pub trait HealthCapability {
    /// Apply `amount` damage caused by `source`. Returns the damage actually dealt.
    fn take_damage(&mut self, amount: f32, source: Entity) -> f32;
}

/// Triggers kept by [`Animator`] when nothing drains it.
pub const TRIGGER_LOG_CAPACITY: usize = 32;

/// Animation parameter sink.
///
/// Keeps a bounded log of triggers and the bool parameters so presentation
/// code (or a test) can read them back. Once the log is full the oldest
/// entry's buffer is reused, so steady-state ticks don't allocate.
#[derive(Component, Debug, Default, Clone)]
pub struct Animator {
    bools: HashMap<String, bool>,
    /// Undrained triggers, oldest first.
    trigger_log: VecDeque<String>,
}

impl Animator {
    pub fn get_bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    /// Most recent undrained trigger.
    pub fn last_trigger(&self) -> Option<&str> {
        self.trigger_log.back().map(String::as_str)
    }

    pub fn drain_triggers(&mut self) -> impl Iterator<Item = String> + '_ {
        self.trigger_log.drain(..)
    }
}

impl AnimationSink for Animator {
    fn set_trigger(&mut self, name: &str) {
        let mut entry = if self.trigger_log.len() >= TRIGGER_LOG_CAPACITY {
            self.trigger_log.pop_front().unwrap_or_default()
        } else {
            String::with_capacity(name.len())
        };
        entry.clear();
        entry.push_str(name);
        self.trigger_log.push_back(entry);
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        match self.bools.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.bools.insert(name.to_string(), value);
            }
        }
    }
}

/// Navigation actuator consumed by the steering system.
#[derive(Component, Debug, Clone)]
pub struct NavAgent {
    pub destination: Option<Vec2>,
    /// Units per second.
    pub speed: f32,
}

impl NavAgent {
    pub fn new(speed: f32) -> Self {
        Self {
            destination: None,
            speed,
        }
    }

    /// Move `position` toward the destination by at most `speed * dt`,
    /// landing exactly on it once within reach.
    pub fn step(&self, position: Vec2, dt: f32) -> Vec2 {
        let Some(destination) = self.destination else {
            return position;
        };

        let offset = destination - position;
        let max_step = self.speed * dt;
        if offset.length() <= max_step {
            destination
        } else {
            position + offset.normalize() * max_step
        }
    }
}

impl Navigator for NavAgent {
    fn set_destination(&mut self, position: Vec2) {
        self.destination = Some(position);
    }
}

/// Project a world translation onto the XZ play plane.
pub fn plane_position(translation: Vec3) -> Vec2 {
    Vec2::new(translation.x, translation.z)
}

/// Lift a play-plane position back to world space at height `y`.
pub fn world_position(position: Vec2, y: f32) -> Vec3 {
    Vec3::new(position.x, y, position.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animator_records_triggers_and_bools() {
        let mut animator = Animator::default();
        animator.set_trigger("Walk");
        animator.set_trigger("Sprint");
        animator.set_bool("IsDash", true);
        animator.set_bool("IsDash", false);
        animator.set_bool("IsDash", true);

        assert_eq!(animator.last_trigger(), Some("Sprint"));
        assert!(animator.get_bool("IsDash"));
        assert!(!animator.get_bool("Missing"));
        assert_eq!(animator.drain_triggers().collect::<Vec<_>>(), vec!["Walk", "Sprint"]);
        assert_eq!(animator.last_trigger(), None);
    }

    #[test]
    fn animator_log_is_bounded() {
        let mut animator = Animator::default();
        for i in 0..TRIGGER_LOG_CAPACITY + 3 {
            animator.set_trigger(&format!("T{i}"));
        }

        let log: Vec<String> = animator.drain_triggers().collect();
        assert_eq!(log.len(), TRIGGER_LOG_CAPACITY);
        assert_eq!(log[0], "T3");
        assert_eq!(log[TRIGGER_LOG_CAPACITY - 1], format!("T{}", TRIGGER_LOG_CAPACITY + 2));
    }

    #[test]
    fn nav_agent_snaps_onto_destination() {
        let mut agent = NavAgent::new(2.0);
        agent.set_destination(Vec2::new(1.0, 0.0));

        let halfway = agent.step(Vec2::ZERO, 0.25);
        assert_eq!(halfway, Vec2::new(0.5, 0.0));

        let arrived = agent.step(halfway, 0.5);
        assert_eq!(arrived, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn nav_agent_without_destination_stays_put() {
        let agent = NavAgent::new(5.0);
        assert_eq!(agent.step(Vec2::new(3.0, 4.0), 1.0), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn plane_round_trip_keeps_height() {
        let world = world_position(Vec2::new(2.0, -3.0), 0.5);
        assert_eq!(world, Vec3::new(2.0, 0.5, -3.0));
        assert_eq!(plane_position(world), Vec2::new(2.0, -3.0));
    }
}
