//! Rapier-backed area sensor.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::ports::{world_position, AreaSensor, SensorShape};

/// Height of the sensing volume above the floor.
const SENSOR_HEIGHT: f32 = 1.0;

/// Overlap queries against the Rapier collider set.
pub struct RapierAreaSensor<'a> {
    context: &'a RapierContext,
    exclude: Option<Entity>,
}

impl<'a> RapierAreaSensor<'a> {
    pub fn new(context: &'a RapierContext) -> Self {
        Self {
            context,
            exclude: None,
        }
    }

    /// Never report `entity` (usually the querying entity itself).
    pub fn excluding(mut self, entity: Entity) -> Self {
        self.exclude = Some(entity);
        self
    }
}

impl AreaSensor for RapierAreaSensor<'_> {
    fn query(&self, shape: SensorShape, mask: u32) -> Vec<Entity> {
        let (center, collider) = match shape {
            SensorShape::Ball { center, radius } => (center, Collider::ball(radius)),
            SensorShape::Cuboid {
                center,
                half_extents,
            } => (
                center,
                Collider::cuboid(half_extents.x, SENSOR_HEIGHT, half_extents.y),
            ),
        };

        let mut filter = QueryFilter::default()
            .groups(CollisionGroups::new(Group::ALL, Group::from_bits_truncate(mask)));
        if let Some(entity) = self.exclude {
            filter = filter.exclude_collider(entity);
        }

        let mut hits = Vec::new();
        self.context.intersections_with_shape(
            world_position(center, SENSOR_HEIGHT * 0.5),
            Quat::IDENTITY,
            &collider,
            filter,
            |entity| {
                hits.push(entity);
                true
            },
        );
        hits
    }
}
