//! Collider shapes, category tags and contact/trigger notifications.
//!
//! `detect_contacts` runs after integration. It pushes dynamic bodies out of
//! static solids, then diffs this frame's contact and overlap pairs against
//! the previous frame's to emit enter/exit events. Consumers decide what a
//! contact means by looking at the other entity's [`Tag`].
//!
//! All shapes are treated as axis-aligned boxes centred on the entity's
//! translation; rotation and scale are ignored.
use super::RigidBody;
use bevy::prelude::*;
use std::borrow::Cow;
use std::collections::HashSet;

/// Label carried by walkable surfaces.
pub const GROUND_TAG: &str = "Ground";
/// Label carried by the player body.
pub const PLAYER_TAG: &str = "Player";

/// Gap within which a resting body still counts as touching a solid.
pub const CONTACT_SKIN: f32 = 0.01;

/// Category label on a collider. Comparison is exact and case-sensitive.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Tag(pub Cow<'static, str>);

impl Tag {
    #[must_use]
    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Self(label.into())
    }

    #[must_use]
    pub fn ground() -> Self {
        Self::new(GROUND_TAG)
    }

    #[must_use]
    pub fn player() -> Self {
        Self::new(PLAYER_TAG)
    }

    #[must_use]
    pub fn is(&self, label: &str) -> bool {
        self.0 == label
    }
}

/// Collision shape.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    Cuboid { half_extents: Vec3 },
    Sphere { radius: f32 },
}

impl Collider {
    #[must_use]
    pub fn cuboid(x: f32, y: f32, z: f32) -> Self {
        Collider::Cuboid { half_extents: Vec3::new(x, y, z) * 0.5 }
    }

    #[must_use]
    pub fn sphere(radius: f32) -> Self {
        Collider::Sphere { radius }
    }

    /// World-space bounds of this shape centred at `center`.
    #[must_use]
    pub fn bounds(&self, center: Vec3) -> Bounds {
        let half = match *self {
            Collider::Cuboid { half_extents } => half_extents.abs(),
            Collider::Sphere { radius } => Vec3::splat(radius.abs()),
        };
        Bounds { min: center - half, max: center + half }
    }
}

/// Marks a collider as a trigger volume: it reports overlaps but never blocks.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Sensor;

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    /// True when the boxes overlap or are separated by at most `skin` on every axis.
    #[must_use]
    pub fn overlaps(&self, other: &Bounds, skin: f32) -> bool {
        self.min.cmple(other.max + skin).all() && self.max.cmpge(other.min - skin).all()
    }

    /// Smallest translation that moves `self` out of `solid`, if they interpenetrate.
    #[must_use]
    pub fn push_out(&self, solid: &Bounds) -> Option<Vec3> {
        let up = solid.max - self.min;
        let down = self.max - solid.min;
        if up.cmple(Vec3::ZERO).any() || down.cmple(Vec3::ZERO).any() {
            return None;
        }

        let candidates = [
            Vec3::new(up.x, 0.0, 0.0),
            Vec3::new(-down.x, 0.0, 0.0),
            Vec3::new(0.0, up.y, 0.0),
            Vec3::new(0.0, -down.y, 0.0),
            Vec3::new(0.0, 0.0, up.z),
            Vec3::new(0.0, 0.0, -down.z),
        ];
        candidates
            .into_iter()
            .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
    }
}

/// A dynamic body started touching a solid collider.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionStarted {
    pub body: Entity,
    pub other: Entity,
}

/// A dynamic body stopped touching a solid collider.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEnded {
    pub body: Entity,
    pub other: Entity,
}

/// A dynamic body entered a sensor volume.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEntered {
    pub sensor: Entity,
    pub other: Entity,
}

/// A dynamic body left a sensor volume (or the sensor was despawned).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerExited {
    pub sensor: Entity,
    pub other: Entity,
}

/// Pairs in contact at the end of the previous frame.
#[derive(Resource, Debug, Default)]
pub struct Contacts {
    /// `(body, solid)` pairs.
    pub touching: HashSet<(Entity, Entity)>,
    /// `(sensor, body)` pairs.
    pub overlapping: HashSet<(Entity, Entity)>,
}

type SolidFilter = (Without<RigidBody>, Without<Sensor>);
type SensorFilter = (With<Sensor>, Without<RigidBody>);

/// Resolve penetration against solids and emit contact/trigger transitions.
#[allow(clippy::too_many_arguments)]
pub fn detect_contacts(
    mut bodies: Query<(Entity, &mut Transform, &mut RigidBody, &Collider)>,
    solids: Query<(Entity, &Transform, &Collider), SolidFilter>,
    sensors: Query<(Entity, &Transform, &Collider), SensorFilter>,
    mut contacts: ResMut<Contacts>,
    mut started: EventWriter<CollisionStarted>,
    mut ended: EventWriter<CollisionEnded>,
    mut entered: EventWriter<TriggerEntered>,
    mut exited: EventWriter<TriggerExited>,
) {
    let mut touching = HashSet::new();
    let mut overlapping = HashSet::new();

    for (body_entity, mut tf, mut body, shape) in &mut bodies {
        for (solid_entity, solid_tf, solid_shape) in &solids {
            let solid = solid_shape.bounds(solid_tf.translation);
            if let Some(push) = shape.bounds(tf.translation).push_out(&solid) {
                tf.translation += push;
                body.stop_along(push);
            }
            if shape.bounds(tf.translation).overlaps(&solid, CONTACT_SKIN) {
                touching.insert((body_entity, solid_entity));
            }
        }

        let bounds = shape.bounds(tf.translation);
        for (sensor_entity, sensor_tf, sensor_shape) in &sensors {
            if bounds.overlaps(&sensor_shape.bounds(sensor_tf.translation), 0.0) {
                overlapping.insert((sensor_entity, body_entity));
            }
        }
    }

    for &(body, other) in touching.difference(&contacts.touching) {
        started.send(CollisionStarted { body, other });
    }
    for &(body, other) in contacts.touching.difference(&touching) {
        ended.send(CollisionEnded { body, other });
    }
    for &(sensor, other) in overlapping.difference(&contacts.overlapping) {
        entered.send(TriggerEntered { sensor, other });
    }
    for &(sensor, other) in contacts.overlapping.difference(&overlapping) {
        exited.send(TriggerExited { sensor, other });
    }

    contacts.touching = touching;
    contacts.overlapping = overlapping;
}
