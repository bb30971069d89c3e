//! Rigid body state as seen by the constraint solver.
//!
//! Bodies carry their real velocities plus two solver-local accumulators
//! (`linear_delta` and `angular_delta`). Constraint rows only ever write to
//! the accumulators; [`RigidBody::apply_deltas`] merges them once a pass is done.

use std::ops::{Index, IndexMut};

use glam::Vec3;

use super::error::{PhysicsError, Result};

/// Rigid body type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigidBodyType {
    /// Affected by forces and collisions.
    Dynamic,
    /// Immovable.
    Static,
    /// Velocity controlled by user, but pushes dynamic bodies.
    Kinematic,
}

/// Reciprocal that maps non-positive input to zero (infinite mass / inertia).
#[inline]
fn recip_or_zero(value: f32) -> f32 {
    if value > 0.0 {
        1.0 / value
    } else {
        0.0
    }
}

/// A rigid body referenced by constraint rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub body_type: RigidBodyType,
    /// Centre of mass in world space.
    pub position: Vec3,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    /// External force accumulated for the current step.
    pub force: Vec3,
    /// External torque accumulated for the current step.
    pub torque: Vec3,
    /// Inverse mass. Exactly zero for static and kinematic bodies.
    pub inv_mass: f32,
    /// Diagonal of the inverse inertia tensor.
    pub inv_inertia: Vec3,
    /// Solver-local linear velocity correction.
    pub linear_delta: Vec3,
    /// Solver-local angular velocity correction. `None` when the body does
    /// not track rotation (particles).
    pub angular_delta: Option<Vec3>,
}

impl RigidBody {
    /// Create a dynamic body with the given mass and principal moments of inertia.
    ///
    /// Non-positive mass or inertia components map to a zero inverse.
    pub fn new_dynamic(mass: f32, inertia: Vec3) -> Self {
        Self {
            inv_mass: recip_or_zero(mass),
            inv_inertia: Vec3::new(
                recip_or_zero(inertia.x),
                recip_or_zero(inertia.y),
                recip_or_zero(inertia.z),
            ),
            ..Self::zeroed(RigidBodyType::Dynamic)
        }
    }

    /// Create a dynamic point mass without rotational state.
    pub fn new_particle(mass: f32) -> Self {
        Self {
            inv_mass: recip_or_zero(mass),
            angular_delta: None,
            ..Self::zeroed(RigidBodyType::Dynamic)
        }
    }

    /// Create a static body (infinite mass and inertia).
    pub fn new_static() -> Self {
        Self::zeroed(RigidBodyType::Static)
    }

    /// Create a kinematic body moving at a prescribed velocity.
    pub fn new_kinematic(linear_velocity: Vec3) -> Self {
        Self {
            linear_velocity,
            ..Self::zeroed(RigidBodyType::Kinematic)
        }
    }

    fn zeroed(body_type: RigidBodyType) -> Self {
        Self {
            body_type,
            position: Vec3::ZERO,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
            inv_mass: 0.0,
            inv_inertia: Vec3::ZERO,
            linear_delta: Vec3::ZERO,
            angular_delta: Some(Vec3::ZERO),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_linear_velocity(mut self, velocity: Vec3) -> Self {
        self.linear_velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, velocity: Vec3) -> Self {
        self.angular_velocity = velocity;
        self
    }

    pub fn with_force(mut self, force: Vec3) -> Self {
        self.force = force;
        self
    }

    pub fn with_torque(mut self, torque: Vec3) -> Self {
        self.torque = torque;
        self
    }

    /// Mass of the body, `f32::INFINITY` when the inverse mass is zero.
    pub fn mass(&self) -> f32 {
        if self.inv_mass > 0.0 {
            1.0 / self.inv_mass
        } else {
            f32::INFINITY
        }
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.body_type == RigidBodyType::Dynamic
    }

    /// Angular accumulator, zero when rotation is not tracked.
    #[inline]
    pub fn angular_delta_or_zero(&self) -> Vec3 {
        self.angular_delta.unwrap_or(Vec3::ZERO)
    }

    /// Zero both accumulators ahead of a solver pass.
    pub fn reset_deltas(&mut self) {
        self.linear_delta = Vec3::ZERO;
        if let Some(w) = self.angular_delta.as_mut() {
            *w = Vec3::ZERO;
        }
    }

    /// Merge the accumulators into the real velocities and zero them.
    pub fn apply_deltas(&mut self) {
        self.linear_velocity += self.linear_delta;
        if let Some(w) = self.angular_delta {
            self.angular_velocity += w;
        }
        self.reset_deltas();
    }
}

/// Index of a body inside a [`BodySet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) usize);

impl BodyHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Flat storage for the bodies a solver pass works on.
#[derive(Debug, Clone, Default)]
pub struct BodySet {
    bodies: Vec<RigidBody>,
}

impl BodySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bodies: Vec::with_capacity(capacity),
        }
    }

    /// Add a body and return its handle.
    pub fn insert(&mut self, body: RigidBody) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle(self.bodies.len() - 1)
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.0)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, body)| (BodyHandle(i), body))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut RigidBody)> {
        self.bodies
            .iter_mut()
            .enumerate()
            .map(|(i, body)| (BodyHandle(i), body))
    }

    /// Borrow two distinct bodies mutably at the same time.
    pub fn pair_mut(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Result<(&mut RigidBody, &mut RigidBody)> {
        let len = self.bodies.len();
        if a.0 >= len {
            return Err(PhysicsError::UnknownBody(a));
        }
        if b.0 >= len {
            return Err(PhysicsError::UnknownBody(b));
        }
        if a == b {
            return Err(PhysicsError::SelfContact(a));
        }

        if a.0 < b.0 {
            let (head, tail) = self.bodies.split_at_mut(b.0);
            Ok((&mut head[a.0], &mut tail[0]))
        } else {
            let (head, tail) = self.bodies.split_at_mut(a.0);
            Ok((&mut tail[0], &mut head[b.0]))
        }
    }

    /// Zero the accumulators of every body.
    pub fn reset_deltas(&mut self) {
        for body in &mut self.bodies {
            body.reset_deltas();
        }
    }

    /// Merge every body's accumulators into its velocities.
    pub fn apply_deltas(&mut self) {
        for body in &mut self.bodies {
            body.apply_deltas();
        }
    }
}

impl Index<BodyHandle> for BodySet {
    type Output = RigidBody;

    fn index(&self, handle: BodyHandle) -> &RigidBody {
        &self.bodies[handle.0]
    }
}

impl IndexMut<BodyHandle> for BodySet {
    fn index_mut(&mut self, handle: BodyHandle) -> &mut RigidBody {
        &mut self.bodies[handle.0]
    }
}
