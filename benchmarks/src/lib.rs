//! Shared setup helpers for rein-contact benchmarks.
//!
//! ## Running
//!
//! Wall-clock (criterion):
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench contact
//!
//! iai-callgrind (instruction counts, requires valgrind):
//!   cargo install iai-callgrind-runner
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench contact_iai
//!
//! Filter by group:
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench contact -- solver

use glam::Vec3;
use rein_contact::physics::{BodySet, ContactConstraint, RigidBody};

const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

// ---------------------------------------------------------------------------
// Scenes
// ---------------------------------------------------------------------------

/// A vertical stack of `n` unit spheres resting on a static ground sphere.
///
/// Every sphere after the first shares a body with the contact below it.
pub fn setup_sphere_stack(n: usize) -> (BodySet, Vec<ContactConstraint>) {
    let mut bodies = BodySet::with_capacity(n + 1);
    let mut rows = Vec::with_capacity(n);

    let mut below = bodies.insert(RigidBody::new_static());
    for i in 0..n {
        let position = Vec3::new(0.0, 2.0 * (i + 1) as f32 - 0.005, 0.0);
        let body = bodies.insert(
            RigidBody::new_dynamic(1.0, Vec3::splat(0.4))
                .with_position(position)
                .with_force(GRAVITY),
        );
        rows.push(
            ContactConstraint::new(below, body)
                .with_normal(Vec3::Y)
                .with_offsets(Vec3::Y, -Vec3::Y),
        );
        below = body;
    }

    (bodies, rows)
}

/// `n` independent off-centre contacts between pairs of spinning boxes.
pub fn setup_independent_pairs(n: usize) -> (BodySet, Vec<ContactConstraint>) {
    let mut bodies = BodySet::with_capacity(2 * n);
    let mut rows = Vec::with_capacity(n);

    for i in 0..n {
        let x = i as f32 * 4.0;
        let a = bodies.insert(
            RigidBody::new_dynamic(2.0, Vec3::new(0.7, 0.9, 1.1))
                .with_position(Vec3::new(x, 0.0, 0.0))
                .with_linear_velocity(Vec3::new(0.0, 1.0, 0.0))
                .with_angular_velocity(Vec3::new(0.1, 0.0, 0.2)),
        );
        let b = bodies.insert(
            RigidBody::new_dynamic(1.0, Vec3::new(0.4, 0.4, 0.4))
                .with_position(Vec3::new(x + 0.2, 1.0, 0.1))
                .with_linear_velocity(Vec3::new(0.0, -1.0, 0.0)),
        );
        rows.push(
            ContactConstraint::new(a, b)
                .with_normal(Vec3::Y)
                .with_offsets(Vec3::new(0.1, 0.5, 0.05), Vec3::new(-0.1, -0.5, -0.05)),
        );
    }

    (bodies, rows)
}

/// ECS world holding `n` falling spheres and one static ground body.
pub fn setup_body_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    world.spawn((RigidBody::new_static(),));
    for i in 0..n {
        world.spawn((RigidBody::new_dynamic(1.0, Vec3::splat(0.4))
            .with_position(Vec3::new(i as f32 * 2.5, 1.0, 0.0))
            .with_force(GRAVITY),));
    }
    world
}
