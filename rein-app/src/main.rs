//! Drops a column of spheres onto a static ground and prints the resting state.
//!
//! RUST_LOG=debug cargo run --manifest-path rein-app/Cargo.toml

use anyhow::Context;
use glam::Vec3;
use rein_contact::ecs::{gather_bodies, BodyBinding};
use rein_contact::physics::{ContactConstraint, GaussSeidelSolver, RigidBody, SolverConfig};

const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);
const RADIUS: f32 = 0.5;
const DT: f32 = 1.0 / 60.0;
const STEPS: usize = 240;

/// Marker for the static ground body.
struct Ground;

/// Sphere-on-sphere and sphere-on-ground contacts for the current positions.
fn detect_contacts(world: &hecs::World, binding: &BodyBinding) -> Vec<ContactConstraint> {
    let ground = world
        .query::<&Ground>()
        .iter()
        .next()
        .and_then(|(entity, _)| binding.handle(entity));

    let mut contacts = Vec::new();
    let spheres: Vec<_> = binding
        .bodies
        .iter()
        .filter(|(handle, _)| Some(*handle) != ground)
        .collect();

    if let Some(ground) = ground {
        for (handle, body) in &spheres {
            let depth = body.position.y - RADIUS;
            if depth < 0.0 {
                contacts.push(
                    ContactConstraint::new(ground, *handle)
                        .with_normal(Vec3::Y)
                        .with_offsets(
                            Vec3::new(body.position.x, 0.0, body.position.z),
                            Vec3::new(0.0, -RADIUS, 0.0),
                        )
                        .with_penetration(depth),
                );
            }
        }
    }

    for (i, (ha, a)) in spheres.iter().enumerate() {
        for (hb, b) in &spheres[i + 1..] {
            let delta = b.position - a.position;
            let distance = delta.length();
            if distance >= 2.0 * RADIUS || distance <= f32::EPSILON {
                continue;
            }
            let normal = delta / distance;
            contacts.push(
                ContactConstraint::new(*ha, *hb)
                    .with_normal(normal)
                    .with_offsets(normal * RADIUS, -normal * RADIUS)
                    .with_penetration(distance - 2.0 * RADIUS),
            );
        }
    }

    contacts
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut world = hecs::World::new();
    world.spawn((RigidBody::new_static(), Ground));
    let inertia = Vec3::splat(0.4 * RADIUS * RADIUS);
    let spheres: Vec<_> = (0..4)
        .map(|i| {
            let height = RADIUS + 0.1 + i as f32 * (2.0 * RADIUS + 0.05);
            world.spawn((RigidBody::new_dynamic(1.0, inertia)
                .with_position(Vec3::new(0.0, height, 0.0)),))
        })
        .collect();

    let mut solver = GaussSeidelSolver::new(
        SolverConfig::spook(1e7, 3.0, DT).context("invalid solver parameters")?,
    );
    solver.config_mut().iterations = 20;

    for step in 0..STEPS {
        for (_, body) in world.query_mut::<&mut RigidBody>() {
            body.force = if body.is_dynamic() {
                GRAVITY * body.mass()
            } else {
                Vec3::ZERO
            };
        }

        let mut binding = gather_bodies(&world);
        let mut contacts = detect_contacts(&world, &binding);
        let stats = solver
            .solve(&mut contacts, &mut binding.bodies)
            .with_context(|| format!("solver failed at step {step}"))?;

        // Semi-implicit Euler; rotation is not integrated in this demo.
        for (_, body) in binding.bodies.iter_mut() {
            body.linear_velocity += body.force * body.inv_mass * DT;
            body.position += body.linear_velocity * DT;
        }
        binding.write_back(&mut world);

        if step % 60 == 0 {
            log::info!(
                "step {step}: {} contacts, {} sweeps, converged = {}",
                contacts.len(),
                stats.iterations,
                stats.converged
            );
        }
    }

    for (i, entity) in spheres.iter().enumerate() {
        let body = world.get::<&RigidBody>(*entity)?;
        println!(
            "sphere {i}: y = {:.4}, vy = {:.4}",
            body.position.y, body.linear_velocity.y
        );
    }

    Ok(())
}
