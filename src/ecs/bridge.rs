//! Bridge between hecs entities and solver body storage.

use std::collections::HashMap;

use crate::physics::{BodyHandle, BodySet, RigidBody};

/// A [`BodySet`] gathered from a world, remembering which entity each body came from.
#[derive(Debug, Clone, Default)]
pub struct BodyBinding {
    pub bodies: BodySet,
    entities: Vec<hecs::Entity>,
    handles: HashMap<hecs::Entity, BodyHandle>,
}

impl BodyBinding {
    /// Handle of the body gathered from `entity`.
    pub fn handle(&self, entity: hecs::Entity) -> Option<BodyHandle> {
        self.handles.get(&entity).copied()
    }

    /// Entity a body was gathered from.
    pub fn entity(&self, handle: BodyHandle) -> Option<hecs::Entity> {
        self.entities.get(handle.index()).copied()
    }

    /// Copy every body back onto its entity's [`RigidBody`] component.
    ///
    /// Returns the number of components updated. Entities despawned since
    /// [`gather_bodies`] are skipped.
    pub fn write_back(&self, world: &mut hecs::World) -> usize {
        let mut written = 0;
        for (handle, body) in self.bodies.iter() {
            let entity = self.entities[handle.index()];
            if let Ok(mut component) = world.get::<&mut RigidBody>(entity) {
                *component = body.clone();
                written += 1;
            }
        }
        written
    }
}

/// Copy every [`RigidBody`] component in `world` into a fresh [`BodySet`].
pub fn gather_bodies(world: &hecs::World) -> BodyBinding {
    let mut binding = BodyBinding::default();

    for (entity, body) in world.query::<&RigidBody>().iter() {
        let handle = binding.bodies.insert(body.clone());
        binding.entities.push(entity);
        binding.handles.insert(entity, handle);
    }

    tracing::debug!(bodies = binding.bodies.len(), "gathered rigid bodies");
    binding
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::physics::{ContactConstraint, GaussSeidelSolver, SolverConfig};

    #[test]
    fn test_gather_and_lookup() {
        let mut world = hecs::World::new();
        let ground = world.spawn((RigidBody::new_static(),));
        let ball = world.spawn((RigidBody::new_particle(1.0),));
        world.spawn((Vec3::ZERO,));

        let binding = gather_bodies(&world);

        assert_eq!(binding.bodies.len(), 2);
        let ground_handle = binding.handle(ground).unwrap();
        let ball_handle = binding.handle(ball).unwrap();
        assert_ne!(ground_handle, ball_handle);
        assert_eq!(binding.entity(ball_handle), Some(ball));
        assert_eq!(binding.bodies[ground_handle].inv_mass, 0.0);
    }

    #[test]
    fn test_solver_round_trip_through_world() {
        let mut world = hecs::World::new();
        let ground = world.spawn((RigidBody::new_static(),));
        let ball = world.spawn((RigidBody::new_dynamic(1.0, Vec3::ONE)
            .with_position(Vec3::new(0.0, 2.0, 0.0))
            .with_linear_velocity(Vec3::new(0.0, -1.0, 0.0)),));

        let mut binding = gather_bodies(&world);
        let mut rows = vec![ContactConstraint::new(
            binding.handle(ground).unwrap(),
            binding.handle(ball).unwrap(),
        )
        .with_normal(Vec3::Y)
        .with_offsets(Vec3::Y, -Vec3::Y)];

        let mut solver = GaussSeidelSolver::new(SolverConfig::default());
        solver.solve(&mut rows, &mut binding.bodies).unwrap();

        assert_eq!(binding.write_back(&mut world), 2);
        let rb = world.get::<&RigidBody>(ball).unwrap();
        assert!(
            rb.linear_velocity.y > -1.0,
            "contact should slow the ball: {:?}",
            rb.linear_velocity
        );
    }

    #[test]
    fn test_write_back_skips_despawned() {
        let mut world = hecs::World::new();
        let a = world.spawn((RigidBody::new_static(),));
        world.spawn((RigidBody::new_static(),));

        let binding = gather_bodies(&world);
        world.despawn(a).unwrap();

        assert_eq!(binding.write_back(&mut world), 1);
    }
}
