//! Wallrun Physics - Collision queries using rapier3d
//!
//! Provides the [`CollisionProbe`] interface the movement controller consumes,
//! plus a rapier3d-backed world, kinematic character body and probe.

mod character_body;
mod probe;
mod rapier_probe;

pub use character_body::{CharacterBody, CharacterBodyConfig};
pub use probe::{Capsule, CollisionProbe, RayHit, SurfaceId, SurfaceMask};
pub use rapier_probe::PhysicsProbe;

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::parry::query::PointQuery;
use rapier3d::parry::shape::Capsule as CapsuleShape;
use rapier3d::prelude::*;

/// Friction applied to static level geometry
const SURFACE_FRICTION: f32 = 0.7;

impl From<ColliderHandle> for SurfaceId {
    fn from(handle: ColliderHandle) -> Self {
        let (index, generation) = handle.into_raw_parts();
        SurfaceId(((generation as u64) << 32) | index as u64)
    }
}

impl From<SurfaceId> for ColliderHandle {
    fn from(id: SurfaceId) -> Self {
        ColliderHandle::from_raw_parts(id.0 as u32, (id.0 >> 32) as u32)
    }
}

/// Collision groups for a collider that belongs to `membership`
fn membership_groups(membership: SurfaceMask) -> InteractionGroups {
    InteractionGroups::new(Group::from_bits_truncate(membership.0), Group::ALL)
}

/// Collision groups for a query that only sees surfaces in `mask`
fn query_groups(mask: SurfaceMask) -> InteractionGroups {
    InteractionGroups::new(Group::ALL, Group::from_bits_truncate(mask.0))
}

fn to_point(v: Vec3) -> Point<Real> {
    point![v.x, v.y, v.z]
}

fn to_vec3(p: &Point<Real>) -> Vec3 {
    Vec3::new(p.x, p.y, p.z)
}

/// Static level geometry and the query pipeline over it
pub struct PhysicsWorld {
    /// Rigid body storage
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    /// Query pipeline for raycasts and shape casts
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new, empty physics world
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Rebuild the query acceleration structure after colliders changed
    pub fn update_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Query pipeline (for the character controller sweep)
    pub(crate) fn query_pipeline(&self) -> &QueryPipeline {
        &self.query_pipeline
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        let handle = self.collider_set.insert(collider);
        self.update_queries();
        handle
    }

    /// Get a collider by handle
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Create a ground plane collider
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .friction(SURFACE_FRICTION)
            .restitution(0.0)
            .collision_groups(membership_groups(SurfaceMask::GROUND))
            .build();
        self.add_static_collider(ground)
    }

    /// Create a static walkable box collider
    pub fn create_static_box(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        self.create_box(half_extents, position, SurfaceMask::GROUND)
    }

    /// Create a static box the character can wall-run along
    pub fn create_wall_run_surface(&mut self, half_extents: Vec3, position: Vec3) -> ColliderHandle {
        self.create_box(half_extents, position, SurfaceMask::WALL_RUN)
    }

    fn create_box(&mut self, half_extents: Vec3, position: Vec3, membership: SurfaceMask) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .friction(SURFACE_FRICTION)
            .collision_groups(membership_groups(membership))
            .build();
        self.add_static_collider(collider)
    }

    /// Cast a ray and get detailed hit information
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: SurfaceMask,
        exclude: Option<ColliderHandle>,
    ) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let ray = Ray::new(to_point(origin), vector![direction.x, direction.y, direction.z]);
        let mut filter = QueryFilter::default().groups(query_groups(mask));
        if let Some(handle) = exclude {
            filter = filter.exclude_collider(handle);
        }

        self.query_pipeline
            .cast_ray_and_get_normal(&self.rigid_body_set, &self.collider_set, &ray, max_distance, true, filter)
            .map(|(handle, intersection)| RayHit {
                surface: handle.into(),
                distance: intersection.time_of_impact,
                point: origin + direction * intersection.time_of_impact,
                normal: Vec3::new(
                    intersection.normal.x,
                    intersection.normal.y,
                    intersection.normal.z,
                ),
            })
    }

    /// All colliders in `mask` overlapping a vertical capsule, sorted by id
    pub fn overlapping(
        &self,
        capsule: &Capsule,
        mask: SurfaceMask,
        exclude: Option<ColliderHandle>,
    ) -> Vec<SurfaceId> {
        let shape = CapsuleShape::new_y(capsule.half_height, capsule.radius);
        let shape_pos = Isometry::translation(capsule.center.x, capsule.center.y, capsule.center.z);
        let mut filter = QueryFilter::default().groups(query_groups(mask));
        if let Some(handle) = exclude {
            filter = filter.exclude_collider(handle);
        }

        let mut found = Vec::new();
        self.query_pipeline.intersections_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &shape_pos,
            &shape,
            filter,
            |handle| {
                found.push(SurfaceId::from(handle));
                true
            },
        );
        found.sort();
        found
    }

    /// Closest point on a collider's surface (or inside it) to `position`
    pub fn closest_point(&self, surface: SurfaceId, position: Vec3) -> Option<Vec3> {
        let collider = self.collider_set.get(ColliderHandle::from(surface))?;
        let projection = collider
            .shape()
            .project_point(collider.position(), &to_point(position), true);
        Some(to_vec3(&projection.point))
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
