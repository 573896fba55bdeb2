//! Scripted probe and input for controller tests

use glam::{Vec2, Vec3};
use wallrun_physics::{Capsule, CollisionProbe, RayHit, SurfaceId, SurfaceMask};

use crate::input::InputSource;

/// Collision probe whose answers are set directly by the test
#[derive(Debug, Clone)]
pub struct ScriptedProbe {
    pub grounded: bool,
    /// Feet position
    pub position: Vec3,
    /// Wall-run surfaces and the closest point each one reports
    pub walls: Vec<(SurfaceId, Vec3)>,
    /// When false, no wall-run surfaces overlap the capsule
    pub walls_enabled: bool,
    /// Height of an infinite ground plane for raycasts
    pub ground_y: Option<f32>,
    /// Every delta passed to `move_by`
    pub moves: Vec<Vec3>,
}

impl Default for ScriptedProbe {
    fn default() -> Self {
        Self {
            grounded: false,
            position: Vec3::ZERO,
            walls: Vec::new(),
            walls_enabled: true,
            ground_y: None,
            moves: Vec::new(),
        }
    }
}

impl ScriptedProbe {
    pub fn grounded() -> Self {
        Self {
            grounded: true,
            ..Default::default()
        }
    }

    pub fn add_wall(&mut self, surface: SurfaceId, closest_point: Vec3) {
        self.walls.push((surface, closest_point));
    }
}

impl CollisionProbe for ScriptedProbe {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn capsule(&self) -> Capsule {
        Capsule::standing(self.position, 1.8, 0.4)
    }

    fn wall_run_surfaces(&self, _capsule: &Capsule) -> Vec<SurfaceId> {
        if !self.walls_enabled {
            return Vec::new();
        }
        self.walls.iter().map(|(surface, _)| *surface).collect()
    }

    fn closest_point(&self, surface: SurfaceId, _position: Vec3) -> Option<Vec3> {
        self.walls
            .iter()
            .find(|(id, _)| *id == surface)
            .map(|(_, point)| *point)
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: SurfaceMask) -> Option<RayHit> {
        let ground_y = self.ground_y?;
        if !mask.contains(SurfaceMask::GROUND) || direction.y >= 0.0 {
            return None;
        }
        let distance = (origin.y - ground_y) / -direction.y;
        if !(0.0..=max_distance).contains(&distance) {
            return None;
        }
        Some(RayHit {
            surface: SurfaceId(0),
            distance,
            point: origin + direction * distance,
            normal: Vec3::Y,
        })
    }

    fn move_by(&mut self, delta: Vec3) -> Vec3 {
        self.moves.push(delta);
        self.position += delta;
        delta
    }

    fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.grounded = false;
    }
}

/// Input source with directly settable values
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pub axis: Vec2,
    /// Pending jump edge, cleared when read
    pub jump: bool,
    pub crouch: bool,
}

impl InputSource for ScriptedInput {
    fn movement_axis(&self) -> Vec2 {
        self.axis
    }

    fn look_axis(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn take_jump_edge(&mut self) -> bool {
        std::mem::take(&mut self.jump)
    }

    fn crouch_held(&self) -> bool {
        self.crouch
    }
}
