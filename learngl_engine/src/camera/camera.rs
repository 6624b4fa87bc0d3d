/// Camera - perspective camera driven by Euler angles.
///
/// The camera holds a world position, a rotation (pitch, yaw, roll in
/// radians; roll is unused) and projection parameters. It derives the
/// front direction, view matrix and projection matrix from them.
///
/// Updates are explicit: mutating `position`, `rotation` or `fov` does
/// not touch the matrices until `update()` is called.

use glam::{Mat4, Vec3};
use super::{FovZoom, Movement};

/// Largest pitch magnitude reachable through `apply_look` (89 degrees)
pub const DEFAULT_PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Field of view at which `look_sensitivity` returns the base sensitivity
pub const REFERENCE_FOV: f32 = std::f32::consts::FRAC_PI_4;

/// Perspective camera.
///
/// `front` is always unit length. Pitch never leaves
/// `[-pitch_limit, pitch_limit]` through `apply_look`.
#[derive(Debug, Clone)]
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// (pitch, yaw, roll) in radians
    pub rotation: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Width over height
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
    front: Vec3,
    up: Vec3,
    view_matrix: Mat4,
    projection_matrix: Mat4,
    pitch_limit: f32,
    zoom: FovZoom,
}

impl Camera {
    /// Create a camera and compute its front vector and matrices.
    ///
    /// Inputs are stored verbatim.
    pub fn new(position: Vec3, rotation: Vec3, fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position,
            rotation,
            fov,
            aspect,
            near,
            far,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            pitch_limit: DEFAULT_PITCH_LIMIT,
            zoom: FovZoom::new(fov),
        };
        camera.update();
        camera
    }

    /// Recompute `front`, the view matrix and the projection matrix
    /// from the current position, rotation and projection parameters.
    pub fn update(&mut self) {
        let (pitch, yaw) = (self.rotation.x, self.rotation.y);
        self.front = Vec3::new(
            pitch.cos() * yaw.cos(),
            pitch.sin(),
            pitch.cos() * yaw.sin(),
        )
        .normalize();
        self.view_matrix = Mat4::look_at_rh(self.position, self.position + self.front, self.up);
        self.projection_matrix = Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far);
    }

    // ===== INPUT =====

    /// Turn the camera by a pointer delta in pixels.
    ///
    /// Screen Y grows downward, so a positive `dy` lowers the pitch.
    /// Pitch is clamped to the pitch limit. Call `update()` afterwards.
    pub fn apply_look(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.rotation.y += dx * sensitivity;
        self.rotation.x = (self.rotation.x - dy * sensitivity)
            .clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Start a zoom transition for a scroll delta (positive zooms in)
    pub fn apply_zoom(&mut self, scroll_delta: f32) {
        self.zoom.retrigger(self.fov, scroll_delta);
    }

    /// Advance the zoom transition by `dt` seconds and write the eased
    /// value to `fov`. Call `update()` afterwards.
    pub fn advance_zoom(&mut self, dt: f32) {
        if let Some(fov) = self.zoom.advance(dt) {
            self.fov = fov;
        }
    }

    /// Move along the held directions by `distance` world units.
    ///
    /// Forward/backward follow `front`; strafing follows
    /// `normalize(front × up)`.
    pub fn apply_movement(&mut self, movement: Movement, distance: f32) {
        let right = self.front.cross(self.up).normalize_or_zero();
        if movement.contains(Movement::FORWARD) {
            self.position += self.front * distance;
        }
        if movement.contains(Movement::BACKWARD) {
            self.position -= self.front * distance;
        }
        if movement.contains(Movement::RIGHT) {
            self.position += right * distance;
        }
        if movement.contains(Movement::LEFT) {
            self.position -= right * distance;
        }
    }

    /// Pointer sensitivity scaled by the current zoom level.
    ///
    /// Equals `base` at `REFERENCE_FOV` and shrinks proportionally as
    /// the field of view narrows.
    pub fn look_sensitivity(&self, base: f32) -> f32 {
        base / (REFERENCE_FOV / self.fov)
    }

    // ===== GETTERS =====

    /// Unit direction the camera faces
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// World up reference
    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn pitch(&self) -> f32 {
        self.rotation.x
    }

    pub fn yaw(&self) -> f32 {
        self.rotation.y
    }

    /// View matrix (world to camera space)
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (camera to clip space, depth -1..1)
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view)
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    pub fn pitch_limit(&self) -> f32 {
        self.pitch_limit
    }

    pub fn zoom(&self) -> &FovZoom {
        &self.zoom
    }

    // ===== SETTERS =====

    /// Set the pitch limit (absolute value is used)
    pub fn set_pitch_limit(&mut self, limit: f32) {
        self.pitch_limit = limit.abs();
    }

    /// Replace the zoom transition settings
    pub fn set_zoom(&mut self, zoom: FovZoom) {
        self.zoom = zoom;
    }
}

impl Default for Camera {
    /// Camera at the origin looking down +X, 45 degree field of view,
    /// 4:3 aspect, clip planes 0.1 and 100.
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO, REFERENCE_FOV, 4.0 / 3.0, 0.1, 100.0)
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
