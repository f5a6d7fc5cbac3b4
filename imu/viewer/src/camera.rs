use nalgebra::{Isometry3, Perspective3};

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;

/// Distance the scene is pushed away from the eye along -Z.
pub const VIEW_DISTANCE: f32 = 5.0;

/// Perspective projection, set up once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn for_window(width: u32, height: u32) -> Self {
        Projection {
            fov_y_degrees: 45.0,
            aspect: width as f32 / height as f32,
            near: 0.1,
            far: 50.0,
        }
    }

    pub fn matrix(&self) -> Perspective3<f32> {
        Perspective3::new(self.aspect, self.fov_y_degrees.to_radians(), self.near, self.far)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::for_window(WINDOW_WIDTH, WINDOW_HEIGHT)
    }
}

/// Model transform every frame starts from.
pub fn base_view() -> Isometry3<f32> {
    Isometry3::translation(0.0, 0.0, -VIEW_DISTANCE)
}
