/// Isometric-style projection from object space to screen space
use nalgebra::Point2;

use crate::geometry::{Point2D, Point3D};

/// Fixed tilt used for both axes (30 degrees)
pub const ISO_ANGLE: f64 = std::f64::consts::PI / 6.0;

/// Horizontal stretch applied to the x/z diagonal
pub const HORIZONTAL_SCALE: f64 = 1.2;
/// Vertical squash applied to the x/z diagonal
pub const DEPTH_SCALE: f64 = 0.6;
/// Vertical scale applied to the y axis
pub const HEIGHT_SCALE: f64 = 0.8;

/// Project a 3D point to 2D screen space.
///
/// This is a hand-tuned affine map, not a true isometric rotation. The three
/// scale factors are literal constants and the operations are evaluated in a
/// fixed order so the output matches the reference illustration exactly.
pub fn project(point: &Point3D, center_x: f64, center_y: f64, angle_x: f64, angle_y: f64) -> Point2D {
    let x = center_x + (point.x - point.z) * angle_x.cos() * HORIZONTAL_SCALE;
    let y = center_y + (point.x + point.z) * angle_y.sin() * DEPTH_SCALE + point.y * HEIGHT_SCALE;
    Point2::new(x, y)
}

/// A fixed viewing setup: screen-space origin plus the two tilt angles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsoProjection {
    pub center: Point2D,
    pub angle_x: f64,
    pub angle_y: f64,
}

impl IsoProjection {
    /// Projection centered at `(center_x, center_y)` with the standard 30 degree tilt
    pub fn new(center_x: f64, center_y: f64) -> Self {
        Self {
            center: Point2::new(center_x, center_y),
            angle_x: ISO_ANGLE,
            angle_y: ISO_ANGLE,
        }
    }

    pub fn project(&self, point: &Point3D) -> Point2D {
        project(point, self.center.x, self.center.y, self.angle_x, self.angle_y)
    }

    /// Project a batch of points, preserving order
    pub fn project_all<const N: usize>(&self, points: &[Point3D; N]) -> [Point2D; N] {
        std::array::from_fn(|i| self.project(&points[i]))
    }
}

impl Default for IsoProjection {
    fn default() -> Self {
        Self::new(300.0, 280.0)
    }
}
