/// Rotation matrices and rotation state
use nalgebra::{Matrix3, Point3};

/// Rotation about X, then Y, then Z composed as `Rx * Ry * Rz` (radians).
///
/// Points stored as rows are rotated with `v * R^T`, which is `R * v` for
/// column vectors; see [`rotate_points`].
pub fn rotation(theta_x: f64, theta_y: f64, theta_z: f64) -> Matrix3<f64> {
    let (sx, cx) = theta_x.sin_cos();
    let (sy, cy) = theta_y.sin_cos();
    let (sz, cz) = theta_z.sin_cos();

    #[rustfmt::skip]
    let rx = Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, cx, -sx,
        0.0, sx, cx,
    );
    #[rustfmt::skip]
    let ry = Matrix3::new(
        cy, 0.0, sy,
        0.0, 1.0, 0.0,
        -sy, 0.0, cy,
    );
    #[rustfmt::skip]
    let rz = Matrix3::new(
        cz, -sz, 0.0,
        sz, cz, 0.0,
        0.0, 0.0, 1.0,
    );

    rx * ry * rz
}

/// Apply `matrix` to every point, preserving order.
pub fn rotate_points(points: &[Point3<f64>], matrix: &Matrix3<f64>) -> Vec<Point3<f64>> {
    points.iter().map(|p| matrix * p).collect()
}

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    pub fn matrix(&self) -> Matrix3<f64> {
        rotation(self.x, self.y, self.z)
    }
}
