//! Axis rotations and the normalized-cube-to-screen projection.

use crate::matrix::Matrix;
use crate::vec3::Vec3;

/// Rotation about the x axis by `angle` radians.
pub fn rotation_x(angle: f64) -> Matrix {
    let (sin, cos) = angle.sin_cos();
    Matrix::from([[1.0, 0.0, 0.0], [0.0, cos, sin], [0.0, -sin, cos]])
}

/// Rotation about the y axis by `angle` radians.
pub fn rotation_y(angle: f64) -> Matrix {
    let (sin, cos) = angle.sin_cos();
    Matrix::from([[cos, 0.0, sin], [0.0, 1.0, 0.0], [-sin, 0.0, cos]])
}

/// Rotation about the z axis by `angle` radians.
pub fn rotation_z(angle: f64) -> Matrix {
    let (sin, cos) = angle.sin_cos();
    Matrix::from([[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]])
}

/// Target canvas for projection.
#[derive(Copy, Clone, Debug)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Maps a point of the normalized cube [-1, 1]^3 to pixel space; z
    /// lands in 0..=255 for the depth buffer.
    pub fn project(&self, v: Vec3<f64>) -> Vec3<i32> {
        Vec3::new(
            ((v.x + 1.0) * self.width as f64 / 2.0) as i32,
            ((v.y + 1.0) * self.height as f64 / 2.0) as i32,
            ((v.z + 1.0) * 255.0 / 2.0) as i32,
        )
    }
}

#[test]
fn projection_maps_cube_corners() {
    let viewport = Viewport {
        width: 800,
        height: 600,
    };

    assert_eq!(Vec3::new(0, 0, 0), viewport.project(Vec3::new(-1.0, -1.0, -1.0)));
    assert_eq!(Vec3::new(800, 600, 255), viewport.project(Vec3::new(1.0, 1.0, 1.0)));
    assert_eq!(Vec3::new(400, 300, 127), viewport.project(Vec3::new(0.0, 0.0, 0.0)));
}

#[test]
fn zero_rotation_is_identity() {
    assert_eq!(Matrix::identity(3), rotation_y(0.0));
}

#[test]
fn rotation_preserves_length() {
    let v = Vec3::new(0.3, -0.7, 0.2);
    for rotation in [
        rotation_x(0.9),
        rotation_y(std::f64::consts::PI / 6.0),
        rotation_z(-2.1),
    ] {
        assert!(((&rotation * v).len() - v.len()).abs() < 1e-12);
    }
}

#[test]
fn quarter_turn_about_y() {
    let rotation = rotation_y(std::f64::consts::FRAC_PI_2);
    let v = &rotation * Vec3::new(1.0, 0.0, 0.0);

    assert!(v.x.abs() < 1e-12);
    assert!(v.y.abs() < 1e-12);
    assert!((v.z + 1.0).abs() < 1e-12);
}
