/// 4x4 homogeneous transforms and rotation state
use nalgebra::{Matrix4, Vector3, Vector4};
use std::f64::consts::PI;

/// Homogeneous column vector `(x, y, z, w)`
pub type Point4 = Vector4<f64>;

/// Upper bound of a slider position; positions run from 0 to this value.
pub const SLIDER_MAX: f64 = 100.0;

pub fn point4(x: f64, y: f64, z: f64, w: f64) -> Point4 {
    Vector4::new(x, y, z, w)
}

/// A model-space point with `w` pinned to 1.0
pub fn point3(x: f64, y: f64, z: f64) -> Point4 {
    point4(x, y, z, 1.0)
}

/// Rotation state around the X and Y axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Set the X angle from a slider position in `0..=100`, sweeping `[0, π]`.
    ///
    /// Position 0 gives π and position 100 gives 0. Out-of-range positions
    /// are clamped.
    pub fn set_slider_x(&mut self, position: f64) {
        self.x = PI - clamp_slider(position) / SLIDER_MAX * PI;
    }

    /// Set the Y angle from a slider position in `0..=100`, sweeping `[-π, π]`.
    pub fn set_slider_y(&mut self, position: f64) {
        self.y = PI - clamp_slider(position) / SLIDER_MAX * 2.0 * PI;
    }

    /// The state a pair of slider positions maps to
    pub fn from_sliders(x_position: f64, y_position: f64) -> Self {
        let mut state = Self::zero();
        state.set_slider_x(x_position);
        state.set_slider_y(y_position);
        state
    }
}

impl Default for RotationState {
    /// Both axes at π: the solid starts turned half a revolution on each.
    fn default() -> Self {
        Self::new(PI, PI)
    }
}

fn clamp_slider(position: f64) -> f64 {
    if position.is_nan() {
        return 0.0;
    }
    position.clamp(0.0, SLIDER_MAX)
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Right-handed OpenGL-style perspective projection.
    ///
    /// Row 3 is `[0, 0, -1, 0]`, so the clip-space `w` of a point is the
    /// negated view-space `z`. Panics if `aspect` is zero or `near` and `far`
    /// are within `f64::EPSILON` of each other; [`crate::Viewport`] rejects
    /// such input before it gets here.
    pub fn perspective_matrix(fov: f64, aspect: f64, near: f64, far: f64) -> Matrix4<f64> {
        Matrix4::new_perspective(aspect, fov, near, far)
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f64, y: f64, z: f64) -> Matrix4<f64> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Diagonal scale with 1.0 down the whole last column.
    ///
    /// This is not a pure scale: it also offsets x, y and z by one unit.
    /// The screen mapping is built from it, which shifts every projected
    /// point by one pixel right and down.
    pub fn scale_matrix(x: f64, y: f64, z: f64) -> Matrix4<f64> {
        Matrix4::new(
            x, 0.0, 0.0, 1.0, //
            0.0, y, 0.0, 1.0, //
            0.0, 0.0, z, 1.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about the X axis, counter-clockwise looking down +X
    pub fn rotation_x_matrix(angle: f64) -> Matrix4<f64> {
        Matrix4::new_rotation(Vector3::x() * angle)
    }

    /// Rotation about the Y axis, counter-clockwise looking down +Y
    pub fn rotation_y_matrix(angle: f64) -> Matrix4<f64> {
        Matrix4::new_rotation(Vector3::y() * angle)
    }

    /// Create a rotation matrix from a rotation state.
    ///
    /// Y is applied first, then X.
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f64> {
        Self::rotation_x_matrix(rotation.x) * Self::rotation_y_matrix(rotation.y)
    }

    /// Rotate the solid, then push it `distance` units down -Z.
    ///
    /// The camera sits at the origin looking down -Z; all motion is object
    /// motion.
    pub fn model_matrix(rotation: &RotationState, distance: f64) -> Matrix4<f64> {
        Self::translation_matrix(0.0, 0.0, -distance) * Self::rotation_matrix(rotation)
    }

    /// Maps normalized device coordinates onto a `width` x `height` pixel grid
    pub fn screen_matrix(width: f64, height: f64) -> Matrix4<f64> {
        let (half_w, half_h) = (width / 2.0, height / 2.0);
        Self::translation_matrix(half_w, half_h, 0.0) * Self::scale_matrix(half_w, half_h, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn samples() -> Vec<Point4> {
        vec![
            point3(0.0, 0.0, 0.0),
            point3(1.0, -2.0, 3.0),
            point3(-0.5, 0.5, -0.5),
            point3(10.0, 7.5, -3.25),
        ]
    }

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);

        state.rotate(0.1, 0.2);
        assert!((state.x - 0.1).abs() < EPS);
        assert!((state.y - 0.2).abs() < EPS);
    }

    #[test]
    fn test_default_rotation_is_half_turn() {
        let state = RotationState::default();
        assert_eq!(state, RotationState::new(PI, PI));
    }

    #[test]
    fn test_slider_mapping() {
        let mut state = RotationState::zero();
        state.set_slider_x(0.0);
        state.set_slider_y(0.0);
        assert!((state.x - PI).abs() < EPS);
        assert!((state.y - PI).abs() < EPS);

        state.set_slider_x(50.0);
        state.set_slider_y(50.0);
        assert!((state.x - PI / 2.0).abs() < EPS);
        assert!(state.y.abs() < EPS);

        state.set_slider_x(100.0);
        state.set_slider_y(100.0);
        assert!(state.x.abs() < EPS);
        assert!((state.y + PI).abs() < EPS);
    }

    #[test]
    fn test_slider_positions_are_clamped() {
        let state = RotationState::from_sliders(-20.0, 250.0);
        assert_eq!(state, RotationState::from_sliders(0.0, 100.0));

        let state = RotationState::from_sliders(f64::NAN, 0.0);
        assert!((state.x - PI).abs() < EPS);
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = Transform::rotation_matrix(&RotationState::zero());
        assert!((matrix - Matrix4::identity()).norm() < EPS);

        for p in samples() {
            assert!((Transform::rotation_x_matrix(0.0) * p - p).norm() < EPS);
            assert!((Transform::rotation_y_matrix(0.0) * p - p).norm() < EPS);
        }
    }

    #[test]
    fn test_rotation_inverse() {
        for theta in [0.3, 1.0, PI / 2.0, 2.5, -4.0] {
            let rx = Transform::rotation_x_matrix(theta) * Transform::rotation_x_matrix(-theta);
            let ry = Transform::rotation_y_matrix(theta) * Transform::rotation_y_matrix(-theta);
            for p in samples() {
                assert!((rx * p - p).norm() < EPS);
                assert!((ry * p - p).norm() < EPS);
            }
        }
    }

    #[test]
    fn test_rotation_direction() {
        // Right-handed: +Y goes to +Z about X, +Z goes to +X about Y.
        let p = Transform::rotation_x_matrix(PI / 2.0) * point3(0.0, 1.0, 0.0);
        assert!((p - point3(0.0, 0.0, 1.0)).norm() < EPS);

        let p = Transform::rotation_y_matrix(PI / 2.0) * point3(0.0, 0.0, 1.0);
        assert!((p - point3(1.0, 0.0, 0.0)).norm() < EPS);
    }

    #[test]
    fn test_scale_matrix_keeps_unit_offsets() {
        let m = Transform::scale_matrix(2.0, 3.0, 4.0);
        let p = m * point3(1.0, 1.0, 1.0);
        assert!((p - point4(3.0, 4.0, 5.0, 1.0)).norm() < EPS);
        assert_eq!([m[(3, 0)], m[(3, 1)], m[(3, 2)], m[(3, 3)]], [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_perspective_entries() {
        let (fov, aspect, near, far) = (PI / 3.0, 16.0 / 9.0, 1.0, 100.0);
        let m = Transform::perspective_matrix(fov, aspect, near, far);
        let f = 1.0 / (fov / 2.0).tan();

        assert!((m[(0, 0)] - f / aspect).abs() < EPS);
        assert!((m[(1, 1)] - f).abs() < EPS);
        assert!((m[(2, 2)] - (near + far) / (near - far)).abs() < EPS);
        assert!((m[(2, 3)] - 2.0 * near * far / (near - far)).abs() < EPS);
        assert_eq!(m[(3, 2)], -1.0);
        assert_eq!(m[(3, 3)], 0.0);
    }

    #[test]
    fn test_perspective_maps_clip_planes() {
        for (fov, aspect, near, far) in [
            (PI / 3.0, 16.0 / 9.0, 1.0, 100.0),
            (PI / 2.0, 1.0, 0.1, 10.0),
            (0.4, 0.5, 3.0, 7.0),
        ] {
            let m = Transform::perspective_matrix(fov, aspect, near, far);
            let near_clip = m * point3(0.0, 0.0, -near);
            let far_clip = m * point3(0.0, 0.0, -far);
            assert!((near_clip.z / near_clip.w + 1.0).abs() < 1e-9);
            assert!((far_clip.z / far_clip.w - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_model_matrix_pushes_back() {
        let m = Transform::model_matrix(&RotationState::zero(), 5.0);
        let p = m * point3(0.0, 0.0, 0.0);
        assert!((p - point3(0.0, 0.0, -5.0)).norm() < EPS);
    }

    #[test]
    fn test_screen_matrix_maps_ndc_corners() {
        let m = Transform::screen_matrix(1280.0, 720.0);
        let center = m * point3(0.0, 0.0, 0.0);
        assert!((center.x - 641.0).abs() < EPS);
        assert!((center.y - 361.0).abs() < EPS);

        let corner = m * point3(1.0, 1.0, 0.0);
        assert!((corner.x - 1281.0).abs() < EPS);
        assert!((corner.y - 721.0).abs() < EPS);
    }
}
