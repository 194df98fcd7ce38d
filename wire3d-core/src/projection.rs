/// Viewport configuration and the perspective divide
use nalgebra::Matrix4;
use std::f64::consts::PI;

use crate::error::{Error, Result};
use crate::transform::{point4, Point4, Transform};

/// Perspective divide: clip space to normalized device coordinates.
///
/// Returns `(x/w, y/w, z/w, 1)`. A zero or non-finite `w`, or a `w` so small
/// that the quotient overflows, is an error rather than a point at infinity.
pub fn apply_projection(clip: &Point4) -> Result<Point4> {
    let w = clip.w;
    if w == 0.0 || !w.is_finite() {
        return Err(Error::DegenerateProjection { w });
    }
    let ndc = point4(clip.x / w, clip.y / w, clip.z / w, 1.0);
    if !ndc.iter().all(|v| v.is_finite()) {
        return Err(Error::DegenerateProjection { w });
    }
    Ok(ndc)
}

/// Pixel dimensions and projection parameters of the drawing area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    fov: f64,
    near: f64,
    far: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, fov: f64, near: f64, far: f64) -> Result<Self> {
        check_dimensions(width, height)?;
        let valid_fov = fov > 0.0 && fov < PI;
        let valid_planes = near.is_finite() && far.is_finite() && !planes_coincide(near, far);
        if !valid_fov || !valid_planes {
            return Err(Error::InvalidProjection { fov, near, far });
        }
        Ok(Self {
            width,
            height,
            fov,
            near,
            far,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Change the pixel dimensions, keeping the projection parameters
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        check_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn perspective_matrix(&self) -> Matrix4<f64> {
        Transform::perspective_matrix(self.fov, self.aspect(), self.near, self.far)
    }

    pub fn screen_matrix(&self) -> Matrix4<f64> {
        Transform::screen_matrix(self.width as f64, self.height as f64)
    }

    /// Whether a pixel-space point lies on the drawing area
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width as f64).contains(&x) && (0.0..=self.height as f64).contains(&y)
    }
}

/// Planes closer than one ulp of the larger magnitude leave no depth range
fn planes_coincide(near: f64, far: f64) -> bool {
    (far - near).abs() <= f64::EPSILON * near.abs().max(far.abs()).max(1.0)
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidViewport { width, height });
    }
    Ok(())
}
