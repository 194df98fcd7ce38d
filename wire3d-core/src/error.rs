/// Errors raised by the transform and render pipeline
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// Perspective divide with a zero or non-finite homogeneous `w`.
    DegenerateProjection { w: f64 },
    /// Viewport with a zero dimension; the aspect ratio is undefined.
    InvalidViewport { width: u32, height: u32 },
    /// Field of view outside `(0, π)` or coinciding near and far planes.
    InvalidProjection { fov: f64, near: f64, far: f64 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateProjection { w } => {
                write!(f, "degenerate projection: cannot divide by w = {w}")
            }
            Self::InvalidViewport { width, height } => {
                write!(f, "invalid viewport {width}x{height}: both dimensions must be non-zero")
            }
            Self::InvalidProjection { fov, near, far } => {
                write!(f, "invalid projection: fov = {fov}, near = {near}, far = {far}")
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
