/// Wire3D Core Library - Wireframe transform and render pipeline
///
/// This library provides the windowing-independent core of the wireframe
/// renderer: transformation matrices, the perspective divide, depth shading,
/// Platonic solids, and the per-frame orchestration that drives a draw surface.

pub mod edge;
pub mod error;
pub mod projection;
pub mod scene;
pub mod shade;
pub mod solid;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use edge::{sort_by_shade, Edge, EdgeState};
pub use error::{Error, Result};
pub use projection::{apply_projection, Viewport};
pub use scene::{Scene, SceneConfig};
pub use shade::depth_shade;
pub use solid::{Solid, SolidKind, UnknownSolid};
pub use surface::{DrawSurface, Line, LineHandle, LineStore, Rgb};
pub use transform::{point3, point4, Point4, RotationState, Transform};
