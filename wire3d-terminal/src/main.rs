/// Wire3D Terminal Demo - Rotating Platonic solids
///
/// Controls:
///   - Left/Right: X rotation slider
///   - Up/Down: Y rotation slider
///   - 1-5: Tetrahedron, cube, octahedron, icosahedron, dodecahedron
///   - Q/ESC: Quit
///
/// Set `RUST_LOG=debug` and redirect stderr to a file to see the log.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::time::Duration;
use wire3d_core::{SceneConfig, SolidKind};
use wire3d_terminal::TerminalApp;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Wireframe Platonic solids in the terminal")]
struct Args {
    /// Solid shown at startup
    #[arg(long, value_enum, default_value_t = SolidArg::Cube)]
    solid: SolidArg,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 60.0)]
    fov: f64,

    /// Near clipping plane
    #[arg(long, default_value_t = 1.0)]
    near: f64,

    /// Far clipping plane
    #[arg(long, default_value_t = 100.0)]
    far: f64,

    /// Distance from the camera to the solid's center
    #[arg(long, default_value_t = 5.0)]
    distance: f64,

    /// Frame interval in milliseconds
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Automatic rotation on both axes, in radians per second
    #[arg(long, default_value_t = 0.0)]
    spin: f64,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum SolidArg {
    Tetrahedron,
    Cube,
    Octahedron,
    Icosahedron,
    Dodecahedron,
}

impl SolidArg {
    fn to_solid_kind(self) -> SolidKind {
        match self {
            SolidArg::Tetrahedron => SolidKind::Tetrahedron,
            SolidArg::Cube => SolidKind::Cube,
            SolidArg::Octahedron => SolidKind::Octahedron,
            SolidArg::Icosahedron => SolidKind::Icosahedron,
            SolidArg::Dodecahedron => SolidKind::Dodecahedron,
        }
    }
}

impl Args {
    fn scene_config(&self) -> SceneConfig {
        SceneConfig {
            fov: self.fov.to_radians(),
            near: self.near,
            far: self.far,
            distance: self.distance,
            tick: Duration::from_millis(self.tick_ms.max(1)),
            spin: self.spin,
            solid: self.solid.to_solid_kind(),
            ..SceneConfig::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::debug!("{args:?}");

    let mut app = TerminalApp::new(args.scene_config())?;
    app.run()?;

    println!("Thank you for using Wire3D Terminal Renderer!");
    Ok(())
}
