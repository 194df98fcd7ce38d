/// Frame orchestration: camera state, the active solid, and the per-tick update
use nalgebra::Matrix4;
use std::f64::consts::PI;
use std::time::Duration;

use crate::edge::{sort_by_shade, Edge, EdgeState};
use crate::error::Result;
use crate::projection::Viewport;
use crate::solid::{Solid, SolidKind};
use crate::surface::DrawSurface;
use crate::transform::{RotationState, Transform};

/// Starting parameters for a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in radians
    pub fov: f64,
    pub near: f64,
    pub far: f64,
    /// How far down -Z the solid sits
    pub distance: f64,
    pub tick: Duration,
    pub rotation: RotationState,
    /// Extra rotation on both axes, in radians per second of elapsed time
    pub spin: f64,
    pub solid: SolidKind,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fov: PI / 3.0,
            near: 1.0,
            far: 100.0,
            distance: 5.0,
            tick: Duration::from_millis(16),
            rotation: RotationState::default(),
            spin: 0.0,
            solid: SolidKind::Cube,
        }
    }
}

/// Everything that changes between frames
pub struct Scene {
    viewport: Viewport,
    screen: Matrix4<f64>,
    perspective: Matrix4<f64>,
    rotation: RotationState,
    distance: f64,
    spin: f64,
    tick: Duration,
    elapsed: Duration,
    solid: Solid,
    running: bool,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Result<Self> {
        let viewport = Viewport::new(
            config.width,
            config.height,
            config.fov,
            config.near,
            config.far,
        )?;
        log::debug!(
            "scene {}x{} with {}, camera distance {}",
            config.width,
            config.height,
            config.solid,
            config.distance
        );

        Ok(Self {
            screen: viewport.screen_matrix(),
            perspective: viewport.perspective_matrix(),
            viewport,
            rotation: config.rotation,
            distance: config.distance,
            spin: config.spin,
            tick: config.tick,
            elapsed: Duration::ZERO,
            solid: Solid::build(config.solid),
            running: true,
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn screen_matrix(&self) -> &Matrix4<f64> {
        &self.screen
    }

    pub fn perspective_matrix(&self) -> &Matrix4<f64> {
        &self.perspective
    }

    /// Adopt new viewport dimensions and return the new `(screen, perspective)` pair.
    ///
    /// The edge list is left alone. On error nothing changes.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(Matrix4<f64>, Matrix4<f64>)> {
        self.viewport.resize(width, height)?;
        self.screen = self.viewport.screen_matrix();
        self.perspective = self.viewport.perspective_matrix();
        log::debug!("viewport resized to {width}x{height}");
        Ok((self.screen, self.perspective))
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: RotationState) {
        self.rotation = rotation;
    }

    pub fn set_angle_x(&mut self, angle: f64) {
        self.rotation.x = angle;
    }

    pub fn set_angle_y(&mut self, angle: f64) {
        self.rotation.y = angle;
    }

    /// Set the X angle from a slider position in `0..=100`
    pub fn set_slider_x(&mut self, position: f64) {
        self.rotation.set_slider_x(position);
        log::debug!("slider x at {position}: angle {:.3}", self.rotation.x);
    }

    /// Set the Y angle from a slider position in `0..=100`
    pub fn set_slider_y(&mut self, position: f64) {
        self.rotation.set_slider_y(position);
        log::debug!("slider y at {position}: angle {:.3}", self.rotation.y);
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick
    }

    /// The rotation the next frame is drawn with, spin included
    pub fn effective_rotation(&self) -> RotationState {
        let turn = self.elapsed.as_secs_f64() * self.spin;
        RotationState::new(self.rotation.x + turn, self.rotation.y + turn)
    }

    pub fn model_matrix(&self) -> Matrix4<f64> {
        Transform::model_matrix(&self.effective_rotation(), self.distance)
    }

    pub fn solid(&self) -> &Solid {
        &self.solid
    }

    /// Edges in render order
    pub fn edges(&self) -> &[Edge] {
        &self.solid.edges
    }

    /// Replace the displayed solid.
    ///
    /// The new solid is built in full before it replaces the old one, whose
    /// line primitives are then deleted from `surface`.
    pub fn select(&mut self, kind: SolidKind, surface: &mut dyn DrawSurface) {
        let mut previous = std::mem::replace(&mut self.solid, Solid::build(kind));
        for edge in &mut previous.edges {
            edge.release(surface);
        }
        log::debug!(
            "selected {kind}: {} points, {} edges",
            self.solid.points.len(),
            self.solid.edges.len()
        );
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Make every later [`Scene::tick`] a no-op
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Compute and draw one frame.
    ///
    /// Returns `Ok(false)` without drawing once the scene is stopped. If any
    /// edge fails to project, no edge is changed and time does not advance.
    pub fn tick(&mut self, surface: &mut dyn DrawSurface) -> Result<bool> {
        if !self.running {
            return Ok(false);
        }

        let model = self.model_matrix();
        let states = self
            .solid
            .edges
            .iter()
            .map(|edge| edge.project(&self.screen, &self.perspective, &model))
            .collect::<Result<Vec<EdgeState>>>()
            .map_err(|err| {
                log::warn!("frame at {:?} dropped: {err}", self.elapsed);
                err
            })?;

        for (edge, state) in self.solid.edges.iter_mut().zip(states) {
            edge.set_state(state);
        }
        sort_by_shade(&mut self.solid.edges);
        for edge in &mut self.solid.edges {
            edge.render(surface);
        }

        self.elapsed += self.tick;
        log::trace!("frame at {:?}: {} edges", self.elapsed, self.solid.edges.len());
        Ok(true)
    }
}
