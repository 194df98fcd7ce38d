/// Wireframe edges and their per-frame draw state
use nalgebra::Matrix4;

use crate::error::Result;
use crate::projection::apply_projection;
use crate::shade::depth_shade;
use crate::surface::{DrawSurface, LineHandle, Rgb};
use crate::transform::Point4;

/// What an edge looks like this frame: pixel-space endpoints and a gray level
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeState {
    pub transformed_a: Point4,
    pub transformed_b: Point4,
    pub shade: u8,
}

impl EdgeState {
    pub fn color(&self) -> Rgb {
        Rgb::gray(self.shade)
    }
}

/// One segment of a wireframe.
///
/// The model-space endpoints never change. The draw state is recomputed
/// every frame and may be exchanged with another edge's when the render list
/// is ordered; the endpoints and the line primitive stay put.
#[derive(Debug, Clone)]
pub struct Edge {
    indices: [usize; 2],
    point_a: Point4,
    point_b: Point4,
    state: EdgeState,
    handle: Option<LineHandle>,
}

impl Edge {
    /// Connect points `a` and `b` of `points`.
    ///
    /// Panics if either index is out of bounds.
    pub fn new(points: &[Point4], a: usize, b: usize) -> Self {
        Self {
            indices: [a, b],
            point_a: points[a],
            point_b: points[b],
            state: EdgeState::default(),
            handle: None,
        }
    }

    /// Indices of the endpoints within the solid's point list
    pub fn indices(&self) -> [usize; 2] {
        self.indices
    }

    pub fn endpoints(&self) -> (&Point4, &Point4) {
        (&self.point_a, &self.point_b)
    }

    pub fn state(&self) -> &EdgeState {
        &self.state
    }

    pub fn shade(&self) -> u8 {
        self.state.shade
    }

    pub fn handle(&self) -> Option<LineHandle> {
        self.handle
    }

    /// Compute this edge's draw state without storing it.
    ///
    /// `view` is the full model matrix; the camera itself never moves.
    pub fn project(
        &self,
        screen: &Matrix4<f64>,
        perspective: &Matrix4<f64>,
        view: &Matrix4<f64>,
    ) -> Result<EdgeState> {
        let clip = perspective * view;
        let clip_a = clip * self.point_a;
        let clip_b = clip * self.point_b;

        Ok(EdgeState {
            transformed_a: screen * apply_projection(&clip_a)?,
            transformed_b: screen * apply_projection(&clip_b)?,
            shade: depth_shade(clip_a.w, clip_b.w),
        })
    }

    /// Recompute the draw state for the current frame
    pub fn update(
        &mut self,
        screen: &Matrix4<f64>,
        perspective: &Matrix4<f64>,
        view: &Matrix4<f64>,
    ) -> Result<()> {
        self.state = self.project(screen, perspective, view)?;
        Ok(())
    }

    pub(crate) fn set_state(&mut self, state: EdgeState) {
        self.state = state;
    }

    /// Push the draw state to this edge's line primitive, creating it on first use
    pub fn render(&mut self, surface: &mut dyn DrawSurface) {
        let handle = *self.handle.get_or_insert_with(|| surface.create_line());
        let EdgeState {
            transformed_a: a,
            transformed_b: b,
            ..
        } = self.state;
        surface.update_line(handle, [a.x, a.y], [b.x, b.y], self.state.color());
    }

    /// Delete the line primitive, if one was created
    pub fn release(&mut self, surface: &mut dyn DrawSurface) {
        if let Some(handle) = self.handle.take() {
            surface.delete_line(handle);
        }
    }
}

/// Order draw states by descending shade, farthest first.
///
/// Adjacent exchanges only, so edges with equal shades keep their relative
/// order. Only the [`EdgeState`]s move; each edge keeps its endpoints and its
/// line primitive, so drawing the list in order paints far edges first.
pub fn sort_by_shade(edges: &mut [Edge]) {
    for i in 1..edges.len() {
        let mut j = i;
        while j > 0 && edges[j - 1].state.shade < edges[j].state.shade {
            let (head, tail) = edges.split_at_mut(j);
            std::mem::swap(&mut head[j - 1].state, &mut tail[0].state);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::LineStore;
    use crate::transform::{point3, point4, RotationState, Transform};
    use std::f64::consts::PI;

    fn points() -> Vec<Point4> {
        vec![point3(-0.5, 0.0, 0.0), point3(0.5, 0.0, 0.0), point3(0.0, 0.0, 1.0)]
    }

    fn with_shade(shade: u8, tag: f64) -> EdgeState {
        EdgeState {
            transformed_a: point4(tag, 0.0, 0.0, 1.0),
            transformed_b: point4(tag, 1.0, 0.0, 1.0),
            shade,
        }
    }

    fn edges_with(shades: &[(u8, f64)]) -> Vec<Edge> {
        let points = points();
        shades
            .iter()
            .map(|&(shade, tag)| {
                let mut edge = Edge::new(&points, 0, 1);
                edge.set_state(with_shade(shade, tag));
                edge
            })
            .collect()
    }

    fn shades(edges: &[Edge]) -> Vec<u8> {
        edges.iter().map(Edge::shade).collect()
    }

    #[test]
    fn test_update_projects_endpoints() {
        let points = points();
        let mut edge = Edge::new(&points, 0, 1);
        let screen = Transform::screen_matrix(1280.0, 720.0);
        let perspective = Transform::perspective_matrix(PI / 3.0, 16.0 / 9.0, 1.0, 100.0);
        let view = Transform::model_matrix(&RotationState::zero(), 5.0);

        edge.update(&screen, &perspective, &view).unwrap();

        let state = edge.state();
        // Symmetric about the screen center, on the center row.
        assert!((state.transformed_a.x + state.transformed_b.x - 2.0 * 641.0).abs() < 1e-9);
        assert!(state.transformed_a.x < state.transformed_b.x);
        assert!((state.transformed_a.y - 361.0).abs() < 1e-9);
        // Both ends at w = 5.
        assert_eq!(state.shade, 128);
    }

    #[test]
    fn test_update_fails_on_camera_plane() {
        let points = vec![point3(0.0, 0.0, 0.0), point3(1.0, 0.0, 0.0)];
        let mut edge = Edge::new(&points, 0, 1);
        let identity = Matrix4::identity();
        let perspective = Transform::perspective_matrix(PI / 3.0, 1.0, 1.0, 100.0);

        // With no pullback the origin sits on the camera plane: w = 0.
        assert!(edge.update(&identity, &perspective, &identity).is_err());
        assert_eq!(edge.state(), &EdgeState::default());
    }

    #[test]
    fn test_endpoints_are_fixed() {
        let points = points();
        let edge = Edge::new(&points, 2, 0);
        assert_eq!(edge.indices(), [2, 0]);
        assert_eq!(edge.endpoints(), (&points[2], &points[0]));
    }

    #[test]
    fn test_render_creates_one_primitive() {
        let points = points();
        let mut edge = Edge::new(&points, 0, 1);
        edge.set_state(with_shade(40, 7.0));

        let mut store = LineStore::new();
        edge.render(&mut store);
        edge.render(&mut store);
        assert_eq!(store.len(), 1);

        let line = store.get(edge.handle().unwrap()).unwrap();
        assert_eq!(line.from, [7.0, 0.0]);
        assert_eq!(line.to, [7.0, 1.0]);
        assert_eq!(line.color, Rgb::gray(40));

        edge.release(&mut store);
        assert!(store.is_empty());
        assert!(edge.handle().is_none());
    }

    #[test]
    fn test_sort_descending() {
        let mut edges = edges_with(&[(10, 0.0), (200, 1.0), (90, 2.0), (255, 3.0)]);
        sort_by_shade(&mut edges);
        assert_eq!(shades(&edges), vec![255, 200, 90, 10]);
    }

    #[test]
    fn test_sort_moves_state_not_identity() {
        let points = points();
        let mut edges = vec![Edge::new(&points, 0, 1), Edge::new(&points, 1, 2)];
        edges[0].set_state(with_shade(5, 0.0));
        edges[1].set_state(with_shade(9, 1.0));

        sort_by_shade(&mut edges);

        assert_eq!(edges[0].indices(), [0, 1]);
        assert_eq!(edges[1].indices(), [1, 2]);
        assert_eq!(edges[0].state(), &with_shade(9, 1.0));
        assert_eq!(edges[1].state(), &with_shade(5, 0.0));
    }

    #[test]
    fn test_sort_is_stable() {
        let mut edges = edges_with(&[(50, 0.0), (80, 1.0), (50, 2.0), (80, 3.0), (50, 4.0)]);
        sort_by_shade(&mut edges);

        let tags: Vec<f64> = edges.iter().map(|e| e.state().transformed_a.x).collect();
        assert_eq!(tags, vec![1.0, 3.0, 0.0, 2.0, 4.0]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut edges = edges_with(&[(3, 0.0), (1, 1.0), (3, 2.0), (2, 3.0), (1, 4.0)]);
        sort_by_shade(&mut edges);
        let once: Vec<EdgeState> = edges.iter().map(|e| *e.state()).collect();

        sort_by_shade(&mut edges);
        let twice: Vec<EdgeState> = edges.iter().map(|e| *e.state()).collect();
        assert_eq!(once, twice);
    }
}
