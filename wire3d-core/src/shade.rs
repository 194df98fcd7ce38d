/// Depth-proxy shading for edges
///
/// Normalizes the summed endpoint `w` values.
pub const DEPTH_SCALE: f64 = 10.0;

/// Gray level of an edge whose endpoints have clip-space `w` values `w_a`, `w_b`.
///
/// The clip-space `w` of a point is its distance in front of the camera, so
/// the mean `w` of the endpoints stands in for the edge's depth. This is a
/// tuned heuristic, not a lighting model: the `/10` normalization and the
/// fourth power fit a solid sitting 5 to 10 units from the camera, and
/// exaggerate the contrast between near and far edges.
///
/// Larger `w` (farther away) gives a higher value. The result is rounded half
/// to even and clamped into `0..=255`; a NaN input yields 0.
pub fn depth_shade(w_a: f64, w_b: f64) -> u8 {
    let depth = (w_a + w_b) / DEPTH_SCALE;
    let level = (depth.powi(4) * 0.5 * 255.0).round_ties_even();
    if level.is_nan() {
        return 0;
    }
    level.clamp(0.0, 255.0) as u8
}
