use super::bezier_2d::{bezier_point_at, BEZIER_SAMPLES};
use super::Point2;

/// Returns the minimum distance from `p` to the line segment `a`→`b`.
#[must_use]
pub fn point_to_segment_dist(p: Point2, a: Point2, b: Point2) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return ((p.x - a.x).powi(2) + (p.y - a.y).powi(2)).sqrt();
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);

    let closest_x = a.x + t * dx;
    let closest_y = a.y + t * dy;

    ((p.x - closest_x).powi(2) + (p.y - closest_y).powi(2)).sqrt()
}

/// Returns the minimum distance from `p` to an open polyline, together with
/// the index of the closest segment. Returns `None` for fewer than 2 points.
#[must_use]
pub fn point_to_polyline_dist(p: Point2, points: &[Point2]) -> Option<(f64, usize)> {
    if points.len() < 2 {
        return None;
    }

    let mut best = f64::INFINITY;
    let mut best_seg = 0;
    for (i, pair) in points.windows(2).enumerate() {
        let d = point_to_segment_dist(p, pair[0], pair[1]);
        if d < best {
            best = d;
            best_seg = i;
        }
    }

    Some((best, best_seg))
}

/// Returns the approximate minimum distance from `p` to a cubic Bezier
/// segment, by sampling the curve at [`BEZIER_SAMPLES`] uniform parameters
/// and taking the closest sample.
///
/// This is an approximation, not an exact nearest-point solve; the sample
/// count keeps the error well inside interactive hit thresholds.
#[must_use]
pub fn point_to_bezier_dist(p: Point2, p0: Point2, p1: Point2, p2: Point2, p3: Point2) -> f64 {
    let mut best = f64::INFINITY;
    for i in 0..BEZIER_SAMPLES {
        #[allow(clippy::cast_precision_loss)]
        let t = i as f64 / (BEZIER_SAMPLES - 1) as f64;
        let q = bezier_point_at(p0, p1, p2, p3, t);
        let d = ((p.x - q.x).powi(2) + (p.y - q.y).powi(2)).sqrt();
        if d < best {
            best = d;
        }
    }
    best
}
