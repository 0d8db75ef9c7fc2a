use super::Point;

/// Bresenham line from `from` to `to`.
///
/// The source point is excluded and the destination is included, so a line
/// between two identical points is empty. Integer-only and deterministic.
pub fn trace_line(from: Point, to: Point) -> impl Iterator<Item = Point> {
    let step = Point::new((to.x - from.x).signum(), (to.y - from.y).signum());
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let mut err = dx + dy;
    let mut p = from;

    std::iter::from_fn(move || {
        if p == to {
            return None;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            p.x += step.x;
        }
        if e2 <= dx {
            err += dx;
            p.y += step.y;
        }
        Some(p)
    })
}

/// Collects [`trace_line`] into a vector.
pub fn line_points(from: Point, to: Point) -> Vec<Point> {
    trace_line(from, to).collect()
}
