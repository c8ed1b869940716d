//! Stand-alone polygon helpers: convex hull, point-in-polygon, signed
//! area, and centroid. These sit alongside (rather than inside) the DCEL
//! and Voronoi subsystems, which both call into [`point_in_polygon`] and
//! [`polygon_area`].

use geom_types::Point;

/// Graham scan convex hull. Input order is irrelevant; duplicate and
/// collinear points are removed. Returns the hull vertices in
/// counter-clockwise order starting from the lowest (then leftmost)
/// point. Returns an empty vector for fewer than 3 distinct points.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut pts: Vec<Point> = dedup_epsilon(points, 1e-9);
    if pts.len() < 3 {
        return Vec::new();
    }

    let pivot_idx = pts
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp_lex_y(**b))
        .map(|(i, _)| i)
        .unwrap();
    pts.swap(0, pivot_idx);
    let pivot = pts[0];

    pts[1..].sort_by(|&a, &b| {
        let orientation = pivot.cross(a, b);
        if orientation > 0.0 {
            std::cmp::Ordering::Less
        } else if orientation < 0.0 {
            std::cmp::Ordering::Greater
        } else {
            // Collinear with pivot: keep the nearer point first so the
            // farther, truly-hull point survives the stack scan below.
            pivot
                .distance_squared(a)
                .partial_cmp(&pivot.distance_squared(b))
                .unwrap()
        }
    });

    let mut hull: Vec<Point> = vec![pts[0]];
    for &p in &pts[1..] {
        while hull.len() >= 2 {
            let top = hull[hull.len() - 1];
            let second = hull[hull.len() - 2];
            if second.cross(top, p) <= 0.0 {
                hull.pop();
            } else {
                break;
            }
        }
        // Skip points collinear with (and closer than) the current hull top.
        if hull.last() != Some(&p) {
            hull.push(p);
        }
    }
    if hull.len() < 3 {
        return Vec::new();
    }
    hull
}

fn dedup_epsilon(points: &[Point], epsilon: f64) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if !out.iter().any(|&q| q.eq_epsilon(p, epsilon)) {
            out.push(p);
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointInPolygon {
    Inside,
    Outside,
    Edge,
    Vertex,
}

/// Ray-casting point-in-polygon test against a closed polygon given as
/// an open vertex sequence (the edge from the last vertex back to the
/// first is implied). `epsilon` controls how close a point must be to a
/// vertex/edge to be classified as `Vertex`/`Edge` rather than
/// `Inside`/`Outside`.
pub fn point_in_polygon(q: Point, polygon: &[Point], epsilon: f64) -> PointInPolygon {
    let n = polygon.len();
    if n < 3 {
        return PointInPolygon::Outside;
    }
    for &v in polygon {
        if q.eq_epsilon(v, epsilon) {
            return PointInPolygon::Vertex;
        }
    }
    use geom_types::LineSegment;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let seg = LineSegment::new(a, b);
        if seg.distance_squared(q) <= epsilon * epsilon {
            return PointInPolygon::Edge;
        }
    }

    let mut inside = false;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let crosses_y = (a.y > q.y) != (b.y > q.y);
        if crosses_y {
            let x_at_q_y = a.x + (q.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if q.x < x_at_q_y {
                inside = !inside;
            }
        }
    }
    if inside {
        PointInPolygon::Inside
    } else {
        PointInPolygon::Outside
    }
}

/// Twice the shoelace signed area (positive for a counter-clockwise
/// boundary), of the `2x` form used internally so callers that only
/// compare signs can skip the final divide.
pub fn polygon_signed_area_2x(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum
}

pub fn polygon_area(polygon: &[Point]) -> f64 {
    polygon_signed_area_2x(polygon) / 2.0
}

/// The centroid of a simple polygon (undefined, returned as the origin,
/// for a degenerate zero-area polygon).
pub fn polygon_centroid(polygon: &[Point]) -> Point {
    let n = polygon.len();
    if n < 3 {
        return Point::ORIGIN;
    }
    let area2 = polygon_signed_area_2x(polygon);
    if area2.abs() <= f64::EPSILON {
        let sum = polygon
            .iter()
            .fold(Point::ORIGIN, |acc, &p| acc + p);
        return sum.scale(1.0 / n as f64);
    }
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    let factor = 1.0 / (3.0 * area2);
    Point::new(cx * factor, cy * factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convex_hull_of_square_with_interior_point() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
            Point::new(2.0, 2.0),
        ];
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Point::new(2.0, 2.0)));
    }

    #[test]
    fn convex_hull_is_idempotent() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
            Point::new(2.0, 2.0),
            Point::new(1.0, 0.0),
        ];
        let hull1 = convex_hull(&points);
        let hull2 = convex_hull(&hull1);
        assert_eq!(hull1.len(), hull2.len());
    }

    #[test]
    fn convex_hull_subset_and_containment() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
            Point::new(2.0, 2.0),
            Point::new(1.0, 1.0),
        ];
        let hull = convex_hull(&points);
        for &p in &hull {
            assert!(points.iter().any(|&q| q == p));
        }
        for &p in &points {
            if !hull.contains(&p) {
                assert_ne!(point_in_polygon(p, &hull, 1e-9), PointInPolygon::Outside);
            }
        }
    }

    #[test]
    fn point_in_polygon_square() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert_eq!(point_in_polygon(Point::new(5.0, 5.0), &square, 1e-9), PointInPolygon::Inside);
        assert_eq!(point_in_polygon(Point::new(15.0, 5.0), &square, 1e-9), PointInPolygon::Outside);
        assert_eq!(point_in_polygon(Point::new(0.0, 5.0), &square, 1e-9), PointInPolygon::Edge);
        assert_eq!(point_in_polygon(Point::new(0.0, 0.0), &square, 1e-9), PointInPolygon::Vertex);
    }

    #[test]
    fn area_negates_under_reversal() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let mut reversed = square.clone();
        reversed.reverse();
        assert_eq!(polygon_area(&square), -polygon_area(&reversed));
        assert_eq!(polygon_area(&square), 100.0);
    }

    #[test]
    fn centroid_of_square_is_its_center() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let c = polygon_centroid(&square);
        assert!(c.eq_epsilon(Point::new(5.0, 5.0), 1e-9));
    }
}
