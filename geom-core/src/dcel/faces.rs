//! Deriving faces from a linked half-edge structure.
//!
//! Every `next`-cycle is walked once; its signed area classifies it as a
//! bounded face's outer boundary (positive, counter-clockwise) or a hole
//! / unbounded-face boundary component (negative or zero, for a
//! zero-width dangling-edge cycle). The `next` convention keeps each
//! cycle's own face on its left, so a probe point nudged left of one of
//! its edges lands in whatever face the cycle actually borders — never
//! inside the area the cycle itself encloses. Each non-positive cycle's
//! containing face is the smallest positive candidate whose polygon
//! contains that probe; a cycle contained in none of them is part of the
//! single unbounded face (id `0`).

use geom_types::Point;

use super::{Face, HalfEdge, Vertex};
use crate::geo::{point_in_polygon, polygon_signed_area_2x, PointInPolygon};

struct Cycle {
    start: usize,
    members: Vec<usize>,
    points: Vec<Point>,
}

fn walk_cycles(vertices: &[Vertex], half_edges: &[HalfEdge]) -> Vec<Cycle> {
    let mut visited = vec![false; half_edges.len()];
    let mut cycles = Vec::new();
    for start in 0..half_edges.len() {
        if visited[start] {
            continue;
        }
        let mut members = Vec::new();
        let mut points = Vec::new();
        let mut he = start;
        loop {
            visited[he] = true;
            members.push(he);
            points.push(vertices[half_edges[he].origin].point);
            he = half_edges[he].next;
            if he == start {
                break;
            }
        }
        cycles.push(Cycle { start, members, points });
    }
    cycles
}

/// A point just to the left of this cycle's first edge: outside whatever
/// area the cycle's own vertices enclose, inside the face the cycle
/// actually bounds. A polygon's centroid would instead always land
/// inside the cycle's own loop regardless of winding, which is the wrong
/// side for a hole or hull boundary.
fn left_of_first_edge(points: &[Point]) -> Point {
    let a = points[0];
    let b = points[1 % points.len()];
    let d = b - a;
    let len = d.length();
    let mid = Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
    if len <= f64::EPSILON {
        return mid;
    }
    let left_normal = Point::new(-d.y / len, d.x / len);
    mid + left_normal.scale(len * 1e-4)
}

pub(super) fn assign(vertices: &[Vertex], half_edges: &mut [HalfEdge]) -> Vec<Face> {
    let cycles = walk_cycles(vertices, half_edges);

    let mut faces = vec![Face {
        outer: None,
        holes: Vec::new(),
    }];
    // (cycle index, assigned face id, outer polygon) for every bounded candidate.
    let mut positive: Vec<(usize, usize, Vec<Point>)> = Vec::new();
    let mut negative: Vec<usize> = Vec::new();

    for (ci, cycle) in cycles.iter().enumerate() {
        if polygon_signed_area_2x(&cycle.points) > 0.0 {
            let face_id = faces.len();
            faces.push(Face {
                outer: Some(cycle.start),
                holes: Vec::new(),
            });
            positive.push((ci, face_id, cycle.points.clone()));
        } else {
            negative.push(ci);
        }
    }

    // owner[ci] for ci in `negative`: the face this hole/unbounded-component belongs to.
    // Among every positive cycle whose polygon contains the probe, the
    // smallest one is the innermost, immediate container (a hole nested
    // two levels deep must not be handed to its grandparent just because
    // that candidate happened to be discovered first).
    let mut owner_of: Vec<(usize, usize)> = Vec::new();
    for &ci in &negative {
        let probe = left_of_first_edge(&cycles[ci].points);
        let owner = positive
            .iter()
            .filter(|(_, _, polygon)| !matches!(point_in_polygon(probe, polygon, 1e-9), PointInPolygon::Outside))
            .min_by(|(_, _, a), (_, _, b)| {
                polygon_signed_area_2x(a)
                    .abs()
                    .partial_cmp(&polygon_signed_area_2x(b).abs())
                    .unwrap()
            })
            .map(|&(_, face_id, _)| face_id)
            .unwrap_or(0);
        faces[owner].holes.push(cycles[ci].start);
        owner_of.push((ci, owner));
    }

    for (ci, face_id, _) in &positive {
        for &he in &cycles[*ci].members {
            half_edges[he].face = *face_id;
        }
    }
    for (ci, face_id) in &owner_of {
        for &he in &cycles[*ci].members {
            half_edges[he].face = *face_id;
        }
    }

    faces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dcel::Subdivision;
    use geom_types::LineSegment;

    #[test]
    fn unit_square_has_one_bounded_face_and_one_unbounded() {
        let lines = vec![
            LineSegment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0)),
            LineSegment::new(Point::new(1.0, 0.0), Point::new(1.0, 1.0)),
            LineSegment::new(Point::new(1.0, 1.0), Point::new(0.0, 1.0)),
            LineSegment::new(Point::new(0.0, 1.0), Point::new(0.0, 0.0)),
        ];
        let sub = Subdivision::from_lines(&lines, 1e-9).unwrap();
        assert_eq!(sub.faces.len(), 2);
        assert!(sub.faces[0].outer.is_none());
        assert!(sub.face_contains(1, Point::new(0.5, 0.5), 1e-9));
        assert!(!sub.face_contains(1, Point::new(2.0, 2.0), 1e-9));
    }

    #[test]
    fn square_with_interior_cross_has_four_bounded_faces() {
        let lines = vec![
            LineSegment::new(Point::new(0.0, 0.0), Point::new(2.0, 0.0)),
            LineSegment::new(Point::new(2.0, 0.0), Point::new(2.0, 2.0)),
            LineSegment::new(Point::new(2.0, 2.0), Point::new(0.0, 2.0)),
            LineSegment::new(Point::new(0.0, 2.0), Point::new(0.0, 0.0)),
            LineSegment::new(Point::new(1.0, 0.0), Point::new(1.0, 2.0)),
            LineSegment::new(Point::new(0.0, 1.0), Point::new(2.0, 1.0)),
        ];
        let sub = Subdivision::from_lines(&lines, 1e-9).unwrap();
        assert_eq!(sub.faces.len(), 5); // 1 unbounded + 4 quadrants
        let centers = [
            Point::new(0.5, 0.5),
            Point::new(1.5, 0.5),
            Point::new(0.5, 1.5),
            Point::new(1.5, 1.5),
        ];
        for c in centers {
            let hits: usize = (1..sub.faces.len()).filter(|&f| sub.face_contains(f, c, 1e-9)).count();
            assert_eq!(hits, 1, "point {c:?} should land in exactly one bounded face");
        }
    }

    #[test]
    fn square_with_hole_registers_hole_on_outer_face() {
        let lines = vec![
            LineSegment::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0)),
            LineSegment::new(Point::new(4.0, 0.0), Point::new(4.0, 4.0)),
            LineSegment::new(Point::new(4.0, 4.0), Point::new(0.0, 4.0)),
            LineSegment::new(Point::new(0.0, 4.0), Point::new(0.0, 0.0)),
            LineSegment::new(Point::new(1.0, 1.0), Point::new(3.0, 1.0)),
            LineSegment::new(Point::new(3.0, 1.0), Point::new(3.0, 3.0)),
            LineSegment::new(Point::new(3.0, 3.0), Point::new(1.0, 3.0)),
            LineSegment::new(Point::new(1.0, 3.0), Point::new(1.0, 1.0)),
        ];
        let sub = Subdivision::from_lines(&lines, 1e-9).unwrap();
        // Outer ring (face with a hole) plus the inner square, plus unbounded.
        assert_eq!(sub.faces.len(), 3);
        let ring_face = (1..sub.faces.len())
            .find(|&f| !sub.faces[f].holes.is_empty())
            .expect("one face should have a hole cut from it");
        assert!(sub.face_contains(ring_face, Point::new(0.5, 0.5), 1e-9));
        assert!(!sub.face_contains(ring_face, Point::new(2.0, 2.0), 1e-9));
    }
}
