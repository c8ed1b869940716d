//! A doubly-connected edge list (DCEL) planar subdivision built from a
//! collection of input line segments: every pairwise crossing becomes a
//! vertex, every maximal crossing-free run becomes an edge, and the
//! half-edge cycles left by linking them up partition the plane into
//! faces (exactly one of them unbounded).
//!
//! [`Subdivision::from_lines`] does the construction; [`Subdivision::validate`]
//! re-checks every structural invariant afterward and panics (this is an
//! implementation-bug detector, not a user-facing error path — see the
//! module docs on [`crate::error`]).

mod construct;
mod faces;

use geom_types::{LineSegment, Point};

use crate::error::SubdivisionError;
use crate::geo::{point_in_polygon, PointInPolygon};

/// A subdivision vertex: a point plus one of its outgoing half-edges
/// (any one suffices to enumerate all of them via `twin`/`next`).
#[derive(Debug, Clone)]
pub struct Vertex {
    pub point: Point,
    pub half_edge: Option<usize>,
}

/// One direction of a subdivision edge. `next`/`prev` walk the boundary
/// of `face` keeping it on the left, per the usual DCEL convention.
#[derive(Debug, Clone)]
pub struct HalfEdge {
    pub origin: usize,
    pub twin: usize,
    pub next: usize,
    pub prev: usize,
    pub face: usize,
}

/// A face of the subdivision. `outer` is the half-edge cycle bounding it
/// from the outside; `holes` are any inner boundary cycles (for face 0,
/// the unbounded face, `outer` is `None` and every boundary component —
/// there may be several, one per connected piece of the input — sits in
/// `holes`).
#[derive(Debug, Clone)]
pub struct Face {
    pub outer: Option<usize>,
    pub holes: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct Subdivision {
    pub vertices: Vec<Vertex>,
    pub half_edges: Vec<HalfEdge>,
    pub faces: Vec<Face>,
}

impl Subdivision {
    /// Builds a subdivision from a set of (possibly overlapping,
    /// crossing, or touching) line segments.
    pub fn from_lines(lines: &[LineSegment], epsilon: f64) -> Result<Subdivision, SubdivisionError> {
        construct::build(lines, epsilon)
    }

    /// The half-edge a vertex's neighbours are reached from by following
    /// `twin`/`next` starting at `vertex.half_edge`.
    pub fn outgoing(&self, vertex: usize) -> Vec<usize> {
        let Some(start) = self.vertices[vertex].half_edge else {
            return Vec::new();
        };
        let mut out = vec![start];
        let mut he = self.half_edges[start].twin;
        he = self.half_edges[he].next;
        while he != start {
            out.push(he);
            he = self.half_edges[self.half_edges[he].twin].next;
        }
        out
    }

    /// The ordered vertex sequence of a half-edge cycle starting at `start`.
    pub fn cycle_points(&self, start: usize) -> Vec<Point> {
        let mut points = Vec::new();
        let mut he = start;
        loop {
            points.push(self.vertices[self.half_edges[he].origin].point);
            he = self.half_edges[he].next;
            if he == start {
                break;
            }
        }
        points
    }

    /// The outer boundary polygon of a bounded face, `None` for the
    /// unbounded face (id `0`) or a face with no outer cycle recorded.
    pub fn face_polygon(&self, face: usize) -> Option<Vec<Point>> {
        let outer = self.faces[face].outer?;
        Some(self.cycle_points(outer))
    }

    /// The hole boundary polygons of `face` (empty for a face with no holes).
    pub fn face_holes(&self, face: usize) -> Vec<Vec<Point>> {
        self.faces[face]
            .holes
            .iter()
            .map(|&he| self.cycle_points(he))
            .collect()
    }

    /// Tests whether `q` lies within `face`'s outer boundary and outside
    /// all of its holes. Always `false` for the unbounded face.
    pub fn face_contains(&self, face: usize, q: Point, epsilon: f64) -> bool {
        let Some(outer) = self.face_polygon(face) else {
            return false;
        };
        if matches!(point_in_polygon(q, &outer, epsilon), PointInPolygon::Outside) {
            return false;
        }
        !self
            .face_holes(face)
            .iter()
            .any(|hole| matches!(point_in_polygon(q, hole, epsilon), PointInPolygon::Inside))
    }

    /// Locates `q` against this subdivision directly (no persistent
    /// search structure): a vertex or half-edge within `epsilon` wins,
    /// otherwise the containing face is found by scanning every face's
    /// polygon. Callers who will issue many queries against the same
    /// subdivision should build a [`crate::search::Searcher`] once
    /// instead, which amortizes the per-query cost.
    pub fn find(&self, q: Point, epsilon: f64) -> crate::search::FindResult {
        crate::search::brute_force::BruteForceLocator::new(epsilon).find(self, q)
    }

    /// One [`LineSegment`] per undirected edge (half-edge pairs collapsed
    /// to a single directed segment, lower-index half-edge wins). Useful
    /// for round-tripping through [`Subdivision::from_lines`] again.
    pub fn to_lines(&self) -> Vec<LineSegment> {
        self.half_edges
            .iter()
            .enumerate()
            .filter(|&(i, he)| i < he.twin)
            .map(|(i, he)| {
                let a = self.vertices[he.origin].point;
                let b = self.vertices[self.half_edges[he.twin].origin].point;
                let _ = i;
                LineSegment::new(a, b)
            })
            .collect()
    }

    /// Re-checks every structural invariant: twin symmetry, next/prev
    /// mutual consistency and cycle closure, each vertex's recorded
    /// half-edge actually originating there, and exactly one unbounded
    /// face. Panics on the first violation found; this is the
    /// implementation-bug detector, not a recoverable error path.
    pub fn validate(&self) {
        for (i, he) in self.half_edges.iter().enumerate() {
            assert_eq!(
                self.half_edges[he.twin].twin, i,
                "half-edge {i}'s twin {} does not point back",
                he.twin
            );
            assert_ne!(he.twin, i, "half-edge {i} is its own twin");
            assert_eq!(
                self.half_edges[he.next].prev, i,
                "half-edge {i}'s next {} does not point back via prev",
                he.next
            );
            assert_eq!(
                self.half_edges[he.prev].next, i,
                "half-edge {i}'s prev {} does not point back via next",
                he.prev
            );
            assert_eq!(
                self.half_edges[he.twin].origin,
                self.half_edges[he.next].origin,
                "half-edge {i}'s twin and next should share an origin (the destination of {i})"
            );
            assert!(he.face < self.faces.len(), "half-edge {i} has an out-of-range face {}", he.face);
        }

        for (i, he) in self.half_edges.iter().enumerate() {
            let mut cur = he.next;
            let mut steps = 0usize;
            while cur != i {
                cur = self.half_edges[cur].next;
                steps += 1;
                assert!(
                    steps <= self.half_edges.len(),
                    "half-edge {i}'s next-cycle never closes"
                );
            }
        }

        for (vi, v) in self.vertices.iter().enumerate() {
            if let Some(he) = v.half_edge {
                assert_eq!(
                    self.half_edges[he].origin, vi,
                    "vertex {vi}'s recorded half-edge {he} does not originate there"
                );
            }
        }

        assert!(!self.faces.is_empty(), "a subdivision must have at least the unbounded face");
        assert!(self.faces[0].outer.is_none(), "face 0 must be the unbounded face");
        for (fi, f) in self.faces.iter().enumerate().skip(1) {
            assert!(f.outer.is_some(), "bounded face {fi} has no outer boundary");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geom_types::LineSegment;

    fn triforce() -> Vec<LineSegment> {
        // Outer triangle with an inner, inverted triangle ("triforce"),
        // the scenario 6 fixture from spec.md §8.
        vec![
            LineSegment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)),
            LineSegment::new(Point::new(10.0, 0.0), Point::new(5.0, 10.0)),
            LineSegment::new(Point::new(5.0, 10.0), Point::new(0.0, 0.0)),
            LineSegment::new(Point::new(2.5, 5.0), Point::new(7.5, 5.0)),
            LineSegment::new(Point::new(7.5, 5.0), Point::new(5.0, 0.0)),
            LineSegment::new(Point::new(5.0, 0.0), Point::new(2.5, 5.0)),
        ]
    }

    #[test]
    fn from_lines_round_trips_through_to_lines() {
        let lines = triforce();
        let sub = Subdivision::from_lines(&lines, 1e-9).unwrap();
        sub.validate();

        let rebuilt = Subdivision::from_lines(&sub.to_lines(), 0.0).unwrap();
        rebuilt.validate();
        assert_eq!(rebuilt.vertices.len(), sub.vertices.len());
        assert_eq!(rebuilt.half_edges.len(), sub.half_edges.len());
        assert_eq!(rebuilt.faces.len(), sub.faces.len());
    }

    #[test]
    fn square_scenario_matches_spec_literal_area() {
        // spec.md §8 scenario 5: a square from 4 corner-to-corner lines.
        let corners = [
            Point::new(-1.0, -2.0),
            Point::new(-1.0, 2.0),
            Point::new(1.0, 2.0),
            Point::new(1.0, -2.0),
        ];
        let lines: Vec<LineSegment> = (0..4)
            .map(|i| LineSegment::new(corners[i], corners[(i + 1) % 4]))
            .collect();
        let sub = Subdivision::from_lines(&lines, 1e-9).unwrap();
        sub.validate();

        assert_eq!(sub.vertices.len(), 4);
        assert_eq!(sub.half_edges.len(), 8);
        assert_eq!(sub.faces.len(), 2);
        let interior = sub.face_polygon(1).unwrap();
        assert!((crate::geo::polygon_area(&interior).abs() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn triforce_scenario_matches_spec_literal_areas() {
        // spec.md §8 scenario 6: an outer triangle containing a smaller,
        // disjoint inner triangle, carved into 3 faces (unbounded, the
        // ring between the two triangles, and the inner triangle).
        let outer = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ];
        let inner = [Point::new(1.0, 1.0), Point::new(3.0, 1.0), Point::new(1.0, 3.0)];
        let lines: Vec<LineSegment> = [
            LineSegment::new(outer[0], outer[1]),
            LineSegment::new(outer[1], outer[2]),
            LineSegment::new(outer[2], outer[0]),
            LineSegment::new(inner[0], inner[1]),
            LineSegment::new(inner[1], inner[2]),
            LineSegment::new(inner[2], inner[0]),
        ]
        .to_vec();

        let sub = Subdivision::from_lines(&lines, 1e-9).unwrap();
        sub.validate();

        assert_eq!(sub.vertices.len(), 6);
        assert_eq!(sub.half_edges.len(), 12);
        assert_eq!(sub.faces.len(), 3);

        let ring = (1..sub.faces.len())
            .find(|&f| !sub.faces[f].holes.is_empty())
            .expect("one face should have the inner triangle as a hole");
        let inner_face = (1..sub.faces.len())
            .find(|&f| f != ring)
            .expect("the inner triangle should be its own face");

        // The ring face's own outer boundary is the full outer triangle
        // (area 50); its hole is the inner triangle (area 2) subtracted
        // from it.
        assert!((crate::geo::polygon_area(&sub.face_polygon(ring).unwrap()).abs() - 50.0).abs() < 1e-9);
        assert!((crate::geo::polygon_area(&sub.face_polygon(inner_face).unwrap()).abs() - 2.0).abs() < 1e-9);
        assert_eq!(sub.faces[ring].holes.len(), 1);
    }

    #[test]
    fn find_locates_vertex_edge_and_face() {
        let lines = vec![
            LineSegment::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0)),
            LineSegment::new(Point::new(4.0, 0.0), Point::new(4.0, 4.0)),
            LineSegment::new(Point::new(4.0, 4.0), Point::new(0.0, 4.0)),
            LineSegment::new(Point::new(0.0, 4.0), Point::new(0.0, 0.0)),
        ];
        let sub = Subdivision::from_lines(&lines, 1e-9).unwrap();
        assert!(matches!(
            sub.find(Point::new(0.0, 0.0), 1e-9),
            crate::search::FindResult::Vertex(_)
        ));
        assert!(matches!(
            sub.find(Point::new(2.0, 0.0), 1e-9),
            crate::search::FindResult::HalfEdge(_)
        ));
        assert_eq!(sub.find(Point::new(2.0, 2.0), 1e-9), crate::search::FindResult::Face(1));
        assert_eq!(sub.find(Point::new(10.0, 10.0), 1e-9), crate::search::FindResult::Face(0));
    }

    #[test]
    fn no_two_half_edges_cross_in_their_interiors() {
        let sub = Subdivision::from_lines(&triforce(), 1e-9).unwrap();
        let segments: Vec<LineSegment> = sub
            .half_edges
            .iter()
            .enumerate()
            .filter(|&(i, he)| i < he.twin)
            .map(|(_, he)| {
                LineSegment::new(
                    sub.vertices[he.origin].point,
                    sub.vertices[sub.half_edges[he.twin].origin].point,
                )
            })
            .collect();
        for i in 0..segments.len() {
            for j in (i + 1)..segments.len() {
                let r = crate::intersect::intersect(segments[i], segments[j], 1e-9);
                if r.relation != crate::intersect::Relation::Divergent {
                    continue;
                }
                let loc_a = r.location_a.unwrap();
                let loc_b = r.location_b.unwrap();
                let interior = |l: geom_types::Location| {
                    matches!(l, geom_types::Location::Between)
                };
                assert!(
                    !(interior(loc_a) && interior(loc_b)),
                    "edges {i} and {j} cross in their interiors at {:?}",
                    r.shared
                );
            }
        }
    }
}
