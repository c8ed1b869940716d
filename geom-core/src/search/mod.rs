//! Point location against a [`Subdivision`](crate::dcel::Subdivision):
//! given a query point, report which vertex, half-edge, or face it lands
//! on.
//!
//! Both locators share the same exact-hit discipline: a query within
//! `epsilon` of a vertex reports that [`FindResult::Vertex`]; one within
//! `epsilon` of an edge (but no vertex) reports the half-edge of that
//! undirected edge that runs in the lexicographically increasing
//! (`y`-then-`x`) direction, so the answer is deterministic regardless of
//! which of the pair the caller happens to hold. Everything else falls
//! through to a [`FindResult::Face`].
//!
//! [`brute_force`] scans every face's polygon directly (`O(f)` per
//! query, no setup cost); [`trapezoidal`] precomputes a vertical
//! decomposition searchable in expected-logarithmic time, at the cost of
//! an upfront build pass.

pub mod brute_force;
pub mod trapezoidal;

use geom_types::{LineSegment, Point};

use crate::dcel::Subdivision;
use brute_force::BruteForceLocator;
use trapezoidal::TrapezoidalMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindResult {
    Vertex(usize),
    HalfEdge(usize),
    Face(usize),
}

/// The preferred point-location entry point: builds a
/// [`TrapezoidalMap`] over a subdivision and queries it, falling back to
/// nothing else — callers who want the no-precomputation oracle instead
/// use [`brute_force::BruteForceLocator`] directly.
pub struct Searcher<'a> {
    map: TrapezoidalMap<'a>,
}

impl<'a> Searcher<'a> {
    pub fn new(sub: &'a Subdivision, epsilon: f64) -> Searcher<'a> {
        Searcher {
            map: TrapezoidalMap::build(sub, epsilon),
        }
    }

    pub fn find(&self, q: Point) -> FindResult {
        self.map.find(q)
    }

    /// Cross-checks every vertex and half-edge midpoint round-trips
    /// through [`Searcher::find`]; see [`TrapezoidalMap::validate`].
    pub fn validate(&self) {
        self.map.validate();
    }
}


/// The half-edge of undirected edge `he`'s pair that runs from the
/// lexicographically smaller endpoint to the larger one.
fn canonical_half_edge(sub: &Subdivision, he: usize) -> usize {
    let twin = sub.half_edges[he].twin;
    let a = sub.vertices[sub.half_edges[he].origin].point;
    let b = sub.vertices[sub.half_edges[twin].origin].point;
    if a.cmp_lex_y(b) == std::cmp::Ordering::Less {
        he
    } else {
        twin
    }
}

/// Checks for an exact vertex or on-edge hit before any face search is
/// attempted; shared by both locators so they agree on every boundary
/// case.
pub(crate) fn find_exact(sub: &Subdivision, q: geom_types::Point, epsilon: f64) -> Option<FindResult> {
    for (vi, v) in sub.vertices.iter().enumerate() {
        if v.point.eq_epsilon(q, epsilon) {
            return Some(FindResult::Vertex(vi));
        }
    }
    for (hi, he) in sub.half_edges.iter().enumerate() {
        if hi >= he.twin {
            continue;
        }
        let a = sub.vertices[he.origin].point;
        let b = sub.vertices[sub.half_edges[he.twin].origin].point;
        let seg = LineSegment::new(a, b);
        if seg.distance_squared(q) <= epsilon * epsilon {
            return Some(FindResult::HalfEdge(canonical_half_edge(sub, hi)));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use geom_types::Point;

    fn square_subdivision() -> Subdivision {
        let lines = vec![
            LineSegment::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0)),
            LineSegment::new(Point::new(4.0, 0.0), Point::new(4.0, 4.0)),
            LineSegment::new(Point::new(4.0, 4.0), Point::new(0.0, 4.0)),
            LineSegment::new(Point::new(0.0, 4.0), Point::new(0.0, 0.0)),
        ];
        Subdivision::from_lines(&lines, 1e-9).unwrap()
    }

    #[test]
    fn exact_hit_finds_vertex_before_edge_or_face() {
        let sub = square_subdivision();
        let hit = find_exact(&sub, Point::new(0.0, 0.0), 1e-9);
        assert!(matches!(hit, Some(FindResult::Vertex(_))));
    }

    #[test]
    fn exact_hit_finds_edge_midpoint() {
        let sub = square_subdivision();
        let hit = find_exact(&sub, Point::new(2.0, 0.0), 1e-9);
        assert!(matches!(hit, Some(FindResult::HalfEdge(_))));
    }

    #[test]
    fn interior_point_has_no_exact_hit() {
        let sub = square_subdivision();
        assert!(find_exact(&sub, Point::new(2.0, 2.0), 1e-9).is_none());
    }
}
