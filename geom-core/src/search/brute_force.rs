//! The reference point-locator: no precomputation, a linear scan of
//! every bounded face's polygon (and its holes) per query. Correct by
//! construction and useful as the oracle [`super::trapezoidal`] is
//! checked against.

use geom_types::Point;

use super::{find_exact, FindResult};
use crate::dcel::Subdivision;

#[derive(Debug, Clone, Copy)]
pub struct BruteForceLocator {
    pub epsilon: f64,
}

impl BruteForceLocator {
    pub fn new(epsilon: f64) -> BruteForceLocator {
        BruteForceLocator { epsilon }
    }

    pub fn find(&self, sub: &Subdivision, q: Point) -> FindResult {
        if let Some(hit) = find_exact(sub, q, self.epsilon) {
            return hit;
        }
        for face in 1..sub.faces.len() {
            if sub.face_contains(face, q, self.epsilon) {
                return FindResult::Face(face);
            }
        }
        FindResult::Face(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geom_types::LineSegment;

    #[test]
    fn locates_interior_and_exterior_points() {
        let lines = vec![
            LineSegment::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0)),
            LineSegment::new(Point::new(4.0, 0.0), Point::new(4.0, 4.0)),
            LineSegment::new(Point::new(4.0, 4.0), Point::new(0.0, 4.0)),
            LineSegment::new(Point::new(0.0, 4.0), Point::new(0.0, 0.0)),
        ];
        let sub = Subdivision::from_lines(&lines, 1e-9).unwrap();
        let locator = BruteForceLocator::new(1e-9);

        assert_eq!(locator.find(&sub, Point::new(2.0, 2.0)), FindResult::Face(1));
        assert_eq!(locator.find(&sub, Point::new(10.0, 10.0)), FindResult::Face(0));
        assert!(matches!(locator.find(&sub, Point::new(0.0, 0.0)), FindResult::Vertex(_)));
    }
}
