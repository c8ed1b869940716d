//! Lexicographic point ordering and nearest-neighbour search.
//!
//! Two concrete orderings are provided — primary axis `x` then `y`
//! ([`XFirst`]), and primary axis `y` then `x` ([`YFirst`]) — as distinct
//! wrapper types rather than a single type parameterized at runtime, so
//! that each can implement `Ord` and live in a `BTreeSet`.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use geom_types::Point;

/// A point ordered primarily by `x`, secondarily by `y`.
#[derive(Debug, Clone, Copy)]
pub struct XFirst(pub Point);

/// A point ordered primarily by `y`, secondarily by `x`.
#[derive(Debug, Clone, Copy)]
pub struct YFirst(pub Point);

/// Common interface shared by [`XFirst`] and [`YFirst`] so the search
/// routines below can be written once and reused for both orderings.
pub trait LexKey: Copy {
    fn primary(&self) -> f64;
    fn secondary(&self) -> f64;
    fn point(&self) -> Point;
    /// The primary-axis coordinate of an arbitrary query point, using
    /// this key's axis assignment (not the point wrapped by `self`).
    fn primary_of(query: Point) -> f64;
}

impl LexKey for XFirst {
    fn primary(&self) -> f64 {
        self.0.x
    }
    fn secondary(&self) -> f64 {
        self.0.y
    }
    fn point(&self) -> Point {
        self.0
    }
    fn primary_of(query: Point) -> f64 {
        query.x
    }
}

impl LexKey for YFirst {
    fn primary(&self) -> f64 {
        self.0.y
    }
    fn secondary(&self) -> f64 {
        self.0.x
    }
    fn point(&self) -> Point {
        self.0
    }
    fn primary_of(query: Point) -> f64 {
        query.y
    }
}

macro_rules! impl_lex_ord {
    ($t:ty) => {
        impl PartialEq for $t {
            fn eq(&self, other: &Self) -> bool {
                self.cmp(other) == Ordering::Equal
            }
        }
        impl Eq for $t {}
        impl PartialOrd for $t {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }
        impl Ord for $t {
            fn cmp(&self, other: &Self) -> Ordering {
                match self.primary().partial_cmp(&other.primary()) {
                    Some(Ordering::Equal) | None => self
                        .secondary()
                        .partial_cmp(&other.secondary())
                        .unwrap_or(Ordering::Equal),
                    Some(o) => o,
                }
            }
        }
    };
}
impl_lex_ord!(XFirst);
impl_lex_ord!(YFirst);

/// Finds the point in `sorted` (assumed sorted by `K`'s ordering)
/// closest to `query`, by binary-searching to the insertion point and
/// expanding outward along the primary axis.
///
/// Expansion in each direction stops once the primary-axis distance from
/// `query` to the next candidate, minus `2 * epsilon`, squared, exceeds
/// the current best squared distance — at that point no point farther in
/// that direction can possibly be closer. This yields expected `O(log n)`
/// for evenly distributed points and worst-case `O(log n + n)`.
pub fn find_nearest<K: LexKey>(sorted: &[K], query: Point, epsilon: f64) -> Option<usize> {
    debug_assert!(epsilon >= 0.0, "epsilon must be non-negative");
    if sorted.is_empty() {
        return None;
    }
    let query_primary = K::primary_of(query);

    let mut lo = 0usize;
    let mut hi = sorted.len();
    while lo < hi {
        let mid = (lo + hi) / 2;
        if sorted[mid].primary() < query_primary {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    // `lo` is the first index whose primary coordinate is >= query_primary.
    let mut best_idx = None;
    let mut best_dist = f64::INFINITY;
    let margin = 2.0 * epsilon;

    let mut consider = |idx: usize, best_idx: &mut Option<usize>, best_dist: &mut f64| {
        let d = sorted[idx].point().distance_squared(query);
        if d < *best_dist {
            *best_dist = d;
            *best_idx = Some(idx);
        }
    };

    let mut right = lo;
    while right < sorted.len() {
        let primary_gap = sorted[right].primary() - query_primary;
        if primary_gap > 0.0 {
            let bound = (primary_gap - margin).max(0.0);
            if bound * bound > best_dist {
                break;
            }
        }
        consider(right, &mut best_idx, &mut best_dist);
        right += 1;
    }
    let mut left = lo;
    while left > 0 {
        left -= 1;
        let primary_gap = query_primary - sorted[left].primary();
        if primary_gap > 0.0 {
            let bound = (primary_gap - margin).max(0.0);
            if bound * bound > best_dist {
                break;
            }
        }
        consider(left, &mut best_idx, &mut best_dist);
    }
    best_idx
}

/// The ordered-set sibling of [`find_nearest`], using ascending and
/// descending range iterators instead of index arithmetic, with the same
/// radius-shrinking discipline.
pub fn find_nearest_set<K: LexKey + Ord>(set: &BTreeSet<K>, query: Point, epsilon: f64) -> Option<K>
where
    K: From<Point>,
{
    debug_assert!(epsilon >= 0.0, "epsilon must be non-negative");
    if set.is_empty() {
        return None;
    }
    let probe = K::from(query);
    let query_primary = probe.primary();
    let margin = 2.0 * epsilon;

    let mut best: Option<K> = None;
    let mut best_dist = f64::INFINITY;

    for &candidate in set.range(probe..) {
        let primary_gap = candidate.primary() - query_primary;
        if primary_gap > 0.0 {
            let bound = (primary_gap - margin).max(0.0);
            if bound * bound > best_dist {
                break;
            }
        }
        let d = candidate.point().distance_squared(query);
        if d < best_dist {
            best_dist = d;
            best = Some(candidate);
        }
    }
    for &candidate in set.range(..probe).rev() {
        let primary_gap = query_primary - candidate.primary();
        if primary_gap > 0.0 {
            let bound = (primary_gap - margin).max(0.0);
            if bound * bound > best_dist {
                break;
            }
        }
        let d = candidate.point().distance_squared(query);
        if d < best_dist {
            best_dist = d;
            best = Some(candidate);
        }
    }
    best
}

impl From<Point> for XFirst {
    fn from(p: Point) -> Self {
        XFirst(p)
    }
}
impl From<Point> for YFirst {
    fn from(p: Point) -> Self {
        YFirst(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_x(points: &[Point]) -> Vec<XFirst> {
        let mut v: Vec<XFirst> = points.iter().copied().map(XFirst).collect();
        v.sort();
        v
    }

    #[test]
    fn find_nearest_matches_brute_force() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(-2.0, -2.0),
        ];
        let sorted = sorted_x(&points);
        for query in [
            Point::new(4.0, 0.5),
            Point::new(100.0, 100.0),
            Point::new(-100.0, -100.0),
            Point::new(3.1, 4.1),
        ] {
            let via_search = find_nearest(&sorted, query, 0.0).map(|i| sorted[i].point());
            let via_brute = points
                .iter()
                .copied()
                .min_by(|a, b| {
                    a.distance_squared(query)
                        .partial_cmp(&b.distance_squared(query))
                        .unwrap()
                })
                .unwrap();
            assert_eq!(via_search.unwrap(), via_brute);
        }
    }

    #[test]
    fn find_nearest_set_matches_slice_version() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 1.0),
            Point::new(10.0, -1.0),
            Point::new(3.0, 4.0),
        ];
        let set: BTreeSet<YFirst> = points.iter().copied().map(YFirst).collect();
        let query = Point::new(4.0, 3.0);
        let via_set = find_nearest_set(&set, query, 0.0).map(|k| k.point());
        let sorted = {
            let mut v: Vec<YFirst> = points.iter().copied().map(YFirst).collect();
            v.sort();
            v
        };
        let via_slice = find_nearest(&sorted, query, 0.0).map(|i| sorted[i].point());
        assert_eq!(via_set, via_slice);
    }

    #[test]
    fn find_nearest_empty_is_none() {
        let empty: Vec<XFirst> = vec![];
        assert!(find_nearest(&empty, Point::new(0.0, 0.0), 0.0).is_none());
    }
}
