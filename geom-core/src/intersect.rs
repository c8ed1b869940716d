//! Pairwise line-segment intersection with adaptive-epsilon recovery.
//!
//! Combines two classical tests — the sign/zero test on the four
//! cross-products of each endpoint against the opposing segment (Cormen's
//! `Segments-Intersect`), and a parametric line-equation solve
//! (O'Rourke) — and requires both to agree before reporting a result. When
//! they disagree, the epsilon tolerance is doubled and the whole test is
//! re-run, up to [`EPSILON_CEILING`].

use geom_types::{LineSegment, Location, Point};

/// The smallest epsilon ever used, even when the caller asks for exact
/// (`0.0`) classification: pure exact comparisons are too brittle for
/// near-collinear cases.
pub const MIN_EPSILON: f64 = 1e-10;

/// Once the adaptive-epsilon retry would need an epsilon at or above this
/// value, the segments are declared unresolvably close to parallel and
/// the recursion stops.
pub const EPSILON_CEILING: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// The two lines (extended to infinity) coincide.
    Collinear,
    /// The two lines are parallel and distinct.
    Parallel,
    /// The two lines cross at exactly one point (which may lie outside
    /// either segment's `[start, end]` span).
    Divergent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub relation: Relation,
    pub shared: Option<Point>,
    pub location_a: Option<Location>,
    pub location_b: Option<Location>,
}

impl Intersection {
    fn none(relation: Relation) -> Intersection {
        Intersection {
            relation,
            shared: None,
            location_a: None,
            location_b: None,
        }
    }
}

fn orient(p: Point, q: Point, r: Point) -> f64 {
    use robust::{orient2d, Coord};
    orient2d(
        Coord { x: p.x, y: p.y },
        Coord { x: q.x, y: q.y },
        Coord { x: r.x, y: r.y },
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Outside,
    Touching,
    Crossing,
}

fn sign(v: f64, tol: f64) -> i32 {
    if v > tol {
        1
    } else if v < -tol {
        -1
    } else {
        0
    }
}

fn in_open_range(u: f64, epsilon: f64) -> bool {
    u > epsilon && u < 1.0 - epsilon
}

fn on_boundary(u: f64, epsilon: f64) -> bool {
    (u - 0.0).abs() <= epsilon || (u - 1.0).abs() <= epsilon
}

fn out_of_range(u: f64, epsilon: f64) -> bool {
    u < -epsilon || u > 1.0 + epsilon
}

/// Classifies two directed segments `a` and `b`.
///
/// `epsilon` is clamped up to [`MIN_EPSILON`] even for callers that pass
/// `0.0`. The recursion this function performs internally when the two
/// tests disagree is the sole place epsilon mutates inside this crate.
pub fn intersect(a: LineSegment, b: LineSegment, epsilon: f64) -> Intersection {
    debug_assert!(epsilon >= 0.0, "epsilon must be non-negative");
    intersect_adaptive(a, b, epsilon.max(MIN_EPSILON))
}

fn intersect_adaptive(a: LineSegment, b: LineSegment, epsilon: f64) -> Intersection {
    let dir_a = a.delta();
    let dir_b = b.delta();
    let tol_a = epsilon * (dir_a.x.abs() + dir_a.y.abs());
    let tol_b = epsilon * (dir_b.x.abs() + dir_b.y.abs());

    let d1 = orient(a.start, a.end, b.start);
    let d2 = orient(a.start, a.end, b.end);
    let d3 = orient(b.start, b.end, a.start);
    let d4 = orient(b.start, b.end, a.end);
    let s1 = sign(d1, tol_a);
    let s2 = sign(d2, tol_a);
    let s3 = sign(d3, tol_b);
    let s4 = sign(d4, tol_b);

    if s1 == 0 && s2 == 0 && s3 == 0 && s4 == 0 {
        return collinear_intersection(a, b, epsilon);
    }

    let denom = dir_a.x * dir_b.y - dir_a.y * dir_b.x;
    let denom_tol = epsilon * (dir_a.length() * dir_b.length()).max(1.0);
    if denom.abs() <= denom_tol {
        return Intersection::none(Relation::Parallel);
    }

    let diff = b.start - a.start;
    let t = (diff.x * dir_b.y - diff.y * dir_b.x) / denom;
    let s = (diff.x * dir_a.y - diff.y * dir_a.x) / denom;

    let straddle = matches!((s1, s2), (1, -1) | (-1, 1)) && matches!((s3, s4), (1, -1) | (-1, 1));
    let touches_sign = s1 == 0 || s2 == 0 || s3 == 0 || s4 == 0;
    let sign_category = if straddle {
        Category::Crossing
    } else if touches_sign {
        Category::Touching
    } else {
        Category::Outside
    };

    let param_category = if in_open_range(t, epsilon) && in_open_range(s, epsilon) {
        Category::Crossing
    } else if (on_boundary(t, epsilon) || on_boundary(s, epsilon))
        && !out_of_range(t, epsilon)
        && !out_of_range(s, epsilon)
    {
        Category::Touching
    } else {
        Category::Outside
    };

    if sign_category != param_category {
        let next_epsilon = epsilon * 2.0;
        if next_epsilon >= EPSILON_CEILING {
            log::debug!(
                "line intersection: sign/parameter tests disagree at epsilon={epsilon}; \
                 epsilon ceiling reached, collapsing to PARALLEL"
            );
            return Intersection::none(Relation::Parallel);
        }
        log::trace!(
            "line intersection: sign/parameter tests disagree at epsilon={epsilon}; \
             retrying with epsilon={next_epsilon}"
        );
        return intersect_adaptive(a, b, next_epsilon);
    }

    let raw_shared = a.start + dir_a.scale(t);
    let shared = snap_to_endpoints(raw_shared, a, b, epsilon);
    let location_a = a.locate_epsilon(shared, epsilon);
    let location_b = b.locate_epsilon(shared, epsilon);

    Intersection {
        relation: Relation::Divergent,
        shared: Some(shared),
        location_a: Some(location_a),
        location_b: Some(location_b),
    }
}

/// If the computed intersection point coincides (within `epsilon`) with
/// an endpoint of either segment, returns that endpoint's exact
/// coordinate instead, so downstream exact comparisons stay sound.
fn snap_to_endpoints(point: Point, a: LineSegment, b: LineSegment, epsilon: f64) -> Point {
    for candidate in [a.start, a.end, b.start, b.end] {
        if point.eq_epsilon(candidate, epsilon) {
            return candidate;
        }
    }
    point
}

/// Handles the case where all four orientation tests report collinear:
/// `a` and `b` lie on the same infinite line. Reports the
/// lexicographically-first (y-first) endpoint of `b` that lies on `a`,
/// or `COLLINEAR` with no shared point if neither does.
fn collinear_intersection(a: LineSegment, b: LineSegment, epsilon: f64) -> Intersection {
    let mut candidates: Vec<Point> = [b.start, b.end]
        .into_iter()
        .filter(|&p| {
            matches!(
                a.locate_epsilon(p, epsilon),
                Location::Start | Location::Between | Location::End
            )
        })
        .collect();
    if candidates.is_empty() {
        return Intersection::none(Relation::Collinear);
    }
    candidates.sort_by(|p, q| p.cmp_lex_y(*q));
    let shared = candidates[0];
    Intersection {
        relation: Relation::Collinear,
        shared: Some(shared),
        location_a: Some(a.locate_epsilon(shared, epsilon)),
        location_b: Some(b.locate_epsilon(shared, epsilon)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geom_types::Point;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> LineSegment {
        LineSegment::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn crossing_segments() {
        let a = seg(0.0, 0.0, 10.0, 10.0);
        let b = seg(0.0, 10.0, 10.0, 0.0);
        let r = intersect(a, b, 1e-9);
        assert_eq!(r.relation, Relation::Divergent);
        assert!(r.shared.unwrap().eq_epsilon(Point::new(5.0, 5.0), 1e-6));
        assert_eq!(r.location_a, Some(Location::Between));
        assert_eq!(r.location_b, Some(Location::Between));
    }

    #[test]
    fn touching_endpoints() {
        let a = seg(0.0, 0.0, 5.0, 0.0);
        let b = seg(5.0, 0.0, 5.0, 5.0);
        let r = intersect(a, b, 1e-9);
        assert_eq!(r.relation, Relation::Divergent);
        assert!(r.shared.unwrap().eq_epsilon(Point::new(5.0, 0.0), 1e-6));
        assert_eq!(r.location_a, Some(Location::End));
        assert_eq!(r.location_b, Some(Location::Start));
    }

    #[test]
    fn collinear_overlap() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(5.0, 0.0, 15.0, 0.0);
        let r = intersect(a, b, 1e-9);
        assert_eq!(r.relation, Relation::Collinear);
        assert_eq!(r.shared, Some(Point::new(5.0, 0.0)));
        assert_eq!(r.location_a, Some(Location::Between));
        assert_eq!(r.location_b, Some(Location::Start));
    }

    #[test]
    fn collinear_no_overlap_reports_none() {
        let a = seg(0.0, 0.0, 4.0, 0.0);
        let b = seg(5.0, 0.0, 9.0, 0.0);
        let r = intersect(a, b, 1e-9);
        assert_eq!(r.relation, Relation::Collinear);
        assert_eq!(r.shared, None);
    }

    #[test]
    fn parallel_segments_report_no_shared_point() {
        let a = seg(0.0, 0.0, 10.0, 0.0);
        let b = seg(0.0, 5.0, 10.0, 5.0);
        let r = intersect(a, b, 1e-9);
        assert_eq!(r.relation, Relation::Parallel);
        assert_eq!(r.shared, None);
    }

    #[test]
    fn intersection_is_symmetric() {
        let a = seg(0.0, 0.0, 10.0, 10.0);
        let b = seg(0.0, 10.0, 10.0, 0.0);
        let ab = intersect(a, b, 1e-9);
        let ba = intersect(b, a, 1e-9);
        assert!(ab.shared.unwrap().eq_epsilon(ba.shared.unwrap(), 1e-6));
        assert_eq!(ab.location_a, ba.location_b);
        assert_eq!(ab.location_b, ba.location_a);
    }

    /// Fuzzes `intersect(a, b)` against `intersect(b, a)` over many
    /// random segment pairs, checking the §8 symmetry law holds (shared
    /// point agrees within `10*epsilon`, locations swap) whenever both
    /// orders report a divergent crossing.
    #[test]
    fn intersection_is_symmetric_under_random_segments() {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};

        let mut rng = SmallRng::seed_from_u64(0xC0FFEE);
        let epsilon = 1e-9;
        let mut checked = 0;
        for _ in 0..500 {
            let a = seg(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            );
            let b = seg(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            );
            if a.is_degenerate() || b.is_degenerate() {
                continue;
            }
            let ab = intersect(a, b, epsilon);
            let ba = intersect(b, a, epsilon);
            if ab.relation != Relation::Divergent || ba.relation != Relation::Divergent {
                continue;
            }
            let (Some(sab), Some(sba)) = (ab.shared, ba.shared) else {
                continue;
            };
            assert!(
                sab.eq_epsilon(sba, epsilon * 10.0),
                "asymmetric shared point for {a:?}/{b:?}: {sab:?} vs {sba:?}"
            );
            assert_eq!(ab.location_a, ba.location_b);
            assert_eq!(ab.location_b, ba.location_a);
            checked += 1;
        }
        assert!(checked > 50, "too few divergent random pairs to be a meaningful fuzz run");
    }
}
