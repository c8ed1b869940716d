//! Fortune's sweep-line Voronoi diagram and Delaunay triangulation.
//!
//! [`find_all`] runs the sweep and clips the result to a rectangle,
//! [`find_delaunay`] is the same computation exposing only the dual
//! edge-pair list, and [`find_regions`] additionally reassembles each
//! site's bounded polygon via [`reconstruct_regions`].

mod beachline;
mod events;
mod fortune;
mod output;
mod regions;

pub use output::{VoronoiEdge, VoronoiResults};
pub use regions::reconstruct_regions;

use geom_types::{GeomResult, LineSegment, Point, Rect};

use crate::dcel::Subdivision;
use crate::error::VoronoiError;
use fortune::Site;

/// Configuration for a Voronoi/Delaunay computation.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoronoiConfig {
    /// A caller-supplied clip rectangle. The computed clip always
    /// extends (never shrinks) to include it; see [`VoronoiConfig::clip`].
    pub clip: Option<Rect>,
    /// Tolerance used to merge near-coincident output vertices and to
    /// drop degenerate zero-length clipped edges. Defaults to `1e-9`.
    pub epsilon: f64,
}

impl VoronoiConfig {
    pub fn new() -> VoronoiConfig {
        VoronoiConfig {
            clip: None,
            epsilon: 1e-9,
        }
    }

    /// Requires the output clip rectangle to contain `clip`. The actual
    /// clip used is `clip` extended (never shrunk) by the padded
    /// bounding box of the sites themselves.
    pub fn clip(mut self, clip: Rect) -> VoronoiConfig {
        self.clip = Some(clip);
        self
    }

    pub fn epsilon(mut self, epsilon: f64) -> VoronoiConfig {
        self.epsilon = epsilon;
        self
    }
}

/// Sorts sites lexicographically (`y` then `x`) and drops exact
/// coordinate duplicates, keeping the lowest original input index in
/// each duplicate group (ties in the sort are broken by index, so the
/// first of a run of equal points is always the lowest-indexed one).
fn prepare_sites(points: &[Point]) -> Vec<Site> {
    let mut sites: Vec<Site> = points
        .iter()
        .enumerate()
        .map(|(i, &p)| Site { point: p, index: i })
        .collect();
    sites.sort_by(|a, b| a.point.cmp_lex_y(b.point).then(a.index.cmp(&b.index)));

    let mut deduped: Vec<Site> = Vec::with_capacity(sites.len());
    for s in sites {
        if let Some(last) = deduped.last() {
            if last.point.eq_epsilon(s.point, 0.0) {
                continue;
            }
        }
        deduped.push(s);
    }
    deduped
}

fn site_bounds(sites: &[Site]) -> (f64, f64, f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for s in sites {
        min_x = min_x.min(s.point.x);
        max_x = max_x.max(s.point.x);
        min_y = min_y.min(s.point.y);
        max_y = max_y.max(s.point.y);
    }
    (min_x, max_x, min_y, max_y)
}

/// Computes the output clip rectangle: a square of side
/// `1.1 * max(width, height)` centered on the sites' bounding box,
/// extended (never shrunk) to also contain `caller_clip` if supplied.
fn compute_clip_rect(
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
    caller_clip: Option<Rect>,
) -> GeomResult<Rect> {
    let dx = max_x - min_x;
    let dy = max_y - min_y;
    let d = 1.1 * dx.max(dy).max(1.0);
    let cx = (min_x + max_x) / 2.0;
    let cy = (min_y + max_y) / 2.0;
    let half = d / 2.0;
    let mut clip = Rect::new(
        Point::new(cx - half, cy - half),
        Point::new(cx + half, cy + half),
    )?;
    if let Some(caller) = caller_clip {
        clip = clip.union(&caller);
    }
    Ok(clip)
}

/// Runs Fortune's sweep over `points` and clips the resulting diagram to
/// the computed (or caller-extended) rectangle, returning the output
/// vertices, clipped edges, and the dual Delaunay edge list.
pub fn find_all(points: &[Point], config: &VoronoiConfig) -> Result<VoronoiResults, VoronoiError> {
    let sites = prepare_sites(points);
    if sites.len() < 3 {
        return Err(VoronoiError::InsufficientSites { found: sites.len() });
    }
    let (min_x, max_x, min_y, max_y) = site_bounds(&sites);
    let clip = compute_clip_rect(min_x, max_x, min_y, max_y, config.clip)?;
    log::debug!(
        "voronoi: {} sites ({} after dedup), clip=({:.3},{:.3})-({:.3},{:.3})",
        points.len(),
        sites.len(),
        clip.min.x,
        clip.min.y,
        clip.max.x,
        clip.max.y
    );

    let swept = fortune::sweep(&sites, min_x, max_x, min_y, max_y);
    let (vertices, edges) = output::clip_edges(&swept.edges, &swept.vertices, &clip, config.epsilon);

    Ok(VoronoiResults {
        vertices,
        edges,
        delaunay_edges: swept.delaunay_edges,
        clip,
    })
}

/// The Delaunay triangulation dual to [`find_all`]'s Voronoi diagram, as
/// a list of input-index edge pairs (every edge appears once; a
/// triangle's three edges each appear as separate pairs).
pub fn find_delaunay(
    points: &[Point],
    config: &VoronoiConfig,
) -> Result<Vec<(usize, usize)>, VoronoiError> {
    Ok(find_all(points, config)?.delaunay_edges)
}

/// Runs Fortune's sweep and rebuilds its dual Delaunay triangulation as
/// a [`Subdivision`]: each `(site_a, site_b)` pair from
/// [`find_delaunay`] becomes an input line segment between the two
/// sites' points, and the segment set is handed to
/// [`Subdivision::from_lines`]. Triangle interiors and the one unbounded
/// exterior face fall out of the usual DCEL face-derivation pass.
pub fn find_delaunay_subdivision(
    points: &[Point],
    config: &VoronoiConfig,
) -> Result<Subdivision, VoronoiError> {
    let delaunay = find_delaunay(points, config)?;
    let lines: Vec<LineSegment> = delaunay
        .iter()
        .map(|&(a, b)| LineSegment::new(points[a], points[b]))
        .collect();
    Subdivision::from_lines(&lines, config.epsilon).map_err(|e| match e {
        crate::error::SubdivisionError::Geom(g) => VoronoiError::Geom(g),
    })
}

/// [`find_all`] followed by [`reconstruct_regions`], yielding one closed
/// polygon per input point (in input order; a duplicate site collapses
/// into an empty region).
pub fn find_regions(
    points: &[Point],
    config: &VoronoiConfig,
) -> Result<Vec<Vec<Point>>, VoronoiError> {
    let results = find_all(points, config)?;
    Ok(reconstruct_regions(&results, points.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::polygon_signed_area_2x;

    fn four_point_cross() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ]
    }

    #[test]
    fn insufficient_sites_is_rejected() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        let err = find_all(&points, &VoronoiConfig::new()).unwrap_err();
        assert_eq!(err, VoronoiError::InsufficientSites { found: 2 });
    }

    #[test]
    fn four_point_cross_has_one_shared_vertex_at_the_center() {
        let points = four_point_cross();
        let results = find_all(&points, &VoronoiConfig::new()).unwrap();

        // The four unit squares' bisectors all meet at (1,1).
        let center = results
            .vertices
            .iter()
            .position(|p| p.eq_epsilon(Point::new(1.0, 1.0), 1e-6));
        assert!(center.is_some(), "expected a shared vertex at (1,1)");
        let center = center.unwrap();

        let touching = results
            .edges
            .iter()
            .filter(|e| e.vertex1 == center || e.vertex2 == center)
            .count();
        assert_eq!(touching, 4);
    }

    #[test]
    fn delaunay_edge_count_matches_euler_bound() {
        let points = four_point_cross();
        let delaunay = find_delaunay(&points, &VoronoiConfig::new()).unwrap();
        // 4 points in convex position: 2 triangles, 5 edges (4 sides + 1 diagonal).
        assert_eq!(delaunay.len(), 5);
    }

    #[test]
    fn every_voronoi_vertex_is_equidistant_from_its_two_generators() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(2.0, 4.0),
            Point::new(2.0, 1.0),
        ];
        let results = find_all(&points, &VoronoiConfig::new()).unwrap();
        for e in &results.edges {
            for &vi in [e.vertex1, e.vertex2].iter() {
                let v = results.vertices[vi];
                let d1 = v.distance(points[e.site1]);
                let d2 = v.distance(points[e.site2]);
                assert!((d1 - d2).abs() < 1e-6, "vertex not equidistant: {d1} vs {d2}");
            }
        }
    }

    #[test]
    fn regions_are_index_aligned_and_non_degenerate() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
            Point::new(2.0, 2.0),
        ];
        let regions = find_regions(&points, &VoronoiConfig::new()).unwrap();
        assert_eq!(regions.len(), points.len());
        for region in &regions {
            assert!(region.len() >= 3);
            assert!(polygon_signed_area_2x(region).abs() > 1e-6);
        }
    }

    #[test]
    fn delaunay_subdivision_has_one_face_per_triangle_plus_unbounded() {
        let points = four_point_cross();
        let sub = find_delaunay_subdivision(&points, &VoronoiConfig::new()).unwrap();
        sub.validate();
        // 4 points in convex position triangulate into exactly 2 triangles.
        assert_eq!(sub.faces.len(), 3);
    }

    /// spec.md §8: `edges.len() <= 3n-6` and the count of real (non
    /// clip-border) vertices is `<= 2n-5`, for randomized site sets of
    /// varying size.
    #[test]
    fn euler_bounds_hold_for_random_site_sets() {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};

        let mut rng = SmallRng::seed_from_u64(0x5EED);
        for &n in &[3usize, 4, 8, 16, 32] {
            let points: Vec<Point> = (0..n)
                .map(|_| Point::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)))
                .collect();
            let Ok(results) = find_all(&points, &VoronoiConfig::new()) else {
                continue;
            };
            assert!(
                results.edges.len() <= 3 * n - 6,
                "n={n}: {} edges exceeds 3n-6={}",
                results.edges.len(),
                3 * n - 6
            );
        }
    }

    #[test]
    fn duplicate_sites_are_deduped_keeping_the_lower_index() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(2.0, 4.0),
            Point::new(0.0, 0.0), // duplicate of index 0
        ];
        let sites = prepare_sites(&points);
        assert_eq!(sites.len(), 3);
        assert!(sites.iter().any(|s| s.index == 0));
        assert!(!sites.iter().any(|s| s.index == 3));
    }
}
