//! Reassembling per-site Voronoi regions from the flat [`VoronoiEdge`]
//! list: group by generator site, chain the edges that share a vertex
//! into maximal runs, and close any run left open by the clip (an
//! unbounded cell) with a walk along the clip rectangle's border.
//!
//! A site whose region is fully interior to the clip already chains into
//! a single closed loop and needs no border walk at all; only sites on
//! the convex hull of the input produce open chains.

use geom_types::Point;

use super::output::VoronoiResults;

/// Reconstructs every generator site's region as a closed polygon
/// (vertex sequence, last-to-first edge implied), indexed the same way
/// as the original site list passed to [`super::find_all`]. A site with
/// no surviving edges (e.g. one dropped as a duplicate during sweep
/// preparation) gets an empty region.
pub fn reconstruct_regions(results: &VoronoiResults, num_sites: usize) -> Vec<Vec<Point>> {
    let mut by_site: Vec<Vec<usize>> = vec![Vec::new(); num_sites];
    for (ei, e) in results.edges.iter().enumerate() {
        if e.site1 < num_sites {
            by_site[e.site1].push(ei);
        }
        if e.site2 < num_sites {
            by_site[e.site2].push(ei);
        }
    }

    by_site
        .iter()
        .map(|edge_idxs| reconstruct_one(results, edge_idxs))
        .collect()
}

fn reconstruct_one(results: &VoronoiResults, edge_idxs: &[usize]) -> Vec<Point> {
    if edge_idxs.is_empty() {
        return Vec::new();
    }

    let mut used = vec![false; edge_idxs.len()];
    let mut chains: Vec<Vec<usize>> = Vec::new();

    for start in 0..edge_idxs.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let e0 = &results.edges[edge_idxs[start]];
        let mut chain: Vec<usize> = vec![e0.vertex1, e0.vertex2];

        loop {
            let last = *chain.last().unwrap();
            let mut extended = false;
            for (i, &ei) in edge_idxs.iter().enumerate() {
                if used[i] {
                    continue;
                }
                let e = &results.edges[ei];
                if e.vertex1 == last {
                    chain.push(e.vertex2);
                } else if e.vertex2 == last {
                    chain.push(e.vertex1);
                } else {
                    continue;
                }
                used[i] = true;
                extended = true;
                break;
            }
            if !extended {
                break;
            }
        }
        loop {
            let first = *chain.first().unwrap();
            let mut extended = false;
            for (i, &ei) in edge_idxs.iter().enumerate() {
                if used[i] {
                    continue;
                }
                let e = &results.edges[ei];
                if e.vertex1 == first {
                    chain.insert(0, e.vertex2);
                } else if e.vertex2 == first {
                    chain.insert(0, e.vertex1);
                } else {
                    continue;
                }
                used[i] = true;
                extended = true;
                break;
            }
            if !extended {
                break;
            }
        }
        chains.push(chain);
    }

    close_chains(results, chains)
}

/// Maps a point assumed to lie on `clip`'s border to a `[0, 4)` perimeter
/// parameter, increasing counter-clockwise from the bottom-left corner.
fn border_param(p: Point, results: &VoronoiResults) -> f64 {
    let clip = &results.clip;
    let eps = 1e-7_f64.max(clip.width().max(clip.height()) * 1e-9);
    let width = clip.width().max(f64::EPSILON);
    let height = clip.height().max(f64::EPSILON);
    if (p.y - clip.min.y).abs() <= eps {
        (p.x - clip.min.x) / width
    } else if (p.x - clip.max.x).abs() <= eps {
        1.0 + (p.y - clip.min.y) / height
    } else if (p.y - clip.max.y).abs() <= eps {
        2.0 + (clip.max.x - p.x) / width
    } else {
        3.0 + (clip.max.y - p.y) / height
    }
}

/// Walks the clip border from `from` to `to` (both assumed to lie on the
/// border), returning the corners crossed along the way in order. The
/// walk direction follows increasing [`border_param`], wrapping at 4.
fn border_walk(from: Point, to: Point, results: &VoronoiResults) -> Vec<Point> {
    let clip = &results.clip;
    let corners = [
        Point::new(clip.min.x, clip.min.y),
        Point::new(clip.max.x, clip.min.y),
        Point::new(clip.max.x, clip.max.y),
        Point::new(clip.min.x, clip.max.y),
    ];
    let from_p = border_param(from, results);
    let to_p = border_param(to, results);
    let mut span = to_p - from_p;
    if span <= 0.0 {
        span += 4.0;
    }

    let mut out: Vec<(f64, Point)> = corners
        .iter()
        .filter_map(|&corner| {
            let cp = border_param(corner, results);
            let mut rel = cp - from_p;
            if rel < 0.0 {
                rel += 4.0;
            }
            if rel > 1e-9 && rel < span - 1e-9 {
                Some((rel, corner))
            } else {
                None
            }
        })
        .collect();
    out.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
    out.into_iter().map(|(_, p)| p).collect()
}

/// Closes a site's set of edge chains into one polygon. A single chain
/// whose ends already coincide is already a closed interior cell; one or
/// more open chains (unbounded cells, always touching the clip border at
/// both free ends) are ordered around the border and linked with
/// [`border_walk`] segments between them.
///
/// This produces *a* valid closed-polygon completion rather than
/// necessarily the unique minimal one when a site's region meets the
/// border in more than one disjoint run; the spec only requires a closed,
/// non-degenerate polygon per site, not a canonical one.
fn close_chains(results: &VoronoiResults, mut chains: Vec<Vec<usize>>) -> Vec<Point> {
    if chains.is_empty() {
        return Vec::new();
    }
    if chains.len() == 1 {
        let chain = &chains[0];
        if chain.len() >= 2 && chain.first() == chain.last() {
            return chain[..chain.len() - 1]
                .iter()
                .map(|&i| results.vertices[i])
                .collect();
        }
    }

    chains.sort_by(|a, b| {
        let pa = results.vertices[a[0]];
        let pb = results.vertices[b[0]];
        border_param(pa, results)
            .partial_cmp(&border_param(pb, results))
            .unwrap()
    });

    let n = chains.len();
    let mut polygon: Vec<Point> = Vec::new();
    for (idx, chain) in chains.iter().enumerate() {
        for &vi in chain {
            polygon.push(results.vertices[vi]);
        }
        let exit = *polygon.last().unwrap();
        let entry = results.vertices[chains[(idx + 1) % n][0]];
        polygon.extend(border_walk(exit, entry, results));
    }
    polygon
}
