//! Building a [`Subdivision`] from a raw line-segment set: find every
//! crossing, unify crossings and endpoints into one vertex list, split
//! each input line at every vertex that lies on it, link the resulting
//! half-edge pairs into `next`/`prev` cycles by sorting each vertex's
//! outgoing edges by polar angle, and hand the result to [`super::faces`]
//! for face derivation.

use std::collections::HashSet;

use geom_types::{LineSegment, Location, Point};

use super::{HalfEdge, Subdivision, Vertex};
use crate::error::SubdivisionError;
use crate::multi_intersect;

fn push_dedup(vertices: &mut Vec<Point>, p: Point, epsilon: f64) -> usize {
    if let Some(i) = vertices.iter().position(|&q| q.eq_epsilon(p, epsilon)) {
        i
    } else {
        vertices.push(p);
        vertices.len() - 1
    }
}

/// The vertex indices lying on `line` (its own endpoints plus any
/// crossing point that falls on it), sorted from `line.start` to
/// `line.end`.
fn vertices_on_line(line: LineSegment, vertices: &[Point], epsilon: f64) -> Vec<usize> {
    let mut on_line: Vec<(f64, usize)> = vertices
        .iter()
        .enumerate()
        .filter_map(|(i, &p)| {
            let loc = line.locate_epsilon(p, epsilon);
            if matches!(loc, Location::Start | Location::Between | Location::End) {
                let d = line.delta();
                let t = (p - line.start).dot(d);
                Some((t, i))
            } else {
                None
            }
        })
        .collect();
    on_line.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
    on_line.dedup_by_key(|&mut (_, i)| i);
    on_line.into_iter().map(|(_, i)| i).collect()
}

/// Builds the half-edge pair for undirected edge `{a, b}`, unless one was
/// already created for this pair, and returns the index of the half-edge
/// whose origin is `a`.
fn edge_half_edge(
    half_edges: &mut Vec<HalfEdge>,
    seen: &mut HashSet<(usize, usize)>,
    a: usize,
    b: usize,
) -> Option<usize> {
    let key = (a.min(b), a.max(b));
    if !seen.insert(key) {
        return None;
    }
    let he_a = half_edges.len();
    let he_b = he_a + 1;
    half_edges.push(HalfEdge {
        origin: a,
        twin: he_b,
        next: he_a,
        prev: he_a,
        face: 0,
    });
    half_edges.push(HalfEdge {
        origin: b,
        twin: he_a,
        next: he_b,
        prev: he_b,
        face: 0,
    });
    Some(he_a)
}

pub(super) fn build(lines: &[LineSegment], epsilon: f64) -> Result<Subdivision, SubdivisionError> {
    let crossings = multi_intersect::sweep_line(lines, epsilon);

    let mut points: Vec<Point> = Vec::new();
    for &line in lines {
        if line.is_degenerate() {
            continue;
        }
        push_dedup(&mut points, line.start, epsilon);
        push_dedup(&mut points, line.end, epsilon);
    }
    for crossing in &crossings {
        push_dedup(&mut points, crossing.point, epsilon);
    }

    let mut half_edges: Vec<HalfEdge> = Vec::new();
    let mut seen_edges: HashSet<(usize, usize)> = HashSet::new();
    for &line in lines {
        if line.is_degenerate() {
            continue;
        }
        let chain = vertices_on_line(line, &points, epsilon);
        for pair in chain.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a == b {
                continue;
            }
            edge_half_edge(&mut half_edges, &mut seen_edges, a, b);
        }
    }

    let mut vertices: Vec<Vertex> = points
        .into_iter()
        .map(|point| Vertex { point, half_edge: None })
        .collect();

    link_around_vertices(&mut vertices, &mut half_edges);

    let faces = super::faces::assign(&vertices, &mut half_edges);

    let subdivision = Subdivision {
        vertices,
        half_edges,
        faces,
    };
    log::debug!(
        "dcel: {} lines -> {} vertices, {} half-edges, {} faces",
        lines.len(),
        subdivision.vertices.len(),
        subdivision.half_edges.len(),
        subdivision.faces.len()
    );
    Ok(subdivision)
}

/// For every vertex, sorts its outgoing half-edges by polar angle and
/// links `twin(h_i).next = h_{i+1}` / `h_{i+1}.prev = twin(h_i)` around
/// the cyclic order, the standard DCEL construction rule that makes each
/// `next`-cycle trace a face boundary keeping the face on its left.
fn link_around_vertices(vertices: &mut [Vertex], half_edges: &mut [HalfEdge]) {
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); vertices.len()];
    for (hi, he) in half_edges.iter().enumerate() {
        outgoing[he.origin].push(hi);
    }

    for (vi, mut edges) in outgoing.into_iter().enumerate() {
        if edges.is_empty() {
            continue;
        }
        let origin = vertices[vi].point;
        edges.sort_by(|&a, &b| {
            let pa = half_edges[half_edges[a].twin].origin;
            let pb = half_edges[half_edges[b].twin].origin;
            let angle_a = (vertices[pa].point - origin).angle();
            let angle_b = (vertices[pb].point - origin).angle();
            angle_a.partial_cmp(&angle_b).unwrap()
        });
        vertices[vi].half_edge = Some(edges[0]);

        let n = edges.len();
        for i in 0..n {
            let h_i = edges[i];
            let h_next = edges[(i + 1) % n];
            let twin_i = half_edges[h_i].twin;
            half_edges[twin_i].next = h_next;
            half_edges[h_next].prev = twin_i;
        }
    }
}
