//! Clipping raw (possibly unbounded) Voronoi edges to a rectangle.
//!
//! [`clip_edge`] is the classic two-case line-clip: for an edge whose
//! line equation is `a*x + b*y = c`, walk inward from the rectangle's
//! border on the dominant axis, substituting in whichever endpoint
//! vertex is already known, then clamp the free axis. It returns `None`
//! for edges that never cross the rectangle at all.

use geom_types::{Point, Rect};

use super::fortune::FullEdge;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoronoiEdge {
    pub site1: usize,
    pub site2: usize,
    pub vertex1: usize,
    pub vertex2: usize,
}

#[derive(Debug, Clone)]
pub struct VoronoiResults {
    pub vertices: Vec<Point>,
    pub edges: Vec<VoronoiEdge>,
    pub delaunay_edges: Vec<(usize, usize)>,
    pub clip: Rect,
}

/// Two generator sites closer together than this are assumed to have
/// produced a bisector too short to be geometrically meaningful; its
/// edge is dropped rather than clipped.
const MIN_SITE_SEPARATION: f64 = 1.0e-10;

pub(crate) fn clip_edge(e: &FullEdge, raw_vertices: &[Point], clip: &Rect) -> Option<(Point, Point)> {
    if e.site_left.point.distance(e.site_right.point) < MIN_SITE_SEPARATION {
        return None;
    }

    let pxmin = clip.min.x;
    let pxmax = clip.max.x;
    let pymin = clip.min.y;
    let pymax = clip.max.y;

    let (s1, s2) = if e.a == 1.0 && e.b >= 0.0 {
        (
            e.vertex_right.map(|i| raw_vertices[i]),
            e.vertex_left.map(|i| raw_vertices[i]),
        )
    } else {
        (
            e.vertex_left.map(|i| raw_vertices[i]),
            e.vertex_right.map(|i| raw_vertices[i]),
        )
    };

    let (mut x1, mut y1, mut x2, mut y2);

    if e.a == 1.0 {
        y1 = pymin;
        if let Some(p) = s1 {
            if p.y > pymin {
                y1 = p.y;
            }
        }
        if y1 > pymax {
            y1 = pymax;
        }
        x1 = e.c - e.b * y1;

        y2 = pymax;
        if let Some(p) = s2 {
            if p.y < pymax {
                y2 = p.y;
            }
        }
        if y2 < pymin {
            y2 = pymin;
        }
        x2 = e.c - e.b * y2;

        if (x1 > pxmax && x2 > pxmax) || (x1 < pxmin && x2 < pxmin) {
            return None;
        }
        if x1 > pxmax {
            x1 = pxmax;
            y1 = (e.c - x1) / e.b;
        }
        if x1 < pxmin {
            x1 = pxmin;
            y1 = (e.c - x1) / e.b;
        }
        if x2 > pxmax {
            x2 = pxmax;
            y2 = (e.c - x2) / e.b;
        }
        if x2 < pxmin {
            x2 = pxmin;
            y2 = (e.c - x2) / e.b;
        }
    } else {
        x1 = pxmin;
        if let Some(p) = s1 {
            if p.x > pxmin {
                x1 = p.x;
            }
        }
        if x1 > pxmax {
            x1 = pxmax;
        }
        y1 = e.c - e.a * x1;

        x2 = pxmax;
        if let Some(p) = s2 {
            if p.x < pxmax {
                x2 = p.x;
            }
        }
        if x2 < pxmin {
            x2 = pxmin;
        }
        y2 = e.c - e.a * x2;

        if (y1 > pymax && y2 > pymax) || (y1 < pymin && y2 < pymin) {
            return None;
        }
        if y1 > pymax {
            y1 = pymax;
            x1 = (e.c - y1) / e.a;
        }
        if y1 < pymin {
            y1 = pymin;
            x1 = (e.c - y1) / e.a;
        }
        if y2 > pymax {
            y2 = pymax;
            x2 = (e.c - y2) / e.a;
        }
        if y2 < pymin {
            y2 = pymin;
            x2 = (e.c - y2) / e.a;
        }
    }

    Some((Point::new(x1, y1), Point::new(x2, y2)))
}

fn find_or_insert(verts: &mut Vec<Point>, p: Point, epsilon: f64) -> usize {
    if let Some(i) = verts.iter().position(|&q| q.eq_epsilon(p, epsilon)) {
        i
    } else {
        verts.push(p);
        verts.len() - 1
    }
}

/// Clips every `FullEdge` against `clip`, merging clipped endpoints that
/// coincide within `epsilon` into a single output vertex so that, e.g.,
/// the four edges meeting at one real Voronoi vertex all reference the
/// same output index.
pub(crate) fn clip_edges(
    edges: &[FullEdge],
    raw_vertices: &[Point],
    clip: &Rect,
    epsilon: f64,
) -> (Vec<Point>, Vec<VoronoiEdge>) {
    let mut out_vertices: Vec<Point> = Vec::new();
    let mut out_edges: Vec<VoronoiEdge> = Vec::new();

    for e in edges {
        let Some((p1, p2)) = clip_edge(e, raw_vertices, clip) else {
            continue;
        };
        if p1.eq_epsilon(p2, epsilon) {
            log::trace!("voronoi: dropping degenerate zero-length clipped edge");
            continue;
        }
        let v1 = find_or_insert(&mut out_vertices, p1, epsilon);
        let v2 = find_or_insert(&mut out_vertices, p2, epsilon);
        out_edges.push(VoronoiEdge {
            site1: e.site_left.index,
            site2: e.site_right.index,
            vertex1: v1,
            vertex2: v2,
        });
    }
    (out_vertices, out_edges)
}
