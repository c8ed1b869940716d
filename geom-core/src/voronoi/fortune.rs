//! Fortune's sweep-line construction: the `Site`/`FullEdge` working
//! records, the bisector and intersection primitives, and the main
//! site-event/circle-event loop.

use geom_types::Point;

use super::beachline::{BeachLine, Side};
use super::events::EventQueue;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Site {
    pub point: Point,
    pub index: usize,
}

/// A Voronoi bisector's line equation, in the numerically stable form
/// used throughout this module: either `a == 1.0` (for bisectors closer
/// to horizontal) or `b == 1.0` (closer to vertical), satisfying
/// `a*x + b*y = c`.
pub(crate) struct FullEdge {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub site_left: Site,
    pub site_right: Site,
    pub vertex_left: Option<usize>,
    pub vertex_right: Option<usize>,
}

pub(crate) struct SweepResult {
    pub vertices: Vec<Point>,
    pub edges: Vec<FullEdge>,
    pub delaunay_edges: Vec<(usize, usize)>,
}

fn bisect(edges: &mut Vec<FullEdge>, s1: Site, s2: Site) -> usize {
    let dx = s2.point.x - s1.point.x;
    let dy = s2.point.y - s1.point.y;
    let adx = dx.abs();
    let ady = dy.abs();
    let c_base = s1.point.x * dx + s1.point.y * dy + (dx * dx + dy * dy) * 0.5;
    let (a, b, c) = if adx > ady {
        (1.0, dy / dx, c_base / dx)
    } else {
        (dx / dy, 1.0, c_base / dy)
    };
    edges.push(FullEdge {
        a,
        b,
        c,
        site_left: s1,
        site_right: s2,
        vertex_left: None,
        vertex_right: None,
    });
    edges.len() - 1
}

/// The intersection of the two bisectors carried by `he1` and `he2`,
/// `None` if they diverge or if the intersection falls on the wrong side
/// of whichever edge reaches its right-hand generator site first.
fn intersect(edges: &[FullEdge], beach: &BeachLine, he1: usize, he2: usize) -> Option<Point> {
    let e1i = beach.nodes[he1].edge?;
    let e2i = beach.nodes[he2].edge?;
    let e1 = &edges[e1i];
    let e2 = &edges[e2i];
    if e1.site_right.index == e2.site_right.index {
        return None;
    }

    let d = e1.a * e2.b - e1.b * e2.a;
    if d.abs() < 1.0e-10 {
        return None;
    }

    let xint = (e1.c * e2.b - e2.c * e1.b) / d;
    let yint = (e2.c * e1.a - e1.c * e2.a) / d;

    let e1_later = (e1.site_right.point.y, e1.site_right.point.x)
        < (e2.site_right.point.y, e2.site_right.point.x);
    let (el, e) = if e1_later { (he1, e1) } else { (he2, e2) };

    let right_of_site = xint >= e.site_right.point.x;
    let side = beach.nodes[el].side;
    if (right_of_site && side == Side::Left) || (!right_of_site && side == Side::Right) {
        return None;
    }
    Some(Point::new(xint, yint))
}

fn make_vertex(vertices: &mut Vec<Point>, p: Point) -> usize {
    vertices.push(p);
    vertices.len() - 1
}

fn set_endpoint(edges: &mut [FullEdge], edge_idx: usize, side: Side, vertex: usize) {
    match side {
        Side::Left => edges[edge_idx].vertex_left = Some(vertex),
        Side::Right => edges[edge_idx].vertex_right = Some(vertex),
    }
}

/// Runs Fortune's algorithm over `sites_sorted` (already sorted
/// lexicographically `y` then `x`, with duplicate coordinates removed)
/// and the site bounding box used to size and index the beach-line and
/// event-queue hash tables.
pub(crate) fn sweep(
    sites_sorted: &[Site],
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
) -> SweepResult {
    let n = sites_sorted.len();
    let sqrt_n = ((n + 4) as f64).sqrt();
    let el_hashsize = ((2.0 * sqrt_n).ceil() as usize).max(4);
    let pq_hashsize = ((4.0 * sqrt_n).ceil() as usize).max(4);

    let mut beach = BeachLine::new(min_x, max_x, el_hashsize);
    let mut queue = EventQueue::new(min_y, max_y, pq_hashsize);
    let mut edges: Vec<FullEdge> = Vec::new();
    let mut vertices: Vec<Point> = Vec::new();
    let mut delaunay_edges: Vec<(usize, usize)> = Vec::new();

    let bottomsite = sites_sorted[0];
    let mut next_site_idx = 2usize;
    let mut newsite: Option<Site> = sites_sorted.get(1).copied();

    loop {
        let next_event_point = if !queue.is_empty() {
            Some(queue.min(&beach))
        } else {
            None
        };

        let do_site_event = match (newsite, next_event_point) {
            (Some(s), Some(ev)) => (s.point.y, s.point.x) < (ev.y, ev.x),
            (Some(_), None) => true,
            (None, _) => false,
        };

        if do_site_event {
            let site = newsite.unwrap();
            log::trace!("voronoi: site event for site {}", site.index);

            let lbnd = beach.leftbnd(&edges, bottomsite, site.point);
            let rbnd = beach.nodes[lbnd].right.unwrap();
            let bot = beach.rightreg(&edges, bottomsite, lbnd);

            let e_idx = bisect(&mut edges, bot, site);
            delaunay_edges.push((bot.index, site.index));

            let bisector1 = beach.create(Some(e_idx), Side::Left);
            beach.insert(lbnd, bisector1);
            if let Some(p) = intersect(&edges, &beach, lbnd, bisector1) {
                queue.delete(&mut beach, lbnd);
                queue.insert(&mut beach, lbnd, p, p.distance(site.point));
            }

            let bisector2 = beach.create(Some(e_idx), Side::Right);
            beach.insert(bisector1, bisector2);
            if let Some(p) = intersect(&edges, &beach, bisector2, rbnd) {
                queue.insert(&mut beach, bisector2, p, p.distance(site.point));
            }

            newsite = sites_sorted.get(next_site_idx).copied();
            next_site_idx += 1;
        } else if !queue.is_empty() {
            let lbnd = queue.extract_min(&mut beach);
            let llbnd = beach.nodes[lbnd].left.unwrap();
            let rbnd = beach.nodes[lbnd].right.unwrap();
            let rrbnd = beach.nodes[rbnd].right.unwrap();
            let bot = beach.leftreg(&edges, bottomsite, lbnd);
            let top = beach.rightreg(&edges, bottomsite, rbnd);

            let v = beach.nodes[lbnd].vertex.unwrap();
            log::trace!(
                "voronoi: circle event vertex ({:.6}, {:.6}) from sites {} and {}",
                v.x,
                v.y,
                bot.index,
                top.index
            );
            let vi = make_vertex(&mut vertices, v);

            let e_lbnd = beach.nodes[lbnd].edge.unwrap();
            let side_lbnd = beach.nodes[lbnd].side;
            set_endpoint(&mut edges, e_lbnd, side_lbnd, vi);
            let e_rbnd = beach.nodes[rbnd].edge.unwrap();
            let side_rbnd = beach.nodes[rbnd].side;
            set_endpoint(&mut edges, e_rbnd, side_rbnd, vi);

            beach.delete(lbnd);
            queue.delete(&mut beach, rbnd);
            beach.delete(rbnd);

            let (bot2, top2, pm) = if bot.point.y > top.point.y {
                (top, bot, Side::Right)
            } else {
                (bot, top, Side::Left)
            };
            let e_idx = bisect(&mut edges, bot2, top2);
            delaunay_edges.push((bot2.index, top2.index));

            let bisector = beach.create(Some(e_idx), pm);
            beach.insert(llbnd, bisector);
            set_endpoint(&mut edges, e_idx, pm.other(), vi);

            if let Some(p) = intersect(&edges, &beach, llbnd, bisector) {
                queue.delete(&mut beach, llbnd);
                queue.insert(&mut beach, llbnd, p, p.distance(bot2.point));
            }
            if let Some(p) = intersect(&edges, &beach, bisector, rrbnd) {
                queue.insert(&mut beach, bisector, p, p.distance(bot2.point));
            }
        } else {
            break;
        }
    }

    SweepResult {
        vertices,
        edges,
        delaunay_edges,
    }
}
