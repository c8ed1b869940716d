//! Computing the full intersection set of many line segments.
//!
//! Two algorithms are offered and are expected to produce identical
//! crossing sets: [`brute_force`] (`O(n^2)` pairwise) and [`sweep_line`]
//! (Bentley-Ottmann, `O((n + k) log n)`). Both key crossings by an
//! epsilon-tolerant shared point, merging same-point crossings from
//! different segment pairs into one [`Crossing`] record.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use geom_types::{LineSegment, Location, Point};

use crate::intersect::{intersect, Relation};
use crate::lex::YFirst;

/// A point where one or more input segments meet, together with each
/// segment's location at that point.
#[derive(Debug, Clone, PartialEq)]
pub struct Crossing {
    pub point: Point,
    pub entries: Vec<(usize, Location)>,
}

fn merge_crossing(crossings: &mut Vec<Crossing>, point: Point, idx: usize, loc: Location, epsilon: f64) {
    if let Some(existing) = crossings.iter_mut().find(|c| c.point.eq_epsilon(point, epsilon)) {
        if !existing.entries.iter().any(|&(i, _)| i == idx) {
            existing.entries.push((idx, loc));
        }
        return;
    }
    crossings.push(Crossing {
        point,
        entries: vec![(idx, loc)],
    });
}

/// `O(n^2)` pairwise intersection of every segment against every other.
pub fn brute_force(lines: &[LineSegment], epsilon: f64) -> Vec<Crossing> {
    let mut crossings: Vec<Crossing> = Vec::new();
    for i in 0..lines.len() {
        for j in (i + 1)..lines.len() {
            let result = intersect(lines[i], lines[j], epsilon);
            if matches!(result.relation, Relation::Parallel) {
                continue;
            }
            if let Some(point) = result.shared {
                merge_crossing(&mut crossings, point, i, result.location_a.unwrap(), epsilon);
                merge_crossing(&mut crossings, point, j, result.location_b.unwrap(), epsilon);
            }
        }
    }
    crossings
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    Start,
    End,
    Crossing,
}

#[derive(Debug, Clone)]
struct SweepEvent {
    point: Point,
    kind: EventKind,
    segments: (usize, usize),
}

/// Order events so that the sweep (which moves from high `y` to low `y`,
/// left-to-right for ties) processes the topmost, then leftmost, then
/// `Start`-before-`End`-before-`Crossing` event next.
impl SweepEvent {
    fn priority_key(&self) -> (YFirst, EventKind) {
        (YFirst(self.point), self.kind)
    }
}

impl PartialEq for SweepEvent {
    fn eq(&self, other: &Self) -> bool {
        self.priority_key() == other.priority_key()
    }
}
impl Eq for SweepEvent {}
impl PartialOrd for SweepEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for SweepEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so that `BinaryHeap` (a max-heap) pops the
        // topmost/leftmost/earliest-kind event first.
        let (ay, ak) = self.priority_key();
        let (by, bk) = other.priority_key();
        by.partial_cmp(&ay)
            .unwrap_or(Ordering::Equal)
            .then(ak.cmp(&bk))
    }
}

/// Returns the "upper" and "lower" endpoint of a segment for sweep
/// purposes: the endpoint with the greater `y`, breaking ties toward the
/// smaller `x` (this is the degenerate-horizontal-segment rule of
/// spec.md's multi-line intersection component).
fn upper_lower(seg: LineSegment) -> (Point, Point) {
    match seg.start.y.partial_cmp(&seg.end.y) {
        Some(Ordering::Greater) => (seg.start, seg.end),
        Some(Ordering::Less) => (seg.end, seg.start),
        _ => {
            if seg.start.x <= seg.end.x {
                (seg.start, seg.end)
            } else {
                (seg.end, seg.start)
            }
        }
    }
}

/// The `x` coordinate at which `seg`'s line crosses the horizontal line
/// `y = at_y`. Falls back to the segment's upper endpoint `x` for
/// (near-)horizontal segments, which is sufficient for active-set
/// ordering purposes since such a segment spans a single sweep instant.
fn x_at_y(seg: LineSegment, at_y: f64) -> f64 {
    let d = seg.delta();
    if d.y.abs() <= f64::EPSILON {
        seg.start.x.min(seg.end.x)
    } else {
        seg.start.x + d.x * (at_y - seg.start.y) / d.y
    }
}

/// Bentley-Ottmann sweep. Maintains a left-to-right ordered active list
/// of segments currently crossing the sweep line, as a plain `Vec`
/// re-ordered by adjacent swaps at crossing events (not a balanced
/// search tree — acceptable per spec.md's design notes on search
/// structures, at the cost of `O(n)` adjacency lookups instead of
/// `O(log n)`).
pub fn sweep_line(lines: &[LineSegment], epsilon: f64) -> Vec<Crossing> {
    let mut queue: BinaryHeap<SweepEvent> = BinaryHeap::new();
    for (i, &seg) in lines.iter().enumerate() {
        if seg.is_degenerate() {
            continue;
        }
        let (upper, lower) = upper_lower(seg);
        queue.push(SweepEvent {
            point: upper,
            kind: EventKind::Start,
            segments: (i, i),
        });
        queue.push(SweepEvent {
            point: lower,
            kind: EventKind::End,
            segments: (i, i),
        });
    }

    let mut active: Vec<usize> = Vec::new();
    let mut removed: Vec<bool> = vec![false; lines.len()];
    let mut crossings: Vec<Crossing> = Vec::new();
    let mut scheduled: std::collections::HashSet<(usize, usize)> = std::collections::HashSet::new();

    let order_key = |idx: usize, y: f64| x_at_y(lines[idx], y);

    while let Some(event) = queue.pop() {
        match event.kind {
            EventKind::Start => {
                let i = event.segments.0;
                let y = event.point.y;
                let pos = active
                    .partition_point(|&j| order_key(j, y) < order_key(i, y));
                active.insert(pos, i);
                if pos > 0 {
                    try_schedule(&mut queue, &mut scheduled, lines, active[pos - 1], i, epsilon);
                }
                if pos + 1 < active.len() {
                    try_schedule(&mut queue, &mut scheduled, lines, i, active[pos + 1], epsilon);
                }
            }
            EventKind::End => {
                let i = event.segments.0;
                removed[i] = true;
                if let Some(pos) = active.iter().position(|&j| j == i) {
                    active.remove(pos);
                    if pos > 0 && pos < active.len() {
                        try_schedule(&mut queue, &mut scheduled, lines, active[pos - 1], active[pos], epsilon);
                    }
                }
            }
            EventKind::Crossing => {
                let (i, j) = event.segments;
                if removed[i] || removed[j] {
                    continue; // refers to a segment already swept past; discard silently
                }
                let pi = active.iter().position(|&x| x == i);
                let pj = active.iter().position(|&x| x == j);
                let (pi, pj) = match (pi, pj) {
                    (Some(a), Some(b)) if (a as isize - b as isize).abs() == 1 => (a, b),
                    _ => continue, // order already changed by an earlier event; discard
                };
                let result = intersect(lines[i], lines[j], epsilon);
                if let Some(point) = result.shared {
                    merge_crossing(&mut crossings, point, i, result.location_a.unwrap(), epsilon);
                    merge_crossing(&mut crossings, point, j, result.location_b.unwrap(), epsilon);
                }
                let (lo, hi) = (pi.min(pj), pi.max(pj));
                active.swap(lo, hi);
                if lo > 0 {
                    try_schedule(&mut queue, &mut scheduled, lines, active[lo - 1], active[lo], epsilon);
                }
                if hi + 1 < active.len() {
                    try_schedule(&mut queue, &mut scheduled, lines, active[hi], active[hi + 1], epsilon);
                }
            }
        }
    }
    crossings
}

fn try_schedule(
    queue: &mut BinaryHeap<SweepEvent>,
    scheduled: &mut std::collections::HashSet<(usize, usize)>,
    lines: &[LineSegment],
    a: usize,
    b: usize,
    epsilon: f64,
) {
    let key = (a.min(b), a.max(b));
    if !scheduled.insert(key) {
        return;
    }
    let result = intersect(lines[a], lines[b], epsilon);
    if matches!(result.relation, Relation::Parallel) {
        return;
    }
    if let Some(point) = result.shared {
        queue.push(SweepEvent {
            point,
            kind: EventKind::Crossing,
            segments: (a, b),
        });
    }
}
