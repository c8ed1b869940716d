//! The circle-event priority queue: half-edges bucketed by a coarse
//! `y`-coordinate hash, each bucket a chain (sorted by `(ystar, vertex.x)`)
//! threaded through the beach line's own [`HalfEdgeNode::pq_next`] field.
//!
//! A half-edge can be simultaneously linked into the beach line (via
//! `left`/`right`) and into this queue (via `pq_next`); the two linked
//! lists share nodes but never interfere, since they use disjoint fields.

use geom_types::Point;

use super::beachline::BeachLine;

pub(crate) struct EventQueue {
    hash: Vec<Option<usize>>,
    count: usize,
    min_bucket: usize,
    min_y: f64,
    delta_y: f64,
}

impl EventQueue {
    pub fn new(min_y: f64, max_y: f64, hashsize: usize) -> EventQueue {
        EventQueue {
            hash: vec![None; hashsize.max(1)],
            count: 0,
            min_bucket: 0,
            min_y,
            delta_y: (max_y - min_y).max(f64::EPSILON),
        }
    }

    fn bucket_of(&self, ystar: f64) -> usize {
        let hashsize = self.hash.len() as f64;
        let raw = ((ystar - self.min_y) / self.delta_y * hashsize) as isize;
        raw.clamp(0, self.hash.len() as isize - 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Schedules a predicted circle-event vertex `v` for half-edge `he`,
    /// with `offset` the distance from `v` to the disappearing site (so
    /// the event fires once the sweep line reaches `v.y + offset`).
    pub fn insert(&mut self, beach: &mut BeachLine, he: usize, v: Point, offset: f64) {
        beach.nodes[he].vertex = Some(v);
        let ystar = v.y + offset;
        beach.nodes[he].ystar = ystar;
        let bucket = self.bucket_of(ystar);

        let mut prev: Option<usize> = None;
        let mut cur = self.hash[bucket];
        while let Some(c) = cur {
            let c_ystar = beach.nodes[c].ystar;
            let advance = ystar > c_ystar
                || (ystar == c_ystar && v.x > beach.nodes[c].vertex.unwrap().x);
            if !advance {
                break;
            }
            prev = Some(c);
            cur = beach.nodes[c].pq_next;
        }
        beach.nodes[he].pq_next = cur;
        match prev {
            Some(p) => beach.nodes[p].pq_next = Some(he),
            None => self.hash[bucket] = Some(he),
        }
        self.count += 1;
        if bucket < self.min_bucket {
            self.min_bucket = bucket;
        }
    }

    /// Removes `he` from the queue, if it currently holds a predicted
    /// event; a no-op if `he` has no pending circle event.
    pub fn delete(&mut self, beach: &mut BeachLine, he: usize) {
        if beach.nodes[he].vertex.is_none() {
            return;
        }
        let bucket = self.bucket_of(beach.nodes[he].ystar);
        let mut cur = self.hash[bucket];
        let mut prev: Option<usize> = None;
        while let Some(c) = cur {
            if c == he {
                let next = beach.nodes[he].pq_next;
                match prev {
                    Some(p) => beach.nodes[p].pq_next = next,
                    None => self.hash[bucket] = next,
                }
                break;
            }
            prev = Some(c);
            cur = beach.nodes[c].pq_next;
        }
        self.count -= 1;
        beach.nodes[he].vertex = None;
    }

    /// The coordinate of the next event to fire, without removing it.
    pub fn min(&mut self, beach: &BeachLine) -> Point {
        while self.hash[self.min_bucket].is_none() {
            self.min_bucket += 1;
        }
        let head = self.hash[self.min_bucket].unwrap();
        Point::new(beach.nodes[head].vertex.unwrap().x, beach.nodes[head].ystar)
    }

    pub fn extract_min(&mut self, beach: &mut BeachLine) -> usize {
        while self.hash[self.min_bucket].is_none() {
            self.min_bucket += 1;
        }
        let head = self.hash[self.min_bucket].unwrap();
        self.hash[self.min_bucket] = beach.nodes[head].pq_next;
        self.count -= 1;
        head
    }
}
