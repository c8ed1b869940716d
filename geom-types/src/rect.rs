use crate::error::{GeomError, GeomResult};
use crate::line_segment::{Location, LineSegment};
use crate::Point;

/// An axis-aligned rectangle, always `max >= min` componentwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Builds a rectangle, failing if `max < min` on either axis.
    pub fn new(min: Point, max: Point) -> GeomResult<Rect> {
        if max.x < min.x || max.y < min.y {
            return Err(GeomError::argument_invalid(
                "rectangle max must be >= min on both axes",
            ));
        }
        Ok(Rect { min, max })
    }

    /// Builds a rectangle from two arbitrary corners, sorting them first.
    pub fn from_corners(a: Point, b: Point) -> Rect {
        Rect {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Closed containment: boundary points count as contained.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Half-open containment (`[min, max)` on both axes); useful for
    /// tiling the plane into non-overlapping cells.
    pub fn contains_half_open(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let min = Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));
        Rect::new(min, max).ok()
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Classifies `q` against this rectangle's extent on each axis
    /// independently: `Before` if left/below `min`, `After` if
    /// right/above `max`, `Between` otherwise (`Start`/`End` are not
    /// produced here; they are reserved for [`LineSegment::locate`]).
    pub fn locate(&self, q: Point) -> (Location, Location) {
        let locate_axis = |value: f64, lo: f64, hi: f64| -> Location {
            if value < lo {
                Location::Before
            } else if value > hi {
                Location::After
            } else {
                Location::Between
            }
        };
        (
            locate_axis(q.x, self.min.x, self.max.x),
            locate_axis(q.y, self.min.y, self.max.y),
        )
    }

    /// Liang-Barsky clipping of `segment` against this rectangle.
    /// Returns `None` if the segment lies entirely outside.
    pub fn clip_line(&self, segment: &LineSegment) -> Option<LineSegment> {
        let d = segment.delta();
        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;

        let checks = [
            (-d.x, segment.start.x - self.min.x),
            (d.x, self.max.x - segment.start.x),
            (-d.y, segment.start.y - self.min.y),
            (d.y, self.max.y - segment.start.y),
        ];

        for (p, q) in checks {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                if r > t0 {
                    t0 = r;
                }
            } else {
                if r < t0 {
                    return None;
                }
                if r < t1 {
                    t1 = r;
                }
            }
        }
        if t0 > t1 {
            return None;
        }
        Some(LineSegment::new(
            segment.start + d.scale(t0),
            segment.start + d.scale(t1),
        ))
    }

    /// Boolean variant of [`Rect::clip_line`] that avoids building the
    /// clipped segment.
    pub fn intersects_line(&self, segment: &LineSegment) -> bool {
        self.clip_line(segment).is_some()
    }

    /// Sutherland-Hodgman clipping of a (convex or simple) polygon,
    /// given as a closed sequence of vertices, against this rectangle.
    ///
    /// Each of the four passes clips against one border; wherever the
    /// clip introduces a new vertex on that border, the exact border
    /// coordinate is copied into the output instead of the value computed
    /// from the line equation, so downstream exact comparisons against
    /// the rectangle's coordinates remain sound.
    pub fn clip_polygon(&self, polygon: &[Point]) -> Vec<Point> {
        if polygon.is_empty() {
            return Vec::new();
        }
        let mut output = polygon.to_vec();

        let borders: [(fn(Point, f64) -> bool, f64, bool); 4] = [
            (|p, v| p.x >= v, self.min.x, true),  // left
            (|p, v| p.x <= v, self.max.x, true),  // right
            (|p, v| p.y >= v, self.min.y, false), // bottom
            (|p, v| p.y <= v, self.max.y, false), // top
        ];

        for (inside, value, is_vertical) in borders {
            if output.is_empty() {
                break;
            }
            let input = output;
            output = Vec::with_capacity(input.len());
            let mut prev = *input.last().unwrap();
            let mut prev_in = inside(prev, value);
            for &curr in &input {
                let curr_in = inside(curr, value);
                if curr_in {
                    if !prev_in {
                        output.push(border_crossing(prev, curr, value, is_vertical));
                    }
                    output.push(curr);
                } else if prev_in {
                    output.push(border_crossing(prev, curr, value, is_vertical));
                }
                prev = curr;
                prev_in = curr_in;
            }
        }
        output
    }
}

/// Computes where the segment `prev -> curr` crosses the border
/// `x == value` (if `is_vertical`) or `y == value`, copying `value`
/// exactly into the returned coordinate on that axis.
fn border_crossing(prev: Point, curr: Point, value: f64, is_vertical: bool) -> Point {
    if is_vertical {
        let t = (value - prev.x) / (curr.x - prev.x);
        Point::new(value, prev.y + t * (curr.y - prev.y))
    } else {
        let t = (value - prev.y) / (curr.y - prev.y);
        Point::new(prev.x + t * (curr.x - prev.x), value)
    }
}
