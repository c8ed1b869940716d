use crate::error::{GeomError, GeomResult};

/// A point with 32-bit integer coordinates.
///
/// Addition and subtraction are checked: they report
/// [`GeomError::Overflow`] rather than silently wrapping. Cross products
/// and squared lengths widen to `i64` internally, since the product of
/// two `i32` deltas can itself overflow `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointI {
    pub x: i32,
    pub y: i32,
}

impl PointI {
    pub fn new(x: i32, y: i32) -> PointI {
        PointI { x, y }
    }

    pub fn checked_add(self, other: PointI) -> GeomResult<PointI> {
        Ok(PointI::new(
            self.x
                .checked_add(other.x)
                .ok_or_else(|| GeomError::overflow("point addition (x)"))?,
            self.y
                .checked_add(other.y)
                .ok_or_else(|| GeomError::overflow("point addition (y)"))?,
        ))
    }

    pub fn checked_sub(self, other: PointI) -> GeomResult<PointI> {
        Ok(PointI::new(
            self.x
                .checked_sub(other.x)
                .ok_or_else(|| GeomError::overflow("point subtraction (x)"))?,
            self.y
                .checked_sub(other.y)
                .ok_or_else(|| GeomError::overflow("point subtraction (y)"))?,
        ))
    }

    /// The length of the cross product `(other - self) x (third - self)`,
    /// widened to `i64` to absorb the intermediate products.
    pub fn cross(self, other: PointI, third: PointI) -> i64 {
        let ox = other.x as i64 - self.x as i64;
        let oy = other.y as i64 - self.y as i64;
        let tx = third.x as i64 - self.x as i64;
        let ty = third.y as i64 - self.y as i64;
        ox * ty - tx * oy
    }

    pub fn distance_squared(self, other: PointI) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        dx * dx + dy * dy
    }

    pub fn to_point(self) -> crate::Point {
        crate::Point::new(self.x as f64, self.y as f64)
    }
}

impl From<(i32, i32)> for PointI {
    fn from((x, y): (i32, i32)) -> PointI {
        PointI::new(x, y)
    }
}
