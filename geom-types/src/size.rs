use crate::error::{GeomError, GeomResult};

/// A non-negative width/height extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> GeomResult<Size> {
        if width < 0.0 || height < 0.0 {
            return Err(GeomError::argument_invalid(
                "size width/height must be non-negative",
            ));
        }
        Ok(Size { width, height })
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_extents() {
        assert!(Size::new(-1.0, 1.0).is_err());
        assert!(Size::new(1.0, -1.0).is_err());
    }

    #[test]
    fn area_is_product() {
        let s = Size::new(3.0, 4.0).unwrap();
        assert_eq!(s.area(), 12.0);
    }
}
