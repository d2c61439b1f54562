/// A rectangle region in pixels, with its origin at the bottom-left corner of the
/// render target.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[inline]
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a region that starts at the origin with `dimensions`.
    #[inline]
    pub fn with_size(width: u32, height: u32) -> Self {
        Rect::new(0, 0, width, height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && y >= self.y
            && (x - self.x) < self.width as i32
            && (y - self.y) < self.height as i32
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn contains() {
        let rect = Rect::new(2, 2, 4, 4);
        assert!(rect.contains(2, 2));
        assert!(rect.contains(5, 5));
        assert!(!rect.contains(6, 2));
        assert!(!rect.contains(1, 3));
        assert!(!Rect::with_size(0, 10).contains(0, 0));
        assert!(Rect::with_size(0, 10).is_empty());
    }
}
