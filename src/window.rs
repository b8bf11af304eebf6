/// A rectangular sub-region of a raster's pixel grid.
///
/// Offsets are measured from the upper-left pixel of the grid. Window
/// computations clamp to the raster extent, so offsets are unsigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    pub row_off: usize,
    pub col_off: usize,
    pub height: usize,
    pub width: usize,
}

impl Window {
    /// The degenerate window: zero offset, zero extent. Returned by
    /// [`geometry_window`](crate::features::geometry_window) when shapes do
    /// not intersect the raster at all.
    pub const EMPTY: Window = Window {
        row_off: 0,
        col_off: 0,
        height: 0,
        width: 0,
    };

    pub fn new(row_off: usize, col_off: usize, height: usize, width: usize) -> Self {
        Window {
            row_off,
            col_off,
            height,
            width,
        }
    }

    /// Window covering a full `height`x`width` grid.
    pub fn full(height: usize, width: usize) -> Self {
        Window::new(0, 0, height, width)
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    /// `(rows, cols)` extent of the window.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::Window;

    #[test]
    fn test_empty() {
        assert!(Window::EMPTY.is_empty());
        assert!(Window::new(3, 4, 0, 7).is_empty());
        assert!(!Window::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn test_shape() {
        assert_eq!(Window::new(2, 3, 4, 5).shape(), (4, 5));
        assert_eq!(Window::full(10, 20).shape(), (10, 20));
    }
}
