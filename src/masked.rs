use ndarray::{Array3, Zip};

/// A 3-D pixel grid (band, row, col) paired with a validity overlay of the
/// same shape, `true` marking invalid/excluded cells.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedArray<T> {
    pub data: Array3<T>,
    pub mask: Array3<bool>,
}

impl<T: Copy> MaskedArray<T> {
    /// Pair `data` with its validity `mask`.
    ///
    /// # Panic
    /// Will panic if the two grids differ in shape.
    pub fn new(data: Array3<T>, mask: Array3<bool>) -> Self {
        assert_eq!(
            data.dim(),
            mask.dim(),
            "data shape {:?} does not match mask shape {:?}",
            data.dim(),
            mask.dim()
        );
        MaskedArray { data, mask }
    }

    /// `(bands, rows, cols)` shape of the grid.
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Overwrite every masked cell with `value`, in place. The overlay is
    /// left untouched.
    pub fn fill(&mut self, value: T) {
        Zip::from(&mut self.data)
            .and(&self.mask)
            .for_each(|v, &masked| {
                if masked {
                    *v = value;
                }
            });
    }

    /// Consume `self`, returning the data grid with every masked cell
    /// replaced by `value`.
    pub fn filled(mut self, value: T) -> Array3<T> {
        self.fill(value);
        self.data
    }

    /// Number of cells flagged invalid.
    pub fn masked_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }
}
