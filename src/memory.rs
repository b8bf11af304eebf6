use ndarray::Array3;

use crate::errors::{MaskError, Result};
use crate::geo_transform::GeoTransform;
use crate::masked::MaskedArray;
use crate::source::RasterSource;
use crate::window::Window;

/// An in-memory [`RasterSource`] backed by a band-major `Vec<f64>`.
///
/// Reference implementation of the source contract; handy for tests and
/// small in-process grids. Reads are exact-extent only (no resampling).
#[derive(Debug, Clone)]
pub struct MemoryRaster {
    height: usize,
    width: usize,
    bands: usize,
    nodata: Option<f64>,
    transform: GeoTransform,
    data: Vec<f64>,
}

impl MemoryRaster {
    /// Construct from `data` laid out band-major, row-major within a band.
    ///
    /// # Panic
    /// Will panic if `data.len() != bands * height * width`.
    pub fn new(
        height: usize,
        width: usize,
        bands: usize,
        transform: GeoTransform,
        data: Vec<f64>,
    ) -> Self {
        assert_eq!(
            bands * height * width,
            data.len(),
            "shape ({bands}, {height}, {width}) does not match length {}",
            data.len()
        );
        MemoryRaster {
            height,
            width,
            bands,
            nodata: None,
            transform,
            data,
        }
    }

    /// Declare a nodata sentinel for all bands.
    pub fn with_nodata(mut self, nodata: f64) -> Self {
        self.nodata = Some(nodata);
        self
    }

    fn value(&self, band: usize, row: usize, col: usize) -> f64 {
        self.data[(band * self.height + row) * self.width + col]
    }
}

impl RasterSource for MemoryRaster {
    type Pixel = f64;

    fn height(&self) -> usize {
        self.height
    }

    fn width(&self) -> usize {
        self.width
    }

    fn band_count(&self) -> usize {
        self.bands
    }

    fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    fn geo_transform(&self) -> GeoTransform {
        self.transform
    }

    fn read(
        &self,
        window: Option<&Window>,
        out_shape: (usize, usize, usize),
    ) -> Result<MaskedArray<f64>> {
        let window = window
            .copied()
            .unwrap_or_else(|| Window::full(self.height, self.width));
        if window.row_off + window.height > self.height
            || window.col_off + window.width > self.width
        {
            return Err(MaskError::WindowOutOfBounds {
                row_off: window.row_off,
                col_off: window.col_off,
                rows: window.height,
                cols: window.width,
                height: self.height,
                width: self.width,
            });
        }
        let extent = (self.bands, window.height, window.width);
        if out_shape != extent {
            return Err(MaskError::ReadShapeMismatch {
                requested: out_shape,
                extent,
            });
        }
        let data = Array3::from_shape_fn(extent, |(b, r, c)| {
            self.value(b, window.row_off + r, window.col_off + c)
        });
        let mask = match self.nodata {
            Some(nodata) => data.mapv(|v| v == nodata),
            None => Array3::from_elem(extent, false),
        };
        Ok(MaskedArray::new(data, mask))
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryRaster;
    use crate::errors::MaskError;
    use crate::source::RasterSource;
    use crate::window::Window;

    fn fixture() -> MemoryRaster {
        let data: Vec<f64> = (0..16).map(f64::from).collect();
        MemoryRaster::new(4, 4, 1, [0.0, 1.0, 0.0, 4.0, 0.0, -1.0], data)
    }

    #[test]
    fn test_read_full() {
        let raster = fixture();
        let out = raster.read(None, (1, 4, 4)).unwrap();
        assert_eq!(out.dim(), (1, 4, 4));
        assert_eq!(out.data[[0, 0, 0]], 0.0);
        assert_eq!(out.data[[0, 3, 3]], 15.0);
        assert_eq!(out.masked_count(), 0);
    }

    #[test]
    fn test_read_window() {
        let raster = fixture();
        let window = Window::new(1, 2, 2, 2);
        let out = raster.read(Some(&window), (1, 2, 2)).unwrap();
        assert_eq!(out.data[[0, 0, 0]], 6.0);
        assert_eq!(out.data[[0, 1, 1]], 11.0);
    }

    #[test]
    fn test_read_shape_mismatch() {
        let raster = fixture();
        let err = raster.read(None, (1, 2, 2)).unwrap_err();
        assert!(matches!(err, MaskError::ReadShapeMismatch { .. }));
    }

    #[test]
    fn test_read_out_of_bounds() {
        let raster = fixture();
        let window = Window::new(3, 3, 2, 2);
        let err = raster.read(Some(&window), (1, 2, 2)).unwrap_err();
        assert!(matches!(err, MaskError::WindowOutOfBounds { .. }));
    }

    #[test]
    fn test_nodata_mask() {
        let mut data: Vec<f64> = (0..16).map(f64::from).collect();
        data[5] = -9999.0;
        let raster = MemoryRaster::new(4, 4, 1, [0.0, 1.0, 0.0, 4.0, 0.0, -1.0], data)
            .with_nodata(-9999.0);
        let out = raster.read(None, (1, 4, 4)).unwrap();
        assert_eq!(out.masked_count(), 1);
        assert!(out.mask[[0, 1, 1]]);
    }
}
