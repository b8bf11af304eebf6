use std::fmt::Debug;

use crate::errors::Result;
use crate::geo_transform::{GeoTransform, GeoTransformEx};
use crate::masked::MaskedArray;
use crate::window::Window;

/// Read-only view of a georeferenced raster.
///
/// This is the seam between the masking core and whatever actually holds
/// the pixels (a format driver, a tile cache, [`MemoryRaster`] in tests).
/// The core only ever reads; it never mutates the source.
///
/// [`MemoryRaster`]: crate::MemoryRaster
pub trait RasterSource {
    /// Scalar type of a single pixel sample.
    type Pixel: Copy + Default + PartialEq + Debug;

    fn height(&self) -> usize;
    fn width(&self) -> usize;
    fn band_count(&self) -> usize;

    /// Nodata sentinel shared by all bands, if the source declares one.
    fn nodata(&self) -> Option<Self::Pixel>;

    fn geo_transform(&self) -> GeoTransform;

    /// Read pixel data for `window` (the full extent when `None`) into a
    /// grid of shape `out_shape` = `(bands, rows, cols)`, together with the
    /// source's own validity mask (nodata cells flagged invalid).
    ///
    /// Implementations may resample when `out_shape` disagrees with the
    /// window extent, or reject the request; the masking core always asks
    /// for the window's native extent.
    fn read(
        &self,
        window: Option<&Window>,
        out_shape: (usize, usize, usize),
    ) -> Result<MaskedArray<Self::Pixel>>;

    /// Transform of the sub-grid selected by `window`.
    fn window_transform(&self, window: &Window) -> GeoTransform {
        self.geo_transform()
            .translated(window.col_off as f64, window.row_off as f64)
    }
}
