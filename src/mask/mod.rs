//! Mask the area outside of input shapes with nodata.
//!
//! [`raster_geom_mask`] builds a boolean occlusion mask (and optional crop
//! window) from polygon shapes; [`mask`] applies it to a raster's pixels.

use geo_types::Geometry;
use ndarray::Array2;
use tracing::warn;

use crate::errors::{MaskError, Result};
use crate::features;
use crate::geo_transform::{GeoTransform, Orientation};
use crate::masked::MaskedArray;
use crate::source::RasterSource;
use crate::window::Window;

/// Options for [`raster_geom_mask`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GeomMaskOptions {
    /// Cover all pixels touched by shapes, not just those whose center is
    /// within a polygon. Defaults to `false`.
    pub all_touched: bool,

    /// If `true`, the mask is `true` for pixels inside shapes and `false`
    /// outside. Defaults to `false`.
    pub invert: bool,

    /// Restrict the mask (and its transform/window) to the extent of the
    /// shapes. Defaults to `false`.
    pub crop: bool,

    /// Pad the shape extent by half a pixel on every side before cropping.
    /// Only meaningful together with `crop`. Defaults to `false`.
    pub pad: bool,
}

/// Options for [`mask`].
#[derive(Debug, Clone, Copy)]
pub struct MaskOptions<T> {
    /// See [`GeomMaskOptions::all_touched`].
    pub all_touched: bool,

    /// See [`GeomMaskOptions::invert`].
    pub invert: bool,

    /// Fill value for excluded pixels. If unset, the raster's own nodata
    /// value is used; if the raster declares none either, the fill falls
    /// back to `T::default()` (zero for numeric pixels). That zero default
    /// is a policy, not a property of the data.
    pub nodata: Option<T>,

    /// If `true` (the default), excluded pixel values are overwritten with
    /// the effective nodata value. If `false`, values are left intact and
    /// only the validity overlay marks exclusion.
    pub filled: bool,

    /// See [`GeomMaskOptions::crop`].
    pub crop: bool,

    /// See [`GeomMaskOptions::pad`].
    pub pad: bool,
}

impl<T> Default for MaskOptions<T> {
    fn default() -> Self {
        MaskOptions {
            all_touched: false,
            invert: false,
            nodata: None,
            filled: true,
            crop: false,
            pad: false,
        }
    }
}

impl<T> MaskOptions<T> {
    fn geom(&self) -> GeomMaskOptions {
        GeomMaskOptions {
            all_touched: self.all_touched,
            invert: self.invert,
            crop: self.crop,
            pad: self.pad,
        }
    }
}

/// Create an occlusion mask from shapes over `raster`'s grid.
///
/// By default the mask is `true` outside the shapes and `false` within
/// them, aligned to the raster's native transform. With `crop`, the mask
/// covers only the window of the raster intersected by the shapes, and the
/// returned transform/window describe that sub-grid; without `crop` the
/// returned window is `None`.
///
/// If the shapes do not overlap the raster at all, `crop` fails with
/// [`MaskError::ShapesOutsideRaster`]; otherwise a warning is emitted and
/// the mask is uniformly `!invert` over the full raster.
///
/// `crop` and `invert` together are rejected with
/// [`MaskError::CropInvertConflict`].
pub fn raster_geom_mask<R: RasterSource>(
    raster: &R,
    shapes: &[Geometry<f64>],
    options: &GeomMaskOptions,
) -> Result<(Array2<bool>, GeoTransform, Option<Window>)> {
    if options.crop && options.invert {
        return Err(MaskError::CropInvertConflict);
    }

    // pad by half a pixel on each side prior to cropping
    let (pad_x, pad_y) = if options.crop && options.pad {
        (0.5, 0.5)
    } else {
        (0.0, 0.0)
    };

    let native = raster.geo_transform();
    let orientation = Orientation::from_transform(&native);
    let window = features::geometry_window(raster, shapes, orientation, pad_x, pad_y)?;

    if window.is_empty() {
        if options.crop {
            return Err(MaskError::ShapesOutsideRaster);
        }
        warn!("shapes are outside bounds of raster; are they in a different coordinate reference system?");
        let mask = Array2::from_elem((raster.height(), raster.width()), !options.invert);
        return Ok((mask, native, None));
    }

    // Without crop the geometry window only served the overlap check: the
    // mask is rasterized over the full raster at its native transform.
    let (transform, out_shape, window) = if options.crop {
        (raster.window_transform(&window), window.shape(), Some(window))
    } else {
        (native, (raster.height(), raster.width()), None)
    };

    let mask = features::geometry_mask(
        shapes,
        &transform,
        out_shape,
        options.all_touched,
        options.invert,
    )?;
    Ok((mask, transform, window))
}

/// Mask `raster`'s pixels with shapes.
///
/// Pixels outside the shapes (inside, when `invert` is set) are excluded:
/// overwritten with the effective nodata value when `filled`, or flagged in
/// the returned overlay otherwise. Pixels the source itself reports as
/// nodata stay excluded no matter what the shapes say. The returned
/// transform describes the output grid (the cropped sub-grid under `crop`).
pub fn mask<R: RasterSource>(
    raster: &R,
    shapes: &[Geometry<f64>],
    options: &MaskOptions<R::Pixel>,
) -> Result<(MaskedArray<R::Pixel>, GeoTransform)> {
    let nodata = options
        .nodata
        .or_else(|| raster.nodata())
        .unwrap_or_default();

    let (shape_mask, transform, window) = raster_geom_mask(raster, shapes, &options.geom())?;

    let (height, width) = shape_mask.dim();
    let out_shape = (raster.band_count(), height, width);
    let mut out = raster.read(window.as_ref(), out_shape)?;

    // source nodata mask OR geometry mask, broadcast across bands
    for mut band in out.mask.outer_iter_mut() {
        band.zip_mut_with(&shape_mask, |m, &excluded| *m |= excluded);
    }

    if options.filled {
        out.fill(nodata);
    }

    Ok((out, transform))
}
