//! Geometry-driven masking and cropping for raster grids.
//!
//! Given a georeferenced raster and a set of polygon shapes, this crate
//! computes a boolean occlusion mask aligned to the raster's affine
//! transform ([`raster_geom_mask`]) and applies it to the raster's pixel
//! data ([`mask`]), filling excluded pixels with a nodata value or
//! flagging them in a validity overlay. The raster may optionally be
//! cropped to the shapes' bounding window, with half-pixel padding.
//!
//! Pixel data is reached through the [`RasterSource`] trait; any format
//! driver or in-process grid can implement it. [`MemoryRaster`] is a
//! ready-made in-memory source.
//!
//! ## Use
//!
//! ```
//! use geo_types::{polygon, Geometry};
//! use rastermask::{mask, MaskOptions, MemoryRaster};
//!
//! # fn main() -> rastermask::errors::Result<()> {
//! // 4x4 north-up raster with unit pixels, origin at world (0, 4)
//! let data: Vec<f64> = (0..16).map(f64::from).collect();
//! let raster = MemoryRaster::new(4, 4, 1, [0.0, 1.0, 0.0, 4.0, 0.0, -1.0], data);
//!
//! let shape: Geometry<f64> = polygon![
//!     (x: 1.0, y: 1.0),
//!     (x: 3.0, y: 1.0),
//!     (x: 3.0, y: 3.0),
//!     (x: 1.0, y: 3.0),
//! ]
//! .into();
//!
//! let options = MaskOptions { crop: true, ..Default::default() };
//! let (out, transform) = mask(&raster, &[shape], &options)?;
//! assert_eq!(out.dim(), (1, 2, 2));
//! assert_eq!(transform, [1.0, 1.0, 0.0, 3.0, 0.0, -1.0]);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod features;

mod geo_transform;
mod mask;
mod masked;
mod memory;
mod source;
#[cfg(test)]
mod test_utils;
mod window;

pub use errors::{MaskError, Result};
pub use geo_transform::{GeoTransform, GeoTransformEx, Orientation};
pub use mask::{mask, raster_geom_mask, GeomMaskOptions, MaskOptions};
pub use masked::MaskedArray;
pub use memory::MemoryRaster;
pub use source::RasterSource;
pub use window::Window;
