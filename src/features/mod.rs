//! Vector-to-raster primitives: geometry windows and geometry masks.
//!
//! The masking core in [`crate::mask`] consumes these only through the
//! signatures below; raster sources are reached via [`RasterSource`].

mod rasterize;

pub use rasterize::rasterize;

use geo_types::{Geometry, Polygon};
use ndarray::Array2;
use tracing::debug;

use crate::errors::{MaskError, Result};
use crate::geo_transform::{GeoTransform, GeoTransformEx, Orientation};
use crate::source::RasterSource;
use crate::window::Window;

/// Compute the pixel window of `raster` covered by the bounds of `shapes`.
///
/// `pad_x`/`pad_y` expand the shape bounds on every side, in fractions of a
/// pixel (world padding is `pad * |pixel size|` per axis). Fractional
/// offsets are floored and extents ceiled, then the window is clamped to
/// the raster extent. Returns [`Window::EMPTY`] when the shapes do not
/// intersect the raster at all.
///
/// Rotated transforms (non-zero skew coefficients) are not supported; the
/// corner mapping assumes an axis-aligned grid picked by `orientation`.
pub fn geometry_window<R: RasterSource>(
    raster: &R,
    shapes: &[Geometry<f64>],
    orientation: Orientation,
    pad_x: f64,
    pad_y: f64,
) -> Result<Window> {
    if shapes.is_empty() {
        return Err(MaskError::EmptyShapes);
    }

    let mut bounds: Option<(f64, f64, f64, f64)> = None;
    for shape in shapes {
        for_each_polygon(shape, &mut |poly| {
            for coord in &poly.exterior().0 {
                bounds = Some(match bounds {
                    None => (coord.x, coord.y, coord.x, coord.y),
                    Some((min_x, min_y, max_x, max_y)) => (
                        min_x.min(coord.x),
                        min_y.min(coord.y),
                        max_x.max(coord.x),
                        max_y.max(coord.y),
                    ),
                });
            }
        })?;
    }
    let (mut min_x, mut min_y, mut max_x, mut max_y) =
        bounds.ok_or(MaskError::EmptyGeometry)?;

    let transform = raster.geo_transform();
    let pad_x = (pad_x * transform[1]).abs();
    let pad_y = (pad_y * transform[5]).abs();
    min_x -= pad_x;
    max_x += pad_x;
    min_y -= pad_y;
    max_y += pad_y;

    let inverse = transform.invert()?;
    let ((ul_x, ul_y), (lr_x, lr_y)) = if orientation.is_north_up() {
        ((min_x, max_y), (max_x, min_y))
    } else {
        ((min_x, min_y), (max_x, max_y))
    };
    let (c0, r0) = inverse.apply(ul_x, ul_y);
    let (c1, r1) = inverse.apply(lr_x, lr_y);

    let col_off = c0.min(c1).floor().max(0.0);
    let row_off = r0.min(r1).floor().max(0.0);
    let col_end = c0.max(c1).ceil().min(raster.width() as f64);
    let row_end = r0.max(r1).ceil().min(raster.height() as f64);
    if col_end <= col_off || row_end <= row_off {
        return Ok(Window::EMPTY);
    }

    let window = Window::new(
        row_off as usize,
        col_off as usize,
        (row_end - row_off) as usize,
        (col_end - col_off) as usize,
    );
    debug!(?window, "geometry window");
    Ok(window)
}

/// Rasterize `shapes` into a boolean occlusion mask of shape `out_shape`
/// (`(rows, cols)`) aligned to `transform`.
///
/// By default the mask is `true` *outside* the shapes; with `invert` it is
/// `true` inside. `all_touched` selects the coverage rule, see
/// [`rasterize`].
pub fn geometry_mask(
    shapes: &[Geometry<f64>],
    transform: &GeoTransform,
    out_shape: (usize, usize),
    all_touched: bool,
    invert: bool,
) -> Result<Array2<bool>> {
    let covered = rasterize(shapes, transform, out_shape, all_touched)?;
    Ok(if invert {
        covered
    } else {
        covered.mapv(|c| !c)
    })
}

/// Visit every polygon of an areal geometry, recursing into collections.
///
/// Non-areal variants are rejected; masking has no meaning for them.
pub(crate) fn for_each_polygon<F>(shape: &Geometry<f64>, f: &mut F) -> Result<()>
where
    F: FnMut(&Polygon<f64>),
{
    match shape {
        Geometry::Polygon(p) => f(p),
        Geometry::MultiPolygon(mp) => mp.0.iter().for_each(&mut *f),
        Geometry::Rect(r) => f(&r.to_polygon()),
        Geometry::Triangle(t) => f(&t.to_polygon()),
        Geometry::GeometryCollection(gc) => {
            for g in &gc.0 {
                for_each_polygon(g, f)?;
            }
        }
        other => return Err(MaskError::UnsupportedGeometry(geometry_name(other))),
    }
    Ok(())
}

fn geometry_name(shape: &Geometry<f64>) -> &'static str {
    match shape {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
