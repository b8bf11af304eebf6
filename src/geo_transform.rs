use crate::errors::{MaskError, Result};

/// An affine transform.
///
/// A six-element array storing the coefficients of an affine transform
/// used in mapping coordinates between pixel/line `(P, L)` (raster) space
/// and `(Xp, Yp)` (world) space.
///
/// # Interpretation
///
/// A `GeoTransform`'s components have the following meanings:
///
///   * `GeoTransform[0]`: x-coordinate of the upper-left corner of the upper-left pixel.
///   * `GeoTransform[1]`: W-E pixel resolution (pixel width).
///   * `GeoTransform[2]`: row rotation (typically zero).
///   * `GeoTransform[3]`: y-coordinate of the upper-left corner of the upper-left pixel.
///   * `GeoTransform[4]`: column rotation (typically zero).
///   * `GeoTransform[5]`: N-S pixel resolution (pixel height), negative value for a north-up image.
///
/// # Usage
///  *  [`apply`](GeoTransformEx::apply): perform a `(P,L) -> (Xp,Yp)` transformation
///  *  [`invert`](GeoTransformEx::invert): construct the inverse transformation coefficients
///     for computing `(Xp,Yp) -> (P,L)` transformations
///  *  [`translated`](GeoTransformEx::translated): derive the transform of a sub-grid
pub type GeoTransform = [f64; 6];

/// Extension methods on [`GeoTransform`]
pub trait GeoTransformEx {
    /// Apply GeoTransform to pixel/line coordinates, producing world x/y.
    fn apply(&self, pixel: f64, line: f64) -> (f64, f64);

    /// Invert a [`GeoTransform`].
    ///
    /// The result maps world x/y back to pixel/line coordinates. Fails with
    /// [`MaskError::NonInvertibleTransform`] when the linear part is singular.
    fn invert(&self) -> Result<GeoTransform>;

    /// Transform of the sub-grid whose upper-left pixel sits at
    /// `(col_off, row_off)` of this grid. Scale and rotation terms are
    /// unchanged; only the origin moves.
    fn translated(&self, col_off: f64, row_off: f64) -> GeoTransform;
}

impl GeoTransformEx for GeoTransform {
    fn apply(&self, pixel: f64, line: f64) -> (f64, f64) {
        (
            self[0] + pixel * self[1] + line * self[2],
            self[3] + pixel * self[4] + line * self[5],
        )
    }

    fn invert(&self) -> Result<GeoTransform> {
        let det = self[1] * self[5] - self[2] * self[4];
        if det.abs() < 1e-15 {
            return Err(MaskError::NonInvertibleTransform);
        }
        let inv_det = 1.0 / det;
        Ok([
            (self[2] * self[3] - self[0] * self[5]) * inv_det,
            self[5] * inv_det,
            -self[2] * inv_det,
            (-self[1] * self[3] + self[0] * self[4]) * inv_det,
            -self[4] * inv_det,
            self[1] * inv_det,
        ])
    }

    fn translated(&self, col_off: f64, row_off: f64) -> GeoTransform {
        let (x0, y0) = self.apply(col_off, row_off);
        [x0, self[1], self[2], y0, self[4], self[5]]
    }
}

/// Vertical axis orientation of a raster grid.
///
/// Determined by the sign of the row-scale coefficient `GeoTransform[5]`:
/// north-up rasters have rows increasing downward in world y (negative or
/// zero coefficient). Carried as an explicit tag so window computations
/// never re-derive it from the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    NorthUp,
    SouthUp,
}

impl Orientation {
    pub fn from_transform(transform: &GeoTransform) -> Self {
        if transform[5] <= 0.0 {
            Orientation::NorthUp
        } else {
            Orientation::SouthUp
        }
    }

    pub fn is_north_up(self) -> bool {
        matches!(self, Orientation::NorthUp)
    }
}
