use thiserror::Error;

/// Errors produced while building or applying geometry masks.
#[derive(Debug, Error)]
pub enum MaskError {
    #[error("crop and invert cannot both be true")]
    CropInvertConflict,
    #[error("input shapes do not overlap raster")]
    ShapesOutsideRaster,
    #[error("no shapes provided")]
    EmptyShapes,
    #[error("shapes contain no coordinates")]
    EmptyGeometry,
    #[error("unsupported geometry type: {0}")]
    UnsupportedGeometry(&'static str),
    #[error("geo transform is not invertible")]
    NonInvertibleTransform,
    #[error("window {rows}x{cols} at ({row_off}, {col_off}) exceeds raster extent {height}x{width}")]
    WindowOutOfBounds {
        row_off: usize,
        col_off: usize,
        rows: usize,
        cols: usize,
        height: usize,
        width: usize,
    },
    #[error("requested output shape {requested:?} does not match read extent {extent:?}")]
    ReadShapeMismatch {
        requested: (usize, usize, usize),
        extent: (usize, usize, usize),
    },
    #[error("raster source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = std::result::Result<T, MaskError>;
