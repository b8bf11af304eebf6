use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use geo_types::{Geometry, LineString, Polygon};

use crate::memory::MemoryRaster;

/// Axis-aligned rectangle as a closed polygon shape, in world coordinates.
pub fn rect_shape(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Geometry<f64> {
    Polygon::new(
        LineString::from(vec![
            (min_x, min_y),
            (max_x, min_y),
            (max_x, max_y),
            (min_x, max_y),
            (min_x, min_y),
        ]),
        vec![],
    )
    .into()
}

/// Single-band north-up raster with unit pixels, origin at world
/// `(0, height)`, values `0..height*width` in row-major order.
pub fn north_up_raster(height: usize, width: usize) -> MemoryRaster {
    let data = (0..height * width).map(|v| v as f64).collect();
    MemoryRaster::new(
        height,
        width,
        1,
        [0.0, 1.0, 0.0, height as f64, 0.0, -1.0],
        data,
    )
}

/// Count WARN-level tracing events emitted while `f` runs.
///
/// Installs a thread-local subscriber for the duration of `f`, so tests
/// that expect (or forbid) a warning can observe it without a global
/// subscriber.
pub fn warn_count(f: impl FnOnce()) -> usize {
    struct WarnCounter(Arc<AtomicUsize>);

    impl tracing::Subscriber for WarnCounter {
        fn enabled(&self, metadata: &tracing::Metadata<'_>) -> bool {
            *metadata.level() == tracing::Level::WARN
        }

        fn new_span(&self, _attrs: &tracing::span::Attributes<'_>) -> tracing::span::Id {
            tracing::span::Id::from_u64(1)
        }

        fn record(&self, _id: &tracing::span::Id, _values: &tracing::span::Record<'_>) {}

        fn record_follows_from(&self, _id: &tracing::span::Id, _follows: &tracing::span::Id) {}

        fn event(&self, event: &tracing::Event<'_>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }

        fn enter(&self, _id: &tracing::span::Id) {}

        fn exit(&self, _id: &tracing::span::Id) {}
    }

    let count = Arc::new(AtomicUsize::new(0));
    tracing::subscriber::with_default(WarnCounter(Arc::clone(&count)), f);
    count.load(Ordering::Relaxed)
}

/// Assert numerical difference between two expressions is less than
/// 64-bit machine epsilon or a specified epsilon.
#[macro_export]
macro_rules! assert_near {
    ($left:expr, $right:expr) => {
        assert_near!($left, $right, epsilon = f64::EPSILON)
    };
    ($left:expr, $right:expr, epsilon = $ep:expr) => {
        assert!(
            ($left - $right).abs() < $ep,
            "|{} - {}| = {} is greater than epsilon {:.4e}",
            $left,
            $right,
            ($left - $right).abs(),
            $ep
        )
    };
}
