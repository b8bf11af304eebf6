use geo_types::{Geometry, Polygon};
use ndarray::Array2;

use crate::errors::Result;
use crate::geo_transform::{GeoTransform, GeoTransformEx};

use super::for_each_polygon;

/// Scan-convert polygons into a boolean coverage grid.
///
/// The grid has shape `out_shape` = `(rows, cols)` and is aligned to
/// `transform`; a cell is `true` when covered by any shape. With
/// `all_touched` false, a cell is covered when its center lies inside a
/// polygon (even-odd rule, holes subtract). With `all_touched` true, a
/// cell is additionally covered when any ring segment crosses its unit
/// square, so partially-covered boundary cells count.
///
/// Overlapping shapes union: cells are only ever set, never cleared.
pub fn rasterize(
    shapes: &[Geometry<f64>],
    transform: &GeoTransform,
    out_shape: (usize, usize),
    all_touched: bool,
) -> Result<Array2<bool>> {
    let inverse = transform.invert()?;
    let mut grid = Array2::from_elem(out_shape, false);
    for shape in shapes {
        for_each_polygon(shape, &mut |poly| {
            burn_polygon(&mut grid, poly, &inverse, all_touched)
        })?;
    }
    Ok(grid)
}

/// Rings in pixel space, as `(col, row)` vertex chains (closed).
type PixelRing = Vec<(f64, f64)>;

fn burn_polygon(
    grid: &mut Array2<bool>,
    poly: &Polygon<f64>,
    inverse: &GeoTransform,
    all_touched: bool,
) {
    let rings: Vec<PixelRing> = std::iter::once(poly.exterior())
        .chain(poly.interiors().iter())
        .map(|ring| {
            ring.0
                .iter()
                .map(|coord| inverse.apply(coord.x, coord.y))
                .collect()
        })
        .collect();

    let mut min_c = f64::INFINITY;
    let mut min_r = f64::INFINITY;
    let mut max_c = f64::NEG_INFINITY;
    let mut max_r = f64::NEG_INFINITY;
    for &(c, r) in rings.iter().flatten() {
        min_c = min_c.min(c);
        min_r = min_r.min(r);
        max_c = max_c.max(c);
        max_r = max_r.max(r);
    }
    if !min_c.is_finite() {
        return;
    }

    let (rows, cols) = grid.dim();
    let c0 = min_c.floor().max(0.0) as usize;
    let r0 = min_r.floor().max(0.0) as usize;
    // +1 rather than ceil so edges lying exactly on a cell boundary still
    // reach the cell to their right/below under the all-touched rule
    let c1 = ((max_c.floor() + 1.0).min(cols as f64)).max(0.0) as usize;
    let r1 = ((max_r.floor() + 1.0).min(rows as f64)).max(0.0) as usize;

    for r in r0..r1 {
        for c in c0..c1 {
            if grid[[r, c]] {
                continue;
            }
            let center = (c as f64 + 0.5, r as f64 + 0.5);
            let mut hit = point_in_rings(&rings, center);
            if !hit && all_touched {
                hit = cell_touched(&rings, c as f64, r as f64);
            }
            if hit {
                grid[[r, c]] = true;
            }
        }
    }
}

/// Even-odd point-in-polygon over all rings of one polygon. A crossing
/// count through a hole ring flips the parity back out, so holes subtract.
fn point_in_rings(rings: &[PixelRing], point: (f64, f64)) -> bool {
    let (x, y) = point;
    let mut inside = false;
    for ring in rings {
        for edge in ring.windows(2) {
            let (x1, y1) = edge[0];
            let (x2, y2) = edge[1];
            if (y1 > y) != (y2 > y) && x < (x2 - x1) * (y - y1) / (y2 - y1) + x1 {
                inside = !inside;
            }
        }
    }
    inside
}

/// Does any ring segment intersect the unit cell at `(col, row)`?
fn cell_touched(rings: &[PixelRing], col: f64, row: f64) -> bool {
    rings.iter().any(|ring| {
        ring.windows(2)
            .any(|edge| segment_intersects_rect(edge[0], edge[1], col, row, col + 1.0, row + 1.0))
    })
}

fn segment_intersects_rect(
    p: (f64, f64),
    q: (f64, f64),
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
) -> bool {
    if p.0.max(q.0) < x0 || p.0.min(q.0) > x1 || p.1.max(q.1) < y0 || p.1.min(q.1) > y1 {
        return false;
    }
    let in_rect = |pt: (f64, f64)| pt.0 >= x0 && pt.0 <= x1 && pt.1 >= y0 && pt.1 <= y1;
    if in_rect(p) || in_rect(q) {
        return true;
    }
    segments_intersect(p, q, (x0, y0), (x1, y0))
        || segments_intersect(p, q, (x1, y0), (x1, y1))
        || segments_intersect(p, q, (x1, y1), (x0, y1))
        || segments_intersect(p, q, (x0, y1), (x0, y0))
}

fn cross(o: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

fn on_segment(p: (f64, f64), q: (f64, f64), r: (f64, f64)) -> bool {
    r.0 >= p.0.min(q.0) && r.0 <= p.0.max(q.0) && r.1 >= p.1.min(q.1) && r.1 <= p.1.max(q.1)
}

fn segments_intersect(p1: (f64, f64), p2: (f64, f64), p3: (f64, f64), p4: (f64, f64)) -> bool {
    let d1 = cross(p3, p4, p1);
    let d2 = cross(p3, p4, p2);
    let d3 = cross(p1, p2, p3);
    let d4 = cross(p1, p2, p4);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    (d1 == 0.0 && on_segment(p3, p4, p1))
        || (d2 == 0.0 && on_segment(p3, p4, p2))
        || (d3 == 0.0 && on_segment(p1, p2, p3))
        || (d4 == 0.0 && on_segment(p1, p2, p4))
}
