//! Places icon origins on the canvas.
//!
//! Two policies: snap to the cells of a coarse grid (shuffled, optionally
//! keeping out of the canvas center), or sample freely across a padded
//! canvas so icons may bleed off the edges.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::Canvas;

/// Grid cells are roughly this many canvas units on each side.
const CELL_UNITS: u32 = 100;

/// Default bleed past the canvas edges for free placement.
const FREE_PADDING: f64 = 100.0;

/// A point in canvas units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// How icon origins are chosen
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutPolicy {
    /// Snap origins to the top-left corners of shuffled grid cells.
    ///
    /// Cells are consumed without replacement, so at most `columns * rows`
    /// positions exist (fewer with `avoid_center`). `nudge` draws a single
    /// magnitude per run from the given range and perturbs each cell index
    /// by up to that much in each direction; `None` leaves origins exactly
    /// on the grid.
    GridBased {
        columns: u32,
        rows: u32,
        avoid_center: bool,
        nudge: Option<(f64, f64)>,
    },
    /// Sample each origin uniformly from the canvas extended by `padding`
    /// units on every side.
    FreePlacement { padding: f64 },
}

impl LayoutPolicy {
    /// Grid sized so each cell is about 100x100 canvas units.
    pub fn grid_for(canvas: Canvas, avoid_center: bool) -> Self {
        Self::GridBased {
            columns: canvas.width / CELL_UNITS,
            rows: canvas.height / CELL_UNITS,
            avoid_center,
            nudge: None,
        }
    }

    /// Free placement with the default edge bleed.
    pub fn free() -> Self {
        Self::FreePlacement {
            padding: FREE_PADDING,
        }
    }

    /// Yields up to `count` icon origins. Finite and one-shot: every call
    /// reshuffles or resamples from scratch.
    ///
    /// The grid policy may return fewer than `count` points when the
    /// surviving cells run out; that is not an error.
    pub fn positions<R: Rng>(&self, canvas: Canvas, count: usize, rng: &mut R) -> Vec<Point> {
        match *self {
            Self::GridBased {
                columns,
                rows,
                avoid_center,
                nudge,
            } => grid_positions(canvas, columns, rows, avoid_center, nudge, count, rng),
            Self::FreePlacement { padding } => free_positions(canvas, padding, count, rng),
        }
    }
}

fn grid_positions<R: Rng>(
    canvas: Canvas,
    columns: u32,
    rows: u32,
    avoid_center: bool,
    nudge: Option<(f64, f64)>,
    count: usize,
    rng: &mut R,
) -> Vec<Point> {
    let mut cells: Vec<(u32, u32)> = (0..columns)
        .flat_map(|column| (0..rows).map(move |row| (column, row)))
        .collect();
    cells.shuffle(rng);

    if avoid_center {
        // Keep only cells whose column and row both fall in the outer
        // quartiles. Quartile bounds are fractional and the comparisons
        // inclusive, so e.g. 9 rows keep indices 0-2 and 7-8.
        let column_quartile = f64::from(columns) / 4.0;
        let row_quartile = f64::from(rows) / 4.0;
        cells.retain(|&(column, row)| {
            let (c, r) = (f64::from(column), f64::from(row));
            (c <= column_quartile || c >= 3.0 * column_quartile)
                && (r <= row_quartile || r >= 3.0 * row_quartile)
        });
    }

    let column_width = f64::from(canvas.width) / f64::from(columns);
    let row_height = f64::from(canvas.height) / f64::from(rows);

    // One magnitude for the whole run; each cell then gets its own direction.
    let nudge_amount = nudge.map(|(min, max)| rng.random_range(min..=max));

    cells
        .into_iter()
        .take(count)
        .map(|(column, row)| {
            let mut c = f64::from(column);
            let mut r = f64::from(row);
            if let Some(amount) = nudge_amount {
                c += (1.0 - 2.0 * rng.random::<f64>()) * amount;
                r += (1.0 - 2.0 * rng.random::<f64>()) * amount;
            }
            Point {
                x: c * column_width,
                y: r * row_height,
            }
        })
        .collect()
}

fn free_positions<R: Rng>(canvas: Canvas, padding: f64, count: usize, rng: &mut R) -> Vec<Point> {
    (0..count)
        .map(|_| Point {
            x: rng.random_range(-padding..=f64::from(canvas.width) + padding),
            y: rng.random_range(-padding..=f64::from(canvas.height) + padding),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn grid_yields_requested_count() {
        let canvas = Canvas::default();
        let layout = LayoutPolicy::grid_for(canvas, false);
        let points = layout.positions(canvas, 20, &mut rng());
        assert_eq!(points.len(), 20);
    }

    #[test]
    fn grid_runs_out_of_cells_without_error() {
        let canvas = Canvas::default();
        let layout = LayoutPolicy::grid_for(canvas, false);
        // 16 columns x 9 rows = 144 cells available
        let points = layout.positions(canvas, 1000, &mut rng());
        assert_eq!(points.len(), 144);
    }

    #[test]
    fn grid_origins_sit_on_cell_corners() {
        let canvas = Canvas::default();
        let layout = LayoutPolicy::grid_for(canvas, false);
        for point in layout.positions(canvas, 144, &mut rng()) {
            assert_eq!(point.x % 100.0, 0.0, "{point:?}");
            assert_eq!(point.y % 100.0, 0.0, "{point:?}");
        }
    }

    #[test]
    fn avoid_center_keeps_out_of_the_middle() {
        let canvas = Canvas::default();
        let layout = LayoutPolicy::grid_for(canvas, true);
        let points = layout.positions(canvas, 1000, &mut rng());
        // 9 of 16 columns and 5 of 9 rows survive the quartile filter
        assert_eq!(points.len(), 45);
        for point in points {
            let column = point.x / 100.0;
            let row = point.y / 100.0;
            assert!(column <= 4.0 || column >= 12.0, "{column} is central");
            assert!(row <= 2.25 || row >= 6.75, "{row} is central");
        }
    }

    #[test]
    fn nudge_perturbs_within_the_drawn_magnitude() {
        let canvas = Canvas::default();
        let layout = LayoutPolicy::GridBased {
            columns: 16,
            rows: 9,
            avoid_center: false,
            nudge: Some((0.2, 0.2)),
        };
        for point in layout.positions(canvas, 144, &mut rng()) {
            let x_offset = (point.x / 100.0 - (point.x / 100.0).round()).abs();
            let y_offset = (point.y / 100.0 - (point.y / 100.0).round()).abs();
            assert!(x_offset <= 0.2 + 1e-9, "{point:?}");
            assert!(y_offset <= 0.2 + 1e-9, "{point:?}");
        }
    }

    #[test]
    fn free_placement_stays_within_padded_bounds() {
        let canvas = Canvas::default();
        let layout = LayoutPolicy::free();
        let points = layout.positions(canvas, 200, &mut rng());
        assert_eq!(points.len(), 200);
        for point in points {
            assert!(point.x >= -100.0 && point.x <= 1700.0, "{point:?}");
            assert!(point.y >= -100.0 && point.y <= 1000.0, "{point:?}");
        }
    }

    #[test]
    fn zero_count_yields_nothing() {
        let canvas = Canvas::default();
        let mut r = rng();
        assert!(LayoutPolicy::free().positions(canvas, 0, &mut r).is_empty());
        assert!(LayoutPolicy::grid_for(canvas, false)
            .positions(canvas, 0, &mut r)
            .is_empty());
    }
}
