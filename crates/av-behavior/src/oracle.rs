//! Vision-oracle seam.

use av_core::Cell;
use av_grid::Grid;

/// Answers whether a cell holds a hazard.
///
/// `Some(confidence)` means a hazard is present; only diagnostics look at the
/// magnitude.  Cells outside the grid must report `None`.
pub trait HazardOracle: Send + Sync {
    fn detect(&self, cell: Cell, grid: &Grid) -> Option<f32>;
}

/// Reads pedestrians and debris straight off the grid with confidence 1.0.
#[derive(Copy, Clone, Debug, Default)]
pub struct GridOracle;

impl HazardOracle for GridOracle {
    fn detect(&self, cell: Cell, grid: &Grid) -> Option<f32> {
        grid.is_hazard(cell).then_some(1.0)
    }
}
