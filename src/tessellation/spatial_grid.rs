use std::collections::HashMap;

use tracing::warn;

use crate::config::RibbonConfig;
use crate::math::{Aabb, Point2};

/// Most cells a single item may be bucketed into.
pub const MAX_CELLS_PER_ITEM: u64 = 1 << 16;

/// Integer grid cell coordinate: `floor(p / cell_size)` per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    /// Creates a cell coordinate.
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Uniform broad-phase grid over indexed geometry.
///
/// Each item is referenced from every cell its bounding box overlaps and from
/// no other cell. Items are stored as indices, so an item spanning `k × k`
/// cells costs `k²` indices, not `k²` copies. Buckets list indices in
/// insertion order.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f64,
    cells: HashMap<CellCoord, Vec<usize>>,
}

impl Default for SpatialGrid {
    fn default() -> Self {
        Self::new(RibbonConfig::default().cell_size)
    }
}

impl SpatialGrid {
    /// Creates an empty grid.
    ///
    /// A `cell_size` that is not finite and positive is replaced by the
    /// default cell size.
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            let fallback = RibbonConfig::default().cell_size;
            warn!(cell_size, fallback, "invalid grid cell size, using default");
            fallback
        };
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    /// Edge length of a cell.
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no cell holds any item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell containing `point`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn cell_of(&self, point: &Point2) -> CellCoord {
        CellCoord::new(
            (point.x / self.cell_size).floor() as i32,
            (point.y / self.cell_size).floor() as i32,
        )
    }

    /// Inclusive range of cells overlapped by `aabb`, as `(min, max)`.
    #[must_use]
    pub fn cell_range(&self, aabb: &Aabb) -> (CellCoord, CellCoord) {
        (self.cell_of(&aabb.min), self.cell_of(&aabb.max))
    }

    /// Adds item `index` to every cell overlapped by `aabb`.
    ///
    /// Returns `false`, leaving the grid unchanged, if the box has non-finite
    /// coordinates or spans more than [`MAX_CELLS_PER_ITEM`] cells.
    pub fn insert(&mut self, index: usize, aabb: &Aabb) -> bool {
        let finite = [aabb.min.x, aabb.min.y, aabb.max.x, aabb.max.y]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return false;
        }
        let (lo, hi) = self.cell_range(aabb);
        let span_x = u64::from(hi.x.abs_diff(lo.x)) + 1;
        let span_y = u64::from(hi.y.abs_diff(lo.y)) + 1;
        if span_x.saturating_mul(span_y) > MAX_CELLS_PER_ITEM {
            return false;
        }
        for cy in lo.y..=hi.y {
            for cx in lo.x..=hi.x {
                self.cells
                    .entry(CellCoord::new(cx, cy))
                    .or_default()
                    .push(index);
            }
        }
        true
    }

    /// Item indices bucketed in `cell`; empty for unknown cells.
    #[must_use]
    pub fn quads_in_cell(&self, cell: CellCoord) -> &[usize] {
        self.cells.get(&cell).map(Vec::as_slice).unwrap_or_default()
    }

    /// All non-empty cells with their buckets, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&CellCoord, &[usize])> {
        self.cells.iter().map(|(cell, items)| (cell, items.as_slice()))
    }

    /// Distinct item indices in all cells overlapped by `aabb`, ascending.
    ///
    /// Walks the cell range when it is smaller than the number of occupied
    /// cells, otherwise scans the occupied cells.
    #[must_use]
    pub fn query_aabb(&self, aabb: &Aabb) -> Vec<usize> {
        let (lo, hi) = self.cell_range(aabb);
        let span_x = u64::from(hi.x.abs_diff(lo.x)) + 1;
        let span_y = u64::from(hi.y.abs_diff(lo.y)) + 1;
        let range_cells = span_x.saturating_mul(span_y);

        let mut found: Vec<usize> = if range_cells <= self.cells.len() as u64 {
            (lo.y..=hi.y)
                .flat_map(|cy| (lo.x..=hi.x).map(move |cx| CellCoord::new(cx, cy)))
                .flat_map(|cell| self.quads_in_cell(cell).iter().copied())
                .collect()
        } else {
            self.cells
                .iter()
                .filter(|(cell, _)| {
                    (lo.x..=hi.x).contains(&cell.x) && (lo.y..=hi.y).contains(&cell.y)
                })
                .flat_map(|(_, items)| items.iter().copied())
                .collect()
        };
        found.sort_unstable();
        found.dedup();
        found
    }
}
