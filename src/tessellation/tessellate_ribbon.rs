use tracing::{debug, warn};

use crate::operations::offset::RibbonEdges;

use super::{Quad, RibbonMesh, SpatialGrid};

/// Connects index-aligned ribbon edges into quads and buckets them into a
/// uniform grid.
///
/// Quad `i` is `[left[i], right[i], right[i+1], left[i+1]]` with the last quad
/// wrapping back to vertex 0, so `m` edge vertices give `m` quads. Each quad
/// index is inserted into every cell its bounding box overlaps.
///
/// If any quad box is non-finite or too large for the grid, the whole mesh
/// comes back empty.
#[derive(Debug)]
pub struct TessellateRibbon<'a> {
    edges: &'a RibbonEdges,
    cell_size: f64,
}

impl<'a> TessellateRibbon<'a> {
    /// Creates a new ribbon tessellation operation.
    #[must_use]
    pub fn new(edges: &'a RibbonEdges, cell_size: f64) -> Self {
        Self { edges, cell_size }
    }

    /// Builds the mesh. Fewer than 2 edge vertices give an empty mesh.
    #[must_use]
    pub fn execute(&self) -> RibbonMesh {
        let left = &self.edges.left;
        let right = &self.edges.right;
        let m = left.len().min(right.len());

        let mut grid = SpatialGrid::new(self.cell_size);
        if m < 2 {
            return RibbonMesh {
                quads: Vec::new(),
                grid,
            };
        }

        let quads: Vec<Quad> = (0..m)
            .map(|i| {
                let j = (i + 1) % m;
                Quad::new([left[i], right[i], right[j], left[j]])
            })
            .collect();

        for (index, quad) in quads.iter().enumerate() {
            if !grid.insert(index, &quad.aabb()) {
                warn!(
                    quad = index,
                    cell_size = grid.cell_size(),
                    "quad does not fit the grid, dropping ribbon"
                );
                return RibbonMesh {
                    quads: Vec::new(),
                    grid: SpatialGrid::new(grid.cell_size()),
                };
            }
        }

        debug!(
            quads = quads.len(),
            cells = grid.len(),
            cell_size = grid.cell_size(),
            "tessellated ribbon"
        );
        RibbonMesh { quads, grid }
    }
}
