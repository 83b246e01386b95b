mod spatial_grid;
mod tessellate_ribbon;

pub use spatial_grid::{CellCoord, SpatialGrid, MAX_CELLS_PER_ITEM};
pub use tessellate_ribbon::TessellateRibbon;

use crate::math::polygon_2d::point_in_polygon;
use crate::math::{Aabb, Point2};

/// One ribbon segment: `[left[i], right[i], right[i+1], left[i+1]]`.
///
/// The vertex order is fixed so downstream renderers see consistent winding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// Vertices in ribbon order.
    pub vertices: [Point2; 4],
}

impl Quad {
    /// Creates a quad from its four ordered vertices.
    #[must_use]
    pub fn new(vertices: [Point2; 4]) -> Self {
        Self { vertices }
    }

    /// Axis-aligned bounding box of the four vertices.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        let [a, b, c, d] = self.vertices;
        let min = Point2::new(
            a.x.min(b.x).min(c.x).min(d.x),
            a.y.min(b.y).min(c.y).min(d.y),
        );
        let max = Point2::new(
            a.x.max(b.x).max(c.x).max(d.x),
            a.y.max(b.y).max(c.y).max(d.y),
        );
        Aabb { min, max }
    }

    /// Returns `true` if `point` lies inside the quad.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        self.aabb().contains(point) && point_in_polygon(point, &self.vertices)
    }
}

/// The drivable surface: quads plus a broad-phase grid over them.
///
/// Grid buckets hold indices into `quads`.
#[derive(Debug, Clone, Default)]
pub struct RibbonMesh {
    /// One quad per centerline segment, in centerline order.
    pub quads: Vec<Quad>,
    /// Uniform grid mapping cells to overlapping quad indices.
    pub grid: SpatialGrid,
}

impl RibbonMesh {
    /// Returns `true` if the mesh has no quads.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Indices of the quads containing `point`, ascending.
    ///
    /// Only quads bucketed in the point's cell are tested.
    #[must_use]
    pub fn quads_at(&self, point: &Point2) -> Vec<usize> {
        self.grid
            .quads_in_cell(self.grid.cell_of(point))
            .iter()
            .copied()
            .filter(|&i| self.quads.get(i).is_some_and(|q| q.contains(point)))
            .collect()
    }

    /// Returns `true` if `point` lies on the drivable surface.
    #[must_use]
    pub fn is_on_track(&self, point: &Point2) -> bool {
        !self.quads_at(point).is_empty()
    }

    /// Indices of the quads whose bounding boxes overlap `view`, ascending.
    ///
    /// The grid narrows the candidates to the overlapped cells; each
    /// candidate's own box is then checked against `view`.
    #[must_use]
    pub fn visible_quads(&self, view: &Aabb) -> Vec<usize> {
        self.grid
            .query_aabb(view)
            .into_iter()
            .filter(|&i| self.quads.get(i).is_some_and(|q| q.aabb().intersects(view)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> Quad {
        Quad::new([
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        ])
    }

    #[test]
    fn quad_aabb() {
        let q = Quad::new([
            Point2::new(2.0, 5.0),
            Point2::new(-1.0, 3.0),
            Point2::new(4.0, -2.0),
            Point2::new(3.0, 7.0),
        ]);
        let aabb = q.aabb();
        assert_eq!(aabb.min, Point2::new(-1.0, -2.0));
        assert_eq!(aabb.max, Point2::new(4.0, 7.0));
    }

    #[test]
    fn quad_contains() {
        let q = unit_quad();
        assert!(q.contains(&Point2::new(0.5, 0.5)));
        assert!(!q.contains(&Point2::new(1.5, 0.5)));
    }

    #[test]
    fn visible_quads_drops_cell_neighbors_outside_view() {
        let near = Quad::new([
            Point2::new(1.0, 2.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 1.0),
            Point2::new(2.0, 2.0),
        ]);
        let far = Quad::new([
            Point2::new(8.0, 9.0),
            Point2::new(8.0, 8.0),
            Point2::new(9.0, 8.0),
            Point2::new(9.0, 9.0),
        ]);
        let mut grid = SpatialGrid::new(10.0);
        grid.insert(0, &near.aabb());
        grid.insert(1, &far.aabb());
        let mesh = RibbonMesh {
            quads: vec![near, far],
            grid,
        };

        // Both quads share cell (0, 0); only the first overlaps the view.
        let view = Aabb::new(Point2::new(0.0, 0.0), Point2::new(3.0, 3.0));
        assert_eq!(mesh.grid.query_aabb(&view), vec![0, 1]);
        assert_eq!(mesh.visible_quads(&view), vec![0]);
    }

    #[test]
    fn empty_mesh_queries() {
        let mesh = RibbonMesh::default();
        assert!(mesh.is_empty());
        assert!(!mesh.is_on_track(&Point2::new(0.0, 0.0)));
        let view = Aabb::new(Point2::new(-10.0, -10.0), Point2::new(10.0, 10.0));
        assert!(mesh.visible_quads(&view).is_empty());
    }
}
