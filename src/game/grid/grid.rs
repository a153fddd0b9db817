//! Coordinate system of the grid.
//!
//! Maps continuous world positions to integer cell indices and back. The grid
//! is anchored at a fixed origin and every cell is a square of `tile_degrees`
//! on both axes, so cells tile the plane without gaps or overlaps.

use crate::game::types::{CellBounds, CellIndex, LatLng};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub origin: LatLng,
    pub tile_degrees: f64,
}

impl Grid {
    pub fn new(origin: LatLng, tile_degrees: f64) -> Self {
        Self { origin, tile_degrees }
    }

    /// Cell containing `pos`. Each axis is floor-divided independently.
    pub fn cell_index_of(&self, pos: LatLng) -> CellIndex {
        CellIndex {
            i: ((pos.lat - self.origin.lat) / self.tile_degrees).floor() as i32,
            j: ((pos.lng - self.origin.lng) / self.tile_degrees).floor() as i32,
        }
    }

    /// Region covered by a cell, half-open on its north and east edges.
    pub fn cell_bounds(&self, cell: CellIndex) -> CellBounds {
        let size = self.tile_degrees;
        CellBounds {
            south: self.origin.lat + cell.i as f64 * size,
            west: self.origin.lng + cell.j as f64 * size,
            north: self.origin.lat + (cell.i as f64 + 1.0) * size,
            east: self.origin.lng + (cell.j as f64 + 1.0) * size,
        }
    }

    pub fn cell_center(&self, cell: CellIndex) -> LatLng {
        self.cell_bounds(cell).center()
    }

    /// Corner cells `(south-west, north-east)` of a viewport, or `None` when
    /// the rectangle is inverted.
    fn corner_cells(&self, bounds: &CellBounds) -> Option<(CellIndex, CellIndex)> {
        if bounds.north < bounds.south || bounds.east < bounds.west {
            return None;
        }
        let min = self.cell_index_of(LatLng::new(bounds.south, bounds.west));
        let max = self.cell_index_of(LatLng::new(bounds.north, bounds.east));
        Some((min, max))
    }

    /// Number of cells intersecting `bounds`.
    pub fn cell_count(&self, bounds: &CellBounds) -> usize {
        match self.corner_cells(bounds) {
            Some((min, max)) => {
                let rows = (max.i as i64 - min.i as i64 + 1) as u64;
                let cols = (max.j as i64 - min.j as i64 + 1) as u64;
                rows.saturating_mul(cols).try_into().unwrap_or(usize::MAX)
            }
            None => 0,
        }
    }

    /// Every cell intersecting `bounds`, south to north then west to east.
    pub fn cells_in(&self, bounds: &CellBounds) -> impl Iterator<Item = CellIndex> + use<> {
        let (min, max) = match self.corner_cells(bounds) {
            Some(corners) => corners,
            // Empty range.
            None => (CellIndex::new(0, 0), CellIndex::new(-1, -1)),
        };
        (min.i..=max.i).flat_map(move |i| (min.j..=max.j).map(move |j| CellIndex::new(i, j)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::game::{ORIGIN, TILE_DEGREES};
    use proptest::prelude::*;

    fn grid() -> Grid {
        Grid::new(ORIGIN, TILE_DEGREES)
    }

    #[test]
    fn origin_is_south_west_corner_of_cell_zero() {
        let g = grid();
        let b = g.cell_bounds(CellIndex::new(0, 0));
        assert_eq!(b.south, ORIGIN.lat);
        assert_eq!(b.west, ORIGIN.lng);
        assert_eq!(g.cell_index_of(g.cell_center(CellIndex::new(0, 0))), CellIndex::new(0, 0));
    }

    #[test]
    fn negative_offsets_floor_towards_negative_infinity() {
        let g = grid();
        let pos = LatLng::new(ORIGIN.lat - 0.5 * TILE_DEGREES, ORIGIN.lng - 1.5 * TILE_DEGREES);
        assert_eq!(g.cell_index_of(pos), CellIndex::new(-1, -2));
    }

    #[test]
    fn adjacent_cells_share_edges() {
        let g = grid();
        let a = g.cell_bounds(CellIndex::new(3, -4));
        let north = g.cell_bounds(CellIndex::new(4, -4));
        let east = g.cell_bounds(CellIndex::new(3, -3));
        assert!((a.north - north.south).abs() < 1e-12);
        assert!((a.east - east.west).abs() < 1e-12);
    }

    #[test]
    fn viewport_enumeration_covers_partial_cells() {
        let g = grid();
        // From the middle of (0, 0) to the middle of (2, 1): 3 rows x 2 cols.
        let view = CellBounds {
            south: ORIGIN.lat + 0.5 * TILE_DEGREES,
            west: ORIGIN.lng + 0.5 * TILE_DEGREES,
            north: ORIGIN.lat + 2.5 * TILE_DEGREES,
            east: ORIGIN.lng + 1.5 * TILE_DEGREES,
        };
        let cells: Vec<_> = g.cells_in(&view).collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(g.cell_count(&view), 6);
        assert_eq!(cells.first(), Some(&CellIndex::new(0, 0)));
        assert_eq!(cells.last(), Some(&CellIndex::new(2, 1)));
    }

    #[test]
    fn inverted_viewport_is_empty() {
        let g = grid();
        let view = CellBounds {
            south: ORIGIN.lat + TILE_DEGREES,
            west: ORIGIN.lng,
            north: ORIGIN.lat,
            east: ORIGIN.lng + TILE_DEGREES,
        };
        assert_eq!(g.cells_in(&view).count(), 0);
        assert_eq!(g.cell_count(&view), 0);
    }

    #[test]
    fn extreme_indices_have_finite_bounds() {
        let g = grid();
        let edge = g.cell_bounds(CellIndex::new(i32::MAX, i32::MIN));
        assert!(edge.north > edge.south);
        assert!(edge.east > edge.west);

        // A viewport far past the addressable range collapses onto the last index.
        let far = CellBounds { south: 1e10, west: 0.0, north: 1e10, east: 0.0 };
        let cells: Vec<_> = g.cells_in(&far).collect();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].i, i32::MAX);
        assert!(g.cell_center(cells[0]).lat.is_finite());
    }

    proptest! {
        #[test]
        fn center_maps_back_to_its_cell(i in -100_000i32..100_000, j in -100_000i32..100_000) {
            let g = grid();
            let cell = CellIndex::new(i, j);
            prop_assert_eq!(g.cell_index_of(g.cell_center(cell)), cell);
        }

        #[test]
        fn interior_points_belong_to_exactly_one_cell(
            i in -10_000i32..10_000,
            j in -10_000i32..10_000,
            fi in 0.01f64..0.99,
            fj in 0.01f64..0.99,
        ) {
            let g = grid();
            let pos = LatLng::new(
                ORIGIN.lat + (i as f64 + fi) * TILE_DEGREES,
                ORIGIN.lng + (j as f64 + fj) * TILE_DEGREES,
            );
            let cell = g.cell_index_of(pos);
            prop_assert_eq!(cell, CellIndex::new(i, j));
            prop_assert!(g.cell_bounds(cell).contains(pos));
        }
    }
}
