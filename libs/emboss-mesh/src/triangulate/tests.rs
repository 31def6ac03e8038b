//! # Triangulation Tests
//!
//! Diagonal selection, winding and cell coverage.

use super::*;
use crate::domain::CircularDomain;
use crate::scale::ScaleMode;

fn grid(width: usize, height: usize, samples: &[u16]) -> ElevationGrid {
    ElevationGrid::new(width, height, samples.to_vec()).unwrap()
}

fn uniform_scale(grid: &ElevationGrid) -> ScaleModel {
    ScaleModel::new(
        grid.width(),
        grid.height(),
        grid.max_elevation().max(1),
        grid.width() as f64 * 10.0,
        10.0,
        ScaleMode::Uniform,
    )
    .unwrap()
}

fn single_cell(nw: u16, ne: u16, sw: u16, se: u16) -> ElevationGrid {
    grid(2, 2, &[nw, ne, sw, se])
}

#[test]
fn test_select_flat_cell_ties_to_nw_se() {
    assert_eq!(Diagonal::select(&[7, 7, 7, 7]), Diagonal::NwSe);
}

#[test]
fn test_select_equal_deltas_tie_to_nw_se() {
    // |NW - SE| == |NE - SW| == 4
    assert_eq!(Diagonal::select(&[0, 10, 6, 4]), Diagonal::NwSe);
}

#[test]
fn test_select_flatter_diagonal() {
    // NW-SE spans 0 -> 100, NE-SW is level
    assert_eq!(Diagonal::select(&[0, 50, 50, 100]), Diagonal::NeSw);
    // NE-SW spans 0 -> 100, NW-SE is level
    assert_eq!(Diagonal::select(&[50, 0, 100, 50]), Diagonal::NwSe);
}

#[test]
fn test_nw_se_split_order() {
    let v = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::ONE];
    let [a, b] = Diagonal::NwSe.split(&v);
    assert_eq!(a.vertices, [v[0], v[1], v[3]]);
    assert_eq!(b.vertices, [v[3], v[2], v[0]]);
}

#[test]
fn test_ne_sw_split_order() {
    let v = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::ONE];
    let [a, b] = Diagonal::NeSw.split(&v);
    assert_eq!(a.vertices, [v[2], v[0], v[1]]);
    assert_eq!(b.vertices, [v[1], v[3], v[2]]);
}

#[test]
fn test_flat_region_is_coplanar() {
    let g = grid(4, 4, &[5; 16]);
    let triangulator = Triangulator::new(&g, uniform_scale(&g), Domain::rectangle(&g));

    for cell in triangulator.cells() {
        assert_eq!(triangulator.diagonal(cell).unwrap(), Diagonal::NwSe);
    }

    let mesh = triangulator.triangulate().unwrap();
    let z = mesh.triangles()[0].vertices[0].z;
    for triangle in mesh.triangles() {
        for vertex in triangle.vertices {
            assert_eq!(vertex.z, z);
        }
    }
}

#[test]
fn test_nw_se_cells_share_diagonal_only() {
    // NW-SE is strictly flatter here
    let g = single_cell(10, 0, 90, 12);
    let triangulator = Triangulator::new(&g, uniform_scale(&g), Domain::rectangle(&g));
    let cell = Cell::new(0, 0);
    assert_eq!(triangulator.diagonal(cell).unwrap(), Diagonal::NwSe);

    let vertices = cell.vertices(&g, triangulator.scale()).unwrap();
    let nw = vertices[Corner::NW.index()];
    let ne = vertices[Corner::NE.index()];
    let sw = vertices[Corner::SW.index()];
    let se = vertices[Corner::SE.index()];

    let [a, b] = triangulator.cell_triangles(cell).unwrap();
    assert!(a.contains(nw) && a.contains(se));
    assert!(b.contains(nw) && b.contains(se));
    // NE and SW never appear in the same triangle
    assert!(!(a.contains(ne) && a.contains(sw)));
    assert!(!(b.contains(ne) && b.contains(sw)));
    assert!(!(a.contains(ne) && b.contains(ne)));
    assert!(!(a.contains(sw) && b.contains(sw)));
}

#[test]
fn test_winding_is_consistent() {
    // With world Y running opposite to image rows, the fixed vertex order
    // winds clockwise seen from +Z for both diagonals.
    let g = grid(3, 3, &[0, 40, 80, 20, 60, 100, 40, 80, 120]);
    let triangulator = Triangulator::new(&g, uniform_scale(&g), Domain::rectangle(&g));
    let mesh = triangulator.triangulate().unwrap();
    assert!(triangulator
        .cells()
        .any(|cell| triangulator.diagonal(cell).unwrap() == Diagonal::NeSw));
    for triangle in mesh.triangles() {
        assert!(triangle.normal().z < 0.0, "inconsistent winding: {triangle:?}");
    }
}

#[test]
fn test_two_by_two_grid() {
    let g = single_cell(1, 2, 3, 4);
    let triangulator = Triangulator::new(&g, uniform_scale(&g), Domain::rectangle(&g));
    assert_eq!(triangulator.triangle_count(), 2);
    assert_eq!(triangulator.triangulate().unwrap().triangle_count(), 2);
}

#[test]
fn test_ten_by_ten_grid() {
    let g = ElevationGrid::from_fn(10, 10, |col, row| ((col * 7 + row * 3) % 11) as u16).unwrap();
    let triangulator = Triangulator::new(&g, uniform_scale(&g), Domain::rectangle(&g));
    assert_eq!(triangulator.cells().count(), 81);
    assert_eq!(triangulator.triangle_count(), 162);
    assert_eq!(triangulator.triangulate().unwrap().triangle_count(), 162);
}

#[test]
fn test_cells_visit_columns_first() {
    let g = grid(3, 3, &[1; 9]);
    let triangulator = Triangulator::new(&g, uniform_scale(&g), Domain::rectangle(&g));
    let cells: Vec<Cell> = triangulator.cells().collect();
    assert_eq!(
        cells,
        vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]
    );
}

#[test]
fn test_triangles_iterator_restarts() {
    let g = grid(3, 3, &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    let triangulator = Triangulator::new(&g, uniform_scale(&g), Domain::rectangle(&g));
    let first: Vec<_> = triangulator.triangles().map(Result::unwrap).collect();
    let second: Vec<_> = triangulator.triangles().map(Result::unwrap).collect();
    assert_eq!(first, second);
}

#[test]
fn test_circular_domain_limits_cells() {
    let g = ElevationGrid::from_fn(21, 21, |_, _| 100).unwrap();
    let disk = CircularDomain::for_grid(&g, 2.0).unwrap();
    let triangulator = Triangulator::new(&g, uniform_scale(&g), Domain::circle(&g, disk));

    let count = triangulator.triangle_count();
    assert!(count < 2 * g.cell_count());
    assert_eq!(triangulator.triangulate().unwrap().triangle_count(), count);
    for cell in triangulator.cells() {
        assert!(disk.distance(cell.cx as f64, cell.cy as f64) <= disk.radius());
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let g = ElevationGrid::from_fn(33, 17, |col, row| ((col * col + 3 * row) % 256) as u16).unwrap();
    let disk = CircularDomain::for_grid(&g, 2.0).unwrap();
    for domain in [Domain::rectangle(&g), Domain::circle(&g, disk)] {
        let triangulator = Triangulator::new(&g, uniform_scale(&g), domain);
        let sequential = triangulator.triangulate().unwrap();
        let parallel = triangulator.triangulate_parallel().unwrap();
        assert_eq!(sequential, parallel);
    }
}
