use super::*;
use crate::consts::{MAX_DIM, MIN_DIM};

fn config() -> EngineConfig {
    EngineConfig::default()
}

fn grid(rows: usize, columns: usize) -> Grid {
    Grid::generate(rows, columns, &config())
}

// =============================================================
// generate
// =============================================================

#[test]
fn generate_uses_requested_dims_in_range() {
    let g = grid(20, 12);
    assert_eq!(g.rows(), 20);
    assert_eq!(g.columns(), 12);
}

#[test]
fn generate_clamps_dims_below_min() {
    for n in 0..MIN_DIM {
        let g = grid(n, n);
        assert_eq!(g.rows(), MIN_DIM);
        assert_eq!(g.columns(), MIN_DIM);
    }
}

#[test]
fn generate_clamps_dims_above_max() {
    for n in [MAX_DIM + 1, MAX_DIM * 2, usize::MAX] {
        let g = grid(n, 4);
        assert_eq!(g.rows(), MAX_DIM);
        assert_eq!(g.columns(), 4);
    }
}

#[test]
fn generate_respects_config_limits() {
    let c = EngineConfig { min_dim: 5, max_dim: 8, ..Default::default() };
    let g = Grid::generate(2, 100, &c);
    assert_eq!((g.rows(), g.columns()), (5, 8));
}

#[test]
fn generate_with_inverted_limits_uses_max() {
    let c = EngineConfig { min_dim: 9, max_dim: 4, ..Default::default() };
    let g = Grid::generate(1, 50, &c);
    assert_eq!((g.rows(), g.columns()), (4, 4));
}

#[test]
fn generate_every_cell_default_without_entity() {
    let g = grid(7, 9);
    let mut seen = 0;
    for (_, _, cell) in g.iter() {
        assert_eq!(cell.color, CellColor::Default);
        assert!(cell.entity.is_none());
        seen += 1;
    }
    assert_eq!(seen, 63);
}

#[test]
fn generate_is_fully_rectangular() {
    let g = grid(4, 6);
    for row in 0..4 {
        for col in 0..6 {
            assert!(g.cell(row, col).is_some(), "missing ({row}, {col})");
        }
    }
    assert!(g.cell(4, 0).is_none());
    assert!(g.cell(0, 6).is_none());
}

// =============================================================
// iter
// =============================================================

#[test]
fn iter_is_row_major() {
    let g = grid(3, 4);
    let coords = g.iter().map(|(r, c, _)| (r, c)).collect::<Vec<_>>();
    assert_eq!(coords[0], (0, 0));
    assert_eq!(coords[3], (0, 3));
    assert_eq!(coords[4], (1, 0));
    assert_eq!(coords[11], (2, 3));
}

// =============================================================
// paint / toggle / set_color
// =============================================================

#[test]
fn paint_marks_cell_and_reports_change() {
    let mut g = grid(5, 5);
    assert!(g.paint(2, 3).unwrap());
    assert_eq!(g.cell(2, 3).unwrap().color, CellColor::Painted);
}

#[test]
fn paint_twice_is_noop() {
    let mut g = grid(5, 5);
    assert!(g.paint(1, 1).unwrap());
    assert!(!g.paint(1, 1).unwrap());
    assert_eq!(g.cell(1, 1).unwrap().color, CellColor::Painted);
}

#[test]
fn paint_touches_only_target_cell() {
    let mut g = grid(5, 5);
    g.paint(2, 2).unwrap();
    assert_eq!(g.painted_count(), 1);
}

#[test]
fn toggle_is_its_own_inverse() {
    let mut g = grid(5, 5);
    assert_eq!(g.toggle(0, 4).unwrap(), CellColor::Painted);
    assert_eq!(g.toggle(0, 4).unwrap(), CellColor::Default);
    assert_eq!(g.cell(0, 4).unwrap().color, CellColor::Default);
}

#[test]
fn toggle_swatch_becomes_painted() {
    let mut g = grid(5, 5);
    g.set_color(1, 1, CellColor::Swatch(0)).unwrap();
    assert_eq!(g.toggle(1, 1).unwrap(), CellColor::Painted);
}

#[test]
fn set_color_same_color_is_noop() {
    let mut g = grid(3, 3);
    assert!(!g.set_color(0, 0, CellColor::Default).unwrap());
    assert!(g.set_color(0, 0, CellColor::Swatch(2)).unwrap());
    assert!(!g.set_color(0, 0, CellColor::Swatch(2)).unwrap());
}

#[test]
fn out_of_bounds_access_is_rejected() {
    let mut g = grid(3, 4);
    let expected = GridError::OutOfBounds { row: 3, col: 0, rows: 3, columns: 4 };
    assert_eq!(g.paint(3, 0).unwrap_err(), expected);
    assert!(g.toggle(0, 4).is_err());
    assert!(g.set_color(99, 99, CellColor::Painted).is_err());
    assert_eq!(g.painted_count(), 0);
}

// =============================================================
// clear
// =============================================================

#[test]
fn clear_resets_colors_and_keeps_dims() {
    let mut g = grid(6, 8);
    g.paint(0, 0).unwrap();
    g.paint(5, 7).unwrap();
    g.clear();
    assert_eq!(g.painted_count(), 0);
    assert_eq!((g.rows(), g.columns()), (6, 8));
}

// =============================================================
// CellColor
// =============================================================

#[test]
fn css_resolves_palette() {
    let c = EngineConfig { swatches: vec!["red".to_owned()], ..Default::default() };
    assert_eq!(CellColor::Default.css(&c), c.default_color);
    assert_eq!(CellColor::Painted.css(&c), c.painted_color);
    assert_eq!(CellColor::Swatch(0).css(&c), "red");
}

#[test]
fn css_unknown_swatch_falls_back_to_default() {
    let c = EngineConfig::default();
    assert_eq!(CellColor::Swatch(3).css(&c), c.default_color);
}

#[test]
fn cell_color_serde_shape() {
    let json = serde_json::to_value(CellColor::Swatch(2)).unwrap();
    assert_eq!(json, serde_json::json!({ "kind": "swatch", "index": 2 }));
    let back: CellColor = serde_json::from_value(serde_json::json!({ "kind": "painted" })).unwrap();
    assert_eq!(back, CellColor::Painted);
}
