//! Integration tests for sheet layout.

use copybook_common::Rect;
use copybook_paint::{MIN_FILL_SCALE, PaintError, compute_layout};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_square_page_two_by_two() {
    let layout = compute_layout(80.0, 80.0, 2, 2, 1.0).unwrap();
    assert!(approx(layout.cell_size, 40.0));
    assert!(approx(layout.total_width, 80.0));
    assert!(approx(layout.spacing, 0.0));
    assert!(approx(layout.margin, 0.0));
    assert!(approx(layout.font_size, 40.0));
    assert_eq!((layout.rows, layout.cols), (2, 2));
}

#[test]
fn test_cell_is_limited_by_narrower_extent() {
    // Columns are the tighter constraint.
    let wide = compute_layout(100.0, 300.0, 4, 2, 1.0).unwrap();
    assert!(approx(wide.cell_size, 50.0));
    assert!(approx(wide.total_width, 100.0));

    // Rows are the tighter constraint.
    let tall = compute_layout(300.0, 100.0, 4, 2, 1.0).unwrap();
    assert!(approx(tall.cell_size, 25.0));
    assert!(approx(tall.total_width, 50.0));
    assert!(approx(tall.spacing, 0.0));
}

#[test]
fn test_rows_spread_to_bottom_of_page() {
    let layout = compute_layout(100.0, 300.0, 4, 2, 1.0).unwrap();
    assert!(approx(layout.spacing, 100.0 / 3.0));
    assert!(approx(layout.row_height, layout.cell_size + layout.spacing));

    let last = layout.row_rect(3);
    assert!(approx(last.bottom(), 300.0));
}

#[test]
fn test_row_height_never_below_cell_size() {
    for (w, h) in [(80.0, 80.0), (595.0, 842.0), (842.0, 595.0), (10.0, 1000.0), (1000.0, 10.0)] {
        for rows in 2..12 {
            for cols in 1..10 {
                let layout = compute_layout(w, h, rows, cols, 0.9).unwrap();
                let expected = (w / cols as f32).min(h / rows as f32);
                assert!(approx(layout.cell_size, expected), "{w}x{h} {rows}x{cols}");
                assert!(layout.row_height >= layout.cell_size - 1e-4, "{w}x{h} {rows}x{cols}");
            }
        }
    }
}

#[test]
fn test_single_row_has_no_spacing() {
    let layout = compute_layout(100.0, 50.0, 1, 4, 0.9).unwrap();
    assert!(approx(layout.cell_size, 25.0));
    assert_eq!(layout.spacing, 0.0);
    assert!(approx(layout.row_height, 25.0));
}

#[test]
fn test_single_row_taller_than_wide() {
    let layout = compute_layout(40.0, 500.0, 1, 1, 1.0).unwrap();
    assert!(approx(layout.cell_size, 40.0));
    assert_eq!(layout.spacing, 0.0);
}

#[test]
fn test_fill_scale_sets_margin_and_font() {
    let layout = compute_layout(80.0, 80.0, 2, 2, 0.9).unwrap();
    assert!(approx(layout.margin, 2.0));
    assert!(approx(layout.font_size, 36.0));
    assert_eq!(layout.cell_rect(1, 1), Rect::new(40.0, 40.0, 40.0, 40.0).deflate(layout.margin));
}

#[test]
fn test_fill_scale_is_clamped() {
    let full = compute_layout(80.0, 80.0, 2, 2, 5.0).unwrap();
    assert!(approx(full.margin, 0.0));

    let tiny = compute_layout(80.0, 80.0, 2, 2, -1.0).unwrap();
    assert!(approx(tiny.margin, 40.0 * (1.0 - MIN_FILL_SCALE) / 2.0));
    assert!(tiny.cell_rect(0, 0).width > 0.0);

    let nan = compute_layout(80.0, 80.0, 2, 2, f32::NAN).unwrap();
    assert!(approx(nan.margin, 0.0));
}

#[test]
fn test_explicit_margin_overrides_and_clamps() {
    let layout = compute_layout(80.0, 80.0, 2, 2, 0.9).unwrap();
    assert!(approx(layout.with_margin(5.0).margin, 5.0));
    assert!(approx(layout.with_margin(-3.0).margin, 0.0));
    assert!(layout.with_margin(100.0).cell_rect(0, 0).width > 0.0);
    assert!(approx(layout.with_margin(5.0).font_size, layout.font_size));
}

#[test]
fn test_cell_origins() {
    let layout = compute_layout(100.0, 300.0, 4, 2, 1.0).unwrap();
    let cell = layout.cell_bounds(2, 1);
    assert!(approx(cell.x, 50.0));
    assert!(approx(cell.y, 2.0 * layout.row_height));
    assert!(approx(cell.width, 50.0));
}

#[test]
fn test_invalid_dimensions() {
    for (w, h, rows, cols) in [
        (80.0, 80.0, 0, 2),
        (80.0, 80.0, 2, 0),
        (0.0, 80.0, 2, 2),
        (80.0, -1.0, 2, 2),
        (f32::INFINITY, 80.0, 2, 2),
        (80.0, f32::NAN, 2, 2),
    ] {
        assert!(
            matches!(compute_layout(w, h, rows, cols, 0.9), Err(PaintError::InvalidDimension(_))),
            "{w}x{h} {rows}x{cols}"
        );
    }
}
