//! Integration tests for grid ruling.

use copybook_common::Point;
use copybook_paint::grid::{BORDER_WIDTH, DASHES_PER_CELL, GUIDE_WIDTH};
use copybook_paint::{
    ColorValue, DisplayCommand, GridStyle, LayoutResult, Pen, RecordingCanvas, compute_layout, draw_grid,
    draw_row_grid,
};

fn lines(canvas: &RecordingCanvas) -> Vec<(Point, Point, Pen)> {
    canvas.pages()[0]
        .commands()
        .iter()
        .map(|command| match command {
            DisplayCommand::DrawLine { from, to, pen } => (*from, *to, *pen),
            other => panic!("unexpected command {other:?}"),
        })
        .collect()
}

fn layout() -> LayoutResult {
    compute_layout(80.0, 80.0, 2, 2, 0.9).unwrap()
}

#[test]
fn test_tian_row() {
    let layout = layout();
    let mut canvas = RecordingCanvas::new(80.0, 80.0);
    draw_row_grid(&mut canvas, &layout, 0, GridStyle::Tian, ColorValue::BLACK);

    let lines = lines(&canvas);
    // Two guides per cell, top and bottom edges, three dividers.
    assert_eq!(lines.len(), 2 * 2 + 2 + 3);

    let (guides, frame) = lines.split_at(4);
    for (_, _, pen) in guides {
        assert_eq!(pen.width, GUIDE_WIDTH);
        assert_eq!(pen.dash, Some(40.0 / DASHES_PER_CELL));
    }
    for (_, _, pen) in frame {
        assert_eq!(*pen, Pen::solid(BORDER_WIDTH, ColorValue::BLACK));
    }

    // Crosshair of the second cell.
    assert_eq!(lines[2].0, Point::new(60.0, 0.0));
    assert_eq!(lines[2].1, Point::new(60.0, 40.0));
    assert_eq!(lines[3].0, Point::new(40.0, 20.0));
    assert_eq!(lines[3].1, Point::new(80.0, 20.0));

    // Frame spans the full row.
    assert_eq!((lines[4].0, lines[4].1), (Point::new(0.0, 0.0), Point::new(80.0, 0.0)));
    assert_eq!((lines[5].0, lines[5].1), (Point::new(0.0, 40.0), Point::new(80.0, 40.0)));
    let dividers: Vec<f32> = lines[6..].iter().map(|(from, _, _)| from.x).collect();
    assert_eq!(dividers, vec![0.0, 40.0, 80.0]);
}

#[test]
fn test_four_line_row() {
    let layout = compute_layout(90.0, 90.0, 1, 3, 0.9).unwrap();
    let mut canvas = RecordingCanvas::new(90.0, 90.0);
    draw_row_grid(&mut canvas, &layout, 0, GridStyle::FourLine, ColorValue::MUTED_GRAY);

    let lines = lines(&canvas);
    assert_eq!(lines.len(), 2 + 2 + 4);

    // Guides at a third and two thirds of the cell height, across the row.
    assert_eq!((lines[0].0, lines[0].1), (Point::new(0.0, 10.0), Point::new(90.0, 10.0)));
    assert_eq!((lines[1].0, lines[1].1), (Point::new(0.0, 20.0), Point::new(90.0, 20.0)));
    assert!(lines[..2].iter().all(|(_, _, pen)| pen.dash.is_some()));
    assert!(lines[2..].iter().all(|(_, _, pen)| pen.dash.is_none()));
    assert!(lines.iter().all(|(_, _, pen)| pen.color == ColorValue::MUTED_GRAY));
}

#[test]
fn test_rows_are_offset_by_row_height() {
    let layout = compute_layout(100.0, 300.0, 4, 2, 1.0).unwrap();
    let mut canvas = RecordingCanvas::new(100.0, 300.0);
    draw_grid(&mut canvas, &layout, GridStyle::Tian, ColorValue::BLACK);

    let lines = lines(&canvas);
    assert_eq!(lines.len(), 4 * 9);

    let row_tops: Vec<f32> = lines.chunks(9).map(|row| row[4].0.y).collect();
    for (row, top) in row_tops.iter().enumerate() {
        assert!((top - layout.row_top(row)).abs() < 1e-3);
    }
    assert_eq!(canvas.save_depth(), 0);
}
