//! Integration tests for cell content.

use copybook_common::Rect;
use copybook_paint::{
    Canvas, ColorValue, DisplayCommand, Palette, PaintError, RecordingCanvas, Transform, compute_layout,
    draw_stroke_character_page, draw_text_row,
};
use copybook_stroke::{Path, parse};

fn strokes(count: usize) -> Vec<Path> {
    (0..count)
        .map(|i| {
            let x = 100.0 * i as f32;
            parse(&format!("M {x} 800 L {} 800 L {} 0 Z", x + 80.0, x + 80.0)).unwrap()
        })
        .collect()
}

fn fill_colors(canvas: &RecordingCanvas) -> Vec<ColorValue> {
    canvas.pages()[0]
        .commands()
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::FillPath { color, .. } => Some(*color),
            _ => None,
        })
        .collect()
}

#[test]
fn test_text_row_exemplar_then_tracing() {
    let layout = compute_layout(80.0, 80.0, 2, 2, 0.9).unwrap();
    let palette = Palette::default();
    let mut canvas = RecordingCanvas::new(80.0, 80.0);
    draw_text_row(&mut canvas, &layout, 1, "永", &palette);

    let commands = canvas.pages()[0].commands();
    assert_eq!(commands.len(), 2);
    for (col, command) in commands.iter().enumerate() {
        let DisplayCommand::DrawText {
            rect,
            text,
            font_size,
            color,
        } = command
        else {
            panic!("expected text, got {command:?}");
        };
        assert_eq!(text, "永");
        assert_eq!(*rect, layout.cell_rect(1, col));
        assert_eq!(*font_size, layout.font_size);
        assert_eq!(*color, if col == 0 { palette.solid } else { palette.muted });
    }
}

#[test]
fn test_progressive_reveal() {
    let layout = compute_layout(300.0, 100.0, 1, 3, 0.9).unwrap();
    let palette = Palette::default();
    let (solid, muted) = (palette.solid, palette.muted);
    let mut canvas = RecordingCanvas::new(300.0, 100.0);

    let drawn = draw_stroke_character_page(&mut canvas, &layout, &strokes(3), &palette).unwrap();
    assert_eq!(drawn, 3);

    // Each cell fills strokes last to first so written strokes land on top.
    assert_eq!(
        fill_colors(&canvas),
        vec![
            muted, muted, solid, // column 0: stroke 0 written
            muted, solid, solid, // column 1: strokes 0..=1 written
            solid, solid, solid, // column 2: all written
        ]
    );
}

#[test]
fn test_more_columns_than_strokes() {
    let layout = compute_layout(400.0, 100.0, 1, 4, 0.9).unwrap();
    let palette = Palette::default();
    let mut canvas = RecordingCanvas::new(400.0, 100.0);
    let _ = draw_stroke_character_page(&mut canvas, &layout, &strokes(2), &palette).unwrap();

    let colors = fill_colors(&canvas);
    assert_eq!(colors.len(), 8);
    assert!(colors[2..].iter().all(|&c| c == palette.solid));
}

#[test]
fn test_strokes_land_inside_their_cell() {
    let layout = compute_layout(200.0, 200.0, 2, 2, 0.8).unwrap();
    let mut canvas = RecordingCanvas::new(200.0, 200.0);
    let _ = draw_stroke_character_page(&mut canvas, &layout, &strokes(1), &Palette::default()).unwrap();

    let bounds: Vec<Rect> = canvas.pages()[0]
        .commands()
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::FillPath { path, .. } => path.bounds(),
            _ => None,
        })
        .collect();
    assert_eq!(bounds.len(), 4);

    for (cell, bounds) in [(0, 0), (0, 1), (1, 0), (1, 1)].into_iter().zip(bounds) {
        let target = layout.cell_rect(cell.0, cell.1);
        assert!(bounds.x >= target.x - 1e-3 && bounds.right() <= target.right() + 1e-3);
        assert!(bounds.y >= target.y - 1e-3 && bounds.bottom() <= target.bottom() + 1e-3);
    }
    assert_eq!(canvas.save_depth(), 0);
    assert_eq!(canvas.transform(), Transform::IDENTITY);
}

#[test]
fn test_outer_transform_is_kept() {
    let layout = compute_layout(100.0, 100.0, 1, 1, 1.0).unwrap();
    let mut canvas = RecordingCanvas::new(100.0, 100.0);
    let shift = Transform::scale_translate(1.0, 1.0, 500.0, 0.0);
    canvas.set_transform(shift);

    let _ = draw_stroke_character_page(&mut canvas, &layout, &strokes(1), &Palette::default()).unwrap();

    let Some(DisplayCommand::FillPath { path, .. }) = canvas.pages()[0].commands().first() else {
        panic!("expected a fill");
    };
    let bounds = path.bounds().unwrap();
    assert!(bounds.x >= 500.0 && bounds.right() <= 600.0 + 1e-3);
    assert_eq!(canvas.transform(), shift);
}

#[test]
fn test_no_strokes_draws_nothing() {
    let layout = compute_layout(100.0, 100.0, 2, 2, 0.9).unwrap();
    let mut canvas = RecordingCanvas::new(100.0, 100.0);
    assert_eq!(draw_stroke_character_page(&mut canvas, &layout, &[], &Palette::default()), Ok(0));
    assert!(canvas.pages()[0].is_empty());
}

#[test]
fn test_collapsed_cell_is_invalid_dimension() {
    // A cell whose content rectangle has no area cannot be mapped onto.
    let mut layout = compute_layout(100.0, 100.0, 1, 1, 1.0).unwrap();
    layout.margin = layout.cell_size / 2.0;

    let mut canvas = RecordingCanvas::new(100.0, 100.0);
    let result = draw_stroke_character_page(&mut canvas, &layout, &strokes(1), &Palette::default());
    assert!(matches!(result, Err(PaintError::InvalidDimension(_))));
    assert!(canvas.pages()[0].is_empty());
    assert_eq!(canvas.save_depth(), 0);
}
