//! Integration tests for the software renderer.

use std::path::PathBuf;

use copybook_common::Point;
use copybook_paint::{
    Canvas, ColorValue, CopybookPainter, Mode, Pen, RecordingCanvas, SheetConfig, Transform,
};
use copybook_render::{PageFrame, RenderError, Renderer, load_font};
use copybook_stroke::{MemoryStrokeStore, parse};

fn frame(width: f32, height: f32) -> PageFrame {
    PageFrame {
        width,
        height,
        origin: Point::new(0.0, 0.0),
    }
}

/// `(r, g, b)` of the pixel at `(x, y)`.
fn rgb(renderer: &Renderer, x: u32, y: u32) -> (u8, u8, u8) {
    let pixel = renderer.pixmap().pixel(x, y).unwrap().demultiply();
    (pixel.red(), pixel.green(), pixel.blue())
}

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("copybook-render-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_blank_page_is_white() {
    let renderer = Renderer::new(frame(20.0, 10.0), 2.0).unwrap();
    assert_eq!((renderer.width(), renderer.height()), (40, 20));
    assert_eq!(rgb(&renderer, 0, 0), (255, 255, 255));
    assert_eq!(rgb(&renderer, 39, 19), (255, 255, 255));
}

#[test]
fn test_fill_path() {
    let mut canvas = RecordingCanvas::new(100.0, 100.0);
    canvas.fill_path(&parse("M 10 10 L 90 10 L 90 90 L 10 90 Z").unwrap(), ColorValue::rgb(255, 0, 0));

    let mut renderer = Renderer::new(frame(100.0, 100.0), 1.0).unwrap();
    renderer.render(&canvas.pages()[0]);

    assert_eq!(rgb(&renderer, 50, 50), (255, 0, 0));
    assert_eq!(rgb(&renderer, 5, 5), (255, 255, 255));
    assert_eq!(rgb(&renderer, 95, 50), (255, 255, 255));
}

#[test]
fn test_fill_is_nonzero_winding() {
    // Two overlapping squares wound the same way: the overlap stays filled.
    let path = parse("M 0 0 L 60 0 L 60 60 L 0 60 Z M 40 40 L 100 40 L 100 100 L 40 100 Z").unwrap();
    let mut canvas = RecordingCanvas::new(100.0, 100.0);
    canvas.fill_path(&path, ColorValue::BLACK);

    let mut renderer = Renderer::new(frame(100.0, 100.0), 1.0).unwrap();
    renderer.render(&canvas.pages()[0]);
    assert_eq!(rgb(&renderer, 50, 50), (0, 0, 0));
}

#[test]
fn test_solid_and_dashed_lines() {
    let mut canvas = RecordingCanvas::new(100.0, 20.0);
    canvas.draw_line(Point::new(0.0, 5.0), Point::new(100.0, 5.0), &Pen::solid(2.0, ColorValue::BLACK));
    canvas.draw_line(
        Point::new(0.0, 15.0),
        Point::new(100.0, 15.0),
        &Pen::dashed(2.0, ColorValue::BLACK, 10.0),
    );

    let mut renderer = Renderer::new(frame(100.0, 20.0), 1.0).unwrap();
    renderer.render(&canvas.pages()[0]);

    let solid: Vec<bool> = (0..100).map(|x| rgb(&renderer, x, 5).0 < 128).collect();
    assert!(solid.iter().all(|&inked| inked));

    // Dash 10, gap 10.
    assert!(rgb(&renderer, 5, 15).0 < 128);
    assert!(rgb(&renderer, 15, 15).0 > 128);
    assert!(rgb(&renderer, 25, 15).0 < 128);
}

#[test]
fn test_scale_and_origin() {
    let mut canvas = RecordingCanvas::new(10.0, 10.0);
    canvas.fill_path(&parse("M 0 0 L 10 0 L 10 10 L 0 10 Z").unwrap(), ColorValue::BLACK);

    let page = PageFrame {
        width: 30.0,
        height: 30.0,
        origin: Point::new(10.0, 10.0),
    };
    let mut renderer = Renderer::new(page, 2.0).unwrap();
    renderer.render(&canvas.pages()[0]);

    assert_eq!((renderer.width(), renderer.height()), (60, 60));
    assert_eq!(rgb(&renderer, 10, 10), (255, 255, 255));
    assert_eq!(rgb(&renderer, 30, 30), (0, 0, 0));
    assert_eq!(rgb(&renderer, 50, 50), (255, 255, 255));
}

#[test]
fn test_text_without_font_is_skipped() {
    let mut canvas = RecordingCanvas::new(40.0, 40.0);
    canvas.draw_text(copybook_common::Rect::new(0.0, 0.0, 40.0, 40.0), "永", 30.0, ColorValue::BLACK);

    let mut renderer = Renderer::new(frame(40.0, 40.0), 1.0).unwrap();
    renderer.render(&canvas.pages()[0]);
    assert_eq!(rgb(&renderer, 20, 20), (255, 255, 255));
}

#[test]
fn test_clear_resets_page() {
    let mut canvas = RecordingCanvas::new(10.0, 10.0);
    canvas.set_transform(Transform::scale_translate(1.0, 1.0, 0.0, 0.0));
    canvas.fill_path(&parse("M 0 0 L 10 0 L 10 10 Z").unwrap(), ColorValue::BLACK);

    let mut renderer = Renderer::new(frame(10.0, 10.0), 1.0).unwrap();
    renderer.render(&canvas.pages()[0]);
    renderer.clear();
    assert_eq!(rgb(&renderer, 8, 2), (255, 255, 255));
}

#[test]
fn test_invalid_size() {
    assert!(matches!(
        Renderer::new(frame(0.0, 10.0), 1.0),
        Err(RenderError::InvalidSize { .. })
    ));
    assert!(matches!(
        Renderer::new(frame(10.0, 10.0), f32::NAN),
        Err(RenderError::InvalidSize { .. })
    ));
}

#[test]
fn test_missing_font_file() {
    let missing = scratch("font").join("missing.ttf");
    assert!(matches!(load_font(&missing), Err(RenderError::Io { .. })));

    let garbage = scratch("font").join("garbage.ttf");
    std::fs::write(&garbage, b"not a font").unwrap();
    assert!(matches!(load_font(&garbage), Err(RenderError::Font { .. })));
}

#[test]
fn test_stroke_sheet_to_png() {
    let store = MemoryStrokeStore::from_table(
        [('一', vec!["M 0 450 L 1024 450 L 1024 350 L 0 350 Z".to_string()])]
            .into_iter()
            .collect(),
    );
    let painter = CopybookPainter::new(SheetConfig {
        rows: 1,
        columns: 2,
        characters: "一".to_string(),
        mode: Mode::Stroke,
        fill_scale: 1.0,
        ..SheetConfig::default()
    })
    .with_store(std::sync::Arc::new(store));

    let mut canvas = RecordingCanvas::new(200.0, 100.0);
    let _ = painter.paint_area(&mut canvas, 200.0, 100.0).unwrap();
    let document = canvas.into_document();

    let mut renderer = Renderer::new(PageFrame::from_document(&document), 1.0).unwrap();
    renderer.render(&document.pages[0]);

    // The bar sits in the middle of each cell, below the Tian crosshair.
    assert_eq!(rgb(&renderer, 25, 46), (0, 0, 0));
    assert_eq!(rgb(&renderer, 125, 46), (0, 0, 0));

    let path = scratch("png").join("page-1.png");
    renderer.save_png(&path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}
