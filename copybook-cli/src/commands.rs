//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result};
use copybook_common::Point;
use copybook_paint::{CopybookPainter, Document, Mode, PaintSummary, RecordingCanvas, SheetConfig};
use copybook_render::{PageFrame, Renderer, resolve_font};
use copybook_stroke::{IndexedStrokeStore, StrokeStore};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::args::{SheetArgs, StoreArgs};

/// A painted sheet: the config it came from and its recorded pages.
struct Sheet {
    config: SheetConfig,
    summary: PaintSummary,
    document: Document,
}

/// Resolve the configuration and paint it onto a recording canvas.
fn paint_sheet(sheet: &SheetArgs, store: &StoreArgs) -> Result<Sheet> {
    let config = sheet.resolve()?;

    let mut painter = CopybookPainter::new(config.clone());
    if config.mode == Mode::Stroke {
        painter = painter.with_store(store.require()?);
    } else if let Some(store) = store.open()? {
        painter = painter.with_store(store);
    }

    let area = config.page.paint_area()?;
    let mut canvas = RecordingCanvas::new(area.width, area.height);
    let summary = painter.paint(&mut canvas).context("failed to paint sheet")?;

    let mut document = canvas.into_document();
    document.pages.truncate(summary.pages);
    report(&summary);

    Ok(Sheet {
        config,
        summary,
        document,
    })
}

fn report(summary: &PaintSummary) {
    if !summary.skipped_characters.is_empty() {
        eprintln!(
            "{} skipped {}: {}",
            "warning:".yellow().bold(),
            plural(summary.skipped_characters.len(), "character"),
            summary.skipped_characters.join(" ")
        );
    }
    if summary.skipped_strokes > 0 {
        eprintln!(
            "{} left out {}",
            "warning:".yellow().bold(),
            plural(summary.skipped_strokes, "malformed stroke")
        );
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 { format!("1 {noun}") } else { format!("{count} {noun}s") }
}

/// `copybook render`
pub fn render(sheet: &SheetArgs, store: &StoreArgs, output: &Path, scale: f32, prefix: &str) -> Result<()> {
    let Sheet {
        config,
        summary,
        document,
    } = paint_sheet(sheet, store)?;

    if summary.pages == 0 {
        eprintln!("{} nothing to render", "warning:".yellow().bold());
        return Ok(());
    }

    // Only text modes draw glyphs.
    let font = if config.mode == Mode::Stroke {
        None
    } else {
        resolve_font(config.font.as_deref())?
    };

    let area = config.page.paint_area()?;
    let (width, height) = config.page.page_dimensions();
    let frame = PageFrame {
        width,
        height,
        origin: Point::new(area.x, area.y),
    };
    let mut renderer = Renderer::new(frame, scale)?.with_font(font);

    std::fs::create_dir_all(output).with_context(|| format!("failed to create '{}'", output.display()))?;
    for (index, page) in document.pages.iter().enumerate() {
        renderer.clear();
        renderer.render(page);
        let path = output.join(format!("{prefix}-{:03}.png", index + 1));
        renderer.save_png(&path)?;
        log::info!("wrote {}", path.display());
    }

    println!(
        "{} {} ({}×{} px) to {}",
        "Wrote".green().bold(),
        plural(summary.pages, "page"),
        renderer.width(),
        renderer.height(),
        output.display()
    );
    Ok(())
}

/// `copybook import`
pub fn import(source: &Path, index: &Path) -> Result<()> {
    let store = IndexedStrokeStore::new(index);
    let count = store
        .load(source)
        .with_context(|| format!("failed to import '{}'", source.display()))?;
    println!(
        "{} {} into {}",
        "Indexed".green().bold(),
        plural(count, "character"),
        index.display()
    );
    Ok(())
}

/// `copybook lookup`
pub fn lookup(store: &StoreArgs, characters: &[String]) -> Result<()> {
    let store = store.require()?;
    for ch in characters.iter().flat_map(|s| s.chars()).filter(|c| !c.is_whitespace()) {
        print_strokes(store.as_ref(), ch);
    }
    Ok(())
}

fn print_strokes(store: &dyn StrokeStore, ch: char) {
    let strokes = store.lookup(ch);
    if strokes.is_empty() {
        println!("{} {}", ch.bold(), "(no strokes)".dimmed());
        return;
    }
    println!("{} {}", ch.bold(), plural(strokes.len(), "stroke").dimmed());
    for (index, stroke) in strokes.iter().enumerate() {
        println!("  {index:>2}  {stroke}");
    }
}

#[derive(Serialize)]
struct Dump<'a> {
    summary: &'a PaintSummary,
    document: &'a Document,
}

/// `copybook dump`
pub fn dump(sheet: &SheetArgs, store: &StoreArgs, pretty: bool, output: Option<&Path>) -> Result<()> {
    let painted = paint_sheet(sheet, store)?;
    let dump = Dump {
        summary: &painted.summary,
        document: &painted.document,
    };
    let json = if pretty {
        serde_json::to_string_pretty(&dump)?
    } else {
        serde_json::to_string(&dump)?
    };

    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("failed to write '{}'", path.display()))?;
        }
        None => println!("{json}"),
    }
    Ok(())
}
