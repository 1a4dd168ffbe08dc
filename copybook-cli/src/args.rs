//! Command-line arguments.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use copybook_paint::{GridStyle, Margins, Mode, Orientation, PageSize, SheetConfig, Unit};
use copybook_stroke::{IndexedStrokeStore, MemoryStrokeStore, StrokeStore};

/// Copybook - printable handwriting practice sheets
#[derive(Parser, Debug)]
#[command(name = "copybook")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Tian-grid sheet, one character per row
    copybook render --characters 永和九年 -o sheets/

    # Stroke-order sheet from a stroke source, cached in an index
    copybook render --mode stroke --characters 永 --source strokes.jsonl --index strokes.idx -o sheets/

    # Build the index once, then look characters up
    copybook import --source strokes.jsonl --index strokes.idx
    copybook lookup --index strokes.idx 永

    # Inspect the drawing commands
    copybook dump --config sheet.json --pretty
"#)]
pub struct Cli {
    /// More logging (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a sheet to PNG files, one per page
    Render {
        #[command(flatten)]
        sheet: SheetArgs,

        #[command(flatten)]
        store: StoreArgs,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// Pixels per point (72 points per inch)
        #[arg(long, default_value = "2.0")]
        scale: f32,

        /// File name prefix; pages are written as PREFIX-001.png, ...
        #[arg(long, default_value = "page")]
        prefix: String,
    },
    /// Build a stroke index from a stroke source
    Import {
        /// Stroke source (JSON lines)
        #[arg(long, value_name = "FILE")]
        source: PathBuf,

        /// Index file to write
        #[arg(long, value_name = "FILE")]
        index: PathBuf,
    },
    /// Print the stroke descriptions of characters
    Lookup {
        #[command(flatten)]
        store: StoreArgs,

        /// Characters to look up
        #[arg(required = true)]
        characters: Vec<String>,
    },
    /// Print the display list of a sheet as JSON
    Dump {
        #[command(flatten)]
        sheet: SheetArgs,

        #[command(flatten)]
        store: StoreArgs,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Sheet configuration: a JSON file plus per-field overrides.
#[derive(Args, Debug, Default)]
pub struct SheetArgs {
    /// Sheet configuration (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Characters to practise
    #[arg(long)]
    pub characters: Option<String>,

    /// Rows per page
    #[arg(long)]
    pub rows: Option<usize>,

    /// Cells per row
    #[arg(long)]
    pub columns: Option<usize>,

    /// What fills the sheet
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Cell ruling
    #[arg(long, value_enum)]
    pub grid: Option<GridArg>,

    /// Fraction of a cell used by content
    #[arg(long)]
    pub fill_scale: Option<f32>,

    /// Explicit content inset per cell, in points
    #[arg(long)]
    pub cell_margin: Option<f32>,

    /// Font file for guide characters
    #[arg(long, value_name = "FILE")]
    pub font: Option<PathBuf>,

    /// Paper size
    #[arg(long, value_enum)]
    pub page: Option<PageArg>,

    /// Landscape orientation
    #[arg(long)]
    pub landscape: bool,

    /// Page margin on every side, in millimetres
    #[arg(long, value_name = "MM")]
    pub margin: Option<f32>,
}

impl SheetArgs {
    /// Load the configuration file (if any), apply overrides and validate.
    pub fn resolve(&self) -> Result<SheetConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config '{}'", path.display()))?;
                serde_json::from_str(&text).with_context(|| format!("invalid config '{}'", path.display()))?
            }
            None => SheetConfig::default(),
        };
        self.apply(&mut config);
        config.validate().context("unusable sheet configuration")?;
        Ok(config)
    }

    fn apply(&self, config: &mut SheetConfig) {
        if let Some(characters) = &self.characters {
            config.characters.clone_from(characters);
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if let Some(grid) = self.grid {
            config.grid_style = grid.into();
        }
        if let Some(fill_scale) = self.fill_scale {
            config.fill_scale = fill_scale;
        }
        if self.cell_margin.is_some() {
            config.cell_margin = self.cell_margin;
        }
        if let Some(font) = &self.font {
            config.font = Some(font.clone());
        }
        if let Some(page) = self.page {
            config.page.size = page.into();
        }
        if self.landscape {
            config.page.orientation = Orientation::Landscape;
        }
        if let Some(margin) = self.margin {
            config.page.margins = Margins::uniform(margin);
            config.page.unit = Unit::Mm;
        }
    }
}

/// Stroke store selection.
#[derive(Args, Debug, Default)]
pub struct StoreArgs {
    /// Stroke source (JSON lines)
    #[arg(long, value_name = "FILE")]
    pub source: Option<PathBuf>,

    /// Stroke index; built from --source when missing or outdated
    #[arg(long, value_name = "FILE")]
    pub index: Option<PathBuf>,
}

impl StoreArgs {
    /// Open the selected store, or `None` when neither option is given.
    pub fn open(&self) -> Result<Option<Arc<dyn StrokeStore>>> {
        let store: Arc<dyn StrokeStore> = match (&self.source, &self.index) {
            (None, None) => return Ok(None),
            (Some(source), None) => Arc::new(
                MemoryStrokeStore::open(source)
                    .with_context(|| format!("failed to load strokes from '{}'", source.display()))?,
            ),
            (None, Some(index)) => Arc::new(
                IndexedStrokeStore::open(index)
                    .with_context(|| format!("failed to open stroke index '{}'", index.display()))?,
            ),
            (Some(source), Some(index)) => Arc::new(
                IndexedStrokeStore::open_or_build(index, source)
                    .with_context(|| format!("failed to build stroke index '{}'", index.display()))?,
            ),
        };
        log::info!("stroke store holds {} characters", store.len());
        Ok(Some(store))
    }

    /// Like [`open`](Self::open) but a store is required.
    pub fn require(&self) -> Result<Arc<dyn StrokeStore>> {
        match self.open()? {
            Some(store) => Ok(store),
            None => bail!("a stroke store is needed: pass --source and/or --index"),
        }
    }
}

/// `--mode` values.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// One character per row
    Line,
    /// One character per page
    Page,
    /// Stroke order, one character per page
    Stroke,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Line => Self::LinePerCharacter,
            ModeArg::Page => Self::PagePerCharacter,
            ModeArg::Stroke => Self::Stroke,
        }
    }
}

/// `--grid` values.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GridArg {
    /// Crosshair in every cell
    Tian,
    /// Four horizontal lines
    FourLine,
}

impl From<GridArg> for GridStyle {
    fn from(arg: GridArg) -> Self {
        match arg {
            GridArg::Tian => Self::Tian,
            GridArg::FourLine => Self::FourLine,
        }
    }
}

/// `--page` values.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PageArg {
    /// 297 × 420 mm
    A3,
    /// 210 × 297 mm
    A4,
    /// 148 × 210 mm
    A5,
    /// 8.5 × 11 in
    Letter,
    /// 8.5 × 14 in
    Legal,
}

impl From<PageArg> for PageSize {
    fn from(arg: PageArg) -> Self {
        match arg {
            PageArg::A3 => Self::A3,
            PageArg::A4 => Self::A4,
            PageArg::A5 => Self::A5,
            PageArg::Letter => Self::Letter,
            PageArg::Legal => Self::Legal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win_over_defaults() {
        let args = SheetArgs {
            characters: Some("永".to_string()),
            rows: Some(3),
            mode: Some(ModeArg::Stroke),
            grid: Some(GridArg::FourLine),
            page: Some(PageArg::Letter),
            landscape: true,
            margin: Some(10.0),
            ..SheetArgs::default()
        };
        let config = args.resolve().unwrap();

        assert_eq!(config.characters, "永");
        assert_eq!(config.rows, 3);
        assert_eq!(config.columns, SheetConfig::default().columns);
        assert_eq!(config.mode, Mode::Stroke);
        assert_eq!(config.grid_style, GridStyle::FourLine);
        assert_eq!(config.page.page_dimensions(), (792.0, 612.0));
        assert_eq!(config.page.margins.left, 10.0);
    }

    #[test]
    fn test_missing_characters_rejected() {
        assert!(SheetArgs::default().resolve().is_err());
    }

    #[test]
    fn test_no_store_selected() {
        assert!(StoreArgs::default().open().unwrap().is_none());
        assert!(StoreArgs::default().require().is_err());
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from(["copybook", "-vv", "lookup", "--index", "x.idx", "永", "和"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Lookup { ref characters, .. } if characters.len() == 2));
    }
}
