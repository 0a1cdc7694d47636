//! Turn text into a single connected outline for laser cutting.
//!
//! Prints the diagnostics as JSON and optionally writes an SVG.

use std::path::PathBuf;

use clap::Parser;
use glyph_outline::{BlockFont, FontFace, TtfFont};
use lettercut_engine::{generate_geometry, load_config, validate_config, write_svg};
use lettercut_types::ProcessingConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lettercut", about = "Generate connected cut geometry from text")]
struct Cli {
    /// TrueType/OpenType font file. The built-in block font is used when omitted.
    #[arg(long)]
    font: Option<PathBuf>,
    /// Text to lay out; use \n for line breaks
    #[arg(long)]
    text: String,
    /// Nominal size in layout units per em
    #[arg(long, default_value_t = 100.0)]
    size: f64,
    /// JSON processing config (camelCase fields)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    offset_mm: Option<f64>,
    #[arg(long)]
    letter_spacing_mm: Option<f64>,
    #[arg(long)]
    min_bridge_mm: Option<f64>,
    #[arg(long)]
    max_gap_mm: Option<f64>,
    #[arg(long)]
    no_auto_tighten: bool,
    #[arg(long)]
    no_force_bridge: bool,
    /// Write the processed geometry as SVG
    #[arg(long)]
    out: Option<PathBuf>,
}

impl Cli {
    fn processing_config(&self) -> Result<ProcessingConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => load_config(&std::fs::read_to_string(path)?)?,
            None => ProcessingConfig::default(),
        };
        if let Some(v) = self.offset_mm {
            config.offset_mm = v;
        }
        if let Some(v) = self.letter_spacing_mm {
            config.letter_spacing_mm = v;
        }
        if let Some(v) = self.min_bridge_mm {
            config.min_bridge_mm = v;
        }
        if let Some(v) = self.max_gap_mm {
            config.bridge_max_gap_mm = v;
        }
        if self.no_auto_tighten {
            config.auto_tighten = false;
        }
        if self.no_force_bridge {
            config.force_bridge_if_still_disconnected = Some(false);
        }
        validate_config(&config)?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.processing_config()?;
    let text = cli.text.replace("\\n", "\n");

    let font_data = match &cli.font {
        Some(path) => Some(std::fs::read(path)?),
        None => None,
    };
    let ttf = font_data.as_deref().map(TtfFont::parse).transpose()?;
    let block = BlockFont::new();
    let font: &dyn FontFace = match &ttf {
        Some(face) => face,
        None => &block,
    };

    let result = generate_geometry(&text, font, cli.size, &config);
    println!("{}", serde_json::to_string_pretty(&result.diagnostics)?);

    if let Some(out) = &cli.out {
        write_svg(&result, out)?;
    }
    Ok(())
}
