/// Terminal front end: quote a model file from the command line
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use quote3d_core::{LengthUnit, QuoteConfig, QuotePipeline, QuoteRequest, QuoteSummary};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod report;

pub use report::ReportPrinter;

/// Estimate the print price of a 3D model
#[derive(Debug, Parser)]
#[command(name = "quote3d", version, long_about = None)]
pub struct Cli {
    /// Model file (.stl or .obj)
    #[arg(name = "FILE")]
    pub file: Option<PathBuf>,

    /// Quote a box of LENGTH WIDTH HEIGHT millimeters instead of a file
    #[arg(long, num_args = 3, value_names = ["LENGTH", "WIDTH", "HEIGHT"], conflicts_with = "FILE")]
    pub dimensions: Option<Vec<f64>>,

    /// Material name from the price table
    #[arg(short, long, default_value = "PLA")]
    pub material: String,

    /// Linear scale in percent
    #[arg(short, long, default_value_t = 100.0)]
    pub scale: f64,

    /// Number of parts
    #[arg(short, long, default_value_t = 1)]
    pub quantity: u32,

    /// Unit of the model coordinates (mm, cm, in)
    #[arg(short, long)]
    pub unit: Option<LengthUnit>,

    /// Unit for reported dimensions (mm, cm, in)
    #[arg(long)]
    pub display_unit: Option<LengthUnit>,

    /// JSON file overriding the default configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the quote as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    fn request(&self) -> QuoteRequest {
        QuoteRequest::new(self.material.clone(), self.scale, self.quantity)
    }

    fn load_config(&self) -> Result<QuoteConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                QuoteConfig::from_json_str(&text)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => QuoteConfig::default(),
        };
        if let Some(unit) = self.unit {
            config.source_unit = unit;
        }
        if let Some(unit) = self.display_unit {
            config.display_unit = unit;
        }
        Ok(config)
    }
}

/// Quote a model file, or a box when no file is given
pub fn quote(cli: &Cli) -> Result<(String, QuoteSummary)> {
    let pipeline = QuotePipeline::new(cli.load_config()?)?;
    let request = cli.request();

    match (&cli.file, &cli.dimensions) {
        (Some(path), _) => {
            let data = fs::read(path)
                .with_context(|| format!("failed to read model {}", path.display()))?;
            let name = display_name(path);
            info!("quoting {name} ({} bytes)", data.len());
            let summary = pipeline
                .run(&name, &data, &request)
                .with_context(|| format!("failed to quote {}", path.display()))?;
            Ok((name, summary))
        }
        (None, Some(dims)) => {
            let summary = pipeline.quote_dimensions(dims[0], dims[1], dims[2], &request)?;
            Ok((format!("{} x {} x {} mm box", dims[0], dims[1], dims[2]), summary))
        }
        (None, None) => anyhow::bail!("provide a model FILE or --dimensions LENGTH WIDTH HEIGHT"),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Run the command and write its output
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let (name, summary) = quote(cli)?;

    if cli.json {
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
    } else {
        ReportPrinter::new(!cli.no_color).print(out, &name, &summary)?;
    }
    Ok(())
}
