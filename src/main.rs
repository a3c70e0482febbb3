use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;

use sidedoc::config::{Config, FigureOrder};
use sidedoc::{ExportFormat, aggregate, export, extract_with_options, load_document, logging};

/// Compare Word documents section by section
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// .docx files to compare, in column order
    #[arg(required_unless_present = "init_config")]
    files: Vec<PathBuf>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Save every decoded figure as PNG under this directory
    #[arg(long)]
    figures_dir: Option<PathBuf>,

    /// Paragraph style prefix that marks a section heading
    #[arg(long)]
    heading_prefix: Option<String>,

    /// Drop paragraphs that are empty after trimming
    #[arg(long)]
    skip_empty_paragraphs: bool,

    /// Order figures by relationship ID instead of package order
    #[arg(long)]
    sort_figures: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the default configuration file and exit
    #[arg(long)]
    init_config: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    if cli.init_config {
        match Config::init_default()? {
            Some(path) => println!("Wrote default config to {}", path.display()),
            None => bail!("No configuration directory available on this platform"),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => Config::load()?,
    };
    apply_overrides(&mut config, &cli);

    let mut titles = Vec::with_capacity(cli.files.len());
    let mut trees = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        // One bad document aborts the comparison rather than dropping a column
        let document = load_document(path)
            .await
            .with_context(|| format!("Failed to load {}", path.display()))?;
        let tree = extract_with_options(&document, &config.extract)
            .with_context(|| format!("Failed to extract sections from {}", path.display()))?;

        titles.push(document.title);
        trees.push(tree);
    }

    let view = aggregate(&trees);

    if let Some(dir) = &cli.figures_dir {
        let written = export::save_figures(&view, dir)?;
        tracing::info!(count = written.len(), dir = %dir.display(), "saved figures");
    }

    let rendered = export::export(&view, &titles, &config.output)?;
    match &cli.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{rendered}"),
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(prefix) = &cli.heading_prefix {
        config.extract.heading_style_prefix = prefix.clone();
    }
    if cli.skip_empty_paragraphs {
        config.extract.keep_empty_paragraphs = false;
    }
    if cli.sort_figures {
        config.extract.figure_order = FigureOrder::Id;
    }
}
