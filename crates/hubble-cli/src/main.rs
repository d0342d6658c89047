//! hubble CLI - legal timeline renderer
//!
//! Command-line interface for validating timeline datasets and rendering
//! them as SVG, HTML, JSON or Mermaid charts.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use hubble_core::{Renderer, TimelineDataset, VisualizationDirective};
use hubble_render::{
    classify, HtmlRenderer, JsonRenderer, LayoutConfig, MermaidRenderer, SvgRenderer,
    TimelineChart,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "hubble")]
#[command(author, version, about = "Legal timeline renderer", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a dataset file
    Check {
        /// Dataset JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Render a dataset to a chart
    Render {
        /// Dataset JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Re-render a dataset's events with a replacement visualization directive
    Restyle {
        /// Dataset JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Visualization directive JSON file
        #[arg(short, long, value_name = "DIRECTIVE")]
        directive: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "svg", env = "HUBBLE_FORMAT")]
    format: Format,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 1600.0, env = "HUBBLE_WIDTH", value_parser = parse_width)]
    width: f64,

    /// Color theme
    #[arg(long, value_enum, default_value = "light", env = "HUBBLE_THEME")]
    theme: Theme,

    /// Shorthand for --theme dark
    #[arg(long)]
    dark: bool,
}

/// Width must leave room for a plot right of the label column
fn parse_width(s: &str) -> std::result::Result<f64, String> {
    let width: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    let layout = LayoutConfig::default();
    let reserved = layout.label_width + layout.margin_right;
    if !width.is_finite() || width <= reserved {
        return Err(format!("width must be a finite number above {}", reserved));
    }
    Ok(width)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Html,
    Json,
    Mermaid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Theme {
    Light,
    Dark,
}

impl OutputArgs {
    fn chart(&self) -> TimelineChart {
        let chart = TimelineChart::new().width(self.width);
        if self.dark || self.theme == Theme::Dark {
            chart.dark_theme()
        } else {
            chart
        }
    }

    fn render(&self, dataset: &TimelineDataset) -> Result<String> {
        let chart = self.chart();
        let rendered = match self.format {
            Format::Svg => SvgRenderer::new().chart(chart).render(dataset),
            Format::Html => HtmlRenderer::new().chart(chart).render(dataset),
            Format::Json => JsonRenderer::new().chart(chart).render(dataset),
            Format::Mermaid => MermaidRenderer {
                chart,
                ..MermaidRenderer::default()
            }
            .render(dataset),
        };
        rendered.with_context(|| format!("Failed to render '{}'", dataset.case.name))
    }

    fn emit(&self, content: &str) -> Result<()> {
        match &self.output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::info!(path = %path.display(), format = ?self.format, "chart written");
            }
            None => print!("{}", content),
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    match cli.command {
        Commands::Check { file } => check(&file),
        Commands::Render { file, output } => {
            let dataset = load_dataset(&file)?;
            output.emit(&output.render(&dataset)?)
        }
        Commands::Restyle {
            file,
            directive,
            output,
        } => {
            let dataset = load_dataset(&file)?;
            let directive = load_directive(&directive)?;
            let restyled = dataset.with_visualization(Some(directive));
            output.emit(&output.render(&restyled)?)
        }
    }
}

fn check(file: &Path) -> Result<()> {
    let dataset = load_dataset(file)?;
    let dated = dataset
        .dated_events()
        .with_context(|| format!("Invalid dataset {}", file.display()))?;
    let classified = classify(&dated);

    // Full composition catches empty bar sets after directive filters
    let chart = TimelineChart::new()
        .compose(&dataset)
        .with_context(|| format!("Dataset {} cannot be charted", file.display()))?;

    println!("Checking: {}", file.display());
    println!("  case:       {}", dataset.case.name);
    println!(
        "  events:     {} ({} bars, {} milestones)",
        dataset.events.len(),
        classified.intervals.len(),
        classified.points.len()
    );
    println!("  subjects:   {}", chart.meta.subject_count);
    println!("  highlights: {}", chart.meta.highlighted.len());
    println!("OK");
    Ok(())
}

fn load_dataset(path: &Path) -> Result<TimelineDataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let dataset: TimelineDataset = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse dataset {}", path.display()))?;
    tracing::debug!(events = dataset.events.len(), "dataset loaded");
    Ok(dataset)
}

fn load_directive(path: &Path) -> Result<VisualizationDirective> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse directive {}", path.display()))
}
