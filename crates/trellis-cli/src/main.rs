//! Trellis CLI - browse, validate and render story catalogs.

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use trellis_catalog::Catalog;
use trellis_core::{Constraints, Rect, RecordingCanvas, Widget};

#[derive(Parser)]
#[command(name = "trellis")]
#[command(about = "Browse, validate and render Trellis widget stories")]
#[command(version)]
struct Cli {
    /// Catalog file to use instead of the built-in stories
    #[arg(long, global = true, env = "TRELLIS_CATALOG")]
    catalog: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List components and their stories
    List,

    /// Validate a catalog file
    Check {
        /// Path to catalog file
        path: PathBuf,
    },

    /// Paint a story and print the draw commands
    Render {
        /// Component title, short name or kind (e.g. data-table)
        component: String,

        /// Story name
        story: String,

        /// Viewport width
        #[arg(long, default_value = "800")]
        width: f32,

        /// Viewport height
        #[arg(long, default_value = "600")]
        height: f32,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One summary line per command
    Text,
    /// Pretty-printed JSON array
    Json,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string()),
        ))
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::List => {
            let catalog = open_catalog(cli.catalog.as_deref())?;
            list(&catalog, &mut out)
        }
        Commands::Check { path } => check(&path, &mut out),
        Commands::Render {
            component,
            story,
            width,
            height,
            format,
        } => {
            let catalog = open_catalog(cli.catalog.as_deref())?;
            render(&catalog, &component, &story, (width, height), format, &mut out)
        }
    }
}

fn open_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("could not open catalog {}", path.display())),
        None => Catalog::builtin().context("built-in catalog is invalid"),
    }
}

fn list(catalog: &Catalog, out: &mut impl Write) -> Result<()> {
    for component in catalog.components() {
        writeln!(out, "{} ({})", component.title, component.kind.slug())?;
        for story in &component.stories {
            writeln!(out, "  {}", story.name)?;
        }
    }
    Ok(())
}

fn check(path: &Path, out: &mut impl Write) -> Result<()> {
    let catalog =
        Catalog::load(path).with_context(|| format!("{} is not a valid catalog", path.display()))?;
    writeln!(
        out,
        "Catalog valid: {} components, {} stories",
        catalog.components().len(),
        catalog.story_count()
    )?;
    Ok(())
}

fn render(
    catalog: &Catalog,
    component: &str,
    story: &str,
    (width, height): (f32, f32),
    format: Format,
    out: &mut impl Write,
) -> Result<()> {
    ensure!(
        width.is_finite() && width >= 0.0 && height.is_finite() && height >= 0.0,
        "viewport must be finite and non-negative, got {width}x{height}"
    );
    let mut widget = catalog.story(component, story)?.build();
    let size = widget.measure(Constraints::new(width, width, 0.0, height));
    widget.layout(Rect::new(0.0, 0.0, size.width, size.height));

    let mut canvas = RecordingCanvas::new();
    widget.paint(&mut canvas);
    tracing::info!(
        component,
        story,
        commands = canvas.command_count(),
        "rendered story"
    );

    match format {
        Format::Text => {
            for command in canvas.commands() {
                writeln!(out, "{}", command.summary())?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, canvas.commands())?;
            writeln!(out)?;
        }
    }
    Ok(())
}
