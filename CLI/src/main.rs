// main.rs
use std::{io::Write, path::PathBuf};
use umbrella::{GeneratorConfig, Generator, TraversalOrder};
use clap::Parser;
use ::log::{debug, info};
use owo_colors::OwoColorize;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use anyhow::Context;

mod log;
use crate::log::setup_logger;

#[derive(Parser)]
#[command(name = "generate-top-header")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate a library's top-level umbrella header from its source tree")]
pub struct UmbrellaCli {
    /// Root of the source checkout; headers are read from <SOURCE_DIR>/<LIBRARY>
    pub source_dir: PathBuf,

    /// Directory that receives <LIBRARY>.h (created if missing; ignored with --stdout)
    pub target_dir: PathBuf,

    /// Library name used for the subdirectory, include prefix and guard
    #[arg(short, long)]
    pub library: Option<String>,

    /// TOML file with generator settings
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Sibling order for discovered headers
    #[arg(long, value_name = "sorted|filesystem")]
    pub order: Option<TraversalOrder>,

    /// Directory name to skip at any depth (repeatable, replaces the defaults)
    #[arg(long = "exclude", value_name = "DIR")]
    pub exclude: Vec<String>,

    /// Write the header in place instead of through a temporary file
    #[arg(long)]
    pub no_atomic: bool,

    /// Print the generated header instead of writing it (TARGET_DIR is then unused)
    #[arg(long)]
    pub stdout: bool,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

impl UmbrellaCli {
    fn resolve_config(&self) -> anyhow::Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::default(),
        };

        if let Some(library) = &self.library {
            config.library = library.clone();
        }
        if let Some(order) = self.order {
            config.order = order;
        }
        if !self.exclude.is_empty() {
            config.exclude_dirs = self.exclude.clone();
        }
        if self.no_atomic {
            config.atomic_write = false;
        }

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = UmbrellaCli::parse();

    setup_logger(args.verbose.log_level_filter())?;

    let config = args.resolve_config()?;
    debug!("Resolved configuration: {:?}", config);

    let generator = Generator::new(config)?;

    if args.stdout {
        let (document, _) = generator.render(&args.source_dir).with_context(|| {
            format!("Failed to render header from {}", args.source_dir.display())
        })?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(document.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    info!(
        "Generating {} from {}",
        generator.output_path(&args.target_dir).display(),
        generator.library_root(&args.source_dir).display()
    );

    let report = generator
        .generate(&args.source_dir, &args.target_dir)
        .with_context(|| format!("Failed to generate {}", generator.config().umbrella_file_name()))?;

    eprintln!(
        "{} {} ({} header{})",
        "Generated".bold().green(),
        report.output.display(),
        report.headers.len(),
        if report.headers.len() == 1 { "" } else { "s" }
    );

    Ok(())
}
