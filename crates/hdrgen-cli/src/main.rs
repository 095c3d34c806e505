//! hdrgen CLI
//!
//! Generates a C header declaring the public functions of a shared library
//! from the library's sources.

use anyhow::{Context, Result};
use clap::Parser;
use hdrgen_core::ExtractConfig;
use hdrgen_parser::collect_signatures;
use hdrgen_render::Renderer;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hdrgen")]
#[command(author, version, about = "Generate a C header from library sources", long_about = None)]
struct Cli {
    /// Shared library the header is for (e.g. libwrapper.so)
    #[arg(value_name = "LIBRARY")]
    library: String,

    /// Header file to write
    #[arg(value_name = "HEADER")]
    header: PathBuf,

    /// C and C++ sources to scan, in order
    #[arg(value_name = "SOURCE", required = true)]
    sources: Vec<PathBuf>,

    /// Extraction config (YAML, or JSON with a .json extension)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Leave parameter names out of the declarations
    #[arg(long)]
    strip_parameter_names: bool,

    /// Also write the rendered signatures as JSON
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Debug logging (overrides RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = err.print();
            return code;
        }
    };

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ExtractConfig::load(path)?,
        None => ExtractConfig::default(),
    };
    if cli.strip_parameter_names {
        config.strip_parameter_names = true;
    }

    let renderer = Renderer::new(&config)?;

    // Every source is read before anything is written
    let extraction = collect_signatures(&cli.sources, &config)?;
    let header = renderer.render(&extraction.signatures, &cli.library);

    info!(
        "Writing {} declarations for {} to {}",
        header.signatures.len(),
        header.library,
        cli.header.display()
    );
    std::fs::write(&cli.header, &header.text)
        .with_context(|| format!("Error writing header {}", cli.header.display()))?;

    if let Some(manifest) = &cli.manifest {
        let json = header.manifest_json()?;
        std::fs::write(manifest, json)
            .with_context(|| format!("Error writing manifest {}", manifest.display()))?;
    }

    Ok(())
}
