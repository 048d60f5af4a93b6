//! Outfitter CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use console::style;
use outfitter::config::Config;
use outfitter::summary;
use outfitter::tasks::standard_pipeline;
use outfitter::ui::TerminalPrompt;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "outfitter",
    version,
    about = "Provision the scientific computing toolchain"
)]
struct Cli {
    /// Raise log detail from informational to debug.
    #[arg(short, long)]
    verbose: bool,

    /// Path to a provisioning manifest (JSON). Defaults to the built-in
    /// manifest.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `-v`/`--verbose` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("outfitter=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("outfitter=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> outfitter::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let mut prompt = TerminalPrompt::new();
    let report = standard_pipeline().run(&config, &mut prompt)?;

    println!();
    println!("{}", style(report.summary()).green().bold());
    println!();
    print!("{}", summary::render(&config));

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    tracing::debug!("starting with args: {:?}", cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            ExitCode::from(e.exit_code().clamp(1, 255) as u8)
        }
    }
}
