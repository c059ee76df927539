//! mdtex CLI - `TikZ` code block renderer.
//!
//! Provides commands for:
//! - `render`: Render one `TikZ` block to an inline SVG fragment
//! - `check`: Verify the external toolchain is installed

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, RenderArgs};
use output::Output;

/// mdtex - `TikZ` to theme-aware SVG.
#[derive(Parser)]
#[command(name = "mdtex", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a `TikZ` block to an HTML fragment.
    Render(RenderArgs),
    /// Check that the `TeX` toolchain is available.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to ERROR.
    // Compiler failures are already reported on stderr by the formatter.
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
