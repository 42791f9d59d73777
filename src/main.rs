use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use vtx1_assembler::driver::{assemble, AssembleOptions};
use vtx1_assembler::listing;

/// Assembler for the VTX1 VLIW architecture.
#[derive(Parser, Debug)]
#[command(name = "vtx1-assembler", version, about)]
struct Cli {
    /// Source file to assemble.
    input: PathBuf,

    /// Output path for the raw binary image.
    #[arg(short, long, default_value = "a.out")]
    output: PathBuf,

    /// Write a listing to this path alongside the image.
    #[arg(short = 'l', long)]
    listing: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let source = match fs::read_to_string(&cli.input) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("error: failed to read {}: {err}", cli.input.display());
            return ExitCode::FAILURE;
        }
    };

    let opts = AssembleOptions { verbosity: cli.verbose };
    let outcome = assemble(&source, &opts);

    for diagnostic in &outcome.diagnostics {
        eprintln!("{diagnostic}");
    }

    if let Some(listing_path) = &cli.listing {
        let rendered = listing::render(&source, &outcome);
        if let Err(err) = fs::write(listing_path, rendered) {
            eprintln!("error: failed to write listing to {}: {err}", listing_path.display());
            return ExitCode::FAILURE;
        }
    }

    match outcome.image {
        Some(image) => {
            if let Err(err) = fs::write(&cli.output, image) {
                eprintln!("error: failed to write image to {}: {err}", cli.output.display());
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        None => ExitCode::FAILURE,
    }
}
