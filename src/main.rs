//! letter-permute - print every permutation of the letters in a string
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use letter_permute::cli::Args;
use letter_permute::processor::{Processor, ProcessorConfig};
use letter_permute::progress::print_error;

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging; RUST_LOG still wins when set
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    // Run the application
    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        for cause in e.chain().skip(1) {
            print_error(&format!("  Caused by: {}", cause));
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = ProcessorConfig::from_args(&args);
    log::debug!("Configuration: {:?}", config);

    let processor = Processor::new(config)?;
    let stats = processor.run(&args.input_source())?;

    log::debug!(
        "Wrote {} lines in {:?} ({:?})",
        stats.emitted_lines,
        stats.elapsed(),
        stats.stop_reason
    );

    Ok(())
}
