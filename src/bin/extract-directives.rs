//! Prints the directive payloads of an annotated test file, one per line.

use std::path::PathBuf;

use clap::Parser;
use log::debug;

use absint_testkit::directive::{extract_file, Marker, DEFAULT_MARKER};

#[derive(Debug, Parser)]
#[command(author, version, about = "Extract embedded directives from an annotated test file")]
struct Cli {
    /// Annotated test file.
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Marker token introducing a directive (matched as `<TOKEN>:`).
    #[arg(long, value_name = "TOKEN", default_value = DEFAULT_MARKER)]
    marker: String,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Warn
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let payloads = extract_file(&args.file, &Marker::new(args.marker))?;
    debug!("{} directives in {}", payloads.len(), args.file.display());

    for payload in payloads {
        println!("{}", payload);
    }

    Ok(())
}
