//! Generates floating-point literal fixtures.
//!
//! Prints one verification directive per value, a blank line, then one instruction per value
//! materializing it.

use clap::Parser;
use log::warn;

use absint_testkit::float::{Fixture, ALPHABET, DEFAULT_DIRECTIVE, DEFAULT_VALUES};

#[derive(Debug, Parser)]
#[command(author, version, about = "Generate bit-exact floating-point literal fixtures")]
struct Cli {
    /// Values to encode (default: signed ones, twos, zeros, infinities and smallest subnormals).
    #[arg(value_name = "FLOAT", allow_negative_numbers = true)]
    values: Vec<f64>,

    /// Prefix of each verification directive.
    #[arg(long, value_name = "TEXT", default_value = DEFAULT_DIRECTIVE)]
    directive: String,

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

    let values = if args.values.is_empty() {
        DEFAULT_VALUES.to_vec()
    } else {
        args.values
    };

    let fixture = Fixture::new(&args.directive, ALPHABET, &values);
    if fixture.len() < values.len() {
        warn!(
            "only {} identifiers available, dropping {} values",
            fixture.len(),
            values.len() - fixture.len()
        );
    }

    print!("{}", fixture);

    Ok(())
}
