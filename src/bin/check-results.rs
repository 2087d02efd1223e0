//! Checks an analyzer result dump (`<identifier> -> <value>` per line).
//!
//! Outcomes are reported as text only and the exit status is 0, unless `--strict` is given,
//! in which case a mismatch or a missing target exits with status 1.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use colored::{ColoredString, Colorize};

use absint_testkit::checker::{check_file, Diagnostic, Expectation};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Check analyzer results against an expected value")]
struct Cli {
    /// Result dump to check.
    #[arg(value_name = "RESULTS")]
    results: PathBuf,

    /// Identifier whose value is checked.
    #[arg(value_name = "TARGET", requires = "expected")]
    target: Option<String>,

    /// Expected value of TARGET.
    #[arg(value_name = "EXPECTED", requires = "target")]
    expected: Option<String>,

    /// Exit with status 1 when the target mismatches or is missing.
    #[arg(long)]
    strict: bool,

    /// When to color the output.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn paint(diagnostic: &Diagnostic) -> ColoredString {
    let text = diagnostic.to_string();
    match diagnostic {
        Diagnostic::Bottom { .. } => text.yellow(),
        Diagnostic::TopOverride { .. } => text.cyan(),
        Diagnostic::Match { .. } => text.green(),
        Diagnostic::Mismatch { .. } | Diagnostic::TargetMissing { .. } => text.red().bold(),
    }
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

    match args.color {
        ColorMode::Auto => {}
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
    }

    let expectation = match (args.target, args.expected) {
        (Some(target), Some(expected)) => Some(Expectation::new(target, expected)),
        _ => None,
    };

    let report = check_file(&args.results, expectation)?;
    for diagnostic in &report.diagnostics {
        println!("{}", paint(diagnostic));
    }

    if args.strict && report.verdict().is_failure() {
        std::process::exit(1);
    }

    Ok(())
}
