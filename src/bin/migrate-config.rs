//! Rewrites a legacy directive block into per-key `config.<key> = <value>` directives.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use log::info;

use absint_testkit::directive::{Marker, DEFAULT_MARKER};
use absint_testkit::domain::DomainRegistry;
use absint_testkit::migrate::{migrate, migrate_file};

#[derive(Debug, Parser)]
#[command(author, version, about = "Migrate a legacy configuration block in place")]
struct Cli {
    /// Test file to rewrite.
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Marker token introducing a directive (matched as `<TOKEN>:`).
    #[arg(long, value_name = "TOKEN", default_value = DEFAULT_MARKER)]
    marker: String,

    /// Print the migrated file instead of rewriting it.
    #[arg(long)]
    dry_run: bool,

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

    let marker = Marker::new(args.marker);
    let registry = DomainRegistry::builtin();

    if args.dry_run {
        let text = fs::read_to_string(&args.file).wrap_err_with(|| format!("reading {}", args.file.display()))?;
        let migration = migrate(&text, &marker, &registry).wrap_err_with(|| format!("migrating {}", args.file.display()))?;
        print!("{}", migration.text);
    } else {
        let migration =
            migrate_file(&args.file, &marker, &registry).wrap_err_with(|| format!("migrating {}", args.file.display()))?;
        info!(
            "{}: {} keys, domains {:?}",
            args.file.display(),
            migration.keys.len(),
            migration.domains
        );
    }

    Ok(())
}
