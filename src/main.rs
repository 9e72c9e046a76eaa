mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the tracing subscriber. `--verbose` forces debug output for
/// jxlint; otherwise `RUST_LOG` applies, defaulting to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("jxlint=debug,jxlint_common=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jxlint=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Some(Commands::Rules {
            names,
            list,
            markdown,
        }) => cli::rules::run_rules(&jxlint::builtin_registry(), names, *list, *markdown),
        Some(Commands::Config { command }) => cli::config::run_config(command),
        None => cli::lint::run_lint(&cli),
    }
}
