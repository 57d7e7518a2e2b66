mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::parser::ValueSource;
use clap::{CommandFactory, FromArgMatches};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let matches = Cli::command().get_matches();
    let output_defaulted = matches.value_source("output") == Some(ValueSource::DefaultValue);
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.global.verbose, cli.global.quiet);

    if let Err(err) = run(cli, output_defaulted).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, quiet: bool) {
    let filter = match (quiet, verbosity) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(mut cli: Cli, output_defaulted: bool) -> Result<(), CliError> {
    match cli.command {
        Command::Completions(args) => {
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "vatusa", &mut std::io::stdout());
            Ok(())
        }

        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        cmd => {
            let cfg = vatusa_config::load_config()?;
            if output_defaulted {
                cli.global.output = config::configured_output(&cfg)?;
            }
            let settings = config::build_settings(&cli.global, &cfg)?;
            let client = settings.connect()?;

            tracing::debug!(command = ?cmd, base_url = %client.base_url(), "dispatching command");
            commands::dispatch(cmd, &client, &cli.global).await
        }
    }
}
