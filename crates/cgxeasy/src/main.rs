mod cli;
mod commands;
mod config;
mod error;
mod output;
mod shell;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cgxeasy_core::Session;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
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

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a controller connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "cgxeasy", &mut std::io::stdout());
            Ok(())
        }

        // Everything else needs an authenticated session
        cmd => {
            let cfg = cgxeasy_config::load_config_or_default();
            let profile_name = config::active_profile_name(&cli.global, &cfg);
            let controller_config = config::build_controller_config(&cli.global, &cfg)?;
            let url = controller_config.url.to_string();

            let session = Session::new(controller_config);
            session.connect().await.map_err(|e| match CliError::from(e) {
                CliError::AuthFailed { message, .. } => CliError::AuthFailed {
                    profile: profile_name,
                    message,
                },
                other => other,
            })?;
            tracing::debug!(%url, "session established");

            commands::dispatch(cmd, &session, &cli.global).await
        }
    }
}
