//! dream-synth CLI entry point

use std::process::ExitCode;

use clap::Parser;

use dream_synth::cli::{
    app::{config_store, load_merged_config, production_mode, run_oneshot, EXIT_ERROR},
    args::{Cli, Commands, RunOptions, SessionOptions},
    config_cmd::handle_config_command,
    logging::init_logging,
    presenter::Presenter,
    run_session,
};
use dream_synth::domain::config::AppConfig;
use dream_synth::domain::locale::Locale;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = config_store();

    let command = match cli.command {
        Some(Commands::Config { action }) => {
            let presenter = Presenter::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        other => other,
    };

    // Build CLI config from args
    let cli_config = AppConfig {
        locale: cli.locale.map(|l| Locale::from(l).to_string()),
        ..Default::default()
    };

    let config = load_merged_config(&store, cli_config).await;
    let production = production_mode(cli.production);

    match command {
        Some(Commands::Run {
            file,
            no_image,
            image_out,
        }) => {
            let options = RunOptions {
                file,
                generate_image: !no_image,
                image_out,
            };
            run_oneshot(options, config, production).await
        }
        Some(Commands::Session { audio }) => {
            run_session(SessionOptions { audio }, config, production).await
        }
        Some(Commands::Config { .. }) | None => {
            run_session(SessionOptions { audio: None }, config, production).await
        }
    }
}
