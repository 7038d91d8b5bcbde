//! CLI entry point: settings resolution, logging and command dispatch.

use std::time::Duration;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use watchtalk_cli::handlers::{self, ask::AskArgs, config::SetArgs, hold::HoldArgs};
use watchtalk_cli::{Cli, CliConfig, CliError, Commands, ConfigCommand};
use watchtalk_voice::VideoContext;

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads WATCHTALK_*
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        std::process::exit(code);
    }
}

/// Logs go to stderr so command output stays pipeable.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli);

    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Embed {
            content_id,
            page_origin,
        } => {
            let settings = config.effective_settings()?;
            handlers::embed::execute(&settings, &content_id, page_origin)?;
        }
        Commands::Ask {
            question,
            video_id,
            title,
            recognition_error,
            latency_ms,
        } => {
            let settings = config.effective_settings()?;
            let args = AskArgs {
                question,
                context: VideoContext::new(video_id, title),
                recognition_error,
                latency: Duration::from_millis(latency_ms),
            };
            handlers::ask::execute(&settings, args).await?;
        }
        Commands::Hold {
            content_id,
            steps,
            load_after_ms,
            channel,
            fail_sends,
        } => {
            let settings = config.effective_settings()?;
            let args = HoldArgs {
                content_id,
                steps,
                load_after: Duration::from_millis(load_after_ms),
                channel,
                fail_sends,
            };
            handlers::hold::execute(&settings, args).await?;
        }
        Commands::Config { command } => match command {
            ConfigCommand::Show => handlers::config::show(&config)?,
            ConfigCommand::Set {
                page_origin,
                speech_rate,
                speech_pitch,
                speech_volume,
                answer_timeout_secs,
            } => {
                let args = SetArgs {
                    page_origin,
                    speech_rate,
                    speech_pitch,
                    speech_volume,
                    answer_timeout_secs,
                };
                handlers::config::set(&config, &args)?;
            }
            ConfigCommand::Reset => handlers::config::reset(&config)?,
        },
    }

    Ok(())
}
