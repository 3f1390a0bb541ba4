//! expert-ask entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Parse CLI, load config
//!   3. Resolve effective log level (`-v` flags > RUST_LOG > config), init logger
//!   4. Resolve the API credential, build the provider
//!   5. Serve the form until Ctrl-C, or answer one question and exit

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use expert_ask::credential::{self, API_KEY_NAME};
use expert_ask::error::AppError;
use expert_ask::llm::providers;
use expert_ask::orchestrator::{Orchestrator, Reply};
use expert_ask::{config, logger, server};

#[derive(Parser)]
#[command(name = "expert-ask", version, about = "Persona-conditioned LLM question form")]
struct Cli {
    /// Path to configuration file (default: config/default.toml)
    #[arg(short = 'f', long = "config")]
    config: Option<String>,

    /// Increase logging verbosity (-v warn, -vv info, -vvv debug, -vvvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Override the listen address from config
    #[arg(long)]
    bind: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the web form (default)
    Serve,
    /// Answer a single question on stdout and exit
    Ask {
        /// economist | physician | engineer (anything else: generic expert)
        #[arg(short, long, default_value = "engineer")]
        persona: String,
        /// Question text
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // .env is optional.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = config::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    logger::init(cli.verbose, &config.log_level)?;

    let api_key = credential::resolve(config.secrets_file.as_deref());
    let provider = providers::build(&config.llm, api_key.clone())?;

    info!(
        app = %config.app_name,
        provider = provider.name(),
        model = provider.model().unwrap_or("-"),
        credential = api_key.is_some(),
        "config loaded"
    );

    let orchestrator = Orchestrator::new(provider, api_key.as_deref());

    match cli.command.unwrap_or(Command::Serve) {
        Command::Ask { persona, text } => {
            let reply = orchestrator.ask(&persona, &text.join(" ")).await;
            if reply == Reply::MissingCredential {
                return Err(AppError::Config(reply.text()));
            }
            println!("{}", reply.text());
            Ok(())
        }
        Command::Serve => {
            if !orchestrator.has_credential() {
                warn!("{API_KEY_NAME} is not set; submissions will show a configuration error");
            }
            print_status(&config, &orchestrator);

            let shutdown = CancellationToken::new();
            let watcher = shutdown.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("ctrl-c received, shutting down");
                }
                watcher.cancel();
            });

            server::serve(&config.server.bind, &config.app_name, Arc::new(orchestrator), shutdown).await
        }
    }
}

fn print_status(config: &config::Config, orchestrator: &Orchestrator) {
    let provider = orchestrator.provider();
    println!("✓ {} ready", config.app_name);
    println!("  form:       http://{}/", config.server.bind);
    println!("  provider:   {} ({})", provider.name(), provider.model().unwrap_or("-"));
    println!(
        "  credential: {}",
        if orchestrator.has_credential() { "set" } else { "MISSING" }
    );
}
