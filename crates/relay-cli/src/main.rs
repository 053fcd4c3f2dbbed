use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use gemini_relay::config::Config;
use gemini_relay::interceptor::{InterceptorStore, ReqwestTransport, install_global};
use gemini_relay_cli::commands::{ConfigCommand, FetchCommand, RewriteCommand, SanitizeCommand};
use gemini_relay_cli::error::CliResult;
use gemini_relay_cli::output::OutputFormat;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gemini-relay")]
#[command(about = "Gemini Relay - route Gemini API requests through a proxy")]
#[command(version)]
pub struct Cli {
    #[clap(long, short, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[clap(long, short = 'c', global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[clap(
        long,
        global = true,
        help = "Proxy base URL (overrides the config file and enables proxying)"
    )]
    pub proxy_url: Option<String>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Show where a request URL would be dispatched")]
    Rewrite(RewriteCommand),

    #[clap(about = "Redact credentials and API keys from a URL")]
    Sanitize(SanitizeCommand),

    #[clap(about = "Configuration commands")]
    Config(ConfigCommand),

    #[clap(about = "Send a request through the interceptor")]
    Fetch(FetchCommand),
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gemini_relay=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = &cli.proxy_url {
        config.proxy.enabled = true;
        config.proxy.url = Some(url.clone());
    }

    let store = Arc::new(InterceptorStore::from_settings(&config.proxy));
    tracing::debug!(
        proxy_enabled = store.snapshot().is_enabled(),
        "Configuration loaded"
    );

    match &cli.command {
        Command::Rewrite(cmd) => cmd.execute(&store, format),
        Command::Sanitize(cmd) => cmd.execute(format),
        Command::Config(cmd) => {
            cmd.execute(&config, cli.config.as_deref(), &store.snapshot(), format)
        }
        Command::Fetch(cmd) => {
            let transport = install_global(
                Arc::new(ReqwestTransport::new(&config.transport)?),
                Arc::clone(&store),
            );
            cmd.execute(transport.as_ref(), format).await
        }
    }
}
