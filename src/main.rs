use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use expertmem::connector::api::{Container, ContainerConfig, Router};
use expertmem::Commands;

const DEFAULT_ENGINE_URL: &str = "https://api.openai.com";
const DEFAULT_ENGINE_MODEL: &str = "gpt-4o";

#[derive(Parser)]
#[command(name = "expertmem")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Managed datastore base URL; omit to run against in-memory state
    #[arg(long, global = true)]
    datastore_url: Option<String>,

    #[arg(long, global = true)]
    datastore_key: Option<String>,

    #[arg(long, global = true)]
    engine_url: Option<String>,

    #[arg(long, global = true)]
    engine_key: Option<String>,

    #[arg(long, global = true)]
    engine_model: Option<String>,

    /// Use the deterministic mock engine instead of the hosted API
    #[arg(long, global = true)]
    mock_engine: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ContainerConfig {
        datastore_url: cli
            .datastore_url
            .or_else(|| std::env::var("EXPERTMEM_DATASTORE_URL").ok()),
        datastore_key: env_or(cli.datastore_key, "EXPERTMEM_DATASTORE_KEY", ""),
        engine_url: env_or(cli.engine_url, "EXPERTMEM_ENGINE_URL", DEFAULT_ENGINE_URL),
        engine_key: env_or(cli.engine_key, "EXPERTMEM_ENGINE_KEY", ""),
        engine_model: env_or(
            cli.engine_model,
            "EXPERTMEM_ENGINE_MODEL",
            DEFAULT_ENGINE_MODEL,
        ),
        mock_engine: cli.mock_engine,
    };

    let container = Container::new(config)?;
    let router = Router::new(&container);

    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}

fn env_or(flag: Option<String>, var: &str, default: &str) -> String {
    flag.or_else(|| std::env::var(var).ok())
        .unwrap_or_else(|| default.to_string())
}
