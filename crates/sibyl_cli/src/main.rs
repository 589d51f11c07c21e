use clap::Parser;
use sibyl_core::SibylConfig;
use sibyl_gateway::GatewayServer;
use sibyl_reasoning::llm::LlmClient;
use sibyl_reasoning::providers::{GeminiClient, MockClient};
use sibyl_reasoning::Orchestrator;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config file
    #[arg(short, long, default_value = "sibyl.toml")]
    config: String,

    /// Bind host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Model to use (overrides config)
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let mut config = SibylConfig::load_or_default(&args.config);
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(model) = args.model {
        config.llm.model = model;
    }

    info!("Initializing sibyl with model {}...", config.llm.model);

    // A missing Gemini key is a fatal startup condition: fail fast here
    // rather than serving a permanently degraded planner.
    let client: Box<dyn LlmClient> = match config.llm.provider.as_str() {
        "mock" => Box::new(MockClient::default()),
        _ => Box::new(GeminiClient::new(&config.llm)?),
    };

    if config.weather.api_key.is_none() {
        tracing::warn!("OPENWEATHER_API_KEY not set: weather lookups will report an error");
    }

    let orchestrator = Arc::new(Orchestrator::new(client, &config)?);
    let server = GatewayServer::new(
        orchestrator,
        config.server.memory_size,
        &config.llm.model,
        &config.server.host,
        config.server.port,
    );

    server.run().await
}
