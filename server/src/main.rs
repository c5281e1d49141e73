use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use stockwise_core::generator::HttpGenerator;
use stockwise_core::loader::{load_items, load_policies};
use stockwise_core::{default_policies, Config, Generator, SupplyChain};
use stockwise_server::serve;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Item data: a JSON/JSONL file or a directory of them
    #[arg(long)]
    items: String,
    /// Directory of policy text documents; built-ins when omitted
    #[arg(long)]
    policies: Option<String>,
    /// JSON config file
    #[arg(long)]
    config: Option<String>,
    /// Generate answers with the configured model
    #[arg(long, default_value_t = false)]
    ai: bool,
    /// Text-generation endpoint; implies --ai
    #[arg(long)]
    generator_url: Option<String>,
    /// Bearer token for the generation endpoint
    #[arg(long, env = "GENERATOR_TOKEN")]
    generator_token: Option<String>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    // The blocking HTTP generator must be created outside the async runtime.
    let system = Arc::new(build_system(&args)?);
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    serve(system, addr, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    })
}

fn build_system(args: &Args) -> Result<SupplyChain> {
    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    if args.generator_url.is_some() {
        config.generator_url = args.generator_url.clone();
    }

    let items = load_items(&args.items)?;
    let policies = match &args.policies {
        Some(path) => load_policies(path)?,
        None => default_policies(),
    };

    let generator: Option<Arc<dyn Generator>> = if args.ai || config.generator_url.is_some() {
        let generator = HttpGenerator::from_config(&config, args.generator_token.clone())?;
        tracing::info!(endpoint = generator.endpoint(), "generation enabled");
        Some(Arc::new(generator))
    } else {
        None
    };

    Ok(SupplyChain::new(config, items, policies, generator))
}
