use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::sync::Arc;
use stockwise_core::generator::HttpGenerator;
use stockwise_core::loader::{load_items, load_policies};
use stockwise_core::risk::RiskSummary;
use stockwise_core::{default_policies, Config, Generator, InventoryItem, RiskAssessment, SupplyChain};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "stockwise")]
#[command(about = "Search supply chain policies, forecast demand and score inventory risk", long_about = None)]
struct Cli {
    #[command(flatten)]
    data: DataArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DataArgs {
    /// Item data: a JSON/JSONL file or a directory of them
    #[arg(long, global = true)]
    items: Option<String>,
    /// Directory (or single file) of policy text documents; built-ins when omitted
    #[arg(long, global = true)]
    policies: Option<String>,
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<String>,
    /// Generate answers for `ask` with the configured model
    #[arg(long, global = true, default_value_t = false)]
    ai: bool,
    /// Text-generation endpoint; implies --ai
    #[arg(long, global = true)]
    generator_url: Option<String>,
    /// Bearer token for the generation endpoint
    #[arg(long, global = true, env = "GENERATOR_TOKEN")]
    generator_token: Option<String>,
    /// Seed for synthetic history noise
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank documents against a query
    Search {
        #[arg(long)]
        query: String,
        /// Number of results (defaults to the configured top-k)
        #[arg(long)]
        k: Option<usize>,
    },
    /// Answer a question from the best matching documents
    Ask {
        #[arg(long)]
        question: String,
    },
    /// Forecast daily demand for one SKU
    Forecast {
        #[arg(long)]
        sku: String,
        /// Horizon in days (defaults to the configured horizon)
        #[arg(long)]
        days: Option<usize>,
    },
    /// Score risk for the first N items
    Risks {
        #[arg(long, default_value_t = 10)]
        top_n: usize,
    },
}

#[derive(Serialize)]
struct RiskReport {
    summary: RiskSummary,
    assessments: Vec<RiskAssessment>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let system = build_system(&cli.data, matches!(cli.command, Commands::Ask { .. }))?;

    match cli.command {
        Commands::Search { query, k } => {
            let k = k.unwrap_or(system.config().search_top_k);
            print_json(&system.search(&query, k))
        }
        Commands::Ask { question } => print_json(&system.ask(&question)),
        Commands::Forecast { sku, days } => {
            let days = days.unwrap_or(system.config().forecast_days);
            match system.forecast_demand(&sku, days) {
                Ok(forecast) => print_json(&forecast),
                Err(err) => {
                    print_json(&serde_json::json!({ "error": err.to_string() }))?;
                    std::process::exit(1);
                }
            }
        }
        Commands::Risks { top_n } => {
            let assessments = system.analyze_risks(top_n);
            let summary = RiskSummary::from_assessments(&assessments);
            tracing::info!(high = summary.high, medium = summary.medium, low = summary.low, "risk summary");
            print_json(&RiskReport { summary, assessments })
        }
    }
}

fn build_system(args: &DataArgs, wants_generator: bool) -> Result<SupplyChain> {
    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    if args.generator_url.is_some() {
        config.generator_url = args.generator_url.clone();
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let items: Vec<InventoryItem> = match &args.items {
        Some(path) => load_items(path)?,
        None => Vec::new(),
    };
    let policies = match &args.policies {
        Some(path) => load_policies(path)?,
        None => default_policies(),
    };

    let generator: Option<Arc<dyn Generator>> = if wants_generator && (args.ai || config.generator_url.is_some()) {
        let generator = HttpGenerator::from_config(&config, args.generator_token.clone())?;
        tracing::info!(endpoint = generator.endpoint(), "generation enabled");
        Some(Arc::new(generator))
    } else {
        None
    };

    Ok(SupplyChain::new(config, items, policies, generator))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
