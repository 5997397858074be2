//! Standalone pastime CLI
//!
//! Loads (or seeds) an activity catalog, optionally adds an activity, and
//! ranks recommendations for an intent record supplied as JSON. The HTTP
//! presentation layer lives upstream; this binary is the direct caller-side
//! surface for inspection and scripting.

use clap::Parser;
use pastime::{ActivityRecord, FileCatalog, IntentRecord, Recommender};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pastime")]
#[command(about = "Mood-to-activity recommendation engine")]
struct Args {
    /// Catalog file (seeded with sample activities when missing)
    #[arg(long, default_value = "activities.json")]
    catalog: PathBuf,

    /// JSON file holding the intent record to rank ("-" reads stdin)
    #[arg(long)]
    intent: Option<String>,

    /// Number of recommendations to return
    #[arg(long, default_value_t = pastime::constants::DEFAULT_TOP_K)]
    top_k: usize,

    /// Fixed tie-break seed for reproducible ordering
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file holding an activity record to add before ranking
    #[arg(long)]
    add: Option<PathBuf>,

    /// Print catalog statistics
    #[arg(long)]
    stats: bool,

    /// List all catalog activities
    #[arg(long)]
    list: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("pastime={log_level}"))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Pastime v{}", pastime::VERSION);
    tracing::info!("Catalog file: {}", args.catalog.display());

    let store = FileCatalog::new(&args.catalog);
    let mut engine = Recommender::new(store).await?;
    if let Some(seed) = args.seed {
        engine = engine.with_tie_break_seed(seed);
    }

    if let Some(path) = &args.add {
        let content = tokio::fs::read_to_string(path).await?;
        let record: ActivityRecord = serde_json::from_str(&content)?;
        if engine.add_activity(record).await {
            eprintln!("Activity added");
        } else {
            anyhow::bail!("Failed to add activity from {}", path.display());
        }
    }

    if args.stats {
        let stats = engine.stats().await;
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }

    if args.list {
        let activities = engine.list_activities().await;
        println!("{}", serde_json::to_string_pretty(&activities)?);
    }

    if let Some(source) = &args.intent {
        let content = if source.as_str() == "-" {
            std::io::read_to_string(std::io::stdin())?
        } else {
            tokio::fs::read_to_string(source).await?
        };
        let intent: IntentRecord = serde_json::from_str(&content)?;

        eprintln!("{}", intent.summary());
        let recommendations = engine.rank(&intent, args.top_k).await;
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    }

    Ok(())
}
