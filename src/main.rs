use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use propai_search::backends::{sample_listings, AlgoliaIndex, MemoryBackend, SearchBackend};
use propai_search::config::AppConfig;
use propai_search::display::render_card;
use propai_search::llm::{GeminiClient, TextGenerator};
use propai_search::pipeline::SearchPipeline;
use propai_search::suggest::SearchImprover;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Natural-language property search for the Indian market
#[derive(Parser)]
#[command(name = "propai")]
#[command(about = "Search property listings with plain-language queries")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a search, e.g. "3 BHK apartment in Bangalore under 2 crores"
    Search {
        query: String,
        /// Where listings come from
        #[arg(short, long, value_enum, default_value_t = BackendKind::Memory)]
        backend: BackendKind,
        /// Print the full outcome as JSON instead of cards
        #[arg(long)]
        json: bool,
        /// Ask the model how the query could be improved
        #[arg(long)]
        suggest: bool,
    },
    /// Upload listings to the hosted index
    Populate {
        /// JSON array of listing records; defaults to the bundled sample set
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendKind {
    Memory,
    Algolia,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::from_filename(".env.local").ok();
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Search {
            query,
            backend,
            json,
            suggest,
        } => {
            let generator: Arc<dyn TextGenerator> =
                Arc::new(GeminiClient::new(config.require_llm()?).context("Failed to create model client")?);

            match backend {
                BackendKind::Memory => {
                    info!("🏠 Searching bundled sample listings");
                    let pipeline = SearchPipeline::new(generator.clone(), MemoryBackend::sample());
                    run_search(&pipeline, generator, &query, json, suggest).await
                }
                BackendKind::Algolia => {
                    let index_config = config.require_index()?;
                    info!("🏠 Searching index '{}'", index_config.index_name);
                    let index = AlgoliaIndex::new(index_config, &index_config.search_api_key)
                        .context("Failed to create index client")?;
                    let pipeline = SearchPipeline::new(generator.clone(), index);
                    run_search(&pipeline, generator, &query, json, suggest).await
                }
            }
        }
        Commands::Populate { file } => {
            let index_config = config.require_index()?;
            let index = AlgoliaIndex::new(index_config, index_config.admin_key()?)
                .context("Failed to create index client")?;

            let records: Vec<serde_json::Value> = match file {
                Some(path) => {
                    let raw = tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    serde_json::from_str(&raw).context("Listing file must be a JSON array")?
                }
                None => sample_listings()
                    .iter()
                    .map(serde_json::to_value)
                    .collect::<Result<Vec<_>, _>>()?,
            };

            let batch = index.save_objects(records).await?;
            info!("💾 Saved {} listings (task {})", batch.object_ids.len(), batch.task_id);
            Ok(())
        }
    }
}

async fn run_search<B: SearchBackend>(
    pipeline: &SearchPipeline<Arc<dyn TextGenerator>, B>,
    generator: Arc<dyn TextGenerator>,
    query: &str,
    json: bool,
    suggest: bool,
) -> Result<()> {
    let outcome = pipeline.search(query).await.context("Search failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        match &outcome.expression {
            Some(expr) => println!("Filter: {}\n", expr),
            None => println!("No filters understood, showing text matches\n"),
        }
        if outcome.listings.is_empty() {
            println!("No properties matched your search.");
        }
        for (i, listing) in outcome.listings.iter().enumerate() {
            println!("{}\n", render_card(i + 1, listing));
        }
    }

    if suggest {
        match SearchImprover::new(generator).suggest(&outcome.query, &outcome.listings).await {
            Ok(suggestions) if !suggestions.is_empty() => {
                println!("Try instead:");
                for s in suggestions {
                    println!("  • {}", s);
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Could not get suggestions: {}", e),
        }
    }

    Ok(())
}
