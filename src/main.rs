// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use es_loader::utils::logging::{format_success, format_warning};
use es_loader::{Config, CsvIngester, DeleteOutcome, DemoRunner, EsClient, SearchEngine};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "es_loader")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "CSV ingestion and query demo client for Elasticsearch", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a collection with default settings
    Provision {
        name: String,
    },

    /// Ingest one CSV column into a collection, one document per row
    Ingest {
        collection: String,
        column: String,
    },

    /// Print the total document count of a collection
    Count {
        collection: String,
    },

    /// Delete a document by identifier
    Delete {
        collection: String,
        id: String,
    },

    /// Match query on one field, printing the number of hits
    Search {
        collection: String,
        column: String,
        value: String,
    },

    /// Terms facet over distinct values of a field
    Facet {
        collection: String,

        #[arg(long)]
        field: Option<String>,
    },

    /// Run the fixed provision/ingest/delete/query/facet sequence
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    es_loader::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    match cli.command {
        Commands::Provision { name } => {
            cmd_provision(&config, &name).await?;
        }
        Commands::Ingest { collection, column } => {
            cmd_ingest(&config, &collection, &column).await?;
        }
        Commands::Count { collection } => {
            cmd_count(&config, &collection).await?;
        }
        Commands::Delete { collection, id } => {
            cmd_delete(&config, &collection, &id).await?;
        }
        Commands::Search {
            collection,
            column,
            value,
        } => {
            cmd_search(&config, &collection, &column, &value).await?;
        }
        Commands::Facet { collection, field } => {
            let field = field.unwrap_or_else(|| config.demo.facet_field.clone());
            cmd_facet(&config, &collection, &field).await?;
        }
        Commands::Demo => {
            cmd_demo(&config).await?;
        }
    }

    Ok(())
}

/// Build the client and probe the engine before running a command.
async fn connect(config: &Config) -> Result<EsClient> {
    let client = EsClient::new(&config.engine);

    if !client
        .ping()
        .await
        .context("Cannot reach the search engine")?
    {
        anyhow::bail!(
            "Search engine at {} answered with a non-success status",
            config.engine.base_url()
        );
    }

    Ok(client)
}

async fn cmd_provision(config: &Config, name: &str) -> Result<()> {
    let client = connect(config).await?;

    client
        .create_collection(name)
        .await
        .context("Collection creation failed")?;

    println!("{}", format_success(&format!("Created collection {}", name)));
    Ok(())
}

async fn cmd_ingest(config: &Config, collection: &str, column: &str) -> Result<()> {
    let client = connect(config).await?;

    let ingester = CsvIngester::new(&client, &config.source);
    let stats = ingester
        .index_column(collection, column)
        .await
        .context("Ingestion failed")?;

    println!(
        "{}",
        format_success(&format!("{} into {}", stats.summary(), collection))
    );
    Ok(())
}

async fn cmd_count(config: &Config, collection: &str) -> Result<()> {
    let client = connect(config).await?;

    let count = client
        .document_count(collection)
        .await
        .context("Count query failed")?;

    println!("{} contains {} documents", collection, count);
    Ok(())
}

async fn cmd_delete(config: &Config, collection: &str, id: &str) -> Result<()> {
    let client = connect(config).await?;

    let outcome = client
        .delete_document(collection, id)
        .await
        .context("Delete failed")?;

    match outcome {
        DeleteOutcome::Deleted => {
            println!("{}", format_success(&format!("Deleted document {}", id)));
        }
        DeleteOutcome::NotFound => {
            println!(
                "{}",
                format_warning(&format!("Document {} not present, nothing deleted", id))
            );
        }
    }
    Ok(())
}

async fn cmd_search(config: &Config, collection: &str, column: &str, value: &str) -> Result<()> {
    let client = connect(config).await?;

    let hits = client
        .search_by_field(collection, column, value)
        .await
        .context("Search failed")?;

    println!("Search results: {}", hits);
    Ok(())
}

async fn cmd_facet(config: &Config, collection: &str, field: &str) -> Result<()> {
    let client = connect(config).await?;

    let buckets = client
        .terms_facet(collection, field)
        .await
        .context("Facet query failed")?;

    if buckets.is_empty() {
        println!("No {} facets in {}", field, collection);
        return Ok(());
    }

    println!("{} facets for {}:", field, collection);
    for bucket in &buckets {
        println!("  {}: {}", bucket.key, bucket.doc_count);
    }
    Ok(())
}

async fn cmd_demo(config: &Config) -> Result<()> {
    let client = connect(config).await?;

    DemoRunner::new(&client, config)
        .run()
        .await
        .context("Demo sequence failed")?;

    info!("Demo sequence complete");
    Ok(())
}
