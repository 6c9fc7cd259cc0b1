use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use catalog_console::catalog::{seed, ProductInput, ProductPatch, ProductStatus};
use catalog_console::config::{Config, ConfigStore};
use catalog_console::server::{init_tracing, CatalogServer, Latency};
use catalog_console::store::{HttpStore, MemoryStore, RecordStore};
use catalog_console::ui::fetch::FetchSnapshot;
use catalog_console::ui::ListConsole;

/// Product catalogue admin console.
#[derive(Parser)]
#[command(name = "catalog-console", version, about = "Product catalogue admin console")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend origin, overriding [client].base_url
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reference backend with a seeded catalogue
    Serve {
        /// Address to bind, overriding [server].bind_addr
        #[arg(long)]
        bind: Option<String>,
        /// Respond immediately instead of simulating latency
        #[arg(long)]
        no_latency: bool,
    },

    /// Show one page of the list for a location
    List {
        /// Location to open, e.g. "/products?q=lamp&page=2&sortBy=price&sortDir=desc"
        #[arg(default_value = "/products")]
        location: String,
        /// Type this into the search box before showing the list
        #[arg(long)]
        search: Option<String>,
    },

    /// Create a draft product
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        stock: Decimal,
    },

    /// Edit fields or change the status of a product
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        stock: Option<Decimal>,
        /// draft, active or archived
        #[arg(long)]
        status: Option<ProductStatus>,
    },

    /// Delete a product
    Delete { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = ConfigStore::open(path.clone())
        .with_context(|| format!("loading config from {}", path.display()))?;
    if let Some(base_url) = cli.base_url.clone() {
        config.update(|c| c.client.base_url = base_url)?;
    }

    match cli.command {
        Commands::Serve { bind, no_latency } => {
            if let Some(bind) = bind {
                config.update(|c| c.server.bind_addr = bind)?;
            }
            serve(config.get(), no_latency).await
        }
        Commands::List { location, search } => {
            let mut console = open_console(&config.get(), &location)?;
            if let Some(text) = search {
                console.search().edit(text);
            }
            let snapshot = console.settle().await;
            print_list(&console, &snapshot);
            Ok(())
        }
        Commands::Create { name, price, stock } => {
            let mut console = open_console(&config.get(), "/products")?;
            let product = console
                .mutations()
                .create(&ProductInput { name, price, stock })
                .await?;
            println!("created {} ({})", product.id, product.name);
            let snapshot = console.settle().await;
            print_list(&console, &snapshot);
            Ok(())
        }
        Commands::Update {
            id,
            name,
            price,
            stock,
            status,
        } => {
            let mut console = open_console(&config.get(), "/products")?;
            let patch = ProductPatch {
                name,
                price,
                stock,
                status,
            };
            let product = console.mutations().update(&id, &patch).await?;
            println!(
                "updated {} ({}, {}, published {})",
                product.id,
                product.name,
                product.status,
                product
                    .published_at
                    .map(|at| at.to_rfc3339())
                    .unwrap_or_else(|| "never".into())
            );
            let snapshot = console.settle().await;
            print_list(&console, &snapshot);
            Ok(())
        }
        Commands::Delete { id } => {
            let mut console = open_console(&config.get(), "/products")?;
            console.mutations().delete(&id).await?;
            println!("deleted {}", id);
            let snapshot = console.settle().await;
            print_list(&console, &snapshot);
            Ok(())
        }
    }
}

async fn serve(config: Config, no_latency: bool) -> anyhow::Result<()> {
    let records = seed::generate(config.server.seed_count, config.server.seed, Utc::now());
    tracing::info!(count = records.len(), seed = config.server.seed, "Seeded catalogue");
    let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::with_records(records));

    let latency = if no_latency {
        Latency::none()
    } else {
        Latency::from_config(&config.server)
    };
    let mut server = CatalogServer::with_latency(&config.server, store, latency);
    let addr = server.try_bind().await?;
    println!("serving on http://{}", addr);
    server.run().await?;
    Ok(())
}

fn open_console(config: &Config, location: &str) -> anyhow::Result<ListConsole> {
    let store = HttpStore::new(
        &config.client.base_url,
        Duration::from_secs(config.client.timeout_seconds),
    )?;
    Ok(ListConsole::new(Arc::new(store), location.into(), &config.console))
}

fn print_list(console: &ListConsole, snapshot: &FetchSnapshot) {
    println!("{}", console.query().location());
    if let Some(error) = &snapshot.error {
        println!("error: {}", error);
    }
    for product in &snapshot.items {
        println!(
            "{:<34} {:<28} {:>10} {:>6} {}",
            product.id, product.name, product.price, product.stock, product.status
        );
    }
    println!(
        "page {} of {} ({} products)",
        snapshot.served_page.unwrap_or(1),
        snapshot.total_pages,
        snapshot.total
    );
}
