//! Supplyboard CLI - Render supply-chain dashboard pages
//!
//! Usage:
//!   supplyboard pages
//!   supplyboard filters [--data <file.csv>]
//!   supplyboard render [--page <page>] [--product-type <t>]... [--location <l>]...
//!   supplyboard validate [--data <file.csv>]
//!   supplyboard serve [--host <host>] [--port <port>]     (feature `ui`)
//!
//! Examples:
//!   supplyboard render --page "Quality Control" --product-type haircare
//!   supplyboard render --page overview --location Mumbai --format json

use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use supplyboard::config::Settings;
use supplyboard::dashboard::Dashboard;
use supplyboard::data::{self, Dataset};
use supplyboard::filter::FilterSelection;
use supplyboard::page::PageId;
use supplyboard::render::{JsonRenderer, TextRenderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "supplyboard")]
#[command(about = "Supplyboard - A filterable supply-chain analytics dashboard")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List dashboard pages and their widgets
    Pages,

    /// Print the available Product type and Location filter values
    Filters {
        /// Path to the supply-chain CSV (overrides config)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Render one dashboard page
    Render {
        /// Path to the supply-chain CSV (overrides config)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Page title, slug or name (defaults to the configured start page)
        #[arg(short, long)]
        page: Option<String>,

        /// Product type to include (repeatable; all when omitted)
        #[arg(long = "product-type")]
        product_types: Vec<String>,

        /// Location to include (repeatable; all when omitted)
        #[arg(long = "location")]
        locations: Vec<String>,

        /// Deselect every Product type
        #[arg(long, conflicts_with = "product_types")]
        no_product_types: bool,

        /// Deselect every Location
        #[arg(long, conflicts_with = "locations")]
        no_locations: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Load the dataset and check its schema
    Validate {
        /// Path to the supply-chain CSV (overrides config)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Serve the dashboard as a JSON HTTP API
    #[cfg(feature = "ui")]
    Serve {
        /// Path to the supply-chain CSV (overrides config)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Interface to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Plain text for terminals
    Text,
    /// Pretty-printed JSON
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&settings.logging.filter);

    match cli.command {
        Commands::Pages => cmd_pages(),
        Commands::Filters { data } => cmd_filters(&settings, data),
        Commands::Render {
            data,
            page,
            product_types,
            locations,
            no_product_types,
            no_locations,
            format,
        } => {
            let filters = FilterArgs {
                product_types,
                locations,
                no_product_types,
                no_locations,
            };
            cmd_render(&settings, data, page, filters, format)
        }
        Commands::Validate { data } => cmd_validate(&settings, data),
        #[cfg(feature = "ui")]
        Commands::Serve { data, host, port } => cmd_serve(&settings, data, host, port),
    }
}

/// Logs go to stderr; `RUST_LOG` wins over the configured filter.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_dataset(settings: &Settings, data: Option<PathBuf>) -> Option<&'static Dataset> {
    let path = match data {
        Some(p) => p,
        None => match settings.data.resolved_path() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                return None;
            }
        },
    };

    match data::load(&path) {
        Ok(dataset) => Some(dataset),
        Err(e) => {
            eprintln!("Error loading '{}': {}", path.display(), e);
            None
        }
    }
}

fn cmd_pages() -> ExitCode {
    for page in PageId::ALL {
        println!("{} ({})", page.title(), page.slug());
        for widget in page.widgets() {
            println!("  - {} [{:?}]", widget.title, widget.display);
        }
    }
    ExitCode::SUCCESS
}

fn cmd_filters(settings: &Settings, data: Option<PathBuf>) -> ExitCode {
    let Some(dataset) = load_dataset(settings, data) else {
        return ExitCode::FAILURE;
    };

    println!("Product types:");
    for value in dataset.product_types() {
        println!("  - {}", value);
    }
    println!();
    println!("Locations:");
    for value in dataset.locations() {
        println!("  - {}", value);
    }
    ExitCode::SUCCESS
}

struct FilterArgs {
    product_types: Vec<String>,
    locations: Vec<String>,
    no_product_types: bool,
    no_locations: bool,
}

impl FilterArgs {
    fn selection(self, dataset: &Dataset) -> FilterSelection {
        let mut selection = FilterSelection::all(dataset);
        if self.no_product_types {
            selection = selection.with_product_types(Vec::<String>::new());
        } else if !self.product_types.is_empty() {
            selection = selection.with_product_types(self.product_types);
        }
        if self.no_locations {
            selection = selection.with_locations(Vec::<String>::new());
        } else if !self.locations.is_empty() {
            selection = selection.with_locations(self.locations);
        }
        selection
    }
}

fn cmd_render(
    settings: &Settings,
    data: Option<PathBuf>,
    page: Option<String>,
    filters: FilterArgs,
    format: OutputFormat,
) -> ExitCode {
    let page = match page {
        Some(name) => name.parse::<PageId>().map_err(|e| e.to_string()),
        None => settings.dashboard.start_page().map_err(|e| e.to_string()),
    };
    let page = match page {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(dataset) = load_dataset(settings, data) else {
        return ExitCode::FAILURE;
    };

    let mut dashboard = Dashboard::new(dataset, page);
    dashboard.set_filter(filters.selection(dataset));

    let result = match format {
        OutputFormat::Text => {
            let mut renderer = TextRenderer::new(io::stdout().lock());
            dashboard
                .render(&mut renderer)
                .map(|_| ())
                .map_err(|e| e.to_string())
                .and_then(|()| renderer.into_inner().flush().map_err(|e| e.to_string()))
        }
        OutputFormat::Json => {
            let mut renderer = JsonRenderer::new();
            dashboard
                .render(&mut renderer)
                .map_err(|e| e.to_string())
                .and_then(|_| {
                    serde_json::to_string_pretty(&renderer.into_value())
                        .map_err(|e| e.to_string())
                })
                .map(|json| println!("{}", json))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Render error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_validate(settings: &Settings, data: Option<PathBuf>) -> ExitCode {
    let Some(dataset) = load_dataset(settings, data) else {
        return ExitCode::FAILURE;
    };

    let source = dataset
        .source()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    println!(
        "OK: {} is valid ({} rows, {} product types, {} locations)",
        source,
        dataset.len(),
        dataset.product_types().len(),
        dataset.locations().len()
    );
    ExitCode::SUCCESS
}

#[cfg(feature = "ui")]
fn cmd_serve(
    settings: &Settings,
    data: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> ExitCode {
    use std::net::ToSocketAddrs;

    let Some(dataset) = load_dataset(settings, data) else {
        return ExitCode::FAILURE;
    };

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);
    let addr = match (host.as_str(), port).to_socket_addrs().map(|mut a| a.next()) {
        Ok(Some(addr)) => addr,
        Ok(None) => {
            eprintln!("Error: '{}' did not resolve to an address", host);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Error resolving '{}': {}", host, e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(supplyboard::web::serve(dataset, addr)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
