use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vitrina::cli::{self, CartAction};
use vitrina::config::CatalogConfig;
use vitrina::core::ViewQuery;
use vitrina::error::CatalogResult;

#[derive(Parser)]
#[command(name = "vitrina")]
#[command(about = "Spreadsheet-backed product catalog with a WhatsApp order cart.")]
#[command(long_about = "Vitrina - Product catalog from a spreadsheet workbook

Each worksheet is a category. Headers are matched loosely (accents, case,
spacing), prices accept both 12.500,00 and 1,234.56 styles, and every
product gets a stable id built from its category, code and row.

COMMANDS:
  load    - Parse the workbook and summarize it
  list    - Filter, sort and group products
  cart    - Show or change the persisted cart
  order   - Print the order message and WhatsApp link
  watch   - Reload whenever the workbook changes

EXAMPLES:
  vitrina load --source catalogo.xlsx
  vitrina list --query domo --sort price-asc --grouped
  vitrina cart add dahua-dh-ipc-hfw1230s-2
  vitrina order --link")]
#[command(version)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, global = true, env = "VITRINA_CONFIG")]
    config: Option<PathBuf>,

    /// Workbook path or http(s) URL, overriding the configured source
    #[arg(short, long, global = true)]
    source: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the workbook and print a per-category summary
    Load {
        /// Print the normalized catalog as JSON
        #[arg(long)]
        json: bool,

        /// List every product under its category
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Filter, sort and group the catalog.

The query matches code, category, type and description (case-insensitive).
With a query, relevance sort ranks code matches first, then category matches.

SORT MODES:
  relevance   - query relevance, document order without a query (default)
  excel       - workbook order
  price-asc   - lowest ARS price first (no price sorts as 0)
  price-desc  - highest ARS price first
  code-asc    - code order, ignoring case and accents")]
    /// Filter, sort and group products
    List {
        /// Free-text query
        #[arg(short, long, default_value = "")]
        query: String,

        /// Exact category label
        #[arg(short = 'k', long, default_value = "")]
        category: String,

        /// Sort mode
        #[arg(long, default_value = "relevance")]
        sort: String,

        /// Group results by category
        #[arg(short, long)]
        grouped: bool,
    },

    /// Show or change the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartCommands,
    },

    /// Print the order message and WhatsApp link
    Order {
        /// Print only the link
        #[arg(long)]
        link: bool,
    },

    /// Reload the catalog whenever the workbook changes
    Watch,
}

#[derive(Subcommand)]
enum CartCommands {
    /// Show cart lines and total
    Show,
    /// Add one unit of a catalog product
    Add { id: String },
    /// Increase a quantity by one
    Inc { id: String },
    /// Decrease a quantity by one (zero removes the entry)
    Dec { id: String },
    /// Remove an entry
    Remove { id: String },
}

fn main() -> CatalogResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = CatalogConfig::load(cli.config.as_deref())?;
    if let Some(source) = cli.source {
        config.source = source;
    }

    match cli.command {
        Commands::Load { json, verbose } => cli::load(&config, json, verbose),

        Commands::List {
            query,
            category,
            sort,
            grouped,
        } => {
            let sort = cli::parse_sort(&sort)?;
            cli::list(&config, &ViewQuery::new(query, category, sort), grouped)
        }

        Commands::Cart { action } => match action {
            CartCommands::Show => cli::cart_show(&config),
            CartCommands::Add { id } => cli::cart_update(&config, CartAction::Add, &id),
            CartCommands::Inc { id } => cli::cart_update(&config, CartAction::Increment, &id),
            CartCommands::Dec { id } => cli::cart_update(&config, CartAction::Decrement, &id),
            CartCommands::Remove { id } => cli::cart_update(&config, CartAction::Remove, &id),
        },

        Commands::Order { link } => cli::order(&config, link),

        Commands::Watch => cli::watch(&config),
    }
}
