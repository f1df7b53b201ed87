//! Vitrina API Server binary
//!
//! JSON HTTP API over a spreadsheet-backed product catalog.

use clap::Parser;
use std::path::PathBuf;
use vitrina::api::{run_api_server, ApiConfig};
use vitrina::config::CatalogConfig;

#[derive(Parser, Debug)]
#[command(name = "vitrina-server")]
#[command(version)]
#[command(about = "Vitrina API Server - JSON HTTP API for a spreadsheet product catalog")]
#[command(long_about = r#"
Vitrina API Server - JSON HTTP API

Loads the configured workbook once at startup and serves:
  - GET  /api/v1/catalog          - Normalized catalog
  - GET  /api/v1/products         - Filtered view (?q=&category=&sort=&grouped=)
  - GET  /api/v1/cart             - Cart lines and total
  - POST /api/v1/cart/add         - Add one unit ({"id": "..."})
  - POST /api/v1/cart/increment   - Increase a quantity
  - POST /api/v1/cart/decrement   - Decrease a quantity
  - POST /api/v1/cart/remove      - Remove an entry
  - GET  /api/v1/order            - Order message and WhatsApp link
  - POST /api/v1/reload           - Fetch the workbook again

Additional endpoints:
  - GET  /health                  - Health check
  - GET  /version                 - Server version info

Example usage:
  vitrina-server --source catalogo.xlsx
  vitrina-server --config vitrina.yaml --host 0.0.0.0 --port 3000

  curl -X POST http://localhost:8080/api/v1/cart/add \
    -H "Content-Type: application/json" \
    -d '{"id": "dahua-dh-ipc-hfw1230s-2"}'
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "VITRINA_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "VITRINA_PORT")]
    port: u16,

    /// Path to a YAML configuration file
    #[arg(short, long, env = "VITRINA_CONFIG")]
    config: Option<PathBuf>,

    /// Workbook path or http(s) URL, overriding the configured source
    #[arg(short, long)]
    source: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut catalog_config = CatalogConfig::load(args.config.as_deref())?;
    if let Some(source) = args.source {
        catalog_config.source = source;
    }

    let config = ApiConfig {
        host: args.host,
        port: args.port,
    };

    run_api_server(config, catalog_config).await
}
