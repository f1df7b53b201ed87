//! Document loader: fetches workbook bytes and builds the catalog

use crate::config::CatalogConfig;
use crate::core::assemble;
use crate::error::{CatalogError, CatalogResult};
use crate::excel::WorkbookImporter;
use crate::types::Catalog;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Where the workbook comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Url(String),
    Path(PathBuf),
}

impl CatalogSource {
    /// `http://` and `https://` sources are fetched, anything else is a path
    pub fn parse(source: &str) -> Self {
        let trimmed = source.trim();
        let lower = trimmed.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CatalogSource::Url(trimmed.to_string())
        } else {
            CatalogSource::Path(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Url(url) => f.write_str(url),
            CatalogSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch the raw workbook bytes
pub async fn fetch_document(source: &CatalogSource) -> CatalogResult<Vec<u8>> {
    match source {
        CatalogSource::Url(url) => {
            let fetch_error = |e: reqwest::Error| CatalogError::Fetch {
                url: url.clone(),
                reason: e.to_string(),
            };
            let response = reqwest::get(url.as_str()).await.map_err(fetch_error)?;
            let status = response.status();
            if !status.is_success() {
                return Err(CatalogError::HttpStatus {
                    url: url.clone(),
                    status: status.as_u16(),
                });
            }
            let bytes = response.bytes().await.map_err(fetch_error)?;
            Ok(bytes.to_vec())
        }
        CatalogSource::Path(path) => std::fs::read(path).map_err(|e| CatalogError::Fetch {
            url: path.display().to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Decode workbook bytes and assemble the catalog
pub fn catalog_from_bytes(bytes: Vec<u8>, config: &CatalogConfig) -> CatalogResult<Catalog> {
    let sheets = WorkbookImporter::from_bytes(bytes).import()?;
    Ok(assemble(&sheets, config))
}

/// Fetch the configured workbook and build a fresh catalog
pub async fn load_catalog(config: &CatalogConfig) -> CatalogResult<Catalog> {
    let source = CatalogSource::parse(&config.source);
    info!(source = %source, "loading catalog");
    let bytes = fetch_document(&source).await?;
    catalog_from_bytes(bytes, config)
}

/// Blocking wrapper for command-line use
pub fn load_catalog_blocking(config: &CatalogConfig) -> CatalogResult<Catalog> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(load_catalog(config))
}
