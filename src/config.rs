//! Catalog configuration (YAML)
//!
//! Every field is optional; a missing file section falls back to the
//! defaults of the shop's catalog workbook layout.

use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default workbook name looked up next to the working directory
pub const DEFAULT_SOURCE: &str = "catalogo.xlsx";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Workbook location: a path or an http(s) URL
    pub source: String,
    /// WhatsApp number used for order links (digits only)
    pub whatsapp_number: String,
    /// Preferred sheet order; unknown sheets follow in workbook order
    pub sheet_order: Vec<String>,
    /// Category label overrides keyed by raw sheet name
    pub sheet_labels: HashMap<String, String>,
    pub columns: ColumnCandidates,
    pub price_fallback: PriceFallback,
    pub cart: CartConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            whatsapp_number: "54911XXXXXXXXXX".to_string(),
            sheet_order: strings(&[
                "DAHUA",
                "HIKVISION",
                "IMOU",
                "CYGNUS",
                "INTELBRAS",
                "MARSHALL-GARNET",
                "CERCO ELECTRICO",
            ]),
            sheet_labels: HashMap::from([
                ("MARSHALL-GARNET".to_string(), "Marshall / Garnet".to_string()),
                ("CERCO ELECTRICO".to_string(), "Cerco Eléctrico".to_string()),
            ]),
            columns: ColumnCandidates::default(),
            price_fallback: PriceFallback::default(),
            cart: CartConfig::default(),
        }
    }
}

/// Header labels tried for each semantic column, in priority order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnCandidates {
    pub code: Vec<String>,
    pub description: Vec<String>,
    #[serde(rename = "type")]
    pub kind: Vec<String>,
    pub price_ars: Vec<String>,
    pub price_usd: Vec<String>,
    pub image: Vec<String>,
}

impl Default for ColumnCandidates {
    fn default() -> Self {
        Self {
            code: strings(&[
                "MODELO",
                "CODIGO",
                "COD.",
                "COD",
                "CÓDIGO",
                "CODIGO/MODELO",
                "MODELO/CODIGO",
            ]),
            description: strings(&[
                "DESCRIPCIÓN",
                "DESCRIPCION",
                "DETALLE",
                "DESCRIPCION/DETALLE",
            ]),
            kind: strings(&["TIPO", "CATEGORIA", "LÍNEA", "LINEA"]),
            price_ars: strings(&[
                "PESOS",
                "ARS",
                "PRECIO",
                "PRECIO ARS",
                "PRECIO $",
                "$",
                "PRECIO (ARS)",
            ]),
            price_usd: strings(&[
                "DOLARES",
                "DOLARES USD",
                "USD",
                "DOLAR",
                "U$S",
                "PRECIO USD",
                "PRECIO (USD)",
            ]),
            image: strings(&["IMAGEN"]),
        }
    }
}

/// Numeric-column detection used when no ARS price header matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceFallback {
    /// Data rows sampled per column
    pub sample_rows: usize,
    /// Minimum numeric-looking cells for a column to qualify
    pub min_hits: usize,
}

impl Default for PriceFallback {
    fn default() -> Self {
        Self {
            sample_rows: 10,
            min_hits: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Storage key holding the serialized cart
    pub key: String,
    /// Backing file of the key-value storage
    pub storage_path: PathBuf,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            key: "deffer_cart_v1".to_string(),
            storage_path: PathBuf::from(".vitrina/storage.json"),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> CatalogResult<Self> {
        let config: CatalogConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an optional path, falling back to defaults
    pub fn load(path: Option<&Path>) -> CatalogResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CatalogResult<()> {
        if self.source.trim().is_empty() {
            return Err(CatalogError::Config("'source' must not be empty".to_string()));
        }
        if self.cart.key.trim().is_empty() {
            return Err(CatalogError::Config("'cart.key' must not be empty".to_string()));
        }
        if self.price_fallback.sample_rows == 0 {
            return Err(CatalogError::Config(
                "'price_fallback.sample_rows' must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Category label for a raw sheet name
    pub fn category_label(&self, sheet_name: &str) -> String {
        if let Some(label) = self.sheet_labels.get(sheet_name) {
            return label.clone();
        }
        let mut chars = sheet_name.chars();
        match chars.next() {
            Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
            None => String::new(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
