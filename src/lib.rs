//! Vitrina - product catalog backed by a spreadsheet workbook
//!
//! Each worksheet of the workbook is a category. Rows are normalized into
//! [`Product`] records through loose header matching, locale-aware price
//! parsing and stable slug ids. The catalog is then filtered, sorted and
//! grouped, and paired with a persisted cart that compiles into a WhatsApp
//! order message.
//!
//! # Example
//!
//! ```no_run
//! use vitrina::config::CatalogConfig;
//! use vitrina::core::{SortMode, ViewQuery};
//! use vitrina::loader::load_catalog_blocking;
//!
//! let config = CatalogConfig::default();
//! let catalog = load_catalog_blocking(&config)?;
//!
//! println!("Products: {}", catalog.len());
//! let query = ViewQuery::new("domo", "", SortMode::PriceAsc);
//! for product in vitrina::core::view::apply(&catalog, &query) {
//!     println!("{} {:?}", product.code, product.price_ars);
//! }
//! # Ok::<(), vitrina::error::CatalogError>(())
//! ```

pub mod api;
pub mod app;
pub mod cart;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod loader;
pub mod types;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use types::{Catalog, Cell, Product, SheetGrid};
