//! Application controller: owns the loaded catalog, the cart and the config

use crate::cart::message::{inquiry_message, total_text, whatsapp_link};
use crate::cart::{CartLine, CartStorage, CartStore, FileStorage};
use crate::config::CatalogConfig;
use crate::core::view::{self, CatalogCounts, CategoryGroup, ViewQuery};
use crate::error::{CatalogError, CatalogResult};
use crate::loader;
use crate::types::{Catalog, Product};
use tracing::info;

/// Explicit application state replacing page-level globals
#[derive(Debug)]
pub struct CatalogApp<S: CartStorage> {
    config: CatalogConfig,
    catalog: Catalog,
    cart: CartStore<S>,
}

impl CatalogApp<FileStorage> {
    /// Load the configured workbook and open the file-backed cart
    pub fn open_blocking(config: CatalogConfig) -> CatalogResult<Self> {
        let catalog = loader::load_catalog_blocking(&config)?;
        Ok(Self::with_file_cart(config, catalog))
    }

    /// Async variant of [`CatalogApp::open_blocking`]
    pub async fn open(config: CatalogConfig) -> CatalogResult<Self> {
        let catalog = loader::load_catalog(&config).await?;
        Ok(Self::with_file_cart(config, catalog))
    }

    fn with_file_cart(config: CatalogConfig, catalog: Catalog) -> Self {
        let storage = FileStorage::new(&config.cart.storage_path);
        let cart = CartStore::open(storage, config.cart.key.clone());
        Self::new(config, catalog, cart)
    }
}

impl<S: CartStorage> CatalogApp<S> {
    pub fn new(config: CatalogConfig, catalog: Catalog, cart: CartStore<S>) -> Self {
        Self {
            config,
            catalog,
            cart,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// Swap in a freshly loaded catalog; the cart is kept as is
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        info!(products = catalog.len(), "catalog replaced");
        self.catalog = catalog;
    }

    /// Reload the workbook from the configured source
    pub async fn reload(&mut self) -> CatalogResult<()> {
        let catalog = loader::load_catalog(&self.config).await?;
        self.replace_catalog(catalog);
        Ok(())
    }

    pub fn product(&self, id: &str) -> CatalogResult<&Product> {
        self.catalog
            .get(id)
            .ok_or_else(|| CatalogError::UnknownProduct(id.to_string()))
    }

    /// Filtered and sorted products
    pub fn view(&self, query: &ViewQuery) -> Vec<&Product> {
        view::apply(&self.catalog, query)
    }

    /// Filtered products grouped by category in document order
    pub fn grouped_view(&self, query: &ViewQuery) -> Vec<CategoryGroup<'_>> {
        view::group_by_category(&self.view(query))
    }

    pub fn counts(&self, visible: usize) -> CatalogCounts {
        CatalogCounts {
            total: self.catalog.len(),
            categories: self.catalog.categories.len(),
            visible,
            in_cart: self.cart.count(),
        }
    }

    /// Add one unit of a product shown in the catalog
    pub fn add_to_cart(&mut self, id: &str) -> CatalogResult<u32> {
        self.product(id)?;
        self.cart.add(id)
    }

    pub fn increment(&mut self, id: &str) -> CatalogResult<u32> {
        self.cart.increment(id)
    }

    pub fn decrement(&mut self, id: &str) -> CatalogResult<u32> {
        self.cart.decrement(id)
    }

    pub fn remove(&mut self, id: &str) -> CatalogResult<u32> {
        self.cart.remove(id)
    }

    pub fn cart_lines(&self) -> Vec<CartLine<'_>> {
        self.cart.lines(&self.catalog)
    }

    pub fn cart_total(&self) -> f64 {
        self.cart.total_ars(&self.catalog)
    }

    pub fn cart_total_text(&self) -> String {
        total_text(self.cart_total())
    }

    pub fn order_message(&self) -> String {
        self.cart.order_message(&self.catalog)
    }

    /// WhatsApp link carrying the whole cart
    pub fn order_link(&self) -> String {
        whatsapp_link(&self.config.whatsapp_number, &self.order_message())
    }

    /// WhatsApp link asking about a single product
    pub fn inquiry_link(&self, id: &str) -> CatalogResult<String> {
        let product = self.product(id)?;
        Ok(whatsapp_link(
            &self.config.whatsapp_number,
            &inquiry_message(product),
        ))
    }
}
