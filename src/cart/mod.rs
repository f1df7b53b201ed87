//! Shopping cart: quantities per product id behind a storage port
//!
//! Every mutation is persisted immediately. Ids are not validated against
//! the catalog; ids missing from the current catalog are skipped when
//! computing totals and order lines.

pub mod message;
mod storage;

pub use storage::{CartStorage, FileStorage, MemoryStorage};

use crate::error::CatalogResult;
use crate::types::{Catalog, Product};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A cart entry resolved against the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    pub product: &'a Product,
    pub quantity: u32,
}

impl CartLine<'_> {
    /// ARS subtotal, when the product has a positive ARS price
    pub fn subtotal(&self) -> Option<f64> {
        self.product
            .effective_ars()
            .map(|price| price * f64::from(self.quantity))
    }
}

/// Persisted quantity map keyed by product id
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    storage: S,
    key: String,
    items: BTreeMap<String, u32>,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the cart stored under `key`. Unreadable, corrupt or non-object
    /// content is an empty cart.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = match storage.get_item(&key) {
            Ok(Some(raw)) => parse_items(&raw),
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "could not read stored cart");
                BTreeMap::new()
            }
        };
        debug!(key = %key, entries = items.len(), "cart opened");
        Self {
            storage,
            key,
            items,
        }
    }

    /// Raw entries, including ids missing from the catalog
    pub fn items(&self) -> &BTreeMap<String, u32> {
        &self.items
    }

    pub fn quantity(&self, id: &str) -> u32 {
        self.items.get(id).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units (stale ids included)
    pub fn count(&self) -> u64 {
        self.items.values().map(|&q| u64::from(q)).sum()
    }

    /// Add one unit
    pub fn add(&mut self, id: &str) -> CatalogResult<u32> {
        self.increment(id)
    }

    pub fn increment(&mut self, id: &str) -> CatalogResult<u32> {
        let quantity = self.quantity(id).saturating_add(1);
        self.set_quantity(id, quantity)
    }

    /// Remove one unit; reaching zero removes the entry
    pub fn decrement(&mut self, id: &str) -> CatalogResult<u32> {
        let quantity = self.quantity(id).saturating_sub(1);
        self.set_quantity(id, quantity)
    }

    /// Drop the entry entirely
    pub fn remove(&mut self, id: &str) -> CatalogResult<u32> {
        self.set_quantity(id, 0)
    }

    /// Persist first; the in-memory map only changes once storage accepted it
    fn set_quantity(&mut self, id: &str, quantity: u32) -> CatalogResult<u32> {
        let mut next = self.items.clone();
        if quantity == 0 {
            next.remove(id);
        } else {
            next.insert(id.to_string(), quantity);
        }
        let raw = serde_json::to_string(&next)?;
        self.storage.set_item(&self.key, &raw)?;
        self.items = next;
        Ok(quantity)
    }

    /// Entries present in the catalog, in document order
    pub fn lines<'a>(&self, catalog: &'a Catalog) -> Vec<CartLine<'a>> {
        let mut lines: Vec<CartLine<'a>> = self
            .items
            .iter()
            .filter_map(|(id, &quantity)| {
                catalog.get(id).map(|product| CartLine { product, quantity })
            })
            .collect();
        lines.sort_by(|a, b| a.product.document_cmp(b.product));
        lines
    }

    /// Sum of ARS subtotals; products without an ARS price add nothing
    pub fn total_ars(&self, catalog: &Catalog) -> f64 {
        self.lines(catalog)
            .iter()
            .filter_map(CartLine::subtotal)
            .sum()
    }

    /// Order summary text for the current catalog
    pub fn order_message(&self, catalog: &Catalog) -> String {
        message::order_message(&self.lines(catalog))
    }
}

/// Positive integer quantities of a stored JSON object
fn parse_items(raw: &str) -> BTreeMap<String, u32> {
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) else {
        warn!("stored cart is not a JSON object, starting empty");
        return BTreeMap::new();
    };
    map.into_iter()
        .filter_map(|(id, value)| {
            let quantity = value.as_u64().and_then(|q| u32::try_from(q).ok())?;
            (quantity > 0).then_some((id, quantity))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "deffer_cart_v1";

    fn product(id: &str, row: usize, ars: Option<f64>) -> Product {
        Product {
            id: id.to_string(),
            code: id.to_uppercase(),
            category: "Dahua".to_string(),
            kind: String::new(),
            description: String::new(),
            price_ars: ars,
            price_usd: None,
            image: String::new(),
            sheet_index: 0,
            row_index: row,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                product("a-1", 0, Some(1000.0)),
                product("b-2", 1, None),
                product("c-3", 2, Some(250.0)),
            ],
            vec!["Dahua".to_string()],
        )
    }

    fn empty_cart() -> CartStore<MemoryStorage> {
        CartStore::open(MemoryStorage::new(), KEY)
    }

    #[test]
    fn test_add_and_persist() {
        let mut cart = empty_cart();
        assert_eq!(cart.add("a-1").unwrap(), 1);
        assert_eq!(cart.add("a-1").unwrap(), 2);
        assert_eq!(cart.count(), 2);
        let stored = cart.storage.get_item(KEY).unwrap().unwrap();
        assert_eq!(stored, "{\"a-1\":2}");
    }

    /// Storage that can be read but refuses every write
    struct ReadOnlyStorage(MemoryStorage);

    impl CartStorage for ReadOnlyStorage {
        fn get_item(&self, key: &str) -> CatalogResult<Option<String>> {
            self.0.get_item(key)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> CatalogResult<()> {
            Err(std::io::Error::other("disk full").into())
        }
    }

    #[test]
    fn test_failed_write_leaves_cart_unchanged() {
        let storage = ReadOnlyStorage(MemoryStorage::with_item(KEY, r#"{"a-1":2}"#));
        let mut cart = CartStore::open(storage, KEY);

        assert!(cart.add("b-2").is_err());
        assert!(cart.increment("a-1").is_err());
        assert!(cart.decrement("a-1").is_err());
        assert!(cart.remove("a-1").is_err());

        assert_eq!(cart.quantity("a-1"), 2);
        assert_eq!(cart.quantity("b-2"), 0);
        assert_eq!(cart.count(), 2);
        assert_eq!(cart.storage.get_item(KEY).unwrap().unwrap(), r#"{"a-1":2}"#);
    }

    #[test]
    fn test_decrement_never_negative() {
        let mut cart = empty_cart();
        cart.add("a-1").unwrap();
        assert_eq!(cart.decrement("a-1").unwrap(), 0);
        assert!(cart.is_empty());
        assert_eq!(cart.decrement("a-1").unwrap(), 0);
        assert_eq!(cart.quantity("a-1"), 0);
        assert!(!cart.items().contains_key("a-1"));
    }

    #[test]
    fn test_remove() {
        let mut cart = empty_cart();
        cart.add("a-1").unwrap();
        cart.add("a-1").unwrap();
        cart.add("b-2").unwrap();
        cart.remove("a-1").unwrap();
        assert_eq!(cart.count(), 1);
        assert_eq!(cart.storage.get_item(KEY).unwrap().unwrap(), "{\"b-2\":1}");
    }

    #[test]
    fn test_open_ignores_corrupt_content() {
        for raw in ["not json", "[1,2]", "42", "null"] {
            let cart = CartStore::open(MemoryStorage::with_item(KEY, raw), KEY);
            assert!(cart.is_empty(), "content {raw:?} should be an empty cart");
        }
    }

    #[test]
    fn test_open_drops_invalid_quantities() {
        let raw = r#"{"a-1":2,"b-2":0,"c-3":-1,"d-4":"x","e-5":1.5}"#;
        let cart = CartStore::open(MemoryStorage::with_item(KEY, raw), KEY);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity("a-1"), 2);
    }

    #[test]
    fn test_stale_ids_skipped_in_total_and_message() {
        let cart = CartStore::open(MemoryStorage::with_item(KEY, r#"{"a-1":2}"#), KEY);
        let catalog = Catalog::new(vec![product("z-9", 0, Some(10.0))], vec![]);
        assert_eq!(cart.total_ars(&catalog), 0.0);
        let message = cart.order_message(&catalog);
        assert!(!message.contains("A-1"));
        assert_eq!(
            message,
            "Hola! Quiero consultar / pedir estos productos:\n\n\nGracias!"
        );
        // stale entries stay stored
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_total_ignores_unpriced() {
        let mut cart = empty_cart();
        cart.add("a-1").unwrap();
        cart.add("a-1").unwrap();
        cart.add("b-2").unwrap();
        cart.add("c-3").unwrap();
        assert_eq!(cart.total_ars(&catalog()), 2250.0);
    }

    #[test]
    fn test_lines_follow_document_order() {
        let mut cart = empty_cart();
        cart.add("c-3").unwrap();
        cart.add("a-1").unwrap();
        let catalog = catalog();
        let ids: Vec<&str> = cart
            .lines(&catalog)
            .iter()
            .map(|l| l.product.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a-1", "c-3"]);
    }
}
