//! Catalog view: filtering, sorting, relevance and grouping

use crate::core::header::normalize_header;
use crate::types::{Catalog, Product};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Label used for products without a category
pub const UNCATEGORIZED: &str = "Sin categoría";

/// Sort modes offered by the catalog view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortMode {
    /// Relevance with a query, document order without one
    #[default]
    Relevance,
    /// Document order (sheet, row)
    Excel,
    PriceAsc,
    PriceDesc,
    CodeAsc,
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "" | "relevance" => Ok(SortMode::Relevance),
            "excel" | "document" => Ok(SortMode::Excel),
            "priceasc" => Ok(SortMode::PriceAsc),
            "pricedesc" => Ok(SortMode::PriceDesc),
            "codeasc" | "code" => Ok(SortMode::CodeAsc),
            other => Err(format!(
                "unknown sort mode '{}' (expected relevance, excel, price-asc, price-desc, code-asc)",
                other
            )),
        }
    }
}

/// Filter and sort request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewQuery {
    pub text: String,
    pub category: String,
    pub sort: SortMode,
}

impl ViewQuery {
    pub fn new(text: impl Into<String>, category: impl Into<String>, sort: SortMode) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            sort,
        }
    }
}

/// Relevance of a product for a whitespace-separated query.
///
/// Per term: +6 when in the code, +3 when in the category, +1 when anywhere.
pub fn relevance_score(product: &Product, query: &str) -> u32 {
    let haystack = product.haystack();
    let code = product.code.to_lowercase();
    let category = product.category.to_lowercase();
    query
        .to_lowercase()
        .split_whitespace()
        .map(|term| {
            let mut score = 0;
            if code.contains(term) {
                score += 6;
            }
            if category.contains(term) {
                score += 3;
            }
            if haystack.contains(term) {
                score += 1;
            }
            score
        })
        .sum()
}

/// Apply the filter and sort of `query` to the catalog
pub fn apply<'a>(catalog: &'a Catalog, query: &ViewQuery) -> Vec<&'a Product> {
    let text = query.text.trim();
    let needle = text.to_lowercase();

    let mut items: Vec<&Product> = catalog
        .products
        .iter()
        .filter(|p| needle.is_empty() || p.haystack().contains(&needle))
        .filter(|p| query.category.is_empty() || p.category == query.category)
        .collect();

    let price = |p: &Product| p.effective_ars().unwrap_or(0.0);
    match query.sort {
        SortMode::Excel => items.sort_by(|a, b| a.document_cmp(b)),
        SortMode::PriceAsc => items.sort_by(|a, b| price(a).total_cmp(&price(b))),
        SortMode::PriceDesc => items.sort_by(|a, b| price(b).total_cmp(&price(a))),
        SortMode::CodeAsc => items.sort_by(|a, b| compare_codes(&a.code, &b.code)),
        SortMode::Relevance if !text.is_empty() => {
            items.sort_by_cached_key(|p| std::cmp::Reverse(relevance_score(p, text)))
        }
        SortMode::Relevance => items.sort_by(|a, b| a.document_cmp(b)),
    }
    items
}

fn compare_codes(a: &str, b: &str) -> Ordering {
    normalize_header(a)
        .cmp(&normalize_header(b))
        .then_with(|| a.cmp(b))
}

/// Products of one category, in document order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup<'a> {
    pub category: String,
    pub products: Vec<&'a Product>,
}

/// Group products by category. Groups are ordered by their first product's
/// document position; products inside a group are in document order.
pub fn group_by_category<'a>(products: &[&'a Product]) -> Vec<CategoryGroup<'a>> {
    let mut sorted = products.to_vec();
    sorted.sort_by(|a, b| a.document_cmp(b));

    let mut groups: Vec<CategoryGroup<'a>> = Vec::new();
    for product in sorted {
        let key = if product.category.is_empty() {
            UNCATEGORIZED
        } else {
            product.category.as_str()
        };
        match groups.iter_mut().find(|g| g.category == key) {
            Some(group) => group.products.push(product),
            None => groups.push(CategoryGroup {
                category: key.to_string(),
                products: vec![product],
            }),
        }
    }
    groups
}

/// Counters shown alongside the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub total: usize,
    pub categories: usize,
    pub visible: usize,
    pub in_cart: u64,
}
