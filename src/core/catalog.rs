//! Catalog assembler: sheet ordering, category labels and the global list

use crate::config::CatalogConfig;
use crate::core::header::ColumnMap;
use crate::core::sheet::normalize_sheet;
use crate::types::{Catalog, Product, SheetGrid};
use std::collections::HashSet;
use tracing::{debug, info};

/// Order sheet names: preferred names that exist first (in preferred order),
/// then the rest in workbook order. Each sheet appears once.
pub fn order_sheets<'a>(workbook_order: &'a [String], preferred: &[String]) -> Vec<&'a str> {
    let mut ordered: Vec<&str> = Vec::with_capacity(workbook_order.len());
    let candidates = preferred
        .iter()
        .filter_map(|p| workbook_order.iter().find(|name| *name == p))
        .chain(workbook_order.iter());
    for name in candidates {
        if !ordered.contains(&name.as_str()) {
            ordered.push(name);
        }
    }
    ordered
}

/// Give every product a unique id. Sheets sharing a category label can
/// produce the same id; the later one gets its sheet index appended.
fn disambiguate_ids(products: &mut [Product]) {
    let mut seen: HashSet<String> = HashSet::with_capacity(products.len());
    for product in products.iter_mut() {
        if seen.insert(product.id.clone()) {
            continue;
        }
        let base = format!("{}-s{}", product.id, product.sheet_index);
        let mut candidate = base.clone();
        let mut n = 2;
        while seen.contains(&candidate) {
            candidate = format!("{}-{}", base, n);
            n += 1;
        }
        debug!(from = %product.id, to = %candidate, "duplicate product id renamed");
        product.id = candidate.clone();
        seen.insert(candidate);
    }
}

/// Build the catalog from the workbook's sheets (in workbook order)
pub fn assemble(sheets: &[SheetGrid], config: &CatalogConfig) -> Catalog {
    let names: Vec<String> = sheets.iter().map(|s| s.name.clone()).collect();
    let ordered = order_sheets(&names, &config.sheet_order);

    let mut products = Vec::new();
    let mut categories: Vec<String> = Vec::new();

    for (sheet_index, name) in ordered.into_iter().enumerate() {
        let Some(grid) = sheets.iter().find(|s| s.name == name) else {
            continue;
        };

        let category = config.category_label(name);
        if !categories.contains(&category) {
            categories.push(category.clone());
        }
        if grid.rows.is_empty() {
            debug!(sheet = name, "empty sheet");
            continue;
        }

        let columns = ColumnMap::resolve(grid, &config.columns, &config.price_fallback);
        let sheet_products = normalize_sheet(grid, &category, sheet_index, &columns);
        debug!(
            sheet = name,
            sheet_index,
            products = sheet_products.len(),
            "normalized sheet"
        );
        products.extend(sheet_products);
    }

    products.sort_by(|a, b| a.document_cmp(b));
    disambiguate_ids(&mut products);
    info!(
        products = products.len(),
        categories = categories.len(),
        "catalog assembled"
    );
    Catalog::new(products, categories)
}
