//! Sheet normalizer: one worksheet grid → ordered products

use crate::core::cell::parse_price;
use crate::core::header::ColumnMap;
use crate::types::{Product, SheetGrid};
use unicode_normalization::UnicodeNormalization;

/// Maximum slug length in characters
pub const SLUG_MAX_LEN: usize = 90;

/// Identifier-safe form of arbitrary text: diacritics folded, lowercase,
/// non-alphanumeric runs collapsed to a single hyphen, length-bounded.
pub fn slug(text: &str) -> String {
    let mut out = String::new();
    let mut pending_dash = false;
    for c in text.nfd().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else if !('\u{0300}'..='\u{036f}').contains(&c) {
            pending_dash = true;
        }
    }
    out.truncate(SLUG_MAX_LEN);
    out.trim_end_matches('-').to_string()
}

/// Stable product id: category slug, code slug and physical row number
pub fn product_id(category: &str, code: &str, physical_row: usize) -> String {
    format!("{}-{}-{}", slug(category), slug(code), physical_row)
}

/// Emit one product per data row with a non-blank code cell.
///
/// Row 0 is the header. `row_index` counts from the first data row.
pub fn normalize_sheet(
    grid: &SheetGrid,
    category: &str,
    sheet_index: usize,
    columns: &ColumnMap,
) -> Vec<Product> {
    let text_at = |row: usize, col: Option<usize>| -> String {
        col.map(|c| grid.cell(row, c).text().trim().to_string())
            .unwrap_or_default()
    };

    (1..grid.rows.len())
        .filter_map(|row| {
            let code = text_at(row, Some(columns.code));
            if code.is_empty() {
                return None;
            }
            Some(Product {
                id: product_id(category, &code, row),
                category: category.to_string(),
                kind: text_at(row, columns.kind),
                description: text_at(row, columns.description),
                price_ars: columns.price_ars.and_then(|c| parse_price(grid.cell(row, c))),
                price_usd: columns.price_usd.and_then(|c| parse_price(grid.cell(row, c))),
                image: text_at(row, columns.image),
                sheet_index,
                row_index: row - 1,
                code,
            })
        })
        .collect()
}
