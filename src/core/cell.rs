//! Cell parser: locale-tolerant numbers from raw spreadsheet cells

use crate::types::Cell;

/// Parse a cell into a finite number.
///
/// Text is stripped to digits, `,`, `.` and `-`. When both separators are
/// present the one appearing last is the decimal separator; a lone comma is
/// always decimal.
pub fn parse_number_like(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) => n.is_finite().then_some(*n),
        Cell::Text(s) => parse_number_text(s),
        Cell::Empty | Cell::Bool(_) => None,
    }
}

/// Parse a price: a finite, non-negative number
pub fn parse_price(cell: &Cell) -> Option<f64> {
    parse_number_like(cell).filter(|n| *n >= 0.0)
}

fn parse_number_text(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    let last_comma = cleaned.rfind(',');
    let last_dot = cleaned.rfind('.');
    let normalized = match (last_comma, last_dot) {
        (Some(comma), Some(dot)) if comma > dot => {
            cleaned.replace('.', "").replacen(',', ".", 1)
        }
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) => cleaned.replacen(',', ".", 1),
        _ => cleaned,
    };

    if normalized.is_empty() {
        return None;
    }
    normalized
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Loose numeric check used by the price-column fallback.
///
/// Dots are read as thousands separators and commas as decimals; `$` and
/// whitespace are ignored.
pub fn is_numeric_like(cell: &Cell) -> bool {
    let text = cell.text();
    let text = text.trim();
    if text.is_empty() {
        return false;
    }
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '.' && *c != '$' && !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    !cleaned.is_empty() && cleaned.parse::<f64>().map_or(false, |n| n.is_finite())
}
