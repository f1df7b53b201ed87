//! Header resolver: maps a sheet's header row to semantic columns

use crate::config::{ColumnCandidates, PriceFallback};
use crate::core::cell::is_numeric_like;
use crate::types::{Cell, SheetGrid};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

/// Normalize a header label: trim, uppercase, drop diacritics, collapse spaces
pub fn normalize_header(label: &str) -> String {
    let upper = label.trim().to_uppercase();
    let folded: String = upper.nfd().filter(|c| !is_combining_diacritic(*c)).collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Find the column for a field. Exact matches are tried for every candidate
/// before any substring match.
pub fn find_column<S: AsRef<str>>(headers: &[String], candidates: &[S]) -> Option<usize> {
    let headers: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    let candidates: Vec<String> = candidates
        .iter()
        .map(|c| normalize_header(c.as_ref()))
        .filter(|c| !c.is_empty())
        .collect();

    candidates
        .iter()
        .find_map(|c| headers.iter().position(|h| h == c))
        .or_else(|| {
            candidates
                .iter()
                .find_map(|c| headers.iter().position(|h| h.contains(c.as_str())))
        })
}

/// Pick the most numeric-looking column among the first data rows.
///
/// Requires a header plus at least two data rows. Ties go to the leftmost
/// column; the winner must reach `min_hits`.
pub fn guess_price_column(grid: &SheetGrid, fallback: &PriceFallback) -> Option<usize> {
    if grid.rows.len() <= 2 {
        return None;
    }
    let sample_end = grid.rows.len().min(fallback.sample_rows + 1);

    let mut best: Option<(usize, usize)> = None;
    for col in 0..grid.width() {
        let hits = (1..sample_end)
            .filter(|&row| is_numeric_like(grid.cell(row, col)))
            .count();
        if hits > best.map_or(0, |(_, h)| h) {
            best = Some((col, hits));
        }
    }

    best.filter(|(_, hits)| *hits >= fallback.min_hits)
        .map(|(col, _)| col)
}

/// Resolved column indices for one sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub code: usize,
    pub description: Option<usize>,
    pub kind: Option<usize>,
    pub price_ars: Option<usize>,
    pub price_usd: Option<usize>,
    pub image: Option<usize>,
}

impl ColumnMap {
    /// Resolve all semantic columns from the header row of `grid`
    pub fn resolve(
        grid: &SheetGrid,
        candidates: &ColumnCandidates,
        fallback: &PriceFallback,
    ) -> Self {
        let headers: Vec<String> = grid
            .rows
            .first()
            .map(|row| row.iter().map(Cell::text).collect())
            .unwrap_or_default();

        let code = find_column(&headers, &candidates.code).unwrap_or(0);
        let description = find_column(&headers, &candidates.description).or(Some(1));
        let kind = find_column(&headers, &candidates.kind);
        let price_usd = find_column(&headers, &candidates.price_usd);
        let image = find_column(&headers, &candidates.image);
        let price_ars = find_column(&headers, &candidates.price_ars).or_else(|| {
            let guessed = guess_price_column(grid, fallback);
            debug!(sheet = %grid.name, column = ?guessed, "ARS price header not found, guessed");
            guessed
        });

        let map = Self {
            code,
            description,
            kind,
            price_ars,
            price_usd,
            image,
        };
        debug!(sheet = %grid.name, columns = ?map, "resolved columns");
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn grid(rows: &[&[&str]]) -> SheetGrid {
        SheetGrid::new(
            "TEST",
            rows.iter()
                .map(|r| r.iter().map(|c| Cell::from(*c)).collect())
                .collect(),
        )
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  descripción  "), "DESCRIPCION");
        assert_eq!(normalize_header("Precio   (ARS)"), "PRECIO (ARS)");
        assert_eq!(normalize_header("Línea\t de  producto"), "LINEA DE PRODUCTO");
        assert_eq!(normalize_header(""), "");
    }

    #[test]
    fn test_find_column_exact() {
        let h = headers(&["Modelo", "Descripción", "Pesos"]);
        assert_eq!(find_column(&h, &["PESOS"]), Some(2));
        assert_eq!(find_column(&h, &["DESCRIPCION"]), Some(1));
    }

    #[test]
    fn test_find_column_candidate_priority() {
        let h = headers(&["CODIGO", "MODELO"]);
        assert_eq!(find_column(&h, &["MODELO", "CODIGO"]), Some(1));
        assert_eq!(find_column(&h, &["CODIGO", "MODELO"]), Some(0));
    }

    #[test]
    fn test_exact_beats_substring() {
        // "PRECIO LISTA" contains PRECIO at column 0, but ARS matches exactly at 2
        let h = headers(&["PRECIO LISTA", "MODELO", "ARS"]);
        assert_eq!(find_column(&h, &["PRECIO", "ARS"]), Some(2));
    }

    #[test]
    fn test_find_column_substring() {
        let h = headers(&["Cod. interno", "Detalle del producto"]);
        assert_eq!(find_column(&h, &["COD."]), Some(0));
        assert_eq!(find_column(&h, &["DESCRIPCION", "DETALLE"]), Some(1));
    }

    #[test]
    fn test_find_column_not_found() {
        let h = headers(&["A", "B"]);
        assert_eq!(find_column(&h, &["IMAGEN"]), None);
        assert_eq!(find_column(&[], &["IMAGEN"]), None);
    }

    #[test]
    fn test_guess_price_column() {
        let g = grid(&[
            &["X", "Y", "Z"],
            &["AX1", "Domo", "12.500"],
            &["AX2", "Bala", "$ 9.800,50"],
            &["AX3", "PTZ", ""],
        ]);
        assert_eq!(guess_price_column(&g, &PriceFallback::default()), Some(2));
    }

    #[test]
    fn test_guess_price_column_below_threshold() {
        let g = grid(&[
            &["X", "Y"],
            &["AX1", "12.500"],
            &["AX2", "consultar"],
            &["AX3", "consultar"],
        ]);
        assert_eq!(guess_price_column(&g, &PriceFallback::default()), None);
        let lenient = PriceFallback {
            sample_rows: 10,
            min_hits: 1,
        };
        assert_eq!(guess_price_column(&g, &lenient), Some(1));
    }

    #[test]
    fn test_guess_price_column_needs_two_data_rows() {
        let g = grid(&[&["X", "Y"], &["AX1", "12.500"]]);
        assert_eq!(guess_price_column(&g, &PriceFallback::default()), None);
    }

    #[test]
    fn test_guess_price_column_sample_window() {
        let mut rows: Vec<Vec<Cell>> = vec![vec![Cell::from("X"), Cell::from("Y")]];
        for _ in 0..3 {
            rows.push(vec![Cell::from("n/a"), Cell::from("n/a")]);
        }
        for _ in 0..3 {
            rows.push(vec![Cell::from("n/a"), Cell::Number(10.0)]);
        }
        let g = SheetGrid::new("S", rows);
        let narrow = PriceFallback {
            sample_rows: 3,
            min_hits: 1,
        };
        assert_eq!(guess_price_column(&g, &narrow), None);
        assert_eq!(guess_price_column(&g, &PriceFallback::default()), Some(1));
    }

    #[test]
    fn test_resolve_defaults() {
        let g = grid(&[&["foo", "bar"], &["AX1", "Domo"]]);
        let map = ColumnMap::resolve(&g, &ColumnCandidates::default(), &PriceFallback::default());
        assert_eq!(map.code, 0);
        assert_eq!(map.description, Some(1));
        assert_eq!(map.kind, None);
        assert_eq!(map.price_ars, None);
        assert_eq!(map.price_usd, None);
        assert_eq!(map.image, None);
    }

    #[test]
    fn test_resolve_full_header() {
        let g = grid(&[
            &["Imagen", "Tipo", "Código", "Descripción", "Dólares", "Pesos"],
            &["", "", "", "", "", ""],
        ]);
        let map = ColumnMap::resolve(&g, &ColumnCandidates::default(), &PriceFallback::default());
        assert_eq!(
            map,
            ColumnMap {
                code: 2,
                description: Some(3),
                kind: Some(1),
                price_ars: Some(5),
                price_usd: Some(4),
                image: Some(0),
            }
        );
    }
}
