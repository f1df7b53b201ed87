use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

//==============================================================================
// Workbook Cells
//==============================================================================

/// A single spreadsheet cell, independent of the workbook reader
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// Display text of the cell (numbers print without a trailing `.0`)
    pub fn text(&self) -> String {
        self.to_string()
    }

    /// Check if the cell has no visible content
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

/// One worksheet as an implicit grid; row 0 is the header row
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetGrid {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetGrid {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Cell at (row, col), `Empty` when outside the grid
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Widest row length
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

//==============================================================================
// Catalog Model
//==============================================================================

/// A normalized catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub code: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub price_ars: Option<f64>,
    pub price_usd: Option<f64>,
    pub image: String,
    pub sheet_index: usize,
    pub row_index: usize,
}

impl Product {
    /// ARS price usable for totals and sorting (strictly positive)
    pub fn effective_ars(&self) -> Option<f64> {
        self.price_ars.filter(|p| *p > 0.0)
    }

    /// Compare two products by document order (sheet, then row)
    pub fn document_cmp(&self, other: &Product) -> Ordering {
        (self.sheet_index, self.row_index).cmp(&(other.sheet_index, other.row_index))
    }

    /// Text searched by the catalog filter
    pub fn haystack(&self) -> String {
        format!(
            "{} {} {} {}",
            self.code, self.category, self.kind, self.description
        )
        .to_lowercase()
    }
}

/// The fully assembled catalog of one workbook load
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    #[serde(skip)]
    by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, categories: Vec<String>) -> Self {
        let by_id = products
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.id.clone(), idx))
            .collect();
        Self {
            products,
            categories,
            by_id,
        }
    }

    /// Look up a product by id
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.by_id.get(id).map(|&idx| &self.products[idx])
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
