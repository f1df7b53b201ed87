//! Workbook importer implementation - workbook bytes → sheet grids

use crate::error::CatalogResult;
use crate::types::{Cell, SheetGrid};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};

/// Workbook importer producing one grid per worksheet, in workbook order
pub struct WorkbookImporter {
    bytes: Vec<u8>,
}

impl WorkbookImporter {
    /// Create an importer over in-memory workbook bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Create an importer by reading a workbook file
    pub fn from_path<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        Ok(Self::from_bytes(std::fs::read(path.as_ref())?))
    }

    /// Decode every worksheet.
    ///
    /// A worksheet that cannot be read yields an empty grid so its category
    /// is still listed.
    pub fn import(&self) -> CatalogResult<Vec<SheetGrid>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(self.bytes.as_slice()))?;

        let sheet_names = workbook.sheet_names().to_vec();
        let mut sheets = Vec::with_capacity(sheet_names.len());

        for name in sheet_names {
            let rows = match workbook.worksheet_range(&name) {
                Ok(range) => self.range_to_rows(&range),
                Err(e) => {
                    warn!(sheet = %name, error = %e, "could not read worksheet");
                    Vec::new()
                }
            };
            debug!(sheet = %name, rows = rows.len(), "imported worksheet");
            sheets.push(SheetGrid::new(name, rows));
        }

        Ok(sheets)
    }

    /// Used range of the sheet as rows; the first row is the header
    fn range_to_rows(&self, range: &Range<Data>) -> Vec<Vec<Cell>> {
        if range.is_empty() {
            return Vec::new();
        }
        range
            .rows()
            .map(|row| row.iter().map(|data| self.convert_cell(data)).collect())
            .collect()
    }

    /// Convert a calamine cell into a reader-independent `Cell`
    fn convert_cell(&self, data: &Data) -> Cell {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) if s.is_empty() => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(e) => Cell::Text(e.to_string()),
        }
    }
}
