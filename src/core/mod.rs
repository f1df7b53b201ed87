//! Spreadsheet normalization core: cells, headers, sheets, catalog and view

pub mod catalog;
pub mod cell;
pub mod header;
pub mod sheet;
pub mod view;

pub use catalog::assemble;
pub use header::ColumnMap;
pub use view::{SortMode, ViewQuery};
