//! Workbook import
//!
//! Reads xlsx/xlsm/xlsb/xls/ods workbooks into plain sheet grids so the
//! normalization core never touches the workbook reader.

mod importer;

pub use importer::WorkbookImporter;
