//! Spreadsheet catalog access.
//!
//! - `Workbook`: opaque sheet/row/cell source
//! - `CatalogReader`: lazy `CatalogItem` sequence over a workbook

mod reader;
mod workbook;

pub use reader::CatalogReader;
pub use workbook::{MemoryWorkbook, SpreadsheetWorkbook, Workbook};
