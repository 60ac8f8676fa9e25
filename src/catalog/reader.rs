// src/catalog/reader.rs

//! Lazy catalog iteration.
//!
//! Each sheet's header row selects the URL column (last header containing the
//! marker, case-insensitive). Every later row yields one `CatalogItem` named
//! `"<ordinal>_<key>"`, the ordinal counting from 1 across all sheets.

use std::vec;

use crate::error::{AppError, Result};
use crate::models::{CatalogConfig, CatalogItem};

use super::Workbook;

/// Single-pass iterator over the catalog items of a workbook.
///
/// Yields `Err` at most once, after which the sequence ends.
pub struct CatalogReader<W: Workbook> {
    workbook: W,
    marker: String,
    key_column: usize,
    sheets: vec::IntoIter<String>,
    current: Option<SheetCursor>,
    counter: usize,
    finished: bool,
}

struct SheetCursor {
    name: String,
    rows: vec::IntoIter<Vec<String>>,
    row_index: usize,
    url_column: Option<usize>,
}

impl<W: Workbook> CatalogReader<W> {
    pub fn new(workbook: W, config: &CatalogConfig) -> Self {
        let sheets = workbook.sheet_names().into_iter();
        Self {
            workbook,
            marker: config.url_column_marker.to_lowercase(),
            key_column: config.key_column,
            sheets,
            current: None,
            counter: 1,
            finished: false,
        }
    }

    /// Load the next sheet; `Ok(false)` when none remain.
    fn advance_sheet(&mut self) -> Result<bool> {
        let Some(name) = self.sheets.next() else {
            return Ok(false);
        };
        let rows = self.workbook.rows(&name)?;
        log::debug!("Reading sheet '{}' ({} rows)", name, rows.len());

        self.current = Some(SheetCursor {
            name,
            rows: rows.into_iter(),
            row_index: 0,
            url_column: None,
        });
        Ok(true)
    }

    fn next_item(&mut self) -> Result<Option<CatalogItem>> {
        loop {
            let Some(cursor) = self.current.as_mut() else {
                if !self.advance_sheet()? {
                    return Ok(None);
                }
                continue;
            };

            let Some(row) = cursor.rows.next() else {
                self.current = None;
                continue;
            };
            let row_index = cursor.row_index;
            cursor.row_index += 1;

            if row_index == 0 {
                cursor.url_column = find_url_column(&row, &self.marker);
                match cursor.url_column {
                    Some(column) => log::debug!(
                        "Sheet '{}': url column is {} ({:?})",
                        cursor.name,
                        column,
                        row[column]
                    ),
                    None => log::warn!(
                        "Sheet '{}': no header matches '{}'",
                        cursor.name,
                        self.marker
                    ),
                }
                continue;
            }

            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }

            let Some(url_column) = cursor.url_column else {
                return Err(AppError::ColumnNotFound {
                    sheet: cursor.name.clone(),
                    row: row_index,
                });
            };

            let key = cell(&row, self.key_column);
            let url = cell(&row, url_column);
            let item = CatalogItem::new(self.counter, key, url);
            self.counter += 1;

            return Ok(Some(item));
        }
    }
}

impl<W: Workbook> Iterator for CatalogReader<W> {
    type Item = Result<CatalogItem>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.next_item() {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Index of the last header cell containing `marker` (already lowercase).
fn find_url_column(header: &[String], marker: &str) -> Option<usize> {
    header
        .iter()
        .rposition(|cell| cell.to_lowercase().contains(marker))
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(|s| s.trim()).unwrap_or("")
}
