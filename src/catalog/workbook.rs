// src/catalog/workbook.rs

//! Tabular sources backing the catalog.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Data, Reader, Sheets, open_workbook_auto};

use crate::error::Result;

/// A workbook seen as named sheets of string cells.
pub trait Workbook: Send {
    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// All rows of a sheet, row 0 being the header.
    fn rows(&mut self, sheet: &str) -> Result<Vec<Vec<String>>>;
}

/// Workbook backed by an `.xlsx`/`.xls`/`.ods` file.
pub struct SpreadsheetWorkbook {
    inner: Sheets<BufReader<File>>,
}

impl SpreadsheetWorkbook {
    /// Open a workbook, detecting the format from the extension.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let inner = open_workbook_auto(path)?;
        Ok(Self { inner })
    }
}

impl Workbook for SpreadsheetWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names()
    }

    fn rows(&mut self, sheet: &str) -> Result<Vec<Vec<String>>> {
        let range = self.inner.worksheet_range(sheet)?;

        // Ranges start at the first used cell; pad so indices stay absolute.
        let (first_row, first_col) = range.start().unwrap_or((0, 0));
        let mut rows: Vec<Vec<String>> = vec![Vec::new(); first_row as usize];

        for row in range.rows() {
            let mut cells = vec![String::new(); first_col as usize];
            cells.extend(row.iter().map(cell_text));
            rows.push(cells);
        }

        Ok(rows)
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// Workbook held in memory, sheets in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<(String, Vec<Vec<String>>)>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet.
    pub fn with_sheet<R, C>(mut self, name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        self.sheets.push((name.into(), rows));
        self
    }
}

impl Workbook for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn rows(&mut self, sheet: &str) -> Result<Vec<Vec<String>>> {
        Ok(self
            .sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default())
    }
}
