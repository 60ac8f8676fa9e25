//! Catalog item produced from one spreadsheet data row.

use serde::{Deserialize, Serialize};

/// One archive to acquire.
///
/// `name` is `"<counter>_<key>"` and doubles as the unit directory name in the
/// result store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogItem {
    /// Unique unit name
    pub name: String,

    /// Remote archive location
    pub url: String,
}

impl CatalogItem {
    /// Build an item from its run-wide ordinal and the row key cell.
    pub fn new(ordinal: usize, key: &str, url: impl Into<String>) -> Self {
        Self {
            name: format!("{}_{}", ordinal, key),
            url: url.into(),
        }
    }
}
