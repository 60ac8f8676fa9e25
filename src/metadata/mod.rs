//! Descriptor normalization.
//!
//! Reads a unit's ISO 19139 XML descriptor into a `Metadata` record and
//! repairs its cited parties.

mod cleanup;
mod parser;

use std::path::Path;

use quick_xml::reader::Reader;

use crate::error::Result;
use crate::models::Metadata;

pub use cleanup::clean_cited_parties;
pub use parser::{RawDescriptor, read_descriptor};

/// Parse and clean the descriptor at `path`.
pub fn normalize_descriptor(path: &Path) -> Result<Metadata> {
    let reader = Reader::from_file(path)?;
    Ok(normalize(read_descriptor(reader)?))
}

/// Parse and clean a descriptor held in memory.
pub fn normalize_str(xml: &str) -> Result<Metadata> {
    Ok(normalize(read_descriptor(Reader::from_str(xml))?))
}

fn normalize(raw: RawDescriptor) -> Metadata {
    let mut record = raw.record;
    record.cited_parties = clean_cited_parties(raw.parties);
    record
}
