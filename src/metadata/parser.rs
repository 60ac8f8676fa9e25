// src/metadata/parser.rs

//! ISO 19139 descriptor reader.
//!
//! Fields are located by fixed element paths below the root element, matched
//! on local names so any namespace prefix (`gmd:`, `gco:`) is accepted.
//! Anything not on a known path is ignored. Repeated scalar fields keep the
//! last value seen.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::Result;
use crate::models::{Metadata, RawCitedParty};

const DATA_IDENTIFICATION: &[&str] = &["identificationInfo", "MD_DataIdentification"];

const DATE_STAMP: &[&str] = &["dateStamp"];
const REFERENCE_SYSTEM_CODE: &[&str] = &[
    "referenceSystemInfo",
    "MD_ReferenceSystem",
    "referenceSystemIdentifier",
    "RS_Identifier",
    "code",
    "CharacterString",
];
const TITLE: &[&str] = &["citation", "CI_Citation", "title", "CharacterString"];
const CITATION_DATE: &[&str] = &["citation", "CI_Citation", "date", "CI_Date", "date"];
const CITED_PARTY: &[&str] = &["citation", "CI_Citation", "citedResponsibleParty"];
const ABSTRACT: &[&str] = &["abstract", "CharacterString"];
const KEYWORD: &[&str] = &[
    "descriptiveKeywords",
    "MD_Keywords",
    "keyword",
    "CharacterString",
];
const BOUNDING_BOX: &[&str] = &[
    "extent",
    "EX_Extent",
    "geographicElement",
    "EX_GeographicBoundingBox",
];

// Relative to `citedResponsibleParty`
const PARTY_PERSON: &[&str] = &["CI_ResponsibleParty", "individualName", "CharacterString"];
const PARTY_ORGANISATION: &[&str] = &[
    "CI_ResponsibleParty",
    "organisationName",
    "CharacterString",
];
const PARTY_ROLE: &[&str] = &["CI_ResponsibleParty", "role", "CI_RoleCode"];

/// Descriptor content before cited-party cleanup.
#[derive(Debug, Default)]
pub struct RawDescriptor {
    /// Every field except `cited_parties`, which is left empty
    pub record: Metadata,
    pub parties: Vec<RawCitedParty>,
}

/// Read a descriptor from any buffered source.
pub fn read_descriptor<R: BufRead>(mut reader: Reader<R>) -> Result<RawDescriptor> {
    let mut state = ParseState::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => state.open(e)?,
            Event::Empty(ref e) => {
                state.open(e)?;
                state.close();
            }
            Event::Text(ref e) => state.text.push_str(&e.unescape()?),
            Event::CData(ref e) => state.text.push_str(&String::from_utf8_lossy(e)),
            Event::End(_) => state.close(),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(state.finish())
}

#[derive(Default)]
struct ParseState {
    /// Local names of the open elements, root excluded
    stack: Vec<String>,
    /// Whether the root element has been opened
    in_root: bool,
    text: String,
    /// Stack depth of the open `citedResponsibleParty`, if any
    party_depth: Option<usize>,
    party: RawCitedParty,
    result: RawDescriptor,
}

impl ParseState {
    fn open(&mut self, e: &BytesStart) -> Result<()> {
        self.text.clear();
        if !self.in_root {
            self.in_root = true;
            return Ok(());
        }

        self.stack
            .push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());

        if self.party_depth.is_none() && self.under_identification(CITED_PARTY) {
            self.party_depth = Some(self.stack.len());
            self.party = RawCitedParty::default();
        }

        if self.party_path() == Some(PARTY_ROLE) {
            for attr in e.attributes().flatten() {
                if attr.key.local_name().as_ref() == b"codeListValue" {
                    self.party.role = attr.unescape_value()?.trim().to_string();
                }
            }
        }

        Ok(())
    }

    fn close(&mut self) {
        let text = std::mem::take(&mut self.text);
        let value = text.trim();

        if self.party_depth == Some(self.stack.len()) {
            self.result.parties.push(std::mem::take(&mut self.party));
            self.party_depth = None;
        } else if let Some(relative) = self.party_path() {
            if relative == PARTY_PERSON {
                self.party.person = value.to_string();
            } else if relative == PARTY_ORGANISATION {
                self.party.organization = value.to_string();
            } else if relative == PARTY_ROLE && self.party.role.is_empty() {
                self.party.role = value.to_string();
            }
        } else {
            self.assign(value);
        }

        self.stack.pop();
    }

    fn assign(&mut self, value: &str) {
        let record = &mut self.result.record;
        let stack = &self.stack;

        if is_value_under(stack, DATE_STAMP) {
            record.date_stamp = value.to_string();
        } else if path_is(stack, REFERENCE_SYSTEM_CODE) {
            record.reference_system_code = value.to_string();
        }

        let Some(identification) = strip_path(stack, DATA_IDENTIFICATION) else {
            return;
        };

        if path_is(identification, TITLE) {
            record.title = value.to_string();
        } else if is_value_under(identification, CITATION_DATE) {
            record.date = value.to_string();
        } else if path_is(identification, ABSTRACT) {
            record.summary = value.to_string();
        } else if path_is(identification, KEYWORD) {
            record.keywords.push(value.to_string());
        } else if let Some([bound, decimal]) = strip_path(identification, BOUNDING_BOX) {
            if decimal != "Decimal" {
                return;
            }
            let bbox = &mut record.bounding_box;
            match bound.as_str() {
                "westBoundLongitude" => bbox.west = value.to_string(),
                "eastBoundLongitude" => bbox.east = value.to_string(),
                "southBoundLatitude" => bbox.south = value.to_string(),
                "northBoundLatitude" => bbox.north = value.to_string(),
                _ => {}
            }
        }
    }

    fn under_identification(&self, path: &[&str]) -> bool {
        strip_path(&self.stack, DATA_IDENTIFICATION).is_some_and(|rest| path_is(rest, path))
    }

    /// Known path of the current element relative to the open party.
    fn party_path(&self) -> Option<&'static [&'static str]> {
        let depth = self.party_depth?;
        let relative = self.stack.get(depth..)?;
        [PARTY_PERSON, PARTY_ORGANISATION, PARTY_ROLE]
            .into_iter()
            .find(|known| path_is(relative, known))
    }

    fn finish(self) -> RawDescriptor {
        self.result
    }
}

/// Remainder of `stack` below `prefix`, if `stack` starts with it.
fn strip_path<'a>(stack: &'a [String], prefix: &[&str]) -> Option<&'a [String]> {
    if stack.len() >= prefix.len() && path_is(&stack[..prefix.len()], prefix) {
        Some(&stack[prefix.len()..])
    } else {
        None
    }
}

fn path_is(stack: &[String], path: &[&str]) -> bool {
    stack.len() == path.len() && stack.iter().zip(path).all(|(a, b)| a == b)
}

/// `path` followed by a single `Date` or `DateTime` value element.
fn is_value_under(stack: &[String], path: &[&str]) -> bool {
    match stack.split_last() {
        Some((last, parent)) => {
            (last == "Date" || last == "DateTime") && path_is(parent, path)
        }
        None => false,
    }
}
