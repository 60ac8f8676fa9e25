// src/pipeline/normalize.rs

//! Normalization pass: extracted units to cleaned metadata records.

use std::io::Write;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use crate::error::Result;
use crate::metadata::normalize_descriptor;
use crate::models::{Config, Metadata, NormalizeReport, RawData};
use crate::storage::ResultStore;

/// Receives each cleaned record. Publishing happens behind this seam.
pub trait RecordSink {
    fn publish(&mut self, raw: &RawData, record: &Metadata) -> Result<()>;
}

/// One unit as written by [`JsonLinesSink`].
#[derive(Debug, Serialize)]
pub struct NormalizedUnit<'a> {
    pub name: &'a str,
    pub hd_image_file: &'a Path,
    pub descriptor_file: &'a Path,
    pub metadata: &'a Metadata,
}

/// Writes one JSON document per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn publish(&mut self, raw: &RawData, record: &Metadata) -> Result<()> {
        let unit = NormalizedUnit {
            name: &raw.name,
            hd_image_file: &raw.hd_image_file,
            descriptor_file: &raw.descriptor_file,
            metadata: record,
        };
        serde_json::to_writer(&mut self.writer, &unit)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Walk the result store in counter order and publish every readable unit.
///
/// Units with a missing file or an unreadable descriptor are logged and
/// skipped. Sink errors stop the pass.
pub fn run_normalizer(config: &Config, sink: &mut dyn RecordSink) -> Result<NormalizeReport> {
    let mut report = NormalizeReport::new(Utc::now());
    let store = ResultStore::new(&config.paths.result_dir);
    log::info!("Normalizing units in {}", store.root().display());

    let mut walker = store.walk(&config.walker)?;
    for raw in walker.by_ref() {
        report.units += 1;
        let record = match normalize_descriptor(&raw.descriptor_file) {
            Ok(record) => record,
            Err(e) => {
                log::error!(
                    "{}: cannot read descriptor {}: {}",
                    raw.name,
                    raw.descriptor_file.display(),
                    e
                );
                report.parse_failures += 1;
                continue;
            }
        };

        log::debug!("{}: '{}'", raw.name, record.title);
        sink.publish(&raw, &record)?;
        report.records += 1;
    }
    report.discovery_failures = walker.skipped();
    report.end_time = Utc::now();

    log::info!(
        "Normalization complete: {} records from {} units ({} unreadable, {} incomplete)",
        report.records,
        report.units,
        report.parse_failures,
        report.discovery_failures
    );

    Ok(report)
}
