// src/pipeline/acquire.rs

//! Acquisition pass: catalog rows to extracted units.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;

use crate::archive::ArchiveOpener;
use crate::catalog::{CatalogReader, Workbook};
use crate::error::Result;
use crate::models::{AcquisitionReport, Config};
use crate::storage::{ResultStore, ScratchArea};

use super::download::Downloader;
use super::pool::{ExtractionJob, ExtractionPool, ExtractionResult};

/// Read the catalog, download every new item and extract it into the store.
///
/// Downloads run one at a time in catalog order; extractions run on the pool
/// and are all joined before this returns. Per-item failures are logged and
/// counted. A fatal catalog error stops the run and is returned once in-flight
/// extractions have finished.
pub async fn run_acquisition<W>(
    config: &Config,
    workbook: W,
    opener: Arc<dyn ArchiveOpener>,
) -> Result<AcquisitionReport>
where
    W: Workbook + 'static,
{
    let mut report = AcquisitionReport::new(Utc::now());
    log::info!("Starting acquisition");

    let paths = &config.paths;
    let scratch = ScratchArea::new(&paths.scratch_dir, &config.download.archive_extension);
    let store = ResultStore::new(&paths.result_dir);
    scratch.prepare(paths.wipe_on_start)?;
    store.prepare(paths.wipe_on_start)?;

    let downloader = Downloader::new(&config.download, scratch)?;
    let pool = ExtractionPool::start(opener, &config.extraction);

    let (sender, mut receiver) = mpsc::channel(config.catalog.handoff_capacity.max(1));
    let catalog_config = config.catalog.clone();
    let producer = tokio::task::spawn_blocking(move || {
        for item in CatalogReader::new(workbook, &catalog_config) {
            if sender.blocking_send(item).is_err() {
                break;
            }
        }
    });

    let mut dispatched = HashSet::new();
    let mut fatal = None;

    while let Some(item) = receiver.recv().await {
        let item = match item {
            Ok(item) => item,
            Err(e) if e.is_fatal() => {
                fatal = Some(e);
                break;
            }
            Err(e) => {
                log::error!("Catalog row skipped: {}", e);
                continue;
            }
        };
        report.items += 1;

        let dest_dir = match store.unit_dir(&item.name) {
            Ok(dir) => dir,
            Err(e) => {
                log::error!("{}: rejected ({}): {}", item.name, item.url, e);
                report.rejected += 1;
                continue;
            }
        };

        if store.contains(&item.name) || !dispatched.insert(item.name.clone()) {
            log::info!("{} already extracted, skipping", item.name);
            report.skipped += 1;
            continue;
        }

        let archive_path = match downloader.download(&item).await {
            Ok(path) => path,
            Err(e) => {
                log::error!("{}", e);
                report.download_failures += 1;
                continue;
            }
        };
        report.downloaded += 1;

        let job = ExtractionJob {
            item,
            archive_path,
            dest_dir,
        };
        if let Err(e) = pool.submit(job).await {
            fatal = Some(e);
            break;
        }
    }

    drop(receiver);
    if let Err(e) = producer.await {
        log::error!("Catalog reader stopped unexpectedly: {}", e);
    }

    log::info!("Waiting for extractions to finish...");
    tally(&mut report, pool.finish().await);
    report.end_time = Utc::now();

    if let Some(e) = fatal {
        log::error!("Acquisition aborted: {}", e);
        return Err(e);
    }

    log::info!(
        "Acquisition complete: {} items, {} skipped, {} downloaded, {} extracted ({} files), {} failures in {}s",
        report.items,
        report.skipped,
        report.downloaded,
        report.extracted_units,
        report.extracted_files,
        report.failures(),
        (report.end_time - report.start_time).num_seconds()
    );

    Ok(report)
}

fn tally(report: &mut AcquisitionReport, results: Vec<ExtractionResult>) {
    for result in results {
        match result.outcome {
            Ok(files) => {
                report.extracted_units += 1;
                report.extracted_files += files;
            }
            Err(_) => report.extraction_failures += 1,
        }
    }
}
