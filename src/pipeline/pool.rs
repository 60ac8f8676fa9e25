// src/pipeline/pool.rs

//! Bounded extraction worker pool.
//!
//! Jobs wait in a bounded queue drained by a fixed set of workers, so a
//! download only waits when the queue is full. `finish` closes the queue and
//! joins every worker, which makes extraction completion observable.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;

use crate::archive::{ArchiveOpener, extract_archive};
use crate::error::{AppError, Result};
use crate::models::{CatalogItem, ExtractionConfig};

/// One downloaded archive waiting for extraction.
#[derive(Debug, Clone)]
pub struct ExtractionJob {
    pub item: CatalogItem,
    pub archive_path: PathBuf,
    pub dest_dir: PathBuf,
}

/// Outcome of one job: number of files extracted, or why it stopped.
#[derive(Debug)]
pub struct ExtractionResult {
    pub name: String,
    pub outcome: Result<usize>,
}

type SharedReceiver = Arc<Mutex<mpsc::Receiver<ExtractionJob>>>;

/// Fixed-size pool of extraction workers.
pub struct ExtractionPool {
    sender: mpsc::Sender<ExtractionJob>,
    workers: JoinSet<Vec<ExtractionResult>>,
}

impl ExtractionPool {
    /// Spawn `config.workers` workers on the current runtime.
    pub fn start(opener: Arc<dyn ArchiveOpener>, config: &ExtractionConfig) -> Self {
        let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));
        let receiver: SharedReceiver = Arc::new(Mutex::new(receiver));
        let mut workers = JoinSet::new();

        for id in 0..config.workers.max(1) {
            let receiver = Arc::clone(&receiver);
            let opener = Arc::clone(&opener);
            let remove_archives = config.remove_archives;
            workers.spawn(worker_loop(id, receiver, opener, remove_archives));
        }

        Self { sender, workers }
    }

    /// Queue a job, waiting while the queue is full.
    pub async fn submit(&self, job: ExtractionJob) -> Result<()> {
        self.sender
            .send(job)
            .await
            .map_err(|e| AppError::config(format!("extraction pool closed ({})", e.0.item.name)))
    }

    /// Close the queue and wait for every queued job to finish.
    pub async fn finish(self) -> Vec<ExtractionResult> {
        let Self {
            sender,
            mut workers,
        } = self;
        drop(sender);

        let mut results = Vec::new();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(batch) => results.extend(batch),
                Err(e) => log::error!("Extraction worker failed: {}", e),
            }
        }
        results
    }
}

async fn worker_loop(
    id: usize,
    receiver: SharedReceiver,
    opener: Arc<dyn ArchiveOpener>,
    remove_archives: bool,
) -> Vec<ExtractionResult> {
    let mut results = Vec::new();

    loop {
        let job = receiver.lock().await.recv().await;
        let Some(job) = job else {
            break;
        };

        log::debug!("Worker {} extracting {}", id, job.item.name);
        let name = job.item.name.clone();
        let opener = Arc::clone(&opener);
        let outcome = tokio::task::spawn_blocking(move || run_job(opener.as_ref(), &job, remove_archives))
            .await
            .unwrap_or_else(|e| Err(AppError::archive(name.as_str(), e)));

        results.push(ExtractionResult { name, outcome });
    }

    results
}

/// Open, extract and clean up one archive. Errors are logged here.
fn run_job(opener: &dyn ArchiveOpener, job: &ExtractionJob, remove_archive: bool) -> Result<usize> {
    let outcome = opener
        .open(&job.archive_path)
        .and_then(|mut archive| extract_archive(archive.as_mut(), &job.dest_dir));

    match &outcome {
        Ok(count) => {
            log::info!("{}: extracted {} files", job.item.name, count);
            if remove_archive {
                if let Err(e) = std::fs::remove_file(&job.archive_path) {
                    log::warn!("Could not remove {}: {}", job.archive_path.display(), e);
                }
            }
        }
        Err(e) => log::error!(
            "{}: extraction of {} into {} failed: {} (source {})",
            job.item.name,
            job.archive_path.display(),
            job.dest_dir.display(),
            e,
            job.item.url
        ),
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::Archive;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Archive whose entries are the lines of the archive file.
    struct LinesOpener;

    struct LinesArchive {
        entries: Vec<String>,
    }

    impl ArchiveOpener for LinesOpener {
        fn open(&self, path: &Path) -> Result<Box<dyn Archive>> {
            let content = fs::read_to_string(path)?;
            Ok(Box::new(LinesArchive {
                entries: content.lines().map(str::to_string).collect(),
            }))
        }
    }

    impl Archive for LinesArchive {
        fn entries(&self) -> &[String] {
            &self.entries
        }

        fn extract_to_file(&mut self, entry: &str, dest: &Path) -> Result<()> {
            fs::write(dest, entry)?;
            Ok(())
        }
    }

    fn job(tmp: &TempDir, index: usize, entries: &str) -> ExtractionJob {
        let item = CatalogItem::new(index, "unit", format!("http://x/{}.7z", index));
        let archive_path = tmp.path().join(format!("{}.7z", item.name));
        fs::write(&archive_path, entries).unwrap();
        ExtractionJob {
            dest_dir: tmp.path().join("data").join(&item.name),
            archive_path,
            item,
        }
    }

    #[tokio::test]
    async fn test_finish_waits_for_all_jobs() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("data")).unwrap();
        let config = ExtractionConfig {
            workers: 2,
            queue_capacity: 1,
            remove_archives: true,
        };
        let pool = ExtractionPool::start(Arc::new(LinesOpener), &config);

        for index in 1..=6 {
            pool.submit(job(&tmp, index, "a/map.jp2\na/map.xml\na"))
                .await
                .unwrap();
        }
        let mut results = pool.finish().await;
        results.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(results.len(), 6);
        for result in &results {
            assert_eq!(*result.outcome.as_ref().unwrap(), 2);
            let unit = tmp.path().join("data").join(&result.name);
            assert!(unit.join("map.jp2").exists());
            assert!(unit.join("map.xml").exists());
            assert!(!tmp.path().join(format!("{}.7z", result.name)).exists());
        }
    }

    #[tokio::test]
    async fn test_failed_job_keeps_archive() {
        let tmp = TempDir::new().unwrap();
        // No "data" directory: unit directory creation fails.
        let pool = ExtractionPool::start(Arc::new(LinesOpener), &ExtractionConfig::default());
        let failing = job(&tmp, 1, "a/map.jp2");
        let archive_path = failing.archive_path.clone();

        pool.submit(failing).await.unwrap();
        let results = pool.finish().await;

        assert_eq!(results.len(), 1);
        assert!(results[0].outcome.is_err());
        assert!(archive_path.exists());
    }
}
