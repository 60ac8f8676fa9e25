//! Pipeline entry points.
//!
//! - `run_acquisition`: Download and extract every new catalog item
//! - `run_normalizer`: Turn extracted units into cleaned metadata records

mod acquire;
mod download;
mod normalize;
mod pool;

pub use acquire::run_acquisition;
pub use download::Downloader;
pub use normalize::{JsonLinesSink, NormalizedUnit, RecordSink, run_normalizer};
pub use pool::{ExtractionJob, ExtractionPool, ExtractionResult};
