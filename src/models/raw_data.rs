//! Files discovered inside one extracted unit.

use std::path::PathBuf;

use serde::Serialize;

/// A unit directory paired with its image and descriptor.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RawData {
    /// Unit directory name (`"<counter>_<key>"`)
    pub name: String,

    /// Full path to the HD image
    pub hd_image_file: PathBuf,

    /// Full path to the XML descriptor
    pub descriptor_file: PathBuf,
}
