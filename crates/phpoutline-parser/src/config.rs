use serde::{Deserialize, Serialize};

/// Configuration for scanner behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Maximum file size to scan (in bytes)
    /// Larger files are rejected before scanning starts
    pub max_file_size: usize,

    /// Capture method body lines between the braces
    pub capture_bodies: bool,

    /// Store the full raw source text on the File record
    pub include_source: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024, // 10 MB
            capture_bodies: true,
            include_source: true,
        }
    }
}

impl ScanConfig {
    /// Create config for fast scanning (skips body and source capture)
    pub fn fast() -> Self {
        Self {
            capture_bodies: false,
            include_source: false,
            ..Default::default()
        }
    }

    /// Set maximum file size
    pub fn with_max_file_size(mut self, size: usize) -> Self {
        self.max_file_size = size;
        self
    }
}
