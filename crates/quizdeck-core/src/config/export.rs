//! CSV export configuration.

use serde::{Deserialize, Serialize};

/// Settings for the user-data CSV export pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory where export files are written.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Hours an export file is kept before the cleanup job removes it.
    #[serde(default = "default_retention_hours")]
    pub retention_hours: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            retention_hours: default_retention_hours(),
        }
    }
}

fn default_directory() -> String {
    "data/exports".to_string()
}

fn default_retention_hours() -> u64 {
    24
}
