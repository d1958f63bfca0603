//! Type registry source configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where type registry documents are read from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registry files, loaded in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<PathBuf>,

    /// Directories whose `.toml` files are loaded in name order, after `files`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directories: Vec<PathBuf>,
}

impl RegistryConfig {
    /// Whether no source is configured
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }
}
