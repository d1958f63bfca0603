//! Type registry files
//!
//! A registry file is a TOML document listing `[[classes]]`, each with its
//! kind, parent, interfaces, methods and subscriptions:
//!
//! ```toml
//! [[classes]]
//! name = "Mailer"
//! interfaces = ["MailerInterface"]
//!
//! [[classes.methods]]
//! name = "new"
//! parameters = [{ name = "logger", type = "LoggerInterface" }]
//! ```

use std::path::{Path, PathBuf};

use svcwire_application::introspection::{RegistryDocument, TypeRegistry};
use svcwire_domain::error::Result;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::constants::REGISTRY_FILE_EXTENSION;
use crate::error_ext::ErrorContext;

/// Parse a registry document from TOML text
pub fn parse_registry(content: &str) -> Result<RegistryDocument> {
    toml::from_str(content).config_context("Invalid type registry document")
}

/// Read one registry file
pub fn load_registry_file<P: AsRef<Path>>(path: P) -> Result<RegistryDocument> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .io_context(format!("Failed to read type registry file {}", path.display()))?;
    let document: RegistryDocument = toml::from_str(&content)
        .with_config_context(|| format!("Invalid type registry file {}", path.display()))?;
    debug!(path = %path.display(), classes = document.classes.len(), "loaded type registry file");
    Ok(document)
}

/// Write a registry document as TOML
pub fn save_registry_file<P: AsRef<Path>>(document: &RegistryDocument, path: P) -> Result<()> {
    let path = path.as_ref();
    let content =
        toml::to_string_pretty(document).config_context("Failed to serialize type registry")?;
    std::fs::write(path, content)
        .io_context(format!("Failed to write type registry file {}", path.display()))
}

/// Registry files of a directory, in name order
fn registry_files_in(directory: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(directory)
        .io_context(format!("Failed to read type registry directory {}", directory.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .io_context(format!("Failed to read type registry directory {}", directory.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == REGISTRY_FILE_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Build a registry from every configured source
///
/// Files load before directories; a later description of a type replaces an
/// earlier one.
pub fn load_registry(config: &RegistryConfig) -> Result<TypeRegistry> {
    let mut paths = config.files.clone();
    for directory in &config.directories {
        paths.extend(registry_files_in(directory)?);
    }

    let mut registry = TypeRegistry::new();
    for path in &paths {
        registry.load(load_registry_file(path)?);
    }
    debug!(files = paths.len(), types = registry.len(), "type registry ready");
    Ok(registry)
}
