//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the status
//! catalogue from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::EmploymentStatus;

use super::types::{CatalogueMetadata, StatusCatalogue, StatusEntry, StatusesConfig};

/// Loads and provides access to the status catalogue.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/catalogue/
/// ├── catalogue.yaml   # Catalogue metadata
/// └── statuses.yaml    # Label, documents and advisor note per status
/// ```
///
/// Loading fails unless every one of the 14 statuses has an entry with at
/// least one document.
///
/// # Example
///
/// ```no_run
/// use revenue_engine::config::ConfigLoader;
/// use revenue_engine::models::EmploymentStatus;
///
/// let loader = ConfigLoader::load("./config/catalogue").unwrap();
///
/// let entry = loader.get_status(EmploymentStatus::Seasonal).unwrap();
/// println!("{}: {} documents", entry.label, entry.documents.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    catalogue: StatusCatalogue,
}

impl ConfigLoader {
    /// Loads the catalogue from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/catalogue")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - A status has no entry or an empty document list (`StatusNotConfigured`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use revenue_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/catalogue")?;
    /// # Ok::<(), revenue_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<CatalogueMetadata>(&path.join("catalogue.yaml"))?;
        let statuses = Self::load_yaml::<StatusesConfig>(&path.join("statuses.yaml"))?.statuses;

        for status in EmploymentStatus::ALL {
            match statuses.get(&status) {
                Some(entry) if !entry.documents.is_empty() => {}
                _ => return Err(EngineError::StatusNotConfigured { status }),
            }
        }

        debug!(
            path = %path.display(),
            name = %metadata.name,
            version = %metadata.version,
            "status catalogue loaded"
        );

        Ok(Self {
            catalogue: StatusCatalogue::new(metadata, statuses),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the catalogue metadata.
    pub fn metadata(&self) -> &CatalogueMetadata {
        self.catalogue.metadata()
    }

    /// Gets the catalogue entry of a status.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use revenue_engine::config::ConfigLoader;
    /// use revenue_engine::models::EmploymentStatus;
    ///
    /// let loader = ConfigLoader::load("./config/catalogue")?;
    /// let entry = loader.get_status(EmploymentStatus::Military)?;
    /// println!("Advisor note: {}", entry.advisor_note);
    /// # Ok::<(), revenue_engine::error::EngineError>(())
    /// ```
    pub fn get_status(&self, status: EmploymentStatus) -> EngineResult<&StatusEntry> {
        self.catalogue
            .statuses()
            .get(&status)
            .ok_or(EngineError::StatusNotConfigured { status })
    }

    /// The ordered document checklist of a status.
    pub fn documents(&self, status: EmploymentStatus) -> EngineResult<&[String]> {
        self.get_status(status).map(|entry| entry.documents.as_slice())
    }

    /// Every status with its entry, in canonical order.
    pub fn statuses(&self) -> Vec<(EmploymentStatus, &StatusEntry)> {
        EmploymentStatus::ALL
            .iter()
            .filter_map(|status| {
                self.catalogue
                    .statuses()
                    .get(status)
                    .map(|entry| (*status, entry))
            })
            .collect()
    }
}
