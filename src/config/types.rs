//! Configuration types for the status catalogue.
//!
//! This module contains the strongly-typed structures deserialized from the
//! catalogue YAML files.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::EmploymentStatus;

/// Metadata about the catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogueMetadata {
    /// The human-readable name of the catalogue.
    pub name: String,
    /// The version or effective date of the catalogue.
    pub version: String,
    /// ISO code of the currency every figure is expressed in.
    pub currency: String,
}

/// Catalogue entry for one employment status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEntry {
    /// Label shown to advisors.
    pub label: String,
    /// Documents to request from the borrower, in checklist order.
    pub documents: Vec<String>,
    /// Reminder shown beside the computed figure.
    pub advisor_note: String,
}

/// Statuses configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusesConfig {
    /// Map of status tag to catalogue entry.
    pub statuses: HashMap<EmploymentStatus, StatusEntry>,
}

/// Complete status catalogue.
///
/// Aggregates the metadata and the per-status entries loaded from the
/// catalogue directory.
#[derive(Debug, Clone)]
pub struct StatusCatalogue {
    metadata: CatalogueMetadata,
    statuses: HashMap<EmploymentStatus, StatusEntry>,
}

impl StatusCatalogue {
    /// Creates a new catalogue from its components.
    pub fn new(
        metadata: CatalogueMetadata,
        statuses: HashMap<EmploymentStatus, StatusEntry>,
    ) -> Self {
        Self { metadata, statuses }
    }

    /// Returns the catalogue metadata.
    pub fn metadata(&self) -> &CatalogueMetadata {
        &self.metadata
    }

    /// Returns the per-status entries.
    pub fn statuses(&self) -> &HashMap<EmploymentStatus, StatusEntry> {
        &self.statuses
    }
}
