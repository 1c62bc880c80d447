//! Configuration loading for the eligible revenue engine.
//!
//! This module loads the status catalogue from YAML files: for each
//! employment status, the label shown to advisors, the ordered list of
//! documents to request and the advisor reminder. The engine itself never
//! reads the catalogue.
//!
//! # Example
//!
//! ```no_run
//! use revenue_engine::config::ConfigLoader;
//! use revenue_engine::models::EmploymentStatus;
//!
//! let config = ConfigLoader::load("./config/catalogue").unwrap();
//! println!("Loaded catalogue: {}", config.metadata().name);
//! println!("{:?}", config.documents(EmploymentStatus::Cdi).unwrap());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CatalogueMetadata, StatusCatalogue, StatusEntry, StatusesConfig};
