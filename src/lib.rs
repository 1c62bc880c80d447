//! Eligible Revenue Engine for mortgage-loan borrowing capacity.
//!
//! This crate computes the monthly income a lender may retain for a borrower
//! under each of 14 French employment statuses, with the explanation,
//! caveats and audit trace behind the figure.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
