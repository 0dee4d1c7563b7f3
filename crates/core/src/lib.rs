//! Pointfolio Core - Domain entities, services, and traits.
//!
//! This crate contains the reconciliation engine behind the net worth
//! dashboard: the project registry, the custom asset ledger, and the
//! aggregated allocation series. It is database-agnostic and defines the
//! state port implemented by the `storage-sqlite` crate.

pub mod aggregation;
pub mod constants;
pub mod errors;
pub mod ledger;
pub mod projects;
pub mod state;
pub mod utils;

pub use aggregation::{AggregationService, AggregationServiceTrait, PortfolioSummary, SeriesEntry};
pub use ledger::{LedgerAsset, LedgerService, LedgerServiceTrait};
pub use projects::{Project, ProjectRegistry, ProjectService, ProjectServiceTrait};
pub use state::{StateEntry, StateRepositoryTrait, StateStore};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
