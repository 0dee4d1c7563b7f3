//! Projects module - valuation models that turn point balances into prices.

mod project_registry;
mod projects_model;
mod projects_service;
mod projects_traits;

pub use project_registry::ProjectRegistry;
pub use projects_model::{NewProject, Project, ProjectParams, ProjectUpdate};
pub use projects_service::ProjectService;
pub use projects_traits::ProjectServiceTrait;


#[cfg(test)]
mod projects_service_tests;
