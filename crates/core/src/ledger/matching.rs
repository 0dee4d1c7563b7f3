//! Project to ledger asset matching.
//!
//! Assets are associated with projects by name. The policy is kept here so
//! every call site agrees on it: the project name is trimmed, the asset name is
//! taken as-is, and the comparison is exact and case-sensitive.

use crate::projects::{Project, ProjectRegistry};

pub fn project_matches_asset(project_name: &str, asset_name: &str) -> bool {
    project_name.trim() == asset_name
}

/// Finds the project that prices `asset_name`, if any.
pub fn find_project<'a>(registry: &'a ProjectRegistry, asset_name: &str) -> Option<&'a Project> {
    // Registry keys are trimmed names, so a direct lookup applies the same policy
    // for any asset name without surrounding whitespace.
    if asset_name.trim() != asset_name {
        return None;
    }
    registry
        .get(asset_name)
        .filter(|project| project_matches_asset(&project.name, asset_name))
}
