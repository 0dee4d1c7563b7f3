use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use uuid::Uuid;

use super::{NewProject, Project, ProjectServiceTrait, ProjectUpdate};
use crate::errors::{Error, Result};
use crate::ledger::{matching, reconcile, rename_assets, unlink_assets};
use crate::state::{LedgerState, StateStore};

/// Project registry service.
///
/// Every mutation runs inside [`StateStore::mutate`]. The registry change, its
/// ledger cascade and a reconciliation of the ledger against the latest points
/// snapshot are committed together.
pub struct ProjectService {
    store: Arc<StateStore>,
}

impl ProjectService {
    pub fn new(store: Arc<StateStore>) -> Self {
        ProjectService { store }
    }

    fn reconcile_ledger(state: &mut LedgerState) {
        let outcome = reconcile(state.snapshot(), &state.projects, &state.assets);
        if outcome.changed() {
            debug!(
                "Reconciled ledger after registry change: {} created, {} updated",
                outcome.created, outcome.updated
            );
        }
        state.assets = outcome.assets;
    }

    fn not_found(project_id: &str) -> Error {
        Error::NotFound(format!("Project {} not found", project_id))
    }
}

#[async_trait]
impl ProjectServiceTrait for ProjectService {
    fn get_projects(&self) -> Result<Vec<Project>> {
        Ok(self.store.load_projects()?.iter().cloned().collect())
    }

    async fn create_project(&self, new_project: NewProject) -> Result<Project> {
        let params = new_project.into_params()?;

        let mutation = self
            .store
            .mutate(move |state| {
                let id = state
                    .projects
                    .get(&params.name)
                    .map(|existing| existing.id.clone())
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let project = Project::new(id, params);
                state.projects.insert(project.clone());
                Self::reconcile_ledger(state);
                Ok(project)
            })
            .await?;

        let project = mutation.output;
        info!(
            "Saved project '{}' with point price {}",
            project.name, project.point_price
        );
        Ok(project)
    }

    async fn update_project(&self, project_update: ProjectUpdate) -> Result<Project> {
        let mutation = self
            .store
            .mutate(move |state| {
                let current = state
                    .projects
                    .find_by_id(&project_update.id)
                    .cloned()
                    .ok_or_else(|| Self::not_found(&project_update.id))?;
                let params = project_update.merge_into(&current.params())?;
                let renamed = params.name != current.name;

                if renamed {
                    if state.projects.contains(&params.name) {
                        return Err(Error::ConstraintViolation(format!(
                            "A project named '{}' already exists",
                            params.name
                        )));
                    }
                    let has_old = state
                        .assets
                        .iter()
                        .any(|a| matching::project_matches_asset(&current.name, &a.name));
                    let has_new = state.assets.iter().any(|a| a.name == params.name);
                    if has_old && has_new {
                        return Err(Error::ConstraintViolation(format!(
                            "Ledger already holds an asset named '{}'",
                            params.name
                        )));
                    }
                }

                let project = Project::new(current.id.clone(), params);
                if renamed {
                    state.projects.remove(&current.name);
                    let moved = rename_assets(&mut state.assets, &current.name, &project);
                    debug!(
                        "Renamed project '{}' to '{}', moved {} ledger assets",
                        current.name, project.name, moved
                    );
                }
                state.projects.insert(project.clone());
                Self::reconcile_ledger(state);
                Ok(project)
            })
            .await?;

        Ok(mutation.output)
    }

    async fn delete_project(&self, project_id: &str) -> Result<Project> {
        let project_id = project_id.to_string();
        let mutation = self
            .store
            .mutate(move |state| {
                let project = state
                    .projects
                    .find_by_id(&project_id)
                    .cloned()
                    .ok_or_else(|| Self::not_found(&project_id))?;

                state.projects.remove(&project.name);
                let unlinked = unlink_assets(&mut state.assets, &project.name);
                Self::reconcile_ledger(state);

                info!(
                    "Deleted project '{}', {} ledger assets are now unpriced",
                    project.name, unlinked
                );
                Ok(project)
            })
            .await?;

        Ok(mutation.output)
    }
}
