use async_trait::async_trait;

use super::{NewProject, Project, ProjectUpdate};
use crate::errors::Result;

/// Trait for project registry operations
#[async_trait]
pub trait ProjectServiceTrait: Send + Sync {
    fn get_projects(&self) -> Result<Vec<Project>>;
    async fn create_project(&self, new_project: NewProject) -> Result<Project>;
    async fn update_project(&self, project_update: ProjectUpdate) -> Result<Project>;
    async fn delete_project(&self, project_id: &str) -> Result<Project>;
}
