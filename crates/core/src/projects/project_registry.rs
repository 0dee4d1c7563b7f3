//! Name-keyed collection of projects, persisted as a JSON object.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use super::Project;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectRegistry {
    projects: BTreeMap<String, Project>,
}

impl ProjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Project> {
        self.projects.get(name.trim())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.projects.contains_key(name.trim())
    }

    pub fn find_by_id(&self, project_id: &str) -> Option<&Project> {
        self.projects.values().find(|p| p.id == project_id)
    }

    /// Inserts `project` under its trimmed name, replacing any project with that name.
    pub fn insert(&mut self, project: Project) -> Option<Project> {
        self.projects.insert(project.name.trim().to_string(), project)
    }

    pub fn remove(&mut self, name: &str) -> Option<Project> {
        self.projects.remove(name.trim())
    }

    /// Projects in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Re-derives every point price from its inputs and re-keys projects by
    /// their trimmed name. Entries whose inputs no longer validate are dropped.
    pub fn normalized(self) -> Self {
        let mut registry = Self::new();
        for (key, mut project) in self.projects {
            project.name = project.name.trim().to_string();
            if let Err(e) = project.params().validate() {
                warn!("Dropping persisted project '{}': {}", key, e);
                continue;
            }
            project.refresh_point_price();
            registry.insert(project);
        }
        registry
    }
}

impl FromIterator<Project> for ProjectRegistry {
    fn from_iter<I: IntoIterator<Item = Project>>(iter: I) -> Self {
        let mut registry = Self::new();
        for project in iter {
            registry.insert(project);
        }
        registry
    }
}
