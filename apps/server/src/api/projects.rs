use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use pointfolio_core::projects::{NewProject, Project, ProjectUpdate};

async fn list_projects(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Project>>> {
    let projects = state.project_service.get_projects()?;
    Ok(Json(projects))
}

async fn create_project(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewProject>,
) -> ApiResult<Json<Project>> {
    let project = state.project_service.create_project(payload).await?;
    Ok(Json(project))
}

async fn update_project(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut payload): Json<ProjectUpdate>,
) -> ApiResult<Json<Project>> {
    payload.id = id;
    let project = state.project_service.update_project(payload).await?;
    Ok(Json(project))
}

async fn delete_project(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Project>> {
    let project = state.project_service.delete_project(&id).await?;
    Ok(Json(project))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/{id}", put(update_project).delete(delete_project))
}
