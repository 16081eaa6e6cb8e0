//! Server catalog handlers.

use axum::Json;
use axum::extract::{Path, State};

use super::AppState;
use crate::errors::PortalError;
use crate::models::snippets::ReadmeContent;
use crate::models::{ServerRecord, ServerSnippets};

/// List every discovered server.
pub async fn list(State(discovery): State<AppState>) -> Json<Vec<ServerRecord>> {
    Json(discovery.list_all().await)
}

/// One server by id.
pub async fn get(
    State(discovery): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ServerRecord>, PortalError> {
    Ok(Json(discovery.get_by_id(&id).await?))
}

/// Full README of a server.
pub async fn readme(
    State(discovery): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReadmeContent>, PortalError> {
    let content = discovery.get_readme(&id).await?;
    Ok(Json(ReadmeContent { content }))
}

/// Generated setup snippets of a server
pub async fn snippets(
    State(discovery): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ServerSnippets>, PortalError> {
    Ok(Json(discovery.snippets(&id).await?))
}
