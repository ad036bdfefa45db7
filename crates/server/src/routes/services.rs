use axum::{extract::{Path, State}, Json};
use models::document::document_to_json;
use serde_json::Value;
use tracing::info;

use crate::auth::ServerState;
use crate::errors::JsonApiError;

pub async fn list_services(State(state): State<ServerState>) -> Result<Json<Vec<Value>>, JsonApiError> {
    let docs = state.catalog.list().await?;
    info!(count = docs.len(), "list services");
    Ok(Json(docs.into_iter().map(document_to_json).collect()))
}

/// Projected service document, or `null` when the id is unknown or malformed.
pub async fn get_service(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, JsonApiError> {
    let found = state.catalog.get(&id).await?;
    Ok(Json(found.map(document_to_json).unwrap_or(Value::Null)))
}
