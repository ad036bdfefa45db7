use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use models::ack::{DeleteAck, InsertAck, UpdateAck};
use models::document::document_to_json;
use serde::Deserialize;
use serde_json::Value;
use service::auth::{policy::may_list_bookings, Claims};
use tracing::{info, warn};

use crate::auth::ServerState;
use crate::errors::JsonApiError;

#[derive(Debug, Deserialize)]
pub struct BookingsQuery {
    pub email: Option<String>,
}

/// Token-gated listing; callers only ever see their own bookings.
pub async fn list_bookings(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
    query: Result<Query<BookingsQuery>, QueryRejection>,
) -> Result<Json<Vec<Value>>, JsonApiError> {
    // A query that is not a single email (e.g. `email` repeated) can never
    // equal the claim.
    let Query(q) = query.map_err(|e| {
        warn!(error = %e.body_text(), claimed = ?claims.email(), "unusable bookings query");
        JsonApiError::new(StatusCode::FORBIDDEN, "Access Forbidden")
    })?;
    let email = q.email.as_deref();
    if !may_list_bookings(&claims, email) {
        warn!(requested = ?email, claimed = ?claims.email(), "booking listing for another identity");
        return Err(JsonApiError::new(StatusCode::FORBIDDEN, "Access Forbidden"));
    }
    let docs = state.bookings.list(email).await?;
    info!(count = docs.len(), "list bookings");
    Ok(Json(docs.into_iter().map(document_to_json).collect()))
}

pub async fn create_booking(
    State(state): State<ServerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<InsertAck>, JsonApiError> {
    let Json(body) = payload.map_err(JsonApiError::from_rejection)?;
    Ok(Json(state.bookings.create(body).await?))
}

pub async fn update_booking_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UpdateAck>, JsonApiError> {
    let Json(body) = payload.map_err(JsonApiError::from_rejection)?;
    Ok(Json(state.bookings.update_status(&id, &body).await?))
}

pub async fn delete_booking(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, JsonApiError> {
    Ok(Json(state.bookings.delete(&id).await?))
}
