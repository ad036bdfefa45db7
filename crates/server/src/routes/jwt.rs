use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::auth::ServerState;
use crate::errors::JsonApiError;

#[derive(Debug, Serialize)]
pub struct TokenOutput {
    pub token: String,
}

/// Sign whatever identity object the client posts.
pub async fn issue_token(
    State(state): State<ServerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TokenOutput>, JsonApiError> {
    let Json(identity) = payload.map_err(JsonApiError::from_rejection)?;
    let email = identity.get("email").and_then(Value::as_str).map(str::to_owned);
    let token = state.tokens.issue(identity)?;
    info!(email = ?email, "token_issued");
    Ok(Json(TokenOutput { token }))
}
