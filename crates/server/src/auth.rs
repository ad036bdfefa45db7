use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use models::db::MongoStore;
use service::auth::{AuthError, TokenService};
use service::booking::{repository::MongoBookingRepository, BookingService};
use service::catalog::{repository::MongoServiceRepository, CatalogService};

use crate::errors::JsonApiError;

#[derive(Clone)]
pub struct ServerState {
    pub tokens: Arc<TokenService>,
    pub catalog: Arc<CatalogService>,
    pub bookings: Arc<BookingService>,
}

impl ServerState {
    pub fn new(tokens: TokenService, catalog: CatalogService, bookings: BookingService) -> Self {
        Self {
            tokens: Arc::new(tokens),
            catalog: Arc::new(catalog),
            bookings: Arc::new(bookings),
        }
    }

    /// Wire the MongoDB-backed repositories for the configured collections.
    pub fn from_store(store: &MongoStore, cfg: &configs::AppConfig) -> Self {
        let services = MongoServiceRepository { collection: store.collection(&cfg.database.services_collection) };
        let bookings = MongoBookingRepository { collection: store.collection(&cfg.database.bookings_collection) };
        Self::new(
            TokenService::new(&cfg.auth.jwt_secret, cfg.auth.token_ttl_secs),
            CatalogService::new(Arc::new(services)),
            BookingService::new(Arc::new(bookings)),
        )
    }
}

/// `Bearer <token>`, scheme matched case-insensitively.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// Route middleware: verify `Authorization: Bearer <token>` and attach the
/// decoded `Claims` to the request extensions.
/// Missing or blank header -> 401, anything else wrong -> 403.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let claims = {
        let path = req.uri().path();
        let Some(header) = req
            .headers()
            .get(AUTHORIZATION)
            .filter(|h| !h.as_bytes().iter().all(u8::is_ascii_whitespace))
        else {
            tracing::warn!(path = %path, "missing Authorization header");
            return Err(AuthError::Unauthorized.into());
        };
        let Some(token) = header.to_str().ok().and_then(bearer_token) else {
            tracing::warn!(path = %path, "invalid Authorization format (expect Bearer)");
            return Err(AuthError::Forbidden.into());
        };
        state.tokens.verify(token).map_err(|e| {
            tracing::warn!(path = %path, err = %e, "token validation failed");
            JsonApiError::from(e)
        })?
    };
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
