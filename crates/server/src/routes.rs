use axum::{
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::auth::{self, ServerState};

pub mod bookings;
pub mod jwt;
pub mod services;

pub async fn root() -> &'static str {
    "Car doctor server running"
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public routes plus the token-gated
/// booking listing.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/jwt", post(jwt::issue_token))
        .route("/services", get(services::list_services))
        .route("/services/:id", get(services::get_service))
        .route("/checkout", post(bookings::create_booking))
        .route(
            "/bookings/:id",
            patch(bookings::update_booking_status).delete(bookings::delete_booking),
        );

    let protected = Router::new()
        .route("/bookings", get(bookings::list_bookings))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer_token,
        ));

    public
        .merge(protected)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
