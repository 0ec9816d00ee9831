pub mod auth;
pub mod catalog;
pub mod matching;
pub mod providers;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public catalog reads plus the
/// bearer-protected matching and provider routes.
pub fn build_router(state: auth::ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/services", get(catalog::list_products))
        .route("/services/categories", get(catalog::list_categories))
        .route("/services/all", get(catalog::list_all))
        .route("/services/advertisements", get(catalog::list_advertisements));

    let protected = Router::new()
        .route("/services/requests", get(matching::requests_for_client).post(matching::create_request))
        .route("/services/requests/client", get(matching::requests_for_client))
        .route("/services/requests/provider", get(matching::requests_for_provider))
        .route("/services/requests/unanswered/provider", get(matching::unanswered_for_provider))
        .route("/services/requests/unanswered/client", get(matching::unanswered_for_client))
        .route("/services/responses", get(matching::own_responses).post(matching::create_response))
        .route("/services/responses/client", get(matching::responses_for_client))
        .route("/services/responses/provider", get(matching::responses_for_provider))
        .route("/services/providers", post(providers::create))
        .route("/services/providers/me", get(providers::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer_token_state,
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
                // 5xx at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
