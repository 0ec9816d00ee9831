use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::Value;
use tracing::info;

use crate::{errors::JsonApiError, routes::auth::ServerState};
use service::auth::CurrentUser;
use service::providers::{self, CreateProviderInput, ProviderView};

pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ProviderView>), JsonApiError> {
    let Json(body) = body?;
    let input = CreateProviderInput::from_json(&body)?;
    let view = providers::create_profile(&state.db, user.id, input).await?;
    info!(id = view.id, user_id = user.id, "provider profile created");
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ProviderView>, JsonApiError> {
    Ok(Json(providers::get_profile(&state.db, user.id).await?))
}
