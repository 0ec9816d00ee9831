use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::Value;
use tracing::info;

use crate::{errors::JsonApiError, routes::auth::ServerState};
use service::auth::CurrentUser;
use service::matching::domain::{CreateRequestInput, CreateResponseInput, RequestView, ResponseView};

type Requests = Result<Json<Vec<RequestView>>, JsonApiError>;
type Responses = Result<Json<Vec<ResponseView>>, JsonApiError>;

pub async fn create_request(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<RequestView>), JsonApiError> {
    let Json(body) = body?;
    let input = CreateRequestInput::from_json(&body)?;
    let created = state.matching.create_request(user.id, input).await?;
    info!(id = created.id, user_id = user.id, "service request created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn create_response(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ResponseView>), JsonApiError> {
    let Json(body) = body?;
    let input = CreateResponseInput::from_json(&body)?;
    let created = state.matching.create_response(input).await?;
    info!(id = created.id, service_request_id = created.service_request_id, responder = user.id, "service response created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn requests_for_client(State(state): State<ServerState>, Extension(user): Extension<CurrentUser>) -> Requests {
    Ok(Json(state.matching.list_requests_for_client(user.id).await?))
}

pub async fn requests_for_provider(State(state): State<ServerState>, Extension(user): Extension<CurrentUser>) -> Requests {
    Ok(Json(state.matching.list_requests_for_provider(user.id).await?))
}

pub async fn unanswered_for_provider(State(state): State<ServerState>, Extension(user): Extension<CurrentUser>) -> Requests {
    Ok(Json(state.matching.list_unanswered_for_provider(user.id).await?))
}

pub async fn unanswered_for_client(State(state): State<ServerState>, Extension(user): Extension<CurrentUser>) -> Requests {
    Ok(Json(state.matching.list_unanswered_for_client(user.id).await?))
}

/// `GET /services/responses`: answers to requests addressed to the caller.
pub async fn own_responses(State(state): State<ServerState>, Extension(user): Extension<CurrentUser>) -> Responses {
    Ok(Json(state.matching.list_own_responses(user.id).await?))
}

pub async fn responses_for_client(State(state): State<ServerState>, Extension(user): Extension<CurrentUser>) -> Responses {
    Ok(Json(state.matching.list_responses_for_client(user.id).await?))
}

pub async fn responses_for_provider(State(state): State<ServerState>, Extension(user): Extension<CurrentUser>) -> Responses {
    Ok(Json(state.matching.list_responses_for_provider(user.id).await?))
}
