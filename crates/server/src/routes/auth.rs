use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, Method},
    middleware::Next,
    response::Response,
};
use sea_orm::DatabaseConnection;

use crate::errors::JsonApiError;
use service::auth::errors::AuthError;
use service::auth::repository::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};
use service::matching::{MatchingService, SeaOrmMatchingRepository};

/// Shared handler state: the pool plus services built on it.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    pub matching: Arc<MatchingService<SeaOrmMatchingRepository>>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, auth: AuthConfig) -> Self {
        let auth_repo = Arc::new(SeaOrmAuthRepository { db: db.clone() });
        let matching_repo = Arc::new(SeaOrmMatchingRepository::new(db.clone()));
        Self {
            auth: Arc::new(AuthService::new(auth_repo, auth)),
            matching: Arc::new(MatchingService::new(matching_repo)),
            db,
        }
    }
}

fn bearer_token(req: &Request) -> Result<String, AuthError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;
    match header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        Some(_) => Err(AuthError::MissingToken),
        None => Err(AuthError::TokenError("expected Bearer scheme".into())),
    }
}

/// Route middleware: resolve `Authorization: Bearer <token>` to a user and
/// store it as a `CurrentUser` request extension. Any failure is a 401.
pub async fn require_bearer_token_state(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    let path = req.uri().path().to_string();
    let token = bearer_token(&req).map_err(|e| {
        tracing::warn!(path = %path, "missing or malformed Authorization header");
        JsonApiError::from(e)
    })?;
    let user = state.auth.authenticate(&token).await?;
    tracing::debug!(path = %path, user_id = user.id, "request authenticated");
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
