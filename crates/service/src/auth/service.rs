use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use tracing::{debug, instrument};

use super::domain::{Claims, CurrentUser};
use super::errors::AuthError;
use super::repository::AuthRepository;

/// Token settings shared by issuing and verifying.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl From<&configs::AuthConfig> for AuthConfig {
    fn from(c: &configs::AuthConfig) -> Self {
        Self { jwt_secret: c.jwt_secret.clone(), token_ttl_hours: c.token_ttl_hours }
    }
}

/// Bearer token authentication independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Sign an HS256 token for `user`.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::CurrentUser;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default().with_user(7, "ann@example.com", "Ann"));
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_ttl_hours: 1 });
    /// let user = CurrentUser { id: 7, email: "ann@example.com".into(), name: "Ann".into() };
    /// let token = svc.issue_token(&user).unwrap();
    /// let resolved = tokio_test::block_on(svc.authenticate(&token)).unwrap();
    /// assert_eq!(resolved.id, 7);
    /// ```
    pub fn issue_token(&self, user: &CurrentUser) -> Result<String, AuthError> {
        let exp = (chrono::Utc::now() + chrono::Duration::hours(self.cfg.token_ttl_hours)).timestamp() as usize;
        let claims = Claims { sub: user.email.clone(), uid: user.id, exp };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Check signature and expiry; does not touch the store.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data = decode::<Claims>(token, &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()), &validation)
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        Ok(data.claims)
    }

    /// Resolve a bearer token to the user it was issued for.
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> Result<CurrentUser, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::MissingToken);
        }
        let claims = self.verify_token(token)?;
        let user = self.repo.find_user(claims.uid).await?.ok_or(AuthError::UnknownUser)?;
        debug!(user_id = user.id, "token_authenticated");
        Ok(user)
    }
}
