use serde::{Deserialize, Serialize};

/// JWT claims: `sub` carries the email, `uid` the user id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub uid: i32,
    pub exp: usize,
}

/// The authenticated caller, injected into handlers by the auth middleware.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i32,
    pub email: String,
    pub name: String,
}

impl From<models::user::Model> for CurrentUser {
    fn from(m: models::user::Model) -> Self {
        Self { id: m.id, email: m.email, name: m.name }
    }
}
