use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use super::domain::CurrentUser;
use super::errors::AuthError;

/// Repository abstraction for resolving token subjects.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user(&self, id: i32) -> Result<Option<CurrentUser>, AuthError>;
}

/// SeaORM-backed lookup against the `user` table.
pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user(&self, id: i32) -> Result<Option<CurrentUser>, AuthError> {
        let found = models::user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(found.map(CurrentUser::from))
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<i32, CurrentUser>>,
    }

    impl MockAuthRepository {
        pub fn with_user(self, id: i32, email: &str, name: &str) -> Self {
            if let Ok(mut users) = self.users.lock() {
                users.insert(id, CurrentUser { id, email: email.into(), name: name.into() });
            }
            self
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user(&self, id: i32) -> Result<Option<CurrentUser>, AuthError> {
            let users = self.users.lock().map_err(|e| AuthError::Repository(e.to_string()))?;
            Ok(users.get(&id).cloned())
        }
    }
}
