use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::Query;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use crate::errors::ServiceError;
use models::service_request::NewServiceRequest;
use models::{product, provider_service, service_provider, service_request, service_response, town};

/// Persistence needed by the matching workflow.
#[async_trait]
pub trait MatchingRepository: Send + Sync {
    async fn offering_exists(&self, id: i32) -> Result<bool, ServiceError>;
    async fn town_exists(&self, id: i32) -> Result<bool, ServiceError>;
    async fn request_exists(&self, id: i32) -> Result<bool, ServiceError>;

    async fn insert_request(&self, new: NewServiceRequest) -> Result<service_request::Model, ServiceError>;
    async fn insert_response(&self, request_id: i32, text: &str) -> Result<service_response::Model, ServiceError>;

    /// Requests raised by `user_id`, oldest first.
    async fn requests_by_client(&self, user_id: i32, unanswered_only: bool) -> Result<Vec<service_request::Model>, ServiceError>;
    /// Requests against offerings of the provider profile owned by `user_id`.
    async fn requests_by_provider_user(&self, user_id: i32, unanswered_only: bool) -> Result<Vec<service_request::Model>, ServiceError>;

    async fn provider_for_user(&self, user_id: i32) -> Result<Option<service_provider::Model>, ServiceError>;
    async fn responses_by_client(&self, user_id: i32) -> Result<Vec<service_response::Model>, ServiceError>;
    async fn responses_by_provider(&self, provider_id: i32) -> Result<Vec<service_response::Model>, ServiceError>;

    /// Offering id -> offered product.
    async fn offering_products(&self, offering_ids: Vec<i32>) -> Result<HashMap<i32, product::Model>, ServiceError>;
    async fn towns(&self, ids: Vec<i32>) -> Result<HashMap<i32, town::Model>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmMatchingRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmMatchingRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn without_response<S: QueryFilter>(q: S) -> S {
    q.filter(
        service_request::Column::Id.not_in_subquery(
            Query::select()
                .column(service_response::Column::ServiceRequestId)
                .from(service_response::Entity)
                .to_owned(),
        ),
    )
}

#[async_trait]
impl MatchingRepository for SeaOrmMatchingRepository {
    async fn offering_exists(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(provider_service::Entity::find_by_id(id).one(&self.db).await?.is_some())
    }

    async fn town_exists(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(town::Entity::find_by_id(id).one(&self.db).await?.is_some())
    }

    async fn request_exists(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(service_request::Entity::find_by_id(id).one(&self.db).await?.is_some())
    }

    async fn insert_request(&self, new: NewServiceRequest) -> Result<service_request::Model, ServiceError> {
        Ok(service_request::create(&self.db, new).await?)
    }

    async fn insert_response(&self, request_id: i32, text: &str) -> Result<service_response::Model, ServiceError> {
        Ok(service_response::create(&self.db, request_id, text).await?)
    }

    async fn requests_by_client(&self, user_id: i32, unanswered_only: bool) -> Result<Vec<service_request::Model>, ServiceError> {
        let mut q = service_request::Entity::find().filter(service_request::Column::UserId.eq(user_id));
        if unanswered_only {
            q = without_response(q);
        }
        Ok(q.order_by_asc(service_request::Column::Id).all(&self.db).await?)
    }

    async fn requests_by_provider_user(&self, user_id: i32, unanswered_only: bool) -> Result<Vec<service_request::Model>, ServiceError> {
        let mut q = service_request::Entity::find()
            .join(JoinType::InnerJoin, service_request::Relation::ProviderService.def())
            .join(JoinType::InnerJoin, provider_service::Relation::Provider.def())
            .filter(service_provider::Column::UserId.eq(user_id));
        if unanswered_only {
            q = without_response(q);
        }
        Ok(q.order_by_asc(service_request::Column::Id).all(&self.db).await?)
    }

    async fn provider_for_user(&self, user_id: i32) -> Result<Option<service_provider::Model>, ServiceError> {
        Ok(service_provider::find_by_user(&self.db, user_id).await?)
    }

    async fn responses_by_client(&self, user_id: i32) -> Result<Vec<service_response::Model>, ServiceError> {
        Ok(service_response::Entity::find()
            .join(JoinType::InnerJoin, service_response::Relation::ServiceRequest.def())
            .filter(service_request::Column::UserId.eq(user_id))
            .order_by_asc(service_response::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn responses_by_provider(&self, provider_id: i32) -> Result<Vec<service_response::Model>, ServiceError> {
        Ok(service_response::Entity::find()
            .join(JoinType::InnerJoin, service_response::Relation::ServiceRequest.def())
            .join(JoinType::InnerJoin, service_request::Relation::ProviderService.def())
            .filter(provider_service::Column::ProviderId.eq(provider_id))
            .order_by_asc(service_response::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn offering_products(&self, offering_ids: Vec<i32>) -> Result<HashMap<i32, product::Model>, ServiceError> {
        if offering_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let offerings = provider_service::Entity::find()
            .filter(provider_service::Column::Id.is_in(offering_ids))
            .all(&self.db)
            .await?;
        let products: HashMap<i32, product::Model> = product::Entity::find()
            .filter(product::Column::Id.is_in(offerings.iter().map(|o| o.product_id).collect::<Vec<_>>()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();
        Ok(offerings
            .into_iter()
            .filter_map(|o| products.get(&o.product_id).cloned().map(|p| (o.id, p)))
            .collect())
    }

    async fn towns(&self, ids: Vec<i32>) -> Result<HashMap<i32, town::Model>, ServiceError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(town::Entity::find()
            .filter(town::Column::Id.is_in(ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect())
    }
}
