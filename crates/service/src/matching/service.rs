use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{CreateRequestInput, CreateResponseInput, RequestView, ResponseView};
use super::repository::MatchingRepository;
use crate::errors::ServiceError;
use crate::validation::{does_not_exist, FieldErrors};
use crate::views::{LocationView, ServiceSummary};
use models::service_request::{self, NewServiceRequest};

/// Application service for the request/response workflow.
/// Every listing is scoped to the calling user, either as the client who
/// raised a request or as the provider it was addressed to.
pub struct MatchingService<R: MatchingRepository> {
    repo: Arc<R>,
}

impl<R: MatchingRepository> MatchingService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Raise a request owned by `user_id`.
    #[instrument(skip(self, input), fields(provider_service_id = input.provider_service_id))]
    pub async fn create_request(&self, user_id: i32, input: CreateRequestInput) -> Result<RequestView, ServiceError> {
        let mut errs = FieldErrors::new();
        if !self.repo.offering_exists(input.provider_service_id).await? {
            errs.add("ProviderServiceID", does_not_exist(input.provider_service_id));
        }
        if let Some(lid) = input.location_id {
            if !self.repo.town_exists(lid).await? {
                errs.add("LocationID", does_not_exist(lid));
            }
        }
        errs.into_result()?;

        let row = self
            .repo
            .insert_request(NewServiceRequest {
                provider_service_id: input.provider_service_id,
                user_id,
                location_id: input.location_id,
                latitude: input.latitude,
                longitude: input.longitude,
                request_text: input.request_text,
            })
            .await?;
        info!(id = row.id, user_id, "service_request_created");
        let mut views = self.render(vec![row]).await?;
        views.pop().ok_or_else(|| ServiceError::Db("created request vanished".into()))
    }

    /// Answer an existing request. Repeat answers are accepted.
    #[instrument(skip(self, input), fields(service_request_id = input.service_request_id))]
    pub async fn create_response(&self, input: CreateResponseInput) -> Result<ResponseView, ServiceError> {
        if !self.repo.request_exists(input.service_request_id).await? {
            return Err(FieldErrors::single("ServiceRequestID", does_not_exist(input.service_request_id)).into());
        }
        let row = self.repo.insert_response(input.service_request_id, &input.response_text).await?;
        info!(id = row.id, service_request_id = row.service_request_id, "service_response_created");
        Ok(ResponseView::from(row))
    }

    pub async fn list_requests_for_client(&self, user_id: i32) -> Result<Vec<RequestView>, ServiceError> {
        let rows = self.repo.requests_by_client(user_id, false).await?;
        self.render(rows).await
    }

    pub async fn list_requests_for_provider(&self, user_id: i32) -> Result<Vec<RequestView>, ServiceError> {
        let rows = self.repo.requests_by_provider_user(user_id, false).await?;
        self.render(rows).await
    }

    /// Requests addressed to the caller's provider profile still awaiting an answer.
    pub async fn list_unanswered_for_provider(&self, user_id: i32) -> Result<Vec<RequestView>, ServiceError> {
        let rows = self.repo.requests_by_provider_user(user_id, true).await?;
        self.render(rows).await
    }

    /// Requests the caller raised that nobody has answered yet.
    pub async fn list_unanswered_for_client(&self, user_id: i32) -> Result<Vec<RequestView>, ServiceError> {
        let rows = self.repo.requests_by_client(user_id, true).await?;
        self.render(rows).await
    }

    pub async fn list_responses_for_client(&self, user_id: i32) -> Result<Vec<ResponseView>, ServiceError> {
        let rows = self.repo.responses_by_client(user_id).await?;
        Ok(rows.into_iter().map(ResponseView::from).collect())
    }

    /// Responses to requests addressed to the caller's profile; `NotFound`
    /// when the caller is not a provider.
    pub async fn list_responses_for_provider(&self, user_id: i32) -> Result<Vec<ResponseView>, ServiceError> {
        let provider = self
            .repo
            .provider_for_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("provider"))?;
        let rows = self.repo.responses_by_provider(provider.id).await?;
        Ok(rows.into_iter().map(ResponseView::from).collect())
    }

    /// Like [`Self::list_responses_for_provider`] but empty for non-providers.
    pub async fn list_own_responses(&self, user_id: i32) -> Result<Vec<ResponseView>, ServiceError> {
        match self.list_responses_for_provider(user_id).await {
            Err(ServiceError::NotFound(_)) => Ok(Vec::new()),
            other => other,
        }
    }

    async fn render(&self, rows: Vec<service_request::Model>) -> Result<Vec<RequestView>, ServiceError> {
        let products = self.repo.offering_products(rows.iter().map(|r| r.provider_service_id).collect()).await?;
        let towns = self.repo.towns(rows.iter().filter_map(|r| r.location_id).collect()).await?;
        Ok(rows
            .into_iter()
            .map(|r| RequestView {
                id: r.id,
                user_id: r.user_id,
                provider_service_id: r.provider_service_id,
                service: products.get(&r.provider_service_id).map(ServiceSummary::from),
                location: r.location_id.and_then(|id| towns.get(&id)).map(LocationView::from),
                latitude: r.latitude,
                longitude: r.longitude,
                request_text: r.request_text,
                timestamp: r.created_at.to_rfc3339(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::repository::SeaOrmMatchingRepository;
    use crate::test_support::{catalog, get_db, offering, request, user};
    use sea_orm::DatabaseConnection;

    fn svc(db: &DatabaseConnection) -> MatchingService<SeaOrmMatchingRepository> {
        MatchingService::new(Arc::new(SeaOrmMatchingRepository::new(db.clone())))
    }

    fn answer(id: i32) -> CreateResponseInput {
        CreateResponseInput { service_request_id: id, response_text: "On it".into() }
    }

    #[tokio::test]
    async fn request_is_owned_by_caller() -> anyhow::Result<()> {
        let db = get_db().await?;
        let c = catalog(&db).await?;
        let client = user(&db, "client@x.io").await?;
        let pro = user(&db, "pro@x.io").await?;
        let ps = offering(&db, pro.id, c.plumbing.id).await?;

        let view = svc(&db)
            .create_request(
                client.id,
                CreateRequestInput {
                    provider_service_id: ps.id,
                    location_id: Some(c.town.id),
                    latitude: -0.28,
                    longitude: 36.07,
                    request_text: "Leaking pipe".into(),
                },
            )
            .await?;
        assert_eq!(view.user_id, client.id);
        assert_eq!(view.service.as_ref().map(|s| s.name.as_str()), Some("Plumbing"));
        assert_eq!(view.location.as_ref().map(|l| l.id), Some(c.town.id));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_references_are_field_errors() -> anyhow::Result<()> {
        let db = get_db().await?;
        let client = user(&db, "client@x.io").await?;
        let err = svc(&db)
            .create_request(
                client.id,
                CreateRequestInput {
                    provider_service_id: 77,
                    location_id: Some(78),
                    latitude: 0.0,
                    longitude: 0.0,
                    request_text: "x".into(),
                },
            )
            .await
            .unwrap_err();
        match err {
            ServiceError::Validation(errs) => {
                assert_eq!(errs.get("ProviderServiceID").unwrap(), [does_not_exist(77)]);
                assert_eq!(errs.get("LocationID").unwrap(), [does_not_exist(78)]);
            }
            other => panic!("unexpected {other:?}"),
        }

        let err = svc(&db).create_response(answer(9999)).await.unwrap_err();
        match err {
            ServiceError::Validation(errs) => {
                assert_eq!(errs.get("ServiceRequestID").unwrap(), ["Invalid pk \"9999\" - object does not exist."]);
            }
            other => panic!("unexpected {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn unanswered_lists_drop_answered_requests() -> anyhow::Result<()> {
        let db = get_db().await?;
        let c = catalog(&db).await?;
        let client = user(&db, "client@x.io").await?;
        let pro = user(&db, "pro@x.io").await?;
        let ps = offering(&db, pro.id, c.plumbing.id).await?;
        let first = request(&db, client.id, ps.id, "one").await?;
        let second = request(&db, client.id, ps.id, "two").await?;

        let s = svc(&db);
        let resp = s.create_response(answer(first.id)).await?;
        assert_eq!(resp.service_request_id, first.id);
        // a second answer to the same request is accepted
        s.create_response(answer(first.id)).await?;

        let ids = |v: Vec<RequestView>| v.into_iter().map(|r| r.id).collect::<Vec<_>>();
        assert_eq!(ids(s.list_unanswered_for_provider(pro.id).await?), vec![second.id]);
        assert_eq!(ids(s.list_unanswered_for_client(client.id).await?), vec![second.id]);
        assert_eq!(ids(s.list_requests_for_provider(pro.id).await?), vec![first.id, second.id]);
        assert_eq!(ids(s.list_requests_for_client(client.id).await?), vec![first.id, second.id]);
        assert!(s.list_unanswered_for_provider(client.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn clients_never_see_each_others_requests() -> anyhow::Result<()> {
        let db = get_db().await?;
        let c = catalog(&db).await?;
        let a = user(&db, "a@x.io").await?;
        let b = user(&db, "b@x.io").await?;
        let pro = user(&db, "pro@x.io").await?;
        let ps = offering(&db, pro.id, c.haircut.id).await?;
        let ra = request(&db, a.id, ps.id, "from a").await?;
        let rb = request(&db, b.id, ps.id, "from b").await?;

        let s = svc(&db);
        let mine = s.list_requests_for_client(a.id).await?;
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, ra.id);
        assert!(mine.iter().all(|r| r.id != rb.id));
        Ok(())
    }

    #[tokio::test]
    async fn responses_are_scoped_by_role() -> anyhow::Result<()> {
        let db = get_db().await?;
        let c = catalog(&db).await?;
        let client = user(&db, "client@x.io").await?;
        let other = user(&db, "other@x.io").await?;
        let pro = user(&db, "pro@x.io").await?;
        let rival = user(&db, "rival@x.io").await?;
        let ps = offering(&db, pro.id, c.plumbing.id).await?;
        let rival_ps = offering(&db, rival.id, c.painting.id).await?;
        let r1 = request(&db, client.id, ps.id, "sink").await?;
        let r2 = request(&db, other.id, rival_ps.id, "walls").await?;

        let s = svc(&db);
        let a1 = s.create_response(answer(r1.id)).await?;
        let a2 = s.create_response(answer(r2.id)).await?;

        let to_client = s.list_responses_for_client(client.id).await?;
        assert_eq!(to_client.iter().map(|r| r.id).collect::<Vec<_>>(), vec![a1.id]);
        let by_pro = s.list_responses_for_provider(pro.id).await?;
        assert_eq!(by_pro.iter().map(|r| r.id).collect::<Vec<_>>(), vec![a1.id]);
        let by_rival = s.list_own_responses(rival.id).await?;
        assert_eq!(by_rival.iter().map(|r| r.id).collect::<Vec<_>>(), vec![a2.id]);

        assert!(matches!(s.list_responses_for_provider(client.id).await, Err(ServiceError::NotFound(_))));
        assert!(s.list_own_responses(client.id).await?.is_empty());
        Ok(())
    }
}
