
/// Multi-entity workflow: catalog -> provider -> request -> response
pub mod integration_tests {
    use crate::db::connect_in_memory;
    use crate::{product, product_category, provider_service, service_provider, service_request, service_response, user};
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
    use anyhow::Result;

    #[tokio::test]
    async fn test_complete_workflow() -> Result<()> {
        let db = connect_in_memory().await?;

        let cat = product_category::create(&db, "Home Repairs").await?;
        let plumbing = product::create(&db, cat.id, "Plumbing").await?;
        let provider_user = user::create(&db, "pro@example.com", "Pro").await?;
        let client = user::create(&db, "client@example.com", "Client").await?;

        let provider = service_provider::create(&db, service_provider::NewProvider {
            user_id: provider_user.id,
            product_id: plumbing.id,
            location_id: None,
            gender_id: None,
            age_bracket: Some("18+".into()),
        }).await?;
        let offering = provider_service::create(&db, provider.id, plumbing.id).await?;

        let req = service_request::create(&db, service_request::NewServiceRequest {
            provider_service_id: offering.id,
            user_id: client.id,
            location_id: None,
            latitude: -1.2921,
            longitude: 36.8219,
            request_text: "Leaking sink".into(),
        }).await?;
        let resp = service_response::create(&db, req.id, "On my way").await?;
        assert_eq!(resp.service_request_id, req.id);

        let replies = service_response::Entity::find()
            .filter(service_response::Column::ServiceRequestId.eq(req.id))
            .all(&db)
            .await?;
        assert_eq!(replies.len(), 1);
        Ok(())
    }
}
