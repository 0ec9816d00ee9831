#![cfg(test)]
use sea_orm::DatabaseConnection;

use models::service_provider::NewProvider;
use models::service_request::NewServiceRequest;

/// Fresh migrated in-memory database; every test gets its own.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_in_memory().await
}

pub async fn user(db: &DatabaseConnection, email: &str) -> anyhow::Result<models::user::Model> {
    let name = email.split('@').next().unwrap_or(email);
    Ok(models::user::create(db, email, name).await?)
}

pub struct Catalog {
    pub home: models::product_category::Model,
    pub beauty: models::product_category::Model,
    pub plumbing: models::product::Model,
    pub painting: models::product::Model,
    pub haircut: models::product::Model,
    pub town: models::town::Model,
}

/// Two categories, three products, one town.
pub async fn catalog(db: &DatabaseConnection) -> anyhow::Result<Catalog> {
    let home = models::product_category::create(db, "Home Repairs").await?;
    let beauty = models::product_category::create(db, "Beauty").await?;
    Ok(Catalog {
        plumbing: models::product::create(db, home.id, "Plumbing").await?,
        painting: models::product::create(db, home.id, "House painting").await?,
        haircut: models::product::create(db, beauty.id, "Haircut").await?,
        town: models::town::create(db, "Nakuru").await?,
        home,
        beauty,
    })
}

/// Provider profile for `user_id` offering `product_id`; returns the offering.
pub async fn offering(
    db: &DatabaseConnection,
    user_id: i32,
    product_id: i32,
) -> anyhow::Result<models::provider_service::Model> {
    let provider = models::service_provider::create(
        db,
        NewProvider { user_id, product_id, location_id: None, gender_id: None, age_bracket: None },
    )
    .await?;
    Ok(models::provider_service::create(db, provider.id, product_id).await?)
}

pub async fn request(
    db: &DatabaseConnection,
    user_id: i32,
    provider_service_id: i32,
    text: &str,
) -> anyhow::Result<models::service_request::Model> {
    Ok(models::service_request::create(
        db,
        NewServiceRequest {
            provider_service_id,
            user_id,
            location_id: None,
            latitude: -0.3,
            longitude: 36.07,
            request_text: text.to_string(),
        },
    )
    .await?)
}
