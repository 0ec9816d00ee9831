//! Read-only advertisement listing with owner, location and advertised
//! services resolved in batches.

use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use tracing::instrument;

use crate::errors::ServiceError;
use crate::views::{LocationView, ServiceSummary, UserSummary};
use models::{advertisement, advertisement_service, product, town, user};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdvertisementView {
    pub id: i32,
    #[serde(rename = "ADTitle")]
    pub title: String,
    #[serde(rename = "User")]
    pub user: Option<UserSummary>,
    #[serde(rename = "Service")]
    pub services: Vec<ServiceSummary>,
    #[serde(rename = "Location")]
    pub location: Option<LocationView>,
    #[serde(rename = "AdDescription")]
    pub description: String,
    #[serde(rename = "StartDate")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "ExpiryDate")]
    pub expiry_date: NaiveDate,
    #[serde(rename = "NoOfMessages")]
    pub message_count: i32,
}

#[instrument(skip(db))]
pub async fn list_advertisements(db: &DatabaseConnection) -> Result<Vec<AdvertisementView>, ServiceError> {
    let ads = advertisement::Entity::find()
        .order_by_asc(advertisement::Column::Id)
        .all(db)
        .await?;
    if ads.is_empty() {
        return Ok(Vec::new());
    }

    let user_ids: Vec<i32> = ads.iter().map(|a| a.user_id).collect();
    let town_ids: Vec<i32> = ads.iter().map(|a| a.location_id).collect();
    let ad_ids: Vec<i32> = ads.iter().map(|a| a.id).collect();

    let users: HashMap<i32, user::Model> = user::Entity::find()
        .filter(user::Column::Id.is_in(user_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    let towns: HashMap<i32, town::Model> = town::Entity::find()
        .filter(town::Column::Id.is_in(town_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

    let links = advertisement_service::Entity::find()
        .filter(advertisement_service::Column::AdvertisementId.is_in(ad_ids))
        .order_by_asc(advertisement_service::Column::Id)
        .all(db)
        .await?;
    let products: HashMap<i32, product::Model> = product::Entity::find()
        .filter(product::Column::Id.is_in(links.iter().map(|l| l.product_id).collect::<Vec<_>>()))
        .all(db)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();
    let mut services: HashMap<i32, Vec<ServiceSummary>> = HashMap::new();
    for link in &links {
        if let Some(p) = products.get(&link.product_id) {
            services.entry(link.advertisement_id).or_default().push(ServiceSummary::from(p));
        }
    }

    Ok(ads
        .into_iter()
        .map(|a| AdvertisementView {
            id: a.id,
            user: users.get(&a.user_id).map(UserSummary::from),
            services: services.remove(&a.id).unwrap_or_default(),
            location: towns.get(&a.location_id).map(LocationView::from),
            title: a.title,
            description: a.description,
            start_date: a.start_date,
            expiry_date: a.expiry_date,
            message_count: a.message_count,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{catalog, get_db, user};
    use models::advertisement::NewAdvertisement;

    #[tokio::test]
    async fn lists_adverts_with_nested_objects() -> anyhow::Result<()> {
        let db = get_db().await?;
        let c = catalog(&db).await?;
        let owner = user(&db, "ads@x.io").await?;
        let expiry = NaiveDate::from_ymd_opt(2030, 1, 31).unwrap();
        advertisement::create(
            &db,
            NewAdvertisement {
                user_id: owner.id,
                location_id: c.town.id,
                title: "Spring offer".into(),
                description: "".into(),
                start_date: None,
                expiry_date: expiry,
                product_ids: vec![c.plumbing.id, c.painting.id],
            },
        )
        .await?;
        advertisement::create(
            &db,
            NewAdvertisement {
                user_id: owner.id,
                location_id: c.town.id,
                title: "Bare".into(),
                description: "no services".into(),
                start_date: NaiveDate::from_ymd_opt(2030, 1, 1),
                expiry_date: expiry,
                product_ids: vec![],
            },
        )
        .await?;

        let ads = list_advertisements(&db).await?;
        assert_eq!(ads.len(), 2);
        assert_eq!(ads[0].services.len(), 2);
        assert_eq!(ads[0].user.as_ref().map(|u| u.id), Some(owner.id));
        assert!(ads[1].services.is_empty());

        let json = serde_json::to_value(&ads[0])?;
        assert_eq!(json["ADTitle"], "Spring offer");
        assert_eq!(json["Location"]["Name"], "Nakuru");
        assert_eq!(json["ExpiryDate"], "2030-01-31");
        assert_eq!(json["StartDate"], serde_json::Value::Null);
        assert_eq!(json["NoOfMessages"], 0);
        Ok(())
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() -> anyhow::Result<()> {
        let db = get_db().await?;
        assert!(list_advertisements(&db).await?.is_empty());
        Ok(())
    }
}
