//! Provider profiles: one per user, with working days and the products the
//! provider offers. Each offering becomes a `provider_service` row that
//! service requests point at.

use std::collections::HashMap;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::validation::{does_not_exist, invalid_choice, FieldErrors, Fields};
use crate::views::{LocationView, ServiceSummary};
use models::errors::ModelError;
use models::service_provider::{NewProvider, AGE_BRACKETS};
use models::working_day::DAYS_OF_WEEK;
use models::{gender, product, provider_service, provider_working_day, service_provider, town, working_day};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateProviderInput {
    pub product_id: i32,
    pub location_id: Option<i32>,
    pub gender_id: Option<i32>,
    pub age_bracket: Option<String>,
    pub working_days: Vec<String>,
    /// Extra products beyond `product_id`; may be empty.
    pub service_ids: Vec<i32>,
}

impl CreateProviderInput {
    pub fn from_json(body: &Value) -> Result<Self, FieldErrors> {
        let mut f = Fields::new(body)?;
        let product_id = f.required_int("ProductID");
        let location_id = f.optional_int("LocationID");
        let gender_id = f.optional_int("GenderID");
        let age_bracket = f.optional_text("AgeBracket");
        if let Some(b) = age_bracket.as_deref() {
            if !AGE_BRACKETS.contains(&b) {
                f.reject("AgeBracket", invalid_choice(b));
            }
        }
        let working_days = f.choice_list("WorkingDays", &DAYS_OF_WEEK);
        let service_ids = f.int_list("ServiceIDs", true);
        f.finish()?;
        Ok(Self {
            product_id: product_id.unwrap_or_default(),
            location_id,
            gender_id,
            age_bracket,
            working_days,
            service_ids,
        })
    }

    /// `product_id` first, then `service_ids`, without repeats.
    fn offered_products(&self) -> Vec<i32> {
        let mut out = vec![self.product_id];
        for id in &self.service_ids {
            if !out.contains(id) {
                out.push(*id);
            }
        }
        out
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenderView {
    pub id: i32,
    #[serde(rename = "Name")]
    pub name: String,
}

/// One product as offered by the provider, addressable by requests.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OfferedService {
    #[serde(rename = "ProviderServiceID")]
    pub provider_service_id: i32,
    #[serde(rename = "Service")]
    pub service: ServiceSummary,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProviderView {
    pub id: i32,
    #[serde(rename = "UserID")]
    pub user_id: i32,
    #[serde(rename = "Product")]
    pub product: Option<ServiceSummary>,
    #[serde(rename = "Location")]
    pub location: Option<LocationView>,
    #[serde(rename = "Gender")]
    pub gender: Option<GenderView>,
    #[serde(rename = "AgeBracket")]
    pub age_bracket: Option<String>,
    #[serde(rename = "WorkingDays")]
    pub working_days: Vec<String>,
    #[serde(rename = "Services")]
    pub services: Vec<OfferedService>,
    #[serde(rename = "TimeStamp")]
    pub timestamp: String,
}

async fn check_references(db: &DatabaseConnection, input: &CreateProviderInput) -> Result<(), ServiceError> {
    let mut errs = FieldErrors::new();
    let wanted = input.offered_products();
    let found: Vec<i32> = product::Entity::find()
        .filter(product::Column::Id.is_in(wanted))
        .all(db)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    if !found.contains(&input.product_id) {
        errs.add("ProductID", does_not_exist(input.product_id));
    }
    for id in &input.service_ids {
        if !found.contains(id) {
            errs.add("ServiceIDs", does_not_exist(*id));
        }
    }
    if let Some(lid) = input.location_id {
        if town::Entity::find_by_id(lid).one(db).await?.is_none() {
            errs.add("LocationID", does_not_exist(lid));
        }
    }
    if let Some(gid) = input.gender_id {
        if gender::Entity::find_by_id(gid).one(db).await?.is_none() {
            errs.add("GenderID", does_not_exist(gid));
        }
    }
    Ok(errs.into_result()?)
}

const PROFILE_EXISTS: &str = "provider profile already exists for this user";

/// Create the caller's profile together with its working days and offerings.
#[instrument(skip(db, input), fields(product_id = input.product_id))]
pub async fn create_profile(
    db: &DatabaseConnection,
    user_id: i32,
    input: CreateProviderInput,
) -> Result<ProviderView, ServiceError> {
    if service_provider::find_by_user(db, user_id).await?.is_some() {
        return Err(ServiceError::Conflict(PROFILE_EXISTS.into()));
    }
    check_references(db, &input).await?;
    let provider = insert_profile(db, user_id, input).await?;
    info!(provider_id = provider.id, user_id, "provider_profile_created");
    assemble(db, provider).await
}

/// Writes the profile rows in one transaction. A concurrent create for the
/// same user loses on the unique `UserID` column and surfaces as `Conflict`.
async fn insert_profile(
    db: &DatabaseConnection,
    user_id: i32,
    input: CreateProviderInput,
) -> Result<service_provider::Model, ServiceError> {
    let days = working_day::find_by_days(db, &input.working_days).await?;
    let offered = input.offered_products();

    let txn = db.begin().await?;
    let provider = service_provider::create(
        &txn,
        NewProvider {
            user_id,
            product_id: input.product_id,
            location_id: input.location_id,
            gender_id: input.gender_id,
            age_bracket: input.age_bracket,
        },
    )
    .await
    .map_err(|e| match e {
        ModelError::Conflict(_) => ServiceError::Conflict(PROFILE_EXISTS.into()),
        other => other.into(),
    })?;
    for day in &days {
        provider_working_day::link(&txn, provider.id, day.id).await?;
    }
    for product_id in offered {
        provider_service::create(&txn, provider.id, product_id).await?;
    }
    txn.commit().await?;
    Ok(provider)
}

/// The caller's profile, or `NotFound` when they have none.
pub async fn get_profile(db: &DatabaseConnection, user_id: i32) -> Result<ProviderView, ServiceError> {
    let provider = service_provider::find_by_user(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("provider"))?;
    assemble(db, provider).await
}

async fn assemble(db: &DatabaseConnection, p: service_provider::Model) -> Result<ProviderView, ServiceError> {
    let location = match p.location_id {
        Some(id) => town::Entity::find_by_id(id).one(db).await?.as_ref().map(LocationView::from),
        None => None,
    };
    let gender = match p.gender_id {
        Some(id) => gender::Entity::find_by_id(id)
            .one(db)
            .await?
            .map(|g| GenderView { id: g.id, name: g.name }),
        None => None,
    };

    let day_ids: Vec<i32> = provider_working_day::Entity::find()
        .filter(provider_working_day::Column::ProviderId.eq(p.id))
        .all(db)
        .await?
        .into_iter()
        .map(|l| l.working_day_id)
        .collect();
    let working_days = working_day::Entity::find()
        .filter(working_day::Column::Id.is_in(day_ids))
        .order_by_asc(working_day::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|d| d.day)
        .collect();

    let offerings = provider_service::Entity::find()
        .filter(provider_service::Column::ProviderId.eq(p.id))
        .order_by_asc(provider_service::Column::Id)
        .all(db)
        .await?;
    let mut product_ids: Vec<i32> = offerings.iter().map(|o| o.product_id).collect();
    product_ids.push(p.product_id);
    let products: HashMap<i32, product::Model> = product::Entity::find()
        .filter(product::Column::Id.is_in(product_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();
    let services = offerings
        .iter()
        .filter_map(|o| {
            products.get(&o.product_id).map(|m| OfferedService {
                provider_service_id: o.id,
                service: ServiceSummary::from(m),
            })
        })
        .collect();

    Ok(ProviderView {
        id: p.id,
        user_id: p.user_id,
        product: products.get(&p.product_id).map(ServiceSummary::from),
        location,
        gender,
        age_bracket: p.age_bracket,
        working_days,
        services,
        timestamp: p.created_at.to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{catalog, get_db, user};
    use serde_json::json;

    #[test]
    fn parses_and_validates_body() {
        let input = CreateProviderInput::from_json(&json!({
            "ProductID": 3,
            "AgeBracket": "18+",
            "WorkingDays": ["Friday", "Monday"],
            "ServiceIDs": [3, 4]
        }))
        .unwrap();
        assert_eq!(input.offered_products(), vec![3, 4]);
        assert_eq!(input.working_days, vec!["Friday", "Monday"]);

        let errs = CreateProviderInput::from_json(&json!({
            "AgeBracket": "21+",
            "WorkingDays": ["Someday"],
            "ServiceIDs": "x"
        }))
        .unwrap_err();
        for field in ["ProductID", "AgeBracket", "WorkingDays", "ServiceIDs"] {
            assert!(errs.contains(field), "missing error for {field}");
        }
    }

    #[tokio::test]
    async fn creates_profile_with_days_and_offerings() -> anyhow::Result<()> {
        let db = get_db().await?;
        let c = catalog(&db).await?;
        let u = user(&db, "pro@x.io").await?;
        let input = CreateProviderInput::from_json(&json!({
            "ProductID": c.plumbing.id,
            "LocationID": c.town.id,
            "GenderID": 2,
            "WorkingDays": ["Sunday", "Monday"],
            "ServiceIDs": [c.painting.id, c.plumbing.id]
        }))?;
        let view = create_profile(&db, u.id, input).await?;
        assert_eq!(view.user_id, u.id);
        assert_eq!(view.working_days, vec!["Monday", "Sunday"]);
        assert_eq!(view.services.len(), 2);
        assert_eq!(view.services[0].service.id, c.plumbing.id);
        assert_eq!(view.gender.as_ref().map(|g| g.name.as_str()), Some("Female"));
        assert_eq!(view.location.as_ref().map(|l| l.id), Some(c.town.id));

        let again = get_profile(&db, u.id).await?;
        assert_eq!(again.id, view.id);
        assert_eq!(again.services, view.services);
        assert_eq!(again.working_days, view.working_days);
        Ok(())
    }

    #[tokio::test]
    async fn second_profile_conflicts() -> anyhow::Result<()> {
        let db = get_db().await?;
        let c = catalog(&db).await?;
        let u = user(&db, "twice@x.io").await?;
        let input = CreateProviderInput::from_json(&json!({"ProductID": c.haircut.id}))?;
        create_profile(&db, u.id, input.clone()).await?;
        let err = create_profile(&db, u.id, input).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        Ok(())
    }

    #[tokio::test]
    async fn racing_insert_is_a_conflict_and_rolls_back() -> anyhow::Result<()> {
        let db = get_db().await?;
        let c = catalog(&db).await?;
        let u = user(&db, "race@x.io").await?;
        let input = CreateProviderInput::from_json(&json!({
            "ProductID": c.plumbing.id,
            "WorkingDays": ["Monday"],
            "ServiceIDs": [c.painting.id]
        }))?;
        // Both callers passed the existence check before either wrote.
        let first = insert_profile(&db, u.id, input.clone()).await?;
        let err = insert_profile(&db, u.id, input).await.unwrap_err();
        match err {
            ServiceError::Conflict(msg) => assert_eq!(msg, PROFILE_EXISTS),
            other => panic!("expected conflict, got {other:?}"),
        }

        let providers = service_provider::Entity::find()
            .filter(service_provider::Column::UserId.eq(u.id))
            .all(&db)
            .await?;
        assert_eq!(providers.len(), 1);
        let offerings = provider_service::Entity::find().all(&db).await?;
        assert!(offerings.iter().all(|o| o.provider_id == first.id));
        assert_eq!(offerings.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_creates_yield_one_profile() -> anyhow::Result<()> {
        let db = get_db().await?;
        let c = catalog(&db).await?;
        let u = user(&db, "both@x.io").await?;
        let input = CreateProviderInput::from_json(&json!({"ProductID": c.haircut.id}))?;
        let (a, b) = tokio::join!(
            create_profile(&db, u.id, input.clone()),
            create_profile(&db, u.id, input)
        );
        let (ok, err) = match (a, b) {
            (Ok(v), Err(e)) | (Err(e), Ok(v)) => (v, e),
            other => panic!("expected one success and one failure, got {other:?}"),
        };
        assert_eq!(ok.user_id, u.id);
        assert!(matches!(err, ServiceError::Conflict(_)));
        Ok(())
    }

    #[tokio::test]
    async fn dangling_references_are_field_errors() -> anyhow::Result<()> {
        let db = get_db().await?;
        let _ = catalog(&db).await?;
        let u = user(&db, "dangle@x.io").await?;
        let input = CreateProviderInput::from_json(&json!({
            "ProductID": 999,
            "LocationID": 998,
            "GenderID": 997,
            "ServiceIDs": [996]
        }))?;
        match create_profile(&db, u.id, input).await {
            Err(ServiceError::Validation(errs)) => {
                assert_eq!(errs.get("ProductID").unwrap(), [does_not_exist(999)]);
                assert!(errs.contains("LocationID"));
                assert!(errs.contains("GenderID"));
                assert!(errs.contains("ServiceIDs"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(matches!(get_profile(&db, u.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
