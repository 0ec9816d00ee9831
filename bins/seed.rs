//! Load a demo catalog and print a bearer token for each demo user.
//! Safe to run repeatedly: existing rows are reused by name/email.

use std::sync::Arc;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::info;

use models::{product, product_category, town, user};
use service::auth::repository::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};
use service::auth::CurrentUser;

const CATALOG: &[(&str, &[&str])] = &[
    ("Home Repairs", &["Plumbing", "Electrical wiring", "House painting"]),
    ("Beauty", &["Haircut", "Manicure"]),
    ("Tutoring", &["Mathematics", "Swahili"]),
];
const TOWNS: &[&str] = &["Nairobi", "Nakuru", "Eldoret"];
const USERS: &[(&str, &str)] = &[("client@example.com", "Demo Client"), ("provider@example.com", "Demo Provider")];

async fn category(db: &DatabaseConnection, name: &str) -> anyhow::Result<product_category::Model> {
    let found = product_category::Entity::find()
        .filter(product_category::Column::Name.eq(name))
        .one(db)
        .await?;
    Ok(match found {
        Some(c) => c,
        None => product_category::create(db, name).await?,
    })
}

async fn product(db: &DatabaseConnection, category_id: i32, name: &str) -> anyhow::Result<product::Model> {
    let found = product::Entity::find()
        .filter(product::Column::CategoryId.eq(category_id))
        .filter(product::Column::Name.eq(name))
        .one(db)
        .await?;
    Ok(match found {
        Some(p) => p,
        None => product::create(db, category_id, name).await?,
    })
}

async fn town(db: &DatabaseConnection, name: &str) -> anyhow::Result<town::Model> {
    let found = town::Entity::find().filter(town::Column::Name.eq(name)).one(db).await?;
    Ok(match found {
        Some(t) => t,
        None => town::create(db, name).await?,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = configs::AppConfig::load_and_validate()?;
    common::utils::logging::init_logging_default();

    let db = models::db::connect_with_config(&cfg.database).await?;
    models::db::migrate(&db).await?;

    for (cat, products) in CATALOG {
        let c = category(&db, cat).await?;
        for p in *products {
            product(&db, c.id, p).await?;
        }
    }
    for t in TOWNS {
        town(&db, t).await?;
    }
    info!(categories = CATALOG.len(), towns = TOWNS.len(), "catalog seeded");

    let auth = AuthService::new(Arc::new(SeaOrmAuthRepository { db: db.clone() }), AuthConfig::from(&cfg.auth));
    for (email, name) in USERS {
        let u = match user::find_by_email(&db, email).await? {
            Some(u) => u,
            None => user::create(&db, email, name).await?,
        };
        let token = auth.issue_token(&CurrentUser::from(u.clone()))?;
        println!("{}\t{}\t{}", u.id, u.email, token);
    }
    Ok(())
}
