//! Read side of the product catalog: categories, products and the
//! category-with-products tree.

use std::collections::{BTreeMap, HashMap};

use sea_orm::sea_query::{LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::errors::ServiceError;
use crate::validation::{FieldErrors, INVALID_INT};
use crate::views::ServiceSummary;
use models::{product, product_category};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryView {
    pub id: i32,
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductView {
    pub id: i32,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "CategoryID")]
    pub category_id: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryWithServices {
    pub id: i32,
    #[serde(rename = "Name")]
    pub name: String,
    pub services: Vec<ServiceSummary>,
}

/// Optional product filters; both present means both must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category_id: Option<i32>,
    pub name: Option<String>,
}

impl From<product_category::Model> for CategoryView {
    fn from(m: product_category::Model) -> Self {
        Self { id: m.id, name: m.name }
    }
}

impl From<product::Model> for ProductView {
    fn from(m: product::Model) -> Self {
        Self { id: m.id, name: m.name, category_id: m.category_id }
    }
}

/// Read `CategoryID` and `Name` from query parameters.
pub fn parse_product_filter(params: &HashMap<String, String>) -> Result<ProductFilter, FieldErrors> {
    let category_id = match params.get("CategoryID") {
        None => None,
        Some(raw) => match raw.trim().parse::<i32>() {
            Ok(id) => Some(id),
            Err(_) => return Err(FieldErrors::single("CategoryID", INVALID_INT)),
        },
    };
    Ok(ProductFilter { category_id, name: params.get("Name").cloned() })
}

pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<CategoryView>, ServiceError> {
    let rows = product_category::Entity::find()
        .order_by_asc(product_category::Column::Id)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(CategoryView::from).collect())
}

/// `%needle%` with LIKE metacharacters in `needle` escaped by `\`.
fn like_contains(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

fn name_contains(name: &str) -> SimpleExpr {
    product::Column::Name.like(LikeExpr::new(like_contains(name)).escape('\\'))
}

/// Products matching `filter`. Name matching is a case-sensitive substring
/// test on every backend; the SQL `LIKE` only narrows the candidate set.
#[instrument(skip(db))]
pub async fn list_products(db: &DatabaseConnection, filter: &ProductFilter) -> Result<Vec<ProductView>, ServiceError> {
    let mut cond = Condition::all();
    if let Some(cid) = filter.category_id {
        cond = cond.add(product::Column::CategoryId.eq(cid));
    }
    if let Some(name) = filter.name.as_deref().filter(|n| !n.is_empty()) {
        cond = cond.add(name_contains(name));
    }
    let mut rows = product::Entity::find()
        .filter(cond)
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?;
    if let Some(name) = filter.name.as_deref() {
        rows.retain(|p| p.name.contains(name));
    }
    debug!(count = rows.len(), "products_listed");
    Ok(rows.into_iter().map(ProductView::from).collect())
}

/// Every category with its products nested, categories and products by id.
pub async fn list_categories_with_services(db: &DatabaseConnection) -> Result<Vec<CategoryWithServices>, ServiceError> {
    let categories = product_category::Entity::find()
        .order_by_asc(product_category::Column::Id)
        .all(db)
        .await?;
    let products = product::Entity::find().order_by_asc(product::Column::Id).all(db).await?;

    let mut by_category: BTreeMap<i32, Vec<ServiceSummary>> = BTreeMap::new();
    for p in &products {
        by_category.entry(p.category_id).or_default().push(ServiceSummary::from(p));
    }
    Ok(categories
        .into_iter()
        .map(|c| CategoryWithServices {
            services: by_category.remove(&c.id).unwrap_or_default(),
            id: c.id,
            name: c.name,
        })
        .collect())
}
