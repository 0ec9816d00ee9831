use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::info;

use crate::{errors::JsonApiError, routes::auth::ServerState};
use service::advertisements::{self, AdvertisementView};
use service::catalog::{self, CategoryView, CategoryWithServices, ProductView};

pub async fn list_categories(State(state): State<ServerState>) -> Result<Json<Vec<CategoryView>>, JsonApiError> {
    Ok(Json(catalog::list_categories(&state.db).await?))
}

/// `GET /services?CategoryID=&Name=`
pub async fn list_products(
    State(state): State<ServerState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<ProductView>>, JsonApiError> {
    let filter = catalog::parse_product_filter(&params)?;
    let list = catalog::list_products(&state.db, &filter).await?;
    info!(count = list.len(), category_id = ?filter.category_id, "list products");
    Ok(Json(list))
}

pub async fn list_all(State(state): State<ServerState>) -> Result<Json<Vec<CategoryWithServices>>, JsonApiError> {
    Ok(Json(catalog::list_categories_with_services(&state.db).await?))
}

pub async fn list_advertisements(State(state): State<ServerState>) -> Result<Json<Vec<AdvertisementView>>, JsonApiError> {
    Ok(Json(advertisements::list_advertisements(&state.db).await?))
}
