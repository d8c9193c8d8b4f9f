//! Grocery list endpoints.
//!
//! The item listing includes the estimated cost of what is still to buy;
//! lookup tables (grocery categories, supermarkets) have their own routes
//! and are joined by the client.

use crate::{
    api::{AppState, extract::CurrentUser},
    core::grocery::{self, GroceryItemInput},
    entities::{grocery_category, grocery_item, supermarket},
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub struct NameRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub product_name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub estimated_price_per_unit: Option<f64>,
    pub grocery_category_id: Option<i64>,
    pub supermarket_id: Option<i64>,
}

/// The whole list plus its footer number.
#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub items: Vec<grocery_item::Model>,
    pub estimated_total: f64,
}

fn missing(name: &str) -> Error {
    Error::Validation {
        message: format!("{name} is required"),
    }
}

fn item_input(body: ItemRequest) -> Result<GroceryItemInput> {
    Ok(GroceryItemInput {
        product_name: body.product_name.ok_or_else(|| missing("product_name"))?,
        quantity: body.quantity.ok_or_else(|| missing("quantity"))?,
        unit: body.unit,
        estimated_price_per_unit: body.estimated_price_per_unit,
        grocery_category_id: body.grocery_category_id,
        supermarket_id: body.supermarket_id,
    })
}

/// `GET /api/grocery/categories`
pub async fn list_categories(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<grocery_category::Model>>> {
    Ok(Json(
        grocery::list_grocery_categories(&state.db, user.profile.id).await?,
    ))
}

/// `POST /api/grocery/categories`
pub async fn create_category(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<NameRequest>,
) -> Result<Json<grocery_category::Model>> {
    let name = body.name.ok_or_else(|| missing("name"))?;
    Ok(Json(
        grocery::create_grocery_category(&state.db, user.profile.id, &name).await?,
    ))
}

/// `DELETE /api/grocery/categories/{id}`
pub async fn delete_category(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    grocery::delete_grocery_category(&state.db, user.profile.id, id).await?;
    Ok(Json(json!({ "message": "grocery category deleted" })))
}

/// `GET /api/grocery/supermarkets`
pub async fn list_supermarkets(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<supermarket::Model>>> {
    Ok(Json(
        grocery::list_supermarkets(&state.db, user.profile.id).await?,
    ))
}

/// `POST /api/grocery/supermarkets`
pub async fn create_supermarket(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<NameRequest>,
) -> Result<Json<supermarket::Model>> {
    let name = body.name.ok_or_else(|| missing("name"))?;
    Ok(Json(
        grocery::create_supermarket(&state.db, user.profile.id, &name).await?,
    ))
}

/// `DELETE /api/grocery/supermarkets/{id}`
pub async fn delete_supermarket(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    grocery::delete_supermarket(&state.db, user.profile.id, id).await?;
    Ok(Json(json!({ "message": "supermarket deleted" })))
}

/// `GET /api/grocery/items`
pub async fn list_items(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ItemListResponse>> {
    let items = grocery::list_items(&state.db, user.profile.id).await?;
    let estimated_total = grocery::estimated_total(&items);
    Ok(Json(ItemListResponse {
        items,
        estimated_total,
    }))
}

/// `GET /api/grocery/estimated-total` - just the footer number.
pub async fn estimated_total(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Value>> {
    let items = grocery::list_items(&state.db, user.profile.id).await?;
    Ok(Json(
        json!({ "estimated_total": grocery::estimated_total(&items) }),
    ))
}

/// `POST /api/grocery/items`
pub async fn create_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<ItemRequest>,
) -> Result<Json<grocery_item::Model>> {
    let input = item_input(body)?;
    Ok(Json(
        grocery::create_item(&state.db, user.profile.id, input).await?,
    ))
}

/// `PUT /api/grocery/items/{id}`
pub async fn update_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(body): Json<ItemRequest>,
) -> Result<Json<grocery_item::Model>> {
    let input = item_input(body)?;
    Ok(Json(
        grocery::update_item(&state.db, user.profile.id, id, input).await?,
    ))
}

/// `POST /api/grocery/items/{id}/toggle`
pub async fn toggle_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<grocery_item::Model>> {
    Ok(Json(
        grocery::toggle_purchased(&state.db, user.profile.id, id).await?,
    ))
}

/// `DELETE /api/grocery/items/{id}`
pub async fn delete_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    grocery::delete_item(&state.db, user.profile.id, id).await?;
    Ok(Json(json!({ "message": "grocery item deleted" })))
}
