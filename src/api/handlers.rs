//! API request handlers
//!
//! Handlers for all REST API endpoints. Catalog reads share the read lock;
//! cart mutations and catalog swaps take the write lock.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::cart::CartLine;
use crate::core::view::{CatalogCounts, CategoryGroup, SortMode, ViewQuery};
use crate::error::CatalogError;
use crate::loader;
use crate::types::Product;

use super::server::AppState;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// HTTP status reported for a failed operation
pub fn error_status(error: &CatalogError) -> StatusCode {
    match error {
        CatalogError::UnknownProduct(_) => StatusCode::NOT_FOUND,
        CatalogError::Config(_) => StatusCode::BAD_REQUEST,
        CatalogError::Fetch { .. } | CatalogError::HttpStatus { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: CatalogError) -> Response {
    let status = error_status(&error);
    (status, Json(ApiResponse::<()>::err(error.to_string()))).into_response()
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub products: usize,
}

/// GET /health - Health check
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let app = state.app.read().await;
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        products: app.catalog().len(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub source: String,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let app = state.app.read().await;
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        source: app.config().source.clone(),
    }))
}

/// GET /api/v1/catalog - Full normalized catalog
pub async fn catalog(State(state): State<Arc<AppState>>) -> Response {
    let app = state.app.read().await;
    Json(ApiResponse::ok(app.catalog())).into_response()
}

/// Product listing parameters
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductsParams {
    pub q: String,
    pub category: String,
    pub sort: String,
    pub grouped: bool,
}

/// Product listing response; either flat products or category groups
#[derive(Serialize)]
pub struct ProductsResponse<'a> {
    pub counts: CatalogCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<&'a Product>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<CategoryGroup<'a>>>,
}

/// GET /api/v1/products - Filter, sort and optionally group
pub async fn products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProductsParams>,
) -> Response {
    let sort: SortMode = match params.sort.parse() {
        Ok(sort) => sort,
        Err(message) => return error_response(CatalogError::Config(message)),
    };
    let query = ViewQuery::new(params.q, params.category, sort);

    let app = state.app.read().await;
    let items = app.view(&query);
    let counts = app.counts(items.len());
    let response = if params.grouped {
        ProductsResponse {
            counts,
            products: None,
            groups: Some(app.grouped_view(&query)),
        }
    } else {
        ProductsResponse {
            counts,
            products: Some(items),
            groups: None,
        }
    };
    Json(ApiResponse::ok(response)).into_response()
}

/// One resolved cart line
#[derive(Serialize)]
pub struct CartLineView<'a> {
    pub product: &'a Product,
    pub quantity: u32,
    pub subtotal: Option<f64>,
}

impl<'a> From<&CartLine<'a>> for CartLineView<'a> {
    fn from(line: &CartLine<'a>) -> Self {
        Self {
            product: line.product,
            quantity: line.quantity,
            subtotal: line.subtotal(),
        }
    }
}

/// Cart contents response
#[derive(Serialize)]
pub struct CartResponse<'a> {
    pub lines: Vec<CartLineView<'a>>,
    /// Units stored, including ids missing from the catalog
    pub count: u64,
    pub total: f64,
    pub total_text: String,
}

/// GET /api/v1/cart - Cart lines and total
pub async fn cart(State(state): State<Arc<AppState>>) -> Response {
    let app = state.app.read().await;
    let lines = app.cart_lines();
    Json(ApiResponse::ok(CartResponse {
        lines: lines.iter().map(CartLineView::from).collect(),
        count: app.cart().count(),
        total: app.cart_total(),
        total_text: app.cart_total_text(),
    }))
    .into_response()
}

/// Cart mutation request
#[derive(Debug, Deserialize)]
pub struct CartRequest {
    pub id: String,
}

/// Cart mutation response
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CartUpdateResponse {
    pub id: String,
    pub quantity: u32,
    pub count: u64,
}

#[derive(Debug, Clone, Copy)]
enum CartOp {
    Add,
    Increment,
    Decrement,
    Remove,
}

async fn update_cart(state: &AppState, op: CartOp, id: String) -> Response {
    let mut app = state.app.write().await;
    let result = match op {
        CartOp::Add => app.add_to_cart(&id),
        CartOp::Increment => app.increment(&id),
        CartOp::Decrement => app.decrement(&id),
        CartOp::Remove => app.remove(&id),
    };
    match result {
        Ok(quantity) => Json(ApiResponse::ok(CartUpdateResponse {
            id,
            quantity,
            count: app.cart().count(),
        }))
        .into_response(),
        Err(e) => {
            warn!(id = %id, error = %e, "cart update failed");
            error_response(e)
        }
    }
}

/// POST /api/v1/cart/add - Add one unit of a catalog product
pub async fn cart_add(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CartRequest>,
) -> Response {
    update_cart(&state, CartOp::Add, req.id).await
}

/// POST /api/v1/cart/increment
pub async fn cart_increment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CartRequest>,
) -> Response {
    update_cart(&state, CartOp::Increment, req.id).await
}

/// POST /api/v1/cart/decrement
pub async fn cart_decrement(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CartRequest>,
) -> Response {
    update_cart(&state, CartOp::Decrement, req.id).await
}

/// POST /api/v1/cart/remove
pub async fn cart_remove(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CartRequest>,
) -> Response {
    update_cart(&state, CartOp::Remove, req.id).await
}

/// Order response
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct OrderResponse {
    pub message: String,
    pub link: String,
    pub total_text: String,
}

/// GET /api/v1/order - Order message and WhatsApp link
pub async fn order(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let app = state.app.read().await;
    Json(ApiResponse::ok(OrderResponse {
        message: app.order_message(),
        link: app.order_link(),
        total_text: app.cart_total_text(),
    }))
}

/// Reload response
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ReloadResponse {
    pub products: usize,
    pub categories: usize,
}

/// POST /api/v1/reload - Fetch the workbook again and swap the catalog
///
/// The fetch runs without holding the lock; a failed reload keeps the
/// current catalog.
pub async fn reload(State(state): State<Arc<AppState>>) -> Response {
    let config = state.app.read().await.config().clone();
    match loader::load_catalog(&config).await {
        Ok(catalog) => {
            let response = ReloadResponse {
                products: catalog.len(),
                categories: catalog.categories.len(),
            };
            state.app.write().await.replace_catalog(catalog);
            info!(products = response.products, "catalog reloaded");
            Json(ApiResponse::ok(response)).into_response()
        }
        Err(e) => {
            warn!(error = %e, "reload failed, keeping current catalog");
            error_response(e)
        }
    }
}
