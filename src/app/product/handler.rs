//! 产品处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use super::model::NewProduct;
use crate::{
    app::AppState,
    core::{
        document::{bson_to_json, DocumentView},
        error::CoreError,
        response::CreatedResponse,
    },
};

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentView>>, CoreError> {
    let products = state.product_service.list_products().await?;
    Ok(Json(products.into_iter().map(DocumentView::from).collect()))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentView>, CoreError> {
    let product = state.product_service.get_product(&id).await?;
    Ok(Json(product.into()))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), CoreError> {
    let Json(product) = payload.map_err(|e| CoreError::BadRequest(e.body_text()))?;
    let id = state.product_service.create_product(product).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(
            "Product created successfully",
            bson_to_json(id),
        )),
    ))
}
