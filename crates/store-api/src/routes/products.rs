//! 상품 관리 endpoint.
//!
//! 상품 생성/수정/삭제 엔드포인트를 제공합니다.
//! 모든 변경 작업은 관리자 전용이며, 상품은 카테고리 이름 + 상품
//! 이름으로 지정합니다 (대소문자 무시).
//!
//! # 엔드포인트
//!
//! - `POST /api/v1/products` - 상품 생성
//! - `PUT /api/v1/products/name` - 이름 변경
//! - `PUT /api/v1/products/price` - 가격 변경
//! - `PUT /api/v1/products/description` - 설명 변경
//! - `PUT /api/v1/products/category` - 카테고리 이동
//! - `DELETE /api/v1/products` - 삭제

use axum::{
    extract::State,
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

use crate::auth::AdminAuth;
use crate::error::{
    bad_request, conflict, db_error, db_unavailable, not_found, ApiErrorResponse, ApiResult,
};
use crate::repository::{is_unique_violation, CategoryRepository, ProductRecord, ProductRepository};
use crate::state::AppState;

/// 빈 설명에 적용되는 기본값.
const DEFAULT_DESCRIPTION: &str = "No description";

// ==================== 요청 타입 ====================

/// 상품 생성 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub category_name: String,
    pub product_name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

/// 상품 이름 변경 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductNameRequest {
    pub category_name: String,
    pub current_name: String,
    pub new_name: String,
}

/// 상품 가격 변경 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductPriceRequest {
    pub category_name: String,
    pub product_name: String,
    pub new_price: Decimal,
}

/// 상품 설명 변경 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductDescriptionRequest {
    pub category_name: String,
    pub product_name: String,
    pub description: String,
}

/// 상품 카테고리 이동 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MoveProductRequest {
    pub current_category_name: String,
    pub product_name: String,
    pub new_category_name: String,
}

/// 상품 삭제 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteProductRequest {
    pub category_name: String,
    pub product_name: String,
}

// ==================== 헬퍼 ====================

/// 카테고리 이름으로 ID 조회, 없으면 404.
async fn resolve_category(
    pool: &PgPool,
    name: &str,
) -> Result<i32, (StatusCode, Json<ApiErrorResponse>)> {
    let category = CategoryRepository::find_by_name(pool, name)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found("CATEGORY_NOT_FOUND", "카테고리를 찾을 수 없습니다"))?;

    Ok(category.id)
}

// ==================== Handler ====================

/// 상품 생성 (관리자 전용).
///
/// POST /api/v1/products
///
/// 설명이 비어 있으면 "No description"으로 대체됩니다.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    tag = "products",
    request_body = CreateProductRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "생성 성공", body = ProductRecord),
        (status = 400, description = "입력 값 오류"),
        (status = 403, description = "권한 부족"),
        (status = 404, description = "카테고리 없음"),
        (status = 409, description = "카테고리 내 중복 상품 이름")
    )
)]
pub async fn create_product(
    AdminAuth(_claims): AdminAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<ProductRecord>)> {
    if req.category_name.trim().is_empty() || req.product_name.trim().is_empty() {
        return Err(bad_request(
            "INVALID_INPUT",
            "카테고리 이름과 상품 이름을 입력하세요",
        ));
    }

    if req.price < Decimal::ZERO {
        return Err(bad_request("INVALID_PRICE", "가격은 0 이상이어야 합니다"));
    }

    let pool = state.db_pool.as_ref().ok_or_else(db_unavailable)?;

    let category_id = resolve_category(pool, &req.category_name).await?;

    if ProductRepository::find_in_category(pool, category_id, &req.product_name)
        .await
        .map_err(db_error)?
        .is_some()
    {
        return Err(conflict(
            "PRODUCT_EXISTS",
            "카테고리에 이미 존재하는 상품 이름입니다",
        ));
    }

    let description = match req.description.as_deref() {
        Some(d) if !d.trim().is_empty() => d,
        _ => DEFAULT_DESCRIPTION,
    };

    let record = ProductRepository::create(
        pool,
        &req.product_name,
        req.price,
        description,
        category_id,
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            conflict("PRODUCT_EXISTS", "카테고리에 이미 존재하는 상품 이름입니다")
        } else {
            db_error(e)
        }
    })?;

    info!(name = %record.name, category_id, "상품 생성");

    Ok((StatusCode::CREATED, Json(record)))
}

/// 상품 이름 변경 (관리자 전용).
///
/// PUT /api/v1/products/name
#[utoipa::path(
    put,
    path = "/api/v1/products/name",
    tag = "products",
    request_body = UpdateProductNameRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "변경 성공", body = ProductRecord),
        (status = 400, description = "입력 값 오류"),
        (status = 403, description = "권한 부족"),
        (status = 404, description = "카테고리 또는 상품 없음"),
        (status = 409, description = "카테고리 내 중복 상품 이름")
    )
)]
pub async fn update_product_name(
    AdminAuth(_claims): AdminAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateProductNameRequest>,
) -> ApiResult<Json<ProductRecord>> {
    if req.current_name.trim().is_empty() || req.new_name.trim().is_empty() {
        return Err(bad_request("INVALID_INPUT", "상품 이름을 입력하세요"));
    }

    let pool = state.db_pool.as_ref().ok_or_else(db_unavailable)?;

    let category_id = resolve_category(pool, &req.category_name).await?;

    if ProductRepository::find_in_category(pool, category_id, &req.new_name)
        .await
        .map_err(db_error)?
        .is_some()
    {
        return Err(conflict(
            "PRODUCT_EXISTS",
            "카테고리에 이미 존재하는 상품 이름입니다",
        ));
    }

    let record = ProductRepository::update_name(pool, category_id, &req.current_name, &req.new_name)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                conflict("PRODUCT_EXISTS", "카테고리에 이미 존재하는 상품 이름입니다")
            } else {
                db_error(e)
            }
        })?
        .ok_or_else(|| not_found("PRODUCT_NOT_FOUND", "상품을 찾을 수 없습니다"))?;

    info!(old = %req.current_name, new = %record.name, "상품 이름 변경");

    Ok(Json(record))
}

/// 상품 가격 변경 (관리자 전용).
///
/// PUT /api/v1/products/price
#[utoipa::path(
    put,
    path = "/api/v1/products/price",
    tag = "products",
    request_body = UpdateProductPriceRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "변경 성공", body = ProductRecord),
        (status = 400, description = "입력 값 오류"),
        (status = 403, description = "권한 부족"),
        (status = 404, description = "카테고리 또는 상품 없음")
    )
)]
pub async fn update_product_price(
    AdminAuth(_claims): AdminAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateProductPriceRequest>,
) -> ApiResult<Json<ProductRecord>> {
    if req.new_price < Decimal::ZERO {
        return Err(bad_request("INVALID_PRICE", "가격은 0 이상이어야 합니다"));
    }

    let pool = state.db_pool.as_ref().ok_or_else(db_unavailable)?;

    let category_id = resolve_category(pool, &req.category_name).await?;

    let record =
        ProductRepository::update_price(pool, category_id, &req.product_name, req.new_price)
            .await
            .map_err(db_error)?
            .ok_or_else(|| not_found("PRODUCT_NOT_FOUND", "상품을 찾을 수 없습니다"))?;

    info!(name = %record.name, price = %record.price, "상품 가격 변경");

    Ok(Json(record))
}

/// 상품 설명 변경 (관리자 전용).
///
/// PUT /api/v1/products/description
///
/// 빈 설명은 "No description"으로 대체됩니다.
#[utoipa::path(
    put,
    path = "/api/v1/products/description",
    tag = "products",
    request_body = UpdateProductDescriptionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "변경 성공", body = ProductRecord),
        (status = 403, description = "권한 부족"),
        (status = 404, description = "카테고리 또는 상품 없음")
    )
)]
pub async fn update_product_description(
    AdminAuth(_claims): AdminAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateProductDescriptionRequest>,
) -> ApiResult<Json<ProductRecord>> {
    let pool = state.db_pool.as_ref().ok_or_else(db_unavailable)?;

    let category_id = resolve_category(pool, &req.category_name).await?;

    let description = if req.description.trim().is_empty() {
        DEFAULT_DESCRIPTION
    } else {
        req.description.as_str()
    };

    let record =
        ProductRepository::update_description(pool, category_id, &req.product_name, description)
            .await
            .map_err(db_error)?
            .ok_or_else(|| not_found("PRODUCT_NOT_FOUND", "상품을 찾을 수 없습니다"))?;

    info!(name = %record.name, "상품 설명 변경");

    Ok(Json(record))
}

/// 상품 카테고리 이동 (관리자 전용).
///
/// PUT /api/v1/products/category
#[utoipa::path(
    put,
    path = "/api/v1/products/category",
    tag = "products",
    request_body = MoveProductRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "이동 성공", body = ProductRecord),
        (status = 403, description = "권한 부족"),
        (status = 404, description = "카테고리 또는 상품 없음"),
        (status = 409, description = "대상 카테고리에 같은 이름의 상품 존재")
    )
)]
pub async fn move_product(
    AdminAuth(_claims): AdminAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<MoveProductRequest>,
) -> ApiResult<Json<ProductRecord>> {
    let pool = state.db_pool.as_ref().ok_or_else(db_unavailable)?;

    let current_category_id = resolve_category(pool, &req.current_category_name).await?;
    let new_category_id = resolve_category(pool, &req.new_category_name).await?;

    if ProductRepository::find_in_category(pool, new_category_id, &req.product_name)
        .await
        .map_err(db_error)?
        .is_some()
    {
        return Err(conflict(
            "PRODUCT_EXISTS",
            "대상 카테고리에 이미 같은 이름의 상품이 있습니다",
        ));
    }

    let record = ProductRepository::update_category(
        pool,
        current_category_id,
        &req.product_name,
        new_category_id,
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            conflict("PRODUCT_EXISTS", "대상 카테고리에 이미 같은 이름의 상품이 있습니다")
        } else {
            db_error(e)
        }
    })?
    .ok_or_else(|| not_found("PRODUCT_NOT_FOUND", "상품을 찾을 수 없습니다"))?;

    info!(
        name = %record.name,
        from = %req.current_category_name,
        to = %req.new_category_name,
        "상품 카테고리 이동"
    );

    Ok(Json(record))
}

/// 상품 삭제 (관리자 전용).
///
/// DELETE /api/v1/products
#[utoipa::path(
    delete,
    path = "/api/v1/products",
    tag = "products",
    request_body = DeleteProductRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 403, description = "권한 부족"),
        (status = 404, description = "카테고리 또는 상품 없음")
    )
)]
pub async fn delete_product(
    AdminAuth(_claims): AdminAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeleteProductRequest>,
) -> ApiResult<StatusCode> {
    let pool = state.db_pool.as_ref().ok_or_else(db_unavailable)?;

    let category_id = resolve_category(pool, &req.category_name).await?;

    let deleted = ProductRepository::delete_in_category(pool, category_id, &req.product_name)
        .await
        .map_err(db_error)?;

    if !deleted {
        return Err(not_found("PRODUCT_NOT_FOUND", "상품을 찾을 수 없습니다"));
    }

    info!(name = %req.product_name, category = %req.category_name, "상품 삭제");

    Ok(StatusCode::OK)
}

// ==================== 라우터 ====================

/// 상품 라우터 생성.
pub fn products_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_product).delete(delete_product))
        .route("/name", put(update_product_name))
        .route("/price", put(update_product_price))
        .route("/description", put(update_product_description))
        .route("/category", put(move_product))
}
