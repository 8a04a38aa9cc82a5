//! 카테고리 관리 endpoint.
//!
//! 카테고리 생성/수정/삭제 엔드포인트를 제공합니다.
//! 모든 변경 작업은 관리자 전용입니다.
//!
//! # 엔드포인트
//!
//! - `POST /api/v1/categories` - 카테고리 생성
//! - `PUT /api/v1/categories/name` - 이름 변경
//! - `PUT /api/v1/categories/description` - 설명 변경
//! - `DELETE /api/v1/categories/{id}` - 삭제 (소속 상품 포함)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

use crate::auth::AdminAuth;
use crate::error::{bad_request, conflict, db_error, db_unavailable, not_found, ApiResult};
use crate::repository::{is_unique_violation, CategoryRecord, CategoryRepository};
use crate::state::AppState;

// ==================== 요청 타입 ====================

/// 카테고리 생성 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub parent_category_id: Option<i32>,
}

/// 카테고리 이름 변경 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCategoryNameRequest {
    pub current_name: String,
    pub new_name: String,
}

/// 카테고리 설명 변경 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCategoryDescriptionRequest {
    pub name: String,
    pub description: String,
}

// ==================== Handler ====================

/// 카테고리 생성 (관리자 전용).
///
/// POST /api/v1/categories
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = "categories",
    request_body = CreateCategoryRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "생성 성공", body = CategoryRecord),
        (status = 400, description = "입력 값 오류"),
        (status = 403, description = "권한 부족"),
        (status = 409, description = "이미 존재하는 카테고리 이름")
    )
)]
pub async fn create_category(
    AdminAuth(_claims): AdminAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<CategoryRecord>)> {
    if req.name.trim().is_empty() || req.description.trim().is_empty() {
        return Err(bad_request(
            "INVALID_INPUT",
            "카테고리 이름과 설명을 입력하세요",
        ));
    }

    let pool = state.db_pool.as_ref().ok_or_else(db_unavailable)?;

    if CategoryRepository::find_by_name(pool, &req.name)
        .await
        .map_err(db_error)?
        .is_some()
    {
        return Err(conflict(
            "CATEGORY_EXISTS",
            "이미 존재하는 카테고리 이름입니다",
        ));
    }

    let record =
        CategoryRepository::create(pool, &req.name, &req.description, req.parent_category_id)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    conflict("CATEGORY_EXISTS", "이미 존재하는 카테고리 이름입니다")
                } else {
                    db_error(e)
                }
            })?;

    info!(name = %record.name, "카테고리 생성");

    Ok((StatusCode::CREATED, Json(record)))
}

/// 카테고리 이름 변경 (관리자 전용).
///
/// PUT /api/v1/categories/name
#[utoipa::path(
    put,
    path = "/api/v1/categories/name",
    tag = "categories",
    request_body = UpdateCategoryNameRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "변경 성공", body = CategoryRecord),
        (status = 400, description = "입력 값 오류"),
        (status = 403, description = "권한 부족"),
        (status = 404, description = "카테고리 없음"),
        (status = 409, description = "이미 존재하는 카테고리 이름")
    )
)]
pub async fn update_category_name(
    AdminAuth(_claims): AdminAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateCategoryNameRequest>,
) -> ApiResult<Json<CategoryRecord>> {
    if req.current_name.trim().is_empty() || req.new_name.trim().is_empty() {
        return Err(bad_request("INVALID_INPUT", "카테고리 이름을 입력하세요"));
    }

    let pool = state.db_pool.as_ref().ok_or_else(db_unavailable)?;

    let record = CategoryRepository::update_name(pool, &req.current_name, &req.new_name)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                conflict("CATEGORY_EXISTS", "이미 존재하는 카테고리 이름입니다")
            } else {
                db_error(e)
            }
        })?
        .ok_or_else(|| not_found("CATEGORY_NOT_FOUND", "카테고리를 찾을 수 없습니다"))?;

    info!(old = %req.current_name, new = %record.name, "카테고리 이름 변경");

    Ok(Json(record))
}

/// 카테고리 설명 변경 (관리자 전용).
///
/// PUT /api/v1/categories/description
#[utoipa::path(
    put,
    path = "/api/v1/categories/description",
    tag = "categories",
    request_body = UpdateCategoryDescriptionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "변경 성공", body = CategoryRecord),
        (status = 400, description = "입력 값 오류"),
        (status = 403, description = "권한 부족"),
        (status = 404, description = "카테고리 없음")
    )
)]
pub async fn update_category_description(
    AdminAuth(_claims): AdminAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateCategoryDescriptionRequest>,
) -> ApiResult<Json<CategoryRecord>> {
    if req.name.trim().is_empty() || req.description.trim().is_empty() {
        return Err(bad_request(
            "INVALID_INPUT",
            "카테고리 이름과 설명을 입력하세요",
        ));
    }

    let pool = state.db_pool.as_ref().ok_or_else(db_unavailable)?;

    let record = CategoryRepository::update_description(pool, &req.name, &req.description)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found("CATEGORY_NOT_FOUND", "카테고리를 찾을 수 없습니다"))?;

    info!(name = %record.name, "카테고리 설명 변경");

    Ok(Json(record))
}

/// 카테고리 삭제 (관리자 전용).
///
/// DELETE /api/v1/categories/{id}
///
/// 소속 상품도 함께 삭제됩니다.
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    tag = "categories",
    params(
        ("id" = i32, Path, description = "카테고리 ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 403, description = "권한 부족"),
        (status = 404, description = "카테고리 없음")
    )
)]
pub async fn delete_category(
    AdminAuth(_claims): AdminAuth,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    let pool = state.db_pool.as_ref().ok_or_else(db_unavailable)?;

    let deleted = CategoryRepository::delete_by_id(pool, id)
        .await
        .map_err(db_error)?;

    if !deleted {
        return Err(not_found("CATEGORY_NOT_FOUND", "카테고리를 찾을 수 없습니다"));
    }

    info!(id, "카테고리 삭제");

    Ok(StatusCode::OK)
}

// ==================== 라우터 ====================

/// 카테고리 라우터 생성.
pub fn categories_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_category))
        .route("/name", put(update_category_name))
        .route("/description", put(update_category_description))
        .route("/{id}", delete(delete_category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Extension,
    };
    use tower::ServiceExt;

    use crate::auth::{encode_token, Claims, Role};
    use crate::state::create_test_state;

    fn test_app() -> (Router, store_core::AuthConfig) {
        let state = Arc::new(create_test_state());
        let auth = state.auth.clone();
        let app = Router::new()
            .nest("/api/v1/categories", categories_router())
            .layer(Extension(auth.clone()))
            .with_state(state);
        (app, auth)
    }

    #[tokio::test]
    async fn test_create_category_requires_token() {
        let (app, _) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/v1/categories")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::json!({"name": "Drinks", "description": "Beverages"})
                            .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_category_rejects_user_role() {
        let (app, auth) = test_app();
        let claims = Claims::new(1, "alice", Role::User, &auth);
        let token = encode_token(&claims, &auth).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/v1/categories")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::from(
                        serde_json::json!({"name": "Drinks", "description": "Beverages"})
                            .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_create_category_rejects_blank_name() {
        let (app, auth) = test_app();
        let claims = Claims::new(1, "admin", Role::Admin, &auth);
        let token = encode_token(&claims, &auth).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/v1/categories")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::from(
                        serde_json::json!({"name": " ", "description": "Beverages"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
