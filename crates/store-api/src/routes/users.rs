//! 계정 관리 endpoint.
//!
//! 계정 생성/수정/삭제 엔드포인트를 제공합니다. 모든 엔드포인트는
//! 인증이 필요하며, 역할 변경과 계정 생성은 관리자 전용입니다.
//!
//! # 엔드포인트
//!
//! - `POST /api/v1/users` - 계정 생성 (Admin)
//! - `PUT /api/v1/users/username` - 사용자 이름 변경 (본인 또는 Admin)
//! - `PUT /api/v1/users/password` - 비밀번호 변경 (본인 또는 Admin)
//! - `PUT /api/v1/users/role` - 역할 변경 (Admin)
//! - `DELETE /api/v1/users` - 계정 삭제 (본인 또는 Admin)

use axum::{
    extract::State,
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::auth::{ensure_self_or_admin, hash_password, AdminAuth, JwtAuth};
use crate::error::{bad_request, conflict, db_error, db_unavailable, not_found, ApiResult};
use crate::repository::{is_unique_violation, UserRepository};
use crate::routes::auth::UserResponse;
use crate::state::AppState;

// ==================== 요청 타입 ====================

/// 계정 생성 요청 (관리자 전용, 역할 지정 가능).
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: String,
}

/// 사용자 이름 변경 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUsernameRequest {
    pub old_username: String,
    pub new_username: String,
}

/// 비밀번호 변경 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePasswordRequest {
    pub username: String,
    pub new_password: String,
}

/// 역할 변경 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoleRequest {
    pub username: String,
    pub role: String,
}

/// 계정 삭제 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteUserRequest {
    pub username: String,
}

// ==================== Handler ====================

/// 계정 생성 (관리자 전용).
///
/// POST /api/v1/users
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "생성 성공", body = UserResponse),
        (status = 400, description = "입력 값 오류"),
        (status = 403, description = "권한 부족"),
        (status = 409, description = "이미 사용 중인 사용자 이름")
    )
)]
pub async fn create_user(
    AdminAuth(_claims): AdminAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    if req.username.trim().is_empty() || req.password.trim().is_empty() {
        return Err(bad_request(
            "INVALID_INPUT",
            "사용자 이름과 비밀번호를 입력하세요",
        ));
    }

    let role = crate::auth::Role::parse(&req.role)
        .ok_or_else(|| bad_request("INVALID_ROLE", "알 수 없는 역할입니다"))?;

    let pool = state.db_pool.as_ref().ok_or_else(db_unavailable)?;

    let password_hash = hash_password(&req.password).map_err(|e| {
        warn!("비밀번호 해싱 실패: {}", e);
        bad_request("INVALID_INPUT", "사용할 수 없는 비밀번호입니다")
    })?;

    let record = UserRepository::create(pool, &req.username, &password_hash, role.as_str())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                conflict("USERNAME_TAKEN", "이미 사용 중인 사용자 이름입니다")
            } else {
                db_error(e)
            }
        })?;

    info!(username = %record.username, role = %record.role, "관리자가 계정 생성");

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: record.id,
            username: record.username,
            role: record.role,
        }),
    ))
}

/// 사용자 이름 변경 (본인 또는 관리자).
///
/// PUT /api/v1/users/username
#[utoipa::path(
    put,
    path = "/api/v1/users/username",
    tag = "users",
    request_body = UpdateUsernameRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "변경 성공", body = UserResponse),
        (status = 400, description = "입력 값 오류"),
        (status = 403, description = "본인 계정이 아님"),
        (status = 404, description = "계정 없음"),
        (status = 409, description = "이미 사용 중인 사용자 이름")
    )
)]
pub async fn update_username(
    JwtAuth(claims): JwtAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateUsernameRequest>,
) -> ApiResult<Json<UserResponse>> {
    if req.old_username.trim().is_empty() || req.new_username.trim().is_empty() {
        return Err(bad_request("INVALID_INPUT", "사용자 이름을 입력하세요"));
    }

    ensure_self_or_admin(&req.old_username, &claims)?;

    let pool = state.db_pool.as_ref().ok_or_else(db_unavailable)?;

    let record = UserRepository::update_username(pool, &req.old_username, &req.new_username)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                conflict("USERNAME_TAKEN", "이미 사용 중인 사용자 이름입니다")
            } else {
                db_error(e)
            }
        })?
        .ok_or_else(|| not_found("USER_NOT_FOUND", "계정을 찾을 수 없습니다"))?;

    info!(old = %req.old_username, new = %record.username, "사용자 이름 변경");

    Ok(Json(UserResponse {
        id: record.id,
        username: record.username,
        role: record.role,
    }))
}

/// 비밀번호 변경 (본인 또는 관리자).
///
/// PUT /api/v1/users/password
#[utoipa::path(
    put,
    path = "/api/v1/users/password",
    tag = "users",
    request_body = UpdatePasswordRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "변경 성공", body = UserResponse),
        (status = 400, description = "입력 값 오류"),
        (status = 403, description = "본인 계정이 아님"),
        (status = 404, description = "계정 없음")
    )
)]
pub async fn update_password(
    JwtAuth(claims): JwtAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdatePasswordRequest>,
) -> ApiResult<Json<UserResponse>> {
    if req.username.trim().is_empty() || req.new_password.trim().is_empty() {
        return Err(bad_request(
            "INVALID_INPUT",
            "사용자 이름과 새 비밀번호를 입력하세요",
        ));
    }

    ensure_self_or_admin(&req.username, &claims)?;

    let pool = state.db_pool.as_ref().ok_or_else(db_unavailable)?;

    let password_hash = hash_password(&req.new_password).map_err(|e| {
        warn!("비밀번호 해싱 실패: {}", e);
        bad_request("INVALID_INPUT", "사용할 수 없는 비밀번호입니다")
    })?;

    let record = UserRepository::update_password_hash(pool, &req.username, &password_hash)
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found("USER_NOT_FOUND", "계정을 찾을 수 없습니다"))?;

    info!(username = %record.username, "비밀번호 변경");

    Ok(Json(UserResponse {
        id: record.id,
        username: record.username,
        role: record.role,
    }))
}

/// 역할 변경 (관리자 전용).
///
/// PUT /api/v1/users/role
#[utoipa::path(
    put,
    path = "/api/v1/users/role",
    tag = "users",
    request_body = UpdateRoleRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "변경 성공", body = UserResponse),
        (status = 400, description = "알 수 없는 역할"),
        (status = 403, description = "권한 부족"),
        (status = 404, description = "계정 없음")
    )
)]
pub async fn update_role(
    AdminAuth(_claims): AdminAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateRoleRequest>,
) -> ApiResult<Json<UserResponse>> {
    if req.username.trim().is_empty() {
        return Err(bad_request("INVALID_INPUT", "사용자 이름을 입력하세요"));
    }

    let role = crate::auth::Role::parse(&req.role)
        .ok_or_else(|| bad_request("INVALID_ROLE", "알 수 없는 역할입니다"))?;

    let pool = state.db_pool.as_ref().ok_or_else(db_unavailable)?;

    let record = UserRepository::update_role(pool, &req.username, role.as_str())
        .await
        .map_err(db_error)?
        .ok_or_else(|| not_found("USER_NOT_FOUND", "계정을 찾을 수 없습니다"))?;

    info!(username = %record.username, role = %record.role, "역할 변경");

    Ok(Json(UserResponse {
        id: record.id,
        username: record.username,
        role: record.role,
    }))
}

/// 계정 삭제 (본인 또는 관리자).
///
/// DELETE /api/v1/users
#[utoipa::path(
    delete,
    path = "/api/v1/users",
    tag = "users",
    request_body = DeleteUserRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 403, description = "본인 계정이 아님"),
        (status = 404, description = "계정 없음")
    )
)]
pub async fn delete_user(
    JwtAuth(claims): JwtAuth,
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeleteUserRequest>,
) -> ApiResult<StatusCode> {
    if req.username.trim().is_empty() {
        return Err(bad_request("INVALID_INPUT", "사용자 이름을 입력하세요"));
    }

    ensure_self_or_admin(&req.username, &claims)?;

    let pool = state.db_pool.as_ref().ok_or_else(db_unavailable)?;

    let deleted = UserRepository::delete_by_username(pool, &req.username)
        .await
        .map_err(db_error)?;

    if !deleted {
        return Err(not_found("USER_NOT_FOUND", "계정을 찾을 수 없습니다"));
    }

    info!(username = %req.username, "계정 삭제");

    Ok(StatusCode::OK)
}

// ==================== 라우터 ====================

/// 계정 관리 라우터 생성.
pub fn users_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_user).delete(delete_user))
        .route("/username", put(update_username))
        .route("/password", put(update_password))
        .route("/role", put(update_role))
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
            .nest("/api/v1/users", users_router())
            .layer(Extension(auth.clone()))
            .with_state(state);
        (app, auth)
    }

    fn bearer_token(auth: &store_core::AuthConfig, username: &str, role: Role) -> String {
        let claims = Claims::new(1, username, role, auth);
        encode_token(&claims, auth).unwrap()
    }

    async fn send(
        app: Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> axum::response::Response {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_user_requires_token() {
        let (app, _) = test_app();
        let response = send(
            app,
            Method::POST,
            "/api/v1/users",
            None,
            serde_json::json!({"username": "bob", "password": "pw", "role": "User"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_user_rejects_non_admin() {
        let (app, auth) = test_app();
        let token = bearer_token(&auth, "alice", Role::User);

        let response = send(
            app,
            Method::POST,
            "/api/v1/users",
            Some(&token),
            serde_json::json!({"username": "bob", "password": "pw", "role": "User"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_create_user_rejects_unknown_role() {
        let (app, auth) = test_app();
        let token = bearer_token(&auth, "admin", Role::Admin);

        let response = send(
            app,
            Method::POST,
            "/api/v1/users",
            Some(&token),
            serde_json::json!({"username": "bob", "password": "pw", "role": "Manager"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_username_rejects_other_user() {
        let (app, auth) = test_app();
        let token = bearer_token(&auth, "alice", Role::User);

        let response = send(
            app,
            Method::PUT,
            "/api/v1/users/username",
            Some(&token),
            serde_json::json!({"old_username": "bob", "new_username": "robert"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_delete_user_rejects_other_user() {
        let (app, auth) = test_app();
        let token = bearer_token(&auth, "alice", Role::User);

        let response = send(
            app,
            Method::DELETE,
            "/api/v1/users",
            Some(&token),
            serde_json::json!({"username": "bob"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
