//! 인증 endpoint.
//!
//! 회원 가입 및 로그인 엔드포인트를 제공합니다.
//!
//! # 엔드포인트
//!
//! - `POST /api/v1/auth/register` - 회원 가입
//! - `POST /api/v1/auth/login` - 로그인 (JWT 발급)

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::auth::{encode_token, hash_password, verify_password, Claims, Role};
use crate::error::{bad_request, conflict, db_error, db_unavailable, unauthorized, ApiResult};
use crate::repository::{is_unique_violation, UserRepository};
use crate::state::AppState;

// ==================== 요청/응답 타입 ====================

/// 회원 가입 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// 계정 응답 (비밀번호 해시 제외).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub role: String,
}

/// 로그인 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 로그인 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// 발급된 JWT
    pub token: String,
    /// 토큰 타입 (항상 "Bearer")
    pub token_type: String,
    /// 토큰 유효 기간 (초)
    pub expires_in: i64,
}

// ==================== Handler ====================

/// 회원 가입.
///
/// POST /api/v1/auth/register
///
/// 새 계정은 항상 User 역할로 생성됩니다. 사용자 이름 중복은
/// `LOWER(username)` UNIQUE 인덱스가 최종적으로 거부하므로
/// 동시 가입 경합에서도 정확히 하나만 성공합니다.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "가입 성공", body = UserResponse),
        (status = 400, description = "입력 값 오류"),
        (status = 409, description = "이미 사용 중인 사용자 이름")
    )
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    if req.username.trim().is_empty() || req.password.trim().is_empty() {
        return Err(bad_request(
            "INVALID_INPUT",
            "사용자 이름과 비밀번호를 입력하세요",
        ));
    }

    let pool = state.db_pool.as_ref().ok_or_else(db_unavailable)?;

    let password_hash = hash_password(&req.password).map_err(|e| {
        warn!("비밀번호 해싱 실패: {}", e);
        bad_request("INVALID_INPUT", "사용할 수 없는 비밀번호입니다")
    })?;

    let record = UserRepository::create(pool, &req.username, &password_hash, Role::User.as_str())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                conflict("USERNAME_TAKEN", "이미 사용 중인 사용자 이름입니다")
            } else {
                db_error(e)
            }
        })?;

    info!(username = %record.username, "새 계정 등록");

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: record.id,
            username: record.username,
            role: record.role,
        }),
    ))
}

/// 로그인.
///
/// POST /api/v1/auth/login
///
/// 알 수 없는 사용자와 잘못된 비밀번호는 동일한 401로 응답하여
/// 계정 존재 여부를 노출하지 않습니다.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = LoginResponse),
        (status = 400, description = "입력 값 오류"),
        (status = 401, description = "인증 실패")
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if req.username.trim().is_empty() || req.password.trim().is_empty() {
        return Err(bad_request(
            "INVALID_INPUT",
            "사용자 이름과 비밀번호를 입력하세요",
        ));
    }

    let pool = state.db_pool.as_ref().ok_or_else(db_unavailable)?;

    let invalid_credentials =
        || unauthorized("INVALID_CREDENTIALS", "사용자 이름 또는 비밀번호가 올바르지 않습니다");

    let record = UserRepository::find_by_username(pool, &req.username)
        .await
        .map_err(db_error)?
        .ok_or_else(invalid_credentials)?;

    verify_password(&req.password, &record.password_hash).map_err(|_| invalid_credentials())?;

    let role = Role::parse(&record.role).ok_or_else(|| {
        warn!(username = %record.username, role = %record.role, "알 수 없는 역할 값");
        invalid_credentials()
    })?;

    let claims = Claims::new(record.id, record.username.clone(), role, &state.auth);
    let token = encode_token(&claims, &state.auth).map_err(|e| {
        warn!("토큰 발급 실패: {}", e);
        unauthorized("TOKEN_ISSUE_FAILED", "토큰 발급에 실패했습니다")
    })?;

    info!(username = %record.username, "로그인 성공");

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.auth.duration_minutes * 60,
    }))
}

// ==================== 라우터 ====================

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
