//! Axum용 JWT 인증 미들웨어.
//!
//! Axum 핸들러에서 사용할 JWT 인증 추출기 및 권한 검사 함수.
//!
//! 검증 키는 라우터에 [`Extension`]으로 주입된 [`AuthConfig`]에서 가져오며,
//! 설정이 없으면 요청을 거부합니다 (fail closed).
//!
//! [`Extension`]: axum::Extension

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use store_core::AuthConfig;

use crate::error::ApiErrorResponse;

use super::{decode_token, Claims, JwtError, Role};

/// JWT 인증 추출기.
///
/// Axum 핸들러에서 인증된 사용자 정보를 추출합니다.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn protected_handler(
///     JwtAuth(claims): JwtAuth,
/// ) -> impl IntoResponse {
///     format!("Authenticated user: {}", claims.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JwtAuth(pub Claims);

/// JWT 인증/인가 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtAuthError {
    #[error("인증 토큰이 필요합니다")]
    MissingToken,
    #[error("잘못된 Authorization 헤더 형식")]
    InvalidAuthHeader,
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("유효하지 않은 토큰")]
    InvalidToken,
    #[error("권한이 부족합니다")]
    InsufficientRole,
    #[error("본인 계정이 아닙니다")]
    NotResourceOwner,
    #[error("인증 설정이 초기화되지 않았습니다")]
    NotConfigured,
}

impl JwtAuthError {
    /// HTTP 상태와 에러 코드 매핑.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            JwtAuthError::MissingToken => (StatusCode::UNAUTHORIZED, "MISSING_TOKEN"),
            JwtAuthError::InvalidAuthHeader => (StatusCode::UNAUTHORIZED, "INVALID_AUTH_HEADER"),
            JwtAuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
            JwtAuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            JwtAuthError::InsufficientRole => (StatusCode::FORBIDDEN, "INSUFFICIENT_ROLE"),
            JwtAuthError::NotResourceOwner => (StatusCode::FORBIDDEN, "NOT_RESOURCE_OWNER"),
            JwtAuthError::NotConfigured => {
                (StatusCode::INTERNAL_SERVER_ERROR, "AUTH_NOT_CONFIGURED")
            }
        }
    }
}

impl IntoResponse for JwtAuthError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}

impl From<JwtAuthError> for (StatusCode, Json<ApiErrorResponse>) {
    fn from(err: JwtAuthError) -> Self {
        let (status, code) = err.status_and_code();
        (status, Json(ApiErrorResponse::new(code, err.to_string())))
    }
}

impl<S> FromRequestParts<S> for JwtAuth
where
    S: Send + Sync,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Authorization 헤더에서 토큰 추출
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(JwtAuthError::MissingToken)?;

        // Bearer 토큰 형식 확인
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(JwtAuthError::InvalidAuthHeader)?;

        // Extensions에서 AuthConfig 가져오기 (없으면 거부)
        let auth_config = parts
            .extensions
            .get::<AuthConfig>()
            .ok_or(JwtAuthError::NotConfigured)?;

        // 토큰 검증
        let claims = decode_token(token, auth_config).map_err(|e| match e {
            JwtError::TokenExpired => JwtAuthError::TokenExpired,
            _ => JwtAuthError::InvalidToken,
        })?;

        Ok(JwtAuth(claims))
    }
}

/// 특정 역할을 요구하는 권한 검사.
///
/// 역할 간 상하 관계가 없으므로 정확히 일치해야 통과합니다.
///
/// # Returns
///
/// 역할이 일치하면 Ok(()), 불일치하면 Err(JwtAuthError)
pub fn require_role(required_role: Role, claims: &Claims) -> Result<(), JwtAuthError> {
    if claims.role == required_role {
        Ok(())
    } else {
        Err(JwtAuthError::InsufficientRole)
    }
}

/// 본인 또는 관리자만 통과시키는 소유권 검사.
///
/// 사용자 이름 비교는 대소문자를 구분하지 않습니다. 저장소 조회가
/// `LOWER()`로 비교하므로 여기서도 유니코드 소문자 변환으로 맞춥니다.
pub fn ensure_self_or_admin(target_username: &str, claims: &Claims) -> Result<(), JwtAuthError> {
    if claims.role == Role::Admin
        || claims.username.to_lowercase() == target_username.to_lowercase()
    {
        Ok(())
    } else {
        Err(JwtAuthError::NotResourceOwner)
    }
}

/// Admin 역할을 요구하는 추출기.
#[derive(Debug, Clone)]
pub struct AdminAuth(pub Claims);

impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let JwtAuth(claims) = JwtAuth::from_request_parts(parts, state).await?;
        require_role(Role::Admin, &claims)?;
        Ok(AdminAuth(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            secret: "test-secret-key-for-jwt-testing-minimum-32-chars".to_string(),
            issuer: "storekeeper".to_string(),
            audience: "storekeeper-clients".to_string(),
            duration_minutes: 60,
        }
    }

    #[test]
    fn test_require_role_exact_match() {
        let config = test_config();
        let admin_claims = Claims::new(1, "admin", Role::Admin, &config);
        let user_claims = Claims::new(2, "alice", Role::User, &config);

        assert!(require_role(Role::Admin, &admin_claims).is_ok());
        assert!(require_role(Role::User, &user_claims).is_ok());

        // 역할 계층은 없음: Admin이라도 User 전용 검사는 통과하지 못함
        assert!(require_role(Role::User, &admin_claims).is_err());
        assert!(require_role(Role::Admin, &user_claims).is_err());
    }

    #[test]
    fn test_ensure_self_or_admin() {
        let config = test_config();
        let admin_claims = Claims::new(1, "admin", Role::Admin, &config);
        let alice_claims = Claims::new(2, "Alice", Role::User, &config);

        // 관리자는 모든 계정 대상 허용
        assert!(ensure_self_or_admin("alice", &admin_claims).is_ok());
        assert!(ensure_self_or_admin("bob", &admin_claims).is_ok());

        // 본인 계정은 대소문자 무시하고 허용
        assert!(ensure_self_or_admin("alice", &alice_claims).is_ok());
        assert!(ensure_self_or_admin("ALICE", &alice_claims).is_ok());

        // 타인 계정은 거부
        assert!(matches!(
            ensure_self_or_admin("bob", &alice_claims),
            Err(JwtAuthError::NotResourceOwner)
        ));
    }

    #[test]
    fn test_ensure_self_handles_non_ascii_usernames() {
        let config = test_config();
        let jose_claims = Claims::new(3, "JOSÉ", Role::User, &config);

        // ASCII 범위 밖 문자도 저장소의 LOWER()와 같은 기준으로 접힘
        assert!(ensure_self_or_admin("josé", &jose_claims).is_ok());
        assert!(ensure_self_or_admin("JOSÉ", &jose_claims).is_ok());
        assert!(ensure_self_or_admin("josef", &jose_claims).is_err());
    }

    #[test]
    fn test_jwt_auth_error_responses() {
        let cases = vec![
            (JwtAuthError::MissingToken, StatusCode::UNAUTHORIZED),
            (JwtAuthError::InvalidAuthHeader, StatusCode::UNAUTHORIZED),
            (JwtAuthError::TokenExpired, StatusCode::UNAUTHORIZED),
            (JwtAuthError::InvalidToken, StatusCode::UNAUTHORIZED),
            (JwtAuthError::InsufficientRole, StatusCode::FORBIDDEN),
            (JwtAuthError::NotResourceOwner, StatusCode::FORBIDDEN),
            (
                JwtAuthError::NotConfigured,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
