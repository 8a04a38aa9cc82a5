//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "CATEGORY_NOT_FOUND",
///   "message": "카테고리를 찾을 수 없습니다: Drinks",
///   "details": null,
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "DB_ERROR", "INVALID_INPUT", "NOT_FOUND")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 상세 정보 포함 에러 생성.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 에러 코드 반환.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// 에러 메시지 반환.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 핸들러 Result 타입 별칭.
///
/// # Example
///
/// ```ignore
/// async fn get_category(
///     Path(name): Path<String>,
///     State(state): State<Arc<AppState>>,
/// ) -> ApiResult<Json<CategoryResponse>> {
///     let category = CategoryRepository::find_by_name(pool, &name)
///         .await
///         .map_err(db_error)?
///         .ok_or_else(|| not_found("CATEGORY_NOT_FOUND", "카테고리를 찾을 수 없습니다"))?;
///
///     Ok(Json(category.into()))
/// }
/// ```
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 400 Bad Request 에러 생성.
pub fn bad_request(
    code: &str,
    message: impl Into<String>,
) -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiErrorResponse::new(code, message)),
    )
}

/// 401 Unauthorized 에러 생성.
pub fn unauthorized(
    code: &str,
    message: impl Into<String>,
) -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiErrorResponse::new(code, message)),
    )
}

/// 404 Not Found 에러 생성.
pub fn not_found(code: &str, message: impl Into<String>) -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiErrorResponse::new(code, message)),
    )
}

/// 409 Conflict 에러 생성.
pub fn conflict(code: &str, message: impl Into<String>) -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::CONFLICT,
        Json(ApiErrorResponse::new(code, message)),
    )
}

/// 500 Internal Server Error 에러 생성 (DB 에러용).
///
/// 내부 상세는 로그에만 남기고 응답에는 일반 메시지를 사용합니다.
pub fn db_error(err: sqlx::Error) -> (StatusCode, Json<ApiErrorResponse>) {
    tracing::error!("데이터베이스 에러: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiErrorResponse::new("DB_ERROR", "데이터베이스 오류가 발생했습니다")),
    )
}

/// 503 Service Unavailable 에러 생성 (DB 미연결용).
pub fn db_unavailable() -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ApiErrorResponse::new(
            "DB_UNAVAILABLE",
            "데이터베이스 연결이 설정되지 않았습니다",
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_response_new() {
        let error = ApiErrorResponse::new("TEST_ERROR", "Test message");
        assert_eq!(error.code, "TEST_ERROR");
        assert_eq!(error.message, "Test message");
        assert!(error.timestamp.is_some());
        assert!(error.details.is_none());
    }

    #[test]
    fn test_api_error_response_with_details() {
        let details = serde_json::json!({"field": "price", "reason": "must be positive"});
        let error = ApiErrorResponse::with_details("VALIDATION_ERROR", "Invalid input", details);
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.details.is_some());
    }

    #[test]
    fn test_json_serialization_skips_empty_fields() {
        let error = ApiErrorResponse {
            code: "NOT_FOUND".to_string(),
            message: "Resource not found".to_string(),
            details: None,
            timestamp: None,
        };
        let json = serde_json::to_string(&error).unwrap();

        assert!(!json.contains("timestamp"));
        assert!(!json.contains("details"));
        assert!(json.contains(r#""code":"NOT_FOUND""#));
        assert!(json.contains(r#""message":"Resource not found""#));
    }

    #[test]
    fn test_status_helpers() {
        assert_eq!(bad_request("X", "m").0, StatusCode::BAD_REQUEST);
        assert_eq!(unauthorized("X", "m").0, StatusCode::UNAUTHORIZED);
        assert_eq!(not_found("X", "m").0, StatusCode::NOT_FOUND);
        assert_eq!(conflict("X", "m").0, StatusCode::CONFLICT);
        assert_eq!(db_unavailable().0, StatusCode::SERVICE_UNAVAILABLE);
    }
}
