//! JWT 토큰 처리.
//!
//! 토큰 발급/검증 로직. 발급과 검증은 같은 [`AuthConfig`]를 공유하며,
//! 설정은 시작 시점에 검증되므로 여기서는 서명/구조/만료만 다룹니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use store_core::AuthConfig;

use super::Role;

/// JWT 페이로드.
///
/// 계정의 식별 정보와 역할을 담습니다. 발급 후에는 불변이며,
/// 서버는 토큰을 보관하지 않습니다. 만료가 유일한 수명 경계입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 계정 ID
    pub sub: String,
    /// 계정 사용자 이름
    pub username: String,
    /// 계정 역할
    pub role: Role,
    /// Issuer - 토큰 발급자
    pub iss: String,
    /// Audience - 토큰 대상
    pub aud: String,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// 새로운 Claims 생성.
    ///
    /// 만료 시간은 현재 시간 + 설정된 유효 기간으로 계산됩니다.
    pub fn new(user_id: i32, username: impl Into<String>, role: Role, config: &AuthConfig) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            username: username.into(),
            role,
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(config.duration_minutes)).timestamp(),
        }
    }

    /// 토큰이 만료되었는지 확인.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// JWT 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("토큰 인코딩 실패: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
    #[error("토큰 디코딩 실패")]
    DecodingError,
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("잘못된 토큰 형식")]
    InvalidToken,
}

/// 토큰 생성.
///
/// HS256으로 서명된 컴팩트 JWT 문자열을 반환합니다.
pub fn encode_token(claims: &Claims, config: &AuthConfig) -> Result<String, JwtError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(JwtError::from)
}

/// 토큰 디코딩 및 검증.
///
/// 서명, 알고리즘(HS256), 만료, 발급자, 대상을 모두 검증하며
/// 어느 하나라도 어긋나면 실패합니다 (fail closed).
pub fn decode_token(token: &str, config: &AuthConfig) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        jsonwebtoken::errors::ErrorKind::InvalidToken => JwtError::InvalidToken,
        _ => JwtError::DecodingError,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            secret: "test-secret-key-for-jwt-testing-minimum-32-chars".to_string(),
            issuer: "storekeeper".to_string(),
            audience: "storekeeper-clients".to_string(),
            duration_minutes: 60,
        }
    }

    #[test]
    fn test_encode_and_decode_token() {
        let config = test_config();
        let claims = Claims::new(42, "alice", Role::User, &config);

        let token = encode_token(&claims, &config).unwrap();
        assert!(!token.is_empty());

        let decoded = decode_token(&token, &config).unwrap();
        assert_eq!(decoded.sub, "42");
        assert_eq!(decoded.username, "alice");
        assert_eq!(decoded.role, Role::User);
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_expired_token_denied() {
        let config = test_config();
        let now = Utc::now();
        let claims = Claims {
            sub: "1".to_string(),
            username: "alice".to_string(),
            role: Role::User,
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        assert!(claims.is_expired());

        let token = encode_token(&claims, &config).unwrap();
        let result = decode_token(&token, &config);
        assert!(matches!(result, Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret_denied() {
        let config = test_config();
        let claims = Claims::new(1, "alice", Role::Admin, &config);
        let token = encode_token(&claims, &config).unwrap();

        let mut other = test_config();
        other.secret = "another-secret-key-for-testing-minimum-32-chars".to_string();
        assert!(decode_token(&token, &other).is_err());
    }

    #[test]
    fn test_wrong_issuer_denied() {
        let config = test_config();
        let claims = Claims::new(1, "alice", Role::Admin, &config);
        let token = encode_token(&claims, &config).unwrap();

        let mut other = test_config();
        other.issuer = "someone-else".to_string();
        assert!(decode_token(&token, &other).is_err());
    }

    #[test]
    fn test_wrong_audience_denied() {
        let config = test_config();
        let claims = Claims::new(1, "alice", Role::Admin, &config);
        let token = encode_token(&claims, &config).unwrap();

        let mut other = test_config();
        other.audience = "other-clients".to_string();
        assert!(decode_token(&token, &other).is_err());
    }

    #[test]
    fn test_garbage_token_denied() {
        let config = test_config();
        assert!(decode_token("invalid.token.here", &config).is_err());
        assert!(decode_token("", &config).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// 임의의 사용자 이름/ID에 대해 발급 직후 검증하면
        /// 원본과 동일한 클레임이 나와야 합니다.
        #[test]
        fn prop_token_round_trip(user_id in 1i32..=1_000_000, username in "[a-zA-Z0-9_.-]{1,32}") {
            let config = test_config();
            let claims = Claims::new(user_id, username.clone(), Role::User, &config);
            let token = encode_token(&claims, &config).unwrap();
            let decoded = decode_token(&token, &config).unwrap();

            prop_assert_eq!(decoded.sub, user_id.to_string());
            prop_assert_eq!(decoded.username, username);
            prop_assert_eq!(decoded.role, Role::User);
        }
    }
}
