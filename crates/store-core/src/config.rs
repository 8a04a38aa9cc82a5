//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 설정은 파일에서 로드한 뒤 `STORE__` 접두사 환경 변수로 오버라이드됩니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{StoreError, StoreResult};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 데이터베이스 설정
    #[serde(default)]
    pub database: DatabaseConfig,
    /// 인증 설정
    pub auth: AuthConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout_secs: 30,
        }
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 타임아웃 (초)
    pub connection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            connection_timeout_secs: 30,
        }
    }
}

/// 인증(JWT) 설정.
///
/// 토큰 발급과 검증 양쪽에서 같은 값을 사용합니다.
/// 시작 시점에 [`AuthConfig::validate`]로 검증되며, 잘못된 값은
/// 요청 단위 에러가 아니라 치명적 시작 에러로 처리됩니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HS256 서명 비밀 키
    pub secret: String,
    /// 토큰 발급자 (iss 클레임)
    pub issuer: String,
    /// 토큰 대상 (aud 클레임)
    pub audience: String,
    /// 토큰 유효 기간 (분)
    pub duration_minutes: i64,
}

/// HS256 비밀 키 최소 길이 (바이트).
const MIN_SECRET_LEN: usize = 32;

impl AuthConfig {
    /// 인증 설정을 검증합니다.
    ///
    /// # Errors
    ///
    /// 비밀 키가 비어 있거나 너무 짧은 경우, 발급자/대상이 비어 있는 경우,
    /// 유효 기간이 0 이하인 경우 [`StoreError::Config`]를 반환합니다.
    pub fn validate(&self) -> StoreResult<()> {
        if self.secret.trim().is_empty() {
            return Err(StoreError::Config("auth.secret is not set".to_string()));
        }
        if self.secret.len() < MIN_SECRET_LEN {
            return Err(StoreError::Config(format!(
                "auth.secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }
        if self.issuer.trim().is_empty() {
            return Err(StoreError::Config("auth.issuer is not set".to_string()));
        }
        if self.audience.trim().is_empty() {
            return Err(StoreError::Config("auth.audience is not set".to_string()));
        }
        if self.duration_minutes <= 0 {
            return Err(StoreError::Config(
                "auth.duration_minutes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 로드 직후 [`AuthConfig::validate`]를 호출하므로, 반환된 설정은
    /// 항상 토큰 발급에 사용할 수 있는 상태입니다.
    pub fn load<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("auth.issuer", "storekeeper")?
            .set_default("auth.audience", "storekeeper-clients")?
            .set_default("auth.duration_minutes", 60)?
            // 파일에서 로드 (없어도 환경 변수만으로 구성 가능)
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("STORE")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.auth.validate()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> StoreResult<Self> {
        Self::load("config/default.toml")
    }
}
