//! 카탈로그 백엔드의 에러 타입.
//!
//! API 요청 단위 에러는 store-api가 자체 타입으로 표현하므로,
//! 이 모듈은 시작 시점 에러만 다룹니다.

use thiserror::Error;

/// 핵심 에러 분류.
#[derive(Debug, Error)]
pub enum StoreError {
    /// 설정 에러 (시작 시점에만 발생, 치명적)
    #[error("설정 에러: {0}")]
    Config(String),
}

/// 카탈로그 작업을 위한 Result 타입.
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// 프로세스를 중단해야 하는 에러인지 확인합니다.
    ///
    /// 설정 에러는 요청 단위로 복구하지 않고 시작을 중단합니다.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::Config(_))
    }
}

impl From<config::ConfigError> for StoreError {
    fn from(err: config::ConfigError) -> Self {
        StoreError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(StoreError::Config("missing jwt secret".to_string()).is_fatal());
    }

    #[test]
    fn test_config_error_conversion() {
        let err: StoreError = config::ConfigError::Message("bad value".to_string()).into();
        assert!(matches!(err, StoreError::Config(_)));
        assert!(err.is_fatal());
    }
}
