//! # Store Core
//!
//! 카탈로그 백엔드의 기반 타입을 제공합니다.
//!
//! 이 크레이트는 시스템 전반에서 사용되는 공통 요소를 제공합니다:
//! - 에러 분류
//! - 설정 관리 (서버/데이터베이스/인증/로깅)
//! - 로깅 인프라

pub mod config;
pub mod error;
pub mod logging;

pub use config::{AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, ServerConfig};
pub use error::{StoreError, StoreResult};
pub use logging::{init_logging, LogFormat};
