//! 역할 기반 접근 제어.
//!
//! 사용자 역할 정의. 역할 간 상하 관계는 없으며,
//! 요구 역할과 토큰 역할이 정확히 일치해야 통과합니다.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 사용자 역할.
///
/// 저장소와 토큰 양쪽에서 "User" / "Admin" 문자열로 직렬화됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    /// 일반 사용자 - 자기 계정에 대한 작업만 가능
    User,
    /// 관리자 - 카탈로그 변경 및 모든 계정 관리 가능
    Admin,
}

impl Role {
    /// 문자열에서 역할 파싱 (대소문자 무시).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// 저장소에 기록되는 표준 문자열 반환.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Admin => "Admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
