//! User Repository
//!
//! 계정 관련 데이터베이스 연산을 담당합니다.
//!
//! `users` 테이블은 `LOWER(username)`에 UNIQUE 인덱스를 가지며,
//! 사용자 이름 조회는 모두 대소문자를 구분하지 않습니다.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;

// ================================================================================================
// Types
// ================================================================================================

/// 계정 레코드.
///
/// `password_hash`는 솔트가 포함된 PHC 형식 문자열이며
/// API 응답으로 직렬화되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserRecord {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
}

// ================================================================================================
// Repository
// ================================================================================================

/// User Repository
pub struct UserRepository;

impl UserRepository {
    /// 사용자 이름으로 계정 조회 (대소문자 무시).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT id, username, password_hash, role FROM users WHERE LOWER(username) = LOWER($1)",
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 계정 생성.
    ///
    /// 중복 사용자 이름은 사전 조회가 아니라 `LOWER(username)` UNIQUE
    /// 인덱스가 거부하며, 호출자는 23505 에러를 409로 매핑해야 합니다.
    pub async fn create(
        pool: &PgPool,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<UserRecord, sqlx::Error> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (username, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, role
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// 사용자 이름 변경.
    ///
    /// 새 이름이 다른 계정과 충돌하면 UNIQUE 인덱스가 거부합니다.
    pub async fn update_username(
        pool: &PgPool,
        current_username: &str,
        new_username: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users
            SET username = $2
            WHERE LOWER(username) = LOWER($1)
            RETURNING id, username, password_hash, role
            "#,
        )
        .bind(current_username)
        .bind(new_username)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 비밀번호 해시 교체.
    pub async fn update_password_hash(
        pool: &PgPool,
        username: &str,
        password_hash: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users
            SET password_hash = $2
            WHERE LOWER(username) = LOWER($1)
            RETURNING id, username, password_hash, role
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 역할 변경.
    pub async fn update_role(
        pool: &PgPool,
        username: &str,
        role: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users
            SET role = $2
            WHERE LOWER(username) = LOWER($1)
            RETURNING id, username, password_hash, role
            "#,
        )
        .bind(username)
        .bind(role)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 계정 삭제.
    pub async fn delete_by_username(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE LOWER(username) = LOWER($1)")
            .bind(username)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
