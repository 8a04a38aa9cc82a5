//! Category Repository
//!
//! 카테고리 관련 데이터베이스 연산을 담당합니다.
//!
//! 카테고리는 이름으로 식별되며 조회는 대소문자를 구분하지 않습니다.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;

// ================================================================================================
// Types
// ================================================================================================

/// 카테고리 레코드
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CategoryRecord {
    pub id: i32,
    pub name: String,
    pub description: String,
    #[sqlx(default)]
    pub parent_category_id: Option<i32>,
}

// ================================================================================================
// Repository
// ================================================================================================

/// Category Repository
pub struct CategoryRepository;

impl CategoryRepository {
    /// 이름으로 카테고리 조회 (대소문자 무시).
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<CategoryRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, CategoryRecord>(
            "SELECT * FROM categories WHERE LOWER(name) = LOWER($1)",
        )
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 카테고리 생성.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        description: &str,
        parent_category_id: Option<i32>,
    ) -> Result<CategoryRecord, sqlx::Error> {
        let record = sqlx::query_as::<_, CategoryRecord>(
            r#"
            INSERT INTO categories (name, description, parent_category_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(parent_category_id)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// 카테고리 이름 변경.
    pub async fn update_name(
        pool: &PgPool,
        current_name: &str,
        new_name: &str,
    ) -> Result<Option<CategoryRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, CategoryRecord>(
            r#"
            UPDATE categories
            SET name = $2
            WHERE LOWER(name) = LOWER($1)
            RETURNING *
            "#,
        )
        .bind(current_name)
        .bind(new_name)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 카테고리 설명 변경.
    pub async fn update_description(
        pool: &PgPool,
        name: &str,
        description: &str,
    ) -> Result<Option<CategoryRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, CategoryRecord>(
            r#"
            UPDATE categories
            SET description = $2
            WHERE LOWER(name) = LOWER($1)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 카테고리 삭제 (소속 상품도 함께 삭제).
    ///
    /// 상품 삭제와 카테고리 삭제는 한 트랜잭션으로 묶입니다.
    pub async fn delete_by_id(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM products WHERE category_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
