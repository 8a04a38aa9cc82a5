//! Product Repository
//!
//! 상품 관련 데이터베이스 연산을 담당합니다.
//!
//! 상품은 소속 카테고리 안에서 이름으로 식별되며
//! 이름 비교는 대소문자를 구분하지 않습니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;

// ================================================================================================
// Types
// ================================================================================================

/// 상품 레코드
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProductRecord {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub category_id: i32,
}

// ================================================================================================
// Repository
// ================================================================================================

/// Product Repository
pub struct ProductRepository;

impl ProductRepository {
    /// 카테고리 내에서 이름으로 상품 조회 (대소문자 무시).
    pub async fn find_in_category(
        pool: &PgPool,
        category_id: i32,
        name: &str,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, ProductRecord>(
            "SELECT * FROM products WHERE category_id = $1 AND LOWER(name) = LOWER($2)",
        )
        .bind(category_id)
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 상품 생성.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        price: Decimal,
        description: &str,
        category_id: i32,
    ) -> Result<ProductRecord, sqlx::Error> {
        let record = sqlx::query_as::<_, ProductRecord>(
            r#"
            INSERT INTO products (name, price, description, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(description)
        .bind(category_id)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// 상품 이름 변경.
    pub async fn update_name(
        pool: &PgPool,
        category_id: i32,
        current_name: &str,
        new_name: &str,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, ProductRecord>(
            r#"
            UPDATE products
            SET name = $3
            WHERE category_id = $1 AND LOWER(name) = LOWER($2)
            RETURNING *
            "#,
        )
        .bind(category_id)
        .bind(current_name)
        .bind(new_name)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 상품 가격 변경.
    pub async fn update_price(
        pool: &PgPool,
        category_id: i32,
        name: &str,
        price: Decimal,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, ProductRecord>(
            r#"
            UPDATE products
            SET price = $3
            WHERE category_id = $1 AND LOWER(name) = LOWER($2)
            RETURNING *
            "#,
        )
        .bind(category_id)
        .bind(name)
        .bind(price)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 상품 설명 변경.
    pub async fn update_description(
        pool: &PgPool,
        category_id: i32,
        name: &str,
        description: &str,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, ProductRecord>(
            r#"
            UPDATE products
            SET description = $3
            WHERE category_id = $1 AND LOWER(name) = LOWER($2)
            RETURNING *
            "#,
        )
        .bind(category_id)
        .bind(name)
        .bind(description)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 상품을 다른 카테고리로 이동.
    pub async fn update_category(
        pool: &PgPool,
        current_category_id: i32,
        name: &str,
        new_category_id: i32,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        let record = sqlx::query_as::<_, ProductRecord>(
            r#"
            UPDATE products
            SET category_id = $3
            WHERE category_id = $1 AND LOWER(name) = LOWER($2)
            RETURNING *
            "#,
        )
        .bind(current_category_id)
        .bind(name)
        .bind(new_category_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 상품 삭제.
    pub async fn delete_in_category(
        pool: &PgPool,
        category_id: i32,
        name: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM products WHERE category_id = $1 AND LOWER(name) = LOWER($2)")
                .bind(category_id)
                .bind(name)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
