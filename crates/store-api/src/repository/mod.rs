//! 데이터베이스 Repository 모듈.
//!
//! 엔티티별 데이터베이스 연산을 담당합니다. 각 Repository는 상태 없는
//! 단위 구조체이며 연결 풀을 인자로 받습니다.

mod categories;
mod products;
mod users;

pub use categories::{CategoryRecord, CategoryRepository};
pub use products::{ProductRecord, ProductRepository};
pub use users::{UserRecord, UserRepository};

/// UNIQUE 제약 위반(SQLSTATE 23505) 여부 확인.
///
/// 중복 검사는 애플리케이션 레벨 사전 조회가 아니라 데이터베이스
/// 제약이 최종 권한을 가지며, 동시 삽입 경합은 이 에러로 드러납니다.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
