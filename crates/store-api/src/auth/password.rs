//! 비밀번호 해싱 유틸리티.
//!
//! Argon2 기반 비밀번호 해싱 및 검증.
//!
//! 평문 비밀번호는 어디에도 저장되지 않으며, 솔트가 포함된 PHC 형식
//! 해시 문자열만 계정 저장소에 기록됩니다.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("비밀번호 해싱 실패")]
    HashingFailed,
    #[error("비밀번호 검증 실패")]
    VerificationFailed,
    #[error("잘못된 해시 형식")]
    InvalidHashFormat,
}

/// 비밀번호 해싱.
///
/// Argon2id 알고리즘을 사용하며 솔트는 자동으로 생성됩니다.
/// 같은 비밀번호라도 호출마다 다른 해시가 나오지만,
/// [`verify_password`]로는 모두 검증됩니다.
///
/// # Returns
///
/// PHC 형식의 해시 문자열 (솔트 포함)
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| PasswordError::HashingFailed)?;

    Ok(hash.to_string())
}

/// 비밀번호 검증.
///
/// 저장된 해시와 입력된 비밀번호를 비교합니다.
///
/// # Returns
///
/// 비밀번호가 일치하면 Ok(()), 불일치하면 Err
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| PasswordError::VerificationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let password = "secret1";
        let hash = hash_password(password).unwrap();

        // PHC 형식 확인 (argon2id)
        assert!(hash.starts_with("$argon2id$"));

        assert!(verify_password(password, &hash).is_ok());
        assert!(verify_password("wrongpass", &hash).is_err());
    }

    #[test]
    fn test_same_password_different_hashes() {
        let hash1 = hash_password("secret1").unwrap();
        let hash2 = hash_password("secret1").unwrap();

        // 솔트가 다르므로 해시 문자열은 다름
        assert_ne!(hash1, hash2);

        // 하지만 둘 다 검증 가능
        assert!(verify_password("secret1", &hash1).is_ok());
        assert!(verify_password("secret1", &hash2).is_ok());
    }

    #[test]
    fn test_distinct_passwords_do_not_cross_verify() {
        let hash1 = hash_password("password-one").unwrap();
        let hash2 = hash_password("password-two").unwrap();

        assert!(verify_password("password-one", &hash2).is_err());
        assert!(verify_password("password-two", &hash1).is_err());
    }

    #[test]
    fn test_invalid_hash_format() {
        let result = verify_password("password", "not-a-valid-hash");
        assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
    }

    #[test]
    fn test_unicode_password() {
        let password = "비밀번호123";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash).is_ok());
    }
}
