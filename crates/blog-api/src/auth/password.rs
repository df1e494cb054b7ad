//! 비밀번호 해싱 유틸리티.
//!
//! Argon2 기반 비밀번호 해싱 및 검증.
//! 사용자 패스워드는 평문으로 저장되거나 직접 비교되지 않습니다.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;

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
/// Argon2id 알고리즘과 해시마다 새로 생성되는 솔트를 사용합니다.
///
/// # Returns
///
/// PHC 형식의 해시 문자열 (솔트 포함)
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| PasswordError::HashingFailed)?;

    Ok(hash.to_string())
}

/// 비밀번호 검증.
///
/// 비밀번호가 일치하면 Ok(()), 불일치하거나 해시가 손상되었으면 Err.
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| PasswordError::VerificationFailed)
}

/// 블로킹 스레드에서 해싱 수행.
///
/// Argon2는 의도적으로 느리므로 비동기 런타임 워커를 막지 않도록 분리합니다.
pub async fn hash_password_blocking(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|_| PasswordError::HashingFailed)?
}

/// 블로킹 스레드에서 검증 수행.
pub async fn verify_password_blocking(password: String, hash: String) -> Result<(), PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|_| PasswordError::VerificationFailed)?
}

/// 대응하는 사용자가 없을 때 검증 대상으로 쓰는 고정 해시.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("blog-dummy-password-0000").ok());

/// 고정 더미 해시에 대해 블로킹 스레드에서 검증 수행.
///
/// 실제 사용자 검증과 같은 Argon2 비용이 듭니다. 호출자는 결과와 무관하게 인증 실패로 처리해야 합니다.
pub async fn verify_dummy_blocking(password: String) -> Result<(), PasswordError> {
    tokio::task::spawn_blocking(move || match DUMMY_HASH.as_deref() {
        Some(hash) => verify_password(&password, hash),
        None => Err(PasswordError::HashingFailed),
    })
    .await
    .map_err(|_| PasswordError::VerificationFailed)?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let password = "abcd9999";
        let hash = hash_password(password).unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains(password));
        assert!(verify_password(password, &hash).is_ok());
        assert!(verify_password("abcd9998", &hash).is_err());
    }

    #[test]
    fn test_different_salts_per_hash() {
        let hash1 = hash_password("Password1").unwrap();
        let hash2 = hash_password("Password1").unwrap();

        assert_ne!(hash1, hash2);
        assert!(verify_password("Password1", &hash1).is_ok());
        assert!(verify_password("Password1", &hash2).is_ok());
    }

    #[test]
    fn test_invalid_hash_format() {
        let result = verify_password("password", "not-a-valid-hash");
        assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
    }

    #[tokio::test]
    async fn test_blocking_variants() {
        let hash = hash_password_blocking("한글패스워드123".to_string())
            .await
            .unwrap();
        assert!(verify_password_blocking("한글패스워드123".to_string(), hash.clone())
            .await
            .is_ok());
        assert!(matches!(
            verify_password_blocking("wrong".to_string(), hash).await,
            Err(PasswordError::VerificationFailed)
        ));
    }

    #[tokio::test]
    async fn test_dummy_verification_runs_argon2() {
        let result = verify_dummy_blocking("abcd9999".to_string()).await;
        assert!(matches!(result, Err(PasswordError::VerificationFailed)));

        let hash = DUMMY_HASH.as_deref().unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }
}
