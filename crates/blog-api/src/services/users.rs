//! 사용자 서비스.
//!
//! 회원가입, 로그인, 내 정보 조회.

use std::sync::Arc;

use tracing::{debug, info};

use blog_core::{
    validate_signup, BlogError, BlogResult, BlogStore, CurrentUser, NewUser, StoreError,
    ValidationError,
};

use crate::auth::{
    hash_password_blocking, verify_dummy_blocking, verify_password_blocking, PasswordError,
    TokenService,
};
use crate::metrics::{record_login, record_signup};

/// 사용자 서비스.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn BlogStore>,
    tokens: TokenService,
}

impl UserService {
    pub fn new(store: Arc<dyn BlogStore>, tokens: TokenService) -> Self {
        Self { store, tokens }
    }

    /// 회원가입.
    ///
    /// 형식 검사(닉네임 → 패스워드 → 닉네임 포함 → 확인 값) 후 닉네임 중복을 확인합니다.
    /// 동시 가입으로 중복 검사를 통과하더라도 저장소의 유일성 제약 위반은 중복 닉네임으로 보고됩니다.
    pub async fn signup(
        &self,
        nickname: &str,
        password: &str,
        confirm: &str,
    ) -> BlogResult<CurrentUser> {
        validate_signup(nickname, password, confirm)?;

        if self.store.find_user_by_nickname(nickname).await?.is_some() {
            return Err(ValidationError::DuplicateNickname.into());
        }

        let password_hash = hash_password_blocking(password.to_string())
            .await
            .map_err(|e| BlogError::Internal(e.to_string()))?;

        let user = self
            .store
            .create_user(NewUser {
                nickname: nickname.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::Duplicate(_) => BlogError::from(ValidationError::DuplicateNickname),
                other => other.into(),
            })?;

        info!(user_id = user.user_id, nickname = %user.nickname, "회원가입 완료");
        record_signup();

        Ok(user.to_current())
    }

    /// 로그인.
    ///
    /// 닉네임으로 사용자를 찾아 해시를 검증하고 신원 토큰을 발급합니다.
    /// 닉네임이 없거나 패스워드가 틀리면 같은 에러를 반환합니다.
    /// 닉네임이 없을 때도 더미 해시에 대해 한 번 검증합니다.
    pub async fn login(&self, nickname: &str, password: &str) -> BlogResult<String> {
        let user = self.store.find_user_by_nickname(nickname).await?;

        let verified = match &user {
            Some(user) => {
                verify_password_blocking(password.to_string(), user.password_hash.clone()).await
            }
            None => {
                let _ = verify_dummy_blocking(password.to_string()).await;
                Err(PasswordError::VerificationFailed)
            }
        };

        let user = match (user, verified) {
            (Some(user), Ok(())) => user,
            (user, Err(PasswordError::VerificationFailed)) | (user @ None, _) => {
                debug!(
                    user_id = user.as_ref().map(|u| u.user_id),
                    "로그인 실패: 닉네임 또는 패스워드 불일치"
                );
                record_login(false);
                return Err(ValidationError::CredentialMismatch.into());
            }
            (Some(_), Err(e)) => return Err(BlogError::Internal(e.to_string())),
        };

        let token = self
            .tokens
            .issue(user.user_id)
            .map_err(|e| BlogError::Internal(e.to_string()))?;

        info!(user_id = user.user_id, "로그인 성공");
        record_login(true);

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::MemoryStore;

    fn service() -> UserService {
        UserService::new(
            Arc::new(MemoryStore::new()),
            TokenService::with_ttl_hours("test-secret-key-for-jwt-testing-minimum-32-chars", 24),
        )
    }

    #[tokio::test]
    async fn test_signup_and_login() {
        let service = service();

        let user = service.signup("abc123", "abcd9999", "abcd9999").await.unwrap();
        assert_eq!(user.nickname, "abc123");

        let token = service.login("abc123", "abcd9999").await.unwrap();
        assert_eq!(service.tokens.verify(&token).unwrap(), user.user_id);
    }

    #[tokio::test]
    async fn test_password_is_hashed() {
        let store = Arc::new(MemoryStore::new());
        let service = UserService::new(
            store.clone(),
            TokenService::with_ttl_hours("test-secret-key-for-jwt-testing-minimum-32-chars", 24),
        );

        service.signup("abc123", "abcd9999", "abcd9999").await.unwrap();

        let stored = store.find_user_by_nickname("abc123").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "abcd9999");
        assert!(stored.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_duplicate_nickname() {
        let service = service();
        service.signup("abc123", "abcd9999", "abcd9999").await.unwrap();

        let err = service
            .signup("abc123", "zzzz0000", "zzzz0000")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BlogError::Validation(ValidationError::DuplicateNickname)
        ));
    }

    #[tokio::test]
    async fn test_signup_validation_runs_before_duplicate_check() {
        let service = service();
        service.signup("abc123", "abcd9999", "abcd9999").await.unwrap();

        let err = service
            .signup("abc123", "abcd9999", "different")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BlogError::Validation(ValidationError::PasswordMismatch)
        ));
    }

    #[tokio::test]
    async fn test_login_mismatch() {
        let service = service();
        service.signup("abc123", "abcd9999", "abcd9999").await.unwrap();

        for (nickname, password) in [("abc123", "wrong999"), ("nobody", "abcd9999")] {
            let err = service.login(nickname, password).await.unwrap_err();
            assert!(matches!(
                err,
                BlogError::Validation(ValidationError::CredentialMismatch)
            ));
        }
    }

    #[tokio::test]
    async fn test_unknown_nickname_costs_a_hash_verification() {
        let service = service();
        service.signup("abc123", "abcd9999", "abcd9999").await.unwrap();
        // 더미 해시 초기화 비용 제외
        let _ = service.login("nobody1", "abcd9999").await;

        let started = std::time::Instant::now();
        service.login("abc123", "wrong999").await.unwrap_err();
        let known = started.elapsed();

        let started = std::time::Instant::now();
        service.login("nobody1", "wrong999").await.unwrap_err();
        let unknown = started.elapsed();

        assert!(
            unknown * 4 >= known,
            "unknown nickname answered in {unknown:?}, known nickname in {known:?}"
        );
    }
}
