//! Axum용 인증 가드.
//!
//! 보호된 핸들러에서 사용할 인증 추출기.
//! 다음 순서로 검사하며 첫 번째 실패에서 요청을 거부합니다:
//!
//! 1. `Authorization: Bearer <token>` 헤더가 없으면 거부
//! 2. 토큰 검증 실패(서명 불일치, 형식 오류, 만료) 시 거부
//! 3. 토큰의 사용자 ID가 저장소에 없으면 거부
//!
//! 성공하면 인증된 사용자([`CurrentUser`])를 핸들러 인자로 전달합니다.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use blog_core::{CurrentUser, StoreError};

use super::jwt::JwtError;
use crate::error::{ApiErrorResponse, AUTH_REQUIRED_MESSAGE};
use crate::state::AppState;

/// 인증 추출기.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn protected_handler(AuthUser(user): AuthUser) -> impl IntoResponse {
///     format!("Authenticated user: {}", user.nickname)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub CurrentUser);

/// 인증 가드 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtAuthError {
    #[error("인증 토큰이 필요합니다")]
    MissingToken,
    #[error("잘못된 Authorization 헤더 형식")]
    InvalidAuthHeader,
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("유효하지 않은 토큰")]
    InvalidToken,
    #[error("존재하지 않는 사용자")]
    UnknownUser,
    #[error("사용자 조회 실패: {0}")]
    Store(#[from] StoreError),
}

impl From<JwtError> for JwtAuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => JwtAuthError::TokenExpired,
            _ => JwtAuthError::InvalidToken,
        }
    }
}

impl JwtAuthError {
    /// 응답 상태 코드. 저장소 실패만 400이고 나머지는 401입니다.
    pub fn status(&self) -> StatusCode {
        match self {
            JwtAuthError::Store(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for JwtAuthError {
    fn into_response(self) -> Response {
        match &self {
            JwtAuthError::Store(e) => tracing::error!(error = %e, "인증 중 사용자 조회 실패"),
            other => tracing::debug!(reason = %other, "인증 거부"),
        }

        let body = Json(ApiErrorResponse::new(AUTH_REQUIRED_MESSAGE));
        (self.status(), body).into_response()
    }
}

/// 헤더 값에서 Bearer 토큰 추출.
fn bearer_token(header: Option<&str>) -> Result<&str, JwtAuthError> {
    let header = header.ok_or(JwtAuthError::MissingToken)?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(JwtAuthError::InvalidAuthHeader)?;

    if token.is_empty() {
        return Err(JwtAuthError::MissingToken);
    }
    Ok(token)
}

/// Authorization 헤더 값으로 요청자를 확인합니다.
pub async fn authenticate(
    state: &AppState,
    header: Option<&str>,
) -> Result<CurrentUser, JwtAuthError> {
    let token = bearer_token(header)?;
    let user_id = state.tokens.verify(token)?;

    let user = state
        .store
        .find_user(user_id)
        .await?
        .ok_or(JwtAuthError::UnknownUser)?;

    Ok(user.to_current())
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = JwtAuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        authenticate(state, header).await.map(AuthUser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use blog_core::NewUser;
    use chrono::{Duration, Utc};

    async fn state_with_user() -> (AppState, i64) {
        let state = create_test_state();
        let user = state
            .store
            .create_user(NewUser {
                nickname: "abc123".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        (state, user.user_id)
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert!(matches!(bearer_token(None), Err(JwtAuthError::MissingToken)));
        assert!(matches!(
            bearer_token(Some("Basic abc")),
            Err(JwtAuthError::InvalidAuthHeader)
        ));
        assert!(matches!(
            bearer_token(Some("Bearer ")),
            Err(JwtAuthError::MissingToken)
        ));
        assert_eq!(bearer_token(Some("Bearer abc")).unwrap(), "abc");
    }

    #[tokio::test]
    async fn test_authenticate_valid_token() {
        let (state, user_id) = state_with_user().await;
        let token = state.tokens.issue(user_id).unwrap();
        let header = format!("Bearer {token}");

        let user = authenticate(&state, Some(&header)).await.unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.nickname, "abc123");
    }

    #[tokio::test]
    async fn test_authenticate_rejects_expired_token() {
        let (state, user_id) = state_with_user().await;
        let token = state
            .tokens
            .issue_at(user_id, Utc::now() - Duration::hours(25))
            .unwrap();
        let header = format!("Bearer {token}");

        let err = authenticate(&state, Some(&header)).await.unwrap_err();
        assert!(matches!(err, JwtAuthError::TokenExpired));
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_authenticate_rejects_unknown_user() {
        let state = create_test_state();
        let token = state.tokens.issue(999).unwrap();
        let header = format!("Bearer {token}");

        let err = authenticate(&state, Some(&header)).await.unwrap_err();
        assert!(matches!(err, JwtAuthError::UnknownUser));
    }

    #[test]
    fn test_store_failure_is_bad_request() {
        let err = JwtAuthError::Store(StoreError::Backend("down".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(JwtAuthError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
    }
}
