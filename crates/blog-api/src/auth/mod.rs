//! 인증.
//!
//! JWT 기반 신원 확인과 비밀번호 해싱을 제공합니다.
//!
//! # 구성 요소
//!
//! - [`TokenService`]: 신원 토큰 발급/검증
//! - [`AuthUser`]: Axum 핸들러용 인증 가드 추출기
//! - 비밀번호 해싱/검증 함수 (Argon2)
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! // 보호된 라우트에서 AuthUser 추출기 사용
//! async fn protected_handler(
//!     AuthUser(user): AuthUser,
//! ) -> impl IntoResponse {
//!     format!("Hello, {}!", user.nickname)
//! }
//! ```

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtError, TokenService};
pub use middleware::{authenticate, AuthUser, JwtAuthError};
pub use password::{
    hash_password, hash_password_blocking, verify_dummy_blocking, verify_password,
    verify_password_blocking, PasswordError,
};
