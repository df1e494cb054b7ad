//! 신원 토큰 처리.
//!
//! 로그인 시 발급되는 서명된 JWT의 생성/검증 로직.
//! 만료 시각은 절대 기준이며 갱신(refresh) 메커니즘은 없습니다.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use blog_core::UserId;

/// JWT 페이로드.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 토큰이 바인딩된 사용자 ID
    #[serde(rename = "userId")]
    pub user_id: UserId,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
    /// JWT ID - 토큰 고유 식별자
    pub jti: String,
}

impl Claims {
    /// 새로운 Claims 생성.
    ///
    /// # Arguments
    ///
    /// * `user_id` - 사용자 ID
    /// * `issued_at` - 발급 시각
    /// * `ttl` - 유효 기간
    pub fn new(user_id: UserId, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            user_id,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// JWT 토큰 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("토큰 인코딩 실패: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("잘못된 토큰 형식")]
    InvalidToken,
}

/// 신원 토큰 서비스.
///
/// 프로세스 전역 설정에서 받은 비밀 키로 HS256 토큰을 발급하고 검증합니다.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// 기본 토큰 유효 시간 (24시간).
    pub const DEFAULT_TTL_HOURS: i64 = 24;

    /// 새 토큰 서비스 생성.
    ///
    /// # Arguments
    ///
    /// * `secret` - 서명 비밀 키
    /// * `ttl` - 토큰 유효 기간
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // 만료 시각은 유예 없이 적용
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// 시간 단위 유효 기간으로 생성.
    pub fn with_ttl_hours(secret: &str, hours: i64) -> Self {
        Self::new(secret, Duration::hours(hours))
    }

    /// 토큰 유효 기간.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 사용자 ID에 대한 토큰 발급.
    pub fn issue(&self, user_id: UserId) -> Result<String, JwtError> {
        self.issue_at(user_id, Utc::now())
    }

    /// 지정한 시각 기준으로 토큰 발급.
    pub fn issue_at(&self, user_id: UserId, issued_at: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = Claims::new(user_id, issued_at, self.ttl);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(JwtError::from)
    }

    /// 토큰 검증 후 사용자 ID 반환.
    ///
    /// 서명 불일치, 페이로드 형식 오류, 만료 시 실패합니다.
    pub fn verify(&self, token: &str) -> Result<UserId, JwtError> {
        self.decode_claims(token).map(|claims| claims.user_id)
    }

    /// 토큰 디코딩 및 검증.
    pub fn decode_claims(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken,
            })
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
