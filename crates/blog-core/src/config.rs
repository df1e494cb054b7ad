//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//!
//! 설정은 다음 순서로 병합됩니다 (뒤쪽이 우선):
//! 1. 내장 기본값
//! 2. TOML 설정 파일 (선택적)
//! 3. `BLOG__` 접두사 환경 변수 (예: `BLOG__AUTH__JWT_SECRET`)

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 권장 최소 JWT 비밀 키 길이 (바이트).
pub const RECOMMENDED_SECRET_LEN: usize = 32;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 데이터베이스 설정
    #[serde(default)]
    pub database: DatabaseConfig,
    /// 인증 설정
    pub auth: AuthConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// API 경로 접두사
    pub path_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            path_prefix: "/api".to_string(),
        }
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL 연결 URL (없으면 인메모리 저장소 사용)
    pub url: Option<String>,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 타임아웃 (초)
    pub connect_timeout_secs: u64,
    /// 시작 시 마이그레이션 실행 여부
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            connect_timeout_secs: 30,
            run_migrations: true,
        }
    }
}

/// 인증 설정.
#[derive(Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT 서명 비밀 키
    pub jwt_secret: String,
    /// 토큰 유효 시간 (시간)
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

fn default_token_ttl_hours() -> i64 {
    24
}

// 비밀 키가 로그에 남지 않도록 직접 구현
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 설정 검증 에러.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("auth.jwt_secret이 비어 있습니다")]
    EmptySecret,
    #[error("auth.token_ttl_hours는 1 이상이어야 합니다: {0}")]
    InvalidTokenTtl(i64),
    #[error("server.port는 0일 수 없습니다")]
    InvalidPort,
    #[error("server.path_prefix는 '/'로 시작해야 합니다: {0}")]
    InvalidPathPrefix(String),
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.path_prefix", "/api")?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("BLOG")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로(또는 `BLOG_CONFIG` 환경 변수 경로)에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        let path = std::env::var("BLOG_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    /// 설정 값 검증.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ConfigValidationError::EmptySecret);
        }
        if self.auth.token_ttl_hours < 1 {
            return Err(ConfigValidationError::InvalidTokenTtl(
                self.auth.token_ttl_hours,
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }
        if !self.server.path_prefix.starts_with('/') {
            return Err(ConfigValidationError::InvalidPathPrefix(
                self.server.path_prefix.clone(),
            ));
        }
        Ok(())
    }

    /// 비밀 키가 권장 길이보다 짧은지 확인합니다.
    pub fn has_weak_secret(&self) -> bool {
        self.auth.jwt_secret.len() < RECOMMENDED_SECRET_LEN
    }

    /// `host:port` 형식의 바인딩 주소.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
