//! tracing을 사용한 로깅 인프라.
//!
//! 설정 파일의 [`LoggingConfig`]로부터 구독자를 초기화합니다.
//! 지원 형식:
//! - **pretty**: 개발용 사람이 읽기 쉬운 형식
//! - **json**: 운영환경/로그 집계용 JSON 형식
//! - **compact**: 한 줄 형식
//!
//! `RUST_LOG` 환경 변수가 설정되어 있으면 설정 파일의 레벨보다 우선합니다.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// 레벨이 지정되지 않았을 때 사용하는 기본 필터.
pub const DEFAULT_FILTER: &str = "blog_api=info,blog_core=info,tower_http=debug";

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// 색상이 포함된 사람이 읽기 쉬운 형식 (개발용)
    #[default]
    Pretty,
    /// 로그 집계용 JSON 형식 (운영용)
    Json,
    /// 간결한 한 줄 형식
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// `RUST_LOG` 또는 설정 레벨로 필터 생성.
///
/// 설정 레벨이 단일 레벨(`info` 등)이면 이 크레이트들과 tower-http에 적용합니다.
fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level = config.level.trim();
    if level.is_empty() {
        return EnvFilter::try_new(DEFAULT_FILTER);
    }
    if level.contains('=') || level.contains(',') {
        return EnvFilter::try_new(level);
    }
    EnvFilter::try_new(format!(
        "blog_api={level},blog_core={level},tower_http={level}"
    ))
}

/// 주어진 설정으로 로깅 시스템을 초기화합니다.
///
/// # 예제
///
/// ```no_run
/// use blog_core::config::LoggingConfig;
/// use blog_core::logging::init_logging;
///
/// init_logging(&LoggingConfig::default()).unwrap();
/// ```
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = build_filter(config)?;
    let format: LogFormat = config.format.parse().unwrap_or_default();

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()?,
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init()?,
    }

    tracing::info!(
        format = ?format,
        level = %config.level,
        "Logging initialized"
    );

    Ok(())
}
