//! Blog API 서버 진입점.
//!
//! 설정을 로드하고 저장소를 연결한 뒤 HTTP 서버를 시작합니다.
//!
//! # 설정
//!
//! `config/default.toml` (또는 `BLOG_CONFIG` 경로)과 `BLOG__` 접두사 환경 변수에서 로드합니다.
//!
//! - `BLOG__AUTH__JWT_SECRET`: 토큰 서명 비밀 키 (필수)
//! - `BLOG__DATABASE__URL`: PostgreSQL URL (없으면 인메모리 저장소)
//! - `BLOG__SERVER__PORT`: 리스닝 포트 (기본값 8080)
//! - `CORS_ORIGINS`: 쉼표로 구분된 허용 origin 목록

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{http::StatusCode, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use blog_api::metrics::setup_metrics_recorder;
use blog_api::middleware::metrics_layer;
use blog_api::openapi::swagger_ui_router;
use blog_api::{create_api_router, AppState, PgStore, TokenService};
use blog_core::{init_logging, AppConfig, BlogStore, MemoryStore};

/// 설정에 따라 저장소를 생성합니다.
///
/// 데이터베이스 URL이 없으면 인메모리 저장소를 사용합니다.
async fn create_store(config: &AppConfig) -> anyhow::Result<Arc<dyn BlogStore>> {
    let Some(url) = config.database.url.as_deref() else {
        warn!("database.url not set, using in-memory store (data is lost on restart)");
        return Ok(Arc::new(MemoryStore::new()));
    };

    let store = PgStore::connect(url, &config.database)
        .await
        .context("데이터베이스 연결 실패")?;

    if config.database.run_migrations {
        store.migrate().await.context("마이그레이션 실패")?;
    }

    Ok(Arc::new(store))
}

/// CORS 미들웨어 구성.
///
/// CORS_ORIGINS 환경변수가 설정되어 있으면 해당 origin만 허용합니다.
/// 설정되지 않으면 개발 모드로 간주하여 모든 origin을 허용합니다.
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => {
            warn!("CORS_ORIGINS not set, allowing any origin (development mode)");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}

/// /metrics 엔드포인트 핸들러.
async fn metrics_handler(
    axum::extract::State(handle): axum::extract::State<PrometheusHandle>,
) -> String {
    handle.render()
}

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>, prefix: &str, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    Router::new()
        .merge(metrics_router)
        .merge(create_api_router(prefix).with_state(state))
        .merge(swagger_ui_router())
        .layer(middleware::from_fn(metrics_layer))
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 (30초) - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(cors_layer())
}

/// OpenAPI 스펙 내보내기.
///
/// `--export-openapi` 플래그가 있으면 스펙을 stdout으로 출력하고 `true`를 반환합니다.
fn export_openapi_if_requested() -> anyhow::Result<bool> {
    use blog_api::openapi::ApiDoc;
    use utoipa::OpenApi as _;

    if !std::env::args().any(|arg| arg == "--export-openapi") {
        return Ok(false);
    }

    println!("{}", serde_json::to_string_pretty(&ApiDoc::openapi())?);
    Ok(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    if export_openapi_if_requested()? {
        return Ok(());
    }

    let config = AppConfig::load_default().context("설정 로드 실패")?;
    init_logging(&config.logging).map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {e}"))?;
    config.validate().context("잘못된 설정")?;

    if config.has_weak_secret() {
        warn!("auth.jwt_secret is shorter than 32 bytes; use a longer secret in production");
    }

    info!("Starting Blog API server...");

    let metrics_handle = setup_metrics_recorder().context("Prometheus 레코더 설치 실패")?;
    info!("Prometheus metrics recorder initialized");

    let store = create_store(&config).await?;
    let tokens = TokenService::with_ttl_hours(&config.auth.jwt_secret, config.auth.token_ttl_hours);
    let state = Arc::new(AppState::new(store, tokens));

    let app = create_router(state, &config.server.path_prefix, metrics_handle);

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("잘못된 바인딩 주소: {}", config.bind_address()))?;

    info!(%addr, prefix = %config.server.path_prefix, "API server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("Metrics available at http://{}/metrics", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
