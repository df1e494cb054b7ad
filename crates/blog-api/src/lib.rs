//! 블로그 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (회원, 게시글, 댓글)
//! - JWT 인증 가드와 Argon2 비밀번호 해싱
//! - PostgreSQL 저장소 (sqlx)
//! - 헬스 체크 엔드포인트
//! - Prometheus 메트릭
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: 신원 토큰, 인증 가드, 비밀번호 해싱
//! - [`services`]: 엔티티 서비스
//! - [`repository`]: PostgreSQL 저장소
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`middleware`]: HTTP 미들웨어
//! - [`extract`]: 요청 본문 추출기
//! - [`openapi`]: OpenAPI 문서 및 Swagger UI

pub mod auth;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use auth::{AuthUser, Claims, JwtAuthError, TokenService};
pub use error::{ApiErrorResponse, ApiResult, Operation};
pub use metrics::setup_metrics_recorder;
pub use middleware::metrics_layer;
pub use repository::PgStore;
pub use routes::create_api_router;
pub use state::AppState;

