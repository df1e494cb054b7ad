//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `{prefix}/signup`, `{prefix}/login`, `{prefix}/users/me` - 사용자
//! - `{prefix}/posts` - 게시글
//! - `{prefix}/comments` - 댓글
//!
//! `prefix`는 설정의 `server.path_prefix` (기본값 `/api`)입니다.

pub mod comments;
pub mod health;
pub mod posts;
pub mod users;

pub use comments::{comments_router, CommentListResponse, CommentRequest};
pub use health::{health_router, ComponentStatus, HealthResponse};
pub use posts::{posts_router, PostDetailResponse, PostListResponse, PostRequest};
pub use users::{users_router, LoginRequest, SignupRequest, TokenResponse, UserResponse};

use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::AppState;

/// 성공 메시지 응답.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 블로그 엔드포인트 라우터 (접두사 없음).
pub fn blog_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(users_router())
        .nest("/posts", posts_router())
        .nest("/comments", comments_router())
}

/// 전체 API 라우터 생성.
///
/// 블로그 엔드포인트는 `prefix` 아래에, 헬스 체크는 루트에 위치합니다.
pub fn create_api_router(prefix: &str) -> Router<Arc<AppState>> {
    let prefix = prefix.trim_end_matches('/');

    let router = Router::new().nest("/health", health_router());

    if prefix.is_empty() {
        router.merge(blog_router())
    } else {
        router.nest(prefix, blog_router())
    }
}
