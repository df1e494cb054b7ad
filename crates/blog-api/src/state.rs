//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 모든 API 핸들러에서 공유되는 상태를 관리합니다.
//! Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.

use std::sync::Arc;

use blog_core::BlogStore;

use crate::auth::TokenService;
use crate::services::{CommentService, PostService, UserService};

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 저장소 (PostgreSQL 또는 인메모리)
    pub store: Arc<dyn BlogStore>,

    /// 신원 토큰 서비스
    pub tokens: TokenService,

    /// 회원가입/로그인/프로필
    pub users: UserService,

    /// 게시글 CRUD
    pub posts: PostService,

    /// 댓글 CRUD
    pub comments: CommentService,

    /// 서버 시작 시간
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 저장소와 토큰 서비스로 상태를 구성합니다.
    pub fn new(store: Arc<dyn BlogStore>, tokens: TokenService) -> Self {
        Self {
            users: UserService::new(Arc::clone(&store), tokens.clone()),
            posts: PostService::new(Arc::clone(&store)),
            comments: CommentService::new(Arc::clone(&store)),
            store,
            tokens,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 업타임 (초).
    pub fn uptime_secs(&self) -> i64 {
        (chrono::Utc::now() - self.started_at).num_seconds()
    }

    /// 저장소 연결 상태 확인.
    pub async fn is_store_healthy(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "저장소 헬스 체크 실패");
                false
            }
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("started_at", &self.started_at)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// 테스트용 비밀 키.
#[cfg(test)]
pub const TEST_JWT_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

/// 테스트용 AppState 생성.
///
/// 인메모리 저장소와 24시간 토큰 서비스를 사용합니다.
#[cfg(test)]
pub fn create_test_state() -> AppState {
    AppState::new(
        Arc::new(blog_core::MemoryStore::new()),
        TokenService::with_ttl_hours(TEST_JWT_SECRET, TokenService::DEFAULT_TTL_HOURS),
    )
}
