//! Repository pattern for database operations.
//!
//! 데이터베이스 접근 로직을 서비스에서 분리하여 관리합니다.
//! 모든 Repository는 static methods 패턴을 사용하며,
//! [`PgStore`]가 이를 [`blog_core::BlogStore`] 포트로 노출합니다.

pub mod comments;
pub mod pg_store;
pub mod posts;
pub mod users;

pub use comments::{CommentRecord, CommentRepository, CommentWithAuthorRecord};
pub use pg_store::PgStore;
pub use posts::{PostRecord, PostRepository, PostWithAuthorRecord};
pub use users::{UserRecord, UserRepository};
