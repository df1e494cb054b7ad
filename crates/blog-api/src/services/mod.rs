//! 엔티티 서비스 모듈.
//!
//! 사용자/게시글/댓글의 비즈니스 규칙을 담당합니다.
//! 인증된 요청자([`blog_core::CurrentUser`])는 항상 명시적 인자로 전달됩니다.

pub mod comments;
pub mod posts;
pub mod users;

pub use comments::CommentService;
pub use posts::PostService;
pub use users::UserService;
