//! 도메인 모델.
//!
//! 사용자, 게시글, 댓글 엔티티와 입력 검증 규칙을 정의합니다.

pub mod comment;
pub mod post;
pub mod resource;
pub mod user;
pub mod validation;

pub use comment::*;
pub use post::*;
pub use resource::*;
pub use user::*;
pub use validation::*;
