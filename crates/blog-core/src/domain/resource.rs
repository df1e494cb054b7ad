//! 리소스 종류 및 식별자.

use serde::{Deserialize, Serialize};

/// 사용자 ID.
pub type UserId = i64;

/// 게시글 ID.
pub type PostId = i64;

/// 댓글 ID.
pub type CommentId = i64;

/// 리소스 종류.
///
/// 에러 보고와 소유권 검사에서 어떤 엔티티가 대상인지 구분합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// 게시글
    Post,
    /// 댓글
    Comment,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResourceKind::Post => "게시글",
            ResourceKind::Comment => "댓글",
        };
        write!(f, "{}", s)
    }
}
