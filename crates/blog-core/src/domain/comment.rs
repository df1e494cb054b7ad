//! 댓글 엔티티.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Author, CommentId, PostId, UserId};

/// 댓글 레코드.
///
/// 부모 게시글(`post_id`)과 작성자(`user_id`)는 생성 시 정해지며 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub comment_id: CommentId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 새 댓글 입력.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: PostId,
    pub user_id: UserId,
    pub comment: String,
}

/// 작성자 닉네임이 포함된 댓글.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: Author,
}
