//! 게시글 엔티티.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Author, PostId, UserId};

/// 게시글 레코드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub post_id: PostId,
    /// 작성자 (소유권은 이전되지 않음)
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 새 게시글 입력.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: UserId,
    pub title: String,
    pub content: String,
}

/// 게시글 수정 내용 (검증 완료).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
}

/// 작성자 닉네임이 포함된 게시글.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: Post,
    pub user: Author,
}
