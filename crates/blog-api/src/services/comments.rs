//! 댓글 서비스.

use std::sync::Arc;

use tracing::info;

use blog_core::{
    validate_comment_text, BlogError, BlogResult, BlogStore, Comment, CommentId,
    CommentWithAuthor, CurrentUser, NewComment, OwnershipValidator, PostId, ResourceKind,
    StoreError,
};

use crate::metrics::record_comment;

/// 댓글 서비스.
#[derive(Clone)]
pub struct CommentService {
    store: Arc<dyn BlogStore>,
    ownership: OwnershipValidator,
}

impl CommentService {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self {
            ownership: OwnershipValidator::new(Arc::clone(&store)),
            store,
        }
    }

    /// 댓글 작성.
    ///
    /// 부모 게시글이 없으면 `NotFound(Post)`를 반환합니다.
    pub async fn create(
        &self,
        actor: &CurrentUser,
        post_id: PostId,
        comment: Option<&str>,
    ) -> BlogResult<Comment> {
        let text = validate_comment_text(comment)?;

        if self.store.find_post(post_id).await?.is_none() {
            return Err(BlogError::NotFound(ResourceKind::Post));
        }

        let comment = self
            .store
            .create_comment(NewComment {
                post_id,
                user_id: actor.user_id,
                comment: text,
            })
            .await
            .map_err(|e| match e {
                // 확인 이후 게시글이 삭제된 경우
                StoreError::MissingReference(_) => BlogError::NotFound(ResourceKind::Post),
                other => other.into(),
            })?;

        info!(
            user_id = actor.user_id,
            post_id,
            comment_id = comment.comment_id,
            "댓글 작성"
        );
        record_comment("create");

        Ok(comment)
    }

    /// 게시글의 댓글 목록 (최신순, 작성자 닉네임 포함).
    pub async fn list(&self, post_id: PostId) -> BlogResult<Vec<CommentWithAuthor>> {
        Ok(self.store.list_comments(post_id).await?)
    }

    /// 댓글 수정.
    pub async fn update(
        &self,
        actor: &CurrentUser,
        comment_id: CommentId,
        comment: Option<&str>,
    ) -> BlogResult<Comment> {
        let text = validate_comment_text(comment)?;

        self.ownership
            .assert_comment_owner(comment_id, actor.user_id)
            .await?;

        let comment = self
            .store
            .update_comment(comment_id, actor.user_id, text)
            .await?
            .ok_or(BlogError::NotFound(ResourceKind::Comment))?;

        info!(user_id = actor.user_id, comment_id, "댓글 수정");
        record_comment("update");

        Ok(comment)
    }

    /// 댓글 삭제.
    pub async fn delete(&self, actor: &CurrentUser, comment_id: CommentId) -> BlogResult<()> {
        self.ownership
            .assert_comment_owner(comment_id, actor.user_id)
            .await?;

        if !self.store.delete_comment(comment_id, actor.user_id).await? {
            return Err(BlogError::NotFound(ResourceKind::Comment));
        }

        info!(user_id = actor.user_id, comment_id, "댓글 삭제");
        record_comment("delete");

        Ok(())
    }
}
