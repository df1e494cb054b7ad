//! 게시글 서비스.

use std::sync::Arc;

use tracing::info;

use blog_core::{
    validate_post_fields, BlogError, BlogResult, BlogStore, CurrentUser, NewPost,
    OwnershipValidator, Post, PostId, PostWithAuthor, ResourceKind,
};

use crate::metrics::record_post;

/// 게시글 서비스.
///
/// 수정/삭제는 필드 검증 → 소유권 확인 → 소유자 조건부 변경 순서로 처리됩니다.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn BlogStore>,
    ownership: OwnershipValidator,
}

impl PostService {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self {
            ownership: OwnershipValidator::new(Arc::clone(&store)),
            store,
        }
    }

    /// 게시글 작성.
    pub async fn create(
        &self,
        actor: &CurrentUser,
        title: Option<&str>,
        content: Option<&str>,
    ) -> BlogResult<Post> {
        let fields = validate_post_fields(title, content)?;

        let post = self
            .store
            .create_post(NewPost {
                user_id: actor.user_id,
                title: fields.title,
                content: fields.content,
            })
            .await?;

        info!(user_id = actor.user_id, post_id = post.post_id, "게시글 작성");
        record_post("create");

        Ok(post)
    }

    /// 전체 게시글 목록 (최신순, 작성자 닉네임 포함).
    pub async fn list(&self) -> BlogResult<Vec<PostWithAuthor>> {
        Ok(self.store.list_posts().await?)
    }

    /// 게시글 상세 조회.
    pub async fn get(&self, post_id: PostId) -> BlogResult<PostWithAuthor> {
        self.store
            .find_post_with_author(post_id)
            .await?
            .ok_or(BlogError::NotFound(ResourceKind::Post))
    }

    /// 게시글 수정.
    pub async fn update(
        &self,
        actor: &CurrentUser,
        post_id: PostId,
        title: Option<&str>,
        content: Option<&str>,
    ) -> BlogResult<Post> {
        let changes = validate_post_fields(title, content)?;

        self.ownership
            .assert_post_owner(post_id, actor.user_id)
            .await?;

        // 확인 이후 삭제된 경우
        let post = self
            .store
            .update_post(post_id, actor.user_id, changes)
            .await?
            .ok_or(BlogError::NotFound(ResourceKind::Post))?;

        info!(user_id = actor.user_id, post_id, "게시글 수정");
        record_post("update");

        Ok(post)
    }

    /// 게시글 삭제. 딸린 댓글도 함께 삭제됩니다.
    pub async fn delete(&self, actor: &CurrentUser, post_id: PostId) -> BlogResult<()> {
        self.ownership
            .assert_post_owner(post_id, actor.user_id)
            .await?;

        if !self.store.delete_post(post_id, actor.user_id).await? {
            return Err(BlogError::NotFound(ResourceKind::Post));
        }

        info!(user_id = actor.user_id, post_id, "게시글 삭제");
        record_post("delete");

        Ok(())
    }
}
