//! PostgreSQL 저장소.
//!
//! 정적 메서드 Repository들을 [`BlogStore`] 포트로 묶습니다.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use blog_core::{
    BlogStore, Comment, CommentId, CommentWithAuthor, DatabaseConfig, NewComment, NewPost,
    NewUser, Post, PostChanges, PostId, PostWithAuthor, StoreError, User, UserId,
};

use super::{CommentRepository, PostRepository, UserRepository};

/// PostgreSQL 기반 [`BlogStore`] 구현.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// 설정으로 연결 풀을 생성합니다.
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        info!(max_connections = config.max_connections, "데이터베이스 연결 중...");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(url)
            .await?;

        info!("데이터베이스 연결 완료");
        Ok(Self { pool })
    }

    /// 데이터베이스 마이그레이션을 실행합니다.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("데이터베이스 마이그레이션 실행 중...");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("마이그레이션 완료");
        Ok(())
    }
}

#[async_trait]
impl BlogStore for PgStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        Ok(UserRepository::create(&self.pool, new_user).await?.into())
    }

    async fn find_user(&self, user_id: UserId) -> Result<Option<User>, StoreError> {
        Ok(UserRepository::find_by_id(&self.pool, user_id)
            .await?
            .map(Into::into))
    }

    async fn find_user_by_nickname(&self, nickname: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepository::find_by_nickname(&self.pool, nickname)
            .await?
            .map(Into::into))
    }

    async fn create_post(&self, new_post: NewPost) -> Result<Post, StoreError> {
        Ok(PostRepository::create(&self.pool, new_post).await?.into())
    }

    async fn list_posts(&self) -> Result<Vec<PostWithAuthor>, StoreError> {
        Ok(PostRepository::list_with_author(&self.pool)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn find_post(&self, post_id: PostId) -> Result<Option<Post>, StoreError> {
        Ok(PostRepository::find_by_id(&self.pool, post_id)
            .await?
            .map(Into::into))
    }

    async fn find_post_with_author(
        &self,
        post_id: PostId,
    ) -> Result<Option<PostWithAuthor>, StoreError> {
        Ok(PostRepository::find_with_author(&self.pool, post_id)
            .await?
            .map(Into::into))
    }

    async fn update_post(
        &self,
        post_id: PostId,
        owner_id: UserId,
        changes: PostChanges,
    ) -> Result<Option<Post>, StoreError> {
        Ok(
            PostRepository::update_owned(&self.pool, post_id, owner_id, &changes)
                .await?
                .map(Into::into),
        )
    }

    async fn delete_post(&self, post_id: PostId, owner_id: UserId) -> Result<bool, StoreError> {
        Ok(PostRepository::delete_owned(&self.pool, post_id, owner_id).await?)
    }

    async fn create_comment(&self, new_comment: NewComment) -> Result<Comment, StoreError> {
        Ok(CommentRepository::create(&self.pool, new_comment)
            .await?
            .into())
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<CommentWithAuthor>, StoreError> {
        Ok(CommentRepository::list_by_post(&self.pool, post_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn find_comment(&self, comment_id: CommentId) -> Result<Option<Comment>, StoreError> {
        Ok(CommentRepository::find_by_id(&self.pool, comment_id)
            .await?
            .map(Into::into))
    }

    async fn update_comment(
        &self,
        comment_id: CommentId,
        owner_id: UserId,
        comment: String,
    ) -> Result<Option<Comment>, StoreError> {
        Ok(
            CommentRepository::update_owned(&self.pool, comment_id, owner_id, &comment)
                .await?
                .map(Into::into),
        )
    }

    async fn delete_comment(
        &self,
        comment_id: CommentId,
        owner_id: UserId,
    ) -> Result<bool, StoreError> {
        Ok(CommentRepository::delete_owned(&self.pool, comment_id, owner_id).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
