//! Post Repository
//!
//! 게시글 관련 데이터베이스 연산을 담당합니다.
//! 수정/삭제는 게시글 ID와 작성자 ID를 함께 조건으로 사용합니다.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use blog_core::{Author, NewPost, Post, PostChanges, PostId, PostWithAuthor, UserId};

// ================================================================================================
// Types
// ================================================================================================

/// 게시글 레코드
#[derive(Debug, Clone, FromRow)]
pub struct PostRecord {
    pub post_id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostRecord> for Post {
    fn from(r: PostRecord) -> Self {
        Self {
            post_id: r.post_id,
            user_id: r.user_id,
            title: r.title,
            content: r.content,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// 게시글 + 작성자 닉네임
#[derive(Debug, Clone, FromRow)]
pub struct PostWithAuthorRecord {
    #[sqlx(flatten)]
    pub post: PostRecord,
    pub nickname: String,
}

impl From<PostWithAuthorRecord> for PostWithAuthor {
    fn from(r: PostWithAuthorRecord) -> Self {
        Self {
            post: r.post.into(),
            user: Author {
                nickname: r.nickname,
            },
        }
    }
}

// ================================================================================================
// Repository
// ================================================================================================

/// Post Repository
pub struct PostRepository;

impl PostRepository {
    /// 게시글 생성
    pub async fn create(pool: &PgPool, input: NewPost) -> Result<PostRecord, sqlx::Error> {
        sqlx::query_as::<_, PostRecord>(
            r#"
            INSERT INTO posts (user_id, title, content)
            VALUES ($1, $2, $3)
            RETURNING post_id, user_id, title, content, created_at, updated_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.title)
        .bind(&input.content)
        .fetch_one(pool)
        .await
    }

    /// 전체 게시글 조회 (최신순)
    pub async fn list_with_author(pool: &PgPool) -> Result<Vec<PostWithAuthorRecord>, sqlx::Error> {
        sqlx::query_as::<_, PostWithAuthorRecord>(
            r#"
            SELECT
                p.post_id, p.user_id, p.title, p.content, p.created_at, p.updated_at,
                u.nickname
            FROM posts p
            JOIN users u ON u.user_id = p.user_id
            ORDER BY p.created_at DESC, p.post_id DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// ID로 게시글 조회
    pub async fn find_by_id(
        pool: &PgPool,
        post_id: PostId,
    ) -> Result<Option<PostRecord>, sqlx::Error> {
        sqlx::query_as::<_, PostRecord>(
            r#"
            SELECT post_id, user_id, title, content, created_at, updated_at
            FROM posts
            WHERE post_id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(pool)
        .await
    }

    /// ID로 게시글 조회 (작성자 닉네임 포함)
    pub async fn find_with_author(
        pool: &PgPool,
        post_id: PostId,
    ) -> Result<Option<PostWithAuthorRecord>, sqlx::Error> {
        sqlx::query_as::<_, PostWithAuthorRecord>(
            r#"
            SELECT
                p.post_id, p.user_id, p.title, p.content, p.created_at, p.updated_at,
                u.nickname
            FROM posts p
            JOIN users u ON u.user_id = p.user_id
            WHERE p.post_id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(pool)
        .await
    }

    /// 작성자 조건부 수정. 대상 행이 없으면 `None`.
    pub async fn update_owned(
        pool: &PgPool,
        post_id: PostId,
        owner_id: UserId,
        changes: &PostChanges,
    ) -> Result<Option<PostRecord>, sqlx::Error> {
        sqlx::query_as::<_, PostRecord>(
            r#"
            UPDATE posts
            SET title = $3, content = $4, updated_at = NOW()
            WHERE post_id = $1 AND user_id = $2
            RETURNING post_id, user_id, title, content, created_at, updated_at
            "#,
        )
        .bind(post_id)
        .bind(owner_id)
        .bind(&changes.title)
        .bind(&changes.content)
        .fetch_optional(pool)
        .await
    }

    /// 작성자 조건부 삭제. 삭제된 행이 있으면 `true`.
    pub async fn delete_owned(
        pool: &PgPool,
        post_id: PostId,
        owner_id: UserId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
