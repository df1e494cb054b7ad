//! Comment Repository
//!
//! 댓글 관련 데이터베이스 연산을 담당합니다.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use blog_core::{Author, Comment, CommentId, CommentWithAuthor, NewComment, PostId, UserId};

/// 댓글 레코드
#[derive(Debug, Clone, FromRow)]
pub struct CommentRecord {
    pub comment_id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CommentRecord> for Comment {
    fn from(r: CommentRecord) -> Self {
        Self {
            comment_id: r.comment_id,
            post_id: r.post_id,
            user_id: r.user_id,
            comment: r.comment,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// 댓글 + 작성자 닉네임
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthorRecord {
    #[sqlx(flatten)]
    pub comment: CommentRecord,
    pub nickname: String,
}

impl From<CommentWithAuthorRecord> for CommentWithAuthor {
    fn from(r: CommentWithAuthorRecord) -> Self {
        Self {
            comment: r.comment.into(),
            user: Author {
                nickname: r.nickname,
            },
        }
    }
}

/// Comment Repository
pub struct CommentRepository;

impl CommentRepository {
    /// 댓글 생성. 게시글이 없으면 외래 키 위반 에러를 반환합니다.
    pub async fn create(pool: &PgPool, input: NewComment) -> Result<CommentRecord, sqlx::Error> {
        sqlx::query_as::<_, CommentRecord>(
            r#"
            INSERT INTO comments (post_id, user_id, comment)
            VALUES ($1, $2, $3)
            RETURNING comment_id, post_id, user_id, comment, created_at, updated_at
            "#,
        )
        .bind(input.post_id)
        .bind(input.user_id)
        .bind(&input.comment)
        .fetch_one(pool)
        .await
    }

    /// 게시글의 댓글 조회 (최신순)
    pub async fn list_by_post(
        pool: &PgPool,
        post_id: PostId,
    ) -> Result<Vec<CommentWithAuthorRecord>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthorRecord>(
            r#"
            SELECT
                c.comment_id, c.post_id, c.user_id, c.comment, c.created_at, c.updated_at,
                u.nickname
            FROM comments c
            JOIN users u ON u.user_id = c.user_id
            WHERE c.post_id = $1
            ORDER BY c.created_at DESC, c.comment_id DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(pool)
        .await
    }

    /// ID로 댓글 조회
    pub async fn find_by_id(
        pool: &PgPool,
        comment_id: CommentId,
    ) -> Result<Option<CommentRecord>, sqlx::Error> {
        sqlx::query_as::<_, CommentRecord>(
            r#"
            SELECT comment_id, post_id, user_id, comment, created_at, updated_at
            FROM comments
            WHERE comment_id = $1
            "#,
        )
        .bind(comment_id)
        .fetch_optional(pool)
        .await
    }

    /// 작성자 조건부 수정
    pub async fn update_owned(
        pool: &PgPool,
        comment_id: CommentId,
        owner_id: UserId,
        comment: &str,
    ) -> Result<Option<CommentRecord>, sqlx::Error> {
        sqlx::query_as::<_, CommentRecord>(
            r#"
            UPDATE comments
            SET comment = $3, updated_at = NOW()
            WHERE comment_id = $1 AND user_id = $2
            RETURNING comment_id, post_id, user_id, comment, created_at, updated_at
            "#,
        )
        .bind(comment_id)
        .bind(owner_id)
        .bind(comment)
        .fetch_optional(pool)
        .await
    }

    /// 작성자 조건부 삭제
    pub async fn delete_owned(
        pool: &PgPool,
        comment_id: CommentId,
        owner_id: UserId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1 AND user_id = $2")
            .bind(comment_id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
