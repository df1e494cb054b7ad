//! User Repository
//!
//! 사용자 관련 데이터베이스 연산을 담당합니다.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use blog_core::{NewUser, User, UserId};

/// 사용자 레코드
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub user_id: i64,
    pub nickname: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        Self {
            user_id: r.user_id,
            nickname: r.nickname,
            password_hash: r.password_hash,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// User Repository
pub struct UserRepository;

impl UserRepository {
    /// 사용자 생성. 닉네임이 중복되면 유일성 제약 위반 에러를 반환합니다.
    pub async fn create(pool: &PgPool, input: NewUser) -> Result<UserRecord, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (nickname, password_hash)
            VALUES ($1, $2)
            RETURNING user_id, nickname, password_hash, created_at, updated_at
            "#,
        )
        .bind(&input.nickname)
        .bind(&input.password_hash)
        .fetch_one(pool)
        .await
    }

    /// ID로 사용자 조회
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT user_id, nickname, password_hash, created_at, updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// 닉네임으로 사용자 조회
    pub async fn find_by_nickname(
        pool: &PgPool,
        nickname: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT user_id, nickname, password_hash, created_at, updated_at
            FROM users
            WHERE nickname = $1
            "#,
        )
        .bind(nickname)
        .fetch_optional(pool)
        .await
    }
}
