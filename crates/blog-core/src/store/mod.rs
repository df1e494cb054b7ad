//! 저장소 포트.
//!
//! 관계형 저장소에 대한 추상화를 제공합니다.
//! PostgreSQL 구현은 API 크레이트에, 인메모리 구현은 [`memory`] 모듈에 있습니다.
//!
//! # 변경 연산의 조건부 실행
//!
//! 수정/삭제 연산은 리소스 ID와 소유자 ID를 함께 조건으로 받습니다.
//! 소유권 확인 이후 리소스가 삭제된 경우 `None`/`false`를 반환하므로,
//! 호출자는 이를 `NotFound`로 보고할 수 있습니다.

pub mod memory;

use async_trait::async_trait;

use crate::domain::{
    Comment, CommentId, CommentWithAuthor, NewComment, NewPost, NewUser, Post, PostChanges,
    PostId, PostWithAuthor, User, UserId,
};
use crate::error::StoreError;

pub use memory::MemoryStore;

/// 블로그 저장소 trait.
///
/// # 구현 예시
///
/// ```ignore
/// pub struct PgStore {
///     pool: PgPool,
/// }
///
/// #[async_trait]
/// impl BlogStore for PgStore {
///     async fn find_user(&self, user_id: UserId) -> Result<Option<User>, StoreError> {
///         UserRepository::find_by_id(&self.pool, user_id).await
///     }
///
///     // ... 나머지 메서드 구현
/// }
/// ```
#[async_trait]
pub trait BlogStore: Send + Sync {
    // ==================== Users ====================

    /// 사용자 생성.
    ///
    /// # Errors
    ///
    /// - `StoreError::Duplicate`: 닉네임이 이미 존재함
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// ID로 사용자 조회.
    async fn find_user(&self, user_id: UserId) -> Result<Option<User>, StoreError>;

    /// 닉네임으로 사용자 조회.
    async fn find_user_by_nickname(&self, nickname: &str) -> Result<Option<User>, StoreError>;

    // ==================== Posts ====================

    /// 게시글 생성.
    async fn create_post(&self, new_post: NewPost) -> Result<Post, StoreError>;

    /// 전체 게시글 목록 (최신순, 작성자 닉네임 포함).
    async fn list_posts(&self) -> Result<Vec<PostWithAuthor>, StoreError>;

    /// ID로 게시글 조회.
    async fn find_post(&self, post_id: PostId) -> Result<Option<Post>, StoreError>;

    /// ID로 게시글 상세 조회 (작성자 닉네임 포함).
    async fn find_post_with_author(
        &self,
        post_id: PostId,
    ) -> Result<Option<PostWithAuthor>, StoreError>;

    /// 소유자 조건부 게시글 수정.
    ///
    /// 조건에 맞는 게시글이 없으면 `None`을 반환합니다.
    async fn update_post(
        &self,
        post_id: PostId,
        owner_id: UserId,
        changes: PostChanges,
    ) -> Result<Option<Post>, StoreError>;

    /// 소유자 조건부 게시글 삭제 (댓글도 함께 삭제).
    ///
    /// 삭제된 행이 있으면 `true`를 반환합니다.
    async fn delete_post(&self, post_id: PostId, owner_id: UserId) -> Result<bool, StoreError>;

    // ==================== Comments ====================

    /// 댓글 생성.
    ///
    /// # Errors
    ///
    /// - `StoreError::MissingReference`: 부모 게시글이 존재하지 않음
    async fn create_comment(&self, new_comment: NewComment) -> Result<Comment, StoreError>;

    /// 게시글의 댓글 목록 (최신순, 작성자 닉네임 포함).
    async fn list_comments(&self, post_id: PostId) -> Result<Vec<CommentWithAuthor>, StoreError>;

    /// ID로 댓글 조회.
    async fn find_comment(&self, comment_id: CommentId) -> Result<Option<Comment>, StoreError>;

    /// 소유자 조건부 댓글 수정.
    async fn update_comment(
        &self,
        comment_id: CommentId,
        owner_id: UserId,
        comment: String,
    ) -> Result<Option<Comment>, StoreError>;

    /// 소유자 조건부 댓글 삭제.
    async fn delete_comment(
        &self,
        comment_id: CommentId,
        owner_id: UserId,
    ) -> Result<bool, StoreError>;

    // ==================== Health ====================

    /// 저장소 연결 상태 확인.
    async fn ping(&self) -> Result<(), StoreError>;
}
