//! 소유권 검증기.
//!
//! 게시글/댓글을 수정하거나 삭제하기 전에 요청자가 해당 리소스의 소유자인지 확인합니다.
//!
//! 존재 여부와 소유 여부는 서로 다른 결과로 보고됩니다.
//! 호출자는 "수정할 대상이 없음"(`NotFound`)과 "수정 권한이 없음"(`Forbidden`)을
//! 구분하여 각각 다른 응답으로 변환할 수 있습니다.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::{Comment, CommentId, Post, PostId, ResourceKind, UserId};
use crate::error::StoreError;
use crate::store::BlogStore;

/// 소유자가 있는 리소스.
pub trait Owned {
    /// 리소스 종류
    const KIND: ResourceKind;

    /// 리소스 ID
    fn id(&self) -> i64;

    /// 소유자 사용자 ID
    fn owner_id(&self) -> UserId;
}

impl Owned for Post {
    const KIND: ResourceKind = ResourceKind::Post;

    fn id(&self) -> i64 {
        self.post_id
    }

    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

impl Owned for Comment {
    const KIND: ResourceKind = ResourceKind::Comment;

    fn id(&self) -> i64 {
        self.comment_id
    }

    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

/// 소유권 검사 결과 에러.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OwnershipError {
    /// 리소스가 존재하지 않음
    #[error("{0}이(가) 존재하지 않습니다.")]
    NotFound(ResourceKind),

    /// 리소스는 존재하지만 요청자가 소유자가 아님
    #[error("{0}의 소유자가 아닙니다.")]
    Forbidden(ResourceKind),
}

/// 조회된 리소스에 대해 소유권 게이트를 적용합니다.
///
/// # Arguments
///
/// * `found` - 저장소 조회 결과 (`None`이면 존재하지 않음)
/// * `actor` - 인증된 요청자 ID
pub fn ensure_owner<R: Owned>(found: Option<R>, actor: UserId) -> Result<R, OwnershipError> {
    let resource = found.ok_or(OwnershipError::NotFound(R::KIND))?;

    if resource.owner_id() != actor {
        return Err(OwnershipError::Forbidden(R::KIND));
    }

    Ok(resource)
}

/// 저장소 조회 에러 또는 소유권 에러.
#[derive(Debug, Error)]
pub enum AssertOwnerError {
    #[error(transparent)]
    Ownership(#[from] OwnershipError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AssertOwnerError> for crate::error::BlogError {
    fn from(err: AssertOwnerError) -> Self {
        match err {
            AssertOwnerError::Ownership(e) => e.into(),
            AssertOwnerError::Store(e) => e.into(),
        }
    }
}

/// 저장소를 통해 리소스를 조회하고 소유권을 확인하는 검증기.
#[derive(Clone)]
pub struct OwnershipValidator {
    store: Arc<dyn BlogStore>,
}

impl OwnershipValidator {
    /// 새 검증기 생성.
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }

    /// 게시글 소유권 확인.
    ///
    /// 소유자이면 수정 대상 게시글을 반환합니다.
    pub async fn assert_post_owner(
        &self,
        post_id: PostId,
        actor: UserId,
    ) -> Result<Post, AssertOwnerError> {
        let found = self.store.find_post(post_id).await?;
        Ok(ensure_owner(found, actor)?)
    }

    /// 댓글 소유권 확인.
    pub async fn assert_comment_owner(
        &self,
        comment_id: CommentId,
        actor: UserId,
    ) -> Result<Comment, AssertOwnerError> {
        let found = self.store.find_comment(comment_id).await?;
        Ok(ensure_owner(found, actor)?)
    }
}
