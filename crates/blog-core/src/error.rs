//! 블로그 시스템의 에러 타입.
//!
//! 이 모듈은 도메인 계층 전반에서 사용되는 에러 분류 체계를 정의합니다.
//! HTTP 상태 코드로의 변환은 API 크레이트가 담당합니다.

use thiserror::Error;

use crate::domain::ResourceKind;
use crate::ownership::OwnershipError;

/// 입력 검증 에러.
///
/// 각 규칙마다 구분되는 메시지를 가지며, 첫 번째로 실패한 규칙만 보고됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 닉네임 형식 불일치 (첫 글자 영문/숫자, 3자 이상)
    #[error("ID의 형식이 일치하지 않습니다.")]
    InvalidNickname,

    /// 패스워드 형식 불일치 (첫 글자 영문/숫자, 4자 이상)
    #[error("패스워드 형식이 일치하지 않습니다.")]
    InvalidPassword,

    /// 패스워드에 닉네임이 포함됨
    #[error("패스워드에 닉네임이 포함되어 있습니다.")]
    PasswordContainsNickname,

    /// 패스워드와 확인 값이 다름
    #[error("패스워드가 일치하지 않습니다.")]
    PasswordMismatch,

    /// 이미 사용 중인 닉네임
    #[error("중복된 닉네임입니다.")]
    DuplicateNickname,

    /// 로그인 자격 증명 불일치
    #[error("닉네임 또는 패스워드를 확인해주세요.")]
    CredentialMismatch,

    /// 요청 본문에 기대한 필드가 하나도 없음
    #[error("데이터 형식이 올바르지 않습니다.")]
    EmptyBody,

    /// 게시글 제목 누락
    #[error("게시글 제목의 형식이 일치하지 않습니다.")]
    MissingTitle,

    /// 게시글 내용 누락
    #[error("게시글 내용의 형식이 일치하지 않습니다.")]
    MissingContent,

    /// 댓글 내용 누락
    #[error("댓글 내용의 형식이 일치하지 않습니다.")]
    MissingComment,
}

/// 저장소 에러.
#[derive(Debug, Error)]
pub enum StoreError {
    /// 유일성 제약 위반 (제약 이름 또는 필드)
    #[error("중복된 값: {0}")]
    Duplicate(String),

    /// 참조 대상이 존재하지 않음 (외래 키 위반)
    #[error("참조 대상 없음: {0}")]
    MissingReference(String),

    /// 기타 저장소 백엔드 에러
    #[error("저장소 에러: {0}")]
    Backend(String),
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            let constraint = db.constraint().unwrap_or_default().to_string();
            if db.is_unique_violation() {
                return StoreError::Duplicate(constraint);
            }
            if db.is_foreign_key_violation() {
                return StoreError::MissingReference(constraint);
            }
        }
        StoreError::Backend(err.to_string())
    }
}

/// 핵심 블로그 에러.
#[derive(Debug, Error)]
pub enum BlogError {
    /// 입력 검증 실패
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 자격 증명이 없거나 유효하지 않음
    #[error("인증이 필요합니다")]
    Unauthenticated,

    /// 리소스가 존재하지 않음
    #[error("{0}이(가) 존재하지 않습니다.")]
    NotFound(ResourceKind),

    /// 리소스는 존재하지만 요청자가 소유자가 아님
    #[error("{0}에 대한 권한이 없습니다.")]
    Forbidden(ResourceKind),

    /// 저장소 에러
    #[error(transparent)]
    Store(#[from] StoreError),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 블로그 작업을 위한 Result 타입.
pub type BlogResult<T> = Result<T, BlogError>;

impl From<OwnershipError> for BlogError {
    fn from(err: OwnershipError) -> Self {
        match err {
            OwnershipError::NotFound(kind) => BlogError::NotFound(kind),
            OwnershipError::Forbidden(kind) => BlogError::Forbidden(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_distinct() {
        let all = [
            ValidationError::InvalidNickname,
            ValidationError::InvalidPassword,
            ValidationError::PasswordContainsNickname,
            ValidationError::PasswordMismatch,
            ValidationError::DuplicateNickname,
        ];

        let mut messages: Vec<String> = all.iter().map(|e| e.to_string()).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), all.len());
    }

    #[test]
    fn test_ownership_error_conversion_keeps_kind() {
        let not_found: BlogError = OwnershipError::NotFound(ResourceKind::Post).into();
        assert!(matches!(not_found, BlogError::NotFound(ResourceKind::Post)));

        let forbidden: BlogError = OwnershipError::Forbidden(ResourceKind::Comment).into();
        assert!(matches!(forbidden, BlogError::Forbidden(ResourceKind::Comment)));
    }
}
