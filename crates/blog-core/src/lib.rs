//! # Blog Core
//!
//! 블로그 백엔드의 핵심 도메인 모델 및 규칙을 제공합니다.
//!
//! 이 크레이트는 HTTP 프레임워크와 무관한 다음 요소를 담습니다:
//! - 사용자/게시글/댓글 엔티티 타입
//! - 회원가입 및 게시글/댓글 입력 검증 규칙
//! - 소유권 검증기 (Ownership Validator)
//! - 저장소 포트 (`BlogStore`) 및 인메모리 구현
//! - 에러 분류 체계
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod ownership;
pub mod store;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use ownership::{ensure_owner, AssertOwnerError, Owned, OwnershipError, OwnershipValidator};
pub use store::{BlogStore, MemoryStore};
