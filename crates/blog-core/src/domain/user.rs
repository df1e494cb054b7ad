//! 사용자 엔티티.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// 저장된 사용자 레코드.
///
/// 패스워드는 Argon2 PHC 해시로만 보관되며, 이 타입은 직렬화되지 않습니다.
/// 응답에는 [`CurrentUser`]를 사용합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub nickname: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 요청 컨텍스트용 신원 정보로 변환.
    pub fn to_current(&self) -> CurrentUser {
        CurrentUser {
            user_id: self.user_id,
            nickname: self.nickname.clone(),
        }
    }
}

/// 새 사용자 입력 (해시된 패스워드 포함).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub nickname: String,
    pub password_hash: String,
}

/// 인증된 요청자.
///
/// 인증 가드가 검증 후 생성하며, 이후 모든 서비스 호출에 명시적으로 전달됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub user_id: UserId,
    pub nickname: String,
}

/// 작성자 정보 (목록/상세 조회에 포함).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct Author {
    pub nickname: String,
}
