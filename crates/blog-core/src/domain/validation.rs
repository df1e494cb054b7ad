//! 입력 검증 규칙.
//!
//! 회원가입, 게시글, 댓글 입력에 대한 필드 규칙을 정의합니다.
//! 모든 규칙은 고정된 순서로 실행되며 첫 번째 실패에서 중단됩니다.

use once_cell::sync::Lazy;
use regex::Regex;

use super::PostChanges;
use crate::error::ValidationError;

// 첫 글자는 영문/숫자, 이후 문자는 제한 없음 (개행 제외)
static NICKNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9].{2,}$").expect("hardcoded nickname regex is invalid")
});

static PASSWORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9].{3,}$").expect("hardcoded password regex is invalid")
});

/// 닉네임 형식 검사 (첫 글자 영문/숫자, 총 3자 이상).
pub fn is_valid_nickname(nickname: &str) -> bool {
    NICKNAME_REGEX.is_match(nickname)
}

/// 패스워드 형식 검사 (첫 글자 영문/숫자, 총 4자 이상).
pub fn is_valid_password(password: &str) -> bool {
    PASSWORD_REGEX.is_match(password)
}

/// 회원가입 입력 검증.
///
/// 검사 순서:
/// 1. 닉네임 형식
/// 2. 패스워드 형식
/// 3. 패스워드에 닉네임 포함 여부
/// 4. 패스워드 확인 값 일치
///
/// 닉네임 중복 검사는 저장소 조회가 필요하므로 서비스 계층에서 수행합니다.
pub fn validate_signup(nickname: &str, password: &str, confirm: &str) -> Result<(), ValidationError> {
    if !is_valid_nickname(nickname) {
        return Err(ValidationError::InvalidNickname);
    }

    if !is_valid_password(password) {
        return Err(ValidationError::InvalidPassword);
    }

    if password.contains(nickname) {
        return Err(ValidationError::PasswordContainsNickname);
    }

    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }

    Ok(())
}

/// 게시글 입력 검증.
///
/// 두 필드가 모두 없으면 본문 자체가 잘못된 것으로 보고,
/// 그 외에는 제목, 내용 순으로 비어 있는지 확인합니다.
pub fn validate_post_fields(
    title: Option<&str>,
    content: Option<&str>,
) -> Result<PostChanges, ValidationError> {
    if title.is_none() && content.is_none() {
        return Err(ValidationError::EmptyBody);
    }

    let title = non_empty(title).ok_or(ValidationError::MissingTitle)?;
    let content = non_empty(content).ok_or(ValidationError::MissingContent)?;

    Ok(PostChanges {
        title: title.to_string(),
        content: content.to_string(),
    })
}

/// 댓글 입력 검증.
pub fn validate_comment_text(comment: Option<&str>) -> Result<String, ValidationError> {
    match comment {
        None => Err(ValidationError::EmptyBody),
        Some(text) => non_empty(Some(text))
            .map(str::to_string)
            .ok_or(ValidationError::MissingComment),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_signup() {
        assert!(validate_signup("abc123", "abcd9999", "abcd9999").is_ok());
    }

    #[test]
    fn test_nickname_rules() {
        assert!(is_valid_nickname("abc"));
        assert!(is_valid_nickname("a__"));
        assert!(is_valid_nickname("9-한글"));
        assert!(!is_valid_nickname("ab"));
        assert!(!is_valid_nickname("_abc"));
        assert!(!is_valid_nickname(""));
        assert!(!is_valid_nickname("ab\nc"));
    }

    #[test]
    fn test_password_rules() {
        assert!(is_valid_password("abcd"));
        assert!(is_valid_password("1!@#"));
        assert!(!is_valid_password("abc"));
        assert!(!is_valid_password("!abcd"));
    }

    #[test]
    fn test_signup_check_order() {
        // 닉네임과 패스워드가 모두 잘못되면 닉네임 에러가 먼저
        assert_eq!(
            validate_signup("_x", "!", "?"),
            Err(ValidationError::InvalidNickname)
        );
        // 패스워드 형식이 잘못되면 포함 여부보다 먼저
        assert_eq!(
            validate_signup("abc", "!abc", "!abc"),
            Err(ValidationError::InvalidPassword)
        );
        // 닉네임 포함이 확인 값 불일치보다 먼저
        assert_eq!(
            validate_signup("abc", "xabcx", "other"),
            Err(ValidationError::PasswordContainsNickname)
        );
    }

    #[test]
    fn test_nickname_substring_is_literal() {
        // 정규식 메타문자가 포함된 닉네임도 문자열 그대로 비교
        assert!(validate_signup("a.c", "abcd1234", "abcd1234").is_ok());
        assert_eq!(
            validate_signup("a.c", "xxa.cxx", "xxa.cxx"),
            Err(ValidationError::PasswordContainsNickname)
        );
    }

    #[test]
    fn test_post_fields() {
        assert_eq!(
            validate_post_fields(None, None),
            Err(ValidationError::EmptyBody)
        );
        assert_eq!(
            validate_post_fields(None, Some("c")),
            Err(ValidationError::MissingTitle)
        );
        assert_eq!(
            validate_post_fields(Some(""), Some("c")),
            Err(ValidationError::MissingTitle)
        );
        assert_eq!(
            validate_post_fields(Some("t"), None),
            Err(ValidationError::MissingContent)
        );

        let changes = validate_post_fields(Some("t"), Some("c")).unwrap();
        assert_eq!(changes.title, "t");
        assert_eq!(changes.content, "c");
    }

    #[test]
    fn test_comment_text() {
        assert_eq!(validate_comment_text(None), Err(ValidationError::EmptyBody));
        assert_eq!(
            validate_comment_text(Some("")),
            Err(ValidationError::MissingComment)
        );
        assert_eq!(validate_comment_text(Some("nice")).unwrap(), "nice");
    }

    proptest! {
        #[test]
        fn prop_nickname_with_non_alnum_first_char_rejected(
            nickname in "[^a-zA-Z0-9\n][a-z0-9]{2,10}",
        ) {
            prop_assert_eq!(
                validate_signup(&nickname, "zzzz9999", "zzzz9999"),
                Err(ValidationError::InvalidNickname)
            );
        }

        #[test]
        fn prop_short_nickname_rejected(nickname in "[a-zA-Z0-9]{0,2}") {
            prop_assert_eq!(
                validate_signup(&nickname, "zzzz9999", "zzzz9999"),
                Err(ValidationError::InvalidNickname)
            );
        }

        #[test]
        fn prop_password_containing_nickname_rejected(
            nickname in "[a-z][a-z0-9]{2,8}",
            prefix in "[a-z0-9]{1,3}",
            suffix in "[a-z0-9]{0,3}",
        ) {
            let password = format!("{prefix}{nickname}{suffix}");
            prop_assert_eq!(
                validate_signup(&nickname, &password, &password),
                Err(ValidationError::PasswordContainsNickname)
            );
        }

        #[test]
        fn prop_confirm_mismatch_rejected(
            nickname in "[a-z]{3,8}",
            password in "[0-9]{4,10}",
        ) {
            let confirm = format!("{password}x");
            prop_assert_eq!(
                validate_signup(&nickname, &password, &confirm),
                Err(ValidationError::PasswordMismatch)
            );
        }
    }
}
