//! API 에러 응답 타입.
//!
//! 도메인 에러([`BlogError`])를 HTTP 상태 코드와 `{"errorMessage": ...}` 본문으로 변환합니다.
//!
//! # 상태 코드 매핑
//!
//! | 도메인 에러 | 상태 코드 |
//! |---|---|
//! | `Validation` | 412 |
//! | `Unauthenticated` | 401 |
//! | `NotFound` | 404 |
//! | `Forbidden` | 게시글 401, 댓글 400 |
//! | `Store` / `Internal` / 잘못된 본문·경로 | 400 |

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use blog_core::{BlogError, ResourceKind};

use crate::extract::JsonBody;

/// 인증 가드 거부 메시지.
pub const AUTH_REQUIRED_MESSAGE: &str = "로그인 후 이용 가능한 기능입니다.";

/// API 에러 응답.
///
/// ```json
/// { "errorMessage": "게시글이 존재하지 않습니다." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 사람이 읽을 수 있는 에러 메시지
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}

impl ApiErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error_message: message.into(),
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.error_message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// 핸들러 에러 타입 (상태 코드 + 본문).
pub type ApiError = (StatusCode, Json<ApiErrorResponse>);

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;

/// 상태 코드와 메시지로 에러 응답 생성.
pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ApiErrorResponse::new(message)))
}

/// 에러가 발생한 API 작업.
///
/// 같은 도메인 에러라도 작업마다 응답 메시지와 상태 코드가 다르므로
/// 핸들러는 자신의 작업을 지정해 에러를 변환합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Signup,
    Login,
    CreatePost,
    ListPosts,
    GetPost,
    UpdatePost,
    DeletePost,
    CreateComment,
    ListComments,
    UpdateComment,
    DeleteComment,
}

impl Operation {
    /// 예기치 못한 실패(저장소 에러, 잘못된 요청 본문) 시 메시지.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Signup => "요청한 데이터 형식이 올바르지 않습니다.",
            Operation::Login => "로그인에 실패하였습니다.",
            Operation::CreatePost => "게시글 작성에 실패하였습니다.",
            Operation::ListPosts | Operation::GetPost => "게시글 조회에 실패하였습니다.",
            Operation::UpdatePost => "게시글 수정에 실패하였습니다",
            Operation::DeletePost => "게시글 삭제에 실패하였습니다",
            Operation::CreateComment => "댓글 작성에 실패하였습니다.",
            Operation::ListComments => "댓글 조회에 실패하였습니다.",
            Operation::UpdateComment => "댓글 수정에 실패하였습니다.",
            Operation::DeleteComment => "댓글 삭제에 실패하였습니다.",
        }
    }

    /// 소유자가 아닌 요청자에 대한 메시지.
    fn forbidden_message(self, kind: ResourceKind) -> &'static str {
        match (self, kind) {
            (Operation::DeletePost, _) => "게시글이 정상적으로 삭제되지 않았습니다.",
            (Operation::UpdateComment, _) => "댓글 수정이 정상적으로 처리되지 않았습니다.",
            (Operation::DeleteComment, _) => "댓글 삭제가 정상적으로 처리되지 않았습니다.",
            (_, ResourceKind::Comment) => "댓글에 대한 권한이 없습니다.",
            _ => "게시글이 정상적으로 수정되지 않았습니다.",
        }
    }

    /// 도메인 에러를 HTTP 응답으로 변환.
    ///
    /// 저장소/내부 에러는 원인을 error 레벨로 기록하고 작업별 실패 메시지만 응답합니다.
    pub fn error(self, err: BlogError) -> ApiError {
        match err {
            BlogError::Validation(e) => api_error(StatusCode::PRECONDITION_FAILED, e.to_string()),
            BlogError::Unauthenticated => api_error(StatusCode::UNAUTHORIZED, AUTH_REQUIRED_MESSAGE),
            BlogError::NotFound(kind) => api_error(StatusCode::NOT_FOUND, not_found_message(kind)),
            BlogError::Forbidden(kind) => {
                let status = match kind {
                    ResourceKind::Comment => StatusCode::BAD_REQUEST,
                    ResourceKind::Post => StatusCode::UNAUTHORIZED,
                };
                api_error(status, self.forbidden_message(kind))
            }
            BlogError::Store(e) => {
                tracing::error!(operation = ?self, error = %e, "저장소 에러");
                api_error(StatusCode::BAD_REQUEST, self.failure_message())
            }
            BlogError::Internal(e) => {
                tracing::error!(operation = ?self, error = %e, "내부 에러");
                api_error(StatusCode::BAD_REQUEST, self.failure_message())
            }
        }
    }

    /// JSON 본문 추출 실패를 응답으로 변환.
    pub fn body_rejection(self, rejection: JsonRejection) -> ApiError {
        tracing::debug!(operation = ?self, error = %rejection.body_text(), "잘못된 요청 본문");
        api_error(StatusCode::BAD_REQUEST, self.failure_message())
    }

    /// 경로 파라미터 추출 실패를 응답으로 변환.
    pub fn path_rejection(self, rejection: PathRejection) -> ApiError {
        tracing::debug!(operation = ?self, error = %rejection.body_text(), "잘못된 경로 파라미터");
        api_error(StatusCode::BAD_REQUEST, self.failure_message())
    }

    /// 추출 결과에서 JSON 본문을 꺼냅니다.
    pub fn json<T>(self, body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
        body.map(|Json(value)| value)
            .map_err(|rejection| self.body_rejection(rejection))
    }

    /// 비어 있을 수 있는 본문을 꺼냅니다.
    pub fn body<T>(self, body: Result<JsonBody<T>, JsonRejection>) -> ApiResult<T> {
        body.map(|JsonBody(value)| value)
            .map_err(|rejection| self.body_rejection(rejection))
    }

    /// 추출 결과에서 경로 파라미터를 꺼냅니다.
    pub fn path<T>(self, path: Result<axum::extract::Path<T>, PathRejection>) -> ApiResult<T> {
        path.map(|axum::extract::Path(value)| value)
            .map_err(|rejection| self.path_rejection(rejection))
    }
}

fn not_found_message(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Post => "게시글이 존재하지 않습니다.",
        ResourceKind::Comment => "댓글이 존재하지 않습니다.",
    }
}
