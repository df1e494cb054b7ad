//! 댓글 API 라우트
//!
//! 같은 경로 세그먼트가 메서드에 따라 다른 ID를 가리킵니다.
//!
//! # 엔드포인트
//!
//! - `POST /comments/{postId}` - 게시글에 댓글 작성 (인증 필요)
//! - `GET /comments/{postId}` - 게시글의 댓글 목록
//! - `PUT /comments/{commentId}` - 댓글 수정 (작성자만)
//! - `DELETE /comments/{commentId}` - 댓글 삭제 (작성자만)

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use blog_core::{CommentId, CommentWithAuthor, PostId};

use super::MessageResponse;
use crate::auth::AuthUser;
use crate::error::{ApiErrorResponse, ApiResult, Operation};
use crate::extract::JsonBody;
use crate::state::AppState;

/// 댓글 작성/수정 요청
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CommentRequest {
    #[serde(default)]
    pub comment: Option<String>,
}

/// 댓글 목록 응답
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentListResponse {
    pub data: Vec<CommentWithAuthor>,
}

/// POST /comments/{postId} - 댓글 작성
#[utoipa::path(
    post,
    path = "/api/comments/{postId}",
    tag = "comments",
    security(("bearer_auth" = [])),
    params(("postId" = i64, Path, description = "게시글 ID")),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "작성 성공", body = MessageResponse),
        (status = 412, description = "댓글 내용 누락", body = ApiErrorResponse),
        (status = 404, description = "게시글 없음", body = ApiErrorResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse)
    )
)]
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    path: Result<Path<PostId>, PathRejection>,
    body: Result<JsonBody<CommentRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let op = Operation::CreateComment;
    let post_id = op.path(path)?;
    let req = op.body(body)?;

    state
        .comments
        .create(&user, post_id, req.comment.as_deref())
        .await
        .map_err(|e| op.error(e))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("댓글을 작성하였습니다.")),
    ))
}

/// GET /comments/{postId} - 댓글 목록 (최신순)
#[utoipa::path(
    get,
    path = "/api/comments/{postId}",
    tag = "comments",
    params(("postId" = i64, Path, description = "게시글 ID")),
    responses(
        (status = 200, description = "댓글 목록", body = CommentListResponse),
        (status = 400, description = "조회 실패", body = ApiErrorResponse)
    )
)]
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    path: Result<Path<PostId>, PathRejection>,
) -> ApiResult<Json<CommentListResponse>> {
    let op = Operation::ListComments;
    let post_id = op.path(path)?;

    let data = state
        .comments
        .list(post_id)
        .await
        .map_err(|e| op.error(e))?;

    Ok(Json(CommentListResponse { data }))
}

/// PUT /comments/{commentId} - 댓글 수정
#[utoipa::path(
    put,
    path = "/api/comments/{commentId}",
    tag = "comments",
    security(("bearer_auth" = [])),
    params(("commentId" = i64, Path, description = "댓글 ID")),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "수정 성공", body = MessageResponse),
        (status = 412, description = "댓글 내용 누락", body = ApiErrorResponse),
        (status = 404, description = "댓글 없음", body = ApiErrorResponse),
        (status = 400, description = "작성자 아님", body = ApiErrorResponse)
    )
)]
pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    path: Result<Path<CommentId>, PathRejection>,
    body: Result<JsonBody<CommentRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let op = Operation::UpdateComment;
    let comment_id = op.path(path)?;
    let req = op.body(body)?;

    state
        .comments
        .update(&user, comment_id, req.comment.as_deref())
        .await
        .map_err(|e| op.error(e))?;

    Ok(Json(MessageResponse::new("댓글을 수정하였습니다.")))
}

/// DELETE /comments/{commentId} - 댓글 삭제
#[utoipa::path(
    delete,
    path = "/api/comments/{commentId}",
    tag = "comments",
    security(("bearer_auth" = [])),
    params(("commentId" = i64, Path, description = "댓글 ID")),
    responses(
        (status = 200, description = "삭제 성공", body = MessageResponse),
        (status = 404, description = "댓글 없음", body = ApiErrorResponse),
        (status = 400, description = "작성자 아님", body = ApiErrorResponse)
    )
)]
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    path: Result<Path<CommentId>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let op = Operation::DeleteComment;
    let comment_id = op.path(path)?;

    state
        .comments
        .delete(&user, comment_id)
        .await
        .map_err(|e| op.error(e))?;

    Ok(Json(MessageResponse::new("댓글을 삭제하였습니다.")))
}

/// 댓글 라우터 생성.
pub fn comments_router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/{id}",
        get(list_comments)
            .post(create_comment)
            .put(update_comment)
            .delete(delete_comment),
    )
}
