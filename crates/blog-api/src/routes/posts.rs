//! 게시글 API 라우트
//!
//! # 엔드포인트
//!
//! - `POST /posts` - 게시글 작성 (인증 필요)
//! - `GET /posts` - 게시글 목록
//! - `GET /posts/{id}` - 게시글 상세
//! - `PUT /posts/{id}` - 게시글 수정 (작성자만)
//! - `DELETE /posts/{id}` - 게시글 삭제 (작성자만)

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

use blog_core::{PostId, PostWithAuthor};

use super::MessageResponse;
use crate::auth::AuthUser;
use crate::error::{ApiErrorResponse, ApiResult, Operation};
use crate::extract::JsonBody;
use crate::state::AppState;

// ================================================================================================
// Request/Response Types
// ================================================================================================

/// 게시글 작성/수정 요청
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// 게시글 목록 응답
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostListResponse {
    pub data: Vec<PostWithAuthor>,
}

/// 게시글 상세 응답
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostDetailResponse {
    pub data: PostWithAuthor,
}

// ================================================================================================
// Handlers
// ================================================================================================

/// POST /posts - 게시글 작성
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(("bearer_auth" = [])),
    request_body = PostRequest,
    responses(
        (status = 201, description = "작성 성공", body = MessageResponse),
        (status = 412, description = "제목/내용 누락", body = ApiErrorResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse)
    )
)]
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    body: Result<JsonBody<PostRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let op = Operation::CreatePost;
    let req = op.body(body)?;

    state
        .posts
        .create(&user, req.title.as_deref(), req.content.as_deref())
        .await
        .map_err(|e| op.error(e))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("게시글 작성에 성공하였습니다.")),
    ))
}

/// GET /posts - 게시글 목록 (최신순)
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    responses(
        (status = 200, description = "게시글 목록", body = PostListResponse),
        (status = 400, description = "조회 실패", body = ApiErrorResponse)
    )
)]
pub async fn list_posts(State(state): State<Arc<AppState>>) -> ApiResult<Json<PostListResponse>> {
    let op = Operation::ListPosts;
    let data = state.posts.list().await.map_err(|e| op.error(e))?;

    Ok(Json(PostListResponse { data }))
}

/// GET /posts/{id} - 게시글 상세
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(("id" = i64, Path, description = "게시글 ID")),
    responses(
        (status = 200, description = "게시글 상세", body = PostDetailResponse),
        (status = 404, description = "게시글 없음", body = ApiErrorResponse)
    )
)]
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    path: Result<Path<PostId>, PathRejection>,
) -> ApiResult<Json<PostDetailResponse>> {
    let op = Operation::GetPost;
    let post_id = op.path(path)?;

    let data = state.posts.get(post_id).await.map_err(|e| op.error(e))?;

    Ok(Json(PostDetailResponse { data }))
}

/// PUT /posts/{id} - 게시글 수정
#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "게시글 ID")),
    request_body = PostRequest,
    responses(
        (status = 200, description = "수정 성공", body = MessageResponse),
        (status = 412, description = "제목/내용 누락", body = ApiErrorResponse),
        (status = 401, description = "인증 필요 또는 작성자 아님", body = ApiErrorResponse),
        (status = 404, description = "게시글 없음", body = ApiErrorResponse)
    )
)]
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    path: Result<Path<PostId>, PathRejection>,
    body: Result<JsonBody<PostRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let op = Operation::UpdatePost;
    let post_id = op.path(path)?;
    let req = op.body(body)?;

    state
        .posts
        .update(&user, post_id, req.title.as_deref(), req.content.as_deref())
        .await
        .map_err(|e| op.error(e))?;

    Ok(Json(MessageResponse::new("게시글을 수정하였습니다.")))
}

/// DELETE /posts/{id} - 게시글 삭제
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "게시글 ID")),
    responses(
        (status = 200, description = "삭제 성공", body = MessageResponse),
        (status = 401, description = "인증 필요 또는 작성자 아님", body = ApiErrorResponse),
        (status = 404, description = "게시글 없음", body = ApiErrorResponse)
    )
)]
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    path: Result<Path<PostId>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let op = Operation::DeletePost;
    let post_id = op.path(path)?;

    state
        .posts
        .delete(&user, post_id)
        .await
        .map_err(|e| op.error(e))?;

    Ok(Json(MessageResponse::new("게시글을 삭제하였습니다.")))
}

/// 게시글 라우터 생성.
pub fn posts_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/{id}", get(get_post).put(update_post).delete(delete_post))
}
