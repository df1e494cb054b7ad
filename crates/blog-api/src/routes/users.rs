//! 사용자 API 라우트
//!
//! # 엔드포인트
//!
//! - `POST /signup` - 회원가입
//! - `POST /login` - 로그인 (신원 토큰 발급)
//! - `GET /users/me` - 내 정보 조회 (인증 필요)

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use blog_core::CurrentUser;

use super::MessageResponse;
use crate::auth::AuthUser;
use crate::error::{ApiErrorResponse, ApiResult, Operation};
use crate::state::AppState;

// ================================================================================================
// Request/Response Types
// ================================================================================================

/// 회원가입 요청
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    /// 닉네임 (첫 글자 영문/숫자, 3자 이상)
    #[serde(default)]
    pub nickname: String,
    /// 패스워드 (첫 글자 영문/숫자, 4자 이상, 닉네임 미포함)
    #[serde(default)]
    pub password: String,
    /// 패스워드 확인
    #[serde(default)]
    pub confirm: String,
}

/// 로그인 요청
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub password: String,
}

/// 로그인 응답
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// `Authorization: Bearer <token>` 헤더로 전달할 신원 토큰
    pub token: String,
}

/// 내 정보 응답
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user: CurrentUser,
}

// ================================================================================================
// Handlers
// ================================================================================================

/// POST /signup - 회원가입
#[utoipa::path(
    post,
    path = "/api/signup",
    tag = "users",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "가입 성공", body = MessageResponse),
        (status = 412, description = "형식 오류 또는 중복 닉네임", body = ApiErrorResponse),
        (status = 400, description = "잘못된 요청", body = ApiErrorResponse)
    )
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let op = Operation::Signup;
    let req = op.json(body)?;

    state
        .users
        .signup(&req.nickname, &req.password, &req.confirm)
        .await
        .map_err(|e| op.error(e))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("회원 가입에 성공하였습니다.")),
    ))
}

/// POST /login - 로그인
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = TokenResponse),
        (status = 412, description = "닉네임 또는 패스워드 불일치", body = ApiErrorResponse),
        (status = 400, description = "로그인 실패", body = ApiErrorResponse)
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let op = Operation::Login;
    let req = op.json(body)?;

    let token = state
        .users
        .login(&req.nickname, &req.password)
        .await
        .map_err(|e| op.error(e))?;

    Ok(Json(TokenResponse { token }))
}

/// GET /users/me - 내 정보 조회
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "인증된 사용자", body = UserResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse)
    )
)]
pub async fn me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse { user })
}

/// 사용자 라우터 생성.
pub fn users_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/users/me", get(me))
}
