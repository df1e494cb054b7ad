//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use blog_core::{Author, Comment, CommentWithAuthor, CurrentUser, Post, PostWithAuthor};

use crate::error::ApiErrorResponse;
use crate::routes::{
    CommentListResponse, CommentRequest, LoginRequest, MessageResponse, PostDetailResponse,
    PostListResponse, PostRequest, SignupRequest, TokenResponse, UserResponse,
};

/// Bearer 토큰 보안 스키마 등록.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Blog API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog API",
        description = r#"
# 블로그 백엔드 REST API

회원가입/로그인, 게시글 CRUD, 게시글에 달린 댓글 CRUD를 제공합니다.

## 인증

`POST /api/login`으로 발급받은 토큰을 `Authorization: Bearer <token>` 헤더로 전달합니다.
토큰은 발급 후 24시간 동안 유효합니다.

## 에러 응답

모든 에러는 `{"errorMessage": "..."}` 형식입니다.
"#,
    ),
    tags(
        (name = "users", description = "회원가입, 로그인, 내 정보"),
        (name = "posts", description = "게시글"),
        (name = "comments", description = "댓글")
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            ApiErrorResponse,
            MessageResponse,
            SignupRequest,
            LoginRequest,
            TokenResponse,
            UserResponse,
            CurrentUser,
            Author,
            Post,
            PostWithAuthor,
            PostRequest,
            PostListResponse,
            PostDetailResponse,
            Comment,
            CommentWithAuthor,
            CommentRequest,
            CommentListResponse,
        )
    ),
    paths(
        // ===== Users =====
        crate::routes::users::signup,
        crate::routes::users::login,
        crate::routes::users::me,

        // ===== Posts =====
        crate::routes::posts::create_post,
        crate::routes::posts::list_posts,
        crate::routes::posts::get_post,
        crate::routes::posts::update_post,
        crate::routes::posts::delete_post,

        // ===== Comments =====
        crate::routes::comments::create_comment,
        crate::routes::comments::list_comments,
        crate::routes::comments::update_comment,
        crate::routes::comments::delete_comment,
    )
)]
pub struct ApiDoc;

/// Swagger UI 라우터 생성.
///
/// 다음 경로에 문서 UI를 마운트합니다:
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
