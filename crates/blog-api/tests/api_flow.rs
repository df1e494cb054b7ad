//! 전체 API 흐름 통합 테스트.
//!
//! 인메모리 저장소에 연결된 라우터로 회원가입 → 로그인 → 게시글/댓글 작업을 검증합니다.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use blog_api::{create_api_router, AppState, TokenService};
use blog_core::MemoryStore;

const SECRET: &str = "integration-test-secret-with-enough-length";

fn app() -> Router {
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        TokenService::with_ttl_hours(SECRET, 24),
    );
    create_api_router("/api").with_state(Arc::new(state))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn signup_and_login(app: &Router, nickname: &str, password: &str) -> String {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/signup",
        None,
        Some(json!({ "nickname": nickname, "password": password, "confirm": password })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "nickname": nickname, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_signup_login_post_scenario() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/signup",
        None,
        Some(json!({ "nickname": "abc123", "password": "abcd9999", "confirm": "abcd9999" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "회원 가입에 성공하였습니다.");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "nickname": "abc123", "password": "abcd9999" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    // 토큰은 같은 사용자 ID로 디코딩됨
    let user_id = TokenService::with_ttl_hours(SECRET, 24)
        .verify(&token)
        .unwrap();
    let (status, body) = send(&app, Method::GET, "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["userId"], user_id);
    assert_eq!(body["user"]["nickname"], "abc123");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&token),
        Some(json!({ "title": "t", "content": "c" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, "/api/posts", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let post_id = body["data"][0]["postId"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/posts/{post_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "t");
    assert_eq!(body["data"]["user"]["nickname"], "abc123");

    // 다른 사용자의 수정 시도
    let other = signup_and_login(&app, "zzz999", "qwer1234").await;
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/posts/{post_id}"),
        Some(&other),
        Some(json!({ "title": "hijack", "content": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errorMessage"], "게시글이 정상적으로 수정되지 않았습니다.");

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/posts/{post_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(body["data"]["title"], "t");
}

#[tokio::test]
async fn test_signup_rejections_are_412() {
    let app = app();

    let cases = [
        (json!({ "nickname": "ab", "password": "abcd9999", "confirm": "abcd9999" }), "ID의 형식이 일치하지 않습니다."),
        (json!({ "nickname": "_abc", "password": "abcd9999", "confirm": "abcd9999" }), "ID의 형식이 일치하지 않습니다."),
        (json!({ "nickname": "abc123", "password": "abc", "confirm": "abc" }), "패스워드 형식이 일치하지 않습니다."),
        (json!({ "nickname": "abc123", "password": "xxabc123", "confirm": "xxabc123" }), "패스워드에 닉네임이 포함되어 있습니다."),
        (json!({ "nickname": "abc123", "password": "abcd9999", "confirm": "abcd9998" }), "패스워드가 일치하지 않습니다."),
    ];

    for (body, message) in cases {
        let (status, response) = send(&app, Method::POST, "/api/signup", None, Some(body)).await;
        assert_eq!(status, StatusCode::PRECONDITION_FAILED);
        assert_eq!(response["errorMessage"], message);
    }
}

#[tokio::test]
async fn test_duplicate_signup_is_412() {
    let app = app();
    signup_and_login(&app, "abc123", "abcd9999").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/signup",
        None,
        Some(json!({ "nickname": "abc123", "password": "zzzz0000", "confirm": "zzzz0000" })),
    )
    .await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(body["errorMessage"], "중복된 닉네임입니다.");
}

#[tokio::test]
async fn test_login_mismatch_is_412() {
    let app = app();
    signup_and_login(&app, "abc123", "abcd9999").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({ "nickname": "abc123", "password": "wrong0000" })),
    )
    .await;
    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(body["errorMessage"], "닉네임 또는 패스워드를 확인해주세요.");
}

#[tokio::test]
async fn test_protected_routes_reject_missing_or_bad_token() {
    let app = app();

    for token in [None, Some("garbage")] {
        let (status, body) = send(&app, Method::GET, "/api/users/me", token, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["errorMessage"], "로그인 후 이용 가능한 기능입니다.");
    }

    // 다른 키로 서명된 토큰
    let forged = TokenService::with_ttl_hours("another-secret-with-enough-length-000", 24)
        .issue(1)
        .unwrap();
    let (status, _) = send(&app, Method::GET, "/api/users/me", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_post_not_found_vs_forbidden() {
    let app = app();
    let owner = signup_and_login(&app, "owner1", "abcd9999").await;
    let other = signup_and_login(&app, "other1", "abcd9999").await;

    let (status, body) = send(&app, Method::DELETE, "/api/posts/12345", Some(&owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorMessage"], "게시글이 존재하지 않습니다.");

    send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&owner),
        Some(json!({ "title": "t", "content": "c" })),
    )
    .await;
    let (_, list) = send(&app, Method::GET, "/api/posts", None, None).await;
    let post_id = list["data"][0]["postId"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/posts/{post_id}"),
        Some(&other),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errorMessage"], "게시글이 정상적으로 삭제되지 않았습니다.");

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/posts/{post_id}"),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "게시글을 삭제하였습니다.");
}

#[tokio::test]
async fn test_comments_flow_and_cascade() {
    let app = app();
    let owner = signup_and_login(&app, "owner1", "abcd9999").await;
    let other = signup_and_login(&app, "other1", "abcd9999").await;

    send(
        &app,
        Method::POST,
        "/api/posts",
        Some(&owner),
        Some(json!({ "title": "t", "content": "c" })),
    )
    .await;
    let (_, list) = send(&app, Method::GET, "/api/posts", None, None).await;
    let post_id = list["data"][0]["postId"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/comments/{post_id}"),
        Some(&other),
        Some(json!({ "comment": "nice post" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "댓글을 작성하였습니다.");

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/comments/{post_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["comment"], "nice post");
    assert_eq!(body["data"][0]["user"]["nickname"], "other1");
    let comment_id = body["data"][0]["commentId"].as_i64().unwrap();

    // 게시글 작성자도 남의 댓글은 삭제 불가
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/comments/{comment_id}"),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/comments/{comment_id}"),
        Some(&other),
        Some(json!({ "comment": "edited" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // 게시글 삭제 시 댓글도 삭제
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/posts/{post_id}"),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/comments/{post_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_bodyless_post_and_comment_requests_are_412() {
    let app = app();
    let token = signup_and_login(&app, "abc123", "abcd9999").await;

    for (method, uri) in [
        (Method::POST, "/api/posts"),
        (Method::PUT, "/api/posts/1"),
        (Method::POST, "/api/comments/1"),
    ] {
        let (status, body) = send(&app, method, uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::PRECONDITION_FAILED);
        assert_eq!(body["errorMessage"], "데이터 형식이 올바르지 않습니다.");
    }
}
