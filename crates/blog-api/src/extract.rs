//! 요청 본문 추출기.
//!
//! 게시글/댓글 입력은 본문이 비어 있거나 JSON Content-Type이 없으면
//! 빈 입력으로 취급하여 필드 검증(412)까지 도달하게 합니다.
//! 본문이 JSON이라고 선언했지만 파싱할 수 없는 경우만 거부됩니다.

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde::de::DeserializeOwned;

/// 비어 있을 수 있는 JSON 본문.
#[derive(Debug, Clone, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let declared_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state).await?;

        if !declared_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        Json::<T>::from_bytes(&bytes).map(|Json(value)| Self(value))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json") || essence.ends_with("+json")
}
