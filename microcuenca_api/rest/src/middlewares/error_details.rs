//! Attach the message of an internal error to the error response

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::header::CONTENT_LENGTH,
    middleware::{from_fn, Next},
    response::Response,
    Router,
};
use serde_json::Value;
use tracing::error;

use crate::BODY_LIMIT;

/// Top-level message of the error that caused a response, never sent to the
/// client unless error details are exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetails(pub String);

pub fn add<S: Clone + Send + Sync + 'static>(enabled: bool) -> impl FnOnce(Router<S>) -> Router<S> {
    move |router| {
        if enabled {
            router.layer(from_fn(middleware))
        } else {
            router
        }
    }
}

async fn middleware(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let Some(ErrorDetails(details)) = response.extensions().get::<ErrorDetails>().cloned() else {
        return response;
    };

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(err) => {
            error!("Failed to read error response body: {err}");
            return Response::from_parts(parts, Body::empty());
        }
    };

    let Ok(Value::Object(mut object)) = serde_json::from_slice(&bytes) else {
        return Response::from_parts(parts, Body::from(bytes));
    };
    object.insert("details".into(), details.into());

    let Ok(body) = serde_json::to_vec(&object) else {
        return Response::from_parts(parts, Body::from(bytes));
    };
    parts.headers.remove(CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(body))
}
