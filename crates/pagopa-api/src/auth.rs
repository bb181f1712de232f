//! # Caller Authentication
//!
//! The proxy serves a single trusted backend. When `AUTH_TOKEN` is set, every
//! payment and notification call must carry `Authorization: Bearer <token>`;
//! health endpoints are mounted outside this layer. Without `AUTH_TOKEN` the
//! check is skipped, which is how local runs against the mock node work.

use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use subtle::ConstantTimeEq;

use crate::error::{ErrorBody, ErrorDetail};

/// Shared caller token, injected as a request extension.
#[derive(Clone)]
pub struct AuthConfig {
    pub token: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Why a caller was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    MissingHeader,
    NotBearer,
    WrongToken,
}

impl AuthFailure {
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingHeader => "missing authorization header",
            Self::NotBearer => "authorization header must use Bearer scheme",
            Self::WrongToken => "invalid bearer token",
        }
    }
}

/// Check an `Authorization` header value against the configured token.
pub fn check_authorization(header: Option<&str>, expected: &str) -> Result<(), AuthFailure> {
    let value = header.ok_or(AuthFailure::MissingHeader)?;
    let presented = value.strip_prefix("Bearer ").ok_or(AuthFailure::NotBearer)?;
    if tokens_match(presented, expected) {
        Ok(())
    } else {
        Err(AuthFailure::WrongToken)
    }
}

// Length mismatch still runs one comparison so both branches cost alike.
fn tokens_match(presented: &str, expected: &str) -> bool {
    let (presented, expected) = (presented.as_bytes(), expected.as_bytes());
    if presented.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    presented.ct_eq(expected).into()
}

/// Reject callers that do not present the shared token.
pub async fn auth_middleware(request: Request, next: Next) -> Response {
    let expected = request
        .extensions()
        .get::<AuthConfig>()
        .and_then(|config| config.token.clone());
    let Some(expected) = expected else {
        return next.run(request).await;
    };

    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match check_authorization(header_value, &expected) {
        Ok(()) => next.run(request).await,
        Err(failure) => {
            tracing::warn!(
                path = %request.uri().path(),
                reason = failure.message(),
                "caller rejected"
            );
            let body = ErrorBody {
                error: ErrorDetail {
                    code: "UNAUTHORIZED".to_string(),
                    message: failure.message().to_string(),
                },
            };
            (StatusCode::UNAUTHORIZED, Json(body)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::middleware::from_fn;
    use axum::routing::post;
    use axum::Router;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const BACKEND_TOKEN: &str = "io-backend-4f2a";

    #[test]
    fn matching_bearer_is_accepted() {
        let header = format!("Bearer {BACKEND_TOKEN}");
        assert_eq!(check_authorization(Some(&header), BACKEND_TOKEN), Ok(()));
    }

    #[test]
    fn each_failure_is_classified() {
        assert_eq!(
            check_authorization(None, BACKEND_TOKEN),
            Err(AuthFailure::MissingHeader)
        );
        assert_eq!(
            check_authorization(Some("Basic aW86YmFja2VuZA=="), BACKEND_TOKEN),
            Err(AuthFailure::NotBearer)
        );
        assert_eq!(
            check_authorization(Some("bearer io-backend-4f2a"), BACKEND_TOKEN),
            Err(AuthFailure::NotBearer)
        );
        assert_eq!(
            check_authorization(Some("Bearer io-backend-4f2b"), BACKEND_TOKEN),
            Err(AuthFailure::WrongToken)
        );
        assert_eq!(
            check_authorization(Some("Bearer io-backend"), BACKEND_TOKEN),
            Err(AuthFailure::WrongToken)
        );
        assert_eq!(
            check_authorization(Some("Bearer "), BACKEND_TOKEN),
            Err(AuthFailure::WrongToken)
        );
    }

    #[test]
    fn token_comparison() {
        assert!(tokens_match("PSP1", "PSP1"));
        assert!(!tokens_match("PSP1", "PSP2"));
        assert!(!tokens_match("PSP1", "PSP10"));
        assert!(!tokens_match("", "PSP1"));
    }

    #[test]
    fn debug_hides_backend_token() {
        let config = AuthConfig {
            token: Some(BACKEND_TOKEN.to_string()),
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains(BACKEND_TOKEN));
        assert!(rendered.contains("[REDACTED]"));
    }

    /// A stand-in for the check route behind the auth layer.
    fn guarded_check_route(token: Option<&str>) -> Router {
        Router::new()
            .route("/v1/payments/check", post(|| async { "checked" }))
            .layer(from_fn(auth_middleware))
            .layer(axum::Extension(AuthConfig {
                token: token.map(str::to_string),
            }))
    }

    fn check_call(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/v1/payments/check");
        if let Some(value) = authorization {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn backend_with_token_reaches_handler() {
        let header = format!("Bearer {BACKEND_TOKEN}");
        let response = guarded_check_route(Some(BACKEND_TOKEN))
            .oneshot(check_call(Some(&header)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"checked");
    }

    #[tokio::test]
    async fn rejected_caller_gets_error_body() {
        let response = guarded_check_route(Some(BACKEND_TOKEN))
            .oneshot(check_call(Some("Bearer stale-token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "UNAUTHORIZED");
        assert_eq!(json["error"]["message"], AuthFailure::WrongToken.message());
    }

    #[tokio::test]
    async fn local_run_without_token_is_open() {
        let response = guarded_check_route(None)
            .oneshot(check_call(None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
