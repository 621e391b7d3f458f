//! JSON body extractor with `validator` checks

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;

/// A deserialized body that passed `Validate`.
///
/// Bodies that are not JSON at all are 400; JSON of the wrong shape and
/// field-rule failures are 422.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(body_rejection)?;
        body.validate()?;
        Ok(Self(body))
    }
}

fn body_rejection(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(e) => ApiError::InvalidBody(e.body_text()),
        other => ApiError::MalformedBody(other.body_text()),
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::header};
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(email)]
        email: String,
    }

    async fn extract(content_type: Option<&str>, body: &str) -> Result<Probe, ApiError> {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        let req = builder.body(Body::from(body.to_string())).unwrap();
        ValidatedJson::<Probe>::from_request(req, &()).await.map(|v| v.0)
    }

    #[tokio::test]
    async fn test_valid_body() {
        let body = extract(Some("application/json"), r#"{"email":"a@x.com"}"#)
            .await
            .unwrap();
        assert_eq!(body.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_rejections() {
        let json = Some("application/json");
        assert!(matches!(extract(json, "{oops").await, Err(ApiError::MalformedBody(_))));
        assert!(matches!(
            extract(None, r#"{"email":"a@x.com"}"#).await,
            Err(ApiError::MalformedBody(_))
        ));
        assert!(matches!(extract(json, r#"{"mail":1}"#).await, Err(ApiError::InvalidBody(_))));
        assert!(matches!(
            extract(json, r#"{"email":"nope"}"#).await,
            Err(ApiError::Validation(_))
        ));
    }
}
