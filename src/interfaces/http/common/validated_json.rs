//! JSON body extractor with `validator` checks
//!
//! Malformed bodies are answered with 400, bodies that parse but fail
//! validation with 422. Both use the common `{statusCode, message}` body.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiError;

/// Like `axum::Json<T>`, but the value has passed `Validate::validate`.
///
/// ```ignore
/// async fn create(ValidatedJson(body): ValidatedJson<CreateGameRequest>) {
///     // `body.title` is non-empty, `body.price` non-negative
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    Malformed(JsonRejection),
    Invalid(ValidationErrors),
}

/// `field: message` pairs joined with `; `, ordered by field name.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let parts: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{}: {}", field, msg),
                None => format!("{}: invalid ({})", field, e.code),
            })
        })
        .collect();

    if parts.is_empty() {
        "Validation failed".to_string()
    } else {
        parts.join("; ")
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let err = match self {
            Self::Malformed(rejection) => {
                ApiError::new(StatusCode::BAD_REQUEST, format!("Invalid JSON: {}", rejection))
            }
            Self::Invalid(errors) => {
                ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, describe(&errors))
            }
        };
        err.into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Malformed)?;
        value.validate().map_err(ValidatedJsonRejection::Invalid)?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "must not be empty"))]
        title: String,
        #[validate(range(min = 0, message = "must be non-negative"))]
        siret: i64,
    }

    async fn echo(ValidatedJson(body): ValidatedJson<Payload>) -> String {
        format!("{}:{}", body.title, body.siret)
    }

    async fn post_raw(raw: &str) -> (StatusCode, String) {
        let app = Router::new().route("/", post(echo));
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(raw.to_string()))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn valid_body_reaches_handler() {
        let (status, body) = post_raw(r#"{"title": "Portal", "siret": 42}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Portal:42");
    }

    #[tokio::test]
    async fn syntax_error_is_400() {
        let (status, body) = post_raw("{title").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["statusCode"], 400);
    }

    #[tokio::test]
    async fn every_failing_field_is_reported_in_order() {
        let (status, body) = post_raw(r#"{"title": "", "siret": -1}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["statusCode"], 422);
        assert_eq!(
            body["message"],
            "siret: must be non-negative; title: must not be empty"
        );
    }
}
