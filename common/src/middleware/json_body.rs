//! JSON request body extractor.
//!
//! Like `axum::Json`, but an absent or blank body is reported as missing
//! input before the content type is looked at, and every rejection is an
//! [`AppError`].

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

pub const NO_INPUT: &str = "No input data provided";

/// Deserialized JSON request body.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let declared_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_json_content_type);

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection.body_text(), "request body unreadable");
            AppError::Validation(NO_INPUT.to_string())
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::Validation(NO_INPUT.to_string()));
        }
        if !declared_json {
            return Err(AppError::Validation(
                "Expected request with `Content-Type: application/json`".to_string(),
            ));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(JsonBody(value))
    }
}

fn is_json_content_type(value: &str) -> bool {
    let essence = value.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json")
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Rent {
        monthly_rent: Option<f64>,
    }

    async fn extract(content_type: Option<&str>, body: &'static str) -> Result<Rent, AppError> {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        let req = builder.body(Body::from(body)).unwrap();
        JsonBody::<Rent>::from_request(req, &()).await.map(|JsonBody(rent)| rent)
    }

    fn message(result: Result<Rent, AppError>) -> String {
        result.unwrap_err().user_message()
    }

    #[tokio::test]
    async fn test_parses_json_body() {
        let rent = extract(Some("application/json; charset=utf-8"), r#"{"monthly_rent": 950.0}"#)
            .await
            .unwrap();
        assert_eq!(rent.monthly_rent, Some(950.0));
    }

    #[tokio::test]
    async fn test_absent_or_blank_body_is_missing_input() {
        assert_eq!(message(extract(None, "").await), NO_INPUT);
        assert_eq!(message(extract(Some("application/json"), "").await), NO_INPUT);
        assert_eq!(message(extract(Some("application/json"), "  \n").await), NO_INPUT);
    }

    #[tokio::test]
    async fn test_body_without_json_content_type() {
        let msg = message(extract(None, r#"{"monthly_rent": 950.0}"#).await);
        assert!(msg.contains("Content-Type"));

        let msg = message(extract(Some("text/plain"), r#"{"monthly_rent": 950.0}"#).await);
        assert!(msg.contains("Content-Type"));
    }

    #[tokio::test]
    async fn test_wrong_field_type_names_the_field() {
        let err = extract(Some("application/json"), r#"{"monthly_rent": "abc"}"#)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err.user_message().contains("monthly_rent"));
        assert_ne!(err.user_message(), NO_INPUT);
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let msg = message(extract(Some("application/json"), r#"{"monthly_rent": "#).await);
        assert_eq!(msg, "Malformed JSON body");
    }

    #[test]
    fn test_json_content_types() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("Application/JSON; charset=utf-8"));
        assert!(is_json_content_type("application/merge-patch+json"));
        assert!(!is_json_content_type("text/json-ish"));
    }
}
