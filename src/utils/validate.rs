//! Request validation extractors and field validators.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::utils::phone;

/// JSON extractor that runs `validator` rules after deserialization.
/// Deserialization failures become `BadRequest`; rule failures become
/// `ValidationErrors` with per-field messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest {
                message: rejection.body_text(),
            })?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Query-string counterpart of [`ValidatedJson`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest {
                message: rejection.body_text(),
            })?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}

/// Parses `HH:MM` or `HH:MM:SS` wall-clock time.
pub fn parse_time_of_day(value: &str) -> Option<chrono::NaiveTime> {
    chrono::NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| chrono::NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// `HH:MM` or `HH:MM:SS` wall-clock time.
pub fn validate_time_of_day(value: &str) -> Result<(), ValidationError> {
    parse_time_of_day(value)
        .map(|_| ())
        .ok_or_else(|| ValidationError::new("time_of_day"))
}

/// Comma list of weekday numbers 0 (Sunday) to 6 (Saturday), no
/// duplicates, at least one entry.
pub fn validate_days_of_week(value: &str) -> Result<(), ValidationError> {
    let mut seen = [false; 7];
    for part in value.split(',') {
        let day: usize = part
            .trim()
            .parse()
            .map_err(|_| ValidationError::new("days_of_week"))?;
        if day > 6 || seen[day] {
            return Err(ValidationError::new("days_of_week"));
        }
        seen[day] = true;
    }
    Ok(())
}

/// Accepts a phone in any punctuation style as long as it normalizes to
/// a plausible digit string.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if phone::is_valid_phone(&phone::normalize_phone(value)) {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct TestPayload {
        #[validate(length(min = 1, max = 50, message = "Name must be 1 to 50 characters"))]
        name: String,
        #[validate(custom(function = validate_time_of_day, message = "Invalid time"))]
        start_time: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn valid_json_passes() {
        let request = json_request(r#"{"name":"Promo","start_time":"09:00"}"#);
        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;
        assert!(result.is_ok());
        let ValidatedJson(payload) = result.unwrap();
        assert_eq!(payload.name, "Promo");
    }

    #[tokio::test]
    async fn rule_failures_become_validation_errors() {
        let request = json_request(r#"{"name":"","start_time":"25:00"}"#);
        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;
        let error = result.unwrap_err();
        match error {
            AppError::ValidationErrors { errors } => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"name"));
                assert!(fields.contains(&"start_time"));
            }
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_json_becomes_bad_request() {
        let request = json_request(r#"{"name":"Promo""#);
        let result = ValidatedJson::<TestPayload>::from_request(request, &()).await;
        let error = result.unwrap_err();
        match error {
            AppError::BadRequest { message } => assert!(!message.is_empty()),
            other => panic!("Expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn time_of_day_accepts_both_precisions() {
        assert!(validate_time_of_day("09:00").is_ok());
        assert!(validate_time_of_day("09:00:30").is_ok());
        assert!(validate_time_of_day("24:00").is_err());
        assert!(validate_time_of_day("9am").is_err());
    }

    #[test]
    fn days_of_week_rejects_out_of_range_and_duplicates() {
        assert!(validate_days_of_week("0,1,2,3,4,5,6").is_ok());
        assert!(validate_days_of_week("1,3,5").is_ok());
        assert!(validate_days_of_week("7").is_err());
        assert!(validate_days_of_week("1,1").is_err());
        assert!(validate_days_of_week("").is_err());
        assert!(validate_days_of_week("mon").is_err());
    }

    #[test]
    fn phone_rule_normalizes_before_checking() {
        assert!(validate_phone("+55 (11) 99999-0001").is_ok());
        assert!(validate_phone("123").is_err());
    }
}
