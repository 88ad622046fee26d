use std::borrow::Cow;
use std::collections::BTreeMap;

use anyhow::anyhow;
use axum::{
    Form,
    extract::{FromRequest, Request, rejection::FormRejection},
};
use serde::de::DeserializeOwned;
use snippetbox_core::AppError;
use validator::{Validate, ValidationError};

pub const BLANK_MESSAGE: &str = "This field cannot be blank";

/// Rejects empty and whitespace-only values.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed(BLANK_MESSAGE)));
    }
    Ok(())
}

/// First failing message per field, keyed by field name.
pub fn field_errors<T: Validate>(value: &T) -> BTreeMap<String, String> {
    let Err(errors) = value.validate() else {
        return BTreeMap::new();
    };

    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let message = errors
                .iter()
                .find_map(|error| error.message.as_ref().map(|msg| msg.to_string()))
                .unwrap_or_else(|| format!("{} is invalid", field));
            (field.to_string(), message)
        })
        .collect()
}

/// A decoded `application/x-www-form-urlencoded` body.
///
/// Validation is left to the handler because a failing form is re-rendered
/// with its errors rather than rejected. Only undecodable bodies (wrong
/// content type, values of the wrong shape) are turned into a 400 here.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlForm<T>(pub T);

impl<T, S> FromRequest<S> for HtmlForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                FormRejection::InvalidFormContentType(_) => AppError::bad_request(anyhow!(
                    "Missing 'Content-Type: application/x-www-form-urlencoded' header"
                )),
                other => AppError::bad_request(anyhow!("Invalid form body: {}", other.body_text())),
            })?;

        Ok(HtmlForm(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(custom(function = "not_blank"))]
        name: String,
        #[validate(length(min = 8, message = "Too short"))]
        password: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("x").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank(" \t\n").is_err());
    }

    #[test]
    fn test_field_errors_keeps_messages_per_field() {
        let sample = Sample {
            name: "  ".into(),
            password: "short".into(),
            email: "nope".into(),
        };

        let errors = field_errors(&sample);
        assert_eq!(errors.get("name").map(String::as_str), Some(BLANK_MESSAGE));
        assert_eq!(errors.get("password").map(String::as_str), Some("Too short"));
        assert_eq!(errors.get("email").map(String::as_str), Some("email is invalid"));
    }

    #[test]
    fn test_field_errors_empty_when_valid() {
        let sample = Sample {
            name: "Bob".into(),
            password: "validpass123".into(),
            email: "bob@example.com".into(),
        };
        assert!(field_errors(&sample).is_empty());
    }
}
