use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validator::not_blank;

pub const SIGNUP_FLASH: &str = "Signup successful! Please log in.";
pub const LOGOUT_FLASH: &str = "You've been logged out successfully!";
pub const INVALID_CREDENTIALS: &str = "Email or password is incorrect";
pub const DUPLICATE_EMAIL: &str = "Email address is already in use";

/// Password fields are never serialized back into a re-rendered form.
#[derive(Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct UserSignupForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(
        custom(function = "not_blank"),
        email(message = "This field must be a valid email address")
    )]
    pub email: String,
    #[serde(skip_serializing)]
    #[validate(
        custom(function = "not_blank"),
        length(min = 8, message = "This field must be at least 8 characters long")
    )]
    pub password: String,
}

#[derive(Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct UserLoginForm {
    #[validate(
        custom(function = "not_blank"),
        email(message = "This field must be a valid email address")
    )]
    pub email: String,
    #[serde(skip_serializing)]
    #[validate(custom(function = "not_blank"))]
    pub password: String,
}

impl fmt::Debug for UserSignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserSignupForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl fmt::Debug for UserLoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserLoginForm")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{BLANK_MESSAGE, field_errors};

    #[test]
    fn test_valid_signup() {
        let form: UserSignupForm =
            serde_urlencoded::from_str("name=Bob&email=bob%40example.com&password=validpass123")
                .unwrap();
        assert!(field_errors(&form).is_empty());
    }

    #[test]
    fn test_signup_rules() {
        let form = UserSignupForm {
            name: " ".into(),
            email: "bob-at-example".into(),
            password: "short".into(),
        };

        let errors = field_errors(&form);
        assert_eq!(errors.get("name").map(String::as_str), Some(BLANK_MESSAGE));
        assert_eq!(
            errors.get("email").map(String::as_str),
            Some("This field must be a valid email address")
        );
        assert_eq!(
            errors.get("password").map(String::as_str),
            Some("This field must be at least 8 characters long")
        );
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = field_errors(&UserLoginForm::default());
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("password"));
    }

    #[test]
    fn test_password_is_never_serialized_or_debug_printed() {
        let form = UserLoginForm {
            email: "bob@example.com".into(),
            password: "hunter22".into(),
        };

        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["email"], "bob@example.com");
        assert!(value.get("password").is_none());
        assert!(!format!("{form:?}").contains("hunter22"));
    }
}
