use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use snippetbox_models::PERMITTED_EXPIRY_DAYS;
use validator::Validate;

use crate::validator::{field_errors, not_blank};

pub const CREATED_FLASH: &str = "Snippet successfully created!";

/// Fields of the create-snippet form.
///
/// Missing fields decode as blanks so they surface as validation messages
/// instead of a decoding failure.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct SnippetCreateForm {
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "This field cannot be more than 100 characters long")
    )]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub content: String,
    #[serde(rename(deserialize = "expiry-days"))]
    pub expiry_days: u32,
}

impl Default for SnippetCreateForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            expiry_days: 365,
        }
    }
}

impl SnippetCreateForm {
    pub fn validation_errors(&self) -> BTreeMap<String, String> {
        let mut errors = field_errors(self);
        if !PERMITTED_EXPIRY_DAYS.contains(&self.expiry_days) {
            errors.insert(
                "expiry_days".to_string(),
                "This field must equal 1, 7 or 365".to_string(),
            );
        }
        errors
    }
}
