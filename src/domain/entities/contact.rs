use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::sanitize::sanitize_input;

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").unwrap());
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").unwrap());

/// The raw contact-form payload as submitted by a visitor.
///
/// Every field defaults on deserialization so a missing required key
/// surfaces as a field-level validation error rather than a JSON shape
/// error. `website_url` is the honeypot and is never validated.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(
        length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"),
        regex(path = *NAME_PATTERN, message = "Name contains invalid characters")
    )]
    #[serde(default)]
    pub name: String,

    #[validate(
        email(message = "Please enter a valid email address"),
        length(max = 254, message = "Email address is too long")
    )]
    #[serde(default)]
    pub email: String,

    #[validate(custom(function = validate_phone))]
    #[serde(default)]
    pub phone: Option<String>,

    #[validate(length(max = 100, message = "Service selection is too long"))]
    #[serde(default)]
    pub service: Option<String>,

    #[validate(length(max = 50, message = "Timeline selection is too long"))]
    #[serde(default)]
    pub timeline: Option<String>,

    #[validate(length(max = 50, message = "Budget selection is too long"))]
    #[serde(default)]
    pub budget: Option<String>,

    #[validate(length(max = 2000, message = "Message is too long (max 2000 characters)"))]
    #[serde(default)]
    pub details: Option<String>,

    // The site's form submits this key in camelCase.
    #[validate(length(max = 100, message = "Source selection is too long"))]
    #[serde(default, alias = "hearAbout")]
    pub hear_about: Option<String>,

    #[serde(default)]
    pub website_url: Option<String>,
}

impl ContactForm {
    /// Strip markup and injection vectors from every field. Only runs
    /// after validation succeeded; absent optionals become empty strings.
    pub fn sanitize(self) -> SanitizedContact {
        let clean_opt = |value: Option<String>| sanitize_input(value.as_deref().unwrap_or(""));
        SanitizedContact {
            name: sanitize_input(&self.name),
            email: sanitize_input(&self.email),
            phone: clean_opt(self.phone),
            service: clean_opt(self.service),
            timeline: clean_opt(self.timeline),
            budget: clean_opt(self.budget),
            details: clean_opt(self.details),
            hear_about: clean_opt(self.hear_about),
        }
    }
}

/// Empty phone is fine (optional field submitted as ""); otherwise a
/// loose international shape after stripping separators.
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() {
        return Ok(());
    }
    let digits: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    if PHONE_PATTERN.is_match(&digits) {
        Ok(())
    } else {
        let mut error = ValidationError::new("phone");
        error.message = Some("Please enter a valid phone number".into());
        Err(error)
    }
}

/// A validated submission with every field sanitized, safe to
/// interpolate into an email body.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub timeline: String,
    pub budget: String,
    pub details: String,
    pub hear_about: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: String,
}
