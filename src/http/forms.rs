//! Form payloads, validation, and input sanitization.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of name-like fields (names, practice, service entries).
const MAX_NAME_LEN: usize = 100;
/// Maximum length of a phone number.
const MAX_PHONE_LEN: usize = 20;
/// Maximum length of free-text fields (message, problems).
const MAX_TEXT_LEN: usize = 2000;
/// Maximum number of service entries accepted per submission.
const MAX_SERVICES: usize = 10;

/// Validation failure for a form submission.
///
/// The display strings double as the user-facing error messages.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Please select at least one service")]
    NoServices,
}

/// Contact form submission.
///
/// Every field is defaulted so that a missing field surfaces as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub practice: String,
    #[serde(default)]
    pub practice_type: String,
    #[serde(default)]
    pub providers: String,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ContactForm {
    /// Check required fields, email format, and service selection.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.first_name.trim().is_empty()
            || self.last_name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.practice.trim().is_empty()
            || self.practice_type.is_empty()
            || self.providers.is_empty()
        {
            return Err(ValidationError::MissingFields);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.services.is_empty() {
            return Err(ValidationError::NoServices);
        }
        Ok(())
    }

    /// Trim and truncate all fields to their accepted bounds.
    pub fn sanitized(mut self) -> Self {
        self.first_name = truncate(self.first_name.trim(), MAX_NAME_LEN);
        self.last_name = truncate(self.last_name.trim(), MAX_NAME_LEN);
        self.email = self.email.trim().to_lowercase();
        self.phone = self.phone.map(|p| truncate(p.trim(), MAX_PHONE_LEN));
        self.practice = truncate(self.practice.trim(), MAX_NAME_LEN);
        self.services.truncate(MAX_SERVICES);
        self.services = self
            .services
            .into_iter()
            .map(|s| truncate(&s, MAX_NAME_LEN))
            .collect();
        self.message = self.message.map(|m| truncate(m.trim(), MAX_TEXT_LEN));
        self
    }
}

/// Pricing request submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingForm {
    #[serde(default)]
    pub practice_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub free_audit: bool,
    #[serde(default)]
    pub problems: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
}

impl PricingForm {
    /// Check required fields and email format.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.practice_name.trim().is_empty()
            || self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.phone.trim().is_empty()
        {
            return Err(ValidationError::MissingFields);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }

    /// Trim and truncate all fields to their accepted bounds.
    pub fn sanitized(mut self) -> Self {
        self.practice_name = truncate(self.practice_name.trim(), MAX_NAME_LEN);
        self.name = truncate(self.name.trim(), MAX_NAME_LEN);
        self.email = self.email.trim().to_lowercase();
        self.phone = truncate(self.phone.trim(), MAX_PHONE_LEN);
        self.problems = self.problems.map(|p| truncate(p.trim(), MAX_TEXT_LEN));
        self.services.truncate(MAX_SERVICES);
        self.services = self
            .services
            .into_iter()
            .map(|s| truncate(&s, MAX_NAME_LEN))
            .collect();
        self
    }

    /// First word of the submitted name, used in confirmation emails.
    pub fn first_name(&self) -> &str {
        self.name.split(' ').next().unwrap_or(&self.name)
    }
}

/// Truncate a string to at most `max` characters, on a char boundary.
fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Minimal shape check: exactly one `@`, no whitespace, and a dotted
/// domain with text on both sides of the final dot.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) || email.matches('@').count() != 1 {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    match domain.rsplit_once('.') {
        Some((host, tld)) => !local.is_empty() && !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
