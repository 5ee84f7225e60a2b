//! Validated text newtypes for poll content
//!
//! These newtypes ensure that user-entered text is valid by construction:
//! - Non-empty
//! - Within length limits (counted in characters, not bytes)
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::none_if_blank;
use crate::error::DomainError;

/// Maximum length for a poll title
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for a poll description
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Maximum length for the text of a single option
pub const MAX_OPTION_TEXT_LENGTH: usize = 100;

fn validated(raw: String, field: &str, max: usize) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} is required", field)));
    }
    if trimmed.chars().count() > max {
        return Err(DomainError::validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(trimmed.to_string())
}

// ============================================================================
// PollTitle
// ============================================================================

/// A validated poll title (non-empty, <=200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PollTitle(String);

impl PollTitle {
    /// Create a new validated poll title.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The title is empty after trimming
    /// - The title exceeds 200 characters after trimming
    pub fn new(title: impl Into<String>) -> Result<Self, DomainError> {
        validated(title.into(), "Title", MAX_TITLE_LENGTH).map(Self)
    }

    /// Returns the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PollTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PollTitle {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PollTitle> for String {
    fn from(title: PollTitle) -> String {
        title.0
    }
}

// ============================================================================
// PollDescription
// ============================================================================

/// A validated poll description (non-empty, <=1000 chars, trimmed)
///
/// An absent description is modelled as `Option<PollDescription>`; use
/// [`PollDescription::optional`] to turn blank form input into `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PollDescription(String);

impl PollDescription {
    /// Create a new validated description.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the description is blank or
    /// exceeds 1000 characters after trimming.
    pub fn new(description: impl Into<String>) -> Result<Self, DomainError> {
        validated(description.into(), "Description", MAX_DESCRIPTION_LENGTH).map(Self)
    }

    /// Validates optional input, mapping blank text to `None`.
    pub fn optional(description: Option<&str>) -> Result<Option<Self>, DomainError> {
        description
            .and_then(none_if_blank)
            .map(Self::new)
            .transpose()
    }

    /// Returns the description as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PollDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PollDescription {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PollDescription> for String {
    fn from(description: PollDescription) -> String {
        description.0
    }
}

// ============================================================================
// OptionText
// ============================================================================

/// The display text of a poll option (non-empty, <=100 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OptionText(String);

impl OptionText {
    /// Create a new validated option text.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the text is blank or exceeds
    /// 100 characters after trimming.
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        validated(text.into(), "Option text", MAX_OPTION_TEXT_LENGTH).map(Self)
    }

    /// Returns the text as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for OptionText {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<OptionText> for String {
    fn from(text: OptionText) -> String {
        text.0
    }
}
