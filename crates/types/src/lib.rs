//! Small validated value types shared across the patient directory crates.

use serde::{Deserialize, Serialize};

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A free-text search term, trimmed and lower-cased.
///
/// Construction fails for blank input, which lets callers treat an empty `q`
/// parameter as "no search" with a plain `.ok()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchText(String);

impl SearchText {
    /// Creates a new `SearchText` from the given input.
    ///
    /// The input is trimmed and lower-cased. If the trimmed result is empty,
    /// `Err(TextError::Empty)` is returned.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Returns the normalised term as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the term occurs in `haystack`, ignoring case.
    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.0)
    }
}

impl std::fmt::Display for SearchText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SearchText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Display colour category of a medical issue, used by the UI for badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IssueColor {
    Red,
    Orange,
    Yellow,
    Green,
    Pink,
    Cyan,
    Gray,
}

/// Keyword table checked in order; the first keyword found decides the colour.
const ISSUE_KEYWORDS: &[(&str, IssueColor)] = &[
    ("fever", IssueColor::Red),
    ("headache", IssueColor::Orange),
    ("sore", IssueColor::Yellow),
    ("sprained", IssueColor::Green),
    ("ankle", IssueColor::Green),
    ("ear", IssueColor::Cyan),
    ("rash", IssueColor::Pink),
    ("allergic", IssueColor::Orange),
    ("stomach", IssueColor::Yellow),
    ("sinus", IssueColor::Cyan),
    ("broken", IssueColor::Red),
];

impl IssueColor {
    /// Derive the colour for an issue description by case-insensitive keyword match.
    ///
    /// Falls back to [`IssueColor::Gray`] when no keyword matches.
    pub fn for_issue(issue: &str) -> Self {
        let key = issue.to_lowercase();
        ISSUE_KEYWORDS
            .iter()
            .find(|(keyword, _)| key.contains(keyword))
            .map(|(_, color)| *color)
            .unwrap_or(IssueColor::Gray)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IssueColor::Red => "red",
            IssueColor::Orange => "orange",
            IssueColor::Yellow => "yellow",
            IssueColor::Green => "green",
            IssueColor::Pink => "pink",
            IssueColor::Cyan => "cyan",
            IssueColor::Gray => "gray",
        }
    }
}

impl std::fmt::Display for IssueColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
