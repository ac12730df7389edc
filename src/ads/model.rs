//! Ad records and category keys.

use std::fmt;

use serde::Serialize;

use super::catalog::CatalogError;

/// A context category key, e.g. `"clothing"` or `"kitchen"`.
///
/// Matching is exact and case-sensitive.
pub type Category = String;

/// A single advertisement.
///
/// Two ads are the same ad when both fields are equal; selection relies on
/// this for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Ad {
    redirect_url: String,
    text: String,
}

impl Ad {
    /// Creates an ad, rejecting empty fields.
    pub fn new(
        redirect_url: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let redirect_url = redirect_url.into();
        let text = text.into();

        if redirect_url.trim().is_empty() {
            return Err(CatalogError::EmptyField("redirect_url"));
        }
        if text.trim().is_empty() {
            return Err(CatalogError::EmptyField("text"));
        }

        Ok(Self { redirect_url, text })
    }

    /// Builds an ad from literal text known to be non-empty.
    pub(crate) fn from_static(redirect_url: &'static str, text: &'static str) -> Self {
        debug_assert!(!redirect_url.is_empty() && !text.is_empty());
        Self {
            redirect_url: redirect_url.to_string(),
            text: text.to_string(),
        }
    }

    pub fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Ad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.text, self.redirect_url)
    }
}
