//! Opaque pagination cursors for resource syncers.
//!
//! A [`PageToken`] is the only state threaded between repeated `list` and
//! `grants` calls. Keeping it an explicit value type (rather than hidden
//! iterator state) keeps those calls pure and replayable, which the
//! caller-driven retry model depends on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque pagination cursor.
///
/// Empty means "start of pagination" when passed in, and "collection
/// exhausted" when returned. Connectors decide the encoding; the offset-based
/// connectors in this workspace use a decimal offset string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(String);

impl PageToken {
    /// The empty token: start of pagination.
    #[must_use]
    pub fn start() -> Self {
        PageToken(String::new())
    }

    /// Create a token from an opaque cursor string.
    pub fn new(token: impl Into<String>) -> Self {
        PageToken(token.into())
    }

    /// Get the raw cursor string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this token marks the start of pagination (or, on the
    /// way out, an exhausted collection).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Interpret the cursor as a non-negative decimal offset.
    ///
    /// Returns `None` for an empty or non-numeric token; a malformed cursor
    /// silently restarts pagination rather than failing.
    #[must_use]
    pub fn offset(&self) -> Option<u64> {
        if self.0.is_empty() {
            return None;
        }
        self.0.parse::<u64>().ok()
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PageToken {
    fn from(s: &str) -> Self {
        PageToken(s.to_string())
    }
}

impl From<String> for PageToken {
    fn from(s: String) -> Self {
        PageToken(s)
    }
}

/// One page of items plus the cursor for the next page.
///
/// An empty `next_token` signals that the collection is exhausted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Cursor for the next page; empty when there are no more pages.
    pub next_token: PageToken,
}

impl<T> Page<T> {
    /// Create a page with a continuation cursor.
    #[must_use]
    pub fn new(items: Vec<T>, next_token: PageToken) -> Self {
        Self { items, next_token }
    }

    /// Create a final page: these items, no continuation.
    #[must_use]
    pub fn end(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: PageToken::start(),
        }
    }

    /// Create an empty final page.
    #[must_use]
    pub fn empty() -> Self {
        Self::end(Vec::new())
    }

    /// Check whether more pages remain after this one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.next_token.is_empty()
    }
}
