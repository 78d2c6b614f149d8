use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One normalized search result from a stock media provider.
///
/// Items are immutable once constructed; a new search replaces them wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Provider-assigned id, unique within its source.
    pub id: String,
    /// Preview rendition URL.
    pub thumbnail: String,
    /// Full-resolution rendition URL.
    pub url: String,
    /// Caption or tag text; falls back to the search keyword.
    pub title: String,
    pub source: MediaSource,
    pub kind: MediaKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaSource {
    Pixabay,
    Pexels,
}

impl MediaSource {
    /// All providers in the fixed order sub-request results are concatenated.
    pub const ALL: [MediaSource; 2] = [MediaSource::Pixabay, MediaSource::Pexels];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaSource::Pixabay => "pixabay",
            MediaSource::Pexels => "pexels",
        }
    }
}

impl std::fmt::Display for MediaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Image before video, matching the per-keyword concatenation order.
    pub const ALL: [MediaKind; 2] = [MediaKind::Image, MediaKind::Video];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search results grouped by keyword, preserving the input keyword order.
///
/// Rebuilt from scratch on every search; never merged with prior results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    entries: Vec<(String, Vec<MediaItem>)>,
}

impl SearchResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a keyword's items, replacing any entry already under that keyword.
    pub fn insert(&mut self, keyword: impl Into<String>, items: Vec<MediaItem>) {
        let keyword = keyword.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == keyword) {
            entry.1 = items;
        } else {
            self.entries.push((keyword, items));
        }
    }

    /// Extend a keyword's items, creating the entry if needed.
    pub fn append(&mut self, keyword: &str, items: Vec<MediaItem>) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == keyword) {
            entry.1.extend(items);
        } else {
            self.entries.push((keyword.to_string(), items));
        }
    }

    pub fn get(&self, keyword: &str) -> Option<&[MediaItem]> {
        self.entries
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, items)| items.as_slice())
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MediaItem])> {
        self.entries
            .iter()
            .map(|(k, items)| (k.as_str(), items.as_slice()))
    }

    /// Number of keyword groups (not items).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.entries.iter().map(|(_, items)| items.len()).sum()
    }
}

/// One failed sub-request, recorded when failures are isolated rather than
/// aborting the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubRequestFailure {
    pub keyword: String,
    pub source: MediaSource,
    pub kind: MediaKind,
    pub message: String,
}

impl std::fmt::Display for SubRequestFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} for \"{}\": {}",
            self.source, self.kind, self.keyword, self.message
        )
    }
}

/// Errors surfaced by keyword extraction, refinement and media search.
#[derive(Debug, Error)]
pub enum ClipError {
    /// The script was empty or whitespace-only.
    #[error("script is empty")]
    EmptyScript,

    /// An operation that needs keywords was invoked before extraction.
    #[error("no keywords to work with; extract keywords first")]
    EmptyKeywords,

    /// A selected remote service has no stored credential.
    #[error("no API key configured for {provider}")]
    MissingCredential { provider: &'static str },

    /// The action is already in flight; re-entry is rejected, not queued.
    #[error("{action} is already running")]
    Busy { action: &'static str },

    /// Transport-level failure talking to a remote service.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A remote service answered with a non-success status.
    #[error("{provider} API error: HTTP {status}")]
    Api { provider: &'static str, status: u16 },

    /// A remote service answered 2xx but the body was not usable.
    #[error("unexpected {provider} response: {reason}")]
    Malformed {
        provider: &'static str,
        reason: String,
    },
}

impl ClipError {
    /// True for errors detected before any network call; these never mutate
    /// state and are immediately retryable after the caller fixes the input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClipError::EmptyScript
                | ClipError::EmptyKeywords
                | ClipError::MissingCredential { .. }
                | ClipError::Busy { .. }
        )
    }
}
