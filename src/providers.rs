//! Stock media providers.
//!
//! Each provider is a thin HTTP client that answers one keyword × one media
//! kind per call and returns items already normalized to [`MediaItem`]. The
//! registry owns the clients that have a credential configured.

pub mod pexels;
pub mod pixabay;

use async_trait::async_trait;
use tracing::debug;

use crate::store::ApiKeys;
use crate::types::{ClipError, MediaItem, MediaKind, MediaSource};

pub use pexels::PexelsProvider;
pub use pixabay::PixabayProvider;

/// Items requested per sub-request; fixed, no pagination.
pub const PAGE_SIZE: u32 = 3;

/// A stock media search backend.
#[async_trait]
pub trait MediaProvider: Send + Sync {
    /// Search one keyword for one media kind.
    async fn search(&self, keyword: &str, kind: MediaKind) -> Result<Vec<MediaItem>, ClipError>;

    fn source(&self) -> MediaSource;

    /// Whether the provider has a usable credential.
    fn is_available(&self) -> bool;
}

/// Owns the provider clients built from the stored credentials.
pub struct ProviderRegistry {
    providers: Vec<Box<dyn MediaProvider>>,
}

impl ProviderRegistry {
    /// Build a client for every provider with a credential present.
    pub fn from_keys(keys: &ApiKeys) -> Self {
        let mut providers: Vec<Box<dyn MediaProvider>> = Vec::new();
        if keys.has("pixabay") {
            providers.push(Box::new(PixabayProvider::new(keys.pixabay.clone())));
            debug!("pixabay provider enabled");
        }
        if keys.has("pexels") {
            providers.push(Box::new(PexelsProvider::new(keys.pexels.clone())));
            debug!("pexels provider enabled");
        }
        Self { providers }
    }

    pub(crate) fn from_providers(providers: Vec<Box<dyn MediaProvider>>) -> Self {
        Self { providers }
    }

    pub fn get(&self, source: MediaSource) -> Option<&dyn MediaProvider> {
        self.providers
            .iter()
            .find(|p| p.source() == source && p.is_available())
            .map(|p| p.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Provider captions are often blank; the search keyword is the fallback title.
pub(crate) fn title_or_keyword(caption: &str, keyword: &str) -> String {
    let caption = caption.trim();
    if caption.is_empty() {
        keyword.to_string()
    } else {
        caption.to_string()
    }
}
