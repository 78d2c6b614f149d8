//! Media search orchestration.
//!
//! Plans the cross product {selected providers} × {selected media kinds} per
//! keyword, launches every sub-request concurrently and groups the normalized
//! items back by keyword. Validation happens before any network call; a
//! selection whose provider lacks a credential rejects the whole search.

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::config::{KindSelection, SourceSelection};
use crate::providers::{MediaProvider, ProviderRegistry};
use crate::types::{ClipError, MediaKind, SearchResults, SubRequestFailure};

/// How sub-request failures affect the overall batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Keep successful sub-requests and record each failure individually.
    #[default]
    Isolate,
    /// Any failed sub-request discards the whole batch; prior results stay
    /// untouched at the caller.
    Atomic,
}

/// Outcome of one search batch. `failures` is empty under
/// [`FailurePolicy::Atomic`] (an atomic batch with failures never returns).
#[derive(Debug)]
pub struct SearchOutcome {
    pub results: SearchResults,
    pub failures: Vec<SubRequestFailure>,
}

/// Search every keyword across the selected providers and media kinds.
///
/// Per keyword, items concatenate in the fixed order pixabay-image,
/// pixabay-video, pexels-image, pexels-video, filtered to the selections
/// actually issued. A keyword with no hits maps to an empty list; that is
/// not an error.
pub async fn run(
    registry: &ProviderRegistry,
    keywords: &[String],
    sources: SourceSelection,
    kinds: KindSelection,
    policy: FailurePolicy,
) -> Result<SearchOutcome, ClipError> {
    if keywords.is_empty() {
        return Err(ClipError::EmptyKeywords);
    }

    // Resolve every selected provider up front; one missing credential
    // rejects the batch before anything is sent.
    let mut cells: Vec<(&dyn MediaProvider, MediaKind)> = Vec::new();
    for source in sources.sources() {
        let provider = registry
            .get(source)
            .ok_or(ClipError::MissingCredential {
                provider: source.as_str(),
            })?;
        for kind in kinds.kinds() {
            cells.push((provider, kind));
        }
    }

    debug!(
        keywords = keywords.len(),
        sub_requests = keywords.len() * cells.len(),
        "dispatching media search"
    );

    // Everything launches at once; adequate at this scale (a handful of
    // keywords × at most 4 cells), no batching or throttling.
    let mut sub_requests = Vec::with_capacity(keywords.len() * cells.len());
    for keyword in keywords {
        for (provider, kind) in &cells {
            let provider = *provider;
            let kind = *kind;
            sub_requests.push(async move {
                let outcome = provider.search(keyword, kind).await;
                (keyword.as_str(), provider.source(), kind, outcome)
            });
        }
    }
    let settled = join_all(sub_requests).await;

    // Group back by keyword. Seeding every keyword first keeps the mapping's
    // key set identical to the input, empty groups included.
    let mut results = SearchResults::new();
    for keyword in keywords {
        results.insert(keyword.clone(), Vec::new());
    }

    let mut failures: Vec<SubRequestFailure> = Vec::new();
    for (keyword, source, kind, outcome) in settled {
        match outcome {
            Ok(items) => results.append(keyword, items),
            Err(err) => {
                warn!("{source}/{kind} sub-request for \"{keyword}\" failed: {err}");
                match policy {
                    FailurePolicy::Atomic => return Err(err),
                    FailurePolicy::Isolate => failures.push(SubRequestFailure {
                        keyword: keyword.to_string(),
                        source,
                        kind,
                        message: err.to_string(),
                    }),
                }
            }
        }
    }

    info!(
        keywords = results.len(),
        items = results.item_count(),
        failed = failures.len(),
        "media search complete"
    );

    Ok(SearchOutcome { results, failures })
}
