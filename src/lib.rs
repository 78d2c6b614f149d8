pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod keywords;
pub mod llm;
pub mod providers;
pub mod search;
pub mod store;
pub mod types;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::app::{ActionState, AppState, Stage, STAGES};
    pub use crate::config::{KindSelection, LanguageModel, Settings, SourceSelection, VideoFormat};
    pub use crate::search::{FailurePolicy, SearchOutcome};
    pub use crate::store::{ApiKeys, KeyStore};
    pub use crate::types::{
        ClipError, MediaItem, MediaKind, MediaSource, SearchResults, SubRequestFailure,
    };
    pub use crate::Clipscout;
}

use anyhow::Result;
use tracing::warn;

use crate::app::AppState;
use crate::config::Settings;
use crate::db::Database;
use crate::llm::RefinementClient;
use crate::providers::ProviderRegistry;
use crate::search::{FailurePolicy, SearchOutcome};
use crate::store::KeyStore;
use crate::types::{ClipError, SearchResults, SubRequestFailure};

/// Async library entry point. Owns the credential store and the session
/// state, and coordinates every network-touching action.
pub struct Clipscout {
    db: Database,
    state: AppState,
    llm: RefinementClient,
    policy: FailurePolicy,
}

impl Clipscout {
    /// Initialize the credential store and (optionally) run migrations, then
    /// load any previously saved keys. Does not start any internal runtimes.
    pub async fn connect(database_url: Option<&str>, run_migrations: bool) -> Result<Self> {
        let db = Database::connect(database_url).await?;
        if run_migrations {
            db.run_migrations().await?;
        }
        let mut state = AppState::default();
        match db.load_keys().await {
            Ok(keys) => state.keys = keys,
            // A fresh store without migrations has no table yet; start empty.
            Err(e) => warn!("could not load saved API keys: {e}"),
        }
        Ok(Self {
            db,
            state,
            llm: RefinementClient::new(),
            policy: FailurePolicy::default(),
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.state.settings = settings;
    }

    pub fn set_failure_policy(&mut self, policy: FailurePolicy) {
        self.policy = policy;
    }

    pub fn set_script(&mut self, script: impl Into<String>) {
        self.state.script = script.into();
    }

    pub fn keywords(&self) -> &[String] {
        &self.state.keywords
    }

    /// Replace the keyword list wholesale (manual edits are taken as-is; no
    /// re-deduplication happens here).
    pub fn set_keywords(&mut self, keywords: Vec<String>) {
        self.state.keywords = keywords;
    }

    pub fn results(&self) -> &SearchResults {
        &self.state.results
    }

    /// Update one credential in memory; nothing is persisted until
    /// [`Clipscout::save_keys`]. Returns false for an unknown provider.
    pub fn set_key(&mut self, provider: &str, secret: &str) -> bool {
        self.state.keys.set(provider, secret)
    }

    /// Persist the full credentials mapping. This is the only write path to
    /// the store.
    pub async fn save_keys(&self) -> Result<()> {
        self.db.save_keys(&self.state.keys).await
    }

    /// Run local keyword extraction over the current script, replacing the
    /// keyword set. An empty script leaves existing keywords untouched.
    pub fn extract_keywords(&mut self) -> Result<&[String], ClipError> {
        let extracted = keywords::extract(&self.state.script)?;
        self.state.keywords = extracted;
        Ok(&self.state.keywords)
    }

    /// Replace the keyword set with model suggestions. Requires prior
    /// extraction and a stored google credential; every failure leaves the
    /// current keywords untouched and is retriable.
    pub async fn refine_keywords(&mut self) -> Result<&[String], ClipError> {
        // Validations precede the state transition so a rejected trigger
        // mutates nothing.
        if self.state.keywords.is_empty() {
            return Err(ClipError::EmptyKeywords);
        }
        if !self.state.keys.has("google") {
            return Err(ClipError::MissingCredential { provider: "google" });
        }
        self.state.refine.begin("refine")?;

        let outcome = self
            .llm
            .refine(
                &self.state.keys.google,
                self.state.settings.model,
                &self.state.script,
                &self.state.keywords,
            )
            .await;

        match outcome {
            Ok(terms) => {
                self.state.refine.finish();
                self.state.keywords = terms;
                Ok(&self.state.keywords)
            }
            Err(err) => {
                self.state.refine.fail();
                warn!("keyword refinement failed: {err}");
                Err(err)
            }
        }
    }

    /// Search the selected providers for the current keywords and apply the
    /// outcome to the session state.
    ///
    /// Returns the sub-request failures recorded under the isolating policy
    /// (empty when everything succeeded). Under [`FailurePolicy::Atomic`]
    /// any failure returns an error and the prior results stay applied.
    pub async fn search_media(&mut self) -> Result<Vec<SubRequestFailure>, ClipError> {
        if self.state.keywords.is_empty() {
            return Err(ClipError::EmptyKeywords);
        }
        let registry = ProviderRegistry::from_keys(&self.state.keys);
        self.state.search.begin("search")?;

        let outcome = search::run(
            &registry,
            &self.state.keywords,
            self.state.settings.source,
            self.state.settings.media,
            self.policy,
        )
        .await;

        match outcome {
            Ok(SearchOutcome { results, failures }) => {
                self.state.search.finish();
                // Wholesale replacement; results never merge across searches.
                self.state.results = results;
                Ok(failures)
            }
            Err(err) => {
                // Prior results stay displayed unchanged. A validation
                // rejection is a no-op transition back to Idle.
                if err.is_validation() {
                    self.state.search.finish();
                } else {
                    self.state.search.fail();
                }
                Err(err)
            }
        }
    }
}
