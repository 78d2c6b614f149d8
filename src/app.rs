//! Session state and per-action lifecycle tracking.

use crate::config::Settings;
use crate::store::ApiKeys;
use crate::types::{ClipError, SearchResults};

/// Lifecycle of one user-triggered remote action.
///
/// `Idle → InFlight → Idle` on success, `InFlight → Failed` on error. A
/// failed action is immediately retriable; only `InFlight` rejects re-entry.
/// There is no queueing and no cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    InFlight,
    Failed,
}

impl ActionState {
    /// Move to `InFlight`, rejecting re-entrant triggers.
    pub fn begin(&mut self, action: &'static str) -> Result<(), ClipError> {
        if matches!(self, ActionState::InFlight) {
            return Err(ClipError::Busy { action });
        }
        *self = ActionState::InFlight;
        Ok(())
    }

    pub fn finish(&mut self) {
        *self = ActionState::Idle;
    }

    pub fn fail(&mut self) {
        *self = ActionState::Failed;
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, ActionState::InFlight)
    }
}

/// One row of the generation progress table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub name: &'static str,
    pub description: &'static str,
    /// Percentage complete. Fixed; nothing updates these.
    pub progress: u8,
}

/// The pipeline stages rendered after a search. Purely presentational.
pub const STAGES: [Stage; 3] = [
    Stage {
        name: "Analyzing Script",
        description: "Extracting keywords and context",
        progress: 100,
    },
    Stage {
        name: "Fetching Media",
        description: "Finding background clips and images",
        progress: 60,
    },
    Stage {
        name: "Finalizing",
        description: "Preparing downloadable media",
        progress: 30,
    },
];

/// All mutable session state, owned by one coordinator ([`crate::Clipscout`]).
///
/// View layers read this struct and submit intents back to the coordinator;
/// nothing else mutates it.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub script: String,
    /// Ordered, deduplicated at generation time; manual edits are taken as-is.
    pub keywords: Vec<String>,
    pub settings: Settings,
    pub keys: ApiKeys,
    /// Most recently applied results; only a completed search replaces them.
    pub results: SearchResults,
    pub(crate) refine: ActionState,
    pub(crate) search: ActionState,
}

impl AppState {
    pub fn refine_state(&self) -> ActionState {
        self.refine
    }

    pub fn search_state(&self) -> ActionState {
        self.search
    }
}
