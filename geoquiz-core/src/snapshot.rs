//! Session snapshots and their storage
//!
//! A snapshot is a flat JSON record:
//!
//! ```json
//! {
//!   "gameMode": "us-states",
//!   "guessedCountries": ["CA", "TX"],
//!   "time": 120,
//!   "streak": 2,
//!   "recentGuesses": [{"code": "TX", "name": "Texas"}],
//!   "celebratedContinents": [],
//!   "timestamp": 1700000000000
//! }
//! ```
//!
//! The key names are kept for every collection (states are stored under
//! `guessedCountries` too). A record that cannot be decoded, or names an
//! unknown mode, means "nothing to resume": it is logged and skipped.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::catalog::Catalog;
use crate::error::StoreError;
use crate::mode::GameMode;
use crate::outcome::RecentGuess;
use crate::session::{SessionState, RECENT_GUESS_LIMIT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub game_mode: String,
    pub guessed_countries: Vec<String>,
    pub time: u32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub recent_guesses: Vec<RecentGuess>,
    #[serde(default)]
    pub celebrated_continents: Vec<String>,
    /// Epoch milliseconds at capture.
    #[serde(default)]
    pub timestamp: i64,
}

impl Snapshot {
    /// Capture `state`, stamped with the current time.
    pub fn capture(state: &SessionState) -> Self {
        Self {
            game_mode: state.mode.slug(),
            // BTreeSet iteration is already sorted
            guessed_countries: state.guessed_codes.iter().cloned().collect(),
            time: state.time,
            streak: state.streak,
            recent_guesses: state.recent.to_vec(),
            celebrated_continents: state.celebrated.iter().cloned().collect(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn encode(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored record. Garbage yields `None`.
    pub fn decode(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable snapshot");
                None
            }
        }
    }

    /// Rebuild session state. An unknown mode yields `None`.
    pub fn restore(self, catalog: &Catalog) -> Option<SessionState> {
        let mode = match GameMode::parse(&self.game_mode, catalog) {
            Ok(mode) => mode,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding snapshot with unknown mode");
                return None;
            }
        };

        let mut state = SessionState::new(mode, self.time);
        state.guessed_codes = self
            .guessed_countries
            .into_iter()
            .map(|code| code.to_ascii_uppercase())
            .collect();
        state.streak = self.streak;
        state.recent = self
            .recent_guesses
            .into_iter()
            .take(RECENT_GUESS_LIMIT)
            .collect();
        state.celebrated = self.celebrated_continents.into_iter().collect();
        Some(state)
    }
}

/// Storage medium for the single resumable snapshot.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, StoreError>;
    fn save(&self, record: &str) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// In-process store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    record: Mutex<Option<String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.record
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot().clone())
    }

    fn save(&self, record: &str) -> Result<(), StoreError> {
        *self.slot() = Some(record.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot() = None;
        Ok(())
    }
}

/// Encode and save a snapshot of `state`.
pub fn persist(store: &dyn SnapshotStore, state: &SessionState) -> Result<(), StoreError> {
    store.save(&Snapshot::capture(state).encode()?)
}

/// Load and restore the stored session, if there is a usable one.
pub fn load_resumable(
    store: &dyn SnapshotStore,
    catalog: &Catalog,
) -> Result<Option<SessionState>, StoreError> {
    Ok(store
        .load()?
        .and_then(|record| Snapshot::decode(&record))
        .and_then(|snapshot| snapshot.restore(catalog)))
}
