//! GeoQuiz core - guess resolution and progress engine
//!
//! Maps free-text guesses to countries, U.S. states and dependent
//! territories, then drives the per-game session: score, streak, timer
//! penalties, continent/region completion and resumable snapshots.
//!
//! # Architecture
//!
//! ```text
//! raw text ──► GuessResolver ──► ResolvedGuess ──► OutcomeClassifier ──► StateDelta
//!                  │                                      │                   │
//!                  ▼                                      ▼                   ▼
//!            EntityRegistry                        SessionState ◄──────── Session
//!        (normalize + similarity)                                            │
//!                                                                             ▼
//!                                                                Snapshot ──► SnapshotStore
//! ```
//!
//! The engine performs no I/O of its own. Tables are loaded once through
//! [`Catalog::load_dir`], and persistence goes through a caller-supplied
//! [`SnapshotStore`].
//!
//! # Usage
//!
//! ```ignore
//! use geoquiz_core::{Catalog, GameMode, Session, SessionSettings};
//!
//! let catalog = Catalog::load_dir(&Catalog::bundled_data_dir())?;
//! let mut session = Session::new(&catalog, GameMode::Classic, SessionSettings::default());
//!
//! if let Some(report) = session.submit_guess("Germani")? {
//!     println!("{:?}", report.outcome);
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod language;
pub mod mode;
pub mod normalize;
pub mod outcome;
pub mod progress;
pub mod resolver;
pub mod session;
pub mod similarity;
pub mod snapshot;

pub use catalog::{
    Catalog, CatalogTables, Collection, Country, Dependency, Guessable, Hint, State, StateHints,
};
pub use config::QuizConfig;
pub use error::{CatalogError, ConfigError, GameError, StoreError};
pub use events::{EndReason, GameEvent};
pub use language::Language;
pub use mode::GameMode;
pub use outcome::{Classification, Outcome, OutcomeClassifier, RecentGuess, StateDelta};
pub use progress::{GroupProgress, MissedGroup};
pub use resolver::{GuessResolver, ResolvedGuess};
pub use session::{
    GuessReport, ModeChange, PendingModeChange, Phase, Session, SessionSettings, SessionState,
};
pub use similarity::similarity;
pub use snapshot::{MemorySnapshotStore, Snapshot, SnapshotStore};
