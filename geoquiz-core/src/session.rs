//! Session state machine
//!
//! ```text
//!            first guess              group completed
//!   Idle ─────────────────► Running ─────────────────► Celebrating(group)
//!    ▲                        │  ▲                         │
//!    │ restart / mode change  │  └─ dismiss / next guess ──┤
//!    │                        │                            │ dismiss or guess,
//!    │                        │ end / countdown hits 0     ▼ restricted group done
//!    └──────── (any) ◄── Ended(reason) ◄────── end ───── Completed
//! ```
//!
//! The timer only advances in `Running`. `Completed` exists for
//! group-restricted sessions: the target group is done but the player may
//! keep guessing until they end the game.

use smallvec::SmallVec;
use std::collections::BTreeSet;

use crate::catalog::Catalog;
use crate::error::GameError;
use crate::events::{EndReason, GameEvent};
use crate::language::Language;
use crate::mode::GameMode;
use crate::normalize::normalize_guess;
use crate::outcome::{Outcome, OutcomeClassifier, RecentGuess, StateDelta, StreakChange};
use crate::progress::{self, GroupProgress, MissedGroup};
use crate::resolver::GuessResolver;
use crate::snapshot::Snapshot;

/// Length of the most-recent-first guess list.
pub const RECENT_GUESS_LIMIT: usize = 8;

/// Countdown length of a timed game when not configured otherwise.
pub const DEFAULT_TIMED_LIMIT_SECS: u32 = 900;

/// Per-game mutable state. Mutated only through [`SessionState::apply`] and
/// the explicit restart/mode operations on [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub mode: GameMode,
    /// Primary and dependency codes credited so far.
    pub guessed_codes: BTreeSet<String>,
    /// Seconds elapsed, or seconds remaining in timed mode.
    pub time: u32,
    pub streak: u32,
    /// Most recent first, at most [`RECENT_GUESS_LIMIT`] entries.
    pub recent: SmallVec<[RecentGuess; RECENT_GUESS_LIMIT]>,
    pub celebrated: BTreeSet<String>,
    pub last_outcome: Option<Outcome>,
}

impl SessionState {
    pub fn new(mode: GameMode, time: u32) -> Self {
        Self {
            mode,
            guessed_codes: BTreeSet::new(),
            time,
            streak: 0,
            recent: SmallVec::new(),
            celebrated: BTreeSet::new(),
            last_outcome: None,
        }
    }

    /// Apply a classifier delta. Penalties add time on an up-counting clock
    /// and remove it (down to zero) on a countdown.
    pub fn apply(&mut self, delta: &StateDelta) {
        self.guessed_codes.extend(delta.credited.iter().cloned());

        match delta.streak {
            StreakChange::Keep => {}
            StreakChange::Increment => self.streak = self.streak.saturating_add(1),
            StreakChange::Reset => self.streak = 0,
        }

        if delta.penalty_secs > 0 {
            self.time = if self.mode.counts_down() {
                self.time.saturating_sub(delta.penalty_secs)
            } else {
                self.time.saturating_add(delta.penalty_secs)
            };
        }

        if let Some(recent) = &delta.recent {
            self.push_recent(recent.clone());
        }
    }

    pub fn push_recent(&mut self, guess: RecentGuess) {
        self.recent.insert(0, guess);
        self.recent.truncate(RECENT_GUESS_LIMIT);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    /// Timer paused until the celebration is dismissed.
    Celebrating(String),
    Completed,
    Ended(EndReason),
}

impl Phase {
    pub fn is_timer_running(&self) -> bool {
        matches!(self, Phase::Running)
    }

    pub fn is_ended(&self) -> bool {
        matches!(self, Phase::Ended(_))
    }
}

/// Knobs a caller sets once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub language: Language,
    pub timed_limit_secs: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            timed_limit_secs: DEFAULT_TIMED_LIMIT_SECS,
        }
    }
}

/// What one accepted guess produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessReport {
    pub outcome: Outcome,
    pub events: Vec<GameEvent>,
    /// The guess changed saved state (codes, clock or streak); the caller
    /// should write a snapshot.
    pub should_persist: bool,
}

/// A mode switch that waits for the player's confirmation. Dropping it
/// aborts the switch.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending mode change does nothing until confirmed"]
pub struct PendingModeChange {
    mode: GameMode,
}

impl PendingModeChange {
    pub fn mode(&self) -> &GameMode {
        &self.mode
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeChange {
    /// The session restarted in the new mode.
    Applied,
    /// Progress would be lost; confirm with [`Session::confirm_mode_change`].
    NeedsConfirmation(PendingModeChange),
}

/// One game over a catalog.
#[derive(Debug)]
pub struct Session<'a> {
    catalog: &'a Catalog,
    resolver: GuessResolver<'a>,
    classifier: OutcomeClassifier<'a>,
    settings: SessionSettings,
    state: SessionState,
    phase: Phase,
}

impl<'a> Session<'a> {
    pub fn new(catalog: &'a Catalog, mode: GameMode, settings: SessionSettings) -> Self {
        let time = initial_time(&mode, &settings);
        Self::with_state(catalog, SessionState::new(mode, time), settings)
    }

    /// Continue a restored game. It waits in `Idle` for the next guess,
    /// unless there is nothing left to play.
    pub fn resume(catalog: &'a Catalog, state: SessionState, settings: SessionSettings) -> Self {
        let mut session = Self::with_state(catalog, state, settings);
        if session.state.mode.counts_down() && session.state.time == 0 {
            session.phase = Phase::Ended(EndReason::TimeExpired);
        } else if session.restricted_group_complete() {
            session.phase = Phase::Completed;
        }
        tracing::info!(
            mode = %session.state.mode,
            guessed = session.state.guessed_codes.len(),
            time = session.state.time,
            phase = ?session.phase,
            "Session resumed"
        );
        session
    }

    fn with_state(catalog: &'a Catalog, state: SessionState, settings: SessionSettings) -> Self {
        Self {
            catalog,
            resolver: GuessResolver::new(catalog),
            classifier: OutcomeClassifier::new(catalog),
            settings,
            state,
            phase: Phase::Idle,
        }
    }

    // ── Guessing ──

    /// Resolve and score one guess. Blank input is ignored (`Ok(None)`).
    ///
    /// A guess made while a celebration is showing closes it first, so the
    /// clock never stays paused behind an open overlay.
    pub fn submit_guess(&mut self, raw: &str) -> Result<Option<GuessReport>, GameError> {
        if self.phase.is_ended() {
            return Err(GameError::SessionEnded);
        }
        if normalize_guess(raw).is_empty() {
            return Ok(None);
        }

        match self.phase {
            Phase::Idle => {
                self.phase = Phase::Running;
                tracing::info!(mode = %self.state.mode, "Session started");
            }
            Phase::Celebrating(_) => {
                self.dismiss_celebration();
                tracing::debug!(phase = ?self.phase, "Celebration closed by a guess");
            }
            _ => {}
        }

        let collection = self.state.mode.collection();
        let language = self.settings.language;
        let resolved = self.resolver.resolve(raw, language, collection);
        let classification = self.classifier.classify(
            &resolved,
            &self.state.guessed_codes,
            collection,
            self.state.mode.group_filter(),
            language,
        );

        self.state.apply(&classification.delta);
        let mut events = Vec::new();

        if classification.outcome.is_correct() {
            for group in self.classifier.detect_completions(
                collection,
                &self.state.guessed_codes,
                &self.state.celebrated,
            ) {
                tracing::info!(group = %group, "Group completed");
                self.state.celebrated.insert(group.clone());
                if self.phase == Phase::Running {
                    self.phase = Phase::Celebrating(group.clone());
                }
                events.push(GameEvent::GroupCompleted { group });
            }
        }

        if self.state.mode.counts_down() && self.state.time == 0 {
            events.push(self.finish(EndReason::TimeExpired));
        }

        tracing::debug!(
            outcome = ?classification.outcome,
            streak = self.state.streak,
            time = self.state.time,
            "Guess classified"
        );

        self.state.last_outcome = Some(classification.outcome.clone());
        Ok(Some(GuessReport {
            outcome: classification.outcome,
            events,
            should_persist: !classification.delta.is_empty(),
        }))
    }

    // ── Clock ──

    /// Advance the clock by one second. Ignored unless the timer runs.
    pub fn tick(&mut self) -> Option<GameEvent> {
        if !self.phase.is_timer_running() {
            return None;
        }
        if self.state.mode.counts_down() {
            self.state.time = self.state.time.saturating_sub(1);
            if self.state.time == 0 {
                return Some(self.finish(EndReason::TimeExpired));
            }
        } else {
            self.state.time = self.state.time.saturating_add(1);
        }
        None
    }

    // ── Lifecycle ──

    /// Close the celebration overlay. Returns false when none was showing.
    pub fn dismiss_celebration(&mut self) -> bool {
        if !matches!(self.phase, Phase::Celebrating(_)) {
            return false;
        }
        self.phase = if self.restricted_group_complete() {
            Phase::Completed
        } else {
            Phase::Running
        };
        true
    }

    /// End the game at the player's request.
    pub fn end_game(&mut self) -> Option<GameEvent> {
        if self.phase.is_ended() {
            return None;
        }
        Some(self.finish(EndReason::Manual))
    }

    fn finish(&mut self, reason: EndReason) -> GameEvent {
        self.phase = Phase::Ended(reason);
        tracing::info!(
            ?reason,
            score = self.score(),
            total = self.total(),
            time = self.state.time,
            "Session ended"
        );
        GameEvent::SessionEnded { reason }
    }

    /// Clear all progress and return to `Idle` in the same mode.
    pub fn restart(&mut self) {
        let mode = self.state.mode.clone();
        self.reset_to(mode);
    }

    fn reset_to(&mut self, mode: GameMode) {
        let time = initial_time(&mode, &self.settings);
        self.state = SessionState::new(mode, time);
        self.phase = Phase::Idle;
        tracing::info!(mode = %self.state.mode, "Session reset");
    }

    // ── Mode switching ──

    /// Switch mode by slug. Unknown slugs are rejected without a transition.
    pub fn request_mode_change(&mut self, slug: &str) -> Result<ModeChange, GameError> {
        let mode = GameMode::parse(slug, self.catalog)?;
        Ok(self.request_mode(mode))
    }

    /// Switch to `mode`, asking for confirmation when progress would be lost.
    pub fn request_mode(&mut self, mode: GameMode) -> ModeChange {
        if self.state.guessed_codes.is_empty() && !self.phase.is_timer_running() {
            self.reset_to(mode);
            ModeChange::Applied
        } else {
            ModeChange::NeedsConfirmation(PendingModeChange { mode })
        }
    }

    pub fn confirm_mode_change(&mut self, pending: PendingModeChange) {
        self.reset_to(pending.mode);
    }

    // ── Queries ──

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn mode(&self) -> &GameMode {
        &self.state.mode
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn language(&self) -> Language {
        self.settings.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.settings.language = language;
    }

    /// Guessed primary entities of the active set (dependencies excluded).
    pub fn score(&self) -> usize {
        let collection = self.state.mode.collection();
        match self.state.mode.group_filter() {
            Some(group) => self
                .catalog
                .group_members(collection, group)
                .iter()
                .filter(|m| self.state.guessed_codes.contains(m.code()))
                .count(),
            None => self
                .state
                .guessed_codes
                .iter()
                .filter(|code| self.catalog.primary(collection, code).is_some())
                .count(),
        }
    }

    /// Size of the active set: the whole collection or the restricted group.
    pub fn total(&self) -> usize {
        let collection = self.state.mode.collection();
        match self.state.mode.group_filter() {
            Some(group) => self.catalog.group_members(collection, group).len(),
            None => self.catalog.primary_count(collection),
        }
    }

    pub fn group_progress(&self) -> Vec<GroupProgress> {
        progress::group_progress(
            self.catalog,
            self.state.mode.collection(),
            &self.state.guessed_codes,
        )
    }

    pub fn missed_by_group(&self) -> Vec<MissedGroup> {
        progress::missed_by_group(
            self.catalog,
            self.state.mode.collection(),
            &self.state.guessed_codes,
            self.settings.language,
        )
    }

    /// Snapshot of the current state, stamped with the current time.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    fn restricted_group_complete(&self) -> bool {
        let Some(group) = self.state.mode.group_filter() else {
            return false;
        };
        let members = self
            .catalog
            .group_members(self.state.mode.collection(), group);
        !members.is_empty()
            && members
                .iter()
                .all(|m| self.state.guessed_codes.contains(m.code()))
    }
}

fn initial_time(mode: &GameMode, settings: &SessionSettings) -> u32 {
    if mode.counts_down() {
        settings.timed_limit_secs
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;

    fn guess(session: &mut Session<'_>, raw: &str) -> GuessReport {
        session
            .submit_guess(raw)
            .expect("session accepts guesses")
            .expect("guess is not blank")
    }

    fn oceania(catalog: &Catalog) -> GameMode {
        GameMode::parse("oceania", catalog).unwrap()
    }

    #[test]
    fn test_first_guess_starts_timer() {
        let catalog = fixtures::catalog();
        let mut session = Session::new(&catalog, GameMode::Classic, SessionSettings::default());
        assert_eq!(session.phase(), &Phase::Idle);
        assert_eq!(session.tick(), None);
        assert_eq!(session.state().time, 0);

        let report = guess(&mut session, "France");
        assert!(report.outcome.is_correct());
        assert!(report.should_persist);
        assert_eq!(session.phase(), &Phase::Running);
        assert_eq!(session.state().streak, 1);

        session.tick();
        session.tick();
        assert_eq!(session.state().time, 2);
    }

    #[test]
    fn test_blank_guess_is_ignored() {
        let catalog = fixtures::catalog();
        let mut session = Session::new(&catalog, GameMode::Classic, SessionSettings::default());
        assert_eq!(session.submit_guess("   "), Ok(None));
        assert_eq!(session.phase(), &Phase::Idle);
        assert_eq!(session.state().time, 0);
        assert!(session.state().last_outcome.is_none());
    }

    #[test]
    fn test_wrong_guess_adds_penalty_and_resets_streak() {
        let catalog = fixtures::catalog();
        let mut session = Session::new(&catalog, GameMode::Classic, SessionSettings::default());
        guess(&mut session, "France");
        guess(&mut session, "Germany");
        assert_eq!(session.state().streak, 2);

        let report = guess(&mut session, "Frxxxxxxxxx");
        assert!(matches!(report.outcome, Outcome::Wrong { .. }));
        // Penalty and streak reset must survive a crash
        assert!(report.should_persist);
        assert_eq!(session.state().streak, 0);
        assert_eq!(session.state().time, 5);
    }

    #[test]
    fn test_dependency_guess_changes_nothing() {
        let catalog = fixtures::catalog();
        let mut session = Session::new(&catalog, GameMode::Classic, SessionSettings::default());
        guess(&mut session, "France");
        let report = guess(&mut session, "Greenland");
        assert!(matches!(report.outcome, Outcome::DependencyOnly { .. }));
        assert!(!report.should_persist);
        assert_eq!(session.state().streak, 1);
        assert_eq!(session.state().guessed_codes.len(), 1);
        assert_eq!(session.state().time, 0);
    }

    #[test]
    fn test_score_excludes_dependencies() {
        let catalog = fixtures::catalog();
        let mut session = Session::new(&catalog, GameMode::Classic, SessionSettings::default());
        guess(&mut session, "Denmark");
        assert_eq!(session.state().guessed_codes.len(), 3);
        assert_eq!(session.score(), 1);
        assert_eq!(session.total(), 6);
    }

    #[test]
    fn test_group_completion_fires_once() {
        let catalog = fixtures::catalog();
        let mut session = Session::new(&catalog, GameMode::Classic, SessionSettings::default());
        guess(&mut session, "Fiji");
        let report = guess(&mut session, "Tonga");
        assert_eq!(
            report.events,
            vec![GameEvent::GroupCompleted {
                group: "Oceania".to_string()
            }]
        );
        assert_eq!(session.phase(), &Phase::Celebrating("Oceania".to_string()));

        // Timer is paused during the celebration
        let before = session.state().time;
        session.tick();
        assert_eq!(session.state().time, before);

        assert!(session.dismiss_celebration());
        assert_eq!(session.phase(), &Phase::Running);
        assert!(!session.dismiss_celebration());

        let report = guess(&mut session, "Tonga");
        assert!(matches!(report.outcome, Outcome::Duplicate { .. }));
        assert!(!report.should_persist);
        assert!(report.events.is_empty());
        assert!(session.state().celebrated.contains("Oceania"));
    }

    #[test]
    fn test_guess_while_celebrating_restarts_the_clock() {
        let catalog = fixtures::catalog();
        let settings = SessionSettings {
            timed_limit_secs: 100,
            ..SessionSettings::default()
        };
        let mut session = Session::new(&catalog, GameMode::Timed, settings);
        guess(&mut session, "Fiji");
        guess(&mut session, "Tonga");
        assert_eq!(session.phase(), &Phase::Celebrating("Oceania".to_string()));
        assert_eq!(session.state().time, 100);

        // No Enter pressed: the next guess closes the overlay
        let report = guess(&mut session, "France");
        assert!(report.outcome.is_correct());
        assert_eq!(session.phase(), &Phase::Running);
        for _ in 0..10 {
            session.tick();
        }
        assert_eq!(session.state().time, 90);
        assert!(!session.dismiss_celebration());
    }

    #[test]
    fn test_guess_while_celebrating_restricted_target_stays_completed() {
        let catalog = fixtures::catalog();
        let mut session = Session::new(&catalog, oceania(&catalog), SessionSettings::default());
        guess(&mut session, "Fiji");
        guess(&mut session, "Tonga");
        let time = session.state().time;

        guess(&mut session, "Fiji");
        assert_eq!(session.phase(), &Phase::Completed);
        session.tick();
        assert_eq!(session.state().time, time);
    }

    #[test]
    fn test_restricted_session_completes() {
        let catalog = fixtures::catalog();
        let mut session = Session::new(&catalog, oceania(&catalog), SessionSettings::default());
        assert_eq!(session.total(), 2);

        let report = guess(&mut session, "France");
        assert!(matches!(report.outcome, Outcome::WrongGroup { .. }));
        assert_eq!(session.state().time, 5);
        assert!(session.state().guessed_codes.is_empty());

        guess(&mut session, "Fiji");
        guess(&mut session, "Tonga");
        assert!(session.dismiss_celebration());
        assert_eq!(session.phase(), &Phase::Completed);
        assert_eq!(session.score(), 2);

        // Still accepting guesses, timer stays stopped
        let report = guess(&mut session, "Fiji");
        assert!(matches!(report.outcome, Outcome::Duplicate { .. }));
        assert_eq!(session.tick(), None);
        assert_eq!(session.phase(), &Phase::Completed);

        assert_eq!(
            session.end_game(),
            Some(GameEvent::SessionEnded {
                reason: EndReason::Manual
            })
        );
        assert_eq!(session.end_game(), None);
    }

    #[test]
    fn test_guess_after_end_is_rejected() {
        let catalog = fixtures::catalog();
        let mut session = Session::new(&catalog, GameMode::Classic, SessionSettings::default());
        guess(&mut session, "France");
        session.end_game();
        assert_eq!(session.submit_guess("Germany"), Err(GameError::SessionEnded));
        assert_eq!(session.state().guessed_codes.len(), 1);
    }

    #[test]
    fn test_timed_countdown_expires_by_tick() {
        let catalog = fixtures::catalog();
        let settings = SessionSettings {
            timed_limit_secs: 2,
            ..SessionSettings::default()
        };
        let mut session = Session::new(&catalog, GameMode::Timed, settings);
        assert_eq!(session.state().time, 2);

        guess(&mut session, "France");
        assert_eq!(session.tick(), None);
        assert_eq!(
            session.tick(),
            Some(GameEvent::SessionEnded {
                reason: EndReason::TimeExpired
            })
        );
        assert_eq!(session.phase(), &Phase::Ended(EndReason::TimeExpired));
        assert_eq!(session.tick(), None);
    }

    #[test]
    fn test_timed_penalty_counts_down_and_can_expire() {
        let catalog = fixtures::catalog();
        let settings = SessionSettings {
            timed_limit_secs: 8,
            ..SessionSettings::default()
        };
        let mut session = Session::new(&catalog, GameMode::Timed, settings);
        guess(&mut session, "nowhere land");
        assert_eq!(session.state().time, 3);

        let report = guess(&mut session, "nowhere land");
        assert_eq!(session.state().time, 0);
        assert_eq!(
            report.events,
            vec![GameEvent::SessionEnded {
                reason: EndReason::TimeExpired
            }]
        );
        assert!(session.phase().is_ended());
    }

    #[test]
    fn test_restart_clears_progress_and_keeps_mode() {
        let catalog = fixtures::catalog();
        let settings = SessionSettings {
            timed_limit_secs: 60,
            ..SessionSettings::default()
        };
        let mut session = Session::new(&catalog, GameMode::Timed, settings);
        guess(&mut session, "France");
        session.tick();
        session.end_game();

        session.restart();
        assert_eq!(session.phase(), &Phase::Idle);
        assert_eq!(session.mode(), &GameMode::Timed);
        assert_eq!(session.state().time, 60);
        assert!(session.state().guessed_codes.is_empty());
        assert!(session.state().recent.is_empty());
        assert_eq!(session.state().streak, 0);
    }

    #[test]
    fn test_mode_change_without_progress_applies_immediately() {
        let catalog = fixtures::catalog();
        let mut session = Session::new(&catalog, GameMode::Classic, SessionSettings::default());
        assert_eq!(session.request_mode_change("us-states"), Ok(ModeChange::Applied));
        assert_eq!(session.mode(), &GameMode::UsStates);

        let report = guess(&mut session, "ca");
        assert_eq!(
            report.outcome,
            Outcome::Correct {
                code: "CA".to_string(),
                name: "California".to_string()
            }
        );
    }

    #[test]
    fn test_mode_change_with_progress_needs_confirmation() {
        let catalog = fixtures::catalog();
        let mut session = Session::new(&catalog, GameMode::Classic, SessionSettings::default());
        guess(&mut session, "France");

        let ModeChange::NeedsConfirmation(pending) =
            session.request_mode_change("oceania").unwrap()
        else {
            panic!("expected confirmation request");
        };
        assert_eq!(pending.mode().slug(), "oceania");
        drop(pending);
        assert_eq!(session.mode(), &GameMode::Classic);
        assert_eq!(session.state().guessed_codes.len(), 1);

        let ModeChange::NeedsConfirmation(pending) = session.request_mode(oceania(&catalog))
        else {
            panic!("expected confirmation request");
        };
        session.confirm_mode_change(pending);
        assert_eq!(session.mode().slug(), "oceania");
        assert!(session.state().guessed_codes.is_empty());
        assert_eq!(session.phase(), &Phase::Idle);
    }

    #[test]
    fn test_unknown_mode_leaves_session_untouched() {
        let catalog = fixtures::catalog();
        let mut session = Session::new(&catalog, GameMode::Classic, SessionSettings::default());
        guess(&mut session, "France");
        assert_eq!(
            session.request_mode_change("atlantis"),
            Err(GameError::UnknownMode("atlantis".to_string()))
        );
        assert_eq!(session.mode(), &GameMode::Classic);
        assert_eq!(session.phase(), &Phase::Running);
    }

    #[test]
    fn test_language_switch_affects_names() {
        let catalog = fixtures::catalog();
        let mut session = Session::new(&catalog, GameMode::Classic, SessionSettings::default());
        session.set_language(Language::Fr);
        let report = guess(&mut session, "Germany");
        assert_eq!(
            report.outcome,
            Outcome::Correct {
                code: "DE".to_string(),
                name: "Allemagne".to_string()
            }
        );
        assert_eq!(session.state().recent[0].name, "Allemagne");
    }

    #[test]
    fn test_recent_list_is_bounded_most_recent_first() {
        let mut state = SessionState::new(GameMode::Classic, 0);
        for i in 0..10 {
            state.push_recent(RecentGuess {
                code: format!("C{i}"),
                name: format!("Country {i}"),
            });
        }
        assert_eq!(state.recent.len(), RECENT_GUESS_LIMIT);
        assert_eq!(state.recent[0].code, "C9");
        assert_eq!(state.recent[7].code, "C2");
    }

    #[test]
    fn test_resume_expired_timed_session_is_ended() {
        let catalog = fixtures::catalog();
        let state = SessionState::new(GameMode::Timed, 0);
        let mut session = Session::resume(&catalog, state, SessionSettings::default());
        assert_eq!(session.phase(), &Phase::Ended(EndReason::TimeExpired));
        assert_eq!(session.submit_guess("France"), Err(GameError::SessionEnded));
    }
}
