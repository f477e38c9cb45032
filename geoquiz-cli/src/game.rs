//! Interactive game loop
//!
//! Stdin is read on a helper thread; the main thread owns the session and
//! wakes once a second to tick the clock.

use colored::Colorize;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use geoquiz_core::catalog::hint;
use geoquiz_core::snapshot::persist;
use geoquiz_core::{
    EndReason, GameError, GameEvent, Language, ModeChange, Outcome, PendingModeChange, Phase,
    Session, SnapshotStore,
};

const TICK: Duration = Duration::from_secs(1);

/// Seconds left at which a timed game warns the player.
const COUNTDOWN_WARNINGS: [u32; 3] = [60, 30, 10];

// =============================================================================
// INPUT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Guess(String),
    /// Empty line: closes a celebration
    Continue,
    End,
    Restart,
    Mode(String),
    Lang(String),
    Progress,
    Missed,
    /// Next hint for an entity code
    Hint(String),
    Confirm,
    Help,
    Quit,
    Unknown(String),
}

/// Lines starting with `:` are commands, everything else is a guess.
pub fn parse_input(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Continue;
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Guess(line.to_string());
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    match (name.as_str(), arg.is_empty()) {
        ("end", _) => Command::End,
        ("restart", _) => Command::Restart,
        ("mode", false) => Command::Mode(arg.to_string()),
        ("lang", false) => Command::Lang(arg.to_string()),
        ("progress" | "p", _) => Command::Progress,
        ("missed", _) => Command::Missed,
        ("hint", false) => Command::Hint(arg.to_string()),
        ("yes" | "y", _) => Command::Confirm,
        ("help" | "h" | "?", _) => Command::Help,
        ("quit" | "q", _) => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// =============================================================================
// GAME
// =============================================================================

pub struct Game<'a> {
    session: Session<'a>,
    store: &'a dyn SnapshotStore,
    pending: Option<PendingModeChange>,
    /// Hint levels already shown, per uppercase code
    hints_shown: HashMap<String, u8>,
    /// A notice that must stay the last thing on screen until then
    notice_held_until: Option<Instant>,
    /// Countdown warning postponed by a held notice
    deferred_warning: Option<u32>,
}

impl<'a> Game<'a> {
    pub fn new(session: Session<'a>, store: &'a dyn SnapshotStore) -> Self {
        Self {
            session,
            store,
            pending: None,
            hints_shown: HashMap::new(),
            notice_held_until: None,
            deferred_warning: None,
        }
    }

    pub fn session(&self) -> &Session<'a> {
        &self.session
    }

    /// Drop per-round CLI state after a restart or mode switch.
    fn forget_round(&mut self) {
        self.hints_shown.clear();
        self.notice_held_until = None;
        self.deferred_warning = None;
    }

    pub fn notice_held(&self) -> bool {
        self.notice_held_until.is_some_and(|until| Instant::now() < until)
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        if let Some(pending) = self.pending.take() {
            if command == Command::Confirm {
                self.session.confirm_mode_change(pending);
                self.forget_round();
                self.clear_saved();
                self.print_banner();
                return Flow::Continue;
            }
            // Anything else aborts the switch
            println!("{}", "Mode change cancelled.".dimmed());
        }

        match command {
            Command::Guess(raw) => self.guess(&raw),
            Command::Continue => {
                if self.session.dismiss_celebration() {
                    if self.session.phase() == &Phase::Completed {
                        println!("Target complete. Keep guessing or type :end.");
                    } else {
                        println!("{}", "Clock is running again.".dimmed());
                    }
                }
            }
            Command::End => {
                if self.session.end_game().is_some() {
                    self.finish();
                }
            }
            Command::Restart => {
                self.session.restart();
                self.forget_round();
                self.clear_saved();
                self.print_banner();
            }
            Command::Mode(slug) => match self.session.request_mode_change(&slug) {
                Ok(ModeChange::Applied) => {
                    self.forget_round();
                    self.clear_saved();
                    self.print_banner();
                }
                Ok(ModeChange::NeedsConfirmation(pending)) => {
                    println!(
                        "Switching to {} discards {} guessed. Type :yes to confirm.",
                        pending.mode().slug().bold(),
                        self.session.score()
                    );
                    self.pending = Some(pending);
                }
                Err(e) => print_error(&e),
            },
            Command::Lang(code) => match code.parse::<Language>() {
                Ok(language) => {
                    self.session.set_language(language);
                    println!("Guessing in {}.", language.code().bold());
                }
                Err(e) => print_error(&e),
            },
            Command::Progress => self.print_progress(),
            Command::Missed => self.print_missed(),
            Command::Hint(code) => self.hint(&code),
            Command::Confirm => println!("{}", "Nothing to confirm.".dimmed()),
            Command::Help => print_help(),
            Command::Quit => return Flow::Quit,
            Command::Unknown(input) => {
                println!("Unknown command {}. Type :help.", input.yellow());
            }
        }
        Flow::Continue
    }

    fn guess(&mut self, raw: &str) {
        let report = match self.session.submit_guess(raw) {
            Ok(Some(report)) => report,
            Ok(None) => return,
            Err(GameError::SessionEnded) => {
                println!("The game is over. Type :restart to play again.");
                return;
            }
            Err(e) => {
                print_error(&e);
                return;
            }
        };

        print_outcome(&report.outcome);
        self.notice_held_until = report
            .outcome
            .status_hold()
            .map(|hold| Instant::now() + hold);
        if report.should_persist {
            self.save();
        }
        for event in &report.events {
            self.on_event(event);
        }
    }

    /// Reveal the next hint for `code` in the current collection.
    fn hint(&mut self, code: &str) {
        let code = code.to_ascii_uppercase();
        let collection = self.session.mode().collection();
        let max = hint::max_level(collection);
        let level = self.hints_shown.get(&code).copied().unwrap_or(0) + 1;
        if level > max {
            println!("{}", format!("No more hints for {code}.").dimmed());
            return;
        }

        match self.session.catalog().hint(collection, &code, level) {
            Ok(hint) => {
                println!(
                    "{} {}/{}  {}: {}",
                    "Hint".cyan(),
                    hint.level,
                    max,
                    hint.label.bold(),
                    hint.value
                );
                self.hints_shown.insert(code, level);
            }
            Err(e) => print_error(&e),
        }
    }

    /// Advance the clock by one second. Countdown warnings wait while a
    /// notice is held on screen.
    pub fn tick(&mut self) {
        if let Some(event) = self.session.tick() {
            self.on_event(&event);
            return;
        }

        let time = self.session.state().time;
        if self.session.mode().counts_down()
            && self.session.phase().is_timer_running()
            && COUNTDOWN_WARNINGS.contains(&time)
        {
            self.deferred_warning = Some(time);
        }
        if self.notice_held() {
            return;
        }
        self.notice_held_until = None;
        if let Some(left) = self.deferred_warning.take() {
            println!("{}", format!("{left} seconds left!").yellow());
        }
    }

    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GroupCompleted { group } => {
                println!();
                println!("{}", format!("*** {group} complete! ***").green().bold());
                println!("{}", "Clock paused. Press Enter or keep guessing to continue.".dimmed());
            }
            GameEvent::SessionEnded { reason } => {
                if *reason == EndReason::TimeExpired {
                    println!("{}", "Time's up!".red().bold());
                }
                self.finish();
            }
        }
    }

    fn finish(&mut self) {
        println!();
        println!(
            "{} {} / {} in {}",
            "Final score:".bold(),
            self.session.score(),
            self.session.total(),
            format_clock(self.session.state().time)
        );
        println!("Type :missed to see what you left out, :restart to play again.");
        self.clear_saved();
    }

    fn save(&self) {
        if let Err(e) = persist(self.store, self.session.state()) {
            tracing::warn!(error = %e, "Failed to save progress");
        }
    }

    fn clear_saved(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to clear saved progress");
        }
    }

    /// Save an unfinished game so the next run can resume it.
    pub fn save_on_exit(&self) {
        let state = self.session.state();
        if !self.session.phase().is_ended() && !state.guessed_codes.is_empty() {
            self.save();
        }
    }

    pub fn print_banner(&self) {
        let state = self.session.state();
        println!();
        println!(
            "{} {}  ({} / {}, clock {})",
            "Mode:".bold(),
            self.session.mode().slug().cyan(),
            self.session.score(),
            self.session.total(),
            format_clock(state.time)
        );
        if !state.recent.is_empty() {
            let recent: Vec<&str> = state.recent.iter().map(|r| r.name.as_str()).collect();
            println!("{} {}", "Recent:".dimmed(), recent.join(", "));
        }
        println!("{}", "Type a name to guess, :help for commands.".dimmed());
    }

    fn print_progress(&self) {
        for progress in self.session.group_progress() {
            let line = format!(
                "{:<15} {:>3} / {:<3} {:>3}%",
                progress.group,
                progress.guessed,
                progress.total,
                progress.percentage()
            );
            if progress.is_complete() {
                println!("{}", line.green());
            } else {
                println!("{line}");
            }
        }
        println!(
            "{} {}  {} {}",
            "Streak:".dimmed(),
            self.session.state().streak,
            "Clock:".dimmed(),
            format_clock(self.session.state().time)
        );
    }

    fn print_missed(&self) {
        let missed = self.session.missed_by_group();
        if missed.is_empty() {
            println!("{}", "Nothing missed!".green());
        }
        for group in missed {
            let names: Vec<&str> = group.missed.iter().map(|m| m.name.as_str()).collect();
            println!("{} ({})", group.group.bold(), names.len());
            println!("  {}", names.join(", "));
        }
    }
}

// =============================================================================
// RENDERING
// =============================================================================

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Correct { name, .. } => println!("{} {}", "✓".green(), name.green()),
        Outcome::CorrectWithDependents {
            name, dependents, ..
        } => {
            let deps: Vec<&str> = dependents.iter().map(|d| d.name.as_str()).collect();
            println!(
                "{} {} (includes {})",
                "✓".green(),
                name.green(),
                deps.join(", ")
            );
        }
        Outcome::Duplicate { name, .. } => {
            println!("{} {} was already guessed", "⚠".yellow(), name)
        }
        Outcome::DependencyOnly {
            name, parent_name, ..
        } => println!(
            "{} {} is a territory of {}; name the country instead",
            "⚠".yellow(),
            name,
            parent_name.bold()
        ),
        Outcome::WrongGroup {
            name,
            group,
            expected_group,
            ..
        } => println!(
            "{} {} is in {}, not {} (5 s penalty)",
            "✗".red(),
            name,
            group,
            expected_group.bold()
        ),
        Outcome::Wrong { input } => {
            println!("{} \"{}\" not recognised (5 s penalty)", "✗".red(), input)
        }
    }
}

fn print_error(err: &GameError) {
    eprintln!("{}: {}", "error".red().bold(), err);
}

fn print_help() {
    println!("  <name>          guess a country or state");
    println!("  <Enter>         close a completion message");
    println!("  :progress       per-group progress");
    println!("  :missed         everything not yet guessed");
    println!("  :hint <code>    next hint for a country or state code");
    println!("  :mode <slug>    switch mode (see `geoquiz modes`)");
    println!("  :lang <en|fr>   guess language");
    println!("  :end            end the game");
    println!("  :restart        start over");
    println!("  :quit           save and exit");
}

pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

// =============================================================================
// LOOP
// =============================================================================

/// Run until `:quit` or end of input.
pub fn run(game: &mut Game<'_>) {
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    game.print_banner();
    prompt();
    let mut next_tick = Instant::now() + TICK;
    loop {
        let wait = next_tick.saturating_duration_since(Instant::now());
        match rx.recv_timeout(wait) {
            Ok(line) => {
                if game.handle(parse_input(&line)) == Flow::Quit {
                    break;
                }
                prompt();
            }
            Err(RecvTimeoutError::Timeout) => {
                next_tick += TICK;
                game.tick();
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    game.save_on_exit();
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoquiz_core::{Catalog, GameMode, MemorySnapshotStore, SessionSettings};

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("  France "), Command::Guess("France".to_string()));
        assert_eq!(parse_input(""), Command::Continue);
        assert_eq!(parse_input(":END"), Command::End);
        assert_eq!(parse_input(":mode  oceania "), Command::Mode("oceania".to_string()));
        assert_eq!(parse_input(":lang fr"), Command::Lang("fr".to_string()));
        assert_eq!(parse_input(":y"), Command::Confirm);
        assert_eq!(parse_input(":hint tx"), Command::Hint("tx".to_string()));
        assert_eq!(parse_input(":hint"), Command::Unknown(":hint".to_string()));
        assert_eq!(parse_input(":mode"), Command::Unknown(":mode".to_string()));
        assert_eq!(parse_input(":dance"), Command::Unknown(":dance".to_string()));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(905), "15:05");
    }

    #[test]
    fn test_game_persists_and_confirms_mode_change() {
        let catalog = Catalog::load_dir(&Catalog::bundled_data_dir()).unwrap();
        let store = MemorySnapshotStore::new();
        let session = Session::new(&catalog, GameMode::Classic, SessionSettings::default());
        let mut game = Game::new(session, &store);

        game.handle(Command::Guess("Denmark".to_string()));
        assert!(store.load().unwrap().unwrap().contains("\"GL\""));

        game.handle(Command::Mode("oceania".to_string()));
        assert_eq!(game.session().mode(), &GameMode::Classic);
        // Any other input cancels
        game.handle(Command::Progress);
        assert_eq!(game.session().mode(), &GameMode::Classic);

        game.handle(Command::Mode("oceania".to_string()));
        game.handle(Command::Confirm);
        assert_eq!(game.session().mode().slug(), "oceania");
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_hints_advance_per_code_and_stop_at_the_last_level() {
        let catalog = Catalog::load_dir(&Catalog::bundled_data_dir()).unwrap();
        let store = MemorySnapshotStore::new();
        let session = Session::new(&catalog, GameMode::UsStates, SessionSettings::default());
        let mut game = Game::new(session, &store);

        game.handle(Command::Hint("tx".to_string()));
        game.handle(Command::Hint("TX".to_string()));
        assert_eq!(game.hints_shown.get("TX"), Some(&2));

        for _ in 0..10 {
            game.handle(Command::Hint("TX".to_string()));
        }
        assert_eq!(game.hints_shown.get("TX"), Some(&6));

        // Unknown codes are reported, not recorded
        game.handle(Command::Hint("ZZ".to_string()));
        assert!(!game.hints_shown.contains_key("ZZ"));

        game.handle(Command::Restart);
        assert!(game.hints_shown.is_empty());
    }

    #[test]
    fn test_territory_notice_is_held() {
        let catalog = Catalog::load_dir(&Catalog::bundled_data_dir()).unwrap();
        let store = MemorySnapshotStore::new();
        let session = Session::new(&catalog, GameMode::Classic, SessionSettings::default());
        let mut game = Game::new(session, &store);

        game.handle(Command::Guess("Greenland".to_string()));
        assert!(game.notice_held());
        game.handle(Command::Guess("Peru".to_string()));
        assert!(!game.notice_held());
    }

    #[test]
    fn test_penalty_is_saved_immediately() {
        let catalog = Catalog::load_dir(&Catalog::bundled_data_dir()).unwrap();
        let store = MemorySnapshotStore::new();
        let session = Session::new(&catalog, GameMode::Classic, SessionSettings::default());
        let mut game = Game::new(session, &store);

        game.handle(Command::Guess("Peru".to_string()));
        game.handle(Command::Guess("Qwertyuiop".to_string()));
        let saved = store.load().unwrap().unwrap();
        assert!(saved.contains("\"time\":5"));
        assert!(saved.contains("\"streak\":0"));
    }

    #[test]
    fn test_ended_game_is_not_saved() {
        let catalog = Catalog::load_dir(&Catalog::bundled_data_dir()).unwrap();
        let store = MemorySnapshotStore::new();
        let session = Session::new(&catalog, GameMode::Classic, SessionSettings::default());
        let mut game = Game::new(session, &store);

        game.handle(Command::Guess("Peru".to_string()));
        game.handle(Command::End);
        game.save_on_exit();
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(game.handle(Command::Quit), Flow::Quit);
    }
}
