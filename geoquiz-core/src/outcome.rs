//! Outcome classification
//!
//! Turns a resolved guess plus the current progress into an [`Outcome`] and a
//! [`StateDelta`]. The classifier never mutates anything itself; the session
//! applies the delta and then asks for group completions.
//!
//! | Outcome                 | Effect                                      |
//! |-------------------------|---------------------------------------------|
//! | `WrongGroup`            | penalty, streak reset                       |
//! | `Duplicate`             | none                                        |
//! | `CorrectWithDependents` | credit entity + dependencies, streak +1     |
//! | `Correct`               | credit entity, streak +1                    |
//! | `DependencyOnly`        | none, status held for 3 s                   |
//! | `Wrong`                 | penalty, streak reset                       |

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

use crate::catalog::{Catalog, Collection, Guessable};
use crate::language::Language;
use crate::resolver::ResolvedGuess;

/// Seconds charged against the player for a wrong guess.
pub const PENALTY_SECS: u32 = 5;

/// How long a dependency notice stays on screen before it may be cleared.
pub const DEPENDENCY_STATUS_HOLD: Duration = Duration::from_secs(3);

/// Entry of the recent-guess list (and of a dependency listing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentGuess {
    pub code: String,
    pub name: String,
}

impl RecentGuess {
    fn of(entity: &dyn Guessable, language: Language) -> Self {
        Self {
            code: entity.code().to_string(),
            name: entity.display_name(language).to_string(),
        }
    }
}

/// Result of one accepted guess. Names are in the guess language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Correct {
        code: String,
        name: String,
    },
    CorrectWithDependents {
        code: String,
        name: String,
        dependents: Vec<RecentGuess>,
    },
    Duplicate {
        code: String,
        name: String,
    },
    /// A territory was named; only its parent country scores.
    DependencyOnly {
        code: String,
        name: String,
        parent_code: String,
        parent_name: String,
    },
    /// A real entity outside the restricted group.
    WrongGroup {
        code: String,
        name: String,
        group: String,
        expected_group: String,
    },
    Wrong {
        input: String,
    },
}

impl Outcome {
    pub fn is_correct(&self) -> bool {
        matches!(
            self,
            Outcome::Correct { .. } | Outcome::CorrectWithDependents { .. }
        )
    }

    pub fn is_penalized(&self) -> bool {
        matches!(self, Outcome::Wrong { .. } | Outcome::WrongGroup { .. })
    }

    /// Minimum time the status message must stay visible, if any.
    pub fn status_hold(&self) -> Option<Duration> {
        match self {
            Outcome::DependencyOnly { .. } => Some(DEPENDENCY_STATUS_HOLD),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    Keep,
    Increment,
    Reset,
}

/// Mutation the session applies for one outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDelta {
    /// Codes to add to the guessed set, primary first.
    pub credited: Vec<String>,
    pub streak: StreakChange,
    /// Seconds charged against the player; the session decides the direction.
    pub penalty_secs: u32,
    pub recent: Option<RecentGuess>,
}

impl StateDelta {
    pub fn none() -> Self {
        Self {
            credited: Vec::new(),
            streak: StreakChange::Keep,
            penalty_secs: 0,
            recent: None,
        }
    }

    fn penalty() -> Self {
        Self {
            streak: StreakChange::Reset,
            penalty_secs: PENALTY_SECS,
            ..Self::none()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub outcome: Outcome,
    pub delta: StateDelta,
}

/// Classifies resolved guesses against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct OutcomeClassifier<'a> {
    catalog: &'a Catalog,
}

impl<'a> OutcomeClassifier<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn classify(
        &self,
        resolved: &ResolvedGuess<'_>,
        guessed: &BTreeSet<String>,
        collection: Collection,
        group_filter: Option<&str>,
        language: Language,
    ) -> Classification {
        match resolved {
            ResolvedGuess::Primary(entity) => {
                self.classify_primary(*entity, guessed, collection, group_filter, language)
            }
            ResolvedGuess::Dependency(dep) => {
                let parent_name = self
                    .catalog
                    .countries()
                    .get_by_code(&dep.parent_code)
                    .map(|parent| parent.display_name(language).to_string())
                    .unwrap_or_else(|| dep.parent_name.clone());
                Classification {
                    outcome: Outcome::DependencyOnly {
                        code: dep.code.clone(),
                        name: dep.display_name(language).to_string(),
                        parent_code: dep.parent_code.clone(),
                        parent_name,
                    },
                    delta: StateDelta::none(),
                }
            }
            ResolvedGuess::NoMatch(input) => Classification {
                outcome: Outcome::Wrong {
                    input: input.trim().to_string(),
                },
                delta: StateDelta::penalty(),
            },
        }
    }

    fn classify_primary(
        &self,
        entity: &dyn Guessable,
        guessed: &BTreeSet<String>,
        collection: Collection,
        group_filter: Option<&str>,
        language: Language,
    ) -> Classification {
        let code = entity.code().to_string();
        let name = entity.display_name(language).to_string();

        if let Some(expected) = group_filter.filter(|g| *g != entity.group()) {
            return Classification {
                outcome: Outcome::WrongGroup {
                    code,
                    name,
                    group: entity.group().to_string(),
                    expected_group: expected.to_string(),
                },
                delta: StateDelta::penalty(),
            };
        }

        if guessed.contains(&code) {
            return Classification {
                outcome: Outcome::Duplicate { code, name },
                delta: StateDelta::none(),
            };
        }

        let dependents: Vec<RecentGuess> = match collection {
            Collection::Countries => self
                .catalog
                .dependencies_of(&code)
                .into_iter()
                .map(|dep| RecentGuess::of(dep, language))
                .collect(),
            Collection::States => Vec::new(),
        };

        let mut credited = Vec::with_capacity(dependents.len() + 1);
        credited.push(code.clone());
        credited.extend(dependents.iter().map(|d| d.code.clone()));

        let delta = StateDelta {
            credited,
            streak: StreakChange::Increment,
            penalty_secs: 0,
            recent: Some(RecentGuess {
                code: code.clone(),
                name: name.clone(),
            }),
        };

        let outcome = if dependents.is_empty() {
            Outcome::Correct { code, name }
        } else {
            Outcome::CorrectWithDependents {
                code,
                name,
                dependents,
            }
        };

        Classification { outcome, delta }
    }

    /// Groups of `collection` whose primary members are all guessed and
    /// that have not been celebrated yet, in table order.
    pub fn detect_completions(
        &self,
        collection: Collection,
        guessed: &BTreeSet<String>,
        celebrated: &BTreeSet<String>,
    ) -> Vec<String> {
        self.catalog
            .groups(collection)
            .iter()
            .filter(|group| !celebrated.contains(*group))
            .filter(|group| {
                let members = self.catalog.group_members(collection, group);
                !members.is_empty() && members.iter().all(|m| guessed.contains(m.code()))
            })
            .cloned()
            .collect()
    }
}
