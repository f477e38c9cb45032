//! Progressive hints for entities the player has not named yet.
//!
//! Countries reveal their capital, then their continent. States climb a
//! six-step ladder that starts with trivia and ends with every bordering
//! state:
//!
//! ```text
//! 1  famous person       4  capital
//! 2  mid-size city       5  one neighbor
//! 3  major city          6  all neighbors
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::entity::{Country, State};
use crate::catalog::Collection;
use crate::error::GameError;

pub const COUNTRY_HINT_LEVELS: u8 = 2;
pub const STATE_HINT_LEVELS: u8 = 6;

const NO_NEIGHBORS: &str = "This state has no bordering states";

/// Hint material for one state, as stored in `state_hints.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateHints {
    pub famous_person: String,
    /// Mid-size cities, never the capital
    #[serde(default)]
    pub cities: Vec<String>,
    /// Large cities other than the capital
    #[serde(default)]
    pub top_cities: Vec<String>,
    /// Bordering state codes
    #[serde(default)]
    pub neighbors: Vec<String>,
}

/// One revealed hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hint {
    pub level: u8,
    pub label: &'static str,
    pub value: String,
}

impl Hint {
    fn new(level: u8, label: &'static str, value: impl Into<String>) -> Self {
        Self {
            level,
            label,
            value: value.into(),
        }
    }
}

/// Highest hint level available for a collection.
pub fn max_level(collection: Collection) -> u8 {
    match collection {
        Collection::Countries => COUNTRY_HINT_LEVELS,
        Collection::States => STATE_HINT_LEVELS,
    }
}

pub(crate) fn check_level(collection: Collection, level: u8) -> Result<(), GameError> {
    let max = max_level(collection);
    if (1..=max).contains(&level) {
        Ok(())
    } else {
        Err(GameError::HintLevel { level, max })
    }
}

pub(crate) fn country_hint(country: &Country, level: u8) -> Hint {
    if level == 1 {
        Hint::new(level, "Capital", country.capital.as_str())
    } else {
        Hint::new(level, "Continent", country.continent.as_str())
    }
}

/// Hint for a state at an already validated level. `neighbor_name` maps a
/// bordering state code to its display name.
pub(crate) fn state_hint(
    state: &State,
    hints: Option<&StateHints>,
    neighbor_name: impl Fn(&str) -> String,
    level: u8,
) -> Result<Hint, GameError> {
    if level == 4 {
        return Ok(Hint::new(level, "Capital", state.capital.as_str()));
    }
    let hints = hints.ok_or_else(|| GameError::NoHints(state.code.clone()))?;

    let hint = match level {
        1 => Hint::new(level, "Famous person", hints.famous_person.as_str()),
        2 => {
            let city = hints.cities.first().unwrap_or(&state.capital);
            Hint::new(level, "A mid-size city in this state", city.as_str())
        }
        3 => match hints.top_cities.first() {
            Some(city) => Hint::new(level, "A major city", city.as_str()),
            None => Hint::new(level, "Note", "The capital is also the largest city"),
        },
        5 => match hints.neighbors.first() {
            Some(code) => Hint::new(level, "A neighboring state", neighbor_name(code)),
            None => Hint::new(level, "Neighbors", NO_NEIGHBORS),
        },
        _ if hints.neighbors.is_empty() => Hint::new(level, "Neighbors", NO_NEIGHBORS),
        _ => {
            let names: Vec<String> = hints.neighbors.iter().map(|c| neighbor_name(c)).collect();
            Hint::new(level, "All neighbors", names.join(", "))
        }
    };
    Ok(hint)
}
