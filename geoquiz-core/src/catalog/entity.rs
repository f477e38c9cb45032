//! Guessable entity types and their shared lookup capability.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::language::Language;

/// A translated name and its accepted spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedName {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Name and aliases an entity answers to in one language.
#[derive(Debug, Clone, Copy)]
pub struct NameKeys<'a> {
    pub name: &'a str,
    pub aliases: &'a [String],
}

/// Capability shared by every entity the registry can look up.
///
/// `names` returns `None` when the entity has no name table in the requested
/// language; such entities are invisible to lookups in that language.
pub trait Guessable: fmt::Debug {
    fn code(&self) -> &str;

    /// Completion-tracking group (continent or region).
    fn group(&self) -> &str;

    /// Authoring-language display name.
    fn canonical_name(&self) -> &str;

    fn names(&self, language: Language) -> Option<NameKeys<'_>>;

    /// Whether the two-letter code itself is an accepted guess.
    fn accepts_code_input(&self) -> bool {
        false
    }

    /// Name shown to the player, falling back to the canonical name.
    fn display_name(&self, language: Language) -> &str {
        self.names(language)
            .map(|keys| keys.name)
            .unwrap_or_else(|| self.canonical_name())
    }
}

fn localized_keys<'a>(
    name: &'a str,
    aliases: &'a [String],
    localized: &'a BTreeMap<Language, LocalizedName>,
    language: Language,
) -> Option<NameKeys<'a>> {
    if language.is_native() {
        return Some(NameKeys { name, aliases });
    }
    localized.get(&language).map(|l| NameKeys {
        name: &l.name,
        aliases: &l.aliases,
    })
}

/// A sovereign country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub code: String,
    pub continent: String,
    #[serde(default)]
    pub capital: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub localized: BTreeMap<Language, LocalizedName>,
}

impl Guessable for Country {
    fn code(&self) -> &str {
        &self.code
    }

    fn group(&self) -> &str {
        &self.continent
    }

    fn canonical_name(&self) -> &str {
        &self.name
    }

    fn names(&self, language: Language) -> Option<NameKeys<'_>> {
        localized_keys(&self.name, &self.aliases, &self.localized, language)
    }
}

/// A non-sovereign territory credited through its parent country.
///
/// `continent` is only set when the territory lies on a different continent
/// from its parent; `parent_name` and `parent_continent` are filled in when
/// the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub code: String,
    pub parent_code: String,
    #[serde(default)]
    pub continent: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub localized: BTreeMap<Language, LocalizedName>,
    #[serde(skip)]
    pub parent_name: String,
    #[serde(skip)]
    pub parent_continent: String,
}

impl Dependency {
    /// Whether the territory sits on another continent than its parent.
    pub fn has_geographic_override(&self) -> bool {
        self.continent
            .as_deref()
            .is_some_and(|c| c != self.parent_continent)
    }
}

impl Guessable for Dependency {
    fn code(&self) -> &str {
        &self.code
    }

    fn group(&self) -> &str {
        self.continent.as_deref().unwrap_or(&self.parent_continent)
    }

    fn canonical_name(&self) -> &str {
        &self.name
    }

    fn names(&self, language: Language) -> Option<NameKeys<'_>> {
        localized_keys(&self.name, &self.aliases, &self.localized, language)
    }
}

/// A U.S. state. States have no translations; every language sees the
/// English names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub name: String,
    pub code: String,
    pub region: String,
    #[serde(default)]
    pub capital: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Guessable for State {
    fn code(&self) -> &str {
        &self.code
    }

    fn group(&self) -> &str {
        &self.region
    }

    fn canonical_name(&self) -> &str {
        &self.name
    }

    fn names(&self, _language: Language) -> Option<NameKeys<'_>> {
        Some(NameKeys {
            name: &self.name,
            aliases: &self.aliases,
        })
    }

    fn accepts_code_input(&self) -> bool {
        true
    }
}
