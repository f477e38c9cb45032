//! Game modes and their slugs
//!
//! A mode selects the active collection, an optional group filter and the
//! clock direction:
//!
//! | slug                     | collection | filter    | clock |
//! |--------------------------|------------|-----------|-------|
//! | `classic`                | countries  | none      | up    |
//! | `timed`                  | countries  | none      | down  |
//! | `us-states`              | states     | none      | up    |
//! | continent slug           | countries  | continent | up    |
//! | region slug              | states     | region    | up    |
//!
//! Group slugs are derived from the catalog's group names by lowercasing and
//! replacing spaces with dashes (`"North America"` -> `north-america`).

use std::fmt;

use crate::catalog::{Catalog, Collection};
use crate::error::GameError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameMode {
    Classic,
    Timed,
    UsStates,
    /// Only members of one group count; other correct names are penalized.
    GroupRestricted {
        collection: Collection,
        group: String,
    },
}

/// Slug form of a group name.
pub fn group_slug(group: &str) -> String {
    group
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

impl GameMode {
    /// Parse a mode slug against the catalog's group lists.
    pub fn parse(slug: &str, catalog: &Catalog) -> Result<Self, GameError> {
        let slug = slug.trim().to_ascii_lowercase();
        match slug.as_str() {
            "classic" => return Ok(GameMode::Classic),
            "timed" => return Ok(GameMode::Timed),
            "us-states" => return Ok(GameMode::UsStates),
            _ => {}
        }

        for collection in [Collection::Countries, Collection::States] {
            if let Some(group) = catalog
                .groups(collection)
                .iter()
                .find(|g| group_slug(g) == slug)
            {
                return Ok(GameMode::GroupRestricted {
                    collection,
                    group: group.clone(),
                });
            }
        }

        Err(GameError::UnknownMode(slug))
    }

    /// Restrict play to one group, validating the group key.
    pub fn restricted(
        collection: Collection,
        group: &str,
        catalog: &Catalog,
    ) -> Result<Self, GameError> {
        if !catalog.has_group(collection, group) {
            return Err(GameError::UnknownGroup(group.to_string()));
        }
        Ok(GameMode::GroupRestricted {
            collection,
            group: group.to_string(),
        })
    }

    pub fn slug(&self) -> String {
        match self {
            GameMode::Classic => "classic".to_string(),
            GameMode::Timed => "timed".to_string(),
            GameMode::UsStates => "us-states".to_string(),
            GameMode::GroupRestricted { group, .. } => group_slug(group),
        }
    }

    pub fn collection(&self) -> Collection {
        match self {
            GameMode::Classic | GameMode::Timed => Collection::Countries,
            GameMode::UsStates => Collection::States,
            GameMode::GroupRestricted { collection, .. } => *collection,
        }
    }

    pub fn group_filter(&self) -> Option<&str> {
        match self {
            GameMode::GroupRestricted { group, .. } => Some(group),
            _ => None,
        }
    }

    /// Whether the clock counts down from the configured limit.
    pub fn counts_down(&self) -> bool {
        matches!(self, GameMode::Timed)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;

    #[test]
    fn test_parse_fixed_modes() {
        let catalog = fixtures::catalog();
        assert_eq!(GameMode::parse("classic", &catalog), Ok(GameMode::Classic));
        assert_eq!(GameMode::parse(" TIMED ", &catalog), Ok(GameMode::Timed));
        assert_eq!(GameMode::parse("us-states", &catalog), Ok(GameMode::UsStates));
    }

    #[test]
    fn test_parse_group_slugs() {
        let catalog = fixtures::catalog();
        let mode = GameMode::parse("north-america", &catalog).unwrap();
        assert_eq!(
            mode,
            GameMode::GroupRestricted {
                collection: Collection::Countries,
                group: "North America".to_string(),
            }
        );
        assert_eq!(mode.slug(), "north-america");

        let west = GameMode::parse("west", &catalog).unwrap();
        assert_eq!(west.collection(), Collection::States);
        assert_eq!(west.group_filter(), Some("West"));
    }

    #[test]
    fn test_unknown_mode_and_group_are_rejected() {
        let catalog = fixtures::catalog();
        assert_eq!(
            GameMode::parse("atlantis", &catalog),
            Err(GameError::UnknownMode("atlantis".to_string()))
        );
        assert_eq!(
            GameMode::restricted(Collection::Countries, "Atlantis", &catalog),
            Err(GameError::UnknownGroup("Atlantis".to_string()))
        );
        // Region names are not continents
        assert!(GameMode::restricted(Collection::Countries, "West", &catalog).is_err());
    }

    #[test]
    fn test_mode_properties() {
        assert!(GameMode::Timed.counts_down());
        assert!(!GameMode::Classic.counts_down());
        assert_eq!(GameMode::UsStates.collection(), Collection::States);
        assert_eq!(GameMode::Classic.group_filter(), None);
    }
}
