//! Guess resolution: raw text to a catalog entity
//!
//! Lookup order for language `L`:
//! 1. primary registry in `L` (exact, then fuzzy)
//! 2. primary registry in English, when `L` is not English
//! 3. dependency registry the same way (countries only)
//!
//! A fuzzy primary match therefore wins over an exact dependency match.

use crate::catalog::{Catalog, Collection, Dependency, EntityRegistry, Guessable};
use crate::language::Language;
use crate::normalize::normalize_guess;

/// What a guess resolved to.
#[derive(Debug, Clone)]
pub enum ResolvedGuess<'a> {
    /// A country or state of the active collection.
    Primary(&'a dyn Guessable),
    /// A territory; credited only through its parent.
    Dependency(&'a Dependency),
    /// Nothing matched; carries the raw input.
    NoMatch(String),
}

impl ResolvedGuess<'_> {
    pub fn code(&self) -> Option<&str> {
        match self {
            ResolvedGuess::Primary(entity) => Some(entity.code()),
            ResolvedGuess::Dependency(dep) => Some(&dep.code),
            ResolvedGuess::NoMatch(_) => None,
        }
    }
}

/// Resolves raw guesses against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct GuessResolver<'a> {
    catalog: &'a Catalog,
}

impl<'a> GuessResolver<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn resolve(
        &self,
        raw: &str,
        language: Language,
        collection: Collection,
    ) -> ResolvedGuess<'a> {
        let input = normalize_guess(raw);
        if input.is_empty() {
            return ResolvedGuess::NoMatch(raw.to_string());
        }

        let languages = search_order(language);
        let resolved = match collection {
            Collection::Countries => lookup(self.catalog.countries(), &input, &languages)
                .map(|c| ResolvedGuess::Primary(c as &dyn Guessable))
                .or_else(|| {
                    lookup(self.catalog.dependencies(), &input, &languages)
                        .map(ResolvedGuess::Dependency)
                }),
            Collection::States => lookup(self.catalog.states(), &input, &languages)
                .map(|s| ResolvedGuess::Primary(s as &dyn Guessable)),
        };

        let resolved = resolved.unwrap_or_else(|| ResolvedGuess::NoMatch(raw.to_string()));
        tracing::debug!(
            input = %input,
            language = %language,
            code = resolved.code().unwrap_or("-"),
            "guess resolved"
        );
        resolved
    }
}

fn search_order(language: Language) -> Vec<Language> {
    if language.is_native() {
        vec![language]
    } else {
        vec![language, Language::NATIVE]
    }
}

fn lookup<'r, E: Guessable>(
    registry: &'r EntityRegistry<E>,
    input: &str,
    languages: &[Language],
) -> Option<&'r E> {
    languages.iter().find_map(|&language| {
        registry
            .find_exact(input, language)
            .or_else(|| registry.find_fuzzy(input, language))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;
    use crate::catalog::Collection::{Countries, States};
    use crate::language::Language::{En, Fr};

    /// Code the guess resolves to, or "-".
    fn resolves_to(raw: &str, language: Language, collection: Collection) -> String {
        let catalog = fixtures::catalog();
        let resolver = GuessResolver::new(&catalog);
        resolver
            .resolve(raw, language, collection)
            .code()
            .unwrap_or("-")
            .to_string()
    }

    #[test]
    fn test_exact_and_fuzzy_primary() {
        let catalog = fixtures::catalog();
        let resolver = GuessResolver::new(&catalog);
        assert!(matches!(
            resolver.resolve("  FRANCE ", En, Countries),
            ResolvedGuess::Primary(e) if e.code() == "FR"
        ));
        assert_eq!(resolves_to("Germani", En, Countries), "DE");
        assert_eq!(resolves_to("usa", En, Countries), "US");
    }

    #[test]
    fn test_dependency_after_primary_miss() {
        let catalog = fixtures::catalog();
        let resolver = GuessResolver::new(&catalog);
        match resolver.resolve("Greenland", En, Countries) {
            ResolvedGuess::Dependency(dep) => {
                assert_eq!(dep.code, "GL");
                assert_eq!(dep.parent_code, "DK");
            }
            other => panic!("expected dependency, got {other:?}"),
        }
    }

    #[test]
    fn test_french_then_english_fallback() {
        assert_eq!(resolves_to("Allemagne", Fr, Countries), "DE");
        assert_eq!(resolves_to("Germany", Fr, Countries), "DE");
        // Tonga has no French entry; only the English pass finds it
        assert_eq!(resolves_to("Tonga", Fr, Countries), "TO");
        // English guesses never see French names
        assert_eq!(resolves_to("Allemagne", En, Countries), "-");
    }

    #[test]
    fn test_states_collection_ignores_countries() {
        assert_eq!(resolves_to("ca", En, States), "CA");
        assert_eq!(resolves_to("Texs", En, States), "TX");
        assert_eq!(resolves_to("France", En, States), "-");
        assert_eq!(resolves_to("Greenland", En, States), "-");
    }

    #[test]
    fn test_blank_and_garbage_input() {
        let catalog = fixtures::catalog();
        let resolver = GuessResolver::new(&catalog);
        assert!(matches!(
            resolver.resolve("   ", En, Countries),
            ResolvedGuess::NoMatch(ref raw) if raw == "   "
        ));
        assert_eq!(resolves_to("", Fr, States), "-");
        assert_eq!(resolves_to("Frxxxxxxxxx", En, Countries), "-");
    }
}
