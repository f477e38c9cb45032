//! Read-only registry over one entity collection
//!
//! The `EntityRegistry` keeps entities in table order and precomputes the
//! normalized lookup keys for every language each entity answers to. Table
//! order is significant: fuzzy ties go to the entity seen first.

use std::collections::{BTreeMap, HashMap};

use crate::catalog::entity::Guessable;
use crate::error::CatalogError;
use crate::language::Language;
use crate::normalize::{char_len, normalize_guess};
use crate::similarity::{similarity, FUZZY_THRESHOLD, MIN_FUZZY_LEN};

/// Normalized keys for one entity: name first, then aliases.
type KeySet = BTreeMap<Language, Vec<String>>;

/// Registry of entities of one kind, with exact and fuzzy lookup
#[derive(Debug)]
pub struct EntityRegistry<E> {
    /// Collection name used in errors and logs ("countries", "states", ...)
    collection: &'static str,
    /// Entities in table order
    entities: Vec<E>,
    /// Lookup keys per entity, parallel to `entities`
    keys: Vec<KeySet>,
    /// Uppercase code -> index into `entities`
    by_code: HashMap<String, usize>,
}

impl<E: Guessable> EntityRegistry<E> {
    /// Build a registry, rejecting malformed and duplicate codes.
    pub fn new(collection: &'static str, entities: Vec<E>) -> Result<Self, CatalogError> {
        let mut by_code = HashMap::with_capacity(entities.len());
        let mut keys = Vec::with_capacity(entities.len());

        for (idx, entity) in entities.iter().enumerate() {
            let code = entity.code();
            if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(CatalogError::InvalidCode {
                    collection,
                    code: code.to_string(),
                });
            }
            if by_code.insert(code.to_ascii_uppercase(), idx).is_some() {
                return Err(CatalogError::DuplicateCode {
                    collection,
                    code: code.to_string(),
                });
            }
            keys.push(Self::key_set(entity));
        }

        Ok(Self {
            collection,
            entities,
            keys,
            by_code,
        })
    }

    fn key_set(entity: &E) -> KeySet {
        Language::ALL
            .iter()
            .filter_map(|&language| {
                entity.names(language).map(|names| {
                    let mut set = Vec::with_capacity(names.aliases.len() + 1);
                    set.push(normalize_guess(names.name));
                    set.extend(names.aliases.iter().map(|a| normalize_guess(a)));
                    (language, set)
                })
            })
            .collect()
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    /// Entity whose name or alias in `language` equals the normalized input.
    pub fn find_exact(&self, input: &str, language: Language) -> Option<&E> {
        self.entities
            .iter()
            .zip(&self.keys)
            .find(|(entity, keys)| {
                let by_name = keys
                    .get(&language)
                    .is_some_and(|set| set.iter().any(|k| k == input));
                let by_code =
                    entity.accepts_code_input() && entity.code().eq_ignore_ascii_case(input);
                by_name || by_code
            })
            .map(|(entity, _)| entity)
    }

    /// Best-scoring entity by name/alias similarity, if it clears the
    /// threshold. Inputs shorter than the minimum length never match.
    pub fn find_fuzzy(&self, input: &str, language: Language) -> Option<&E> {
        self.best_candidate(input, language)
            .filter(|(_, score)| *score >= FUZZY_THRESHOLD)
            .map(|(entity, score)| {
                tracing::debug!(
                    collection = self.collection,
                    input,
                    code = entity.code(),
                    score,
                    "fuzzy match accepted"
                );
                entity
            })
    }

    /// Highest-scoring candidate regardless of threshold. A later candidate
    /// only replaces the current best on a strictly greater score.
    pub fn best_candidate(&self, input: &str, language: Language) -> Option<(&E, f64)> {
        if char_len(input) < MIN_FUZZY_LEN {
            return None;
        }

        let mut best: Option<(&E, f64)> = None;
        for (entity, keys) in self.entities.iter().zip(&self.keys) {
            let Some(set) = keys.get(&language) else {
                continue;
            };
            for key in set {
                let score = similarity(input, key);
                if best.map_or(true, |(_, top)| score > top) {
                    best = Some((entity, score));
                }
            }
        }
        best
    }

    /// Case-insensitive code lookup.
    pub fn get_by_code(&self, code: &str) -> Option<&E> {
        self.by_code
            .get(&code.to_ascii_uppercase())
            .map(|&idx| &self.entities[idx])
    }

    /// Entities of one group, in table order.
    pub fn members_of(&self, group: &str) -> Vec<&E> {
        self.entities.iter().filter(|e| e.group() == group).collect()
    }

    pub fn group_size(&self, group: &str) -> usize {
        self.entities.iter().filter(|e| e.group() == group).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
