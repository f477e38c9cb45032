//! Progress queries over a guessed-code set.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::catalog::{Catalog, Collection};
use crate::language::Language;
use crate::outcome::RecentGuess;

/// Per-group completion counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupProgress {
    pub group: String,
    pub guessed: usize,
    pub total: usize,
}

impl GroupProgress {
    /// Completion in percent, rounded down. An empty group reports 0.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.guessed * 100 / self.total) as u32
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.guessed == self.total
    }
}

/// Unguessed members of one group, for the end-of-game summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissedGroup {
    pub group: String,
    pub missed: Vec<RecentGuess>,
}

/// Guessed/total per group, in table order.
pub fn group_progress(
    catalog: &Catalog,
    collection: Collection,
    guessed: &BTreeSet<String>,
) -> Vec<GroupProgress> {
    catalog
        .groups(collection)
        .iter()
        .map(|group| {
            let members = catalog.group_members(collection, group);
            GroupProgress {
                group: group.clone(),
                guessed: members.iter().filter(|m| guessed.contains(m.code())).count(),
                total: members.len(),
            }
        })
        .collect()
}

/// Unguessed primary entities per group, sorted by display name. Groups
/// with nothing missed are left out.
pub fn missed_by_group(
    catalog: &Catalog,
    collection: Collection,
    guessed: &BTreeSet<String>,
    language: Language,
) -> Vec<MissedGroup> {
    catalog
        .groups(collection)
        .iter()
        .filter_map(|group| {
            let mut missed: Vec<RecentGuess> = catalog
                .group_members(collection, group)
                .into_iter()
                .filter(|m| !guessed.contains(m.code()))
                .map(|m| RecentGuess {
                    code: m.code().to_string(),
                    name: m.display_name(language).to_string(),
                })
                .collect();
            if missed.is_empty() {
                return None;
            }
            missed.sort_by(|a, b| a.name.cmp(&b.name));
            Some(MissedGroup {
                group: group.clone(),
                missed,
            })
        })
        .collect()
}
