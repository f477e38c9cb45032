//! Entity catalog: the three registries and their group lists
//!
//! The catalog is loaded once from YAML tables and validated up front.
//! Integrity faults (duplicate codes, unknown groups, dangling parents)
//! surface as [`CatalogError`] and are fatal; nothing is re-checked during
//! play.
//!
//! Table layout under a data directory:
//!
//! ```text
//! countries.yaml      continents + countries
//! dependencies.yaml   dependencies (parent_code, optional continent)
//! states.yaml         regions + states
//! countries.fr.yaml   French names keyed by code (countries and dependencies)
//! state_hints.yaml    progressive hint material keyed by state code
//! ```

pub mod entity;
pub mod hint;
pub mod registry;

pub use entity::{Country, Dependency, Guessable, LocalizedName, NameKeys, State};
pub use hint::{Hint, StateHints};
pub use registry::EntityRegistry;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::{CatalogError, GameError};
use crate::language::Language;

/// Which entity set a game is played over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Countries,
    States,
}

#[derive(Debug, Deserialize)]
struct CountryTable {
    continents: Vec<String>,
    countries: Vec<Country>,
}

#[derive(Debug, Deserialize)]
struct DependencyTable {
    #[serde(default)]
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct StateTable {
    regions: Vec<String>,
    states: Vec<State>,
}

#[derive(Debug, Deserialize)]
struct StateHintTable {
    hints: BTreeMap<String, StateHints>,
}

/// Raw, unvalidated tables.
#[derive(Debug, Clone, Default)]
pub struct CatalogTables {
    pub continents: Vec<String>,
    pub countries: Vec<Country>,
    pub dependencies: Vec<Dependency>,
    pub regions: Vec<String>,
    pub states: Vec<State>,
    /// language -> code -> translated names
    pub translations: BTreeMap<Language, BTreeMap<String, LocalizedName>>,
    /// state code -> hint material
    pub state_hints: BTreeMap<String, StateHints>,
}

impl CatalogTables {
    /// Read the tables from a data directory. Missing translation and hint
    /// files are not an error.
    pub fn read_dir(dir: &Path) -> Result<Self, CatalogError> {
        let countries: CountryTable = read_yaml(&dir.join("countries.yaml"))?;
        let dependencies: DependencyTable = read_yaml(&dir.join("dependencies.yaml"))?;
        let states: StateTable = read_yaml(&dir.join("states.yaml"))?;

        let mut translations = BTreeMap::new();
        for language in Language::ALL.into_iter().filter(|l| !l.is_native()) {
            let path = dir.join(format!("countries.{}.yaml", language.code()));
            if path.exists() {
                translations.insert(language, read_yaml(&path)?);
            }
        }

        let hints_path = dir.join("state_hints.yaml");
        let state_hints = if hints_path.exists() {
            read_yaml::<StateHintTable>(&hints_path)?.hints
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            continents: countries.continents,
            countries: countries.countries,
            dependencies: dependencies.dependencies,
            regions: states.regions,
            states: states.states,
            translations,
            state_hints,
        })
    }
}

fn read_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Validated, read-only view over every guessable entity.
#[derive(Debug)]
pub struct Catalog {
    countries: EntityRegistry<Country>,
    dependencies: EntityRegistry<Dependency>,
    states: EntityRegistry<State>,
    continents: Vec<String>,
    regions: Vec<String>,
    /// parent code -> dependency codes, in table order
    dependents: HashMap<String, Vec<String>>,
    /// uppercase state code -> hint material
    state_hints: HashMap<String, StateHints>,
}

impl Catalog {
    /// Directory holding the tables shipped with this crate.
    pub fn bundled_data_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    /// Load and validate the tables in `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, CatalogError> {
        let catalog = Self::from_tables(CatalogTables::read_dir(dir)?)?;
        tracing::info!(
            dir = %dir.display(),
            countries = catalog.countries.len(),
            dependencies = catalog.dependencies.len(),
            states = catalog.states.len(),
            "Entity catalog loaded"
        );
        Ok(catalog)
    }

    /// Validate raw tables and build the registries.
    pub fn from_tables(tables: CatalogTables) -> Result<Self, CatalogError> {
        let CatalogTables {
            continents,
            mut countries,
            mut dependencies,
            regions,
            states,
            translations,
            state_hints,
        } = tables;

        merge_translations(&mut countries, &mut dependencies, translations)?;

        for country in &countries {
            check_group("countries", &country.code, &country.continent, &continents)?;
        }
        for state in &states {
            check_group("states", &state.code, &state.region, &regions)?;
        }

        let countries = EntityRegistry::new("countries", countries)?;

        let mut dependents: HashMap<String, Vec<String>> = HashMap::new();
        for dep in &mut dependencies {
            let parent = countries.get_by_code(&dep.parent_code).ok_or_else(|| {
                CatalogError::UnknownParent {
                    code: dep.code.clone(),
                    parent_code: dep.parent_code.clone(),
                }
            })?;
            dep.parent_code = parent.code.clone();
            dep.parent_name = parent.name.clone();
            dep.parent_continent = parent.continent.clone();
            if let Some(continent) = &dep.continent {
                check_group("dependencies", &dep.code, continent, &continents)?;
            }
            dependents
                .entry(parent.code.clone())
                .or_default()
                .push(dep.code.clone());
        }

        let states = EntityRegistry::new("states", states)?;
        let state_hints = check_state_hints(&states, state_hints)?;

        Ok(Self {
            countries,
            dependencies: EntityRegistry::new("dependencies", dependencies)?,
            states,
            continents,
            regions,
            dependents,
            state_hints,
        })
    }

    pub fn countries(&self) -> &EntityRegistry<Country> {
        &self.countries
    }

    pub fn dependencies(&self) -> &EntityRegistry<Dependency> {
        &self.dependencies
    }

    pub fn states(&self) -> &EntityRegistry<State> {
        &self.states
    }

    pub fn continents(&self) -> &[String] {
        &self.continents
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Group keys of a collection, in table order.
    pub fn groups(&self, collection: Collection) -> &[String] {
        match collection {
            Collection::Countries => &self.continents,
            Collection::States => &self.regions,
        }
    }

    pub fn has_group(&self, collection: Collection, group: &str) -> bool {
        self.groups(collection).iter().any(|g| g == group)
    }

    /// Dependencies credited when `parent_code` is guessed.
    pub fn dependencies_of(&self, parent_code: &str) -> Vec<&Dependency> {
        self.dependents
            .get(&parent_code.to_ascii_uppercase())
            .map(|codes| {
                codes
                    .iter()
                    .filter_map(|code| self.dependencies.get_by_code(code))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Primary entity of a collection by code.
    pub fn primary(&self, collection: Collection, code: &str) -> Option<&dyn Guessable> {
        match collection {
            Collection::Countries => self
                .countries
                .get_by_code(code)
                .map(|c| c as &dyn Guessable),
            Collection::States => self.states.get_by_code(code).map(|s| s as &dyn Guessable),
        }
    }

    /// Primary members of one group, in table order. Dependencies are never
    /// members.
    pub fn group_members(&self, collection: Collection, group: &str) -> Vec<&dyn Guessable> {
        match collection {
            Collection::Countries => self
                .countries
                .members_of(group)
                .into_iter()
                .map(|c| c as &dyn Guessable)
                .collect(),
            Collection::States => self
                .states
                .members_of(group)
                .into_iter()
                .map(|s| s as &dyn Guessable)
                .collect(),
        }
    }

    /// Number of primary entities in a collection.
    pub fn primary_count(&self, collection: Collection) -> usize {
        match collection {
            Collection::Countries => self.countries.len(),
            Collection::States => self.states.len(),
        }
    }

    /// Hint number `level` (1-based) for the primary entity `code`.
    ///
    /// Countries have two levels, states six; the ladder is described in
    /// the `hint` module.
    /// Dependencies have no hints.
    pub fn hint(&self, collection: Collection, code: &str, level: u8) -> Result<Hint, GameError> {
        let unknown = || GameError::UnknownCode {
            collection: match collection {
                Collection::Countries => "country",
                Collection::States => "state",
            },
            code: code.to_string(),
        };

        match collection {
            Collection::Countries => {
                let country = self.countries.get_by_code(code).ok_or_else(unknown)?;
                hint::check_level(collection, level)?;
                Ok(hint::country_hint(country, level))
            }
            Collection::States => {
                let state = self.states.get_by_code(code).ok_or_else(unknown)?;
                hint::check_level(collection, level)?;
                let neighbor_name = |code: &str| {
                    self.states
                        .get_by_code(code)
                        .map_or_else(|| code.to_string(), |s| s.name.clone())
                };
                hint::state_hint(state, self.state_hints.get(&state.code), neighbor_name, level)
            }
        }
    }
}

fn check_state_hints(
    states: &EntityRegistry<State>,
    hints: BTreeMap<String, StateHints>,
) -> Result<HashMap<String, StateHints>, CatalogError> {
    let mut checked = HashMap::with_capacity(hints.len());
    for (code, mut entry) in hints {
        let state = states
            .get_by_code(&code)
            .ok_or_else(|| CatalogError::UnknownHintState { code: code.clone() })?;
        for neighbor in &mut entry.neighbors {
            let found = states.get_by_code(neighbor).ok_or_else(|| {
                CatalogError::UnknownNeighbor {
                    code: state.code.clone(),
                    neighbor: neighbor.clone(),
                }
            })?;
            *neighbor = found.code.clone();
        }
        checked.insert(state.code.clone(), entry);
    }
    Ok(checked)
}

fn check_group(
    collection: &'static str,
    code: &str,
    group: &str,
    allowed: &[String],
) -> Result<(), CatalogError> {
    if allowed.iter().any(|g| g == group) {
        Ok(())
    } else {
        Err(CatalogError::UnknownGroup {
            collection,
            code: code.to_string(),
            group: group.to_string(),
        })
    }
}

fn merge_translations(
    countries: &mut [Country],
    dependencies: &mut [Dependency],
    translations: BTreeMap<Language, BTreeMap<String, LocalizedName>>,
) -> Result<(), CatalogError> {
    for (language, names) in translations {
        for (code, localized) in names {
            if let Some(country) = countries
                .iter_mut()
                .find(|c| c.code.eq_ignore_ascii_case(&code))
            {
                country.localized.insert(language, localized);
            } else if let Some(dep) = dependencies
                .iter_mut()
                .find(|d| d.code.eq_ignore_ascii_case(&code))
            {
                dep.localized.insert(language, localized);
            } else {
                return Err(CatalogError::UnknownTranslation {
                    language: language.to_string(),
                    code,
                });
            }
        }
    }
    Ok(())
}
