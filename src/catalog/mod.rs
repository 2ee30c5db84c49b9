//! Static reference catalog
//!
//! Characters, monsters, and items loaded once from JSON files and served
//! read-only for the life of the process.

mod filter;
mod models;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

pub use filter::{
    CharacterFilter, ItemFilter, MonsterFilter, Page, Pagination, DEFAULT_LIMIT, MAX_LIMIT,
};
pub use models::{
    Action, Alignment, Character, Class, Item, ItemType, Monster, MonsterType, Race, Rarity, Size,
    Stats,
};

pub const CHARACTERS_FILE: &str = "characters.json";
pub const MONSTERS_FILE: &str = "monsters.json";
pub const ITEMS_FILE: &str = "items.json";

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// In-memory reference data
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    characters: Vec<Character>,
    monsters: Vec<Monster>,
    items: Vec<Item>,
}

impl Catalog {
    /// Build a catalog from already-loaded records
    pub fn new(characters: Vec<Character>, monsters: Vec<Monster>, items: Vec<Item>) -> Self {
        Self {
            characters,
            monsters,
            items,
        }
    }

    /// Load every data file from a directory
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();

        let catalog = Self {
            characters: read_json(&dir.join(CHARACTERS_FILE))?,
            monsters: read_json(&dir.join(MONSTERS_FILE))?,
            items: read_json(&dir.join(ITEMS_FILE))?,
        };

        info!(
            dir = %dir.display(),
            characters = catalog.characters.len(),
            monsters = catalog.monsters.len(),
            items = catalog.items.len(),
            "catalog loaded"
        );

        Ok(catalog)
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn character(&self, id: u32) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn monster(&self, id: u32) -> Option<&Monster> {
        self.monsters.iter().find(|m| m.id == id)
    }

    pub fn item(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Filter then paginate characters
    pub fn find_characters(
        &self,
        filter: &CharacterFilter,
        pagination: Pagination,
    ) -> Page<Character> {
        pagination.paginate(
            self.characters
                .iter()
                .filter(|c| filter.matches(c))
                .cloned(),
        )
    }

    /// Filter then paginate monsters
    pub fn find_monsters(&self, filter: &MonsterFilter, pagination: Pagination) -> Page<Monster> {
        pagination.paginate(self.monsters.iter().filter(|m| filter.matches(m)).cloned())
    }

    /// Filter then paginate items
    pub fn find_items(&self, filter: &ItemFilter, pagination: Pagination) -> Page<Item> {
        pagination.paginate(self.items.iter().filter(|i| filter.matches(i)).cloned())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
