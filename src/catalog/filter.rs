//! Catalog filters and pagination

use serde::Serialize;

use super::models::{Character, Class, Item, ItemType, Monster, MonsterType, Race, Rarity, Size};

/// Default page size
pub const DEFAULT_LIMIT: usize = 10;

/// Largest page a client may request
pub const MAX_LIMIT: usize = 100;

/// Case-insensitive substring match
fn name_matches(needle: Option<&str>, name: &str) -> bool {
    match needle {
        Some(needle) if !needle.is_empty() => name.to_lowercase().contains(&needle.to_lowercase()),
        _ => true,
    }
}

/// Filters for the character list
#[derive(Debug, Clone, Default)]
pub struct CharacterFilter {
    pub class: Option<Class>,
    pub race: Option<Race>,
    pub name: Option<String>,
}

impl CharacterFilter {
    pub fn matches(&self, character: &Character) -> bool {
        self.class.is_none_or(|class| character.class == class)
            && self.race.is_none_or(|race| character.race == race)
            && name_matches(self.name.as_deref(), &character.name)
    }
}

/// Filters for the monster list
#[derive(Debug, Clone, Default)]
pub struct MonsterFilter {
    pub monster_type: Option<MonsterType>,
    pub size: Option<Size>,
    pub min_cr: Option<f64>,
    pub max_cr: Option<f64>,
    pub name: Option<String>,
}

impl MonsterFilter {
    pub fn matches(&self, monster: &Monster) -> bool {
        self.monster_type.is_none_or(|t| monster.monster_type == t)
            && self.size.is_none_or(|size| monster.size == size)
            && self.min_cr.is_none_or(|min| monster.challenge_rating >= min)
            && self.max_cr.is_none_or(|max| monster.challenge_rating <= max)
            && name_matches(self.name.as_deref(), &monster.name)
    }
}

/// Filters for the item list
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub item_type: Option<ItemType>,
    pub rarity: Option<Rarity>,
    pub magic: Option<bool>,
    pub attunement: Option<bool>,
    pub min_cost: Option<u32>,
    pub max_cost: Option<u32>,
    pub name: Option<String>,
}

impl ItemFilter {
    pub fn matches(&self, item: &Item) -> bool {
        self.item_type.is_none_or(|t| item.item_type == t)
            && self.rarity.is_none_or(|rarity| item.rarity == rarity)
            && self.magic.is_none_or(|magic| item.magic == magic)
            && self
                .attunement
                .is_none_or(|attunement| item.attunement_required == attunement)
            && self.min_cost.is_none_or(|min| item.cost >= min)
            && self.max_cost.is_none_or(|max| item.cost <= max)
            && name_matches(self.name.as_deref(), &item.name)
    }
}

/// Offset pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: usize,
    pub limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Build from optional query values, rejecting a limit outside `1..=MAX_LIMIT`
    pub fn new(skip: Option<usize>, limit: Option<usize>) -> Result<Self, String> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(format!("limit must be between 1 and {}", MAX_LIMIT));
        }
        Ok(Self {
            skip: skip.unwrap_or(0),
            limit,
        })
    }

    /// Take one page out of an already-filtered sequence
    pub fn paginate<T>(&self, items: impl IntoIterator<Item = T>) -> Page<T> {
        let mut total = 0;
        let mut page = Vec::with_capacity(self.limit);

        for item in items {
            if total >= self.skip && page.len() < self.limit {
                page.push(item);
            }
            total += 1;
        }

        Page { items: page, total }
    }
}

/// One page of results and the size of the full filtered set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_counts_everything() {
        let page = Pagination { skip: 2, limit: 3 }.paginate(0..10);
        assert_eq!(page.items, vec![2, 3, 4]);
        assert_eq!(page.total, 10);
    }

    #[test]
    fn test_paginate_past_end() {
        let page = Pagination { skip: 20, limit: 5 }.paginate(0..10);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 10);
    }

    #[test]
    fn test_pagination_defaults_and_bounds() {
        assert_eq!(Pagination::new(None, None).unwrap(), Pagination::default());
        assert_eq!(Pagination::new(Some(3), Some(100)).unwrap().limit, 100);
        assert!(Pagination::new(None, Some(0)).is_err());
        assert!(Pagination::new(None, Some(101)).is_err());
    }

    #[test]
    fn test_name_matches() {
        assert!(name_matches(Some("RAIST"), "Raistlin Majere"));
        assert!(name_matches(None, "anything"));
        assert!(name_matches(Some(""), "anything"));
        assert!(!name_matches(Some("tanis"), "Sturm Brightblade"));
    }
}
