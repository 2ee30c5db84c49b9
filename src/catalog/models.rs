//! Reference data entities
//!
//! Wire names follow the published data files: title-cased enum values,
//! snake_case fields, `class` and `type` as field names.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combat::DamageType;

/// Character and creature alignments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    #[serde(rename = "Lawful Good")]
    LawfulGood,
    #[serde(rename = "Neutral Good")]
    NeutralGood,
    #[serde(rename = "Chaotic Good")]
    ChaoticGood,
    #[serde(rename = "Lawful Neutral")]
    LawfulNeutral,
    #[serde(rename = "True Neutral")]
    TrueNeutral,
    #[serde(rename = "Chaotic Neutral")]
    ChaoticNeutral,
    #[serde(rename = "Lawful Evil")]
    LawfulEvil,
    #[serde(rename = "Neutral Evil")]
    NeutralEvil,
    #[serde(rename = "Chaotic Evil")]
    ChaoticEvil,
    Unaligned,
}

impl Alignment {
    pub const ALL: [Alignment; 10] = [
        Alignment::LawfulGood,
        Alignment::NeutralGood,
        Alignment::ChaoticGood,
        Alignment::LawfulNeutral,
        Alignment::TrueNeutral,
        Alignment::ChaoticNeutral,
        Alignment::LawfulEvil,
        Alignment::NeutralEvil,
        Alignment::ChaoticEvil,
        Alignment::Unaligned,
    ];
}

/// Creature sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
    Gargantuan,
}

impl Size {
    pub const ALL: [Size; 6] = [
        Size::Tiny,
        Size::Small,
        Size::Medium,
        Size::Large,
        Size::Huge,
        Size::Gargantuan,
    ];
}

/// Character classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Class {
    Barbarian,
    Bard,
    Cleric,
    Druid,
    Fighter,
    Monk,
    Paladin,
    Ranger,
    Rogue,
    Sorcerer,
    Warlock,
    Wizard,
}

impl Class {
    pub const ALL: [Class; 12] = [
        Class::Barbarian,
        Class::Bard,
        Class::Cleric,
        Class::Druid,
        Class::Fighter,
        Class::Monk,
        Class::Paladin,
        Class::Ranger,
        Class::Rogue,
        Class::Sorcerer,
        Class::Warlock,
        Class::Wizard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Class::Barbarian => "Barbarian",
            Class::Bard => "Bard",
            Class::Cleric => "Cleric",
            Class::Druid => "Druid",
            Class::Fighter => "Fighter",
            Class::Monk => "Monk",
            Class::Paladin => "Paladin",
            Class::Ranger => "Ranger",
            Class::Rogue => "Rogue",
            Class::Sorcerer => "Sorcerer",
            Class::Warlock => "Warlock",
            Class::Wizard => "Wizard",
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Playable races
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    Dragonborn,
    Dwarf,
    Elf,
    Gnome,
    #[serde(rename = "Half-Elf")]
    HalfElf,
    #[serde(rename = "Half-Orc")]
    HalfOrc,
    Halfling,
    Human,
    Tiefling,
}

impl Race {
    pub const ALL: [Race; 9] = [
        Race::Dragonborn,
        Race::Dwarf,
        Race::Elf,
        Race::Gnome,
        Race::HalfElf,
        Race::HalfOrc,
        Race::Halfling,
        Race::Human,
        Race::Tiefling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Race::Dragonborn => "Dragonborn",
            Race::Dwarf => "Dwarf",
            Race::Elf => "Elf",
            Race::Gnome => "Gnome",
            Race::HalfElf => "Half-Elf",
            Race::HalfOrc => "Half-Orc",
            Race::Halfling => "Halfling",
            Race::Human => "Human",
            Race::Tiefling => "Tiefling",
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monster types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterType {
    Aberration,
    Beast,
    Celestial,
    Construct,
    Dragon,
    Elemental,
    Fey,
    Fiend,
    Giant,
    Humanoid,
    Monstrosity,
    Ooze,
    Plant,
    Undead,
}

impl MonsterType {
    pub const ALL: [MonsterType; 14] = [
        MonsterType::Aberration,
        MonsterType::Beast,
        MonsterType::Celestial,
        MonsterType::Construct,
        MonsterType::Dragon,
        MonsterType::Elemental,
        MonsterType::Fey,
        MonsterType::Fiend,
        MonsterType::Giant,
        MonsterType::Humanoid,
        MonsterType::Monstrosity,
        MonsterType::Ooze,
        MonsterType::Plant,
        MonsterType::Undead,
    ];
}

/// Item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Weapon,
    Armor,
    Potion,
    #[serde(rename = "Wondrous Item")]
    WondrousItem,
    Wand,
    Ring,
    Scroll,
}

/// Item rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    #[serde(rename = "Very Rare")]
    VeryRare,
    Legendary,
    Artifact,
}

/// Ability scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl Stats {
    pub fn scores(&self) -> [i32; 6] {
        [
            self.strength,
            self.dexterity,
            self.constitution,
            self.intelligence,
            self.wisdom,
            self.charisma,
        ]
    }
}

/// A player character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub race: Race,
    pub class: Class,
    pub alignment: Alignment,
    pub description: String,
    pub stats: Stats,
}

/// A monster action, trait, or ability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub attack_bonus: Option<i32>,
    /// Dice notation, e.g. "2d6+4"
    #[serde(default)]
    pub damage_dice: Option<String>,
    #[serde(default)]
    pub damage_type: Option<DamageType>,
}

/// A monster stat block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: u32,
    pub name: String,
    pub size: Size,
    #[serde(rename = "type")]
    pub monster_type: MonsterType,
    pub alignment: Alignment,

    pub armor_class: i32,
    pub hit_points: i32,
    /// Dice notation, e.g. "8d10+16"
    pub hit_dice: String,

    /// Movement mode to feet, e.g. {"walk": 30, "fly": 60}
    pub speed: BTreeMap<String, u32>,

    pub stats: Stats,

    #[serde(default)]
    pub saving_throws: Option<BTreeMap<String, i32>>,
    #[serde(default)]
    pub skills: Option<BTreeMap<String, i32>>,
    #[serde(default)]
    pub damage_resistances: Option<Vec<DamageType>>,
    #[serde(default)]
    pub damage_immunities: Option<Vec<DamageType>>,
    #[serde(default)]
    pub condition_immunities: Option<Vec<String>>,
    #[serde(default)]
    pub senses: Option<BTreeMap<String, u32>>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,

    pub challenge_rating: f64,
    pub experience_points: u32,

    #[serde(default)]
    pub special_abilities: Option<Vec<Action>>,
    pub actions: Vec<Action>,
    #[serde(default)]
    pub legendary_actions: Option<Vec<Action>>,
    #[serde(default)]
    pub reactions: Option<Vec<Action>>,
}

/// An item or piece of equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub category: String,
    pub rarity: Rarity,
    pub description: String,
    /// In gold pieces
    pub cost: u32,
    pub weight: f64,
    pub properties: Vec<String>,
    pub magic: bool,
    pub attunement_required: bool,

    /// Weapon damage dice
    #[serde(default)]
    pub damage: Option<String>,
    #[serde(default)]
    pub damage_type: Option<DamageType>,

    /// Armor base AC
    #[serde(default)]
    pub armor_class: Option<i32>,
}
