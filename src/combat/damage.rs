//! Damage types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Types of damage
///
/// Closed set; anything else is rejected when a request is deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    /// Corrosive liquids, digestive enzymes
    Acid,
    /// Blunt force: hammers, falling, constriction
    Bludgeoning,
    /// Cold/ice damage
    Cold,
    /// Fire damage
    Fire,
    /// Pure magical energy
    Force,
    /// Lightning/electric damage
    Lightning,
    /// Necrotic/death damage
    Necrotic,
    /// Piercing damage (arrows, spears, bites)
    Piercing,
    /// Venom and toxic gas
    Poison,
    /// Psychic/mental damage
    Psychic,
    /// Radiant/holy damage
    Radiant,
    /// Slashing damage (swords, claws)
    Slashing,
    /// Thunder/sonic damage
    Thunder,
}

impl DamageType {
    /// Get all damage types
    pub fn all() -> &'static [DamageType] {
        &[
            DamageType::Acid,
            DamageType::Bludgeoning,
            DamageType::Cold,
            DamageType::Fire,
            DamageType::Force,
            DamageType::Lightning,
            DamageType::Necrotic,
            DamageType::Piercing,
            DamageType::Poison,
            DamageType::Psychic,
            DamageType::Radiant,
            DamageType::Slashing,
            DamageType::Thunder,
        ]
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            DamageType::Acid => "acid",
            DamageType::Bludgeoning => "bludgeoning",
            DamageType::Cold => "cold",
            DamageType::Fire => "fire",
            DamageType::Force => "force",
            DamageType::Lightning => "lightning",
            DamageType::Necrotic => "necrotic",
            DamageType::Piercing => "piercing",
            DamageType::Poison => "poison",
            DamageType::Psychic => "psychic",
            DamageType::Radiant => "radiant",
            DamageType::Slashing => "slashing",
            DamageType::Thunder => "thunder",
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
