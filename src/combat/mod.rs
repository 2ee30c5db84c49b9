//! Combat resolution module
//!
//! Implements D&D 5e-style combat calculators:
//! - Dice notation parsing and rolling (e.g., "2d6+3")
//! - d20 rolls with advantage/disadvantage
//! - Attack rolls with critical hits and misses
//! - Damage rolls with critical dice doubling
//! - Saving throws against a DC
//! - A full turn: attack, then damage on a hit

mod advantage;
mod damage;
mod dice;
mod engine;
mod error;

pub use advantage::{roll_d20, AdvantageMode, RollOutcome, D20};
pub use damage::DamageType;
pub use dice::{parse_dice, DiceExpression, DieRoller, RandomRoller, ScriptedRoller};
pub use engine::{
    attack_roll, damage_roll, full_combat, resolve_turn, roll_damage, saving_throw, AttackResult,
    CombatTurnResult, DamageResult, SavingThrowResult, NATURAL_ONE, NATURAL_TWENTY,
};
pub use error::CombatError;
