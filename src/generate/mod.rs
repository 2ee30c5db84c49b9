//! Random content generators
//!
//! Characters and monsters built from table lookups and dice. Generated
//! records are not added to the catalog.

mod character;
mod monster;

use rand::Rng;

pub use character::{random_character, roll_ability_score};
pub use monster::{random_monster, MonsterOptions};

/// Inclusive range of generated record ids
pub const GENERATED_ID_MIN: u32 = 1000;
pub const GENERATED_ID_MAX: u32 = 9999;

/// Uniform pick from a non-empty table
fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, table: &'a [T]) -> &'a T {
    &table[rng.random_range(0..table.len())]
}

fn generated_id<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.random_range(GENERATED_ID_MIN..=GENERATED_ID_MAX)
}
