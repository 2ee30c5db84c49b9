//! Dice notation and rolling
//!
//! Parses notation like "2d6+3", "1d20", "4d6-2" and rolls it against an
//! injected [`DieRoller`].

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::CombatError;

static NOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)d([0-9]+)(?:([+-])([0-9]+))?$").expect("dice notation pattern is valid")
});

/// Source of uniformly distributed die faces
pub trait DieRoller {
    /// Roll one die, returning a value in `1..=sides`
    fn roll_die(&mut self, sides: u32) -> u32;
}

impl<T: DieRoller + ?Sized> DieRoller for Box<T> {
    fn roll_die(&mut self, sides: u32) -> u32 {
        (**self).roll_die(sides)
    }
}

/// Die roller backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RandomRoller<R = StdRng> {
    rng: R,
}

impl RandomRoller<StdRng> {
    /// Seed a fresh generator from the thread-local source
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_rng(&mut rand::rng()))
    }

    /// Deterministic roller for replays
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomRoller<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DieRoller for RandomRoller<R> {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.rng.random_range(1..=sides.max(1))
    }
}

/// Replays a fixed sequence of draws
///
/// A draw outside `1..=sides` of the die being rolled, or running out of
/// draws, is a bug in the caller's script and panics.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    draws: VecDeque<u32>,
}

impl ScriptedRoller {
    pub fn new(draws: impl IntoIterator<Item = u32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    /// Draws not yet consumed
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl DieRoller for ScriptedRoller {
    fn roll_die(&mut self, sides: u32) -> u32 {
        let draw = self
            .draws
            .pop_front()
            .unwrap_or_else(|| panic!("scripted roller exhausted rolling a d{}", sides));
        assert!(
            (1..=sides).contains(&draw),
            "scripted draw {} out of range for a d{}",
            draw,
            sides
        );
        draw
    }
}

/// A parsed dice expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceExpression {
    /// Number of dice to roll
    pub count: u32,
    /// Number of faces per die
    pub die_size: u32,
    /// Flat amount added to the sum
    pub modifier: i32,
}

impl DiceExpression {
    pub fn new(count: u32, die_size: u32, modifier: i32) -> Self {
        Self {
            count,
            die_size,
            modifier,
        }
    }

    /// Parse dice notation; see [`parse_dice`]
    pub fn parse(notation: &str) -> Result<Self, CombatError> {
        parse_dice(notation)
    }

    /// The same expression with twice the dice and the modifier untouched
    ///
    /// Fails when twice the count no longer fits a `u32`.
    pub fn doubled(&self) -> Result<Self, CombatError> {
        let count = self
            .count
            .checked_mul(2)
            .ok_or_else(|| CombatError::invalid("damage_dice", "too many dice to double"))?;
        Ok(Self { count, ..*self })
    }

    /// Roll every die, in order
    pub fn roll<R: DieRoller + ?Sized>(&self, roller: &mut R) -> Vec<u32> {
        (0..self.count)
            .map(|_| roller.roll_die(self.die_size))
            .collect()
    }

    /// Sum of the given rolls plus the modifier
    pub fn total(&self, rolls: &[u32]) -> i32 {
        let sum: i64 = rolls.iter().map(|&r| i64::from(r)).sum();
        clamp_i32(sum + i64::from(self.modifier))
    }

    /// Roll and return individual die results plus total
    pub fn roll_detailed<R: DieRoller + ?Sized>(&self, roller: &mut R) -> (Vec<u32>, i32) {
        let rolls = self.roll(roller);
        let total = self.total(&rolls);
        (rolls, total)
    }

    /// Get the minimum possible result
    pub fn min(&self) -> i32 {
        clamp_i32(i64::from(self.count) + i64::from(self.modifier))
    }

    /// Get the maximum possible result
    pub fn max(&self) -> i32 {
        clamp_i32(i64::from(self.count) * i64::from(self.die_size) + i64::from(self.modifier))
    }

    /// Get the expected average (rounded down)
    pub fn average(&self) -> i32 {
        let doubled = i64::from(self.count) * (i64::from(self.die_size) + 1)
            + 2 * i64::from(self.modifier);
        clamp_i32(doubled.div_euclid(2))
    }
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl FromStr for DiceExpression {
    type Err = CombatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_dice(s)
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifier > 0 {
            write!(f, "{}d{}+{}", self.count, self.die_size, self.modifier)
        } else if self.modifier < 0 {
            write!(f, "{}d{}{}", self.count, self.die_size, self.modifier)
        } else {
            write!(f, "{}d{}", self.count, self.die_size)
        }
    }
}

/// Parse a dice notation string like "2d6+3"
///
/// Strict: lowercase `d`, no whitespace, count and die size of at least one,
/// at most one signed modifier.
pub fn parse_dice(notation: &str) -> Result<DiceExpression, CombatError> {
    let malformed = || CombatError::MalformedNotation(notation.to_string());

    let caps = NOTATION.captures(notation).ok_or_else(malformed)?;

    let count: u32 = caps[1].parse().map_err(|_| malformed())?;
    let die_size: u32 = caps[2].parse().map_err(|_| malformed())?;
    if count == 0 || die_size == 0 {
        return Err(malformed());
    }

    let modifier = match (caps.get(3), caps.get(4)) {
        (Some(sign), Some(digits)) => {
            let magnitude: i64 = digits.as_str().parse().map_err(|_| malformed())?;
            let signed = if sign.as_str() == "-" {
                -magnitude
            } else {
                magnitude
            };
            i32::try_from(signed).map_err(|_| malformed())?
        }
        _ => 0,
    };

    Ok(DiceExpression {
        count,
        die_size,
        modifier,
    })
}
