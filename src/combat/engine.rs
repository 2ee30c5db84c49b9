//! Combat resolution
//!
//! Attack rolls, damage rolls, saving throws, and a full attack-then-damage
//! turn. Every operation is a single pure step over its inputs plus the draws
//! it takes from the roller.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::advantage::{roll_d20, AdvantageMode};
use super::damage::DamageType;
use super::dice::{parse_dice, DiceExpression, DieRoller};
use super::error::CombatError;

/// Natural roll that always hits
pub const NATURAL_TWENTY: u32 = 20;

/// Natural roll that always misses
pub const NATURAL_ONE: u32 = 1;

/// Outcome of an attack roll against an armor class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackResult {
    /// The kept d20
    pub roll: u32,
    /// The d20 set aside under advantage or disadvantage
    pub second_roll: Option<u32>,
    pub attack_bonus: i32,
    /// `roll + attack_bonus`, even when a natural roll decides the hit
    pub total: i32,
    pub armor_class: i32,
    pub hit: bool,
    pub critical_hit: bool,
    pub critical_miss: bool,
    pub advantage: AdvantageMode,
}

/// Outcome of a damage roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageResult {
    /// Every die rolled, in order; twice the notation's count on a critical
    pub rolls: Vec<u32>,
    pub modifier: i32,
    pub total: i32,
    pub damage_type: DamageType,
    pub critical_hit: bool,
}

/// Outcome of a saving throw against a DC
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingThrowResult {
    pub roll: u32,
    pub second_roll: Option<u32>,
    pub ability_modifier: i32,
    pub proficiency_bonus: i32,
    pub total: i32,
    pub dc: i32,
    /// Decided by `total >= dc` alone
    pub success: bool,
    #[serde(rename = "natural_20")]
    pub natural_twenty: bool,
    #[serde(rename = "natural_1")]
    pub natural_one: bool,
    pub advantage: AdvantageMode,
}

/// An attack followed by damage when it lands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatTurnResult {
    pub attack: AttackResult,
    pub damage: Option<DamageResult>,
}

/// Roll to hit
///
/// A natural 20 always hits and a natural 1 always misses; otherwise the
/// total must meet the armor class.
pub fn attack_roll<R: DieRoller + ?Sized>(
    roller: &mut R,
    attack_bonus: i32,
    armor_class: i32,
    advantage: AdvantageMode,
) -> AttackResult {
    let outcome = roll_d20(roller, advantage);
    let roll = outcome.selected;
    let total = natural(roll).saturating_add(attack_bonus);

    let critical_hit = roll == NATURAL_TWENTY;
    let critical_miss = roll == NATURAL_ONE;

    let hit = if critical_hit {
        true
    } else if critical_miss {
        false
    } else {
        total >= armor_class
    };

    debug!(roll, attack_bonus, total, armor_class, hit, critical_hit, ?advantage, "attack roll");

    AttackResult {
        roll,
        second_roll: outcome.discarded,
        attack_bonus,
        total,
        armor_class,
        hit,
        critical_hit,
        critical_miss,
        advantage,
    }
}

/// Roll damage from notation such as "2d6+3"
pub fn damage_roll<R: DieRoller + ?Sized>(
    roller: &mut R,
    notation: &str,
    damage_type: DamageType,
    critical_hit: bool,
) -> Result<DamageResult, CombatError> {
    let expr = parse_dice(notation)?;
    roll_damage(roller, &expr, damage_type, critical_hit)
}

/// Roll damage from a parsed expression
///
/// A critical doubles the number of dice, never the modifier.
pub fn roll_damage<R: DieRoller + ?Sized>(
    roller: &mut R,
    expr: &DiceExpression,
    damage_type: DamageType,
    critical_hit: bool,
) -> Result<DamageResult, CombatError> {
    let expr = if critical_hit { expr.doubled()? } else { *expr };
    let (rolls, total) = expr.roll_detailed(roller);

    debug!(dice = %expr, ?rolls, total, %damage_type, critical_hit, "damage roll");

    Ok(DamageResult {
        rolls,
        modifier: expr.modifier,
        total,
        damage_type,
        critical_hit,
    })
}

/// Roll a saving throw
///
/// Natural 20 and natural 1 are reported but do not override the DC check.
pub fn saving_throw<R: DieRoller + ?Sized>(
    roller: &mut R,
    ability_modifier: i32,
    proficiency_bonus: i32,
    dc: i32,
    advantage: AdvantageMode,
) -> SavingThrowResult {
    let outcome = roll_d20(roller, advantage);
    let roll = outcome.selected;
    let total = natural(roll)
        .saturating_add(ability_modifier)
        .saturating_add(proficiency_bonus);
    let success = total >= dc;

    debug!(roll, total, dc, success, ?advantage, "saving throw");

    SavingThrowResult {
        roll,
        second_roll: outcome.discarded,
        ability_modifier,
        proficiency_bonus,
        total,
        dc,
        success,
        natural_twenty: roll == NATURAL_TWENTY,
        natural_one: roll == NATURAL_ONE,
        advantage,
    }
}

/// Attack, then roll damage if it hits
///
/// The notation is parsed before any die is rolled, so bad notation fails
/// whether or not the attack would have landed.
pub fn full_combat<R: DieRoller + ?Sized>(
    roller: &mut R,
    attack_bonus: i32,
    armor_class: i32,
    damage_notation: &str,
    damage_type: DamageType,
    advantage: AdvantageMode,
) -> Result<CombatTurnResult, CombatError> {
    let expr = parse_dice(damage_notation)?;
    resolve_turn(
        roller,
        attack_bonus,
        armor_class,
        &expr,
        damage_type,
        advantage,
    )
}

/// Attack with a parsed damage expression; a miss draws no damage dice
pub fn resolve_turn<R: DieRoller + ?Sized>(
    roller: &mut R,
    attack_bonus: i32,
    armor_class: i32,
    damage: &DiceExpression,
    damage_type: DamageType,
    advantage: AdvantageMode,
) -> Result<CombatTurnResult, CombatError> {
    let attack = attack_roll(roller, attack_bonus, armor_class, advantage);

    let damage = attack
        .hit
        .then(|| roll_damage(roller, damage, damage_type, attack.critical_hit))
        .transpose()?;

    Ok(CombatTurnResult { attack, damage })
}

fn natural(roll: u32) -> i32 {
    i32::try_from(roll).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::ScriptedRoller;

    #[test]
    fn test_basic_attack_hits() {
        let mut roller = ScriptedRoller::new([15]);
        let result = attack_roll(&mut roller, 5, 15, AdvantageMode::Normal);

        assert_eq!(result.roll, 15);
        assert_eq!(result.second_roll, None);
        assert_eq!(result.total, 20);
        assert!(result.hit);
        assert!(!result.critical_hit);
        assert!(!result.critical_miss);
    }

    #[test]
    fn test_attack_meets_ac_exactly() {
        let mut roller = ScriptedRoller::new([10]);
        assert!(attack_roll(&mut roller, 5, 15, AdvantageMode::Normal).hit);

        let mut roller = ScriptedRoller::new([9]);
        assert!(!attack_roll(&mut roller, 5, 15, AdvantageMode::Normal).hit);
    }

    #[test]
    fn test_natural_twenty_always_hits() {
        let mut roller = ScriptedRoller::new([20]);
        let result = attack_roll(&mut roller, 0, 25, AdvantageMode::Normal);

        assert_eq!(result.total, 20);
        assert!(result.hit);
        assert!(result.critical_hit);
        assert!(!result.critical_miss);
    }

    #[test]
    fn test_natural_one_always_misses() {
        let mut roller = ScriptedRoller::new([1]);
        let result = attack_roll(&mut roller, 50, 10, AdvantageMode::Normal);

        assert_eq!(result.total, 51);
        assert!(!result.hit);
        assert!(result.critical_miss);
        assert!(!result.critical_hit);
    }

    #[test]
    fn test_attack_with_advantage() {
        let mut roller = ScriptedRoller::new([10, 18]);
        let result = attack_roll(&mut roller, 3, 15, AdvantageMode::Advantage);

        assert_eq!(result.roll, 18);
        assert_eq!(result.second_roll, Some(10));
        assert_eq!(result.total, 21);
        assert!(result.hit);
        assert_eq!(result.advantage, AdvantageMode::Advantage);
    }

    #[test]
    fn test_attack_with_disadvantage() {
        let mut roller = ScriptedRoller::new([18, 10]);
        let result = attack_roll(&mut roller, 3, 15, AdvantageMode::Disadvantage);

        assert_eq!(result.roll, 10);
        assert_eq!(result.second_roll, Some(18));
        assert_eq!(result.total, 13);
        assert!(!result.hit);
    }

    #[test]
    fn test_damage_roll() {
        let mut roller = ScriptedRoller::new([4, 2]);
        let result = damage_roll(&mut roller, "2d6+3", DamageType::Slashing, false).unwrap();

        assert_eq!(result.rolls, vec![4, 2]);
        assert_eq!(result.modifier, 3);
        assert_eq!(result.total, 9);
        assert_eq!(result.damage_type, DamageType::Slashing);
        assert!(!result.critical_hit);
    }

    #[test]
    fn test_critical_damage_doubles_dice() {
        let mut roller = ScriptedRoller::new([3, 5, 4, 6]);
        let result = damage_roll(&mut roller, "2d6+3", DamageType::Slashing, true).unwrap();

        assert_eq!(result.rolls, vec![3, 5, 4, 6]);
        assert_eq!(result.modifier, 3);
        assert_eq!(result.total, 21);
        assert!(result.critical_hit);
    }

    #[test]
    fn test_critical_doubling_overflow_fails_without_rolling() {
        let mut roller = ScriptedRoller::default();
        let expr = DiceExpression::new(u32::MAX, 1, 0);
        let err = roll_damage(&mut roller, &expr, DamageType::Force, true).unwrap_err();
        assert!(matches!(err, CombatError::InvalidArgument { field: "damage_dice", .. }));

        let err = damage_roll(&mut roller, "4294967295d1", DamageType::Force, true).unwrap_err();
        assert!(matches!(err, CombatError::InvalidArgument { .. }));
    }

    #[test]
    fn test_negative_modifier() {
        let mut roller = ScriptedRoller::new([1]);
        let result = damage_roll(&mut roller, "1d4-2", DamageType::Poison, false).unwrap();
        assert_eq!(result.modifier, -2);
        assert_eq!(result.total, -1);
    }

    #[test]
    fn test_damage_roll_malformed() {
        let mut roller = ScriptedRoller::default();
        let err = damage_roll(&mut roller, "2d6++5", DamageType::Fire, false).unwrap_err();
        assert_eq!(err, CombatError::MalformedNotation("2d6++5".to_string()));
    }

    #[test]
    fn test_saving_throw_success() {
        let mut roller = ScriptedRoller::new([12]);
        let result = saving_throw(&mut roller, 2, 3, 15, AdvantageMode::Normal);

        assert_eq!(result.total, 17);
        assert!(result.success);
        assert!(!result.natural_twenty);
        assert!(!result.natural_one);
    }

    #[test]
    fn test_saving_throw_natural_twenty_not_automatic() {
        let mut roller = ScriptedRoller::new([20]);
        let result = saving_throw(&mut roller, -5, 0, 25, AdvantageMode::Normal);

        assert!(result.natural_twenty);
        assert_eq!(result.total, 15);
        assert!(!result.success);
    }

    #[test]
    fn test_saving_throw_natural_twenty_succeeds_on_total() {
        let mut roller = ScriptedRoller::new([20]);
        let result = saving_throw(&mut roller, 0, 0, 15, AdvantageMode::Normal);

        assert_eq!(result.total, 20);
        assert!(result.natural_twenty);
        assert!(result.success);
    }

    #[test]
    fn test_saving_throw_natural_one_fails_on_total() {
        let mut roller = ScriptedRoller::new([1]);
        let result = saving_throw(&mut roller, 0, 0, 15, AdvantageMode::Normal);

        assert_eq!(result.total, 1);
        assert!(result.natural_one);
        assert!(!result.success);
    }

    #[test]
    fn test_saving_throw_natural_one_can_succeed() {
        let mut roller = ScriptedRoller::new([1]);
        let result = saving_throw(&mut roller, 10, 6, 15, AdvantageMode::Normal);

        assert!(result.natural_one);
        assert_eq!(result.total, 17);
        assert!(result.success);
    }

    #[test]
    fn test_saving_throw_serializes_natural_flags() {
        let mut roller = ScriptedRoller::new([20, 3]);
        let result = saving_throw(&mut roller, 1, 2, 10, AdvantageMode::Advantage);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["natural_20"], true);
        assert_eq!(json["natural_1"], false);
        assert_eq!(json["second_roll"], 3);
        assert_eq!(json["advantage"], "advantage");
    }

    #[test]
    fn test_full_combat_miss_skips_damage() {
        // Only the attack die is scripted; a damage roll would exhaust the roller
        let mut roller = ScriptedRoller::new([1]);
        let result = full_combat(
            &mut roller,
            10,
            10,
            "2d6+3",
            DamageType::Slashing,
            AdvantageMode::Normal,
        )
        .unwrap();

        assert!(!result.attack.hit);
        assert!(result.damage.is_none());
        assert_eq!(roller.remaining(), 0);
    }

    #[test]
    fn test_full_combat_hit_rolls_damage() {
        let mut roller = ScriptedRoller::new([15, 4, 5]);
        let result = full_combat(
            &mut roller,
            5,
            12,
            "2d6+3",
            DamageType::Slashing,
            AdvantageMode::Normal,
        )
        .unwrap();

        assert!(result.attack.hit);
        let damage = result.damage.unwrap();
        assert!(!damage.critical_hit);
        assert_eq!(damage.rolls, vec![4, 5]);
        assert_eq!(damage.total, 12);
    }

    #[test]
    fn test_full_combat_crit_carries_into_damage() {
        let mut roller = ScriptedRoller::new([20, 1, 2, 3, 4]);
        let result = full_combat(
            &mut roller,
            0,
            30,
            "2d6+3",
            DamageType::Fire,
            AdvantageMode::Normal,
        )
        .unwrap();

        assert!(result.attack.critical_hit);
        let damage = result.damage.unwrap();
        assert!(damage.critical_hit);
        assert_eq!(damage.rolls.len(), 4);
        assert_eq!(damage.total, 13);
    }

    #[test]
    fn test_full_combat_rejects_notation_before_rolling() {
        let mut roller = ScriptedRoller::new([1]);
        let err = full_combat(
            &mut roller,
            0,
            10,
            "2d",
            DamageType::Fire,
            AdvantageMode::Normal,
        )
        .unwrap_err();

        assert!(matches!(err, CombatError::MalformedNotation(_)));
        assert_eq!(roller.remaining(), 1);
    }
}
