//! Advantage and disadvantage on d20 rolls

use serde::{Deserialize, Serialize};

use super::dice::DieRoller;

/// Faces on the die used for attacks and saves
pub const D20: u32 = 20;

/// How a d20 roll is taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvantageMode {
    /// One die
    #[default]
    Normal,
    /// Two dice, keep the higher
    Advantage,
    /// Two dice, keep the lower
    Disadvantage,
}

/// The kept d20 and, for two-dice modes, the one set aside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollOutcome {
    pub selected: u32,
    pub discarded: Option<u32>,
}

/// Roll a d20 under the given mode
pub fn roll_d20<R: DieRoller + ?Sized>(roller: &mut R, mode: AdvantageMode) -> RollOutcome {
    let first = roller.roll_die(D20);

    let (selected, discarded) = match mode {
        AdvantageMode::Normal => (first, None),
        AdvantageMode::Advantage => {
            let second = roller.roll_die(D20);
            (first.max(second), Some(first.min(second)))
        }
        AdvantageMode::Disadvantage => {
            let second = roller.roll_die(D20);
            (first.min(second), Some(first.max(second)))
        }
    };

    RollOutcome {
        selected,
        discarded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::ScriptedRoller;

    #[test]
    fn test_normal_single_draw() {
        let mut roller = ScriptedRoller::new([13, 4]);
        let outcome = roll_d20(&mut roller, AdvantageMode::Normal);
        assert_eq!(outcome, RollOutcome { selected: 13, discarded: None });
        assert_eq!(roller.remaining(), 1);
    }

    #[test]
    fn test_advantage_keeps_higher() {
        let mut roller = ScriptedRoller::new([10, 18]);
        let outcome = roll_d20(&mut roller, AdvantageMode::Advantage);
        assert_eq!(outcome.selected, 18);
        assert_eq!(outcome.discarded, Some(10));
    }

    #[test]
    fn test_disadvantage_keeps_lower() {
        let mut roller = ScriptedRoller::new([18, 10]);
        let outcome = roll_d20(&mut roller, AdvantageMode::Disadvantage);
        assert_eq!(outcome.selected, 10);
        assert_eq!(outcome.discarded, Some(18));
    }

    #[test]
    fn test_tie_reports_both() {
        for mode in [AdvantageMode::Advantage, AdvantageMode::Disadvantage] {
            let mut roller = ScriptedRoller::new([7, 7]);
            let outcome = roll_d20(&mut roller, mode);
            assert_eq!(outcome, RollOutcome { selected: 7, discarded: Some(7) });
        }
    }

    #[test]
    fn test_mode_wire_format() {
        assert_eq!(
            serde_json::to_string(&AdvantageMode::Disadvantage).unwrap(),
            "\"disadvantage\""
        );
        assert_eq!(AdvantageMode::default(), AdvantageMode::Normal);
        assert!(serde_json::from_str::<AdvantageMode>("\"super\"").is_err());
    }
}
