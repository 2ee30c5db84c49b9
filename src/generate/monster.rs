use std::collections::BTreeMap;

use rand::Rng;
use serde::Deserialize;
use tracing::debug;

use super::{generated_id, pick};
use crate::catalog::{Action, Alignment, Monster, MonsterType, Size, Stats};
use crate::combat::{DamageType, DiceExpression};
use crate::rules::{
    challenge_ratings_between, hit_die_for_size, xp_for_cr, LEGENDARY_MIN_CR,
    SPECIAL_ABILITIES_MIN_CR,
};

/// CR used when the requested range contains no standard rating
const FALLBACK_CR: f64 = 1.0;

/// Optional constraints on a generated monster
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonsterOptions {
    #[serde(rename = "type")]
    pub monster_type: Option<MonsterType>,
    pub size: Option<Size>,
    pub min_cr: Option<f64>,
    pub max_cr: Option<f64>,
}

fn name_parts(monster_type: MonsterType) -> (&'static [&'static str], &'static [&'static str]) {
    match monster_type {
        MonsterType::Dragon => (
            &["Ancient", "Young", "Adult", "Elder", "Wyrm"],
            &["Dragon", "Drake", "Wyrm", "Dragonling"],
        ),
        MonsterType::Undead => (
            &["Cursed", "Haunted", "Restless", "Dread", "Fallen"],
            &["Wraith", "Zombie", "Skeleton", "Specter", "Ghoul"],
        ),
        MonsterType::Fiend => (
            &["Infernal", "Abyssal", "Hellish", "Burning", "Dark"],
            &["Demon", "Devil", "Imp", "Hellhound", "Fiend"],
        ),
        MonsterType::Celestial => (
            &["Radiant", "Divine", "Holy", "Blessed", "Sacred"],
            &["Angel", "Archon", "Deva", "Pegasus"],
        ),
        MonsterType::Aberration => (
            &["Twisted", "Corrupted", "Mind-Bending", "Eldritch", "Strange"],
            &["Horror", "Beholder", "Mind Flayer", "Aboleth"],
        ),
        MonsterType::Beast => (
            &["Wild", "Savage", "Primal", "Feral", "Great"],
            &["Bear", "Wolf", "Tiger", "Spider", "Serpent"],
        ),
        MonsterType::Construct => (
            &["Animated", "Mechanical", "Arcane", "Stone", "Iron"],
            &["Golem", "Guardian", "Sentinel", "Automaton"],
        ),
        MonsterType::Elemental => (
            &["Raging", "Primordial", "Pure", "Eternal", "Chaos"],
            &["Elemental", "Mephit", "Salamander", "Djinni"],
        ),
        MonsterType::Fey => (
            &["Enchanted", "Twilight", "Mystical", "Trickster", "Wild"],
            &["Pixie", "Sprite", "Dryad", "Satyr", "Hag"],
        ),
        MonsterType::Giant => (
            &["Towering", "Mighty", "Hill", "Stone", "Frost"],
            &["Giant", "Ogre", "Troll", "Ettin"],
        ),
        MonsterType::Humanoid => (
            &["Savage", "Tribal", "Raiding", "War", "Blood"],
            &["Orc", "Goblin", "Kobold", "Hobgoblin", "Gnoll"],
        ),
        MonsterType::Monstrosity => (
            &["Monstrous", "Hybrid", "Chimeric", "Cursed", "Mutant"],
            &["Chimera", "Manticore", "Griffon", "Hydra", "Basilisk"],
        ),
        MonsterType::Ooze => (
            &["Gelatinous", "Acidic", "Hungry", "Slithering", "Black"],
            &["Ooze", "Pudding", "Slime", "Jelly", "Cube"],
        ),
        MonsterType::Plant => (
            &["Carnivorous", "Strangling", "Thorned", "Awakened", "Vine"],
            &["Treant", "Shambler", "Vine", "Blight"],
        ),
    }
}

fn random_name<R: Rng + ?Sized>(rng: &mut R, monster_type: MonsterType) -> String {
    let (prefixes, suffixes) = name_parts(monster_type);
    format!("{} {}", pick(rng, prefixes), pick(rng, suffixes))
}

/// Scores centered on `10 + 1.5 * CR`
fn random_stats<R: Rng + ?Sized>(rng: &mut R, cr: f64) -> Stats {
    let base = 10 + (cr * 1.5) as i32;
    let variation = (cr / 2.0) as i32 + 1;
    let mut score = || base + rng.random_range(-variation..=variation);

    Stats {
        strength: score(),
        dexterity: score(),
        constitution: score(),
        intelligence: score(),
        wisdom: score(),
        charisma: score(),
    }
}

/// Hit dice sized by the creature, one constitution bonus per die
fn hit_dice<R: Rng + ?Sized>(rng: &mut R, cr: f64, size: Size) -> DiceExpression {
    let count = ((cr * 3.0) as u32 + rng.random_range(1..=6)).max(1);
    let con_bonus = cr as i32;
    DiceExpression::new(count, hit_die_for_size(size), count as i32 * con_bonus)
}

fn armor_class<R: Rng + ?Sized>(rng: &mut R, cr: f64) -> i32 {
    10 + (cr * 1.2) as i32 + rng.random_range(0..=3)
}

fn passive(name: &str, description: &str) -> Action {
    Action {
        name: name.to_string(),
        description: description.to_string(),
        attack_bonus: None,
        damage_dice: None,
        damage_type: None,
    }
}

fn special_abilities(monster_type: MonsterType, cr: f64) -> Option<Vec<Action>> {
    let ability = match monster_type {
        MonsterType::Dragon => passive(
            "Frightful Presence",
            "Each creature within 60 feet that is aware of the dragon must succeed on a Wisdom saving throw or become frightened for 1 minute",
        ),
        MonsterType::Undead => passive(
            "Undead Fortitude",
            "If damage reduces the creature to 0 hit points, it can make a Constitution saving throw to drop to 1 hit point instead",
        ),
        MonsterType::Aberration => passive(
            "Telepathy",
            "The creature can communicate telepathically with any creature within 120 feet that has a language",
        ),
        MonsterType::Fiend => passive(
            "Magic Resistance",
            "The creature has advantage on saving throws against spells and other magical effects",
        ),
        MonsterType::Celestial => Action {
            damage_dice: Some("2d8".to_string()),
            damage_type: Some(DamageType::Radiant),
            ..passive(
                "Divine Blessing",
                "The creature's weapon attacks are magical and deal an extra 2d8 radiant damage",
            )
        },
        MonsterType::Fey => passive(
            "Fey Ancestry",
            "The creature has advantage on saving throws against being charmed, and magic can't put it to sleep",
        ),
        MonsterType::Elemental => passive(
            "Elemental Body",
            "The creature can move through spaces as narrow as 1 inch wide without squeezing",
        ),
        MonsterType::Construct => passive(
            "Immutable Form",
            "The creature is immune to any spell or effect that would alter its form",
        ),
        MonsterType::Ooze => passive(
            "Amorphous",
            "The creature can move through spaces as narrow as 1 inch wide without squeezing",
        ),
        MonsterType::Plant => passive(
            "False Appearance",
            "While motionless, the creature is indistinguishable from a normal plant",
        ),
        MonsterType::Beast if cr >= SPECIAL_ABILITIES_MIN_CR => passive(
            "Keen Senses",
            "The creature has advantage on Wisdom (Perception) checks that rely on sight, hearing, or smell",
        ),
        MonsterType::Giant => passive(
            "Powerful Build",
            "The creature counts as one size larger when determining its carrying capacity and the weight it can push, drag, or lift",
        ),
        MonsterType::Beast | MonsterType::Humanoid | MonsterType::Monstrosity => return None,
    };

    let mut abilities = vec![ability];
    if cr >= LEGENDARY_MIN_CR {
        abilities.push(passive(
            "Legendary Resistance (3/Day)",
            "If the creature fails a saving throw, it can choose to succeed instead",
        ));
    }
    Some(abilities)
}

fn attack(
    name: &str,
    description: &str,
    attack_bonus: Option<i32>,
    dice: DiceExpression,
    damage_type: DamageType,
) -> Action {
    Action {
        name: name.to_string(),
        description: description.to_string(),
        attack_bonus,
        damage_dice: Some(dice.to_string()),
        damage_type: Some(damage_type),
    }
}

fn actions<R: Rng + ?Sized>(rng: &mut R, monster_type: MonsterType, cr: f64) -> Vec<Action> {
    let bonus = Some((2.0 + cr) as i32);
    let whole = cr as i32;
    let half = (cr / 2.0) as i32;
    let dice = |count: i32, die_size: u32, modifier: i32| {
        DiceExpression::new(count.max(1) as u32, die_size, modifier)
    };

    match monster_type {
        MonsterType::Dragon => vec![
            attack(
                "Bite",
                "Melee Weapon Attack",
                bonus,
                dice(whole, 10, whole),
                DamageType::Piercing,
            ),
            attack(
                "Breath Weapon",
                "Exhales destructive energy in a cone",
                None,
                dice((cr * 2.0) as i32, 6, 0),
                *pick(
                    rng,
                    &[DamageType::Fire, DamageType::Cold, DamageType::Lightning],
                ),
            ),
        ],
        MonsterType::Undead => vec![attack(
            "Life Drain",
            "Melee Weapon Attack that drains life force",
            bonus,
            dice(half, 6, half),
            DamageType::Necrotic,
        )],
        MonsterType::Beast => vec![attack(
            "Claw",
            "Melee Weapon Attack",
            bonus,
            dice(half, 6, whole),
            DamageType::Slashing,
        )],
        _ => vec![attack(
            "Strike",
            "Melee Weapon Attack",
            bonus,
            dice(half, 8, whole),
            *pick(
                rng,
                &[
                    DamageType::Bludgeoning,
                    DamageType::Piercing,
                    DamageType::Slashing,
                ],
            ),
        )],
    }
}

fn speed<R: Rng + ?Sized>(rng: &mut R, monster_type: MonsterType) -> BTreeMap<String, u32> {
    let mut speed = BTreeMap::from([("walk".to_string(), 30)]);
    match monster_type {
        MonsterType::Dragon | MonsterType::Fey | MonsterType::Celestial => {
            speed.insert("fly".to_string(), 60);
        }
        MonsterType::Beast | MonsterType::Elemental if rng.random_bool(0.5) => {
            speed.insert("swim".to_string(), 30);
        }
        _ => {}
    }
    speed
}

/// Build a random monster within the given constraints
pub fn random_monster<R: Rng + ?Sized>(rng: &mut R, options: &MonsterOptions) -> Monster {
    let monster_type = match options.monster_type {
        Some(monster_type) => monster_type,
        None => *pick(rng, &MonsterType::ALL),
    };
    let size = match options.size {
        Some(size) => size,
        None => *pick(rng, &Size::ALL),
    };

    let ratings = challenge_ratings_between(options.min_cr, options.max_cr);
    let challenge_rating = if ratings.is_empty() {
        FALLBACK_CR
    } else {
        *pick(rng, &ratings)
    };

    let alignment = *pick(rng, &Alignment::ALL);
    let name = random_name(rng, monster_type);
    let stats = random_stats(rng, challenge_rating);
    let hit_dice = hit_dice(rng, challenge_rating, size);
    let armor_class = armor_class(rng, challenge_rating);
    let special_abilities = special_abilities(monster_type, challenge_rating);
    let actions = actions(rng, monster_type, challenge_rating);
    let speed = speed(rng, monster_type);
    let id = generated_id(rng);

    debug!(
        id,
        %name,
        ?monster_type,
        challenge_rating,
        "generated monster"
    );

    Monster {
        id,
        name,
        size,
        monster_type,
        alignment,
        armor_class,
        hit_points: hit_dice.average(),
        hit_dice: hit_dice.to_string(),
        speed,
        stats,
        saving_throws: None,
        skills: None,
        damage_resistances: None,
        damage_immunities: None,
        condition_immunities: None,
        senses: None,
        languages: None,
        challenge_rating,
        experience_points: xp_for_cr(challenge_rating),
        special_abilities,
        actions,
        legendary_actions: None,
        reactions: None,
    }
}
