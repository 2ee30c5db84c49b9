use rand::Rng;
use tracing::debug;

use super::{generated_id, pick};
use crate::catalog::{Alignment, Character, Class, Race, Stats};

const TEMPLATES: usize = 4;

/// 4d6, drop the lowest die
pub fn roll_ability_score<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    let mut rolls: [i32; 4] = std::array::from_fn(|_| rng.random_range(1..=6));
    rolls.sort_unstable();
    rolls[1..].iter().sum()
}

fn random_stats<R: Rng + ?Sized>(rng: &mut R) -> Stats {
    Stats {
        strength: roll_ability_score(rng),
        dexterity: roll_ability_score(rng),
        constitution: roll_ability_score(rng),
        intelligence: roll_ability_score(rng),
        wisdom: roll_ability_score(rng),
        charisma: roll_ability_score(rng),
    }
}

fn first_names(race: Race) -> &'static [&'static str] {
    match race {
        Race::Human => &[
            "Alric", "Brianna", "Connor", "Diana", "Erik", "Fiona", "Garrett", "Helena",
        ],
        Race::Elf => &[
            "Aelrindel", "Caelynn", "Erevan", "Faelyn", "Galadriel", "Silaqui", "Theren",
            "Valandil",
        ],
        Race::Dwarf => &[
            "Baern", "Dagnal", "Eberk", "Fargrim", "Gimli", "Thorin", "Ulfgar", "Vondal",
        ],
        Race::Halfling => &[
            "Alton", "Cora", "Eldon", "Lily", "Merric", "Portia", "Rosco", "Seraphina",
        ],
        Race::Dragonborn => &[
            "Arjhan", "Balasar", "Donaar", "Ghesh", "Heskan", "Kriv", "Medrash", "Patrin",
        ],
        Race::Gnome => &[
            "Alston", "Brocc", "Dimble", "Eldon", "Fonkin", "Gimble", "Orryn", "Roondar",
        ],
        Race::HalfElf => &[
            "Arlan", "Celeste", "Damien", "Elara", "Gareth", "Lyra", "Rowan", "Selene",
        ],
        Race::HalfOrc => &[
            "Dench", "Feng", "Gell", "Holg", "Imsh", "Keth", "Mhurren", "Ront",
        ],
        Race::Tiefling => &[
            "Akmenios", "Damakos", "Ekemon", "Iados", "Kairon", "Leucis", "Melech", "Therai",
        ],
    }
}

fn class_traits(class: Class) -> &'static [&'static str] {
    match class {
        Class::Barbarian => &["fierce", "wild", "untamed", "savage", "primal"],
        Class::Bard => &["charismatic", "eloquent", "artistic", "charming", "witty"],
        Class::Cleric => &["devout", "faithful", "holy", "devoted", "righteous"],
        Class::Druid => &["mystical", "nature-bound", "wise", "primal", "balanced"],
        Class::Fighter => &["disciplined", "skilled", "battle-hardened", "tactical", "brave"],
        Class::Monk => &["disciplined", "serene", "focused", "spiritual", "meditative"],
        Class::Paladin => &["noble", "honorable", "righteous", "sworn", "devoted"],
        Class::Ranger => &["skilled", "wilderness-wise", "tracking", "solitary", "keen-eyed"],
        Class::Rogue => &["cunning", "stealthy", "quick-witted", "shadowy", "resourceful"],
        Class::Sorcerer => &[
            "innately powerful",
            "mysterious",
            "chaotic",
            "gifted",
            "unpredictable",
        ],
        Class::Warlock => &["pact-bound", "mysterious", "dark", "enigmatic", "otherworldly"],
        Class::Wizard => &["scholarly", "studious", "arcane", "intellectual", "learned"],
    }
}

fn motivations(alignment: Alignment) -> &'static [&'static str] {
    match alignment {
        Alignment::LawfulGood => &[
            "protects the innocent",
            "upholds justice",
            "serves the greater good",
        ],
        Alignment::NeutralGood => &[
            "helps those in need",
            "does what's right",
            "brings hope to others",
        ],
        Alignment::ChaoticGood => &[
            "fights for freedom",
            "rebels against tyranny",
            "champions the oppressed",
        ],
        Alignment::LawfulNeutral => &[
            "follows a strict code",
            "maintains order",
            "upholds tradition",
        ],
        Alignment::TrueNeutral => &["seeks balance", "avoids extremes", "remains independent"],
        Alignment::ChaoticNeutral => &[
            "follows their own path",
            "values freedom above all",
            "lives by their whims",
        ],
        Alignment::LawfulEvil => &[
            "ruthlessly pursues power",
            "manipulates through law",
            "dominates through order",
        ],
        Alignment::NeutralEvil => &[
            "serves only themselves",
            "schemes for personal gain",
            "exploits the weak",
        ],
        Alignment::ChaoticEvil => &[
            "spreads chaos and destruction",
            "revels in cruelty",
            "takes what they want",
        ],
        Alignment::Unaligned => &[
            "acts on instinct",
            "follows no moral code",
            "exists beyond morality",
        ],
    }
}

fn backgrounds(race: Race) -> &'static [&'static str] {
    match race {
        Race::Human => &[
            "from a diverse background",
            "adaptable to any situation",
            "driven by ambition",
        ],
        Race::Elf => &[
            "with centuries of wisdom",
            "connected to ancient magic",
            "graceful and patient",
        ],
        Race::Dwarf => &[
            "with a proud clan heritage",
            "master of craftsmanship",
            "stubborn and loyal",
        ],
        Race::Halfling => &[
            "with a love for comfort and adventure",
            "lucky beyond measure",
            "curious about the world",
        ],
        Race::Dragonborn => &[
            "bearing the blood of dragons",
            "seeking to honor their clan",
            "proud and honorable",
        ],
        Race::Gnome => &[
            "with boundless curiosity",
            "inventive and clever",
            "forever optimistic",
        ],
        Race::HalfElf => &[
            "caught between two worlds",
            "versatile and adaptable",
            "searching for belonging",
        ],
        Race::HalfOrc => &[
            "struggling against prejudice",
            "proving their worth",
            "fierce and determined",
        ],
        Race::Tiefling => &[
            "marked by infernal heritage",
            "overcoming dark assumptions",
            "resilient and resourceful",
        ],
    }
}

fn describe<R: Rng + ?Sized>(
    rng: &mut R,
    name: &str,
    race: Race,
    class: Class,
    alignment: Alignment,
) -> String {
    let trait_ = pick(rng, class_traits(class));
    let motivation = pick(rng, motivations(alignment));
    let background = pick(rng, backgrounds(race));

    match rng.random_range(0..TEMPLATES) {
        0 => format!("{name} is a {trait_} {race} {class} {background} who {motivation}."),
        1 => format!("A {trait_} {class} {background}, {name} {motivation} wherever they go."),
        2 => format!(
            "{name}, a {race} {class}, is known as a {trait_} adventurer who {motivation}."
        ),
        _ => format!("Born {background}, {name} became a {trait_} {class} who {motivation}."),
    }
}

/// Roll up a complete random character
pub fn random_character<R: Rng + ?Sized>(rng: &mut R) -> Character {
    let race = *pick(rng, &Race::ALL);
    let class = *pick(rng, &Class::ALL);
    let alignment = *pick(rng, &Alignment::ALL);
    let stats = random_stats(rng);
    let name = pick(rng, first_names(race)).to_string();
    let description = describe(rng, &name, race, class, alignment);
    let id = generated_id(rng);

    debug!(id, %name, %race, %class, "generated character");

    Character {
        id,
        name,
        race,
        class,
        alignment,
        description,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{GENERATED_ID_MAX, GENERATED_ID_MIN};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_ability_scores_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let score = roll_ability_score(&mut rng);
            assert!((3..=18).contains(&score), "score {}", score);
        }
    }

    #[test]
    fn test_random_character_is_well_formed() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let character = random_character(&mut rng);
            assert!((GENERATED_ID_MIN..=GENERATED_ID_MAX).contains(&character.id));
            assert!(first_names(character.race).contains(&character.name.as_str()));
            assert!(character.description.contains(&character.name));
            assert!(character.description.contains(character.class.as_str()));
            assert!(character
                .stats
                .scores()
                .iter()
                .all(|s| (3..=18).contains(s)));
        }
    }

    #[test]
    fn test_same_seed_same_character() {
        let a = random_character(&mut StdRng::seed_from_u64(99));
        let b = random_character(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
