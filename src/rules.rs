//! D&D 5e lookup tables

use crate::catalog::Size;

/// Challenge ratings offered by the monster generator, in ascending order
pub const CHALLENGE_RATINGS: [f64; 24] = [
    0.0, 0.125, 0.25, 0.5, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0,
    14.0, 15.0, 16.0, 17.0, 18.0, 19.0, 20.0,
];

/// Experience points by challenge rating
const XP_BY_CR: [(f64, u32); 24] = [
    (0.0, 10),
    (0.125, 25),
    (0.25, 50),
    (0.5, 100),
    (1.0, 200),
    (2.0, 450),
    (3.0, 700),
    (4.0, 1100),
    (5.0, 1800),
    (6.0, 2300),
    (7.0, 2900),
    (8.0, 3900),
    (9.0, 5000),
    (10.0, 5900),
    (11.0, 7200),
    (12.0, 8400),
    (13.0, 10000),
    (14.0, 11500),
    (15.0, 13000),
    (16.0, 15000),
    (17.0, 18000),
    (18.0, 20000),
    (19.0, 22000),
    (20.0, 25000),
];

/// CR at which monsters pick up Legendary Resistance
pub const LEGENDARY_MIN_CR: f64 = 10.0;

/// CR at which beasts gain their special senses
pub const SPECIAL_ABILITIES_MIN_CR: f64 = 2.0;

/// Experience points for a challenge rating
///
/// Ratings outside the table fall back to a thousand per point.
pub fn xp_for_cr(challenge_rating: f64) -> u32 {
    XP_BY_CR
        .iter()
        .find(|(cr, _)| *cr == challenge_rating)
        .map(|(_, xp)| *xp)
        .unwrap_or_else(|| (challenge_rating.max(0.0) * 1000.0) as u32)
}

/// Hit die size for a creature size
pub fn hit_die_for_size(size: Size) -> u32 {
    match size {
        Size::Tiny => 4,
        Size::Small => 6,
        Size::Medium => 8,
        Size::Large => 10,
        Size::Huge => 12,
        Size::Gargantuan => 20,
    }
}

/// Challenge ratings within an inclusive range
pub fn challenge_ratings_between(min_cr: Option<f64>, max_cr: Option<f64>) -> Vec<f64> {
    let min_cr = min_cr.unwrap_or(0.0);
    let max_cr = max_cr.unwrap_or(20.0);
    CHALLENGE_RATINGS
        .iter()
        .copied()
        .filter(|cr| (min_cr..=max_cr).contains(cr))
        .collect()
}
