//! Combat calculator endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{ApiError, AppState};
use crate::combat::{
    self, parse_dice, AdvantageMode, AttackResult, CombatError, CombatTurnResult, DamageResult,
    DamageType, DiceExpression, SavingThrowResult,
};

/// Most dice a single request may roll
pub const MAX_DICE_COUNT: u32 = 100;

/// Largest die a request may name
pub const MAX_DIE_SIZE: u32 = 1000;

/// Largest magnitude accepted for an attack bonus, ability modifier, or
/// proficiency bonus
pub const MAX_BONUS: i32 = 1000;

/// Build combat router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/combat", get(info))
        .route("/combat/attack-roll", post(attack_roll))
        .route("/combat/damage-roll", post(damage_roll))
        .route("/combat/saving-throw", post(saving_throw))
        .route("/combat/combat", post(full_combat))
}

/// Attack roll request
#[derive(Debug, Deserialize)]
pub struct AttackRollRequest {
    pub attack_bonus: i32,
    pub armor_class: i32,
    #[serde(default)]
    pub advantage: AdvantageMode,
}

impl AttackRollRequest {
    fn validate(&self) -> Result<(), CombatError> {
        check_bonus("attack_bonus", self.attack_bonus)?;
        check_armor_class(self.armor_class)
    }
}

/// Damage roll request
#[derive(Debug, Deserialize)]
pub struct DamageRollRequest {
    pub damage_dice: String,
    pub damage_type: DamageType,
    #[serde(default)]
    pub critical_hit: bool,
}

impl DamageRollRequest {
    fn validate(&self) -> Result<DiceExpression, CombatError> {
        damage_expression(&self.damage_dice)
    }
}

/// Saving throw request
#[derive(Debug, Deserialize)]
pub struct SavingThrowRequest {
    pub ability_modifier: i32,
    #[serde(default)]
    pub proficiency_bonus: i32,
    pub dc: i32,
    #[serde(default)]
    pub advantage: AdvantageMode,
}

impl SavingThrowRequest {
    fn validate(&self) -> Result<(), CombatError> {
        check_bonus("ability_modifier", self.ability_modifier)?;
        if self.proficiency_bonus < 0 {
            return Err(CombatError::invalid(
                "proficiency_bonus",
                "must not be negative",
            ));
        }
        check_bonus("proficiency_bonus", self.proficiency_bonus)?;
        if self.dc < 1 {
            return Err(CombatError::invalid("dc", "must be at least 1"));
        }
        Ok(())
    }
}

/// Full combat turn request
#[derive(Debug, Deserialize)]
pub struct CombatRequest {
    pub attack_bonus: i32,
    pub armor_class: i32,
    pub damage_dice: String,
    pub damage_type: DamageType,
    #[serde(default)]
    pub advantage: AdvantageMode,
}

impl CombatRequest {
    fn validate(&self) -> Result<DiceExpression, CombatError> {
        check_bonus("attack_bonus", self.attack_bonus)?;
        check_armor_class(self.armor_class)?;
        damage_expression(&self.damage_dice)
    }
}

fn check_bonus(field: &'static str, value: i32) -> Result<(), CombatError> {
    if !(-MAX_BONUS..=MAX_BONUS).contains(&value) {
        return Err(CombatError::invalid(
            field,
            format!("must be between {} and {}", -MAX_BONUS, MAX_BONUS),
        ));
    }
    Ok(())
}

fn check_armor_class(armor_class: i32) -> Result<(), CombatError> {
    if armor_class < 1 {
        return Err(CombatError::invalid("armor_class", "must be at least 1"));
    }
    Ok(())
}

/// Parse damage notation and hold it to the request limits
fn damage_expression(notation: &str) -> Result<DiceExpression, CombatError> {
    let expr = parse_dice(notation)?;
    if expr.count > MAX_DICE_COUNT {
        return Err(CombatError::invalid(
            "damage_dice",
            format!("at most {} dice may be rolled", MAX_DICE_COUNT),
        ));
    }
    if expr.die_size > MAX_DIE_SIZE {
        return Err(CombatError::invalid(
            "damage_dice",
            format!("die size must be at most {}", MAX_DIE_SIZE),
        ));
    }
    Ok(expr)
}

/// Roll an attack against an armor class
async fn attack_roll(
    State(state): State<AppState>,
    body: Result<Json<AttackRollRequest>, JsonRejection>,
) -> Result<Json<AttackResult>, ApiError> {
    let Json(req) = body?;
    req.validate()?;

    let mut roller = state.roller();
    Ok(Json(combat::attack_roll(
        roller.as_mut(),
        req.attack_bonus,
        req.armor_class,
        req.advantage,
    )))
}

/// Roll damage dice, doubled on a critical
async fn damage_roll(
    State(state): State<AppState>,
    body: Result<Json<DamageRollRequest>, JsonRejection>,
) -> Result<Json<DamageResult>, ApiError> {
    let Json(req) = body?;
    let expr = req.validate()?;

    let mut roller = state.roller();
    let result = combat::roll_damage(roller.as_mut(), &expr, req.damage_type, req.critical_hit)?;
    Ok(Json(result))
}

/// Roll a saving throw against a DC
async fn saving_throw(
    State(state): State<AppState>,
    body: Result<Json<SavingThrowRequest>, JsonRejection>,
) -> Result<Json<SavingThrowResult>, ApiError> {
    let Json(req) = body?;
    req.validate()?;

    let mut roller = state.roller();
    Ok(Json(combat::saving_throw(
        roller.as_mut(),
        req.ability_modifier,
        req.proficiency_bonus,
        req.dc,
        req.advantage,
    )))
}

/// Attack, then damage on a hit
async fn full_combat(
    State(state): State<AppState>,
    body: Result<Json<CombatRequest>, JsonRejection>,
) -> Result<Json<CombatTurnResult>, ApiError> {
    let Json(req) = body?;
    let expr = req.validate()?;

    let mut roller = state.roller();
    let result = combat::resolve_turn(
        roller.as_mut(),
        req.attack_bonus,
        req.armor_class,
        &expr,
        req.damage_type,
        req.advantage,
    )?;
    Ok(Json(result))
}

#[derive(Serialize)]
struct InfoResponse {
    description: &'static str,
    endpoints: serde_json::Value,
    features: [&'static str; 5],
}

/// Describe the calculator
async fn info() -> impl IntoResponse {
    Json(InfoResponse {
        description: "D&D 5e Combat Calculator",
        endpoints: json!({
            "POST /combat/attack-roll": "Roll an attack (d20 + modifier) against AC",
            "POST /combat/damage-roll": "Roll damage dice with optional critical hit",
            "POST /combat/saving-throw": "Roll a saving throw against a DC",
            "POST /combat/combat": "Full combat calculation (attack + damage)",
        }),
        features: [
            "Advantage/disadvantage support",
            "Critical hit detection",
            "Automatic damage doubling on crits",
            "Flexible dice notation parsing",
            "All D&D 5e damage types",
        ],
    })
}
