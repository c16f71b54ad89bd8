//! Character classes and their immutable stat templates

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString};

/// Immutable base-stat and skill-naming profile for one archetype
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassTemplate {
    /// Display name
    pub name: &'static str,
    pub base_health: i32,
    pub base_attack: i32,
    pub base_defense: i32,
    /// Chance in [0, 1] for an attack roll to crit
    pub crit_chance: f64,
    /// Damage multiplier applied on a crit, >= 1
    pub crit_multiplier: f64,
    pub offensive_skill: &'static str,
    pub defensive_skill: &'static str,
}

const WARRIOR: ClassTemplate = ClassTemplate {
    name: "Warrior",
    base_health: 120,
    base_attack: 12,
    base_defense: 30,
    crit_chance: 0.15,
    crit_multiplier: 1.8,
    offensive_skill: "Thunder Hammer",
    defensive_skill: "Shield Wall",
};

const PALADIN: ClassTemplate = ClassTemplate {
    name: "Paladin",
    base_health: 110,
    base_attack: 11,
    base_defense: 25,
    crit_chance: 0.12,
    crit_multiplier: 2.0,
    offensive_skill: "Holy Judgement",
    defensive_skill: "Divine Shield",
};

const MAGE: ClassTemplate = ClassTemplate {
    name: "Mage",
    base_health: 80,
    base_attack: 18,
    base_defense: 10,
    crit_chance: 0.25,
    crit_multiplier: 2.5,
    offensive_skill: "Reality Distortion",
    defensive_skill: "Altertime",
};

const ARCHER: ClassTemplate = ClassTemplate {
    name: "Archer",
    base_health: 90,
    base_attack: 14,
    base_defense: 15,
    crit_chance: 0.35,
    crit_multiplier: 2.2,
    offensive_skill: "Arrow Storm",
    defensive_skill: "Hunter's Agility",
};

const WARLOCK: ClassTemplate = ClassTemplate {
    name: "Warlock",
    base_health: 85,
    base_attack: 16,
    base_defense: 12,
    crit_chance: 0.20,
    crit_multiplier: 2.3,
    offensive_skill: "Corruption",
    defensive_skill: "Soulstone",
};

/// Character class
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum CharClass {
    #[default]
    Warrior,
    Paladin,
    Mage,
    Archer,
    Warlock,
}

impl CharClass {
    /// All classes in order
    pub const ALL: [CharClass; 5] = [
        CharClass::Warrior,
        CharClass::Paladin,
        CharClass::Mage,
        CharClass::Archer,
        CharClass::Warlock,
    ];

    /// The immutable template backing this archetype
    pub const fn template(&self) -> &'static ClassTemplate {
        match self {
            CharClass::Warrior => &WARRIOR,
            CharClass::Paladin => &PALADIN,
            CharClass::Mage => &MAGE,
            CharClass::Archer => &ARCHER,
            CharClass::Warlock => &WARLOCK,
        }
    }
}
