//! Character races
//!
//! A race contributes three stat multipliers and, for some races, a hook
//! that can transform incoming damage after the higher-priority status
//! effects have had their chance.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::rng::BattleRng;

/// Chance for an elf to dodge an incoming hit entirely
const ELF_DODGE_CHANCE: f64 = 0.20;

/// Character race
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
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Race {
    Elf,
    #[default]
    Human,
    Troll,
}

impl Race {
    /// All races in order
    pub const ALL: [Race; 3] = [Race::Elf, Race::Human, Race::Troll];

    /// Multiplier applied to the class's base health
    pub const fn health_mod(&self) -> f64 {
        match self {
            Race::Elf => 0.9,
            Race::Human => 1.0,
            Race::Troll => 1.3,
        }
    }

    /// Multiplier applied to the class's base attack
    pub const fn attack_mod(&self) -> f64 {
        match self {
            Race::Elf => 1.1,
            Race::Human => 1.0,
            Race::Troll => 0.9,
        }
    }

    /// Multiplier applied to the class's base defense
    pub const fn defense_mod(&self) -> f64 {
        match self {
            Race::Elf => 1.0,
            Race::Human => 1.1,
            Race::Troll => 1.0,
        }
    }

    /// One-line racial ability description for the character sheet
    pub const fn ability_summary(&self) -> &'static str {
        match self {
            Race::Elf => "Dodge: 20% chance to avoid a hit entirely",
            Race::Human => "Balanced stats, +10% defense",
            Race::Troll => "+30% HP, -10% attack",
        }
    }

    /// Racial hook on incoming damage
    ///
    /// Returns the effective damage and an optional event line. The default
    /// is a pass-through; an elf negates the hit entirely with fixed
    /// probability.
    pub fn on_damage_taken(&self, damage: i32, rng: &mut BattleRng) -> (i32, Option<String>) {
        match self {
            Race::Elf if rng.chance(ELF_DODGE_CHANCE) => (0, Some("Dodged!".to_string())),
            _ => (damage, None),
        }
    }
}
