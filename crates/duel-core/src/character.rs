//! Characters: a race and a class template composed at a level

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::class::{CharClass, ClassTemplate};
use crate::error::BuildError;
use crate::race::Race;
use crate::rng::BattleRng;
use crate::status::StatusRecord;

/// Highest reachable character level
pub const MAX_LEVEL: u8 = 5;

/// Defense multiplier while blocking
const BLOCK_MULTIPLIER: f64 = 1.5;

/// Result of a single attack roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRoll {
    /// Damage before any mitigation
    pub damage: i32,
    /// Whether the crit multiplier was applied
    pub crit: bool,
}

/// A combat-ready character
///
/// Base stats are derived once at construction from the class template and
/// the racial multipliers; health and attack power scale linearly with
/// level. Health stays within [0, max_health] through every engine
/// operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub race: Race,
    pub class: CharClass,
    pub level: u8,

    // Derived at construction
    pub base_health: i32,
    pub base_attack: i32,
    pub base_defense: i32,
    pub max_health: i32,
    pub health: i32,
    pub attack_power: i32,
    pub crit_chance: f64,
    pub crit_multiplier: f64,

    /// Battle-scoped flags and history
    pub status: StatusRecord,
}

impl Character {
    /// Compose a race and a class at a level
    pub fn new(race: Race, class: CharClass, level: u8) -> Result<Self, BuildError> {
        if !(1..=MAX_LEVEL).contains(&level) {
            return Err(BuildError::LevelOutOfRange(level));
        }

        let template = class.template();
        let base_health = (template.base_health as f64 * race.health_mod()) as i32;
        let base_attack = (template.base_attack as f64 * race.attack_mod()) as i32;
        let base_defense = (template.base_defense as f64 * race.defense_mod()) as i32;
        let max_health = base_health * level as i32;

        Ok(Self {
            race,
            class,
            level,
            base_health,
            base_attack,
            base_defense,
            max_health,
            health: max_health,
            attack_power: base_attack * level as i32,
            crit_chance: template.crit_chance,
            crit_multiplier: template.crit_multiplier,
            status: StatusRecord::new(),
        })
    }

    /// The immutable template backing this character's class
    pub fn template(&self) -> &'static ClassTemplate {
        self.class.template()
    }

    /// "Race Class", e.g. "Elf Warrior"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.race, self.class)
    }

    /// Roll one attack; each call draws its own crit check
    pub fn roll_attack(&self, rng: &mut BattleRng) -> AttackRoll {
        let crit = rng.chance(self.crit_chance);
        let damage = if crit {
            (self.attack_power as f64 * self.crit_multiplier).round() as i32
        } else {
            self.attack_power
        };
        AttackRoll { damage, crit }
    }

    /// Current defense value, responsive to active effects
    ///
    /// Block and shield wall apply sequentially, so shield wall doubles the
    /// already-block-multiplied value when both are up.
    pub fn defense(&self) -> i32 {
        let mut defense = self.base_defense * self.level as i32;
        if self.status.blocking {
            defense = (defense as f64 * BLOCK_MULTIPLIER) as i32;
        }
        if self.status.shield_wall_turns > 0 {
            defense *= 2;
        }
        defense
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn health_percent(&self) -> f64 {
        100.0 * self.health as f64 / self.max_health as f64
    }

    /// Heal by `amount`, capped at max health
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Remove health directly, saturating at zero
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    /// Advance one level and fully restore health; no-op at max level
    pub fn level_up(&mut self) {
        if self.level >= MAX_LEVEL {
            return;
        }
        self.level += 1;
        self.max_health = self.base_health * self.level as i32;
        self.attack_power = self.base_attack * self.level as i32;
        self.health = self.max_health;
    }

    /// Multi-line character sheet for the external profile surface
    pub fn sheet(&self) -> String {
        let template = self.template();
        let filled = (self.health_percent() / 10.0) as usize;
        let bar = "█".repeat(filled) + &"░".repeat(10 - filled);

        let lines = [
            format!("{} | {}", self.race, template.name),
            format!("Level: {}/{}", self.level, MAX_LEVEL),
            format!("HP: {}/{}", self.health, self.max_health),
            format!("   [{}] {:.1}%", bar, self.health_percent()),
            format!("Attack: {}", self.attack_power),
            format!("Defense: {}", self.defense()),
            format!("Crit chance: {:.0}%", self.crit_chance * 100.0),
            format!("Crit multiplier: x{}", self.crit_multiplier),
            String::new(),
            format!("Racial ability: {}", self.race.ability_summary()),
            format!("Offensive skill: {}", template.offensive_skill),
            format!("Defensive skill: {}", template.defensive_skill),
        ];
        lines.join("\n")
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (lvl {}, {}/{} HP)",
            self.full_name(),
            self.level,
            self.health,
            self.max_health
        )
    }
}

/// Build a character from external string identifiers
///
/// Identifiers are expected to be pre-validated; unknown ids fail fast.
pub fn build_character(race_id: &str, class_id: &str, level: u8) -> Result<Character, BuildError> {
    let race = race_id
        .parse()
        .map_err(|_| BuildError::UnknownRace(race_id.to_string()))?;
    let class = class_id
        .parse()
        .map_err(|_| BuildError::UnknownClass(class_id.to_string()))?;
    Character::new(race, class, level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(race: Race, class: CharClass, level: u8) -> Character {
        Character::new(race, class, level).unwrap()
    }

    #[test]
    fn test_human_warrior_derivation() {
        let c = character(Race::Human, CharClass::Warrior, 1);
        assert_eq!(c.base_health, 120);
        assert_eq!(c.base_attack, 12);
        // 30 * 1.1, floored
        assert_eq!(c.base_defense, 33);
        assert_eq!(c.max_health, 120);
        assert_eq!(c.health, 120);
        assert_eq!(c.attack_power, 12);
        assert_eq!(c.defense(), 33);
    }

    #[test]
    fn test_racial_products_are_floored() {
        let elf = character(Race::Elf, CharClass::Warrior, 1);
        // 120 * 0.9 = 108, 12 * 1.1 = 13.2 -> 13
        assert_eq!(elf.base_health, 108);
        assert_eq!(elf.base_attack, 13);
        assert_eq!(elf.base_defense, 30);

        let troll = character(Race::Troll, CharClass::Mage, 1);
        // 80 * 1.3 = 104, 18 * 0.9 = 16.2 -> 16
        assert_eq!(troll.base_health, 104);
        assert_eq!(troll.base_attack, 16);
    }

    #[test]
    fn test_level_scaling_is_linear() {
        let c = character(Race::Human, CharClass::Warrior, 3);
        assert_eq!(c.max_health, 360);
        assert_eq!(c.attack_power, 36);
        assert_eq!(c.defense(), 99);
    }

    #[test]
    fn test_level_out_of_range() {
        assert!(matches!(
            Character::new(Race::Human, CharClass::Warrior, 0),
            Err(BuildError::LevelOutOfRange(0))
        ));
        assert!(matches!(
            Character::new(Race::Human, CharClass::Warrior, 6),
            Err(BuildError::LevelOutOfRange(6))
        ));
    }

    #[test]
    fn test_defense_stacking_is_sequential() {
        let mut c = character(Race::Human, CharClass::Warrior, 1);
        c.status.blocking = true;
        // 33 * 1.5 = 49.5 -> 49
        assert_eq!(c.defense(), 49);
        c.status.shield_wall_turns = 2;
        // shield wall doubles the block-multiplied value
        assert_eq!(c.defense(), 98);
        c.status.blocking = false;
        assert_eq!(c.defense(), 66);
    }

    #[test]
    fn test_roll_attack_with_pinned_crit() {
        let mut rng = BattleRng::new(9);
        let mut c = character(Race::Human, CharClass::Warrior, 1);

        c.crit_chance = 0.0;
        let roll = c.roll_attack(&mut rng);
        assert_eq!(roll, AttackRoll { damage: 12, crit: false });

        c.crit_chance = 1.0;
        let roll = c.roll_attack(&mut rng);
        // round(12 * 1.8) = 22
        assert_eq!(roll, AttackRoll { damage: 22, crit: true });
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut c = character(Race::Human, CharClass::Warrior, 1);
        c.health = 100;
        c.heal(50);
        assert_eq!(c.health, 120);
    }

    #[test]
    fn test_take_damage_saturates_at_zero() {
        let mut c = character(Race::Human, CharClass::Warrior, 1);
        c.take_damage(500);
        assert_eq!(c.health, 0);
        assert!(c.is_dead());
        assert!(!c.is_alive());
    }

    #[test]
    fn test_level_up_restores_and_rescales() {
        let mut c = character(Race::Human, CharClass::Warrior, 1);
        c.health = 10;
        c.level_up();
        assert_eq!(c.level, 2);
        assert_eq!(c.max_health, 240);
        assert_eq!(c.health, 240);
        assert_eq!(c.attack_power, 24);
    }

    #[test]
    fn test_level_up_noop_at_max() {
        let mut c = character(Race::Human, CharClass::Warrior, MAX_LEVEL);
        c.health = 10;
        c.level_up();
        assert_eq!(c.level, MAX_LEVEL);
        assert_eq!(c.health, 10);
    }

    #[test]
    fn test_build_character_round_trip() {
        let c = build_character("elf", "mage", 2).unwrap();
        assert_eq!(c.race.to_string(), "Elf");
        assert_eq!(c.template().name, "Mage");
        assert_eq!(c.full_name(), "Elf Mage");
    }

    #[test]
    fn test_build_character_errors() {
        assert!(matches!(
            build_character("goblin", "warrior", 1),
            Err(BuildError::UnknownRace(_))
        ));
        assert!(matches!(
            build_character("elf", "bard", 1),
            Err(BuildError::UnknownClass(_))
        ));
        assert!(matches!(
            build_character("elf", "mage", 0),
            Err(BuildError::LevelOutOfRange(0))
        ));
    }

    #[test]
    fn test_sheet_mentions_skills_and_race() {
        let c = character(Race::Troll, CharClass::Warlock, 1);
        let sheet = c.sheet();
        assert!(sheet.contains("Troll | Warlock"));
        assert!(sheet.contains("Corruption"));
        assert!(sheet.contains("Soulstone"));
        assert!(sheet.contains("-10% attack"));
    }

    #[test]
    fn test_display() {
        let c = character(Race::Human, CharClass::Paladin, 2);
        assert_eq!(c.to_string(), "Human Paladin (lvl 2, 220/220 HP)");
    }
}
