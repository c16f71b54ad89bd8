//! Battle orchestration
//!
//! A battle owns two characters, the turn/current-player state machine,
//! the damage-resolution pipeline, and the append-only narration log. One
//! action is fully applied, logged, and turn-advanced before the next is
//! accepted; exclusive ownership (`&mut self`) is the serialization
//! contract.

mod skills;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

use crate::character::Character;
use crate::rng::BattleRng;

pub use skills::{SkillFn, SkillSet};

/// Multiplier applied to incoming damage under reality distortion
const DISTORTION_MULTIPLIER: f64 = 1.35;

/// Dodge chance while hunter's agility is armed
const DODGE_BOOST_CHANCE: f64 = 0.80;

/// Fraction of max health restored by a soulstone revival
const SOULSTONE_REVIVE_FRACTION: f64 = 0.20;

/// Fraction of the main hit added as the corruption lifesteal tick
const CORRUPTION_FRACTION: f64 = 0.3;

/// Which seat a character occupies in a battle
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumCount,
)]
pub enum Side {
    #[strum(serialize = "Player 1")]
    One,
    #[strum(serialize = "Player 2")]
    Two,
}

impl Side {
    pub const fn opponent(&self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

/// The four submittable action kinds
///
/// The enum is closed: there is no unrecognized-action path at runtime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Action {
    Attack,
    Block,
    SkillOffensive,
    SkillDefensive,
}

/// A turn-based duel between two characters
///
/// Created once both characters are assembled, mutated by every submitted
/// action, terminal once [`Battle::winner`] reports a side. Disposal after
/// the terminal state is the caller's business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Battle {
    pub char1: Character,
    pub char2: Character,
    pub turn: u32,
    pub current_player: Side,
    /// Append-only narration, one joined block per turn
    pub log: Vec<String>,
    rng: BattleRng,
}

impl Battle {
    /// Start a battle; the first player is chosen uniformly at random
    pub fn new(char1: Character, char2: Character, mut rng: BattleRng) -> Self {
        let current_player = if rng.rn2(2) == 0 { Side::One } else { Side::Two };

        let log = vec![
            "=== BATTLE START ===".to_string(),
            format!(
                "{} (lvl {}) VS {} (lvl {})",
                char1.full_name(),
                char1.level,
                char2.full_name(),
                char2.level
            ),
            format!("{} goes first", current_player),
            String::new(),
        ];

        Self {
            char1,
            char2,
            turn: 1,
            current_player,
            log,
            rng,
        }
    }

    pub fn character(&self, side: Side) -> &Character {
        match side {
            Side::One => &self.char1,
            Side::Two => &self.char2,
        }
    }

    pub fn character_mut(&mut self, side: Side) -> &mut Character {
        match side {
            Side::One => &mut self.char1,
            Side::Two => &mut self.char2,
        }
    }

    /// The character whose turn it is
    pub fn current_character(&self) -> &Character {
        self.character(self.current_player)
    }

    /// Split borrows for the acting side: (attacker, defender, rng)
    fn combatants_mut(&mut self) -> (&mut Character, &mut Character, &mut BattleRng) {
        match self.current_player {
            Side::One => (&mut self.char1, &mut self.char2, &mut self.rng),
            Side::Two => (&mut self.char2, &mut self.char1, &mut self.rng),
        }
    }

    /// Apply one action for the current player and advance the turn
    ///
    /// Returns the turn's narration lines; the same block is appended to
    /// the permanent battle log.
    pub fn execute_action(&mut self, action: Action) -> Vec<String> {
        let turn = self.turn;
        let side = self.current_player;
        let (attacker, defender, rng) = self.combatants_mut();

        let hp = attacker.health;
        attacker.status.hp_history.push(hp);

        let mut lines = vec![format!("--- Turn {}: {} ---", turn, side)];
        lines.extend(match action {
            Action::Attack => execute_attack(attacker, defender, rng),
            Action::Block => execute_block(attacker),
            Action::SkillOffensive => execute_offensive_skill(attacker, defender, rng),
            Action::SkillDefensive => execute_defensive_skill(attacker, defender, rng),
        });

        // Runs after every action, not only attacks: a corruption tick or
        // a skill hit can be the lethal blow too.
        if defender.is_dead() && defender.status.soulstone_active {
            defender.health =
                (defender.max_health as f64 * SOULSTONE_REVIVE_FRACTION).round() as i32;
            defender.status.soulstone_active = false;
            lines.push(format!(
                "!!! SOULSTONE TRIGGERED! {} rises again with {} HP",
                defender.full_name(),
                defender.health
            ));
        }

        lines.push(String::new());
        self.log.push(lines.join("\n"));
        self.switch_turn();
        lines
    }

    /// End the current player's turn and find the next player who may act
    ///
    /// Iterative skip handling, bounded by the number of sides: a stunned
    /// player never acts, and stun always clears when a turn is skipped.
    fn switch_turn(&mut self) {
        for skipped in 0..=Side::COUNT {
            let ending = self.character_mut(self.current_player);

            ending.status.blocking = false;
            if ending.status.shield_wall_turns > 0 {
                ending.status.shield_wall_turns -= 1;
            }
            // Armed-for-one-event flags expire with the turn that armed
            // them, whether or not they triggered.
            ending.status.holy_charged = false;
            ending.status.dodge_boost_active = false;

            self.current_player = self.current_player.opponent();

            let next = self.character_mut(self.current_player);
            if next.status.stunned && skipped < Side::COUNT {
                next.status.stunned = false;
                let line = format!(
                    "Turn {}: {} is stunned and skips the turn",
                    self.turn, self.current_player
                );
                self.log.push(line);
                self.turn += 1;
                continue;
            }

            self.turn += 1;
            return;
        }
    }

    /// The winning side, if the battle has reached a terminal state
    ///
    /// Side 1's death is checked first, so a simultaneous double-kill
    /// reports side 2 as the winner.
    pub fn winner(&self) -> Option<Side> {
        if self.char1.is_dead() {
            Some(Side::Two)
        } else if self.char2.is_dead() {
            Some(Side::One)
        } else {
            None
        }
    }

    /// Current state of both sides; a pure read
    pub fn status_report(&self) -> String {
        let mut lines = vec![
            "=== BATTLE STATUS ===".to_string(),
            format!("Turn: {}", self.turn),
            String::new(),
        ];

        for side in [Side::One, Side::Two] {
            let character = self.character(side);
            lines.push(format!("{}: {}", side, character.full_name()));
            lines.push(format!("HP: {}/{}", character.health, character.max_health));
            lines.push(format!("Defense: {}", character.defense()));

            let effects = character.status.active_effects();
            if !effects.is_empty() {
                lines.push(format!("Effects: {}", effects.join(", ")));
            }

            if character.status.skill_used {
                lines.push("Skill used: YES".to_string());
            } else {
                lines.push("Skill available: YES".to_string());
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }

    /// The whole narration, plus a victory banner once a winner exists
    pub fn full_log(&self) -> String {
        let mut result = self.log.join("\n");

        if let Some(winner) = self.winner() {
            let champion = self.character(winner);
            result.push_str(&format!(
                "\n\n=== WINNER: {} ===\n{} wins!",
                winner,
                champion.full_name()
            ));
        }

        result
    }
}

/// Run one incoming hit through the ordered mitigation chain
///
/// Returns the health actually removed and an optional event line. The
/// first short-circuiting stage decides the result; reality distortion
/// only amplifies and lets the chain continue.
pub fn apply_damage(
    defender: &mut Character,
    raw: i32,
    rng: &mut BattleRng,
) -> (i32, Option<String>) {
    let mut raw = raw;
    let mut event = None;

    if defender.status.reality_distortion_active {
        raw = (raw as f64 * DISTORTION_MULTIPLIER) as i32;
        event = Some("Reality distortion: damage amplified by 35%".to_string());
    }

    if defender.status.divine_shield_active {
        defender.heal(raw);
        defender.status.divine_shield_active = false;
        return (
            0,
            Some(format!(
                "DIVINE SHIELD! The hit is converted into {raw} HP of healing"
            )),
        );
    }

    if defender.status.dodge_boost_active && rng.chance(DODGE_BOOST_CHANCE) {
        return (0, Some("HUNTER'S AGILITY! Dodged!".to_string()));
    }

    let (racial_damage, racial_event) = defender.race.on_damage_taken(raw, rng);
    if let Some(racial_event) = racial_event {
        return (0, Some(racial_event));
    }

    // Minimum 1 damage on any connecting hit, even against extreme defense.
    let mitigated = racial_damage as f64 * (100 - defender.defense()) as f64 / 100.0;
    let final_damage = mitigated.max(1.0).round() as i32;
    defender.take_damage(final_damage);

    (final_damage, event)
}

fn execute_attack(
    attacker: &mut Character,
    defender: &mut Character,
    rng: &mut BattleRng,
) -> Vec<String> {
    let mut lines = vec![format!("{} attacks!", attacker.full_name())];

    let roll = attacker.roll_attack(rng);
    let mut crit = roll.crit;
    let final_damage;

    if attacker.status.holy_charged {
        // Forced crit, armor ignored: raw damage lands directly.
        crit = true;
        final_damage = roll.damage;
        defender.take_damage(final_damage);
        attacker.status.holy_charged = false;
        lines.push(">>> HOLY JUDGEMENT! Critical damage, armor ignored".to_string());
    } else {
        let (dealt, event) = apply_damage(defender, roll.damage, rng);
        final_damage = dealt;
        if let Some(event) = event {
            lines.push(format!(">>> {event}"));
        }
    }

    if attacker.status.corruption_active {
        let tick = (final_damage as f64 * CORRUPTION_FRACTION) as i32;
        defender.take_damage(tick);
        attacker.heal(tick);
        lines.push(format!(
            ">>> CORRUPTION: +{tick} damage (ignores armor), the warlock is healed for {tick} HP"
        ));
    }

    let crit_text = if crit { " [CRITICAL HIT!]" } else { "" };
    lines.push(format!(
        "Damage: {}{} -> {} (after defense)",
        roll.damage, crit_text, final_damage
    ));
    lines.push(format!(
        "{}: {}/{} HP",
        defender.full_name(),
        defender.health,
        defender.max_health
    ));

    lines
}

fn execute_block(attacker: &mut Character) -> Vec<String> {
    attacker.status.blocking = true;
    vec![
        format!("{} raises a guard!", attacker.full_name()),
        "Defense increased by 50% until the next turn".to_string(),
    ]
}

fn execute_offensive_skill(
    attacker: &mut Character,
    defender: &mut Character,
    rng: &mut BattleRng,
) -> Vec<String> {
    if attacker.status.skill_used {
        return vec!["The special skill has already been used!".to_string()];
    }
    attacker.status.skill_used = true;
    (attacker.class.skills().offensive)(attacker, defender, rng)
}

fn execute_defensive_skill(
    attacker: &mut Character,
    defender: &mut Character,
    rng: &mut BattleRng,
) -> Vec<String> {
    if attacker.status.skill_used {
        return vec!["The special skill has already been used!".to_string()];
    }
    attacker.status.skill_used = true;
    (attacker.class.skills().defensive)(attacker, defender, rng)
}
