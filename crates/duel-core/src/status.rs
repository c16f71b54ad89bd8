//! Per-battle character status
//!
//! Each character owns exactly one status record for the duration of a
//! battle. Records are constructed fresh at battle start and never reused
//! across battles.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Number of health snapshots kept for the rewind skill
pub const HP_HISTORY_LEN: usize = 3;

/// Fixed-capacity ring of a character's most recent health values
///
/// Pushing beyond capacity evicts the oldest entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HpHistory {
    entries: ArrayVec<i32, HP_HISTORY_LEN>,
}

impl HpHistory {
    /// Record a health value, evicting the oldest beyond capacity
    pub fn push(&mut self, hp: i32) {
        if self.entries.is_full() {
            self.entries.remove(0);
        }
        self.entries.push(hp);
    }

    /// The health value two snapshots back, if enough history exists
    pub fn rewind_target(&self) -> Option<i32> {
        match self.entries.len() {
            0 | 1 => None,
            n => Some(self.entries[n - 2]),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Battle-scoped status flags and counters
///
/// Phase information for the turn state machine lives entirely in these
/// fields; there is no separate phase enum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Raised defense until the end of this turn
    pub blocking: bool,

    /// Remaining turns of doubled defense
    pub shield_wall_turns: u8,

    /// Loses the next turn
    pub stunned: bool,

    /// Next incoming hit converts to healing
    pub divine_shield_active: bool,

    /// Next attack is a guaranteed, armor-ignoring crit
    pub holy_charged: bool,

    /// All incoming damage amplified by 35%
    pub reality_distortion_active: bool,

    /// 80% chance to dodge the next incoming hit
    pub dodge_boost_active: bool,

    /// Attacks add an armor-ignoring lifesteal tick
    pub corruption_active: bool,

    /// Revives at 20% max health instead of dying
    pub soulstone_active: bool,

    /// One skill per battle; latches on first use
    pub skill_used: bool,

    /// Recent health values for the rewind skill
    pub hp_history: HpHistory,
}

impl StatusRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display names of the currently active effects
    pub fn active_effects(&self) -> Vec<String> {
        let mut effects = Vec::new();
        if self.blocking {
            effects.push("Blocking".to_string());
        }
        if self.shield_wall_turns > 0 {
            effects.push(format!("Shield wall ({} turns)", self.shield_wall_turns));
        }
        if self.divine_shield_active {
            effects.push("Divine shield".to_string());
        }
        if self.holy_charged {
            effects.push("Holy charge ready".to_string());
        }
        if self.reality_distortion_active {
            effects.push("Reality distortion".to_string());
        }
        if self.dodge_boost_active {
            effects.push("Hunter's agility".to_string());
        }
        if self.corruption_active {
            effects.push("Corruption".to_string());
        }
        if self.soulstone_active {
            effects.push("Soulstone ready".to_string());
        }
        if self.stunned {
            effects.push("Stunned".to_string());
        }
        effects
    }
}
