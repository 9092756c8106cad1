//! Per-character records tracked by the roster.

use super::common::{AgentHandle, GameTime, HealthMeter};

/// One of the two playable agents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CharacterId {
    /// Brawler: slower regeneration, first on stage by default.
    Tireek,
    /// Runner: faster regeneration.
    Tryston,
}

impl CharacterId {
    pub const ALL: [CharacterId; 2] = [CharacterId::Tireek, CharacterId::Tryston];

    /// The partner agent.
    pub const fn other(self) -> Self {
        match self {
            Self::Tireek => Self::Tryston,
            Self::Tryston => Self::Tireek,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Tireek => 0,
            Self::Tryston => 1,
        }
    }
}

/// Health and switching bookkeeping for one agent.
///
/// Records are reset in place on respawn and rebuilt when the level restarts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterRecord {
    pub id: CharacterId,
    pub health: HealthMeter,
    pub is_active: bool,
    pub regen_per_second: u32,
    /// Last time a switch was attempted while this agent was selected.
    pub last_switch_attempt: Option<GameTime>,
    /// Cleared when a forced switch consumes it; restored at the recovery threshold.
    pub auto_switch_available: bool,
    pub handle: Option<AgentHandle>,
    /// Fractional regeneration not yet applied to the integer meter.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) regen_carry: f64,
}

impl CharacterRecord {
    pub fn new(id: CharacterId, max_health: u32, regen_per_second: u32) -> Self {
        Self {
            id,
            health: HealthMeter::full(max_health),
            is_active: false,
            regen_per_second,
            last_switch_attempt: None,
            auto_switch_available: true,
            handle: None,
            regen_carry: 0.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_exhausted()
    }

    /// True when the meter is eligible for passive regeneration.
    pub fn can_regenerate(&self) -> bool {
        !self.is_active && self.is_alive() && !self.health.is_full()
    }

    /// Re-arms auto-switch once health reaches `threshold_percent` of maximum.
    ///
    /// Returns true when the flag flipped back on.
    pub fn refresh_auto_switch(&mut self, threshold_percent: u32) -> bool {
        if !self.auto_switch_available && self.health.percent() >= threshold_percent {
            self.auto_switch_available = true;
            return true;
        }
        false
    }

    /// Restores full health and switch eligibility. Keeps the handle and cooldown stamp.
    pub fn reset_vitals(&mut self) {
        self.health.refill();
        self.auto_switch_available = true;
        self.regen_carry = 0.0;
    }
}
