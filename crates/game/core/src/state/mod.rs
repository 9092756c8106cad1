//! Roster data model.
//!
//! [`RosterState`] owns the two [`CharacterRecord`]s and the selected agent.
//! It is created once per level and reset in place on respawn or restart;
//! the controller is the only writer.
pub mod types;

pub use types::{
    AgentHandle, CharacterId, CharacterRecord, EventId, GameTime, HealthMeter, LevelId,
    OpponentId, Position, TransitionId, Velocity,
};

use crate::config::RosterConfig;

/// Health and activity records for both agents plus the selected one.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterState {
    characters: [CharacterRecord; 2],
    selected: CharacterId,
}

impl RosterState {
    /// Builds both records at full health with `starting` active.
    pub fn new(starting: CharacterId, config: &RosterConfig) -> Self {
        let characters = CharacterId::ALL.map(|id| {
            let profile = config.profile(id);
            CharacterRecord::new(id, profile.max_health, profile.regen_per_second)
        });
        let mut roster = Self {
            characters,
            selected: starting,
        };
        roster.record_mut(starting).is_active = true;
        roster
    }

    pub fn record(&self, id: CharacterId) -> &CharacterRecord {
        &self.characters[id.index()]
    }

    pub fn record_mut(&mut self, id: CharacterId) -> &mut CharacterRecord {
        &mut self.characters[id.index()]
    }

    pub fn records(&self) -> impl Iterator<Item = &CharacterRecord> {
        self.characters.iter()
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut CharacterRecord> {
        self.characters.iter_mut()
    }

    /// The agent the player controls (or is about to, during a pending switch).
    pub fn selected(&self) -> CharacterId {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, id: CharacterId) {
        self.selected = id;
    }

    pub fn selected_record(&self) -> &CharacterRecord {
        self.record(self.selected)
    }

    /// Agents currently flagged active. Exactly one once any switch has settled.
    pub fn active_count(&self) -> usize {
        self.characters.iter().filter(|r| r.is_active).count()
    }

    /// Marks `id` as the only active agent.
    pub(crate) fn mark_active(&mut self, id: CharacterId) {
        for record in &mut self.characters {
            record.is_active = record.id == id;
        }
        self.selected = id;
    }

    pub fn cascade_state(&self) -> CascadeState {
        match self.characters.iter().filter(|r| !r.is_alive()).count() {
            0 => CascadeState::Alive,
            1 => CascadeState::OneDown,
            _ => CascadeState::BothDown,
        }
    }

    /// Full health and auto-switch for both agents; `selected` stays the active one.
    pub fn reset_vitals(&mut self) {
        for record in &mut self.characters {
            record.reset_vitals();
        }
        let selected = self.selected;
        self.mark_active(selected);
    }

    /// Fresh records for a recreated level. Handles are dropped.
    pub(crate) fn reinitialize(&mut self, starting: CharacterId, config: &RosterConfig) {
        *self = Self::new(starting, config);
    }
}

/// Coarse liveness of the roster, as seen by the death cascade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CascadeState {
    /// Both agents have health left.
    Alive,
    /// Exactly one agent is exhausted.
    OneDown,
    /// Total wipe; only the recovery flow resolves this.
    BothDown,
}

/// Scripted event that was running when the roster was wiped.
///
/// Consumed exactly once by the next checkpoint respawn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventDeathContext {
    pub event_id: EventId,
}
