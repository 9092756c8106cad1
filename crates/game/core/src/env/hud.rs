//! Heads-up display collaborator.

use crate::state::{CharacterId, HealthMeter};

/// Health of both agents plus the active one, pushed as a single refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RosterHealth {
    pub tireek: HealthMeter,
    pub tryston: HealthMeter,
    pub active: CharacterId,
}

/// Widgets the controller drives. Rendering is the implementor's concern.
///
/// The two game-over animations report how long they run; the controller
/// schedules the next recovery step after that many milliseconds.
pub trait Hud: Send + Sync {
    fn update_health(&self, character: CharacterId, current: u32, maximum: u32);

    fn update_roster_health(&self, roster: RosterHealth);

    fn update_lives_display(&self, lives: u32, flash: bool);

    fn show_try_again_overlay(&self);

    fn show_game_over_overlay(&self);

    /// Starts the game-over fade and returns its duration in milliseconds.
    fn fade_in_game_over_screen(&self) -> u64;

    /// Starts the game-over typewriter text and returns its duration in milliseconds.
    fn start_game_over_typewriter(&self) -> u64;
}

/// HUD used when no widgets are attached. Animations finish immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHud;

impl Hud for NoHud {
    fn update_health(&self, _character: CharacterId, _current: u32, _maximum: u32) {}

    fn update_roster_health(&self, _roster: RosterHealth) {}

    fn update_lives_display(&self, _lives: u32, _flash: bool) {}

    fn show_try_again_overlay(&self) {}

    fn show_game_over_overlay(&self) {}

    fn fade_in_game_over_screen(&self) -> u64 {
        0
    }

    fn start_game_over_typewriter(&self) -> u64 {
        0
    }
}
