//! Damage and healing.

use crate::state::CharacterId;

use super::RosterController;

impl RosterController {
    /// Removes `amount` health from `character`, clamped at zero.
    ///
    /// Does not run the death cascade: when this returns 0 for the active
    /// agent, the host calls [`Self::handle_character_down`].
    pub fn take_damage(&mut self, character: CharacterId, amount: u32) -> u32 {
        if !self.level.live {
            return self.roster.record(character).health.current();
        }
        let record = self.roster.record_mut(character);
        let health = record.health.drain(amount);
        let maximum = record.health.maximum();

        tracing::debug!("{} took {} damage ({}/{})", character, amount, health, maximum);
        self.ctx.hud.update_health(character, health, maximum);
        self.ctx.audio.play_damage_cue();
        health
    }

    /// Restores `amount` health to `character`, clamped at maximum.
    ///
    /// An exhausted agent stays at 0 until a respawn resets it.
    pub fn heal(&mut self, character: CharacterId, amount: u32) -> u32 {
        if !self.level.live {
            return self.roster.record(character).health.current();
        }
        if !self.roster.record(character).is_alive() {
            tracing::debug!("Heal on exhausted {} ignored", character);
            return 0;
        }
        let threshold = self.config.auto_switch_recovery_percent;
        let record = self.roster.record_mut(character);
        let health = record.health.restore(amount);
        let maximum = record.health.maximum();
        record.refresh_auto_switch(threshold);

        self.ctx.hud.update_health(character, health, maximum);
        health
    }
}
