//! Scripted host loop exercising the roster controller end to end.
use std::sync::Arc;

use anyhow::{Context, Result};
use tagteam_core::{
    ActionLock, CascadeOutcome, EventId, GameContext, LevelId, Position, RosterController,
    RosterState,
};

use crate::config::SimConfig;
use crate::console::{
    ConsoleAudio, ConsoleCamera, ConsoleCheckpoints, ConsoleEffects, ConsoleEvents, ConsoleHud,
    ConsoleLevel, ConsoleLives, ConsoleOpponents, ConsoleRig, ConsoleSimulation, ConsoleWorld,
};

const SPAWN: Position = Position { x: 16.0, y: 0.0 };
const LEVEL: &str = "harbor-1";

/// Host side of a session: the controller plus the collaborators the loop pumps.
pub struct SimSession {
    config: SimConfig,
    controller: RosterController,
    rig: Arc<ConsoleRig>,
    audio: Arc<ConsoleAudio>,
    effects: Arc<ConsoleEffects>,
    level: Arc<ConsoleLevel>,
}

impl SimSession {
    pub fn new(config: SimConfig) -> Result<Self> {
        let rig = Arc::new(ConsoleRig::default());
        let audio = Arc::new(ConsoleAudio::default());
        let effects = Arc::new(ConsoleEffects::default());
        let level = Arc::new(ConsoleLevel::new(4_200));

        let context = GameContext::builder(Arc::new(ConsoleWorld { spawn: SPAWN }), rig.clone())
            .hud(Arc::new(ConsoleHud))
            .audio(audio.clone())
            .effects(effects.clone())
            .lives(Arc::new(ConsoleLives::new(config.starting_lives)))
            .checkpoints(Arc::new(ConsoleCheckpoints {
                last: Position::new(96.0, 0.0),
            }))
            .events(Arc::new(ConsoleEvents {
                active: Some(EventId::new("dock_ambush")),
            }))
            .opponents(Arc::new(ConsoleOpponents))
            .simulation(Arc::new(ConsoleSimulation))
            .camera(Arc::new(ConsoleCamera))
            .level(level.clone())
            .build();

        let mut controller = RosterController::initialize(
            config.starting_character,
            LevelId::new(LEVEL),
            context,
            config.roster.clone(),
        );
        controller
            .create_character_handles(SPAWN)
            .context("failed to create agent handles")?;

        Ok(Self {
            config,
            controller,
            rig,
            audio,
            effects,
            level,
        })
    }

    pub fn roster(&self) -> &RosterState {
        self.controller.roster()
    }

    /// Plays the scripted session until the life pool is spent and the
    /// level has been restarted once.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!("=== walk and tag out ===");
        self.walk(600, 2.0);
        self.try_switch();
        self.try_switch();
        self.run_for(self.config.roster.switch_cooldown_ms + 1);
        self.try_switch();

        tracing::info!("=== chip damage and regeneration ===");
        let partner = self.controller.active_character_id().other();
        self.controller.take_damage(partner, 45);
        self.run_for(5_000);

        let mut wipes = 0;
        while self.level.take_restart().is_none() {
            wipes += 1;
            tracing::info!("=== wipe #{} ===", wipes);
            self.knock_out_active();
            self.knock_out_active();
            self.run_until_recovered()?;
            if wipes > self.config.starting_lives as usize + 1 {
                anyhow::bail!("level restart never happened after {} wipes", wipes);
            }
        }

        tracing::info!("=== level restarted ===");
        self.rig.clear();
        self.controller
            .create_character_handles(SPAWN)
            .context("failed to recreate agent handles")?;
        self.run_for(1_000);
        Ok(())
    }

    fn try_switch(&mut self) {
        match self.controller.switch_character(false, ActionLock::Free, false) {
            Ok(outcome) => tracing::info!("switch: {:?}", outcome),
            Err(err) => tracing::warn!("switch failed: {}", err),
        }
    }

    fn walk(&mut self, duration_ms: u64, speed: f32) {
        let mut elapsed = 0;
        while elapsed < duration_ms {
            if let Some(handle) = self.controller.active_handle() {
                self.rig.walk(handle, speed);
            }
            self.tick();
            elapsed += self.config.tick_ms;
        }
    }

    /// Drains the active agent and lets the cascade run.
    fn knock_out_active(&mut self) {
        let active = self.controller.active_character_id();
        let health = self.controller.roster().record(active).health.current();
        self.controller.take_damage(active, health);

        let outcome = self.controller.handle_character_down(ActionLock::Free, false);
        tracing::info!("{} down: {:?}", active, outcome);
        if let CascadeOutcome::SurvivorSwitch { .. } = outcome {
            self.run_for(ConsoleEffects::DURATION_MS);
        }
    }

    fn run_until_recovered(&mut self) -> Result<()> {
        let limit = self.config.roster.game_over_audio_timeout_ms + 10_000;
        let mut elapsed = 0;
        while self.controller.recovery_in_progress() {
            self.tick();
            elapsed += self.config.tick_ms;
            if elapsed > limit {
                anyhow::bail!("recovery did not finish within {}ms", limit);
            }
        }
        Ok(())
    }

    fn run_for(&mut self, duration_ms: u64) {
        let mut elapsed = 0;
        while elapsed < duration_ms {
            self.tick();
            elapsed += self.config.tick_ms;
        }
    }

    fn tick(&mut self) {
        let step = self.config.tick_ms;
        self.controller.update(step);
        for transition in self.effects.advance(step) {
            self.controller.complete_transition(transition);
        }
        if let Some(cue) = self.audio.advance(step) {
            self.controller.notify_audio_complete(cue);
        }
    }
}
