//! Collaborator interfaces the controller depends on.
//!
//! Everything the controller does not own (rendering, audio, physics, the
//! event system, lives and checkpoints) is reached through the traits in this
//! module. [`GameContext`] bundles them so the controller's dependencies are
//! declared up front instead of discovered on a shared scene object.
//!
//! Only [`WorldOracle`] and [`AgentRig`] are mandatory. Every other slot
//! defaults to a documented no-op implementation, which is also the fallback
//! behavior when the host has no such system:
//!
//! | Slot        | Default            | Fallback behavior                           |
//! |-------------|--------------------|---------------------------------------------|
//! | hud         | [`NoHud`]          | nothing drawn, game-over animations instant |
//! | audio       | [`NoAudio`]        | silent, game-over music of unknown length   |
//! | effects     | [`NoEffects`]      | switches complete synchronously             |
//! | lives       | [`NoLifePool`]     | simple full-health respawn after a delay    |
//! | checkpoints | [`NoCheckpoints`]  | respawn at the level spawn point            |
//! | events      | [`NoEvents`]       | never owns pause, nothing to replay         |
//! | opponents   | [`NoOpponents`]    | nothing to freeze or remove                 |
//! | simulation  | [`NoSimulation`]   | pause/input requests ignored                |
//! | camera      | [`NoCamera`]       | camera requests ignored                     |
//! | level       | [`NoLevelDirector`]| restart only resets controller state        |
mod agents;
mod audio;
mod effects;
mod error;
mod hud;
mod level;
mod progress;
mod scene;

use std::sync::Arc;

pub use agents::AgentRig;
pub use audio::{AudioDeck, CueCompletion, CueId, NoAudio};
pub use effects::{EffectSpawner, EffectTicket, NoEffects, TransitionEffectRequest};
pub use error::CollaboratorError;
pub use hud::{Hud, NoHud, RosterHealth};
pub use level::{LevelDirector, LevelRestart, NoLevelDirector, WorldOracle};
pub use progress::{CheckpointOracle, LifeLedger, NoCheckpoints, NoLifePool};
pub use scene::{
    CameraRig, EventDirector, FrozenOpponent, NoCamera, NoEvents, NoOpponents, NoSimulation,
    OpponentDirector, SimulationControl,
};

/// Injected collaborators held by the controller for the lifetime of a level.
#[derive(Clone)]
pub struct GameContext {
    pub(crate) world: Arc<dyn WorldOracle>,
    pub(crate) agents: Arc<dyn AgentRig>,
    pub(crate) hud: Arc<dyn Hud>,
    pub(crate) audio: Arc<dyn AudioDeck>,
    pub(crate) effects: Arc<dyn EffectSpawner>,
    pub(crate) lives: Arc<dyn LifeLedger>,
    pub(crate) checkpoints: Arc<dyn CheckpointOracle>,
    pub(crate) events: Arc<dyn EventDirector>,
    pub(crate) opponents: Arc<dyn OpponentDirector>,
    pub(crate) simulation: Arc<dyn SimulationControl>,
    pub(crate) camera: Arc<dyn CameraRig>,
    pub(crate) level: Arc<dyn LevelDirector>,
}

impl GameContext {
    /// Starts a builder with the two mandatory collaborators.
    pub fn builder(
        world: Arc<dyn WorldOracle>,
        agents: Arc<dyn AgentRig>,
    ) -> GameContextBuilder {
        GameContextBuilder::new(world, agents)
    }

    pub fn world(&self) -> &dyn WorldOracle {
        self.world.as_ref()
    }

    pub fn agents(&self) -> &dyn AgentRig {
        self.agents.as_ref()
    }
}

/// Builder for [`GameContext`]; unset slots get their no-op implementation.
pub struct GameContextBuilder {
    context: GameContext,
}

impl GameContextBuilder {
    fn new(world: Arc<dyn WorldOracle>, agents: Arc<dyn AgentRig>) -> Self {
        Self {
            context: GameContext {
                world,
                agents,
                hud: Arc::new(NoHud),
                audio: Arc::new(NoAudio),
                effects: Arc::new(NoEffects),
                lives: Arc::new(NoLifePool),
                checkpoints: Arc::new(NoCheckpoints),
                events: Arc::new(NoEvents),
                opponents: Arc::new(NoOpponents),
                simulation: Arc::new(NoSimulation),
                camera: Arc::new(NoCamera),
                level: Arc::new(NoLevelDirector),
            },
        }
    }

    pub fn hud(mut self, hud: Arc<dyn Hud>) -> Self {
        self.context.hud = hud;
        self
    }

    pub fn audio(mut self, audio: Arc<dyn AudioDeck>) -> Self {
        self.context.audio = audio;
        self
    }

    pub fn effects(mut self, effects: Arc<dyn EffectSpawner>) -> Self {
        self.context.effects = effects;
        self
    }

    pub fn lives(mut self, lives: Arc<dyn LifeLedger>) -> Self {
        self.context.lives = lives;
        self
    }

    pub fn checkpoints(mut self, checkpoints: Arc<dyn CheckpointOracle>) -> Self {
        self.context.checkpoints = checkpoints;
        self
    }

    pub fn events(mut self, events: Arc<dyn EventDirector>) -> Self {
        self.context.events = events;
        self
    }

    pub fn opponents(mut self, opponents: Arc<dyn OpponentDirector>) -> Self {
        self.context.opponents = opponents;
        self
    }

    pub fn simulation(mut self, simulation: Arc<dyn SimulationControl>) -> Self {
        self.context.simulation = simulation;
        self
    }

    pub fn camera(mut self, camera: Arc<dyn CameraRig>) -> Self {
        self.context.camera = camera;
        self
    }

    pub fn level(mut self, level: Arc<dyn LevelDirector>) -> Self {
        self.context.level = level;
        self
    }

    pub fn build(self) -> GameContext {
        self.context
    }
}
