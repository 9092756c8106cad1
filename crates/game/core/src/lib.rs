//! Roster lifecycle rules for a two-agent tag-team platformer.
//!
//! `tagteam-core` owns the health, switching, death and respawn state of the
//! two playable agents and drives every external system (rendering, audio,
//! physics, scripted events, lives) through the collaborator traits in
//! [`env`]. All mutation flows through [`controller::RosterController`], which
//! is single-threaded and advanced by the host loop via
//! [`RosterController::update`].
pub mod config;
pub mod controller;
pub mod env;
pub mod error;
pub mod schedule;
pub mod state;

pub use config::{CharacterProfile, RosterConfig};
pub use controller::{
    ActionLock, CascadeIgnored, CascadeOutcome, ControllerError, RecoveryBranch, RecoveryStart,
    RosterController, SuspendedSystems, SwitchCompletion, SwitchError, SwitchOutcome,
    SwitchRejection, SwitchTransition, TransitionCompletion, TransitionPhase,
};
pub use env::{
    AgentRig, AudioDeck, CameraRig, CheckpointOracle, CollaboratorError, CueCompletion, CueId,
    EffectSpawner, EffectTicket, EventDirector, FrozenOpponent, GameContext, GameContextBuilder,
    Hud, LevelDirector, LevelRestart, LifeLedger, OpponentDirector, RosterHealth,
    SimulationControl, TransitionEffectRequest, WorldOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use schedule::{Continuation, LevelEpoch, TimerQueue};
pub use state::{
    AgentHandle, CascadeState, CharacterId, CharacterRecord, EventDeathContext, EventId, GameTime,
    HealthMeter, LevelId, OpponentId, Position, RosterState, TransitionId, Velocity,
};
