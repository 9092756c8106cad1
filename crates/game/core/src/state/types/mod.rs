//! Plain data types shared by the roster and the collaborator traits.
mod character;
mod common;

pub use character::{CharacterId, CharacterRecord};
pub use common::{
    AgentHandle, EventId, GameTime, HealthMeter, LevelId, OpponentId, Position, TransitionId,
    Velocity,
};
