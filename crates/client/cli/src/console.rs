//! Headless collaborators that log what a real host would render or play.
use std::collections::HashMap;
use std::sync::Mutex;

use tagteam_core::{
    AgentHandle, AgentRig, AudioDeck, CameraRig, CharacterId, CheckpointOracle,
    CollaboratorError, CueCompletion, CueId, EffectSpawner, EffectTicket, EventDirector, EventId,
    FrozenOpponent, Hud, LevelDirector, LevelRestart, LifeLedger, OpponentDirector, OpponentId,
    Position, RosterHealth, SimulationControl, TransitionEffectRequest, TransitionId, Velocity,
    WorldOracle,
};

/// Fixed single-screen world.
pub struct ConsoleWorld {
    pub spawn: Position,
}

impl WorldOracle for ConsoleWorld {
    fn spawn_point(&self) -> Position {
        self.spawn
    }
}

#[derive(Clone, Debug)]
struct Body {
    character: CharacterId,
    position: Position,
    visible: bool,
}

/// Agent bodies kept in memory.
#[derive(Default)]
pub struct ConsoleRig {
    bodies: Mutex<HashMap<AgentHandle, Body>>,
    next: Mutex<u32>,
}

impl ConsoleRig {
    /// Moves the body as the host's physics would.
    pub fn walk(&self, handle: AgentHandle, dx: f32) {
        if let Ok(mut bodies) = self.bodies.lock()
            && let Some(body) = bodies.get_mut(&handle)
        {
            body.position.x += dx;
        }
    }

    /// Drops every body, as a scene teardown would.
    pub fn clear(&self) {
        if let Ok(mut bodies) = self.bodies.lock() {
            bodies.clear();
        }
    }

    fn with_body<T>(
        &self,
        handle: AgentHandle,
        f: impl FnOnce(&mut Body) -> T,
    ) -> Result<T, CollaboratorError> {
        let mut bodies = self
            .bodies
            .lock()
            .map_err(|_| CollaboratorError::Unavailable("agents"))?;
        let body = bodies
            .get_mut(&handle)
            .ok_or(CollaboratorError::HandleGone(handle))?;
        Ok(f(body))
    }
}

impl AgentRig for ConsoleRig {
    fn spawn(&self, character: CharacterId, at: Position) -> Result<AgentHandle, CollaboratorError> {
        let mut next = self
            .next
            .lock()
            .map_err(|_| CollaboratorError::Unavailable("agents"))?;
        *next += 1;
        let handle = AgentHandle(*next);
        self.bodies
            .lock()
            .map_err(|_| CollaboratorError::Unavailable("agents"))?
            .insert(
                handle,
                Body {
                    character,
                    position: at,
                    visible: true,
                },
            );
        tracing::debug!("Spawned {} as {} at {}", character, handle, at);
        Ok(handle)
    }

    fn position(&self, handle: AgentHandle) -> Result<Position, CollaboratorError> {
        self.with_body(handle, |body| body.position)
    }

    fn last_ground_position(
        &self,
        handle: AgentHandle,
    ) -> Result<Option<Position>, CollaboratorError> {
        self.with_body(handle, |body| Some(Position::new(body.position.x, 0.0)))
    }

    fn set_position(&self, handle: AgentHandle, at: Position) -> Result<(), CollaboratorError> {
        self.with_body(handle, |body| body.position = at)
    }

    fn set_velocity(
        &self,
        handle: AgentHandle,
        _velocity: Velocity,
    ) -> Result<(), CollaboratorError> {
        self.with_body(handle, |_| ())
    }

    fn is_visible(&self, handle: AgentHandle) -> Result<bool, CollaboratorError> {
        self.with_body(handle, |body| body.visible)
    }

    fn set_visible(&self, handle: AgentHandle, visible: bool) -> Result<(), CollaboratorError> {
        self.with_body(handle, |body| {
            if body.visible != visible {
                tracing::debug!("{} ({}) visible={}", handle, body.character, visible);
            }
            body.visible = visible;
        })
    }

    fn set_active(&self, handle: AgentHandle, _active: bool) -> Result<(), CollaboratorError> {
        self.with_body(handle, |_| ())
    }

    fn set_body_enabled(
        &self,
        handle: AgentHandle,
        _enabled: bool,
    ) -> Result<(), CollaboratorError> {
        self.with_body(handle, |_| ())
    }

    fn play_idle(&self, handle: AgentHandle) -> Result<(), CollaboratorError> {
        self.with_body(handle, |_| ())
    }
}

pub struct ConsoleHud;

impl Hud for ConsoleHud {
    fn update_health(&self, character: CharacterId, current: u32, maximum: u32) {
        tracing::info!("[hud] {} {}/{}", character, current, maximum);
    }

    fn update_roster_health(&self, roster: RosterHealth) {
        tracing::debug!(
            "[hud] roster tireek={} tryston={} active={}",
            roster.tireek.current(),
            roster.tryston.current(),
            roster.active
        );
    }

    fn update_lives_display(&self, lives: u32, flash: bool) {
        tracing::info!("[hud] lives={} flash={}", lives, flash);
    }

    fn show_try_again_overlay(&self) {
        tracing::info!("[hud] TRY AGAIN");
    }

    fn show_game_over_overlay(&self) {
        tracing::info!("[hud] GAME OVER");
    }

    fn fade_in_game_over_screen(&self) -> u64 {
        800
    }

    fn start_game_over_typewriter(&self) -> u64 {
        1_200
    }
}

/// Plays nothing; tracks the game-over music so the session can signal its end.
#[derive(Default)]
pub struct ConsoleAudio {
    music: Mutex<Option<(CueId, u64)>>,
}

impl ConsoleAudio {
    pub const MUSIC_CUE: CueId = CueId(1);
    pub const MUSIC_MS: u64 = 2_500;

    /// Advances playback; returns the cue that just finished, if any.
    pub fn advance(&self, delta_ms: u64) -> Option<CueId> {
        let mut music = self.music.lock().ok()?;
        let (cue, remaining) = music.as_mut()?;
        *remaining = remaining.saturating_sub(delta_ms);
        if *remaining > 0 {
            return None;
        }
        let finished = *cue;
        *music = None;
        Some(finished)
    }
}

impl AudioDeck for ConsoleAudio {
    fn play_damage_cue(&self) {
        tracing::debug!("[audio] hit");
    }

    fn play_try_again_cue(&self) {
        tracing::info!("[audio] try-again jingle");
    }

    fn play_game_over_music(&self) -> CueCompletion {
        tracing::info!("[audio] game-over music");
        if let Ok(mut music) = self.music.lock() {
            *music = Some((Self::MUSIC_CUE, Self::MUSIC_MS));
        }
        CueCompletion::Signalled(Self::MUSIC_CUE)
    }

    fn play_game_over_voice(&self) {
        tracing::info!("[audio] game-over voice");
    }
}

/// Transition effects with a fixed duration, completed by the session loop.
#[derive(Default)]
pub struct ConsoleEffects {
    running: Mutex<Vec<(TransitionId, u64)>>,
}

impl ConsoleEffects {
    pub const DURATION_MS: u64 = 250;

    /// Advances running effects; returns the transitions whose effect ended.
    pub fn advance(&self, delta_ms: u64) -> Vec<TransitionId> {
        let Ok(mut running) = self.running.lock() else {
            return Vec::new();
        };
        let mut finished = Vec::new();
        running.retain_mut(|(id, remaining)| {
            *remaining = remaining.saturating_sub(delta_ms);
            if *remaining == 0 {
                finished.push(*id);
                return false;
            }
            true
        });
        finished
    }
}

impl EffectSpawner for ConsoleEffects {
    fn spawn_transition_effect(
        &self,
        request: &TransitionEffectRequest,
    ) -> Result<Option<EffectTicket>, CollaboratorError> {
        tracing::debug!("[fx] sparkle for {} at {}", request.transition, request.at);
        self.running
            .lock()
            .map_err(|_| CollaboratorError::Unavailable("effects"))?
            .push((request.transition, Self::DURATION_MS));
        Ok(Some(EffectTicket {
            duration_ms: Self::DURATION_MS,
        }))
    }
}

pub struct ConsoleLives {
    lives: Mutex<u32>,
}

impl ConsoleLives {
    pub fn new(lives: u32) -> Self {
        Self {
            lives: Mutex::new(lives),
        }
    }
}

impl LifeLedger for ConsoleLives {
    fn lives(&self) -> Option<u32> {
        self.lives.lock().ok().map(|lives| *lives)
    }

    fn lose_life(&self) -> u32 {
        match self.lives.lock() {
            Ok(mut lives) => {
                *lives = lives.saturating_sub(1);
                *lives
            }
            Err(_) => 0,
        }
    }
}

pub struct ConsoleCheckpoints {
    pub last: Position,
}

impl CheckpointOracle for ConsoleCheckpoints {
    fn last_checkpoint(&self) -> Option<Position> {
        Some(self.last)
    }
}

/// Scripted event that is running for the whole session.
pub struct ConsoleEvents {
    pub active: Option<EventId>,
}

impl EventDirector for ConsoleEvents {
    fn is_event_active(&self) -> bool {
        self.active.is_some()
    }

    fn active_event(&self) -> Option<EventId> {
        self.active.clone()
    }

    fn owns_pause(&self) -> bool {
        false
    }

    fn replay_event(&self, event: &EventId) {
        tracing::info!("[events] replaying {}", event);
    }
}

pub struct ConsoleOpponents;

impl OpponentDirector for ConsoleOpponents {
    fn freeze_all(&self) -> Vec<FrozenOpponent> {
        tracing::debug!("[opponents] freeze");
        vec![FrozenOpponent {
            id: OpponentId(1),
            velocity: Velocity::new(-1.5, 0.0),
        }]
    }

    fn thaw(&self, frozen: &[FrozenOpponent]) {
        tracing::debug!("[opponents] thaw {}", frozen.len());
    }

    fn set_spawning(&self, enabled: bool) {
        tracing::debug!("[opponents] spawning={}", enabled);
    }

    fn remove_all(&self) {
        tracing::debug!("[opponents] cleared");
    }
}

pub struct ConsoleSimulation;

impl SimulationControl for ConsoleSimulation {
    fn pause_physics(&self) {
        tracing::debug!("[sim] physics paused");
    }

    fn resume_physics(&self) {
        tracing::debug!("[sim] physics resumed");
    }

    fn set_input_enabled(&self, enabled: bool) {
        tracing::debug!("[sim] input={}", enabled);
    }
}

pub struct ConsoleCamera;

impl CameraRig for ConsoleCamera {
    fn reset_scroll(&self) {
        tracing::debug!("[camera] scroll reset");
    }

    fn follow(&self, handle: AgentHandle) {
        tracing::debug!("[camera] following {}", handle);
    }
}

/// Records restart requests; the session loop performs them.
pub struct ConsoleLevel {
    pub score: u64,
    pending: Mutex<Option<LevelRestart>>,
}

impl ConsoleLevel {
    pub fn new(score: u64) -> Self {
        Self {
            score,
            pending: Mutex::new(None),
        }
    }

    pub fn take_restart(&self) -> Option<LevelRestart> {
        self.pending.lock().ok()?.take()
    }
}

impl LevelDirector for ConsoleLevel {
    fn score_at_level_start(&self) -> u64 {
        self.score
    }

    fn restart_level(&self, plan: &LevelRestart) {
        tracing::info!("[level] restart requested for {}", plan.level_id);
        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some(plan.clone());
        }
    }
}
