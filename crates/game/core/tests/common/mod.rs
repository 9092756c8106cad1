//! Recording collaborator doubles shared by the scenario tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tagteam_core::{
    AgentHandle, AgentRig, AudioDeck, CameraRig, CharacterId, CheckpointOracle, CollaboratorError,
    CueCompletion, EffectSpawner, EffectTicket, EventDirector, EventId, FrozenOpponent,
    GameContext, Hud, LevelDirector, LevelId, LevelRestart, LifeLedger, OpponentDirector,
    OpponentId, Position, RosterConfig, RosterController, RosterHealth, SimulationControl,
    TransitionEffectRequest, Velocity, WorldOracle,
};

pub const SPAWN: Position = Position { x: 0.0, y: 0.0 };

// ===== world =====

pub struct FixedWorld {
    pub spawn: Position,
    pub level_transition: Mutex<bool>,
}

impl WorldOracle for FixedWorld {
    fn spawn_point(&self) -> Position {
        self.spawn
    }

    fn level_transition_in_progress(&self) -> bool {
        *self.level_transition.lock().unwrap()
    }
}

// ===== agents =====

#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub character: CharacterId,
    pub position: Position,
    pub velocity: Velocity,
    pub ground: Option<Position>,
    pub visible: bool,
    pub active: bool,
    pub body_enabled: bool,
    pub idle_calls: u32,
}

#[derive(Default)]
pub struct RecordingRig {
    bodies: Mutex<HashMap<AgentHandle, Body>>,
    next: Mutex<u32>,
    /// Every call fails with `Unavailable` while set.
    pub broken: Mutex<bool>,
    /// Enabling this handle's body fails with `Unavailable`.
    refuse_enable: Mutex<Option<AgentHandle>>,
}

impl RecordingRig {
    pub fn body(&self, handle: AgentHandle) -> Option<Body> {
        self.bodies.lock().unwrap().get(&handle).cloned()
    }

    pub fn visible_count(&self) -> usize {
        self.bodies.lock().unwrap().values().filter(|b| b.visible).count()
    }

    pub fn destroy(&self, handle: AgentHandle) {
        self.bodies.lock().unwrap().remove(&handle);
    }

    pub fn move_to(&self, handle: AgentHandle, at: Position) {
        if let Some(body) = self.bodies.lock().unwrap().get_mut(&handle) {
            body.position = at;
        }
    }

    pub fn set_airborne(&self, handle: AgentHandle, at: Position, ground: Position) {
        if let Some(body) = self.bodies.lock().unwrap().get_mut(&handle) {
            body.position = at;
            body.velocity = Velocity::new(3.0, -4.0);
            body.ground = Some(ground);
        }
    }

    pub fn break_all(&self, broken: bool) {
        *self.broken.lock().unwrap() = broken;
    }

    pub fn refuse_enable(&self, handle: Option<AgentHandle>) {
        *self.refuse_enable.lock().unwrap() = handle;
    }

    fn with_body<T>(
        &self,
        handle: AgentHandle,
        f: impl FnOnce(&mut Body) -> T,
    ) -> Result<T, CollaboratorError> {
        if *self.broken.lock().unwrap() {
            return Err(CollaboratorError::Unavailable("agents"));
        }
        let mut bodies = self.bodies.lock().unwrap();
        let body = bodies
            .get_mut(&handle)
            .ok_or(CollaboratorError::HandleGone(handle))?;
        Ok(f(body))
    }
}

impl AgentRig for RecordingRig {
    fn spawn(&self, character: CharacterId, at: Position) -> Result<AgentHandle, CollaboratorError> {
        let mut next = self.next.lock().unwrap();
        *next += 1;
        let handle = AgentHandle(*next);
        self.bodies.lock().unwrap().insert(
            handle,
            Body {
                character,
                position: at,
                velocity: Velocity::ZERO,
                ground: None,
                visible: true,
                active: true,
                body_enabled: true,
                idle_calls: 0,
            },
        );
        Ok(handle)
    }

    fn position(&self, handle: AgentHandle) -> Result<Position, CollaboratorError> {
        self.with_body(handle, |body| body.position)
    }

    fn last_ground_position(
        &self,
        handle: AgentHandle,
    ) -> Result<Option<Position>, CollaboratorError> {
        self.with_body(handle, |body| body.ground)
    }

    fn set_position(&self, handle: AgentHandle, at: Position) -> Result<(), CollaboratorError> {
        self.with_body(handle, |body| body.position = at)
    }

    fn set_velocity(
        &self,
        handle: AgentHandle,
        velocity: Velocity,
    ) -> Result<(), CollaboratorError> {
        self.with_body(handle, |body| body.velocity = velocity)
    }

    fn is_visible(&self, handle: AgentHandle) -> Result<bool, CollaboratorError> {
        self.with_body(handle, |body| body.visible)
    }

    fn set_visible(&self, handle: AgentHandle, visible: bool) -> Result<(), CollaboratorError> {
        self.with_body(handle, |body| body.visible = visible)
    }

    fn set_active(&self, handle: AgentHandle, active: bool) -> Result<(), CollaboratorError> {
        self.with_body(handle, |body| body.active = active)
    }

    fn set_body_enabled(
        &self,
        handle: AgentHandle,
        enabled: bool,
    ) -> Result<(), CollaboratorError> {
        if enabled && *self.refuse_enable.lock().unwrap() == Some(handle) {
            return Err(CollaboratorError::Unavailable("agents"));
        }
        self.with_body(handle, |body| body.body_enabled = enabled)
    }

    fn play_idle(&self, handle: AgentHandle) -> Result<(), CollaboratorError> {
        self.with_body(handle, |body| body.idle_calls += 1)
    }
}

// ===== hud =====

#[derive(Clone, Debug, PartialEq)]
pub enum HudCall {
    Health(CharacterId, u32, u32),
    Roster(RosterHealth),
    Lives(u32, bool),
    TryAgain,
    GameOver,
    Fade,
    Typewriter,
}

pub struct RecordingHud {
    pub calls: Mutex<Vec<HudCall>>,
    pub fade_ms: u64,
    pub typewriter_ms: u64,
}

impl RecordingHud {
    pub fn calls(&self) -> Vec<HudCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn roster_updates(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, HudCall::Roster(_)))
            .count()
    }

    pub fn count(&self, wanted: &HudCall) -> usize {
        self.calls().iter().filter(|call| *call == wanted).count()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn push(&self, call: HudCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Hud for RecordingHud {
    fn update_health(&self, character: CharacterId, current: u32, maximum: u32) {
        self.push(HudCall::Health(character, current, maximum));
    }

    fn update_roster_health(&self, roster: RosterHealth) {
        self.push(HudCall::Roster(roster));
    }

    fn update_lives_display(&self, lives: u32, flash: bool) {
        self.push(HudCall::Lives(lives, flash));
    }

    fn show_try_again_overlay(&self) {
        self.push(HudCall::TryAgain);
    }

    fn show_game_over_overlay(&self) {
        self.push(HudCall::GameOver);
    }

    fn fade_in_game_over_screen(&self) -> u64 {
        self.push(HudCall::Fade);
        self.fade_ms
    }

    fn start_game_over_typewriter(&self) -> u64 {
        self.push(HudCall::Typewriter);
        self.typewriter_ms
    }
}

// ===== audio =====

pub struct RecordingAudio {
    pub damage_cues: Mutex<u32>,
    pub try_again_cues: Mutex<u32>,
    pub voice_cues: Mutex<u32>,
    pub music: Mutex<CueCompletion>,
}

impl AudioDeck for RecordingAudio {
    fn play_damage_cue(&self) {
        *self.damage_cues.lock().unwrap() += 1;
    }

    fn play_try_again_cue(&self) {
        *self.try_again_cues.lock().unwrap() += 1;
    }

    fn play_game_over_music(&self) -> CueCompletion {
        *self.music.lock().unwrap()
    }

    fn play_game_over_voice(&self) {
        *self.voice_cues.lock().unwrap() += 1;
    }
}

// ===== effects =====

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectMode {
    /// No effect runs; the switch completes synchronously.
    Instant,
    /// The effect runs for this long and the test completes it.
    Async(u64),
    Fail,
}

pub struct RecordingEffects {
    pub mode: Mutex<EffectMode>,
    pub requests: Mutex<Vec<TransitionEffectRequest>>,
}

impl RecordingEffects {
    pub fn set_mode(&self, mode: EffectMode) {
        *self.mode.lock().unwrap() = mode;
    }

    pub fn last_request(&self) -> Option<TransitionEffectRequest> {
        self.requests.lock().unwrap().last().copied()
    }
}

impl EffectSpawner for RecordingEffects {
    fn spawn_transition_effect(
        &self,
        request: &TransitionEffectRequest,
    ) -> Result<Option<EffectTicket>, CollaboratorError> {
        self.requests.lock().unwrap().push(*request);
        match *self.mode.lock().unwrap() {
            EffectMode::Instant => Ok(None),
            EffectMode::Async(duration_ms) => Ok(Some(EffectTicket { duration_ms })),
            EffectMode::Fail => Err(CollaboratorError::EffectFailed("emitter missing".into())),
        }
    }
}

// ===== lives / checkpoints =====

pub struct CountingLives {
    pub lives: Mutex<u32>,
}

impl LifeLedger for CountingLives {
    fn lives(&self) -> Option<u32> {
        Some(*self.lives.lock().unwrap())
    }

    fn lose_life(&self) -> u32 {
        let mut lives = self.lives.lock().unwrap();
        *lives = lives.saturating_sub(1);
        *lives
    }
}

pub struct FixedCheckpoint {
    pub at: Mutex<Option<Position>>,
}

impl CheckpointOracle for FixedCheckpoint {
    fn last_checkpoint(&self) -> Option<Position> {
        *self.at.lock().unwrap()
    }
}

// ===== scripted events =====

#[derive(Default)]
pub struct RecordingEvents {
    pub active: Mutex<Option<EventId>>,
    pub owns_pause: Mutex<bool>,
    pub replays: Mutex<Vec<EventId>>,
}

impl RecordingEvents {
    pub fn start(&self, id: &str, owns_pause: bool) {
        *self.active.lock().unwrap() = Some(EventId::new(id));
        *self.owns_pause.lock().unwrap() = owns_pause;
    }

    pub fn replays(&self) -> Vec<EventId> {
        self.replays.lock().unwrap().clone()
    }
}

impl EventDirector for RecordingEvents {
    fn is_event_active(&self) -> bool {
        self.active.lock().unwrap().is_some()
    }

    fn active_event(&self) -> Option<EventId> {
        self.active.lock().unwrap().clone()
    }

    fn owns_pause(&self) -> bool {
        *self.owns_pause.lock().unwrap()
    }

    fn replay_event(&self, event: &EventId) {
        self.replays.lock().unwrap().push(event.clone());
    }
}

// ===== opponents =====

#[derive(Default)]
pub struct RecordingOpponents {
    pub velocities: Mutex<HashMap<OpponentId, Velocity>>,
    pub frozen: Mutex<bool>,
    pub spawning: Mutex<bool>,
    pub removals: Mutex<u32>,
}

impl RecordingOpponents {
    pub fn with_opponents(count: u32) -> Self {
        let velocities = (0..count)
            .map(|i| (OpponentId(i), Velocity::new(-1.0 - i as f32, 0.0)))
            .collect();
        Self {
            velocities: Mutex::new(velocities),
            spawning: Mutex::new(true),
            ..Self::default()
        }
    }

    pub fn is_frozen(&self) -> bool {
        *self.frozen.lock().unwrap()
    }

    pub fn is_spawning(&self) -> bool {
        *self.spawning.lock().unwrap()
    }

    pub fn velocity(&self, id: OpponentId) -> Option<Velocity> {
        self.velocities.lock().unwrap().get(&id).copied()
    }
}

impl OpponentDirector for RecordingOpponents {
    fn freeze_all(&self) -> Vec<FrozenOpponent> {
        *self.frozen.lock().unwrap() = true;
        let mut velocities = self.velocities.lock().unwrap();
        velocities
            .iter_mut()
            .map(|(id, velocity)| {
                let saved = std::mem::replace(velocity, Velocity::ZERO);
                FrozenOpponent {
                    id: *id,
                    velocity: saved,
                }
            })
            .collect()
    }

    fn thaw(&self, frozen: &[FrozenOpponent]) {
        *self.frozen.lock().unwrap() = false;
        let mut velocities = self.velocities.lock().unwrap();
        for entry in frozen {
            if let Some(velocity) = velocities.get_mut(&entry.id) {
                *velocity = entry.velocity;
            }
        }
    }

    fn set_spawning(&self, enabled: bool) {
        *self.spawning.lock().unwrap() = enabled;
    }

    fn remove_all(&self) {
        *self.removals.lock().unwrap() += 1;
        self.velocities.lock().unwrap().clear();
        *self.frozen.lock().unwrap() = false;
    }
}

// ===== simulation / camera / level =====

pub struct RecordingSimulation {
    pub physics_paused: Mutex<bool>,
    pub input_enabled: Mutex<bool>,
}

impl RecordingSimulation {
    pub fn physics_paused(&self) -> bool {
        *self.physics_paused.lock().unwrap()
    }

    pub fn input_enabled(&self) -> bool {
        *self.input_enabled.lock().unwrap()
    }
}

impl SimulationControl for RecordingSimulation {
    fn pause_physics(&self) {
        *self.physics_paused.lock().unwrap() = true;
    }

    fn resume_physics(&self) {
        *self.physics_paused.lock().unwrap() = false;
    }

    fn set_input_enabled(&self, enabled: bool) {
        *self.input_enabled.lock().unwrap() = enabled;
    }
}

#[derive(Default)]
pub struct RecordingCamera {
    pub follows: Mutex<Vec<AgentHandle>>,
    pub scroll_resets: Mutex<u32>,
}

impl RecordingCamera {
    pub fn last_follow(&self) -> Option<AgentHandle> {
        self.follows.lock().unwrap().last().copied()
    }
}

impl CameraRig for RecordingCamera {
    fn reset_scroll(&self) {
        *self.scroll_resets.lock().unwrap() += 1;
    }

    fn follow(&self, handle: AgentHandle) {
        self.follows.lock().unwrap().push(handle);
    }
}

pub struct RecordingLevel {
    pub score: u64,
    pub restarts: Mutex<Vec<LevelRestart>>,
}

impl RecordingLevel {
    pub fn restarts(&self) -> Vec<LevelRestart> {
        self.restarts.lock().unwrap().clone()
    }
}

impl LevelDirector for RecordingLevel {
    fn score_at_level_start(&self) -> u64 {
        self.score
    }

    fn restart_level(&self, plan: &LevelRestart) {
        self.restarts.lock().unwrap().push(plan.clone());
    }
}

// ===== harness =====

/// Every double, kept so tests can inspect what the controller did.
pub struct Harness {
    pub world: Arc<FixedWorld>,
    pub rig: Arc<RecordingRig>,
    pub hud: Arc<RecordingHud>,
    pub audio: Arc<RecordingAudio>,
    pub effects: Arc<RecordingEffects>,
    pub lives: Arc<CountingLives>,
    pub checkpoint: Arc<FixedCheckpoint>,
    pub events: Arc<RecordingEvents>,
    pub opponents: Arc<RecordingOpponents>,
    pub simulation: Arc<RecordingSimulation>,
    pub camera: Arc<RecordingCamera>,
    pub level: Arc<RecordingLevel>,
}

impl Harness {
    pub fn new(lives: u32) -> Self {
        Self {
            world: Arc::new(FixedWorld {
                spawn: SPAWN,
                level_transition: Mutex::new(false),
            }),
            rig: Arc::new(RecordingRig::default()),
            hud: Arc::new(RecordingHud {
                calls: Mutex::new(Vec::new()),
                fade_ms: 1_000,
                typewriter_ms: 2_000,
            }),
            audio: Arc::new(RecordingAudio {
                damage_cues: Mutex::new(0),
                try_again_cues: Mutex::new(0),
                voice_cues: Mutex::new(0),
                music: Mutex::new(CueCompletion::Duration(3_000)),
            }),
            effects: Arc::new(RecordingEffects {
                mode: Mutex::new(EffectMode::Instant),
                requests: Mutex::new(Vec::new()),
            }),
            lives: Arc::new(CountingLives {
                lives: Mutex::new(lives),
            }),
            checkpoint: Arc::new(FixedCheckpoint {
                at: Mutex::new(Some(Position::new(40.0, 8.0))),
            }),
            events: Arc::new(RecordingEvents::default()),
            opponents: Arc::new(RecordingOpponents::with_opponents(2)),
            simulation: Arc::new(RecordingSimulation {
                physics_paused: Mutex::new(false),
                input_enabled: Mutex::new(true),
            }),
            camera: Arc::new(RecordingCamera::default()),
            level: Arc::new(RecordingLevel {
                score: 1_250,
                restarts: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn context(&self) -> GameContext {
        GameContext::builder(self.world.clone(), self.rig.clone())
            .hud(self.hud.clone())
            .audio(self.audio.clone())
            .effects(self.effects.clone())
            .lives(self.lives.clone())
            .checkpoints(self.checkpoint.clone())
            .events(self.events.clone())
            .opponents(self.opponents.clone())
            .simulation(self.simulation.clone())
            .camera(self.camera.clone())
            .level(self.level.clone())
            .build()
    }

    /// Controller with Tireek active and both handles spawned at [`SPAWN`].
    pub fn controller(&self) -> RosterController {
        self.controller_with(RosterConfig::default())
    }

    pub fn controller_with(&self, config: RosterConfig) -> RosterController {
        let mut controller = RosterController::initialize(
            CharacterId::Tireek,
            LevelId::new("harbor"),
            self.context(),
            config,
        );
        controller
            .create_character_handles(SPAWN)
            .expect("handles should be created");
        self.hud.clear();
        controller
    }

    pub fn lives_left(&self) -> u32 {
        *self.lives.lives.lock().unwrap()
    }

    pub fn body_of(&self, controller: &RosterController, id: CharacterId) -> Body {
        let handle = controller
            .roster()
            .record(id)
            .handle
            .expect("handle should exist");
        self.rig.body(handle).expect("body should exist")
    }
}

/// Drains `id` to zero.
pub fn exhaust(controller: &mut RosterController, id: CharacterId) {
    let max = controller.roster().record(id).health.maximum();
    controller.take_damage(id, max);
}

/// Asserts exactly one visible and exactly one active agent.
pub fn assert_single_active(harness: &Harness, controller: &RosterController) {
    assert_eq!(controller.roster().active_count(), 1, "one record active");
    assert_eq!(harness.rig.visible_count(), 1, "one body visible");
    let active = controller.active_character_id();
    assert!(harness.body_of(controller, active).visible);
    assert!(controller.roster().record(active).is_active);
}
