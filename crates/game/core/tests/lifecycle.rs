//! Regeneration, pause ownership, audio pacing and teardown.
mod common;

use common::{EffectMode, Harness, HudCall, SPAWN, assert_single_active, exhaust};
use tagteam_core::{
    ActionLock, CharacterId, ControllerError, CueCompletion, CueId, GameContext, LevelId,
    OpponentId, RecoveryStart, RosterConfig, RosterController, SuspendedSystems,
    TransitionCompletion, Velocity,
};

fn wipe(controller: &mut RosterController) {
    exhaust(controller, CharacterId::Tireek);
    controller.handle_character_down(ActionLock::Free, false);
    exhaust(controller, CharacterId::Tryston);
    controller.handle_character_down(ActionLock::Free, false);
}

// ===== regeneration =====

#[test]
fn regeneration_refreshes_hud_only_when_health_changes() {
    let harness = Harness::new(3);
    let mut controller = harness.controller();
    controller.take_damage(CharacterId::Tryston, 30);
    controller.take_damage(CharacterId::Tireek, 10);
    harness.hud.clear();

    controller.update(100);
    assert_eq!(harness.hud.roster_updates(), 0);

    controller.update(300);
    assert_eq!(harness.hud.roster_updates(), 1);
    assert_eq!(controller.roster().record(CharacterId::Tryston).health.current(), 71);

    // The active agent never regenerates.
    controller.update(5_000);
    assert_eq!(controller.roster().record(CharacterId::Tireek).health.current(), 90);
}

#[test]
fn regeneration_clamps_at_maximum() {
    let harness = Harness::new(3);
    let mut controller = harness.controller();
    controller.take_damage(CharacterId::Tryston, 2);

    controller.update(60_000);
    let health = controller.roster().record(CharacterId::Tryston).health;
    assert_eq!(health.current(), health.maximum());
}

// ===== pause ownership =====

#[test]
fn event_owned_pause_only_touches_physics() {
    let harness = Harness::new(3);
    harness.events.start("ferry_cutscene", true);
    let mut controller = harness.controller();

    wipe(&mut controller);
    assert!(harness.simulation.physics_paused());
    assert!(harness.simulation.input_enabled());
    assert!(!harness.opponents.is_frozen());
    assert!(harness.opponents.is_spawning());
    assert_eq!(controller.suspended_systems(), SuspendedSystems::PHYSICS);

    controller.update(2_000);
    assert!(!harness.simulation.physics_paused());
    assert_eq!(controller.suspended_systems(), SuspendedSystems::empty());
}

#[test]
fn dialogue_pause_restores_opponent_velocities() {
    let harness = Harness::new(3);
    let mut controller = harness.controller();
    let before = harness.opponents.velocity(OpponentId(1));

    controller.suspend_for_dialogue();
    assert!(harness.simulation.physics_paused());
    assert!(!harness.simulation.input_enabled());
    assert_eq!(harness.opponents.velocity(OpponentId(1)), Some(Velocity::ZERO));
    assert!(!harness.opponents.is_spawning());

    controller.resume_after_dialogue();
    assert!(!harness.simulation.physics_paused());
    assert!(harness.simulation.input_enabled());
    assert_eq!(harness.opponents.velocity(OpponentId(1)), before);
    assert!(harness.opponents.is_spawning());
}

#[test]
fn dialogue_does_not_resume_during_recovery() {
    let harness = Harness::new(3);
    let mut controller = harness.controller();
    wipe(&mut controller);

    controller.resume_after_dialogue();
    assert!(harness.simulation.physics_paused());
    assert!(controller.suspended_systems().contains(SuspendedSystems::BASE));
}

// ===== game-over audio pacing =====

fn reach_music(harness: &Harness, controller: &mut RosterController) {
    wipe(controller);
    controller.update(harness.hud.fade_ms);
    controller.update(harness.hud.typewriter_ms);
}

#[test]
fn signalled_music_restarts_on_matching_cue() {
    let harness = Harness::new(1);
    *harness.audio.music.lock().unwrap() = CueCompletion::Signalled(CueId(7));
    let mut controller = harness.controller();
    reach_music(&harness, &mut controller);

    controller.notify_audio_complete(CueId(3));
    assert!(harness.level.restarts().is_empty());

    controller.notify_audio_complete(CueId(7));
    assert_eq!(harness.level.restarts().len(), 1);

    // Neither a late cue nor the old watchdog restarts again.
    controller.notify_audio_complete(CueId(7));
    controller.update(20_000);
    assert_eq!(harness.level.restarts().len(), 1);
}

#[test]
fn signalled_music_times_out() {
    let harness = Harness::new(1);
    *harness.audio.music.lock().unwrap() = CueCompletion::Signalled(CueId(7));
    let mut controller = harness.controller();
    reach_music(&harness, &mut controller);

    controller.update(14_999);
    assert!(harness.level.restarts().is_empty());
    controller.update(1);
    assert_eq!(harness.level.restarts().len(), 1);
}

#[test]
fn music_of_unknown_length_uses_fallback_delay() {
    let harness = Harness::new(1);
    *harness.audio.music.lock().unwrap() = CueCompletion::Unknown;
    let mut controller = harness.controller();
    reach_music(&harness, &mut controller);

    controller.update(RosterConfig::DEFAULT_GAME_OVER_FALLBACK_DELAY_MS - 1);
    assert!(harness.level.restarts().is_empty());
    controller.update(1);
    assert_eq!(harness.level.restarts().len(), 1);
}

// ===== optional collaborators =====

#[test]
fn missing_life_pool_uses_simple_respawn() {
    let harness = Harness::new(3);
    let context = GameContext::builder(harness.world.clone(), harness.rig.clone())
        .hud(harness.hud.clone())
        .build();
    let mut controller = RosterController::initialize(
        CharacterId::Tryston,
        LevelId::new("docks"),
        context,
        RosterConfig::default(),
    );
    controller
        .create_character_handles(SPAWN)
        .expect("handles");

    exhaust(&mut controller, CharacterId::Tryston);
    controller.handle_character_down(ActionLock::Free, false);
    exhaust(&mut controller, CharacterId::Tireek);
    assert_eq!(controller.handle_game_over(), RecoveryStart::SimpleRespawn);

    controller.update(1_499);
    assert!(controller.recovery_in_progress());
    controller.update(1);
    assert!(!controller.recovery_in_progress());
    assert!(controller.roster().records().all(|r| r.health.is_full()));
    assert_eq!(controller.active_character_id(), CharacterId::Tireek);
    assert_eq!(harness.hud.count(&HudCall::TryAgain), 0);
    assert_single_active(&harness, &controller);
}

#[test]
fn handles_are_created_once_per_level() {
    let harness = Harness::new(3);
    let mut controller = harness.controller();
    assert!(matches!(
        controller.create_character_handles(SPAWN),
        Err(ControllerError::HandlesAlreadyCreated(_))
    ));
}

// ===== teardown =====

#[test]
fn teardown_drops_pending_recovery() {
    let harness = Harness::new(3);
    let mut controller = harness.controller();
    wipe(&mut controller);
    assert_eq!(controller.pending_continuations(), 1);

    controller.teardown();
    assert!(!controller.is_live());
    assert_eq!(controller.pending_continuations(), 0);

    controller.update(5_000);
    assert_eq!(harness.lives_left(), 3);
    assert_eq!(controller.take_damage(CharacterId::Tireek, 10), 0);
    assert_eq!(
        controller.handle_character_down(ActionLock::Free, false),
        tagteam_core::CascadeOutcome::Ignored(tagteam_core::CascadeIgnored::LevelNotLive)
    );
}

#[test]
fn late_effect_callback_after_teardown_is_ignored() {
    let harness = Harness::new(3);
    harness.effects.set_mode(EffectMode::Async(300));
    let mut controller = harness.controller();
    let outcome = controller
        .switch_character(false, ActionLock::Free, false)
        .expect("switch");
    let tagteam_core::SwitchOutcome::Switched { transition, .. } = outcome else {
        panic!("expected a switch");
    };

    controller.teardown();
    assert_eq!(
        controller.complete_transition(transition),
        TransitionCompletion::Stale
    );
    assert!(controller.active_handle().is_none());
}
