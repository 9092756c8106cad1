//! Audio playback collaborator.

/// Identifier of a playing cue, used to match completion notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CueId(pub u32);

/// How the controller learns that a long cue finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CueCompletion {
    /// The host will call `notify_audio_complete` with this cue.
    Signalled(CueId),
    /// The cue is known to last this many milliseconds.
    Duration(u64),
    /// Neither; the controller waits a fixed fallback delay.
    Unknown,
}

pub trait AudioDeck: Send + Sync {
    fn play_damage_cue(&self);

    fn play_try_again_cue(&self);

    fn play_game_over_music(&self) -> CueCompletion;

    fn play_game_over_voice(&self);
}

/// Silent deck.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAudio;

impl AudioDeck for NoAudio {
    fn play_damage_cue(&self) {}

    fn play_try_again_cue(&self) {}

    fn play_game_over_music(&self) -> CueCompletion {
        CueCompletion::Unknown
    }

    fn play_game_over_voice(&self) {}
}
