//! Sound cues
//!
//! The game only ever asks for one of three cues plus a looping music track.
//! Backends decide how to make noise; a sound whose asset failed to load is
//! silently skipped.

#[cfg(not(target_arch = "wasm32"))]
pub mod bank;
pub mod music;
#[cfg(all(feature = "sound", not(target_arch = "wasm32")))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use bank::CueBank;
#[cfg(all(feature = "sound", not(target_arch = "wasm32")))]
pub use native::RodioAudio;
#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Jump press
    Jump,
    /// Barrier hit or left the field
    Collision,
    /// Bonus item collected
    Bonus,
}

impl SoundCue {
    pub const ALL: [SoundCue; 3] = [SoundCue::Jump, SoundCue::Collision, SoundCue::Bonus];

    /// Asset file name for sample-based backends
    pub fn file_name(self) -> &'static str {
        match self {
            SoundCue::Jump => "jump.wav",
            SoundCue::Collision => "collision.wav",
            SoundCue::Bonus => "coin.wav",
        }
    }
}

/// Background music file for sample-based backends
pub const MUSIC_FILE: &str = "game-music.mp3";

/// Transport for the looping background track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCommand {
    /// Start, or resume where it was paused
    Play,
    /// Hold the current position
    Pause,
    /// Halt and rewind to the start
    Stop,
}

/// Anything that can play cues and music
pub trait AudioSink {
    fn play_cue(&mut self, cue: SoundCue);
    fn music(&mut self, command: MusicCommand);
    fn set_muted(&mut self, muted: bool);
    fn is_muted(&self) -> bool;
}

/// Volume controls shared by every backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    master: f32,
    sfx: f32,
    music: f32,
    pub muted: bool,
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.8, 1.0, 0.5, false)
    }
}

impl Volume {
    /// Levels are clamped to 0.0 - 1.0
    pub fn new(master: f32, sfx: f32, music: f32, muted: bool) -> Self {
        Self {
            master: master.clamp(0.0, 1.0),
            sfx: sfx.clamp(0.0, 1.0),
            music: music.clamp(0.0, 1.0),
            muted,
        }
    }

    /// Get effective cue volume
    pub fn effective(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master * self.sfx
        }
    }

    /// Get effective music volume
    pub fn music_effective(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master * self.music
        }
    }
}

/// Backend that never makes a sound
#[derive(Debug, Clone, Default)]
pub struct Silent {
    muted: bool,
}

impl AudioSink for Silent {
    fn play_cue(&mut self, cue: SoundCue) {
        log::trace!("(silent) {:?}", cue);
    }

    fn music(&mut self, command: MusicCommand) {
        log::trace!("(silent) music {:?}", command);
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}
