//! Sample buffers for the cues and music, loaded once at startup

use std::path::Path;
use std::sync::Arc;

use super::{MUSIC_FILE, SoundCue};

/// Raw (still encoded) sound files. A missing file leaves its slot empty.
#[derive(Debug, Clone, Default)]
pub struct CueBank {
    jump: Option<Arc<[u8]>>,
    collision: Option<Arc<[u8]>>,
    bonus: Option<Arc<[u8]>>,
    music: Option<Arc<[u8]>>,
}

fn read_sound(path: &Path) -> Option<Arc<[u8]>> {
    match std::fs::read(path) {
        Ok(bytes) => {
            log::debug!("Loaded {} ({} bytes)", path.display(), bytes.len());
            Some(bytes.into())
        }
        Err(e) => {
            log::warn!("Sound {} unavailable: {}", path.display(), e);
            None
        }
    }
}

impl CueBank {
    /// Read every sound file from `dir`. Failures are logged, never fatal.
    pub fn load(dir: &Path) -> Self {
        let mut bank = Self::default();
        for cue in SoundCue::ALL {
            *bank.slot_mut(cue) = read_sound(&dir.join(cue.file_name()));
        }
        bank.music = read_sound(&dir.join(MUSIC_FILE));
        bank
    }

    pub fn music(&self) -> Option<&Arc<[u8]>> {
        self.music.as_ref()
    }

    pub fn get(&self, cue: SoundCue) -> Option<&Arc<[u8]>> {
        match cue {
            SoundCue::Jump => self.jump.as_ref(),
            SoundCue::Collision => self.collision.as_ref(),
            SoundCue::Bonus => self.bonus.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.music.is_none() && SoundCue::ALL.iter().all(|c| self.get(*c).is_none())
    }

    fn slot_mut(&mut self, cue: SoundCue) -> &mut Option<Arc<[u8]>> {
        match cue {
            SoundCue::Jump => &mut self.jump,
            SoundCue::Collision => &mut self.collision,
            SoundCue::Bonus => &mut self.bonus,
        }
    }
}
