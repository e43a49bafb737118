//! Native cue and music playback through rodio

use std::io::Cursor;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use super::{AudioSink, CueBank, MUSIC_FILE, MusicCommand, SoundCue, Volume};

/// Plays cue files from a `CueBank` on the default output device
pub struct RodioAudio {
    /// Kept alive for as long as sounds should play
    output: Option<(OutputStream, OutputStreamHandle)>,
    bank: CueBank,
    volume: Volume,
    /// Looping music; dropped on stop so the next play starts from the top
    music: Option<Sink>,
}

impl RodioAudio {
    /// Open the default device. With no device every cue is a no-op.
    pub fn new(bank: CueBank, volume: Volume) -> Self {
        let output = match OutputStream::try_default() {
            Ok(output) => Some(output),
            Err(e) => {
                log::warn!("No audio output ({}) - audio disabled", e);
                None
            }
        };
        Self {
            output,
            bank,
            volume,
            music: None,
        }
    }

    /// Queue the music track on a paused sink
    fn load_music(&self) -> Option<Sink> {
        let (_, handle) = self.output.as_ref()?;
        let bytes = self.bank.music()?;
        let sink = Sink::try_new(handle).ok()?;
        match Decoder::new(Cursor::new(bytes.clone())) {
            Ok(source) => {
                sink.pause();
                sink.set_volume(self.volume.music_effective());
                sink.append(source.repeat_infinite());
                Some(sink)
            }
            Err(e) => {
                log::warn!("Could not decode {}: {}", MUSIC_FILE, e);
                None
            }
        }
    }
}

impl AudioSink for RodioAudio {
    fn play_cue(&mut self, cue: SoundCue) {
        let vol = self.volume.effective();
        if vol <= 0.0 {
            return;
        }
        let Some((_, handle)) = &self.output else {
            return;
        };
        let Some(bytes) = self.bank.get(cue) else {
            return;
        };

        let Ok(sink) = Sink::try_new(handle) else {
            return;
        };
        match Decoder::new(Cursor::new(bytes.clone())) {
            Ok(source) => {
                sink.set_volume(vol);
                sink.append(source);
                sink.detach();
            }
            Err(e) => log::warn!("Could not decode {}: {}", cue.file_name(), e),
        }
    }

    fn music(&mut self, command: MusicCommand) {
        match command {
            MusicCommand::Play => {
                if self.music.is_none() {
                    self.music = self.load_music();
                }
                if let Some(sink) = &self.music {
                    sink.play();
                }
            }
            MusicCommand::Pause => {
                if let Some(sink) = &self.music {
                    sink.pause();
                }
            }
            MusicCommand::Stop => {
                if let Some(sink) = self.music.take() {
                    sink.stop();
                }
            }
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.volume.muted = muted;
        if let Some(sink) = &self.music {
            sink.set_volume(self.volume.music_effective());
        }
    }

    fn is_muted(&self) -> bool {
        self.volume.muted
    }
}
