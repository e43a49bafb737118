//! Audio backend using the Web Audio API
//!
//! Procedurally generated cues and music - no asset files needed in the browser.

use web_sys::{
    AudioBuffer, AudioBufferSourceNode, AudioContext, GainNode, OscillatorNode, OscillatorType,
};

use super::music;
use super::{AudioSink, MusicCommand, SoundCue, Volume};

/// Music loop currently sounding
struct MusicVoice {
    source: AudioBufferSourceNode,
    gain: GainNode,
    /// Context time at which the loop's position 0 would have played
    origin: f64,
}

/// Web Audio player. Without an `AudioContext` every sound is a no-op.
pub struct WebAudio {
    ctx: Option<AudioContext>,
    volume: Volume,
    /// Rendered once, on first play
    music_buffer: Option<AudioBuffer>,
    music_voice: Option<MusicVoice>,
    /// Position to resume from, in seconds
    music_offset: f64,
}

impl WebAudio {
    pub fn new(volume: Volume) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume,
            music_buffer: None,
            music_voice: None,
            music_offset: 0.0,
        }
    }

    /// Resume a suspended context (browsers require a user gesture first)
    fn resume(ctx: &AudioContext) {
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
    }

    fn music_buffer(&mut self, ctx: &AudioContext) -> Option<AudioBuffer> {
        if self.music_buffer.is_none() {
            let rate = ctx.sample_rate();
            let mut samples = music::render_loop(rate as u32);
            let buffer = ctx.create_buffer(1, samples.len() as u32, rate).ok()?;
            buffer.copy_to_channel(&mut samples, 0).ok()?;
            self.music_buffer = Some(buffer);
        }
        self.music_buffer.clone()
    }

    fn start_music(&mut self) {
        if self.music_voice.is_some() {
            return;
        }
        let Some(ctx) = self.ctx.clone() else { return };
        Self::resume(&ctx);
        let Some(buffer) = self.music_buffer(&ctx) else {
            log::warn!("Could not build music buffer");
            return;
        };

        self.music_voice = Self::create_voice(
            &ctx,
            &buffer,
            self.volume.music_effective(),
            self.music_offset,
        );
    }

    /// Looping source through its own gain, started at `offset` seconds
    fn create_voice(
        ctx: &AudioContext,
        buffer: &AudioBuffer,
        vol: f32,
        offset: f64,
    ) -> Option<MusicVoice> {
        let source = ctx.create_buffer_source().ok()?;
        let gain = ctx.create_gain().ok()?;
        source.set_buffer(Some(buffer));
        source.set_loop(true);
        gain.gain().set_value(vol);
        source.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;
        source.start_with_when_and_grain_offset(0.0, offset).ok()?;
        Some(MusicVoice {
            source,
            gain,
            origin: ctx.current_time() - offset,
        })
    }

    /// Silence the loop, returning the position it reached
    fn halt_music(&mut self) -> f64 {
        let (Some(voice), Some(ctx)) = (self.music_voice.take(), &self.ctx) else {
            return self.music_offset;
        };
        let _ = voice.source.stop();
        (ctx.current_time() - voice.origin).rem_euclid(music::loop_duration() as f64)
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Jump - short upward chirp
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(400.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(800.0, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Collision - thump followed by a falling tone
    fn play_collision(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.6, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.15)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(80.0, t + 0.4)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }
    }

    /// Bonus - two-note ding
    fn play_bonus(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [800.0, 1200.0].iter().enumerate() {
            let delay = i as f64 * 0.07;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }
}

impl AudioSink for WebAudio {
    fn play_cue(&mut self, cue: SoundCue) {
        let vol = self.volume.effective();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };
        Self::resume(ctx);

        match cue {
            SoundCue::Jump => self.play_jump(ctx, vol),
            SoundCue::Collision => self.play_collision(ctx, vol),
            SoundCue::Bonus => self.play_bonus(ctx, vol),
        }
    }

    fn music(&mut self, command: MusicCommand) {
        match command {
            MusicCommand::Play => self.start_music(),
            MusicCommand::Pause => self.music_offset = self.halt_music(),
            MusicCommand::Stop => {
                self.halt_music();
                self.music_offset = 0.0;
            }
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.volume.muted = muted;
        if let Some(voice) = &self.music_voice {
            voice.gain.gain().set_value(self.volume.music_effective());
        }
    }

    fn is_muted(&self) -> bool {
        self.volume.muted
    }
}
