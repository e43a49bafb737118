//! Round flow on top of the simulation
//!
//! `Game` owns the state, the high score and its store. Each frame it turns
//! front-end input into a tick, plays cues for what happened, and handles the
//! Playing -> GameOver -> Playing cycle. Background music runs only while a
//! round is actively played and sound is on; a finished round rewinds it.

use crate::audio::{AudioSink, MusicCommand, SoundCue};
use crate::consts::SIM_HZ;
use crate::highscores::HighScoreStore;
use crate::presentation::{InputEvent, Presenter, render_frame};
use crate::sim::{GameEvent, GameState, RoundPhase, TickInput, tick};
use crate::tuning::Tuning;

/// Whether the frame loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Game<H: HighScoreStore> {
    state: GameState,
    high_score: u64,
    store: H,
    /// Whether the sink was last told to play music
    music_playing: bool,
}

impl<H: HighScoreStore> Game<H> {
    /// Start the first round, reading the stored high score
    pub fn new(tuning: Tuning, seed: u64, mut store: H) -> Self {
        let high_score = store.load();
        log::info!("New game (seed {}, high score {})", seed, high_score);
        Self {
            state: GameState::new(tuning, seed),
            high_score,
            store,
            music_playing: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn store(&self) -> &H {
        &self.store
    }

    /// Apply one frame of input. Quit wins over everything else in the batch;
    /// quitting mid-round still records the score.
    pub fn handle_frame(&mut self, events: &[InputEvent], audio: &mut dyn AudioSink) -> Flow {
        if events.contains(&InputEvent::Quit) {
            log::info!("Quit requested");
            if !self.state.is_over() {
                self.finish_round(self.state.score);
            }
            if self.music_playing {
                audio.music(MusicCommand::Stop);
                self.music_playing = false;
            }
            return Flow::Quit;
        }

        for event in events {
            if *event == InputEvent::MuteToggled {
                let muted = !audio.is_muted();
                audio.set_muted(muted);
                log::info!("Sound {}", if muted { "off" } else { "on" });
            }
        }

        match self.state.phase {
            RoundPhase::Playing | RoundPhase::Paused => {
                let input = TickInput {
                    jumps: events
                        .iter()
                        .filter(|e| **e == InputEvent::JumpPressed)
                        .count() as u32,
                    // Two toggles in one frame cancel out
                    pause: events
                        .iter()
                        .filter(|e| **e == InputEvent::PauseToggled)
                        .count()
                        % 2
                        == 1,
                };
                for event in tick(&mut self.state, &input) {
                    self.dispatch(event, audio);
                }
            }
            RoundPhase::GameOver => {
                if events.contains(&InputEvent::JumpPressed) {
                    self.restart();
                }
            }
        }

        self.sync_music(audio);
        Flow::Continue
    }

    /// Music follows the phase: on while playing unmuted, paused otherwise
    fn sync_music(&mut self, audio: &mut dyn AudioSink) {
        let want = self.state.is_playing() && !audio.is_muted();
        if want != self.music_playing {
            audio.music(if want {
                MusicCommand::Play
            } else {
                MusicCommand::Pause
            });
            self.music_playing = want;
        }
    }

    /// Draw the current frame
    pub fn render<P: Presenter + ?Sized>(&self, presenter: &mut P) {
        render_frame(&self.state, self.high_score, presenter);
    }

    /// Blocking frame loop for front ends that own their thread
    pub fn run<P: Presenter + ?Sized>(&mut self, presenter: &mut P, audio: &mut dyn AudioSink) {
        loop {
            let events = presenter.poll_events();
            if self.handle_frame(&events, audio) == Flow::Quit {
                break;
            }
            self.render(presenter);
            presenter.present_frame();
            presenter.tick_delay(SIM_HZ);
        }
    }

    /// Reset everything but the high score
    pub fn restart(&mut self) {
        self.state.reset();
        log::info!("Round restarted");
    }

    fn dispatch(&mut self, event: GameEvent, audio: &mut dyn AudioSink) {
        match event {
            GameEvent::Jumped => audio.play_cue(SoundCue::Jump),
            GameEvent::Collided => audio.play_cue(SoundCue::Collision),
            GameEvent::BonusCollected => {
                log::debug!("Bonus collected, score {}", self.state.score);
                audio.play_cue(SoundCue::Bonus);
            }
            GameEvent::ObstaclePassed => log::debug!("Gate passed, score {}", self.state.score),
            GameEvent::TierChanged { .. } => {}
            GameEvent::RoundOver { score } => {
                audio.music(MusicCommand::Stop);
                self.music_playing = false;
                self.finish_round(score);
            }
        }
    }

    /// Record a new high score; a failed save keeps the in-memory value
    fn finish_round(&mut self, score: u64) {
        log::info!("Round over: score {} (best {})", score, self.high_score);
        if score > self.high_score {
            self.high_score = score;
            log::info!("New high score: {}", score);
            if let Err(e) = self.store.save(score) {
                log::warn!("{}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::{MemoryStore, PersistError};
    use crate::presentation::tests::Recorder;
    use crate::sim::Obstacle;

    /// Sink that records cues and music commands
    #[derive(Default)]
    struct CueLog {
        cues: Vec<SoundCue>,
        music: Vec<MusicCommand>,
        muted: bool,
    }

    impl AudioSink for CueLog {
        fn play_cue(&mut self, cue: SoundCue) {
            if !self.muted {
                self.cues.push(cue);
            }
        }

        fn music(&mut self, command: MusicCommand) {
            self.music.push(command);
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn is_muted(&self) -> bool {
            self.muted
        }
    }

    struct FailingStore;

    impl HighScoreStore for FailingStore {
        fn load(&mut self) -> u64 {
            3
        }

        fn save(&mut self, _score: u64) -> Result<(), PersistError> {
            Err(PersistError::Storage("read-only".into()))
        }
    }

    fn floating() -> Tuning {
        Tuning {
            gravity: 0.0,
            bonus_chance: 0.0,
            ..Default::default()
        }
    }

    /// Force the round to end with the given score on the next frame
    fn crash_with_score(game: &mut Game<impl HighScoreStore>, score: u64, audio: &mut CueLog) {
        let state = game.state_mut();
        state.score = score;
        state.obstacles = vec![Obstacle::new(90.0, 60.0, 100.0, 50.0, 600.0)];
        game.handle_frame(&[], audio);
        assert!(game.state().is_over());
    }

    #[test]
    fn test_loads_high_score() {
        let game = Game::new(Tuning::default(), 1, MemoryStore::with_value(40));
        assert_eq!(game.high_score(), 40);
    }

    #[test]
    fn test_jump_plays_cue() {
        let mut game = Game::new(Tuning::default(), 1, MemoryStore::default());
        let mut audio = CueLog::default();
        game.handle_frame(&[InputEvent::JumpPressed], &mut audio);
        assert_eq!(audio.cues, [SoundCue::Jump]);
        assert_eq!(game.state().avatar.vel, -8.0);
    }

    #[test]
    fn test_quit_skips_the_tick() {
        let mut game = Game::new(Tuning::default(), 1, MemoryStore::default());
        let mut audio = CueLog::default();
        let before = game.state().clone();
        let flow = game.handle_frame(&[InputEvent::JumpPressed, InputEvent::Quit], &mut audio);
        assert_eq!(flow, Flow::Quit);
        assert_eq!(game.state(), &before);
        assert!(audio.cues.is_empty());
    }

    #[test]
    fn test_quit_mid_round_keeps_record() {
        let mut game = Game::new(Tuning::default(), 1, MemoryStore::with_value(4));
        let mut audio = CueLog::default();
        game.state_mut().score = 9;
        assert_eq!(game.handle_frame(&[InputEvent::Quit], &mut audio), Flow::Quit);
        assert_eq!(game.high_score(), 9);
        assert_eq!(game.store().value, Some(9));
        assert_eq!(game.store().saves, 1);
    }

    #[test]
    fn test_quit_while_paused_keeps_record() {
        let mut game = Game::new(Tuning::default(), 1, MemoryStore::with_value(4));
        let mut audio = CueLog::default();
        game.handle_frame(&[InputEvent::PauseToggled], &mut audio);
        game.state_mut().score = 6;
        game.handle_frame(&[InputEvent::Quit], &mut audio);
        assert_eq!(game.store().value, Some(6));
    }

    #[test]
    fn test_quit_after_game_over_saves_once() {
        let mut game = Game::new(floating(), 1, MemoryStore::with_value(4));
        let mut audio = CueLog::default();
        crash_with_score(&mut game, 9, &mut audio);
        game.handle_frame(&[InputEvent::Quit], &mut audio);
        assert_eq!(game.store().saves, 1);
    }

    #[test]
    fn test_new_high_score_saved() {
        let mut game = Game::new(floating(), 1, MemoryStore::with_value(4));
        let mut audio = CueLog::default();
        crash_with_score(&mut game, 9, &mut audio);
        assert_eq!(audio.cues, [SoundCue::Collision]);
        assert_eq!(game.high_score(), 9);
        assert_eq!(game.store().value, Some(9));
        assert_eq!(game.store().saves, 1);
    }

    #[test]
    fn test_lower_score_not_saved() {
        let mut game = Game::new(floating(), 1, MemoryStore::with_value(10));
        let mut audio = CueLog::default();
        crash_with_score(&mut game, 10, &mut audio);
        assert_eq!(game.high_score(), 10);
        assert_eq!(game.store().saves, 0);
    }

    #[test]
    fn test_failed_save_keeps_playing() {
        let mut game = Game::new(floating(), 1, FailingStore);
        assert_eq!(game.high_score(), 3);
        let mut audio = CueLog::default();
        crash_with_score(&mut game, 5, &mut audio);
        assert_eq!(game.high_score(), 5);

        assert_eq!(game.handle_frame(&[InputEvent::JumpPressed], &mut audio), Flow::Continue);
        assert!(game.state().is_playing());
    }

    #[test]
    fn test_restart_matches_fresh_round() {
        let seed = 21;
        let mut game = Game::new(Tuning::default(), seed, MemoryStore::default());
        let mut audio = CueLog::default();

        // Fall until out of the field
        while game.state().is_playing() {
            game.handle_frame(&[], &mut audio);
        }
        // Only jump restarts; pause and plain frames do nothing
        game.handle_frame(&[InputEvent::PauseToggled], &mut audio);
        game.handle_frame(&[], &mut audio);
        assert!(game.state().is_over());

        game.handle_frame(&[InputEvent::JumpPressed], &mut audio);
        let fresh = GameState::new(Tuning::default(), seed);
        let state = game.state();
        assert_eq!(state.phase, RoundPhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.tier_index, 0);
        assert_eq!(state.scroll_speed, fresh.scroll_speed);
        assert_eq!(state.gap_size, fresh.gap_size);
        assert_eq!(state.background, fresh.background);
        assert_eq!(state.avatar, fresh.avatar);
        assert_eq!(state.time_ticks, 0);
        assert!(state.bonuses.is_empty());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].x, fresh.obstacles[0].x);
        assert_eq!(state.obstacles[0].gap(), fresh.obstacles[0].gap());
    }

    #[test]
    fn test_high_score_survives_restart() {
        let mut game = Game::new(floating(), 1, MemoryStore::default());
        let mut audio = CueLog::default();
        crash_with_score(&mut game, 7, &mut audio);
        game.handle_frame(&[InputEvent::JumpPressed], &mut audio);
        assert_eq!(game.state().score, 0);
        assert_eq!(game.high_score(), 7);
    }

    #[test]
    fn test_mute_toggle() {
        let mut game = Game::new(Tuning::default(), 1, MemoryStore::default());
        let mut audio = CueLog::default();
        game.handle_frame(&[InputEvent::MuteToggled, InputEvent::JumpPressed], &mut audio);
        assert!(audio.is_muted());
        assert!(audio.cues.is_empty());
        game.handle_frame(&[InputEvent::MuteToggled, InputEvent::JumpPressed], &mut audio);
        assert_eq!(audio.cues, [SoundCue::Jump]);
    }

    #[test]
    fn test_pause_toggles_cancel() {
        let mut game = Game::new(Tuning::default(), 1, MemoryStore::default());
        let mut audio = CueLog::default();
        game.handle_frame(
            &[InputEvent::PauseToggled, InputEvent::PauseToggled],
            &mut audio,
        );
        assert_eq!(game.state().phase, RoundPhase::Playing);
        game.handle_frame(&[InputEvent::PauseToggled], &mut audio);
        assert_eq!(game.state().phase, RoundPhase::Paused);
    }

    #[test]
    fn test_music_follows_round() {
        let mut game = Game::new(floating(), 1, MemoryStore::default());
        let mut audio = CueLog::default();
        game.handle_frame(&[], &mut audio);
        game.handle_frame(&[], &mut audio);
        assert_eq!(audio.music, [MusicCommand::Play]);

        game.handle_frame(&[InputEvent::PauseToggled], &mut audio);
        game.handle_frame(&[InputEvent::PauseToggled], &mut audio);
        assert_eq!(
            audio.music,
            [MusicCommand::Play, MusicCommand::Pause, MusicCommand::Play]
        );

        // Game over rewinds; the restart starts from the top
        audio.music.clear();
        crash_with_score(&mut game, 0, &mut audio);
        game.handle_frame(&[], &mut audio);
        assert_eq!(audio.music, [MusicCommand::Stop]);
        game.handle_frame(&[InputEvent::JumpPressed], &mut audio);
        assert_eq!(audio.music, [MusicCommand::Stop, MusicCommand::Play]);
    }

    #[test]
    fn test_mute_pauses_music() {
        let mut game = Game::new(Tuning::default(), 1, MemoryStore::default());
        let mut audio = CueLog::default();
        game.handle_frame(&[], &mut audio);
        game.handle_frame(&[InputEvent::MuteToggled], &mut audio);
        game.handle_frame(&[InputEvent::MuteToggled], &mut audio);
        assert_eq!(
            audio.music,
            [MusicCommand::Play, MusicCommand::Pause, MusicCommand::Play]
        );
    }

    #[test]
    fn test_quit_stops_music() {
        let mut game = Game::new(Tuning::default(), 1, MemoryStore::default());
        let mut audio = CueLog::default();
        game.handle_frame(&[], &mut audio);
        game.handle_frame(&[InputEvent::Quit], &mut audio);
        assert_eq!(audio.music, [MusicCommand::Play, MusicCommand::Stop]);
    }

    #[test]
    fn test_run_loop() {
        let mut game = Game::new(Tuning::default(), 1, MemoryStore::default());
        let mut audio = CueLog::default();
        let mut presenter = Recorder::default();
        presenter.script = [vec![], vec![InputEvent::JumpPressed], vec![]].into();

        game.run(&mut presenter, &mut audio);

        // Three frames rendered, then the exhausted script quits
        assert_eq!(presenter.frames_presented, 3);
        assert_eq!(presenter.delays, 3);
        assert_eq!(game.state().time_ticks, 3);
        assert_eq!(audio.cues, [SoundCue::Jump]);
    }
}
