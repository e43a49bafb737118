//! Procedural background loop for backends without a music file

/// Seconds per step (eighth notes at 160 bpm)
const STEP: f32 = 0.1875;
const NOTE_LEN: f32 = 0.17;
/// Melody, one note per step; 0.0 is a rest
const MELODY: [f32; 16] = [
    523.25, 659.25, 783.99, 659.25, 587.33, 698.46, 880.00, 0.0, //
    523.25, 659.25, 783.99, 1046.50, 987.77, 783.99, 587.33, 0.0,
];
/// Bass, one note per four steps
const BASS: [f32; 4] = [130.81, 146.83, 130.81, 98.00];

/// Length of one pass of the loop in seconds
pub fn loop_duration() -> f32 {
    STEP * MELODY.len() as f32
}

/// Render one seamless pass of the loop as mono samples in -1.0..=1.0
pub fn render_loop(sample_rate: u32) -> Vec<f32> {
    let rate = sample_rate as f32;
    let total = (rate * loop_duration()) as usize;
    let mut samples = vec![0.0f32; total];

    for (idx, freq) in MELODY.iter().enumerate() {
        let start = (STEP * idx as f32 * rate) as usize;
        add_tone(&mut samples, start, *freq, NOTE_LEN, 0.18, rate);
    }
    for (idx, freq) in BASS.iter().enumerate() {
        let start = (STEP * 4.0 * idx as f32 * rate) as usize;
        add_tone(&mut samples, start, *freq, STEP * 4.0 - 0.02, 0.22, rate);
    }

    samples
}

/// Mix a decaying triangle tone into `samples`, clipped at the buffer end
fn add_tone(samples: &mut [f32], start: usize, freq: f32, len: f32, amp: f32, rate: f32) {
    if freq <= 0.0 {
        return;
    }
    let count = (len * rate) as usize;
    for i in 0..count {
        let Some(slot) = samples.get_mut(start + i) else {
            break;
        };
        let t = i as f32 / rate;
        let phase = (freq * t).fract();
        let tri = 1.0 - 4.0 * (phase - 0.5).abs();
        // Attack and release ramps keep note edges click-free
        let attack = (t / 0.005).min(1.0);
        let release = ((len - t) / 0.01).clamp(0.0, 1.0);
        let env = attack * release * (-4.0 * t / len).exp();
        *slot += tri * amp * env;
    }
}
