//! Sound effects
//!
//! Procedurally generated tones, no external files. The backend is created
//! lazily on the first sound (browsers only allow audio after a user
//! gesture) and the outcome is cached: once unavailable, always silent.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Coin collected
    CoinCollect,
    /// Round finished
    GameOver,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// One scheduled tone within an effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Start frequency (Hz)
    pub freq: f32,
    /// Frequency reached by the end of the note (Hz), for sweeps
    pub end_freq: f32,
    /// Offset from the effect start (s)
    pub delay: f64,
    /// Length (s)
    pub duration: f64,
    /// Peak gain relative to the effect volume
    pub gain: f32,
    pub waveform: Waveform,
}

impl SoundEffect {
    /// The notes making up this effect
    pub fn notes(&self) -> &'static [Note] {
        const JUMP: [Note; 1] = [Note {
            freq: 320.0,
            end_freq: 640.0,
            delay: 0.0,
            duration: 0.12,
            gain: 0.25,
            waveform: Waveform::Square,
        }];
        const COIN: [Note; 2] = [
            Note {
                freq: 880.0,
                end_freq: 880.0,
                delay: 0.0,
                duration: 0.08,
                gain: 0.3,
                waveform: Waveform::Sine,
            },
            Note {
                freq: 1320.0,
                end_freq: 1320.0,
                delay: 0.06,
                duration: 0.12,
                gain: 0.3,
                waveform: Waveform::Sine,
            },
        ];
        const GAME_OVER: [Note; 3] = [
            Note {
                freq: 440.0,
                end_freq: 440.0,
                delay: 0.0,
                duration: 0.25,
                gain: 0.3,
                waveform: Waveform::Triangle,
            },
            Note {
                freq: 330.0,
                end_freq: 330.0,
                delay: 0.25,
                duration: 0.25,
                gain: 0.3,
                waveform: Waveform::Triangle,
            },
            Note {
                freq: 220.0,
                end_freq: 220.0,
                delay: 0.5,
                duration: 0.4,
                gain: 0.3,
                waveform: Waveform::Triangle,
            },
        ];

        match self {
            SoundEffect::Jump => &JUMP,
            SoundEffect::CoinCollect => &COIN,
            SoundEffect::GameOver => &GAME_OVER,
        }
    }
}

/// Anything that can be asked to play an effect. Fire-and-forget.
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);

    /// Turn sound on or off
    fn set_enabled(&mut self, enabled: bool);
}

/// Discards every sound
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play(&mut self, _effect: SoundEffect) {}

    fn set_enabled(&mut self, _enabled: bool) {}
}

/// A concrete tone generator
pub trait ToneBackend {
    fn play_notes(&mut self, notes: &[Note], volume: f32);
}

/// Lazy backend state
pub enum AudioCapability<B> {
    Uninitialized,
    Ready(B),
    Unavailable,
}

/// Audio manager for the game
pub struct AudioManager<B> {
    capability: AudioCapability<B>,
    init: fn() -> Option<B>,
    volume: f32,
    enabled: bool,
}

impl<B: ToneBackend> AudioManager<B> {
    /// `init` is called at most once, on the first audible sound
    pub fn new(init: fn() -> Option<B>, enabled: bool) -> Self {
        Self {
            capability: AudioCapability::Uninitialized,
            init,
            volume: 0.8,
            enabled,
        }
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self.capability, AudioCapability::Unavailable)
    }

    /// The backend, once created
    pub fn backend(&self) -> Option<&B> {
        match &self.capability {
            AudioCapability::Ready(b) => Some(b),
            _ => None,
        }
    }

    fn ensure_backend(&mut self) -> Option<&mut B> {
        if let AudioCapability::Uninitialized = self.capability {
            self.capability = match (self.init)() {
                Some(backend) => {
                    log::info!("Audio initialized");
                    AudioCapability::Ready(backend)
                }
                None => {
                    log::warn!("Audio backend unavailable - sound disabled");
                    AudioCapability::Unavailable
                }
            };
        }
        match &mut self.capability {
            AudioCapability::Ready(b) => Some(b),
            _ => None,
        }
    }
}

impl<B: ToneBackend> SoundSink for AudioManager<B> {
    fn play(&mut self, effect: SoundEffect) {
        if !self.enabled || self.volume <= 0.0 {
            return;
        }
        let volume = self.volume;
        if let Some(backend) = self.ensure_backend() {
            backend.play_notes(effect.notes(), volume);
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// Logs effects instead of playing them (native builds)
#[derive(Debug, Default)]
pub struct LogTones;

impl ToneBackend for LogTones {
    fn play_notes(&mut self, notes: &[Note], volume: f32) {
        let freqs: Vec<String> = notes.iter().map(|n| format!("{:.0}Hz", n.freq)).collect();
        log::debug!("tone [{}] at {:.2}", freqs.join(" "), volume);
    }
}

/// Web Audio backend
#[cfg(target_arch = "wasm32")]
pub mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{Note, ToneBackend, Waveform};

    pub struct WebAudio {
        ctx: AudioContext,
    }

    impl WebAudio {
        /// Try to create an audio context (may fail outside a secure context)
        pub fn create() -> Option<Self> {
            AudioContext::new().ok().map(|ctx| Self { ctx })
        }

        /// Create an oscillator with gain envelope
        fn create_osc(&self, freq: f32, osc_type: OscillatorType) -> Option<(OscillatorNode, GainNode)> {
            let osc = self.ctx.create_oscillator().ok()?;
            let gain = self.ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&self.ctx.destination()).ok()?;

            Some((osc, gain))
        }
    }

    fn oscillator_type(waveform: Waveform) -> OscillatorType {
        match waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Triangle => OscillatorType::Triangle,
        }
    }

    impl ToneBackend for WebAudio {
        fn play_notes(&mut self, notes: &[Note], volume: f32) {
            // Resume context if suspended (browsers require user gesture)
            if self.ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = self.ctx.resume();
            }

            for note in notes {
                let Some((osc, gain)) = self.create_osc(note.freq, oscillator_type(note.waveform))
                else {
                    continue;
                };
                let t = self.ctx.current_time() + note.delay;
                let end = t + note.duration;

                gain.gain().set_value_at_time(volume * note.gain, t).ok();
                gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
                if note.end_freq != note.freq {
                    osc.frequency().set_value_at_time(note.freq, t).ok();
                    osc.frequency()
                        .exponential_ramp_to_value_at_time(note.end_freq, end)
                        .ok();
                }

                osc.start_with_when(t).ok();
                osc.stop_with_when(end + 0.05).ok();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        played: Vec<(usize, f32)>,
    }

    impl ToneBackend for Recorder {
        fn play_notes(&mut self, notes: &[Note], volume: f32) {
            self.played.push((notes.len(), volume));
        }
    }

    fn working() -> Option<Recorder> {
        Some(Recorder::default())
    }

    fn broken() -> Option<Recorder> {
        None
    }

    #[test]
    fn test_game_over_descends_three_notes() {
        let notes = SoundEffect::GameOver.notes();
        assert_eq!(notes.len(), 3);
        assert!(notes.windows(2).all(|w| w[0].freq > w[1].freq));
        assert!(notes.windows(2).all(|w| w[0].delay < w[1].delay));
    }

    #[test]
    fn test_effects_are_distinct() {
        assert_ne!(SoundEffect::Jump.notes(), SoundEffect::CoinCollect.notes());
        assert_ne!(SoundEffect::CoinCollect.notes(), SoundEffect::GameOver.notes());
    }

    #[test]
    fn test_lazy_init_on_first_sound() {
        let mut audio = AudioManager::new(working, true);
        assert!(audio.backend().is_none());
        audio.play(SoundEffect::Jump);
        audio.play(SoundEffect::CoinCollect);
        let backend = audio.backend().unwrap();
        assert_eq!(backend.played, vec![(1, 0.8), (2, 0.8)]);
    }

    #[test]
    fn test_muted_never_initializes() {
        let mut audio = AudioManager::new(working, false);
        audio.play(SoundEffect::Jump);
        assert!(audio.backend().is_none());
        assert!(!audio.is_unavailable());

        audio.set_enabled(true);
        audio.play(SoundEffect::Jump);
        assert_eq!(audio.backend().unwrap().played.len(), 1);
    }

    #[test]
    fn test_unavailable_backend_stays_silent() {
        let mut audio = AudioManager::new(broken, true);
        audio.play(SoundEffect::GameOver);
        assert!(audio.is_unavailable());
        audio.play(SoundEffect::Jump);
        assert!(audio.is_unavailable());
        assert!(audio.backend().is_none());
    }

    #[test]
    fn test_zero_volume_is_silent() {
        let mut audio = AudioManager::new(working, true);
        audio.set_volume(-1.0);
        audio.play(SoundEffect::Jump);
        assert!(audio.backend().is_none());
    }
}
