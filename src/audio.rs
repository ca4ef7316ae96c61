//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// New game started
    Start,
    /// Obstacle left the bottom of the canvas
    Dodge,
    /// Level went up
    LevelUp,
    /// Player got hit
    Hit,
    /// Game over
    GameOver,
    /// New high score
    HighScore,
}

impl SoundEffect {
    /// Sound for a tick event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Spawned { .. } => None,
            GameEvent::Dodged { .. } => Some(Self::Dodge),
            GameEvent::LevelUp { .. } => Some(Self::LevelUp),
            GameEvent::Hit { lives, .. } if *lives > 0 => Some(Self::Hit),
            GameEvent::Hit { .. } => None,
            GameEvent::GameOver {
                new_high_score: true,
                ..
            } => Some(Self::HighScore),
            GameEvent::GameOver { .. } => Some(Self::GameOver),
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, volume: 0.8 }
    }

    /// Set effective volume (0.0 - 1.0, 0 mutes)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Play whatever sounds a tick's events call for
    pub fn play_events(&self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Start => self.play_sweep(ctx, vol * 0.4, 220.0, 660.0, 0.2),
            SoundEffect::Dodge => self.play_blip(ctx, vol * 0.15, 880.0, 0.05),
            SoundEffect::LevelUp => {
                self.play_blip(ctx, vol * 0.3, 660.0, 0.1);
                self.play_blip_at(ctx, vol * 0.3, 990.0, 0.15, 0.1);
            }
            SoundEffect::Hit => self.play_sweep(ctx, vol * 0.6, 180.0, 50.0, 0.2),
            SoundEffect::GameOver => self.play_sweep(ctx, vol * 0.6, 300.0, 40.0, 0.8),
            SoundEffect::HighScore => {
                for (i, freq) in [523.0, 659.0, 784.0, 1047.0].into_iter().enumerate() {
                    self.play_blip_at(ctx, vol * 0.35, freq, 0.15, i as f64 * 0.12);
                }
            }
        }
    }

    // === Sound generators ===

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

    fn play_blip(&self, ctx: &AudioContext, vol: f32, freq: f32, duration: f64) {
        self.play_blip_at(ctx, vol, freq, duration, 0.0);
    }

    /// Short square tone, `delay` seconds from now
    fn play_blip_at(&self, ctx: &AudioContext, vol: f32, freq: f32, duration: f64, delay: f64) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time() + delay;

        gain.gain().set_value_at_time(0.0, ctx.current_time()).ok();
        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + duration + 0.02).ok();
    }

    /// Pitch sweep from `from` to `to` Hz
    fn play_sweep(&self, ctx: &AudioContext, vol: f32, from: f32, to: f32, duration: f64) {
        let Some((osc, gain)) = self.create_osc(ctx, from, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + duration)
            .ok();
        osc.frequency().set_value_at_time(from, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(to, t + duration)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + duration + 0.05).ok();
    }
}
