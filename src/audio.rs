//! Sound effects triggered by simulation events
//!
//! The simulation never talks to an audio engine directly. It raises
//! `GameEvent`s; the host drains them after each frame and hands them to
//! `play_events`, which forwards the matching effects to an `AudioSink`.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Background loop
    Music,
    /// Ball hits paddle
    PaddleHit,
    /// Ball breaks a brick
    BrickBreak,
    /// Ball bounces off a solid brick
    SolidHit,
    /// Power-up collected
    PowerUp,
}

impl SoundEffect {
    /// Asset name the audio engine resolves
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::Music => "breakout.mp3",
            SoundEffect::PaddleHit => "bleep.wav",
            SoundEffect::BrickBreak => "bleep.mp3",
            SoundEffect::SolidHit => "solid.wav",
            SoundEffect::PowerUp => "powerup.wav",
        }
    }
}

/// Fire-and-forget playback
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, looping: bool);
}

/// Audio disabled
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect, _looping: bool) {}
}

/// Logs effects instead of playing them (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, looping: bool) {
        log::debug!("play {} (loop: {})", effect.asset_name(), looping);
    }
}

/// Sound for an event, if it has one
pub fn sound_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::BrickDestroyed { .. } => Some(SoundEffect::BrickBreak),
        GameEvent::SolidHit => Some(SoundEffect::SolidHit),
        GameEvent::PaddleHit => Some(SoundEffect::PaddleHit),
        GameEvent::PowerUpCollected(_) => Some(SoundEffect::PowerUp),
        _ => None,
    }
}

/// Start the looping background track
pub fn start_music(sink: &mut dyn AudioSink) {
    sink.play(SoundEffect::Music, true);
}

/// Play one-shot effects for a frame's events
pub fn play_events(events: &[GameEvent], sink: &mut dyn AudioSink) {
    for effect in events.iter().filter_map(sound_for) {
        sink.play(effect, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PowerUpKind;
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder(Vec<(SoundEffect, bool)>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, looping: bool) {
            self.0.push((effect, looping));
        }
    }

    #[test]
    fn test_events_map_to_one_shots() {
        let events = [
            GameEvent::BrickDestroyed { pos: Vec2::ZERO },
            GameEvent::LifeLost { lives: 2 },
            GameEvent::PowerUpCollected(PowerUpKind::Chaos),
            GameEvent::PaddleHit,
        ];
        let mut sink = Recorder::default();
        play_events(&events, &mut sink);
        assert_eq!(
            sink.0,
            vec![
                (SoundEffect::BrickBreak, false),
                (SoundEffect::PowerUp, false),
                (SoundEffect::PaddleHit, false),
            ]
        );
    }

    #[test]
    fn test_music_loops() {
        let mut sink = Recorder::default();
        start_music(&mut sink);
        assert_eq!(sink.0, vec![(SoundEffect::Music, true)]);
    }
}
