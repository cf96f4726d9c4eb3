//! Sound collaborator seam
//!
//! The engine reports audible moments as keyed cues, fire-and-forget.
//! Playback itself is not this crate's concern; hosts implement
//! [`SoundSink`] over whatever audio backend they use, and a cue that
//! cannot be played is silently dropped.

/// Sound cue keys emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Two bodies collided.
    BodyHit,
    /// A body struck an obstacle edge.
    WallHit,
    /// A body struck a bounce tile.
    Bounce,
    /// A body crossed an accelerator.
    Boost,
    /// A body reached the goal.
    Holed,
    /// A body left the playable area and was returned to spawn.
    OutOfBounds,
}

/// Best-effort audio output. Implementations must not block or fail
/// loudly.
pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

/// Sink that discards every cue. Useful for tests and headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Sink that records cues in order, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub cues: Vec<SoundCue>,
}

impl SoundSink for RecordingSink {
    fn play(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }
}
