//! Fire-and-forget audio cue notifications.
//!
//! Synthesis lives with the host; the controller only names the cue.

use std::sync::{Arc, Mutex};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCue {
    Open,
    Close,
    Modal,
}

impl AudioCue {
    pub fn name(self) -> &'static str {
        match self {
            AudioCue::Open => "open",
            AudioCue::Close => "close",
            AudioCue::Modal => "modal",
        }
    }
}

pub trait AudioCueSink: Send + Sync {
    fn cue(&self, cue: AudioCue);
}

#[derive(Debug, Default)]
pub struct NullAudioSink;

impl AudioCueSink for NullAudioSink {
    fn cue(&self, _cue: AudioCue) {}
}

/// Keeps every cue it receives; clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct RecordingAudioSink {
    cues: Arc<Mutex<Vec<AudioCue>>>,
}

impl RecordingAudioSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> Vec<AudioCue> {
        self.cues
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.cues.lock() {
            guard.clear();
        }
    }
}

impl AudioCueSink for RecordingAudioSink {
    fn cue(&self, cue: AudioCue) {
        if let Ok(mut guard) = self.cues.lock() {
            guard.push(cue);
        }
    }
}
