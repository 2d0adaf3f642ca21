// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback engine boundary.
//!
//! Decoding and rendering are delegated to an external engine; this
//! module defines the contract the rest of the application consumes
//! and the two thin backend handles behind it. Engines report back
//! through [`EngineEvent`] values drained by the coordinator once per
//! frame.

use super::source::VideoSource;
use std::time::Instant;

/// Reason the engine failed to load or play the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngineErrorKind {
    #[error("the source format is not supported")]
    Unsupported,
    #[error("the source could not be fetched")]
    Network,
    #[error("the source was not found")]
    NotFound,
    #[error("the source owner forbids embedded playback")]
    EmbeddingForbidden,
}

/// Event reported by a playback engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// The engine bound the source and is ready to play.
    Ready { duration: Option<f64> },
    /// Latest playback position, at the engine's own cadence.
    TimeTick(f64),
    /// The engine changed play state on its own (stall, end of media,
    /// native controls).
    StateChanged { playing: bool },
    /// The engine failed; playback will not continue.
    Error(EngineErrorKind),
}

/// Contract every playback backend implements.
pub trait PlaybackEngine {
    /// Ask the engine to play. The engine may refuse (e.g. the platform
    /// blocks unprompted playback).
    fn request_play(&mut self) -> Result<(), EngineErrorKind>;

    /// Ask the engine to pause. Pause requests always succeed.
    fn request_pause(&mut self);

    /// Jump to an absolute position in seconds.
    fn seek(&mut self, time: f64);

    /// Drain pending engine events. Called once per UI frame.
    fn poll(&mut self) -> Vec<EngineEvent>;

    /// Release the underlying handle. The engine must not emit events
    /// afterwards.
    fn release(&mut self);
}

/// Create the backend matching a resolved source.
pub fn create(source: &VideoSource) -> Box<dyn PlaybackEngine> {
    match source {
        VideoSource::Hosted { video_id } => {
            let engine = HostedEngine::new(video_id.clone());
            log::info!("Binding hosted engine: {}", engine.embed_url());
            Box::new(engine)
        }
        VideoSource::Native { url } => {
            log::info!("Binding native engine for {}", url);
            Box::new(NativeEngine::new(url.clone()))
        }
    }
}

/// Wall-clock playhead shared by both backends.
///
/// Decoding lives outside this process, so position is tracked as
/// elapsed wall time while playing.
#[derive(Debug)]
struct PositionClock {
    position: f64,
    playing_since: Option<Instant>,
}

impl PositionClock {
    fn new() -> Self {
        Self {
            position: 0.0,
            playing_since: None,
        }
    }

    fn is_playing(&self) -> bool {
        self.playing_since.is_some()
    }

    fn play(&mut self) {
        if self.playing_since.is_none() {
            self.playing_since = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        self.position = self.now();
        self.playing_since = None;
    }

    fn seek(&mut self, time: f64) {
        self.position = time.max(0.0);
        if self.playing_since.is_some() {
            self.playing_since = Some(Instant::now());
        }
    }

    fn now(&self) -> f64 {
        match self.playing_since {
            Some(since) => self.position + since.elapsed().as_secs_f64(),
            None => self.position,
        }
    }
}

/// Backend for direct media URLs.
pub struct NativeEngine {
    url: String,
    clock: PositionClock,
    ready_sent: bool,
    released: bool,
}

impl NativeEngine {
    pub fn new(url: String) -> Self {
        Self {
            url,
            clock: PositionClock::new(),
            ready_sent: false,
            released: false,
        }
    }
}

impl PlaybackEngine for NativeEngine {
    fn request_play(&mut self) -> Result<(), EngineErrorKind> {
        self.clock.play();
        Ok(())
    }

    fn request_pause(&mut self) {
        self.clock.pause();
    }

    fn seek(&mut self, time: f64) {
        self.clock.seek(time);
    }

    fn poll(&mut self) -> Vec<EngineEvent> {
        if self.released {
            return Vec::new();
        }
        let mut events = Vec::new();
        if !self.ready_sent {
            self.ready_sent = true;
            events.push(EngineEvent::Ready { duration: None });
        }
        events.push(EngineEvent::TimeTick(self.clock.now()));
        events
    }

    fn release(&mut self) {
        if !self.released {
            log::info!("Releasing native engine for {}", self.url);
            self.clock.pause();
            self.released = true;
        }
    }
}

/// Backend for hosted videos played through the embed widget.
pub struct HostedEngine {
    video_id: String,
    clock: PositionClock,
    ready_sent: bool,
    released: bool,
}

impl HostedEngine {
    pub fn new(video_id: String) -> Self {
        Self {
            video_id,
            clock: PositionClock::new(),
            ready_sent: false,
            released: false,
        }
    }

    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}?enablejsapi=1", self.video_id)
    }
}

impl PlaybackEngine for HostedEngine {
    fn request_play(&mut self) -> Result<(), EngineErrorKind> {
        self.clock.play();
        Ok(())
    }

    fn request_pause(&mut self) {
        self.clock.pause();
    }

    fn seek(&mut self, time: f64) {
        self.clock.seek(time);
    }

    fn poll(&mut self) -> Vec<EngineEvent> {
        if self.released {
            return Vec::new();
        }
        let mut events = Vec::new();
        if !self.ready_sent {
            self.ready_sent = true;
            events.push(EngineEvent::Ready { duration: None });
        }
        events.push(EngineEvent::TimeTick(self.clock.now()));
        events
    }

    fn release(&mut self) {
        if !self.released {
            log::info!("Releasing hosted engine for video id {}", self.video_id);
            self.clock.pause();
            self.released = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_selects_backend_by_source() {
        let hosted = VideoSource::resolve("https://host/watch?v=abcdefghijk").unwrap();
        let native = VideoSource::resolve("https://cdn.example.com/clip.mp4").unwrap();
        // Both construct; backend choice is covered by source tests, this
        // checks the factory handles each arm.
        let _ = create(&hosted);
        let _ = create(&native);
    }

    #[test]
    fn test_native_engine_reports_ready_once() {
        let mut engine = NativeEngine::new("file.mp4".to_string());
        let first = engine.poll();
        assert!(matches!(first[0], EngineEvent::Ready { .. }));
        let second = engine.poll();
        assert!(second.iter().all(|e| !matches!(e, EngineEvent::Ready { .. })));
    }

    #[test]
    fn test_released_engine_emits_nothing() {
        let mut engine = NativeEngine::new("file.mp4".to_string());
        engine.release();
        assert!(engine.poll().is_empty());
    }

    #[test]
    fn test_clock_holds_position_while_paused() {
        let mut clock = PositionClock::new();
        clock.seek(42.0);
        assert_eq!(clock.now(), 42.0);
        assert!(!clock.is_playing());
        clock.play();
        clock.pause();
        assert!(clock.now() >= 42.0);
    }

    #[test]
    fn test_seek_clamps_negative_positions() {
        let mut clock = PositionClock::new();
        clock.seek(-5.0);
        assert_eq!(clock.now(), 0.0);
    }
}
