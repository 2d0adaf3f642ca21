// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback coordination.
//!
//! The coordinator mirrors the engine's time and play state for the
//! annotation workflow: it relays pause/resume intents to the bound
//! engine and folds engine-reported events into cached state. All
//! mutation goes through [`PlaybackCoordinator::handle_event`], so the
//! engine-driven transitions stay in one place.

use super::engine::{self, EngineErrorKind, EngineEvent, PlaybackEngine};
use super::source::VideoSource;

/// Cached playback state plus the bound engine handle.
pub struct PlaybackCoordinator {
    engine: Option<Box<dyn PlaybackEngine>>,
    source: Option<VideoSource>,
    current_time: f64,
    duration: Option<f64>,
    paused: bool,
    error: Option<EngineErrorKind>,
}

impl PlaybackCoordinator {
    pub fn new() -> Self {
        Self {
            engine: None,
            source: None,
            current_time: 0.0,
            duration: None,
            paused: true,
            error: None,
        }
    }

    /// Bind a new source, creating the backend matching it.
    ///
    /// The previous engine handle (if any) is released first and all
    /// cached time/duration/error state resets to initial values.
    pub fn bind(&mut self, source: VideoSource) {
        let engine = engine::create(&source);
        self.attach(source, engine);
    }

    /// Bind a specific engine handle for a source. Seam used by `bind`
    /// and by tests that script engine behavior.
    pub fn attach(&mut self, source: VideoSource, engine: Box<dyn PlaybackEngine>) {
        self.release();
        self.current_time = 0.0;
        self.duration = None;
        self.paused = true;
        self.error = None;
        self.source = Some(source);
        self.engine = Some(engine);
    }

    /// Release the bound engine handle, if any. Cached state is kept so
    /// the last known position stays readable.
    pub fn release(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.release();
        }
    }

    /// Ask the engine to pause. The paused flag is set regardless of
    /// whether an engine is bound, so the annotation workflow can rely
    /// on it.
    pub fn request_pause(&mut self) {
        self.paused = true;
        if let Some(engine) = self.engine.as_mut() {
            engine.request_pause();
        }
    }

    /// Ask the engine to resume. If the engine refuses, the paused flag
    /// is forced back to true and nothing else is surfaced.
    pub fn request_resume(&mut self) {
        match self.engine.as_mut() {
            Some(engine) => match engine.request_play() {
                Ok(()) => self.paused = false,
                Err(kind) => {
                    log::warn!("Engine refused to resume: {}", kind);
                    self.paused = true;
                }
            },
            None => self.paused = true,
        }
    }

    /// Jump to an absolute position.
    pub fn seek(&mut self, time: f64) {
        let time = time.max(0.0);
        if let Some(engine) = self.engine.as_mut() {
            engine.seek(time);
        }
        self.current_time = time;
    }

    /// Drain engine events and fold them into cached state. Called once
    /// per UI frame.
    pub fn pump(&mut self) {
        let events = match self.engine.as_mut() {
            Some(engine) => engine.poll(),
            None => return,
        };
        for event in events {
            self.handle_event(event);
        }
    }

    /// Fold one engine event into the cached state.
    pub fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Ready { duration } => {
                self.duration = duration;
            }
            EngineEvent::TimeTick(time) => {
                self.current_time = time.max(0.0);
            }
            // Mirror the engine's autonomous state change without
            // re-issuing a request, to avoid a feedback loop.
            EngineEvent::StateChanged { playing } => {
                self.paused = !playing;
            }
            EngineEvent::Error(kind) => {
                log::error!("Playback engine error: {}", kind);
                self.paused = true;
                self.error = Some(kind);
            }
        }
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn error(&self) -> Option<EngineErrorKind> {
        self.error
    }

    pub fn source(&self) -> Option<&VideoSource> {
        self.source.as_ref()
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }
}

impl Default for PlaybackCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PlaybackCoordinator {
    fn drop(&mut self) {
        self.release();
    }
}


#[cfg(test)]
mod tests {
    use super::mock::{native_source, MockEngine};
    use super::*;

    #[test]
    fn test_new_coordinator_starts_paused_at_zero() {
        let coordinator = PlaybackCoordinator::new();
        assert!(coordinator.is_paused());
        assert_eq!(coordinator.current_time(), 0.0);
        assert!(coordinator.error().is_none());
    }

    #[test]
    fn test_time_ticks_update_cached_time() {
        let mut coordinator = PlaybackCoordinator::new();
        coordinator.attach(
            native_source(),
            Box::new(MockEngine::with_events(vec![
                EngineEvent::Ready { duration: Some(90.0) },
                EngineEvent::TimeTick(12.5),
            ])),
        );
        coordinator.pump();
        assert_eq!(coordinator.current_time(), 12.5);
        assert_eq!(coordinator.duration(), Some(90.0));
    }

    #[test]
    fn test_refused_resume_forces_paused() {
        let mut coordinator = PlaybackCoordinator::new();
        let mut engine = MockEngine::new();
        engine.refuse_play = true;
        coordinator.attach(native_source(), Box::new(engine));

        coordinator.request_resume();
        assert!(coordinator.is_paused());
    }

    #[test]
    fn test_successful_resume_clears_paused() {
        let mut coordinator = PlaybackCoordinator::new();
        coordinator.attach(native_source(), Box::new(MockEngine::new()));

        coordinator.request_resume();
        assert!(!coordinator.is_paused());
        coordinator.request_pause();
        assert!(coordinator.is_paused());
    }

    #[test]
    fn test_engine_state_change_updates_paused_flag() {
        let mut coordinator = PlaybackCoordinator::new();
        coordinator.attach(native_source(), Box::new(MockEngine::new()));
        coordinator.request_resume();

        // Engine stalled on its own; the coordinator mirrors it.
        coordinator.handle_event(EngineEvent::StateChanged { playing: false });
        assert!(coordinator.is_paused());

        coordinator.handle_event(EngineEvent::StateChanged { playing: true });
        assert!(!coordinator.is_paused());
    }

    #[test]
    fn test_engine_error_forces_paused_and_latches() {
        let mut coordinator = PlaybackCoordinator::new();
        coordinator.attach(native_source(), Box::new(MockEngine::new()));
        coordinator.request_resume();

        coordinator.handle_event(EngineEvent::Error(EngineErrorKind::Network));
        assert!(coordinator.is_paused());
        assert_eq!(coordinator.error(), Some(EngineErrorKind::Network));
    }

    #[test]
    fn test_rebinding_releases_old_engine_and_resets_state() {
        let mut coordinator = PlaybackCoordinator::new();
        let first = MockEngine::new();
        let released = first.released.clone();
        coordinator.attach(native_source(), Box::new(first));
        coordinator.handle_event(EngineEvent::TimeTick(30.0));
        coordinator.handle_event(EngineEvent::Error(EngineErrorKind::NotFound));

        coordinator.attach(native_source(), Box::new(MockEngine::new()));
        assert!(released.get());
        assert_eq!(coordinator.current_time(), 0.0);
        assert!(coordinator.error().is_none());
        assert!(coordinator.is_paused());
    }

    #[test]
    fn test_released_coordinator_keeps_last_known_time() {
        let mut coordinator = PlaybackCoordinator::new();
        coordinator.attach(native_source(), Box::new(MockEngine::new()));
        coordinator.handle_event(EngineEvent::TimeTick(7.25));

        coordinator.release();
        assert_eq!(coordinator.current_time(), 7.25);
        assert!(!coordinator.has_engine());
    }
}
