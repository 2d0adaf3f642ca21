// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation session state machine.
//!
//! A session is either idle or composing one annotation. Starting a
//! session freezes playback so the draft references a fixed moment;
//! committing appends the record and resumes playback so the user does
//! not have to unpause by hand after every entry.

use super::annotation::AnnotationDraft;
use super::collection::AnnotationCollection;
use crate::playback::coordinator::PlaybackCoordinator;
use uuid::Uuid;

/// Session workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Composing,
}

/// Failure when finalizing a composing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    #[error("no annotation is being composed")]
    NotComposing,
    #[error("question must not be empty")]
    EmptyQuestion,
}

/// The two-state annotation workflow layered on the coordinator.
#[derive(Debug)]
pub struct AnnotationSession {
    state: SessionState,
    /// Draft fields being edited while composing. Local to the session
    /// and discarded on commit.
    pub draft: AnnotationDraft,
    /// User-supplied timestamp override. When unset, commit records the
    /// coordinator's current time.
    pub timestamp_override: Option<f64>,
}

impl AnnotationSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            draft: AnnotationDraft::default(),
            timestamp_override: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_composing(&self) -> bool {
        self.state == SessionState::Composing
    }

    /// Begin composing a new annotation.
    ///
    /// Legal only from idle; returns false (and does nothing) while
    /// already composing. Forces playback to pause and clears any stale
    /// draft fields.
    pub fn start(&mut self, playback: &mut PlaybackCoordinator) -> bool {
        if self.state != SessionState::Idle {
            return false;
        }
        playback.request_pause();
        self.draft = AnnotationDraft::default();
        self.timestamp_override = None;
        self.state = SessionState::Composing;
        log::info!("Composing annotation at {:.3}s", playback.current_time());
        true
    }

    /// Finalize the draft into a new record.
    ///
    /// On validation failure the session stays composing with the draft
    /// intact so the user can correct it. On success the record lands
    /// at the end of the collection, the draft is discarded, playback
    /// resumes, and the session returns to idle.
    pub fn commit(
        &mut self,
        playback: &mut PlaybackCoordinator,
        collection: &mut AnnotationCollection,
    ) -> Result<Uuid, CommitError> {
        if self.state != SessionState::Composing {
            return Err(CommitError::NotComposing);
        }
        let timestamp = self
            .timestamp_override
            .unwrap_or_else(|| playback.current_time());
        let id = collection
            .append(timestamp, self.draft.clone())
            .map_err(|_| CommitError::EmptyQuestion)?;
        self.draft = AnnotationDraft::default();
        self.timestamp_override = None;
        self.state = SessionState::Idle;
        playback.request_resume();
        Ok(id)
    }
}

impl Default for AnnotationSession {
    fn default() -> Self {
        Self::new()
    }
}
