// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the core record type for timestamped question
//! annotations and the validation applied at construction time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default feedback window shown after answering, in seconds.
pub const DEFAULT_FEEDBACK_DURATION: f64 = 5.0;

/// Category of annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Comprehension,
    Discussion,
}

impl AnnotationKind {
    /// Human-readable label for UI display.
    pub fn label(&self) -> &'static str {
        match self {
            AnnotationKind::Comprehension => "Comprehension",
            AnnotationKind::Discussion => "Discussion",
        }
    }
}

/// Validation failure when constructing or replacing an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("question must not be empty")]
    EmptyQuestion,
}

/// User-editable fields of an annotation, without id or timestamp.
///
/// Used both as the composing-session draft and as the replacement
/// payload when editing an existing record.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationDraft {
    pub kind: AnnotationKind,
    pub question: String,
    pub requirements: String,
    pub feedback_duration: f64,
}

impl Default for AnnotationDraft {
    fn default() -> Self {
        Self {
            kind: AnnotationKind::Comprehension,
            question: String::new(),
            requirements: String::new(),
            feedback_duration: DEFAULT_FEEDBACK_DURATION,
        }
    }
}

/// A timestamped question annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: Uuid,
    pub timestamp: f64,
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
    pub question: String,
    pub requirements: String,
    #[serde(rename = "feedbackDuration")]
    pub feedback_duration: f64,
}

impl Annotation {
    /// Construct a new annotation with a fresh id.
    ///
    /// Rejects construction if the trimmed question is empty; negative
    /// numeric fields are clamped to zero.
    pub fn new(timestamp: f64, draft: AnnotationDraft) -> Result<Self, ValidationError> {
        if draft.question.trim().is_empty() {
            return Err(ValidationError::EmptyQuestion);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            timestamp: timestamp.max(0.0),
            kind: draft.kind,
            question: draft.question,
            requirements: draft.requirements,
            feedback_duration: draft.feedback_duration.max(0.0),
        })
    }

    /// The editable fields of this record, for pre-filling an edit form.
    pub fn draft(&self) -> AnnotationDraft {
        AnnotationDraft {
            kind: self.kind,
            question: self.question.clone(),
            requirements: self.requirements.clone(),
            feedback_duration: self.feedback_duration,
        }
    }
}
