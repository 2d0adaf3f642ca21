// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The ordered annotation collection.
//!
//! This module manages the live set of annotation records: appending,
//! deleting, and editing records while keeping insertion order and
//! unique ids.

use super::annotation::{Annotation, AnnotationDraft, ValidationError};
use uuid::Uuid;

/// Failure when replacing an existing record's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UpdateError {
    #[error("no annotation with that id exists")]
    NotFound,
    #[error("question must not be empty")]
    EmptyQuestion,
}

/// Ordered collection of annotation records.
///
/// Records keep insertion order; nothing reorders them implicitly.
#[derive(Debug, Clone, Default)]
pub struct AnnotationCollection {
    records: Vec<Annotation>,
}

impl AnnotationCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Annotation] {
        &self.records
    }

    pub fn get(&self, id: Uuid) -> Option<&Annotation> {
        self.records.iter().find(|a| a.id == id)
    }

    /// Validate and append a new record to the end of the collection.
    pub fn append(
        &mut self,
        timestamp: f64,
        draft: AnnotationDraft,
    ) -> Result<Uuid, ValidationError> {
        let annotation = Annotation::new(timestamp, draft)?;
        let id = annotation.id;
        self.records.push(annotation);
        log::info!("Added annotation at {:.3}s, total: {}", timestamp, self.records.len());
        Ok(id)
    }

    /// Remove the record with the given id. Returns whether a record was
    /// removed; deleting an absent id is a no-op, not an error.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.records.len();
        self.records.retain(|a| a.id != id);
        let removed = self.records.len() < before;
        if removed {
            log::info!("Deleted annotation {}, total: {}", id, self.records.len());
        }
        removed
    }

    /// Replace all editable fields of the matching record.
    ///
    /// The record's id and timestamp are preserved; annotations stay
    /// anchored to the moment they were authored.
    pub fn update(&mut self, id: Uuid, replacement: AnnotationDraft) -> Result<(), UpdateError> {
        if replacement.question.trim().is_empty() {
            return Err(UpdateError::EmptyQuestion);
        }
        let record = self
            .records
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(UpdateError::NotFound)?;
        record.kind = replacement.kind;
        record.question = replacement.question;
        record.requirements = replacement.requirements;
        record.feedback_duration = replacement.feedback_duration.max(0.0);
        log::info!("Updated annotation {}", id);
        Ok(())
    }

    /// Snapshot of all records, for the undo/redo history.
    pub fn snapshot(&self) -> Vec<Annotation> {
        self.records.clone()
    }

    /// Replace the full record list, restoring a history snapshot.
    pub fn restore(&mut self, records: Vec<Annotation>) {
        self.records = records;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::AnnotationKind;

    fn draft(question: &str) -> AnnotationDraft {
        AnnotationDraft {
            question: question.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut collection = AnnotationCollection::new();
        collection.append(5.0, draft("first")).unwrap();
        collection.append(2.0, draft("second")).unwrap();
        collection.append(9.0, draft("third")).unwrap();

        let questions: Vec<_> = collection.records().iter().map(|a| a.question.as_str()).collect();
        assert_eq!(questions, ["first", "second", "third"]);
    }

    #[test]
    fn test_append_rejects_empty_question() {
        let mut collection = AnnotationCollection::new();
        assert!(collection.append(1.0, draft("  ")).is_err());
        assert_eq!(collection.len(), 0);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut collection = AnnotationCollection::new();
        let id = collection.append(1.0, draft("q")).unwrap();

        assert!(collection.delete(id));
        assert!(!collection.delete(id));
        assert_eq!(collection.len(), 0);
    }

    #[test]
    fn test_update_replaces_fields_but_preserves_id_and_timestamp() {
        let mut collection = AnnotationCollection::new();
        let id = collection.append(12.5, draft("original")).unwrap();

        let replacement = AnnotationDraft {
            kind: AnnotationKind::Discussion,
            question: "revised".to_string(),
            requirements: "cite a scene".to_string(),
            feedback_duration: 8.0,
        };
        collection.update(id, replacement).unwrap();

        assert_eq!(collection.len(), 1);
        let record = collection.get(id).unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.timestamp, 12.5);
        assert_eq!(record.kind, AnnotationKind::Discussion);
        assert_eq!(record.question, "revised");
        assert_eq!(record.requirements, "cite a scene");
        assert_eq!(record.feedback_duration, 8.0);
    }

    #[test]
    fn test_update_rejects_empty_question_without_changes() {
        let mut collection = AnnotationCollection::new();
        let id = collection.append(3.0, draft("keep me")).unwrap();

        assert_eq!(
            collection.update(id, draft(" ")),
            Err(UpdateError::EmptyQuestion)
        );
        assert_eq!(collection.get(id).unwrap().question, "keep me");
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut collection = AnnotationCollection::new();
        assert_eq!(
            collection.update(Uuid::new_v4(), draft("q")),
            Err(UpdateError::NotFound)
        );
    }

    #[test]
    fn test_snapshot_restore_roundtrip() {
        let mut collection = AnnotationCollection::new();
        collection.append(1.0, draft("a")).unwrap();
        let saved = collection.snapshot();
        collection.append(2.0, draft("b")).unwrap();

        collection.restore(saved);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.records()[0].question, "a");
    }
}
