// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Export document projection and JSON emission.
//!
//! Exporting is a pure projection of the live collection: record ids
//! are internal and are not written out.

use crate::models::annotation::{Annotation, AnnotationKind};
use anyhow::Result;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One exported annotation, without its internal id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub timestamp: f64,
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
    pub question: String,
    pub requirements: String,
    pub feedback_duration: f64,
}

impl From<&Annotation> for ExportRecord {
    fn from(annotation: &Annotation) -> Self {
        Self {
            timestamp: annotation.timestamp,
            kind: annotation.kind,
            question: annotation.question.clone(),
            requirements: annotation.requirements.clone(),
            feedback_duration: annotation.feedback_duration,
        }
    }
}

/// The serialized snapshot of all current annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub video_url: String,
    pub total_annotations: usize,
    pub annotations: Vec<ExportRecord>,
}

impl ExportDocument {
    /// Project the given records, in collection order.
    pub fn new(video_url: String, records: &[Annotation]) -> Self {
        Self {
            video_url,
            total_annotations: records.len(),
            annotations: records.iter().map(ExportRecord::from).collect(),
        }
    }
}

/// Write the export document as pretty-printed JSON.
pub fn write_json(document: &ExportDocument, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Default export file name. Includes the creation timestamp so
/// repeated exports do not collide.
pub fn default_file_name(now: DateTime<Local>) -> String {
    format!("annotations-{}.json", now.format("%Y%m%d-%H%M%S"))
}
