// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation list panel.
//!
//! This module renders the side panel listing all records in
//! collection order, with selection, deletion, and an inline edit
//! form.

use crate::models::annotation::{AnnotationDraft, AnnotationKind};
use crate::models::collection::AnnotationCollection;
use crate::util::timecode::format_timecode;
use uuid::Uuid;

/// In-flight edit of one record, held by the app between frames.
pub struct EditState {
    pub id: Uuid,
    pub draft: AnnotationDraft,
}

/// Result of list panel interaction.
pub enum ListAction {
    None,
    Select(Uuid),
    Delete(Uuid),
    BeginEdit(Uuid),
    SaveEdit,
    CancelEdit,
}

/// Display the annotation list and handle row interactions.
pub fn show(
    ui: &mut egui::Ui,
    collection: &AnnotationCollection,
    selected: Option<Uuid>,
    edit: &mut Option<EditState>,
    edit_error: Option<&str>,
) -> ListAction {
    let mut action = ListAction::None;

    ui.heading(format!("Annotations ({})", collection.len()));
    ui.separator();

    if collection.is_empty() {
        ui.label(egui::RichText::new("No annotations yet").italics().weak());
        return action;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for annotation in collection.records() {
            if let Some(edit_state) = edit.as_mut().filter(|e| e.id == annotation.id) {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "Editing @ {}",
                            format_timecode(annotation.timestamp)
                        ))
                        .strong(),
                    );
                    ui.horizontal(|ui| {
                        for kind in [AnnotationKind::Comprehension, AnnotationKind::Discussion] {
                            ui.radio_value(&mut edit_state.draft.kind, kind, kind.label());
                        }
                    });
                    ui.add(
                        egui::TextEdit::multiline(&mut edit_state.draft.question)
                            .desired_rows(2)
                            .hint_text("Question (required)"),
                    );
                    ui.add(
                        egui::TextEdit::multiline(&mut edit_state.draft.requirements)
                            .desired_rows(2)
                            .hint_text("Requirements"),
                    );
                    ui.horizontal(|ui| {
                        ui.label("Feedback:");
                        ui.add(
                            egui::DragValue::new(&mut edit_state.draft.feedback_duration)
                                .speed(0.5)
                                .range(0.0..=600.0)
                                .suffix(" s"),
                        );
                    });
                    if let Some(message) = edit_error {
                        ui.colored_label(egui::Color32::LIGHT_RED, message);
                    }
                    ui.horizontal(|ui| {
                        if ui.button("Save").clicked() {
                            action = ListAction::SaveEdit;
                        }
                        if ui.button("Cancel").clicked() {
                            action = ListAction::CancelEdit;
                        }
                    });
                });
                ui.separator();
                continue;
            }

            let is_selected = selected == Some(annotation.id);
            let row_text = format!(
                "{}  [{}]  {}",
                format_timecode(annotation.timestamp),
                annotation.kind.label(),
                truncate(&annotation.question, 40)
            );
            ui.horizontal(|ui| {
                if ui.selectable_label(is_selected, row_text).clicked() {
                    action = ListAction::Select(annotation.id);
                }
            });
            ui.horizontal(|ui| {
                if ui.small_button("Edit").clicked() {
                    action = ListAction::BeginEdit(annotation.id);
                }
                if ui.small_button("Delete").clicked() {
                    action = ListAction::Delete(annotation.id);
                }
            });
            ui.separator();
        }
    });

    action
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}…", cut.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate("short", 40), "short");
    }

    #[test]
    fn test_truncate_cuts_on_char_boundary() {
        let long = "What color is the car in the opening scene of the film?";
        let out = truncate(long, 10);
        assert!(out.ends_with('…'));
        assert!(out.chars().count() <= 11);
    }
}
