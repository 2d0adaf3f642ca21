// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation composer form.
//!
//! This module renders the entry workflow: an idle prompt to start a
//! new annotation, and the draft form while the session is composing.

use crate::models::annotation::AnnotationKind;
use crate::models::session::AnnotationSession;
use crate::util::timecode::format_timecode;

/// Result of composer interaction.
pub enum ComposerAction {
    None,
    Start,
    Commit,
}

/// Display the composer and handle form interactions.
pub fn show(
    ui: &mut egui::Ui,
    session: &mut AnnotationSession,
    current_time: f64,
    can_start: bool,
    error: Option<&str>,
) -> ComposerAction {
    let mut action = ComposerAction::None;

    if !session.is_composing() {
        ui.horizontal(|ui| {
            let label = format!("➕ New annotation at {}", format_timecode(current_time));
            if ui.add_enabled(can_start, egui::Button::new(label)).clicked() {
                action = ComposerAction::Start;
            }
            if !can_start {
                ui.label(egui::RichText::new("load a video first").italics().weak());
            }
        });
        return action;
    }

    ui.heading("New Annotation");
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        ui.label("Type:");
        for kind in [AnnotationKind::Comprehension, AnnotationKind::Discussion] {
            ui.radio_value(&mut session.draft.kind, kind, kind.label());
        }
    });

    ui.label("Question:");
    ui.add(
        egui::TextEdit::multiline(&mut session.draft.question)
            .desired_rows(2)
            .hint_text("Required"),
    );

    ui.label("Requirements:");
    ui.add(
        egui::TextEdit::multiline(&mut session.draft.requirements)
            .desired_rows(2)
            .hint_text("Optional guidance for the answer"),
    );

    ui.horizontal(|ui| {
        ui.label("Feedback duration:");
        ui.add(
            egui::DragValue::new(&mut session.draft.feedback_duration)
                .speed(0.5)
                .range(0.0..=600.0)
                .suffix(" s"),
        );
    });

    ui.horizontal(|ui| {
        let mut manual = session.timestamp_override.is_some();
        if ui.checkbox(&mut manual, "Set timestamp manually").changed() {
            session.timestamp_override = manual.then_some(current_time);
        }
        match session.timestamp_override.as_mut() {
            Some(timestamp) => {
                ui.add(
                    egui::DragValue::new(timestamp)
                        .speed(0.5)
                        .range(0.0..=f64::MAX)
                        .suffix(" s"),
                );
            }
            None => {
                ui.label(
                    egui::RichText::new(format!(
                        "will record at {}",
                        format_timecode(current_time)
                    ))
                    .weak(),
                );
            }
        }
    });

    if let Some(message) = error {
        ui.colored_label(egui::Color32::LIGHT_RED, message);
    }

    ui.add_space(4.0);
    if ui.button("Save annotation").clicked() {
        action = ComposerAction::Commit;
    }

    action
}
