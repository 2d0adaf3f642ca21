// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback panel.
//!
//! This module renders the transport controls for the bound source:
//! play/pause, seeking, the current timecode, and the error banner
//! with its open-externally escape hatch.

use crate::playback::coordinator::PlaybackCoordinator;
use crate::util::timecode::format_timecode;

/// Result of player panel interaction.
pub enum PlayerAction {
    None,
    TogglePlayback,
    Seek(f64),
    OpenExternally,
}

/// Display the playback panel and handle transport interactions.
pub fn show(ui: &mut egui::Ui, playback: &PlaybackCoordinator) -> PlayerAction {
    let mut action = PlayerAction::None;

    let Some(source) = playback.source() else {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(
                egui::RichText::new("Load a video URL or hosted-video id to begin")
                    .italics()
                    .weak(),
            );
        });
        return action;
    };

    ui.label(egui::RichText::new(source.label()).strong());

    // Engine failure banner with the escape hatch.
    if let Some(kind) = playback.error() {
        ui.add_space(4.0);
        egui::Frame::none()
            .fill(egui::Color32::from_rgb(60, 30, 30))
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new(format!("Playback failed: {}", kind))
                        .color(egui::Color32::LIGHT_RED),
                );
                ui.label("Playback stays paused. You can open the video outside VQAT:");
                if ui.button("Copy video URL").clicked() {
                    action = PlayerAction::OpenExternally;
                }
            });
        return action;
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        let toggle_label = if playback.is_paused() { "▶ Play" } else { "⏸ Pause" };
        if ui.button(toggle_label).clicked() {
            action = PlayerAction::TogglePlayback;
        }

        ui.label(
            egui::RichText::new(format_timecode(playback.current_time()))
                .monospace()
                .size(16.0),
        );
        if let Some(duration) = playback.duration() {
            ui.label(
                egui::RichText::new(format!("/ {}", format_timecode(duration))).weak(),
            );
        }
    });

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.label("Seek:");
        let mut position = playback.current_time();
        let seek_widget = match playback.duration() {
            Some(duration) => {
                ui.add(egui::Slider::new(&mut position, 0.0..=duration).show_value(false))
            }
            // Duration unknown for this source; seek by absolute seconds.
            None => ui.add(
                egui::DragValue::new(&mut position)
                    .speed(1.0)
                    .range(0.0..=f64::MAX)
                    .suffix(" s"),
            ),
        };
        if seek_widget.changed() {
            action = PlayerAction::Seek(position);
        }
    });

    action
}
