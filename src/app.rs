// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait, owning the playback coordinator, the annotation
//! session, and the record collection, and routing all UI actions
//! through one place.

use crate::io::{export, subtitles};
use crate::models::annotation::Annotation;
use crate::models::collection::AnnotationCollection;
use crate::models::session::AnnotationSession;
use crate::playback::coordinator::PlaybackCoordinator;
use crate::playback::source::VideoSource;
use crate::ui::annotation_list::{self, EditState};
use crate::ui::{composer, player};
use uuid::Uuid;

/// History system for undo/redo functionality.
struct History {
    /// Undo stack (past states)
    undo_stack: Vec<Vec<Annotation>>,
    /// Redo stack (future states after undo)
    redo_stack: Vec<Vec<Annotation>>,
    /// Maximum history size
    max_size: usize,
}

impl History {
    fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size: 50, // Keep last 50 states
        }
    }

    /// Save current state before making a change
    fn push(&mut self, records: Vec<Annotation>) {
        self.undo_stack.push(records);
        // Limit history size
        if self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
        // Clear redo stack when new action is performed
        self.redo_stack.clear();
    }

    /// Undo: restore previous state
    fn undo(&mut self, current: Vec<Annotation>) -> Option<Vec<Annotation>> {
        if let Some(previous) = self.undo_stack.pop() {
            self.redo_stack.push(current);
            Some(previous)
        } else {
            None
        }
    }

    /// Redo: restore next state
    fn redo(&mut self, current: Vec<Annotation>) -> Option<Vec<Annotation>> {
        if let Some(next) = self.redo_stack.pop() {
            self.undo_stack.push(current);
            Some(next)
        } else {
            None
        }
    }

    /// Check if undo is available
    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

/// Main application state.
pub struct VqatApp {
    /// Playback state mirror and engine binding
    playback: PlaybackCoordinator,

    /// Idle/composing annotation workflow
    session: AnnotationSession,

    /// The live annotation records
    collection: AnnotationCollection,

    /// History for undo/redo
    history: History,

    /// Source reference being typed into the toolbar
    source_input: String,

    /// Id of the currently selected annotation
    selected_annotation: Option<Uuid>,

    /// In-flight edit of an existing record
    edit: Option<EditState>,

    /// Validation message for the composer form
    composer_error: Option<String>,

    /// Validation message for the inline edit form
    edit_error: Option<String>,

    /// Transient status line (export results, rejections, ...)
    status_message: Option<String>,

    /// Loaded subtitle track, if any
    subtitle_track: Option<subtitles::SubtitleTrack>,
}

impl Default for VqatApp {
    fn default() -> Self {
        Self::new()
    }
}

impl VqatApp {
    /// Create a new VQAT application instance.
    pub fn new() -> Self {
        Self {
            playback: PlaybackCoordinator::new(),
            session: AnnotationSession::new(),
            collection: AnnotationCollection::new(),
            history: History::new(),
            source_input: String::new(),
            selected_annotation: None,
            edit: None,
            composer_error: None,
            edit_error: None,
            status_message: None,
            subtitle_track: None,
        }
    }

    /// Save the record list to history before making a change
    fn save_to_history(&mut self) {
        self.history.push(self.collection.snapshot());
    }

    /// Resolve and bind the typed source reference.
    fn load_source(&mut self) {
        match VideoSource::resolve(&self.source_input) {
            Some(source) => {
                log::info!("Loading source: {}", source.label());
                self.playback.bind(source);
                self.status_message = None;
            }
            None => {
                self.status_message = Some("Enter a video URL or hosted-video id".to_string());
            }
        }
    }

    /// Delete the record with the given id, saving history first.
    fn delete_annotation(&mut self, id: Uuid) {
        self.save_to_history();
        if !self.collection.delete(id) {
            // Nothing was removed; drop the useless history entry.
            self.history.undo_stack.pop();
        }
        if self.selected_annotation == Some(id) {
            self.selected_annotation = None;
        }
        if self.edit.as_ref().is_some_and(|e| e.id == id) {
            self.edit = None;
        }
    }

    fn undo(&mut self) {
        let current = self.collection.snapshot();
        if let Some(previous) = self.history.undo(current) {
            self.collection.restore(previous);
            self.selected_annotation = None;
            self.edit = None;
            log::info!("Undo");
        }
    }

    fn redo(&mut self) {
        let current = self.collection.snapshot();
        if let Some(next) = self.history.redo(current) {
            self.collection.restore(next);
            self.selected_annotation = None;
            self.edit = None;
            log::info!("Redo");
        }
    }

    /// Export the collection to a JSON file chosen by the user.
    fn export_annotations(&mut self) {
        let default_name = export::default_file_name(chrono::Local::now());
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(default_name)
            .save_file()
        else {
            return;
        };

        let video_url = self
            .playback
            .source()
            .map(VideoSource::reference)
            .unwrap_or_default();
        let document = export::ExportDocument::new(video_url, self.collection.records());
        match export::write_json(&document, &path) {
            Ok(()) => {
                log::info!("Exported {} annotations to {}", document.total_annotations, path.display());
                self.status_message = Some(format!(
                    "Exported {} annotations to {}",
                    document.total_annotations,
                    path.display()
                ));
            }
            Err(e) => {
                log::error!("Failed to export annotations: {}", e);
                self.status_message = Some(format!("Export failed: {}", e));
            }
        }
    }

    /// Load a subtitle file chosen by the user.
    fn load_subtitles(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Subtitles", &["srt", "vtt"])
            .pick_file()
        else {
            return;
        };

        match subtitles::load_track(&path) {
            Ok(track) => {
                self.status_message = Some(format!(
                    "Loaded subtitles: {} ({} cues)",
                    track.file_name,
                    track.cue_count()
                ));
                // A new upload supersedes the previous track.
                self.subtitle_track = Some(track);
            }
            Err(e) => {
                log::warn!("Rejected subtitle file: {}", e);
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Escape hatch for engine failures: put the external URL on the
    /// clipboard so the user can open the source outside the app.
    fn copy_external_url(&mut self, ctx: &egui::Context) {
        if let Some(source) = self.playback.source() {
            let url = source.external_url();
            ctx.output_mut(|o| o.copied_text = url.clone());
            self.status_message = Some(format!("Copied {} to clipboard", url));
        }
    }

    fn handle_composer_action(&mut self, action: composer::ComposerAction) {
        match action {
            composer::ComposerAction::Start => {
                self.session.start(&mut self.playback);
                self.composer_error = None;
            }
            composer::ComposerAction::Commit => {
                let snapshot = self.collection.snapshot();
                match self.session.commit(&mut self.playback, &mut self.collection) {
                    Ok(id) => {
                        self.history.push(snapshot);
                        self.composer_error = None;
                        self.selected_annotation = Some(id);
                    }
                    Err(e) => {
                        // Stay composing; the user corrects the draft.
                        self.composer_error = Some(e.to_string());
                    }
                }
            }
            composer::ComposerAction::None => {}
        }
    }

    fn handle_list_action(&mut self, action: annotation_list::ListAction) {
        match action {
            annotation_list::ListAction::Select(id) => {
                self.selected_annotation = Some(id);
            }
            annotation_list::ListAction::Delete(id) => {
                self.delete_annotation(id);
            }
            annotation_list::ListAction::BeginEdit(id) => {
                if let Some(record) = self.collection.get(id) {
                    self.edit = Some(EditState {
                        id,
                        draft: record.draft(),
                    });
                    self.edit_error = None;
                }
            }
            annotation_list::ListAction::SaveEdit => {
                if let Some(edit) = self.edit.take() {
                    self.save_to_history();
                    match self.collection.update(edit.id, edit.draft.clone()) {
                        Ok(()) => {
                            self.edit_error = None;
                        }
                        Err(e) => {
                            // Keep the form open with the draft intact.
                            self.history.undo_stack.pop();
                            self.edit_error = Some(e.to_string());
                            self.edit = Some(edit);
                        }
                    }
                }
            }
            annotation_list::ListAction::CancelEdit => {
                self.edit = None;
                self.edit_error = None;
            }
            annotation_list::ListAction::None => {}
        }
    }

    fn handle_player_action(&mut self, ctx: &egui::Context, action: player::PlayerAction) {
        match action {
            player::PlayerAction::TogglePlayback => {
                if self.playback.is_paused() {
                    self.playback.request_resume();
                } else {
                    self.playback.request_pause();
                }
            }
            player::PlayerAction::Seek(time) => {
                self.playback.seek(time);
            }
            player::PlayerAction::OpenExternally => {
                self.copy_external_url(ctx);
            }
            player::PlayerAction::None => {}
        }
    }
}

impl eframe::App for VqatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Drain engine events for this frame.
        self.playback.pump();

        // Keep repainting while playing so the timecode advances.
        if !self.playback.is_paused() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Load Subtitles...").clicked() {
                        self.load_subtitles();
                        ui.close_menu();
                    }
                    let can_export = !self.collection.is_empty();
                    if ui
                        .add_enabled(can_export, egui::Button::new("Export Annotations..."))
                        .clicked()
                    {
                        self.export_annotations();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    let can_undo = self.history.can_undo();
                    if ui.add_enabled(can_undo, egui::Button::new("Undo (Ctrl+Z)")).clicked() {
                        self.undo();
                        ui.close_menu();
                    }

                    let can_redo = self.history.can_redo();
                    if ui
                        .add_enabled(can_redo, egui::Button::new("Redo (Ctrl+Shift+Z)"))
                        .clicked()
                    {
                        self.redo();
                        ui.close_menu();
                    }

                    ui.separator();

                    let has_selection = self.selected_annotation.is_some();
                    if ui
                        .add_enabled(has_selection, egui::Button::new("Delete Selected"))
                        .clicked()
                    {
                        if let Some(id) = self.selected_annotation {
                            self.delete_annotation(id);
                        }
                        ui.close_menu();
                    }
                });
            });
        });

        // Source toolbar
        egui::TopBottomPanel::top("source_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Video:");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.source_input)
                        .desired_width(360.0)
                        .hint_text("Video URL or 11-character hosted id"),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Load").clicked() || submitted {
                    self.load_source();
                }
                if let Some(track) = &self.subtitle_track {
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!(
                            "Subtitles: {} ({} cues)",
                            track.file_name,
                            track.cue_count()
                        ))
                        .weak(),
                    );
                }
            });
        });

        // Status line
        if let Some(message) = self.status_message.clone() {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(message);
                    if ui.small_button("✕").clicked() {
                        self.status_message = None;
                    }
                });
            });
        }

        // Annotation list (right side)
        let list_action = egui::SidePanel::right("annotations")
            .default_width(300.0)
            .show(ctx, |ui| {
                annotation_list::show(
                    ui,
                    &self.collection,
                    self.selected_annotation,
                    &mut self.edit,
                    self.edit_error.as_deref(),
                )
            })
            .inner;
        self.handle_list_action(list_action);

        // Handle keyboard events
        // Only process if no text field is focused (to avoid deleting while editing)
        if !ctx.wants_keyboard_input() {
            if ctx.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace))
            {
                if let Some(id) = self.selected_annotation {
                    self.delete_annotation(id);
                }
            }

            // Handle undo (Ctrl+Z)
            if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift)
            {
                self.undo();
            }

            // Handle redo (Ctrl+Shift+Z or Ctrl+Y)
            if ctx.input(|i| {
                (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
                    || (i.modifiers.command && i.key_pressed(egui::Key::Y))
            }) {
                self.redo();
            }
        }

        // Player and composer (center)
        let (player_action, composer_action) = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let player_action = player::show(ui, &self.playback);
                ui.add_space(12.0);
                ui.separator();
                let composer_action = composer::show(
                    ui,
                    &mut self.session,
                    self.playback.current_time(),
                    self.playback.has_engine(),
                    self.composer_error.as_deref(),
                );
                (player_action, composer_action)
            })
            .inner;

        self.handle_player_action(ctx, player_action);
        self.handle_composer_action(composer_action);
    }
}
