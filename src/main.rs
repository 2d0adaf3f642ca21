// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! VQAT - Video Question Annotation Tool
//!
//! A cross-platform desktop application for annotating videos with
//! timestamped questions and exporting the result as JSON.

mod app;
mod io;
mod models;
mod playback;
mod ui;
mod util;

use anyhow::Result;
use app::VqatApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("VQAT - Video Question Annotation Tool"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "VQAT",
        options,
        Box::new(|_cc| Ok(Box::new(VqatApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
