// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Planmark - rectangle coordinate extraction and floor-plan pins
//!
//! A cross-platform desktop application for marking rectangular regions on
//! images and for placing labeled pins on per-resource floor plans.

mod app;
mod config;
mod i18n;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::PlanmarkApp;
use config::Settings;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let settings = Settings::load_or_default();
    log::info!(
        "Starting with resource {:?} (organization {})",
        settings.resource_id,
        settings.organization_id
    );

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Planmark"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Planmark",
        options,
        Box::new(|_cc| Ok(Box::new(PlanmarkApp::new(settings)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
