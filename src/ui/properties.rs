// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Rectangle list panel.
//!
//! Lists every rectangle with its normalized and pixel coordinates and
//! offers edit and delete buttons.

use crate::i18n::Strings;
use crate::models::annotation::RectId;
use crate::models::editor::EditorState;

/// Action requested from the properties panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertiesAction {
    None,
    ToggleEdit(RectId),
    Delete(RectId),
}

pub fn show(ui: &mut egui::Ui, editor: &EditorState, strings: &Strings) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading(format!("{} ({})", strings.rectangles, editor.rectangles().len()));
    ui.separator();

    let Some(image) = editor.image() else {
        ui.label(egui::RichText::new(strings.no_image).weak());
        return action;
    };

    if editor.rectangles().is_empty() {
        ui.label(egui::RichText::new(strings.no_rectangles).weak());
        return action;
    }

    let locked = editor.is_crop_active();
    egui::ScrollArea::vertical().show(ui, |ui| {
        for (i, rect) in editor.rectangles().iter().enumerate() {
            let editing = editor.is_editing(rect.id);
            let b = rect.bounds;
            let (px, py, pw, ph) = b.to_pixels(image.width(), image.height());

            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    let title = egui::RichText::new(format!("{} {}", strings.rectangle, i + 1)).strong();
                    ui.label(if editing { title.color(egui::Color32::from_rgb(251, 146, 60)) } else { title });

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.add_enabled(!locked, egui::Button::new("🗑")).on_hover_text(strings.delete).clicked() {
                            action = PropertiesAction::Delete(rect.id);
                        }
                        let label = if editing { strings.done } else { strings.edit };
                        if ui.add_enabled(!locked, egui::SelectableLabel::new(editing, label)).clicked() {
                            action = PropertiesAction::ToggleEdit(rect.id);
                        }
                    });
                });

                ui.label(
                    egui::RichText::new(format!(
                        "x {:.3}  y {:.3}  w {:.3}  h {:.3}",
                        b.x, b.y, b.width, b.height
                    ))
                    .monospace()
                    .small(),
                );
                ui.label(
                    egui::RichText::new(format!("{:.0}, {:.0}  {:.0}×{:.0} px", px, py, pw, ph))
                        .monospace()
                        .small()
                        .weak(),
                );
            });
        }
    });

    action
}
