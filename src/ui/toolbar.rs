// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor toolbar.
//!
//! Image loading, crop controls, zoom and undo/redo, followed by a hint for
//! the current interaction mode.

use crate::i18n::Strings;
use crate::models::editor::{EditorState, Mode, PresetSize, PRESET_SIZES};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarAction {
    None,
    OpenImage,
    StartCrop,
    ConfirmCrop,
    CancelCrop,
    SetTargetSize(Option<PresetSize>),
    ZoomIn,
    ZoomOut,
    ResetZoom,
    Undo,
    Redo,
}

/// Display the toolbar and return the button that was used, if any.
pub fn show(ui: &mut egui::Ui, editor: &EditorState, strings: &Strings, loading: bool) -> ToolbarAction {
    let mut action = ToolbarAction::None;
    let has_image = editor.image().is_some();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.add_enabled(!loading, egui::Button::new(strings.open_image)).clicked() {
            action = ToolbarAction::OpenImage;
        }

        ui.separator();

        if editor.is_crop_active() {
            if ui.button(format!("✔ {}", strings.confirm_crop)).clicked() {
                action = ToolbarAction::ConfirmCrop;
            }
            if ui.button(format!("✖ {}", strings.cancel_crop)).clicked() {
                action = ToolbarAction::CancelCrop;
            }

            ui.label(strings.output_size);
            let selected = editor.target_size();
            let selected_text = selected.map(|p| p.label()).unwrap_or_else(|| strings.crop_native.to_string());
            egui::ComboBox::from_id_source("target_size")
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    if ui.selectable_label(selected.is_none(), strings.crop_native).clicked() {
                        action = ToolbarAction::SetTargetSize(None);
                    }
                    for preset in PRESET_SIZES {
                        if ui.selectable_label(selected == Some(preset), preset.label()).clicked() {
                            action = ToolbarAction::SetTargetSize(Some(preset));
                        }
                    }
                });
            if let Some((w, h)) = editor.crop_output_size() {
                ui.label(egui::RichText::new(format!("→ {}×{}", w, h)).weak());
            }
        } else if ui
            .add_enabled(has_image && !loading, egui::Button::new(format!("✂ {}", strings.crop_resize)))
            .clicked()
        {
            action = ToolbarAction::StartCrop;
        }

        ui.separator();

        if ui.add_enabled(has_image, egui::Button::new("−")).on_hover_text(strings.zoom_out).clicked() {
            action = ToolbarAction::ZoomOut;
        }
        ui.label(format!("{}%", editor.active_view().zoom_percent()));
        if ui.add_enabled(has_image, egui::Button::new("+")).on_hover_text(strings.zoom_in).clicked() {
            action = ToolbarAction::ZoomIn;
        }
        if ui.add_enabled(has_image, egui::Button::new(strings.reset_zoom)).clicked() {
            action = ToolbarAction::ResetZoom;
        }

        ui.separator();

        if ui.add_enabled(editor.can_undo(), egui::Button::new("⟲")).on_hover_text(strings.undo).clicked() {
            action = ToolbarAction::Undo;
        }
        if ui.add_enabled(editor.can_redo(), egui::Button::new("⟳")).on_hover_text(strings.redo).clicked() {
            action = ToolbarAction::Redo;
        }

        ui.separator();

        let hint = if loading {
            strings.loading_image
        } else {
            mode_hint(editor.mode(), strings)
        };
        ui.label(egui::RichText::new(hint).italics().weak());
    });

    action
}

fn mode_hint(mode: &Mode, strings: &Strings) -> &'static str {
    match mode {
        Mode::Idle | Mode::PanningView { .. } => strings.hint_idle,
        Mode::Drawing { .. } => strings.hint_drawing,
        Mode::EditingRect { .. } => strings.hint_editing,
        Mode::PositioningCrop { .. } | Mode::DraggingCrop { .. } => strings.hint_crop,
    }
}
