// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for the image editor.
//!
//! This module paints the working image under the current pan/zoom, the
//! rectangles, the in-progress rectangle and the crop box, and turns pointer
//! input into [`CanvasAction`]s for the editor state.

use crate::i18n::Strings;
use crate::models::annotation::{Bounds, Handle, Point};
use crate::models::editor::EditorState;
use crate::models::view::WheelStep;
use crate::util::geometry::{bounds_to_screen, fit_size, normalized_to_screen, pointer_to_normalized};

const RECT_COLOR: egui::Color32 = egui::Color32::from_rgb(74, 222, 128);
const EDIT_COLOR: egui::Color32 = egui::Color32::from_rgb(251, 146, 60);
const PENDING_COLOR: egui::Color32 = egui::Color32::LIGHT_BLUE;
const HANDLE_SIZE: f32 = 8.0;

/// Result of canvas interaction, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasAction {
    Press(Point),
    Move(Point),
    Release,
    Click(Point),
    BeginPan(egui::Pos2),
    PanTo(egui::Pos2),
    EndPan,
    Wheel(WheelStep, egui::Vec2),
}

/// Wheel notch for this frame while the navigation modifier is held.
pub fn wheel_step(ui: &egui::Ui) -> Option<WheelStep> {
    ui.input(|i| {
        let zoom = i.zoom_delta();
        if zoom > 1.0 {
            Some(WheelStep::In)
        } else if zoom < 1.0 {
            Some(WheelStep::Out)
        } else if i.raw_scroll_delta.y > 0.0 {
            Some(WheelStep::In)
        } else if i.raw_scroll_delta.y < 0.0 {
            Some(WheelStep::Out)
        } else {
            None
        }
    })
}

/// Display the editor canvas and handle mouse interactions.
pub fn show(
    ui: &mut egui::Ui,
    editor: &EditorState,
    texture: Option<&egui::TextureHandle>,
    strings: &Strings,
) -> Vec<CanvasAction> {
    let mut actions = Vec::new();
    let (viewport, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
    let painter = ui.painter_at(viewport);
    painter.rect_filled(viewport, 0.0, egui::Color32::from_gray(24));

    let (Some(image), Some(texture)) = (editor.image(), texture) else {
        painter.text(
            viewport.center(),
            egui::Align2::CENTER_CENTER,
            strings.no_image,
            egui::FontId::proportional(16.0),
            egui::Color32::from_gray(170),
        );
        return actions;
    };

    let fit = fit_size(image.size(), viewport.size());
    let image_rect = editor.active_view().image_rect(viewport, fit);

    painter.image(
        texture.id(),
        image_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );

    // Pointer handling
    let command = ui.input(|i| i.modifiers.command);
    let pointer = ui.input(|i| i.pointer.latest_pos());
    let pressed = response.hovered() && ui.input(|i| i.pointer.primary_pressed());
    let released = ui.input(|i| i.pointer.primary_released());

    if editor.is_panning() {
        if !command || released {
            actions.push(CanvasAction::EndPan);
        } else if let Some(pos) = pointer {
            actions.push(CanvasAction::PanTo(pos));
        }
    } else if command {
        if let (true, Some(pos)) = (pressed, pointer) {
            actions.push(CanvasAction::BeginPan(pos));
        }
    } else {
        if let (true, Some(pos)) = (pressed, pointer) {
            actions.push(CanvasAction::Press(pointer_to_normalized(pos, image_rect)));
        }
        if response.hovered() || response.dragged() {
            if let Some(pos) = pointer {
                actions.push(CanvasAction::Move(pointer_to_normalized(pos, image_rect)));
            }
        }
        if released {
            actions.push(CanvasAction::Release);
        }
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if image_rect.contains(pos) {
                    actions.push(CanvasAction::Click(pointer_to_normalized(pos, image_rect)));
                }
            }
        }
    }

    if command && response.hovered() {
        if let (Some(step), Some(pos)) = (wheel_step(ui), pointer) {
            actions.push(CanvasAction::Wheel(step, pos - viewport.min));
        }
    }

    if response.hovered() {
        let icon = if editor.is_panning() {
            egui::CursorIcon::Grabbing
        } else if command {
            egui::CursorIcon::Grab
        } else {
            egui::CursorIcon::Crosshair
        };
        ui.ctx().set_cursor_icon(icon);
    }

    // Overlays
    if let Some(crop) = editor.crop_box() {
        draw_crop(&painter, &crop.0, image_rect);
    } else {
        for (i, rect) in editor.rectangles().iter().enumerate() {
            let editing = editor.is_editing(rect.id);
            let color = if editing { EDIT_COLOR } else { RECT_COLOR };
            let screen = bounds_to_screen(&rect.bounds, image_rect);
            painter.rect_filled(screen, 0.0, color.gamma_multiply(0.12));
            painter.rect_stroke(screen, 0.0, egui::Stroke::new(2.0, color));
            painter.text(
                screen.left_top() + egui::vec2(4.0, 2.0),
                egui::Align2::LEFT_TOP,
                format!("{}", i + 1),
                egui::FontId::monospace(12.0),
                color,
            );
            if editing {
                draw_handles(&painter, &rect.bounds, image_rect, color);
            }
        }
        if let Some(pending) = editor.pending_rect() {
            let screen = bounds_to_screen(&pending, image_rect);
            painter.rect_stroke(screen, 0.0, egui::Stroke::new(1.5, PENDING_COLOR));
        }
    }

    actions
}

fn draw_handles(painter: &egui::Painter, bounds: &Bounds, image_rect: egui::Rect, color: egui::Color32) {
    for handle in Handle::ALL {
        let corner = normalized_to_screen(bounds.corner(handle), image_rect);
        let square = egui::Rect::from_center_size(corner, egui::vec2(HANDLE_SIZE, HANDLE_SIZE));
        painter.rect_filled(square, 1.0, egui::Color32::WHITE);
        painter.rect_stroke(square, 1.0, egui::Stroke::new(1.0, color));
    }
}

/// Dim everything outside the crop box and outline it.
fn draw_crop(painter: &egui::Painter, crop: &Bounds, image_rect: egui::Rect) {
    let inner = bounds_to_screen(crop, image_rect);
    let shade = egui::Color32::from_black_alpha(150);
    let bands = [
        egui::Rect::from_min_max(image_rect.min, egui::pos2(image_rect.max.x, inner.min.y)),
        egui::Rect::from_min_max(egui::pos2(image_rect.min.x, inner.max.y), image_rect.max),
        egui::Rect::from_min_max(egui::pos2(image_rect.min.x, inner.min.y), egui::pos2(inner.min.x, inner.max.y)),
        egui::Rect::from_min_max(egui::pos2(inner.max.x, inner.min.y), egui::pos2(image_rect.max.x, inner.max.y)),
    ];
    for band in bands {
        painter.rect_filled(band, 0.0, shade);
    }
    painter.rect_stroke(inner, 0.0, egui::Stroke::new(2.0, egui::Color32::WHITE));

    // Rule-of-thirds guides
    let guide = egui::Stroke::new(1.0, egui::Color32::from_white_alpha(90));
    for t in [1.0 / 3.0, 2.0 / 3.0] {
        let x = inner.min.x + inner.width() * t;
        let y = inner.min.y + inner.height() * t;
        painter.line_segment([egui::pos2(x, inner.min.y), egui::pos2(x, inner.max.y)], guide);
        painter.line_segment([egui::pos2(inner.min.x, y), egui::pos2(inner.max.x, y)], guide);
    }
    draw_handles(painter, crop, image_rect, egui::Color32::WHITE);
}
