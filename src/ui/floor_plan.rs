// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Floor-plan workspace UI.
//!
//! The plan view paints the stored image with its pins and opens the
//! description input on click. The pin list sits in a side panel. Anything
//! that touches storage comes back as a [`PlanAction`] for the app to run.

use crate::i18n::Strings;
use crate::models::annotation::Point;
use crate::models::pin_board::{PinBoard, PinMode};
use crate::models::view::WheelStep;
use crate::ui::canvas::wheel_step;
use crate::util::geometry::{fit_size, normalized_to_screen, pointer_to_normalized};

const PIN_RADIUS: f32 = 8.0;
const PIN_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);
const PIN_HOVER_COLOR: egui::Color32 = egui::Color32::from_rgb(245, 158, 11);

#[derive(Debug, Clone, PartialEq)]
pub enum PlanAction {
    Upload,
    DismissError,
    RequestRemove,
    ConfirmRemove,
    CancelRemove,
    ZoomIn,
    ZoomOut,
    ResetView,
    Wheel(WheelStep, egui::Vec2),
    BeginPan(egui::Pos2),
    PanTo(egui::Pos2),
    EndPan,
    /// Click on the plan; the flag tells whether navigation was active.
    RequestPin(Point, egui::Pos2, bool),
    SubmitPin,
    CancelPin,
    StartEdit(usize),
    CommitEdit,
    CancelEdit,
    RequestDelete(usize),
    ConfirmDelete,
    CancelDelete,
    CenterOn(usize),
}

/// Fitted image size and viewport size of the last painted plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanGeometry {
    pub fit: egui::Vec2,
    pub viewport: egui::Vec2,
}

#[derive(Debug, Default)]
pub struct PlanOutput {
    pub actions: Vec<PlanAction>,
    pub hovered: Option<usize>,
    pub geometry: Option<PlanGeometry>,
}

/// Display the plan view with its header, controls and pin input.
pub fn show_plan(
    ui: &mut egui::Ui,
    board: &mut PinBoard,
    texture: Option<(&egui::TextureHandle, (u32, u32))>,
    strings: &Strings,
    loading: bool,
) -> PlanOutput {
    let mut out = PlanOutput::default();

    if let Some(message) = board.error() {
        egui::Frame::none()
            .fill(egui::Color32::from_rgb(254, 226, 226))
            .rounding(4.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(message).color(egui::Color32::from_rgb(153, 27, 27)));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✖").clicked() {
                            out.actions.push(PlanAction::DismissError);
                        }
                    });
                });
            });
        ui.add_space(4.0);
    }

    ui.horizontal(|ui| {
        ui.heading(strings.title);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if board.record().is_some() {
                if ui.add_enabled(!loading, egui::Button::new(strings.remove_floor_plan)).clicked() {
                    out.actions.push(PlanAction::RequestRemove);
                }
                if ui.add_enabled(!loading, egui::Button::new(strings.replace_floor_plan)).clicked() {
                    out.actions.push(PlanAction::Upload);
                }
            }
        });
    });
    ui.separator();

    if board.record().is_none() {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            if loading {
                ui.spinner();
                ui.label(strings.loading);
            } else {
                ui.label(egui::RichText::new(strings.no_floor_plan).weak());
                ui.add_space(10.0);
                if ui.button(format!("⬆ {}", strings.upload_floor_plan)).clicked() {
                    out.actions.push(PlanAction::Upload);
                }
            }
        });
        return out;
    }

    let command = ui.input(|i| i.modifiers.command);

    ui.horizontal(|ui| {
        ui.label(strings.zoom);
        if ui.button("−").on_hover_text(strings.zoom_out).clicked() {
            out.actions.push(PlanAction::ZoomOut);
        }
        ui.label(format!("{}%", board.view().zoom_percent()));
        if ui.button("+").on_hover_text(strings.zoom_in).clicked() {
            out.actions.push(PlanAction::ZoomIn);
        }
        if ui.button(strings.reset_zoom).clicked() {
            out.actions.push(PlanAction::ResetView);
        }
        ui.separator();
        ui.label(strings.navigation);
        if command {
            ui.label(egui::RichText::new(strings.ctrl_active).color(egui::Color32::from_rgb(34, 197, 94)).strong());
        } else {
            ui.label(egui::RichText::new(strings.hold_ctrl_to_zoom_pan).weak());
        }
    });

    let Some((texture, image_px)) = texture else {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            if board.image_unreadable() {
                ui.label(egui::RichText::new(strings.failed_to_process_image).weak());
            } else {
                ui.spinner();
                ui.label(strings.loading);
            }
        });
        return out;
    };

    let footer = 24.0;
    let size = egui::vec2(ui.available_width(), (ui.available_height() - footer).max(100.0));
    let (viewport, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
    let painter = ui.painter_at(viewport);
    painter.rect_filled(viewport, 4.0, egui::Color32::from_gray(235));

    let fit = fit_size(image_px, viewport.size());
    let image_rect = board.view().image_rect(viewport, fit);
    out.geometry = Some(PlanGeometry { fit, viewport: viewport.size() });

    painter.image(
        texture.id(),
        image_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );

    let pointer = ui.input(|i| i.pointer.latest_pos());
    let pressed = response.hovered() && ui.input(|i| i.pointer.primary_pressed());
    let released = ui.input(|i| i.pointer.primary_released());

    // Pins
    let mut plan_hover = None;
    let pin_screens: Vec<egui::Pos2> = board
        .pins()
        .iter()
        .map(|pin| normalized_to_screen(pin.position(), image_rect))
        .collect();
    if response.hovered() && !board.is_panning() {
        if let Some(pos) = pointer {
            plan_hover = pin_screens.iter().position(|p| p.distance(pos) <= PIN_RADIUS + 2.0);
        }
    }
    let highlighted = plan_hover.or(board.hovered());
    for (i, (pin, at)) in board.pins().iter().zip(&pin_screens).enumerate() {
        let hovered = highlighted == Some(i);
        let radius = if hovered { PIN_RADIUS + 3.0 } else { PIN_RADIUS };
        painter.circle(
            *at,
            radius,
            if hovered { PIN_HOVER_COLOR } else { PIN_COLOR },
            egui::Stroke::new(2.0, egui::Color32::WHITE),
        );
        painter.text(
            *at,
            egui::Align2::CENTER_CENTER,
            format!("{}", i + 1),
            egui::FontId::proportional(10.0),
            egui::Color32::WHITE,
        );
        if hovered {
            let label = painter.layout_no_wrap(
                pin.description.clone(),
                egui::FontId::proportional(13.0),
                egui::Color32::WHITE,
            );
            let origin = *at + egui::vec2(-label.size().x / 2.0, -radius - 8.0 - label.size().y);
            let bg = egui::Rect::from_min_size(origin, label.size()).expand(4.0);
            painter.rect_filled(bg, 4.0, egui::Color32::from_black_alpha(200));
            painter.galley(origin, label, egui::Color32::WHITE);
        }
    }
    out.hovered = plan_hover;

    // Navigation
    if board.is_panning() {
        if !command || released {
            out.actions.push(PlanAction::EndPan);
        } else if let Some(pos) = pointer {
            out.actions.push(PlanAction::PanTo(pos));
        }
    } else if command {
        if let (true, Some(pos)) = (pressed, pointer) {
            out.actions.push(PlanAction::BeginPan(pos));
        }
    }
    if command && response.hovered() {
        if let (Some(step), Some(pos)) = (wheel_step(ui), pointer) {
            out.actions.push(PlanAction::Wheel(step, pos - viewport.min));
        }
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            if let Some(index) = plan_hover {
                log::debug!("Pin {} clicked", index + 1);
            } else if image_rect.contains(pos) {
                out.actions.push(PlanAction::RequestPin(pointer_to_normalized(pos, image_rect), pos, command));
            }
        }
    }

    if response.hovered() {
        let icon = if board.is_panning() {
            egui::CursorIcon::Grabbing
        } else if command {
            egui::CursorIcon::Grab
        } else if plan_hover.is_some() {
            egui::CursorIcon::PointingHand
        } else {
            egui::CursorIcon::Crosshair
        };
        ui.ctx().set_cursor_icon(icon);
    }

    if matches!(board.mode(), PinMode::PlacingPin { .. }) {
        show_pin_input(ui.ctx(), board, strings, &mut out.actions);
    }

    ui.label(
        egui::RichText::new(format!("{}  ·  {}", strings.click_to_add_pins, strings.navigation_instructions))
            .small()
            .weak(),
    );

    out
}

/// Floating description input next to the clicked point.
fn show_pin_input(ctx: &egui::Context, board: &mut PinBoard, strings: &Strings, actions: &mut Vec<PlanAction>) {
    let PinMode::PlacingPin { anchor, .. } = board.mode() else {
        return;
    };
    let anchor = *anchor;

    let area = egui::Area::new(egui::Id::new("pin_input"))
        .order(egui::Order::Foreground)
        .fixed_pos(anchor + egui::vec2(10.0, -10.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(strings.enter_pin_description);
                let Some(text) = board.text_mut() else {
                    return;
                };
                let edit = ui.add(
                    egui::TextEdit::singleline(text)
                        .hint_text(strings.placeholder)
                        .desired_width(220.0),
                );
                if !edit.has_focus() && !edit.lost_focus() {
                    edit.request_focus();
                }
                let has_text = !text.trim().is_empty();
                if edit.lost_focus() {
                    if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        actions.push(PlanAction::SubmitPin);
                    } else if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                        actions.push(PlanAction::CancelPin);
                    }
                }
                ui.horizontal(|ui| {
                    if ui.button(strings.cancel).clicked() {
                        actions.push(PlanAction::CancelPin);
                    }
                    if ui.add_enabled(has_text, egui::Button::new(strings.add_pin)).clicked() {
                        actions.push(PlanAction::SubmitPin);
                    }
                });
            });
        });

    let outside = ctx.input(|i| {
        i.pointer.primary_pressed()
            && i.pointer
                .interact_pos()
                .is_some_and(|pos| !area.response.rect.contains(pos))
    });
    if outside {
        actions.push(PlanAction::CancelPin);
    }
}

/// Sidebar listing every pin with edit, delete and center-on buttons.
pub fn show_pin_list(ui: &mut egui::Ui, board: &mut PinBoard, strings: &Strings) -> PlanOutput {
    let mut out = PlanOutput::default();
    let pins = board.pins().to_vec();

    ui.heading(format!("{} ({})", strings.pins, pins.len()));
    ui.separator();

    if pins.is_empty() {
        ui.label(egui::RichText::new(strings.no_pins_added).weak());
        return out;
    }

    let editing = match board.mode() {
        PinMode::EditingPin { index, .. } => Some(*index),
        _ => None,
    };
    let hovered = board.hovered();

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (i, pin) in pins.iter().enumerate() {
            let mut frame = egui::Frame::group(ui.style());
            if hovered == Some(i) {
                frame = frame.fill(ui.visuals().selection.bg_fill.gamma_multiply(0.3));
            }
            let row = frame.show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(format!("{} {}", strings.pin, i + 1)).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("🗑").on_hover_text(strings.delete).clicked() {
                            out.actions.push(PlanAction::RequestDelete(i));
                        }
                        if editing != Some(i) && ui.small_button("✏").on_hover_text(strings.edit).clicked() {
                            out.actions.push(PlanAction::StartEdit(i));
                        }
                    });
                });

                if editing == Some(i) {
                    if let Some(text) = board.text_mut() {
                        let edit = ui.add(egui::TextEdit::singleline(text).desired_width(f32::INFINITY));
                        if !edit.has_focus() && !edit.lost_focus() {
                            edit.request_focus();
                        }
                        if edit.lost_focus() {
                            if ui.input(|input| input.key_pressed(egui::Key::Escape)) {
                                out.actions.push(PlanAction::CancelEdit);
                            } else {
                                out.actions.push(PlanAction::CommitEdit);
                            }
                        }
                    }
                } else {
                    ui.label(&pin.description);
                }

                ui.label(
                    egui::RichText::new(format!(
                        "{}: ({:.1}%, {:.1}%)",
                        strings.position,
                        pin.x * 100.0,
                        pin.y * 100.0
                    ))
                    .small()
                    .weak(),
                );
            });

            let response = row.response.interact(egui::Sense::click());
            if response.hovered() {
                out.hovered = Some(i);
            }
            if response.clicked() && editing != Some(i) {
                out.actions.push(PlanAction::CenterOn(i));
            }
        }
    });

    out
}

/// Confirmation dialogs for pin deletion and plan removal.
pub fn show_dialogs(ctx: &egui::Context, board: &PinBoard, strings: &Strings) -> Vec<PlanAction> {
    let mut actions = Vec::new();

    let (title, message, yes, no) = match board.mode() {
        PinMode::ConfirmDeletePin { index } => {
            let description = board.pins().get(*index).map(|p| p.description.as_str()).unwrap_or_default();
            (
                strings.delete,
                format!("{} \"{}\"", strings.confirm_delete_pin, description),
                PlanAction::ConfirmDelete,
                PlanAction::CancelDelete,
            )
        }
        PinMode::ConfirmRemovePlan => (
            strings.remove_floor_plan,
            strings.confirm_remove_floor_plan.to_string(),
            PlanAction::ConfirmRemove,
            PlanAction::CancelRemove,
        ),
        _ => return actions,
    };

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(message);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button(strings.yes).clicked() {
                    actions.push(yes.clone());
                }
                if ui.button(strings.no).clicked() {
                    actions.push(no.clone());
                }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        actions.push(no);
    }

    actions
}
