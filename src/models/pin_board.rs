// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Floor-plan pin board state.
//!
//! Holds the floor plan of one resource and the interaction mode of the
//! pin tool. Every mutation saves the whole record through a
//! [`FloorPlanRepository`]; on failure the previous record stays in place
//! and a localized message is put in the error banner.

use super::annotation::Point;
use super::floor_plan::{FloorPlanRecord, Pin};
use super::view::{ViewTransform, WheelStep};
use crate::i18n::{Language, Strings};
use crate::io::repository::{FloorPlanRepository, RepositoryError};

/// Zoom factor of the floor-plan zoom buttons.
const BUTTON_ZOOM_STEP: f32 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub enum PinMode {
    Browsing,
    /// Floating description input opened by a click on the plan.
    PlacingPin { at: Point, anchor: egui::Pos2, text: String },
    EditingPin { index: usize, text: String },
    ConfirmDeletePin { index: usize },
    ConfirmRemovePlan,
    Panning { grab: egui::Vec2 },
}

pub struct PinBoard {
    organization_id: u64,
    resource_id: String,
    record: Option<FloorPlanRecord>,
    /// Bumped whenever the stored image changes or goes away.
    image_generation: u64,
    /// Image generation whose data URL could not be decoded.
    failed_generation: Option<u64>,
    view: ViewTransform,
    mode: PinMode,
    hovered: Option<usize>,
    error: Option<String>,
    language: Language,
}

impl PinBoard {
    pub fn new(organization_id: u64, resource_id: impl Into<String>, language: Language) -> Self {
        Self {
            organization_id,
            resource_id: resource_id.into(),
            record: None,
            image_generation: 0,
            failed_generation: None,
            view: ViewTransform::default(),
            mode: PinMode::Browsing,
            hovered: None,
            error: None,
            language,
        }
    }

    fn strings(&self) -> &'static Strings {
        self.language.strings()
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    pub fn record(&self) -> Option<&FloorPlanRecord> {
        self.record.as_ref()
    }

    pub fn pins(&self) -> &[Pin] {
        self.record.as_ref().map(|r| r.pins.as_slice()).unwrap_or(&[])
    }

    pub fn image_generation(&self) -> u64 {
        self.image_generation
    }

    /// The current plan image failed to decode and will not arrive.
    pub fn image_unreadable(&self) -> bool {
        self.record.is_some() && self.failed_generation == Some(self.image_generation)
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn mode(&self) -> &PinMode {
        &self.mode
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.mode, PinMode::Panning { .. })
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn set_hovered(&mut self, index: Option<usize>) {
        self.hovered = index;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Text buffer of the open pin input or inline editor, if any.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match &mut self.mode {
            PinMode::PlacingPin { text, .. } | PinMode::EditingPin { text, .. } => Some(text),
            _ => None,
        }
    }

    fn report(&mut self, err: &RepositoryError, fallback: &str, use_backend_message: bool) {
        log::error!("Floor plan {}: {} ({})", self.resource_id, fallback, err);
        let message = match err.user_message() {
            Some(message) if use_backend_message => message.to_string(),
            _ => fallback.to_string(),
        };
        self.error = Some(message);
    }

    fn set_record(&mut self, record: Option<FloorPlanRecord>) {
        let image_changed = self.record.as_ref().map(|r| &r.image_base64) != record.as_ref().map(|r| &r.image_base64);
        if image_changed {
            self.image_generation += 1;
        }
        self.record = record;
    }

    /// Switch to another resource; the caller should `load` afterwards.
    pub fn set_resource(&mut self, organization_id: u64, resource_id: impl Into<String>) {
        self.organization_id = organization_id;
        self.resource_id = resource_id.into();
        self.set_record(None);
        self.view.reset();
        self.mode = PinMode::Browsing;
        self.hovered = None;
        self.error = None;
    }

    pub fn load(&mut self, repo: &dyn FloorPlanRepository) {
        self.error = None;
        match repo.load(&self.resource_id) {
            Ok(record) => {
                log::info!(
                    "Floor plan {}: {}",
                    self.resource_id,
                    match &record {
                        Some(r) => format!("{} pins", r.pins.len()),
                        None => "none stored".to_string(),
                    }
                );
                self.set_record(record);
            }
            Err(e) => self.report(&e, self.strings().failed_to_load_floor_plan, true),
        }
    }

    /// Store a new image for this resource with an empty pin list.
    pub fn upload(&mut self, repo: &dyn FloorPlanRepository, data_url: String) {
        self.error = None;
        let record = FloorPlanRecord::new(data_url);
        match repo.save(self.organization_id, &self.resource_id, &record) {
            Ok(saved) => {
                log::info!("{}", self.strings().floor_plan_uploaded);
                self.set_record(Some(saved));
                self.view.reset();
                self.mode = PinMode::Browsing;
                self.hovered = None;
            }
            Err(e) => self.report(&e, self.strings().failed_to_save_floor_plan, true),
        }
    }

    /// The picked file could not be read or encoded.
    pub fn upload_failed(&mut self, err: &anyhow::Error) {
        log::error!("Error uploading floor plan: {:#}", err);
        self.error = Some(self.strings().failed_to_process_image.to_string());
    }

    /// The stored image could not be decoded for display.
    pub fn image_failed(&mut self, err: &anyhow::Error) {
        log::error!("Failed to decode floor plan image: {:#}", err);
        self.failed_generation = Some(self.image_generation);
        self.error = Some(self.strings().unexpected_error.to_string());
    }

    /// Open the pin input for a click at `at`; ignored while navigating.
    pub fn request_pin(&mut self, at: Point, anchor: egui::Pos2, navigating: bool) {
        if self.record.is_none() || navigating || self.is_panning() {
            return;
        }
        log::debug!("Click coordinates: ({:.4}, {:.4})", at.x, at.y);
        self.mode = PinMode::PlacingPin {
            at,
            anchor,
            text: String::new(),
        };
    }

    pub fn submit_pin(&mut self, repo: &dyn FloorPlanRepository) {
        let PinMode::PlacingPin { at, text, .. } = &self.mode else {
            return;
        };
        let description = text.trim().to_string();
        let at = *at;
        let Some(record) = &self.record else {
            return;
        };
        if description.is_empty() {
            return;
        }

        let mut pins = record.pins.clone();
        pins.push(Pin::new(at, description.clone()));
        let updated = record.with_pins(pins);

        match repo.save(self.organization_id, &self.resource_id, &updated) {
            Ok(saved) => {
                log::info!("{} ({:.4}, {:.4}) {:?}", self.strings().pin_added, at.x, at.y, description);
                self.set_record(Some(saved));
            }
            Err(e) => self.report(&e, self.strings().failed_to_save_pin, false),
        }
        self.mode = PinMode::Browsing;
    }

    pub fn cancel_pin(&mut self) {
        if matches!(self.mode, PinMode::PlacingPin { .. }) {
            self.mode = PinMode::Browsing;
        }
    }

    pub fn start_edit(&mut self, index: usize) {
        if let Some(pin) = self.pins().get(index) {
            self.mode = PinMode::EditingPin {
                index,
                text: pin.description.clone(),
            };
        }
    }

    /// Save the inline edit; the editor stays open if the save fails.
    pub fn commit_edit(&mut self, repo: &dyn FloorPlanRepository) {
        let PinMode::EditingPin { index, text } = &self.mode else {
            return;
        };
        let (index, description) = (*index, text.trim().to_string());
        let Some(record) = &self.record else {
            return;
        };
        if description.is_empty() || index >= record.pins.len() {
            return;
        }

        let pins = record
            .pins
            .iter()
            .enumerate()
            .map(|(i, pin)| {
                if i == index {
                    Pin {
                        description: description.clone(),
                        ..pin.clone()
                    }
                } else {
                    pin.clone()
                }
            })
            .collect();
        let updated = record.with_pins(pins);

        match repo.save(self.organization_id, &self.resource_id, &updated) {
            Ok(saved) => {
                log::info!("{} #{} {:?}", self.strings().pin_edited, index, description);
                self.set_record(Some(saved));
                self.mode = PinMode::Browsing;
            }
            Err(e) => self.report(&e, self.strings().failed_to_edit_pin, false),
        }
    }

    pub fn cancel_edit(&mut self) {
        if matches!(self.mode, PinMode::EditingPin { .. }) {
            self.mode = PinMode::Browsing;
        }
    }

    pub fn request_delete(&mut self, index: usize) {
        if index < self.pins().len() {
            self.mode = PinMode::ConfirmDeletePin { index };
        }
    }

    pub fn confirm_delete(&mut self, repo: &dyn FloorPlanRepository) {
        let PinMode::ConfirmDeletePin { index } = self.mode else {
            return;
        };
        self.mode = PinMode::Browsing;
        let Some(record) = &self.record else {
            return;
        };

        let pins = record
            .pins
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, pin)| pin.clone())
            .collect();
        let updated = record.with_pins(pins);

        match repo.save(self.organization_id, &self.resource_id, &updated) {
            Ok(saved) => {
                log::info!("{}", self.strings().pin_deleted);
                self.set_record(Some(saved));
                if self.hovered == Some(index) {
                    self.hovered = None;
                }
            }
            Err(e) => self.report(&e, self.strings().failed_to_delete_pin, false),
        }
    }

    pub fn cancel_delete(&mut self) {
        if matches!(self.mode, PinMode::ConfirmDeletePin { .. }) {
            self.mode = PinMode::Browsing;
        }
    }

    pub fn request_remove(&mut self) {
        if self.record.is_some() {
            self.mode = PinMode::ConfirmRemovePlan;
        }
    }

    pub fn confirm_remove(&mut self, repo: &dyn FloorPlanRepository) {
        if self.mode != PinMode::ConfirmRemovePlan {
            return;
        }
        self.mode = PinMode::Browsing;
        match repo.delete(&self.resource_id) {
            Ok(()) => {
                log::info!("Floor plan {} removed", self.resource_id);
                self.set_record(None);
                self.view.reset();
                self.hovered = None;
            }
            Err(e) => self.report(&e, self.strings().failed_to_remove_floor_plan, false),
        }
    }

    pub fn cancel_remove(&mut self) {
        if self.mode == PinMode::ConfirmRemovePlan {
            self.mode = PinMode::Browsing;
        }
    }

    /// Reset zoom and pan so pin `index` sits at the viewport center.
    pub fn center_on_pin(&mut self, index: usize, fit_size: egui::Vec2, viewport_size: egui::Vec2) {
        if let Some(pin) = self.pins().get(index) {
            let at = pin.position();
            self.view.center_on(at, fit_size, viewport_size);
        }
    }

    pub fn wheel(&mut self, step: WheelStep, cursor: egui::Vec2) {
        if self.record.is_some() {
            self.view.wheel(step, cursor);
        }
    }

    pub fn zoom_in(&mut self) {
        self.view.zoom_by(BUTTON_ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.view.zoom_by(1.0 / BUTTON_ZOOM_STEP);
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
    }

    pub fn begin_pan(&mut self, pointer: egui::Pos2) {
        if self.record.is_some() && self.mode == PinMode::Browsing {
            self.mode = PinMode::Panning {
                grab: self.view.begin_drag(pointer),
            };
        }
    }

    pub fn pan_to(&mut self, pointer: egui::Pos2) {
        if let PinMode::Panning { grab } = self.mode {
            self.view.drag_to(pointer, grab);
        }
    }

    pub fn end_pan(&mut self) {
        if self.is_panning() {
            self.mode = PinMode::Browsing;
        }
    }
}
