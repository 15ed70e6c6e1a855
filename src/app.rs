// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module owns the two workspaces (image editor and floor plan), the
//! background loaders feeding them and the floor-plan repository, and routes
//! UI actions to the models.

use crate::config::Settings;
use crate::i18n::{Language, Strings};
use crate::io::loader::BackgroundLoader;
use crate::io::media::{self, LoadedImage};
use crate::io::repository::{FloorPlanRepository, JsonFileRepository, MemoryRepository};
use crate::io::serialization::{self, RectangleExport};
use crate::models::editor::EditorState;
use crate::models::pin_board::PinBoard;
use crate::ui::{canvas, floor_plan, properties, toolbar};
use std::path::PathBuf;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "webp", "tiff", "tif"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workspace {
    ImageEditor,
    FloorPlan,
}

/// GPU texture for one image generation.
struct Texture {
    generation: u64,
    handle: egui::TextureHandle,
    size: (u32, u32),
}

/// Main application state.
pub struct PlanmarkApp {
    settings: Settings,
    workspace: Workspace,

    editor: EditorState,
    editor_texture: Option<Texture>,
    editor_loader: BackgroundLoader<LoadedImage>,

    board: PinBoard,
    repository: Box<dyn FloorPlanRepository>,
    plan_texture: Option<Texture>,
    plan_decoder: BackgroundLoader<LoadedImage>,
    /// Plan image generation handed to the decoder.
    plan_requested: u64,
    plan_upload: BackgroundLoader<String>,
    plan_geometry: Option<floor_plan::PlanGeometry>,
    resource_input: String,
}

impl PlanmarkApp {
    pub fn new(settings: Settings) -> Self {
        let repository: Box<dyn FloorPlanRepository> = match settings.floor_plan_dir() {
            Some(dir) => {
                let repository = JsonFileRepository::new(dir);
                log::info!("Floor plans stored in {}", repository.dir().display());
                Box::new(repository)
            }
            None => {
                log::warn!("No data directory available, floor plans are kept in memory");
                Box::new(MemoryRepository::new())
            }
        };

        let mut board = PinBoard::new(settings.organization_id, settings.resource_id.clone(), settings.language);
        board.load(repository.as_ref());

        Self {
            workspace: Workspace::ImageEditor,
            editor: EditorState::new(),
            editor_texture: None,
            editor_loader: BackgroundLoader::new(),
            board,
            repository,
            plan_texture: None,
            plan_decoder: BackgroundLoader::new(),
            plan_requested: 0,
            plan_upload: BackgroundLoader::new(),
            plan_geometry: None,
            resource_input: settings.resource_id.clone(),
            settings,
        }
    }

    fn strings(&self) -> &'static Strings {
        self.settings.language.strings()
    }

    fn set_language(&mut self, language: Language) {
        if self.settings.language == language {
            return;
        }
        self.settings.language = language;
        self.board.set_language(language);
        if let Err(e) = self.settings.save() {
            log::warn!("Failed to save settings: {:#}", e);
        }
        log::info!("Language set to {}", language.label());
    }

    fn is_loading(&self) -> bool {
        self.editor_loader.is_pending() || self.plan_decoder.is_pending() || self.plan_upload.is_pending()
    }

    /// Load an image file for the editor (asynchronously).
    fn open_image(&mut self) {
        if let Some(path) = rfd::FileDialog::new().add_filter("Images", IMAGE_EXTENSIONS).pick_file() {
            let id = self.editor_loader.request(move || {
                let image = media::load_image(&path)?;
                log::info!("Loaded image: {} ({}x{})", path.display(), image.width(), image.height());
                Ok(image)
            });
            log::debug!("Image load request #{}", id.0);
        }
    }

    /// Read a floor-plan image into a data URL (asynchronously).
    fn pick_floor_plan(&mut self) {
        if let Some(path) = rfd::FileDialog::new().add_filter("Images", IMAGE_EXTENSIONS).pick_file() {
            self.plan_upload.request(move || media::file_to_data_url(&path));
        }
    }

    /// Switch the floor plan workspace to the resource typed in the bar.
    fn open_resource(&mut self) {
        let resource_id = self.resource_input.trim().to_string();
        if resource_id.is_empty() || resource_id == self.board.resource_id() {
            return;
        }
        self.board.set_resource(self.settings.organization_id, resource_id.clone());
        self.board.load(self.repository.as_ref());
        if self.board.error().is_none() {
            self.settings.resource_id = resource_id;
            if let Err(e) = self.settings.save() {
                log::warn!("Failed to save settings: {:#}", e);
            }
        }
    }

    /// Export rectangles to a file.
    fn export_rectangles(&self, path: PathBuf) {
        let Some(image) = self.editor.image() else {
            return;
        };
        let data = RectangleExport::new(self.editor.rectangles(), image.width(), image.height());
        match serialization::export(&data, &path) {
            Ok(()) => log::info!("Exported {} rectangles to {}", data.rectangles.len(), path.display()),
            Err(e) => log::error!("Failed to export rectangles: {:#}", e),
        }
    }

    fn poll_loaders(&mut self, ctx: &egui::Context) {
        if let Some(result) = self.editor_loader.poll() {
            match result {
                Ok(image) => {
                    self.editor.set_image(image);
                    self.editor.set_target_size(self.settings.default_preset);
                }
                Err(e) => log::error!("Failed to load image: {:#}", e),
            }
        }

        if let Some(result) = self.plan_upload.poll() {
            match result {
                Ok(data_url) => self.board.upload(self.repository.as_ref(), data_url),
                Err(e) => self.board.upload_failed(&e),
            }
        }

        // A new or removed plan image invalidates the texture
        let generation = self.board.image_generation();
        if generation != self.plan_requested {
            self.plan_requested = generation;
            self.plan_texture = None;
            match self.board.record() {
                Some(record) => {
                    let data_url = record.image_base64.clone();
                    self.plan_decoder.request(move || media::decode_data_url(&data_url));
                }
                None => self.plan_decoder.cancel(),
            }
        }

        if let Some(result) = self.plan_decoder.poll() {
            match result {
                Ok(image) => {
                    self.plan_texture = Some(Texture {
                        generation: self.plan_requested,
                        handle: ctx.load_texture("floor_plan", image.color_image(), egui::TextureOptions::LINEAR),
                        size: image.size(),
                    });
                }
                Err(e) => self.board.image_failed(&e),
            }
        }

        let generation = self.editor.image_generation();
        if self.editor_texture.as_ref().map(|t| t.generation) != Some(generation) {
            self.editor_texture = self.editor.image().map(|image| Texture {
                generation,
                handle: ctx.load_texture("editor_image", image.color_image(), egui::TextureOptions::LINEAR),
                size: image.size(),
            });
        }
    }

    fn handle_toolbar(&mut self, action: toolbar::ToolbarAction) {
        use toolbar::ToolbarAction;
        match action {
            ToolbarAction::OpenImage => self.open_image(),
            ToolbarAction::StartCrop => {
                if self.editor.start_crop() {
                    log::info!("Crop mode started");
                }
            }
            ToolbarAction::ConfirmCrop => {
                if let Err(e) = self.editor.confirm_crop() {
                    log::error!("Failed to crop image: {:#}", e);
                }
            }
            ToolbarAction::CancelCrop => self.editor.cancel_crop(),
            ToolbarAction::SetTargetSize(target) => self.editor.set_target_size(target),
            ToolbarAction::ZoomIn => self.editor.zoom_in(),
            ToolbarAction::ZoomOut => self.editor.zoom_out(),
            ToolbarAction::ResetZoom => self.editor.reset_zoom(),
            ToolbarAction::Undo => self.editor.undo(),
            ToolbarAction::Redo => self.editor.redo(),
            ToolbarAction::None => {}
        }
    }

    fn handle_canvas(&mut self, actions: Vec<canvas::CanvasAction>) {
        use canvas::CanvasAction;
        for action in actions {
            match action {
                CanvasAction::Press(point) => self.editor.press(point),
                CanvasAction::Move(point) => self.editor.pointer_moved(point),
                CanvasAction::Release => self.editor.release(),
                CanvasAction::Click(point) => self.editor.click(point),
                CanvasAction::BeginPan(pos) => self.editor.begin_pan(pos),
                CanvasAction::PanTo(pos) => self.editor.pan_to(pos),
                CanvasAction::EndPan => self.editor.end_pan(),
                CanvasAction::Wheel(step, cursor) => self.editor.wheel(step, cursor),
            }
        }
    }

    fn handle_plan(&mut self, actions: Vec<floor_plan::PlanAction>) {
        use floor_plan::PlanAction;
        for action in actions {
            let repo = self.repository.as_ref();
            match action {
                PlanAction::Upload => self.pick_floor_plan(),
                PlanAction::DismissError => self.board.dismiss_error(),
                PlanAction::RequestRemove => self.board.request_remove(),
                PlanAction::ConfirmRemove => self.board.confirm_remove(repo),
                PlanAction::CancelRemove => self.board.cancel_remove(),
                PlanAction::ZoomIn => self.board.zoom_in(),
                PlanAction::ZoomOut => self.board.zoom_out(),
                PlanAction::ResetView => self.board.reset_view(),
                PlanAction::Wheel(step, cursor) => self.board.wheel(step, cursor),
                PlanAction::BeginPan(pos) => self.board.begin_pan(pos),
                PlanAction::PanTo(pos) => self.board.pan_to(pos),
                PlanAction::EndPan => self.board.end_pan(),
                PlanAction::RequestPin(at, anchor, navigating) => self.board.request_pin(at, anchor, navigating),
                PlanAction::SubmitPin => self.board.submit_pin(repo),
                PlanAction::CancelPin => self.board.cancel_pin(),
                PlanAction::StartEdit(index) => self.board.start_edit(index),
                PlanAction::CommitEdit => self.board.commit_edit(repo),
                PlanAction::CancelEdit => self.board.cancel_edit(),
                PlanAction::RequestDelete(index) => self.board.request_delete(index),
                PlanAction::ConfirmDelete => self.board.confirm_delete(repo),
                PlanAction::CancelDelete => self.board.cancel_delete(),
                PlanAction::CenterOn(index) => {
                    if let Some(geometry) = self.plan_geometry {
                        self.board.center_on_pin(index, geometry.fit, geometry.viewport);
                    }
                }
            }
        }
    }

    fn handle_editor_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.editor.escape();
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace)) {
            if let Some(id) = self.editor.editing_id() {
                self.editor.delete_rect(id);
            }
        }

        // Handle undo (Ctrl+Z)
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z) && !i.modifiers.shift) {
            self.editor.undo();
        }

        // Handle redo (Ctrl+Shift+Z or Ctrl+Y)
        if ctx.input(|i| {
            (i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::Z))
                || (i.modifiers.command && i.key_pressed(egui::Key::Y))
        }) {
            self.editor.redo();
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let strings = self.strings();
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button(strings.open_image).clicked() {
                    self.workspace = Workspace::ImageEditor;
                    self.open_image();
                    ui.close_menu();
                }
                if ui.button(format!("{}...", strings.upload_floor_plan)).clicked() {
                    self.workspace = Workspace::FloorPlan;
                    self.pick_floor_plan();
                    ui.close_menu();
                }
                ui.separator();
                let can_export = self.editor.image().is_some();
                if ui.add_enabled(can_export, egui::Button::new(strings.export_yaml)).clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("YAML", &["yaml", "yml"])
                        .set_file_name("rectangles.yaml")
                        .save_file()
                    {
                        self.export_rectangles(path);
                    }
                    ui.close_menu();
                }
                if ui.add_enabled(can_export, egui::Button::new(strings.export_json)).clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("JSON", &["json"])
                        .set_file_name("rectangles.json")
                        .save_file()
                    {
                        self.export_rectangles(path);
                    }
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui
                    .add_enabled(self.editor.can_undo(), egui::Button::new(format!("{} (Ctrl+Z)", strings.undo)))
                    .clicked()
                {
                    self.editor.undo();
                    ui.close_menu();
                }
                if ui
                    .add_enabled(self.editor.can_redo(), egui::Button::new(format!("{} (Ctrl+Shift+Z)", strings.redo)))
                    .clicked()
                {
                    self.editor.redo();
                    ui.close_menu();
                }
            });

            ui.menu_button(strings.language, |ui| {
                for language in Language::ALL {
                    if ui.radio(self.settings.language == language, language.label()).clicked() {
                        self.set_language(language);
                        ui.close_menu();
                    }
                }
            });
        });
    }

    fn editor_workspace(&mut self, ctx: &egui::Context) {
        let strings = self.strings();
        let loading = self.editor_loader.is_pending();

        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, &self.editor, strings, loading))
            .inner;
        self.handle_toolbar(toolbar_action);

        let properties_action = egui::SidePanel::right("properties")
            .default_width(260.0)
            .show(ctx, |ui| properties::show(ui, &self.editor, strings))
            .inner;
        match properties_action {
            properties::PropertiesAction::ToggleEdit(id) => self.editor.toggle_edit(id),
            properties::PropertiesAction::Delete(id) => self.editor.delete_rect(id),
            properties::PropertiesAction::None => {}
        }

        self.handle_editor_keys(ctx);

        let canvas_actions = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if loading && self.editor.image().is_none() {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(egui::RichText::new(strings.loading_image).size(16.0));
                        });
                    });
                    Vec::new()
                } else {
                    canvas::show(ui, &self.editor, self.editor_texture.as_ref().map(|t| &t.handle), strings)
                }
            })
            .inner;
        self.handle_canvas(canvas_actions);
    }

    fn floor_plan_workspace(&mut self, ctx: &egui::Context) {
        let strings = self.strings();
        let loading = self.plan_decoder.is_pending() || self.plan_upload.is_pending();

        let list = egui::SidePanel::right("pins")
            .default_width(260.0)
            .show(ctx, |ui| floor_plan::show_pin_list(ui, &mut self.board, strings))
            .inner;

        let plan_texture = self
            .plan_texture
            .as_ref()
            .filter(|t| t.generation == self.plan_requested)
            .map(|t| (&t.handle, t.size));
        let plan = egui::CentralPanel::default()
            .show(ctx, |ui| floor_plan::show_plan(ui, &mut self.board, plan_texture, strings, loading))
            .inner;

        if plan.geometry.is_some() {
            self.plan_geometry = plan.geometry;
        }
        self.board.set_hovered(plan.hovered.or(list.hovered));

        let dialogs = floor_plan::show_dialogs(ctx, &self.board, strings);

        self.handle_plan(list.actions);
        self.handle_plan(plan.actions);
        self.handle_plan(dialogs);
    }
}

impl eframe::App for PlanmarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loaders(ctx);

        // Request repaint while loading (to update spinner)
        if self.is_loading() {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.menu_bar(ctx, ui);
        });

        let strings = self.strings();
        let workspace_bar = egui::TopBottomPanel::top("workspaces").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.workspace, Workspace::ImageEditor, strings.image_editor);
                ui.selectable_value(&mut self.workspace, Workspace::FloorPlan, strings.floor_plan_tab);
                ui.separator();
                match self.workspace {
                    Workspace::ImageEditor => {
                        let subtitle = format!("{}: {}", strings.editor_title, strings.editor_subtitle);
                        ui.label(egui::RichText::new(subtitle).weak());
                        false
                    }
                    Workspace::FloorPlan => {
                        ui.label(strings.resource);
                        let edit = ui.add(egui::TextEdit::singleline(&mut self.resource_input).desired_width(160.0));
                        let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        ui.button(strings.open_resource).clicked() || submitted
                    }
                }
            })
            .inner
        });
        if workspace_bar.inner {
            self.open_resource();
        }

        match self.workspace {
            Workspace::ImageEditor => self.editor_workspace(ctx),
            Workspace::FloorPlan => self.floor_plan_workspace(ctx),
        }
    }
}
