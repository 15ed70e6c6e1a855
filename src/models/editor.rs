// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image editor state.
//!
//! All pointer interaction on the image editor runs through a single
//! [`Mode`] value. Each input (click, press, move, release, pan) is a
//! transition on that mode, so combinations such as "drawing while
//! dragging the crop box" cannot be represented.

use super::annotation::{Bounds, CropBox, Handle, Point, RectId, Rectangle, MIN_CROP_SIZE, MIN_RECT_SIZE};
use super::history::History;
use super::view::{ViewTransform, WheelStep};
use crate::io::media::{self, LoadedImage};
use crate::util::geometry::hit_handle;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Zoom factor of the toolbar zoom buttons.
const BUTTON_ZOOM_STEP: f32 = 1.2;

/// Fixed output sizes offered when confirming a crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetSize {
    pub width: u32,
    pub height: u32,
}

pub const PRESET_SIZES: [PresetSize; 4] = [
    PresetSize { width: 480, height: 480 },
    PresetSize { width: 640, height: 640 },
    PresetSize { width: 800, height: 600 },
    PresetSize { width: 1024, height: 768 },
];

impl PresetSize {
    pub fn label(&self) -> String {
        format!("{} x {}", self.width, self.height)
    }
}

/// What a press inside crop mode grabbed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CropGrab {
    Resize(Handle),
    /// Offset of the pointer from the crop box's top-left corner.
    Move { offset: Point },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Idle,
    Drawing { anchor: Point, cursor: Point },
    EditingRect { id: RectId, handle: Option<Handle> },
    PositioningCrop { crop: CropBox },
    DraggingCrop { crop: CropBox, grab: CropGrab },
    /// Modifier-drag of the view; `resume` is restored when it ends.
    PanningView { grab: egui::Vec2, resume: Box<Mode> },
}

impl Mode {
    /// The mode underneath any view panning.
    fn base(&self) -> &Mode {
        match self {
            Mode::PanningView { resume, .. } => resume.base(),
            other => other,
        }
    }

    fn base_mut(&mut self) -> &mut Mode {
        match self {
            Mode::PanningView { resume, .. } => resume.base_mut(),
            other => other,
        }
    }

    fn is_crop(&self) -> bool {
        matches!(self.base(), Mode::PositioningCrop { .. } | Mode::DraggingCrop { .. })
    }
}

pub struct EditorState {
    image: Option<LoadedImage>,
    /// Bumped whenever the working image is replaced.
    image_generation: u64,
    rectangles: Vec<Rectangle>,
    next_id: u64,
    mode: Mode,
    view: ViewTransform,
    crop_view: ViewTransform,
    target_size: Option<PresetSize>,
    history: History,
    /// Rectangles before the current handle drag, pushed once it changes something.
    drag_snapshot: Option<Vec<Rectangle>>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            image: None,
            image_generation: 0,
            rectangles: Vec::new(),
            next_id: 1,
            mode: Mode::Idle,
            view: ViewTransform::default(),
            crop_view: ViewTransform::default(),
            target_size: None,
            history: History::new(),
            drag_snapshot: None,
        }
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    pub fn image_generation(&self) -> u64 {
        self.image_generation
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn target_size(&self) -> Option<PresetSize> {
        self.target_size
    }

    pub fn set_target_size(&mut self, target: Option<PresetSize>) {
        self.target_size = target;
    }

    /// The view currently driving the canvas (the crop view in crop mode).
    pub fn active_view(&self) -> &ViewTransform {
        if self.mode.is_crop() {
            &self.crop_view
        } else {
            &self.view
        }
    }

    fn active_view_mut(&mut self) -> &mut ViewTransform {
        if self.mode.is_crop() {
            &mut self.crop_view
        } else {
            &mut self.view
        }
    }

    pub fn is_crop_active(&self) -> bool {
        self.mode.is_crop()
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.mode, Mode::PanningView { .. })
    }

    pub fn editing_id(&self) -> Option<RectId> {
        match self.mode.base() {
            Mode::EditingRect { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn is_editing(&self, id: RectId) -> bool {
        self.editing_id() == Some(id)
    }

    /// Preview of the rectangle being drawn.
    pub fn pending_rect(&self) -> Option<Bounds> {
        match self.mode.base() {
            Mode::Drawing { anchor, cursor } => Some(Bounds::from_corners(*anchor, *cursor)),
            _ => None,
        }
    }

    pub fn crop_box(&self) -> Option<CropBox> {
        match self.mode.base() {
            Mode::PositioningCrop { crop } | Mode::DraggingCrop { crop, .. } => Some(*crop),
            _ => None,
        }
    }

    fn find_rect(&self, id: RectId) -> Option<&Rectangle> {
        self.rectangles.iter().find(|r| r.id == id)
    }

    /// Replace the working image and start over.
    pub fn set_image(&mut self, image: LoadedImage) {
        log::info!("Editor image set ({}x{})", image.width(), image.height());
        self.target_size = None;
        self.replace_image(image);
    }

    fn replace_image(&mut self, image: LoadedImage) {
        self.image = Some(image);
        self.image_generation += 1;
        self.rectangles.clear();
        self.history.clear();
        self.drag_snapshot = None;
        self.mode = Mode::Idle;
        self.view.reset();
        self.crop_view.reset();
    }

    /// Primary click on the image (no navigation modifier).
    pub fn click(&mut self, point: Point) {
        if self.image.is_none() || self.is_panning() {
            return;
        }
        match self.mode.clone() {
            Mode::Idle => {
                self.mode = Mode::Drawing { anchor: point, cursor: point };
            }
            Mode::Drawing { anchor, .. } => {
                self.commit_rect(anchor, point);
                self.mode = Mode::Idle;
            }
            Mode::EditingRect { id, .. } => {
                let on_handle = self
                    .find_rect(id)
                    .and_then(|r| hit_handle(&r.bounds, point))
                    .is_some();
                if !on_handle {
                    self.mode = Mode::Drawing { anchor: point, cursor: point };
                }
            }
            Mode::PositioningCrop { .. } | Mode::DraggingCrop { .. } | Mode::PanningView { .. } => {}
        }
    }

    fn commit_rect(&mut self, anchor: Point, end: Point) -> Option<RectId> {
        let bounds = Bounds::from_corners(anchor, end);
        if bounds.width <= MIN_RECT_SIZE || bounds.height <= MIN_RECT_SIZE {
            log::debug!("Discarded rectangle {:.3}x{:.3}", bounds.width, bounds.height);
            return None;
        }
        self.history.push(self.rectangles.clone());
        let id = RectId(self.next_id);
        self.next_id += 1;
        self.rectangles.push(Rectangle::new(id, bounds));
        log::info!(
            "Added rectangle at ({:.3}, {:.3}) size {:.3}x{:.3}, total: {}",
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            self.rectangles.len()
        );
        Some(id)
    }

    /// Pointer went down on the image.
    pub fn press(&mut self, point: Point) {
        match self.mode.clone() {
            Mode::EditingRect { id, .. } => {
                let handle = self.find_rect(id).and_then(|r| hit_handle(&r.bounds, point));
                if let Some(handle) = handle {
                    self.drag_snapshot = Some(self.rectangles.clone());
                    self.mode = Mode::EditingRect { id, handle: Some(handle) };
                }
            }
            Mode::PositioningCrop { crop } => {
                self.mode = if let Some(handle) = hit_handle(&crop.0, point) {
                    Mode::DraggingCrop { crop, grab: CropGrab::Resize(handle) }
                } else if crop.0.contains(point) {
                    let offset = Point::new(point.x - crop.0.x, point.y - crop.0.y);
                    Mode::DraggingCrop { crop, grab: CropGrab::Move { offset } }
                } else {
                    Mode::PositioningCrop { crop: CropBox(crop.0.centered_on(point)) }
                };
            }
            _ => {}
        }
    }

    pub fn pointer_moved(&mut self, point: Point) {
        match &mut self.mode {
            Mode::Drawing { cursor, .. } => *cursor = point,
            Mode::EditingRect { id, handle: Some(handle) } => {
                let (id, handle) = (*id, *handle);
                if let Some(rect) = self.rectangles.iter_mut().find(|r| r.id == id) {
                    let before = rect.bounds;
                    rect.resize(handle, point);
                    if rect.bounds != before {
                        if let Some(snapshot) = self.drag_snapshot.take() {
                            self.history.push(snapshot);
                        }
                    }
                }
            }
            Mode::DraggingCrop { crop, grab } => {
                crop.0 = match *grab {
                    CropGrab::Resize(handle) => crop.0.resize_corner(handle, point, MIN_CROP_SIZE),
                    CropGrab::Move { offset } => crop.0.move_to(Point::new(point.x - offset.x, point.y - offset.y)),
                };
            }
            _ => {}
        }
    }

    pub fn release(&mut self) {
        self.drag_snapshot = None;
        match self.mode.clone() {
            Mode::EditingRect { id, handle: Some(_) } => {
                self.mode = Mode::EditingRect { id, handle: None };
            }
            Mode::DraggingCrop { crop, .. } => {
                self.mode = Mode::PositioningCrop { crop };
            }
            _ => {}
        }
    }

    /// Abandon whatever is in progress: drawing, editing or crop.
    pub fn escape(&mut self) {
        match self.mode.base() {
            Mode::Drawing { .. } | Mode::EditingRect { .. } => *self.mode.base_mut() = Mode::Idle,
            Mode::PositioningCrop { .. } | Mode::DraggingCrop { .. } => self.mode = Mode::Idle,
            _ => {}
        }
    }

    /// Enter editing for `id`, or leave it if `id` is already being edited.
    pub fn toggle_edit(&mut self, id: RectId) {
        if self.is_crop_active() || self.is_panning() {
            return;
        }
        if self.is_editing(id) {
            self.mode = Mode::Idle;
        } else if self.find_rect(id).is_some() {
            self.mode = Mode::EditingRect { id, handle: None };
        }
    }

    pub fn delete_rect(&mut self, id: RectId) {
        let Some(index) = self.rectangles.iter().position(|r| r.id == id) else {
            return;
        };
        self.history.push(self.rectangles.clone());
        self.rectangles.remove(index);
        if self.is_editing(id) {
            *self.mode.base_mut() = Mode::Idle;
        }
        log::info!("Deleted rectangle {}, total: {}", id.0, self.rectangles.len());
    }

    pub fn begin_pan(&mut self, pointer: egui::Pos2) {
        if self.is_panning() || self.image.is_none() {
            return;
        }
        let grab = self.active_view().begin_drag(pointer);
        let resume = Box::new(std::mem::replace(&mut self.mode, Mode::Idle));
        self.mode = Mode::PanningView { grab, resume };
    }

    pub fn pan_to(&mut self, pointer: egui::Pos2) {
        if let Mode::PanningView { grab, .. } = self.mode {
            self.active_view_mut().drag_to(pointer, grab);
        }
    }

    pub fn end_pan(&mut self) {
        if let Mode::PanningView { resume, .. } = std::mem::replace(&mut self.mode, Mode::Idle) {
            self.mode = *resume;
        }
    }

    pub fn wheel(&mut self, step: WheelStep, cursor: egui::Vec2) {
        self.active_view_mut().wheel(step, cursor);
    }

    pub fn zoom_in(&mut self) {
        self.active_view_mut().zoom_by(BUTTON_ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.active_view_mut().zoom_by(1.0 / BUTTON_ZOOM_STEP);
    }

    pub fn reset_zoom(&mut self) {
        self.active_view_mut().reset();
    }

    /// Enter crop positioning with the default crop box.
    pub fn start_crop(&mut self) -> bool {
        if self.image.is_none() || self.is_crop_active() {
            return false;
        }
        self.view.reset();
        self.crop_view.reset();
        self.mode = Mode::PositioningCrop { crop: CropBox::default() };
        true
    }

    pub fn cancel_crop(&mut self) {
        if self.is_crop_active() {
            self.mode = Mode::Idle;
        }
    }

    /// Output size the current crop would produce.
    pub fn crop_output_size(&self) -> Option<(u32, u32)> {
        let crop = self.crop_box()?;
        let image = self.image.as_ref()?;
        if let Some(target) = self.target_size {
            return Some((target.width, target.height));
        }
        media::crop_source_rect(&crop.0, image.width(), image.height())
            .ok()
            .map(|(_, _, w, h)| (w, h))
    }

    /// Rasterize the crop box into a new working image.
    ///
    /// Output is the preset size when one is selected, otherwise the crop's
    /// native pixel size. Rectangles are cleared since their coordinates
    /// referred to the old image.
    pub fn confirm_crop(&mut self) -> Result<()> {
        let crop = self.crop_box().ok_or_else(|| anyhow!("not positioning a crop"))?;
        let image = self.image.as_ref().ok_or_else(|| anyhow!("no image loaded"))?;
        let target = self.target_size.map(|t| (t.width, t.height));

        let cropped = media::rasterize_crop(&image.image, &crop.0, target)?;
        log::info!(
            "Cropped image to {}x{} from region ({:.3}, {:.3}, {:.3}, {:.3})",
            cropped.width(),
            cropped.height(),
            crop.0.x,
            crop.0.y,
            crop.0.width,
            crop.0.height
        );
        self.replace_image(LoadedImage::new(cropped));
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() && !self.is_crop_active()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo() && !self.is_crop_active()
    }

    pub fn undo(&mut self) {
        if !self.can_undo() {
            return;
        }
        if let Some(previous) = self.history.undo(self.rectangles.clone()) {
            self.rectangles = previous;
            self.mode = Mode::Idle;
            log::info!("Undo, total rectangles: {}", self.rectangles.len());
        }
    }

    pub fn redo(&mut self) {
        if !self.can_redo() {
            return;
        }
        if let Some(next) = self.history.redo(self.rectangles.clone()) {
            self.rectangles = next;
            self.mode = Mode::Idle;
            log::info!("Redo, total rectangles: {}", self.rectangles.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbaImage};

    fn editor_with_image(width: u32, height: u32) -> EditorState {
        let mut editor = EditorState::new();
        editor.set_image(LoadedImage::new(DynamicImage::ImageRgba8(RgbaImage::new(width, height))));
        editor
    }

    fn draw(editor: &mut EditorState, a: (f64, f64), b: (f64, f64)) {
        editor.click(Point::new(a.0, a.1));
        editor.pointer_moved(Point::new(b.0, b.1));
        editor.click(Point::new(b.0, b.1));
    }

    #[test]
    fn test_two_clicks_commit_rectangle() {
        let mut editor = editor_with_image(1000, 800);
        draw(&mut editor, (0.4, 0.3), (0.1, 0.1));

        assert_eq!(editor.mode(), &Mode::Idle);
        assert_eq!(editor.rectangles().len(), 1);
        let b = editor.rectangles()[0].bounds;
        assert!((b.x - 0.1).abs() < 1e-9);
        assert!((b.y - 0.1).abs() < 1e-9);
        assert!((b.width - 0.3).abs() < 1e-9);
        assert!((b.height - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_tiny_rectangle_is_discarded() {
        let mut editor = editor_with_image(100, 100);
        draw(&mut editor, (0.5, 0.5), (0.505, 0.9));
        draw(&mut editor, (0.5, 0.5), (0.9, 0.505));
        assert!(editor.rectangles().is_empty());
        assert_eq!(editor.mode(), &Mode::Idle);
    }

    #[test]
    fn test_clicks_without_image_do_nothing() {
        let mut editor = EditorState::new();
        editor.click(Point::new(0.1, 0.1));
        assert_eq!(editor.mode(), &Mode::Idle);
    }

    #[test]
    fn test_pending_rect_follows_cursor() {
        let mut editor = editor_with_image(100, 100);
        editor.click(Point::new(0.5, 0.5));
        editor.pointer_moved(Point::new(0.2, 0.7));
        let pending = editor.pending_rect().unwrap();
        assert!((pending.x - 0.2).abs() < 1e-9);
        assert!((pending.height - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_only_one_rectangle_edits_at_a_time() {
        let mut editor = editor_with_image(100, 100);
        draw(&mut editor, (0.1, 0.1), (0.3, 0.3));
        draw(&mut editor, (0.5, 0.5), (0.7, 0.7));
        let (a, b) = (editor.rectangles()[0].id, editor.rectangles()[1].id);

        editor.toggle_edit(a);
        assert!(editor.is_editing(a));
        editor.toggle_edit(b);
        assert!(editor.is_editing(b));
        assert!(!editor.is_editing(a));
        editor.toggle_edit(b);
        assert_eq!(editor.editing_id(), None);
    }

    #[test]
    fn test_deleting_edited_rectangle_clears_editing() {
        let mut editor = editor_with_image(100, 100);
        draw(&mut editor, (0.1, 0.1), (0.3, 0.3));
        let id = editor.rectangles()[0].id;
        editor.toggle_edit(id);

        editor.delete_rect(id);
        assert!(editor.rectangles().is_empty());
        assert_eq!(editor.editing_id(), None);
        assert_eq!(editor.mode(), &Mode::Idle);
    }

    #[test]
    fn test_deleting_other_rectangle_keeps_editing() {
        let mut editor = editor_with_image(100, 100);
        draw(&mut editor, (0.1, 0.1), (0.3, 0.3));
        draw(&mut editor, (0.5, 0.5), (0.7, 0.7));
        let (a, b) = (editor.rectangles()[0].id, editor.rectangles()[1].id);
        editor.toggle_edit(a);
        editor.delete_rect(b);
        assert!(editor.is_editing(a));
    }

    #[test]
    fn test_handle_drag_resizes_inside_image() {
        let mut editor = editor_with_image(100, 100);
        draw(&mut editor, (0.2, 0.2), (0.6, 0.6));
        let id = editor.rectangles()[0].id;
        editor.toggle_edit(id);

        editor.press(Point::new(0.6, 0.6));
        assert_eq!(editor.mode(), &Mode::EditingRect { id, handle: Some(Handle::Se) });
        editor.pointer_moved(Point::new(1.0, 1.0));
        editor.pointer_moved(Point::new(0.0, 0.0));
        editor.release();

        let b = editor.rectangles()[0].bounds;
        assert!(b.width >= MIN_RECT_SIZE - 1e-9 && b.height >= MIN_RECT_SIZE - 1e-9);
        assert!((b.x - 0.2).abs() < 1e-9);
        assert_eq!(editor.mode(), &Mode::EditingRect { id, handle: None });

        // Click on the handle after the drag must not start drawing
        let corner = b.corner(Handle::Se);
        editor.click(corner);
        assert!(editor.is_editing(id));
    }

    #[test]
    fn test_handle_press_without_drag_adds_no_undo_step() {
        let mut editor = editor_with_image(100, 100);
        draw(&mut editor, (0.2, 0.2), (0.6, 0.6));
        let id = editor.rectangles()[0].id;
        editor.toggle_edit(id);

        editor.press(Point::new(0.6, 0.6));
        editor.pointer_moved(Point::new(0.6, 0.6));
        editor.release();
        editor.undo();
        assert!(editor.rectangles().is_empty());

        editor.redo();
        editor.toggle_edit(id);
        editor.press(Point::new(0.6, 0.6));
        editor.pointer_moved(Point::new(0.8, 0.7));
        editor.pointer_moved(Point::new(0.9, 0.9));
        editor.release();
        editor.undo();
        let b = editor.rectangles()[0].bounds;
        assert!((b.right() - 0.6).abs() < 1e-9);
        assert!((b.bottom() - 0.6).abs() < 1e-9);
        editor.undo();
        assert!(editor.rectangles().is_empty());
    }

    #[test]
    fn test_click_away_from_handles_leaves_editing_and_draws() {
        let mut editor = editor_with_image(100, 100);
        draw(&mut editor, (0.2, 0.2), (0.6, 0.6));
        let id = editor.rectangles()[0].id;
        editor.toggle_edit(id);
        editor.click(Point::new(0.9, 0.9));
        assert!(matches!(editor.mode(), Mode::Drawing { .. }));
        assert_eq!(editor.editing_id(), None);
    }

    #[test]
    fn test_crop_interactions() {
        let mut editor = editor_with_image(1000, 800);
        assert!(editor.start_crop());
        assert_eq!(editor.crop_box(), Some(CropBox::default()));

        // Clicks are ignored while cropping
        editor.click(Point::new(0.5, 0.5));
        assert!(editor.pending_rect().is_none());

        // Drag the interior
        editor.press(Point::new(0.5, 0.5));
        editor.pointer_moved(Point::new(0.95, 0.95));
        editor.release();
        let moved = editor.crop_box().unwrap().0;
        assert!((moved.right() - 1.0).abs() < 1e-9);
        assert!((moved.bottom() - 1.0).abs() < 1e-9);

        // Resize from the north-west corner
        editor.press(Point::new(moved.x, moved.y));
        editor.pointer_moved(Point::new(2.0, 2.0));
        editor.release();
        let resized = editor.crop_box().unwrap().0;
        assert!((resized.width - MIN_CROP_SIZE).abs() < 1e-9);
        assert!((resized.height - MIN_CROP_SIZE).abs() < 1e-9);

        // Press outside recenters
        editor.press(Point::new(0.1, 0.1));
        let centered = editor.crop_box().unwrap().0;
        assert!((centered.x - (0.1 - MIN_CROP_SIZE / 2.0)).abs() < 1e-9);
        assert!(matches!(editor.mode(), Mode::PositioningCrop { .. }));
    }

    #[test]
    fn test_confirm_crop_native_size_clears_rectangles() {
        let mut editor = editor_with_image(1000, 800);
        draw(&mut editor, (0.1, 0.1), (0.4, 0.3));
        editor.zoom_in();
        let generation = editor.image_generation();

        editor.start_crop();
        assert_eq!(editor.crop_output_size(), Some((500, 320)));
        editor.confirm_crop().unwrap();

        assert_eq!(editor.image().unwrap().size(), (500, 320));
        assert!(editor.rectangles().is_empty());
        assert_eq!(editor.mode(), &Mode::Idle);
        assert_eq!(*editor.active_view(), ViewTransform::default());
        assert_eq!(editor.image_generation(), generation + 1);
    }

    #[test]
    fn test_confirm_crop_to_preset() {
        let mut editor = editor_with_image(1000, 800);
        editor.set_target_size(Some(PRESET_SIZES[2]));
        editor.start_crop();
        editor.confirm_crop().unwrap();
        assert_eq!(editor.image().unwrap().size(), (800, 600));
    }

    #[test]
    fn test_confirm_without_crop_fails_and_keeps_state() {
        let mut editor = editor_with_image(10, 10);
        draw(&mut editor, (0.1, 0.1), (0.4, 0.3));
        assert!(editor.confirm_crop().is_err());
        assert_eq!(editor.rectangles().len(), 1);
    }

    #[test]
    fn test_minimum_crop_in_corner_of_small_image() {
        let mut editor = editor_with_image(10, 10);
        editor.start_crop();

        // Shrink to the minimum size from the north-west corner
        let start = editor.crop_box().unwrap().0;
        editor.press(Point::new(start.x, start.y));
        editor.pointer_moved(Point::new(2.0, 2.0));
        editor.release();

        // Drag it into the bottom-right corner
        let small = editor.crop_box().unwrap().0;
        editor.press(Point::new(small.x + small.width / 2.0, small.y + small.height / 2.0));
        editor.pointer_moved(Point::new(1.0, 1.0));
        editor.release();
        let corner = editor.crop_box().unwrap().0;
        assert!((corner.right() - 1.0).abs() < 1e-9);
        assert!((corner.bottom() - 1.0).abs() < 1e-9);

        assert_eq!(editor.crop_output_size(), Some((1, 1)));
        editor.confirm_crop().unwrap();
        assert_eq!(editor.image().unwrap().size(), (1, 1));
        assert_eq!(editor.mode(), &Mode::Idle);
    }

    #[test]
    fn test_cancel_crop_keeps_image() {
        let mut editor = editor_with_image(10, 10);
        editor.start_crop();
        editor.cancel_crop();
        assert_eq!(editor.mode(), &Mode::Idle);
        assert_eq!(editor.image().unwrap().size(), (10, 10));
    }

    #[test]
    fn test_crop_view_is_independent() {
        let mut editor = editor_with_image(10, 10);
        editor.start_crop();
        editor.zoom_in();
        editor.cancel_crop();
        assert_eq!(editor.active_view().zoom, 1.0);
    }

    #[test]
    fn test_pan_resumes_previous_mode() {
        let mut editor = editor_with_image(100, 100);
        editor.click(Point::new(0.1, 0.1));
        editor.begin_pan(egui::pos2(50.0, 50.0));
        assert!(editor.is_panning());
        // Clicks while panning are ignored
        editor.click(Point::new(0.9, 0.9));
        editor.pan_to(egui::pos2(80.0, 40.0));
        editor.end_pan();

        assert_eq!(editor.active_view().pan, egui::vec2(30.0, -10.0));
        assert!(matches!(editor.mode(), Mode::Drawing { .. }));
        assert!(editor.rectangles().is_empty());
    }

    #[test]
    fn test_delete_while_panning_over_edit() {
        let mut editor = editor_with_image(100, 100);
        draw(&mut editor, (0.1, 0.1), (0.3, 0.3));
        let id = editor.rectangles()[0].id;
        editor.toggle_edit(id);
        editor.begin_pan(egui::pos2(0.0, 0.0));
        editor.delete_rect(id);
        editor.end_pan();
        assert_eq!(editor.mode(), &Mode::Idle);
    }

    #[test]
    fn test_undo_redo_rectangles() {
        let mut editor = editor_with_image(100, 100);
        draw(&mut editor, (0.1, 0.1), (0.3, 0.3));
        draw(&mut editor, (0.5, 0.5), (0.7, 0.7));
        editor.undo();
        assert_eq!(editor.rectangles().len(), 1);
        editor.redo();
        assert_eq!(editor.rectangles().len(), 2);
    }

    #[test]
    fn test_new_image_resets_everything() {
        let mut editor = editor_with_image(100, 100);
        draw(&mut editor, (0.1, 0.1), (0.3, 0.3));
        editor.set_target_size(Some(PRESET_SIZES[0]));
        editor.start_crop();
        editor.set_image(LoadedImage::new(DynamicImage::ImageRgba8(RgbaImage::new(5, 5))));
        assert!(editor.rectangles().is_empty());
        assert_eq!(editor.target_size(), None);
        assert_eq!(editor.mode(), &Mode::Idle);
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_escape_abandons_drawing_and_crop() {
        let mut editor = editor_with_image(100, 100);
        editor.click(Point::new(0.1, 0.1));
        editor.escape();
        assert_eq!(editor.mode(), &Mode::Idle);
        assert!(editor.rectangles().is_empty());

        editor.start_crop();
        editor.escape();
        assert!(!editor.is_crop_active());
        assert!(editor.image().is_some());
    }
}
