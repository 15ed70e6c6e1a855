// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Bundled translation tables.
//!
//! Each language maps to one static [`Strings`] table; the UI reads labels
//! and messages straight from it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hr")]
    Croatian,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Croatian];

    pub fn strings(self) -> &'static Strings {
        match self {
            Language::English => &EN,
            Language::Croatian => &HR,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Croatian => "Hrvatski",
        }
    }
}

pub struct Strings {
    // Workspaces
    pub image_editor: &'static str,
    pub floor_plan_tab: &'static str,
    pub language: &'static str,

    // Image editor
    pub editor_title: &'static str,
    pub editor_subtitle: &'static str,
    pub open_image: &'static str,
    pub no_image: &'static str,
    pub crop_resize: &'static str,
    pub confirm_crop: &'static str,
    pub cancel_crop: &'static str,
    pub output_size: &'static str,
    pub crop_native: &'static str,
    pub zoom_in: &'static str,
    pub zoom_out: &'static str,
    pub reset_zoom: &'static str,
    pub undo: &'static str,
    pub redo: &'static str,
    pub rectangles: &'static str,
    pub no_rectangles: &'static str,
    pub rectangle: &'static str,
    pub edit: &'static str,
    pub done: &'static str,
    pub delete: &'static str,
    pub export_json: &'static str,
    pub export_yaml: &'static str,
    pub loading_image: &'static str,
    pub hint_idle: &'static str,
    pub hint_drawing: &'static str,
    pub hint_editing: &'static str,
    pub hint_crop: &'static str,

    // Floor plan
    pub title: &'static str,
    pub resource: &'static str,
    pub open_resource: &'static str,
    pub loading: &'static str,
    pub no_floor_plan: &'static str,
    pub upload_floor_plan: &'static str,
    pub replace_floor_plan: &'static str,
    pub remove_floor_plan: &'static str,
    pub zoom: &'static str,
    pub navigation: &'static str,
    pub ctrl_active: &'static str,
    pub hold_ctrl_to_zoom_pan: &'static str,
    pub pins: &'static str,
    pub no_pins_added: &'static str,
    pub pin: &'static str,
    pub position: &'static str,
    pub enter_pin_description: &'static str,
    pub placeholder: &'static str,
    pub cancel: &'static str,
    pub add_pin: &'static str,
    pub click_to_add_pins: &'static str,
    pub navigation_instructions: &'static str,
    pub floor_plan_uploaded: &'static str,
    pub failed_to_save_floor_plan: &'static str,
    pub failed_to_process_image: &'static str,
    pub failed_to_load_floor_plan: &'static str,
    pub failed_to_save_pin: &'static str,
    pub failed_to_delete_pin: &'static str,
    pub failed_to_edit_pin: &'static str,
    pub failed_to_remove_floor_plan: &'static str,
    pub pin_added: &'static str,
    pub pin_deleted: &'static str,
    pub pin_edited: &'static str,
    pub confirm_remove_floor_plan: &'static str,
    pub confirm_delete_pin: &'static str,
    pub yes: &'static str,
    pub no: &'static str,
    pub unexpected_error: &'static str,
}

static EN: Strings = Strings {
    image_editor: "Image Editor",
    floor_plan_tab: "Floor Plan",
    language: "Language",

    editor_title: "Coordinate Extractor",
    editor_subtitle: "Extract coordinates for multiple selected rectangles from images",
    open_image: "Open Image...",
    no_image: "Open an image to start drawing rectangles",
    crop_resize: "Crop / Resize",
    confirm_crop: "Apply Crop",
    cancel_crop: "Cancel",
    output_size: "Output size",
    crop_native: "Crop size",
    zoom_in: "Zoom In",
    zoom_out: "Zoom Out",
    reset_zoom: "Reset",
    undo: "Undo",
    redo: "Redo",
    rectangles: "Rectangles",
    no_rectangles: "No rectangles yet",
    rectangle: "Rectangle",
    edit: "Edit",
    done: "Done",
    delete: "Delete",
    export_json: "Export JSON...",
    export_yaml: "Export YAML...",
    loading_image: "Loading image...",
    hint_idle: "Click twice on the image to draw a rectangle. Hold Ctrl to zoom/pan.",
    hint_drawing: "Click again to finish the rectangle",
    hint_editing: "Drag a corner handle to resize the rectangle",
    hint_crop: "Drag the box or its corners, click outside to move it there",

    title: "Floor Plan",
    resource: "Resource",
    open_resource: "Open",
    loading: "Loading floor plan...",
    no_floor_plan: "No floor plan uploaded",
    upload_floor_plan: "Upload Floor Plan",
    replace_floor_plan: "Replace Floor Plan",
    remove_floor_plan: "Remove Floor Plan",
    zoom: "Zoom",
    navigation: "Navigation",
    ctrl_active: "Ctrl Active",
    hold_ctrl_to_zoom_pan: "Hold Ctrl to zoom/pan",
    pins: "Pins",
    no_pins_added: "No pins added yet",
    pin: "Pin",
    position: "Position",
    enter_pin_description: "Enter pin description:",
    placeholder: "e.g., Server Room, Exit, etc.",
    cancel: "Cancel",
    add_pin: "Add Pin",
    click_to_add_pins: "Click on the image to add pins. Click on existing pins to view details.",
    navigation_instructions: "Hold Ctrl and use mouse wheel to zoom in/out, or drag to pan around. Use the zoom buttons above for quick zoom.",
    floor_plan_uploaded: "Floor plan uploaded successfully",
    failed_to_save_floor_plan: "Failed to save floor plan",
    failed_to_process_image: "Failed to process image file",
    failed_to_load_floor_plan: "Failed to load floor plan",
    failed_to_save_pin: "Failed to save pin",
    failed_to_delete_pin: "Failed to delete pin",
    failed_to_edit_pin: "Failed to edit pin",
    failed_to_remove_floor_plan: "Failed to remove floor plan",
    pin_added: "Pin added at coordinates:",
    pin_deleted: "Pin deleted successfully",
    pin_edited: "Pin edited successfully",
    confirm_remove_floor_plan: "Are you sure you want to remove this floor plan? This action cannot be undone.",
    confirm_delete_pin: "Are you sure you want to delete this pin? This action cannot be undone.",
    yes: "Yes",
    no: "No",
    unexpected_error: "An unexpected error occurred",
};

static HR: Strings = Strings {
    image_editor: "Uređivač slike",
    floor_plan_tab: "Tlocrt",
    language: "Jezik",

    editor_title: "Izdvajanje koordinata",
    editor_subtitle: "Izdvojite koordinate više označenih pravokutnika sa slike",
    open_image: "Otvori sliku...",
    no_image: "Otvorite sliku za crtanje pravokutnika",
    crop_resize: "Izreži / promijeni veličinu",
    confirm_crop: "Primijeni rez",
    cancel_crop: "Odustani",
    output_size: "Izlazna veličina",
    crop_native: "Veličina reza",
    zoom_in: "Uvećaj",
    zoom_out: "Smanji",
    reset_zoom: "Vrati",
    undo: "Poništi",
    redo: "Ponovi",
    rectangles: "Pravokutnici",
    no_rectangles: "Još nema pravokutnika",
    rectangle: "Pravokutnik",
    edit: "Uredi",
    done: "Gotovo",
    delete: "Obriši",
    export_json: "Izvezi JSON...",
    export_yaml: "Izvezi YAML...",
    loading_image: "Učitavanje slike...",
    hint_idle: "Kliknite dvaput na sliku za crtanje pravokutnika. Držite Ctrl za zumiranje/pomicanje.",
    hint_drawing: "Kliknite ponovno za završetak pravokutnika",
    hint_editing: "Povucite kut za promjenu veličine pravokutnika",
    hint_crop: "Povucite okvir ili njegove kutove, kliknite izvan za premještanje",

    title: "Tlocrt",
    resource: "Resurs",
    open_resource: "Otvori",
    loading: "Učitavanje tlocrta...",
    no_floor_plan: "Nema učitanog tlocrta",
    upload_floor_plan: "Učitaj tlocrt",
    replace_floor_plan: "Zamijeni tlocrt",
    remove_floor_plan: "Ukloni tlocrt",
    zoom: "Zoom",
    navigation: "Navigacija",
    ctrl_active: "Ctrl aktivan",
    hold_ctrl_to_zoom_pan: "Držite Ctrl za zumiranje/pomicanje",
    pins: "Oznake",
    no_pins_added: "Još nema oznaka",
    pin: "Oznaka",
    position: "Položaj",
    enter_pin_description: "Unesite opis oznake:",
    placeholder: "npr., Server soba, Izlaz, itd.",
    cancel: "Odustani",
    add_pin: "Dodaj oznaku",
    click_to_add_pins: "Kliknite na sliku za dodavanje oznaka. Kliknite na postojeće oznake za pregled detalja.",
    navigation_instructions: "Držite Ctrl i koristite kotačić miša za uvećanje/smanjivanje, ili povlačite za pomicanje. Koristite gumbove za uvećanje iznad za brzo uvećanje.",
    floor_plan_uploaded: "Tlocrt uspješno učitan",
    failed_to_save_floor_plan: "Neuspjelo spremanje tlocrta",
    failed_to_process_image: "Neuspjelo procesiranje slike",
    failed_to_load_floor_plan: "Neuspjelo učitavanje tlocrta",
    failed_to_save_pin: "Neuspjelo spremanje oznake",
    failed_to_delete_pin: "Neuspjelo brisanje oznake",
    failed_to_edit_pin: "Neuspjelo uređivanje oznake",
    failed_to_remove_floor_plan: "Neuspjelo uklanjanje tlocrta",
    pin_added: "Oznaka dodana na koordinatama:",
    pin_deleted: "Oznaka uspješno obrisana",
    pin_edited: "Oznaka uspješno uređena",
    confirm_remove_floor_plan: "Jeste li sigurni da želite ukloniti ovaj tlocrt? Ova radnja se ne može poništiti.",
    confirm_delete_pin: "Jeste li sigurni da želite obrisati ovu oznaku? Ova radnja se ne može poništiti.",
    yes: "Da",
    no: "Ne",
    unexpected_error: "Došlo je do neočekivane greške",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!(serde_json::to_string(&Language::Croatian).unwrap(), "\"hr\"");
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::English);
    }

    #[test]
    fn test_tables_differ() {
        assert_eq!(Language::English.strings().title, "Floor Plan");
        assert_eq!(Language::Croatian.strings().title, "Tlocrt");
    }
}
