// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model and interaction state.

pub mod annotation;
pub mod editor;
pub mod floor_plan;
pub mod history;
pub mod pin_board;
pub mod view;
