// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the image editor and floor-plan workspaces.

pub mod canvas;
pub mod floor_plan;
pub mod properties;
pub mod toolbar;
