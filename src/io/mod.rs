// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for media, exports and floor-plan storage.

pub mod loader;
pub mod media;
pub mod repository;
pub mod serialization;
