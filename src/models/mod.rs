// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod gear;
pub mod workout;

pub use gear::{Gear, GearType};
pub use workout::{Workout, WorkoutType};
