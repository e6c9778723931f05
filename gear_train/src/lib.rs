/*
 * Copyright (c):
 * 2025 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of physics-lab.
 *
 * physics-lab is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * physics-lab is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with physics-lab. If not, see <https://www.gnu.org/licenses/>.
 */

//! Gear chain kinematics and layout.
//!
//! Everything in here is a pure function of tooth counts and a couple of
//! layout constants. Callers are expected to keep tooth counts within
//! [`MIN_TEETH`]..=[`MAX_TEETH`]; [`validate_teeth`] and [`clamp_teeth`]
//! are the boundary guards for that.

pub mod error;
pub mod gear;
pub mod kinematics;
pub mod profile;
pub mod train;

pub use error::{GearError, Result};
pub use gear::{Gear, Position, Toothed};
pub use kinematics::{
    clamp_teeth, gear_properties, gear_radius, layout_positions, layout_positions_with_module,
    rotation_speed, speed_ratio, torque_ratio, validate_teeth, GearCalculation, MeshDirection,
    DEFAULT_MODULE, DEFAULT_SPACING, MAX_TEETH, MIN_TEETH,
};
pub use profile::GearProfile;
pub use train::{GearPair, GearTrain};
