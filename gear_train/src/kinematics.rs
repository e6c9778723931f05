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

use serde::{Deserialize, Serialize};

use crate::error::{GearError, Result};
use crate::gear::{Position, Toothed};

pub const MIN_TEETH: u32 = 8;
pub const MAX_TEETH: u32 = 100;
pub const DEFAULT_MODULE: f64 = 0.1;
pub const DEFAULT_SPACING: f64 = 0.5;

/// Speed of the driven gear relative to the driver.
///
/// Both tooth counts must be non-zero.
pub fn speed_ratio(driver_teeth: u32, driven_teeth: u32) -> f64 {
    driver_teeth as f64 / driven_teeth as f64
}

/// Torque multiplication across the mesh. Always the reciprocal of [`speed_ratio`]
pub fn torque_ratio(driver_teeth: u32, driven_teeth: u32) -> f64 {
    driven_teeth as f64 / driver_teeth as f64
}

/// Angular speed of the driven gear. Two meshed external gears turn in
/// opposite directions so the sign flips on every hop.
pub fn rotation_speed(driver_speed: f64, driver_teeth: u32, driven_teeth: u32) -> f64 {
    -driver_speed * speed_ratio(driver_teeth, driven_teeth)
}

/// Rendered radius for a tooth count. This is a layout rule, not a
/// manufacturing module standard.
pub fn gear_radius(teeth: u32, module: f64) -> f64 {
    (teeth as f64 * module) / 2.0
}

pub fn layout_positions<G: Toothed>(gears: &[G], spacing: f64) -> Vec<Position> {
    layout_positions_with_module(gears, spacing, DEFAULT_MODULE)
}

/// Place gears left to right along x so that neighbouring gears are separated
/// by the sum of their radii plus `spacing`. One position is returned per
/// input gear, in input order.
pub fn layout_positions_with_module<G: Toothed>(gears: &[G], spacing: f64, module: f64) -> Vec<Position> {
    let mut positions = Vec::with_capacity(gears.len());
    let mut current_x = 0.0;
    for (idx, gear) in gears.iter().enumerate() {
        positions.push(Position::on_axis(current_x));
        if let Some(next) = gears.get(idx + 1) {
            current_x += gear_radius(gear.teeth(), module) + gear_radius(next.teeth(), module) + spacing;
        }
    }
    positions
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum MeshDirection {
    Same,
    Opposite
}

impl MeshDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeshDirection::Same => "same",
            MeshDirection::Opposite => "opposite"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GearCalculation {
    pub ratio: f64,
    pub driven_speed: f64,
    pub torque_ratio: f64,
    pub direction: MeshDirection
}

pub fn gear_properties(driver_teeth: u32, driven_teeth: u32, driver_speed: f64) -> GearCalculation {
    let driven_speed = rotation_speed(driver_speed, driver_teeth, driven_teeth);
    // A stationary pair still counter-rotates kinematically
    let direction = if driven_speed * driver_speed > 0.0 {
        MeshDirection::Same
    } else {
        MeshDirection::Opposite
    };
    GearCalculation {
        ratio: speed_ratio(driver_teeth, driven_teeth),
        driven_speed,
        torque_ratio: torque_ratio(driver_teeth, driven_teeth),
        direction
    }
}

/// Pin an arbitrary slider value into the valid tooth range
pub fn clamp_teeth(teeth: i64) -> u32 {
    teeth.clamp(MIN_TEETH as i64, MAX_TEETH as i64) as u32
}

pub fn validate_teeth(teeth: u32) -> Result<u32> {
    if !(MIN_TEETH..=MAX_TEETH).contains(&teeth) {
        return Err(GearError::invalid(
            "teeth",
            teeth as f64,
            format!("tooth count must be within {}..={}", MIN_TEETH, MAX_TEETH)
        ));
    }
    Ok(teeth)
}
