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

use crate::error::Result;
use crate::kinematics::{gear_radius, validate_teeth};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

impl Position {
    pub fn on_axis(x: f64) -> Position {
        Position { x, y: 0.0, z: 0.0 }
    }
}

/// Anything that can report a tooth count for layout purposes
pub trait Toothed {
    fn teeth(&self) -> u32;
}

impl Toothed for u32 {
    fn teeth(&self) -> u32 {
        *self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gear {
    teeth: u32,
    radius: f64,
    position: Position,
    name: String,
    hue: f64
}

impl Gear {
    /// Create the gear that sits at `index` in a chain. Names and hues are
    /// assigned from the chain index; position is left at the origin until the
    /// owning train lays the gears out.
    pub fn new(index: usize, teeth: u32, module: f64) -> Result<Gear> {
        let teeth = validate_teeth(teeth)?;
        Ok(Gear {
            teeth,
            radius: gear_radius(teeth, module),
            position: Position::default(),
            name: default_gear_name(index),
            hue: default_gear_hue(index)
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display hue in degrees
    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub(crate) fn resized(mut self, teeth: u32, module: f64) -> Result<Gear> {
        self.teeth = validate_teeth(teeth)?;
        self.radius = gear_radius(self.teeth, module);
        Ok(self)
    }

    pub(crate) fn placed_at(mut self, position: Position) -> Gear {
        self.position = position;
        self
    }
}

impl Toothed for Gear {
    fn teeth(&self) -> u32 {
        self.teeth
    }
}

pub fn default_gear_name(index: usize) -> String {
    match index {
        0 => "Driver Gear".to_string(),
        1 => "Driven Gear".to_string(),
        n => format!("Gear {}", n + 1)
    }
}

pub fn default_gear_hue(index: usize) -> f64 {
    ((index * 45) % 360) as f64
}
