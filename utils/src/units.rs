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

pub const ZERO_CELSIUS_IN_KELVIN: f64 = 273.15;

pub fn kw_to_bhp(power_kw: f64) -> f64 {
    power_kw * 1.341
}

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - ZERO_CELSIUS_IN_KELVIN
}

pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + ZERO_CELSIUS_IN_KELVIN
}

/// Convert an angular speed in radians per second to revolutions per minute
pub fn rad_per_sec_to_rpm(rad_per_sec: f64) -> f64 {
    rad_per_sec * 60.0 / (2.0 * std::f64::consts::PI)
}

pub fn rpm_to_rad_per_sec(rpm: f64) -> f64 {
    rpm * 2.0 * std::f64::consts::PI / 60.0
}
