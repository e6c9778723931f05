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

pub type Result<T> = std::result::Result<T, GearError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GearError {
    #[error("invalid {parameter} `{value}`. {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: String
    },
    #[error("a gear train needs at least 2 gears, got {count}")]
    TooFewGears {
        count: usize
    },
    #[error("no gear at index {index}; train has {count} gears")]
    NoSuchGear {
        index: usize,
        count: usize
    }
}

impl GearError {
    pub(crate) fn invalid(parameter: &'static str, value: f64, reason: impl Into<String>) -> GearError {
        GearError::InvalidParameter { parameter, value, reason: reason.into() }
    }

    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            GearError::InvalidParameter { parameter, .. } => Some(*parameter),
            _ => None
        }
    }
}
