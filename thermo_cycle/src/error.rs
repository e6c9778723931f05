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

pub type Result<T> = std::result::Result<T, CycleError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CycleError {
    #[error("invalid {parameter} `{value}`. {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: String
    },
    #[error("calculation produced a non-finite {quantity}")]
    NonFinite {
        quantity: String
    }
}

impl CycleError {
    pub(crate) fn invalid(parameter: &'static str, value: f64, reason: impl Into<String>) -> CycleError {
        CycleError::InvalidParameter { parameter, value, reason: reason.into() }
    }

    /// Name of the offending input, if this error was caused by one
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            CycleError::InvalidParameter { parameter, .. } => Some(*parameter),
            CycleError::NonFinite { .. } => None
        }
    }
}

pub(crate) fn require_positive(parameter: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(CycleError::invalid(parameter, value, "value must be a finite number"));
    }
    if value <= 0.0 {
        return Err(CycleError::invalid(parameter, value, "value must be greater than zero"));
    }
    Ok(value)
}

pub(crate) fn require_greater_than(parameter: &'static str,
                                   value: f64,
                                   bound: f64,
                                   bound_name: &str) -> Result<f64> {
    if !value.is_finite() {
        return Err(CycleError::invalid(parameter, value, "value must be a finite number"));
    }
    if value <= bound {
        return Err(CycleError::invalid(parameter, value, format!("value must be greater than {} ({})", bound_name, bound)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use crate::error::{require_greater_than, require_positive, CycleError};

    #[test]
    fn positive_check() {
        assert_eq!(require_positive("t1", 300.0), Ok(300.0));
        assert_eq!(require_positive("t1", 0.0).unwrap_err().parameter(), Some("t1"));
        assert!(require_positive("p1", f64::NAN).is_err());
        assert!(require_positive("p1", f64::INFINITY).is_err());
    }

    #[test]
    fn bound_check() {
        assert!(require_greater_than("compression_ratio", 1.5, 1.0, "one").is_ok());
        let err = require_greater_than("compression_ratio", 1.0, 1.0, "one").unwrap_err();
        assert!(matches!(err, CycleError::InvalidParameter { parameter: "compression_ratio", .. }));
        assert_eq!(err.to_string(), "invalid compression_ratio `1`. value must be greater than one (1)");
    }
}
