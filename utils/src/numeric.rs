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

/// Default relative tolerance used when cross-checking derived quantities
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-6;

pub fn round_float_to(float: f64, decimal_places: u32) -> f64 {
    let precision_base: u64 = 10;
    let precision_factor = precision_base.pow(decimal_places) as f64;
    (float * precision_factor).round() / precision_factor
}

/// Compare two floats using a tolerance relative to the larger magnitude.
///
/// Values that are both (close to) zero compare equal when their absolute
/// difference is within `relative_tolerance` itself.
pub fn approx_eq_relative(a: f64, b: f64, relative_tolerance: f64) -> bool {
    if a == b {
        return true;
    }
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    let diff = (a - b).abs();
    let scale = a.abs().max(b.abs());
    if scale < 1.0 {
        return diff <= relative_tolerance;
    }
    diff <= relative_tolerance * scale
}

pub fn approx_eq_absolute(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

pub fn is_finite_positive(val: f64) -> bool {
    val.is_finite() && val > 0.0
}

pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Clamp `val` into the inclusive range `[min, max]`. NaN is mapped to `min`
pub fn clamp_to_range(val: f64, min: f64, max: f64) -> f64 {
    if val.is_nan() {
        return min;
    }
    val.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use crate::numeric::{approx_eq_absolute, approx_eq_relative, clamp_to_range, is_finite_positive, lerp, round_float_to};

    #[test]
    fn round_float_tests() {
        assert_eq!(round_float_to(0.60189, 2), 0.6);
        assert_eq!(round_float_to(3.14159, 3), 3.142);
        assert_eq!(round_float_to(-1.005, 0), -1.0);
    }

    #[test]
    fn relative_comparison_tests() {
        assert!(approx_eq_relative(1000.0, 1000.0005, 1e-6));
        assert!(!approx_eq_relative(1000.0, 1000.01, 1e-6));
        assert!(approx_eq_relative(0.0, 1e-9, 1e-6));
        assert!(!approx_eq_relative(f64::NAN, f64::NAN, 1e-6));
        assert!(!approx_eq_relative(f64::INFINITY, 1.0, 1e-6));
        assert!(approx_eq_absolute(0.5, 0.5004, 1e-3));
    }

    #[test]
    fn positive_tests() {
        assert_eq!(is_finite_positive(1.0), true);
        assert_eq!(is_finite_positive(0.0), false);
        assert_eq!(is_finite_positive(-2.0), false);
        assert_eq!(is_finite_positive(f64::INFINITY), false);
        assert_eq!(is_finite_positive(f64::NAN), false);
    }

    #[test]
    fn interpolation_and_clamp_tests() {
        assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
        assert_eq!(lerp(4.0, 2.0, 1.0), 2.0);
        assert_eq!(clamp_to_range(20.0, 5.0, 15.0), 15.0);
        assert_eq!(clamp_to_range(1.0, 5.0, 15.0), 5.0);
        assert_eq!(clamp_to_range(7.5, 5.0, 15.0), 7.5);
        assert_eq!(clamp_to_range(f64::NAN, 5.0, 15.0), 5.0);
    }
}
