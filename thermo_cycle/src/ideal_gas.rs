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

//! Ideal-gas relations on specific quantities.

pub fn pressure(volume: f64, temperature: f64, r: f64) -> f64 {
    (r * temperature) / volume
}

pub fn volume(pressure: f64, temperature: f64, r: f64) -> f64 {
    (r * temperature) / pressure
}

pub fn temperature(pressure: f64, volume: f64, r: f64) -> f64 {
    (pressure * volume) / r
}

/// `P2` after an isentropic change from `V1` to `V2`
pub fn isentropic_pressure_volume(p1: f64, v1: f64, v2: f64, gamma: f64) -> f64 {
    p1 * (v1 / v2).powf(gamma)
}

pub fn isentropic_temperature_pressure(t1: f64, p1: f64, p2: f64, gamma: f64) -> f64 {
    t1 * (p2 / p1).powf((gamma - 1.0) / gamma)
}

pub fn isentropic_temperature_volume(t1: f64, v1: f64, v2: f64, gamma: f64) -> f64 {
    t1 * (v1 / v2).powf(gamma - 1.0)
}

/// Entropy relative to a reference state, taken from the isentropic invariant
/// `T·V^(γ-1)` so that every adiabatic path keeps it constant
pub fn entropy(r: f64,
               gamma: f64,
               temperature: f64,
               volume: f64,
               reference_temperature: f64,
               reference_volume: f64) -> f64 {
    r * ((temperature / reference_temperature).ln() / (gamma - 1.0) + (volume / reference_volume).ln())
}

pub fn enthalpy(cp: f64, temperature: f64, reference_temperature: f64) -> f64 {
    cp * (temperature - reference_temperature)
}

#[cfg(test)]
mod tests {
    use utils::numeric::{approx_eq_absolute, approx_eq_relative};
    use crate::ideal_gas::*;

    #[test]
    fn gas_law_round_trip() {
        let p = pressure(0.861, 300.0, 0.287);
        assert!(approx_eq_relative(p, 100.0, 1e-12));
        assert!(approx_eq_relative(volume(p, 300.0, 0.287), 0.861, 1e-12));
        assert!(approx_eq_relative(temperature(p, 0.861, 0.287), 300.0, 1e-12));
    }

    #[test]
    fn isentropic_relations_agree() {
        let (p1, v1, t1, gamma) = (100.0, 0.861, 300.0, 1.4);
        let v2 = v1 / 8.0;
        let p2 = isentropic_pressure_volume(p1, v1, v2, gamma);
        let t2_from_v = isentropic_temperature_volume(t1, v1, v2, gamma);
        let t2_from_p = isentropic_temperature_pressure(t1, p1, p2, gamma);
        assert!(approx_eq_relative(t2_from_v, t2_from_p, 1e-12));
        assert!(approx_eq_relative(p2, 100.0 * 8f64.powf(1.4), 1e-12));
    }

    #[test]
    fn entropy_is_constant_along_adiabat() {
        let (r, gamma) = (0.287, 1.4);
        let t2 = isentropic_temperature_volume(300.0, 1.0, 0.1, gamma);
        let s = entropy(r, gamma, t2, 0.1, 300.0, 1.0);
        assert!(approx_eq_absolute(s, 0.0, 1e-12));
        assert_eq!(entropy(r, gamma, 300.0, 1.0, 300.0, 1.0), 0.0);
        // isothermal doubling of volume
        assert!(approx_eq_relative(entropy(r, gamma, 300.0, 2.0, 300.0, 1.0), r * 2f64.ln(), 1e-12));
    }

    #[test]
    fn enthalpy_relative_to_reference() {
        assert_eq!(enthalpy(1.005, 300.0, 300.0), 0.0);
        assert!(approx_eq_relative(enthalpy(1.005, 400.0, 300.0), 100.5, 1e-12));
    }
}
