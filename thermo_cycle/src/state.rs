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
use utils::numeric::approx_eq_relative;

use crate::fluid::WorkingFluid;
use crate::ideal_gas;

/// A point in phase space. Entropy and enthalpy are measured from the first
/// state of the owning cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThermodynamicState {
    pub pressure: f64,
    pub volume: f64,
    pub temperature: f64,
    pub entropy: f64,
    pub enthalpy: f64
}

impl ThermodynamicState {
    pub fn approx_eq(&self, other: &ThermodynamicState, relative_tolerance: f64) -> bool {
        approx_eq_relative(self.pressure, other.pressure, relative_tolerance)
            && approx_eq_relative(self.volume, other.volume, relative_tolerance)
            && approx_eq_relative(self.temperature, other.temperature, relative_tolerance)
            && approx_eq_relative(self.entropy, other.entropy, relative_tolerance)
            && approx_eq_relative(self.enthalpy, other.enthalpy, relative_tolerance)
    }

    pub fn is_finite(&self) -> bool {
        [self.pressure, self.volume, self.temperature, self.entropy, self.enthalpy]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Fixes the working fluid and reference point that entropy and enthalpy of
/// a set of states are measured against
#[derive(Debug, Clone, Copy)]
pub struct StateFrame<'a> {
    fluid: &'a WorkingFluid,
    reference_temperature: f64,
    reference_volume: f64
}

impl<'a> StateFrame<'a> {
    pub fn new(fluid: &'a WorkingFluid, reference_temperature: f64, reference_volume: f64) -> StateFrame<'a> {
        StateFrame { fluid, reference_temperature, reference_volume }
    }

    pub fn fluid(&self) -> &'a WorkingFluid {
        self.fluid
    }

    pub fn state(&self, pressure: f64, volume: f64, temperature: f64) -> ThermodynamicState {
        ThermodynamicState {
            pressure,
            volume,
            temperature,
            entropy: ideal_gas::entropy(self.fluid.r(),
                                        self.fluid.gamma(),
                                        temperature,
                                        volume,
                                        self.reference_temperature,
                                        self.reference_volume),
            enthalpy: ideal_gas::enthalpy(self.fluid.cp(), temperature, self.reference_temperature)
        }
    }

    /// State at a pressure and volume, with temperature from the gas law
    pub fn at_pressure_volume(&self, pressure: f64, volume: f64) -> ThermodynamicState {
        self.state(pressure, volume, ideal_gas::temperature(pressure, volume, self.fluid.r()))
    }
}

#[cfg(test)]
mod tests {
    use utils::numeric::approx_eq_relative;
    use crate::fluid::WorkingFluid;
    use crate::state::StateFrame;

    #[test]
    fn reference_state_is_zero() {
        let air = WorkingFluid::air();
        let frame = StateFrame::new(&air, 300.0, 0.861);
        let state = frame.state(100.0, 0.861, 300.0);
        assert_eq!(state.entropy, 0.0);
        assert_eq!(state.enthalpy, 0.0);
        assert!(state.is_finite());
    }

    #[test]
    fn pressure_volume_state_uses_gas_law() {
        let air = WorkingFluid::air();
        let frame = StateFrame::new(&air, 300.0, 0.861);
        let state = frame.at_pressure_volume(200.0, 0.861);
        assert!(approx_eq_relative(state.temperature, 600.0, 1e-9));
        assert!(approx_eq_relative(state.enthalpy, 1.005 * 300.0, 1e-9));
        assert!(state.entropy > 0.0);
    }

    #[test]
    fn approximate_comparison() {
        let air = WorkingFluid::air();
        let frame = StateFrame::new(&air, 300.0, 0.861);
        let a = frame.state(100.0, 0.861, 300.0);
        let b = frame.state(100.0 * (1.0 + 1e-9), 0.861, 300.0);
        assert!(a.approx_eq(&b, 1e-6));
        let c = frame.state(101.0, 0.861, 300.0);
        assert!(!a.approx_eq(&c, 1e-6));
    }
}
