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
use utils::numeric::clamp_to_range;

use crate::calculator::CycleParameters;
use crate::cycle::CycleKind;

pub const REFERENCE_TEMPERATURE: f64 = 300.0;
pub const REFERENCE_PRESSURE: f64 = 100.0;
pub const CARNOT_MAX_VOLUME: f64 = 0.1;
pub const CARNOT_MIN_VOLUME: f64 = 0.01;
pub const OTTO_HEAT_INPUT: f64 = 800.0;
pub const DEFAULT_CUTOFF_RATIO: f64 = 2.0;

/// Inclusive bounds of one user-adjustable input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64
}

impl ParameterRange {
    pub const fn new(min: f64, max: f64) -> ParameterRange {
        ParameterRange { min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        clamp_to_range(value, self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const COMPRESSION_RATIO_RANGE: ParameterRange = ParameterRange::new(5.0, 15.0);
pub const PRESSURE_RATIO_RANGE: ParameterRange = ParameterRange::new(2.0, 20.0);
pub const TEMPERATURE_RATIO_RANGE: ParameterRange = ParameterRange::new(2.0, 8.0);
pub const ISENTROPIC_EFFICIENCY_RANGE: ParameterRange = ParameterRange::new(0.5, 0.95);
pub const MASS_FLOW_RATE_RANGE: ParameterRange = ParameterRange::new(0.1, 5.0);

/// The values behind the cycle controls.
///
/// Pressure ratio and isentropic efficiency are carried for display only,
/// none of the implemented cycles consume them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub pressure_ratio: f64,
    pub temperature_ratio: f64,
    pub compression_ratio: f64,
    pub cutoff_ratio: Option<f64>,
    pub isentropic_efficiency: f64,
    pub mass_flow_rate: f64
}

impl SimulationParameters {
    /// A copy with every ranged field pinned into its range
    pub fn clamped(&self) -> SimulationParameters {
        SimulationParameters {
            pressure_ratio: PRESSURE_RATIO_RANGE.clamp(self.pressure_ratio),
            temperature_ratio: TEMPERATURE_RATIO_RANGE.clamp(self.temperature_ratio),
            compression_ratio: COMPRESSION_RATIO_RANGE.clamp(self.compression_ratio),
            cutoff_ratio: self.cutoff_ratio,
            isentropic_efficiency: ISENTROPIC_EFFICIENCY_RANGE.clamp(self.isentropic_efficiency),
            mass_flow_rate: MASS_FLOW_RATE_RANGE.clamp(self.mass_flow_rate)
        }
    }

    pub fn with_cutoff_ratio(&self, cutoff_ratio: f64) -> SimulationParameters {
        SimulationParameters { cutoff_ratio: Some(cutoff_ratio), ..*self }
    }

    /// Inputs for one cycle, starting from the reference intake state
    pub fn cycle_parameters(&self, kind: CycleKind) -> CycleParameters {
        match kind {
            CycleKind::Carnot => CycleParameters::Carnot {
                t_hot: REFERENCE_TEMPERATURE * self.temperature_ratio,
                t_cold: REFERENCE_TEMPERATURE,
                v_max: CARNOT_MAX_VOLUME,
                v_min: CARNOT_MIN_VOLUME
            },
            CycleKind::Otto => CycleParameters::Otto {
                compression_ratio: self.compression_ratio,
                p1: REFERENCE_PRESSURE,
                t1: REFERENCE_TEMPERATURE,
                heat_in: OTTO_HEAT_INPUT
            },
            CycleKind::Diesel => CycleParameters::Diesel {
                compression_ratio: self.compression_ratio,
                cutoff_ratio: self.cutoff_ratio.unwrap_or(DEFAULT_CUTOFF_RATIO),
                p1: REFERENCE_PRESSURE,
                t1: REFERENCE_TEMPERATURE
            }
        }
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Preset::Standard.parameters()
    }
}

impl CycleParameters {
    /// Used when no cycle could be selected
    pub fn fallback() -> CycleParameters {
        CycleParameters::Carnot {
            t_hot: 2.0 * REFERENCE_TEMPERATURE,
            t_cold: REFERENCE_TEMPERATURE,
            v_max: CARNOT_MAX_VOLUME,
            v_min: CARNOT_MIN_VOLUME
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Preset {
    HighEfficiency,
    Standard,
    HighPerformance,
    Economic
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::HighEfficiency,
        Preset::Standard,
        Preset::HighPerformance,
        Preset::Economic
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::HighEfficiency => "highEfficiency",
            Preset::Standard => "standard",
            Preset::HighPerformance => "highPerformance",
            Preset::Economic => "economic"
        }
    }

    pub fn from_id(id: &str) -> Option<Preset> {
        let id = id.trim();
        Preset::ALL.into_iter().find(|p| p.as_str().eq_ignore_ascii_case(id))
    }

    pub fn parameters(&self) -> SimulationParameters {
        let (pressure_ratio, temperature_ratio, compression_ratio, isentropic_efficiency, mass_flow_rate) = match self {
            Preset::HighEfficiency => (15.0, 6.0, 12.0, 0.92, 1.2),
            Preset::Standard => (8.0, 4.0, 10.0, 0.85, 1.0),
            Preset::HighPerformance => (18.0, 7.0, 14.0, 0.88, 1.5),
            Preset::Economic => (6.0, 3.0, 8.0, 0.82, 0.8)
        };
        SimulationParameters {
            pressure_ratio,
            temperature_ratio,
            compression_ratio,
            cutoff_ratio: None,
            isentropic_efficiency,
            mass_flow_rate
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleDescription {
    pub name: &'static str,
    pub description: &'static str,
    pub applications: &'static str,
    pub efficiency_formula: &'static str
}

pub fn describe(kind: CycleKind) -> CycleDescription {
    match kind {
        CycleKind::Carnot => CycleDescription {
            name: kind.display_name(),
            description: "The most efficient possible thermodynamic cycle, consisting of two isothermal and two adiabatic processes.",
            applications: "Theoretical maximum efficiency reference",
            efficiency_formula: "1 - T_cold/T_hot"
        },
        CycleKind::Otto => CycleDescription {
            name: kind.display_name(),
            description: "The ideal cycle for spark-ignition internal combustion engines, with constant volume heat addition.",
            applications: "Gasoline engines, automotive engines",
            efficiency_formula: "1 - 1/r^(γ-1)"
        },
        CycleKind::Diesel => CycleDescription {
            name: kind.display_name(),
            description: "The ideal cycle for compression-ignition engines, with constant pressure heat addition.",
            applications: "Diesel engines, heavy machinery",
            efficiency_formula: "1 - (1/r^(γ-1)) * (ρ^γ - 1)/(γ(ρ - 1))"
        }
    }
}
