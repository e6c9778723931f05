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

//! Idealised closed-system heat engine cycles.
//!
//! All quantities are specific (per kg of working fluid): pressures in kPa,
//! volumes in m³/kg, temperatures in K, work, heat and enthalpy in kJ/kg and
//! entropy in kJ/kg·K. Work is positive when done by the gas and heat is
//! positive when added to it.

pub mod calculator;
pub mod cycle;
pub mod diagram;
pub mod error;
pub mod fluid;
pub mod ideal_gas;
pub mod presets;
pub mod process;
pub mod state;

pub use calculator::{calculate, carnot, diesel, otto, CycleParameters};
pub use cycle::{CycleKind, ThermodynamicCycle};
pub use diagram::{CycleDiagram, DiagramPoint, DEFAULT_SEGMENTS};
pub use error::{CycleError, Result};
pub use fluid::{FluidKind, WorkingFluid};
pub use presets::{describe, CycleDescription, ParameterRange, Preset, SimulationParameters};
pub use process::{Process, ProcessKind};
pub use state::{StateFrame, ThermodynamicState};
