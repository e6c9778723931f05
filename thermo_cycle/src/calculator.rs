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
use tracing::{debug, warn};
use utils::numeric::DEFAULT_RELATIVE_TOLERANCE;

use crate::cycle::{CycleKind, ThermodynamicCycle};
use crate::error::{require_greater_than, require_positive, CycleError, Result};
use crate::fluid::WorkingFluid;
use crate::ideal_gas;
use crate::process::{Process, ProcessKind};
use crate::state::StateFrame;

/// Relative tolerance for the net work / net heat cross-check
pub const FIRST_LAW_TOLERANCE: f64 = DEFAULT_RELATIVE_TOLERANCE;
/// Largest accepted gap between closed-form and work-derived efficiency
pub const EFFICIENCY_TOLERANCE: f64 = 1e-3;
/// Relative tolerance for rebuilding each leg's end state from its start
pub const LEG_TOLERANCE: f64 = 1e-9;

/// Boundary conditions for one cycle. Each variant carries only what its
/// formulas need.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cycle", rename_all = "lowercase")]
pub enum CycleParameters {
    Carnot {
        t_hot: f64,
        t_cold: f64,
        v_max: f64,
        v_min: f64
    },
    Otto {
        compression_ratio: f64,
        p1: f64,
        t1: f64,
        heat_in: f64
    },
    Diesel {
        compression_ratio: f64,
        cutoff_ratio: f64,
        p1: f64,
        t1: f64
    }
}

impl CycleParameters {
    pub fn kind(&self) -> CycleKind {
        match self {
            CycleParameters::Carnot { .. } => CycleKind::Carnot,
            CycleParameters::Otto { .. } => CycleKind::Otto,
            CycleParameters::Diesel { .. } => CycleKind::Diesel
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            CycleParameters::Carnot { t_hot, t_cold, v_max, v_min } => {
                require_positive("t_cold", t_cold)?;
                require_greater_than("t_hot", t_hot, t_cold, "t_cold")?;
                require_positive("v_min", v_min)?;
                require_greater_than("v_max", v_max, v_min, "v_min")?;
            }
            CycleParameters::Otto { compression_ratio, p1, t1, heat_in } => {
                require_greater_than("compression_ratio", compression_ratio, 1.0, "one")?;
                require_positive("p1", p1)?;
                require_positive("t1", t1)?;
                require_positive("heat_in", heat_in)?;
            }
            CycleParameters::Diesel { compression_ratio, cutoff_ratio, p1, t1 } => {
                require_greater_than("compression_ratio", compression_ratio, 1.0, "one")?;
                require_greater_than("cutoff_ratio", cutoff_ratio, 1.0, "one")?;
                require_positive("p1", p1)?;
                require_positive("t1", t1)?;
            }
        }
        Ok(())
    }
}

pub fn calculate(params: &CycleParameters, fluid: &WorkingFluid) -> Result<ThermodynamicCycle> {
    match *params {
        CycleParameters::Carnot { t_hot, t_cold, v_max, v_min } => carnot(t_hot, t_cold, v_max, v_min, fluid),
        CycleParameters::Otto { compression_ratio, p1, t1, heat_in } => otto(compression_ratio, p1, t1, heat_in, fluid),
        CycleParameters::Diesel { compression_ratio, cutoff_ratio, p1, t1 } => diesel(compression_ratio, cutoff_ratio, p1, t1, fluid)
    }
}

/// Isothermal expansion at `t_hot`, adiabatic expansion to `t_cold`,
/// isothermal compression at `t_cold` and adiabatic compression back to the
/// start.
///
/// The cold isotherm ends on the adiabat through state 1, which puts it at
/// `v_min · (t_hot / t_cold)^(1/(γ-1))`.
pub fn carnot(t_hot: f64, t_cold: f64, v_max: f64, v_min: f64, fluid: &WorkingFluid) -> Result<ThermodynamicCycle> {
    CycleParameters::Carnot { t_hot, t_cold, v_max, v_min }.validate()?;
    fluid.validate()?;

    let r = fluid.r();
    let cv = fluid.cv();
    let expansion = (t_hot / t_cold).powf(1.0 / (fluid.gamma() - 1.0));
    let frame = StateFrame::new(fluid, t_hot, v_min);

    let state_1 = frame.state(ideal_gas::pressure(v_min, t_hot, r), v_min, t_hot);
    let state_2 = frame.state(ideal_gas::pressure(v_max, t_hot, r), v_max, t_hot);
    let v3 = v_max * expansion;
    let state_3 = frame.state(ideal_gas::pressure(v3, t_cold, r), v3, t_cold);
    let v4 = v_min * expansion;
    let state_4 = frame.state(ideal_gas::pressure(v4, t_cold, r), v4, t_cold);

    let heat_in = r * t_hot * (v_max / v_min).ln();
    let heat_out = r * t_cold * (v3 / v4).ln();
    let adiabatic_work = cv * (t_hot - t_cold);

    let processes = vec![
        Process::new("1-2", ProcessKind::Isothermal, state_1, state_2, heat_in, heat_in),
        Process::new("2-3", ProcessKind::Adiabatic, state_2, state_3, adiabatic_work, 0.0),
        Process::new("3-4", ProcessKind::Isothermal, state_3, state_4, -heat_out, -heat_out),
        Process::new("4-1", ProcessKind::Adiabatic, state_4, state_1, cv * (t_cold - t_hot), 0.0),
    ];
    let efficiency = 1.0 - t_cold / t_hot;
    finish(ThermodynamicCycle::new(CycleKind::Carnot, processes, fluid.clone(), efficiency))
}

/// Adiabatic compression, constant-volume heat addition, adiabatic expansion
/// and constant-volume heat rejection
pub fn otto(compression_ratio: f64, p1: f64, t1: f64, heat_in: f64, fluid: &WorkingFluid) -> Result<ThermodynamicCycle> {
    CycleParameters::Otto { compression_ratio, p1, t1, heat_in }.validate()?;
    fluid.validate()?;

    let gamma = fluid.gamma();
    let cv = fluid.cv();
    let v1 = ideal_gas::volume(p1, t1, fluid.r());
    let v2 = v1 / compression_ratio;
    let frame = StateFrame::new(fluid, t1, v1);

    let t2 = ideal_gas::isentropic_temperature_volume(t1, v1, v2, gamma);
    let p2 = ideal_gas::isentropic_pressure_volume(p1, v1, v2, gamma);
    let t3 = t2 + heat_in / cv;
    let p3 = p2 * (t3 / t2);
    let t4 = ideal_gas::isentropic_temperature_volume(t3, v2, v1, gamma);
    let p4 = ideal_gas::isentropic_pressure_volume(p3, v2, v1, gamma);

    let state_1 = frame.state(p1, v1, t1);
    let state_2 = frame.state(p2, v2, t2);
    let state_3 = frame.state(p3, v2, t3);
    let state_4 = frame.state(p4, v1, t4);

    let heat_rejection = cv * (t1 - t4);
    let processes = vec![
        Process::new("1-2", ProcessKind::Adiabatic, state_1, state_2, cv * (t1 - t2), 0.0),
        Process::new("2-3", ProcessKind::Isochoric, state_2, state_3, 0.0, heat_in),
        Process::new("3-4", ProcessKind::Adiabatic, state_3, state_4, cv * (t3 - t4), 0.0),
        Process::new("4-1", ProcessKind::Isochoric, state_4, state_1, 0.0, heat_rejection),
    ];
    let efficiency = 1.0 - compression_ratio.powf(-(gamma - 1.0));
    finish(ThermodynamicCycle::new(CycleKind::Otto, processes, fluid.clone(), efficiency))
}

/// Adiabatic compression, constant-pressure heat addition up to the cutoff
/// volume, adiabatic expansion and constant-volume heat rejection
pub fn diesel(compression_ratio: f64, cutoff_ratio: f64, p1: f64, t1: f64, fluid: &WorkingFluid) -> Result<ThermodynamicCycle> {
    CycleParameters::Diesel { compression_ratio, cutoff_ratio, p1, t1 }.validate()?;
    fluid.validate()?;

    let gamma = fluid.gamma();
    let cv = fluid.cv();
    let v1 = ideal_gas::volume(p1, t1, fluid.r());
    let v2 = v1 / compression_ratio;
    let frame = StateFrame::new(fluid, t1, v1);

    let t2 = ideal_gas::isentropic_temperature_volume(t1, v1, v2, gamma);
    let p2 = ideal_gas::isentropic_pressure_volume(p1, v1, v2, gamma);
    let v3 = v2 * cutoff_ratio;
    let t3 = t2 * cutoff_ratio;
    let p3 = p2;
    let t4 = ideal_gas::isentropic_temperature_volume(t3, v3, v1, gamma);
    let p4 = ideal_gas::isentropic_pressure_volume(p3, v3, v1, gamma);

    let state_1 = frame.state(p1, v1, t1);
    let state_2 = frame.state(p2, v2, t2);
    let state_3 = frame.state(p3, v3, t3);
    let state_4 = frame.state(p4, v1, t4);

    let heat_addition = fluid.cp() * (t3 - t2);
    let heat_rejection = cv * (t1 - t4);
    let processes = vec![
        Process::new("1-2", ProcessKind::Adiabatic, state_1, state_2, cv * (t1 - t2), 0.0),
        Process::new("2-3", ProcessKind::Isobaric, state_2, state_3, p2 * (v3 - v2), heat_addition),
        Process::new("3-4", ProcessKind::Adiabatic, state_3, state_4, cv * (t3 - t4), 0.0),
        Process::new("4-1", ProcessKind::Isochoric, state_4, state_1, 0.0, heat_rejection),
    ];
    let efficiency = 1.0 - (1.0 / compression_ratio.powf(gamma - 1.0))
        * (cutoff_ratio.powf(gamma) - 1.0) / (gamma * (cutoff_ratio - 1.0));
    finish(ThermodynamicCycle::new(CycleKind::Diesel, processes, fluid.clone(), efficiency))
}

fn finish(cycle: ThermodynamicCycle) -> Result<ThermodynamicCycle> {
    if let Some(quantity) = cycle.first_non_finite() {
        return Err(CycleError::NonFinite { quantity });
    }
    if !cycle.satisfies_first_law(FIRST_LAW_TOLERANCE) {
        warn!("{} with {}: net work {} doesn't match net heat {}",
            cycle.name(), cycle.working_fluid().name(), cycle.net_work(), cycle.net_heat());
    }
    if let Some(label) = cycle.inconsistent_leg(LEG_TOLERANCE) {
        warn!("{} with {}: process {} doesn't follow its governing relation",
            cycle.name(), cycle.working_fluid().name(), label);
    }
    if cycle.efficiency_discrepancy() > EFFICIENCY_TOLERANCE {
        warn!("{} with {}: closed-form efficiency {:.5} differs from work-derived {:.5}",
            cycle.name(), cycle.working_fluid().name(), cycle.efficiency(), cycle.work_efficiency());
    }
    debug!("Calculated {} with {}. Efficiency {:.4}, net work {:.3} kJ/kg",
        cycle.name(), cycle.working_fluid().name(), cycle.efficiency(), cycle.net_work());
    Ok(cycle)
}
