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

use std::fmt::{Display, Formatter};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use utils::numeric::approx_eq_relative;

use crate::fluid::WorkingFluid;
use crate::ideal_gas;
use crate::process::{Process, ProcessKind};
use crate::state::ThermodynamicState;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleKind {
    Carnot,
    Otto,
    Diesel
}

impl CycleKind {
    pub const ALL: [CycleKind; 3] = [CycleKind::Carnot, CycleKind::Otto, CycleKind::Diesel];

    pub fn as_str(&self) -> &'static str {
        match self {
            CycleKind::Carnot => "carnot",
            CycleKind::Otto => "otto",
            CycleKind::Diesel => "diesel"
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CycleKind::Carnot => "Carnot Cycle",
            CycleKind::Otto => "Otto Cycle",
            CycleKind::Diesel => "Diesel Cycle"
        }
    }

    pub fn from_id(id: &str) -> Option<CycleKind> {
        CycleKind::ALL.into_iter().find(|k| k.as_str().eq_ignore_ascii_case(id.trim()))
    }

    /// The fixed sequence of process kinds making up the cycle
    pub fn shape(&self) -> [ProcessKind; 4] {
        match self {
            CycleKind::Carnot => [ProcessKind::Isothermal, ProcessKind::Adiabatic, ProcessKind::Isothermal, ProcessKind::Adiabatic],
            CycleKind::Otto => [ProcessKind::Adiabatic, ProcessKind::Isochoric, ProcessKind::Adiabatic, ProcessKind::Isochoric],
            CycleKind::Diesel => [ProcessKind::Adiabatic, ProcessKind::Isobaric, ProcessKind::Adiabatic, ProcessKind::Isochoric]
        }
    }
}

impl Display for CycleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A fully evaluated closed cycle.
///
/// `efficiency` is the closed-form value for the cycle kind. The work-derived
/// figure is available from [`ThermodynamicCycle::work_efficiency`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermodynamicCycle {
    id: String,
    name: String,
    kind: CycleKind,
    processes: Vec<Process>,
    working_fluid: WorkingFluid,
    efficiency: f64,
    net_work: f64,
    net_heat: f64
}

impl ThermodynamicCycle {
    pub(crate) fn new(kind: CycleKind,
                      processes: Vec<Process>,
                      working_fluid: WorkingFluid,
                      efficiency: f64) -> ThermodynamicCycle {
        let net_work = processes.iter().map(|p| p.work).sum();
        let net_heat = processes.iter().map(|p| p.heat).sum();
        ThermodynamicCycle {
            id: kind.as_str().to_string(),
            name: kind.display_name().to_string(),
            kind,
            processes,
            working_fluid,
            efficiency,
            net_work,
            net_heat
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CycleKind {
        self.kind
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn working_fluid(&self) -> &WorkingFluid {
        &self.working_fluid
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    pub fn net_work(&self) -> f64 {
        self.net_work
    }

    pub fn net_heat(&self) -> f64 {
        self.net_heat
    }

    pub fn start_state(&self) -> Option<&ThermodynamicState> {
        self.processes.first().map(|p| &p.start)
    }

    /// The corner states of the cycle, one per process start
    pub fn state_points(&self) -> Vec<ThermodynamicState> {
        self.processes.iter().map(|p| p.start).collect()
    }

    pub fn heat_input(&self) -> f64 {
        self.processes.iter().map(|p| p.heat).filter(|q| *q > 0.0).sum()
    }

    /// Magnitude of the heat given up by the gas over the cycle
    pub fn heat_rejected(&self) -> f64 {
        -self.processes.iter().map(|p| p.heat).filter(|q| *q < 0.0).sum::<f64>()
    }

    /// `net work / heat input`, or zero when no heat is added
    pub fn work_efficiency(&self) -> f64 {
        let heat_input = self.heat_input();
        if heat_input <= 0.0 {
            return 0.0;
        }
        self.net_work / heat_input
    }

    pub fn efficiency_discrepancy(&self) -> f64 {
        (self.efficiency - self.work_efficiency()).abs()
    }

    /// Net power in kW for a mass flow in kg/s
    pub fn net_power(&self, mass_flow_rate: f64) -> f64 {
        self.net_work * mass_flow_rate
    }

    pub fn satisfies_first_law(&self, relative_tolerance: f64) -> bool {
        approx_eq_relative(self.net_work, self.net_heat, relative_tolerance)
    }

    /// Whether every process starts where the previous one ended and the
    /// last one ends at the first start state
    pub fn is_closed(&self, relative_tolerance: f64) -> bool {
        let (first, last) = match (self.processes.first(), self.processes.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return false
        };
        let continuous = self.processes.iter()
            .tuple_windows()
            .all(|(a, b)| a.end.approx_eq(&b.start, relative_tolerance));
        continuous && last.end.approx_eq(&first.start, relative_tolerance)
    }

    /// Label of the first process whose end state can't be rebuilt from its
    /// start with the relation its kind holds, or whose states break `P·V = R·T`.
    /// Polytropic legs are only held to the gas law.
    pub fn inconsistent_leg(&self, relative_tolerance: f64) -> Option<&str> {
        let r = self.working_fluid.r();
        let gamma = self.working_fluid.gamma();
        let obeys_gas_law = |state: &ThermodynamicState| {
            approx_eq_relative(state.pressure * state.volume, r * state.temperature, relative_tolerance)
        };
        self.processes.iter()
            .find(|p| {
                let follows_kind = match p.kind {
                    ProcessKind::Isothermal => approx_eq_relative(p.start.temperature, p.end.temperature, relative_tolerance),
                    ProcessKind::Adiabatic => {
                        let expected = ideal_gas::isentropic_temperature_pressure(p.start.temperature,
                                                                                  p.start.pressure,
                                                                                  p.end.pressure,
                                                                                  gamma);
                        approx_eq_relative(expected, p.end.temperature, relative_tolerance)
                    }
                    ProcessKind::Isobaric => approx_eq_relative(p.start.pressure, p.end.pressure, relative_tolerance),
                    ProcessKind::Isochoric => approx_eq_relative(p.start.volume, p.end.volume, relative_tolerance),
                    ProcessKind::Polytropic => true
                };
                !(follows_kind && obeys_gas_law(&p.start) && obeys_gas_law(&p.end))
            })
            .map(|p| p.label.as_str())
    }

    /// Name of the first quantity that isn't a finite number
    pub(crate) fn first_non_finite(&self) -> Option<String> {
        for process in &self.processes {
            if !process.start.is_finite() || !process.end.is_finite() {
                return Some(format!("state in process {}", process.label));
            }
            if !process.work.is_finite() {
                return Some(format!("work in process {}", process.label));
            }
            if !process.heat.is_finite() {
                return Some(format!("heat in process {}", process.label));
            }
        }
        if !self.efficiency.is_finite() {
            return Some("efficiency".to_string());
        }
        if !self.net_work.is_finite() || !self.net_heat.is_finite() {
            return Some("net work".to_string());
        }
        None
    }
}
