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
use serde::{Deserialize, Serialize};

use crate::state::ThermodynamicState;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessKind {
    Isothermal,
    Adiabatic,
    Isobaric,
    Isochoric,
    Polytropic
}

impl ProcessKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessKind::Isothermal => "isothermal",
            ProcessKind::Adiabatic => "adiabatic",
            ProcessKind::Isobaric => "isobaric",
            ProcessKind::Isochoric => "isochoric",
            ProcessKind::Polytropic => "polytropic"
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProcessKind::Isothermal => "Isothermal",
            ProcessKind::Adiabatic => "Adiabatic",
            ProcessKind::Isobaric => "Isobaric",
            ProcessKind::Isochoric => "Isochoric",
            ProcessKind::Polytropic => "Polytropic"
        }
    }

    /// The state variable held fixed along the process, if any
    pub fn constant_property(&self) -> Option<&'static str> {
        match self {
            ProcessKind::Isothermal => Some("temperature"),
            ProcessKind::Adiabatic => Some("entropy"),
            ProcessKind::Isobaric => Some("pressure"),
            ProcessKind::Isochoric => Some("volume"),
            ProcessKind::Polytropic => None
        }
    }
}

impl Display for ProcessKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One leg of a cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub label: String,
    pub kind: ProcessKind,
    pub start: ThermodynamicState,
    pub end: ThermodynamicState,
    pub work: f64,
    pub heat: f64
}

impl Process {
    pub fn new(label: impl Into<String>,
               kind: ProcessKind,
               start: ThermodynamicState,
               end: ThermodynamicState,
               work: f64,
               heat: f64) -> Process {
        Process { label: label.into(), kind, start, end, work, heat }
    }

    /// First law for the leg: `ΔU = Q - W`
    pub fn internal_energy_change(&self) -> f64 {
        self.heat - self.work
    }

    pub fn entropy_change(&self) -> f64 {
        self.end.entropy - self.start.entropy
    }
}

#[cfg(test)]
mod tests {
    use crate::process::{Process, ProcessKind};
    use crate::state::ThermodynamicState;

    #[test]
    fn kind_strings() {
        assert_eq!(ProcessKind::Isochoric.as_str(), "isochoric");
        assert_eq!(ProcessKind::Isobaric.to_string(), "Isobaric");
        assert_eq!(ProcessKind::Adiabatic.constant_property(), Some("entropy"));
        assert_eq!(ProcessKind::Polytropic.constant_property(), None);
        assert_eq!(serde_json::to_string(&ProcessKind::Isothermal).unwrap(), "\"isothermal\"");
    }

    #[test]
    fn energy_balance() {
        let start = ThermodynamicState { temperature: 300.0, ..Default::default() };
        let end = ThermodynamicState { temperature: 400.0, entropy: 0.25, ..Default::default() };
        let process = Process::new("2-3", ProcessKind::Isochoric, start, end, 0.0, 71.8);
        assert_eq!(process.internal_energy_change(), 71.8);
        assert_eq!(process.entropy_change(), 0.25);
        assert_eq!(process.label, "2-3");
    }
}
