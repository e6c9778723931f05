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
use tracing::warn;

use crate::error::{require_greater_than, require_positive, Result};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FluidKind {
    IdealGas,
    RealGas,
    Steam
}

impl FluidKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FluidKind::IdealGas => "ideal-gas",
            FluidKind::RealGas => "real-gas",
            FluidKind::Steam => "steam"
        }
    }
}

/// Read-only gas property set every cycle formula is parameterised by.
///
/// Values are specific (per kg), in kJ/kg·K.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingFluid {
    id: String,
    name: String,
    kind: FluidKind,
    r: f64,
    cp: f64,
    cv: f64,
    gamma: f64
}

impl WorkingFluid {
    pub const DEFAULT_ID: &'static str = "air";

    /// Build an ideal gas from its gas constant and constant-volume specific
    /// heat. `cp` follows from Mayer's relation and `gamma` from `cp / cv`.
    pub fn ideal_gas(id: &str, name: &str, r: f64, cv: f64) -> Result<WorkingFluid> {
        let cp = cv + r;
        WorkingFluid::tabulated(id, name, r, cp, cv, cp / cv)
    }

    /// Build a fluid from tabulated values, keeping `gamma` as given
    pub fn tabulated(id: &str, name: &str, r: f64, cp: f64, cv: f64, gamma: f64) -> Result<WorkingFluid> {
        let fluid = WorkingFluid::from_table(id, name, r, cp, cv, gamma);
        fluid.validate()?;
        Ok(fluid)
    }

    fn from_table(id: &str, name: &str, r: f64, cp: f64, cv: f64, gamma: f64) -> WorkingFluid {
        WorkingFluid {
            id: id.to_string(),
            name: name.to_string(),
            kind: FluidKind::IdealGas,
            r, cp, cv, gamma
        }
    }

    pub fn air() -> WorkingFluid {
        WorkingFluid::from_table("air", "Air", 0.287, 1.005, 0.718, 1.4)
    }

    pub fn helium() -> WorkingFluid {
        WorkingFluid::from_table("helium", "Helium", 2.077, 5.193, 3.116, 1.67)
    }

    pub fn argon() -> WorkingFluid {
        WorkingFluid::from_table("argon", "Argon", 0.208, 0.520, 0.312, 1.67)
    }

    pub fn presets() -> Vec<WorkingFluid> {
        vec![WorkingFluid::air(), WorkingFluid::helium(), WorkingFluid::argon()]
    }

    pub fn find(id: &str) -> Option<WorkingFluid> {
        WorkingFluid::presets().into_iter().find(|f| f.id.eq_ignore_ascii_case(id))
    }

    /// Look up a preset by id, falling back to air for unknown ids
    pub fn find_or_default(id: &str) -> WorkingFluid {
        WorkingFluid::find(id).unwrap_or_else(|| {
            warn!("Unknown working fluid '{}'. Falling back to {}", id, WorkingFluid::DEFAULT_ID);
            WorkingFluid::air()
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FluidKind {
        self.kind
    }

    /// Specific gas constant
    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn cp(&self) -> f64 {
        self.cp
    }

    pub fn cv(&self) -> f64 {
        self.cv
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("r", self.r)?;
        require_positive("cv", self.cv)?;
        require_greater_than("cp", self.cp, self.cv, "cv")?;
        require_greater_than("gamma", self.gamma, 1.0, "one")?;
        Ok(())
    }
}

impl Default for WorkingFluid {
    fn default() -> Self {
        WorkingFluid::air()
    }
}
