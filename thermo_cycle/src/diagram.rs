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

//! Dense sampling of a cycle's processes for P-V and T-S charts.

use serde::Serialize;
use utils::numeric::{approx_eq_relative, lerp};

use crate::cycle::ThermodynamicCycle;
use crate::error::{CycleError, Result};
use crate::process::{Process, ProcessKind};
use crate::state::{StateFrame, ThermodynamicState};

pub const DEFAULT_SEGMENTS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiagramPoint {
    pub process_index: usize,
    pub pressure: f64,
    pub volume: f64,
    pub temperature: f64,
    pub entropy: f64,
    pub enthalpy: f64
}

impl DiagramPoint {
    fn new(process_index: usize, state: &ThermodynamicState) -> DiagramPoint {
        DiagramPoint {
            process_index,
            pressure: state.pressure,
            volume: state.volume,
            temperature: state.temperature,
            entropy: state.entropy,
            enthalpy: state.enthalpy
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleDiagram {
    points: Vec<DiagramPoint>,
    segments: usize
}

impl CycleDiagram {
    pub fn sample(cycle: &ThermodynamicCycle) -> CycleDiagram {
        CycleDiagram::sample_processes(cycle, DEFAULT_SEGMENTS)
    }

    /// Sample each process with `segments` equal steps, giving
    /// `segments + 1` points per process
    pub fn with_segments(cycle: &ThermodynamicCycle, segments: usize) -> Result<CycleDiagram> {
        if segments == 0 {
            return Err(CycleError::invalid("segments", 0.0, "at least one segment is needed per process"));
        }
        Ok(CycleDiagram::sample_processes(cycle, segments))
    }

    fn sample_processes(cycle: &ThermodynamicCycle, segments: usize) -> CycleDiagram {
        let mut points = Vec::with_capacity(cycle.processes().len() * (segments + 1));
        if let Some(start) = cycle.start_state() {
            let frame = StateFrame::new(cycle.working_fluid(), start.temperature, start.volume);
            for (index, process) in cycle.processes().iter().enumerate() {
                points.push(DiagramPoint::new(index, &process.start));
                for step in 1..segments {
                    let t = step as f64 / segments as f64;
                    let (pressure, volume) = interpolate(process, frame.fluid().gamma(), t);
                    points.push(DiagramPoint::new(index, &frame.at_pressure_volume(pressure, volume)));
                }
                points.push(DiagramPoint::new(index, &process.end));
            }
        }
        CycleDiagram { points, segments }
    }

    pub fn points(&self) -> &[DiagramPoint] {
        &self.points
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn process_points(&self, process_index: usize) -> impl Iterator<Item = &DiagramPoint> {
        self.points.iter().filter(move |p| p.process_index == process_index)
    }

    /// `(volume, pressure)` pairs
    pub fn pv_series(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.volume, p.pressure)).collect()
    }

    /// `(entropy, temperature)` pairs
    pub fn ts_series(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.entropy, p.temperature)).collect()
    }
}

fn interpolate(process: &Process, gamma: f64, t: f64) -> (f64, f64) {
    let p1 = process.start.pressure;
    let v1 = process.start.volume;
    let p2 = process.end.pressure;
    let v2 = process.end.volume;
    let volume = lerp(v1, v2, t);
    let pressure = match process.kind {
        ProcessKind::Isothermal => p1 * v1 / volume,
        ProcessKind::Adiabatic => p1 * (v1 / volume).powf(gamma),
        ProcessKind::Isobaric => p1,
        ProcessKind::Isochoric => lerp(p1, p2, t),
        ProcessKind::Polytropic => match polytropic_exponent(p1, v1, p2, v2) {
            Some(n) => p1 * (v1 / volume).powf(n),
            None => lerp(p1, p2, t)
        }
    };
    (pressure, volume)
}

fn polytropic_exponent(p1: f64, v1: f64, p2: f64, v2: f64) -> Option<f64> {
    if approx_eq_relative(v1, v2, 1e-12) {
        return None;
    }
    let n = (p1 / p2).ln() / (v2 / v1).ln();
    n.is_finite().then_some(n)
}
