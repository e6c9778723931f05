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

use itertools::Itertools;
use serde::Serialize;
use utils::numeric::round_float_to;
use utils::units::{kelvin_to_celsius, kw_to_bhp, rad_per_sec_to_rpm};

use gear_train::{GearProfile, GearTrain, Toothed};
use thermo_cycle::{describe, ThermodynamicCycle};

#[derive(Serialize)]
struct JsonReport<'a> {
    gear_train: &'a GearTrain,
    cycle: &'a ThermodynamicCycle,
    mass_flow_rate: f64,
    net_power: f64
}

/// Everything written to stdout for one run: a single JSON document when
/// `as_json` is set, otherwise the text report
pub fn render(train: &GearTrain,
              cycle: &ThermodynamicCycle,
              mass_flow_rate: f64,
              as_json: bool) -> serde_json::Result<String> {
    if as_json {
        return serde_json::to_string_pretty(&JsonReport {
            gear_train: train,
            cycle,
            mass_flow_rate,
            net_power: cycle.net_power(mass_flow_rate)
        });
    }
    Ok(format!("{}\n\n{}", gear_report(train), cycle_report(cycle, mass_flow_rate)))
}

/// Ratios are always shown against a single turn of the driver
pub fn format_ratio(ratio: f64) -> String {
    format!("1:{:.2}", round_float_to(ratio, 2))
}

pub fn gear_report(train: &GearTrain) -> String {
    let gears = train.gears();
    let mut lines = vec![format!("Gear train ({} gears)", train.len())];
    for pair in train.pairs() {
        lines.push(format!(
            "  {} ({}T) -> {} ({}T): speed {} torque {}",
            gears[pair.driver_index].name(),
            pair.driver_teeth,
            gears[pair.driven_index].name(),
            pair.driven_teeth,
            format_ratio(pair.speed_ratio),
            format_ratio(pair.torque_ratio)
        ));
    }
    lines.push(format!("  Total ratio {}", format_ratio(train.total_ratio())));
    for (gear, speed) in gears.iter().zip(train.rotation_speeds()) {
        let profile = GearProfile::for_gear(gear);
        lines.push(format!(
            "  {}: {}T at x={:.2}, tip radius {:.3}, {:.3} rad/s ({:.1} rpm)",
            gear.name(),
            gear.teeth(),
            gear.position().x,
            profile.tip_radius(),
            speed,
            rad_per_sec_to_rpm(speed)
        ));
    }
    lines.join("\n")
}

pub fn cycle_report(cycle: &ThermodynamicCycle, mass_flow_rate: f64) -> String {
    let description = describe(cycle.kind());
    let mut lines = vec![
        format!("{} with {}", cycle.name(), cycle.working_fluid().name()),
        format!("  {}", description.description),
        format!("  Applications: {}", description.applications),
        format!("  Process sequence: {}", cycle.processes().iter().map(|p| p.kind.display_name()).join(" -> ")),
    ];
    for process in cycle.processes() {
        lines.push(format!("  {} {}: work {:+.2} kJ/kg, heat {:+.2} kJ/kg",
                           process.label, process.kind, process.work, process.heat));
    }
    for (index, state) in cycle.state_points().iter().enumerate() {
        lines.push(format!("  State {}: P {:.1} kPa, V {:.4} m³/kg, T {:.1} K ({:.1} °C)",
                           index + 1,
                           state.pressure,
                           state.volume,
                           state.temperature,
                           kelvin_to_celsius(state.temperature)));
    }
    let power = cycle.net_power(mass_flow_rate);
    lines.push(format!("  Efficiency {:.2}% ({}), work-derived {:.2}%",
                       round_float_to(cycle.efficiency() * 100.0, 2),
                       description.efficiency_formula,
                       round_float_to(cycle.work_efficiency() * 100.0, 2)));
    lines.push(format!("  Net work {:.2} kJ/kg, net heat {:.2} kJ/kg", cycle.net_work(), cycle.net_heat()));
    lines.push(format!("  Net power {:.2} kW ({:.2} bhp) at {} kg/s",
                       power, kw_to_bhp(power), mass_flow_rate));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use gear_train::GearTrain;
    use thermo_cycle::{otto, WorkingFluid};
    use crate::report::{cycle_report, format_ratio, gear_report, render};

    #[test]
    fn ratio_format() {
        assert_eq!(format_ratio(2.0), "1:2.00");
        assert_eq!(format_ratio(0.5), "1:0.50");
        assert_eq!(format_ratio(40.0 / 30.0), "1:1.33");
    }

    #[test]
    fn gear_lines() {
        let train = GearTrain::new(&[20, 40, 10], 1.0).unwrap();
        let report = gear_report(&train);
        assert!(report.starts_with("Gear train (3 gears)"));
        assert!(report.contains("Driver Gear (20T) -> Driven Gear (40T): speed 1:0.50 torque 1:2.00"));
        assert!(report.contains("Driven Gear (40T) -> Gear 3 (10T): speed 1:4.00"));
        assert!(report.contains("Total ratio 1:2.00"));
    }

    #[test]
    fn json_output_is_one_document() {
        let train = GearTrain::new(&[20, 40], 1.0).unwrap();
        let cycle = otto(10.0, 100.0, 300.0, 800.0, &WorkingFluid::air()).unwrap();
        let output = render(&train, &cycle, 1.5, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["cycle"]["id"], "otto");
        assert_eq!(value["cycle"]["processes"].as_array().unwrap().len(), 4);
        assert_eq!(value["gear_train"]["gears"].as_array().unwrap().len(), 2);
        assert_eq!(value["mass_flow_rate"], 1.5);
        assert!(value["net_power"].as_f64().unwrap() > 0.0);

        let text = render(&train, &cycle, 1.5, false).unwrap();
        assert!(text.starts_with("Gear train (2 gears)"));
        assert!(text.contains("Otto Cycle with Air"));
        assert!(serde_json::from_str::<serde_json::Value>(&text).is_err());
    }

    #[test]
    fn cycle_lines() {
        let cycle = otto(10.0, 100.0, 300.0, 800.0, &WorkingFluid::air()).unwrap();
        let report = cycle_report(&cycle, 1.0);
        assert!(report.starts_with("Otto Cycle with Air"));
        assert!(report.contains("Efficiency 60.19%"));
        assert!(report.contains("State 1: P 100.0 kPa"));
        assert!(report.contains("2-3 "));
        assert_eq!(report.matches("State ").count(), 4);
    }
}
