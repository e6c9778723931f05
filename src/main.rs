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

mod export;
mod report;
mod settings;

use std::env;
use tracing::{info, warn};

use gear_train::GearTrain;
use thermo_cycle::{CycleDiagram, CycleParameters};
use crate::settings::Settings;

fn init_logging() {
    match env::current_dir() {
        Ok(current_dir) => {
            let file_appender = tracing_appender::rolling::never(current_dir, "physics_lab.log");
            let subscriber = tracing_subscriber::fmt()
                .with_writer(file_appender)
                .with_ansi(false)
                .compact()
                .finish();
            match tracing::subscriber::set_global_default(subscriber) {
                Ok(_) => {
                    info!("Logging initialised");
                }
                Err(e) => {
                    eprintln!("Failed to init logging. {}", e.to_string());
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to init logging. Couldn't determine current dir {}", e.to_string());
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Couldn't load settings. {}. Using defaults", e.to_string());
            eprintln!("Couldn't load settings. {}. Using defaults", e.to_string());
            Settings::from_defaults()?
        }
    };

    let train = GearTrain::with_layout(&settings.gear_teeth(),
                                       settings.input_speed(),
                                       settings.gear_module(),
                                       settings.gear_spacing())?;

    let parameters = settings.preset()
        .parameters()
        .with_cutoff_ratio(settings.cutoff_ratio())
        .clamped();
    let cycle_parameters = match settings.cycle_kind() {
        Some(kind) => parameters.cycle_parameters(kind),
        None => {
            warn!("Unknown cycle. Falling back to the default Carnot cycle");
            CycleParameters::fallback()
        }
    };
    let fluid = settings.fluid();
    let cycle = thermo_cycle::calculate(&cycle_parameters, &fluid)?;
    info!("Calculated {} with {}", cycle.name(), fluid.name());
    let as_json = env::args().any(|arg| arg == "--json");
    println!("{}", report::render(&train, &cycle, parameters.mass_flow_rate, as_json)?);

    if let Some(export_dir) = settings.export_dir() {
        let diagram = CycleDiagram::sample(&cycle);
        for path in export::write_diagram(&export_dir, &cycle, &diagram)? {
            eprintln!("Wrote {}", path.display());
        }
    }
    Ok(())
}
