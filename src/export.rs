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

use std::fs;
use std::path::{Path, PathBuf};
use serde::Serialize;
use tracing::info;

use thermo_cycle::{CycleDiagram, ThermodynamicCycle};

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("couldn't create export directory {path}. {source}")]
    Directory {
        path: String,
        source: std::io::Error
    },
    #[error("couldn't write {path}. {source}")]
    Csv {
        path: String,
        source: csv::Error
    }
}

#[derive(Serialize)]
struct PvRow<'a> {
    process: &'a str,
    volume: f64,
    pressure: f64
}

#[derive(Serialize)]
struct TsRow<'a> {
    process: &'a str,
    entropy: f64,
    temperature: f64
}

/// Write `<cycle>-pv.csv` and `<cycle>-ts.csv` into `dir`, one row per
/// diagram sample. Returns the written paths.
pub fn write_diagram(dir: &Path, cycle: &ThermodynamicCycle, diagram: &CycleDiagram) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(dir).map_err(|source| {
        ExportError::Directory { path: dir.display().to_string(), source }
    })?;
    let base_name = sanitize_filename::sanitize(cycle.id()).replace(" ", "_");
    let labels: Vec<&str> = cycle.processes().iter().map(|p| p.label.as_str()).collect();
    let label_for = |index: usize| labels.get(index).copied().unwrap_or("");

    let pv_path = dir.join(format!("{}-pv.csv", base_name));
    write_rows(&pv_path, diagram.points().iter().map(|p| PvRow {
        process: label_for(p.process_index),
        volume: p.volume,
        pressure: p.pressure
    }))?;
    let ts_path = dir.join(format!("{}-ts.csv", base_name));
    write_rows(&ts_path, diagram.points().iter().map(|p| TsRow {
        process: label_for(p.process_index),
        entropy: p.entropy,
        temperature: p.temperature
    }))?;
    info!("Exported {} diagram to {} and {}", cycle.name(), pv_path.display(), ts_path.display());
    Ok(vec![pv_path, ts_path])
}

fn write_rows<R: Serialize>(path: &Path, rows: impl Iterator<Item = R>) -> Result<(), ExportError> {
    let to_err = |source| ExportError::Csv { path: path.display().to_string(), source };
    let mut writer = csv::Writer::from_path(path).map_err(to_err)?;
    for row in rows {
        writer.serialize(row).map_err(to_err)?;
    }
    writer.flush().map_err(|e| to_err(csv::Error::from(e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use thermo_cycle::{diesel, CycleDiagram, WorkingFluid};
    use crate::export::write_diagram;

    #[test]
    fn writes_both_series() {
        let dir = std::env::temp_dir().join(format!("physics-lab-export-{}", std::process::id()));
        let cycle = diesel(10.0, 2.0, 100.0, 300.0, &WorkingFluid::air()).unwrap();
        let diagram = CycleDiagram::with_segments(&cycle, 5).unwrap();
        let written = write_diagram(&dir, &cycle, &diagram).unwrap();
        assert_eq!(written, vec![dir.join("diesel-pv.csv"), dir.join("diesel-ts.csv")]);

        let mut reader = csv::Reader::from_path(&written[0]).unwrap();
        assert_eq!(reader.headers().unwrap().iter().collect::<Vec<_>>(), vec!["process", "volume", "pressure"]);
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 4 * 6);
        assert_eq!(&records[0][0], "1-2");
        assert_eq!(&records[23][0], "4-1");

        let mut reader = csv::Reader::from_path(&written[1]).unwrap();
        assert_eq!(reader.headers().unwrap().iter().collect::<Vec<_>>(), vec!["process", "entropy", "temperature"]);
        assert_eq!(reader.records().count(), 24);
        fs::remove_dir_all(&dir).unwrap();
    }
}
