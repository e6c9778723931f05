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
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use gear_train::{clamp_teeth, DEFAULT_MODULE, DEFAULT_SPACING};
use thermo_cycle::{CycleKind, Preset, WorkingFluid};
use thermo_cycle::presets::DEFAULT_CUTOFF_RATIO;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    gear_teeth: Vec<i64>,
    input_speed: f64,
    gear_spacing: f64,
    gear_module: f64,
    cycle: String,
    fluid: String,
    preset: String,
    cutoff_ratio: f64,
    export_dir: String
}

impl Settings {
    const GEAR_TEETH: &'static str = "gear_teeth";
    const INPUT_SPEED: &'static str = "input_speed";
    const GEAR_SPACING: &'static str = "gear_spacing";
    const GEAR_MODULE: &'static str = "gear_module";
    const CYCLE: &'static str = "cycle";
    const FLUID: &'static str = "fluid";
    const PRESET: &'static str = "preset";
    const CUTOFF_RATIO: &'static str = "cutoff_ratio";
    const EXPORT_DIR: &'static str = "export_dir";
    pub const CONFIG_FILENAME: &'static str = "physics-lab-conf";

    fn with_defaults(builder: ConfigBuilder<DefaultState>) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        builder
            .set_default(Settings::GEAR_TEETH, vec![20_i64, 40_i64])?
            .set_default(Settings::INPUT_SPEED, 1.0)?
            .set_default(Settings::GEAR_SPACING, DEFAULT_SPACING)?
            .set_default(Settings::GEAR_MODULE, DEFAULT_MODULE)?
            .set_default(Settings::CYCLE, CycleKind::Otto.as_str())?
            .set_default(Settings::FLUID, WorkingFluid::DEFAULT_ID)?
            .set_default(Settings::PRESET, Preset::Standard.as_str())?
            .set_default(Settings::CUTOFF_RATIO, DEFAULT_CUTOFF_RATIO)?
            .set_default(Settings::EXPORT_DIR, "")
    }

    pub fn from_defaults() -> Result<Self, ConfigError> {
        Settings::with_defaults(Config::builder())?.build()?.try_deserialize()
    }

    pub fn load() -> Result<Self, ConfigError> {
        Settings::load_from(Settings::CONFIG_FILENAME)
    }

    /// Load from `<stem>.toml`. Defaults are only written out when that file
    /// doesn't exist; a file that can't be read is reported and left alone.
    fn load_from(stem: &str) -> Result<Self, ConfigError> {
        match Settings::with_defaults(Config::builder())?
            .add_source(config::File::with_name(stem))
            .add_source(config::Environment::with_prefix("APP"))
            .build() {
            Ok(settings) => {
                settings.try_deserialize()
            }
            Err(e) => {
                let path = Settings::file_path(stem);
                if path.is_file() {
                    error!("Failed to read settings from {}. {}", path.display(), e.to_string());
                    return Err(e);
                }
                warn!("Failed to load settings. {}", e.to_string());
                let ret = Settings::from_defaults()?;
                ret.write_to(&path).unwrap_or_else(|e| { error!("Failed to write settings. {}", e.to_string())});
                Ok(ret)
            }
        }
    }

    fn file_path(stem: &str) -> PathBuf {
        PathBuf::from(format!("{}.toml", stem))
    }

    /// Tooth counts pinned into the supported range
    pub fn gear_teeth(&self) -> Vec<u32> {
        self.gear_teeth.iter().map(|t| clamp_teeth(*t)).collect()
    }

    pub fn input_speed(&self) -> f64 {
        self.input_speed
    }

    pub fn gear_spacing(&self) -> f64 {
        self.gear_spacing
    }

    pub fn gear_module(&self) -> f64 {
        self.gear_module
    }

    pub fn cycle_kind(&self) -> Option<CycleKind> {
        CycleKind::from_id(&self.cycle)
    }

    pub fn fluid(&self) -> WorkingFluid {
        WorkingFluid::find_or_default(&self.fluid)
    }

    pub fn preset(&self) -> Preset {
        Preset::from_id(&self.preset).unwrap_or_else(|| {
            warn!("Unknown preset {}. Using {}", self.preset, Preset::Standard.as_str());
            Preset::Standard
        })
    }

    pub fn cutoff_ratio(&self) -> f64 {
        self.cutoff_ratio
    }

    pub fn export_dir(&self) -> Option<PathBuf> {
        if self.export_dir.trim().is_empty() {
            return None;
        }
        Some(PathBuf::from(&self.export_dir))
    }

    pub fn write(&self) -> std::io::Result<()> {
        self.write_to(&Settings::file_path(Settings::CONFIG_FILENAME))
    }

    fn write_to(&self, path: &Path) -> std::io::Result<()> {
        fs::write(path, toml::to_string(&self).map_err(|_e|{
            std::io::Error::new(std::io::ErrorKind::Other, "Failed to encode settings to toml")
        })?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};
    use thermo_cycle::{CycleKind, Preset};
    use crate::settings::Settings;

    fn scratch_stem(name: &str) -> (PathBuf, String) {
        let dir = std::env::temp_dir().join(format!("physics-lab-settings-{}-{}", std::process::id(), name));
        fs::create_dir_all(&dir).unwrap();
        let stem = dir.join(Settings::CONFIG_FILENAME).to_string_lossy().into_owned();
        (dir, stem)
    }

    #[test]
    fn defaults_deserialize() {
        let settings = Settings::from_defaults().unwrap();
        assert_eq!(settings.gear_teeth(), vec![20, 40]);
        assert_eq!(settings.input_speed(), 1.0);
        assert_eq!(settings.gear_spacing(), 0.5);
        assert_eq!(settings.gear_module(), 0.1);
        assert_eq!(settings.cycle_kind(), Some(CycleKind::Otto));
        assert_eq!(settings.fluid().id(), "air");
        assert_eq!(settings.preset(), Preset::Standard);
        assert_eq!(settings.cutoff_ratio(), 2.0);
        assert_eq!(settings.export_dir(), None);
    }

    #[test]
    fn lenient_accessors() {
        let mut settings = Settings::from_defaults().unwrap();
        settings.gear_teeth = vec![3, 250, 30];
        settings.fluid = "xenon".to_string();
        settings.preset = "turbo".to_string();
        settings.cycle = "stirling".to_string();
        assert_eq!(settings.gear_teeth(), vec![8, 100, 30]);
        assert_eq!(settings.fluid().id(), "air");
        assert_eq!(settings.preset(), Preset::Standard);
        assert_eq!(settings.cycle_kind(), None);

        settings.cycle = " Diesel ".to_string();
        settings.export_dir = "out".to_string();
        assert_eq!(settings.cycle_kind(), Some(CycleKind::Diesel));
        assert_eq!(settings.export_dir(), Some(Path::new("out").to_path_buf()));
    }

    #[test]
    fn toml_round_trip() {
        let settings = Settings::from_defaults().unwrap();
        let encoded = toml::to_string(&settings).unwrap();
        assert!(encoded.contains("cycle = \"otto\""));
        let decoded: Settings = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded, settings);
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let (dir, stem) = scratch_stem("missing");
        let path = Settings::file_path(&stem);
        let _ = fs::remove_file(&path);
        let settings = Settings::load_from(&stem).unwrap();
        assert_eq!(settings, Settings::from_defaults().unwrap());
        let written: Settings = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, settings);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn file_values_override_defaults() {
        let (dir, stem) = scratch_stem("partial");
        fs::write(Settings::file_path(&stem), "cycle = \"diesel\"\ngear_teeth = [12, 24, 36]\n").unwrap();
        let settings = Settings::load_from(&stem).unwrap();
        assert_eq!(settings.cycle_kind(), Some(CycleKind::Diesel));
        assert_eq!(settings.gear_teeth(), vec![12, 24, 36]);
        assert_eq!(settings.fluid().id(), "air");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn unreadable_file_is_reported_and_kept() {
        let (dir, stem) = scratch_stem("bad-type");
        let path = Settings::file_path(&stem);
        let contents = "gear_teeth = \"x\"\n";
        fs::write(&path, contents).unwrap();
        assert!(Settings::load_from(&stem).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), contents);

        fs::write(&path, "cycle = [\n").unwrap();
        assert!(Settings::load_from(&stem).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "cycle = [\n");
        fs::remove_dir_all(&dir).unwrap();
    }
}
