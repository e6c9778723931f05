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
use serde::{Deserialize, Serialize};
use tracing::debug;
use utils::numeric::is_finite_positive;

use crate::error::{GearError, Result};
use crate::gear::{Gear, Toothed};
use crate::kinematics::{layout_positions_with_module, rotation_speed, speed_ratio, torque_ratio, DEFAULT_MODULE, DEFAULT_SPACING};

/// A driver/driven mesh between two consecutive gears of a train
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GearPair {
    pub driver_index: usize,
    pub driven_index: usize,
    pub driver_teeth: u32,
    pub driven_teeth: u32,
    pub speed_ratio: f64,
    pub torque_ratio: f64
}

impl GearPair {
    fn new(driver_index: usize, driver: &Gear, driven: &Gear) -> GearPair {
        GearPair {
            driver_index,
            driven_index: driver_index + 1,
            driver_teeth: driver.teeth(),
            driven_teeth: driven.teeth(),
            speed_ratio: speed_ratio(driver.teeth(), driven.teeth()),
            torque_ratio: torque_ratio(driver.teeth(), driven.teeth())
        }
    }
}

/// An ordered chain of meshed gears driven from the first gear.
///
/// A train is never edited in place; every `with_*` method hands back a new,
/// re-laid-out train and leaves `self` untouched. Deserialized trains are
/// rebuilt from their tooth counts and checked like any other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GearTrainRecord")]
pub struct GearTrain {
    gears: Vec<Gear>,
    input_speed: f64,
    module: f64,
    spacing: f64
}

impl GearTrain {
    pub const MIN_GEARS: usize = 2;

    pub fn new(teeth: &[u32], input_speed: f64) -> Result<GearTrain> {
        GearTrain::with_layout(teeth, input_speed, DEFAULT_MODULE, DEFAULT_SPACING)
    }

    pub fn with_layout(teeth: &[u32], input_speed: f64, module: f64, spacing: f64) -> Result<GearTrain> {
        validate_layout(module, spacing)?;
        let gears = teeth.iter()
            .enumerate()
            .map(|(idx, t)| Gear::new(idx, *t, module))
            .collect::<Result<Vec<Gear>>>()?;
        GearTrain::assemble(gears, input_speed, module, spacing)
    }

    fn assemble(gears: Vec<Gear>, input_speed: f64, module: f64, spacing: f64) -> Result<GearTrain> {
        if gears.len() < GearTrain::MIN_GEARS {
            return Err(GearError::TooFewGears { count: gears.len() });
        }
        if !input_speed.is_finite() {
            return Err(GearError::invalid("input_speed", input_speed, "speed must be a finite number"));
        }
        let positions = layout_positions_with_module(&gears, spacing, module);
        let gears: Vec<Gear> = gears.into_iter()
            .zip(positions)
            .map(|(gear, position)| gear.placed_at(position))
            .collect();
        let train = GearTrain { gears, input_speed, module, spacing };
        debug!("Laid out {} gears. Total ratio 1:{:.3}", train.len(), train.total_ratio());
        Ok(train)
    }

    pub fn gears(&self) -> &[Gear] {
        &self.gears
    }

    pub fn len(&self) -> usize {
        self.gears.len()
    }

    pub fn teeth(&self) -> Vec<u32> {
        self.gears.iter().map(|g| g.teeth()).collect()
    }

    pub fn input_speed(&self) -> f64 {
        self.input_speed
    }

    pub fn module(&self) -> f64 {
        self.module
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn pairs(&self) -> Vec<GearPair> {
        self.gears.iter()
            .tuple_windows()
            .enumerate()
            .map(|(idx, (driver, driven))| GearPair::new(idx, driver, driven))
            .collect()
    }

    /// Overall speed ratio from the first gear to the last
    pub fn total_ratio(&self) -> f64 {
        self.pairs().iter().map(|p| p.speed_ratio).product()
    }

    pub fn total_torque_ratio(&self) -> f64 {
        self.pairs().iter().map(|p| p.torque_ratio).product()
    }

    /// Signed angular speed of every gear. The first entry is the input speed
    /// and the sign alternates with each mesh.
    pub fn rotation_speeds(&self) -> Vec<f64> {
        let mut speeds = Vec::with_capacity(self.gears.len());
        speeds.push(self.input_speed);
        for (driver, driven) in self.gears.iter().tuple_windows() {
            let driver_speed = speeds[speeds.len() - 1];
            speeds.push(rotation_speed(driver_speed, driver.teeth(), driven.teeth()));
        }
        speeds
    }

    pub fn output_speed(&self) -> f64 {
        self.rotation_speeds().last().copied().unwrap_or(self.input_speed)
    }

    /// Angle of each gear, in radians within `[0, 2π)`, after `elapsed`
    /// seconds of constant rotation from the rest position
    pub fn rotation_angles(&self, elapsed: f64) -> Vec<f64> {
        self.rotation_speeds()
            .into_iter()
            .map(|speed| (speed * elapsed).rem_euclid(std::f64::consts::TAU))
            .collect()
    }

    pub fn with_gear_added(&self, teeth: u32) -> Result<GearTrain> {
        let mut gears = self.gears.clone();
        gears.push(Gear::new(gears.len(), teeth, self.module)?);
        GearTrain::assemble(gears, self.input_speed, self.module, self.spacing)
    }

    pub fn with_gear_removed(&self, index: usize) -> Result<GearTrain> {
        self.check_index(index)?;
        if self.gears.len() <= GearTrain::MIN_GEARS {
            return Err(GearError::TooFewGears { count: self.gears.len() - 1 });
        }
        let mut gears = self.gears.clone();
        gears.remove(index);
        GearTrain::assemble(gears, self.input_speed, self.module, self.spacing)
    }

    pub fn with_teeth(&self, index: usize, teeth: u32) -> Result<GearTrain> {
        self.check_index(index)?;
        let mut gears = self.gears.clone();
        let gear = gears.remove(index).resized(teeth, self.module)?;
        gears.insert(index, gear);
        GearTrain::assemble(gears, self.input_speed, self.module, self.spacing)
    }

    pub fn with_input_speed(&self, input_speed: f64) -> Result<GearTrain> {
        GearTrain::assemble(self.gears.clone(), input_speed, self.module, self.spacing)
    }

    pub fn with_module(&self, module: f64) -> Result<GearTrain> {
        validate_layout(module, self.spacing)?;
        let gears = self.gears.iter()
            .cloned()
            .map(|g| {
                let teeth = g.teeth();
                g.resized(teeth, module)
            })
            .collect::<Result<Vec<Gear>>>()?;
        GearTrain::assemble(gears, self.input_speed, module, self.spacing)
    }

    pub fn with_spacing(&self, spacing: f64) -> Result<GearTrain> {
        validate_layout(self.module, spacing)?;
        GearTrain::assemble(self.gears.clone(), self.input_speed, self.module, spacing)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.gears.len() {
            return Err(GearError::NoSuchGear { index, count: self.gears.len() });
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct GearTrainRecord {
    gears: Vec<Gear>,
    input_speed: f64,
    module: f64,
    spacing: f64
}

impl TryFrom<GearTrainRecord> for GearTrain {
    type Error = GearError;

    fn try_from(record: GearTrainRecord) -> Result<GearTrain> {
        let teeth: Vec<u32> = record.gears.iter().map(|g| g.teeth()).collect();
        GearTrain::with_layout(&teeth, record.input_speed, record.module, record.spacing)
    }
}

fn validate_layout(module: f64, spacing: f64) -> Result<()> {
    if !is_finite_positive(module) {
        return Err(GearError::invalid("module", module, "module must be a positive number"));
    }
    if !(spacing.is_finite() && spacing >= 0.0) {
        return Err(GearError::invalid("spacing", spacing, "spacing can't be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use utils::numeric::approx_eq_relative;
    use crate::{GearError, GearTrain, Toothed};

    fn two_gear_train() -> GearTrain {
        GearTrain::new(&[20, 40], 1.0).unwrap()
    }

    #[test]
    fn needs_two_gears() {
        assert_eq!(GearTrain::new(&[20], 1.0).unwrap_err(), GearError::TooFewGears { count: 1 });
        assert_eq!(GearTrain::new(&[], 1.0).unwrap_err(), GearError::TooFewGears { count: 0 });
    }

    #[test]
    fn rejects_bad_teeth_and_speed() {
        assert_eq!(GearTrain::new(&[20, 4], 1.0).unwrap_err().parameter(), Some("teeth"));
        assert_eq!(GearTrain::new(&[20, 40], f64::NAN).unwrap_err().parameter(), Some("input_speed"));
        assert_eq!(GearTrain::with_layout(&[20, 40], 1.0, 0.0, 0.5).unwrap_err().parameter(), Some("module"));
        assert_eq!(GearTrain::with_layout(&[20, 40], 1.0, 0.1, -1.0).unwrap_err().parameter(), Some("spacing"));
    }

    #[test]
    fn lays_out_gears() {
        let train = two_gear_train();
        assert_eq!(train.gears()[0].position().x, 0.0);
        assert!(approx_eq_relative(train.gears()[1].position().x, 3.5, 1e-12));
    }

    #[test]
    fn pairs_carry_ratios() {
        let train = GearTrain::new(&[20, 40, 10], 1.0).unwrap();
        let pairs = train.pairs();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].driver_teeth, 20);
        assert_eq!(pairs[0].driven_teeth, 40);
        assert_eq!(pairs[0].speed_ratio, 0.5);
        assert_eq!(pairs[1].driver_index, 1);
        assert_eq!(pairs[1].driven_index, 2);
        assert_eq!(pairs[1].speed_ratio, 4.0);
        for pair in pairs {
            assert!(approx_eq_relative(pair.speed_ratio * pair.torque_ratio, 1.0, 1e-12));
        }
        assert_eq!(train.total_ratio(), 2.0);
        assert_eq!(train.total_torque_ratio(), 0.5);
    }

    #[test]
    fn speeds_alternate_along_chain() {
        let train = GearTrain::new(&[20, 40, 10, 30], 2.0).unwrap();
        let speeds = train.rotation_speeds();
        assert_eq!(speeds.len(), 4);
        for (idx, speed) in speeds.iter().enumerate() {
            assert_eq!(*speed > 0.0, idx % 2 == 0, "gear {} speed {}", idx, speed);
        }
        assert!(approx_eq_relative(train.output_speed().abs(), 2.0 * train.total_ratio(), 1e-12));
    }

    #[test]
    fn rotation_angles_wrap() {
        let train = two_gear_train();
        let angles = train.rotation_angles(std::f64::consts::PI);
        assert!(approx_eq_relative(angles[0], std::f64::consts::PI, 1e-12));
        // driven gear turns at -0.5 rad/s
        assert!(approx_eq_relative(angles[1], 1.5 * std::f64::consts::PI, 1e-12));
        assert!(angles.iter().all(|a| *a >= 0.0 && *a < std::f64::consts::TAU));
    }

    #[test]
    fn adding_and_removing_gears() {
        let train = two_gear_train();
        let bigger = train.with_gear_added(30).unwrap();
        assert_eq!(train.len(), 2);
        assert_eq!(bigger.len(), 3);
        assert_eq!(bigger.gears()[2].name(), "Gear 3");
        assert!(approx_eq_relative(bigger.gears()[2].position().x, 3.5 + 2.0 + 1.5 + 0.5, 1e-12));

        let smaller = bigger.with_gear_removed(0).unwrap();
        assert_eq!(smaller.teeth(), vec![40, 30]);
        assert_eq!(smaller.gears()[0].position().x, 0.0);
        assert_eq!(smaller.gears()[0].name(), "Driven Gear");

        assert_eq!(train.with_gear_removed(1).unwrap_err(), GearError::TooFewGears { count: 1 });
        assert_eq!(train.with_gear_removed(5).unwrap_err(), GearError::NoSuchGear { index: 5, count: 2 });
        assert!(train.with_gear_added(200).is_err());
    }

    #[test]
    fn updating_teeth_relays_out() {
        let train = two_gear_train().with_teeth(0, 40).unwrap();
        assert_eq!(train.gears()[0].teeth(), 40);
        assert!(approx_eq_relative(train.gears()[0].radius(), 2.0, 1e-12));
        assert!(approx_eq_relative(train.gears()[1].position().x, 4.5, 1e-12));
        assert!(two_gear_train().with_teeth(2, 40).is_err());
        assert!(two_gear_train().with_teeth(0, 3).is_err());
    }

    #[test]
    fn changing_layout_parameters() {
        let train = two_gear_train().with_spacing(1.0).unwrap();
        assert!(approx_eq_relative(train.gears()[1].position().x, 4.0, 1e-12));
        let train = train.with_module(0.2).unwrap();
        assert!(approx_eq_relative(train.gears()[1].radius(), 4.0, 1e-12));
        assert!(approx_eq_relative(train.gears()[1].position().x, 7.0, 1e-12));
        let train = train.with_input_speed(-3.0).unwrap();
        assert_eq!(train.output_speed(), 1.5);
    }

    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_string(&two_gear_train()).unwrap();
        assert!(json.contains("\"input_speed\":1.0"));
        let back: GearTrain = serde_json::from_str(&json).unwrap();
        assert_eq!(back, two_gear_train());
    }

    #[test]
    fn deserializing_checks_the_train() {
        let mut json = serde_json::to_value(two_gear_train()).unwrap();
        json["gears"][1]["teeth"] = serde_json::json!(0);
        let err = serde_json::from_value::<GearTrain>(json).unwrap_err();
        assert!(err.to_string().contains("teeth"), "{}", err);

        let mut json = serde_json::to_value(two_gear_train()).unwrap();
        json["gears"].as_array_mut().unwrap().pop();
        assert!(serde_json::from_value::<GearTrain>(json).is_err());

        let mut json = serde_json::to_value(two_gear_train()).unwrap();
        json["module"] = serde_json::json!(-0.1);
        assert!(serde_json::from_value::<GearTrain>(json).is_err());

        // stored positions are recomputed from the teeth
        let mut json = serde_json::to_value(two_gear_train()).unwrap();
        json["gears"][1]["position"]["x"] = serde_json::json!(99.0);
        let train: GearTrain = serde_json::from_value(json).unwrap();
        assert!(approx_eq_relative(train.gears()[1].position().x, 3.5, 1e-12));
    }
}
