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
use utils::numeric::is_finite_positive;

use crate::error::{GearError, Result};
use crate::gear::{Gear, Toothed};
use crate::kinematics::validate_teeth;

const TOOTH_DEPTH_FACTOR: f64 = 0.2;
const FLANK_FRACTION: f64 = 0.2;
const BORE_FACTOR: f64 = 0.3;
const THICKNESS_FACTOR: f64 = 0.3;
const BEVEL_THICKNESS_FACTOR: f64 = 0.05;
const BEVEL_SIZE_FACTOR: f64 = 0.03;
const HUB_FACTOR: f64 = 0.9;

/// Flat outline and extrusion dimensions a renderer needs to build a gear mesh.
///
/// The outline is a closed polygon in the gear's local xy plane, centred on
/// the axle. It starts in the valley half a tooth before angle zero and then
/// emits tip, leading flank, trailing flank and next valley for every tooth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearProfile {
    outline: Vec<[f64; 2]>,
    pitch_radius: f64,
    tip_radius: f64,
    root_radius: f64,
    bore_radius: f64,
    hub_radius: f64,
    thickness: f64,
    bevel_thickness: f64,
    bevel_size: f64
}

impl GearProfile {
    pub fn new(teeth: u32, radius: f64) -> Result<GearProfile> {
        let teeth = validate_teeth(teeth)?;
        if !is_finite_positive(radius) {
            return Err(GearError::invalid("radius", radius, "radius must be a positive number"));
        }
        Ok(GearProfile::build(teeth, radius))
    }

    pub fn for_gear(gear: &Gear) -> GearProfile {
        GearProfile::build(gear.teeth(), gear.radius())
    }

    fn build(teeth: u32, radius: f64) -> GearProfile {
        let tooth_depth = radius * TOOTH_DEPTH_FACTOR;
        let root_radius = radius - tooth_depth;
        let tip_radius = radius + tooth_depth;
        let angle_step = std::f64::consts::TAU / teeth as f64;

        let mut outline = Vec::with_capacity(teeth as usize * 4 + 1);
        outline.push(polar(root_radius, -angle_step / 2.0));
        for tooth in 0..teeth {
            let base = tooth as f64 * angle_step;
            outline.push(polar(tip_radius, base));
            outline.push(polar(radius, base + angle_step * FLANK_FRACTION));
            outline.push(polar(radius, base + angle_step * (1.0 - FLANK_FRACTION)));
            outline.push(polar(root_radius, base + angle_step));
        }

        GearProfile {
            outline,
            pitch_radius: radius,
            tip_radius,
            root_radius,
            bore_radius: radius * BORE_FACTOR,
            hub_radius: radius * HUB_FACTOR,
            thickness: radius * THICKNESS_FACTOR,
            bevel_thickness: radius * BEVEL_THICKNESS_FACTOR,
            bevel_size: radius * BEVEL_SIZE_FACTOR
        }
    }

    pub fn outline(&self) -> &[[f64; 2]] {
        &self.outline
    }

    pub fn pitch_radius(&self) -> f64 {
        self.pitch_radius
    }

    pub fn tip_radius(&self) -> f64 {
        self.tip_radius
    }

    pub fn root_radius(&self) -> f64 {
        self.root_radius
    }

    pub fn bore_radius(&self) -> f64 {
        self.bore_radius
    }

    pub fn hub_radius(&self) -> f64 {
        self.hub_radius
    }

    /// Extrusion depth along the axle
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn bevel_thickness(&self) -> f64 {
        self.bevel_thickness
    }

    pub fn bevel_size(&self) -> f64 {
        self.bevel_size
    }
}

fn polar(radius: f64, angle: f64) -> [f64; 2] {
    [angle.cos() * radius, angle.sin() * radius]
}

#[cfg(test)]
mod tests {
    use utils::numeric::approx_eq_absolute;
    use crate::{Gear, GearProfile};

    fn radial(point: &[f64; 2]) -> f64 {
        (point[0] * point[0] + point[1] * point[1]).sqrt()
    }

    #[test]
    fn outline_has_four_points_per_tooth() {
        let profile = GearProfile::new(20, 1.0).unwrap();
        assert_eq!(profile.outline().len(), 81);
        let profile = GearProfile::new(8, 0.4).unwrap();
        assert_eq!(profile.outline().len(), 33);
    }

    #[test]
    fn outline_points_sit_on_profile_radii() {
        let profile = GearProfile::new(12, 2.0).unwrap();
        assert!(approx_eq_absolute(profile.root_radius(), 1.6, 1e-12));
        assert!(approx_eq_absolute(profile.tip_radius(), 2.4, 1e-12));
        for point in profile.outline() {
            let r = radial(point);
            let on_radius = [profile.root_radius(), profile.pitch_radius(), profile.tip_radius()]
                .iter()
                .any(|expected| approx_eq_absolute(r, *expected, 1e-9));
            assert!(on_radius, "point {:?} at radius {}", point, r);
        }
        // first tip sits on the +x axis
        assert!(approx_eq_absolute(profile.outline()[1][0], 2.4, 1e-12));
        assert!(approx_eq_absolute(profile.outline()[1][1], 0.0, 1e-12));
    }

    #[test]
    fn extrusion_dimensions_scale_with_radius() {
        let gear = Gear::new(0, 40, 0.1).unwrap();
        let profile = GearProfile::for_gear(&gear);
        assert!(approx_eq_absolute(profile.bore_radius(), 0.6, 1e-12));
        assert!(approx_eq_absolute(profile.hub_radius(), 1.8, 1e-12));
        assert!(approx_eq_absolute(profile.thickness(), 0.6, 1e-12));
        assert!(approx_eq_absolute(profile.bevel_thickness(), 0.1, 1e-12));
        assert!(approx_eq_absolute(profile.bevel_size(), 0.06, 1e-12));
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert!(GearProfile::new(4, 1.0).is_err());
        assert_eq!(GearProfile::new(20, 0.0).unwrap_err().parameter(), Some("radius"));
        assert!(GearProfile::new(20, f64::NAN).is_err());
    }
}
