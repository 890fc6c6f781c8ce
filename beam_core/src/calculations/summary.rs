//! # Diagram Summary
//!
//! Extreme values of each profile. A renderer scales each diagram by its
//! peak magnitude; the signed extremes are what an engineer reads off.

use serde::{Deserialize, Serialize};

use super::section_sweep::{InternalForces, Profile};

/// A signed value and where it occurs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extreme {
    pub value: f64,
    pub position: f64,
}

/// Largest and smallest signed values of a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremes {
    pub max: Extreme,
    pub min: Extreme,
}

impl Profile {
    /// Largest `|before|` or `|after|` over all stations.
    ///
    /// Returns 0 for an empty or all-zero profile.
    pub fn peak_magnitude(&self) -> f64 {
        self.stations
            .iter()
            .flat_map(|s| [s.before.abs(), s.after.abs()])
            .fold(0.0, f64::max)
    }

    /// Signed maximum and minimum over both sides of every station.
    ///
    /// Ties keep the first station in sweep order. Returns `None` for an
    /// empty profile.
    pub fn extremes(&self) -> Option<Extremes> {
        let mut samples = self
            .stations
            .iter()
            .flat_map(|s| [(s.before, s.position), (s.after, s.position)]);

        let (value, position) = samples.next()?;
        let first = Extreme { value, position };
        let mut extremes = Extremes { max: first, min: first };
        for (value, position) in samples {
            if value > extremes.max.value {
                extremes.max = Extreme { value, position };
            }
            if value < extremes.min.value {
                extremes.min = Extreme { value, position };
            }
        }
        Some(extremes)
    }
}

/// Peak magnitudes of the three diagrams
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DiagramSummary {
    pub max_axial: f64,
    pub max_shear: f64,
    pub max_moment: f64,
}

impl DiagramSummary {
    pub fn from_forces(forces: &InternalForces) -> Self {
        DiagramSummary {
            max_axial: forces.axial.peak_magnitude(),
            max_shear: forces.shear.peak_magnitude(),
            max_moment: forces.moment.peak_magnitude(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::section_sweep::Station;

    fn profile(samples: &[(f64, f64, f64)]) -> Profile {
        Profile {
            stations: samples
                .iter()
                .map(|&(position, before, after)| Station {
                    position,
                    before,
                    after,
                })
                .collect(),
        }
    }

    #[test]
    fn test_peak_uses_both_sides() {
        let p = profile(&[(0.0, 0.0, 5.0), (5.0, 5.0, -7.5), (10.0, -7.5, 0.0)]);
        assert_eq!(p.peak_magnitude(), 7.5);
    }

    #[test]
    fn test_empty_and_zero_profiles_peak_zero() {
        assert_eq!(Profile::default().peak_magnitude(), 0.0);
        let zero = profile(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)]);
        assert_eq!(zero.peak_magnitude(), 0.0);
    }

    #[test]
    fn test_extremes_signed_with_positions() {
        let p = profile(&[(0.0, 0.0, 3.0), (2.0, 4.0, -6.0), (4.0, -6.0, 0.0)]);
        let e = p.extremes().unwrap();
        assert_eq!(e.max, Extreme { value: 4.0, position: 2.0 });
        assert_eq!(e.min, Extreme { value: -6.0, position: 2.0 });
        assert!(Profile::default().extremes().is_none());
    }

    #[test]
    fn test_summary_from_forces() {
        let forces = InternalForces {
            axial: Profile::default(),
            shear: profile(&[(0.0, 0.0, 2.0), (1.0, -2.0, 0.0)]),
            moment: profile(&[(0.0, 0.0, -9.0), (1.0, 0.0, 0.0)]),
        };
        let summary = DiagramSummary::from_forces(&forces);
        assert_eq!(summary.max_axial, 0.0);
        assert_eq!(summary.max_shear, 2.0);
        assert_eq!(summary.max_moment, 9.0);
    }
}
