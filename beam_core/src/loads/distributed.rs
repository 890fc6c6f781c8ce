//! Distributed load geometry
//!
//! Every uniform and trapezoidal load record reduces to a [`LinearLoad`]: an
//! intensity that varies linearly between two end values over `[start, end]`.
//! A linear load is resolved into two resultant forces:
//!
//! - a **rectangular part** at the smaller-magnitude end intensity, acting at
//!   the middle of the span
//! - a **triangular part** whose intensity grows from zero at the
//!   smaller-magnitude end to `larger - smaller` at the larger-magnitude end;
//!   its resultant acts one third of the span from the larger-magnitude end
//!
//! Both end intensities share a sign (validated on the load records), so the
//! triangular part always carries the same sign as the load.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::loads::LinearLoad;
//!
//! // 2 -> 8 per unit length over [0, 3]
//! let load = LinearLoad::new(0.0, 3.0, 2.0, 8.0);
//! let [rect, tri] = load.parts();
//!
//! assert_eq!(rect.force, 6.0);    // 2 * 3
//! assert_eq!(tri.force, 9.0);     // (8 - 2) * 3 / 2
//! assert_eq!(tri.centroid, 2.0);  // 1/3 span from the heavy end
//! assert_eq!(load.total_force(), 15.0);
//! ```

use serde::{Deserialize, Serialize};

/// A force resultant: total force and the position it acts at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resultant {
    /// Total force (positive downward, same convention as the load)
    pub force: f64,
    /// Position along the beam where the force acts
    pub centroid: f64,
}

impl Resultant {
    /// Zero force at `position`
    pub fn zero(position: f64) -> Self {
        Resultant {
            force: 0.0,
            centroid: position,
        }
    }

    /// Moment of this force about `point` (force times lever arm, positive
    /// when a downward force sits to the right of the point)
    pub fn moment_about(&self, point: f64) -> f64 {
        self.force * (self.centroid - point)
    }
}

/// A linearly varying distributed load over `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearLoad {
    pub start: f64,
    pub end: f64,
    pub start_intensity: f64,
    pub end_intensity: f64,
}

impl LinearLoad {
    pub fn new(start: f64, end: f64, start_intensity: f64, end_intensity: f64) -> Self {
        LinearLoad {
            start,
            end,
            start_intensity,
            end_intensity,
        }
    }

    /// Constant intensity over `[start, end]`
    pub fn uniform(start: f64, end: f64, intensity: f64) -> Self {
        LinearLoad::new(start, end, intensity, intensity)
    }

    /// Loaded length
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Intensity at `x`, clamped to the end values outside the span.
    ///
    /// The end values are returned exactly at the span ends so that clipping a
    /// load at its own boundary reproduces the unclipped record bit for bit.
    pub fn intensity_at(&self, x: f64) -> f64 {
        let span = self.span();
        if x <= self.start || span <= 0.0 {
            self.start_intensity
        } else if x >= self.end {
            self.end_intensity
        } else {
            let t = (x - self.start) / span;
            self.start_intensity + (self.end_intensity - self.start_intensity) * t
        }
    }

    /// The part of this load lying within `[from, to]`, with the cut
    /// intensities found by linear interpolation.
    ///
    /// Returns `None` when the overlap is empty or has zero length.
    pub fn clip(&self, from: f64, to: f64) -> Option<LinearLoad> {
        let start = from.max(self.start);
        let end = to.min(self.end);
        if end <= start {
            return None;
        }
        Some(LinearLoad {
            start,
            end,
            start_intensity: self.intensity_at(start),
            end_intensity: self.intensity_at(end),
        })
    }

    /// True when the start intensity is the smaller-magnitude end
    fn rises(&self) -> bool {
        self.start_intensity.abs() <= self.end_intensity.abs()
    }

    /// Rectangular part at the smaller-magnitude intensity, acting at midspan
    pub fn rectangular_part(&self) -> Resultant {
        let span = self.span();
        let base = if self.rises() {
            self.start_intensity
        } else {
            self.end_intensity
        };
        Resultant {
            force: base * span,
            centroid: self.start + span / 2.0,
        }
    }

    /// Triangular remainder, acting 1/3 span from the larger-magnitude end
    pub fn triangular_part(&self) -> Resultant {
        let span = self.span();
        if self.rises() {
            Resultant {
                force: (self.end_intensity - self.start_intensity) * span / 2.0,
                centroid: self.end - span / 3.0,
            }
        } else {
            Resultant {
                force: (self.start_intensity - self.end_intensity) * span / 2.0,
                centroid: self.start + span / 3.0,
            }
        }
    }

    /// Rectangular and triangular resultants, in that order
    pub fn parts(&self) -> [Resultant; 2] {
        [self.rectangular_part(), self.triangular_part()]
    }

    /// Total force carried by the load
    pub fn total_force(&self) -> f64 {
        self.parts().iter().map(|p| p.force).sum()
    }

    /// Moment of the whole load about `point`
    pub fn moment_about(&self, point: f64) -> f64 {
        self.parts().iter().map(|p| p.moment_about(point)).sum()
    }

    /// Single resultant equivalent to both parts.
    ///
    /// For a load with zero total force the centroid is reported at midspan.
    pub fn resultant(&self) -> Resultant {
        let force = self.total_force();
        if force == 0.0 {
            return Resultant::zero(self.start + self.span() / 2.0);
        }
        Resultant {
            force,
            centroid: self.moment_about(0.0) / force,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_has_no_triangle() {
        let load = LinearLoad::uniform(2.0, 8.0, 100.0);
        let [rect, tri] = load.parts();
        assert_eq!(rect.force, 600.0);
        assert_eq!(rect.centroid, 5.0);
        assert_eq!(tri.force, 0.0);
    }

    #[test]
    fn test_falling_load_triangle_near_start() {
        // 9 -> 3 over [0, 6]: triangle of 6 sits at the start
        let load = LinearLoad::new(0.0, 6.0, 9.0, 3.0);
        let [rect, tri] = load.parts();
        assert_relative_eq!(rect.force, 18.0);
        assert_relative_eq!(tri.force, 18.0);
        assert_relative_eq!(tri.centroid, 2.0);
    }

    #[test]
    fn test_negative_load_decomposition() {
        // Upward load: -2 -> -8; smaller magnitude is -2
        let load = LinearLoad::new(0.0, 3.0, -2.0, -8.0);
        let [rect, tri] = load.parts();
        assert_relative_eq!(rect.force, -6.0);
        assert_relative_eq!(tri.force, -9.0);
        assert_relative_eq!(tri.centroid, 2.0);
    }

    #[test]
    fn test_resultant_matches_closed_form() {
        // Trapezoid centroid: a + L(q1 + 2 q2) / (3 (q1 + q2))
        let load = LinearLoad::new(1.0, 5.0, 2.0, 6.0);
        let r = load.resultant();
        assert_relative_eq!(r.force, 16.0);
        assert_relative_eq!(r.centroid, 1.0 + 4.0 * (2.0 + 12.0) / (3.0 * 8.0), epsilon = 1e-12);
    }

    #[test]
    fn test_clip_interpolates_cut_intensity() {
        let load = LinearLoad::new(0.0, 10.0, 0.0, 10.0);
        let right = load.clip(4.0, 10.0).unwrap();
        assert_relative_eq!(right.start_intensity, 4.0);
        assert_eq!(right.end_intensity, 10.0);

        let left = load.clip(0.0, 4.0).unwrap();
        assert_relative_eq!(left.total_force() + right.total_force(), load.total_force());
    }

    #[test]
    fn test_clip_outside_is_none() {
        let load = LinearLoad::uniform(2.0, 4.0, 1.0);
        assert!(load.clip(4.0, 10.0).is_none());
        assert!(load.clip(0.0, 2.0).is_none());
        assert!(load.clip(5.0, 6.0).is_none());
    }

    #[test]
    fn test_clip_at_own_bounds_is_identity() {
        let load = LinearLoad::new(0.1, 0.3, 1.5, 7.25);
        assert_eq!(load.clip(0.0, 1.0), Some(load));
    }

    #[test]
    fn test_zero_force_resultant_at_midspan() {
        let load = LinearLoad::uniform(2.0, 6.0, 0.0);
        let r = load.resultant();
        assert_eq!(r.force, 0.0);
        assert_eq!(r.centroid, 4.0);
    }
}
