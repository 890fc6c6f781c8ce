//! # Equilibrium Solver
//!
//! Support reactions for the two determinate arrangements, from the three
//! equations of planar statics.
//!
//! ## Sign Convention
//! - Applied transverse loads: positive downward
//! - Vertical reactions: positive upward
//! - Horizontal reaction and axial load components: positive towards B
//! - Applied moments and the fixed-end reaction moment: positive counterclockwise
//!
//! ## Method
//!
//! `ΣM_A` is the turning effect of all applied loads about support A, counted
//! positive in the sense of a downward load to the right of A. Point loads
//! contribute `F_y * x`, distributed loads contribute their rectangular and
//! triangular resultants times their centroids, and applied moments subtract
//! their magnitude (a moment's effect does not depend on where it acts).
//!
//! - Simply-supported: `R_B = ΣM_A / L`, `R_A = ΣF_y - R_B`, `H_A = -ΣF_x`
//! - Cantilever: `R_B = 0`, `R_A = ΣF_y`, `H_A = -ΣF_x`, `M_A = ΣM_A`
//!
//! ## Example
//!
//! ```rust
//! use beam_core::calculations::beam::BeamConfig;
//! use beam_core::calculations::equilibrium::solve_reactions;
//! use beam_core::loads::{LoadSet, PointLoad};
//!
//! let beam = BeamConfig::simply_supported(10.0);
//! let loads = LoadSet::new().with_load(PointLoad::transverse(5.0, 10.0));
//!
//! let reactions = solve_reactions(&beam, &loads).unwrap();
//! assert_eq!(reactions.vertical_a, 5.0);
//! assert_eq!(reactions.vertical_b, 5.0);
//! ```

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::beam::{BeamConfig, BeamKind};
use crate::errors::EngineResult;
use crate::loads::{Load, LoadSet};

/// Support reactions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReactionSet {
    /// Vertical reaction at A, positive upward
    pub vertical_a: f64,
    /// Vertical reaction at B, positive upward (always 0 for a cantilever)
    pub vertical_b: f64,
    /// Horizontal reaction at A, positive towards B
    pub horizontal_a: f64,
    /// Fixed-end reaction moment at A, positive counterclockwise
    /// (always 0 for a simply-supported beam)
    pub moment_a: f64,
}

impl ReactionSet {
    /// Sum of the vertical reactions
    pub fn total_vertical(&self) -> f64 {
        self.vertical_a + self.vertical_b
    }
}

/// Force resultants of the applied loads alone
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AppliedTotals {
    /// Sum of transverse components, positive downward
    pub vertical: f64,
    /// Sum of axial components, positive towards B
    pub horizontal: f64,
}

/// Sum the force components of every load
pub fn applied_totals(loads: &LoadSet) -> AppliedTotals {
    let mut totals = AppliedTotals::default();
    for load in loads {
        match load {
            Load::Point(p) => {
                totals.vertical += p.vertical_component();
                totals.horizontal += p.horizontal_component();
            }
            Load::Moment(_) => {}
            Load::Uniform(_) | Load::Trapezoidal(_) => {
                if let Some(linear) = load.as_linear() {
                    totals.vertical += linear.total_force();
                }
            }
        }
    }
    totals
}

/// Turning effect of every load about `point`, positive in the sense of a
/// downward load to the right of the point
pub fn applied_moment_about(loads: &LoadSet, point: f64) -> f64 {
    let mut moment = 0.0;
    for load in loads {
        let contribution = match load {
            Load::Point(p) => p.vertical_component() * (p.location - point),
            Load::Moment(m) => -m.magnitude,
            Load::Uniform(_) | Load::Trapezoidal(_) => load
                .as_linear()
                .map(|linear| linear.moment_about(point))
                .unwrap_or(0.0),
        };
        trace!("load {} moment about {}: {}", load.id(), point, contribution);
        moment += contribution;
    }
    moment
}

/// Solve the support reactions.
///
/// Validates the beam configuration and every load first; nothing is
/// computed when any input is invalid.
///
/// # Returns
///
/// * `Ok(ReactionSet)` - reactions (all zero for an empty load set)
/// * `Err(EngineError::InvalidBeamConfig)` - bad length or support pair
/// * `Err(EngineError::InvalidLoad)` - a load record failed validation
pub fn solve_reactions(config: &BeamConfig, loads: &LoadSet) -> EngineResult<ReactionSet> {
    let kind = config.validate()?;
    loads.validate(config.length)?;
    Ok(reactions_for(kind, config.length, loads))
}

/// Reactions for inputs that have already been validated
pub(crate) fn reactions_for(kind: BeamKind, length: f64, loads: &LoadSet) -> ReactionSet {
    let totals = applied_totals(loads);
    let moment_about_a = applied_moment_about(loads, 0.0);

    let reactions = match kind {
        BeamKind::SimplySupported => {
            let vertical_b = moment_about_a / length;
            ReactionSet {
                vertical_a: totals.vertical - vertical_b,
                vertical_b,
                horizontal_a: 0.0 - totals.horizontal,
                moment_a: 0.0,
            }
        }
        BeamKind::Cantilever => ReactionSet {
            vertical_a: totals.vertical,
            vertical_b: 0.0,
            horizontal_a: 0.0 - totals.horizontal,
            moment_a: moment_about_a,
        },
    };

    debug!(
        "{} beam, {} loads: R_A = {}, R_B = {}, H_A = {}, M_A = {}",
        kind,
        loads.len(),
        reactions.vertical_a,
        reactions.vertical_b,
        reactions.horizontal_a,
        reactions.moment_a
    );
    reactions
}

/// Out-of-balance forces and moment of loads plus reactions
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EquilibriumResidual {
    /// Net force along the beam
    pub force_x: f64,
    /// Net transverse force (downward positive)
    pub force_y: f64,
    /// Net moment about the chosen point
    pub moment: f64,
}

impl EquilibriumResidual {
    /// True when every component is within `tol`
    pub fn is_balanced(&self, tol: f64) -> bool {
        self.force_x.abs() <= tol && self.force_y.abs() <= tol && self.moment.abs() <= tol
    }
}

/// Net force and net moment about `point` of the loads together with the
/// reactions. All three are zero (to rounding) for a correct solve,
/// whichever point is chosen.
pub fn equilibrium_residual(
    config: &BeamConfig,
    loads: &LoadSet,
    reactions: &ReactionSet,
    point: f64,
) -> EquilibriumResidual {
    let totals = applied_totals(loads);
    let moment = applied_moment_about(loads, point)
        + reactions.vertical_a * point
        - reactions.vertical_b * (config.length - point)
        - reactions.moment_a;

    EquilibriumResidual {
        force_x: totals.horizontal + reactions.horizontal_a,
        force_y: totals.vertical - reactions.vertical_a - reactions.vertical_b,
        moment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{Moment, PointLoad, TrapezoidalLoad, UniformLoad};
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_point_load_reactions() {
        let beam = BeamConfig::simply_supported(10.0);
        let loads = LoadSet::new().with_load(PointLoad::transverse(3.0, 1000.0));
        let r = solve_reactions(&beam, &loads).unwrap();

        // R_A = P(L-a)/L, R_B = Pa/L
        assert_relative_eq!(r.vertical_a, 700.0, epsilon = TOL);
        assert_relative_eq!(r.vertical_b, 300.0, epsilon = TOL);
        assert_eq!(r.horizontal_a, 0.0);
        assert_eq!(r.moment_a, 0.0);
    }

    #[test]
    fn test_uniform_load_reactions() {
        let beam = BeamConfig::simply_supported(10.0);
        let loads = LoadSet::new().with_load(UniformLoad::new(2.0, 8.0, 100.0));
        let r = solve_reactions(&beam, &loads).unwrap();

        assert_relative_eq!(r.vertical_a, 300.0, epsilon = TOL);
        assert_relative_eq!(r.vertical_b, 300.0, epsilon = TOL);
    }

    #[test]
    fn test_triangular_load_reactions() {
        // Full-span triangle 0 -> 6 over 6: W = 18, reactions W/3 and 2W/3
        let beam = BeamConfig::simply_supported(6.0);
        let loads = LoadSet::new().with_load(TrapezoidalLoad::new(0.0, 6.0, 0.0, 6.0));
        let r = solve_reactions(&beam, &loads).unwrap();

        assert_relative_eq!(r.vertical_a, 6.0, epsilon = TOL);
        assert_relative_eq!(r.vertical_b, 12.0, epsilon = TOL);
    }

    #[test]
    fn test_falling_trapezoid_matches_rising_mirror() {
        let beam = BeamConfig::simply_supported(8.0);
        let rising = LoadSet::new().with_load(TrapezoidalLoad::new(1.0, 5.0, 2.0, 6.0));
        let falling = LoadSet::new().with_load(TrapezoidalLoad::new(3.0, 7.0, 6.0, 2.0));

        let r1 = solve_reactions(&beam, &rising).unwrap();
        let r2 = solve_reactions(&beam, &falling).unwrap();
        assert_relative_eq!(r1.vertical_a, r2.vertical_b, epsilon = TOL);
        assert_relative_eq!(r1.vertical_b, r2.vertical_a, epsilon = TOL);
    }

    #[test]
    fn test_applied_moment_reactions() {
        // 20 ccw on a 10 span: reactions form a 20 cw couple
        let beam = BeamConfig::simply_supported(10.0);
        let loads = LoadSet::new().with_load(Moment::new(4.0, 20.0));
        let r = solve_reactions(&beam, &loads).unwrap();

        assert_relative_eq!(r.vertical_a, 2.0, epsilon = TOL);
        assert_relative_eq!(r.vertical_b, -2.0, epsilon = TOL);
    }

    #[test]
    fn test_inclined_point_load() {
        let beam = BeamConfig::simply_supported(10.0);
        let loads = LoadSet::new().with_load(PointLoad::new(5.0, 10.0, 45.0));
        let r = solve_reactions(&beam, &loads).unwrap();

        let component = 10.0 * std::f64::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(r.total_vertical(), component, epsilon = TOL);
        assert_relative_eq!(r.vertical_a, component / 2.0, epsilon = TOL);
        assert_relative_eq!(r.horizontal_a, -component, epsilon = TOL);
    }

    #[test]
    fn test_upward_inclined_load_keeps_axial_sense() {
        // Negative magnitude lifts the beam but still pushes towards B
        let beam = BeamConfig::simply_supported(10.0);
        let loads = LoadSet::new().with_load(PointLoad::new(5.0, -10.0, 45.0));
        let r = solve_reactions(&beam, &loads).unwrap();

        let component = 10.0 * std::f64::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(r.horizontal_a, -component, epsilon = TOL);
        assert_relative_eq!(r.total_vertical(), -component, epsilon = TOL);
    }

    #[test]
    fn test_cantilever_reactions() {
        let beam = BeamConfig::cantilever(3.0);
        let loads = LoadSet::new()
            .with_load(PointLoad::transverse(3.0, 10.0))
            .with_load(UniformLoad::new(0.0, 3.0, 2.0));
        let r = solve_reactions(&beam, &loads).unwrap();

        assert_relative_eq!(r.vertical_a, 16.0, epsilon = TOL);
        assert_eq!(r.vertical_b, 0.0);
        // 10 * 3 + 6 * 1.5
        assert_relative_eq!(r.moment_a, 39.0, epsilon = TOL);
    }

    #[test]
    fn test_cantilever_applied_moment() {
        let beam = BeamConfig::cantilever(2.0);
        let loads = LoadSet::new().with_load(Moment::new(1.0, 5.0));
        let r = solve_reactions(&beam, &loads).unwrap();

        assert_eq!(r.vertical_a, 0.0);
        assert_relative_eq!(r.moment_a, -5.0, epsilon = TOL);
    }

    #[test]
    fn test_empty_load_set() {
        for beam in [BeamConfig::simply_supported(4.0), BeamConfig::cantilever(4.0)] {
            let r = solve_reactions(&beam, &LoadSet::new()).unwrap();
            assert_eq!(r, ReactionSet::default());
        }
    }

    #[test]
    fn test_invalid_inputs_rejected_before_solving() {
        let loads = LoadSet::new().with_load(PointLoad::transverse(12.0, 1.0));
        let err = solve_reactions(&BeamConfig::simply_supported(10.0), &loads).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LOAD");

        let err = solve_reactions(&BeamConfig::simply_supported(-1.0), &LoadSet::new()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_BEAM_CONFIG");
    }

    #[test]
    fn test_residual_vanishes_about_any_point() {
        let loads = LoadSet::new()
            .with_load(PointLoad::new(1.5, 8.0, 60.0))
            .with_load(Moment::new(4.0, -12.0))
            .with_load(UniformLoad::new(0.0, 3.0, 2.5))
            .with_load(TrapezoidalLoad::new(2.0, 7.0, -1.0, -4.0));

        for beam in [BeamConfig::simply_supported(7.0), BeamConfig::cantilever(7.0)] {
            let r = solve_reactions(&beam, &loads).unwrap();
            for point in [0.0, 2.2, 7.0, -5.0, 31.0] {
                let residual = equilibrium_residual(&beam, &loads, &r, point);
                assert!(residual.is_balanced(1e-9), "{:?} about {}", residual, point);
            }
        }
    }
}
