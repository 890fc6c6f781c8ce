//! # Section Sweep
//!
//! Internal-force diagrams by the method of sections, sampled at uniformly
//! spaced stations along the beam.
//!
//! At each station the beam is cut and one free body is summed:
//!
//! - **Axial force** `N(x)` from the left body, compression positive
//! - **Shear force** `V(x)` from the left body, net upward force positive
//! - **Bending moment** `M(x)` from the right body, sagging positive
//!
//! Reactions are treated as concentrated items at their supports, so the
//! same rule handles loads and reactions sitting on a station.
//!
//! ## Boundary Rule
//!
//! A concentrated item within `tol` of the cut is "at the cut". For the
//! `before` value (approaching from the left) it belongs to the right body;
//! for the `after` value it belongs to the left body. Distributed loads are
//! continuous across the cut and contribute the same to both values.
//!
//! Outside the beam every internal force is zero, so `before` at `x = 0` and
//! `after` at `x = length` close to zero when the reactions balance the loads.
//! The sweep checks that closure and logs a warning when it fails.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::calculations::beam::BeamConfig;
//! use beam_core::calculations::equilibrium::solve_reactions;
//! use beam_core::calculations::section_sweep::sweep;
//! use beam_core::loads::{LoadSet, PointLoad};
//!
//! let beam = BeamConfig::simply_supported(10.0);
//! let loads = LoadSet::new().with_load(PointLoad::transverse(5.0, 10.0));
//! let reactions = solve_reactions(&beam, &loads).unwrap();
//!
//! let forces = sweep(&beam, &loads, &reactions, 11).unwrap();
//! let mid = &forces.shear.stations[5];
//! assert_eq!(mid.position, 5.0);
//! assert_eq!((mid.before, mid.after), (5.0, -5.0));
//! ```

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::beam::{boundary_tolerance, BeamConfig};
use super::equilibrium::ReactionSet;
use crate::errors::EngineResult;
use crate::loads::{LinearLoad, Load, LoadSet};

/// Smallest number of stations a profile can have (both beam ends)
pub const MIN_STATIONS: usize = 2;

/// One sample of a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Distance from support A
    pub position: f64,
    /// Limit approaching the station from the left
    pub before: f64,
    /// Limit approaching the station from the right
    pub after: f64,
}

impl Station {
    /// Size of the discontinuity at this station
    pub fn jump(&self) -> f64 {
        self.after - self.before
    }
}

/// A sampled internal-force diagram
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub stations: Vec<Station>,
}

impl Profile {
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Positions of every station
    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        self.stations.iter().map(|s| s.position)
    }

    /// Station closest to `position`
    pub fn nearest(&self, position: f64) -> Option<&Station> {
        self.stations.iter().min_by(|a, b| {
            (a.position - position)
                .abs()
                .total_cmp(&(b.position - position).abs())
        })
    }
}

/// The three internal-force profiles of one solve
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InternalForces {
    pub axial: Profile,
    pub shear: Profile,
    pub moment: Profile,
}

/// Station positions for a sweep of `resolution` stations.
///
/// The count is clamped to at least [`MIN_STATIONS`]. The first and last
/// positions are exactly `0` and `length`.
pub fn station_positions(length: f64, resolution: usize) -> Vec<f64> {
    let count = resolution.max(MIN_STATIONS);
    let last = count - 1;
    (0..count)
        .map(|k| {
            if k == last {
                length
            } else {
                k as f64 / last as f64 * length
            }
        })
        .collect()
}

/// A force or couple acting at a single point, in the sweep's frame
#[derive(Debug, Clone, Copy)]
struct Concentrated {
    position: f64,
    /// Transverse force, positive upward
    upward: f64,
    /// Axial force, positive towards B
    axial: f64,
    /// Couple, positive counterclockwise
    couple: f64,
}

/// Reactions and concentrated loads, reactions first
fn concentrated_items(length: f64, loads: &LoadSet, reactions: &ReactionSet) -> Vec<Concentrated> {
    let mut items = vec![
        Concentrated {
            position: 0.0,
            upward: reactions.vertical_a,
            axial: reactions.horizontal_a,
            couple: reactions.moment_a,
        },
        Concentrated {
            position: length,
            upward: reactions.vertical_b,
            axial: 0.0,
            couple: 0.0,
        },
    ];

    for load in loads {
        match load {
            Load::Point(p) => items.push(Concentrated {
                position: p.location,
                upward: -p.vertical_component(),
                axial: p.horizontal_component(),
                couple: 0.0,
            }),
            Load::Moment(m) => items.push(Concentrated {
                position: m.location,
                upward: 0.0,
                axial: 0.0,
                couple: m.magnitude,
            }),
            Load::Uniform(_) | Load::Trapezoidal(_) => {}
        }
    }
    items
}

/// Which side of the cut a station value is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Before,
    After,
}

/// Membership of a concentrated item in the left body
fn on_left(position: f64, x: f64, tol: f64, side: Side) -> bool {
    match side {
        Side::Before => position < x - tol,
        Side::After => position <= x + tol,
    }
}

/// Internal forces at one cut, from one side
struct Cut<'a> {
    x: f64,
    tol: f64,
    items: &'a [Concentrated],
    distributed: &'a [LinearLoad],
}

impl Cut<'_> {
    fn axial(&self, side: Side) -> f64 {
        self.items
            .iter()
            .filter(|c| on_left(c.position, self.x, self.tol, side))
            .map(|c| c.axial)
            .sum()
    }

    fn shear(&self, side: Side) -> f64 {
        let concentrated: f64 = self
            .items
            .iter()
            .filter(|c| on_left(c.position, self.x, self.tol, side))
            .map(|c| c.upward)
            .sum();
        let distributed: f64 = self
            .distributed
            .iter()
            .filter_map(|d| d.clip(f64::NEG_INFINITY, self.x))
            .map(|part| part.total_force())
            .sum();
        concentrated - distributed
    }

    fn moment(&self, side: Side) -> f64 {
        let concentrated: f64 = self
            .items
            .iter()
            .filter(|c| !on_left(c.position, self.x, self.tol, side))
            .map(|c| c.upward * (c.position - self.x) + c.couple)
            .sum();
        let distributed: f64 = self
            .distributed
            .iter()
            .filter_map(|d| d.clip(self.x, f64::INFINITY))
            .map(|part| part.moment_about(self.x))
            .sum();
        concentrated - distributed
    }
}

/// Sample N(x), V(x) and M(x) at `resolution` stations.
///
/// Validates the beam configuration and loads before sweeping. The
/// reactions are taken as given; pass the output of
/// [`solve_reactions`](super::equilibrium::solve_reactions) for the same
/// inputs.
pub fn sweep(
    config: &BeamConfig,
    loads: &LoadSet,
    reactions: &ReactionSet,
    resolution: usize,
) -> EngineResult<InternalForces> {
    config.validate()?;
    loads.validate(config.length)?;
    Ok(sweep_validated(config.length, loads, reactions, resolution))
}

/// Sweep for inputs that have already been validated
pub(crate) fn sweep_validated(
    length: f64,
    loads: &LoadSet,
    reactions: &ReactionSet,
    resolution: usize,
) -> InternalForces {
    let tol = boundary_tolerance(length);
    let items = concentrated_items(length, loads, reactions);
    let distributed: Vec<LinearLoad> = loads.distributed().collect();
    let positions = station_positions(length, resolution);

    let mut forces = InternalForces {
        axial: Profile {
            stations: Vec::with_capacity(positions.len()),
        },
        shear: Profile {
            stations: Vec::with_capacity(positions.len()),
        },
        moment: Profile {
            stations: Vec::with_capacity(positions.len()),
        },
    };

    for &x in &positions {
        let cut = Cut {
            x,
            tol,
            items: &items,
            distributed: &distributed,
        };
        forces.axial.stations.push(Station {
            position: x,
            before: cut.axial(Side::Before),
            after: cut.axial(Side::After),
        });
        forces.shear.stations.push(Station {
            position: x,
            before: cut.shear(Side::Before),
            after: cut.shear(Side::After),
        });
        forces.moment.stations.push(Station {
            position: x,
            before: cut.moment(Side::Before),
            after: cut.moment(Side::After),
        });
    }

    debug!(
        "swept {} stations over length {} ({} concentrated items, {} distributed loads)",
        positions.len(),
        length,
        items.len(),
        distributed.len()
    );
    check_closure(length, &items, &distributed, &forces);
    forces
}

/// Warn when the profiles do not return to zero outside the beam
fn check_closure(length: f64, items: &[Concentrated], distributed: &[LinearLoad], forces: &InternalForces) {
    let force_scale: f64 = items.iter().map(|c| c.upward.abs() + c.axial.abs()).sum::<f64>()
        + distributed
            .iter()
            .map(|d| d.parts().iter().map(|p| p.force.abs()).sum::<f64>())
            .sum::<f64>();
    let couple_scale: f64 = items.iter().map(|c| c.couple.abs()).sum();
    let force_tol = 1e-9 * force_scale.max(1.0);
    let moment_tol = 1e-9 * (force_scale * length.abs().max(1.0) + couple_scale).max(1.0);

    let checks = [
        ("axial", forces.axial.stations.last().map(|s| s.after), force_tol),
        ("shear", forces.shear.stations.last().map(|s| s.after), force_tol),
        ("moment", forces.moment.stations.first().map(|s| s.before), moment_tol),
    ];
    for (name, value, tolerance) in checks {
        if let Some(value) = value {
            if value.abs() > tolerance {
                warn!(
                    "{} profile does not close: residual {} exceeds {}; reactions may not match the loads",
                    name, value, tolerance
                );
            }
        }
    }
}
