//! # Beam Calculations
//!
//! The solve pipeline, leaves first:
//!
//! - [`beam`] - beam length and support arrangement
//! - [`equilibrium`] - support reactions
//! - [`section_sweep`] - N(x), V(x), M(x) by the method of sections
//! - [`summary`] - peak magnitudes and signed extremes per profile
//! - [`analysis`] - `calculate(input)`, running the whole pipeline
//!
//! Each stage follows the same pattern: JSON-serializable inputs and results,
//! validation before computation, and structured [`EngineError`](crate::errors::EngineError)s.

pub mod analysis;
pub mod beam;
pub mod equilibrium;
pub mod section_sweep;
pub mod summary;

// Re-export commonly used types
pub use analysis::{calculate, AnalysisResult, AnalysisSettings, BeamInput, DEFAULT_STATIONS};
pub use beam::{BeamConfig, BeamKind, SupportType};
pub use equilibrium::{equilibrium_residual, solve_reactions, EquilibriumResidual, ReactionSet};
pub use section_sweep::{sweep, InternalForces, Profile, Station};
pub use summary::{DiagramSummary, Extreme, Extremes};
