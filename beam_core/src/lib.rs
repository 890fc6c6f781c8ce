//! # beam_core - Beam Statics & Internal-Force Diagram Engine
//!
//! `beam_core` solves a single straight, statically determinate beam
//! (simply-supported or cantilever) under point forces, pure moments, uniform
//! and trapezoidal distributed loads. It produces the support reactions and
//! sampled axial-force, shear-force and bending-moment diagrams. All inputs
//! and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: the solve is a pure function of beam and loads
//! - **Validate first**: bad input fails before anything is computed
//! - **Deterministic**: identical inputs give bit-identical outputs
//! - **Rich Errors**: structured error types naming the offending load and field
//!
//! ## Quick Start
//!
//! ```rust
//! use beam_core::calculations::{calculate, BeamConfig, BeamInput};
//! use beam_core::loads::{LoadSet, PointLoad};
//!
//! let input = BeamInput {
//!     label: "B-1".to_string(),
//!     config: BeamConfig::simply_supported(10.0),
//!     loads: LoadSet::new().with_load(PointLoad::transverse(5.0, 10.0)),
//!     settings: Default::default(),
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.reactions.vertical_a, 5.0);
//! assert_eq!(result.summary.max_shear, 5.0);
//! ```
//!
//! ## Modules
//!
//! - [`loads`] - Load records and the load set
//! - [`calculations`] - Beam configuration, equilibrium, section sweep, summary
//! - [`session`] - Editable session document and its thread-safe wrapper
//! - [`units`] - Display unit labels
//! - [`errors`] - Structured error types
//! - [`file_io`] - Session files with atomic saves and locking

pub mod calculations;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod loads;
pub mod session;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, AnalysisResult, BeamConfig, BeamInput, BeamKind};
pub use errors::{EngineError, EngineResult};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_session, save_session, FileLock};
pub use loads::{Load, LoadId, LoadSet};
pub use session::{Session, SharedSession};
pub use units::UnitSystem;
