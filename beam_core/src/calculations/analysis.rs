//! # Beam Analysis
//!
//! Orchestrates one solve: validation, reactions, section sweep and summary.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::calculations::{calculate, BeamInput};
//! use beam_core::calculations::beam::BeamConfig;
//! use beam_core::loads::{LoadSet, UniformLoad};
//!
//! let input = BeamInput {
//!     label: "B-1".to_string(),
//!     config: BeamConfig::simply_supported(8.0),
//!     loads: LoadSet::new().with_load(UniformLoad::new(0.0, 8.0, 2.0)),
//!     settings: Default::default(),
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.summary.max_moment - 16.0).abs() < 1e-9); // wL²/8
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use super::beam::{BeamConfig, BeamKind};
use super::equilibrium::{reactions_for, ReactionSet};
use super::section_sweep::{sweep_validated, InternalForces, MIN_STATIONS};
use super::summary::DiagramSummary;
use crate::errors::EngineResult;
use crate::loads::LoadSet;

/// Default number of stations per profile
pub const DEFAULT_STATIONS: usize = 601;

fn default_stations() -> usize {
    DEFAULT_STATIONS
}

/// Tunable parameters of a solve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Stations per profile, clamped to at least 2
    #[serde(default = "default_stations")]
    pub stations: usize,
}

impl AnalysisSettings {
    /// Station count actually used by the sweep
    pub fn effective_stations(&self) -> usize {
        self.stations.max(MIN_STATIONS)
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            stations: DEFAULT_STATIONS,
        }
    }
}

/// Everything needed for one solve
///
/// # JSON Format
/// ```json
/// {
///   "label": "B-1",
///   "config": { "length": 10.0, "left_support": "Pinned", "right_support": "Roller" },
///   "loads": { "loads": [
///     { "type": "Point", "id": "…", "location": 5.0, "magnitude": 10.0, "angle_deg": 90.0 }
///   ] },
///   "settings": { "stations": 601 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamInput {
    /// User label (e.g. "B-1", "Lintel over door")
    #[serde(default)]
    pub label: String,
    pub config: BeamConfig,
    #[serde(default)]
    pub loads: LoadSet,
    #[serde(default)]
    pub settings: AnalysisSettings,
}

impl BeamInput {
    /// Validate beam and loads, returning the beam arrangement
    pub fn validate(&self) -> EngineResult<BeamKind> {
        let kind = self.config.validate()?;
        self.loads.validate(self.config.length)?;
        Ok(kind)
    }
}

/// Output of one solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub beam_kind: BeamKind,
    pub reactions: ReactionSet,
    pub forces: InternalForces,
    pub summary: DiagramSummary,
}

/// Solve reactions and internal-force diagrams for a beam.
///
/// All inputs are validated before any computation. Identical inputs give
/// bit-identical results.
///
/// # Returns
///
/// * `Ok(AnalysisResult)` - reactions, the three profiles and their peaks
/// * `Err(EngineError)` - the first validation failure found
pub fn calculate(input: &BeamInput) -> EngineResult<AnalysisResult> {
    let beam_kind = input.validate()?;
    let length = input.config.length;

    let reactions = reactions_for(beam_kind, length, &input.loads);
    let forces = sweep_validated(length, &input.loads, &reactions, input.settings.effective_stations());
    let summary = DiagramSummary::from_forces(&forces);

    debug!(
        "analysis '{}': peaks N = {}, V = {}, M = {}",
        input.label, summary.max_axial, summary.max_shear, summary.max_moment
    );

    Ok(AnalysisResult {
        beam_kind,
        reactions,
        forces,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{PointLoad, TrapezoidalLoad};
    use approx::assert_relative_eq;

    fn test_input() -> BeamInput {
        BeamInput {
            label: "Test Beam".to_string(),
            config: BeamConfig::simply_supported(10.0),
            loads: LoadSet::new().with_load(PointLoad::transverse(5.0, 10.0)),
            settings: AnalysisSettings::default(),
        }
    }

    #[test]
    fn test_calculate_point_load() {
        let result = calculate(&test_input()).unwrap();

        assert_eq!(result.beam_kind, BeamKind::SimplySupported);
        assert_relative_eq!(result.reactions.vertical_a, 5.0);
        assert_relative_eq!(result.reactions.vertical_b, 5.0);
        assert_eq!(result.forces.shear.len(), DEFAULT_STATIONS);
        assert_relative_eq!(result.summary.max_shear, 5.0, epsilon = 1e-12);
        assert_relative_eq!(result.summary.max_moment, 25.0, epsilon = 1e-9);
        assert_eq!(result.summary.max_axial, 0.0);
    }

    #[test]
    fn test_settings_resolution() {
        let mut input = test_input();
        input.settings.stations = 1;
        let result = calculate(&input).unwrap();
        assert_eq!(result.forces.moment.len(), 2);
    }

    #[test]
    fn test_invalid_input_returns_error() {
        let mut input = test_input();
        input.loads = LoadSet::new().with_load(TrapezoidalLoad::new(0.0, 5.0, 5.0, -3.0));
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LOAD");
    }

    #[test]
    fn test_deterministic() {
        let input = test_input();
        assert_eq!(calculate(&input).unwrap(), calculate(&input).unwrap());
    }

    #[test]
    fn test_input_defaults_from_json() {
        let json = r#"{ "config": { "length": 4.0, "left_support": "Fixed", "right_support": "Free" } }"#;
        let input: BeamInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.settings.stations, DEFAULT_STATIONS);
        assert!(input.loads.is_empty());

        let result = calculate(&input).unwrap();
        assert_eq!(result.beam_kind, BeamKind::Cantilever);
        assert_eq!(result.summary, DiagramSummary::default());
    }

    #[test]
    fn test_result_serializes() {
        let result = calculate(&test_input()).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"reactions\""));
        assert!(json.contains("\"summary\""));
    }
}
