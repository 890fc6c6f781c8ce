//! # Beam Configuration
//!
//! Length and support conditions of a single straight beam. Only the two
//! statically determinate arrangements are solvable:
//!
//! - **Simply-supported**: Pinned at A (x = 0) + Roller at B (x = length)
//! - **Cantilever**: Fixed at A + Free at B
//!
//! Every other pairing is either unstable or indeterminate and is rejected
//! with [`EngineError::InvalidBeamConfig`].
//!
//! ## Example
//!
//! ```rust
//! use beam_core::calculations::beam::{BeamConfig, BeamKind};
//!
//! let beam = BeamConfig::cantilever(3.0);
//! assert_eq!(beam.kind().unwrap(), BeamKind::Cantilever);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};

/// Tolerance for "load sits exactly at this position" comparisons.
///
/// Scales with the beam length so the same relative precision applies to a
/// 3 m cantilever and a 3000 mm one.
pub fn boundary_tolerance(length: f64) -> f64 {
    1e-9 * length.abs().max(1.0)
}

// =============================================================================
// SUPPORT TYPE
// =============================================================================

/// Support condition at one end of the beam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SupportType {
    /// Cantilever tip, carries no reaction
    Free,

    /// Support A of a simply-supported beam: vertical and axial reaction
    #[default]
    Pinned,

    /// Support B of a simply-supported beam: vertical reaction only
    Roller,

    /// Cantilever root: vertical, axial and moment reaction
    Fixed,
}

impl SupportType {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            SupportType::Free => "Free",
            SupportType::Pinned => "Pinned",
            SupportType::Roller => "Roller",
            SupportType::Fixed => "Fixed",
        }
    }
}

impl std::fmt::Display for SupportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// =============================================================================
// BEAM KIND
// =============================================================================

/// The determinate support arrangements the engine can solve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BeamKind {
    /// Pinned at A, roller at B
    #[default]
    SimplySupported,
    /// Fixed at A, free at B
    Cantilever,
}

impl BeamKind {
    /// Support pair `(A, B)` for this arrangement
    pub fn supports(&self) -> (SupportType, SupportType) {
        match self {
            BeamKind::SimplySupported => (SupportType::Pinned, SupportType::Roller),
            BeamKind::Cantilever => (SupportType::Fixed, SupportType::Free),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BeamKind::SimplySupported => "Simply-supported",
            BeamKind::Cantilever => "Cantilever",
        }
    }
}

impl std::fmt::Display for BeamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// =============================================================================
// BEAM CONFIG
// =============================================================================

/// Length and supports of the beam
///
/// # JSON Format
/// ```json
/// { "length": 10.0, "left_support": "Pinned", "right_support": "Roller" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamConfig {
    /// Distance from A to B
    pub length: f64,
    /// Support at A (x = 0)
    pub left_support: SupportType,
    /// Support at B (x = length)
    pub right_support: SupportType,
}

impl BeamConfig {
    pub fn new(length: f64, kind: BeamKind) -> Self {
        let (left_support, right_support) = kind.supports();
        BeamConfig {
            length,
            left_support,
            right_support,
        }
    }

    /// Pinned at A, roller at B
    pub fn simply_supported(length: f64) -> Self {
        BeamConfig::new(length, BeamKind::SimplySupported)
    }

    /// Fixed at A, free at B
    pub fn cantilever(length: f64) -> Self {
        BeamConfig::new(length, BeamKind::Cantilever)
    }

    /// Which determinate arrangement the supports form
    pub fn kind(&self) -> EngineResult<BeamKind> {
        match (self.left_support, self.right_support) {
            (SupportType::Pinned, SupportType::Roller) => Ok(BeamKind::SimplySupported),
            (SupportType::Fixed, SupportType::Free) => Ok(BeamKind::Cantilever),
            (left, right) => Err(EngineError::invalid_beam_config(
                "supports",
                format!("{}/{}", left, right),
                "Only Pinned/Roller (simply-supported) and Fixed/Free (cantilever) are solvable",
            )),
        }
    }

    /// Tolerance used for boundary comparisons on this beam
    pub fn tolerance(&self) -> f64 {
        boundary_tolerance(self.length)
    }

    /// Validate length and support arrangement
    pub fn validate(&self) -> EngineResult<BeamKind> {
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(EngineError::invalid_beam_config(
                "length",
                self.length.to_string(),
                "Beam length must be a positive finite number",
            ));
        }
        self.kind()
    }
}

impl Default for BeamConfig {
    fn default() -> Self {
        BeamConfig::simply_supported(10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_support_type_display() {
        assert_eq!(SupportType::Pinned.to_string(), "Pinned");
        assert_eq!(SupportType::Free.to_string(), "Free");
    }

    #[test]
    fn test_kind_detection() {
        assert_eq!(BeamConfig::simply_supported(4.0).kind().unwrap(), BeamKind::SimplySupported);
        assert_eq!(BeamConfig::cantilever(4.0).kind().unwrap(), BeamKind::Cantilever);
    }

    #[test]
    fn test_unsupported_combinations_rejected() {
        for (left, right) in [
            (SupportType::Pinned, SupportType::Pinned),
            (SupportType::Fixed, SupportType::Fixed),
            (SupportType::Free, SupportType::Fixed),
            (SupportType::Roller, SupportType::Roller),
            (SupportType::Free, SupportType::Free),
        ] {
            let config = BeamConfig {
                length: 5.0,
                left_support: left,
                right_support: right,
            };
            let err = config.validate().unwrap_err();
            assert_eq!(err.error_code(), "INVALID_BEAM_CONFIG");
        }
    }

    #[test]
    fn test_length_validation() {
        assert!(BeamConfig::simply_supported(0.0).validate().is_err());
        assert!(BeamConfig::simply_supported(-2.0).validate().is_err());
        assert!(BeamConfig::simply_supported(f64::INFINITY).validate().is_err());
        assert!(BeamConfig::simply_supported(0.5).validate().is_ok());
    }

    #[test]
    fn test_tolerance_scales_with_length() {
        assert_eq!(boundary_tolerance(0.5), 1e-9);
        assert!((boundary_tolerance(3000.0) - 3e-6).abs() < 1e-18);
    }

    #[test]
    fn test_serialization() {
        let config = BeamConfig::cantilever(2.5);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("Fixed"));
        let roundtrip: BeamConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, config);
    }
}
