//! # Unit Labels
//!
//! Display labels for lengths and forces. These are cosmetic only: the
//! engine works in whatever consistent unit system the caller picked and
//! never converts or rescales a number when the labels change.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::units::{ForceUnit, LengthUnit, UnitSystem};
//!
//! let units = UnitSystem::new(LengthUnit::Meter, ForceUnit::Kilonewton);
//! assert_eq!(units.moment_label(), "kN*m");
//! assert_eq!(units.intensity_label(), "kN/m");
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Length Units
// ============================================================================

/// Length unit label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    Meter,
    Centimeter,
    Millimeter,
    Foot,
    Inch,
}

impl LengthUnit {
    /// All available length units for selection lists
    pub const ALL: [LengthUnit; 5] = [
        LengthUnit::Meter,
        LengthUnit::Centimeter,
        LengthUnit::Millimeter,
        LengthUnit::Foot,
        LengthUnit::Inch,
    ];

    /// Short symbol shown next to values
    pub fn label(&self) -> &'static str {
        match self {
            LengthUnit::Meter => "m",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Millimeter => "mm",
            LengthUnit::Foot => "ft",
            LengthUnit::Inch => "in",
        }
    }

    /// Parse a symbol such as `"m"` or `"ft"`
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.label() == label)
    }
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force unit label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ForceUnit {
    Newton,
    #[default]
    Kilonewton,
    Pound,
    Kip,
}

impl ForceUnit {
    /// All available force units for selection lists
    pub const ALL: [ForceUnit; 4] = [
        ForceUnit::Newton,
        ForceUnit::Kilonewton,
        ForceUnit::Pound,
        ForceUnit::Kip,
    ];

    /// Short symbol shown next to values
    pub fn label(&self) -> &'static str {
        match self {
            ForceUnit::Newton => "N",
            ForceUnit::Kilonewton => "kN",
            ForceUnit::Pound => "lb",
            ForceUnit::Kip => "kip",
        }
    }

    /// Parse a symbol such as `"kN"` or `"lb"`
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.label() == label)
    }
}

impl std::fmt::Display for ForceUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Unit System
// ============================================================================

/// The pair of labels a session displays its numbers in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitSystem {
    pub length: LengthUnit,
    pub force: ForceUnit,
}

impl UnitSystem {
    pub fn new(length: LengthUnit, force: ForceUnit) -> Self {
        UnitSystem { length, force }
    }

    /// Label for locations and spans
    pub fn length_label(&self) -> &'static str {
        self.length.label()
    }

    /// Label for point loads and reactions
    pub fn force_label(&self) -> &'static str {
        self.force.label()
    }

    /// Label for applied moments and bending moments (force*length)
    pub fn moment_label(&self) -> String {
        format!("{}*{}", self.force.label(), self.length.label())
    }

    /// Label for distributed load intensities (force/length)
    pub fn intensity_label(&self) -> String {
        format!("{}/{}", self.force.label(), self.length.label())
    }
}
