//! Load record definitions
//!
//! The four load kinds a beam can carry. Records are plain data produced by
//! the input layer; the engine reads them but never modifies them.
//!
//! ## Sign Convention
//! - Point load: acts along `(cos θ, sin θ)` times its signed magnitude, with θ
//!   measured from the beam axis (A towards B). The transverse component is
//!   positive downward, the axial component positive towards B.
//! - Distributed loads: positive downward
//! - Applied moment: positive counterclockwise

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::distributed::LinearLoad;
use crate::calculations::beam::boundary_tolerance;
use crate::errors::{EngineError, EngineResult};

/// Identifier of a load record, unique across a whole [`super::LoadSet`]
pub type LoadId = Uuid;

// ============================================================================
// Load Kinds
// ============================================================================

/// The four supported load kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadKind {
    Point,
    Moment,
    Uniform,
    Trapezoidal,
}

impl LoadKind {
    /// Letter used when labelling loads on a diagram (F1, M1, q1, Q1)
    ///
    /// # Example
    /// ```
    /// use beam_core::loads::LoadKind;
    /// assert_eq!(LoadKind::Uniform.symbol(), "q");
    /// ```
    pub fn symbol(&self) -> &'static str {
        match self {
            LoadKind::Point => "F",
            LoadKind::Moment => "M",
            LoadKind::Uniform => "q",
            LoadKind::Trapezoidal => "Q",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadKind::Point => "Point load",
            LoadKind::Moment => "Moment",
            LoadKind::Uniform => "Uniformly distributed load",
            LoadKind::Trapezoidal => "Trapezoidal load",
        }
    }
}

impl std::fmt::Display for LoadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Load Records
// ============================================================================

/// Concentrated force at a point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    pub id: LoadId,
    /// Distance from support A
    pub location: f64,
    /// Signed magnitude. The sign sets the transverse sense only: a negative
    /// load acts at `-angle_deg`, mirrored about the beam axis.
    pub magnitude: f64,
    /// Angle from the beam axis in degrees, within [0, 180]
    pub angle_deg: f64,
}

impl PointLoad {
    pub fn new(location: f64, magnitude: f64, angle_deg: f64) -> Self {
        PointLoad {
            id: Uuid::new_v4(),
            location,
            magnitude,
            angle_deg,
        }
    }

    /// Purely transverse load (90°), positive downward
    pub fn transverse(location: f64, magnitude: f64) -> Self {
        PointLoad::new(location, magnitude, 90.0)
    }

    /// Replace the generated id (builder pattern)
    pub fn with_id(mut self, id: LoadId) -> Self {
        self.id = id;
        self
    }

    /// Component perpendicular to the beam, positive downward
    pub fn vertical_component(&self) -> f64 {
        self.magnitude * direction(self.angle_deg).1
    }

    /// Component along the beam, positive towards support B.
    ///
    /// Independent of the magnitude's sign, which only mirrors the load
    /// about the beam axis.
    pub fn horizontal_component(&self) -> f64 {
        self.magnitude.abs() * direction(self.angle_deg).0
    }

    pub fn validate(&self, beam_length: f64) -> EngineResult<()> {
        check_location(self.id, "location", self.location, beam_length)?;
        check_finite(self.id, "magnitude", self.magnitude)?;
        check_finite(self.id, "angle_deg", self.angle_deg)?;
        if !(0.0..=180.0).contains(&self.angle_deg) {
            return Err(EngineError::invalid_load(
                self.id,
                "angle_deg",
                self.angle_deg.to_string(),
                "Angle must be within [0, 180] degrees",
            ));
        }
        Ok(())
    }
}

/// `(cos θ, sin θ)` for an angle in degrees.
///
/// The axis-aligned angles return exact components so a transverse load never
/// leaks a rounding-sized axial force into the diagrams.
fn direction(angle_deg: f64) -> (f64, f64) {
    if angle_deg == 0.0 {
        (1.0, 0.0)
    } else if angle_deg == 90.0 {
        (0.0, 1.0)
    } else if angle_deg == 180.0 {
        (-1.0, 0.0)
    } else {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        (cos, sin)
    }
}

/// Concentrated couple at a point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moment {
    pub id: LoadId,
    /// Distance from support A
    pub location: f64,
    /// Signed magnitude, positive counterclockwise
    pub magnitude: f64,
}

impl Moment {
    pub fn new(location: f64, magnitude: f64) -> Self {
        Moment {
            id: Uuid::new_v4(),
            location,
            magnitude,
        }
    }

    pub fn with_id(mut self, id: LoadId) -> Self {
        self.id = id;
        self
    }

    pub fn validate(&self, beam_length: f64) -> EngineResult<()> {
        check_location(self.id, "location", self.location, beam_length)?;
        check_finite(self.id, "magnitude", self.magnitude)
    }
}

/// Constant intensity over `[start_location, end_location]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformLoad {
    pub id: LoadId,
    pub start_location: f64,
    pub end_location: f64,
    /// Force per unit length, positive downward
    pub magnitude: f64,
}

impl UniformLoad {
    pub fn new(start_location: f64, end_location: f64, magnitude: f64) -> Self {
        UniformLoad {
            id: Uuid::new_v4(),
            start_location,
            end_location,
            magnitude,
        }
    }

    pub fn with_id(mut self, id: LoadId) -> Self {
        self.id = id;
        self
    }

    pub fn as_linear(&self) -> LinearLoad {
        LinearLoad::uniform(self.start_location, self.end_location, self.magnitude)
    }

    pub fn validate(&self, beam_length: f64) -> EngineResult<()> {
        check_range(self.id, self.start_location, self.end_location, beam_length)?;
        check_finite(self.id, "magnitude", self.magnitude)
    }
}

/// Linearly varying intensity over `[start_location, end_location]`.
///
/// Both end magnitudes share a sign; a load that crosses zero must be entered
/// as two adjacent records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrapezoidalLoad {
    pub id: LoadId,
    pub start_location: f64,
    pub end_location: f64,
    pub start_magnitude: f64,
    pub end_magnitude: f64,
}

impl TrapezoidalLoad {
    pub fn new(start_location: f64, end_location: f64, start_magnitude: f64, end_magnitude: f64) -> Self {
        TrapezoidalLoad {
            id: Uuid::new_v4(),
            start_location,
            end_location,
            start_magnitude,
            end_magnitude,
        }
    }

    pub fn with_id(mut self, id: LoadId) -> Self {
        self.id = id;
        self
    }

    pub fn as_linear(&self) -> LinearLoad {
        LinearLoad::new(
            self.start_location,
            self.end_location,
            self.start_magnitude,
            self.end_magnitude,
        )
    }

    pub fn validate(&self, beam_length: f64) -> EngineResult<()> {
        check_range(self.id, self.start_location, self.end_location, beam_length)?;
        check_finite(self.id, "start_magnitude", self.start_magnitude)?;
        check_finite(self.id, "end_magnitude", self.end_magnitude)?;
        // Zero is compatible with either sign
        if self.start_magnitude * self.end_magnitude < 0.0 {
            return Err(EngineError::invalid_load(
                self.id,
                "end_magnitude",
                self.end_magnitude.to_string(),
                format!(
                    "Start and end magnitudes must share a sign (start is {}); split the load at its zero crossing",
                    self.start_magnitude
                ),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Load Enum
// ============================================================================

/// Any load record
///
/// # JSON Format
/// ```json
/// { "type": "Point", "id": "…", "location": 5.0, "magnitude": 10.0, "angle_deg": 90.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Load {
    Point(PointLoad),
    Moment(Moment),
    Uniform(UniformLoad),
    Trapezoidal(TrapezoidalLoad),
}

impl Load {
    pub fn id(&self) -> LoadId {
        match self {
            Load::Point(l) => l.id,
            Load::Moment(l) => l.id,
            Load::Uniform(l) => l.id,
            Load::Trapezoidal(l) => l.id,
        }
    }

    /// Same record under another id, used to swap a load in place
    pub fn with_id(self, id: LoadId) -> Self {
        match self {
            Load::Point(l) => Load::Point(l.with_id(id)),
            Load::Moment(l) => Load::Moment(l.with_id(id)),
            Load::Uniform(l) => Load::Uniform(l.with_id(id)),
            Load::Trapezoidal(l) => Load::Trapezoidal(l.with_id(id)),
        }
    }

    pub fn kind(&self) -> LoadKind {
        match self {
            Load::Point(_) => LoadKind::Point,
            Load::Moment(_) => LoadKind::Moment,
            Load::Uniform(_) => LoadKind::Uniform,
            Load::Trapezoidal(_) => LoadKind::Trapezoidal,
        }
    }

    /// Extent along the beam; concentrated loads return `(x, x)`
    pub fn extent(&self) -> (f64, f64) {
        match self {
            Load::Point(l) => (l.location, l.location),
            Load::Moment(l) => (l.location, l.location),
            Load::Uniform(l) => (l.start_location, l.end_location),
            Load::Trapezoidal(l) => (l.start_location, l.end_location),
        }
    }

    /// Distributed loads as a [`LinearLoad`]; `None` for concentrated loads
    pub fn as_linear(&self) -> Option<LinearLoad> {
        match self {
            Load::Uniform(l) => Some(l.as_linear()),
            Load::Trapezoidal(l) => Some(l.as_linear()),
            Load::Point(_) | Load::Moment(_) => None,
        }
    }

    /// Validate the record against a beam of `beam_length`
    pub fn validate(&self, beam_length: f64) -> EngineResult<()> {
        match self {
            Load::Point(l) => l.validate(beam_length),
            Load::Moment(l) => l.validate(beam_length),
            Load::Uniform(l) => l.validate(beam_length),
            Load::Trapezoidal(l) => l.validate(beam_length),
        }
    }
}

impl From<PointLoad> for Load {
    fn from(load: PointLoad) -> Self {
        Load::Point(load)
    }
}

impl From<Moment> for Load {
    fn from(load: Moment) -> Self {
        Load::Moment(load)
    }
}

impl From<UniformLoad> for Load {
    fn from(load: UniformLoad) -> Self {
        Load::Uniform(load)
    }
}

impl From<TrapezoidalLoad> for Load {
    fn from(load: TrapezoidalLoad) -> Self {
        Load::Trapezoidal(load)
    }
}

// ============================================================================
// Validation Helpers
// ============================================================================

fn check_finite(id: LoadId, field: &str, value: f64) -> EngineResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::invalid_load(id, field, value.to_string(), "Value must be a finite number"))
    }
}

/// Locations up to `boundary_tolerance(beam_length)` outside `[0, L]` are
/// accepted unchanged; the sweep's tie rule puts them at the nearer end.
fn check_location(id: LoadId, field: &str, value: f64, beam_length: f64) -> EngineResult<()> {
    check_finite(id, field, value)?;
    let tol = boundary_tolerance(beam_length);
    if value < -tol || value > beam_length + tol {
        return Err(EngineError::invalid_load(
            id,
            field,
            value.to_string(),
            format!("Location must be within [0, {}]", beam_length),
        ));
    }
    Ok(())
}

fn check_range(id: LoadId, start: f64, end: f64, beam_length: f64) -> EngineResult<()> {
    check_location(id, "start_location", start, beam_length)?;
    check_location(id, "end_location", end, beam_length)?;
    if end <= start {
        return Err(EngineError::invalid_load(
            id,
            "end_location",
            end.to_string(),
            format!("End location must be greater than start location ({})", start),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn field_of(err: EngineError) -> String {
        match err {
            EngineError::InvalidLoad { field, .. } => field,
            other => panic!("expected InvalidLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_transverse_components_are_exact() {
        let load = PointLoad::transverse(5.0, 10.0);
        assert_eq!(load.vertical_component(), 10.0);
        assert_eq!(load.horizontal_component(), 0.0);
    }

    #[test]
    fn test_axial_components() {
        assert_eq!(PointLoad::new(5.0, 4.0, 0.0).horizontal_component(), 4.0);
        assert_eq!(PointLoad::new(5.0, 4.0, 180.0).horizontal_component(), -4.0);
        assert_eq!(PointLoad::new(5.0, 4.0, 180.0).vertical_component(), 0.0);
    }

    #[test]
    fn test_inclined_components() {
        let load = PointLoad::new(2.0, 10.0, 30.0);
        assert_relative_eq!(load.vertical_component(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(load.horizontal_component(), 10.0 * 3f64.sqrt() / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_magnitude_mirrors_about_axis() {
        let up = PointLoad::new(2.0, -10.0, 60.0);
        let down = PointLoad::new(2.0, 10.0, 60.0);
        assert_relative_eq!(up.vertical_component(), -down.vertical_component(), epsilon = 1e-12);
        assert_eq!(up.horizontal_component(), down.horizontal_component());
        assert_relative_eq!(up.horizontal_component(), 5.0, epsilon = 1e-12);

        assert_eq!(PointLoad::new(2.0, -4.0, 180.0).horizontal_component(), -4.0);
    }

    #[test]
    fn test_point_load_validation() {
        assert!(PointLoad::transverse(0.0, 1.0).validate(10.0).is_ok());
        assert!(PointLoad::transverse(10.0, 1.0).validate(10.0).is_ok());
        assert_eq!(field_of(PointLoad::transverse(10.5, 1.0).validate(10.0).unwrap_err()), "location");
        assert_eq!(field_of(PointLoad::new(5.0, 1.0, 190.0).validate(10.0).unwrap_err()), "angle_deg");
        assert_eq!(field_of(PointLoad::new(5.0, 1.0, -1.0).validate(10.0).unwrap_err()), "angle_deg");
        assert_eq!(field_of(PointLoad::transverse(5.0, f64::NAN).validate(10.0).unwrap_err()), "magnitude");
    }

    #[test]
    fn test_range_validation() {
        assert!(UniformLoad::new(0.0, 10.0, 5.0).validate(10.0).is_ok());
        assert_eq!(field_of(UniformLoad::new(4.0, 4.0, 5.0).validate(10.0).unwrap_err()), "end_location");
        assert_eq!(field_of(UniformLoad::new(6.0, 4.0, 5.0).validate(10.0).unwrap_err()), "end_location");
        assert_eq!(field_of(UniformLoad::new(-1.0, 4.0, 5.0).validate(10.0).unwrap_err()), "start_location");
    }

    #[test]
    fn test_location_tolerance_band() {
        // boundary_tolerance(10.0) is 1e-8
        assert!(PointLoad::transverse(10.0 + 5e-9, 1.0).validate(10.0).is_ok());
        assert!(Moment::new(-5e-9, 1.0).validate(10.0).is_ok());
        assert!(UniformLoad::new(-5e-9, 10.0 + 5e-9, 1.0).validate(10.0).is_ok());
        assert_eq!(field_of(PointLoad::transverse(10.0 + 1e-6, 1.0).validate(10.0).unwrap_err()), "location");
        assert_eq!(field_of(Moment::new(-1e-6, 1.0).validate(10.0).unwrap_err()), "location");
    }

    #[test]
    fn test_trapezoid_sign_rule() {
        let crossing = TrapezoidalLoad::new(0.0, 5.0, 5.0, -3.0);
        assert_eq!(field_of(crossing.validate(10.0).unwrap_err()), "end_magnitude");

        // Zero is compatible with either sign
        assert!(TrapezoidalLoad::new(0.0, 5.0, 0.0, -3.0).validate(10.0).is_ok());
        assert!(TrapezoidalLoad::new(0.0, 5.0, 4.0, 0.0).validate(10.0).is_ok());
        assert!(TrapezoidalLoad::new(0.0, 5.0, -4.0, -1.0).validate(10.0).is_ok());
    }

    #[test]
    fn test_error_names_load_id() {
        let load = Moment::new(20.0, 1.0);
        match load.validate(10.0).unwrap_err() {
            EngineError::InvalidLoad { load_id, .. } => assert_eq!(load_id, load.id.to_string()),
            other => panic!("expected InvalidLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_load_enum_serialization() {
        let load: Load = TrapezoidalLoad::new(1.0, 4.0, 2.0, 6.0).into();
        let json = serde_json::to_string(&load).unwrap();
        assert!(json.contains("\"type\":\"Trapezoidal\""));

        let roundtrip: Load = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, load);
        assert_eq!(roundtrip.kind(), LoadKind::Trapezoidal);
        assert_eq!(roundtrip.extent(), (1.0, 4.0));
    }

    #[test]
    fn test_as_linear_only_for_distributed() {
        assert!(Load::from(PointLoad::transverse(1.0, 1.0)).as_linear().is_none());
        assert!(Load::from(Moment::new(1.0, 1.0)).as_linear().is_none());
        let linear = Load::from(UniformLoad::new(1.0, 3.0, 2.0)).as_linear().unwrap();
        assert_eq!(linear.total_force(), 4.0);
    }

    #[test]
    fn test_load_with_id_keeps_kind_and_values() {
        let id = LoadId::new_v4();
        let load = Load::from(TrapezoidalLoad::new(1.0, 3.0, 2.0, 4.0)).with_id(id);
        assert_eq!(load.id(), id);
        assert_eq!(load.kind(), LoadKind::Trapezoidal);
        assert_eq!(load.extent(), (1.0, 3.0));
    }
}
