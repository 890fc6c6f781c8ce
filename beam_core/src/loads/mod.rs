//! Load records and the load set a beam is solved for
//!
//! # Overview
//!
//! - [`PointLoad`], [`Moment`], [`UniformLoad`], [`TrapezoidalLoad`] - the four load kinds
//! - [`Load`] - enum wrapper over any record
//! - [`LoadSet`] - the collection a solve reads, keyed by [`LoadId`]
//! - [`LinearLoad`] - rectangular + triangular decomposition of distributed loads
//!
//! # Example
//!
//! ```
//! use beam_core::loads::{LoadSet, PointLoad, UniformLoad};
//!
//! let mut loads = LoadSet::new();
//! let id = loads.add(PointLoad::transverse(5.0, 10.0)).unwrap();
//! loads.add(UniformLoad::new(0.0, 10.0, 2.0)).unwrap();
//!
//! assert_eq!(loads.len(), 2);
//! assert!(loads.contains(id));
//! assert!(loads.validate(10.0).is_ok());
//! ```

pub mod distributed;
pub mod load_types;

pub use distributed::{LinearLoad, Resultant};
pub use load_types::{Load, LoadId, LoadKind, Moment, PointLoad, TrapezoidalLoad, UniformLoad};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::calculations::beam::boundary_tolerance;
use crate::errors::{EngineError, EngineResult};

/// The full set of loads applied to a beam
///
/// Loads are kept in insertion order so every sum over the set runs in the
/// same order, which keeps repeated solves bit-identical.
///
/// # JSON Format
/// ```json
/// {
///   "loads": [
///     { "type": "Point", "id": "…", "location": 5.0, "magnitude": 10.0, "angle_deg": 90.0 },
///     { "type": "Uniform", "id": "…", "start_location": 0.0, "end_location": 10.0, "magnitude": 2.0 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadSet {
    #[serde(default)]
    loads: Vec<Load>,
}

impl LoadSet {
    /// Create an empty load set
    pub fn new() -> Self {
        LoadSet { loads: Vec::new() }
    }

    /// Add a load and return self (builder pattern).
    ///
    /// Id uniqueness is not checked here; [`LoadSet::validate`] rejects
    /// duplicates before any solve.
    pub fn with_load(mut self, load: impl Into<Load>) -> Self {
        self.loads.push(load.into());
        self
    }

    /// Add a load, rejecting an id that is already present
    pub fn add(&mut self, load: impl Into<Load>) -> EngineResult<LoadId> {
        let load = load.into();
        let id = load.id();
        if self.contains(id) {
            return Err(duplicate_id(id));
        }
        self.loads.push(load);
        Ok(id)
    }

    /// Replace the record that has the same id, returning the old record
    pub fn replace(&mut self, load: impl Into<Load>) -> EngineResult<Load> {
        let load = load.into();
        let id = load.id();
        match self.loads.iter_mut().find(|l| l.id() == id) {
            Some(slot) => Ok(std::mem::replace(slot, load)),
            None => Err(EngineError::invalid_load(
                id,
                "id",
                id.to_string(),
                "No load with this id exists",
            )),
        }
    }

    /// Remove a load by id
    pub fn remove(&mut self, id: LoadId) -> Option<Load> {
        let pos = self.loads.iter().position(|l| l.id() == id)?;
        Some(self.loads.remove(pos))
    }

    /// Get a load by id
    pub fn get(&self, id: LoadId) -> Option<&Load> {
        self.loads.iter().find(|l| l.id() == id)
    }

    pub fn contains(&self, id: LoadId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// All loads in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Load> {
        self.loads.iter()
    }

    pub fn point_loads(&self) -> impl Iterator<Item = &PointLoad> {
        self.loads.iter().filter_map(|l| match l {
            Load::Point(p) => Some(p),
            _ => None,
        })
    }

    pub fn moments(&self) -> impl Iterator<Item = &Moment> {
        self.loads.iter().filter_map(|l| match l {
            Load::Moment(m) => Some(m),
            _ => None,
        })
    }

    pub fn uniform_loads(&self) -> impl Iterator<Item = &UniformLoad> {
        self.loads.iter().filter_map(|l| match l {
            Load::Uniform(u) => Some(u),
            _ => None,
        })
    }

    pub fn trapezoidal_loads(&self) -> impl Iterator<Item = &TrapezoidalLoad> {
        self.loads.iter().filter_map(|l| match l {
            Load::Trapezoidal(t) => Some(t),
            _ => None,
        })
    }

    /// Uniform and trapezoidal loads as linear loads, in insertion order
    pub fn distributed(&self) -> impl Iterator<Item = LinearLoad> + '_ {
        self.loads.iter().filter_map(Load::as_linear)
    }

    /// Validate every record against a beam of `beam_length` and check that
    /// ids are unique across the whole set
    pub fn validate(&self, beam_length: f64) -> EngineResult<()> {
        let mut seen = HashSet::with_capacity(self.loads.len());
        for load in &self.loads {
            if !seen.insert(load.id()) {
                return Err(duplicate_id(load.id()));
            }
            load.validate(beam_length)?;
        }
        Ok(())
    }

    /// Groups of point loads that share a location.
    ///
    /// Coincident loads are legal and simply superpose; the groups let a
    /// renderer stagger their labels. Only groups of two or more are returned,
    /// ordered by location.
    pub fn coincident_point_loads(&self, beam_length: f64) -> Vec<Vec<LoadId>> {
        let tol = boundary_tolerance(beam_length);
        let mut points: Vec<&PointLoad> = self.point_loads().collect();
        points.sort_by(|a, b| a.location.total_cmp(&b.location));

        let mut groups: Vec<Vec<LoadId>> = Vec::new();
        let mut current: Vec<LoadId> = Vec::new();
        let mut anchor = f64::NAN;
        for p in points {
            if !current.is_empty() && (p.location - anchor).abs() <= tol {
                current.push(p.id);
                continue;
            }
            if current.len() > 1 {
                groups.push(std::mem::take(&mut current));
            }
            current = vec![p.id];
            anchor = p.location;
        }
        if current.len() > 1 {
            groups.push(current);
        }
        groups
    }
}

fn duplicate_id(id: LoadId) -> EngineError {
    EngineError::invalid_load(id, "id", id.to_string(), "Load id is already used by another load")
}

impl FromIterator<Load> for LoadSet {
    fn from_iter<I: IntoIterator<Item = Load>>(iter: I) -> Self {
        LoadSet {
            loads: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a LoadSet {
    type Item = &'a Load;
    type IntoIter = std::slice::Iter<'a, Load>;

    fn into_iter(self) -> Self::IntoIter {
        self.loads.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_iterators() {
        let set = LoadSet::new()
            .with_load(PointLoad::transverse(2.0, 5.0))
            .with_load(Moment::new(3.0, 1.0))
            .with_load(UniformLoad::new(0.0, 4.0, 2.0))
            .with_load(TrapezoidalLoad::new(4.0, 8.0, 1.0, 3.0));

        assert_eq!(set.len(), 4);
        assert_eq!(set.point_loads().count(), 1);
        assert_eq!(set.moments().count(), 1);
        assert_eq!(set.uniform_loads().count(), 1);
        assert_eq!(set.trapezoidal_loads().count(), 1);
        assert_eq!(set.distributed().count(), 2);
    }

    #[test]
    fn test_add_rejects_duplicate_id_across_kinds() {
        let mut set = LoadSet::new();
        let id = set.add(PointLoad::transverse(2.0, 5.0)).unwrap();

        let clash = Moment::new(3.0, 1.0).with_id(id);
        let err = set.add(clash).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LOAD");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_validate_catches_duplicates_from_builder() {
        let p = PointLoad::transverse(2.0, 5.0);
        let twin = UniformLoad::new(0.0, 1.0, 1.0).with_id(p.id);
        let set = LoadSet::new().with_load(p).with_load(twin);
        assert!(set.validate(10.0).is_err());
    }

    #[test]
    fn test_replace_and_remove() {
        let mut set = LoadSet::new();
        let id = set.add(PointLoad::transverse(2.0, 5.0)).unwrap();

        let old = set.replace(PointLoad::transverse(3.0, 7.0).with_id(id)).unwrap();
        assert_eq!(old.extent(), (2.0, 2.0));
        assert_eq!(set.get(id).unwrap().extent(), (3.0, 3.0));

        assert!(set.replace(PointLoad::transverse(1.0, 1.0)).is_err());

        assert!(set.remove(id).is_some());
        assert!(set.remove(id).is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn test_validate_reports_first_bad_load() {
        let bad = TrapezoidalLoad::new(0.0, 5.0, 5.0, -3.0);
        let bad_id = bad.id;
        let set = LoadSet::new()
            .with_load(PointLoad::transverse(2.0, 5.0))
            .with_load(bad);

        match set.validate(10.0).unwrap_err() {
            EngineError::InvalidLoad { load_id, field, .. } => {
                assert_eq!(load_id, bad_id.to_string());
                assert_eq!(field, "end_magnitude");
            }
            other => panic!("expected InvalidLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_coincident_point_loads() {
        let a = PointLoad::transverse(5.0, 1.0);
        let b = PointLoad::new(5.0, 2.0, 45.0);
        let c = PointLoad::transverse(7.0, 1.0);
        let (ida, idb) = (a.id, b.id);
        let set = LoadSet::new().with_load(c).with_load(a).with_load(b);

        let groups = set.coincident_point_loads(10.0);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].contains(&ida));
        assert!(groups[0].contains(&idb));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let set = LoadSet::new()
            .with_load(PointLoad::new(5.0, 10.0, 60.0))
            .with_load(TrapezoidalLoad::new(0.0, 4.0, 0.0, 3.0));

        let json = serde_json::to_string_pretty(&set).unwrap();
        let roundtrip: LoadSet = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, set);
    }

    #[test]
    fn test_empty_set_deserializes() {
        let set: LoadSet = serde_json::from_str("{}").unwrap();
        assert!(set.is_empty());
        assert!(set.validate(1.0).is_ok());
    }
}
