//! # Session
//!
//! The `Session` struct is the root document of one beam model: the beam, its
//! loads, the unit labels and the analysis settings. Sessions serialize to
//! `.beam` files as human-readable JSON (see [`crate::file_io`]).
//!
//! ## Structure
//!
//! ```text
//! Session
//! ├── meta: SessionMetadata (version, title, timestamps)
//! ├── units: UnitSystem (display labels only)
//! ├── settings: AnalysisSettings (station count)
//! ├── beam: BeamConfig
//! └── loads: LoadSet
//! ```
//!
//! Every edit is checked against the current beam before it is applied, so
//! a session never holds a load that would fail validation at solve time.
//! [`SharedSession`] serializes edits and solves for callers that mutate
//! the model from more than one thread.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::session::Session;
//! use beam_core::calculations::BeamKind;
//! use beam_core::loads::PointLoad;
//!
//! let mut session = Session::new("Lintel", 4.0, BeamKind::SimplySupported).unwrap();
//! session.add_load(PointLoad::transverse(2.0, 12.0)).unwrap();
//!
//! let result = session.solve().unwrap();
//! assert_eq!(result.reactions.vertical_a, 6.0);
//! ```

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::calculations::{calculate, AnalysisResult, AnalysisSettings, BeamConfig, BeamInput, BeamKind};
use crate::errors::{EngineError, EngineResult};
use crate::loads::{Load, LoadId, LoadSet};
use crate::units::UnitSystem;

/// Current schema version for .beam files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root session container, serialized to `.beam` files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub meta: SessionMetadata,

    #[serde(default)]
    pub units: UnitSystem,

    #[serde(default)]
    pub settings: AnalysisSettings,

    pub beam: BeamConfig,

    #[serde(default)]
    pub loads: LoadSet,
}

impl Session {
    /// Create a session with an empty load set.
    ///
    /// Fails with `InvalidBeamConfig` for a non-positive or non-finite length.
    pub fn new(title: impl Into<String>, length: f64, kind: BeamKind) -> EngineResult<Self> {
        let beam = BeamConfig::new(length, kind);
        beam.validate()?;

        let now = Utc::now();
        Ok(Session {
            meta: SessionMetadata {
                version: SCHEMA_VERSION.to_string(),
                title: title.into(),
                created: now,
                modified: now,
            },
            units: UnitSystem::default(),
            settings: AnalysisSettings::default(),
            beam,
            loads: LoadSet::new(),
        })
    }

    /// Add a load after validating it against the current beam.
    ///
    /// Returns the id of the added load.
    pub fn add_load(&mut self, load: impl Into<Load>) -> EngineResult<LoadId> {
        let load = load.into();
        load.validate(self.beam.length)?;
        let id = self.loads.add(load)?;
        self.touch();
        Ok(id)
    }

    /// Replace the load with the same id, returning the previous record
    pub fn replace_load(&mut self, load: impl Into<Load>) -> EngineResult<Load> {
        let load = load.into();
        load.validate(self.beam.length)?;
        let old = self.loads.replace(load)?;
        self.touch();
        Ok(old)
    }

    /// Remove a load by id.
    ///
    /// Returns the removed load if it existed.
    pub fn remove_load(&mut self, id: LoadId) -> Option<Load> {
        let load = self.loads.remove(id);
        if load.is_some() {
            self.touch();
        }
        load
    }

    /// Change the beam length.
    ///
    /// Rejected when the new length is invalid or any existing load would
    /// fall outside the shortened beam; the session is unchanged on error.
    pub fn set_length(&mut self, length: f64) -> EngineResult<()> {
        let beam = BeamConfig { length, ..self.beam };
        beam.validate()?;
        self.loads.validate(length)?;
        self.beam = beam;
        self.touch();
        Ok(())
    }

    /// Switch between simply-supported and cantilever
    pub fn set_beam_kind(&mut self, kind: BeamKind) {
        self.beam = BeamConfig::new(self.beam.length, kind);
        self.touch();
    }

    /// Change the display units. Numbers are not converted.
    pub fn set_units(&mut self, units: UnitSystem) {
        self.units = units;
        self.touch();
    }

    /// Snapshot of the current model as a solver input
    pub fn to_input(&self) -> BeamInput {
        BeamInput {
            label: self.meta.title.clone(),
            config: self.beam,
            loads: self.loads.clone(),
            settings: self.settings,
        }
    }

    /// Solve the current model
    pub fn solve(&self) -> EngineResult<AnalysisResult> {
        debug!("solving session '{}' with {} loads", self.meta.title, self.loads.len());
        calculate(&self.to_input())
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        let now = Utc::now();
        Session {
            meta: SessionMetadata {
                version: SCHEMA_VERSION.to_string(),
                title: String::new(),
                created: now,
                modified: now,
            },
            units: UnitSystem::default(),
            settings: AnalysisSettings::default(),
            beam: BeamConfig::default(),
            loads: LoadSet::new(),
        }
    }
}

/// Session metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    #[serde(default)]
    pub title: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// A session shared between threads.
///
/// Edits and solves take the same lock, so a solve always sees a complete
/// load set.
#[derive(Debug, Default)]
pub struct SharedSession {
    inner: Mutex<Session>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        SharedSession {
            inner: Mutex::new(session),
        }
    }

    fn lock(&self) -> EngineResult<MutexGuard<'_, Session>> {
        self.inner.lock().map_err(|_| EngineError::Internal {
            message: "session lock poisoned by a panicked writer".to_string(),
        })
    }

    /// Apply an edit while holding the lock
    pub fn update<T>(&self, edit: impl FnOnce(&mut Session) -> EngineResult<T>) -> EngineResult<T> {
        let mut session = self.lock()?;
        edit(&mut session)
    }

    /// Solve the session as it stands once the lock is acquired
    pub fn solve(&self) -> EngineResult<AnalysisResult> {
        self.lock()?.solve()
    }

    /// Copy of the current session
    pub fn snapshot(&self) -> EngineResult<Session> {
        Ok(self.lock()?.clone())
    }

    pub fn into_inner(self) -> EngineResult<Session> {
        self.inner.into_inner().map_err(|_| EngineError::Internal {
            message: "session lock poisoned by a panicked writer".to_string(),
        })
    }
}
