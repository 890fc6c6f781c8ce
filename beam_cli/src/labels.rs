//! Display labels for loads (F1, M1, q1, Q1).
//!
//! Each kind is numbered separately in insertion order. Labels are derived
//! on demand from the load set and keyed by load id; the engine's records
//! never carry them. Point loads sharing a location get increasing `stack`
//! slots so their labels can be drawn offset from each other.

use std::collections::HashMap;

use beam_core::loads::{Load, LoadId, LoadKind, LoadSet};
use beam_core::units::UnitSystem;
use serde::Serialize;

/// A load's display name and value summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadLabel {
    pub id: LoadId,
    pub kind: LoadKind,
    /// Symbol plus ordinal, e.g. `F2`
    pub name: String,
    /// Magnitudes with unit labels, e.g. `10 (kN), 90°`
    pub value: String,
    /// Where the load sits, e.g. `at 5 m` or `from 0 to 3 m`
    pub position: String,
    /// Offset slot among coincident point loads, 0 for the first or only one
    pub stack: usize,
}

impl LoadLabel {
    /// `F1 = 10 (kN), 90°`
    pub fn text(&self) -> String {
        format!("{} = {}", self.name, self.value)
    }
}

fn ordinal_slot(kind: LoadKind) -> usize {
    match kind {
        LoadKind::Point => 0,
        LoadKind::Moment => 1,
        LoadKind::Uniform => 2,
        LoadKind::Trapezoidal => 3,
    }
}

/// Labels for every load on a beam of `beam_length`, in insertion order
pub fn label_loads(loads: &LoadSet, units: &UnitSystem, beam_length: f64) -> Vec<LoadLabel> {
    let mut counters = [0usize; 4];
    let length = units.length_label();
    let stacks: HashMap<LoadId, usize> = loads
        .coincident_point_loads(beam_length)
        .into_iter()
        .flat_map(|group| group.into_iter().enumerate().map(|(slot, id)| (id, slot)))
        .collect();

    loads
        .iter()
        .map(|load| {
            let kind = load.kind();
            let slot = &mut counters[ordinal_slot(kind)];
            *slot += 1;

            let value = match load {
                Load::Point(p) => format!("{} ({}), {}\u{b0}", p.magnitude, units.force_label(), p.angle_deg),
                Load::Moment(m) => format!("{} ({})", m.magnitude, units.moment_label()),
                Load::Uniform(u) => format!("{} ({})", u.magnitude, units.intensity_label()),
                Load::Trapezoidal(t) => format!(
                    "{}; {} ({})",
                    t.start_magnitude,
                    t.end_magnitude,
                    units.intensity_label()
                ),
            };
            let (start, end) = load.extent();
            let position = if start == end {
                format!("at {} {}", start, length)
            } else {
                format!("from {} to {} {}", start, end, length)
            };

            LoadLabel {
                id: load.id(),
                kind,
                name: format!("{}{}", kind.symbol(), slot),
                value,
                position,
                stack: stacks.get(&load.id()).copied().unwrap_or(0),
            }
        })
        .collect()
}

/// Resolve either a display name (`q2`) or a full id string to a load id
pub fn resolve_load(loads: &LoadSet, units: &UnitSystem, beam_length: f64, key: &str) -> Option<LoadId> {
    if let Ok(id) = key.parse::<LoadId>() {
        return loads.contains(id).then_some(id);
    }
    label_loads(loads, units, beam_length)
        .into_iter()
        .find(|label| label.name == key)
        .map(|label| label.id)
}
