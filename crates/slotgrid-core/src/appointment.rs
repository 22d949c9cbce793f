#![forbid(unsafe_code)]

//! The appointment data model.
//!
//! An [`Appointment`] is a contiguous span of one or more slots on a lane,
//! identified by a stable string id. The core never owns the committed
//! appointment list; it receives borrowed slices fresh on every query and
//! only holds a transient snapshot of one appointment during an active
//! gesture.
//!
//! # Invariants
//!
//! 1. `duration >= 1` (a zero-length appointment cannot be constructed
//!    through [`Appointment::new`]; `duration` is clamped).
//! 2. Open-map extensibility: fields the core does not interpret travel in
//!    [`Appointment::meta`] and pass through moves/resizes unmodified.
//! 3. A `locked` appointment accepts no drag or resize gestures.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SlotOverride
// ---------------------------------------------------------------------------

/// Per-appointment blocked-slot override predicate.
///
/// When a candidate placement intersects a blocked slot, the predicate is
/// consulted with `(slot, lane_id)` for each intersected slot; returning
/// `true` forgives the intersection for that slot only. A single `false`
/// makes the whole candidate invalid.
#[derive(Clone)]
pub struct SlotOverride(Arc<dyn Fn(u32, &str) -> bool + Send + Sync>);

impl SlotOverride {
    /// Wrap a predicate.
    pub fn new(predicate: impl Fn(u32, &str) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }

    /// An override that forgives every blocked slot.
    #[must_use]
    pub fn always() -> Self {
        Self::new(|_, _| true)
    }

    /// Consult the predicate for one slot.
    #[must_use]
    pub fn allows(&self, slot: u32, lane_id: &str) -> bool {
        (self.0)(slot, lane_id)
    }
}

impl fmt::Debug for SlotOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SlotOverride(..)")
    }
}

// Identity comparison: two overrides are equal iff they share the same
// underlying predicate. Closures have no structural equality.
impl PartialEq for SlotOverride {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

// ---------------------------------------------------------------------------
// Appointment
// ---------------------------------------------------------------------------

/// A time-bounded item occupying `[start_slot, start_slot + duration)` on a
/// lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// Stable identity across renders and moves.
    pub id: String,
    /// First occupied slot index.
    pub start_slot: u32,
    /// Number of consecutive slots occupied; always >= 1.
    pub duration: u32,
    /// Optional display title; passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// When true, the appointment accepts no drag or resize gestures.
    #[serde(default)]
    pub locked: bool,
    /// When true, this appointment may coexist with others at overlapping
    /// slots.
    #[serde(default)]
    pub allow_overlap: bool,
    /// Blocked-slot override predicate. Callables do not serialize; a
    /// deserialized appointment has no override.
    #[serde(skip)]
    pub on_blocked_slot: Option<SlotOverride>,
    /// Open map of caller-defined fields the core passes through unmodified.
    #[serde(default)]
    pub meta: AHashMap<String, serde_json::Value>,
}

impl Appointment {
    /// Create an appointment with the given placement.
    ///
    /// `duration` is clamped to at least 1.
    #[must_use]
    pub fn new(id: impl Into<String>, start_slot: u32, duration: u32) -> Self {
        Self {
            id: id.into(),
            start_slot,
            duration: duration.max(1),
            title: None,
            locked: false,
            allow_overlap: false,
            on_blocked_slot: None,
            meta: AHashMap::new(),
        }
    }

    /// Set the display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Mark the appointment as locked.
    #[must_use]
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    /// Permit overlap with other appointments.
    #[must_use]
    pub fn with_allow_overlap(mut self) -> Self {
        self.allow_overlap = true;
        self
    }

    /// Attach a blocked-slot override predicate.
    #[must_use]
    pub fn with_blocked_slot_override(mut self, predicate: SlotOverride) -> Self {
        self.on_blocked_slot = Some(predicate);
        self
    }

    /// Attach a caller-defined metadata entry.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }

    /// First slot past the occupied span.
    #[must_use]
    pub const fn end_slot(&self) -> u32 {
        self.start_slot + self.duration
    }

    /// The occupied half-open slot interval.
    #[must_use]
    pub const fn span(&self) -> Range<u32> {
        self.start_slot..self.end_slot()
    }

    /// A copy of this appointment at a different placement. Every other
    /// field, including `meta`, is preserved.
    #[must_use]
    pub fn placed_at(&self, start_slot: u32, duration: u32) -> Self {
        Self {
            start_slot,
            duration,
            ..self.clone()
        }
    }
}
