#![forbid(unsafe_code)]

//! The resize gesture state machine.
//!
//! [`ResizeCoordinator`] holds the single active resize gesture. Unlike
//! drag, a resize is scoped to exactly one lane: moves from other lanes
//! are ignored, and the candidate is a `(start_slot, duration)` pair
//! computed from the horizontal pointer delta on the grabbed edge.
//!
//! # State Machine
//!
//! `Idle` → `Resizing` → `Idle`.
//!
//! # Invariants
//!
//! 1. A locked appointment never starts a gesture.
//! 2. Slot deltas are whole slots, rounded (not truncated), so sub-slot
//!    drift never makes the edge feel sticky.
//! 3. A candidate with `duration < 1` never reaches the validator; the
//!    previous valid candidate is retained.
//! 4. Only candidates that pass the lane's validation update the state, so
//!    the live candidate is always the most recent *valid* one.
//! 5. `finish` emits only when the candidate differs from the original
//!    pair; the emitted appointment keeps its id and every other field.

use slotgrid_core::appointment::Appointment;
use slotgrid_core::validate::{Candidate, validate_placement};

use crate::view::LaneView;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Which edge of the appointment is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    /// The left edge: moving it right advances the start and shrinks the
    /// duration by the same amount, and vice versa.
    Start,
    /// The right edge: moving it changes only the duration.
    End,
}

/// The live state of an in-progress resize.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    /// Snapshot of the appointment being resized.
    pub appointment: Appointment,
    /// The one lane this gesture is scoped to.
    pub lane_id: String,
    /// The grabbed edge.
    pub edge: ResizeEdge,
    /// Pointer x-coordinate at gesture start.
    pub start_x: f64,
    pub original_start_slot: u32,
    pub original_duration: u32,
    /// Most recent valid candidate placement.
    pub candidate_start_slot: u32,
    pub candidate_duration: u32,
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

/// Shared container for the single active resize gesture.
#[derive(Debug, Default)]
pub struct ResizeCoordinator {
    state: Option<ResizeState>,
}

impl ResizeCoordinator {
    /// Create an idle coordinator.
    #[must_use]
    pub const fn new() -> Self {
        Self { state: None }
    }

    /// Idle → Resizing: pointer-down on a resize handle of an unlocked
    /// appointment.
    ///
    /// Returns `false` (and stays idle) for a locked appointment or when a
    /// gesture is already active.
    pub fn begin(
        &mut self,
        lane: &LaneView<'_>,
        appointment: &Appointment,
        edge: ResizeEdge,
        at_x: f64,
    ) -> bool {
        if appointment.locked || self.state.is_some() {
            return false;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            appointment = %appointment.id,
            lane = %lane.lane_id,
            ?edge,
            "resize begin"
        );

        self.state = Some(ResizeState {
            appointment: appointment.clone(),
            lane_id: lane.lane_id.to_owned(),
            edge,
            start_x: at_x,
            original_start_slot: appointment.start_slot,
            original_duration: appointment.duration,
            candidate_start_slot: appointment.start_slot,
            candidate_duration: appointment.duration,
        });
        true
    }

    /// Resizing → Resizing: pointer-move, consumed only by the owning lane.
    ///
    /// Returns whether this lane consumed the move. The candidate is
    /// derived from the rounded whole-slot delta and adopted only when it
    /// survives the duration floor and the lane's validation.
    pub fn track(&mut self, lane: &LaneView<'_>, at_x: f64) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        if lane.lane_id != state.lane_id {
            return false;
        }
        if !(lane.slot_width.is_finite() && lane.slot_width > 0.0) {
            return true;
        }

        // The float-to-int cast saturates, so an absurd pointer distance
        // becomes an absurd (but well-defined) slot delta; the saturating
        // arithmetic and the try_from bail below keep it from ever
        // producing a candidate.
        #[allow(clippy::cast_possible_truncation)]
        let delta_slots = ((at_x - state.start_x) / lane.slot_width).round() as i64;

        let (new_start, new_duration) = match state.edge {
            ResizeEdge::Start => (
                i64::from(state.original_start_slot)
                    .saturating_add(delta_slots)
                    .max(0),
                i64::from(state.original_duration).saturating_sub(delta_slots),
            ),
            ResizeEdge::End => (
                i64::from(state.original_start_slot),
                i64::from(state.original_duration)
                    .saturating_add(delta_slots)
                    .max(1),
            ),
        };

        // Duration floor: a degenerate candidate is rejected outright and
        // the previous valid candidate stays.
        if new_duration < 1 {
            return true;
        }
        // A pair that cannot fit in u32 cannot fit in any lane either.
        let (Ok(new_start), Ok(new_duration)) =
            (u32::try_from(new_start), u32::try_from(new_duration))
        else {
            return true;
        };

        let candidate = Candidate::for_appointment(&state.appointment, new_start, new_duration);
        if validate_placement(&candidate, &lane.context()).is_ok() {
            state.candidate_start_slot = new_start;
            state.candidate_duration = new_duration;
        }
        true
    }

    /// Resizing → Idle: pointer-up.
    ///
    /// Returns the updated appointment (same id, all other fields
    /// preserved) only when the candidate differs from the original pair;
    /// always returns to idle.
    pub fn finish(&mut self) -> Option<Appointment> {
        let state = self.state.take()?;

        let changed = state.candidate_start_slot != state.original_start_slot
            || state.candidate_duration != state.original_duration;
        if !changed {
            #[cfg(feature = "tracing")]
            tracing::debug!(appointment = %state.appointment.id, "resize discarded");
            return None;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            appointment = %state.appointment.id,
            start = state.candidate_start_slot,
            duration = state.candidate_duration,
            "resize finished"
        );

        Some(
            state
                .appointment
                .placed_at(state.candidate_start_slot, state.candidate_duration),
        )
    }

    /// Unconditional return to idle with no event (teardown path).
    pub fn cancel(&mut self) {
        #[cfg(feature = "tracing")]
        if let Some(state) = &self.state {
            tracing::debug!(appointment = %state.appointment.id, "resize cancelled");
        }
        self.state = None;
    }

    /// Whether a resize is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Read-only view of the live gesture, if any.
    #[must_use]
    pub const fn state(&self) -> Option<&ResizeState> {
        self.state.as_ref()
    }
}
