#![forbid(unsafe_code)]

//! The drag gesture state machine.
//!
//! [`DragCoordinator`] holds the single active drag gesture for an entire
//! scheduling view. One instance covers all lanes: every pointer-move is
//! broadcast to every lane, each lane independently evaluates "is this
//! point over me, and is the computed slot valid for this appointment
//! under my own rules", and the coordinator keeps the most recent claiming
//! lane's verdict as the authoritative target.
//!
//! # State Machine
//!
//! `Idle` → `Dragging` → `Idle`. There is no distinct cancelled state;
//! [`DragCoordinator::cancel`] and an unchanged/invalid
//! [`DragCoordinator::finish`] both return to `Idle` without emitting.
//!
//! # Invariants
//!
//! 1. A locked appointment never starts a gesture.
//! 2. The candidate slot/lane/verdict always derive from the most recently
//!    processed move over a lane; moves over no lane update only the
//!    pointer position (visual follow), never the candidate.
//! 3. `finish` emits a [`MoveRequest`] iff the terminal candidate is valid
//!    AND differs from the origin `(lane, slot)`. Dropping an appointment
//!    back where it started emits nothing.
//! 4. The coordinator never mutates any appointment list; it is advisory.
//!    The owning application applies the move.
//!
//! # Failure Modes
//!
//! - An invalid candidate never corrupts the gesture: it is recorded with
//!   its [`PlacementError`] so a renderer can show why, and a later valid
//!   move supersedes it.
//! - If the host tears down mid-gesture, `cancel` releases the state
//!   deterministically with no event.

use slotgrid_core::appointment::Appointment;
use slotgrid_core::geometry::Point;
use slotgrid_core::validate::{Candidate, PlacementError, validate_placement};

use crate::view::LaneView;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// The live state of an in-progress drag.
///
/// Readable by lane adapters for rendering; mutated only through
/// [`DragCoordinator`] transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    /// Snapshot of the appointment being moved.
    pub appointment: Appointment,
    /// Lane the gesture started on.
    pub source_lane: String,
    /// Lane currently under the pointer (last claiming lane).
    pub target_lane: String,
    /// Pointer position at gesture start.
    pub origin: Point,
    /// Most recent pointer position.
    pub current: Point,
    /// Pixel offset between the pointer and the appointment's left edge at
    /// gesture start, so the appointment does not jump to align its left
    /// edge with the pointer.
    pub grab_offset_x: f64,
    /// Where the appointment sat when the gesture started.
    pub original_start_slot: u32,
    /// Candidate start slot on the target lane.
    pub candidate_slot: u32,
    /// Whether the candidate passed the target lane's validation.
    pub candidate_valid: bool,
    /// The rejection reason when `candidate_valid` is false.
    pub last_error: Option<PlacementError>,
}

/// A completed, valid, and actually-changed drag, handed to the owning
/// application to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveRequest {
    /// The moved appointment, still at its original placement; the
    /// application rewrites `start_slot` (and lane membership) itself.
    pub appointment: Appointment,
    pub source_lane: String,
    pub target_lane: String,
    pub new_start_slot: u32,
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

/// Shared container for the single active drag gesture.
#[derive(Debug, Default)]
pub struct DragCoordinator {
    state: Option<DragState>,
}

impl DragCoordinator {
    /// Create an idle coordinator.
    #[must_use]
    pub const fn new() -> Self {
        Self { state: None }
    }

    /// Idle → Dragging: pointer-down on an unlocked appointment.
    ///
    /// Returns `false` (and stays idle) for a locked appointment or when a
    /// gesture is already active. The initial candidate is the current
    /// placement on the source lane, which is valid by construction.
    pub fn begin(&mut self, lane: &LaneView<'_>, appointment: &Appointment, at: Point) -> bool {
        if appointment.locked || self.state.is_some() {
            return false;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            appointment = %appointment.id,
            lane = %lane.lane_id,
            "drag begin"
        );

        self.state = Some(DragState {
            grab_offset_x: at.x - lane.slot_left(appointment.start_slot),
            appointment: appointment.clone(),
            source_lane: lane.lane_id.to_owned(),
            target_lane: lane.lane_id.to_owned(),
            origin: at,
            current: at,
            original_start_slot: appointment.start_slot,
            candidate_slot: appointment.start_slot,
            candidate_valid: true,
            last_error: None,
        });
        true
    }

    /// Dragging → Dragging: one lane's evaluation of a pointer-move.
    ///
    /// Returns whether this lane claimed the point. A claiming lane becomes
    /// the target (last-writer-wins across the broadcast); its computed slot
    /// is validated against its own fresh context, excluding the moving
    /// appointment from the overlap check.
    pub fn track(&mut self, lane: &LaneView<'_>, at: Point) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        if !lane.contains(at) {
            return false;
        }

        state.current = at;

        // Pointer past the lane's end maps to no slot; the previous
        // candidate stays authoritative.
        let Some(slot) = lane.slot_at(at.x - state.grab_offset_x) else {
            return true;
        };

        let candidate =
            Candidate::for_appointment(&state.appointment, slot, state.appointment.duration);
        let verdict = validate_placement(&candidate, &lane.context());

        if state.target_lane != lane.lane_id {
            state.target_lane = lane.lane_id.to_owned();
        }
        state.candidate_slot = slot;
        state.candidate_valid = verdict.is_ok();
        state.last_error = verdict.err();
        true
    }

    /// Dragging → Dragging: pointer over no lane.
    ///
    /// Pure visual follow: coordinates update so the item can trail the
    /// cursor off-lane, the last candidate and verdict are retained.
    pub fn follow(&mut self, at: Point) {
        if let Some(state) = self.state.as_mut() {
            state.current = at;
        }
    }

    /// Dragging → Idle: pointer-up.
    ///
    /// Emits a [`MoveRequest`] only when the terminal candidate is valid
    /// and actually changed; always returns to idle.
    pub fn finish(&mut self) -> Option<MoveRequest> {
        let state = self.state.take()?;

        let changed = state.target_lane != state.source_lane
            || state.candidate_slot != state.original_start_slot;
        if !(state.candidate_valid && changed) {
            #[cfg(feature = "tracing")]
            tracing::debug!(appointment = %state.appointment.id, "drag discarded");
            return None;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            appointment = %state.appointment.id,
            from = %state.source_lane,
            to = %state.target_lane,
            slot = state.candidate_slot,
            "drag finished"
        );

        Some(MoveRequest {
            appointment: state.appointment,
            source_lane: state.source_lane,
            target_lane: state.target_lane,
            new_start_slot: state.candidate_slot,
        })
    }

    /// Unconditional return to idle with no event (teardown path).
    pub fn cancel(&mut self) {
        #[cfg(feature = "tracing")]
        if let Some(state) = &self.state {
            tracing::debug!(appointment = %state.appointment.id, "drag cancelled");
        }
        self.state = None;
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Read-only view of the live gesture, if any.
    #[must_use]
    pub const fn state(&self) -> Option<&DragState> {
        self.state.as_ref()
    }
}
