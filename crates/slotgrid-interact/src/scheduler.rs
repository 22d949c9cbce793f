#![forbid(unsafe_code)]

//! The shared scheduling-view context.
//!
//! [`Scheduler`] is the explicitly passed coordination object that lets
//! multiple independent lanes share one drag or resize gesture. The
//! top-level scheduling view owns exactly one instance and hands a
//! reference to every lane adapter; all state transitions go through its
//! methods, never ad hoc field mutation, so the gesture machines stay
//! auditable in isolation from rendering.
//!
//! # Event flow
//!
//! Pointer-downs arrive targeted ([`Scheduler::begin_drag`],
//! [`Scheduler::begin_resize`] — the host knows which appointment or
//! handle was hit). Moves and ups arrive untargeted and are broadcast to
//! every lane in delivery order. Outbound effects are returned as
//! [`SchedulerEvent`] values; the scheduler itself never mutates an
//! appointment list — the owning application applies moves and resizes in
//! response to the events.
//!
//! # Invariants
//!
//! 1. At most one drag and one resize gesture exist at any instant.
//! 2. Move processing is order-dependent only in the documented
//!    last-writer-wins sense; no coalescing is needed for correctness.
//! 3. [`Scheduler::reset`] releases both gestures deterministically with
//!    no events, for host teardown mid-gesture.

use slotgrid_core::appointment::Appointment;
use slotgrid_core::geometry::Point;

use crate::drag::{DragCoordinator, DragState};
use crate::resize::{ResizeCoordinator, ResizeEdge, ResizeState};
use crate::view::LaneView;

// ---------------------------------------------------------------------------
// Inbound / outbound types
// ---------------------------------------------------------------------------

/// Untargeted pointer input, after the host has reduced mouse/touch to a
/// single contact point (see [`Point::from_touches`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    /// The pointer moved to an absolute position.
    Move(Point),
    /// The pointer was released; finalizes any active gesture.
    Up,
}

/// Outbound notification to the owning application.
#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerEvent {
    /// A completed, valid, and actually-changed drag.
    AppointmentMove {
        /// Snapshot at its original placement; the application applies the
        /// move itself.
        appointment: Appointment,
        source_lane: String,
        target_lane: String,
        new_start_slot: u32,
    },
    /// A completed, valid, and actually-changed resize; the appointment
    /// carries the new placement with all other fields preserved.
    AppointmentChange { appointment: Appointment },
    /// A slot was selected. Pass-through, not validated.
    SlotClick { slot: u32, lane_id: String },
    /// A slot was double-activated (creation intent). Pass-through, not
    /// validated.
    SlotActivate { slot: u32, lane_id: String },
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Shared interaction state for one scheduling view.
#[derive(Debug, Default)]
pub struct Scheduler {
    drag: DragCoordinator,
    resize: ResizeCoordinator,
}

impl Scheduler {
    /// Create an idle scheduler.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            drag: DragCoordinator::new(),
            resize: ResizeCoordinator::new(),
        }
    }

    /// Start a drag gesture. Returns `false` for a locked appointment or
    /// when a drag is already active.
    pub fn begin_drag(
        &mut self,
        lane: &LaneView<'_>,
        appointment: &Appointment,
        at: Point,
    ) -> bool {
        self.drag.begin(lane, appointment, at)
    }

    /// Start a resize gesture on one edge. Returns `false` for a locked
    /// appointment or when a resize is already active.
    pub fn begin_resize(
        &mut self,
        lane: &LaneView<'_>,
        appointment: &Appointment,
        edge: ResizeEdge,
        at_x: f64,
    ) -> bool {
        self.resize.begin(lane, appointment, edge, at_x)
    }

    /// Process one untargeted pointer input against the current lane set.
    pub fn handle_pointer(
        &mut self,
        input: PointerInput,
        lanes: &[LaneView<'_>],
    ) -> Vec<SchedulerEvent> {
        match input {
            PointerInput::Move(at) => {
                self.pointer_move(at, lanes);
                Vec::new()
            }
            PointerInput::Up => self.pointer_up(),
        }
    }

    /// Broadcast a pointer-move to every lane in delivery order.
    ///
    /// The resize gesture is consumed only by its owning lane. The drag
    /// gesture lets every containing lane claim the point, later lanes
    /// overwriting earlier ones (last-writer-wins); when no lane contains
    /// the point the drag degrades to a visual follow.
    pub fn pointer_move(&mut self, at: Point, lanes: &[LaneView<'_>]) {
        if self.resize.is_active() {
            for lane in lanes {
                if self.resize.track(lane, at.x) {
                    break;
                }
            }
        }

        if self.drag.is_active() {
            let mut claimed = false;
            for lane in lanes {
                claimed |= self.drag.track(lane, at);
            }
            if !claimed {
                self.drag.follow(at);
            }
        }
    }

    /// Finalize both gestures on pointer-up, returning any resulting
    /// events. Both state machines return to idle unconditionally.
    pub fn pointer_up(&mut self) -> Vec<SchedulerEvent> {
        let mut out = Vec::with_capacity(1);

        if let Some(request) = self.drag.finish() {
            out.push(SchedulerEvent::AppointmentMove {
                appointment: request.appointment,
                source_lane: request.source_lane,
                target_lane: request.target_lane,
                new_start_slot: request.new_start_slot,
            });
        }
        if let Some(appointment) = self.resize.finish() {
            out.push(SchedulerEvent::AppointmentChange { appointment });
        }
        out
    }

    /// Pass-through selection notification for a slot.
    #[must_use]
    pub fn slot_click(&self, slot: u32, lane_id: &str) -> SchedulerEvent {
        SchedulerEvent::SlotClick {
            slot,
            lane_id: lane_id.to_owned(),
        }
    }

    /// Pass-through creation-intent notification for a slot.
    #[must_use]
    pub fn slot_activate(&self, slot: u32, lane_id: &str) -> SchedulerEvent {
        SchedulerEvent::SlotActivate {
            slot,
            lane_id: lane_id.to_owned(),
        }
    }

    /// Read-only view of the live drag gesture, if any.
    #[must_use]
    pub const fn drag_state(&self) -> Option<&DragState> {
        self.drag.state()
    }

    /// Read-only view of the live resize gesture, if any.
    #[must_use]
    pub const fn resize_state(&self) -> Option<&ResizeState> {
        self.resize.state()
    }

    /// Whether no gesture is active.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        !self.drag.is_active() && !self.resize.is_active()
    }

    /// Deterministic release for host teardown mid-gesture: both state
    /// machines return to idle, nothing is emitted.
    pub fn reset(&mut self) {
        self.drag.cancel();
        self.resize.cancel();
    }
}
