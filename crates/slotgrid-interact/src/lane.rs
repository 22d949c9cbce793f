#![forbid(unsafe_code)]

//! The lane presentation adapter contract.
//!
//! Rendering itself is out of scope, but every lane must honor the same
//! contract: re-render from coordinator state plus its own contents, and
//! never mutate coordinator state except through the defined transitions.
//! [`lane_presentation`] is that contract made concrete — a pure,
//! read-only projection of [`Scheduler`] state into per-slot and
//! per-appointment display items a host can draw directly.
//!
//! Decisions reproduced here:
//! - The dragged appointment renders as a ghost on its source lane while
//!   the target lane (same or different) shows the candidate preview.
//! - A cross-lane drag surfaces on the target lane as an incoming preview
//!   even though the appointment is not in that lane's list.
//! - A resizing appointment renders at its live candidate placement.

use slotgrid_core::appointment::Appointment;
use slotgrid_core::slot::is_slot_blocked;

use crate::scheduler::Scheduler;
use crate::view::LaneView;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Per-lane visual/geometry parameters, supplied by the owning application
/// at lane construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneConfig {
    /// Lane height in pixels.
    pub height: f64,
    /// Pixel width of one slot.
    pub slot_width: f64,
    /// Background color for available slots.
    pub slot_color: String,
    /// Border color between slots.
    pub slot_border_color: String,
    /// Reserved snap tuning knob; not consulted by the gesture logic.
    pub snap_threshold: f64,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            height: 80.0,
            slot_width: 60.0,
            slot_color: "#f3f4f6".to_owned(),
            slot_border_color: "#e5e7eb".to_owned(),
            snap_threshold: 0.5,
        }
    }
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// How one appointment should be treated by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRole {
    /// Not involved in any gesture.
    Static,
    /// Being dragged, currently targeting some other lane; render as a
    /// ghost at its committed placement.
    DragSource,
    /// The live drag candidate on this (target) lane.
    Preview {
        /// Whether the candidate passed this lane's validation.
        valid: bool,
    },
    /// Being resized on this lane; placement is the live candidate.
    Resizing,
}

/// One slot's display inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotDisplay {
    pub index: u32,
    pub blocked: bool,
    /// Pixels from the lane's left edge.
    pub left: f64,
}

/// One appointment's display inputs, at its effective (possibly candidate)
/// placement.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentDisplay<'a> {
    pub appointment: &'a Appointment,
    pub start_slot: u32,
    pub duration: u32,
    pub role: DisplayRole,
    /// Pixels from the lane's left edge.
    pub left: f64,
    pub width: f64,
}

/// A drag candidate arriving from another lane.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingPreview<'a> {
    /// The dragged appointment (borrowed from the drag state; it is not in
    /// this lane's committed list).
    pub appointment: &'a Appointment,
    pub start_slot: u32,
    pub duration: u32,
    pub valid: bool,
    pub left: f64,
    pub width: f64,
}

/// Everything a lane renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LanePresentation<'a> {
    /// Lane height in pixels, from the lane's [`LaneConfig`].
    pub height: f64,
    pub slots: Vec<SlotDisplay>,
    pub appointments: Vec<AppointmentDisplay<'a>>,
    /// Present iff a drag from another lane currently targets this one.
    pub incoming: Option<IncomingPreview<'a>>,
}

/// Project coordinator state onto one lane.
///
/// Pure and read-only; calling it never changes gesture state, so lanes
/// can re-render as often as they like. Pixel math comes from `config`:
/// the view's geometry locates the lane on screen for hit testing, while
/// the config says how the lane draws itself in its own coordinate space.
#[must_use]
pub fn lane_presentation<'a>(
    lane: &LaneView<'a>,
    scheduler: &'a Scheduler,
    config: &LaneConfig,
) -> LanePresentation<'a> {
    let drag = scheduler.drag_state();
    let resize = scheduler.resize_state();

    let slots = (0..lane.total_slots)
        .map(|index| SlotDisplay {
            index,
            blocked: is_slot_blocked(index, lane.blocked_slots),
            left: f64::from(index) * config.slot_width,
        })
        .collect();

    let appointments = lane
        .appointments
        .iter()
        .map(|apt| {
            let mut start_slot = apt.start_slot;
            let mut duration = apt.duration;
            let mut role = DisplayRole::Static;

            if let Some(d) = drag
                && d.appointment.id == apt.id
                && d.source_lane == lane.lane_id
            {
                if d.target_lane == lane.lane_id {
                    start_slot = d.candidate_slot;
                    role = DisplayRole::Preview {
                        valid: d.candidate_valid,
                    };
                } else {
                    role = DisplayRole::DragSource;
                }
            } else if let Some(r) = resize
                && r.appointment.id == apt.id
                && r.lane_id == lane.lane_id
            {
                start_slot = r.candidate_start_slot;
                duration = r.candidate_duration;
                role = DisplayRole::Resizing;
            }

            AppointmentDisplay {
                appointment: apt,
                start_slot,
                duration,
                role,
                left: f64::from(start_slot) * config.slot_width,
                width: f64::from(duration) * config.slot_width,
            }
        })
        .collect();

    let incoming = drag
        .filter(|d| d.source_lane != lane.lane_id && d.target_lane == lane.lane_id)
        .map(|d| IncomingPreview {
            appointment: &d.appointment,
            start_slot: d.candidate_slot,
            duration: d.appointment.duration,
            valid: d.candidate_valid,
            left: f64::from(d.candidate_slot) * config.slot_width,
            width: f64::from(d.appointment.duration) * config.slot_width,
        });

    LanePresentation {
        height: config.height,
        slots,
        appointments,
        incoming,
    }
}
