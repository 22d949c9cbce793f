#![forbid(unsafe_code)]

//! Per-lane inputs for gesture evaluation.
//!
//! A [`LaneView`] bundles a lane's identity, on-screen geometry, and
//! current contents into one borrowed value. Hosts build a fresh view for
//! every pointer event — geometry is never cached across events because
//! layout can change mid-gesture (e.g. scrolling), and the appointment
//! list is owned by the application, not by this crate.

use slotgrid_core::appointment::Appointment;
use slotgrid_core::geometry::{LaneRect, Point};
use slotgrid_core::slot::slot_from_x;
use slotgrid_core::validate::LaneContext;

/// One lane's identity, geometry, and contents, borrowed for the duration
/// of a single coordinator call.
#[derive(Debug, Clone, Copy)]
pub struct LaneView<'a> {
    /// Unique lane identity; disambiguates drag sources/targets and is
    /// passed into blocked-slot overrides.
    pub lane_id: &'a str,
    /// On-screen bounds, refreshed by the host on demand.
    pub rect: LaneRect,
    /// Pixel width of one slot.
    pub slot_width: f64,
    /// Fixed slot-count capacity.
    pub total_slots: u32,
    /// Slot indices unavailable by default.
    pub blocked_slots: &'a [u32],
    /// The lane's committed appointments, supplied fresh on every query.
    pub appointments: &'a [Appointment],
}

impl<'a> LaneView<'a> {
    /// The validation context for this lane.
    #[must_use]
    pub const fn context(&self) -> LaneContext<'a> {
        LaneContext {
            lane_id: self.lane_id,
            appointments: self.appointments,
            blocked_slots: self.blocked_slots,
            total_slots: self.total_slots,
        }
    }

    /// Whether a point lies within this lane's bounds (inclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.rect.contains(point)
    }

    /// The slot under an absolute x-coordinate, if any.
    #[must_use]
    pub fn slot_at(&self, x: f64) -> Option<u32> {
        slot_from_x(x, self.rect.left, self.slot_width, self.total_slots)
    }

    /// Absolute x-coordinate of a slot's left edge.
    #[must_use]
    pub fn slot_left(&self, slot: u32) -> f64 {
        self.rect.left + f64::from(slot) * self.slot_width
    }
}
