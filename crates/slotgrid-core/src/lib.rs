#![forbid(unsafe_code)]

//! Core: slot arithmetic, lane geometry, and placement validation.
//!
//! # Role in slotgrid
//! `slotgrid-core` is the pure positional layer. It owns the appointment
//! data model, the slot/overlap primitives, and the standalone validator
//! that turns a proposed placement into an accept/reject decision with a
//! typed reason.
//!
//! # Primary responsibilities
//! - **Appointment**: the time-bounded item, with open-map extensibility
//!   and a per-appointment blocked-slot override predicate.
//! - **Slot primitives**: pixel-to-slot mapping, blocked-slot membership,
//!   half-open interval overlap.
//! - **Validation**: range, capacity, blocked-slot, and overlap checks in
//!   a fixed short-circuit order, reported as [`PlacementError`] values.
//!
//! # How it fits in the system
//! The interaction layer (`slotgrid-interact`) drives this crate from its
//! drag/resize coordinators; applications call [`validate_placement`]
//! directly for pre-commit checks. Nothing here holds state between calls:
//! lane contents are borrowed fresh on every query.

pub mod appointment;
pub mod geometry;
pub mod slot;
pub mod validate;

pub use appointment::{Appointment, SlotOverride};
pub use geometry::{LaneRect, Point};
pub use slot::{has_invalid_overlap, is_slot_blocked, overlapping, slot_from_x};
pub use validate::{Candidate, LaneContext, PlacementError, placement_is_valid, validate_placement};
