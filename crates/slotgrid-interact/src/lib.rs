#![forbid(unsafe_code)]

//! Interaction layer: drag/resize coordination across scheduling lanes.
//!
//! # Role in slotgrid
//! `slotgrid-interact` is the gesture layer. It owns the two interaction
//! state machines — one drag, one resize — and the shared [`Scheduler`]
//! context that lets independent lanes participate in a single gesture.
//!
//! # Primary responsibilities
//! - **DragCoordinator**: `Idle → Dragging → Idle`, cross-lane targeting
//!   with last-writer-wins candidate adoption.
//! - **ResizeCoordinator**: `Idle → Resizing → Idle`, edge-drag candidates
//!   scoped to one lane.
//! - **Scheduler**: the dependency-injected context that broadcasts
//!   pointer input and returns outbound [`SchedulerEvent`]s.
//! - **Lane contract**: [`LaneView`] (what a lane supplies per query) and
//!   [`lane_presentation`] (what a lane renders from coordinator state).
//!
//! # How it fits in the system
//! The host captures pointer events and hit-tests pointer-downs itself;
//! this crate decides what those gestures mean and reports the resulting
//! moves/resizes as events. It is purely advisory: appointment lists are
//! owned by the application, which applies every change.

pub mod drag;
pub mod lane;
pub mod resize;
pub mod scheduler;
pub mod view;

pub use drag::{DragCoordinator, DragState, MoveRequest};
pub use lane::{
    AppointmentDisplay, DisplayRole, IncomingPreview, LaneConfig, LanePresentation, SlotDisplay,
    lane_presentation,
};
pub use resize::{ResizeCoordinator, ResizeEdge, ResizeState};
pub use scheduler::{PointerInput, Scheduler, SchedulerEvent};
pub use view::LaneView;
