#![forbid(unsafe_code)]

//! Standalone placement validation.
//!
//! [`validate_placement`] composes the slot primitives into a single
//! accept/reject decision with a typed reason. It is pure and synchronous:
//! both gesture coordinators call it for live validity, and applications
//! call it directly before committing programmatic creates/edits (e.g. a
//! double-click-to-create flow).
//!
//! # Invariants
//!
//! 1. Checks run in a fixed order and short-circuit on the first failure:
//!    range, capacity, blocked slots, overlap.
//! 2. A rejected placement is a value, never a panic; nothing here mutates
//!    any state.
//! 3. The blocked-slot override is consulted per intersected slot; one
//!    `false` invalidates the whole candidate even if earlier slots were
//!    forgiven.

use serde::Serialize;
use thiserror::Error;

use crate::appointment::{Appointment, SlotOverride};
use crate::slot::{has_invalid_overlap, is_slot_blocked, overlapping};

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Why a proposed placement was rejected.
///
/// All variants are validation outcomes reported to the caller; the
/// coordinators discard an invalid gesture silently, while the standalone
/// validator returns the value for UI display.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum PlacementError {
    /// Candidate start slot outside `[0, total_slots)`.
    #[error("start slot {start_slot} is outside the lane range of {total_slots} slots")]
    OutOfRange { start_slot: u32, total_slots: u32 },

    /// Candidate span runs past `total_slots`.
    #[error("{duration} slot(s) starting at {start_slot} exceed the lane capacity of {total_slots}")]
    ExceedsCapacity {
        start_slot: u32,
        duration: u32,
        total_slots: u32,
    },

    /// An intersected slot is blocked and not forgiven by the appointment's
    /// override predicate.
    #[error("slot {slot} is blocked")]
    BlockedSlot { slot: u32 },

    /// Candidate intersects other appointments under a disallowing overlap
    /// policy.
    #[error("placement overlaps {} existing appointment(s)", conflicts.len())]
    OverlapConflict { conflicts: Vec<Appointment> },
}

// ---------------------------------------------------------------------------
// Candidate & context
// ---------------------------------------------------------------------------

/// A tentative placement to validate.
///
/// Built either from scratch ([`Candidate::new`], e.g. for a not-yet-created
/// appointment) or from an existing appointment being moved or resized
/// ([`Candidate::for_appointment`]).
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// First occupied slot of the proposal.
    pub start_slot: u32,
    /// Proposed span length in slots.
    pub duration: u32,
    /// Identity to exclude from the overlap check (the mover itself).
    pub exclude_id: Option<&'a str>,
    /// The mover's own overlap policy.
    pub allow_overlap: bool,
    /// The mover's blocked-slot override, if any.
    pub on_blocked_slot: Option<&'a SlotOverride>,
}

impl<'a> Candidate<'a> {
    /// A candidate with no identity and default policies.
    #[must_use]
    pub const fn new(start_slot: u32, duration: u32) -> Self {
        Self {
            start_slot,
            duration,
            exclude_id: None,
            allow_overlap: false,
            on_blocked_slot: None,
        }
    }

    /// A candidate placement for an existing appointment, carrying its
    /// identity and policies.
    #[must_use]
    pub fn for_appointment(apt: &'a Appointment, start_slot: u32, duration: u32) -> Self {
        Self {
            start_slot,
            duration,
            exclude_id: Some(&apt.id),
            allow_overlap: apt.allow_overlap,
            on_blocked_slot: apt.on_blocked_slot.as_ref(),
        }
    }
}

/// One lane's validation inputs, borrowed fresh on every query.
#[derive(Debug, Clone, Copy)]
pub struct LaneContext<'a> {
    /// Lane identity, passed into blocked-slot overrides.
    pub lane_id: &'a str,
    /// The lane's committed appointment list.
    pub appointments: &'a [Appointment],
    /// Slot indices unavailable by default.
    pub blocked_slots: &'a [u32],
    /// Fixed slot-count capacity.
    pub total_slots: u32,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a candidate placement against one lane.
///
/// Checks in order, short-circuiting on the first failure:
///
/// 1. `start_slot` within `[0, total_slots)`.
/// 2. `start_slot + duration <= total_slots`.
/// 3. No intersected slot is blocked, unless the candidate's override
///    forgives that specific slot.
/// 4. No invalid overlap under the candidate's own `allow_overlap` flag.
pub fn validate_placement(
    candidate: &Candidate<'_>,
    ctx: &LaneContext<'_>,
) -> Result<(), PlacementError> {
    if candidate.start_slot >= ctx.total_slots {
        return Err(PlacementError::OutOfRange {
            start_slot: candidate.start_slot,
            total_slots: ctx.total_slots,
        });
    }

    // Phrased as a subtraction so an absurd duration cannot overflow; the
    // range check above guarantees `start_slot < total_slots`.
    if candidate.duration > ctx.total_slots - candidate.start_slot {
        return Err(PlacementError::ExceedsCapacity {
            start_slot: candidate.start_slot,
            duration: candidate.duration,
            total_slots: ctx.total_slots,
        });
    }

    for slot in candidate.start_slot..candidate.start_slot + candidate.duration {
        if is_slot_blocked(slot, ctx.blocked_slots) {
            let forgiven = candidate
                .on_blocked_slot
                .is_some_and(|pred| pred.allows(slot, ctx.lane_id));
            if !forgiven {
                return Err(PlacementError::BlockedSlot { slot });
            }
        }
    }

    let overlaps = overlapping(
        candidate.start_slot,
        candidate.duration,
        candidate.exclude_id,
        ctx.appointments,
    );
    if has_invalid_overlap(&overlaps, candidate.allow_overlap) {
        return Err(PlacementError::OverlapConflict {
            conflicts: overlaps.into_iter().cloned().collect(),
        });
    }

    Ok(())
}

/// Convenience predicate over [`validate_placement`].
#[must_use]
pub fn placement_is_valid(candidate: &Candidate<'_>, ctx: &LaneContext<'_>) -> bool {
    validate_placement(candidate, ctx).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ctx<'a>(
        appointments: &'a [Appointment],
        blocked_slots: &'a [u32],
        total_slots: u32,
    ) -> LaneContext<'a> {
        LaneContext {
            lane_id: "lane-1",
            appointments,
            blocked_slots,
            total_slots,
        }
    }

    #[test]
    fn accepts_a_clear_placement() {
        let ctx = ctx(&[], &[], 24);
        assert_eq!(validate_placement(&Candidate::new(0, 2), &ctx), Ok(()));
        assert!(placement_is_valid(&Candidate::new(10, 6), &ctx));
    }

    #[test]
    fn start_slot_must_be_in_range() {
        let ctx = ctx(&[], &[], 24);
        assert_eq!(
            validate_placement(&Candidate::new(24, 1), &ctx),
            Err(PlacementError::OutOfRange {
                start_slot: 24,
                total_slots: 24
            })
        );
    }

    #[test]
    fn capacity_boundary_is_exact() {
        let ctx = ctx(&[], &[], 24);

        // start = total - duration fits exactly.
        assert_eq!(validate_placement(&Candidate::new(18, 6), &ctx), Ok(()));

        // One past the boundary exceeds capacity.
        assert_eq!(
            validate_placement(&Candidate::new(19, 6), &ctx),
            Err(PlacementError::ExceedsCapacity {
                start_slot: 19,
                duration: 6,
                total_slots: 24
            })
        );
    }

    #[test]
    fn blocked_slot_rejects_without_override() {
        let ctx = ctx(&[], &[0, 1, 22, 23], 24);
        assert_eq!(
            validate_placement(&Candidate::new(2, 6), &ctx),
            Ok(()),
            "span clear of blocked slots is fine"
        );
        assert_eq!(
            validate_placement(&Candidate::new(1, 6), &ctx),
            Err(PlacementError::BlockedSlot { slot: 1 })
        );
        assert_eq!(
            validate_placement(&Candidate::new(20, 4), &ctx),
            Err(PlacementError::BlockedSlot { slot: 22 })
        );
    }

    #[test]
    fn override_forgives_per_slot() {
        let blocked: Vec<u32> = (10..20).collect();
        let apt = Appointment::new("vip", 14, 6).with_blocked_slot_override(SlotOverride::always());
        let ctx = ctx(&[], &blocked, 24);

        let candidate = Candidate::for_appointment(&apt, 10, 6);
        assert_eq!(validate_placement(&candidate, &ctx), Ok(()));
    }

    #[test]
    fn one_unforgiven_slot_invalidates_the_whole_span() {
        // Forgives slot 5, refuses slot 6; a span covering both must fail.
        let apt = Appointment::new("a", 0, 2)
            .with_blocked_slot_override(SlotOverride::new(|slot, _| slot == 5));
        let ctx = ctx(&[], &[5, 6], 24);

        let candidate = Candidate::for_appointment(&apt, 5, 2);
        assert_eq!(
            validate_placement(&candidate, &ctx),
            Err(PlacementError::BlockedSlot { slot: 6 })
        );
    }

    #[test]
    fn overlap_conflict_lists_every_conflicting_appointment() {
        let existing = [Appointment::new("a", 4, 6), Appointment::new("b", 6, 4)];
        let ctx = ctx(&existing, &[], 24);

        match validate_placement(&Candidate::new(7, 2), &ctx) {
            Err(PlacementError::OverlapConflict { conflicts }) => {
                let ids: Vec<_> = conflicts.iter().map(|c| c.id.as_str()).collect();
                assert_eq!(ids, ["a", "b"]);
            }
            other => panic!("expected overlap conflict, got {other:?}"),
        }
    }

    #[test]
    fn allow_overlap_governs_uniformly() {
        // Both existing appointments allow overlap, and so does the mover:
        // any overlap is permitted.
        let existing = [
            Appointment::new("a", 4, 6).with_allow_overlap(),
            Appointment::new("b", 6, 4).with_allow_overlap(),
        ];
        let ctx = ctx(&existing, &[], 24);

        let mover = Appointment::new("c", 0, 2).with_allow_overlap();
        let candidate = Candidate::for_appointment(&mover, 7, 2);
        assert_eq!(validate_placement(&candidate, &ctx), Ok(()));

        // A mover that disallows overlap is rejected at the same spot,
        // regardless of the targets' flags.
        let strict = Appointment::new("d", 0, 2);
        let candidate = Candidate::for_appointment(&strict, 7, 2);
        assert!(matches!(
            validate_placement(&candidate, &ctx),
            Err(PlacementError::OverlapConflict { .. })
        ));
    }

    #[test]
    fn checks_short_circuit_in_order() {
        // Out-of-range start on a lane that also has blocked slots and an
        // occupying appointment: range fires first.
        let existing = [Appointment::new("a", 0, 24)];
        let ctx = ctx(&existing, &[0], 24);
        assert!(matches!(
            validate_placement(&Candidate::new(30, 1), &ctx),
            Err(PlacementError::OutOfRange { .. })
        ));

        // In-range but over capacity: capacity fires before blocked/overlap.
        assert!(matches!(
            validate_placement(&Candidate::new(20, 10), &ctx),
            Err(PlacementError::ExceedsCapacity { .. })
        ));
    }

    proptest! {
        /// The capacity boundary is exact for any lane size and duration.
        #[test]
        fn capacity_boundary_property(total in 1u32..100, duration in 1u32..40) {
            prop_assume!(duration <= total);
            let ctx = ctx(&[], &[], total);

            let fit = Candidate::new(total - duration, duration);
            prop_assert_eq!(validate_placement(&fit, &ctx), Ok(()));

            let over = Candidate::new(total - duration + 1, duration);
            prop_assert!(validate_placement(&over, &ctx).is_err());
        }

        /// Validation never panics for arbitrary inputs.
        #[test]
        fn validation_is_total(start in 0u32..2000, duration in 1u32..200, total in 1u32..100) {
            let existing = [Appointment::new("a", 2, 4)];
            let ctx = ctx(&existing, &[1, 3, 7], total);
            let _ = validate_placement(&Candidate::new(start, duration), &ctx);
        }
    }
}
