#![forbid(unsafe_code)]

//! Slot arithmetic and overlap detection.
//!
//! Pure functions; no internal state. These are the primitives the
//! validator and both gesture coordinators are built from.
//!
//! # Invariants
//!
//! 1. Occupied intervals are half-open: an appointment at `[2, 4)` and a
//!    candidate at `[4, 6)` touch but do not overlap.
//! 2. Overlap is commutative: `a` overlaps `b` iff `b` overlaps `a`.
//! 3. [`slot_from_x`] never returns a slot >= `total_slots`; a pointer past
//!    the lane's end is not a valid target. Offsets left of the lane clamp
//!    to slot 0.

use crate::appointment::Appointment;

/// Check whether a slot is blocked.
///
/// `blocked_slots` is treated as a set; ordering is irrelevant and
/// duplicates are harmless.
#[must_use]
pub fn is_slot_blocked(slot: u32, blocked_slots: &[u32]) -> bool {
    blocked_slots.contains(&slot)
}

/// Map a pixel x-offset to a slot index relative to a lane's left edge.
///
/// Returns `None` when the computed slot falls past the lane's end, or when
/// `slot_width` is not a positive finite number.
#[must_use]
pub fn slot_from_x(x: f64, lane_left: f64, slot_width: f64, total_slots: u32) -> Option<u32> {
    if !(slot_width.is_finite() && slot_width > 0.0) {
        return None;
    }
    let relative = x - lane_left;
    let slot = (relative / slot_width).floor().max(0.0) as u32;
    (slot < total_slots).then_some(slot)
}

/// Collect every appointment (other than `exclude_id`) whose occupied
/// interval intersects `[start_slot, start_slot + duration)`.
///
/// Two intervals intersect iff `!(a_end <= b_start || a_start >= b_end)`.
#[must_use]
pub fn overlapping<'a>(
    start_slot: u32,
    duration: u32,
    exclude_id: Option<&str>,
    appointments: &'a [Appointment],
) -> Vec<&'a Appointment> {
    let candidate_end = start_slot.saturating_add(duration);
    appointments
        .iter()
        .filter(|apt| exclude_id != Some(apt.id.as_str()))
        .filter(|apt| !(apt.end_slot() <= start_slot || apt.start_slot >= candidate_end))
        .collect()
}

/// Decide whether an overlap list invalidates a placement.
///
/// Policy: the moving appointment's own `allow_overlap` flag governs. When
/// it allows overlap, any overlap is permitted; otherwise any overlap at
/// all is invalid. This single rule is applied uniformly by drag, resize,
/// and standalone validation.
#[must_use]
pub fn has_invalid_overlap(overlaps: &[&Appointment], allow_overlap: bool) -> bool {
    !allow_overlap && !overlaps.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn apt(id: &str, start: u32, duration: u32) -> Appointment {
        Appointment::new(id, start, duration)
    }

    #[test]
    fn blocked_membership() {
        assert!(is_slot_blocked(5, &[0, 5, 9]));
        assert!(!is_slot_blocked(4, &[0, 5, 9]));
        assert!(!is_slot_blocked(0, &[]));
    }

    #[test]
    fn slot_from_x_maps_offsets() {
        // Lane starts at x=100, slots are 60px wide.
        assert_eq!(slot_from_x(100.0, 100.0, 60.0, 24), Some(0));
        assert_eq!(slot_from_x(159.9, 100.0, 60.0, 24), Some(0));
        assert_eq!(slot_from_x(160.0, 100.0, 60.0, 24), Some(1));
        assert_eq!(slot_from_x(100.0 + 23.0 * 60.0, 100.0, 60.0, 24), Some(23));
    }

    #[test]
    fn slot_from_x_clamps_left_of_lane() {
        assert_eq!(slot_from_x(40.0, 100.0, 60.0, 24), Some(0));
    }

    #[test]
    fn slot_from_x_rejects_past_lane_end() {
        assert_eq!(slot_from_x(100.0 + 24.0 * 60.0, 100.0, 60.0, 24), None);
    }

    #[test]
    fn slot_from_x_rejects_degenerate_slot_width() {
        assert_eq!(slot_from_x(150.0, 100.0, 0.0, 24), None);
        assert_eq!(slot_from_x(150.0, 100.0, -60.0, 24), None);
        assert_eq!(slot_from_x(150.0, 100.0, f64::NAN, 24), None);
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let existing = [apt("a", 2, 2)];
        assert!(overlapping(4, 2, None, &existing).is_empty());
        assert!(overlapping(0, 2, None, &existing).is_empty());
    }

    #[test]
    fn one_slot_intersection_overlaps() {
        let existing = [apt("a", 2, 2)];
        let hits = overlapping(3, 2, None, &existing);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
    }

    #[test]
    fn containment_overlaps_both_directions() {
        let existing = [apt("a", 4, 6)];
        assert_eq!(overlapping(5, 2, None, &existing).len(), 1);

        let existing = [apt("a", 5, 2)];
        assert_eq!(overlapping(4, 6, None, &existing).len(), 1);
    }

    #[test]
    fn exclude_id_removes_the_mover() {
        let existing = [apt("a", 2, 4), apt("b", 4, 2)];
        let hits = overlapping(3, 2, Some("a"), &existing);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "b");
    }

    #[test]
    fn allow_overlap_forgives_everything() {
        let existing = [apt("a", 2, 4)];
        let hits = overlapping(3, 2, None, &existing);
        assert!(!hits.is_empty());
        assert!(!has_invalid_overlap(&hits, true));
        assert!(has_invalid_overlap(&hits, false));
    }

    #[test]
    fn empty_overlap_list_is_always_valid() {
        assert!(!has_invalid_overlap(&[], false));
        assert!(!has_invalid_overlap(&[], true));
    }

    proptest! {
        /// Interval intersection is commutative: if B shows up when probing
        /// with A's span, then A shows up when probing with B's span.
        #[test]
        fn overlap_is_symmetric(
            a_start in 0u32..100,
            a_dur in 1u32..20,
            b_start in 0u32..100,
            b_dur in 1u32..20,
        ) {
            let a = apt("a", a_start, a_dur);
            let b = apt("b", b_start, b_dur);

            let b_hit_by_a = !overlapping(a_start, a_dur, Some("a"), &[b.clone()]).is_empty();
            let a_hit_by_b = !overlapping(b_start, b_dur, Some("b"), &[a]).is_empty();
            prop_assert_eq!(b_hit_by_a, a_hit_by_b);
        }

        /// Touching spans never overlap, regardless of where they sit.
        #[test]
        fn touching_never_overlaps(start in 1u32..100, dur in 1u32..20, other_dur in 1u32..20) {
            let before_dur = other_dur.min(start);
            let before = apt("before", start - before_dur, before_dur);
            prop_assert!(overlapping(start, dur, None, &[before]).is_empty());

            let after = apt("after", start + dur, other_dur);
            prop_assert!(overlapping(start, dur, None, &[after]).is_empty());
        }

        /// slot_from_x stays within [0, total_slots) or reports None.
        #[test]
        fn slot_from_x_in_range(x in -10_000.0..10_000.0f64, left in -500.0..500.0f64, width in 1.0..200.0f64, total in 1u32..200) {
            match slot_from_x(x, left, width, total) {
                Some(slot) => prop_assert!(slot < total),
                None => {
                    let relative = x - left;
                    prop_assert!((relative / width).floor().max(0.0) as u32 >= total);
                }
            }
        }
    }
}
