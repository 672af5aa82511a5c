//! Display-order arithmetic: next-position assignment and drag-reorder
//! planning.
//!
//! After any successful reorder the `display_order` values of a project's
//! links are exactly `0..n-1` in list position.

use crate::error::CoreError;
use crate::gateway::LinkRecord;
use crate::types::DbId;

/// The display_order for a link appended to `orders`.
///
/// `max + 1`, or 0 for an empty list. Deliberately not `len()`: existing
/// rows may carry gaps and a new link must still sort last.
pub fn next_display_order<I>(orders: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    orders.into_iter().max().map_or(0, |max| max + 1)
}

/// `true` when `orders` is exactly `0..n-1` in sequence.
pub fn is_contiguous(orders: &[i32]) -> bool {
    orders.iter().enumerate().all(|(i, &o)| o == i as i32)
}

/// Outcome of planning a drag-drop move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderPlan {
    /// The full list after the move, every `display_order` rewritten to its
    /// zero-based index.
    pub ordered: Vec<LinkRecord>,
    /// The minimal `(id, display_order)` set to persist: only rows whose
    /// order actually changed.
    pub changes: Vec<(DbId, i32)>,
}

/// Plan moving the item at `from` to position `to` (array-move semantics).
///
/// Returns `None` for a no-op: `from == to` or either index out of bounds.
pub fn plan_reorder(links: &[LinkRecord], from: usize, to: usize) -> Option<ReorderPlan> {
    if from == to || from >= links.len() || to >= links.len() {
        return None;
    }

    let mut ordered: Vec<LinkRecord> = links.to_vec();
    let moved = ordered.remove(from);
    ordered.insert(to, moved);

    // Renumber unconditionally so the contiguity invariant holds even when
    // the incoming list carried gaps or duplicates.
    let mut changes = Vec::new();
    for (index, link) in ordered.iter_mut().enumerate() {
        let new_order = index as i32;
        if link.display_order != new_order {
            link.display_order = new_order;
            changes.push((link.id, new_order));
        }
    }

    Some(ReorderPlan { ordered, changes })
}

/// Plan a reorder given the complete desired id sequence (the wire form of
/// the drag result).
///
/// `ordered_ids` must be an exact permutation of the current link ids.
pub fn plan_permutation(
    links: &[LinkRecord],
    ordered_ids: &[DbId],
) -> Result<ReorderPlan, CoreError> {
    if ordered_ids.len() != links.len() {
        return Err(CoreError::Validation(format!(
            "Expected {} link ids, got {}",
            links.len(),
            ordered_ids.len()
        )));
    }

    let mut ordered = Vec::with_capacity(links.len());
    for &id in ordered_ids {
        let link = links
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| CoreError::Validation(format!("Unknown link id {id} in ordering")))?;
        if ordered.iter().any(|l: &LinkRecord| l.id == id) {
            return Err(CoreError::Validation(format!(
                "Duplicate link id {id} in ordering"
            )));
        }
        ordered.push(link.clone());
    }

    let mut changes = Vec::new();
    for (index, link) in ordered.iter_mut().enumerate() {
        let new_order = index as i32;
        if link.display_order != new_order {
            link.display_order = new_order;
            changes.push((link.id, new_order));
        }
    }

    Ok(ReorderPlan { ordered, changes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn link(id: DbId, order: i32) -> LinkRecord {
        LinkRecord {
            id,
            title: format!("Link {id}"),
            url: format!("https://example.com/{id}"),
            display_order: order,
            is_active: true,
            icon: None,
            clicks: 0,
        }
    }

    #[test]
    fn test_next_display_order_empty_is_zero() {
        assert_eq!(next_display_order([]), 0);
    }

    #[test]
    fn test_next_display_order_is_max_plus_one() {
        // Gapped orders: max + 1, not len().
        assert_eq!(next_display_order([0, 1, 5]), 6);
    }

    #[test]
    fn test_move_last_to_front() {
        // Scenario: [A(0), B(1), C(2)], drag C to position 0.
        let links = vec![link(1, 0), link(2, 1), link(3, 2)];
        let plan = plan_reorder(&links, 2, 0).unwrap();

        let ids: Vec<DbId> = plan.ordered.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        let orders: Vec<i32> = plan.ordered.iter().map(|l| l.display_order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        // Every item moved, so every item is in the change set.
        assert_eq!(plan.changes, vec![(3, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_move_only_affects_range() {
        let links = vec![link(1, 0), link(2, 1), link(3, 2), link(4, 3)];
        let plan = plan_reorder(&links, 1, 2).unwrap();

        let ids: Vec<DbId> = plan.ordered.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 3, 2, 4]);
        // Items outside [1, 2] keep their order and are absent from changes.
        assert_eq!(plan.changes, vec![(3, 1), (2, 2)]);
    }

    #[test]
    fn test_reorder_noop_same_index() {
        let links = vec![link(1, 0), link(2, 1)];
        assert_eq!(plan_reorder(&links, 1, 1), None);
    }

    #[test]
    fn test_reorder_noop_out_of_bounds() {
        let links = vec![link(1, 0), link(2, 1)];
        assert_eq!(plan_reorder(&links, 0, 2), None);
        assert_eq!(plan_reorder(&links, 5, 0), None);
    }

    #[test]
    fn test_renumber_heals_gapped_orders() {
        // Orders with gaps get rewritten for every item, including the
        // untouched ones, so the invariant is restored by any move.
        let links = vec![link(1, 0), link(2, 4), link(3, 9)];
        let plan = plan_reorder(&links, 2, 1).unwrap();
        let orders: Vec<i32> = plan.ordered.iter().map(|l| l.display_order).collect();
        assert!(is_contiguous(&orders));
        assert_eq!(plan.changes, vec![(3, 1), (2, 2)]);
    }

    #[test]
    fn test_repeated_reorders_stay_contiguous() {
        // P1: any sequence of successful reorders yields 0..n-1 exactly.
        let mut links: Vec<LinkRecord> = (0..6).map(|i| link(i + 1, i as i32)).collect();
        for (from, to) in [(0, 5), (3, 1), (5, 0), (2, 4), (1, 1), (4, 2)] {
            if let Some(plan) = plan_reorder(&links, from, to) {
                links = plan.ordered;
            }
            let orders: Vec<i32> = links.iter().map(|l| l.display_order).collect();
            assert!(is_contiguous(&orders), "orders {orders:?} not contiguous");
        }
    }

    #[test]
    fn test_permutation_plan() {
        let links = vec![link(1, 0), link(2, 1), link(3, 2)];
        let plan = plan_permutation(&links, &[3, 1, 2]).unwrap();
        let ids: Vec<DbId> = plan.ordered.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(plan.changes, vec![(3, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_permutation_rejects_wrong_length() {
        let links = vec![link(1, 0), link(2, 1)];
        assert_matches!(
            plan_permutation(&links, &[1]),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_permutation_rejects_unknown_id() {
        let links = vec![link(1, 0), link(2, 1)];
        assert_matches!(
            plan_permutation(&links, &[1, 99]),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_permutation_rejects_duplicate_id() {
        let links = vec![link(1, 0), link(2, 1)];
        assert_matches!(
            plan_permutation(&links, &[1, 1]),
            Err(CoreError::Validation(_))
        );
    }
}
