// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconciliation of a previous child set against its replacement.

use alloc::vec::Vec;
use core::hash::Hash;
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::set::{ChildSet, Role};

/// The outcome of [`reconcile`].
#[derive(Clone, Debug)]
pub struct Reconciliation<K, C> {
    /// The union of previous and next children, in first-seen order, with
    /// roles assigned.
    pub children: ChildSet<K, C>,
    /// `true` iff the previous and next key sets differ. Order is ignored:
    /// reordering the same keys produces only [`Role::Static`] entries, so
    /// there is nothing to transition.
    pub keys_changed: bool,
}

/// Diff `previous` against `next` and assign per-child roles.
///
/// The result contains every key from either side, in first-seen order
/// (previous order first, then new keys in next order):
///
/// - keys only in `previous` become [`Role::Outgoing`] and keep their
///   previous content;
/// - keys only in `next` become [`Role::Incoming`];
/// - keys in both become [`Role::Static`] with content refreshed from
///   `next`; an unchanged key is not part of the transition.
///
/// Roles carried by `previous` entries are ignored; `previous` is treated as
/// the currently rendered set. Duplicate keys in `next` collapse to one
/// entry, last content winning.
///
/// ```rust
/// use stagehand_reconcile::{ChildSet, Role, reconcile};
///
/// let previous: ChildSet<&str, &str> = [("list", "old"), ("toolbar", "t")].into_iter().collect();
/// let rec = reconcile(previous, [("toolbar", "t"), ("detail", "d")]);
///
/// assert!(rec.keys_changed);
/// assert_eq!(rec.children.role_of(&"list"), Some(Role::Outgoing));
/// assert_eq!(rec.children.role_of(&"toolbar"), Some(Role::Static));
/// assert_eq!(rec.children.role_of(&"detail"), Some(Role::Incoming));
/// ```
pub fn reconcile<K, C>(
    previous: ChildSet<K, C>,
    next: impl IntoIterator<Item = (K, C)>,
) -> Reconciliation<K, C>
where
    K: Eq + Hash + Clone,
{
    // Collapse `next` to unique keys, preserving first-seen order. The
    // content slot is taken as keys are matched against `previous`.
    let mut next_entries: Vec<(K, Option<C>)> = Vec::new();
    let mut next_index: HashMap<K, usize> = HashMap::new();
    for (key, content) in next {
        match next_index.entry(key) {
            Entry::Occupied(slot) => next_entries[*slot.get()].1 = Some(content),
            Entry::Vacant(slot) => {
                let key = slot.key().clone();
                slot.insert(next_entries.len());
                next_entries.push((key, Some(content)));
            }
        }
    }

    let prev_len = previous.len();
    let next_len = next_entries.len();
    let mut shared = 0_usize;
    let mut children = ChildSet::with_capacity(prev_len + next_len);

    for entry in previous {
        let (key, content, _) = entry.into_parts();
        if let Some(&slot) = next_index.get(&key) {
            shared += 1;
            if let Some(refreshed) = next_entries[slot].1.take() {
                children.insert(key, refreshed, Role::Static);
            }
        } else {
            children.insert(key, content, Role::Outgoing);
        }
    }

    for (key, slot) in next_entries {
        if let Some(content) = slot {
            children.insert(key, content, Role::Incoming);
        }
    }

    let keys_changed = shared != prev_len || next_len != prev_len;
    Reconciliation {
        children,
        keys_changed,
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::reconcile;
    use crate::set::{ChildSet, Role};

    fn roles(rec: &super::Reconciliation<&'static str, u32>) -> Vec<(&'static str, Role)> {
        rec.children.iter().map(|e| (*e.key(), e.role)).collect()
    }

    #[test]
    fn same_set_is_idempotent() {
        let previous: ChildSet<&str, u32> = [("a", 1), ("b", 2)].into_iter().collect();
        let rec = reconcile(previous, [("a", 1), ("b", 2)]);

        assert!(!rec.keys_changed);
        assert_eq!(roles(&rec), [("a", Role::Static), ("b", Role::Static)]);
    }

    #[test]
    fn removed_keys_become_outgoing_added_keys_incoming() {
        let previous: ChildSet<&str, u32> = [("a", 1)].into_iter().collect();
        let rec = reconcile(previous, [("b", 2)]);

        assert!(rec.keys_changed);
        assert_eq!(roles(&rec), [("a", Role::Outgoing), ("b", Role::Incoming)]);
        // Outgoing content is carried from the previous set.
        assert_eq!(rec.children.get(&"a").map(|e| e.content), Some(1));
    }

    #[test]
    fn shared_keys_are_static_with_refreshed_content() {
        let previous: ChildSet<&str, u32> = [("a", 1), ("shared", 5)].into_iter().collect();
        let rec = reconcile(previous, [("shared", 50), ("b", 2)]);

        assert!(rec.keys_changed);
        assert_eq!(rec.children.role_of(&"shared"), Some(Role::Static));
        assert_eq!(rec.children.get(&"shared").map(|e| e.content), Some(50));
        assert_eq!(rec.children.role_of(&"a"), Some(Role::Outgoing));
        assert_eq!(rec.children.role_of(&"b"), Some(Role::Incoming));
    }

    #[test]
    fn union_order_is_previous_first_then_new() {
        let previous: ChildSet<&str, u32> = [("a", 1), ("b", 2)].into_iter().collect();
        let rec = reconcile(previous, [("c", 3), ("b", 20), ("d", 4)]);

        let keys: Vec<_> = rec.children.keys().copied().collect();
        assert_eq!(keys, ["a", "b", "c", "d"]);
    }

    #[test]
    fn reordering_the_same_keys_changes_nothing() {
        let previous: ChildSet<&str, u32> = [("a", 1), ("b", 2)].into_iter().collect();
        let rec = reconcile(previous, [("b", 2), ("a", 1)]);

        assert!(!rec.keys_changed);
        assert!(rec.children.iter().all(|e| e.role.is_static()));
    }

    #[test]
    fn duplicate_next_keys_collapse_last_content_wins() {
        let previous: ChildSet<&str, u32> = ChildSet::new();
        let rec = reconcile(previous, [("a", 1), ("a", 9)]);

        assert_eq!(rec.children.len(), 1);
        assert_eq!(rec.children.get(&"a").map(|e| e.content), Some(9));
        assert_eq!(rec.children.role_of(&"a"), Some(Role::Incoming));
    }

    #[test]
    fn empty_previous_marks_everything_incoming() {
        let previous: ChildSet<&str, u32> = ChildSet::new();
        let rec = reconcile(previous, [("a", 1)]);

        assert!(rec.keys_changed);
        assert_eq!(roles(&rec), [("a", Role::Incoming)]);
    }

    #[test]
    fn empty_next_marks_everything_outgoing() {
        let previous: ChildSet<&str, u32> = [("a", 1)].into_iter().collect();
        let rec = reconcile(previous, []);

        assert!(rec.keys_changed);
        assert_eq!(roles(&rec), [("a", Role::Outgoing)]);
    }

    #[test]
    fn previous_roles_are_ignored() {
        let mut previous: ChildSet<&str, u32> = ChildSet::new();
        previous.insert("a", 1, Role::Incoming);
        let rec = reconcile(previous, [("a", 1)]);

        assert!(!rec.keys_changed);
        assert_eq!(rec.children.role_of(&"a"), Some(Role::Static));
    }
}
