// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tag intersection between an outgoing and an incoming subtree.

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::stage::{IdentityTag, Stage};

/// One conceptual element present on both sides of a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchedPair<N> {
    /// The identity tag both elements carry.
    pub tag: IdentityTag,
    /// The element in the outgoing subtree.
    pub outgoing: N,
    /// The element in the incoming subtree.
    pub incoming: N,
}

/// The matched pairs of one transition, in outgoing-subtree traversal order.
///
/// Pairing is by tag, so index `i` of [`MatchSet::outgoing_nodes`] and index
/// `i` of [`MatchSet::incoming_nodes`] always refer to the same conceptual
/// element. The set is computed once per transition and dropped when the
/// transition settles.
#[derive(Clone, Debug, Default)]
pub struct MatchSet<N> {
    pairs: SmallVec<[MatchedPair<N>; 4]>,
    /// Pair indices sorted by incoming-subtree traversal position.
    incoming_order: SmallVec<[usize; 4]>,
}

impl<N> MatchSet<N> {
    /// Number of matched pairs. Both sides have exactly this many elements.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no tags were shared between the two subtrees.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The pairs, in outgoing-subtree traversal order.
    pub fn pairs(&self) -> &[MatchedPair<N>] {
        &self.pairs
    }
}

impl<N: Copy> MatchSet<N> {
    /// Outgoing-side nodes, in outgoing-subtree traversal order.
    pub fn outgoing_nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.pairs.iter().map(|p| p.outgoing)
    }

    /// Incoming-side nodes, aligned index-for-index with
    /// [`MatchSet::outgoing_nodes`].
    pub fn incoming_nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.pairs.iter().map(|p| p.incoming)
    }

    /// Incoming-side nodes in the incoming subtree's own traversal order.
    pub fn incoming_in_tree_order(&self) -> impl Iterator<Item = N> + '_ {
        self.incoming_order.iter().map(|&i| self.pairs[i].incoming)
    }
}

/// Intersect the identity tags of two mounted subtrees.
///
/// Enumerates the tagged descendants of each root, keeps every tag present in
/// both, and emits one [`MatchedPair`] per shared tag in outgoing-subtree
/// traversal order. Tags are only promised unique within a subtree; if a
/// subtree repeats a tag, the first occurrence in traversal order wins and
/// later ones are ignored.
///
/// Call only while both roots are mounted. An empty result means the
/// transition has nothing to animate and should fall back to a plain
/// cross-fade.
pub fn match_shared<S: Stage>(
    stage: &S,
    outgoing_root: S::Node,
    incoming_root: S::Node,
) -> MatchSet<S::Node> {
    let outgoing = stage.tagged_descendants(outgoing_root);
    let incoming = stage.tagged_descendants(incoming_root);

    let mut incoming_by_tag: HashMap<&str, (S::Node, usize)> =
        HashMap::with_capacity(incoming.len());
    for (pos, (node, tag)) in incoming.iter().enumerate() {
        incoming_by_tag.entry(tag.as_str()).or_insert((*node, pos));
    }

    let mut pairs: SmallVec<[MatchedPair<S::Node>; 4]> = SmallVec::new();
    let mut incoming_pos: SmallVec<[usize; 4]> = SmallVec::new();
    let mut seen: HashSet<&str> = HashSet::with_capacity(outgoing.len());
    for (node, tag) in &outgoing {
        if !seen.insert(tag.as_str()) {
            continue;
        }
        if let Some(&(incoming_node, pos)) = incoming_by_tag.get(tag.as_str()) {
            pairs.push(MatchedPair {
                tag: tag.clone(),
                outgoing: *node,
                incoming: incoming_node,
            });
            incoming_pos.push(pos);
        }
    }

    let mut incoming_order: SmallVec<[usize; 4]> = (0..pairs.len()).collect();
    incoming_order.sort_unstable_by_key(|&i| incoming_pos[i]);

    MatchSet {
        pairs,
        incoming_order,
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;
    use hashbrown::HashMap;
    use kurbo::Rect;

    use super::match_shared;
    use crate::stage::{IdentityTag, Stage};

    struct MapStage {
        tagged: HashMap<u32, Vec<(u32, IdentityTag)>>,
        rects: HashMap<u32, Rect>,
    }

    impl MapStage {
        fn new(roots: &[(u32, &[(u32, &str)])]) -> Self {
            let mut tagged = HashMap::new();
            for (root, children) in roots {
                tagged.insert(
                    *root,
                    children
                        .iter()
                        .map(|(node, tag)| (*node, String::from(*tag)))
                        .collect(),
                );
            }
            Self {
                tagged,
                rects: HashMap::new(),
            }
        }
    }

    impl Stage for MapStage {
        type Node = u32;

        fn tagged_descendants(&self, root: u32) -> Vec<(u32, IdentityTag)> {
            self.tagged.get(&root).cloned().unwrap_or_default()
        }

        fn bounding_rect(&self, node: u32) -> Rect {
            self.rects.get(&node).copied().unwrap_or(Rect::ZERO)
        }
    }

    const OUT: u32 = 1;
    const INC: u32 = 2;

    #[test]
    fn emits_shared_tags_in_outgoing_order() {
        let stage = MapStage::new(&[
            (OUT, &[(10, "a"), (11, "b"), (12, "c")]),
            (INC, &[(20, "c"), (21, "x"), (22, "a")]),
        ]);

        let set = match_shared(&stage, OUT, INC);

        assert_eq!(set.len(), 2);
        let tags: Vec<_> = set.pairs().iter().map(|p| p.tag.as_str()).collect();
        assert_eq!(tags, ["a", "c"]);
        let outgoing: Vec<_> = set.outgoing_nodes().collect();
        assert_eq!(outgoing, [10, 12]);
    }

    #[test]
    fn pairs_are_correlated_by_tag_not_position() {
        // The subtrees order the shared tags differently; index alignment
        // must still hold.
        let stage = MapStage::new(&[
            (OUT, &[(10, "hero"), (11, "title")]),
            (INC, &[(20, "title"), (21, "hero")]),
        ]);

        let set = match_shared(&stage, OUT, INC);

        let aligned: Vec<_> = set.outgoing_nodes().zip(set.incoming_nodes()).collect();
        assert_eq!(aligned, [(10, 21), (11, 20)]);
    }

    #[test]
    fn incoming_in_tree_order_follows_the_incoming_subtree() {
        let stage = MapStage::new(&[
            (OUT, &[(10, "hero"), (11, "title")]),
            (INC, &[(20, "title"), (21, "hero")]),
        ]);

        let set = match_shared(&stage, OUT, INC);

        let in_order: Vec<_> = set.incoming_in_tree_order().collect();
        assert_eq!(in_order, [20, 21]);
    }

    #[test]
    fn cardinality_is_symmetric() {
        let stage = MapStage::new(&[
            (OUT, &[(10, "a"), (11, "b")]),
            (INC, &[(20, "b"), (21, "c"), (22, "a")]),
        ]);

        let set = match_shared(&stage, OUT, INC);

        assert_eq!(set.outgoing_nodes().count(), set.incoming_nodes().count());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn no_shared_tags_is_empty() {
        let stage = MapStage::new(&[(OUT, &[(10, "a")]), (INC, &[(20, "b")])]);

        let set = match_shared(&stage, OUT, INC);

        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn duplicate_tags_within_a_subtree_first_occurrence_wins() {
        let stage = MapStage::new(&[
            (OUT, &[(10, "a"), (11, "a")]),
            (INC, &[(20, "a"), (21, "a")]),
        ]);

        let set = match_shared(&stage, OUT, INC);

        assert_eq!(set.len(), 1);
        assert_eq!(set.pairs()[0].outgoing, 10);
        assert_eq!(set.pairs()[0].incoming, 20);
    }

    #[test]
    fn unmatched_roots_yield_nothing() {
        let stage = MapStage::new(&[(OUT, &[(10, "a")])]);

        // The incoming root has no tagged descendants at all.
        let set = match_shared(&stage, OUT, INC);
        assert!(set.is_empty());
    }
}
