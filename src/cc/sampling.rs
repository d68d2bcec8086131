/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Helpers for the sampling phase of FastSV.
//!
//! FastSV first runs on a subgraph keeping a few arcs per node, so that most
//! nodes of a large component end up with the same label after a few cheap
//! iterations. The most frequent of these labels identifies the _members_ of
//! that component, whose arcs among themselves carry no further information
//! and are replaced by a star centered at their minimum node.

use crate::graphs::CsrGraph;
use crate::traits::{AdjacencyView, VertexId};
use crate::utils::{try_with_capacity, RAYON_MIN_LEN};
use crate::CcError;
use itertools::Itertools;
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::cmp::Reverse;

/// Number of elements kept from each list in the sample.
pub const SAMPLES_PER_LIST: usize = 4;

/// Number of nodes above which [`Sampling::Auto`](super::Sampling::Auto)
/// may sample.
pub const SAMPLING_MIN_NODES: usize = 1024;

/// Number of labels drawn to find the most frequent one.
pub const NUM_LABEL_SAMPLES: usize = 864;

/// Returns the graph made of the first [`SAMPLES_PER_LIST`] elements of each
/// list, that is, the smallest ones.
///
/// The result is in general not symmetric, but its components are contained
/// in those of `sym_graph`.
pub(crate) fn sample_lists(sym_graph: &impl AdjacencyView) -> Result<CsrGraph, CcError> {
    CsrGraph::from_lists(
        sym_graph.num_lists(),
        sym_graph.num_ids(),
        sym_graph.orientation(),
        |node| sym_graph.neighbors(node).iter().copied().take(SAMPLES_PER_LIST),
    )
}

/// Returns the most frequent label among [`NUM_LABEL_SAMPLES`] labels drawn
/// at random with a generator seeded with the number of nodes, or `None` if
/// there are no labels.
///
/// Ties are broken in favor of the smaller label.
pub(crate) fn most_frequent_label<V: VertexId>(labels: &[V]) -> Option<V> {
    if labels.is_empty() {
        return None;
    }
    let mut rng = SmallRng::seed_from_u64(labels.len() as u64);
    let mut samples: Vec<V> = (0..NUM_LABEL_SAMPLES)
        .map(|_| labels[rng.random_range(0..labels.len())])
        .collect();
    samples.sort_unstable();
    samples
        .into_iter()
        .dedup_with_count()
        .max_by_key(|&(count, label)| (count, Reverse(label)))
        .map(|(_, label)| label)
}

/// Returns a graph with the same components as `sym_graph`, in which the
/// arcs among the nodes labelled with `key` are replaced by a star.
///
/// Nodes labelled with `key` must be in the same component of `sym_graph`.
/// The minimum such node, the hub, is adjacent to all the others; arcs
/// between a node labelled with `key` and a node with a different label are
/// kept, and so are all arcs of the other nodes. The result is symmetric if
/// `sym_graph` is.
///
/// The current Rayon thread pool is used.
pub(crate) fn contract<V: VertexId>(
    sym_graph: &impl AdjacencyView,
    labels: &[V],
    key: V,
) -> Result<CsrGraph, CcError> {
    let num_nodes = sym_graph.num_nodes();
    let is_member = &|node: usize| labels[node] == key;

    let num_members = labels
        .par_iter()
        .with_min_len(RAYON_MIN_LEN)
        .filter(|&&label| label == key)
        .count();
    let mut members = try_with_capacity(num_members)?;
    members.par_extend((0..num_nodes).into_par_iter().filter(|&node| is_member(node)));
    let members = &members[..];
    let Some(&hub) = members.first() else {
        return CsrGraph::from_view(sym_graph);
    };
    debug!(
        "Contracting {} nodes labelled {} on hub {}",
        members.len(),
        key,
        hub
    );

    CsrGraph::from_lists(num_nodes, num_nodes, sym_graph.orientation(), move |node| {
        let member = is_member(node);
        let star = if !member {
            &[][..]
        } else if node == hub {
            &members[1..]
        } else {
            &members[..1]
        };
        // Disjoint sorted sequences: the merge is sorted without duplicates
        star.iter().copied().merge(
            sym_graph
                .neighbors(node)
                .iter()
                .copied()
                .filter(move |&succ| !(member && is_member(succ))),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::check_symmetric;

    #[test]
    fn test_sample_lists() -> Result<(), CcError> {
        let arcs = (1..8).map(|i| (0, i)).chain([(3, 1), (3, 2)]);
        let g = CsrGraph::from_arcs(8, arcs)?;
        let sample = sample_lists(&g)?;
        assert_eq!(sample.neighbors(0), &[1, 2, 3, 4]);
        assert_eq!(sample.neighbors(3), &[1, 2]);
        assert_eq!(sample.num_arcs(), 6);
        Ok(())
    }

    #[test]
    fn test_most_frequent_label() {
        assert_eq!(most_frequent_label::<u32>(&[]), None);
        assert_eq!(most_frequent_label(&[7_u64][..]), Some(7));
        let labels: Vec<u32> = (0..1000).map(|i| if i % 10 == 0 { i } else { 3 }).collect();
        assert_eq!(most_frequent_label(&labels), Some(3));
    }

    #[test]
    fn test_contract() -> Result<(), CcError> {
        // Members 1, 2, 4, 5; 0 and 3 are adjacent to members, 6 is not
        let mut arcs = vec![];
        for (a, b) in [(1, 2), (2, 4), (4, 5), (1, 5), (0, 4), (3, 5), (3, 6), (2, 2)] {
            arcs.push((a, b));
            arcs.push((b, a));
        }
        let g = CsrGraph::from_arcs(7, arcs)?;
        let labels = [0_u32, 1, 1, 3, 1, 1, 6];
        let c = contract(&g, &labels, 1)?;

        assert_eq!(c.neighbors(0), &[4]);
        assert_eq!(c.neighbors(1), &[2, 4, 5]);
        assert_eq!(c.neighbors(2), &[1]);
        assert_eq!(c.neighbors(3), &[5, 6]);
        assert_eq!(c.neighbors(4), &[0, 1]);
        assert_eq!(c.neighbors(5), &[1, 3]);
        assert_eq!(c.neighbors(6), &[3]);
        assert!(check_symmetric(&c));

        // No member: a copy
        assert_eq!(contract(&g, &labels, 2)?, g);
        Ok(())
    }
}
