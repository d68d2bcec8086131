/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::graphs::CsrGraph;
use crate::traits::AdjacencyView;
use crate::utils::{try_with_capacity, RAYON_MIN_LEN};
use crate::CcError;
use log::debug;
use rayon::prelude::*;

/// Returns the symmetric closure `A ∨ Aᵗ` of the provided square matrix, with
/// the same orientation.
///
/// Loops are kept: they are inert for the component algorithms, as a vertex
/// is always in its own component. Returns [`CcError::DimensionMismatch`] if
/// the matrix is not square. The current Rayon thread pool is used.
pub fn symmetrize(graph: &impl AdjacencyView) -> Result<CsrGraph, CcError> {
    graph.check_square()?;
    let num_nodes = graph.num_nodes();

    let mut pairs = try_with_capacity(2 * graph.num_arcs() as usize)?;
    pairs.par_extend((0..num_nodes).into_par_iter().flat_map_iter(|node| {
        graph
            .neighbors(node)
            .iter()
            .flat_map(move |&succ| [(node, succ), (succ, node)])
    }));
    debug!(
        "Symmetrizing a graph with {} nodes and {} arcs",
        num_nodes,
        graph.num_arcs()
    );
    CsrGraph::from_pairs(num_nodes, num_nodes, graph.orientation(), pairs)
}

/// Returns whether the provided matrix is symmetric.
///
/// This is a debugging aid with cost proportional to the number of arcs
/// times the logarithm of the maximum degree: the component algorithms never
/// call it, and trust the caller when told that a matrix is symmetric. The
/// current Rayon thread pool is used.
pub fn check_symmetric(graph: &impl AdjacencyView) -> bool {
    graph.is_square()
        && (0..graph.num_lists())
            .into_par_iter()
            .with_min_len(RAYON_MIN_LEN)
            .all(|node| {
                graph
                    .neighbors(node)
                    .iter()
                    .all(|&succ| graph.has_arc(succ, node))
            })
}
