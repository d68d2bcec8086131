/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::graphs::CsrGraph;
use crate::traits::AdjacencyView;
use crate::utils::try_with_capacity;
use crate::CcError;
use log::debug;
use rayon::prelude::*;

/// Returns the transpose of the provided matrix, stored with the same
/// orientation.
///
/// The current Rayon thread pool is used.
pub fn transpose(graph: &impl AdjacencyView) -> Result<CsrGraph, CcError> {
    let mut pairs = try_with_capacity(graph.num_arcs() as usize)?;
    pairs.par_extend(
        (0..graph.num_lists())
            .into_par_iter()
            .flat_map_iter(|node| graph.neighbors(node).iter().map(move |&succ| (succ, node))),
    );
    debug!(
        "Transposing a {} x {} matrix with {} entries",
        graph.num_rows(),
        graph.num_cols(),
        pairs.len()
    );
    CsrGraph::from_pairs(graph.num_ids(), graph.num_lists(), graph.orientation(), pairs)
}
