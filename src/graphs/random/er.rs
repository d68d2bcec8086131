/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::graphs::CsrGraph;
use crate::CcError;
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Provides a sequential implementation of Erdös-Rényi random graphs.
///
/// The Erdös-Rényi random graph model is a simple model for generating random
/// graphs. It is parameterized by the number of nodes `n` and the probability
/// `p` of an arc between any two nodes. In this implementation, loops are never
/// included.
///
/// Note that the time required to iterate over the arcs is quadratic in `n`,
/// so if you plan to reuse the graph you should store it in a
/// [`CsrGraph`].
#[derive(Debug, Clone)]
pub struct ErdosRenyi {
    n: usize,
    p: f64,
    seed: u64,
}

impl ErdosRenyi {
    /// Creates a new Erdös-Rényi random graph, given the number of
    /// nodes, the probability of an edge between any two nodes, and a
    /// seed for the [pseudorandom number generator](SmallRng).
    pub fn new(n: usize, p: f64, seed: u64) -> Self {
        assert!((0.0..=1.0).contains(&p), "p must be in [0..1]");
        Self { n, p, seed }
    }

    pub fn num_nodes(&self) -> usize {
        self.n
    }

    /// Returns an iterator over the arcs of the graph, in lexicographical
    /// order.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        (0..self.n)
            .flat_map(move |src| (0..self.n).map(move |dst| (src, dst)))
            .filter(|&(src, dst)| src != dst)
            .filter(move |_| rng.random_bool(self.p))
    }

    /// Stores the graph in a [`CsrGraph`].
    pub fn to_csr(&self) -> Result<CsrGraph, CcError> {
        CsrGraph::from_arcs(self.n, self.arcs())
    }
}
