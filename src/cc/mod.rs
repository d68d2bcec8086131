/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Connected components by FastSV.
//!
//! An implementation of the FastSV algorithm described by Yongzhe Zhang,
//! Ariful Azad, and Zhenjiang Hu in "FastSV: A Distributed-Memory Connected
//! Component Algorithm with Fast Convergence", _Proceedings of
//! the 2020 SIAM Conference on Parallel Processing for Scientific
//! Computing_, pages 46–57, SIAM, 2020.
//!
//! # Algorithm
//!
//! Every node has a _parent_, initially itself, and the parent pointers form
//! a forest in which the parent of a node is never larger than the node.
//! Each iteration performs:
//!
//! 1. _conditional hooking_: for each node `v`, the minimum grandparent `m`
//!    among the neighbors of `v` is computed, and the parent of the (old)
//!    parent of `v` is lowered to `m` if `m` is smaller; this is a
//!    [scatter-reduce](crate::utils::scatter_min), as many nodes may target
//!    the same parent;
//! 2. _unconditional hooking_: the same, but only for nodes in _stars_ (trees
//!    of depth at most one), using the grandparents of the neighbors
//!    computed after the previous step;
//! 3. _shortcutting_: every node replaces its parent with its grandparent;
//! 4. _star detection_: grandparents are recomputed, and star flags are
//!    updated.
//!
//! After each hooking step, every parent is also lowered to the minimum it
//! has seen through its neighbors and to its grandparent. The algorithm
//! stops when an iteration leaves all grandparents unchanged: at that point
//! the forest is made of stars rooted at the minimum node of each component.
//!
//! With [`unconditional_hooking`](FastSvParams::unconditional_hooking) set to
//! false, steps 2–4 are replaced by the recomputation of grandparents. This
//! leaner loop needs fewer arrays but more iterations.
//!
//! # Sampling
//!
//! On dense graphs, the loop above first runs on the subgraph made of the
//! [`SAMPLES_PER_LIST`] smallest neighbors of each node (see [`Sampling`]).
//! Then, the most frequent label among [`NUM_LABEL_SAMPLES`] random nodes
//! identifies a large partial component: its arcs are replaced by a star
//! centered at its minimum node, and the loop runs again on the resulting
//! graph, starting from the labels of the sample. Since the star keeps the
//! partial component connected and all other arcs are kept, the final labels
//! are the same as without sampling.
//!
//! # Requirements
//!
//! The graph must be symmetric. If it is not, pass `sanitize` as true and it
//! will be [symmetrized](crate::transform::symmetrize) first. Loops are
//! harmless.
//!
//! # Memory Requirements
//!
//! FastSV requires five vertex ids and a boolean per node, plus the memory
//! that is necessary to store the graph (twice, if it must be sanitized).
//! Sampling needs in addition the sample and the contracted graph.
//!
//! # Examples
//! ```
//! use dsi_progress_logger::no_logging;
//! use fastsv::{cc, graphs::CsrGraph, thread_pool};
//!
//! let graph = CsrGraph::from_arcs(6, [(0, 1), (1, 2), (3, 4), (4, 5)])?;
//! let components = cc::fastsv::<u32>(&graph, true, &thread_pool![], no_logging![])?;
//!
//! assert_eq!(components.labels(), &[0, 0, 0, 3, 3, 3]);
//! assert_eq!(components.num_components(), 2);
//! # Ok::<(), fastsv::CcError>(())
//! ```

mod fastsv;
pub use fastsv::*;

pub(crate) mod label_store;

mod sampling;
pub use sampling::{NUM_LABEL_SAMPLES, SAMPLES_PER_LIST, SAMPLING_MIN_NODES};

use crate::utils::ScatterMode;

/// Parameters of [`fastsv_with_params`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastSvParams {
    /// Maximum number of iterations, or `None` to iterate until convergence.
    pub max_iterations: Option<usize>,
    /// How hooking performs its scatter-reduce.
    pub scatter: ScatterMode,
    /// Whether to perform unconditional hooking, shortcutting and star
    /// detection.
    pub unconditional_hooking: bool,
    /// Whether to initialize the parent of each node with the minimum between
    /// the node and its neighbors, rather than with the node itself.
    pub warmup: bool,
    /// Whether to run on a sample of the graph first.
    pub sampling: Sampling,
}

impl Default for FastSvParams {
    fn default() -> Self {
        Self {
            max_iterations: None,
            scatter: ScatterMode::Auto,
            unconditional_hooking: true,
            warmup: false,
            sampling: Sampling::Auto,
        }
    }
}

/// When [`fastsv_with_params`] runs on a sample of the graph first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sampling {
    /// Sample graphs with more than [`SAMPLING_MIN_NODES`] nodes and more
    /// than `2 * SAMPLES_PER_LIST` arcs per node.
    #[default]
    Auto,
    /// Sample any nonempty graph.
    Always,
    /// Never sample.
    Never,
}

impl Sampling {
    /// Returns whether a symmetric graph with the given number of nodes and
    /// arcs must be sampled.
    pub fn enabled(self, num_nodes: usize, num_arcs: u64) -> bool {
        match self {
            Sampling::Auto => {
                num_nodes > SAMPLING_MIN_NODES
                    && (num_nodes as u64).saturating_mul(2 * SAMPLES_PER_LIST as u64) < num_arcs
            }
            Sampling::Always => num_nodes > 0,
            Sampling::Never => false,
        }
    }
}
