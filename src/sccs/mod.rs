/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Strongly connected components by parallel label propagation.
//!
//! The [min-label algorithm](min_label) needs a graph and its transpose, and
//! labels every node with the minimum node of its strongly connected
//! component, like the [connected-component algorithms](crate::cc).
//!
//! # Examples
//! ```
//! use dsi_progress_logger::no_logging;
//! use fastsv::prelude::*;
//! use fastsv::thread_pool;
//!
//! let graph = CsrGraph::from_arcs(5, [(0, 1), (1, 2), (2, 0), (1, 3), (3, 4), (4, 3)])?;
//! let transpose = transform::transpose(&graph)?;
//!
//! let components = sccs::min_label::<u32>(
//!     &graph,
//!     &transpose,
//!     Propagation::Adaptive,
//!     &thread_pool![],
//!     no_logging![],
//! )?;
//!
//! assert_eq!(components.labels(), &[0, 0, 0, 3, 3]);
//! assert_eq!(&*components.compute_sizes(), &[3, 2]);
//! # Ok::<(), fastsv::CcError>(())
//! ```

mod min_label;
pub use min_label::*;

/// How labels travel along arcs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Propagation {
    /// Every node computes the minimum label among the nodes that can send it
    /// a label, reading only the nodes whose label changed in the previous
    /// step.
    Pull,
    /// Every node whose label changed in the previous step
    /// [scatters](crate::utils::scatter_min) its label to the nodes it can
    /// send a label to.
    Push,
    /// Pushes when less than a sixteenth of the nodes changed their label in
    /// the previous step, and pulls otherwise.
    #[default]
    Adaptive,
}
