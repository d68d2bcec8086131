/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::Orientation;
use thiserror::Error;

/// Errors returned by the component algorithms and by the graph builders.
///
/// All errors are reported as soon as they are detected and no partial result
/// is ever returned. Nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CcError {
    /// The adjacency matrix is not square.
    #[error("The adjacency matrix must be square, but it is {rows} x {cols}")]
    DimensionMismatch { rows: usize, cols: usize },

    /// An arc refers to a vertex outside the graph.
    #[error("Vertex {node} is out of range (the graph has {num_nodes} vertices)")]
    VertexOutOfRange { node: usize, num_nodes: usize },

    /// The chosen vertex-id type cannot represent all vertex ids (and, for
    /// strongly connected components, the sentinel value).
    #[error("Too many vertices ({num_nodes}) for the vertex-id type: its maximum value is {max}")]
    TooManyNodes { num_nodes: usize, max: usize },

    /// An allocation failed.
    #[error("Cannot allocate {elements} elements of {elem_size} bytes")]
    OutOfMemory { elements: usize, elem_size: usize },

    /// The forward and backward views use different storage orientations.
    #[error("The forward view is stored {forward} but the backward view is stored {backward}")]
    InconsistentOrientation {
        forward: Orientation,
        backward: Orientation,
    },

    /// The forward and backward views do not describe a graph and its
    /// transpose.
    #[error(
        "The backward view ({backward_nodes} vertices, {backward_arcs} arcs) is not the transpose of the forward view ({forward_nodes} vertices, {forward_arcs} arcs)"
    )]
    InconsistentViews {
        forward_nodes: usize,
        forward_arcs: u64,
        backward_nodes: usize,
        backward_arcs: u64,
    },

    /// The maximum number of iterations was reached before convergence.
    #[error("No convergence after {max} iterations")]
    IterationLimit { max: usize },
}

impl CcError {
    /// Returns true if the error is caused by invalid input (a non-square
    /// matrix, an out-of-range vertex, or too many vertices for the
    /// vertex-id type).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            CcError::DimensionMismatch { .. }
                | CcError::VertexOutOfRange { .. }
                | CcError::TooManyNodes { .. }
        )
    }
}
