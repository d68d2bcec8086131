/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::VertexId;
use crate::graphs::CsrGraph;
use crate::utils::RAYON_MIN_LEN;
use crate::CcError;
use rayon::prelude::*;
use std::fmt::{Display, Formatter};

/// How the lists of an [`AdjacencyView`] relate to its adjacency matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// List `i` contains the columns `j` such that the entry `(i, j)` is
    /// present, that is, the successors of `i`.
    #[default]
    ByRow,
    /// List `j` contains the rows `i` such that the entry `(i, j)` is
    /// present, that is, the predecessors of `j`.
    ByCol,
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::ByRow => write!(f, "by row"),
            Orientation::ByCol => write!(f, "by column"),
        }
    }
}

/// Random access to the sparsity pattern of an adjacency matrix.
///
/// The pattern is exposed as a sequence of [lists](AdjacencyView::neighbors),
/// one per row or per column depending on the
/// [orientation](AdjacencyView::orientation). Lists must be sorted and
/// without duplicates. Weights, if any, are not part of the view: only the
/// presence of an entry matters.
///
/// The only traversal primitive the component algorithms need is
/// [`neighbor_min_reduce`](AdjacencyView::neighbor_min_reduce).
pub trait AdjacencyView: Sync {
    /// Returns the number of rows of the adjacency matrix.
    fn num_rows(&self) -> usize;

    /// Returns the number of columns of the adjacency matrix.
    fn num_cols(&self) -> usize;

    /// Returns the number of entries of the adjacency matrix.
    fn num_arcs(&self) -> u64;

    /// Returns whether lists are rows or columns.
    fn orientation(&self) -> Orientation;

    /// Returns the sorted list of index `node`.
    fn neighbors(&self, node: usize) -> &[usize];

    /// Returns the number of vertices, that is, the number of rows.
    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.num_rows()
    }

    /// Returns the number of lists (rows or columns, depending on the
    /// orientation).
    #[inline(always)]
    fn num_lists(&self) -> usize {
        match self.orientation() {
            Orientation::ByRow => self.num_rows(),
            Orientation::ByCol => self.num_cols(),
        }
    }

    /// Returns the number of possible elements of a list (columns or rows,
    /// depending on the orientation).
    #[inline(always)]
    fn num_ids(&self) -> usize {
        match self.orientation() {
            Orientation::ByRow => self.num_cols(),
            Orientation::ByCol => self.num_rows(),
        }
    }

    /// Returns the length of the list of index `node`.
    #[inline(always)]
    fn degree(&self, node: usize) -> usize {
        self.neighbors(node).len()
    }

    /// Returns whether `neighbor` is in the list of index `node`.
    #[inline(always)]
    fn has_arc(&self, node: usize, neighbor: usize) -> bool {
        self.neighbors(node).binary_search(&neighbor).is_ok()
    }

    /// Returns true if the matrix is square.
    #[inline(always)]
    fn is_square(&self) -> bool {
        self.num_rows() == self.num_cols()
    }

    /// Returns an error if the matrix is not square.
    fn check_square(&self) -> Result<(), CcError> {
        if self.is_square() {
            Ok(())
        } else {
            Err(CcError::DimensionMismatch {
                rows: self.num_rows(),
                cols: self.num_cols(),
            })
        }
    }

    /// Lowers each entry of `acc` to the minimum label among the elements of
    /// the corresponding list.
    ///
    /// For every list index `v`, `acc[v]` becomes the minimum between its
    /// current value and `labels[u]` for all `u` in the list of `v` such that
    /// `mask[u]` is true (or all of them, if there is no mask). Entries whose
    /// list has no eligible element are left untouched. Returns the number of
    /// entries of `acc` that were lowered.
    ///
    /// This method uses the current Rayon thread pool: run it inside
    /// [`ThreadPool::install`](rayon::ThreadPool::install) to choose one.
    ///
    /// # Panics
    ///
    /// If `labels` or `mask` do not have [`num_ids`](AdjacencyView::num_ids)
    /// elements or `acc` does not have
    /// [`num_lists`](AdjacencyView::num_lists) elements.
    fn neighbor_min_reduce<V: VertexId>(
        &self,
        labels: &[V],
        mask: Option<&[bool]>,
        acc: &mut [V],
    ) -> usize {
        assert_eq!(labels.len(), self.num_ids());
        assert_eq!(acc.len(), self.num_lists());
        if let Some(mask) = mask {
            assert_eq!(mask.len(), self.num_ids());
        }

        acc.par_iter_mut()
            .with_min_len(RAYON_MIN_LEN)
            .enumerate()
            .map(|(node, acc)| {
                let neighbors = self.neighbors(node).iter();
                let min = match mask {
                    Some(mask) => neighbors.filter(|&&u| mask[u]).map(|&u| labels[u]).min(),
                    None => neighbors.map(|&u| labels[u]).min(),
                };
                match min {
                    Some(min) if min < *acc => {
                        *acc = min;
                        1
                    }
                    _ => 0,
                }
            })
            .sum()
    }

    /// Returns `A ∨ Aᵗ`, see [`symmetrize`](crate::transform::symmetrize).
    fn symmetrize(&self) -> Result<CsrGraph, CcError>
    where
        Self: Sized,
    {
        crate::transform::symmetrize(self)
    }
}

impl<G: AdjacencyView> AdjacencyView for &G {
    #[inline(always)]
    fn num_rows(&self) -> usize {
        (**self).num_rows()
    }

    #[inline(always)]
    fn num_cols(&self) -> usize {
        (**self).num_cols()
    }

    #[inline(always)]
    fn num_arcs(&self) -> u64 {
        (**self).num_arcs()
    }

    #[inline(always)]
    fn orientation(&self) -> Orientation {
        (**self).orientation()
    }

    #[inline(always)]
    fn neighbors(&self, node: usize) -> &[usize] {
        (**self).neighbors(node)
    }
}
