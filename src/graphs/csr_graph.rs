/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::{AdjacencyView, Orientation};
use crate::utils::{try_alloc, try_push, try_with_capacity, RAYON_MIN_LEN};
use crate::CcError;
use itertools::Itertools;
use rayon::prelude::*;
use sync_cell_slice::SyncSlice;

/// A compressed sparse-row graph.
///
/// It stores the degree-cumulative function (DCF) and the concatenation of
/// all lists. The DCF is a sequence of offsets that indicates the start of the
/// list of each index. Lists are sorted and without duplicates.
///
/// Lists are the rows of the adjacency matrix (successor lists) or its
/// columns (predecessor lists), depending on the
/// [orientation](CsrGraph::orientation). All constructors build row lists;
/// use [`with_orientation`](CsrGraph::with_orientation) to reinterpret them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CsrGraph {
    num_ids: usize,
    orientation: Orientation,
    dcf: Box<[usize]>,
    successors: Box<[usize]>,
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::empty(0)
    }
}

impl CsrGraph {
    /// Creates a new CSR graph from the given degree-cumulative function and
    /// lists.
    ///
    /// The number of lists is `dcf.len() - 1`, and `num_ids` is the number of
    /// possible list elements.
    ///
    /// # Safety
    /// The degree-cumulative function must be monotone, start from zero and
    /// end at `successors.len()`; each list must be sorted, without
    /// duplicates and with elements smaller than `num_ids`.
    pub unsafe fn from_parts(
        num_ids: usize,
        orientation: Orientation,
        dcf: Box<[usize]>,
        successors: Box<[usize]>,
    ) -> Self {
        Self {
            num_ids,
            orientation,
            dcf,
            successors,
        }
    }

    /// Creates a graph with `num_nodes` vertices and no arcs.
    pub fn empty(num_nodes: usize) -> Self {
        Self {
            num_ids: num_nodes,
            orientation: Orientation::ByRow,
            dcf: vec![0; num_nodes + 1].into_boxed_slice(),
            successors: Box::default(),
        }
    }

    /// Creates a graph with `num_nodes` vertices from a list of arcs.
    ///
    /// Duplicate arcs are merged. Returns [`CcError::VertexOutOfRange`] if
    /// an arc refers to a vertex not smaller than `num_nodes`.
    pub fn from_arcs(
        num_nodes: usize,
        arcs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, CcError> {
        Self::from_matrix_arcs(num_nodes, num_nodes, arcs)
    }

    /// Creates a graph from the entries of a possibly rectangular adjacency
    /// matrix with the given number of rows and columns.
    ///
    /// Duplicate entries are merged. Returns [`CcError::VertexOutOfRange`] if
    /// an entry is out of bounds.
    pub fn from_matrix_arcs(
        num_rows: usize,
        num_cols: usize,
        arcs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, CcError> {
        let arcs = arcs.into_iter();
        let mut pairs = try_with_capacity(arcs.size_hint().0)?;
        for (src, dst) in arcs {
            if src >= num_rows {
                return Err(CcError::VertexOutOfRange {
                    node: src,
                    num_nodes: num_rows,
                });
            }
            if dst >= num_cols {
                return Err(CcError::VertexOutOfRange {
                    node: dst,
                    num_nodes: num_cols,
                });
            }
            try_push(&mut pairs, (src, dst))?;
        }
        Self::from_pairs(num_rows, num_cols, Orientation::ByRow, pairs)
    }

    /// Builds a graph from unsorted, valid `(list, element)` pairs.
    pub(crate) fn from_pairs(
        num_lists: usize,
        num_ids: usize,
        orientation: Orientation,
        mut pairs: Vec<(usize, usize)>,
    ) -> Result<Self, CcError> {
        pairs.par_sort_unstable();

        let mut dcf = try_with_capacity(num_lists + 1)?;
        dcf.push(0);
        let mut successors = try_with_capacity(pairs.len())?;
        let mut last_src = 0;
        for (src, dst) in pairs.into_iter().dedup() {
            while last_src < src {
                dcf.push(successors.len());
                last_src += 1;
            }
            successors.push(dst);
        }
        while dcf.len() <= num_lists {
            dcf.push(successors.len());
        }
        successors.shrink_to_fit();

        Ok(Self {
            num_ids,
            orientation,
            dcf: dcf.into_boxed_slice(),
            successors: successors.into_boxed_slice(),
        })
    }

    /// Returns a copy of an arbitrary view, with the same orientation.
    pub fn from_view(view: &impl AdjacencyView) -> Result<Self, CcError> {
        let num_lists = view.num_lists();
        let mut dcf = try_with_capacity(num_lists + 1)?;
        dcf.push(0);
        let mut successors = try_with_capacity(view.num_arcs() as usize)?;
        for node in 0..num_lists {
            successors.extend_from_slice(view.neighbors(node));
            dcf.push(successors.len());
        }
        Ok(Self {
            num_ids: view.num_ids(),
            orientation: view.orientation(),
            dcf: dcf.into_boxed_slice(),
            successors: successors.into_boxed_slice(),
        })
    }

    /// Reinterprets the lists of this graph as having the given orientation.
    ///
    /// Changing the orientation of a graph built from the arcs of `A` yields
    /// a view of `Aᵗ`.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn dcf(&self) -> &[usize] {
        &self.dcf
    }

    pub fn successors(&self) -> &[usize] {
        &self.successors
    }

    pub fn into_inner(self) -> (Box<[usize]>, Box<[usize]>) {
        (self.dcf, self.successors)
    }

    /// Builds, in parallel, a graph whose list of index `list` contains the
    /// elements returned by `lists(list)`.
    ///
    /// The iterators must return sorted elements without duplicates and
    /// smaller than `num_ids`. Each iterator is created twice, once to size
    /// the list and once to fill it. The current Rayon thread pool is used.
    pub(crate) fn from_lists<I: Iterator<Item = usize>>(
        num_lists: usize,
        num_ids: usize,
        orientation: Orientation,
        lists: impl Fn(usize) -> I + Sync,
    ) -> Result<Self, CcError> {
        let mut dcf = try_alloc(num_lists + 1, 0_usize)?;
        dcf[1..]
            .par_iter_mut()
            .with_min_len(RAYON_MIN_LEN)
            .enumerate()
            .for_each(|(list, d)| *d = lists(list).count());
        for i in 1..dcf.len() {
            dcf[i] += dcf[i - 1];
        }

        let mut successors = try_alloc(dcf[num_lists], 0_usize)?;
        let sync_successors = successors.as_sync_slice();
        (0..num_lists)
            .into_par_iter()
            .with_min_len(RAYON_MIN_LEN)
            .for_each(|list| {
                for (pos, elem) in (dcf[list]..).zip(lists(list)) {
                    // SAFETY: lists are written to disjoint ranges
                    unsafe { sync_successors[pos].set(elem) };
                }
            });

        Ok(Self {
            num_ids,
            orientation,
            dcf: dcf.into_boxed_slice(),
            successors: successors.into_boxed_slice(),
        })
    }

    /// Removes, in parallel, all arcs for which `pred(source, target)` is
    /// false, and returns the number of removed arcs.
    ///
    /// The predicate receives the row and the column of each entry of the
    /// adjacency matrix, independently of the orientation. The current Rayon
    /// thread pool is used.
    pub fn retain_arcs(
        &mut self,
        pred: impl Fn(usize, usize) -> bool + Sync,
    ) -> Result<u64, CcError> {
        let by_row = self.orientation == Orientation::ByRow;
        let keep = &|list: usize, elem: usize| {
            if by_row {
                pred(list, elem)
            } else {
                pred(elem, list)
            }
        };

        let retained = Self::from_lists(self.num_lists(), self.num_ids, self.orientation, |list| {
            self.neighbors(list)
                .iter()
                .copied()
                .filter(move |&elem| keep(list, elem))
        })?;
        let removed = self.num_arcs() - retained.num_arcs();
        if removed != 0 {
            *self = retained;
        }
        Ok(removed)
    }
}

impl AdjacencyView for CsrGraph {
    #[inline(always)]
    fn num_rows(&self) -> usize {
        match self.orientation {
            Orientation::ByRow => self.dcf.len() - 1,
            Orientation::ByCol => self.num_ids,
        }
    }

    #[inline(always)]
    fn num_cols(&self) -> usize {
        match self.orientation {
            Orientation::ByRow => self.num_ids,
            Orientation::ByCol => self.dcf.len() - 1,
        }
    }

    #[inline(always)]
    fn num_arcs(&self) -> u64 {
        self.successors.len() as u64
    }

    #[inline(always)]
    fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline(always)]
    fn neighbors(&self, node: usize) -> &[usize] {
        &self.successors[self.dcf[node]..self.dcf[node + 1]]
    }
}
