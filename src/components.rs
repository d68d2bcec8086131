/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::VertexId;

/// Connected or strongly connected components.
///
/// An instance of this structure stores the [label](Components::labels) of
/// each node, which is the minimum id of a node in its component. In
/// particular, the roots of the components (the nodes whose label is their
/// own id) are the minimum nodes of the components, and two nodes are in the
/// same component if and only if they have the same label.
///
/// If you need labels in a contiguous range, use
/// [`dense`](Components::dense).
///
/// Instances are only built by the algorithms of this crate, which
/// guarantee the properties above:
/// ```compile_fail
/// use fastsv::Components;
///
/// let components = Components::<u32>::new(vec![1, 0].into_boxed_slice(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Components<V> {
    labels: Box<[V]>,
    num_iterations: usize,
}

impl<V: VertexId> Components<V> {
    /// Wraps the labels computed by an algorithm.
    ///
    /// The label of each node must be its minimum node, so that roots are
    /// exactly the nodes labelled with themselves: [`dense`](Self::dense)
    /// and [`compute_sizes`](Self::compute_sizes) index by root.
    pub(crate) fn new(labels: Box<[V]>, num_iterations: usize) -> Self {
        debug_assert!(is_canonical(&labels));
        Self {
            labels,
            num_iterations,
        }
    }

    /// Returns the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }

    /// Returns a slice containing, for each node, the minimum node of its
    /// component.
    #[inline(always)]
    pub fn labels(&self) -> &[V] {
        &self.labels
    }

    pub fn into_labels(self) -> Box<[V]> {
        self.labels
    }

    /// Returns the number of iterations (or rounds) performed by the
    /// algorithm that computed the components.
    pub fn num_iterations(&self) -> usize {
        self.num_iterations
    }

    /// Returns the number of components.
    pub fn num_components(&self) -> usize {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(node, &label)| label.to_usize() == node)
            .count()
    }

    /// Returns whether two nodes are in the same component.
    #[inline(always)]
    pub fn same_component(&self, x: usize, y: usize) -> bool {
        self.labels[x] == self.labels[y]
    }

    /// Returns, for each node, the index of its component, where components
    /// are numbered from zero in increasing order of their minimum node.
    pub fn dense(&self) -> Box<[usize]> {
        let mut index = vec![usize::MAX; self.labels.len()];
        let mut num_components = 0;
        for (node, &label) in self.labels.iter().enumerate() {
            if label.to_usize() == node {
                index[node] = num_components;
                num_components += 1;
            }
        }
        self.labels
            .iter()
            .map(|&label| index[label.to_usize()])
            .collect()
    }

    /// Returns the sizes of all components, indexed as in
    /// [`dense`](Components::dense).
    pub fn compute_sizes(&self) -> Box<[usize]> {
        let mut sizes = vec![0; self.num_components()];
        for component in self.dense().iter() {
            sizes[*component] += 1;
        }
        sizes.into_boxed_slice()
    }
}

/// Returns whether every label is a node not larger than the labelled
/// node and labelled with itself.
fn is_canonical<V: VertexId>(labels: &[V]) -> bool {
    labels.iter().enumerate().all(|(node, &label)| {
        let label = label.to_usize();
        label <= node && labels[label].to_usize() == label
    })
}
