/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::Propagation;
use crate::graphs::CsrGraph;
use crate::traits::{AdjacencyView, Orientation, VertexId};
use crate::utils::{
    scatter_min, try_alloc, try_alloc_with, try_with_capacity, ScatterMode, RAYON_MIN_LEN,
};
use crate::{CcError, Components};
use dsi_progress_logger::ProgressLog;
use log::{debug, info};
use rayon::prelude::*;
use rayon::ThreadPool;

/// Strongly connected components by bidirectional min-label propagation.
///
/// `graph` must provide the lists of a square adjacency matrix `A`, and
/// `transpose` those of `Aᵗ`, with the same [orientation](Orientation): with
/// row lists, `transpose` provides the predecessors of each node; with column
/// lists, the roles of the two views are exchanged. Both views are copied, as
/// arcs are pruned during the computation.
///
/// First, nodes without successors or without predecessors are assigned to
/// a component by themselves, and their arcs are removed. Then, each round:
///
/// 1. propagates forward, along arcs, the minimum unassigned node reaching
///    each node (the _forward label_);
/// 2. propagates backward, against arcs, the minimum _root_ (a node whose
///    forward label is itself) reachable from each node (the _backward
///    label_);
/// 3. assigns each node whose two labels coincide to the component of that
///    label;
/// 4. removes arcs touching assigned nodes and arcs whose endpoints disagree
///    on one of the two labels, as they cannot be inside a component.
///
/// The computation stops when no arcs remain, and unassigned nodes become
/// components by themselves.
///
/// Returns [`CcError::DimensionMismatch`] if a view is not square,
/// [`CcError::InconsistentViews`] if the number of nodes or arcs of the views
/// differ, [`CcError::InconsistentOrientation`] if their orientations differ,
/// [`CcError::TooManyNodes`] if the number of nodes is larger than the
/// maximum value of `V`, and [`CcError::OutOfMemory`] if an allocation fails.
pub fn min_label<V: VertexId>(
    graph: &impl AdjacencyView,
    transpose: &impl AdjacencyView,
    propagation: Propagation,
    thread_pool: &ThreadPool,
    pl: &mut impl ProgressLog,
) -> Result<Components<V>, CcError> {
    graph.check_square()?;
    transpose.check_square()?;
    if graph.num_nodes() != transpose.num_nodes() || graph.num_arcs() != transpose.num_arcs() {
        return Err(CcError::InconsistentViews {
            forward_nodes: graph.num_nodes(),
            forward_arcs: graph.num_arcs(),
            backward_nodes: transpose.num_nodes(),
            backward_arcs: transpose.num_arcs(),
        });
    }
    if graph.orientation() != transpose.orientation() {
        return Err(CcError::InconsistentOrientation {
            forward: graph.orientation(),
            backward: transpose.orientation(),
        });
    }
    let num_nodes = graph.num_nodes();
    // The number of nodes is used as a sentinel
    if num_nodes > V::MAX_USIZE {
        return Err(CcError::TooManyNodes {
            num_nodes,
            max: V::MAX_USIZE,
        });
    }

    info!(
        "Computing strongly connected components of {} nodes and {} arcs with {} threads",
        num_nodes,
        graph.num_arcs(),
        thread_pool.current_num_threads()
    );

    let mut state = thread_pool.install(|| State::new(graph, transpose, propagation, thread_pool))?;

    pl.item_name("round");
    pl.expected_updates(None);
    pl.start("Computing strongly connected components...");

    let mut num_rounds = 0;
    while state.succ.num_arcs() > 0 {
        num_rounds += 1;
        let stats = thread_pool.install(|| state.round())?;
        debug!(
            "Round {}: {} forward steps, {} backward steps, {} nodes assigned, {} arcs pruned, {} arcs left",
            num_rounds,
            stats.forward_steps,
            stats.backward_steps,
            stats.assigned,
            stats.pruned,
            state.succ.num_arcs()
        );
        pl.update();
    }

    pl.done();

    let components = Components::new(thread_pool.install(|| state.into_labels()), num_rounds);
    info!(
        "Found {} strongly connected components in {} rounds",
        components.num_components(),
        num_rounds
    );
    Ok(components)
}

#[derive(Debug, Default)]
struct RoundStats {
    forward_steps: usize,
    backward_steps: usize,
    assigned: usize,
    pruned: u64,
}

struct State<V: VertexId> {
    /// Successor lists of the remaining arcs.
    succ: CsrGraph,
    /// Predecessor lists of the remaining arcs.
    pred: CsrGraph,
    propagation: Propagation,
    num_threads: usize,
    /// Component labels; unassigned nodes have the sentinel.
    scc: Box<[V]>,
    forward: Box<[V]>,
    backward: Box<[V]>,
    next: Box<[V::Atomic]>,
    active: Box<[bool]>,
    assigned: Box<[bool]>,
    sentinel: V,
}

impl<V: VertexId> State<V> {
    fn new(
        graph: &impl AdjacencyView,
        transpose: &impl AdjacencyView,
        propagation: Propagation,
        thread_pool: &ThreadPool,
    ) -> Result<Self, CcError> {
        let num_nodes = graph.num_nodes();
        let (succ, pred) = match graph.orientation() {
            Orientation::ByRow => (CsrGraph::from_view(graph)?, CsrGraph::from_view(transpose)?),
            Orientation::ByCol => (CsrGraph::from_view(transpose)?, CsrGraph::from_view(graph)?),
        };
        // Both represent A
        let mut succ = succ.with_orientation(Orientation::ByRow);
        let mut pred = pred.with_orientation(Orientation::ByCol);

        let sentinel = V::from_usize(num_nodes);
        let scc = try_alloc_with(num_nodes, |node| {
            if succ.degree(node) == 0 || pred.degree(node) == 0 {
                V::from_usize(node)
            } else {
                sentinel
            }
        })?
        .into_boxed_slice();

        let trim = |src: usize, dst: usize| scc[src] == scc[dst];
        let pruned = succ.retain_arcs(trim)?;
        pred.retain_arcs(trim)?;
        debug!(
            "{} trivial components, {} arcs pruned",
            scc.iter().filter(|&&label| label != sentinel).count(),
            pruned
        );

        Ok(Self {
            succ,
            pred,
            propagation,
            num_threads: thread_pool.current_num_threads(),
            scc,
            forward: try_alloc(num_nodes, sentinel)?.into_boxed_slice(),
            backward: try_alloc(num_nodes, sentinel)?.into_boxed_slice(),
            next: try_alloc_with(num_nodes, |_| V::new_atomic(sentinel))?.into_boxed_slice(),
            active: try_alloc(num_nodes, false)?.into_boxed_slice(),
            assigned: try_alloc(num_nodes, false)?.into_boxed_slice(),
            sentinel,
        })
    }

    fn round(&mut self) -> Result<RoundStats, CcError> {
        let mut stats = RoundStats::default();
        let sentinel = self.sentinel;
        let scc = &self.scc;

        // Forward labels, starting from all unassigned nodes
        self.forward
            .par_iter_mut()
            .with_min_len(RAYON_MIN_LEN)
            .zip(self.active.par_iter_mut())
            .enumerate()
            .for_each(|(node, (f, a))| {
                *f = V::from_usize(node);
                *a = scc[node] == sentinel;
            });
        stats.forward_steps = propagate(
            &mut self.forward,
            &mut self.active,
            &mut self.next,
            &self.pred,
            &self.succ,
            self.propagation,
            self.num_threads,
        )?;

        // Backward labels, starting from roots
        let forward = &self.forward;
        self.backward
            .par_iter_mut()
            .with_min_len(RAYON_MIN_LEN)
            .zip(self.active.par_iter_mut())
            .enumerate()
            .for_each(|(node, (b, a))| {
                *a = scc[node] == sentinel && forward[node].to_usize() == node;
                *b = if *a { forward[node] } else { sentinel };
            });
        stats.backward_steps = propagate(
            &mut self.backward,
            &mut self.active,
            &mut self.next,
            &self.succ,
            &self.pred,
            self.propagation,
            self.num_threads,
        )?;

        let forward = &self.forward;
        let backward = &self.backward;
        stats.assigned = self
            .scc
            .par_iter_mut()
            .with_min_len(RAYON_MIN_LEN)
            .zip(self.assigned.par_iter_mut())
            .enumerate()
            .map(|(node, (label, assigned))| {
                *assigned = *label == sentinel && forward[node] == backward[node];
                if *assigned {
                    *label = forward[node];
                }
                *assigned as usize
            })
            .sum();

        let assigned = &self.assigned;
        let keep = |src: usize, dst: usize| {
            !assigned[src]
                && !assigned[dst]
                && forward[src] == forward[dst]
                && backward[src] == backward[dst]
        };
        stats.pruned = self.succ.retain_arcs(keep)?;
        self.pred.retain_arcs(keep)?;

        Ok(stats)
    }

    /// Returns the component labels, making unassigned nodes components by
    /// themselves.
    fn into_labels(mut self) -> Box<[V]> {
        let sentinel = self.sentinel;
        self.scc
            .par_iter_mut()
            .with_min_len(RAYON_MIN_LEN)
            .enumerate()
            .for_each(|(node, label)| {
                if *label == sentinel {
                    *label = V::from_usize(node);
                }
            });
        self.scc
    }
}

/// Propagates labels until they stabilize, and returns the number of steps.
///
/// On entry, `active` marks the nodes whose labels must be propagated. A
/// label travels from a node `u` to a node `w` if `u` is in the list of `w`
/// in `pull_view` or, equivalently, if `w` is in the list of `u` in
/// `push_view`. Push steps buffer one pair per arc leaving an active node,
/// and return [`CcError::OutOfMemory`] if the buffers cannot be allocated.
fn propagate<V: VertexId>(
    labels: &mut [V],
    active: &mut [bool],
    next: &mut [V::Atomic],
    pull_view: &CsrGraph,
    push_view: &CsrGraph,
    propagation: Propagation,
    num_threads: usize,
) -> Result<usize, CcError> {
    let num_nodes = labels.len();
    let mut steps = 0;
    loop {
        let num_active = active
            .par_iter()
            .with_min_len(RAYON_MIN_LEN)
            .filter(|&&a| a)
            .count();
        if num_active == 0 {
            return Ok(steps);
        }
        steps += 1;

        V::get_mut_slice(next)
            .par_iter_mut()
            .with_min_len(RAYON_MIN_LEN)
            .zip(labels.par_iter())
            .for_each(|(n, &l)| *n = l);

        let push = match propagation {
            Propagation::Pull => false,
            Propagation::Push => true,
            Propagation::Adaptive => num_active < num_nodes / 16,
        };

        if push {
            let labels = &*labels;
            let active = &*active;
            let num_pairs: usize = (0..num_nodes)
                .into_par_iter()
                .with_min_len(RAYON_MIN_LEN)
                .filter(|&node| active[node])
                .map(|node| push_view.degree(node))
                .sum();
            let mut pairs = (
                try_with_capacity::<V>(num_pairs)?,
                try_with_capacity::<usize>(num_pairs)?,
            );
            pairs.par_extend(
                (0..num_nodes)
                    .into_par_iter()
                    .filter(|&node| active[node])
                    .flat_map_iter(|node| {
                        push_view
                            .neighbors(node)
                            .iter()
                            .map(move |&succ| (labels[node], succ))
                    }),
            );
            let (values, targets) = pairs;
            scatter_min(&values, &targets, next, ScatterMode::Auto, num_threads);
        } else {
            pull_view.neighbor_min_reduce(labels, Some(&*active), V::get_mut_slice(next));
        }

        labels
            .par_iter_mut()
            .with_min_len(RAYON_MIN_LEN)
            .zip(V::get_mut_slice(next).par_iter())
            .zip(active.par_iter_mut())
            .for_each(|((l, &n), a)| {
                *a = n < *l;
                *l = n;
            });
    }
}
