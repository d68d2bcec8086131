/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::label_store::{Hook, LabelStore};
use super::sampling::{contract, most_frequent_label, sample_lists};
use super::FastSvParams;
use crate::graphs::CsrGraph;
use crate::traits::{AdjacencyView, VertexId};
use crate::transform::symmetrize;
use crate::utils::{scatter_min, ScatterMode};
use crate::{CcError, Components};
use dsi_progress_logger::ProgressLog;
use log::{debug, info};
use rayon::ThreadPool;

/// Connected components by FastSV with default [parameters](FastSvParams).
///
/// If `sanitize` is true, the components are computed on the symmetric
/// closure of `graph`. If `sanitize` is false, the caller guarantees that
/// `graph` is symmetric: this is not checked (see
/// [`check_symmetric`](crate::transform::check_symmetric)), and if it is not
/// the case the result is unspecified.
///
/// Returns [`CcError::DimensionMismatch`] if the matrix is not square,
/// [`CcError::TooManyNodes`] if the vertex ids do not fit `V`, and
/// [`CcError::OutOfMemory`] if an allocation fails.
pub fn fastsv<V: VertexId>(
    graph: &impl AdjacencyView,
    sanitize: bool,
    thread_pool: &ThreadPool,
    pl: &mut impl ProgressLog,
) -> Result<Components<V>, CcError> {
    fastsv_with_params(graph, sanitize, &FastSvParams::default(), thread_pool, pl)
}

/// Connected components by FastSV with the given parameters.
///
/// See [`fastsv`] for the meaning of `sanitize` and for errors; additionally,
/// returns [`CcError::IterationLimit`] if
/// [`max_iterations`](FastSvParams::max_iterations) is exceeded.
pub fn fastsv_with_params<V: VertexId>(
    graph: &impl AdjacencyView,
    sanitize: bool,
    params: &FastSvParams,
    thread_pool: &ThreadPool,
    pl: &mut impl ProgressLog,
) -> Result<Components<V>, CcError> {
    graph.check_square()?;
    V::check_ids(graph.num_nodes())?;

    if sanitize {
        let sym_graph = thread_pool.install(|| symmetrize(graph))?;
        run(&sym_graph, params, thread_pool, pl)
    } else {
        run(graph, params, thread_pool, pl)
    }
}

fn run<V: VertexId>(
    sym_graph: &impl AdjacencyView,
    params: &FastSvParams,
    thread_pool: &ThreadPool,
    pl: &mut impl ProgressLog,
) -> Result<Components<V>, CcError> {
    let num_nodes = sym_graph.num_nodes();
    info!(
        "Computing connected components of {} nodes and {} arcs with {} threads",
        num_nodes,
        sym_graph.num_arcs(),
        thread_pool.current_num_threads()
    );

    pl.item_name("iteration");
    pl.expected_updates(None);
    pl.start("Running FastSV...");

    let mut num_iterations = 0;
    let labels = if params.sampling.enabled(num_nodes, sym_graph.num_arcs()) {
        let sample = thread_pool.install(|| sample_lists(sym_graph))?;
        debug!("Sampled {} arcs", sample.num_arcs());
        let store = thread_pool.install(|| initial_store(&sample, params.warmup))?;
        let sampled = iterate(store, &sample, params, thread_pool, &mut num_iterations, pl)?;
        drop(sample);

        let contracted = match most_frequent_label(&sampled) {
            Some(key) => thread_pool.install(|| contract(sym_graph, &sampled, key))?,
            None => CsrGraph::empty(num_nodes),
        };
        debug!(
            "Sampling ended after {} iterations; {} arcs left",
            num_iterations,
            contracted.num_arcs()
        );
        // Sampled labels are in the component of their node, and not larger
        let store = thread_pool.install(|| LabelStore::new(num_nodes, |node| sampled[node]))?;
        drop(sampled);
        iterate(store, &contracted, params, thread_pool, &mut num_iterations, pl)?
    } else {
        let store = thread_pool.install(|| initial_store(sym_graph, params.warmup))?;
        iterate(store, sym_graph, params, thread_pool, &mut num_iterations, pl)?
    };

    pl.done();

    let components = Components::new(labels, num_iterations);
    info!(
        "Found {} connected components in {} iterations",
        components.num_components(),
        num_iterations
    );
    Ok(components)
}

fn initial_store<V: VertexId>(
    graph: &impl AdjacencyView,
    warmup: bool,
) -> Result<LabelStore<V>, CcError> {
    let num_nodes = graph.num_nodes();
    if warmup {
        // Sorted lists: the first neighbor is the smallest one
        LabelStore::new(num_nodes, |node| {
            V::from_usize(graph.neighbors(node).first().map_or(node, |&u| u.min(node)))
        })
    } else {
        LabelStore::new(num_nodes, V::from_usize)
    }
}

/// Iterates until grandparents stop changing, and returns the labels.
///
/// `num_iterations` is incremented at each iteration, and checked against
/// [`max_iterations`](FastSvParams::max_iterations).
fn iterate<V: VertexId>(
    mut store: LabelStore<V>,
    sym_graph: &impl AdjacencyView,
    params: &FastSvParams,
    thread_pool: &ThreadPool,
    num_iterations: &mut usize,
    pl: &mut impl ProgressLog,
) -> Result<Box<[V]>, CcError> {
    let num_threads = thread_pool.current_num_threads();
    loop {
        if let Some(max) = params.max_iterations {
            if *num_iterations >= max {
                return Err(CcError::IterationLimit { max });
            }
        }
        *num_iterations += 1;

        let mut mode = thread_pool.install(|| {
            hook(&mut store, sym_graph, Hook::Conditional, params.scatter, num_threads)
        });

        let changed = thread_pool.install(|| {
            if params.unconditional_hooking {
                mode = hook(&mut store, sym_graph, Hook::Unconditional, params.scatter, num_threads);
                store.shortcut();
            }
            store.grandparents();
            if params.unconditional_hooking {
                store.update_stars();
            }
            store.swap_grandparents()
        });

        debug!(
            "Iteration {}: {changed} grandparents changed (scatter mode: {mode:?})",
            *num_iterations
        );
        pl.update();

        if changed == 0 {
            return Ok(thread_pool.install(|| store.into_labels()));
        }
    }
}

/// Hooks trees on the smallest label found through a neighbor.
///
/// The minimum label among the neighbors of each node is scatter-reduced on
/// the parent of the node as it was before the phase, and then folded into
/// each parent together with the labels of the phase. Nodes whose neighbor
/// minimum is not smaller than their parent do not need to be filtered out:
/// since the parent of a node is never larger than the node, their writes
/// cannot lower anything.
fn hook<V: VertexId>(
    store: &mut LabelStore<V>,
    sym_graph: &impl AdjacencyView,
    phase: Hook,
    scatter: ScatterMode,
    num_threads: usize,
) -> ScatterMode {
    store.take_snapshot();
    if phase == Hook::Unconditional {
        store.grandchildren();
    }

    let (labels, mngp) = store.hook_candidates(phase);
    sym_graph.neighbor_min_reduce(labels, None, mngp);
    if phase == Hook::Unconditional {
        store.retain_stars();
    }

    let (values, targets, parent) = store.hook_targets();
    let mode = scatter_min(values, targets, parent, scatter, num_threads);
    store.fold(phase);
    mode
}
