/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![allow(dead_code)]

//! Sequential reference implementations and shared helpers.

use fastsv::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// Returns the labels of a [`Components`] as `usize`.
pub fn to_usize<V: VertexId>(components: &Components<V>) -> Vec<usize> {
    components.labels().iter().map(|l| l.to_usize()).collect()
}

fn find(parent: &mut [usize], mut x: usize) -> usize {
    while parent[x] != x {
        parent[x] = parent[parent[x]];
        x = parent[x];
    }
    x
}

/// Connected components by union-find: every node is labelled with the
/// minimum node of its component.
pub fn union_find(num_nodes: usize, arcs: impl IntoIterator<Item = (usize, usize)>) -> Vec<usize> {
    let mut parent: Vec<usize> = (0..num_nodes).collect();
    for (src, dst) in arcs {
        let (a, b) = (find(&mut parent, src), find(&mut parent, dst));
        // The root is always the minimum of its tree
        if a != b {
            parent[a.max(b)] = a.min(b);
        }
    }
    (0..num_nodes).map(|x| find(&mut parent, x)).collect()
}

/// Returns all arcs of a graph, in matrix coordinates.
pub fn arcs(graph: &impl AdjacencyView) -> Vec<(usize, usize)> {
    let by_row = graph.orientation() == Orientation::ByRow;
    (0..graph.num_lists())
        .flat_map(|list| {
            graph
                .neighbors(list)
                .iter()
                .map(move |&elem| if by_row { (list, elem) } else { (elem, list) })
        })
        .collect()
}

/// Strongly connected components by an iterative version of Tarjan's
/// algorithm on a graph stored by rows: every node is labelled with the
/// minimum node of its component.
pub fn tarjan(graph: &CsrGraph) -> Vec<usize> {
    assert_eq!(graph.orientation(), Orientation::ByRow);
    const UNVISITED: usize = usize::MAX;
    let num_nodes = graph.num_nodes();
    let mut index = vec![UNVISITED; num_nodes];
    let mut low = vec![0; num_nodes];
    let mut on_stack = vec![false; num_nodes];
    let mut stack = vec![];
    let mut labels = vec![0; num_nodes];
    let mut counter = 0;
    let mut call_stack: Vec<(usize, usize)> = vec![];

    for root in 0..num_nodes {
        if index[root] != UNVISITED {
            continue;
        }
        index[root] = counter;
        low[root] = counter;
        counter += 1;
        stack.push(root);
        on_stack[root] = true;
        call_stack.push((root, 0));

        while let Some((node, pos)) = call_stack.last_mut() {
            let node = *node;
            let succs = graph.neighbors(node);
            if *pos < succs.len() {
                let succ = succs[*pos];
                *pos += 1;
                if index[succ] == UNVISITED {
                    index[succ] = counter;
                    low[succ] = counter;
                    counter += 1;
                    stack.push(succ);
                    on_stack[succ] = true;
                    call_stack.push((succ, 0));
                } else if on_stack[succ] {
                    low[node] = low[node].min(index[succ]);
                }
            } else {
                call_stack.pop();
                if let Some(&(parent, _)) = call_stack.last() {
                    low[parent] = low[parent].min(low[node]);
                }
                if low[node] == index[node] {
                    let mut members = vec![];
                    loop {
                        let member = stack.pop().unwrap();
                        on_stack[member] = false;
                        members.push(member);
                        if member == node {
                            break;
                        }
                    }
                    let min = *members.iter().min().unwrap();
                    for member in members {
                        labels[member] = min;
                    }
                }
            }
        }
    }
    labels
}

/// Returns a path on `n` nodes, numbered randomly.
pub fn shuffled_path(n: usize, seed: u64) -> anyhow::Result<CsrGraph> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(&mut SmallRng::seed_from_u64(seed));
    Ok(CsrGraph::from_arcs(
        n,
        perm.windows(2)
            .flat_map(|w| [(w[0], w[1]), (w[1], w[0])]),
    )?)
}

/// An adjacency view with many nodes and no arcs, requiring no memory.
pub struct Huge(pub usize);

impl AdjacencyView for Huge {
    fn num_rows(&self) -> usize {
        self.0
    }

    fn num_cols(&self) -> usize {
        self.0
    }

    fn num_arcs(&self) -> u64 {
        0
    }

    fn orientation(&self) -> Orientation {
        Orientation::ByRow
    }

    fn neighbors(&self, _node: usize) -> &[usize] {
        &[]
    }
}
