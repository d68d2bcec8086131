/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

mod common;

use anyhow::Result;
use common::*;
use dsi_progress_logger::prelude::*;
use fastsv::prelude::*;
use fastsv::thread_pool;

fn graph_and_transpose(
    num_nodes: usize,
    arcs: impl IntoIterator<Item = (usize, usize)>,
) -> Result<(CsrGraph, CsrGraph)> {
    let graph = CsrGraph::from_arcs(num_nodes, arcs)?;
    let transpose = transform::transpose(&graph)?;
    Ok((graph, transpose))
}

macro_rules! test_scc_algo {
    ($propagation:expr, $name:ident) => {
        mod $name {
            use super::*;

            #[test]
            fn test_buckets() -> Result<()> {
                let arcs = [
                    (0, 0),
                    (1, 0),
                    (1, 2),
                    (2, 1),
                    (2, 3),
                    (2, 4),
                    (2, 5),
                    (3, 4),
                    (4, 3),
                    (5, 5),
                    (5, 6),
                    (5, 7),
                    (5, 8),
                    (6, 7),
                    (8, 7),
                ];
                let (graph, transpose) = graph_and_transpose(9, arcs)?;

                let components = sccs::min_label::<u32>(
                    &graph,
                    &transpose,
                    $propagation,
                    &thread_pool![],
                    no_logging![],
                )?;

                assert_eq!(components.labels(), &[0, 1, 1, 3, 3, 5, 6, 7, 8]);
                assert!(components.same_component(3, 4));
                assert_eq!(&*components.compute_sizes(), &[1, 2, 2, 1, 1, 1, 1]);

                Ok(())
            }

            #[test]
            fn test_buckets_2() -> Result<()> {
                let (graph, transpose) = graph_and_transpose(4, [(0, 1), (1, 2), (2, 0), (1, 3)])?;

                let components = sccs::min_label::<u64>(
                    &graph,
                    &transpose,
                    $propagation,
                    &thread_pool![],
                    no_logging![],
                )?;

                assert_eq!(&*components.compute_sizes(), &[3, 1]);

                Ok(())
            }

            #[test]
            fn test_cycle() -> Result<()> {
                let (graph, transpose) = graph_and_transpose(4, [(0, 1), (1, 2), (2, 3), (3, 0)])?;

                let components = sccs::min_label::<usize>(
                    &graph,
                    &transpose,
                    $propagation,
                    &thread_pool![],
                    no_logging![],
                )?;

                assert_eq!(&*components.compute_sizes(), &[4]);
                assert_eq!(components.num_iterations(), 1);

                Ok(())
            }

            #[test]
            fn test_complete_graph() -> Result<()> {
                let mut arcs = vec![];
                for i in 0..5 {
                    for j in 0..5 {
                        if i != j {
                            arcs.push((i, j));
                        }
                    }
                }
                let (graph, transpose) = graph_and_transpose(5, arcs)?;

                let components = sccs::min_label::<u32>(
                    &graph,
                    &transpose,
                    $propagation,
                    &thread_pool![],
                    no_logging![],
                )?;

                assert_eq!(components.labels(), &[0; 5]);

                Ok(())
            }

            #[test]
            fn test_no_arcs() -> Result<()> {
                let graph = CsrGraph::empty(4);
                let components = sccs::min_label::<u32>(
                    &graph,
                    &graph,
                    $propagation,
                    &thread_pool![],
                    no_logging![],
                )?;

                assert_eq!(components.labels(), &[0, 1, 2, 3]);
                assert_eq!(components.num_iterations(), 0);

                let graph = CsrGraph::empty(0);
                let components = sccs::min_label::<u32>(
                    &graph,
                    &graph,
                    $propagation,
                    &thread_pool![],
                    no_logging![],
                )?;
                assert!(components.labels().is_empty());

                Ok(())
            }

            #[test]
            fn test_loops_and_dag() -> Result<()> {
                // A chain of loops: every node is a component by itself
                let (graph, transpose) =
                    graph_and_transpose(4, [(0, 0), (0, 1), (1, 1), (1, 2), (2, 2), (3, 3)])?;

                let components = sccs::min_label::<u32>(
                    &graph,
                    &transpose,
                    $propagation,
                    &thread_pool![],
                    no_logging![],
                )?;

                assert_eq!(components.labels(), &[0, 1, 2, 3]);
                assert_eq!(components.num_components(), 4);

                Ok(())
            }

            #[test]
            fn test_nested_cycles() -> Result<()> {
                // The minimum node reaches a cycle that cannot reach it back
                let (graph, transpose) = graph_and_transpose(
                    7,
                    [(0, 4), (4, 5), (5, 4), (5, 6), (6, 1), (1, 2), (2, 3), (3, 1)],
                )?;

                let components = sccs::min_label::<u32>(
                    &graph,
                    &transpose,
                    $propagation,
                    &thread_pool![],
                    no_logging![],
                )?;

                assert_eq!(components.labels(), &[0, 1, 1, 1, 4, 4, 6]);

                Ok(())
            }

            #[test]
            fn test_er() -> Result<()> {
                for n in (10..=100).step_by(10) {
                    for d in 1..10 {
                        let graph = ErdosRenyi::new(n, (d as f64) / n as f64, d as u64).to_csr()?;
                        let transpose = transform::transpose(&graph)?;
                        let expected = tarjan(&graph);

                        let components = sccs::min_label::<u32>(
                            &graph,
                            &transpose,
                            $propagation,
                            &thread_pool![4],
                            no_logging![],
                        )?;

                        assert_eq!(to_usize(&components), expected, "n = {n}, d = {d}");
                    }
                }
                Ok(())
            }

            #[test]
            fn test_by_col() -> Result<()> {
                let graph = ErdosRenyi::new(300, 0.008, 0).to_csr()?;
                let transpose = transform::transpose(&graph)?;
                let expected = tarjan(&graph);

                // The columns of a matrix are the rows of its transpose
                let graph_by_col = transpose.clone().with_orientation(Orientation::ByCol);
                let transpose_by_col = graph.with_orientation(Orientation::ByCol);

                let components = sccs::min_label::<u32>(
                    &graph_by_col,
                    &transpose_by_col,
                    $propagation,
                    &thread_pool![],
                    no_logging![],
                )?;

                assert_eq!(to_usize(&components), expected);

                Ok(())
            }

            #[test]
            fn test_thread_counts() -> Result<()> {
                let graph = ErdosRenyi::new(1000, 0.0015, 7).to_csr()?;
                let transpose = transform::transpose(&graph)?;
                let first = sccs::min_label::<u32>(
                    &graph,
                    &transpose,
                    $propagation,
                    &thread_pool![1],
                    no_logging![],
                )?;

                for num_threads in [2, 4, 8] {
                    let components = sccs::min_label::<u32>(
                        &graph,
                        &transpose,
                        $propagation,
                        &thread_pool![num_threads],
                        no_logging![],
                    )?;
                    assert_eq!(components, first);
                }

                Ok(())
            }
        }
    };
}

test_scc_algo!(Propagation::Pull, pull);
test_scc_algo!(Propagation::Push, push);
test_scc_algo!(Propagation::Adaptive, adaptive);

#[test]
fn test_propagations_agree() -> Result<()> {
    init_logging();
    let graph = ErdosRenyi::new(2000, 0.0008, 5).to_csr()?;
    let transpose = transform::transpose(&graph)?;

    let mut pl = progress_logger![];
    let pull = sccs::min_label::<u32>(
        &graph,
        &transpose,
        Propagation::Pull,
        &thread_pool![4],
        &mut pl,
    )?;

    for propagation in [Propagation::Push, Propagation::Adaptive] {
        let components =
            sccs::min_label::<u32>(&graph, &transpose, propagation, &thread_pool![4], no_logging![])?;
        assert_eq!(components.labels(), pull.labels());
        assert_eq!(components.num_iterations(), pull.num_iterations());
    }

    Ok(())
}

#[test]
fn test_inconsistent_orientation() -> Result<()> {
    let (graph, transpose) = graph_and_transpose(3, [(0, 1), (1, 2)])?;
    let transpose = transpose.with_orientation(Orientation::ByCol);

    assert_eq!(
        sccs::min_label::<u32>(
            &graph,
            &transpose,
            Propagation::default(),
            &thread_pool![],
            no_logging![],
        ),
        Err(CcError::InconsistentOrientation {
            forward: Orientation::ByRow,
            backward: Orientation::ByCol,
        })
    );

    Ok(())
}

#[test]
fn test_inconsistent_views() -> Result<()> {
    let graph = CsrGraph::from_arcs(3, [(0, 1), (1, 2)])?;

    let err = sccs::min_label::<u32>(
        &graph,
        &CsrGraph::empty(3),
        Propagation::default(),
        &thread_pool![],
        no_logging![],
    )
    .unwrap_err();
    assert_eq!(
        err,
        CcError::InconsistentViews {
            forward_nodes: 3,
            forward_arcs: 2,
            backward_nodes: 3,
            backward_arcs: 0,
        }
    );

    let err = sccs::min_label::<u32>(
        &graph,
        &CsrGraph::empty(4),
        Propagation::default(),
        &thread_pool![],
        no_logging![],
    )
    .unwrap_err();
    assert!(matches!(err, CcError::InconsistentViews { .. }));

    Ok(())
}

#[test]
fn test_not_square() -> Result<()> {
    let graph = CsrGraph::from_matrix_arcs(2, 3, [(0, 2), (1, 0)])?;
    let transpose = transform::transpose(&graph)?;

    let err = sccs::min_label::<u32>(
        &graph,
        &transpose,
        Propagation::default(),
        &thread_pool![],
        no_logging![],
    )
    .unwrap_err();
    assert_eq!(err, CcError::DimensionMismatch { rows: 2, cols: 3 });
    assert!(err.is_invalid_input());

    Ok(())
}

#[cfg(target_pointer_width = "64")]
#[test]
fn test_too_many_nodes() -> Result<()> {
    // The number of nodes itself must fit, as it is used as a sentinel
    let view = Huge(1 << 32);
    let err = sccs::min_label::<u32>(
        &view,
        &view,
        Propagation::default(),
        &thread_pool![],
        no_logging![],
    )
    .unwrap_err();
    assert_eq!(
        err,
        CcError::TooManyNodes {
            num_nodes: 1 << 32,
            max: u32::MAX as usize,
        }
    );

    Ok(())
}

#[cfg_attr(feature = "slow_tests", test)]
#[cfg_attr(not(feature = "slow_tests"), allow(dead_code))]
fn test_large_er() -> Result<()> {
    init_logging();
    let n = 20_000;
    let graph = ErdosRenyi::new(n, 1.5 / n as f64, 0).to_csr()?;
    let transpose = transform::transpose(&graph)?;
    let expected = tarjan(&graph);

    let components = sccs::min_label::<u32>(
        &graph,
        &transpose,
        Propagation::Adaptive,
        &thread_pool![8],
        &mut progress_logger![],
    )?;

    assert_eq!(to_usize(&components), expected);
    Ok(())
}
