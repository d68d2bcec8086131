/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use fastsv::prelude::*;
use fastsv::thread_pool;
use fastsv::utils::{par_scatter_min, scatter_min, scatter_min_seq};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Random pairs whose targets are drawn from a small range, so that most
/// targets repeat many times.
fn random_pairs<V: VertexId>(
    num_pairs: usize,
    store_len: usize,
    seed: u64,
) -> (Vec<V>, Vec<usize>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let values = (0..num_pairs)
        .map(|_| V::from_usize(rng.random_range(0..1_000_000)))
        .collect();
    let targets = (0..num_pairs)
        .map(|_| rng.random_range(0..store_len))
        .collect();
    (values, targets)
}

fn initial_store<V: VertexId>(store_len: usize) -> Vec<V> {
    (0..store_len).map(|i| V::from_usize(500_000 + i)).collect()
}

fn check_seq_vs_atomic<V: VertexId>() -> Result<()> {
    for (num_pairs, store_len) in [(0, 10), (1, 1), (1000, 3), (100_000, 100), (300_000, 50_000)] {
        let (values, targets) = random_pairs::<V>(num_pairs, store_len, num_pairs as u64);

        let mut expected = initial_store::<V>(store_len);
        scatter_min_seq(&values, &targets, &mut expected);

        for num_threads in [1, 2, 4, 8] {
            let mut store: Vec<V::Atomic> = initial_store::<V>(store_len)
                .into_iter()
                .map(V::new_atomic)
                .collect();
            thread_pool![num_threads].install(|| par_scatter_min(&values, &targets, &store));
            assert_eq!(
                V::get_mut_slice(&mut store),
                expected.as_slice(),
                "{num_pairs} pairs, {store_len} targets, {num_threads} threads"
            );
        }
    }
    Ok(())
}

#[test]
fn test_seq_vs_atomic() -> Result<()> {
    check_seq_vs_atomic::<u32>()?;
    check_seq_vs_atomic::<u64>()?;
    check_seq_vs_atomic::<usize>()
}

#[test]
fn test_reference() -> Result<()> {
    let (values, targets) = random_pairs::<u32>(10_000, 37, 0);
    let mut store = initial_store::<u32>(37);
    scatter_min_seq(&values, &targets, &mut store);

    for (i, &s) in store.iter().enumerate() {
        let min = values
            .iter()
            .zip(&targets)
            .filter(|&(_, &t)| t == i)
            .map(|(&v, _)| v)
            .min()
            .unwrap_or(u32::MAX);
        assert_eq!(s, min.min(500_000 + i as u32));
    }
    Ok(())
}

#[test]
fn test_modes() -> Result<()> {
    let (values, targets) = random_pairs::<u64>(50_000, 1000, 1);
    let mut expected = initial_store::<u64>(1000);
    scatter_min_seq(&values, &targets, &mut expected);

    let thread_pool = thread_pool![4];
    for (mode, used) in [
        (ScatterMode::Auto, ScatterMode::Sequential),
        (ScatterMode::Sequential, ScatterMode::Sequential),
        (ScatterMode::Atomic, ScatterMode::Atomic),
    ] {
        let mut store: Vec<_> = initial_store::<u64>(1000)
            .into_iter()
            .map(u64::new_atomic)
            .collect();
        let actual = thread_pool.install(|| {
            scatter_min(
                &values,
                &targets,
                &mut store,
                mode,
                thread_pool.current_num_threads(),
            )
        });
        assert_eq!(actual, used);
        assert_eq!(u64::get_mut_slice(&mut store), expected.as_slice());
    }
    Ok(())
}

#[test]
fn test_vertex_targets() -> Result<()> {
    // Targets may be vertex ids of any width
    let values = [9_u32, 2, 7, 2, 0];
    let targets = [3_u32, 1, 3, 3, 0];
    let mut store: Vec<_> = [5_u32, 5, 5, 5].into_iter().map(u32::new_atomic).collect();
    scatter_min(&values, &targets, &mut store, ScatterMode::Atomic, 2);
    assert_eq!(u32::get_mut_slice(&mut store), &[0, 2, 5, 2]);
    Ok(())
}

#[test]
#[should_panic]
fn test_length_mismatch() {
    let mut store = [0_u64; 4];
    scatter_min_seq(&[1_u64, 2], &[0_usize], &mut store);
}
