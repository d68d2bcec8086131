/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Scatter-reduce by minimum.
//!
//! Given a vector of values, a vector of target indices of the same length
//! and a store, these functions execute
//! `store[targets[i]] = min(store[targets[i]], values[i])` for all `i`.
//! Targets may repeat: the final value of an entry of the store is always the
//! minimum over the store's previous value and all values targeting it.
//!
//! There is a [sequential](scatter_min_seq) and a [parallel](par_scatter_min)
//! implementation, the latter using a compare-and-swap retry loop on each
//! write. They give identical results; [`scatter_min`] chooses between them
//! using a [`ScatterMode`].

use super::RAYON_MIN_LEN;
use crate::traits::VertexId;
use rayon::prelude::*;

/// Number of pairs per thread below which an additional thread does not pay
/// off in [`ScatterMode::Auto`], as a power of two.
pub const LOG2_PAIRS_PER_THREAD: u32 = 20;

/// Minimum number of useful threads for which [`ScatterMode::Auto`] selects
/// the atomic implementation.
pub const MIN_ATOMIC_THREADS: usize = 4;

/// How [`scatter_min`] performs its writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScatterMode {
    /// Choose depending on the number of pairs and of available threads.
    #[default]
    Auto,
    /// Use [`scatter_min_seq`].
    Sequential,
    /// Use [`par_scatter_min`].
    Atomic,
}

impl ScatterMode {
    /// Resolves [`Auto`](ScatterMode::Auto) into one of the two concrete
    /// modes.
    ///
    /// With `num_pairs` pairs, the number of useful threads is
    /// `num_pairs / 2^LOG2_PAIRS_PER_THREAD`, clamped between one and
    /// `num_threads`; the atomic implementation is used if this number is at
    /// least [`MIN_ATOMIC_THREADS`]. The other modes are returned unchanged.
    pub fn resolve(self, num_pairs: usize, num_threads: usize) -> Self {
        match self {
            ScatterMode::Auto => {
                let useful = (num_pairs >> LOG2_PAIRS_PER_THREAD).clamp(1, num_threads.max(1));
                if useful >= MIN_ATOMIC_THREADS {
                    ScatterMode::Atomic
                } else {
                    ScatterMode::Sequential
                }
            }
            mode => mode,
        }
    }
}

/// Sequential scatter-reduce by minimum.
///
/// # Panics
///
/// If `values` and `targets` have different lengths or a target is out of
/// bounds.
pub fn scatter_min_seq<V: VertexId, T: VertexId>(values: &[V], targets: &[T], store: &mut [V]) {
    assert_eq!(values.len(), targets.len());
    for (&value, &target) in values.iter().zip(targets) {
        let slot = &mut store[target.to_usize()];
        if value < *slot {
            *slot = value;
        }
    }
}

/// Parallel scatter-reduce by minimum.
///
/// Pairs are split among the threads of the current Rayon thread pool, and
/// every write is a [compare-and-swap loop](VertexId::atomic_min).
///
/// # Panics
///
/// If `values` and `targets` have different lengths or a target is out of
/// bounds.
pub fn par_scatter_min<V: VertexId, T: VertexId>(values: &[V], targets: &[T], store: &[V::Atomic]) {
    assert_eq!(values.len(), targets.len());
    values
        .par_iter()
        .zip(targets)
        .with_min_len(RAYON_MIN_LEN)
        .for_each(|(&value, &target)| {
            V::atomic_min(&store[target.to_usize()], value);
        });
}

/// Scatter-reduce by minimum using the implementation selected by `mode`.
///
/// `num_threads` is the number of threads of the current Rayon thread pool,
/// which is used to [resolve](ScatterMode::resolve) `mode`. Returns the
/// implementation that was used.
///
/// # Panics
///
/// If `values` and `targets` have different lengths or a target is out of
/// bounds.
pub fn scatter_min<V: VertexId, T: VertexId>(
    values: &[V],
    targets: &[T],
    store: &mut [V::Atomic],
    mode: ScatterMode,
    num_threads: usize,
) -> ScatterMode {
    let mode = mode.resolve(values.len(), num_threads);
    match mode {
        ScatterMode::Atomic => par_scatter_min(values, targets, store),
        _ => scatter_min_seq(values, targets, V::get_mut_slice(store)),
    }
    mode
}
