/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Miscellaneous utilities: the scatter-reduce-min primitive, fallible
//! allocation and thread pools.

use crate::CcError;
use rayon::prelude::*;

mod scatter_min;
pub use scatter_min::*;

/// Minimum number of items per Rayon task in elementwise parallel loops.
pub(crate) const RAYON_MIN_LEN: usize = 1024;

/// Allocates a vector of `len` copies of `value`, returning
/// [`CcError::OutOfMemory`] instead of aborting if the allocation fails.
pub fn try_alloc<T: Clone + Send + Sync>(len: usize, value: T) -> Result<Vec<T>, CcError> {
    let mut v = try_with_capacity(len)?;
    v.par_extend(
        rayon::iter::repeat(value)
            .take(len)
            .with_min_len(RAYON_MIN_LEN),
    );
    Ok(v)
}

/// Allocates a vector of `len` elements, initializing the element of index `i`
/// with `init(i)`, returning [`CcError::OutOfMemory`] instead of aborting if
/// the allocation fails.
pub fn try_alloc_with<T: Send>(
    len: usize,
    init: impl Fn(usize) -> T + Sync + Send,
) -> Result<Vec<T>, CcError> {
    let mut v = try_with_capacity(len)?;
    v.par_extend((0..len).into_par_iter().with_min_len(RAYON_MIN_LEN).map(init));
    Ok(v)
}

/// Returns an empty vector with capacity for exactly `len` elements.
pub fn try_with_capacity<T>(len: usize) -> Result<Vec<T>, CcError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| CcError::OutOfMemory {
        elements: len,
        elem_size: std::mem::size_of::<T>(),
    })?;
    Ok(v)
}

/// Appends `value` to `v`, growing it as [`Vec::push`] does but returning
/// [`CcError::OutOfMemory`] if the allocation fails.
pub(crate) fn try_push<T>(v: &mut Vec<T>, value: T) -> Result<(), CcError> {
    v.try_reserve(1).map_err(|_| CcError::OutOfMemory {
        elements: v.len().saturating_add(1),
        elem_size: std::mem::size_of::<T>(),
    })?;
    v.push(value);
    Ok(())
}

/// Utility macro to create [`thread_pools`](`rayon::ThreadPool`).
///
/// There are two forms of this macro:
/// * Create a [`ThreadPool`](rayon::ThreadPool) with the default settings:
/// ```
/// # use fastsv::thread_pool;
/// let t: rayon::ThreadPool = thread_pool![];
/// ```
/// * Create a [`ThreadPool`](rayon::ThreadPool) with a given number of threads:
/// ```
/// # use fastsv::thread_pool;
/// let t: rayon::ThreadPool = thread_pool![7];
/// assert_eq!(t.current_num_threads(), 7);
/// ```
#[macro_export]
macro_rules! thread_pool {
    () => {
        rayon::ThreadPoolBuilder::new()
            .build()
            .expect("Cannot build a ThreadPool with default parameters")
    };
    ($num_threads:expr) => {
        rayon::ThreadPoolBuilder::new()
            .num_threads($num_threads)
            .build()
            .unwrap_or_else(|_| {
                panic!(
                    "Cannot build a ThreadPool with default parameters and {} threads",
                    $num_threads,
                )
            })
    };
}
