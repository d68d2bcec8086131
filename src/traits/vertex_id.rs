/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use sealed::sealed;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::sync::atomic::{AtomicU32, AtomicU64, AtomicUsize, Ordering};

/// An unsigned integer type used to store vertex ids in label arrays.
///
/// The algorithms of this crate are generic over the width of their label
/// arrays: using `u32` halves the memory footprint with respect to `u64` or
/// `usize`, at the price of limiting the number of vertices.
///
/// Every implementation comes with an associated atomic type, which is used
/// when several threads may write to the same entry of an array. All atomic
/// operations use [relaxed ordering](Ordering::Relaxed): the algorithms
/// synchronize only at the end of each parallel region.
#[sealed]
pub trait VertexId: Copy + Ord + Hash + Debug + Display + Default + Send + Sync + 'static {
    /// The atomic version of this type.
    type Atomic: Send + Sync;

    /// The largest representable value.
    const MAX: Self;

    /// [`MAX`](VertexId::MAX) as a `usize`, saturating.
    const MAX_USIZE: usize;

    /// Converts a `usize` into a vertex id.
    ///
    /// The value must be at most [`MAX_USIZE`](VertexId::MAX_USIZE); larger
    /// values are truncated.
    fn from_usize(x: usize) -> Self;

    /// Converts the vertex id into a `usize`.
    fn to_usize(self) -> usize;

    /// Creates a new atomic holding the given value.
    fn new_atomic(value: Self) -> Self::Atomic;

    /// Loads the value of an atomic.
    fn load(atomic: &Self::Atomic) -> Self;

    /// Stores a value into an atomic.
    fn store(atomic: &Self::Atomic, value: Self);

    /// Weak compare-and-exchange, as in [`AtomicU64::compare_exchange_weak`].
    fn compare_exchange_weak(atomic: &Self::Atomic, current: Self, new: Self)
        -> Result<Self, Self>;

    /// Views an exclusively borrowed slice of atomics as a slice of plain
    /// values.
    fn get_mut_slice(atomics: &mut [Self::Atomic]) -> &mut [Self];

    /// Sets `atomic` to the minimum between its current value and `value`.
    ///
    /// This is a compare-and-swap retry loop: on failure the current value is
    /// read again and the loop stops as soon as it is not larger than
    /// `value`. Returns true if the stored value was lowered.
    #[inline(always)]
    fn atomic_min(atomic: &Self::Atomic, value: Self) -> bool {
        let mut current = Self::load(atomic);
        while value < current {
            match Self::compare_exchange_weak(atomic, current, value) {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
        false
    }

    /// Returns an error if `num_ids` distinct ids, that is, ids in the range
    /// `0..num_ids`, do not all fit this type.
    fn check_ids(num_ids: usize) -> Result<(), crate::CcError> {
        if num_ids > 0 && num_ids - 1 > Self::MAX_USIZE {
            Err(crate::CcError::TooManyNodes {
                num_nodes: num_ids,
                max: Self::MAX_USIZE,
            })
        } else {
            Ok(())
        }
    }
}

macro_rules! impl_vertex_id {
    ($($ty:ty => $atomic:ty),*) => {$(
        #[sealed]
        impl VertexId for $ty {
            type Atomic = $atomic;

            const MAX: Self = <$ty>::MAX;
            const MAX_USIZE: usize = if (<$ty>::MAX as u128) < (usize::MAX as u128) {
                <$ty>::MAX as usize
            } else {
                usize::MAX
            };

            #[inline(always)]
            fn from_usize(x: usize) -> Self {
                x as $ty
            }

            #[inline(always)]
            fn to_usize(self) -> usize {
                self as usize
            }

            #[inline(always)]
            fn new_atomic(value: Self) -> Self::Atomic {
                <$atomic>::new(value)
            }

            #[inline(always)]
            fn load(atomic: &Self::Atomic) -> Self {
                atomic.load(Ordering::Relaxed)
            }

            #[inline(always)]
            fn store(atomic: &Self::Atomic, value: Self) {
                atomic.store(value, Ordering::Relaxed)
            }

            #[inline(always)]
            fn compare_exchange_weak(
                atomic: &Self::Atomic,
                current: Self,
                new: Self,
            ) -> Result<Self, Self> {
                atomic.compare_exchange_weak(current, new, Ordering::Relaxed, Ordering::Relaxed)
            }

            #[inline(always)]
            fn get_mut_slice(atomics: &mut [Self::Atomic]) -> &mut [Self] {
                // SAFETY: atomic integers have the same size as the plain
                // integers, and transmuting &mut from atomic to non-atomic
                // is sound.
                unsafe { std::mem::transmute::<&mut [$atomic], &mut [$ty]>(atomics) }
            }
        }
    )*};
}

impl_vertex_id!(u32 => AtomicU32, u64 => AtomicU64, usize => AtomicUsize);
