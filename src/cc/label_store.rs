/*
 * SPDX-FileCopyrightText: 2024 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::VertexId;
use crate::utils::{try_alloc, try_alloc_with, RAYON_MIN_LEN};
use crate::CcError;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Which labels a hooking phase propagates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Hook {
    /// Grandparents of the previous iteration.
    Conditional,
    /// Grandparents of the current parents, computed by
    /// [`LabelStore::grandchildren`] and restricted to stars.
    Unconditional,
}

/// The per-node arrays of FastSV.
///
/// All methods use the current Rayon thread pool.
pub(crate) struct LabelStore<V: VertexId> {
    /// The only array written concurrently, by scatter-reduce.
    parent: Box<[V::Atomic]>,
    grandparent: Box<[V]>,
    /// Either the grandparents being computed or the labels of
    /// [unconditional hooking](Hook::Unconditional).
    scratch: Box<[V]>,
    /// Parents before a hooking phase, used as scatter targets.
    snapshot: Box<[V]>,
    /// Minimum label among neighbors.
    mngp: Box<[V]>,
    star: Box<[AtomicBool]>,
}

impl<V: VertexId> LabelStore<V> {
    /// Allocates the arrays for `n` nodes, setting the parent of node `i` to
    /// `init(i)` and all nodes as stars.
    ///
    /// `init` must satisfy `init(init(i)) <= init(i) <= i`.
    pub(crate) fn new(n: usize, init: impl Fn(usize) -> V + Sync + Send) -> Result<Self, CcError> {
        let mut store = Self {
            parent: try_alloc_with(n, |node| V::new_atomic(init(node)))?.into_boxed_slice(),
            grandparent: try_alloc(n, V::MAX)?.into_boxed_slice(),
            scratch: try_alloc(n, V::MAX)?.into_boxed_slice(),
            snapshot: try_alloc(n, V::MAX)?.into_boxed_slice(),
            mngp: try_alloc(n, V::MAX)?.into_boxed_slice(),
            star: try_alloc_with(n, |_| AtomicBool::new(true))?.into_boxed_slice(),
        };
        store.grandparents();
        std::mem::swap(&mut store.grandparent, &mut store.scratch);
        Ok(store)
    }

    #[cfg(test)]
    fn parents(&mut self) -> &mut [V] {
        V::get_mut_slice(&mut self.parent)
    }

    /// Copies the parents into the snapshot.
    pub(crate) fn take_snapshot(&mut self) {
        let parent = V::get_mut_slice(&mut self.parent);
        self.snapshot
            .par_iter_mut()
            .with_min_len(RAYON_MIN_LEN)
            .zip(parent.par_iter())
            .for_each(|(s, &p)| *s = p);
    }

    /// Stores in the scratch array the grandparent of each node with respect
    /// to the snapshot.
    pub(crate) fn grandchildren(&mut self) {
        let snapshot = &self.snapshot;
        self.scratch
            .par_iter_mut()
            .with_min_len(RAYON_MIN_LEN)
            .zip(snapshot.par_iter())
            .for_each(|(g, &p)| *g = snapshot[p.to_usize()]);
    }

    /// Resets the neighbor minima and returns them together with the labels
    /// to reduce for the given hooking phase.
    pub(crate) fn hook_candidates(&mut self, hook: Hook) -> (&[V], &mut [V]) {
        self.mngp
            .par_iter_mut()
            .with_min_len(RAYON_MIN_LEN)
            .for_each(|m| *m = V::MAX);
        let labels: &[V] = match hook {
            Hook::Conditional => &self.grandparent,
            Hook::Unconditional => &self.scratch,
        };
        (labels, &mut self.mngp[..])
    }

    /// Discards the neighbor minima of nodes that are not in a star.
    pub(crate) fn retain_stars(&mut self) {
        let star = &self.star;
        self.mngp
            .par_iter_mut()
            .with_min_len(RAYON_MIN_LEN)
            .enumerate()
            .for_each(|(node, m)| {
                if !star[node].load(Ordering::Relaxed) {
                    *m = V::MAX;
                }
            });
    }

    /// Returns the values, the targets and the store of the hooking
    /// scatter-reduce.
    pub(crate) fn hook_targets(&mut self) -> (&[V], &[V], &mut [V::Atomic]) {
        (&self.mngp[..], &self.snapshot[..], &mut self.parent[..])
    }

    /// Lowers each parent to the minimum among itself, the neighbor minimum
    /// and the labels of the given hooking phase.
    pub(crate) fn fold(&mut self, hook: Hook) {
        let labels: &[V] = match hook {
            Hook::Conditional => &self.grandparent,
            Hook::Unconditional => &self.scratch,
        };
        let mngp = &self.mngp;
        V::get_mut_slice(&mut self.parent)
            .par_iter_mut()
            .with_min_len(RAYON_MIN_LEN)
            .zip(mngp.par_iter())
            .zip(labels.par_iter())
            .for_each(|((p, &m), &l)| *p = (*p).min(m).min(l));
    }

    /// Replaces each parent with its grandparent.
    pub(crate) fn shortcut(&mut self) {
        self.take_snapshot();
        let snapshot = &self.snapshot;
        V::get_mut_slice(&mut self.parent)
            .par_iter_mut()
            .with_min_len(RAYON_MIN_LEN)
            .zip(snapshot.par_iter())
            .for_each(|(p, &s)| *p = snapshot[s.to_usize()]);
    }

    /// Stores in the scratch array the grandparent of each node.
    pub(crate) fn grandparents(&mut self) {
        let parent = V::get_mut_slice(&mut self.parent);
        self.scratch
            .par_iter_mut()
            .with_min_len(RAYON_MIN_LEN)
            .zip(parent.par_iter())
            .for_each(|(g, &p)| *g = parent[p.to_usize()]);
    }

    /// Recomputes the star flags from the parents and the grandparents in
    /// the scratch array.
    ///
    /// A node whose grandparent differs from its parent is not in a star, and
    /// neither is its grandparent; then, a node whose parent is not in a star
    /// is not in a star.
    pub(crate) fn update_stars(&mut self) {
        let star = &self.star;
        let grandparent = &self.scratch;
        let parent = V::get_mut_slice(&mut self.parent);

        star.par_iter()
            .with_min_len(RAYON_MIN_LEN)
            .for_each(|s| s.store(true, Ordering::Relaxed));
        parent
            .par_iter()
            .with_min_len(RAYON_MIN_LEN)
            .zip(grandparent.par_iter())
            .enumerate()
            .for_each(|(node, (&p, &g))| {
                if p != g {
                    star[node].store(false, Ordering::Relaxed);
                    star[g.to_usize()].store(false, Ordering::Relaxed);
                }
            });
        // Only children of roots can change here, and roots are never
        // modified, so the result does not depend on scheduling.
        parent
            .par_iter()
            .with_min_len(RAYON_MIN_LEN)
            .enumerate()
            .for_each(|(node, &p)| {
                if !star[p.to_usize()].load(Ordering::Relaxed) {
                    star[node].store(false, Ordering::Relaxed);
                }
            });
    }

    /// Makes the grandparents in the scratch array current, and returns the
    /// number of nodes whose grandparent changed.
    pub(crate) fn swap_grandparents(&mut self) -> usize {
        let changed = self
            .grandparent
            .par_iter()
            .with_min_len(RAYON_MIN_LEN)
            .zip(self.scratch.par_iter())
            .filter(|(old, new)| old != new)
            .count();
        std::mem::swap(&mut self.grandparent, &mut self.scratch);
        changed
    }

    /// Consumes the store, returning the parents.
    pub(crate) fn into_labels(mut self) -> Box<[V]> {
        let parent = V::get_mut_slice(&mut self.parent);
        self.grandparent
            .par_iter_mut()
            .with_min_len(RAYON_MIN_LEN)
            .zip(parent.par_iter())
            .for_each(|(g, &p)| *g = p);
        self.grandparent
    }
}
