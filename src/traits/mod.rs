/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Traits describing vertex ids and adjacency matrices.

mod adjacency;
pub use adjacency::*;

mod vertex_id;
pub use vertex_id::*;
