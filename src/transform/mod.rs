/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Transformations of adjacency matrices.
//!
//! The connected-component algorithms need a symmetric adjacency matrix, which
//! can be obtained with [`symmetrize`]; the strongly-connected-component
//! algorithms need a matrix and its [transpose](transpose()).

mod symmetrize;
pub use symmetrize::*;

mod transpose;
pub use transpose::*;
