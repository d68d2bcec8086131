/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]
// for now we don't need any new feature but we might remove this in the future
#![deny(unstable_features)]
#![deny(trivial_casts)]
#![deny(unconditional_recursion)]
#![deny(clippy::empty_loop)]
#![deny(unreachable_code)]
#![deny(unreachable_pub)]
#![deny(unreachable_patterns)]
#![deny(unused_macro_rules)]
// the code must be documented and everything should have a debug print implementation
#![deny(unused_doc_comments)]
#![allow(clippy::type_complexity)]

pub mod cc;
mod components;
mod error;
pub mod graphs;
pub mod sccs;
pub mod traits;
pub mod transform;
pub mod utils;

pub use components::Components;
pub use error::CcError;

pub mod prelude {
    pub use crate::cc::{self, FastSvParams, Sampling};
    pub use crate::graphs::prelude::*;
    pub use crate::sccs::{self, Propagation};
    pub use crate::traits::*;
    pub use crate::transform;
    pub use crate::utils::ScatterMode;
    pub use crate::{CcError, Components};
}
