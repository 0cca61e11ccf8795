//! Numeric primitives shared by the `aircraft-iden` crates.
//!
//! The [`num_rs`] module mirrors the handful of numpy routines the
//! identification pipeline leans on (`average`, `linspace`, `interp`,
//! `unwrap`) with numpy's edge-case semantics.

mod error;
pub mod num_rs;

pub use error::*;
