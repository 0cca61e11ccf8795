//! Shared trait-first kernel substrate.
//!
//! Constructor validation, the error taxonomy and the 1D input adapters used
//! by the preprocessing, spectral and identification kernels.

mod errors;
mod io;
mod lifecycle;

pub use errors::*;
pub use io::*;
pub use lifecycle::*;
