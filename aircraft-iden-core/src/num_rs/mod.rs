//! numpy-flavoured helpers.

mod interp;
mod unwrap;

pub use interp::*;
pub use unwrap::*;
