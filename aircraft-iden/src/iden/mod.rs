//! Frequency-response identification from spectral densities.

pub mod correction;
pub mod derive;
pub mod response;
pub mod simo;

pub use correction::{AssistCorrection, Correction};
pub use response::{ExportError, FreqResponse, NumericHealth};
pub use simo::{FreqIdenConfig, FreqIdenKernel, FreqIdenResult, FreqIdenSimo, SimoRecord};
