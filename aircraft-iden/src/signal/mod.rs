//! Signal conditioning and spectral estimation.

mod band;
pub mod composite;
pub mod preprocess;
pub mod spectral;
pub mod traits;

pub use band::*;
pub use composite::CompositeWindow;
pub use preprocess::{time_seq_preprocess, PreprocessConfig, PreprocessKernel, PreprocessedSignals};
pub use spectral::{MultiSignalSpectrum, SignalRole, SpectralTriple, SpectrumConfig};
