use super::ConfigError;

/// Validated construction shared by every kernel.
///
/// Configuration is checked once in [KernelLifecycle::try_new]; a kernel
/// that exists is ready to run on any number of inputs.
pub trait KernelLifecycle: Sized {
    /// Kernel config type.
    type Config;

    /// Construct a validated kernel from config.
    fn try_new(config: Self::Config) -> Result<Self, ConfigError>;
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, KernelLifecycle};
    use crate::iden::{FreqIdenConfig, FreqIdenKernel};
    use crate::signal::preprocess::{DetrendConfig, DetrendKernel};
    use crate::signal::{FrequencyBand, PreprocessConfig, PreprocessKernel};

    fn build<K: KernelLifecycle>(config: K::Config) -> Result<K, ConfigError> {
        K::try_new(config)
    }

    #[test]
    fn kernels_build_through_the_trait() {
        let band = FrequencyBand::try_new(0.5, 50.0).expect("band");
        assert!(build::<DetrendKernel>(DetrendConfig).is_ok());
        assert!(build::<PreprocessKernel>(PreprocessConfig::default()).is_ok());
        assert!(build::<FreqIdenKernel>(FreqIdenConfig::composite(band)).is_ok());
    }

    #[test]
    fn invalid_config_is_reported_at_construction() {
        let band = FrequencyBand::try_new(0.5, 50.0).expect("band");
        let err = build::<FreqIdenKernel>(FreqIdenConfig::single_window(band, 0))
            .expect_err("zero windows");
        assert_eq!(
            err,
            ConfigError::InvalidArgument {
                arg: "win_num",
                reason: "window count must be at least 1",
            }
        );
    }
}
