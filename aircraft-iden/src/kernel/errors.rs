use crate::signal::SignalRole;
use core::fmt;

/// Validation errors raised at kernel construction or record binding time.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A required input or configuration field is empty.
    EmptyInput {
        /// Name of the argument that is empty.
        arg: &'static str,
    },
    /// A configuration argument value is invalid.
    InvalidArgument {
        /// Name of the argument.
        arg: &'static str,
        /// Human readable reason.
        reason: &'static str,
    },
    /// A contiguous 1D slice view could not be obtained.
    NonContiguous {
        /// Name of the argument that is non-contiguous.
        arg: &'static str,
    },
    /// A sample was `NaN` or infinite.
    NonFinite {
        /// Name of the argument.
        arg: &'static str,
        /// Position of the first offending sample.
        index: usize,
    },
    /// Input lengths did not match the required shape.
    LengthMismatch {
        /// Name of the argument.
        arg: &'static str,
        /// Required length.
        expected: usize,
        /// Received length.
        got: usize,
    },
    /// The frequency band is empty, reversed or not strictly positive.
    InvalidBand {
        /// Lower bound in rad/s.
        omg_min: f64,
        /// Upper bound in rad/s.
        omg_max: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyInput { arg } => write!(f, "Input `{arg}` was empty."),
            ConfigError::InvalidArgument { arg, reason } => {
                write!(f, "Invalid argument `{arg}`: {reason}")
            }
            ConfigError::NonContiguous { arg } => {
                write!(f, "Argument `{arg}` is not contiguous in memory.")
            }
            ConfigError::NonFinite { arg, index } => {
                write!(f, "Argument `{arg}` has a non-finite sample at index {index}.")
            }
            ConfigError::LengthMismatch { arg, expected, got } => {
                write!(
                    f,
                    "Length mismatch on `{arg}`. Expected {expected}, got {got}."
                )
            }
            ConfigError::InvalidBand { omg_min, omg_max } => write!(
                f,
                "Invalid frequency band [{omg_min}, {omg_max}] rad/s: bounds must be positive and increasing."
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime execution invariant violations for checked kernel entrypoints.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecInvariantViolation {
    /// An execution precondition was violated.
    InvalidState {
        /// Human readable reason.
        reason: &'static str,
    },
    /// A signal's length disagrees with its time sequence.
    LengthMismatch {
        /// Name of the argument.
        arg: &'static str,
        /// Required length.
        expected: usize,
        /// Received length.
        got: usize,
    },
    /// An output channel index past the number of responses.
    ChannelOutOfRange {
        /// Requested channel.
        index: usize,
        /// Number of available channels.
        count: usize,
    },
    /// A spectrum was requested for a role that was never supplied.
    UnknownRole {
        /// The missing role.
        role: SignalRole,
    },
    /// A numeric primitive rejected its arguments.
    Numeric(aircraft_iden_core::Error),
    /// Adapter binding/configuration failure.
    Config(ConfigError),
}

impl From<ConfigError> for ExecInvariantViolation {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<aircraft_iden_core::Error> for ExecInvariantViolation {
    fn from(value: aircraft_iden_core::Error) -> Self {
        Self::Numeric(value)
    }
}

impl fmt::Display for ExecInvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecInvariantViolation::InvalidState { reason } => {
                write!(f, "Execution invariant violation: {reason}")
            }
            ExecInvariantViolation::LengthMismatch { arg, expected, got } => {
                write!(
                    f,
                    "Execution length mismatch on `{arg}`. Expected {expected}, got {got}."
                )
            }
            ExecInvariantViolation::ChannelOutOfRange { index, count } => {
                write!(f, "Output channel {index} out of range for {count} channel(s).")
            }
            ExecInvariantViolation::UnknownRole { role } => {
                write!(f, "No signal was supplied for role {role}.")
            }
            ExecInvariantViolation::Numeric(err) => write!(f, "{err}"),
            ExecInvariantViolation::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ExecInvariantViolation {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecInvariantViolation::Numeric(err) => Some(err),
            ExecInvariantViolation::Config(err) => Some(err),
            _ => None,
        }
    }
}
