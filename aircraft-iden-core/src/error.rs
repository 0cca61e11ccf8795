use core::fmt;

/// Errors raised by the numeric primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Argument passed into a function was invalid.
    InvalidArg {
        /// The invalid arg
        arg: String,
        /// Explaining why arg is invalid.
        reason: String,
    },
    /// Two or more arguments passed into a function conflict.
    ConflictArg {
        /// Explaining what args conflict.
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArg { arg, reason } => {
                write!(f, "Invalid argument `{arg}`: {reason}")
            }
            Error::ConflictArg { reason } => write!(f, "Conflicting arguments: {reason}"),
        }
    }
}

impl std::error::Error for Error {}

/// Result alias for the numeric primitives.
pub type Result<T> = core::result::Result<T, Error>;
