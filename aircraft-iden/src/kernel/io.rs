use super::ConfigError;
use ndarray::{Array1, ArrayView1};

/// Adapter trait for reading contiguous 1D input.
pub trait Read1D<T> {
    /// Borrow the underlying input as a contiguous slice.
    fn read_slice(&self) -> Result<&[T], ConfigError>;
}

impl<T> Read1D<T> for [T] {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self)
    }
}

impl<T, const N: usize> Read1D<T> for [T; N] {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self)
    }
}

impl<T> Read1D<T> for Vec<T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self.as_slice())
    }
}

impl<T> Read1D<T> for Array1<T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        self.as_slice()
            .ok_or(ConfigError::NonContiguous { arg: "array" })
    }
}

impl<'a, T> Read1D<T> for ArrayView1<'a, T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        self.as_slice()
            .ok_or(ConfigError::NonContiguous { arg: "array_view" })
    }
}

/// Borrow a measured signal, rejecting empty input and non-finite samples.
///
/// `arg` names the signal in the returned error.
pub fn read_signal<'a, I>(arg: &'static str, input: &'a I) -> Result<&'a [f64], ConfigError>
where
    I: Read1D<f64> + ?Sized,
{
    let slice = input.read_slice().map_err(|err| match err {
        ConfigError::NonContiguous { .. } => ConfigError::NonContiguous { arg },
        other => other,
    })?;
    if slice.is_empty() {
        return Err(ConfigError::EmptyInput { arg });
    }
    if let Some(index) = slice.iter().position(|v| !v.is_finite()) {
        return Err(ConfigError::NonFinite { arg, index });
    }
    Ok(slice)
}
