use crate::kernel::ConfigError;

/// Inclusive angular-frequency band of interest, in rad/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBand {
    omg_min: f64,
    omg_max: f64,
}

impl FrequencyBand {
    /// Validate `0 < omg_min < omg_max`, both finite.
    pub fn try_new(omg_min: f64, omg_max: f64) -> Result<Self, ConfigError> {
        let valid = omg_min.is_finite() && omg_max.is_finite() && omg_min > 0.0 && omg_min < omg_max;
        if !valid {
            return Err(ConfigError::InvalidBand { omg_min, omg_max });
        }
        Ok(Self { omg_min, omg_max })
    }

    /// Lower bound in rad/s.
    pub fn omg_min(&self) -> f64 {
        self.omg_min
    }

    /// Upper bound in rad/s.
    pub fn omg_max(&self) -> f64 {
        self.omg_max
    }

    /// Whether `omega` lies inside the band, bounds included.
    pub fn contains(&self, omega: f64) -> bool {
        omega >= self.omg_min && omega <= self.omg_max
    }
}
