use crate::error::PanelError;

/// Upper end of the integer slider domain `[0, SLIDER_MAX]`
pub const SLIDER_MAX: i32 = 100_000;

/// Linear mapping between the integer slider domain and `[min, max]`.
///
/// The mapper never clamps; callers feeding user-entered values clamp first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueMapper {
    min: f64,
    max: f64,
}

impl ValueMapper {
    pub fn new(min: f64, max: f64) -> Result<Self, PanelError> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(PanelError::InvalidRange { min, max });
        }
        Ok(ValueMapper { min, max })
    }

    /// Value covered by one slider increment
    pub fn step(&self) -> f64 {
        (self.max - self.min) / SLIDER_MAX as f64
    }

    pub fn to_slider(&self, value: f64) -> i32 {
        (SLIDER_MAX as f64 * (value - self.min) / (self.max - self.min)).round() as i32
    }

    pub fn to_value(&self, slider: i32) -> f64 {
        slider as f64 * (self.max - self.min) / SLIDER_MAX as f64 + self.min
    }
}
