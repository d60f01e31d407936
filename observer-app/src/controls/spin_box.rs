use log::trace;

use super::InputError;

/// Integer input bounded by an inclusive range.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinBox {
    minimum: i32,
    maximum: i32,
    value: i32,
}

impl SpinBox {
    pub fn new(minimum: i32, maximum: i32) -> Result<Self, InputError> {
        if minimum > maximum {
            return Err(InputError::InvalidRange(minimum, maximum));
        }
        Ok(SpinBox {
            minimum,
            maximum,
            value: minimum,
        })
    }

    pub fn minimum(&self) -> i32 {
        self.minimum
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Clamps `value` into the range and returns what was kept.
    pub fn set_value(&mut self, value: i32) -> i32 {
        self.value = value.clamp(self.minimum, self.maximum);
        trace!("Spin box set to {}", self.value);
        self.value
    }

    /// Typed input: unlike [`SpinBox::set_value`] an out of range value is
    /// refused rather than clamped, and the current value is left untouched.
    pub fn set_text(&mut self, text: &str) -> Result<i32, InputError> {
        let text = text.trim();
        let value = text
            .parse::<i32>()
            .map_err(|_| InputError::NotANumber(text.to_string()))?;
        if !(self.minimum..=self.maximum).contains(&value) {
            return Err(InputError::OutOfRange {
                value,
                minimum: self.minimum,
                maximum: self.maximum,
            });
        }
        Ok(self.set_value(value))
    }
}
