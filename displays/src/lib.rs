mod label;
mod lcd;
mod progress_bar;

pub use label::LabelObserver;
pub use lcd::{LcdObserver, DEFAULT_DIGIT_COUNT, MAX_DIGIT_COUNT};
pub use progress_bar::ProgressBarObserver;

use common::subject_observer::UpdateError;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Text form of a display's current state.
pub trait Render {
    fn render(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DisplayKind {
    Label,
    Progress,
    Lcd,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DisplayError {
    #[error("Value {value} is outside of the displayable range [{minimum}, {maximum}]")]
    OutOfRange { value: i32, minimum: i32, maximum: i32 },
    #[error("Value {value} needs {required} digits but only {available} are available")]
    Overflow {
        value: i32,
        required: usize,
        available: usize,
    },
    #[error("Invalid range: minimum {0} is greater than maximum {1}")]
    InvalidRange(i32, i32),
    #[error("Digit count must be between 1 and {}, got {0}", MAX_DIGIT_COUNT)]
    InvalidDigitCount(usize),
}

impl From<DisplayError> for UpdateError {
    fn from(error: DisplayError) -> Self {
        UpdateError::new(error)
    }
}
