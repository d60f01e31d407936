mod spin_box;

pub use spin_box::SpinBox;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("Invalid range: minimum {0} is greater than maximum {1}")]
    InvalidRange(i32, i32),
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("Value {value} is outside of [{minimum}, {maximum}]")]
    OutOfRange { value: i32, minimum: i32, maximum: i32 },
}
