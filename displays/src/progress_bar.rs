use std::cell::Cell;

use common::subject_observer::{Observer, UpdateResult};
use log::trace;

use crate::{DisplayError, Render};

/// Shows the last received value as a filled percentage of its range.
///
/// Values outside `[minimum, maximum]` are rejected and the bar keeps its
/// previous value. A `0..=0` range is a busy indicator and accepts anything.
#[derive(Debug)]
pub struct ProgressBarObserver {
    minimum: i32,
    maximum: i32,
    value: Cell<Option<i32>>,
}

impl Default for ProgressBarObserver {
    fn default() -> Self {
        ProgressBarObserver {
            minimum: 0,
            maximum: 100,
            value: Cell::new(None),
        }
    }
}

impl ProgressBarObserver {
    pub fn new(minimum: i32, maximum: i32) -> Result<Self, DisplayError> {
        if minimum > maximum {
            return Err(DisplayError::InvalidRange(minimum, maximum));
        }
        Ok(ProgressBarObserver {
            minimum,
            maximum,
            value: Cell::new(None),
        })
    }

    pub fn minimum(&self) -> i32 {
        self.minimum
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    /// `None` until a value has been accepted.
    pub fn value(&self) -> Option<i32> {
        self.value.get()
    }

    #[cfg(test)]
    fn reset(&self) {
        self.value.set(None);
    }

    pub fn percentage(&self) -> Option<u8> {
        let value = self.value.get()?;
        let total = i64::from(self.maximum) - i64::from(self.minimum);
        if total == 0 {
            return Some(100);
        }
        let done = (i64::from(value) - i64::from(self.minimum)) * 100 / total;
        Some(done.clamp(0, 100) as u8)
    }

    pub fn text(&self) -> String {
        self.percentage()
            .map(|percentage| format!("{percentage}%"))
            .unwrap_or_default()
    }

    fn is_busy_indicator(&self) -> bool {
        self.minimum == 0 && self.maximum == 0
    }
}

impl Observer<i32> for ProgressBarObserver {
    fn update(&self, event: i32) -> UpdateResult {
        if !self.is_busy_indicator() && !(self.minimum..=self.maximum).contains(&event) {
            return Err(DisplayError::OutOfRange {
                value: event,
                minimum: self.minimum,
                maximum: self.maximum,
            }
            .into());
        }
        self.value.set(Some(event));
        trace!("Progress bar at {}", self.text());
        Ok(())
    }
}

impl Render for ProgressBarObserver {
    fn render(&self) -> String {
        self.text()
    }
}
