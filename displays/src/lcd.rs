use std::cell::Cell;

use common::subject_observer::{Observer, UpdateResult};
use log::trace;

use crate::{DisplayError, Render};

pub const DEFAULT_DIGIT_COUNT: usize = 5;
pub const MAX_DIGIT_COUNT: usize = 99;

/// Seven-segment style number display with a fixed count of digit cells.
///
/// A value needing more cells than available overflows: it is rejected and
/// the previous reading stays on screen.
#[derive(Debug)]
pub struct LcdObserver {
    digit_count: usize,
    reading: Cell<i32>,
}

impl Default for LcdObserver {
    fn default() -> Self {
        LcdObserver {
            digit_count: DEFAULT_DIGIT_COUNT,
            reading: Cell::new(0),
        }
    }
}

impl LcdObserver {
    pub fn new(digit_count: usize) -> Result<Self, DisplayError> {
        if !(1..=MAX_DIGIT_COUNT).contains(&digit_count) {
            return Err(DisplayError::InvalidDigitCount(digit_count));
        }
        Ok(LcdObserver {
            digit_count,
            reading: Cell::new(0),
        })
    }

    pub fn digit_count(&self) -> usize {
        self.digit_count
    }

    pub fn reading(&self) -> i32 {
        self.reading.get()
    }

    /// Reading right-aligned over all digit cells.
    pub fn text(&self) -> String {
        format!("{:>width$}", self.reading.get(), width = self.digit_count)
    }
}

impl Observer<i32> for LcdObserver {
    fn update(&self, event: i32) -> UpdateResult {
        // the minus sign takes a cell
        let required = event.to_string().len();
        if required > self.digit_count {
            return Err(DisplayError::Overflow {
                value: event,
                required,
                available: self.digit_count,
            }
            .into());
        }
        self.reading.set(event);
        trace!("LCD reads {event}");
        Ok(())
    }
}

impl Render for LcdObserver {
    fn render(&self) -> String {
        self.text()
    }
}
