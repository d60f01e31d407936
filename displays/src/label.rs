use std::{cell::RefCell, fmt::Display};

use common::subject_observer::{Observer, UpdateResult};
use log::trace;

use crate::Render;

/// Shows the last received value as plain text.
#[derive(Debug, Default)]
pub struct LabelObserver {
    text: RefCell<String>,
}

impl LabelObserver {
    pub fn new() -> Self {
        LabelObserver::default()
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

impl<V: Display> Observer<V> for LabelObserver {
    fn update(&self, event: V) -> UpdateResult {
        let text = event.to_string();
        trace!("Label shows {text}");
        *self.text.borrow_mut() = text;
        Ok(())
    }
}

impl Render for LabelObserver {
    fn render(&self) -> String {
        self.text()
    }
}
