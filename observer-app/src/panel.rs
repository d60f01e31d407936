use std::rc::Rc;

use common::subject_observer::{NotifyResult, Observer, Subject, SubjectError};
use displays::{DisplayKind, LabelObserver, LcdObserver, ProgressBarObserver, Render};
use log::debug;
use model::Model;

use crate::{config::app::AppConfig, controls::SpinBox, AppError};

struct Slot {
    kind: DisplayKind,
    observer: Rc<dyn Observer<i32>>,
    view: Rc<dyn Render>,
}

impl Slot {
    fn build(kind: DisplayKind, config: &AppConfig) -> Result<Self, AppError> {
        let slot = match kind {
            DisplayKind::Label => {
                let label = Rc::new(LabelObserver::new());
                Slot {
                    kind,
                    observer: label.clone(),
                    view: label,
                }
            }
            DisplayKind::Progress => {
                let bar = Rc::new(ProgressBarObserver::new(
                    config.progress_minimum,
                    config.progress_maximum,
                )?);
                Slot {
                    kind,
                    observer: bar.clone(),
                    view: bar,
                }
            }
            DisplayKind::Lcd => {
                let lcd = Rc::new(LcdObserver::new(config.lcd_digit_count)?);
                Slot {
                    kind,
                    observer: lcd.clone(),
                    view: lcd,
                }
            }
        };
        Ok(slot)
    }
}

/// Headless window: a spin box feeding a model watched by a set of displays.
pub struct Panel {
    model: Model<i32>,
    spin_box: SpinBox,
    slots: Vec<Slot>,
}

impl Panel {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let mut spin_box = SpinBox::new(config.input_minimum, config.input_maximum)?;
        let initial_value = spin_box.set_value(config.initial_value);

        let mut model = Model::with_policy(initial_value, config.notify_policy);
        let slots = config
            .displays
            .iter()
            .map(|&kind| Slot::build(kind, config))
            .collect::<Result<Vec<_>, _>>()?;
        for slot in &slots {
            model.attach(slot.observer.clone());
        }
        debug!(
            "Panel ready, input range [{}, {}], displays {:?}",
            spin_box.minimum(),
            spin_box.maximum(),
            config.displays
        );

        Ok(Panel {
            model,
            spin_box,
            slots,
        })
    }

    pub fn model(&self) -> &Model<i32> {
        &self.model
    }

    pub fn spin_box(&self) -> &SpinBox {
        &self.spin_box
    }

    /// Pushes the spin box value into the model.
    pub fn change_value(&mut self) -> NotifyResult {
        let value = self.spin_box.value();
        self.model.set_value(value)
    }

    pub fn submit(&mut self, text: &str) -> Result<(), AppError> {
        self.spin_box.set_text(text)?;
        self.change_value()?;
        Ok(())
    }

    /// One `kind: state` line per attached display, in attachment order.
    pub fn render(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|slot| format!("{}: {}", slot.kind, slot.view.render()))
            .collect()
    }

    /// Detaches the first display of `kind`.
    pub fn detach(&mut self, kind: DisplayKind) -> Result<(), AppError> {
        let position = self
            .slots
            .iter()
            .position(|slot| slot.kind == kind)
            .ok_or(SubjectError::NotFound)?;
        self.model.detach(self.slots[position].observer.clone())?;
        self.slots.remove(position);
        Ok(())
    }
}
