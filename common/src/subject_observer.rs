use std::{error::Error as StdError, fmt, ptr, rc::Rc};

use log::{trace, warn};
use serde::Deserialize;
use strum::{Display, EnumString};
use thiserror::Error;

pub type UpdateResult = Result<(), UpdateError>;

pub type NotifyResult = Result<(), NotifyError>;

/// Receives every event broadcast by the subject it is attached to.
pub trait Observer<E> {
    fn update(&self, event: E) -> UpdateResult;
}

/// Owns a state and broadcasts each of its changes to the attached observers.
pub trait Subject<E: Clone> {
    fn attach(&mut self, observer: Rc<dyn Observer<E>>);
    fn detach(&mut self, observer: Rc<dyn Observer<E>>) -> Result<(), SubjectError>;
    fn notify(&self) -> NotifyResult;
}

#[derive(Error, Debug, PartialEq)]
pub enum SubjectError {
    #[error("Observer is not attached to this subject")]
    NotFound,
}

/// Failure raised by a single observer while handling an event.
#[derive(Error, Debug)]
#[error("{source}")]
pub struct UpdateError {
    source: Box<dyn StdError + Send + Sync>,
}

impl UpdateError {
    pub fn new<T>(error: T) -> Self
    where
        T: Into<Box<dyn StdError + Send + Sync>>,
    {
        UpdateError {
            source: error.into(),
        }
    }

    pub fn downcast_ref<T: StdError + 'static>(&self) -> Option<&T> {
        self.source.downcast_ref::<T>()
    }
}

#[derive(Debug)]
pub struct ObserverFailure {
    /// Position of the failing observer in attachment order.
    pub position: usize,
    pub error: UpdateError,
}

/// Failures collected during one notification pass.
#[derive(Error, Debug)]
#[error("{} of {} notified observers failed to update", .failures.len(), .notified)]
pub struct NotifyError {
    pub notified: usize,
    pub failures: Vec<ObserverFailure>,
}

/// What a notification pass does once an observer fails.
///
/// `BestEffort` keeps notifying the remaining observers and reports every
/// failure after the loop, `FailFast` stops at the first failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NotifyPolicy {
    #[default]
    BestEffort,
    FailFast,
}

/// Observers in attachment order. The same observer may be attached more
/// than once, in which case it is notified once per attachment.
pub struct SharedObservers<E> {
    observers: Vec<Rc<dyn Observer<E>>>,
    policy: NotifyPolicy,
}

impl<E> Default for SharedObservers<E> {
    fn default() -> Self {
        Self {
            observers: vec![],
            policy: NotifyPolicy::default(),
        }
    }
}

impl<E> fmt::Debug for SharedObservers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedObservers")
            .field("observers", &self.observers.len())
            .field("policy", &self.policy)
            .finish()
    }
}

impl<E: Clone> SharedObservers<E> {
    pub fn new(policy: NotifyPolicy) -> Self {
        SharedObservers {
            observers: vec![],
            policy,
        }
    }

    pub fn policy(&self) -> NotifyPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: NotifyPolicy) {
        self.policy = policy;
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    #[cfg(test)]
    fn contains(&self, observer: &Rc<dyn Observer<E>>) -> bool {
        self.position(observer).is_some()
    }

    pub fn attach(&mut self, observer: Rc<dyn Observer<E>>) {
        self.observers.push(observer);
        trace!("Observer attached, {} now registered", self.observers.len());
    }

    /// Removes the first attachment of `observer`.
    pub fn detach(&mut self, observer: &Rc<dyn Observer<E>>) -> Result<(), SubjectError> {
        let position = self.position(observer).ok_or(SubjectError::NotFound)?;
        self.observers.remove(position);
        trace!(
            "Observer detached from position {position}, {} still registered",
            self.observers.len()
        );
        Ok(())
    }

    pub fn notify(&self, event: E) -> NotifyResult {
        let mut failures = vec![];
        let mut notified = 0;
        for (position, observer) in self.observers.iter().enumerate() {
            notified += 1;
            if let Err(error) = observer.update(event.clone()) {
                warn!("Observer at position {position} failed to update: {error}");
                failures.push(ObserverFailure { position, error });
                if self.policy == NotifyPolicy::FailFast {
                    break;
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(NotifyError { notified, failures })
        }
    }

    fn position(&self, observer: &Rc<dyn Observer<E>>) -> Option<usize> {
        self.observers
            .iter()
            .position(|obs| ptr::addr_eq(Rc::as_ptr(obs), Rc::as_ptr(observer)))
    }
}
