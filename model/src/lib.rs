use std::rc::Rc;

use common::subject_observer::{
    NotifyPolicy, NotifyResult, Observer, SharedObservers, Subject, SubjectError,
};
use log::debug;

/// A value broadcast to its observers every time it is set.
///
/// Observers are called synchronously on the thread calling
/// [`Model::set_value`]; the model is `!Send` as it shares them through `Rc`.
#[derive(Debug)]
pub struct Model<V> {
    value: V,
    observers: SharedObservers<V>,
}

impl<V> Default for Model<V>
where
    V: Clone + Default,
{
    fn default() -> Self {
        Model::new(V::default())
    }
}

impl<V: Clone> Subject<V> for Model<V> {
    fn attach(&mut self, observer: Rc<dyn Observer<V>>) {
        self.observers.attach(observer);
        debug!("Model now has {} observer(s)", self.observers.len());
    }

    fn detach(&mut self, observer: Rc<dyn Observer<V>>) -> Result<(), SubjectError> {
        self.observers.detach(&observer)?;
        debug!("Model now has {} observer(s)", self.observers.len());
        Ok(())
    }

    fn notify(&self) -> NotifyResult {
        self.observers.notify(self.value.clone())
    }
}

impl<V: Clone> Model<V> {
    pub fn new(value: V) -> Self {
        Model::with_policy(value, NotifyPolicy::default())
    }

    pub fn with_policy(value: V, policy: NotifyPolicy) -> Self {
        Model {
            value,
            observers: SharedObservers::new(policy),
        }
    }

    pub fn get_value(&self) -> V {
        self.value.clone()
    }

    /// Stores `value` then notifies every observer. The value is kept even
    /// when some observers fail to render it.
    pub fn set_value(&mut self, value: V) -> NotifyResult {
        self.value = value;
        debug!("Value changed, notifying {} observer(s)", self.observers.len());
        self.notify()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn policy(&self) -> NotifyPolicy {
        self.observers.policy()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use common::subject_observer::{
        NotifyPolicy, Observer, Subject, SubjectError, UpdateError, UpdateResult,
    };
    use common_test::{get_seeded_rng, random_values};
    use mockall::{mock, predicate::eq, Sequence};
    use rand::Rng;

    use super::Model;

    mock! {
        Display {}

        impl Observer<i32> for Display {
            fn update(&self, event: i32) -> UpdateResult;
        }
    }

    type Calls = Rc<RefCell<Vec<(usize, i32)>>>;

    struct Recorder {
        id: usize,
        calls: Calls,
    }

    impl Observer<i32> for Recorder {
        fn update(&self, event: i32) -> UpdateResult {
            self.calls.borrow_mut().push((self.id, event));
            Ok(())
        }
    }

    fn expect_in_sequence(value: i32, seq: &mut Sequence) -> MockDisplay {
        let mut display = MockDisplay::new();
        display
            .expect_update()
            .with(eq(value))
            .times(1)
            .in_sequence(seq)
            .returning(|_| Ok(()));
        display
    }

    #[test]
    fn test_model_should_start_with_default_value() {
        let model = Model::<i32>::default();

        assert_eq!(0, model.get_value());
        assert_eq!(0, model.observer_count());
        assert_eq!(NotifyPolicy::BestEffort, model.policy());
    }

    #[test]
    fn test_set_value_should_notify_observers_in_attachment_order() {
        // Given
        let mut seq = Sequence::new();
        let mut model = Model::<i32>::new(0);
        model.attach(Rc::new(expect_in_sequence(42, &mut seq)));
        model.attach(Rc::new(expect_in_sequence(42, &mut seq)));
        model.attach(Rc::new(expect_in_sequence(42, &mut seq)));

        // When
        let result = model.set_value(42);

        // Then
        assert!(matches!(result, Ok(())));
        assert_eq!(42, model.get_value());
    }

    #[test]
    fn test_detached_observer_should_not_be_notified() {
        // Given
        let mut a = MockDisplay::new();
        a.expect_update().never();
        let a: Rc<dyn Observer<i32>> = Rc::new(a);
        let mut b = MockDisplay::new();
        b.expect_update().with(eq(7)).times(1).returning(|_| Ok(()));
        let mut model = Model::<i32>::new(0);
        model.attach(a.clone());
        model.attach(Rc::new(b));

        // When
        model.detach(a).unwrap();
        let result = model.set_value(7);

        // Then
        assert!(matches!(result, Ok(())));
        assert_eq!(1, model.observer_count());
    }

    #[test]
    fn test_detach_unknown_observer_should_fail() {
        // Given
        let recorder = Rc::new(Recorder {
            id: 0,
            calls: Calls::default(),
        });
        let mut model = Model::<i32>::new(0);
        model.attach(recorder.clone());

        // When
        let result = model.detach(Rc::new(Recorder {
            id: 1,
            calls: Calls::default(),
        }));

        // Then
        assert_eq!(Err(SubjectError::NotFound), result);
        assert_eq!(1, model.observer_count(), "Should keep attached observers");
    }

    #[test]
    fn test_same_observer_attached_twice_should_be_notified_twice() {
        // Given
        let calls = Calls::default();
        let recorder = Rc::new(Recorder {
            id: 0,
            calls: calls.clone(),
        });
        let mut model = Model::<i32>::new(0);
        model.attach(recorder.clone());
        model.attach(recorder);

        // When
        model.set_value(3).unwrap();

        // Then
        assert_eq!(vec![(0, 3), (0, 3)], *calls.borrow());
    }

    #[test]
    fn test_set_value_should_keep_value_when_observer_fails() {
        // Given
        let mut broken = MockDisplay::new();
        broken
            .expect_update()
            .times(1)
            .returning(|_| Err(UpdateError::new("display unplugged")));
        let calls = Calls::default();
        let mut model = Model::<i32>::with_policy(0, NotifyPolicy::BestEffort);
        model.attach(Rc::new(broken));
        model.attach(Rc::new(Recorder {
            id: 1,
            calls: calls.clone(),
        }));

        // When
        let result = model.set_value(11);

        // Then
        assert!(
            matches!(result, Err(ref e) if e.failures.len() == 1 && e.failures[0].position == 0),
            "Should report the failing observer"
        );
        assert_eq!(11, model.get_value());
        assert_eq!(vec![(1, 11)], *calls.borrow(), "Should still notify the others");
    }

    #[test]
    fn test_notify_should_broadcast_current_value() {
        // Given
        let calls = Calls::default();
        let mut model = Model::<i32>::new(5);
        model.attach(Rc::new(Recorder {
            id: 0,
            calls: calls.clone(),
        }));

        // When
        model.notify().unwrap();

        // Then
        assert_eq!(vec![(0, 5)], *calls.borrow());
        assert_eq!(5, model.get_value(), "Should not change the value");
    }

    #[test]
    fn test_every_attached_observer_should_receive_one_update() {
        // Given
        let mut rng = get_seeded_rng().unwrap();
        let count = rng.gen_range(1..32);
        let value = rng.gen::<i32>();
        let calls = Calls::default();
        let mut model = Model::<i32>::new(0);
        for id in 0..count {
            model.attach(Rc::new(Recorder {
                id,
                calls: calls.clone(),
            }));
        }

        // When
        model.set_value(value).unwrap();

        // Then
        let expected = (0..count).map(|id| (id, value)).collect::<Vec<_>>();
        assert_eq!(expected, *calls.borrow());
        assert_eq!(value, model.get_value());
    }

    #[test]
    fn test_attach_detach_scenario() {
        // Given
        let calls = Calls::default();
        let a: Rc<dyn Observer<i32>> = Rc::new(Recorder {
            id: 0,
            calls: calls.clone(),
        });
        let b: Rc<dyn Observer<i32>> = Rc::new(Recorder {
            id: 1,
            calls: calls.clone(),
        });
        let mut model = Model::<i32>::new(0);
        model.attach(a.clone());
        model.attach(b.clone());

        // When
        model.set_value(1).unwrap();
        model.detach(b).unwrap();
        model.set_value(2).unwrap();
        model.attach(a.clone());
        model.set_value(3).unwrap();

        // Then
        assert_eq!(
            vec![(0, 1), (1, 1), (0, 2), (0, 3), (0, 3)],
            *calls.borrow()
        );
    }

    #[test]
    fn test_get_value_should_return_last_value_set() {
        // Given
        let mut rng = get_seeded_rng().unwrap();
        let values = random_values(&mut rng, 16, i32::MIN..=i32::MAX);
        let calls = Calls::default();
        let mut model = Model::<i32>::new(0);
        model.attach(Rc::new(Recorder {
            id: 0,
            calls: calls.clone(),
        }));

        for &value in &values {
            // When
            model.set_value(value).unwrap();

            // Then
            assert_eq!(value, model.get_value(), "Should not transform the value");
        }
        let expected = values.iter().map(|&v| (0, v)).collect::<Vec<_>>();
        assert_eq!(expected, *calls.borrow());
    }
}
