//! Synchronous, single-threaded push streams.
//!
//! Values are delivered on the caller's stack as soon as they are emitted.
//! A `Subscription` releases its listener when dropped.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Observer<T> = Box<dyn FnMut(&T)>;
type SharedObserver<T> = Rc<RefCell<Observer<T>>>;

/// Handle to an active listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Releases the listener. Safe to call more than once.
    pub fn unsubscribe(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.teardown.is_none()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// A cloneable, lazily subscribed stream of values.
pub struct Observable<T> {
    subscribe_fn: Rc<dyn Fn(Observer<T>) -> Subscription>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            subscribe_fn: Rc::clone(&self.subscribe_fn),
        }
    }
}

impl<T: 'static> Observable<T> {
    pub fn new(subscribe_fn: impl Fn(Observer<T>) -> Subscription + 'static) -> Self {
        Self {
            subscribe_fn: Rc::new(subscribe_fn),
        }
    }

    pub fn subscribe(&self, observer: impl FnMut(&T) + 'static) -> Subscription {
        (self.subscribe_fn)(Box::new(observer))
    }

    pub fn map<U: 'static>(&self, project: impl Fn(&T) -> U + 'static) -> Observable<U> {
        let source = self.clone();
        let project = Rc::new(project);
        Observable::new(move |mut observer: Observer<U>| {
            let project = Rc::clone(&project);
            source.subscribe(move |value| observer(&project(value)))
        })
    }

    /// Suppresses values equal to the previously delivered one.
    pub fn distinct_until_changed(&self) -> Self
    where
        T: Clone + PartialEq,
    {
        let source = self.clone();
        Observable::new(move |mut observer: Observer<T>| {
            let mut last: Option<T> = None;
            source.subscribe(move |value| {
                if last.as_ref() != Some(value) {
                    last = Some(value.clone());
                    observer(value);
                }
            })
        })
    }
}

/// Emits the latest pair whenever either side emits, once both sides have
/// emitted at least once.
pub fn combine_latest<A, B>(first: &Observable<A>, second: &Observable<B>) -> Observable<(A, B)>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    let first = first.clone();
    let second = second.clone();
    Observable::new(move |observer: Observer<(A, B)>| {
        let latest: Rc<RefCell<(Option<A>, Option<B>)>> = Rc::new(RefCell::new((None, None)));
        let observer: SharedObserver<(A, B)> = Rc::new(RefCell::new(observer));

        let first_subscription = {
            let latest = Rc::clone(&latest);
            let observer = Rc::clone(&observer);
            first.subscribe(move |value| {
                latest.borrow_mut().0 = Some(value.clone());
                emit_pair(&latest, &observer);
            })
        };
        let second_subscription = {
            let latest = Rc::clone(&latest);
            let observer = Rc::clone(&observer);
            second.subscribe(move |value| {
                latest.borrow_mut().1 = Some(value.clone());
                emit_pair(&latest, &observer);
            })
        };

        Subscription::new(move || drop((first_subscription, second_subscription)))
    })
}

fn emit_pair<A: Clone, B: Clone>(
    latest: &RefCell<(Option<A>, Option<B>)>,
    observer: &RefCell<Observer<(A, B)>>,
) {
    let pair = match &*latest.borrow() {
        (Some(a), Some(b)) => Some((a.clone(), b.clone())),
        _ => None,
    };
    if let Some(pair) = pair {
        (&mut *observer.borrow_mut())(&pair);
    }
}

struct Listener<T> {
    id: u64,
    observer: SharedObserver<T>,
}

struct SubjectInner<T> {
    listeners: RefCell<Vec<Listener<T>>>,
    next_id: Cell<u64>,
    current: RefCell<Option<T>>,
    replay: bool,
}

impl<T> SubjectInner<T> {
    fn remove(&self, id: u64) {
        self.listeners.borrow_mut().retain(|listener| listener.id != id);
    }

    fn is_listening(&self, id: u64) -> bool {
        self.listeners.borrow().iter().any(|listener| listener.id == id)
    }
}

/// Multicast source. Created with [`Subject::with_value`] it replays the
/// current value to every new subscriber.
pub struct Subject<T> {
    inner: Rc<SubjectInner<T>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> Subject<T> {
    pub fn new() -> Self {
        Self::build(None, false)
    }

    pub fn with_value(value: T) -> Self {
        Self::build(Some(value), true)
    }

    fn build(current: Option<T>, replay: bool) -> Self {
        Self {
            inner: Rc::new(SubjectInner {
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                current: RefCell::new(current),
                replay,
            }),
        }
    }

    pub fn next(&self, value: T) {
        *self.inner.current.borrow_mut() = Some(value.clone());

        // Snapshot so listeners may subscribe or unsubscribe while we deliver.
        let snapshot: Vec<(u64, SharedObserver<T>)> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|listener| (listener.id, Rc::clone(&listener.observer)))
            .collect();

        for (id, observer) in snapshot {
            if !self.inner.is_listening(id) {
                continue;
            }
            match observer.try_borrow_mut() {
                Ok(mut observer) => (&mut *observer)(&value),
                Err(_) => tracing::warn!(listener = id, "skipped re-entrant emission"),
            }
        }
    }

    pub fn value(&self) -> Option<T> {
        self.inner.current.borrow().clone()
    }

    pub fn observer_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub fn as_observable(&self) -> Observable<T> {
        let inner = Rc::clone(&self.inner);
        Observable::new(move |observer: Observer<T>| subscribe_to(&inner, observer))
    }
}

impl<T: Clone + 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn subscribe_to<T: Clone + 'static>(
    inner: &Rc<SubjectInner<T>>,
    observer: Observer<T>,
) -> Subscription {
    let id = inner.next_id.get();
    inner.next_id.set(id + 1);

    let observer: SharedObserver<T> = Rc::new(RefCell::new(observer));
    inner.listeners.borrow_mut().push(Listener {
        id,
        observer: Rc::clone(&observer),
    });

    if inner.replay {
        let current = inner.current.borrow().clone();
        if let Some(value) = current {
            (&mut *observer.borrow_mut())(&value);
        }
    }

    let weak: Weak<SubjectInner<T>> = Rc::downgrade(inner);
    Subscription::new(move || {
        if let Some(inner) = weak.upgrade() {
            inner.remove(id);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(&T) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |value: &T| sink.borrow_mut().push(value.clone()))
    }

    #[test]
    fn test_subject_delivers_to_all_subscribers() {
        let subject: Subject<i32> = Subject::new();
        let (first_seen, first) = recorder::<i32>();
        let (second_seen, second) = recorder::<i32>();

        let _a = subject.as_observable().subscribe(first);
        let _b = subject.as_observable().subscribe(second);
        subject.next(1);
        subject.next(2);

        assert_eq!(*first_seen.borrow(), vec![1, 2]);
        assert_eq!(*second_seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_plain_subject_does_not_replay() {
        let subject: Subject<i32> = Subject::new();
        subject.next(7);

        let (seen, sink) = recorder::<i32>();
        let _sub = subject.as_observable().subscribe(sink);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_subject_with_value_replays_current_value() {
        let subject = Subject::with_value("a".to_string());
        subject.next("b".to_string());

        let (seen, sink) = recorder::<String>();
        let _sub = subject.as_observable().subscribe(sink);
        assert_eq!(*seen.borrow(), vec!["b".to_string()]);
    }

    #[test]
    fn test_dropping_subscription_stops_delivery() {
        let subject: Subject<i32> = Subject::new();
        let (seen, sink) = recorder::<i32>();

        let subscription = subject.as_observable().subscribe(sink);
        subject.next(1);
        drop(subscription);
        subject.next(2);

        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(subject.observer_count(), 0);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let subject: Subject<i32> = Subject::new();
        let mut subscription = subject.as_observable().subscribe(|_| {});
        assert_eq!(subject.observer_count(), 1);

        subscription.unsubscribe();
        subscription.unsubscribe();

        assert!(subscription.is_closed());
        assert_eq!(subject.observer_count(), 0);
    }

    #[test]
    fn test_listener_removed_mid_emission_is_skipped() {
        let subject: Subject<i32> = Subject::new();
        let (seen, sink) = recorder::<i32>();
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let killer = {
            let victim = Rc::clone(&victim);
            subject.as_observable().subscribe(move |_| {
                victim.borrow_mut().take();
            })
        };
        *victim.borrow_mut() = Some(subject.as_observable().subscribe(sink));

        subject.next(1);
        assert!(seen.borrow().is_empty());
        drop(killer);
    }

    #[test]
    fn test_map_and_distinct_until_changed() {
        let subject: Subject<i32> = Subject::new();
        let (seen, sink) = recorder::<bool>();

        let _sub = subject
            .as_observable()
            .map(|value: &i32| *value > 10)
            .distinct_until_changed()
            .subscribe(sink);

        for value in [1, 2, 11, 12, 3] {
            subject.next(value);
        }

        assert_eq!(*seen.borrow(), vec![false, true, false]);
    }

    #[test]
    fn test_combine_latest_waits_for_both_inputs() {
        let left: Subject<i32> = Subject::new();
        let right: Subject<char> = Subject::new();
        let (seen, sink) = recorder::<(i32, char)>();

        let _sub = combine_latest(&left.as_observable(), &right.as_observable()).subscribe(sink);

        left.next(1);
        left.next(2);
        assert!(seen.borrow().is_empty());

        right.next('a');
        assert_eq!(*seen.borrow(), vec![(2, 'a')]);
    }

    #[test]
    fn test_combine_latest_recomputes_with_last_known_values() {
        let left: Subject<i32> = Subject::new();
        let right: Subject<char> = Subject::new();
        let (seen, sink) = recorder::<(i32, char)>();

        let _sub = combine_latest(&left.as_observable(), &right.as_observable()).subscribe(sink);

        left.next(1);
        right.next('a');
        right.next('b');
        left.next(2);

        assert_eq!(*seen.borrow(), vec![(1, 'a'), (1, 'b'), (2, 'b')]);
    }

    #[test]
    fn test_combine_latest_releases_both_inputs() {
        let left: Subject<i32> = Subject::new();
        let right: Subject<i32> = Subject::new();

        let subscription =
            combine_latest(&left.as_observable(), &right.as_observable()).subscribe(|_| {});
        assert_eq!(left.observer_count(), 1);
        assert_eq!(right.observer_count(), 1);

        drop(subscription);
        assert_eq!(left.observer_count(), 0);
        assert_eq!(right.observer_count(), 0);
    }
}
