use super::actions::Action;
use super::reducer::reduce;
use super::state::AppState;
use super::stream::{Observable, Subject};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// Read/derive and request-write access to application state.
pub trait StateStore {
    /// A view over state that emits the current projection on subscribe and
    /// afterwards only when the projection changes.
    fn select<T>(&self, selector: fn(&AppState) -> T) -> Observable<T>
    where
        T: Clone + PartialEq + 'static;

    fn dispatch(&self, action: Action);
}

pub struct Store {
    state: Subject<AppState>,
    actions: Subject<Action>,
    queue: RefCell<VecDeque<Action>>,
    dispatching: Cell<bool>,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        Self {
            state: Subject::with_value(initial),
            actions: Subject::new(),
            queue: RefCell::new(VecDeque::new()),
            dispatching: Cell::new(false),
        }
    }

    pub fn state(&self) -> AppState {
        self.state.value().unwrap_or_default()
    }

    /// Every action after it has been reduced.
    pub fn actions(&self) -> Observable<Action> {
        self.actions.as_observable()
    }

    pub fn state_observer_count(&self) -> usize {
        self.state.observer_count()
    }

    fn process(&self, action: Action) {
        tracing::debug!(action = action.name(), "dispatch");
        let next = reduce(&self.state(), &action);
        self.state.next(next);
        self.actions.next(action);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl StateStore for Store {
    fn select<T>(&self, selector: fn(&AppState) -> T) -> Observable<T>
    where
        T: Clone + PartialEq + 'static,
    {
        self.state
            .as_observable()
            .map(move |state| selector(state))
            .distinct_until_changed()
    }

    fn dispatch(&self, action: Action) {
        self.queue.borrow_mut().push_back(action);
        // Actions dispatched from listeners run after the current one.
        if self.dispatching.replace(true) {
            return;
        }
        loop {
            let next = self.queue.borrow_mut().pop_front();
            match next {
                Some(action) => self.process(action),
                None => break,
            }
        }
        self.dispatching.set(false);
    }
}
