use serde::{Deserialize, Serialize};

/// Which way the last navigation went. Only used to pick the transition animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NavDirection {
    #[default]
    Forward,
    Backward,
}

/// The value a view renders from: current slide position and the direction it
/// was reached in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeckState {
    pub slide_index: usize,
    pub direction: NavDirection,
}

/// Handle returned by [`ContainerState::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&DeckState)>;

/// Observable navigation state of one view.
///
/// Every call to [`ContainerState::set`] replaces the whole value in one
/// assignment and then runs each registered observer exactly once, so an
/// observer never sees a slide index paired with a stale direction.
pub struct ContainerState {
    current: DeckState,
    observers: Vec<(ObserverId, Observer)>,
    next_id: u64,
}

impl ContainerState {
    pub fn new(initial: DeckState) -> Self {
        Self {
            current: initial,
            observers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn get(&self) -> DeckState {
        self.current
    }

    pub fn slide_index(&self) -> usize {
        self.current.slide_index
    }

    pub fn direction(&self) -> NavDirection {
        self.current.direction
    }

    pub fn set(&mut self, state: DeckState) {
        self.current = state;
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.current);
        }
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&DeckState) + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }
}

impl Default for ContainerState {
    fn default() -> Self {
        Self::new(DeckState::default())
    }
}

impl std::fmt::Debug for ContainerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerState")
            .field("current", &self.current)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_default_state() {
        let state = ContainerState::default();
        assert_eq!(state.slide_index(), 0);
        assert_eq!(state.direction(), NavDirection::Forward);
    }

    #[test]
    fn test_observers_notified_once_per_set() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut state = ContainerState::default();

        let sink = Rc::clone(&seen);
        state.subscribe(move |s| sink.borrow_mut().push(*s));

        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        state.subscribe(move |_| *counter.borrow_mut() += 1);

        let next = DeckState {
            slide_index: 3,
            direction: NavDirection::Backward,
        };
        state.set(next);

        assert_eq!(*seen.borrow(), vec![next]);
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(state.get(), next);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let calls = Rc::new(RefCell::new(0));
        let mut state = ContainerState::default();
        let counter = Rc::clone(&calls);
        let id = state.subscribe(move |_| *counter.borrow_mut() += 1);

        state.set(DeckState::default());
        assert!(state.unsubscribe(id));
        assert!(!state.unsubscribe(id));
        state.set(DeckState::default());

        assert_eq!(*calls.borrow(), 1);
    }
}
