use tracing::debug;

use super::slide::{Slide, SlideRegistry};
use super::state::{ContainerState, DeckState, NavDirection};
use crate::error::Result;

type TransitionHook = Box<dyn FnMut(&DeckState)>;

/// Moves a view through its slide registry.
///
/// The hook installed with [`Navigator::on_transition`] runs after every
/// navigation that changes the slide index, and only then. Boundary no-ops and
/// jumps to the current slide never reach it.
pub struct Navigator {
    registry: SlideRegistry,
    state: ContainerState,
    on_transition: Option<TransitionHook>,
}

impl Navigator {
    pub fn new(registry: SlideRegistry, state: ContainerState) -> Self {
        Self {
            registry,
            state,
            on_transition: None,
        }
    }

    pub fn on_transition(&mut self, hook: impl FnMut(&DeckState) + 'static) {
        self.on_transition = Some(Box::new(hook));
    }

    pub fn registry(&self) -> &SlideRegistry {
        &self.registry
    }

    pub fn state(&self) -> &ContainerState {
        &self.state
    }

    /// Direct access for applying state that did not come from local navigation.
    pub fn state_mut(&mut self) -> &mut ContainerState {
        &mut self.state
    }

    pub fn parts_mut(&mut self) -> (&SlideRegistry, &mut ContainerState) {
        (&self.registry, &mut self.state)
    }

    pub fn current_index(&self) -> usize {
        self.state.slide_index()
    }

    pub fn current_slide(&self) -> Slide {
        self.registry
            .get(self.state.slide_index())
            .unwrap_or_else(|| self.registry.first())
    }

    pub fn direction(&self) -> NavDirection {
        self.state.direction()
    }

    pub fn next(&mut self) -> bool {
        let index = self.state.slide_index();
        if index >= self.registry.last_index() {
            return false;
        }
        self.commit(index + 1, NavDirection::Forward)
    }

    pub fn previous(&mut self) -> bool {
        let index = self.state.slide_index();
        if index == 0 {
            return false;
        }
        self.commit(index - 1, NavDirection::Backward)
    }

    pub fn jump_to(&mut self, slide: Slide) -> Result<bool> {
        let target = self.registry.index_of(slide)?;
        Ok(self.jump(target))
    }

    pub fn jump_to_index(&mut self, index: usize) -> bool {
        if index >= self.registry.len() {
            return false;
        }
        self.jump(index)
    }

    fn jump(&mut self, target: usize) -> bool {
        // Jumping to the current slide counts as backward.
        let direction = if target > self.state.slide_index() {
            NavDirection::Forward
        } else {
            NavDirection::Backward
        };
        self.commit(target, direction)
    }

    fn commit(&mut self, target: usize, direction: NavDirection) -> bool {
        let from = self.state.slide_index();
        let next = DeckState {
            slide_index: target,
            direction,
        };
        self.state.set(next);

        if from == target {
            return false;
        }

        debug!(from, to = target, ?direction, "navigated");
        if let Some(hook) = self.on_transition.as_mut() {
            hook(&next);
        }
        true
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("registry", &self.registry)
            .field("state", &self.state)
            .field("on_transition", &self.on_transition.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn navigator_at(index: usize) -> Navigator {
        Navigator::new(
            SlideRegistry::deck(),
            ContainerState::new(DeckState {
                slide_index: index,
                direction: NavDirection::Forward,
            }),
        )
    }

    fn recording(nav: &mut Navigator) -> Rc<RefCell<Vec<DeckState>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        nav.on_transition(move |s| sink.borrow_mut().push(*s));
        log
    }

    #[test]
    fn test_next_reaches_last_slide_from_any_start() {
        for start in 0..5 {
            let mut nav = navigator_at(start);
            for _ in 0..(4 - start) {
                assert!(nav.next());
            }
            assert_eq!(nav.current_index(), 4);
            assert!(!nav.next());
            assert!(!nav.next());
            assert_eq!(nav.current_index(), 4);
        }
    }

    #[test]
    fn test_previous_at_first_slide_is_noop() {
        let mut fresh = navigator_at(0);
        assert!(!fresh.previous());
        assert_eq!(fresh.current_index(), 0);
        assert_eq!(fresh.direction(), NavDirection::Forward);

        let mut nav = navigator_at(1);
        assert!(nav.previous());
        let log = recording(&mut nav);
        assert!(!nav.previous());
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.direction(), NavDirection::Backward);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_next_and_previous_set_direction() {
        let mut nav = navigator_at(2);
        nav.previous();
        assert_eq!(nav.current_index(), 1);
        assert_eq!(nav.direction(), NavDirection::Backward);
        nav.next();
        assert_eq!(nav.current_index(), 2);
        assert_eq!(nav.direction(), NavDirection::Forward);
    }

    #[test]
    fn test_jump_to_sets_direction_by_position() {
        let mut nav = navigator_at(1);
        assert!(nav.jump_to(Slide::HorizontalSegmentsDemo).unwrap());
        assert_eq!(nav.current_index(), 4);
        assert_eq!(nav.direction(), NavDirection::Forward);

        assert!(nav.jump_to(Slide::Example).unwrap());
        assert_eq!(nav.current_index(), 1);
        assert_eq!(nav.direction(), NavDirection::Backward);
    }

    #[test]
    fn test_jump_to_current_slide_is_backward() {
        let mut nav = navigator_at(2);
        let log = recording(&mut nav);
        assert_eq!(nav.direction(), NavDirection::Forward);

        assert!(!nav.jump_to(Slide::KodeViewer).unwrap());
        assert_eq!(nav.current_index(), 2);
        assert_eq!(nav.direction(), NavDirection::Backward);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_jump_to_slide_outside_registry() {
        let registry = SlideRegistry::new(vec![Slide::Introduction, Slide::Example]).unwrap();
        let mut nav = Navigator::new(registry, ContainerState::default());
        assert!(nav.jump_to(Slide::KodeViewer).is_err());
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_jump_to_index_out_of_range_is_noop() {
        let mut nav = navigator_at(3);
        assert!(!nav.jump_to_index(5));
        assert_eq!(nav.current_index(), 3);
        assert_eq!(nav.direction(), NavDirection::Forward);
    }

    #[test]
    fn test_hook_runs_only_on_effective_transitions() {
        let mut nav = navigator_at(0);
        let log = recording(&mut nav);

        nav.previous();
        nav.next();
        nav.next();
        nav.jump_to_index(2);
        nav.jump_to_index(0);

        let log = log.borrow();
        assert_eq!(
            *log,
            vec![
                DeckState {
                    slide_index: 1,
                    direction: NavDirection::Forward
                },
                DeckState {
                    slide_index: 2,
                    direction: NavDirection::Forward
                },
                DeckState {
                    slide_index: 0,
                    direction: NavDirection::Backward
                },
            ]
        );
    }

    #[test]
    fn test_current_slide_tracks_index() {
        let mut nav = navigator_at(0);
        assert_eq!(nav.current_slide(), Slide::Introduction);
        nav.next();
        assert_eq!(nav.current_slide(), Slide::Example);
    }
}
