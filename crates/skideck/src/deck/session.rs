use std::rc::Rc;

use tracing::{debug, info};

use super::navigator::Navigator;
use super::panels::{DeckMode, PanelVisibility};
use super::shortcuts::{KeyEvent, ShortcutAction, ShortcutDispatcher};
use super::slide::{Notes, Slide, SlideRegistry};
use super::state::{ContainerState, DeckState, NavDirection};
use crate::sync::{SyncPublisher, SyncReceiver};

/// Everything one open view of the deck owns.
pub struct DeckSession {
    navigator: Navigator,
    panels: PanelVisibility,
    dark_mode: bool,
    publisher: Option<SyncPublisher>,
    receiver: Option<SyncReceiver>,
    shortcuts: Rc<ShortcutDispatcher<DeckSession>>,
}

/// The shortcut table every view uses, bound to session operations.
pub fn deck_shortcuts() -> ShortcutDispatcher<DeckSession> {
    ShortcutDispatcher::new()
        .bind(ShortcutAction::Next, |s: &mut DeckSession| {
            s.navigator.next();
        })
        .bind(ShortcutAction::Previous, |s: &mut DeckSession| {
            s.navigator.previous();
        })
        .bind(ShortcutAction::SwitchTheme, DeckSession::toggle_theme)
        .bind(ShortcutAction::ShowToolbar, |s: &mut DeckSession| {
            s.panels.toggle_toolbar()
        })
        .bind(ShortcutAction::ShowTableOfContent, |s: &mut DeckSession| {
            s.panels.toggle_table_of_content()
        })
        .bind(ShortcutAction::ShowShortcutGuide, |s: &mut DeckSession| {
            s.panels.toggle_shortcuts()
        })
        .bind(ShortcutAction::DismissAll, |s: &mut DeckSession| {
            s.panels.dismiss_all()
        })
        .bind(ShortcutAction::ShowHint, |s: &mut DeckSession| {
            s.panels.toggle_hint()
        })
        .bind(ShortcutAction::ShowNotes, |s: &mut DeckSession| {
            s.panels.toggle_notes()
        })
}

impl DeckSession {
    /// A session starting on `start_index`, clamped to the deck.
    pub fn new(registry: SlideRegistry, mode: DeckMode, start_index: usize) -> Self {
        let start = DeckState {
            slide_index: start_index.min(registry.last_index()),
            direction: NavDirection::Forward,
        };
        Self {
            navigator: Navigator::new(registry, ContainerState::new(start)),
            panels: PanelVisibility::new(mode),
            dark_mode: false,
            publisher: None,
            receiver: None,
            shortcuts: Rc::new(deck_shortcuts()),
        }
    }

    pub fn with_dark_mode(mut self, dark: bool) -> Self {
        self.dark_mode = dark;
        self
    }

    /// Broadcast every effective navigation from now on.
    pub fn attach_publisher(&mut self, publisher: SyncPublisher) {
        let hook = publisher.clone();
        self.navigator.on_transition(move |state| hook.publish(state));
        self.publisher = Some(publisher);
    }

    pub fn attach_receiver(&mut self, receiver: SyncReceiver) {
        self.receiver = Some(receiver);
    }

    /// Announce the current position so a peer starts in step.
    pub fn announce(&self) {
        if let Some(publisher) = &self.publisher {
            publisher.publish(&self.navigator.state().get());
        }
    }

    /// Adopt whatever a peer last published.
    pub fn catch_up(&mut self) -> bool {
        let Some(receiver) = &self.receiver else {
            return false;
        };
        let (registry, state) = self.navigator.parts_mut();
        let applied = receiver.catch_up(registry, state);
        if applied {
            info!(slide = self.navigator.current_index(), "caught up with peer");
        }
        applied
    }

    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        let shortcuts = Rc::clone(&self.shortcuts);
        shortcuts.handle(event, self)
    }

    /// Apply state other views published since the last call.
    pub fn pump_sync(&mut self) -> usize {
        let Some(receiver) = &self.receiver else {
            return 0;
        };
        let (registry, state) = self.navigator.parts_mut();
        let applied = receiver.drain(registry, state);
        if applied > 0 {
            debug!(applied, slide = self.navigator.current_index(), "applied remote state");
        }
        applied
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    pub fn panels(&self) -> &PanelVisibility {
        &self.panels
    }

    pub fn mode(&self) -> DeckMode {
        self.panels.mode()
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn current_slide(&self) -> Slide {
        self.navigator.current_slide()
    }

    pub fn notes(&self) -> Option<Notes> {
        self.current_slide().notes()
    }

    pub fn is_syncing(&self) -> bool {
        self.publisher.is_some() || self.receiver.is_some()
    }
}
