/// Physical keys the deck reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    ArrowUp,
    ArrowDown,
    Space,
    Enter,
    Backspace,
    Escape,
    C,
    D,
    H,
    N,
    T,
}

impl Key {
    /// Short label for the shortcuts guide.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ArrowRight => "\u{2192}",
            Self::ArrowLeft => "\u{2190}",
            Self::ArrowUp => "\u{2191}",
            Self::ArrowDown => "\u{2193}",
            Self::Space => "Space",
            Self::Enter => "Enter",
            Self::Backspace => "BackSpace",
            Self::Escape => "Esc",
            Self::C => "C",
            Self::D => "D",
            Self::H => "H",
            Self::N => "N",
            Self::T => "T",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    Down,
    Repeat,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    pub fn down(key: Key) -> Self {
        Self {
            key,
            kind: KeyEventKind::Down,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutAction {
    Next,
    Previous,
    SwitchTheme,
    ShowToolbar,
    ShowTableOfContent,
    ShowShortcutGuide,
    DismissAll,
    ShowHint,
    ShowNotes,
}

impl ShortcutAction {
    /// Actions in the order the shortcuts guide lists them.
    pub const GUIDE: [ShortcutAction; 9] = [
        ShortcutAction::Next,
        ShortcutAction::Previous,
        ShortcutAction::SwitchTheme,
        ShortcutAction::ShowToolbar,
        ShortcutAction::ShowTableOfContent,
        ShortcutAction::ShowShortcutGuide,
        ShortcutAction::DismissAll,
        ShortcutAction::ShowNotes,
        ShortcutAction::ShowHint,
    ];

    pub fn keys(&self) -> &'static [Key] {
        match self {
            Self::Next => &[Key::ArrowRight, Key::Space, Key::Enter],
            Self::Previous => &[Key::ArrowLeft, Key::Backspace],
            Self::SwitchTheme => &[Key::D],
            Self::ShowToolbar => &[Key::ArrowUp],
            Self::ShowTableOfContent => &[Key::T],
            Self::ShowShortcutGuide => &[Key::C],
            Self::DismissAll => &[Key::Escape],
            Self::ShowHint => &[Key::H, Key::ArrowDown],
            Self::ShowNotes => &[Key::N],
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Self::Next => "Next Slide",
            Self::Previous => "Previous Slide",
            Self::SwitchTheme => "Switch Theme",
            Self::ShowToolbar => "Show/Hide Toolbar",
            Self::ShowTableOfContent => "Show/Hide Table of Content",
            Self::ShowShortcutGuide => "Show/Hide Shortcuts Guide",
            Self::DismissAll => "Dismiss All",
            Self::ShowHint => "Show/Hide hint",
            Self::ShowNotes => "Show/Hide Notes",
        }
    }

    pub fn matches(&self, key: Key) -> bool {
        self.keys().contains(&key)
    }
}

type Binding<C> = Box<dyn Fn(&mut C)>;

/// Maps key-down events to the first registered action whose key set
/// contains the key, and runs that action's binding against a context.
pub struct ShortcutDispatcher<C> {
    bindings: Vec<(ShortcutAction, Binding<C>)>,
}

impl<C> ShortcutDispatcher<C> {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Register `action`. Earlier registrations win when key sets overlap.
    pub fn bind(mut self, action: ShortcutAction, binding: impl Fn(&mut C) + 'static) -> Self {
        self.bindings.push((action, Box::new(binding)));
        self
    }

    pub fn action_for(&self, key: Key) -> Option<ShortcutAction> {
        self.bindings
            .iter()
            .map(|(action, _)| *action)
            .find(|action| action.matches(key))
    }

    /// Returns `true` when the event was consumed.
    pub fn handle(&self, event: KeyEvent, context: &mut C) -> bool {
        if event.kind != KeyEventKind::Down {
            return false;
        }

        let Some((action, binding)) = self
            .bindings
            .iter()
            .find(|(action, _)| action.matches(event.key))
        else {
            return false;
        };

        tracing::trace!(?action, key = ?event.key, "shortcut");
        binding(context);
        true
    }
}

impl<C> Default for ShortcutDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}
