use serde::{Deserialize, Serialize};

/// How a view presents the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DeckMode {
    /// Slide content only, for the audience.
    Presenter,
    /// Slide content with side panels and speaker notes.
    Local,
}

impl DeckMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "presenter" => Some(Self::Presenter),
            "local" => Some(Self::Local),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Presenter => "presenter",
            Self::Local => "local",
        }
    }
}

/// The side panels that exclude one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePanel {
    #[default]
    None,
    TableOfContent,
    Shortcuts,
    Notes,
}

/// Which auxiliary panels a view shows.
///
/// At most one of table of contents, shortcuts and notes is visible. Opening
/// or closing one of them also hides the hint. The toolbar is independent.
/// In [`DeckMode::Presenter`] only the toolbar can be toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelVisibility {
    mode: DeckMode,
    active: ActivePanel,
    toolbar: bool,
    hint: bool,
}

impl PanelVisibility {
    pub fn new(mode: DeckMode) -> Self {
        match mode {
            DeckMode::Local => Self {
                mode,
                active: ActivePanel::Notes,
                toolbar: false,
                hint: true,
            },
            DeckMode::Presenter => Self {
                mode,
                active: ActivePanel::None,
                toolbar: false,
                hint: false,
            },
        }
    }

    pub fn mode(&self) -> DeckMode {
        self.mode
    }

    pub fn active(&self) -> ActivePanel {
        self.active
    }

    pub fn toolbar_visible(&self) -> bool {
        self.toolbar
    }

    pub fn hint_visible(&self) -> bool {
        self.hint
    }

    pub fn table_of_content_visible(&self) -> bool {
        self.active == ActivePanel::TableOfContent
    }

    pub fn shortcuts_visible(&self) -> bool {
        self.active == ActivePanel::Shortcuts
    }

    pub fn notes_visible(&self) -> bool {
        self.active == ActivePanel::Notes
    }

    pub fn toggle_toolbar(&mut self) {
        self.toolbar = !self.toolbar;
    }

    pub fn toggle_table_of_content(&mut self) {
        self.toggle_exclusive(ActivePanel::TableOfContent);
    }

    pub fn toggle_shortcuts(&mut self) {
        self.toggle_exclusive(ActivePanel::Shortcuts);
    }

    pub fn toggle_notes(&mut self) {
        self.toggle_exclusive(ActivePanel::Notes);
    }

    pub fn toggle_hint(&mut self) {
        if self.mode == DeckMode::Local {
            self.hint = !self.hint;
        }
    }

    pub fn dismiss_all(&mut self) {
        self.active = ActivePanel::None;
        self.toolbar = false;
        self.hint = false;
    }

    fn toggle_exclusive(&mut self, panel: ActivePanel) {
        if self.mode != DeckMode::Local {
            return;
        }
        self.active = if self.active == panel {
            ActivePanel::None
        } else {
            panel
        };
        self.hint = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_with(active: ActivePanel) -> PanelVisibility {
        let mut panels = PanelVisibility::new(DeckMode::Local);
        panels.dismiss_all();
        match active {
            ActivePanel::None => {}
            ActivePanel::TableOfContent => panels.toggle_table_of_content(),
            ActivePanel::Shortcuts => panels.toggle_shortcuts(),
            ActivePanel::Notes => panels.toggle_notes(),
        }
        panels
    }

    #[test]
    fn test_initial_state_per_mode() {
        let local = PanelVisibility::new(DeckMode::Local);
        assert!(local.notes_visible());
        assert!(local.hint_visible());
        assert!(!local.toolbar_visible());

        let presenter = PanelVisibility::new(DeckMode::Presenter);
        assert_eq!(presenter.active(), ActivePanel::None);
        assert!(!presenter.hint_visible());
        assert!(!presenter.toolbar_visible());
    }

    #[test]
    fn test_table_of_content_replaces_shortcuts() {
        let mut panels = local_with(ActivePanel::Shortcuts);
        assert!(panels.shortcuts_visible());

        panels.toggle_table_of_content();
        assert!(panels.table_of_content_visible());
        assert!(!panels.shortcuts_visible());
        assert!(!panels.notes_visible());
    }

    #[test]
    fn test_exclusive_toggle_hides_hint() {
        let mut panels = PanelVisibility::new(DeckMode::Local);
        assert!(panels.hint_visible());
        panels.toggle_shortcuts();
        assert!(panels.shortcuts_visible());
        assert!(!panels.hint_visible());
    }

    #[test]
    fn test_toggle_active_panel_closes_it() {
        let mut panels = local_with(ActivePanel::Notes);
        panels.toggle_notes();
        assert_eq!(panels.active(), ActivePanel::None);
    }

    #[test]
    fn test_toolbar_is_independent() {
        let mut panels = local_with(ActivePanel::TableOfContent);
        panels.toggle_hint();
        panels.toggle_toolbar();
        assert!(panels.toolbar_visible());
        assert!(panels.table_of_content_visible());
        assert!(panels.hint_visible());

        panels.toggle_toolbar();
        assert!(!panels.toolbar_visible());
        assert!(panels.table_of_content_visible());
    }

    #[test]
    fn test_dismiss_all_clears_everything() {
        let mut panels = local_with(ActivePanel::Shortcuts);
        panels.toggle_toolbar();
        panels.toggle_hint();
        panels.dismiss_all();

        assert_eq!(panels.active(), ActivePanel::None);
        assert!(!panels.toolbar_visible());
        assert!(!panels.hint_visible());
    }

    #[test]
    fn test_presenter_mode_only_toggles_toolbar() {
        let mut panels = PanelVisibility::new(DeckMode::Presenter);
        panels.toggle_table_of_content();
        panels.toggle_shortcuts();
        panels.toggle_notes();
        panels.toggle_hint();
        assert_eq!(panels.active(), ActivePanel::None);
        assert!(!panels.hint_visible());

        panels.toggle_toolbar();
        assert!(panels.toolbar_visible());
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(DeckMode::from_name("local"), Some(DeckMode::Local));
        assert_eq!(DeckMode::from_name("presenter"), Some(DeckMode::Presenter));
        assert_eq!(DeckMode::from_name("audience"), None);
        assert_eq!(DeckMode::Local.name(), "local");
    }
}
