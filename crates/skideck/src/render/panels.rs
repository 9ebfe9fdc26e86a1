//! Auxiliary panels around the slide area.

use eframe::egui::{self, RichText};

use crate::deck::shortcuts::ShortcutAction;
use crate::deck::slide::{Notes, Slide};
use crate::theme::Theme;

pub const HINT_TEXT: &str = "Press N to show slide notes and H to dismiss Hint";
pub const NO_NOTES_TEXT: &str = "This slide has no notes";

/// Returns `true` when the theme button was clicked.
pub fn toolbar(
    ui: &mut egui::Ui,
    theme: &Theme,
    slide: Slide,
    index: usize,
    count: usize,
) -> bool {
    let mut clicked = false;
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(slide.label())
                .strong()
                .size(theme.small_size + 2.0)
                .color(theme.heading_color),
        );
        ui.label(
            RichText::new(format!("{} / {}", index + 1, count))
                .monospace()
                .color(Theme::with_opacity(theme.foreground, 0.6)),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = if theme.is_dark() { "Light theme" } else { "Dark theme" };
            clicked = ui.button(label).clicked();
        });
    });
    clicked
}

/// Lists every slide. Returns the index the user clicked, if any.
pub fn table_of_contents(
    ui: &mut egui::Ui,
    theme: &Theme,
    slides: &[Slide],
    current: usize,
) -> Option<usize> {
    ui.heading(RichText::new("Table of Content").color(theme.heading_color));
    ui.separator();

    let mut picked = None;
    for (index, slide) in slides.iter().enumerate() {
        let mut text = RichText::new(format!("{}. {}", index + 1, slide.label()));
        if slide.is_title_screen() {
            text = text.strong();
        }
        if index == current {
            text = text.color(theme.accent);
        }
        if ui.selectable_label(index == current, text).clicked() {
            picked = Some(index);
        }
    }
    picked
}

pub fn shortcuts_guide(ui: &mut egui::Ui, theme: &Theme) {
    ui.heading(RichText::new("Keyboard Shortcuts").color(theme.heading_color));
    ui.separator();

    egui::Grid::new("shortcuts_guide")
        .num_columns(2)
        .spacing([16.0, 8.0])
        .show(ui, |ui| {
            for action in ShortcutAction::GUIDE {
                let keys = action
                    .keys()
                    .iter()
                    .map(|k| k.display_name())
                    .collect::<Vec<_>>()
                    .join(" / ");
                ui.label(RichText::new(keys).monospace().color(theme.accent));
                ui.label(action.hint());
                ui.end_row();
            }
        });
}

pub fn notes(ui: &mut egui::Ui, theme: &Theme, notes: Option<Notes>) {
    let Some(notes) = notes else {
        ui.label(
            RichText::new(NO_NOTES_TEXT)
                .italics()
                .color(Theme::with_opacity(theme.foreground, 0.6)),
        );
        return;
    };

    ui.heading(RichText::new(notes.title).color(theme.heading_color));
    ui.separator();
    for point in notes.points {
        ui.label(RichText::new(format!("\u{2022} {point}")).size(theme.small_size + 3.0));
    }
}

pub fn hint(ui: &mut egui::Ui, theme: &Theme) {
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new(HINT_TEXT)
                .size(theme.small_size)
                .color(Theme::with_opacity(theme.foreground, 0.8)),
        );
    });
}
