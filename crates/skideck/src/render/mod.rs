pub mod content;
pub mod panels;
pub mod transition;

use eframe::egui::{self, FontId};

use crate::deck::panels::DeckMode;
use crate::deck::slide::{Slide, SlideTransition};
use crate::theme::Theme;

use transition::ActiveTransition;

pub const DECK_TITLE: &str = "Ski";

const HEADER_HEIGHT: f32 = 72.0;
const FOOTER_HEIGHT: f32 = 40.0;

/// Header subtitle telling the presenter which window is which.
pub fn subtitle(mode: DeckMode) -> &'static str {
    match mode {
        DeckMode::Presenter => "Presentation Demo",
        DeckMode::Local => "Presenter's panel (Do not present)",
    }
}

/// Render one slide with its header and footer.
pub fn render_slide(
    ui: &egui::Ui,
    slide: Slide,
    mode: DeckMode,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
) {
    let mut body = rect;
    if slide.show_header() {
        draw_header(ui, mode, theme, rect, opacity);
        body.min.y += HEADER_HEIGHT;
    }
    if slide.show_footer() {
        draw_footer(ui, slide, theme, rect, opacity);
        body.max.y -= FOOTER_HEIGHT;
    }
    content::draw(ui, slide, theme, body, opacity);
}

/// Draw the current slide, or both slides of a running transition.
pub fn draw_presentation(
    ui: &egui::Ui,
    current: Slide,
    transition: Option<&ActiveTransition>,
    mode: DeckMode,
    theme: &Theme,
    rect: egui::Rect,
) {
    let Some(t) = transition else {
        render_slide(ui, current, mode, theme, rect, 1.0);
        return;
    };

    let progress = t.progress();
    match t.kind {
        SlideTransition::Fade => {
            render_slide(ui, t.from, mode, theme, rect, 1.0 - progress);
            render_slide(ui, t.to, mode, theme, rect, progress);
        }
        SlideTransition::Horizontal | SlideTransition::Vertical => {
            let along = if t.kind == SlideTransition::Horizontal {
                egui::vec2(rect.width(), 0.0)
            } else {
                egui::vec2(0.0, rect.height())
            };
            let from_offset = along * t.sign() * progress;
            let to_offset = from_offset - along * t.sign();

            render_slide(ui, t.from, mode, theme, rect.translate(from_offset), 1.0);
            render_slide(ui, t.to, mode, theme, rect.translate(to_offset), 1.0);
        }
        SlideTransition::None => render_slide(ui, t.to, mode, theme, rect, 1.0),
    }
}

fn draw_header(ui: &egui::Ui, mode: DeckMode, theme: &Theme, rect: egui::Rect, opacity: f32) {
    let painter = ui.painter();
    let title_color = Theme::with_opacity(theme.heading_color, opacity);
    let title = painter.layout_no_wrap(
        DECK_TITLE.to_string(),
        FontId::proportional(theme.heading_size * 0.7),
        title_color,
    );
    let sub_color = Theme::with_opacity(theme.foreground, opacity * 0.6);
    let sub = painter.layout_no_wrap(
        subtitle(mode).to_string(),
        FontId::proportional(theme.small_size),
        sub_color,
    );

    let left = rect.left() + 24.0;
    let top = rect.top() + 12.0;
    let sub_top = top + title.rect.height() + 2.0;
    painter.galley(egui::pos2(left, top), title, title_color);
    painter.galley(egui::pos2(left, sub_top), sub, sub_color);
}

fn draw_footer(ui: &egui::Ui, slide: Slide, theme: &Theme, rect: egui::Rect, opacity: f32) {
    let color = Theme::with_opacity(theme.foreground, opacity * 0.4);
    let galley = ui.painter().layout_no_wrap(
        slide.label().to_string(),
        FontId::proportional(theme.small_size),
        color,
    );
    let pos = egui::pos2(
        rect.center().x - galley.rect.width() / 2.0,
        rect.bottom() - FOOTER_HEIGHT / 2.0 - galley.rect.height() / 2.0,
    );
    ui.painter().galley(pos, galley, color);
}
