//! Body of each slide, painted into the rect the slide occupies.

use eframe::egui::{self, Color32, FontId, Stroke, StrokeKind};

use crate::deck::slide::Slide;
use crate::theme::Theme;

const TALK_TITLE: &str = "Building Slides with Jetpack Compose on Ski";
const PRESENTER: &str = "Jane Doe";
const SEGMENTS: usize = 3;

const KODE_SAMPLE: &str = "@Composable\n\
fun KodeViewerSlide(\n    \
    modifier: Modifier = Modifier\n\
) {\n    \
    Box(\n        \
        modifier = modifier\n            \
            .fillMaxSize(),\n        \
        contentAlignment = Alignment.CenterStart\n    \
    ) {\n        \
        KotlinCodeViewer()\n    \
    }\n\
}";

pub fn draw(ui: &egui::Ui, slide: Slide, theme: &Theme, rect: egui::Rect, opacity: f32) {
    match slide {
        Slide::Introduction => draw_introduction(ui, theme, rect, opacity),
        Slide::Example => draw_example(ui, theme, rect, opacity),
        Slide::KodeViewer => draw_kode_viewer(ui, theme, rect, opacity),
        Slide::VerticalSegmentsDemo => draw_segments(ui, theme, rect, opacity, true),
        Slide::HorizontalSegmentsDemo => draw_segments(ui, theme, rect, opacity, false),
    }
}

fn draw_introduction(ui: &egui::Ui, theme: &Theme, rect: egui::Rect, opacity: f32) {
    let painter = ui.painter();
    let half = rect.width() / 2.0;
    let text_rect = egui::Rect::from_min_size(rect.min, egui::vec2(half, rect.height())).shrink(48.0);

    let title_color = Theme::with_opacity(theme.heading_color, opacity);
    let title = painter.layout(
        TALK_TITLE.to_string(),
        FontId::proportional(theme.heading_size * 1.3),
        title_color,
        text_rect.width(),
    );
    let presenter_color = Theme::with_opacity(theme.foreground, opacity);
    let presenter = painter.layout_no_wrap(
        PRESENTER.to_string(),
        FontId::proportional(theme.body_size),
        presenter_color,
    );

    let block_height = title.rect.height() + 16.0 + presenter.rect.height();
    let top = text_rect.center().y - block_height / 2.0;
    let presenter_top = top + title.rect.height() + 16.0;
    painter.galley(egui::pos2(text_rect.left(), top), title, title_color);
    painter.galley(
        egui::pos2(text_rect.left(), presenter_top),
        presenter,
        presenter_color,
    );

    // Picture frame: four overlapping circles around an accent disc.
    let center = egui::pos2(rect.left() + half * 1.5, rect.center().y);
    let radius = (half.min(rect.height()) * 0.3).max(24.0);
    let leaf = Theme::with_opacity(theme.accent, opacity * 0.35);
    for (dx, dy) in [(-1.0, 0.0), (1.0, 0.0), (0.0, -1.0), (0.0, 1.0)] {
        painter.circle_filled(
            center + egui::vec2(dx, dy) * radius * 0.5,
            radius * 0.6,
            leaf,
        );
    }
    painter.circle_filled(center, radius * 0.55, Theme::with_opacity(theme.accent, opacity));
}

fn draw_example(ui: &egui::Ui, theme: &Theme, rect: egui::Rect, opacity: f32) {
    let painter = ui.painter();
    let color = Theme::with_opacity(theme.heading_color, opacity);
    let galley = painter.layout_no_wrap(
        "Example".to_string(),
        FontId::proportional(theme.title_size),
        color,
    );
    let pos = rect.center() - galley.rect.size() / 2.0;
    painter.galley(pos, galley, color);
}

fn draw_kode_viewer(ui: &egui::Ui, theme: &Theme, rect: egui::Rect, opacity: f32) {
    let painter = ui.painter();
    let card_width = rect.width() * 0.7;
    let code_color = Theme::with_opacity(theme.foreground, opacity);
    let code = painter.layout(
        KODE_SAMPLE.to_string(),
        FontId::monospace(theme.body_size * 0.8),
        code_color,
        card_width - 64.0,
    );

    let card_height = code.rect.height() + 64.0;
    let card = egui::Rect::from_min_size(
        egui::pos2(rect.left() + 48.0, rect.center().y - card_height / 2.0),
        egui::vec2(card_width, card_height),
    );
    painter.rect_filled(card, 12.0, Theme::with_opacity(theme.panel_background, opacity));
    painter.rect_stroke(
        card,
        12.0,
        Stroke::new(1.0, Theme::with_opacity(theme.accent, opacity * 0.5)),
        StrokeKind::Inside,
    );
    painter.galley(card.min + egui::vec2(32.0, 32.0), code, code_color);
}

fn draw_segments(ui: &egui::Ui, theme: &Theme, rect: egui::Rect, opacity: f32, stacked: bool) {
    let painter = ui.painter();
    let area = rect.shrink(24.0);
    let text_color = Theme::with_opacity(theme.heading_color, opacity);
    let frame_color = Theme::with_opacity(theme.accent, opacity);

    for (i, cell) in segment_rects(area, SEGMENTS, stacked).into_iter().enumerate() {
        let cell = cell.shrink(16.0);
        painter.rect_filled(cell, 16.0, Theme::with_opacity(theme.panel_background, opacity));
        painter.rect_stroke(cell, 16.0, Stroke::new(3.0, frame_color), StrokeKind::Inside);

        let label = painter.layout_no_wrap(
            format!("Segment {}", i + 1),
            FontId::proportional(theme.heading_size * 0.8),
            text_color,
        );
        painter.galley(cell.center() - label.rect.size() / 2.0, label, Color32::TRANSPARENT);
    }
}

/// Split `area` into `count` equal cells, top to bottom when `stacked`,
/// left to right otherwise.
pub fn segment_rects(area: egui::Rect, count: usize, stacked: bool) -> Vec<egui::Rect> {
    let count = count.max(1);
    (0..count)
        .map(|i| {
            let (t0, t1) = (i as f32 / count as f32, (i + 1) as f32 / count as f32);
            if stacked {
                egui::Rect::from_x_y_ranges(
                    area.x_range(),
                    area.top() + area.height() * t0..=area.top() + area.height() * t1,
                )
            } else {
                egui::Rect::from_x_y_ranges(
                    area.left() + area.width() * t0..=area.left() + area.width() * t1,
                    area.y_range(),
                )
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_tile_the_area() {
        let area = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(300.0, 90.0));

        let columns = segment_rects(area, 3, false);
        assert_eq!(columns.len(), 3);
        assert!((columns[0].width() - 100.0).abs() < 1e-3);
        assert_eq!(columns[2].right(), 300.0);
        assert_eq!(columns[1].height(), 90.0);

        let rows = segment_rects(area, 3, true);
        assert!((rows[0].height() - 30.0).abs() < 1e-3);
        assert_eq!(rows[2].bottom(), 90.0);
    }
}
