use eframe::egui::{self, Color32};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub panel_background: Color32,
    pub title_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
    pub small_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            foreground: Color32::from_rgb(0xC8, 0xC8, 0xC8),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x52, 0x94, 0xE2),
            panel_background: Color32::from_rgb(0x2D, 0x2D, 0x2D),
            title_size: 72.0,
            heading_size: 40.0,
            body_size: 24.0,
            small_size: 15.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::WHITE,
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            heading_color: Color32::from_rgb(0x16, 0x21, 0x3E),
            accent: Color32::from_rgb(0x0F, 0x34, 0x60),
            panel_background: Color32::from_rgb(0xF5, 0xF5, 0xF5),
            title_size: 72.0,
            heading_size: 40.0,
            body_size: 24.0,
            small_size: 15.0,
        }
    }

    pub fn from_dark_mode(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }

    pub fn is_dark(&self) -> bool {
        self.name == "dark"
    }

    pub fn toggled(&self) -> Self {
        Self::from_dark_mode(!self.is_dark())
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }

    /// egui widget visuals matching this theme.
    pub fn visuals(&self) -> egui::Visuals {
        let mut visuals = if self.is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        visuals.panel_fill = self.panel_background;
        visuals.window_fill = self.panel_background;
        visuals.selection.bg_fill = Self::with_opacity(self.accent, 0.6);
        visuals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggled_switches_palette() {
        let light = Theme::light();
        let dark = light.toggled();
        assert!(dark.is_dark());
        assert_eq!(dark.background, Theme::dark().background);
        assert!(!dark.toggled().is_dark());
    }

    #[test]
    fn test_with_opacity_keeps_channels() {
        let c = Theme::with_opacity(Color32::from_rgb(10, 20, 30), 1.0);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (10, 20, 30, 255));
    }
}
