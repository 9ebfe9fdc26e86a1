//! The deck itself: slides, navigation, shortcuts and panels.

pub mod navigator;
pub mod panels;
pub mod session;
pub mod shortcuts;
pub mod slide;
pub mod state;
