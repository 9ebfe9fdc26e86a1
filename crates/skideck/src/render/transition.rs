use std::time::{Duration, Instant};

use crate::deck::slide::{Slide, SlideTransition};
use crate::deck::state::NavDirection;

pub const TRANSITION_DURATION: Duration = Duration::from_millis(500);

pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// A slide change being animated.
#[derive(Debug, Clone, Copy)]
pub struct ActiveTransition {
    pub from: Slide,
    pub to: Slide,
    pub kind: SlideTransition,
    pub direction: NavDirection,
    pub start: Instant,
}

impl ActiveTransition {
    /// Animate into `to` the way `to` asks to be entered.
    pub fn new(from: Slide, to: Slide, direction: NavDirection) -> Self {
        Self::starting_at(from, to, direction, Instant::now())
    }

    pub fn starting_at(from: Slide, to: Slide, direction: NavDirection, start: Instant) -> Self {
        Self {
            from,
            to,
            kind: to.transition_from_previous(),
            direction,
            start,
        }
    }

    /// Eased progress in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        self.progress_at(Instant::now())
    }

    pub fn progress_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start).as_secs_f32();
        let raw = (elapsed / TRANSITION_DURATION.as_secs_f32()).clamp(0.0, 1.0);
        ease_in_out(raw)
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete_at(Instant::now())
    }

    pub fn is_complete_at(&self, now: Instant) -> bool {
        self.kind == SlideTransition::None
            || now.saturating_duration_since(self.start) >= TRANSITION_DURATION
    }

    /// -1 moves the outgoing slide toward the start edge, +1 toward the end.
    pub fn sign(&self) -> f32 {
        match self.direction {
            NavDirection::Forward => -1.0,
            NavDirection::Backward => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_kind_comes_from_target_slide() {
        let t = ActiveTransition::new(Slide::Example, Slide::Introduction, NavDirection::Backward);
        assert_eq!(t.kind, SlideTransition::Fade);

        let t = ActiveTransition::new(Slide::Introduction, Slide::Example, NavDirection::Forward);
        assert_eq!(t.kind, Slide::Example.transition_from_previous());
    }

    #[test]
    fn test_progress_and_completion() {
        let start = Instant::now();
        let t = ActiveTransition::starting_at(
            Slide::Introduction,
            Slide::Example,
            NavDirection::Forward,
            start,
        );
        assert_eq!(t.progress_at(start), 0.0);
        assert!(!t.is_complete_at(start + Duration::from_millis(250)));
        assert!(t.is_complete_at(start + TRANSITION_DURATION));
        assert_eq!(t.progress_at(start + Duration::from_secs(2)), 1.0);
    }

    #[test]
    fn test_sign_follows_direction() {
        let mut t = ActiveTransition::new(Slide::Example, Slide::KodeViewer, NavDirection::Forward);
        assert_eq!(t.sign(), -1.0);
        t.direction = NavDirection::Backward;
        assert_eq!(t.sign(), 1.0);
    }
}
