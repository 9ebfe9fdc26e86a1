use std::fmt;

use crate::error::{DeckError, Result};

/// Animation used when a slide is entered from its neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideTransition {
    None,
    Fade,
    Horizontal,
    Vertical,
}

/// One named step of the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slide {
    Introduction,
    Example,
    KodeViewer,
    VerticalSegmentsDemo,
    HorizontalSegmentsDemo,
}

impl Slide {
    /// Every slide in presentation order.
    pub const ALL: [Slide; 5] = [
        Slide::Introduction,
        Slide::Example,
        Slide::KodeViewer,
        Slide::VerticalSegmentsDemo,
        Slide::HorizontalSegmentsDemo,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Introduction => "Introduction",
            Self::Example => "Example",
            Self::KodeViewer => "Kode Viewer",
            Self::VerticalSegmentsDemo => "Vertical Segments Demo",
            Self::HorizontalSegmentsDemo => "Horizontal Segments Demo",
        }
    }

    pub fn show_header(&self) -> bool {
        true
    }

    pub fn show_footer(&self) -> bool {
        true
    }

    pub fn is_title_screen(&self) -> bool {
        matches!(self, Self::Introduction)
    }

    pub fn transition_from_previous(&self) -> SlideTransition {
        match self {
            Self::Introduction => SlideTransition::Fade,
            _ => SlideTransition::Horizontal,
        }
    }

    /// Speaker notes shown in the presenter's notes panel.
    pub fn notes(&self) -> Option<Notes> {
        match self {
            Self::Introduction => Some(Notes {
                title: "Introduction",
                points: &[
                    "Remember to Mention your title",
                    "Keep the back story short",
                ],
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Slide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notes {
    pub title: &'static str,
    pub points: &'static [&'static str],
}

/// The ordered, fixed sequence of slides a deck presents.
///
/// Position in the registry defines "next" and "previous". The order never
/// changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideRegistry {
    slides: Vec<Slide>,
}

impl SlideRegistry {
    pub fn new(slides: Vec<Slide>) -> Result<Self> {
        if slides.is_empty() {
            return Err(DeckError::EmptyRegistry);
        }
        for (i, slide) in slides.iter().enumerate() {
            if slides[..i].contains(slide) {
                return Err(DeckError::DuplicateSlide(*slide));
            }
        }
        Ok(Self { slides })
    }

    /// The full deck shipped with the application.
    pub fn deck() -> Self {
        Self {
            slides: Slide::ALL.to_vec(),
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn index_of(&self, slide: Slide) -> Result<usize> {
        self.slides
            .iter()
            .position(|s| *s == slide)
            .ok_or(DeckError::SlideNotFound(slide))
    }

    pub fn get(&self, index: usize) -> Option<Slide> {
        self.slides.get(index).copied()
    }

    pub fn first(&self) -> Slide {
        self.slides[0]
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.slides.len() - 1
    }
}

impl Default for SlideRegistry {
    fn default() -> Self {
        Self::deck()
    }
}
