use colored::Colorize;

use crate::deck::slide::{SlideRegistry, SlideTransition};

fn transition_name(transition: SlideTransition) -> &'static str {
    match transition {
        SlideTransition::None => "none",
        SlideTransition::Fade => "fade",
        SlideTransition::Horizontal => "horizontal",
        SlideTransition::Vertical => "vertical",
    }
}

pub fn run() {
    let registry = SlideRegistry::deck();
    for (index, slide) in registry.slides().iter().enumerate() {
        let mut flags = Vec::new();
        if slide.is_title_screen() {
            flags.push("title");
        }
        if slide.show_header() {
            flags.push("header");
        }
        if slide.show_footer() {
            flags.push("footer");
        }
        if slide.notes().is_some() {
            flags.push("notes");
        }

        println!(
            "{:>2}  {:<26} {:<11} {}",
            (index + 1).to_string().bold(),
            slide.label(),
            transition_name(slide.transition_from_previous()).cyan(),
            flags.join(", ").dimmed()
        );
    }
}
