use colored::Colorize;

use crate::deck::shortcuts::ShortcutAction;

pub fn run() {
    for action in ShortcutAction::GUIDE {
        let keys = action
            .keys()
            .iter()
            .map(|k| k.display_name())
            .collect::<Vec<_>>()
            .join(" / ");
        println!("  {:<24} {}", keys.cyan(), action.hint());
    }
}
