pub mod completion;
pub mod config;
pub mod shortcuts;
pub mod slides;
