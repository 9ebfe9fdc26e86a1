pub mod app;
pub mod banner;
pub mod cli;
pub mod commands;
pub mod config;
pub mod deck;
pub mod error;
pub mod render;
pub mod sync;
pub mod theme;
