use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;
use crate::sync::file_medium::FileMedium;

pub fn run(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> anyhow::Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "  (not created yet, showing defaults)".dimmed());
    }
    println!();

    let theme = if config.dark_theme() { "dark" } else { "light" };
    let start = config
        .start_slide()
        .map(|n| n.to_string())
        .unwrap_or_else(|| "1".to_string());
    let mode = config
        .mode()
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| "by role".to_string());
    let channel = config.channel_dir().unwrap_or_else(FileMedium::default_dir);

    println!("{}", "defaults".cyan().bold());
    print_entry("theme", theme);
    print_entry("start_slide", &start);
    print_entry("mode", &mode);
    println!("{}", "sync".cyan().bold());
    print_entry("enabled", &config.sync_enabled().to_string());
    print_entry("companion", config.companion().name());
    print_entry("channel_dir", &channel.display().to_string());
    Ok(())
}

fn print_entry(key: &str, value: &str) {
    println!("  {:<12} {}", format!("{key}:"), value.green());
}

fn set(key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{} {} = {} ({})",
        "Saved".green().bold(),
        key,
        value,
        path.display()
    );
    Ok(())
}
