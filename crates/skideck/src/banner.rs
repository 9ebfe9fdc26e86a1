use colored::Colorize;

pub fn print_banner_with_version() {
    println!("{}", "skideck".bold().cyan());
    println!("  {} {}", "version".dimmed(), env!("CARGO_PKG_VERSION"));
    println!("  {}", env!("CARGO_PKG_DESCRIPTION").dimmed());
}
