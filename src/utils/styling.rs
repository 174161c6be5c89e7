//! Terminal styling utilities

use std::path::Path;
use std::time::Duration;

use console::{style, Emoji};

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
     ___ ___  _   ___ ___ ___ _  _ ___ ___
    / __| _ \/_\ / __| __/ __| || |_ _| _ \
    \__ \  _/ _ \ (__| _|\__ \ __ || ||  _/
    |___/_|/_/ \_\___|___|___/_||_|___|_|
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("Feature engineering for the Spaceship Titanic").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the preprocessing configuration card
pub fn print_config(input: &Path, apply: Option<&Path>, output: &Path, config: Option<&Path>) {
    let line = "─".repeat(54);

    println!("    ┌{}┐", line);
    println!("    │ {}", style("Configuration").cyan().bold());
    println!("    ├{}┤", line);
    println!("    │  {}Train:  {}", FOLDER, truncate_path(input, 40));
    if let Some(apply) = apply {
        println!("    │  {}Apply:  {}", FOLDER, truncate_path(apply, 40));
    }
    println!("    │  {}Output: {}", SAVE, truncate_path(output, 40));
    println!(
        "    │  {}Roles:  {}",
        GEAR,
        config
            .map(|p| truncate_path(p, 40))
            .unwrap_or_else(|| "built-in spaceship layout".to_string())
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print the elapsed time of a step
pub fn print_step_time(elapsed: Duration) {
    println!(
        "    {}",
        style(format!("⏱  {:.2}s", elapsed.as_secs_f64())).dim()
    );
}

/// Print the timing line of one pipeline stage
pub fn print_stage_time(step: usize, total: usize, name: &str, elapsed: Duration) {
    println!(
        "    {} {} {}",
        style(format!("[{}/{}]", step, total)).cyan(),
        style(format!("{:<8}", name)).white(),
        style(format!("{:.3}s", elapsed.as_secs_f64())).dim()
    );
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Preprocessing complete!").green().bold()
    );
    println!();
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}
