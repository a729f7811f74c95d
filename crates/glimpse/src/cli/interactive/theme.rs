//! Dialoguer theme and banner for the interactive search prompt.

use console::{style, Style};
use dialoguer::theme::ColorfulTheme;

/// `ColorfulTheme` with a cyan `?` prompt and green values.
pub fn glimpse_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("?".to_string()).for_stderr().cyan(),
        prompt_style: Style::new().for_stderr().bold(),
        prompt_suffix: style("›".to_string()).for_stderr().bright().black(),
        success_prefix: style("✓".to_string()).for_stderr().green(),
        error_prefix: style("✗".to_string()).for_stderr().red(),
        values_style: Style::new().for_stderr().green(),
        ..ColorfulTheme::default()
    }
}

/// Prints the banner with index size to stderr, keeping stdout for results.
pub fn print_banner(images: usize, terms: usize) {
    let version_line = format!("Glimpse v{}", glimpse_core::VERSION);
    let summary = format!("{images} images · {terms} tags");
    let inner_width = version_line.len().max(summary.chars().count()) + 4;

    let cyan = Style::new().for_stderr().cyan();
    eprintln!();
    eprintln!("{}", cyan.apply_to(format!("  ╔{:═<inner_width$}╗", "")));
    eprintln!("{}", cyan.apply_to(format!("  ║{version_line:^inner_width$}║")));
    eprintln!("{}", cyan.apply_to(format!("  ║{summary:^inner_width$}║")));
    eprintln!("{}", cyan.apply_to(format!("  ╚{:═<inner_width$}╝", "")));
    eprintln!();
}
