use owo_colors::OwoColorize;

use aranea_core::{AraneaError, Progress};

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Aranea".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Map a website and mine its pages for data\n".dimmed());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
#[allow(dead_code)]
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an error message
#[allow(dead_code)]
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Traversal observer that narrates the crawl on stderr.
pub struct EchoProgress;

impl Progress for EchoProgress {
    fn visiting(&self, url: &str) {
        eprintln!("{} {}", "→".dimmed(), url.dimmed());
    }

    fn mapped(&self, url: &str, children: usize) {
        eprintln!(
            "{} {} {}",
            "✓".green(),
            url,
            format!("({} links)", children).dimmed()
        );
    }

    fn failed(&self, url: &str, error: &AraneaError) {
        eprintln!("{} {} {}", "✗".red(), url, error.to_string().bright_red());
    }
}
