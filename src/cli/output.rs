//! Styled terminal output
//!
//! Consistent symbols and colours for every command. Logging goes through
//! `tracing` on stderr; this is the user-facing report on stdout.

use console::style;

/// Output handler for consistent CLI formatting
#[derive(Debug, Clone, Copy)]
pub struct Output {
    verbose: u8,
    quiet: bool,
}

impl Output {
    pub fn new(verbose: u8, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Errors are always shown, even in quiet mode
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✖").red(), message);
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), message);
        }
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    /// Only shown with `-v`
    pub fn verbose(&self, message: &str) {
        if self.verbose > 0 && !self.quiet {
            println!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn category(&self, category: &str) {
        if !self.quiet {
            println!("\n{}", style(category).bold().cyan());
        }
    }

    pub fn step(&self, step: &str) {
        if !self.quiet {
            println!("{} {}", style("❯").cyan(), step);
        }
    }

    pub fn list_item(&self, item: &str) {
        if !self.quiet {
            println!("  • {}", item);
        }
    }

    pub fn key_value(&self, key: &str, value: &str, highlight: bool) {
        if !self.quiet {
            let styled_value = if highlight {
                style(value).green().bold()
            } else {
                style(value).white()
            };
            println!("  {:<24} {}", style(key).dim(), styled_value);
        }
    }

    pub fn count(&self, label: &str, count: usize) {
        if !self.quiet {
            println!(
                "  {} {} {}",
                style("•").cyan(),
                style(count.to_string()).yellow().bold(),
                style(label).dim()
            );
        }
    }

    pub fn status_indicator(&self, status: &str, message: &str, is_success: bool) {
        if !self.quiet {
            let (icon, color) = if is_success {
                ("✓", style(status).green())
            } else {
                ("✗", style(status).red())
            };
            println!("{} {} {}", style(icon).bold(), color.bold(), message);
        }
    }

    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }
}
