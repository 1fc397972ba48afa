//! CLI output formatting utilities.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Print the first lines of a generated document.
    pub fn preview(content: &str, max_lines: usize) {
        let (head, truncated) = head_lines(content, max_lines);
        println!("\n{}", style("Preview").bold().underlined());
        println!("{}", head);
        if truncated {
            println!("{}", style("...").dim());
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// First `max_lines` lines of `content`, and whether anything was cut.
fn head_lines(content: &str, max_lines: usize) -> (String, bool) {
    let mut lines = content.lines();
    let head: Vec<&str> = lines.by_ref().take(max_lines).collect();
    (head.join("\n"), lines.next().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_lines() {
        let content = (1..=25).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
        let (head, truncated) = head_lines(&content, 20);
        assert!(truncated);
        assert_eq!(head.lines().count(), 20);
        assert!(head.ends_with("line 20"));

        let (head, truncated) = head_lines("a\nb", 20);
        assert!(!truncated);
        assert_eq!(head, "a\nb");
    }
}
