//! Output formatting and styling module.
//!
//! All console output of a transfer goes through [`OutputFormatter`], so the
//! colour scheme stays consistent: announcements in cyan with file names in
//! white, questions in magenta, problems in yellow or red.

use crate::executor::GroupReport;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages all CLI output with consistent styling and formatting.
///
/// This struct provides methods for:
/// - Status messages (success, error, warning, info)
/// - Questions and section headers
/// - Progress bars for bulk moves, deletions and copies
/// - The final summary table
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cardsweep::output::OutputFormatter;
    /// OutputFormatter::success("Restored 3 default file(s)");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark to stderr.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cardsweep::output::OutputFormatter;
    /// OutputFormatter::error("Failed to move IMG_0001.JPG");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message.red());
    }

    /// Prints a warning message in yellow with a warning symbol.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cardsweep::output::OutputFormatter;
    /// OutputFormatter::warning("No memory card found at /media/card.");
    /// ```
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message.yellow());
    }

    /// Prints an info message in cyan.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to display
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cardsweep::output::OutputFormatter;
    /// OutputFormatter::info("We will not do that then.");
    /// ```
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a welcome line in yellow.
    pub fn banner(message: &str) {
        println!("{}", message.yellow().bold());
    }

    /// Prints a question for the user in magenta.
    pub fn prompt(question: &str) {
        println!("{}", question.magenta());
    }

    /// Prints a section header in bold, preceded by a blank line.
    ///
    /// # Arguments
    ///
    /// * `header` - The header text
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cardsweep::output::OutputFormatter;
    /// OutputFormatter::header("Files to move");
    /// ```
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints `label` in cyan followed by `name` in white.
    ///
    /// # Arguments
    ///
    /// * `label` - Leading text, including any trailing space
    /// * `name` - The file name or path being reported
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cardsweep::output::OutputFormatter;
    /// OutputFormatter::labelled("Found file: ", "IMG_0001.JPG");
    /// ```
    pub fn labelled(label: &str, name: &str) {
        println!("{}{}", label.cyan(), name.white());
    }

    /// Creates a progress bar for a bulk operation.
    ///
    /// # Returns
    ///
    /// A styled `ProgressBar`; the caller advances and finishes it.
    ///
    /// # Arguments
    ///
    /// * `total` - Number of files the operation will handle
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cardsweep::output::OutputFormatter;
    /// let pb = OutputFormatter::create_progress_bar(12);
    /// pb.set_message("IMG_0001.JPG");
    /// pb.inc(1);
    /// pb.finish_and_clear();
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints a summary table with what happened to each group.
    ///
    /// # Arguments
    ///
    /// * `reports` - One report per processed group, in processing order
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cardsweep::output::OutputFormatter;
    /// use cardsweep::executor::GroupReport;
    /// use cardsweep::file_category::ActionCategory;
    ///
    /// OutputFormatter::summary_table(&[GroupReport {
    ///     category: ActionCategory::Move,
    ///     handled: 2,
    ///     left: 0,
    ///     declined: false,
    /// }]);
    /// ```
    pub fn summary_table(reports: &[GroupReport]) {
        Self::header("SUMMARY");

        let max_label_len = reports
            .iter()
            .map(|r| r.category.label().len())
            .max()
            .unwrap_or(0)
            .max(5); // At least "Group" width

        println!(
            "{:<width$} | {} | {}",
            "Group".bold(),
            "Handled".bold(),
            "Left".bold(),
            width = max_label_len
        );
        println!("{}", "-".repeat(max_label_len + 20));

        for report in reports {
            println!(
                "{:<width$} | {:>7} | {:>4}",
                report.category.label(),
                report.handled.to_string().green(),
                report.left.to_string().yellow(),
                width = max_label_len
            );
        }

        let handled: usize = reports.iter().map(|r| r.handled).sum();
        let left: usize = reports.iter().map(|r| r.left).sum();
        println!("{}", "-".repeat(max_label_len + 20));
        println!(
            "{:<width$} | {:>7} | {:>4}",
            "Total".bold(),
            handled.to_string().green().bold(),
            left.to_string().yellow().bold(),
            width = max_label_len
        );
    }
}
