//! Terminal output and progress reporting

use crate::config::{ColorChoice, Verbosity};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};

/// Reports progress and results to the terminal.
///
/// Status lines go to stderr so stdout stays clean for generated code and
/// structured output.
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    verbosity: Verbosity,
    use_color: bool,
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(verbosity: Verbosity, color: ColorChoice) -> Self {
        Self {
            term: Term::stderr(),
            verbosity,
            use_color: color.should_color(),
            bar: None,
        }
    }

    /// Print an informational line (suppressed in quiet mode)
    pub fn info(&self, message: &str) {
        if self.verbosity.is_quiet() {
            return;
        }
        let _ = self.term.write_line(message);
    }

    /// Print a line only in verbose mode
    pub fn verbose(&self, message: &str) {
        if !self.verbosity.is_verbose() {
            return;
        }
        let _ = self.term.write_line(message);
    }

    /// Print a success line
    pub fn success(&self, message: &str) {
        if self.verbosity.is_quiet() {
            return;
        }
        let line = if self.use_color {
            format!("{} {message}", style("✓").green().bold())
        } else {
            format!("✓ {message}")
        };
        let _ = self.term.write_line(&line);
    }

    /// Print a failure line (always shown)
    pub fn failure(&self, message: &str) {
        let line = if self.use_color {
            format!("{} {message}", style("✗").red().bold())
        } else {
            format!("✗ {message}")
        };
        let _ = self.term.write_line(&line);
    }

    /// Print a warning line
    pub fn warning(&self, message: &str) {
        if self.verbosity.is_quiet() {
            return;
        }
        let line = if self.use_color {
            format!("{} {message}", style("!").yellow().bold())
        } else {
            format!("! {message}")
        };
        let _ = self.term.write_line(&line);
    }

    /// Start a progress bar over `total` items
    pub fn start_progress(&mut self, total: u64, message: &str) {
        if self.verbosity.is_quiet() {
            return;
        }
        let bar = ProgressBar::new(total);
        if let Ok(template) =
            ProgressStyle::with_template("{msg} [{bar:30.cyan/blue}] {pos}/{len}")
        {
            bar.set_style(template.progress_chars("=> "));
        }
        bar.set_message(message.to_string());
        self.bar = Some(bar);
    }

    /// Advance the progress bar by one item
    pub fn advance(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
            bar.inc(1);
        }
    }

    /// Finish and clear the progress bar
    pub fn finish_progress(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_reporter_suppresses_info() {
        // Smoke test: these must not panic without a real terminal.
        let reporter = ProgressReporter::new(Verbosity::Quiet, ColorChoice::Never);
        reporter.info("hidden");
        reporter.failure("shown");
    }

    #[test]
    fn progress_lifecycle() {
        let mut reporter = ProgressReporter::new(Verbosity::Normal, ColorChoice::Never);
        reporter.start_progress(3, "generating");
        reporter.advance("one");
        reporter.advance("two");
        reporter.finish_progress();
        assert!(reporter.bar.is_none());
    }
}
