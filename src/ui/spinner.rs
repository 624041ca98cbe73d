use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::output;

const TICK_INTERVAL: Duration = Duration::from_millis(80);
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Shown on stderr while the provider has not sent its first fragment.
///
/// Not drawn at all in quiet mode. Cleared on [`Spinner::stop`] or drop,
/// whichever comes first.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        if output::is_quiet() {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(style.tick_strings(FRAMES));
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(TICK_INTERVAL);

        Self { bar: Some(bar) }
    }

    /// Clears the spinner line. Safe to call more than once.
    pub fn stop(&self) {
        if let Some(bar) = &self.bar
            && !bar.is_finished()
        {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}
