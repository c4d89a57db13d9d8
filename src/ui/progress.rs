use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Run `work` behind a spinner showing `message`. Without a terminal the
/// spinner is skipped entirely.
pub fn with_spinner<T>(visible: bool, message: &str, work: impl FnOnce() -> T) -> T {
    if !visible {
        return work();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = work();
    spinner.finish_and_clear();
    result
}
