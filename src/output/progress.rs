//! Progress bar utilities for clip extraction.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for annotation rows.
///
/// The length is set once the table is loaded. A disabled bar is hidden, so
/// callers can tick it unconditionally.
pub fn create_row_progress(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rows {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ "),
    );
    pb
}
