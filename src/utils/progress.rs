use indicatif::{ProgressBar, ProgressStyle};

/// Returns a progress bar on stderr, or a hidden one when disabled
///
/// Without a known length, a spinner counting items is displayed.
pub fn progress_bar(len: Option<u64>, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    match len {
        Some(len) => {
            let bar = ProgressBar::new(len);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({eta})"),
            );
            bar
        }
        None => {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner().template("{spinner} [{elapsed_precise}] {pos}"),
            );
            bar
        }
    }
}
