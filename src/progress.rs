use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Injectable sink for translation progress. The core stays a pure function
/// of its inputs; the CLI wires a console sink at the boundary.
pub trait ProgressSink: Send + Sync {
    fn report(&self, done: usize, total: usize);
}

/// No-op sink for library callers.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _done: usize, _total: usize) {}
}

/// Console sink drawing an in-place `N/total` counter on stdout.
pub struct ConsoleProgress {
    bar: ProgressBar,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{pos}/{len}")
                .expect("Invalid progress bar template"),
        );
        Self { bar }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ConsoleProgress {
    fn report(&self, done: usize, total: usize) {
        if self.bar.length().is_none() {
            self.bar.set_length(total as u64);
        }
        self.bar.set_position(done as u64);
        if done >= total {
            self.bar.finish();
        }
    }
}
