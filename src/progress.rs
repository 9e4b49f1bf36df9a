//! Progress bar display for batch installs

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for installing the missing packages of a stage
pub struct ProgressDisplay {
    package_pb: ProgressBar,
    total: usize,
    current: usize,
}

impl ProgressDisplay {
    /// Create a new progress display with total package count
    pub fn new(total: usize) -> Self {
        let package_pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} {msg}") {
            package_pb.set_style(style.progress_chars("#>-"));
        }

        Self {
            package_pb,
            total,
            current: 0,
        }
    }

    /// Show the package about to be installed, counting the previous one as done
    pub fn start_package(&mut self, name: &str) {
        if self.current > 0 {
            self.package_pb.inc(1);
        }
        self.current += 1;
        self.package_pb
            .set_message(format!("({}/{}) {}", self.current, self.total, name));
    }

    pub fn finish(&self) {
        self.package_pb.finish_and_clear();
    }
}
