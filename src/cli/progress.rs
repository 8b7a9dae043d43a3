//! CLI-specific progress handling for co2-estimator
//!
//! Shows a spinner while a calculation is "in progress".

use std::thread;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Creates a spinner for CLI display
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb
}

/// Spinner shown for the simulated calculation delay
pub struct CalculationSpinner {
    pub pb: ProgressBar,
}

impl CalculationSpinner {
    pub fn new(message: &str) -> Self {
        Self {
            pb: create_spinner(message),
        }
    }

    /// Tick for `delay`, then clear the line
    pub fn run_for(&self, delay: Duration) {
        if delay.is_zero() {
            return;
        }
        self.pb.enable_steady_tick(Duration::from_millis(80));
        thread::sleep(delay);
        self.pb.finish_and_clear();
    }
}
