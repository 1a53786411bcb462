use ceems_core::StepObserver;

/// Logs integration progress at every tenth of the run
pub struct ProgressLog {
    label: &'static str,
    next_decile: usize,
}

impl ProgressLog {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            next_decile: 1,
        }
    }
}

impl StepObserver for ProgressLog {
    fn on_step(&mut self, completed: usize, total: usize) {
        if total == 0 {
            return;
        }
        while self.next_decile <= 10 && completed * 10 >= total * self.next_decile {
            tracing::info!(
                "{}: {}% ({}/{} steps)",
                self.label,
                self.next_decile * 10,
                completed,
                total
            );
            self.next_decile += 1;
        }
    }
}
