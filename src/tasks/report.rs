//! End-of-run summary.
use super::app::AppOutcome;
use crate::logging::Log;

/// Outcomes of every processed application, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Applications that completed every step.
    pub succeeded: Vec<String>,
    /// Applications skipped, with the reason.
    pub skipped: Vec<(String, String)>,
    /// Applications that failed, with the error message.
    pub failed: Vec<(String, String)>,
    /// At least one succeeded application asked for a reboot.
    pub reboot_required: bool,
}

impl RunReport {
    /// Record the outcome of application `name`.
    pub fn record(&mut self, name: &str, outcome: AppOutcome) {
        match outcome {
            AppOutcome::Succeeded { requires_reboot } => {
                self.reboot_required |= requires_reboot;
                self.succeeded.push(name.to_string());
            }
            AppOutcome::Skipped(reason) => self.skipped.push((name.to_string(), reason)),
            AppOutcome::Failed(e) => self.failed.push((name.to_string(), e.to_string())),
        }
    }

    /// Whether any application failed.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Print the three buckets.
    pub fn print(&self, log: &dyn Log) {
        log.stage("Summary");
        log.info(&format!(
            "{} succeeded, {} skipped, {} failed",
            self.succeeded.len(),
            self.skipped.len(),
            self.failed.len()
        ));
        for name in &self.succeeded {
            log.info(&format!("  ok      {name}"));
        }
        for (name, reason) in &self.skipped {
            log.info(&format!("  skipped {name}: {reason}"));
        }
        for (name, message) in &self.failed {
            log.error(&format!("  failed  {name}: {message}"));
        }
    }
}
