//! The [`Log`] trait shared by every component that reports progress.

/// Abstraction over logging backends.
///
/// Components receive a `&dyn Log` (usually through the run
/// [`Context`](crate::tasks::Context)) instead of reaching for a global
/// logger, so tests can substitute a [`BufferedLog`](super::BufferedLog)
/// and assert on what was reported.
pub trait Log: Send + Sync + std::fmt::Debug {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
}
