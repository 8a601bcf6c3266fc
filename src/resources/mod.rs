//! Idempotent install steps (check + apply pattern).
pub mod flatpak;
pub mod hook;
pub mod package;
pub mod repository;

use crate::error::CommandError;

/// Observed state of a host resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource is not present.
    Missing,
    /// Resource is present and needs no change.
    Correct,
}

/// Result of applying a resource change.
///
/// # Examples
///
/// ```
/// use bootstrap_cli::resources::ResourceChange;
///
/// let applied = ResourceChange::Applied;
/// let noop = ResourceChange::AlreadyCorrect;
/// let skipped = ResourceChange::Skipped { reason: "no repository".into() };
///
/// assert_eq!(applied, ResourceChange::Applied);
/// assert_ne!(applied, noop);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created or updated.
    Applied,
    /// Resource was already correct (no change needed).
    AlreadyCorrect,
    /// Resource did not apply to this host or application.
    Skipped {
        /// Reason why the resource was skipped.
        reason: String,
    },
}

/// A host resource that can report its state and be brought into place.
pub trait Resource {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Check the current state of the resource.
    fn current_state(&self) -> ResourceState;

    /// Bring the resource into place.
    ///
    /// # Errors
    ///
    /// Returns the [`CommandError`] of the first command that failed.
    fn apply(&self) -> Result<ResourceChange, CommandError>;

    /// Apply the resource only if it is missing.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`apply`](Self::apply).
    fn ensure(&self) -> Result<ResourceChange, CommandError> {
        match self.current_state() {
            ResourceState::Correct => Ok(ResourceChange::AlreadyCorrect),
            ResourceState::Missing => self.apply(),
        }
    }
}

/// Shared test helpers for resource unit tests.
///
/// Provides a scripted [`Executor`](crate::exec::Executor) so individual
/// test modules do not have to duplicate the boilerplate.
#[cfg(test)]
pub mod test_helpers {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use crate::exec::{ExecResult, Executor, command_line};

    #[derive(Debug, Default)]
    struct Script {
        rules: Vec<(String, VecDeque<ExecResult>)>,
        calls: Vec<String>,
        inputs: Vec<String>,
    }

    /// A scripted executor that records every command it is asked to run.
    ///
    /// Responses are registered per substring pattern with
    /// [`respond`](Self::respond).  The first rule whose pattern occurs in
    /// the rendered command line answers; its queue is consumed in order
    /// and the last response repeats.  Unmatched commands succeed with empty
    /// output.  Clones share the same script and call log.
    #[derive(Debug, Default, Clone)]
    pub struct ScriptedExecutor {
        script: Arc<Mutex<Script>>,
        on_path: Vec<String>,
    }

    impl ScriptedExecutor {
        /// An executor where every command succeeds and nothing is on `PATH`.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Programs reported as present by [`Executor::which`].
        #[must_use]
        pub fn with_which(mut self, programs: &[&str]) -> Self {
            self.on_path = programs.iter().map(ToString::to_string).collect();
            self
        }

        /// Queue `result` for commands containing `pattern`.
        #[must_use]
        pub fn respond(self, pattern: &str, result: ExecResult) -> Self {
            if let Ok(mut script) = self.script.lock() {
                if let Some((_, queue)) = script.rules.iter_mut().find(|(p, _)| p == pattern) {
                    queue.push_back(result);
                } else {
                    script
                        .rules
                        .push((pattern.to_string(), VecDeque::from([result])));
                }
            }
            self
        }

        /// Every command line run so far, in order.
        #[must_use]
        pub fn calls(&self) -> Vec<String> {
            self.script
                .lock()
                .map_or_else(|_| vec![], |s| s.calls.clone())
        }

        /// Every stdin payload passed to `run_with_input`, in order.
        #[must_use]
        pub fn inputs(&self) -> Vec<String> {
            self.script
                .lock()
                .map_or_else(|_| vec![], |s| s.inputs.clone())
        }

        /// Number of commands run so far.
        #[must_use]
        pub fn call_count(&self) -> usize {
            self.calls().len()
        }

        /// Number of commands run so far whose line contains `pattern`.
        #[must_use]
        pub fn count_matching(&self, pattern: &str) -> usize {
            self.calls().iter().filter(|c| c.contains(pattern)).count()
        }

        fn answer(&self, line: String) -> ExecResult {
            let Ok(mut script) = self.script.lock() else {
                return ExecResult::failed(1, "script poisoned");
            };
            let result = script
                .rules
                .iter_mut()
                .find(|(pattern, _)| line.contains(pattern.as_str()))
                .and_then(|(_, queue)| {
                    if queue.len() > 1 {
                        queue.pop_front()
                    } else {
                        queue.front().cloned()
                    }
                })
                .unwrap_or_else(|| ExecResult::ok(""));
            script.calls.push(line);
            result
        }
    }

    impl Executor for ScriptedExecutor {
        fn run_unchecked(&self, program: &str, args: &[&str]) -> ExecResult {
            self.answer(command_line(program, args))
        }

        fn run_with_input(&self, program: &str, args: &[&str], input: &str) -> ExecResult {
            if let Ok(mut script) = self.script.lock() {
                script.inputs.push(input.to_string());
            }
            self.answer(command_line(program, args))
        }

        fn run_shell(&self, command: &str) -> ExecResult {
            self.answer(command.to_string())
        }

        fn which(&self, program: &str) -> bool {
            self.on_path.iter().any(|p| p == program)
        }
    }
}
