// Shared helpers for integration tests.
//
// Provides a recording executor that stands in for the host, a temporary
// bootstrap root holding a catalog file, and a fixed-answer prompt so each
// integration test can drive the installer without touching the machine.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use bootstrap_cli::cli::GlobalOpts;
use bootstrap_cli::exec::{ExecResult, Executor, command_line};
use bootstrap_cli::logging::BufferedLog;
use bootstrap_cli::managers::PackageManager;
use bootstrap_cli::platform::Platform;
use bootstrap_cli::privilege::Privilege;
use bootstrap_cli::prompt::Prompt;
use bootstrap_cli::resources::hook::HookEnv;
use bootstrap_cli::tasks::Context;

#[derive(Debug, Default)]
struct Recorded {
    rules: Vec<(String, Vec<ExecResult>)>,
    calls: Vec<String>,
}

/// Executor that records every command line and answers from a script.
///
/// Each rule maps a substring of the command line to a queue of results;
/// the queue is consumed in order and its last result repeats.  Commands
/// that match no rule succeed with empty output.  Clones share state.
#[derive(Debug, Default, Clone)]
pub struct FakeExecutor {
    recorded: Arc<Mutex<Recorded>>,
    on_path: Vec<String>,
}

impl FakeExecutor {
    /// An executor with `programs` on `PATH`.
    pub fn with_path(programs: &[&str]) -> Self {
        Self {
            recorded: Arc::default(),
            on_path: programs.iter().map(ToString::to_string).collect(),
        }
    }

    /// Answer commands containing `pattern` with `results`, in order.
    pub fn respond(self, pattern: &str, results: Vec<ExecResult>) -> Self {
        self.recorded
            .lock()
            .expect("lock")
            .rules
            .push((pattern.to_string(), results));
        self
    }

    /// All command lines run so far.
    pub fn calls(&self) -> Vec<String> {
        self.recorded.lock().expect("lock").calls.clone()
    }

    /// Number of command lines containing `pattern`.
    pub fn count(&self, pattern: &str) -> usize {
        self.calls().iter().filter(|c| c.contains(pattern)).count()
    }

    /// Forget recorded calls, keeping the rules.
    pub fn clear_calls(&self) {
        self.recorded.lock().expect("lock").calls.clear();
    }

    fn answer(&self, line: String) -> ExecResult {
        let mut recorded = self.recorded.lock().expect("lock");
        let result = recorded
            .rules
            .iter_mut()
            .find(|(pattern, _)| line.contains(pattern.as_str()))
            .and_then(|(_, queue)| {
                if queue.len() > 1 {
                    Some(queue.remove(0))
                } else {
                    queue.first().cloned()
                }
            })
            .unwrap_or_else(|| ExecResult::ok(""));
        recorded.calls.push(line);
        result
    }
}

impl Executor for FakeExecutor {
    fn run_unchecked(&self, program: &str, args: &[&str]) -> ExecResult {
        self.answer(command_line(program, args))
    }

    fn run_with_input(&self, program: &str, args: &[&str], _input: &str) -> ExecResult {
        self.answer(command_line(program, args))
    }

    fn run_shell(&self, command: &str) -> ExecResult {
        self.answer(command.to_string())
    }

    fn which(&self, program: &str) -> bool {
        self.on_path.iter().any(|p| p == program)
    }
}

/// Prompt with a fixed answer that counts how often it was asked.
#[derive(Debug, Default)]
pub struct FixedPrompt {
    answer: bool,
    asked: Mutex<usize>,
}

impl FixedPrompt {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: Mutex::new(0),
        }
    }

    pub fn times_asked(&self) -> usize {
        *self.asked.lock().expect("lock")
    }
}

impl Prompt for FixedPrompt {
    fn confirm(&self, _question: &str) -> bool {
        *self.asked.lock().expect("lock") += 1;
        self.answer
    }
}

/// A bootstrap root backed by a [`tempfile::TempDir`] with
/// `conf/apps.json` holding `catalog`.
pub struct TestRoot {
    pub dir: tempfile::TempDir,
}

impl TestRoot {
    pub fn with_catalog(catalog: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_catalog(dir.path(), "conf/apps.json", catalog);
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Global options pointing at this root.
    pub fn global(&self) -> GlobalOpts {
        GlobalOpts {
            root: Some(self.dir.path().to_path_buf()),
            catalog: None,
        }
    }
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_catalog(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create catalog dir");
    }
    std::fs::write(&path, content).expect("write catalog");
    path
}

/// A run context for `platform` and `manager` with fixed hook values.
pub fn context(
    platform: Platform,
    manager: PackageManager,
    executor: &FakeExecutor,
    hook_env: HookEnv,
) -> (Context, Arc<BufferedLog>) {
    let log = Arc::new(BufferedLog::new());
    let ctx = Context {
        platform,
        manager,
        privilege: Privilege::Sudo,
        log: log.clone(),
        executor: Arc::new(executor.clone()),
        hook_env,
        work_dir: PathBuf::from("/tmp/bootstrap-it"),
    };
    (ctx, log)
}
