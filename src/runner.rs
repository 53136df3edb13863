//! Running problem entry points through `tsx`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::workspace::Problem;
use crate::{Error, Result};

/// Which entry point of a problem to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunTarget {
    /// Run the test cases against the latest implementation.
    Latest,
    /// Benchmark every registered implementation.
    Compare,
}

impl RunTarget {
    /// Returns the entry point file name inside the problem folder.
    pub fn script_name(self) -> &'static str {
        match self {
            RunTarget::Latest => "index.ts",
            RunTarget::Compare => "compare.ts",
        }
    }
}

impl fmt::Display for RunTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunTarget::Latest => "latest",
            RunTarget::Compare => "compare",
        })
    }
}

/// Returns the local `tsx` shim of a workspace.
pub fn default_tsx_path(root: &Path) -> PathBuf {
    let exe = if cfg!(windows) { "tsx.cmd" } else { "tsx" };
    root.join("node_modules").join(".bin").join(exe)
}

/// Launches problem entry points with inherited stdio.
#[derive(Debug, Clone)]
pub struct Runner {
    root: PathBuf,
    tsx: PathBuf,
}

impl Runner {
    /// Creates a runner using the workspace's local `tsx` shim.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let tsx = default_tsx_path(&root);
        Self { root, tsx }
    }

    /// Overrides the `tsx` executable.
    ///
    /// A bare program name is looked up on `PATH` when run.
    pub fn with_tsx(mut self, tsx: impl Into<PathBuf>) -> Self {
        self.tsx = tsx.into();
        self
    }

    /// Returns the `tsx` executable in use.
    pub fn tsx(&self) -> &Path {
        &self.tsx
    }

    /// Builds the command for a target without running it.
    ///
    /// # Errors
    ///
    /// - [`Error::ProblemNotFound`] if the entry point does not exist.
    /// - [`Error::ToolNotFound`] if `tsx` is a path that does not exist.
    pub fn command(&self, problem: &Problem, target: RunTarget) -> Result<Command> {
        let script = problem.script_path(target.script_name());
        if !script.is_file() {
            log::debug!("missing entry point {}", script.display());
            return Err(Error::ProblemNotFound {
                name: problem.name().to_string(),
            });
        }

        let is_bare_name = self.tsx.components().count() == 1;
        if !is_bare_name && !self.tsx.exists() {
            return Err(Error::ToolNotFound {
                path: self.tsx.clone(),
            });
        }

        let mut command = Command::new(&self.tsx);
        command.arg(script).current_dir(&self.root);
        Ok(command)
    }

    /// Runs a target to completion and returns the child's exit status.
    pub fn run(&self, problem: &Problem, target: RunTarget) -> Result<ExitStatus> {
        let mut command = self.command(problem, target)?;
        log::info!("running {} for {}", target, problem.name());
        let status = command.status()?;
        if !status.success() {
            log::warn!("{} for {} exited with {}", target, problem.name(), status);
        }
        Ok(status)
    }
}
