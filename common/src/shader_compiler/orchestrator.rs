use super::command::{render_command_line, CompileTask, CompilerCommand};
use super::discovery::find_shader_files;
use super::process::{ProcessLauncher, ProcessResult, SystemLauncher};
use super::shader_file::ShaderFile;
use super::staleness::needs_rebuild;
use crate::config::BuildConfig;
use std::fmt::Formatter;
use std::path::{Path, PathBuf};
use std::{fmt, fs, io};

/// Receives one human-readable line per build decision.
pub trait StatusSink {
    fn status(&self, message: &str);
}

impl<F: Fn(&str)> StatusSink for F {
    fn status(&self, message: &str) {
        self(message)
    }
}

/// Forwards status lines to the `log` facade.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn status(&self, message: &str) {
        log::info!("{}", message);
    }
}

#[derive(Debug)]
pub enum BuildError {
    OutputDir(PathBuf, io::Error),
    CurrentDir(io::Error),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::OutputDir(path, err) => {
                write!(f, "cannot create output directory {}: {}", path.display(), err)
            }
            BuildError::CurrentDir(err) => write!(f, "cannot resolve absolute paths: {}", err),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::OutputDir(_, err) | BuildError::CurrentDir(err) => Some(err),
        }
    }
}

/// Terminal state of a single source file within a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    SkippedUnknown,
    UpToDate,
    Compiled,
    Failed(String),
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub discovered: usize,
    pub skipped_unknown: usize,
    pub up_to_date: usize,
    pub compiled: usize,
    pub failed: usize,
}

impl BuildSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::SkippedUnknown => self.skipped_unknown += 1,
            FileOutcome::UpToDate => self.up_to_date += 1,
            FileOutcome::Compiled => self.compiled += 1,
            FileOutcome::Failed(_) => self.failed += 1,
        }
    }
}

impl fmt::Display for BuildSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} discovered, {} compiled, {} up to date, {} unknown, {} failed",
            self.discovered, self.compiled, self.up_to_date, self.skipped_unknown, self.failed
        )
    }
}

/// Runs one sequential build pass: discover, classify, check staleness, compile.
pub struct BuildOrchestrator<L, S> {
    source_dir: PathBuf,
    output_dir: PathBuf,
    command: CompilerCommand,
    fail_on_exit_code: bool,
    launcher: L,
    sink: S,
}

impl BuildOrchestrator<SystemLauncher, LogSink> {
    pub fn from_config(config: &BuildConfig) -> Result<Self, BuildError> {
        let launcher = match config.timeout() {
            Some(timeout) => SystemLauncher::with_timeout(timeout),
            None => SystemLauncher::new(),
        };
        Self::with_backends(config, launcher, LogSink)
    }
}

impl<L: ProcessLauncher, S: StatusSink> BuildOrchestrator<L, S> {
    pub fn with_backends(config: &BuildConfig, launcher: L, sink: S) -> Result<Self, BuildError> {
        let command = CompilerCommand::new(&config.tool_dir, &config.platform, &config.profile)
            .map_err(BuildError::CurrentDir)?;

        Ok(Self {
            source_dir: config.source_dir.clone(),
            output_dir: config.output_dir.clone(),
            command,
            fail_on_exit_code: config.fail_on_exit_code,
            launcher,
            sink,
        })
    }

    pub fn command(&self) -> &CompilerCommand {
        &self.command
    }

    fn ensure_output_dir(&self) -> Result<(), BuildError> {
        match fs::create_dir(&self.output_dir) {
            Ok(()) => {
                self.sink
                    .status(&format!("Created output directory : {}", self.output_dir.display()));
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists && self.output_dir.is_dir() => Ok(()),
            Err(err) => Err(BuildError::OutputDir(self.output_dir.clone(), err)),
        }
    }

    /// Decides whether `shader` needs work and returns the task for it if so.
    pub fn plan(&self, shader: ShaderFile) -> Result<CompileTask, FileOutcome> {
        if !shader.stage().is_known() {
            self.sink
                .status(&format!("Skipping unknown shader type : {}", shader.file_name()));
            return Err(FileOutcome::SkippedUnknown);
        }

        self.sink.status(&format!(
            "Discovered {} shader : {}",
            shader.stage(),
            shader.source().display()
        ));

        if !needs_rebuild(shader.source(), shader.output()) {
            self.sink
                .status(&format!("Skipping up-to-date file : {}", shader.source().display()));
            return Err(FileOutcome::UpToDate);
        }

        // `stage` is known at this point, so a task always exists.
        self.command.task(shader).ok_or(FileOutcome::SkippedUnknown)
    }

    /// Removes whatever the compiler left behind after a failed run so that a partial
    /// artifact is never newer than its source.
    fn discard_output(&self, task: &CompileTask) {
        let output = task.shader.output();
        match fs::remove_file(output) {
            Ok(()) => self
                .sink
                .status(&format!("Removed partial output : {}", output.display())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => self
                .sink
                .status(&format!("Cannot remove partial output {} : {}", output.display(), err)),
        }
    }

    /// Runs the compiler for `task` and reports the outcome.
    pub fn execute(&self, task: &CompileTask) -> FileOutcome {
        let executable = self.command.executable();
        log::debug!("{}", render_command_line(&executable, &task.args));

        let result = self.launcher.launch(&executable, &task.args);
        let failure = match &result {
            ProcessResult::Completed { exit_code } if self.fail_on_exit_code && *exit_code != Some(0) => {
                self.discard_output(task);
                Some(result.to_string())
            }
            ProcessResult::Completed { .. } => None,
            ProcessResult::LaunchFailed { .. } => Some(result.to_string()),
            ProcessResult::TimedOut { .. } | ProcessResult::WaitFailed { .. } => {
                self.discard_output(task);
                Some(result.to_string())
            }
        };

        match failure {
            None => {
                self.sink
                    .status(&format!("Successfully processed shader : {}", task.shader.output().display()));
                FileOutcome::Compiled
            }
            Some(reason) => {
                self.sink.status(&format!(
                    "Failed to process shader {} : {}",
                    task.shader.file_name(),
                    reason
                ));
                FileOutcome::Failed(reason)
            }
        }
    }

    fn process_file(&self, path: &Path) -> FileOutcome {
        let shader = match ShaderFile::new(path, &self.output_dir) {
            Ok(shader) => shader,
            Err(err) => {
                let reason = err.to_string();
                self.sink
                    .status(&format!("Failed to resolve {} : {}", path.display(), reason));
                return FileOutcome::Failed(reason);
            }
        };

        match self.plan(shader) {
            Ok(task) => self.execute(&task),
            Err(outcome) => outcome,
        }
    }

    /// Processes every discovered source strictly in discovery order.
    /// Per-file failures are counted, never propagated.
    pub fn run(&self) -> Result<BuildSummary, BuildError> {
        self.ensure_output_dir()?;

        let files = find_shader_files(&self.source_dir);
        let mut summary = BuildSummary {
            discovered: files.len(),
            ..Default::default()
        };

        for path in &files {
            let outcome = self.process_file(path);
            summary.record(&outcome);
        }

        self.sink.status(&format!("Shader build finished : {}", summary));
        Ok(summary)
    }
}
