//! Incremental compilation of `*.sc` shader sources with an external `shadercRelease` tool.

pub mod command;
pub mod discovery;
pub mod orchestrator;
pub mod process;
pub mod shader_file;
pub mod staleness;
pub mod stage;

pub use command::{render_command_line, CompileTask, CompilerCommand};
pub use discovery::find_shader_files;
pub use orchestrator::{BuildError, BuildOrchestrator, BuildSummary, FileOutcome, LogSink, StatusSink};
pub use process::{ProcessLauncher, ProcessResult, SystemLauncher};
pub use shader_file::ShaderFile;
pub use staleness::needs_rebuild;
pub use stage::ShaderStage;

pub const SOURCE_EXTENSION: &str = "sc";
pub const OUTPUT_EXTENSION: &str = "bin";
pub const EXECUTABLE_NAME: &str = "shadercRelease";
pub const VARYING_DEF_FILE: &str = "varying.def.sc";

use crate::config::BuildConfig;

/// Builds every stale shader described by `config` and logs each decision.
pub fn compile_shaders(config: &BuildConfig) -> Result<BuildSummary, BuildError> {
    BuildOrchestrator::from_config(config)?.run()
}
