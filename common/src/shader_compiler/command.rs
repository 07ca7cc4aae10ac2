use super::shader_file::ShaderFile;
use super::{EXECUTABLE_NAME, VARYING_DEF_FILE};
use std::env::consts::EXE_SUFFIX;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{self, Path, PathBuf};

/// Fixed part of every compiler invocation.
#[derive(Debug, Clone)]
pub struct CompilerCommand {
    tool_dir: PathBuf,
    platform: String,
    profile: String,
}

/// A stale shader together with the arguments that rebuild it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileTask {
    pub shader: ShaderFile,
    pub args: Vec<OsString>,
}

impl CompilerCommand {
    pub fn new(tool_dir: &Path, platform: impl Into<String>, profile: impl Into<String>) -> io::Result<Self> {
        Ok(Self {
            tool_dir: path::absolute(tool_dir)?,
            platform: platform.into(),
            profile: profile.into(),
        })
    }

    pub fn executable(&self) -> PathBuf {
        self.tool_dir.join(format!("{EXECUTABLE_NAME}{EXE_SUFFIX}"))
    }

    pub fn varying_def(&self) -> PathBuf {
        self.tool_dir.join(VARYING_DEF_FILE)
    }

    /// Arguments for compiling `shader`, or `None` if its stage is unknown.
    pub fn args(&self, shader: &ShaderFile) -> Option<Vec<OsString>> {
        let ty = shader.stage().compiler_type()?;
        let varying_def = self.varying_def();

        let args: [&OsStr; 14] = [
            "-f".as_ref(),
            shader.source().as_os_str(),
            "-o".as_ref(),
            shader.output().as_os_str(),
            "--type".as_ref(),
            ty.as_ref(),
            "--platform".as_ref(),
            self.platform.as_ref(),
            "--profile".as_ref(),
            self.profile.as_ref(),
            "-i".as_ref(),
            self.tool_dir.as_os_str(),
            "--varyingdef".as_ref(),
            varying_def.as_os_str(),
        ];
        Some(args.iter().map(|a| a.to_os_string()).collect())
    }

    pub fn task(&self, shader: ShaderFile) -> Option<CompileTask> {
        let args = self.args(&shader)?;
        Some(CompileTask { shader, args })
    }
}

/// Renders an invocation as one line, quoting every token that contains whitespace.
pub fn render_command_line(executable: &Path, args: &[OsString]) -> String {
    std::iter::once(executable.as_os_str())
        .chain(args.iter().map(OsString::as_os_str))
        .map(|token| {
            let token = token.to_string_lossy();
            if token.is_empty() || token.chars().any(char::is_whitespace) {
                format!("\"{token}\"")
            } else {
                token.into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> CompilerCommand {
        CompilerCommand::new(Path::new("/opt/bgfx tools"), "linux", "440").unwrap()
    }

    #[cfg(unix)]
    #[test]
    fn args_layout() {
        let cmd = command();
        let shader = ShaderFile::new(Path::new("/src/a.fs.sc"), Path::new("/out")).unwrap();
        let args = cmd.args(&shader).unwrap();

        let expected: Vec<OsString> = [
            "-f",
            "/src/a.fs.sc",
            "-o",
            "/out/a.fs.bin",
            "--type",
            "fragment",
            "--platform",
            "linux",
            "--profile",
            "440",
            "-i",
            "/opt/bgfx tools",
            "--varyingdef",
            "/opt/bgfx tools/varying.def.sc",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn args_are_idempotent() {
        let cmd = command();
        let shader = ShaderFile::new(Path::new("rel/b.vs.sc"), Path::new("rel/out")).unwrap();

        assert_eq!(cmd.args(&shader), cmd.args(&shader));
        assert_eq!(cmd.task(shader.clone()), cmd.task(shader));
    }

    #[test]
    fn relative_paths_become_absolute() {
        let cmd = CompilerCommand::new(Path::new("tools"), "linux", "120").unwrap();
        let shader = ShaderFile::new(Path::new("rel/b.vs.sc"), Path::new("rel/out")).unwrap();
        let args = cmd.args(&shader).unwrap();

        for i in [1, 3, 11, 13] {
            assert!(Path::new(&args[i]).is_absolute(), "{:?}", args[i]);
        }
        assert!(cmd.executable().is_absolute());
    }

    #[test]
    fn unknown_stage_has_no_task() {
        let shader = ShaderFile::new(Path::new("/src/common.sc"), Path::new("/out")).unwrap();
        assert!(command().args(&shader).is_none());
        assert!(command().task(shader).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn command_line_quotes_spaces() {
        let cmd = command();
        let shader = ShaderFile::new(Path::new("/src/a.vs.sc"), Path::new("/out")).unwrap();
        let line = render_command_line(&cmd.executable(), &cmd.args(&shader).unwrap());

        assert!(line.starts_with("\"/opt/bgfx tools/shadercRelease"));
        assert!(line.contains(" -i \"/opt/bgfx tools\" "));
        assert!(line.ends_with("--varyingdef \"/opt/bgfx tools/varying.def.sc\""));
        assert!(line.contains("--type vertex --platform linux --profile 440"));
    }
}
