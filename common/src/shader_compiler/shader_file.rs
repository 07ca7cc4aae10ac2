use super::stage::ShaderStage;
use super::OUTPUT_EXTENSION;
use std::io;
use std::path::{self, Path, PathBuf};

/// A single shader source paired with the artifact it compiles to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderFile {
    source: PathBuf,
    output: PathBuf,
    file_name: String,
}

impl ShaderFile {
    /// Resolves `source` and its output inside `output_dir` to absolute paths.
    /// `a.vs.sc` maps to `<output_dir>/a.vs.bin`.
    pub fn new(source: &Path, output_dir: &Path) -> io::Result<Self> {
        let name = source.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a file path: {}", source.display()),
            )
        })?;

        let mut output = path::absolute(output_dir)?.join(name);
        output.set_extension(OUTPUT_EXTENSION);

        Ok(Self {
            source: path::absolute(source)?,
            output,
            file_name: name.to_string_lossy().into_owned(),
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn stage(&self) -> ShaderStage {
        ShaderStage::of_file(&self.source)
    }
}

#[test]
fn shader_file_paths() {
    let file = ShaderFile::new(Path::new("shaders/a.vs.sc"), Path::new("bin")).unwrap();

    assert!(file.source().is_absolute());
    assert!(file.output().is_absolute());
    assert!(file.source().ends_with("shaders/a.vs.sc"));
    assert!(file.output().ends_with("bin/a.vs.bin"));
    assert_eq!(file.file_name(), "a.vs.sc");
    assert_eq!(file.stage(), ShaderStage::Vertex);
}

#[test]
fn shader_file_rejects_dir_like_path() {
    assert!(ShaderFile::new(Path::new("shaders/.."), Path::new("bin")).is_err());
}
