use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

pub const VERTEX_MARKER: &str = "vs";
pub const FRAGMENT_MARKER: &str = "fs";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Unknown,
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Classifies `name.vs.sc` / `name.fs.sc` by the extension that remains after
    /// the outer source extension is stripped.
    pub fn of_file<P: AsRef<Path>>(path: P) -> Self {
        let inner = path.as_ref().file_stem().map(Path::new).and_then(Path::extension);

        match inner.and_then(OsStr::to_str) {
            Some(VERTEX_MARKER) => Self::Vertex,
            Some(FRAGMENT_MARKER) => Self::Fragment,
            _ => Self::Unknown,
        }
    }

    /// Value of the compiler's `--type` flag. `None` for `Unknown`.
    pub fn compiler_type(self) -> Option<&'static str> {
        match self {
            Self::Unknown => None,
            Self::Vertex => Some("vertex"),
            Self::Fragment => Some("fragment"),
        }
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.compiler_type().unwrap_or("unknown"))
    }
}

#[test]
fn stage_from_double_extension() {
    assert_eq!(ShaderStage::of_file("a.vs.sc"), ShaderStage::Vertex);
    assert_eq!(ShaderStage::of_file("dir/with.dots/b.fs.sc"), ShaderStage::Fragment);
    assert_eq!(ShaderStage::of_file("/abs/path/lit.mesh.vs.sc"), ShaderStage::Vertex);
}

#[test]
fn stage_unknown_cases() {
    assert_eq!(ShaderStage::of_file("varying.def.sc"), ShaderStage::Unknown);
    assert_eq!(ShaderStage::of_file("common.sc"), ShaderStage::Unknown);
    assert_eq!(ShaderStage::of_file("vs.sc"), ShaderStage::Unknown);
    assert_eq!(ShaderStage::of_file("a.VS.sc"), ShaderStage::Unknown);
    assert_eq!(ShaderStage::of_file("a.cs.sc"), ShaderStage::Unknown);
    assert_eq!(ShaderStage::of_file(""), ShaderStage::Unknown);
}

#[test]
fn stage_type_strings() {
    assert_eq!(ShaderStage::Vertex.compiler_type(), Some("vertex"));
    assert_eq!(ShaderStage::Fragment.compiler_type(), Some("fragment"));
    assert_eq!(ShaderStage::Unknown.compiler_type(), None);
    assert_eq!(ShaderStage::Unknown.to_string(), "unknown");
}
