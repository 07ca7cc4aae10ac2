use super::SOURCE_EXTENSION;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Lists shader sources (`*.sc`) directly inside `dir`.
///
/// A missing directory or a path that is not a directory yields nothing.
/// Subdirectories are not entered. The order is whatever the directory scan produces.
///
/// `glob` patterns are `&str`, so an existing directory whose path is not valid UTF-8
/// cannot be scanned: it yields nothing and a warning is logged.
pub fn find_shader_files<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return vec![];
    }

    let Some(dir_str) = dir.to_str() else {
        log::warn!("Shader directory is not valid UTF-8: {}", dir.display());
        return vec![];
    };
    let pattern = format!("{}/*.{}", glob::Pattern::escape(dir_str), SOURCE_EXTENSION);

    let entries = match glob::glob(&pattern) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("Invalid shader search pattern {pattern}: {err}");
            return vec![];
        }
    };

    entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(err) => {
                log::warn!("Cannot read {}: {}", err.path().display(), err.error());
                None
            }
        })
        .filter(|path| path.is_file() && path.extension() == Some(OsStr::new(SOURCE_EXTENSION)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn names(files: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn missing_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(find_shader_files(tmp.path().join("nope")).is_empty());
    }

    #[test]
    fn file_instead_of_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("a.vs.sc");
        fs::write(&file, "").unwrap();
        assert!(find_shader_files(&file).is_empty());
    }

    #[test]
    fn only_regular_sc_files_non_recursive() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("a.vs.sc"), "").unwrap();
        fs::write(root.join("b.fs.sc"), "").unwrap();
        fs::write(root.join("c.txt"), "").unwrap();
        fs::write(root.join("d.sc.bak"), "").unwrap();
        fs::create_dir(root.join("dir.sc")).unwrap();
        fs::create_dir(root.join("nested")).unwrap();
        fs::write(root.join("nested").join("e.vs.sc"), "").unwrap();

        let found = find_shader_files(root);
        assert_eq!(names(&found), ["a.vs.sc", "b.fs.sc"]);
        assert!(found.iter().all(|p| p.starts_with(root)));
    }

    #[test]
    fn dir_name_with_glob_characters() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("shaders [dx]");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.vs.sc"), "").unwrap();

        assert_eq!(names(&find_shader_files(&root)), ["a.vs.sc"]);
    }
}
