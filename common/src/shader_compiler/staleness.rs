use std::fs;
use std::path::Path;
use std::time::SystemTime;

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Returns `true` unless `output` exists and was modified strictly after `source`.
///
/// Equal timestamps rebuild. Unreadable metadata on either side also rebuilds.
pub fn needs_rebuild<P: AsRef<Path>, Q: AsRef<Path>>(source: P, output: Q) -> bool {
    let Some(output_ts) = modified(output.as_ref()) else {
        return true;
    };
    let Some(source_ts) = modified(source.as_ref()) else {
        return true;
    };

    output_ts <= source_ts
}
