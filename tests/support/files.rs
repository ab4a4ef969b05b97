//! Temporary files for config and deal payloads.

use std::io::Write;

use tempfile::NamedTempFile;

/// Write `contents` to a temp file with the given suffix. The file is removed
/// when the handle drops.
pub fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("edgefinder-test-")
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

pub fn temp_config(contents: &str) -> NamedTempFile {
    temp_file(".toml", contents)
}

pub fn temp_json(contents: &str) -> NamedTempFile {
    temp_file(".json", contents)
}
