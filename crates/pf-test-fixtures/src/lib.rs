use std::fs;
use std::path::PathBuf;

pub const TESTCASE_FILE: &str = "testcase.json";
pub const MESSAGES_FILE: &str = "messages.ndjson";

pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

pub fn fixtures_root() -> PathBuf {
    workspace_root().join("fixtures")
}

pub fn fixture_dir(name: &str) -> PathBuf {
    fixtures_root().join(name)
}

pub fn testcase_path(name: &str) -> PathBuf {
    fixture_dir(name).join(TESTCASE_FILE)
}

pub fn messages_path(name: &str) -> PathBuf {
    fixture_dir(name).join(MESSAGES_FILE)
}

/// Sorted names of the fixture directories that carry a testcase.
pub fn fixture_names() -> Vec<String> {
    let Ok(entries) = fs::read_dir(fixtures_root()) else {
        return Vec::new();
    };
    let mut names = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.join(TESTCASE_FILE).is_file())
        .filter_map(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().to_string())
        })
        .collect::<Vec<_>>();
    names.sort();
    names
}
