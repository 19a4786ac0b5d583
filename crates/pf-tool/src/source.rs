use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{FixtureCase, PfToolError, TESTCASE_SCHEMA_V1};

const TESTCASE_FILE: &str = "testcase.json";

pub fn read_test_case(case_path: &Path) -> Result<FixtureCase, PfToolError> {
    let raw = fs::read_to_string(case_path).map_err(|source| PfToolError::ReadFile {
        path: case_path.to_path_buf(),
        source,
    })?;
    let parsed: FixtureCase =
        serde_json::from_str(&raw).map_err(|source| PfToolError::ParseCase {
            path: case_path.to_path_buf(),
            source,
        })?;

    if parsed.schema_version != TESTCASE_SCHEMA_V1 {
        return Err(PfToolError::InvalidSchemaVersion {
            expected: TESTCASE_SCHEMA_V1.to_string(),
            found: parsed.schema_version,
        });
    }

    Ok(parsed)
}

pub fn open_messages(
    fixture_dir: &Path,
    case: &FixtureCase,
) -> Result<BufReader<File>, PfToolError> {
    let path = fixture_dir.join(&case.messages_file);
    File::open(&path)
        .map(BufReader::new)
        .map_err(|source| PfToolError::ReadFile { path, source })
}

/// Every directory under `root` holding a `testcase.json`, sorted by path.
pub fn discover_fixture_dirs(root: &Path) -> Result<Vec<PathBuf>, PfToolError> {
    let mut directories = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == TESTCASE_FILE)
        .filter_map(|entry| entry.path().parent().map(Path::to_path_buf))
        .collect::<Vec<_>>();
    directories.sort();

    if directories.is_empty() {
        return Err(PfToolError::FixturesEmpty {
            path: root.to_path_buf(),
        });
    }
    Ok(directories)
}
