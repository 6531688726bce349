//! Fixture loading shared by the format tests.
//!
//! Fixtures live in `tests/fixtures` as `<name>.md` / `<name>.rst` pairs. The
//! files are compared byte for byte, including the leading and trailing
//! newlines of the RST side.

use std::fs;
use std::path::PathBuf;

pub fn fixture_path(file_name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(file_name)
}

pub fn read_fixture(file_name: &str) -> String {
    let path = fixture_path(file_name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

/// The Markdown source and expected RST of a fixture pair
pub fn fixture_pair(name: &str) -> (String, String) {
    (
        read_fixture(&format!("{name}.md")),
        read_fixture(&format!("{name}.rst")),
    )
}
