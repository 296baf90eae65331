//! Changelog file handling
//!
//! Writes a rendered section into the changelog file. A file named
//! `CHANGELOG.md` (any case) is merged: the new section is inserted under
//! the top-level header and everything already there is kept below it, and
//! a header-stripped copy of just the new section lands in a `_temp`
//! sibling for release-notes posting. Any other filename is overwritten
//! outright.

use crate::error::Result;
use regex::Regex;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

const HEADER: &str = "# Changelog\n\n";

/// Path of the `_temp` sibling: same directory, `{stem}_temp{ext}`
pub fn temp_sibling_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("CHANGELOG");
    let ext = path
        .extension()
        .and_then(OsStr::to_str)
        .map(|e| format!(".{}", e))
        .unwrap_or_default();
    path.with_file_name(format!("{}_temp{}", stem, ext))
}

/// The new section without its own `## version (date)` line
fn strip_section_header(section: &str) -> String {
    let without_first = section.splitn(2, '\n').nth(1).unwrap_or("");
    match Regex::new(r"^\s*\n") {
        Ok(re) => re.replace(without_first, "").into_owned(),
        Err(_) => without_first.to_string(),
    }
}

/// Write a rendered section to the target changelog path.
pub fn write_changelog(output_file: &Path, section: &str) -> Result<()> {
    let file_name = output_file
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or("")
        .to_lowercase();

    if file_name == "changelog.md" {
        let merged = if output_file.exists() {
            // drop the existing top-level header line, keep the rest below
            // the new section
            let existing = fs::read_to_string(output_file)?;
            let old_body = existing.splitn(2, '\n').nth(1).unwrap_or("");
            format!("{}{}{}", HEADER, section, old_body)
        } else {
            format!("{}{}", HEADER, section)
        };
        fs::write(output_file, merged)?;

        let stripped = strip_section_header(section);
        fs::write(
            temp_sibling_path(output_file),
            format!("{}{}", HEADER, stripped),
        )?;
    } else {
        fs::write(output_file, format!("{}{}", HEADER, section))?;
    }

    Ok(())
}
