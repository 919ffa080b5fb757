use labelwrap::str_width;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Render wrapped lines one per row, fenced so empty lines stay visible
#[allow(dead_code)]
pub fn render_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| format!("|{}|", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Widest line in display columns
#[allow(dead_code)]
pub fn max_line_width(lines: &[String]) -> usize {
    lines.iter().map(|line| str_width(line)).max().unwrap_or(0)
}

/// Non-whitespace code points of `text`, with trailing hyphen markers removed
/// from each line first. Used to check that wrapping never loses content.
#[allow(dead_code)]
pub fn visible_chars(lines: &[String], hyphen: &str) -> String {
    lines
        .iter()
        .map(|line| line.strip_suffix(hyphen).unwrap_or(line))
        .flat_map(|line| line.chars())
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Write a config file into a temp dir so tests never pick up the user's own config
#[allow(dead_code)]
pub fn isolated_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).unwrap();
    (dir, path)
}
