//! Parsers for snapper's human-readable tables.
//!
//! Snapper prints its tables with box-drawing separators (`│`), or with plain
//! pipes when run with `--ascii` or by older releases. Nothing here is a stable
//! format, so every assumption about the layout lives in this module.

use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

static SIZE_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+\.?\d*\s*[KMGTP]?i?B)").expect("Failed to compile size token regex")
});

const SUBVOLUME_KEY: &str = "SUBVOLUME";
const USED_SPACE_HEADER: &str = "Used Space";

/// Splits a table line into trimmed cells. Separator lines come back as a single cell.
fn cells(line: &str) -> Vec<&str> {
    let separator = if line.contains('│') { '│' } else { '|' };

    line.split(separator).map(str::trim).collect_vec()
}

/// Snapshot numbers can carry state markers in listings (`1*`, `7-`, `9+`).
fn row_key(cell: &str) -> &str {
    cell.trim_end_matches(['*', '-', '+'])
}

pub fn parse_snapshot_number(stdout: &str) -> Option<String> {
    let number = stdout.trim();

    (!number.is_empty()).then(|| number.to_string())
}

/// Extracts the `SUBVOLUME` value from `snapper get-config` output.
pub fn parse_subvolume(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(cells)
        .find(|cells| cells.len() >= 2 && cells[0] == SUBVOLUME_KEY)
        .map(|cells| cells[1].to_string())
        .filter(|subvolume| !subvolume.is_empty())
}

/// Table rules such as `────┼────` or `----+----`, which end the header.
fn is_separator(line: &str) -> bool {
    let line = line.trim();

    !line.is_empty()
        && line
            .chars()
            .all(|c| matches!(c, '─' | '┼' | '-' | '+' | '=' | ' '))
}

/// Extracts the size token of snapshot `number` from `snapper list` output.
///
/// When the header above the table rule has a `Used Space` column only that
/// cell is searched, otherwise the first size-looking token in the raw row is
/// taken. Matching the raw line keeps tokens from spanning cell separators.
pub fn parse_snapshot_size(stdout: &str, number: &str) -> Option<String> {
    let lines = stdout.lines().collect_vec();

    let used_space_column = lines
        .iter()
        .position(|line| is_separator(line))
        .and_then(|separator| {
            lines[..separator].iter().find_map(|line| {
                cells(line)
                    .into_iter()
                    .find_position(|cell| *cell == USED_SPACE_HEADER)
                    .map(|(index, _)| index)
            })
        });

    let row = lines.iter().copied().find(|line| {
        let cells = cells(line);
        cells.len() >= 2 && row_key(cells[0]) == number
    })?;

    let haystack = match used_space_column {
        Some(index) => cells(row).get(index).copied()?,
        None => row,
    };

    SIZE_TOKEN_REGEX
        .captures(haystack)
        .map(|captures| captures[1].to_string())
}

/// Where snapper stores snapshot `number` of `subvolume`.
pub fn snapshot_path(subvolume: &str, number: &str) -> String {
    format!(
        "{}/.snapshots/{}/snapshot",
        subvolume.trim_end_matches('/'),
        number
    )
}
