use crate::record::RequestRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading the ranked list
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read ranked list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Reads a ranked list file into request records
///
/// The file is decoded as UTF-8; invalid sequences are replaced rather than
/// rejected. See [`parse_ranked_list`] for the line format.
///
/// # Arguments
///
/// * `path` - Path to the ranked list
///
/// # Returns
///
/// * `Ok(Vec<RequestRecord>)` - One record per significant line, in file order
/// * `Err(InputError)` - The file could not be read
pub fn read_ranked_list(path: &Path) -> Result<Vec<RequestRecord>, InputError> {
    let bytes = std::fs::read(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let content = String::from_utf8_lossy(&bytes);
    let records = parse_ranked_list(&content);

    tracing::info!(
        "Read {} ranked targets from {}",
        records.len(),
        path.display()
    );

    Ok(records)
}

/// Parses ranked list content
///
/// A line is significant only if it starts with an ASCII digit. Significant
/// lines are comma separated: field 0 is the rank, field 1 the double-quoted
/// target. Everything else (headers, comments, blank lines) is ignored, as are
/// significant lines whose rank is not an integer or that lack a target.
///
/// # Example
///
/// ```
/// use site_searcher::input::parse_ranked_list;
///
/// let records = parse_ranked_list("Rank,URL\n1,\"google.com\"\n2,\"youtube.com\"\n");
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].target(), "youtube.com");
/// ```
pub fn parse_ranked_list(content: &str) -> Vec<RequestRecord> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| line.starts_with(|c: char| c.is_ascii_digit()))
        .filter_map(|(index, line)| {
            let record = parse_line(line);
            if record.is_none() {
                tracing::debug!("Skipping malformed line {}: {}", index + 1, line);
            }
            record
        })
        .collect()
}

/// Parses one significant line
fn parse_line(line: &str) -> Option<RequestRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes());

    let fields = reader.records().next()?.ok()?;
    if fields.len() < 2 {
        return None;
    }

    let rank = fields.get(0)?.parse::<u64>().ok()?;

    // Quotes after leading whitespace are not csv quoting, strip them here
    let target = fields.get(1)?.trim_matches('"').trim();
    if target.is_empty() {
        return None;
    }

    Some(RequestRecord::new(rank, target))
}
