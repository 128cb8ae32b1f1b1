//! Plain text report
//!
//! One line per record:
//!
//! ```text
//! 1, "wikipedia.org", matches found: news New
//! 2, "nonexistent.invalid", matches found: Get http://nonexistent.invalid/, fetch error: ...
//! ```

use crate::output::traits::{sort_by_rank, OutputError, OutputResult, ReportSink};
use crate::record::RequestRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Text report written block by block
pub struct TextReport<W: Write> {
    writer: W,
    lines_written: usize,
}

impl TextReport<BufWriter<File>> {
    /// Creates (or truncates) the report file
    ///
    /// Called before any fetch starts so that an unwritable destination
    /// aborts the run early.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path).map_err(|source| OutputError::Create {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TextReport<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            lines_written: 0,
        }
    }

    /// Number of record lines written so far
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for TextReport<W> {
    fn write_block(&mut self, records: &mut [RequestRecord]) -> OutputResult<()> {
        sort_by_rank(records);

        for record in records.iter() {
            writeln!(self.writer, "{}", format_record_line(record))?;
        }
        // Flush per block so an interrupted run leaves complete blocks behind
        self.writer.flush()?;

        self.lines_written += records.len();
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Formats one record as a report line (without the newline)
///
/// Line breaks inside the result are replaced by spaces so that every record
/// occupies exactly one line.
///
/// # Example
///
/// ```
/// use site_searcher::output::format_record_line;
/// use site_searcher::RequestRecord;
///
/// let record = RequestRecord::new(1, "wikipedia.org").with_matches(&["News", "new "]);
/// assert_eq!(
///     format_record_line(&record),
///     "1, \"wikipedia.org\", matches found: News new "
/// );
/// ```
pub fn format_record_line(record: &RequestRecord) -> String {
    let result: String = record
        .result()
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    format!(
        "{}, {:?}, matches found: {}",
        record.rank(),
        record.target(),
        result
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::NamedTempFile;

    fn written(report: TextReport<Vec<u8>>) -> String {
        String::from_utf8(report.into_inner()).unwrap()
    }

    #[test]
    fn test_format_record_line() {
        let record = RequestRecord::new(12, "example.com/").with_matches(&["New", "newer", "NEW!"]);
        assert_eq!(
            format_record_line(&record),
            "12, \"example.com/\", matches found: New newer NEW!"
        );
    }

    #[test]
    fn test_format_record_without_matches() {
        let record = RequestRecord::new(3, "quiet.com").with_matches::<&str>(&[]);
        assert_eq!(format_record_line(&record), "3, \"quiet.com\", matches found: ");
    }

    #[test]
    fn test_format_escapes_quotes_in_target() {
        let record = RequestRecord::new(1, "odd\"target.com").with_matches::<&str>(&[]);
        assert!(format_record_line(&record).starts_with("1, \"odd\\\"target.com\", "));
    }

    #[test]
    fn test_format_keeps_record_on_one_line() {
        let record = RequestRecord::new(2, "bad.invalid")
            .with_error("Get http://bad.invalid/, fetch error:\nno such host\r\n");
        let line = format_record_line(&record);
        assert!(!line.contains('\n'));
        assert!(!line.contains('\r'));
        assert!(line.contains("fetch error: no such host"));
    }

    #[test]
    fn test_write_block_sorts_by_rank() {
        let mut report = TextReport::new(Vec::new());
        let mut block = vec![
            RequestRecord::new(3, "c.com").with_matches(&["new"]),
            RequestRecord::new(1, "a.com").with_matches::<&str>(&[]),
            RequestRecord::new(2, "b.com").with_error("b.com: reading error: reset"),
        ];

        report.write_block(&mut block).unwrap();
        assert_eq!(report.lines_written(), 3);

        let output = written(report);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "1, \"a.com\", matches found: ",
                "2, \"b.com\", matches found: b.com: reading error: reset",
                "3, \"c.com\", matches found: new",
            ]
        );
    }

    #[test]
    fn test_blocks_are_appended() {
        let mut report = TextReport::new(Vec::new());
        let mut first = vec![
            RequestRecord::new(2, "b.com").with_matches::<&str>(&[]),
            RequestRecord::new(1, "a.com").with_matches::<&str>(&[]),
        ];
        let mut second = vec![RequestRecord::new(3, "c.com").with_matches::<&str>(&[])];

        report.write_block(&mut first).unwrap();
        report.write_block(&mut second).unwrap();
        report.finish().unwrap();

        let output = written(report);
        let ranks: Vec<&str> = output.lines().map(|l| l.split(',').next().unwrap()).collect();
        assert_eq!(ranks, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_create_truncates_existing_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"stale line from an earlier run\n").unwrap();
        file.flush().unwrap();

        let mut report = TextReport::create(file.path()).unwrap();
        let mut block = vec![RequestRecord::new(1, "a.com").with_matches(&["news"])];
        report.write_block(&mut block).unwrap();
        report.finish().unwrap();
        drop(report);

        let mut content = String::new();
        File::open(file.path())
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "1, \"a.com\", matches found: news\n");
    }

    #[test]
    fn test_create_in_missing_directory() {
        let result = TextReport::create(Path::new("/nonexistent/dir/out.txt"));
        assert!(matches!(result, Err(OutputError::Create { .. })));
    }
}
