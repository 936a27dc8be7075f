use crate::domain::model::ClassifiedRow;
use crate::utils::error::{ClassifierError, Result};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Writer, WriterBuilder};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

pub const OUTPUT_HEADER: [&str; 3] = ["ACCOUNT", "COST_CENTER", "AI_CLASSIFICATION"];

/// Best-effort count of data lines (header excluded) for the progress denominator.
/// Any read failure yields `None` instead of an error.
pub fn count_data_lines(path: &Path) -> Option<usize> {
    let file = File::open(path).ok()?;
    let lines = BufReader::new(file)
        .lines()
        .try_fold(0usize, |count, line| line.map(|_| count + 1))
        .ok()?;
    Some(lines.saturating_sub(1))
}

/// Data line number of a record (header line excluded), counted on the raw
/// file so blank lines the reader drops still advance it, like
/// [`count_data_lines`]. Falls back to `fallback` when no position is known.
pub fn data_line(record: &StringRecord, fallback: usize) -> usize {
    record
        .position()
        .and_then(|pos| usize::try_from(pos.line()).ok())
        .map(|line| line.saturating_sub(1))
        .filter(|line| *line > 0)
        .unwrap_or(fallback)
}

/// Lazy stream of raw records from a delimited file, header already consumed.
pub struct RowSource<R: Read> {
    records: StringRecordsIntoIter<R>,
}

impl RowSource<File> {
    pub fn open(path: &Path, delimiter: u8) -> Result<Self> {
        if !path.exists() {
            return Err(ClassifierError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        let reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;
        Ok(Self {
            records: reader.into_records(),
        })
    }
}

impl<R: Read> RowSource<R> {
    pub fn from_reader(reader: R, delimiter: u8) -> Self {
        let reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        Self {
            records: reader.into_records(),
        }
    }
}

impl<R: Read> Iterator for RowSource<R> {
    type Item = Result<StringRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records
            .next()
            .map(|record| record.map_err(ClassifierError::from))
    }
}

/// Output writer. Every appended row is flushed straight through so an
/// interrupted run leaves every completed row on disk.
pub struct RowSink<W: Write> {
    writer: Writer<W>,
    rows_written: usize,
}

impl RowSink<File> {
    /// Creates (or truncates) the output file and writes the header.
    pub fn create(path: &Path, delimiter: u8) -> Result<Self> {
        let file = File::create(path)?;
        Self::from_writer(file, delimiter)
    }
}

impl<W: Write> RowSink<W> {
    pub fn from_writer(inner: W, delimiter: u8) -> Result<Self> {
        let mut writer = WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(inner);
        writer.write_record(OUTPUT_HEADER)?;
        writer.flush()?;
        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    pub fn append(&mut self, result: &ClassifiedRow) -> Result<()> {
        self.writer.write_record([
            result.row.account.as_str(),
            result.row.cost_center.as_str(),
            result.classification.as_str(),
        ])?;
        self.writer.flush()?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| ClassifierError::IoError(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TransactionRow;
    use tempfile::NamedTempFile;

    fn fields(record: &StringRecord) -> Vec<&str> {
        record.iter().collect()
    }

    #[test]
    fn test_source_skips_header_and_keeps_order() {
        let input = "CONTA;CENTRO\nSALARIOS;RH\nENERGIA ELETRICA;FABRICA;extra\nSOLO\n";
        let records: Vec<StringRecord> = RowSource::from_reader(input.as_bytes(), b';')
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(fields(&records[0]), vec!["SALARIOS", "RH"]);
        assert_eq!(
            fields(&records[1]),
            vec!["ENERGIA ELETRICA", "FABRICA", "extra"]
        );
        assert_eq!(fields(&records[2]), vec!["SOLO"]);
    }

    #[test]
    fn test_source_honours_custom_delimiter() {
        let input = "account,cost_center\nRENT,STORE\n";
        let records: Vec<StringRecord> = RowSource::from_reader(input.as_bytes(), b',')
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(fields(&records[0]), vec!["RENT", "STORE"]);
    }

    #[test]
    fn test_open_missing_file_reports_input_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        match RowSource::open(&missing, b';') {
            Err(ClassifierError::InputNotFound { path }) => assert_eq!(path, missing),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_sink_writes_header_then_rows() {
        let mut sink = RowSink::from_writer(Vec::new(), b';').unwrap();
        sink.append(&ClassifiedRow {
            row: TransactionRow::new("SALARIOS", "RH"),
            classification: "Administrative Expenses".to_string(),
        })
        .unwrap();
        assert_eq!(sink.rows_written(), 1);

        let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(
            output,
            "ACCOUNT;COST_CENTER;AI_CLASSIFICATION\nSALARIOS;RH;Administrative Expenses\n"
        );
    }

    #[test]
    fn test_sink_quotes_values_containing_delimiter() {
        let mut sink = RowSink::from_writer(Vec::new(), b';').unwrap();
        sink.append(&ClassifiedRow {
            row: TransactionRow::new("FRETE; VENDAS", "LOGISTICA"),
            classification: "Delivery & Logistics Expenses".to_string(),
        })
        .unwrap();

        let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert!(output.contains("\"FRETE; VENDAS\";LOGISTICA;Delivery & Logistics Expenses"));
    }

    #[test]
    fn test_data_line_counts_blank_lines_like_line_count() {
        let input = "H;H\nA;B\nC;D\n\nE;F\n";
        let lines: Vec<usize> = RowSource::from_reader(input.as_bytes(), b';')
            .enumerate()
            .map(|(index, record)| data_line(&record.unwrap(), index + 1))
            .collect();

        assert_eq!(lines, vec![1, 2, 4]);

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", input).unwrap();
        assert_eq!(count_data_lines(file.path()), Some(4));
    }

    #[test]
    fn test_count_data_lines() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "CONTA;CENTRO\nA;B\nC;D\n").unwrap();
        assert_eq!(count_data_lines(file.path()), Some(2));

        let empty = NamedTempFile::new().unwrap();
        assert_eq!(count_data_lines(empty.path()), Some(0));

        let dir = tempfile::tempdir().unwrap();
        assert_eq!(count_data_lines(&dir.path().join("missing.csv")), None);
    }
}
