use crate::adapters::csv_io::{count_data_lines, data_line, RowSink, RowSource};
use crate::config::Settings;
use crate::domain::model::{ClassifiedRow, TransactionRow};
use crate::domain::ports::Classifier;
use crate::utils::error::{ClassifierError, Result};
use crate::utils::progress::ProgressLine;
use std::io::{Read, Write};
use std::path::PathBuf;

/// Counters for one pass over the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Data records parsed, header excluded, skipped ones included. Blank lines are not records.
    pub rows_read: usize,
    pub rows_written: usize,
    pub rows_skipped: usize,
    /// Rows whose classification column holds an inference error marker.
    pub failed_classifications: usize,
    /// Successful answers that are not one of the permitted category labels.
    pub unrecognized_labels: usize,
    pub output_path: PathBuf,
}

/// Sequential read → classify → write loop.
pub struct ClassificationEngine<C: Classifier> {
    classifier: C,
    progress_enabled: bool,
}

impl<C: Classifier> ClassificationEngine<C> {
    pub fn new(classifier: C) -> Self {
        Self::new_with_progress(classifier, true)
    }

    pub fn new_with_progress(classifier: C, progress_enabled: bool) -> Self {
        Self {
            classifier,
            progress_enabled,
        }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Classifies every row of `settings.input_path` into `settings.output_path`.
    ///
    /// A missing input file fails before the output file is created. Per-row
    /// inference failures never fail the run.
    pub async fn run(&self, settings: &Settings) -> Result<RunSummary> {
        let delimiter = settings.delimiter_byte()?;

        if !settings.input_path.exists() {
            return Err(ClassifierError::InputNotFound {
                path: settings.input_path.clone(),
            });
        }

        self.console(&format!(
            "Reading data from: {}...",
            settings.input_path.display()
        ));
        tracing::info!("📖 Reading data from: {}", settings.input_path.display());

        let total = count_data_lines(&settings.input_path);
        if total.is_none() {
            tracing::warn!("Could not count input lines, progress total unknown");
        }

        let source = RowSource::open(&settings.input_path, delimiter)?;
        let mut sink = RowSink::create(&settings.output_path, delimiter)?;

        let progress = ProgressLine::new(total, self.progress_enabled);
        self.console(&format!("Processing {} records...", progress.total_label()));

        let mut summary = self.classify_stream(source, &mut sink, &progress).await?;
        summary.output_path = settings.output_path.clone();

        tracing::info!(
            "📊 Read {} rows: {} written, {} skipped, {} failed, {} unrecognized",
            summary.rows_read,
            summary.rows_written,
            summary.rows_skipped,
            summary.failed_classifications,
            summary.unrecognized_labels
        );
        // 逐列的失敗只記在 debug，避免打斷進度列；結束時彙總一次
        if summary.failed_classifications > 0 || summary.unrecognized_labels > 0 {
            tracing::warn!(
                "⚠️ {} rows hold an error marker, {} rows hold a label outside the category list",
                summary.failed_classifications,
                summary.unrecognized_labels
            );
        }

        Ok(summary)
    }

    /// Core loop over an already opened source and sink.
    pub async fn classify_stream<R: Read, W: Write>(
        &self,
        source: RowSource<R>,
        sink: &mut RowSink<W>,
        progress: &ProgressLine,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for (index, record) in source.enumerate() {
            let record = record?;
            let line = data_line(&record, index + 1);
            summary.rows_read += 1;

            // 少於兩個欄位的行直接略過，不寫入也不算錯誤
            let Some(row) = TransactionRow::from_fields(record.iter()) else {
                tracing::debug!("Skipping record {} with {} field(s)", line, record.len());
                summary.rows_skipped += 1;
                continue;
            };

            progress.update(line, &row);

            let classification = match self.classifier.classify(&row).await {
                Ok(label) => {
                    if !self.classifier.permits(&label) {
                        tracing::debug!(
                            "Record {}: '{}' is not a permitted category, kept as-is",
                            line,
                            label
                        );
                        summary.unrecognized_labels += 1;
                    }
                    label
                }
                Err(e) => {
                    tracing::debug!("Record {} ({} / {}): {}", line, row.account, row.cost_center, e);
                    summary.failed_classifications += 1;
                    e.to_string()
                }
            };

            sink.append(&ClassifiedRow {
                row,
                classification,
            })?;
        }

        summary.rows_written = sink.rows_written();
        Ok(summary)
    }

    fn console(&self, message: &str) {
        if self.progress_enabled {
            println!("{}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::InferenceError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Answers from a fixed table keyed by account; unknown accounts get a transport error.
    struct TableClassifier {
        answers: HashMap<String, std::result::Result<String, InferenceError>>,
        calls: Mutex<Vec<TransactionRow>>,
    }

    impl TableClassifier {
        fn new(entries: Vec<(&str, std::result::Result<&str, InferenceError>)>) -> Self {
            Self {
                answers: entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl Classifier for TableClassifier {
        async fn classify(
            &self,
            row: &TransactionRow,
        ) -> std::result::Result<String, InferenceError> {
            self.calls.lock().unwrap().push(row.clone());
            self.answers
                .get(&row.account)
                .cloned()
                .unwrap_or_else(|| Err(InferenceError::Transport("no route".to_string())))
        }
    }

    async fn run_in_memory(
        engine: &ClassificationEngine<TableClassifier>,
        input: &str,
    ) -> (RunSummary, String) {
        let source = RowSource::from_reader(input.as_bytes(), b';');
        let mut sink = RowSink::from_writer(Vec::new(), b';').unwrap();
        let progress = ProgressLine::new(None, false);
        let summary = engine
            .classify_stream(source, &mut sink, &progress)
            .await
            .unwrap();
        let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        (summary, output)
    }

    #[tokio::test]
    async fn test_rows_are_written_in_input_order() {
        let engine = ClassificationEngine::new_with_progress(
            TableClassifier::new(vec![
                ("SALARIOS", Ok("Administrative Expenses")),
                ("ENERGIA ELETRICA", Ok("Manufacturing Overhead")),
            ]),
            false,
        );

        let (summary, output) = run_in_memory(
            &engine,
            "CONTA;CENTRO\n SALARIOS ; RH\nENERGIA ELETRICA;FABRICA\n",
        )
        .await;

        assert_eq!(
            output,
            "ACCOUNT;COST_CENTER;AI_CLASSIFICATION\n\
             SALARIOS;RH;Administrative Expenses\n\
             ENERGIA ELETRICA;FABRICA;Manufacturing Overhead\n"
        );
        assert_eq!(summary.rows_read, 2);
        assert_eq!(summary.rows_written, 2);
        assert_eq!(summary.failed_classifications, 0);
    }

    #[tokio::test]
    async fn test_short_rows_are_skipped_without_classification() {
        let engine = ClassificationEngine::new_with_progress(
            TableClassifier::new(vec![("RENT", Ok("Selling Expenses"))]),
            false,
        );

        let (summary, output) =
            run_in_memory(&engine, "CONTA;CENTRO\nORPHAN\nRENT;STORE\nLONELY\n").await;

        assert_eq!(summary.rows_read, 3);
        assert_eq!(summary.rows_skipped, 2);
        assert_eq!(summary.rows_written, 1);
        assert_eq!(output.lines().count(), 2);
        assert_eq!(engine.classifier().calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_inference_errors_become_markers() {
        let engine = ClassificationEngine::new_with_progress(
            TableClassifier::new(vec![("TAXES", Err(InferenceError::Status(500)))]),
            false,
        );

        let (summary, output) =
            run_in_memory(&engine, "CONTA;CENTRO\nTAXES;ADM\nUNKNOWN;ADM\n").await;

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[1], "TAXES;ADM;API ERROR: 500");
        assert!(lines[2].starts_with("UNKNOWN;ADM;CONNECTION ERROR: no route"));
        assert_eq!(summary.failed_classifications, 2);
    }

    #[tokio::test]
    async fn test_unrecognized_labels_pass_through_verbatim() {
        let engine = ClassificationEngine::new_with_progress(
            TableClassifier::new(vec![("GIFTS", Ok("Office Supplies (probably)"))]),
            false,
        );

        let (summary, output) = run_in_memory(&engine, "CONTA;CENTRO\nGIFTS;SALES\n").await;

        assert!(output.ends_with("GIFTS;SALES;Office Supplies (probably)\n"));
        assert_eq!(summary.unrecognized_labels, 1);
        assert_eq!(summary.failed_classifications, 0);
    }

    #[tokio::test]
    async fn test_header_only_input_yields_header_only_output() {
        let engine = ClassificationEngine::new_with_progress(TableClassifier::new(vec![]), false);

        let (summary, output) = run_in_memory(&engine, "CONTA;CENTRO\n").await;

        assert_eq!(output, "ACCOUNT;COST_CENTER;AI_CLASSIFICATION\n");
        assert_eq!(summary, RunSummary::default());
    }

    /// Reports how many data rows are already on disk when it is asked to classify.
    struct OutputRowCounter {
        output_path: PathBuf,
    }

    #[async_trait::async_trait]
    impl Classifier for OutputRowCounter {
        async fn classify(
            &self,
            _row: &TransactionRow,
        ) -> std::result::Result<String, InferenceError> {
            let on_disk = std::fs::read_to_string(&self.output_path)
                .map(|content| content.lines().count().saturating_sub(1))
                .unwrap_or(usize::MAX);
            Ok(format!("rows_on_disk={}", on_disk))
        }
    }

    #[tokio::test]
    async fn test_each_row_is_on_disk_before_the_next_is_classified() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            input_path: temp_dir.path().join("in.csv"),
            output_path: temp_dir.path().join("out.csv"),
            ..Settings::default()
        };
        std::fs::write(&settings.input_path, "H;H\nA;B\nC;D\n\nE;F\n").unwrap();

        let engine = ClassificationEngine::new_with_progress(
            OutputRowCounter {
                output_path: settings.output_path.clone(),
            },
            false,
        );
        let summary = engine.run(&settings).await.unwrap();

        let output = std::fs::read_to_string(&settings.output_path).unwrap();
        assert_eq!(
            output,
            "ACCOUNT;COST_CENTER;AI_CLASSIFICATION\n\
             A;B;rows_on_disk=0\n\
             C;D;rows_on_disk=1\n\
             E;F;rows_on_disk=2\n"
        );
        assert_eq!(summary.rows_written, 3);
    }

    struct NarrowClassifier;

    #[async_trait::async_trait]
    impl Classifier for NarrowClassifier {
        async fn classify(
            &self,
            _row: &TransactionRow,
        ) -> std::result::Result<String, InferenceError> {
            Ok("Marketing Expenses".to_string())
        }

        fn permits(&self, label: &str) -> bool {
            label == "Tax Expenses"
        }
    }

    #[tokio::test]
    async fn test_unrecognized_labels_follow_the_classifier_category_list() {
        let engine = ClassificationEngine::new_with_progress(NarrowClassifier, false);
        let source = RowSource::from_reader("CONTA;CENTRO\nGOOGLE ADS;MARKETING\n".as_bytes(), b';');
        let mut sink = RowSink::from_writer(Vec::new(), b';').unwrap();
        let progress = ProgressLine::new(None, false);

        let summary = engine
            .classify_stream(source, &mut sink, &progress)
            .await
            .unwrap();

        assert_eq!(summary.unrecognized_labels, 1);
        let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert!(output.ends_with("GOOGLE ADS;MARKETING;Marketing Expenses\n"));
    }
}
