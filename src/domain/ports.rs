use crate::domain::model::{Category, TransactionRow};
use crate::utils::error::InferenceError;
use async_trait::async_trait;

/// Assigns one category label to a transaction.
///
/// Failures are returned as values rather than aborting the caller: the engine
/// writes the error marker into the output row and moves on.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, row: &TransactionRow) -> Result<String, InferenceError>;

    /// Whether `label` is one of the categories this classifier offers the model.
    fn permits(&self, label: &str) -> bool {
        Category::from_label(label).is_some()
    }
}
