pub mod engine;
pub mod prompt;

pub use crate::domain::model::{ClassifiedRow, TransactionRow};
pub use crate::domain::ports::Classifier;
pub use crate::utils::error::Result;
