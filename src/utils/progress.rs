use crate::domain::model::TransactionRow;
use std::io::Write;

/// In-place console progress line (`\r`-terminated so each row overwrites the last).
pub struct ProgressLine {
    total: Option<usize>,
    enabled: bool,
}

impl ProgressLine {
    pub fn new(total: Option<usize>, enabled: bool) -> Self {
        Self { total, enabled }
    }

    pub fn total_label(&self) -> String {
        match self.total {
            Some(total) => total.to_string(),
            None => "?".to_string(),
        }
    }

    pub fn render(&self, index: usize, row: &TransactionRow) -> String {
        format!(
            "[{}/{}] Classifying: {} ({})...",
            index,
            self.total_label(),
            row.account,
            row.cost_center
        )
    }

    pub fn update(&self, index: usize, row: &TransactionRow) {
        if !self.enabled {
            return;
        }
        let mut stdout = std::io::stdout().lock();
        // 進度列只是顯示用，寫入失敗不影響分類
        let _ = write!(stdout, "{}\r", self.render(index, row));
        let _ = stdout.flush();
    }
}
