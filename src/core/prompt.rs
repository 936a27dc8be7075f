use crate::domain::model::TransactionRow;
use crate::domain::rules::RuleBook;
use std::fmt::Write;

/// Composes the classification prompt for one row.
///
/// Pure function of its inputs: the same rule book and row always produce the same text.
pub fn build_prompt(rules: &RuleBook, row: &TransactionRow) -> String {
    let mut prompt = String::new();

    // write! 到 String 不會失敗，忽略回傳值
    let _ = writeln!(prompt, "{}", rules.role_instruction);
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "{}", rules.golden_rule);
    let _ = writeln!(prompt);

    let _ = writeln!(prompt, "--- REFERENCE RULES ---");
    let _ = writeln!(prompt, "{}", rules.business_rules);
    let _ = writeln!(prompt);

    let _ = writeln!(prompt, "--- PERMITTED CATEGORIES (USE ONLY THESE) ---");
    for category in &rules.categories {
        let _ = writeln!(prompt, "- {}", category.label());
    }
    let _ = writeln!(prompt);

    let _ = writeln!(prompt, "--- REASONING EXAMPLES ---");
    for example in &rules.examples {
        let _ = writeln!(
            prompt,
            "Input: Account=\"{}\", CostCenter=\"{}\" -> Output: {}",
            example.row.account,
            example.row.cost_center,
            example.answer.label()
        );
    }
    let _ = writeln!(prompt);

    let _ = writeln!(prompt, "--- NEW TRANSACTION TO CLASSIFY ---");
    let _ = writeln!(prompt, "Ledger Account: {}", row.account);
    let _ = writeln!(prompt, "Cost Center: {}", row.cost_center);
    let _ = writeln!(prompt);

    let _ = write!(prompt, "{}", rules.answer_instruction);
    prompt
}
