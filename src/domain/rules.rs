use crate::domain::model::{Category, TransactionRow};

const ROLE_INSTRUCTION: &str =
    "Act as a Senior Financial Controller and classify the expense below.";

const GOLDEN_RULE: &str =
    "GOLDEN RULE: the COST CENTER defines the purpose (Operational vs Administrative vs Commercial).";

const BUSINESS_RULES: &str = "\
1. PERSONNEL EXPENSES (Salaries, Vacation, 13th Salary, Benefits):
   - If Cost Center is ADM/HR/FINANCE/BOARD -> Classify as: Administrative Expenses.
   - If Cost Center is FACTORY/PRODUCTION/OPERATIONS -> Classify as: Cost of Goods Sold.
   - If Cost Center is COMMERCIAL/SALES/STORES -> Classify as: Selling Expenses.

2. INFRASTRUCTURE (Rent, Electricity, Water, Maintenance):
   - If at the FACTORY -> Manufacturing Overhead.
   - If at the OFFICE -> Administrative Expenses.
   - If at a STORE -> Selling Expenses.

3. LOGISTICS & FREIGHT:
   - Fuel, Tolls, Vehicle Maintenance -> Delivery & Logistics Expenses.
   - Freight on Sales -> Delivery & Logistics Expenses.
   - Freight on Purchases (Raw Materials) -> Raw Materials Cost.

4. TAXES:
   - ICMS, PIS, COFINS, ISS -> Revenue Deductions.
   - IPTU, IPVA, miscellaneous fees -> Tax Expenses.

5. MARKETING:
   - Google Ads, Facebook, Giveaways, Events -> Marketing Expenses.";

const ANSWER_INSTRUCTION: &str =
    "Answer ONLY with the exact category from the list above. No additional explanation.";

/// Fixed input/output pair embedded in the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FewShotExample {
    pub row: TransactionRow,
    pub answer: Category,
}

/// Static business knowledge handed to the model with every row.
///
/// Built once at start-up and shared by reference; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct RuleBook {
    pub role_instruction: String,
    pub golden_rule: String,
    pub business_rules: String,
    pub categories: Vec<Category>,
    pub examples: Vec<FewShotExample>,
    pub answer_instruction: String,
}

impl RuleBook {
    /// Generic controllership rules with the full twelve-category list.
    pub fn standard() -> Self {
        Self {
            role_instruction: ROLE_INSTRUCTION.to_string(),
            golden_rule: GOLDEN_RULE.to_string(),
            business_rules: BUSINESS_RULES.to_string(),
            categories: Category::ALL.to_vec(),
            examples: vec![
                FewShotExample {
                    row: TransactionRow::new("SALARIES", "HR"),
                    answer: Category::AdministrativeExpenses,
                },
                FewShotExample {
                    row: TransactionRow::new("SALARIES", "PRODUCTION LINE"),
                    answer: Category::CostOfGoodsSold,
                },
                FewShotExample {
                    row: TransactionRow::new("ELECTRICITY", "FACTORY"),
                    answer: Category::ManufacturingOverhead,
                },
            ],
            answer_instruction: ANSWER_INSTRUCTION.to_string(),
        }
    }

    /// Whether `label` names one of the permitted categories.
    pub fn permits(&self, label: &str) -> bool {
        Category::from_label(label)
            .map(|c| self.categories.contains(&c))
            .unwrap_or(false)
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::standard()
    }
}
