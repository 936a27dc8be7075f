use serde::{Deserialize, Serialize};
use std::fmt;

/// One ledger line to classify: chart-of-accounts entry plus cost center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub account: String,
    pub cost_center: String,
}

impl TransactionRow {
    pub fn new(account: impl Into<String>, cost_center: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            cost_center: cost_center.into(),
        }
    }

    /// Builds a row from the first two fields of a raw record, trimmed.
    /// Returns `None` when the record has fewer than two fields; extra fields are ignored.
    pub fn from_fields<'a, I>(fields: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fields = fields.into_iter();
        let account = fields.next()?.trim();
        let cost_center = fields.next()?.trim();
        Some(Self::new(account, cost_center))
    }
}

/// A classified row as persisted to the output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRow {
    pub row: TransactionRow,
    /// Verbatim model answer, or an inference error marker.
    pub classification: String,
}

/// The closed list of accounting categories the model is told to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    CostOfGoodsSold,
    ManufacturingOverhead,
    RawMaterialsCost,
    AdministrativeExpenses,
    SellingExpenses,
    MarketingExpenses,
    DeliveryLogisticsExpenses,
    FinancialExpenses,
    TaxExpenses,
    RevenueDeductions,
    CapitalExpenditures,
    ProfitDistributions,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::CostOfGoodsSold,
        Category::ManufacturingOverhead,
        Category::RawMaterialsCost,
        Category::AdministrativeExpenses,
        Category::SellingExpenses,
        Category::MarketingExpenses,
        Category::DeliveryLogisticsExpenses,
        Category::FinancialExpenses,
        Category::TaxExpenses,
        Category::RevenueDeductions,
        Category::CapitalExpenditures,
        Category::ProfitDistributions,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::CostOfGoodsSold => "Cost of Goods Sold",
            Category::ManufacturingOverhead => "Manufacturing Overhead",
            Category::RawMaterialsCost => "Raw Materials Cost",
            Category::AdministrativeExpenses => "Administrative Expenses",
            Category::SellingExpenses => "Selling Expenses",
            Category::MarketingExpenses => "Marketing Expenses",
            Category::DeliveryLogisticsExpenses => "Delivery & Logistics Expenses",
            Category::FinancialExpenses => "Financial Expenses (Interest/Penalties)",
            Category::TaxExpenses => "Tax Expenses",
            Category::RevenueDeductions => "Revenue Deductions",
            Category::CapitalExpenditures => "Capital Expenditures (CAPEX)",
            Category::ProfitDistributions => "Profit Distributions (Partners)",
        }
    }

    /// Exact (whitespace-trimmed) label match. Anything else is not a member of the list.
    pub fn from_label(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL.iter().copied().find(|c| c.label() == text)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
