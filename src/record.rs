use serde::Serialize;

/// The four canonical fields every bank export is projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Amount,
    ExpenseDate,
    Counterparty,
    CurrencyDate,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Amount,
        Field::ExpenseDate,
        Field::Counterparty,
        Field::CurrencyDate,
    ];

    pub fn canonical_name(self) -> &'static str {
        match self {
            Field::Amount => "amount",
            Field::ExpenseDate => "expense_date",
            Field::Counterparty => "counterparty",
            Field::CurrencyDate => "currency_date",
        }
    }
}

/// A transaction as read from the export, before any normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub amount: String,
    pub expense_date: String,
    pub counterparty: String,
    pub currency_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Credit,
    Debit,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Credit => "credit",
            Operation::Debit => "debit",
        }
    }
}

/// Field order here is the column order of the written output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    pub expense_date: String,
    pub counterparty: String,
    pub amount: String,
    pub operation: Operation,
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl NormalizedRecord {
    pub const COLUMNS: [&'static str; 7] = [
        "expense_date",
        "counterparty",
        "amount",
        "operation",
        "year",
        "month",
        "day",
    ];
}
