use std::path::PathBuf;

use crate::{filter::TargetMonth, record::Field};

pub const DEFAULT_HOUSEHOLD: &str = "family";
pub const DEFAULT_FILE_NAME: &str = "input.csv";
pub const DEFAULT_INPUT_ROOT: &str = "drive";
pub const DEFAULT_OUTPUT_ROOT: &str = "output";
pub const DEFAULT_DELIMITER: u8 = b';';

/// Day/month/4-digit-year, e.g. `05/03/2024`.
pub const DD_MM_YYYY: &str = "%d/%m/%Y";
/// Day/month/2-digit-year, e.g. `05/03/24`.
pub const DD_MM_YY: &str = "%d/%m/%y";

/// Header names a bank export uses for the canonical fields.
/// Matched case-insensitively against the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub amount: String,
    pub expense_date: String,
    pub counterparty: String,
    pub currency_date: String,
}

impl ColumnNames {
    pub fn name(&self, field: Field) -> &str {
        match field {
            Field::Amount => &self.amount,
            Field::ExpenseDate => &self.expense_date,
            Field::Counterparty => &self.counterparty,
            Field::CurrencyDate => &self.currency_date,
        }
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            amount: Field::Amount.canonical_name().to_string(),
            expense_date: Field::ExpenseDate.canonical_name().to_string(),
            counterparty: Field::Counterparty.canonical_name().to_string(),
            currency_date: Field::CurrencyDate.canonical_name().to_string(),
        }
    }
}

/// Everything that differs between the export formats of different banks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankFormat {
    pub delimiter: u8,
    pub columns: ColumnNames,
    /// chrono `strftime` pattern for the currency date.
    pub date_pattern: String,
}

impl BankFormat {
    /// Export already using the canonical column names.
    pub fn generic() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            columns: ColumnNames::default(),
            date_pattern: DD_MM_YYYY.to_string(),
        }
    }

    /// Belfius account export (Dutch headers).
    pub fn belfius() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            columns: ColumnNames {
                amount: "bedrag".to_string(),
                expense_date: "boekingsdatum".to_string(),
                counterparty: "naam tegenpartij bevat".to_string(),
                currency_date: "valutadatum".to_string(),
            },
            date_pattern: DD_MM_YYYY.to_string(),
        }
    }
}

impl Default for BankFormat {
    fn default() -> Self {
        Self::generic()
    }
}

/// Configuration of a single batch run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub household: String,
    pub target_month: Option<TargetMonth>,
    /// Restrict the dataset to `target_month`. Ignored when no month is set.
    pub filter: bool,
    pub input_root: PathBuf,
    pub file_name: String,
    /// Overrides the path derived from `input_root`, `household` and `target_month`.
    pub input: Option<PathBuf>,
    pub output_root: PathBuf,
    pub output_file: Option<String>,
    pub format: BankFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            household: DEFAULT_HOUSEHOLD.to_string(),
            target_month: None,
            filter: true,
            input_root: PathBuf::from(DEFAULT_INPUT_ROOT),
            file_name: DEFAULT_FILE_NAME.to_string(),
            input: None,
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            output_file: None,
            format: BankFormat::default(),
        }
    }
}

impl Settings {
    pub fn input_path(&self) -> PathBuf {
        if let Some(input) = &self.input {
            return input.clone();
        }
        let mut path = self.input_root.join(&self.household);
        if let Some(month) = &self.target_month {
            path.push(month.to_string());
        }
        path.join(&self.file_name)
    }

    pub fn output_file_name(&self) -> String {
        match (&self.output_file, &self.target_month) {
            (Some(name), _) => name.clone(),
            (None, Some(month)) => format!("{}_output.xlsx", month),
            (None, None) => "output.xlsx".to_string(),
        }
    }

    /// The month to filter on, if filtering is enabled.
    pub fn month_filter(&self) -> Option<&TargetMonth> {
        self.target_month.as_ref().filter(|_| self.filter)
    }
}
