use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed input: no line consisting solely of `{sentinel}` ends the preamble")]
    MalformedInput { sentinel: String },
    #[error("column `{0}` not found in header")]
    MissingColumn(String),
    #[error("data line {line} has an empty `{column}` field")]
    MalformedRecord { line: usize, column: String },
    #[error("failed to parse date `{value}` with pattern `{pattern}`")]
    DateParse { value: String, pattern: String },
    #[error("invalid target month `{0}`, expected YYYY-MM")]
    InvalidTargetMonth(String),
    #[error("cannot derive an output path from an empty dataset")]
    EmptyDataset,
    #[error("dataset spans more than one period: {periods:?}")]
    NonUniformPeriod { periods: Vec<(i32, u32)> },
    #[error("CSV failure, reason: `{0}`")]
    Csv(#[from] csv::Error),
    #[error("failed to write spreadsheet, reason: `{0}`")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
