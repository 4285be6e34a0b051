use std::path::PathBuf;

use clap::{ArgEnum, Parser};
use expenses::{
    config::{self, BankFormat, Settings},
    filter::TargetMonth,
    pipeline,
};
use log::{error, info};

#[derive(ArgEnum, Clone, Copy, Debug)]
enum Format {
    Generic,
    Belfius,
}

/// Turn a bank CSV export into a per-month spreadsheet.
#[derive(Parser)]
struct Cli {
    /// Name of the export inside the household's month directory
    #[clap(long, default_value = config::DEFAULT_FILE_NAME)]
    file_name: String,
    /// Household or account identifier
    #[clap(long, default_value = config::DEFAULT_HOUSEHOLD)]
    household: String,
    /// Month of interest, YYYY-MM
    #[clap(long)]
    year_month: Option<String>,
    /// Read this file instead of the derived input path
    #[clap(long)]
    input: Option<PathBuf>,
    #[clap(long, default_value = config::DEFAULT_INPUT_ROOT)]
    input_root: PathBuf,
    #[clap(long, default_value = config::DEFAULT_OUTPUT_ROOT)]
    output_root: PathBuf,
    /// Output file name; `.csv` writes CSV instead of xlsx
    #[clap(long)]
    output_file: Option<String>,
    #[clap(long, arg_enum, default_value = "generic")]
    format: Format,
    /// Override the format's field delimiter
    #[clap(long)]
    delimiter: Option<char>,
    /// Override the format's currency date pattern (chrono strftime syntax)
    #[clap(long)]
    date_pattern: Option<String>,
    /// Keep records of every month even when --year-month is given
    #[clap(long)]
    no_filter: bool,
}

impl Cli {
    fn into_settings(self) -> Result<Settings, Box<dyn std::error::Error>> {
        let mut format = match self.format {
            Format::Generic => BankFormat::generic(),
            Format::Belfius => BankFormat::belfius(),
        };
        if let Some(delimiter) = self.delimiter {
            format.delimiter = u8::try_from(delimiter)
                .ok()
                .filter(u8::is_ascii)
                .ok_or_else(|| format!("delimiter `{}` is not an ASCII character", delimiter))?;
        }
        if let Some(pattern) = self.date_pattern {
            format.date_pattern = pattern;
        }
        Ok(Settings {
            household: self.household,
            target_month: self
                .year_month
                .map(|month| month.parse::<TargetMonth>())
                .transpose()?,
            filter: !self.no_filter,
            input_root: self.input_root,
            file_name: self.file_name,
            input: self.input,
            output_root: self.output_root,
            output_file: self.output_file,
            format,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let settings = Cli::parse().into_settings()?;

    match pipeline::run(&settings) {
        Ok(report) => {
            info!(
                "Wrote output with {} rows (of {} read) to {}.",
                report.written,
                report.read,
                report.path.display()
            );
            Ok(())
        }
        Err(err) => {
            error!("Batch failed: {}", err);
            std::process::exit(1);
        }
    }
}
