use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use log::info;
use rust_xlsxwriter::Workbook;

use crate::{error::Error, record::NormalizedRecord};

/// `<root>/<household>/<year>-<month>-<latest day>` for a single-period dataset.
pub fn output_dir(
    root: &Path,
    household: &str,
    records: &[NormalizedRecord],
) -> Result<PathBuf, Error> {
    let latest_day = records
        .iter()
        .map(|record| record.day)
        .max()
        .ok_or(Error::EmptyDataset)?;
    let periods: Vec<(i32, u32)> = records
        .iter()
        .map(|record| (record.year, record.month))
        .unique()
        .sorted()
        .collect();
    match periods.as_slice() {
        [(year, month)] => Ok(root
            .join(household)
            .join(format!("{}-{}-{}", year, month, latest_day))),
        _ => Err(Error::NonUniformPeriod { periods }),
    }
}

/// Write `records` to `dir/file_name`, creating `dir` if needed.
/// A `.csv` file name selects CSV output, anything else an xlsx workbook.
pub fn write(records: &[NormalizedRecord], dir: &Path, file_name: &str) -> Result<PathBuf, Error> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    let is_csv = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        write_csv(records, File::create(&path)?)?;
    } else {
        write_workbook(records, &path)?;
    }
    info!("Wrote {} records to {}.", records.len(), path.display());
    Ok(path)
}

pub fn write_csv(records: &[NormalizedRecord], output: impl io::Write) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(output);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// One sheet: a header row, then one row per record in dataset order.
pub fn write_workbook(records: &[NormalizedRecord], path: &Path) -> Result<(), Error> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, name) in NormalizedRecord::COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name)?;
    }
    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write_string(row, 0, &record.expense_date)?;
        worksheet.write_string(row, 1, &record.counterparty)?;
        worksheet.write_string(row, 2, &record.amount)?;
        worksheet.write_string(row, 3, record.operation.as_str())?;
        worksheet.write_number(row, 4, record.year)?;
        worksheet.write_number(row, 5, record.month)?;
        worksheet.write_number(row, 6, record.day)?;
    }
    workbook.save(path)?;
    Ok(())
}
