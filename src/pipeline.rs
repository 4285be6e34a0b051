use std::path::PathBuf;

use log::{error, info};

use crate::{
    config::Settings,
    error::Error,
    filter, output, reader,
    record::{NormalizedRecord, RawRecord},
    transform,
};

/// Outcome of one read-transform-write batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub read: usize,
    pub written: usize,
    pub path: PathBuf,
}

/// Run one batch. Nothing is written unless every stage before the writer succeeds.
pub fn run(settings: &Settings) -> Result<BatchReport, Error> {
    let input = settings.input_path();
    info!("Reading {}.", input.display());
    let raw = reader::read(&input, &settings.format)?;
    let read = raw.len();

    let (records, path) = process(raw, settings).map_err(|err| {
        error!("Batch failed after reading {} records from {}.", read, input.display());
        err
    })?;
    Ok(BatchReport {
        read,
        written: records.len(),
        path,
    })
}

fn process(
    raw: Vec<RawRecord>,
    settings: &Settings,
) -> Result<(Vec<NormalizedRecord>, PathBuf), Error> {
    let records = transform::transform(raw, &settings.format.date_pattern)?;
    let records = filter::filter(records, settings.month_filter());
    let dir = output::output_dir(&settings.output_root, &settings.household, &records)?;
    let path = output::write(&records, &dir, &settings.output_file_name())?;
    Ok((records, path))
}
