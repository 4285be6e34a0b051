use std::{
    borrow::Cow,
    fs::File,
    io::{BufRead, BufReader, Cursor, Read},
    path::Path,
};

use csv::ByteRecord;
use log::{error, info};

use crate::{
    config::BankFormat,
    error::Error,
    record::{Field, RawRecord},
};

/// Read a bank export from `path`.
pub fn read(path: impl AsRef<Path>, format: &BankFormat) -> Result<Vec<RawRecord>, Error> {
    let file = File::open(path.as_ref())?;
    read_from(BufReader::new(file), format)
}

/// Read a bank export: skip the preamble up to the sentinel line, lower-case
/// the header and project every data line onto the canonical fields.
pub fn read_from<R: BufRead>(mut input: R, format: &BankFormat) -> Result<Vec<RawRecord>, Error> {
    skip_preamble(&mut input, format.delimiter)?;

    let mut header = Vec::new();
    input.read_until(b'\n', &mut header)?;
    let header = decode(&header).to_lowercase();

    let rdr = csv::ReaderBuilder::new()
        .delimiter(format.delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(Cursor::new(header.into_bytes()).chain(input));

    let records = parse(rdr, format)?;
    info!("Number of records read: {}.", records.len());
    Ok(records)
}

fn skip_preamble<R: BufRead>(input: &mut R, delimiter: u8) -> Result<(), Error> {
    let mut line = Vec::new();
    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            return Err(Error::MalformedInput {
                sentinel: char::from(delimiter).to_string(),
            });
        }
        if strip_terminator(&line) == [delimiter] {
            return Ok(());
        }
    }
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Exports come either as UTF-8 or Latin-1; anything that isn't valid UTF-8
/// is taken to be Latin-1, where every byte maps to the same code point.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

/// Header positions of the canonical fields, in `Field::ALL` order.
fn locate_columns(headers: &ByteRecord, format: &BankFormat) -> Result<[usize; 4], Error> {
    let mut positions = [0; 4];
    for (slot, field) in positions.iter_mut().zip(Field::ALL) {
        let wanted = format.columns.name(field).to_lowercase();
        *slot = headers
            .iter()
            .position(|h| decode(h) == wanted.as_str())
            .ok_or(Error::MissingColumn(wanted))?;
    }
    Ok(positions)
}

fn parse<R: Read>(mut rdr: csv::Reader<R>, format: &BankFormat) -> Result<Vec<RawRecord>, Error> {
    let positions = locate_columns(rdr.byte_headers()?, format)?;

    let mut records = Vec::new();
    for (index, row) in rdr.byte_records().enumerate() {
        match row
            .map_err(Error::from)
            .and_then(|row| project(&row, index + 1, positions, format))
        {
            Ok(record) => records.push(record),
            Err(err) => {
                error!("Failed after reading {} records.", records.len());
                return Err(err);
            }
        }
    }
    Ok(records)
}

/// Pick the canonical fields out of data line `line` (1-based).
fn project(
    row: &ByteRecord,
    line: usize,
    positions: [usize; 4],
    format: &BankFormat,
) -> Result<RawRecord, Error> {
    let [amount, expense_date, counterparty, currency_date] = positions;
    let value = |position: usize, field: Field| match row.get(position) {
        Some(value) if !value.is_empty() => Ok(decode(value).into_owned()),
        _ => Err(Error::MalformedRecord {
            line,
            column: format.columns.name(field).to_string(),
        }),
    };
    Ok(RawRecord {
        amount: value(amount, Field::Amount)?,
        expense_date: value(expense_date, Field::ExpenseDate)?,
        counterparty: value(counterparty, Field::Counterparty)?,
        currency_date: value(currency_date, Field::CurrencyDate)?,
    })
}
