use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use log::warn;

use super::error::DataError;
use super::model::{Borough, CovidDataset, Record, DATE_FORMAT};

// ---------------------------------------------------------------------------
// Source file schema
// ---------------------------------------------------------------------------

/// Positional column layout of the source file, one header line then one
/// line per borough per day:
///
/// date, borough, retail_recreation_gmr, grocery_pharmacy_gmr, parks_gmr,
/// transit_gmr, workplaces_gmr, residential_gmr, new_cases, total_cases,
/// new_deaths, total_deaths
pub const COLUMNS: usize = 12;

const COL_DATE: usize = 0;
const COL_BOROUGH: usize = 1;
const COL_RETAIL_RECREATION: usize = 2;
const COL_GROCERY_PHARMACY: usize = 3;
const COL_PARKS: usize = 4;
const COL_TRANSIT: usize = 5;
const COL_WORKPLACES: usize = 6;
const COL_RESIDENTIAL: usize = 7;
const COL_NEW_CASES: usize = 8;
const COL_TOTAL_CASES: usize = 9;
const COL_NEW_DEATHS: usize = 10;
const COL_TOTAL_DEATHS: usize = 11;

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load the dataset from a CSV file.
///
/// Fails only when the file cannot be opened or its header cannot be read.
/// Data lines that do not parse — wrong column count, malformed date or
/// number, unknown borough name — are skipped with a warning and counted in
/// [`CovidDataset::skipped_lines`]; they never abort the load. An *empty*
/// numeric cell is not an error: the real mobility export has gaps, and the
/// value defaults to `0`.
pub fn load(path: &Path) -> Result<CovidDataset, DataError> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_reader(file)
}

/// Load the dataset from any reader. Same per-line policy as [`load`].
pub fn from_reader<R: Read>(reader: R) -> Result<CovidDataset, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (idx, result) in csv_reader.records().enumerate() {
        // Line numbers are 1-based and the header occupies line 1.
        let line = idx + 2;
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!("skipping unreadable row: line {line}: {e}");
                skipped += 1;
                continue;
            }
        };
        match parse_row(&row, line) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("skipping row: {e}");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!("{skipped} source line(s) skipped during load");
    }

    Ok(CovidDataset {
        records,
        columns,
        skipped_lines: skipped,
    })
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

fn parse_row(row: &StringRecord, line: usize) -> Result<Record, DataError> {
    if row.len() != COLUMNS {
        return Err(parse_err(
            line,
            format!("expected {COLUMNS} columns, found {}", row.len()),
        ));
    }

    let raw_date = field(row, COL_DATE);
    let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT)
        .map_err(|_| parse_err(line, format!("'{raw_date}' is not a YYYY-MM-DD date")))?;

    let raw_borough = field(row, COL_BOROUGH);
    let borough = raw_borough
        .parse::<Borough>()
        .map_err(|e| parse_err(line, e.to_string()))?;

    Ok(Record {
        date,
        borough,
        retail_recreation_gmr: parse_i32(row, COL_RETAIL_RECREATION, line)?,
        grocery_pharmacy_gmr: parse_i32(row, COL_GROCERY_PHARMACY, line)?,
        parks_gmr: parse_i32(row, COL_PARKS, line)?,
        transit_gmr: parse_i32(row, COL_TRANSIT, line)?,
        workplaces_gmr: parse_i32(row, COL_WORKPLACES, line)?,
        residential_gmr: parse_i32(row, COL_RESIDENTIAL, line)?,
        new_cases: parse_u32(row, COL_NEW_CASES, line)?,
        total_cases: parse_u32(row, COL_TOTAL_CASES, line)?,
        new_deaths: parse_u32(row, COL_NEW_DEATHS, line)?,
        total_deaths: parse_u32(row, COL_TOTAL_DEATHS, line)?,
    })
}

fn field<'a>(row: &'a StringRecord, col: usize) -> &'a str {
    row.get(col).unwrap_or("")
}

/// Empty cells default to 0; anything else must parse as an integer.
fn parse_i32(row: &StringRecord, col: usize, line: usize) -> Result<i32, DataError> {
    let raw = field(row, col);
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<i32>()
        .map_err(|_| parse_err(line, format!("column {col}: '{raw}' is not an integer")))
}

fn parse_u32(row: &StringRecord, col: usize, line: usize) -> Result<u32, DataError> {
    let raw = field(row, col);
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<u32>().map_err(|_| {
        parse_err(
            line,
            format!("column {col}: '{raw}' is not a non-negative integer"),
        )
    })
}

fn parse_err(line: usize, message: String) -> DataError {
    DataError::Parse { line, message }
}
