use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use stratum_types::cartesian::Point3d;

use crate::error::{Result, StratumError};
use crate::feature::Feature;
use crate::options::CsvOptions;

/// Reads point features from a delimited text file.
pub fn read_csv(path: impl AsRef<Path>, options: &CsvOptions) -> Result<Vec<Feature>> {
    let path = path.as_ref();
    debug!("Reading point features from {}", path.display());
    read_csv_from_reader(File::open(path)?, options)
}

/// Reads point features from delimited text.
///
/// Every record produces one point feature. If the elevation column is absent, the points are placed at `Z=0`.
/// Ids may be written as integers or as floats with no fractional part (`3.0`), as spreadsheet exports do.
pub fn read_csv_from_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<Vec<Feature>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = Columns {
        x: required_column(&headers, &options.x_column)?,
        y: required_column(&headers, &options.y_column)?,
        z: column(&headers, &options.z_column),
        formation: required_column(&headers, &options.formation_column)?,
        id: column(&headers, &options.id_column),
    };

    let mut features = vec![];
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        // Header is the first line of the file.
        let line = index + 2;

        let x = parse_number(&record, columns.x, &options.x_column, line)?;
        let y = parse_number(&record, columns.y, &options.y_column, line)?;
        let z = match columns.z {
            Some(z) => parse_number(&record, z, &options.z_column, line)?,
            None => 0.0,
        };
        let formation = record.get(columns.formation).unwrap_or_default();
        let id = match columns.id {
            Some(id) => parse_id(record.get(id).unwrap_or_default(), line)?,
            None => None,
        };

        features.push(Feature::point(Point3d::new(x, y, z), formation, id));
    }

    debug!("Read {} point features", features.len());
    Ok(features)
}

struct Columns {
    x: usize,
    y: usize,
    z: Option<usize>,
    formation: usize,
    id: Option<usize>,
}

fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|header| header == name)
}

fn required_column(headers: &StringRecord, name: &str) -> Result<usize> {
    column(headers, name)
        .ok_or_else(|| StratumError::invalid_input(format!("column '{name}' is missing")))
}

fn parse_number(record: &StringRecord, index: usize, name: &str, line: usize) -> Result<f64> {
    let value = record.get(index).unwrap_or_default();
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            StratumError::invalid_input(format!(
                "line {line}: value '{value}' of column '{name}' is not a number"
            ))
        })
}

fn parse_id(value: &str, line: usize) -> Result<Option<u64>> {
    if value.is_empty() {
        return Ok(None);
    }

    if let Ok(id) = value.parse::<u64>() {
        return Ok(Some(id));
    }

    match value.parse::<f64>() {
        Ok(id) if id >= 0.0 && id.fract() == 0.0 && id <= u64::MAX as f64 => Ok(Some(id as u64)),
        _ => Err(StratumError::invalid_input(format!(
            "line {line}: '{value}' is not a valid id"
        ))),
    }
}
