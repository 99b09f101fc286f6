use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::core::error::{PathfinderError, Result};
use crate::core::types::RawRow;

/// Read every data row of a CSV file.
///
/// The first record is the header. Each later record becomes a [`RawRow`]
/// keyed by the header names, in header order. Short records simply lack
/// the trailing keys; values past the end of the header are keyed
/// `column <n>` (1-indexed) so validation can reject them.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        PathfinderError::Io(std::io::Error::new(
            e.kind(),
            format!("Could not open '{}': {}", path.display(), e),
        ))
    })?;

    let rows = read_csv_from(file)?;
    debug!("Read {} row(s) from {}", rows.len(), path.display());
    Ok(rows)
}

/// Same as [`read_csv`] but for any reader.
pub fn read_csv_from<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record?;
        let mut row = RawRow::new();

        for (i, value) in record.iter().enumerate() {
            match headers.get(i) {
                Some(key) => row.push(key, value),
                None => row.push(format!("column {}", i + 1), value),
            }
        }

        rows.push(row);
    }

    Ok(rows)
}
