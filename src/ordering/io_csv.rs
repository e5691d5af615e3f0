// Primitives for reading CSV files.

use std::io::Read;

use crate::ordering::{io_common::ColumnIndexes, *};

pub fn read_csv_regions(path: &str) -> OrderingResult<Vec<RegionRecord>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        // Short lines are reported with their line number by the column lookup.
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    read_regions(rdr)
}

pub fn read_regions<R: Read>(mut rdr: csv::Reader<R>) -> OrderingResult<Vec<RegionRecord>> {
    let header: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu { lineno: 1_usize })?
        .iter()
        .map(|s| s.to_string())
        .collect();
    debug!("read_regions: header: {:?}", header);
    let columns = ColumnIndexes::from_header(&header)?;

    let mut res: Vec<RegionRecord> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let line = line_r.context(CsvLineParseSnafu { lineno: idx + 2 })?;
        // The position of the record is more accurate than the index, since blank lines are skipped.
        let lineno = line
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);
        let fields: Vec<&str> = line.iter().collect();
        debug!("read_regions: lineno: {:?} row: {:?}", lineno, fields);
        res.push(columns.read_record(&fields, lineno)?);
    }
    Ok(res)
}
