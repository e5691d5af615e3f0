use std::path::Path;

use crate::ordering::*;

/// The names of the columns, as they appear in the header.
pub const STATE_COLUMN: &str = "State";
pub const DEM_COLUMN: &str = "Dem";
pub const REP_COLUMN: &str = "Rep";
pub const EC_COLUMN: &str = "EC";

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
        .to_string()
}

/// The position of each required column in a table, found from its header.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ColumnIndexes {
    state: usize,
    dem: usize,
    rep: usize,
    ec: usize,
}

impl ColumnIndexes {
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> OrderingResult<ColumnIndexes> {
        let find = |column: &str| -> OrderingResult<usize> {
            header
                .iter()
                .position(|h| h.as_ref() == column)
                .context(MissingColumnSnafu { column })
        };
        let res = ColumnIndexes {
            state: find(STATE_COLUMN)?,
            dem: find(DEM_COLUMN)?,
            rep: find(REP_COLUMN)?,
            ec: find(EC_COLUMN)?,
        };
        debug!("ColumnIndexes::from_header: {:?}", res);
        Ok(res)
    }

    /// Extracts the fields of a row. lineno is only used for reporting.
    pub fn read_record<S: AsRef<str>>(
        &self,
        fields: &[S],
        lineno: usize,
    ) -> OrderingResult<RegionRecord> {
        Ok(RegionRecord::new(
            field(fields, self.state, lineno)?,
            field(fields, self.dem, lineno)?,
            field(fields, self.rep, lineno)?,
            field(fields, self.ec, lineno)?,
        ))
    }
}

fn field<S: AsRef<str>>(fields: &[S], idx: usize, lineno: usize) -> OrderingResult<&str> {
    fields
        .get(idx)
        .map(|s| s.as_ref())
        .context(CsvLineTooShortSnafu { lineno })
}
