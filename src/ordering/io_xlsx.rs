// Primitives for reading Excel files.

use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::ordering::{io_common::ColumnIndexes, *};

pub fn read_excel_regions(
    path: &str,
    worksheet_name: Option<&str>,
) -> OrderingResult<Vec<RegionRecord>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet_name {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?,
    }
    .context(OpeningExcelSnafu { path })?;

    let mut rows = wrange.rows();
    let header_row = rows.next().context(EmptyExcelSnafu { path })?;
    let header: Vec<String> = read_row(header_row, 1)?;
    debug!("read_excel_regions: header: {:?}", header);
    let columns = ColumnIndexes::from_header(&header)?;

    let mut res: Vec<RegionRecord> = Vec::new();
    for (idx, row) in rows.enumerate() {
        let lineno = idx + 2;
        if row.iter().all(|c| *c == DataType::Empty) {
            debug!("read_excel_regions: skipping empty row {:?}", lineno);
            continue;
        }
        let fields = read_row(row, lineno)?;
        debug!("read_excel_regions: lineno: {:?} row: {:?}", lineno, fields);
        res.push(columns.read_record(&fields, lineno)?);
    }
    Ok(res)
}

fn read_row(row: &[DataType], lineno: usize) -> OrderingResult<Vec<String>> {
    row.iter().map(|cell| read_cell(cell, lineno)).collect()
}

// Numbers are handed over as text, like in a CSV file. Whole floats lose their decimal part.
fn read_cell(cell: &DataType, lineno: usize) -> OrderingResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) if f.fract() == 0.0 => Ok(format!("{:.0}", f)),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Empty => Ok("".to_string()),
        _ => ExcelWrongCellTypeSnafu {
            cell: format!("{:?}", cell),
            lineno,
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(read_cell(&DataType::Int(538), 1).unwrap(), "538");
        assert_eq!(read_cell(&DataType::Float(2926441.0), 1).unwrap(), "2926441");
        assert_eq!(read_cell(&DataType::Float(1.5), 1).unwrap(), "1.5");
        assert_eq!(
            read_cell(&DataType::String("Iowa".to_string()), 1).unwrap(),
            "Iowa"
        );
        assert_eq!(read_cell(&DataType::Empty, 1).unwrap(), "");
        assert!(matches!(
            read_cell(&DataType::Bool(true), 4),
            Err(OrderingError::ExcelWrongCellType { lineno: 4, .. })
        ));
    }

    fn test_file(name: &str) -> String {
        format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    #[test]
    fn read_first_worksheet() {
        // Columns are out of order and the third row is empty.
        let res = read_excel_regions(&test_file("two_regions.xlsx"), None).unwrap();
        assert_eq!(
            res,
            vec![
                RegionRecord::new("A", "60", "40", "10"),
                RegionRecord::new("B", "51", "49", "20"),
            ]
        );
    }

    #[test]
    fn read_worksheet_by_name() {
        let res = read_excel_regions(&test_file("two_regions.xlsx"), Some("Tie")).unwrap();
        assert_eq!(res, vec![RegionRecord::new("C", "50", "50", "3")]);
    }

    #[test]
    fn missing_worksheet() {
        match read_excel_regions(&test_file("two_regions.xlsx"), Some("2020")) {
            Err(OrderingError::MissingWorksheet { name, .. }) => assert_eq!(name, "2020"),
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn missing_workbook() {
        assert!(matches!(
            read_excel_regions("/nonexistent/results.xlsx", None),
            Err(OrderingError::OpeningExcel { .. })
        ));
    }
}
