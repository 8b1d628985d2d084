// Primitives for reading Excel files.

use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::report::{
    io_common::{
        assemble_record, check_column_count, parse_count, parse_flag, simplify_file_name,
        text_field,
    },
    *,
};

pub fn read_excel_file(path: &str, worksheet_name: Option<&str>) -> ReportResult<Vec<RawRecord>> {
    let wrange = get_range(path, worksheet_name)?;
    let file_name = simplify_file_name(path);

    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyExcelSnafu {})?;
    debug!("read_excel_file: {}: header: {:?}", file_name, header);
    // Only the position of the columns matters, not their names.
    check_column_count(1, header.len())?;

    let mut res: Vec<RawRecord> = Vec::new();
    for (idx, row) in iter.enumerate() {
        // The header is on the first line.
        let lineno = (idx + 2) as u64;
        debug!("read_excel_file: {}: lineno: {:?} row: {:?}", file_name, lineno, row);
        if row.iter().all(|c| *c == DataType::Empty) {
            debug!("read_excel_file: lineno: {:?}: skipping empty row", lineno);
            continue;
        }
        let company = read_text_cell(&row[0], lineno);
        let benefits_raw = read_text_cell(&row[1], lineno);
        let additional_comment = read_text_cell(&row[2], lineno);
        let got_nothing = read_flag_cell(&row[3], lineno);
        let benefit_count = read_count_cell(&row[4], lineno);
        res.push(assemble_record(
            company,
            benefits_raw,
            additional_comment,
            got_nothing,
            benefit_count,
        ));
    }
    info!("read_excel_file: {}: read {} rows", file_name, res.len());
    Ok(res)
}

fn format_number(f: f64) -> String {
    if f.fract() == 0.0 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

// Dates and formula errors carry nothing the report can use. They are logged and
// read as empty cells instead of failing the whole file.
fn read_text_cell(cell: &DataType, lineno: u64) -> Option<String> {
    match cell {
        DataType::String(s) => text_field(s),
        DataType::Int(i) => Some(i.to_string()),
        DataType::Float(f) => Some(format_number(*f)),
        DataType::Bool(b) => Some(b.to_string()),
        DataType::Empty => None,
        DataType::DateTime(_) | DataType::Error(_) => {
            warn!(
                "read_text_cell: lineno: {:?}: ignoring cell {:?}",
                lineno, cell
            );
            None
        }
    }
}

fn read_flag_cell(cell: &DataType, lineno: u64) -> bool {
    match cell {
        DataType::Bool(b) => *b,
        DataType::Int(i) => *i != 0,
        DataType::Float(f) => *f != 0.0,
        DataType::String(s) => parse_flag(s),
        DataType::Empty => false,
        DataType::DateTime(_) | DataType::Error(_) => {
            warn!(
                "read_flag_cell: lineno: {:?}: ignoring cell {:?}",
                lineno, cell
            );
            false
        }
    }
}

// The count of the file is never used for the report, a bad value only gets logged.
fn read_count_cell(cell: &DataType, lineno: u64) -> Option<u32> {
    let count = match cell {
        DataType::Int(i) if *i >= 0 => Some(*i as u32),
        DataType::Float(f) if *f >= 0.0 => Some(*f as u32),
        DataType::String(s) => parse_count(s),
        _ => None,
    };
    if count.is_none() && *cell != DataType::Empty {
        warn!(
            "read_count_cell: lineno: {:?}: ignoring benefit count {:?}",
            lineno, cell
        );
    }
    count
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> ReportResult<calamine::Range<DataType>> {
    debug!(
        "read_excel_file: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(name) = worksheet_name {
        let wrange = workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let sheet_names = workbook.sheet_names().to_vec();
        if sheet_names.len() > 1 {
            warn!(
                "read_excel_file: {:?} has several worksheets {:?}, using the first one",
                path, sheet_names
            );
        }
        let wrange = workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu {})?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn text_cells() {
        assert_eq!(
            read_text_cell(&DataType::String("Acme".to_string()), 2),
            Some("Acme".to_string())
        );
        assert_eq!(read_text_cell(&DataType::String("  ".to_string()), 2), None);
        assert_eq!(read_text_cell(&DataType::Float(3.0), 2), Some("3".to_string()));
        assert_eq!(read_text_cell(&DataType::Float(2.5), 2), Some("2.5".to_string()));
        assert_eq!(read_text_cell(&DataType::Int(42), 2), Some("42".to_string()));
        assert_eq!(read_text_cell(&DataType::Empty, 2), None);
    }

    #[test]
    fn date_and_error_cells_are_skipped() {
        assert_eq!(read_text_cell(&DataType::DateTime(45210.0), 7), None);
        assert_eq!(
            read_text_cell(&DataType::Error(CellErrorType::NA), 7),
            None
        );
        assert!(!read_flag_cell(&DataType::DateTime(45210.0), 7));
        assert!(!read_flag_cell(&DataType::Error(CellErrorType::Value), 7));
    }

    #[test]
    fn flag_cells() {
        assert!(read_flag_cell(&DataType::Bool(true), 2));
        assert!(read_flag_cell(&DataType::Int(1), 2));
        assert!(!read_flag_cell(&DataType::Float(0.0), 2));
        assert!(read_flag_cell(&DataType::String("TRUE".to_string()), 2));
        assert!(!read_flag_cell(&DataType::Empty, 2));
    }

    #[test]
    fn count_cells() {
        assert_eq!(read_count_cell(&DataType::Float(3.0), 2), Some(3));
        assert_eq!(read_count_cell(&DataType::Int(0), 2), Some(0));
        assert_eq!(read_count_cell(&DataType::Int(-1), 2), None);
        assert_eq!(read_count_cell(&DataType::String("2".to_string()), 2), Some(2));
        assert_eq!(read_count_cell(&DataType::DateTime(45210.0), 2), None);
        assert_eq!(read_count_cell(&DataType::Empty, 2), None);
    }
}
