// Primitives for reading CSV files.

use crate::report::{
    io_common::{
        assemble_record, check_column_count, parse_count, parse_flag, simplify_file_name,
        text_field,
    },
    *,
};

pub fn read_csv_file(path: &str) -> ReportResult<Vec<RawRecord>> {
    let file_name = simplify_file_name(path);
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let mut res: Vec<RawRecord> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        // The index starts at 1 to respect most conventions in the excel world
        let lineno = (idx + 1) as u64;
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("read_csv_file: {}: lineno: {:?} line: {:?}", file_name, lineno, line);
        if lineno == 1 {
            // The header: only the position of the columns matters.
            check_column_count(lineno, line.len())?;
            continue;
        }
        if line.iter().all(|s| s.trim().is_empty()) {
            debug!("read_csv_file: lineno: {:?}: skipping empty line", lineno);
            continue;
        }
        check_column_count(lineno, line.len())?;

        let count_s = &line[4];
        let benefit_count = parse_count(count_s);
        if benefit_count.is_none() && !count_s.trim().is_empty() {
            warn!(
                "read_csv_file: lineno: {:?}: ignoring benefit count {:?}",
                lineno, count_s
            );
        }
        res.push(assemble_record(
            text_field(&line[0]),
            text_field(&line[1]),
            text_field(&line[2]),
            parse_flag(&line[3]),
            benefit_count,
        ));
    }
    info!("read_csv_file: {}: read {} rows", file_name, res.len());
    Ok(res)
}
