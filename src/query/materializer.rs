// Result Materialization
//
// Two ways to drain a cursor: into an in-memory QueryResult, or straight into a
// delimited text stream without holding rows in memory.

use std::io::Write;

use crate::common::error::DbResult;
use crate::query::executor::Cursor;
use crate::query::result::QueryResult;

/// Separator used when the caller does not give one
pub const DEFAULT_SEPARATOR: &str = ";";

/// Drain `cursor` into a snapshot.
///
/// `limit < 1` reads every row; otherwise reading stops once `limit` rows have
/// been collected. Truncation is not an error.
pub fn to_query_result(cursor: &mut Cursor<'_>, limit: i64) -> DbResult<QueryResult> {
    let mut result = QueryResult::new(
        cursor.column_names().to_vec(),
        cursor.column_types().to_vec(),
    );

    let mut count: i64 = 0;
    while let Some(row) = cursor.next_row()? {
        result.push_row(row);
        count += 1;
        if limit > 0 && count > limit - 1 {
            break;
        }
    }
    Ok(result)
}

/// Stream `cursor` as delimited text and return the number of data rows written.
///
/// One line per record, fields joined by `separator` (default `;`), NULL as an
/// empty field. Embedded separators are written as-is: consumers of this format
/// split on the raw separator and do not expect quoting.
pub fn to_csv<W: Write>(
    cursor: &mut Cursor<'_>,
    mut out: W,
    header: bool,
    separator: Option<&str>,
) -> DbResult<u64> {
    let separator = separator.unwrap_or(DEFAULT_SEPARATOR);

    if header {
        writeln!(out, "{}", cursor.column_names().join(separator))?;
    }

    let mut written = 0;
    while let Some(row) = cursor.next_row()? {
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                out.write_all(separator.as_bytes())?;
            }
            out.write_all(value.to_cell_text().as_bytes())?;
        }
        out.write_all(b"\n")?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}
