// SQL text helpers

/// Default pattern for [`timestamp_query`], e.g. `2015-06-11 03:14:51`
pub const DEFAULT_TIMESTAMP_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// Make text safe to splice into a quoted SQL literal.
///
/// Single and double quotes are doubled; backslashes are dropped.
pub fn escape_sql(text: &str) -> String {
    text.replace('\'', "''").replace('"', "\"\"").replace('\\', "")
}

/// Expression formatting an epoch-milliseconds column as a date string
pub fn timestamp_query(column: &str, pattern: Option<&str>) -> String {
    let pattern = pattern.unwrap_or(DEFAULT_TIMESTAMP_PATTERN);
    format!("strftime('{}', {} / 1000, 'unixepoch')", pattern, column)
}
