// DDL statement builders

/// `CREATE TABLE name(f1,f2,...)` from raw column definitions
pub fn create_table_sql(table: &str, fields: &[&str]) -> String {
    format!("CREATE TABLE {}({})", table, fields.join(","))
}
