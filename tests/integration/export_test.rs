// Delimited Export Integration Tests

use std::fs;

use anyhow::Result;
use sqlcompat::query::materializer;

#[path = "../common/mod.rs"]
mod common;
use common::{create_customers_orders, open_memory_db, temp_db_path};

#[test]
fn test_export_with_and_without_header() -> Result<()> {
    let handle = open_memory_db()?;
    create_customers_orders(&handle)?;
    let exec = handle.executor()?;
    let (_dir, with_header) = temp_db_path("with_header.csv")?;
    let without_header = with_header.with_file_name("without_header.csv");
    let sql = "SELECT id, customer_id, amount FROM orders ORDER BY id";

    assert_eq!(exec.export_csv(sql, &with_header, true, None)?, 3);
    assert_eq!(exec.export_csv(sql, &without_header, false, None)?, 3);

    let headed = fs::read_to_string(&with_header)?;
    let bare = fs::read_to_string(&without_header)?;
    assert_eq!(headed, "id;customer_id;amount\n10;1;9.5\n11;1;20.0\n12;2;3.25\n");
    assert_eq!(bare, "10;1;9.5\n11;1;20.0\n12;2;3.25\n");
    Ok(())
}

#[test]
fn test_export_lines_split_back_into_rows() -> Result<()> {
    let handle = open_memory_db()?;
    create_customers_orders(&handle)?;
    let exec = handle.executor()?;
    let (_dir, out) = temp_db_path("customers.csv")?;
    let sql = "SELECT id, name FROM customers ORDER BY id";

    exec.export_csv(sql, &out, false, Some("|"))?;
    let expected = exec.execute_query(sql, 0)?;

    let text = fs::read_to_string(&out)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), expected.row_count());
    for (line, row) in lines.iter().zip(expected.rows()) {
        let fields: Vec<&str> = line.split('|').collect();
        let values: Vec<String> = row.iter().map(|v| v.to_cell_text().into_owned()).collect();
        assert_eq!(fields, values);
    }
    Ok(())
}

#[test]
fn test_export_nulls_and_embedded_separators() -> Result<()> {
    let handle = open_memory_db()?;
    handle.executor()?.execute_script(
        "CREATE TABLE notes (id INTEGER, body TEXT, tag TEXT);
         INSERT INTO notes VALUES (1, 'plain', NULL), (2, 'a;b', 'x');",
    )?;
    let (_dir, out) = temp_db_path("notes.csv")?;

    handle
        .executor()?
        .export_csv("SELECT * FROM notes ORDER BY id", &out, true, None)?;

    // Separators inside values are not quoted
    assert_eq!(fs::read_to_string(&out)?, "id;body;tag\n1;plain;\n2;a;b;x\n");
    Ok(())
}

#[test]
fn test_export_blob_as_hex() -> Result<()> {
    let handle = open_memory_db()?;
    let mut buf = Vec::new();
    handle.executor()?.with_cursor("SELECT x'CAFE' AS raw", &[], |cursor| {
        materializer::to_csv(cursor, &mut buf, false, None)
    })?;
    assert_eq!(String::from_utf8(buf)?, "cafe\n");
    Ok(())
}

#[test]
fn test_export_to_unwritable_destination_fails() -> Result<()> {
    let handle = open_memory_db()?;
    let (_dir, path) = temp_db_path("missing")?;
    let out = path.join("out.csv");
    let err = handle.executor()?.export_csv("SELECT 1", &out, false, None);
    assert!(matches!(err, Err(sqlcompat::DbError::Io(_))));
    Ok(())
}

#[test]
fn test_export_of_bad_query_fails() -> Result<()> {
    let handle = open_memory_db()?;
    let (_dir, out) = temp_db_path("bad.csv")?;
    let err = handle.executor()?.export_csv("SELECT * FROM ghost", &out, true, None);
    assert!(matches!(err, Err(sqlcompat::DbError::Sql { .. })));
    Ok(())
}
