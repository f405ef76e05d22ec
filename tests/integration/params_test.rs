// Parameter Binding Integration Tests

use anyhow::Result;
use sqlcompat::{sql_params, DataValue, DbError, SqlParam};

#[path = "../common/mod.rs"]
mod common;
use common::open_memory_db;

#[test]
fn test_mixed_parameters_round_trip() -> Result<()> {
    let handle = open_memory_db()?;
    let exec = handle.executor()?;
    exec.execute_raw("CREATE TABLE t (flag INTEGER, ratio REAL, qty INTEGER, label TEXT)")?;

    let inserted = exec.execute_prepared(
        "INSERT INTO t VALUES (?, ?, ?, ?)",
        &sql_params![true, 3.14_f64, 42_i32, "abc"],
    )?;
    assert_eq!(inserted, 1);

    let result = exec.execute_query("SELECT flag, ratio, qty, label FROM t", 0)?;
    let row = &result.rows()[0];
    assert_eq!(row[0].as_bool(), Some(true));
    assert_eq!(row[1], DataValue::Real(3.14));
    assert_eq!(row[2], DataValue::Integer(42));
    assert_eq!(row[3], DataValue::Text("abc".to_string()));
    Ok(())
}

#[test]
fn test_every_width_binds_exactly() -> Result<()> {
    let handle = open_memory_db()?;
    let exec = handle.executor()?;

    let values = vec![
        SqlParam::Bytes(vec![0, 255, 16]),
        SqlParam::Float(1.5),
        SqlParam::Long(i64::MAX),
        SqlParam::Short(i16::MIN),
        SqlParam::Boolean(false),
        SqlParam::text_of('z'),
    ];
    let result = exec.query_prepared("SELECT ?, ?, ?, ?, ?, ?", &values, 0)?;
    let row = &result.rows()[0];

    assert_eq!(row[0].as_bytes(), Some(&[0_u8, 255, 16][..]));
    assert_eq!(row[1].as_f64(), Some(1.5));
    assert_eq!(row[2].as_i64(), Some(i64::MAX));
    assert_eq!(row[3].as_i64(), Some(i16::MIN as i64));
    assert_eq!(row[4].as_bool(), Some(false));
    assert_eq!(row[5].as_str(), Some("z"));
    Ok(())
}

#[test]
fn test_parameters_filter_queries() -> Result<()> {
    let handle = open_memory_db()?;
    common::create_customers_orders(&handle)?;
    let exec = handle.executor()?;

    let result = exec.query_prepared(
        "SELECT id FROM orders WHERE customer_id = ? AND amount > ? ORDER BY id",
        &sql_params![1_i64, 10.0_f64],
        0,
    )?;
    assert_eq!(result.into_rows(), vec![vec![DataValue::Integer(11)]]);
    Ok(())
}

#[test]
fn test_parameter_count_mismatch_is_rejected() -> Result<()> {
    let handle = open_memory_db()?;
    let exec = handle.executor()?;
    exec.execute_raw("CREATE TABLE t (a, b)")?;

    let too_few = exec.execute_prepared("INSERT INTO t VALUES (?, ?)", &sql_params![1_i32]);
    assert!(matches!(too_few, Err(DbError::Sql { .. })));

    let too_many = exec.execute_prepared("INSERT INTO t VALUES (?, ?)", &sql_params![1_i32, 2_i32, 3_i32]);
    assert!(matches!(too_many, Err(DbError::Sql { .. })));

    assert_eq!(handle.introspector()?.count("t")?, 0);
    Ok(())
}

#[test]
fn test_single_precision_reads_back_exactly() -> Result<()> {
    let handle = open_memory_db()?;
    let exec = handle.executor()?;
    exec.execute_raw("CREATE TABLE readings (value REAL)")?;
    exec.execute_prepared("INSERT INTO readings VALUES (?)", &[SqlParam::Float(3.14)])?;

    let result = exec.execute_query("SELECT value FROM readings", 0)?;
    let cell = &result.rows()[0][0];
    // Stored widened to double precision
    assert_ne!(cell.as_f64(), Some(3.14));
    assert_eq!(cell.as_f64(), Some(3.14_f32 as f64));
    assert_eq!(cell.as_f32(), Some(3.14_f32));
    Ok(())
}
