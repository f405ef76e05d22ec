// Schema Introspection Integration Tests

use anyhow::Result;
use sqlcompat::{ConnectionConfig, ConnectionHandle, DialectKind, ForeignKeyDescriptor};

#[path = "../common/mod.rs"]
mod common;
use common::{create_customers_orders, open_memory_db};

#[test]
fn test_list_tables_ordering_and_views() -> Result<()> {
    let handle = open_memory_db()?;
    handle.executor()?.execute_script(
        "CREATE TABLE c (x); CREATE TABLE a (x); CREATE TABLE b (x);
         CREATE VIEW v_all AS SELECT x FROM a;",
    )?;
    let introspector = handle.introspector()?;

    assert_eq!(introspector.list_tables(true)?, vec!["a", "b", "c", "v_all"]);

    let mut unordered = introspector.list_tables(false)?;
    unordered.sort();
    assert_eq!(unordered, vec!["a", "b", "c", "v_all"]);
    Ok(())
}

#[test]
fn test_table_exists_is_exact() -> Result<()> {
    let handle = open_memory_db()?;
    handle
        .executor()?
        .execute_script("CREATE TABLE Roads (id INTEGER); CREATE VIEW road_view AS SELECT id FROM Roads;")?;
    let introspector = handle.introspector()?;

    assert!(introspector.table_exists("Roads")?);
    assert!(!introspector.table_exists("roads")?);
    assert!(!introspector.table_exists("Road")?);
    assert!(!introspector.table_exists("road_view")?);
    Ok(())
}

#[test]
fn test_describe_columns_matches_catalog() -> Result<()> {
    let handle = open_memory_db()?;
    handle.executor()?.execute_raw(
        "CREATE TABLE parcels (zone TEXT, lot INTEGER, area REAL, geom BLOB, note, PRIMARY KEY (zone, lot))",
    )?;
    let introspector = handle.introspector()?;

    let columns = introspector.describe_columns("parcels")?;
    let expected = handle
        .executor()?
        .execute_query("SELECT count(*) FROM pragma_table_info('parcels')", 0)?;
    assert_eq!(Some(columns.len() as i64), expected.rows()[0][0].as_i64());

    let names: Vec<&str> = columns.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["zone", "lot", "area", "geom", "note"]);
    assert_eq!(columns[2].declared_type(), "REAL");
    assert_eq!(columns[4].declared_type(), "");

    assert_eq!(columns[0].primary_key_rank(), 1);
    assert_eq!(columns[1].primary_key_rank(), 2);
    assert!(!columns[2].is_primary_key());
    Ok(())
}

#[test]
fn test_describe_columns_of_unknown_table_is_empty() -> Result<()> {
    let handle = open_memory_db()?;
    assert!(handle.introspector()?.describe_columns("ghost")?.is_empty());
    assert!(handle.introspector()?.describe_foreign_keys("ghost")?.is_empty());
    Ok(())
}

#[test]
fn test_describe_foreign_keys() -> Result<()> {
    let handle = open_memory_db()?;
    create_customers_orders(&handle)?;
    let introspector = handle.introspector()?;

    let keys = introspector.describe_foreign_keys("orders")?;
    assert_eq!(
        keys,
        vec![ForeignKeyDescriptor {
            from: "customer_id".to_string(),
            to: "id".to_string(),
            table: "customers".to_string(),
        }]
    );
    assert!(introspector.describe_foreign_keys("customers")?.is_empty());
    Ok(())
}

#[test]
fn test_foreign_key_without_target_column_is_skipped() -> Result<()> {
    let handle = open_memory_db()?;
    handle.executor()?.execute_script(
        "CREATE TABLE parent (id INTEGER PRIMARY KEY, code TEXT UNIQUE);
         CREATE TABLE child (
             implicit_ref INTEGER REFERENCES parent,
             code_ref TEXT REFERENCES parent(code)
         );",
    )?;

    let keys = handle.introspector()?.describe_foreign_keys("child")?;
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].from, "code_ref");
    assert_eq!(keys[0].to, "code");
    Ok(())
}

#[test]
fn test_schema_qualified_names() -> Result<()> {
    let handle = open_memory_db()?;
    create_customers_orders(&handle)?;
    let introspector = handle.introspector()?;

    assert_eq!(
        introspector.describe_columns("main.orders")?,
        introspector.describe_columns("orders")?
    );
    assert_eq!(introspector.describe_foreign_keys("main.orders")?.len(), 1);
    Ok(())
}

#[test]
fn test_describe_table_assembles_everything() -> Result<()> {
    let handle = open_memory_db()?;
    create_customers_orders(&handle)?;

    let table = handle.introspector()?.describe_table("orders")?;
    assert_eq!(table.name, "orders");
    assert_eq!(table.columns.len(), 3);
    assert_eq!(table.primary_key_columns()[0].name(), "id");
    assert_eq!(
        table.foreign_key_for("customer_id").map(|fk| fk.table.as_str()),
        Some("customers")
    );
    assert!(table.geometry_columns.is_empty());
    Ok(())
}

#[test]
fn test_count_and_backend_info() -> Result<()> {
    let handle = open_memory_db()?;
    create_customers_orders(&handle)?;
    let introspector = handle.introspector()?;

    assert_eq!(introspector.count("orders")?, 3);
    assert_eq!(introspector.count("customers")?, 2);
    assert!(introspector.count("ghost").is_err());

    let info = introspector.backend_info()?;
    assert_eq!(info.len(), 1);
    assert!(info[0].starts_with('3'), "unexpected version {:?}", info);
    Ok(())
}

#[test]
fn test_spatial_dialect_reads_geometry_catalog() -> Result<()> {
    let mut handle = ConnectionHandle::new(ConnectionConfig::for_dialect(DialectKind::Spatialite));
    handle.open(None)?;
    handle.executor()?.execute_script(
        "CREATE TABLE geometry_columns (
             f_table_name TEXT, f_geometry_column TEXT, geometry_type TEXT,
             coord_dimension TEXT, srid INTEGER, spatial_index_enabled INTEGER
         );
         CREATE TABLE roads (id INTEGER PRIMARY KEY, geom BLOB);
         INSERT INTO geometry_columns VALUES ('roads', 'geom', 'LINESTRING', 'XY', 4326, 1);",
    )?;
    let introspector = handle.introspector()?;

    let geometries = introspector.describe_geometry_columns("ROADS")?;
    assert_eq!(geometries.len(), 1);
    assert_eq!(geometries[0].column, "geom");
    assert_eq!(geometries[0].geometry_type, "LINESTRING");
    assert_eq!(geometries[0].srid, 4326);
    assert!(geometries[0].spatial_index_enabled);

    let table = introspector.describe_table("roads")?;
    assert!(table.is_geometry_column("geom"));
    assert!(!table.is_geometry_column("id"));
    Ok(())
}

#[test]
fn test_plain_dialect_has_no_geometry() -> Result<()> {
    let handle = open_memory_db()?;
    handle.executor()?.execute_raw("CREATE TABLE geometry_columns (f_table_name TEXT)")?;
    assert!(handle.introspector()?.describe_geometry_columns("roads")?.is_empty());
    Ok(())
}
