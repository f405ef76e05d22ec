//! Named query templates.
//!
//! Starting points for hand-written SQL, kept in a fixed display order. The
//! upper-case words `TABLENAME`, `FIELD` and `VALUE` are placeholders meant to
//! be replaced with [`render_template`].

use linked_hash_map::LinkedHashMap;
use once_cell::sync::Lazy;

static TEMPLATES: Lazy<LinkedHashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = LinkedHashMap::new();
    map.insert("simple select", "select * from TABLENAME");
    map.insert(
        "geometry select",
        "select ST_AsBinary(the_geom) as the_geom from TABLENAME",
    );
    map.insert("where select", "select * from TABLENAME where FIELD > VALUE");
    map.insert("limited select", "select * from TABLENAME limit 10");
    map.insert("sorted select", "select * from TABLENAME order by FIELD asc");
    map.insert(
        "unix epoch timestamp select",
        "strftime('%Y-%m-%d %H:%M:%S', timestampcolumn / 1000, 'unixepoch')",
    );
    map.insert(
        "unix epoch timestamp where select",
        "select * from TABLENAME where longtimestamp >= cast(strftime('%s','YYYY-MM-YY HH:mm:ss') as long)*1000",
    );
    map.insert(
        "spatial index geom intersection part",
        "AND table1.ROWID IN (\nSELECT ROWID FROM SpatialIndex\nWHERE f_table_name='table2' AND search_frame=table2Geom)",
    );
    map.insert(
        "create intersection of table1 with buffer of table2",
        "SELECT ST_AsBinary(intersection(t1.the_geom, buffer(t2.the_geom, 100))) as the_geom FROM table1 t1, table2 t2\n\
         where (\nintersects (t1.the_geom, buffer(t2.the_geom, 100))=1\n\
         AND t1.ROWID IN (\nSELECT ROWID FROM SpatialIndex\nWHERE f_table_name='table1' AND search_frame=buffer(t2.the_geom, 100)\n))",
    );
    map
});

/// All templates as `(name, sql)` pairs, in display order
pub fn templates() -> impl Iterator<Item = (&'static str, &'static str)> {
    TEMPLATES.iter().map(|(name, sql)| (*name, *sql))
}

/// Look up a template by name
pub fn template(name: &str) -> Option<&'static str> {
    TEMPLATES.get(name).copied()
}

/// Replace placeholders in `template` with the given values
pub fn render_template(template: &str, replacements: &[(&str, &str)]) -> String {
    replacements
        .iter()
        .fold(template.to_string(), |sql, (placeholder, value)| sql.replace(placeholder, value))
}
