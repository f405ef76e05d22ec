//! Table Descriptor
//!
//! A table together with its columns and relationships. Descriptors are built
//! on demand from the catalog and never cached.

use serde::Serialize;

use super::column::ColumnDescriptor;
use super::foreign_key::ForeignKeyDescriptor;
use super::geometry::GeometryColumnDescriptor;

/// Everything the catalog knows about one table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableDescriptor {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
    pub foreign_keys: Vec<ForeignKeyDescriptor>,
    pub geometry_columns: Vec<GeometryColumnDescriptor>,
}

impl TableDescriptor {
    /// Get a column by exact name
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Primary key columns ordered by their rank
    pub fn primary_key_columns(&self) -> Vec<&ColumnDescriptor> {
        let mut keys: Vec<&ColumnDescriptor> = self.columns.iter().filter(|c| c.is_primary_key()).collect();
        keys.sort_by_key(|c| c.primary_key_rank());
        keys
    }

    /// The foreign key leaving from `column`, if any
    pub fn foreign_key_for(&self, column: &str) -> Option<&ForeignKeyDescriptor> {
        self.foreign_keys.iter().find(|fk| fk.from == column)
    }

    /// Whether `column` is a registered geometry column
    pub fn is_geometry_column(&self, column: &str) -> bool {
        self.geometry_columns
            .iter()
            .any(|g| g.column.eq_ignore_ascii_case(column))
    }

    /// Build the `CREATE TABLE` statement for this table
    pub fn schema_string(&self) -> String {
        let mut schema = format!("CREATE TABLE {} (\n", self.name);

        let keys = self.primary_key_columns();
        let composite_key = keys.len() > 1;

        for (i, col) in self.columns.iter().enumerate() {
            schema.push_str(&format!("  {}", col.name()));
            if !col.declared_type().is_empty() {
                schema.push_str(&format!(" {}", col.declared_type()));
            }
            if col.is_primary_key() && !composite_key {
                schema.push_str(" PRIMARY KEY");
            }
            if i < self.columns.len() - 1 {
                schema.push_str(",\n");
            }
        }

        if composite_key {
            let names: Vec<&str> = keys.iter().map(|c| c.name()).collect();
            schema.push_str(&format!(",\n  PRIMARY KEY ({})", names.join(", ")));
        }
        for fk in &self.foreign_keys {
            schema.push_str(&format!(
                ",\n  FOREIGN KEY ({}) REFERENCES {}({})",
                fk.from, fk.table, fk.to
            ));
        }

        schema.push_str("\n);");
        schema
    }
}
