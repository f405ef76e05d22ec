// Column Descriptor
//
// One entry of a table's column catalog.

use serde::Serialize;

/// Describes a column as reported by the backend catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    /// Column name
    name: String,
    /// Declared type, exactly as written in the table definition
    declared_type: String,
    /// 1-based position in the primary key, or 0 when not part of it
    primary_key_rank: u32,
}

impl ColumnDescriptor {
    /// Create a new column descriptor
    pub fn new(name: String, declared_type: String, primary_key_rank: u32) -> Self {
        ColumnDescriptor {
            name,
            declared_type,
            primary_key_rank,
        }
    }

    /// Get the column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the declared type (may be empty)
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    /// Get the primary key rank
    pub fn primary_key_rank(&self) -> u32 {
        self.primary_key_rank
    }

    /// Check if the column is part of the primary key
    pub fn is_primary_key(&self) -> bool {
        self.primary_key_rank > 0
    }
}
