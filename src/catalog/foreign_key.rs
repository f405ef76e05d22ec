use serde::Serialize;

/// A column reference from one table to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyDescriptor {
    /// Referencing column in the described table
    pub from: String,
    /// Referenced column in the target table
    pub to: String,
    /// Target table
    pub table: String,
}
