use serde::Serialize;

/// A registered geometry column on a spatially-extended backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeometryColumnDescriptor {
    pub table: String,
    pub column: String,
    /// Geometry type code or name as stored in the spatial catalog
    pub geometry_type: String,
    pub srid: i64,
    pub spatial_index_enabled: bool,
}
