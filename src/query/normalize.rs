//! Feature-collection normalization into a tabular projection
//!
//! Columns come from the first feature's property keys in arrival order; the
//! schema of later features is not reconciled. That first-schema-wins rule is
//! the existing contract of the information table, kept behind this module's
//! interface so a union-of-schemas strategy could replace it without touching
//! the orchestrator.

use crate::data::geojson::{property_display, FeatureCollection};
use crate::layers::registry::LayerRegistry;

/// Number of leading columns shown before the expand control
pub const SHOWN_COLUMNS: usize = 3;

/// Column key of the implicit identifier column
pub const ID_COLUMN: &str = "id";

/// A single table column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub key: String,
    pub title: String,
}

/// One table row; cells are aligned with `TableProjection::columns` and hold
/// `None` where the feature lacks the column's property
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<Option<String>>,
}

/// Tabular projection of a feature-query response.
///
/// Rebuilt from scratch on every successful query; it replaces the previous
/// projection atomically, there is no incremental merge.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableProjection {
    /// Identifier column first, then the first feature's property keys
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<TableRow>,
    /// Title of the registry layer the features came from, when the
    /// feature-id prefix resolves to one
    pub source_layer_title: Option<String>,
}

impl TableProjection {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Columns rendered directly in the table
    pub fn shown_columns(&self) -> &[ColumnDef] {
        let shown = self.columns.len().min(SHOWN_COLUMNS);
        &self.columns[..shown]
    }

    /// Columns folded into the expandable remainder of each row
    pub fn overflow_columns(&self) -> &[ColumnDef] {
        let shown = self.columns.len().min(SHOWN_COLUMNS);
        &self.columns[shown..]
    }

    /// The "key: value, ..." line a row expands into; absent cells are skipped
    pub fn expanded_row(&self, row: &TableRow) -> String {
        let shown = self.shown_columns().len();
        self.columns
            .iter()
            .zip(row.cells.iter())
            .skip(shown)
            .filter_map(|(column, cell)| {
                cell.as_ref().map(|value| format!("{}: {}", column.key, value))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Projects a feature collection into table form.
///
/// An empty collection yields an empty projection with no source layer; the
/// orchestrator reads that as "no info to show".
pub fn normalize(collection: &FeatureCollection, registry: &LayerRegistry) -> TableProjection {
    let Some(first) = collection.features.first() else {
        return TableProjection::default();
    };

    let mut columns = vec![ColumnDef {
        key: ID_COLUMN.to_string(),
        title: "ID".to_string(),
    }];
    if let Some(properties) = &first.properties {
        for key in properties.keys() {
            if key == ID_COLUMN {
                continue;
            }
            columns.push(ColumnDef {
                key: key.clone(),
                title: key.clone(),
            });
        }
    }

    let rows = collection
        .features
        .iter()
        .map(|feature| {
            let id = feature.id_text().unwrap_or_default();
            let cells = columns
                .iter()
                .map(|column| {
                    if column.key == ID_COLUMN {
                        Some(id.clone())
                    } else {
                        feature
                            .property(&column.key)
                            .and_then(property_display)
                    }
                })
                .collect();
            TableRow { id, cells }
        })
        .collect();

    let source_layer_title = first
        .layer_code()
        .and_then(|code| registry.find_by_code(&code))
        .map(|layer| layer.title.clone());

    TableProjection {
        columns,
        rows,
        source_layer_title,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(body: &str) -> FeatureCollection {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_empty_collection() {
        let projection = normalize(&FeatureCollection::default(), &LayerRegistry::default());
        assert!(projection.is_empty());
        assert!(projection.columns.is_empty());
        assert_eq!(projection.source_layer_title, None);
    }

    #[test]
    fn test_column_split_with_overflow() {
        // Five properties, one literally named "id": the identifier column
        // plus four property columns, three shown, two in the overflow.
        let body = r#"{"features": [{
            "id": "pg_block.7",
            "properties": {"id": "ignored", "blok": "A10", "luas": 24.5, "tahun": 2008, "divisi": "D2"}
        }]}"#;
        let projection = normalize(&collection(body), &LayerRegistry::default());

        assert_eq!(projection.columns.len(), 5);
        assert_eq!(projection.shown_columns().len(), 3);
        assert_eq!(projection.overflow_columns().len(), 2);

        let keys: Vec<&str> = projection.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, ["id", "blok", "luas", "tahun", "divisi"]);
    }

    #[test]
    fn test_first_schema_wins() {
        let body = r#"{"features": [
            {"id": "pg_block.1", "properties": {"blok": "A10", "luas": 24.5}},
            {"id": "pg_block.2", "properties": {"blok": "B07", "keliling": 3.2}}
        ]}"#;
        let projection = normalize(&collection(body), &LayerRegistry::default());

        let keys: Vec<&str> = projection.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, ["id", "blok", "luas"]);

        // The second feature has no "luas"; its cell degrades to absent.
        assert_eq!(projection.rows[1].cells[2], None);
        assert_eq!(projection.rows[1].cells[1].as_deref(), Some("B07"));
    }

    #[test]
    fn test_expanded_row_skips_absent_cells() {
        let body = r#"{"features": [
            {"id": "pg_block.1", "properties": {"blok": "A10", "luas": 24.5, "tahun": 2008, "divisi": "D2"}},
            {"id": "pg_block.2", "properties": {"blok": "B07", "luas": 19.1}}
        ]}"#;
        let projection = normalize(&collection(body), &LayerRegistry::default());

        assert_eq!(
            projection.expanded_row(&projection.rows[0]),
            "tahun: 2008, divisi: D2"
        );
        assert_eq!(projection.expanded_row(&projection.rows[1]), "");
    }

    #[test]
    fn test_source_layer_from_id_prefix() {
        let body = r#"{"features": [{"id": "pg_block.42", "properties": {"blok": "A10"}}]}"#;
        let projection = normalize(&collection(body), &LayerRegistry::default());
        assert_eq!(projection.source_layer_title.as_deref(), Some("Block"));
    }

    #[test]
    fn test_unresolvable_id_prefix() {
        let body = r#"{"features": [{"id": "pg_unknown.42", "properties": {"blok": "A10"}}]}"#;
        let projection = normalize(&collection(body), &LayerRegistry::default());
        assert_eq!(projection.source_layer_title, None);
        assert_eq!(projection.rows.len(), 1);
    }

    #[test]
    fn test_id_cell_mirrors_row_id() {
        let body = r#"{"features": [{"id": "pg_road.3", "properties": {"nama": "Jalan Poros"}}]}"#;
        let projection = normalize(&collection(body), &LayerRegistry::default());
        let row = &projection.rows[0];
        assert_eq!(row.id, "pg_road.3");
        assert_eq!(row.cells[0].as_deref(), Some("pg_road.3"));
    }
}
