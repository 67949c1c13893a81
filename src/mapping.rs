//! Imposm mapping schemas.
use std::collections::BTreeMap;
use std::io;

use serde::Deserialize;

use crate::error::Result;

/// A map from OSM key to the OSM values accepted for that key.
pub type TagMap = BTreeMap<String, Vec<String>>;

/// An imposm mapping schema.
///
/// Schemas carry more sections than the tables (generalized tables, tag and
/// area settings); everything except `tables` is ignored here.
#[derive(Debug, Deserialize)]
pub struct Mapping {
    #[serde(default)]
    pub tables: BTreeMap<String, Table>,
}

/// An output table definition.
#[derive(Debug, Default, Deserialize)]
pub struct Table {
    /// The table's target geometry kind. Carried through, never interpreted.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<Field>>,
    #[serde(default)]
    pub mapping: Option<TagMap>,
    #[serde(default)]
    pub type_mappings: Option<BTreeMap<String, TagMap>>,
}

/// An output column definition.
#[derive(Debug, Default, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// A table's tag mapping, in either of its two schema forms.
#[derive(Debug)]
pub enum TableMapping<'a> {
    /// A map from geometry type to tag mapping (`type_mappings`).
    Typed(&'a BTreeMap<String, TagMap>),
    /// A single tag mapping (`mapping`).
    Direct(&'a TagMap),
}

/// A table that contributes tags, with its mapping flattened to
/// (key, values) pairs.
#[derive(Debug)]
pub struct ActiveTable<'a> {
    pub name: &'a str,
    pub kind: Option<&'a str>,
    pub fields: &'a [Field],
    pub entries: Vec<(&'a String, &'a Vec<String>)>,
}

impl Mapping {
    /// Parse a mapping schema from YAML.
    pub fn from_reader(reader: impl io::Read) -> Result<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Tables that contribute tags: those with at least one field and a
    /// non-empty mapping in either form. Tables missing either are dead and
    /// are skipped without error.
    pub fn active_tables(&self) -> impl Iterator<Item = ActiveTable<'_>> {
        self.tables.iter().filter_map(|(name, table)| {
            let fields = table.fields.as_deref().unwrap_or_default();
            if fields.is_empty() {
                return None;
            }
            let entries = table.tag_mapping()?.entries();
            if entries.is_empty() {
                return None;
            }
            Some(ActiveTable {
                name: name.as_str(),
                kind: table.kind.as_deref(),
                fields,
                entries,
            })
        })
    }
}

impl Table {
    /// The table's mapping source. `type_mappings` wins over `mapping` when
    /// both are present.
    pub fn tag_mapping(&self) -> Option<TableMapping<'_>> {
        match &self.type_mappings {
            Some(typed) if !typed.is_empty() => Some(TableMapping::Typed(typed)),
            _ => self.mapping.as_ref().map(TableMapping::Direct),
        }
    }
}

impl<'a> TableMapping<'a> {
    /// Flatten to (key, values) pairs.
    ///
    /// Typed mappings concatenate the per-geometry maps without merging: a
    /// key declared under two geometry types yields two pairs, and the values
    /// of both survive to aggregation.
    pub fn entries(&self) -> Vec<(&'a String, &'a Vec<String>)> {
        match self {
            Self::Typed(typed) => typed.values().flat_map(|mapping| mapping.iter()).collect(),
            Self::Direct(mapping) => mapping.iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Mapping, Table, TableMapping};

    fn table(yaml: &str) -> Table {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_direct_mapping() {
        let table = table(
            r#"
type: linestring
mapping:
  highway:
    - primary
"#,
        );
        let Some(TableMapping::Direct(mapping)) = table.tag_mapping() else {
            panic!("expected direct mapping");
        };
        assert_eq!(mapping["highway"], ["primary"]);
    }

    #[test]
    fn test_type_mappings_win_over_mapping() {
        let table = table(
            r#"
type: geometry
mapping:
  highway:
    - primary
type_mappings:
  polygons:
    building:
      - "yes"
"#,
        );
        assert!(matches!(
            table.tag_mapping(),
            Some(TableMapping::Typed(_))
        ));
    }

    #[test]
    fn test_empty_type_mappings_fall_back_to_mapping() {
        let table = table(
            r#"
mapping:
  highway:
    - primary
type_mappings: {}
"#,
        );
        assert!(matches!(
            table.tag_mapping(),
            Some(TableMapping::Direct(_))
        ));
    }

    #[test]
    fn test_no_mapping() {
        let table = table(
            r#"
type: polygon
fields:
  - name: osm_id
    type: id
"#,
        );
        assert!(table.tag_mapping().is_none());
    }

    #[test]
    fn test_typed_entries_keep_duplicate_keys() {
        let table = table(
            r#"
type_mappings:
  points:
    amenity:
      - cafe
  polygons:
    amenity:
      - cafe
      - bar
"#,
        );
        let entries = table.tag_mapping().unwrap().entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|(key, _)| *key == "amenity"));
    }

    #[test]
    fn test_active_tables_require_fields() {
        let mapping: Mapping = serde_yaml::from_str(
            r#"
tables:
  backdrop:
    type: polygon
    fields: []
    mapping:
      natural:
        - water
"#,
        )
        .unwrap();
        assert_eq!(mapping.active_tables().count(), 0);
    }

    #[test]
    fn test_active_tables_require_mapping_entries() {
        let mapping: Mapping = serde_yaml::from_str(
            r#"
tables:
  stub:
    type: polygon
    fields:
      - name: osm_id
        type: id
    mapping: {}
"#,
        )
        .unwrap();
        assert_eq!(mapping.active_tables().count(), 0);
    }

    #[test]
    fn test_null_fields_are_tolerated() {
        let mapping: Mapping = serde_yaml::from_str(
            r#"
tables:
  stub:
    type: polygon
    fields:
    mapping:
      natural:
        - water
"#,
        )
        .unwrap();
        assert_eq!(mapping.active_tables().count(), 0);
    }

    #[test]
    fn test_active_table_carries_table_data() {
        let mapping: Mapping = serde_yaml::from_str(
            r#"
tables:
  roads:
    type: linestring
    fields:
      - name: osm_id
        type: id
    mapping:
      highway:
        - motorway
"#,
        )
        .unwrap();
        let tables: Vec<_> = mapping.active_tables().collect();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "roads");
        assert_eq!(tables[0].kind, Some("linestring"));
        assert_eq!(tables[0].fields.len(), 1);
    }
}
