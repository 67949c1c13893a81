use std::io::Write;

use serde::Serialize;

pub mod cli;
pub mod error;
pub mod mapping;
pub mod taginfo;

pub use error::{Error, Result};

/// Collect the distinct OSM values referenced for each OSM key across all
/// active tables in `mapping`.
pub fn extract(mapping: &mapping::Mapping) -> taginfo::Tags {
    let mut tags = taginfo::Tags::new();
    for table in mapping.active_tables() {
        for (key, values) in table.entries {
            for value in values {
                tags.entry(key.clone()).or_default().insert(value.clone());
            }
        }
    }
    tags
}

/// Write a [`Document`](taginfo::Document) to a writer as deterministic,
/// indented JSON.
pub fn render(w: &mut impl Write, document: &taginfo::Document) -> Result<()> {
    let mut ser = serde_json::Serializer::with_formatter(w, taginfo::Formatter::new());
    document.serialize(&mut ser)?;
    Ok(())
}
