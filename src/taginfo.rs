//! Taginfo project documents.
use std::collections::{BTreeMap, BTreeSet};
use std::io;

use serde::Serialize;

/// Distinct OSM values observed for each OSM key.
pub type Tags = BTreeMap<String, BTreeSet<String>>;

/// A taginfo project document.
///
/// Taginfo consumers diff these documents across schema revisions, so the
/// encoding must be deterministic. Struct fields are declared in key order
/// and all map-backed data is sorted.
#[derive(Debug, Serialize)]
pub struct Document {
    pub data_format: u32,
    pub project: Project,
    pub tags: Vec<Tag>,
}

/// The project metadata block.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub contact_email: String,
    pub contact_name: String,
    pub description: String,
    pub doc_url: String,
    pub icon_url: String,
    pub name: String,
    pub project_url: String,
}

/// One OSM tag consumed by the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Document {
    /// Build a document from collected tags, expanding each key's value set
    /// into one record per (key, value) pair.
    pub fn new(tags: Tags) -> Self {
        let tags = tags
            .into_iter()
            .flat_map(|(key, values)| {
                values.into_iter().map(move |value| Tag {
                    key: key.clone(),
                    value,
                })
            })
            .collect();
        Self {
            data_format: 1,
            project: Project::default(),
            tags,
        }
    }
}

impl Default for Project {
    fn default() -> Self {
        Self {
            contact_email: "me@lukasmartinelli.ch".into(),
            contact_name: "Lukas Martinelli".into(),
            description: "Free Vector Tiles from OpenStreetMap".into(),
            doc_url: "http://osm2vectortiles.org/docs/".into(),
            icon_url: "http://osm2vectortiles.org/favicon.ico".into(),
            name: "OSM2VectorTiles".into(),
            project_url: "http://osm2vectortiles.org/".into(),
        }
    }
}

/// JSON formatter for the published taginfo layout: 4-space indentation with
/// no whitespace around the `,` and `:` separators.
#[derive(Debug, Default)]
pub struct Formatter {
    depth: usize,
    has_value: bool,
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }
}

fn indent<W>(writer: &mut W, n: usize) -> io::Result<()>
where
    W: ?Sized + io::Write,
{
    for _ in 0..n {
        writer.write_all(b"    ")?;
    }
    Ok(())
}

impl serde_json::ser::Formatter for Formatter {
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.depth += 1;
        self.has_value = false;
        writer.write_all(b"[")
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.depth -= 1;
        if self.has_value {
            writer.write_all(b"\n")?;
            indent(writer, self.depth)?;
        }
        writer.write_all(b"]")
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            writer.write_all(b"\n")?;
        } else {
            writer.write_all(b",\n")?;
        }
        indent(writer, self.depth)
    }

    fn end_array_value<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.has_value = true;
        Ok(())
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.depth += 1;
        self.has_value = false;
        writer.write_all(b"{")
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.depth -= 1;
        if self.has_value {
            writer.write_all(b"\n")?;
            indent(writer, self.depth)?;
        }
        writer.write_all(b"}")
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            writer.write_all(b"\n")?;
        } else {
            writer.write_all(b",\n")?;
        }
        indent(writer, self.depth)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b":")
    }

    fn end_object_value<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.has_value = true;
        Ok(())
    }
}
