//! TOML input models.
//!
//! A model file lists `[[elements]]`, each with a `kind`, a `name` and any
//! number of further attributes:
//!
//! ```toml
//! [[elements]]
//! kind = "class"
//! name = "Point"
//! fields = ["x", "y"]
//! ```

use std::{path::Path, str::FromStr};

use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};

use crate::{Error, Result, error::SourceContext, value::toml_to_json};

/// One model element.
///
/// Serializes as a flat map of `kind`, `name` and the attributes, with TOML
/// datetimes written as strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Element {
    pub kind: String,
    pub name: String,
    #[serde(flatten)]
    pub attributes: toml::Table,
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.attributes.len() + 2))?;
        map.serialize_entry("kind", &self.kind)?;
        map.serialize_entry("name", &self.name)?;
        for (key, value) in &self.attributes {
            map.serialize_entry(key, &toml_to_json(value))?;
        }
        map.end()
    }
}

/// Elements in file order.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Model {
    #[serde(default)]
    elements: Vec<Element>,
}

impl Model {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        toml::from_str(content).map_err(|e| ctx.parse_error(e))
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Elements of the given kind, in file order.
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements.iter().filter(move |e| e.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl FromStr for Model {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "model.toml")
    }
}
