//! Component catalog and the derived registry of placement templates.
//!
//! DESIGN
//! ======
//! The catalog is declarative data: palette groups (`sections`,
//! `components`), each holding categories, each holding named entries. The
//! registry derives one [`ComponentDefinition`] per `(type, category, name)`
//! triple with the deterministic id `"{type}-{category}-{name}"`, empty
//! default properties, and `path` equal to the entry name. Derivation is
//! pure: no I/O, no failure, same catalog in — same definitions out, in
//! catalog order.
//!
//! The registry is read-only after construction and is injected into the
//! editor state rather than accessed as a global, so tests substitute small
//! fake catalogs freely. Adding an element always clones a template.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Palette group name for section templates. Drop payloads with this type
/// segment create sections; anything else creates components.
pub const SECTIONS_KIND: &str = "sections";

/// One named template entry within a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    /// Minimum height in design pixels, declared by section entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
}

impl CatalogEntry {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self { name: name.to_owned(), min_height: None }
    }

    #[must_use]
    pub fn with_min_height(name: &str, min_height: f64) -> Self {
        Self { name: name.to_owned(), min_height: Some(min_height) }
    }
}

/// A category of templates within a palette group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogCategory {
    pub name: String,
    pub entries: Vec<CatalogEntry>,
}

/// A palette group: `sections` or `components` for the stock catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogGroup {
    #[serde(rename = "type")]
    pub kind: String,
    pub categories: Vec<CatalogCategory>,
}

/// The full declarative catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub groups: Vec<CatalogGroup>,
}

/// An immutable placement template derived from the catalog. The source of
/// truth for what a fresh element of a given key looks like before placement
/// is assigned.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    /// Deterministic key: `"{type}-{category}-{name}"`.
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    /// Empty default props; elements clone and then own their copy.
    pub properties: serde_json::Value,
    /// Module lookup key, equal to the entry name.
    pub path: String,
    /// Minimum section height, when declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
}

impl ComponentDefinition {
    /// Whether this template produces a section.
    #[must_use]
    pub fn is_section(&self) -> bool {
        self.kind == SECTIONS_KIND
    }
}

/// Read-only table of templates, keyed by definition id.
#[derive(Debug)]
pub struct Registry {
    definitions: Vec<ComponentDefinition>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Derive the registry from a catalog. Pure and deterministic; later
    /// duplicate keys are ignored in favor of the first occurrence.
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        let mut definitions = Vec::new();
        let mut index = HashMap::new();

        for group in &catalog.groups {
            for category in &group.categories {
                for entry in &category.entries {
                    let id = format!("{}-{}-{}", group.kind, category.name, entry.name);
                    if index.contains_key(&id) {
                        continue;
                    }
                    index.insert(id.clone(), definitions.len());
                    definitions.push(ComponentDefinition {
                        id,
                        name: entry.name.clone(),
                        kind: group.kind.clone(),
                        category: category.name.clone(),
                        properties: serde_json::Value::Object(serde_json::Map::new()),
                        path: entry.name.clone(),
                        min_height: entry.min_height,
                    });
                }
            }
        }

        Self { definitions, index }
    }

    /// Build a registry over the stock catalog.
    #[must_use]
    pub fn with_default_catalog() -> Self {
        Self::new(&default_catalog())
    }

    /// All derived definitions, in catalog order.
    #[must_use]
    pub fn definitions(&self) -> &[ComponentDefinition] {
        &self.definitions
    }

    /// Look up a template by its full key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ComponentDefinition> {
        self.index.get(key).map(|i| &self.definitions[*i])
    }

    /// Number of derived templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` when the catalog derived no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_default_catalog()
    }
}

/// The stock palette: page sections plus shadcn-flavored leaf components.
#[must_use]
pub fn default_catalog() -> Catalog {
    Catalog {
        groups: vec![
            CatalogGroup {
                kind: SECTIONS_KIND.to_owned(),
                categories: vec![CatalogCategory {
                    name: "layout".to_owned(),
                    entries: vec![
                        CatalogEntry::with_min_height("hero", 600.0),
                        CatalogEntry::with_min_height("features", 500.0),
                        CatalogEntry::with_min_height("pricing", 500.0),
                        CatalogEntry::with_min_height("testimonials", 400.0),
                        CatalogEntry::with_min_height("cta", 300.0),
                        CatalogEntry::with_min_height("footer", 200.0),
                    ],
                }],
            },
            CatalogGroup {
                kind: "components".to_owned(),
                categories: vec![
                    CatalogCategory {
                        name: "shadcn".to_owned(),
                        entries: vec![
                            CatalogEntry::new("button"),
                            CatalogEntry::new("card"),
                            CatalogEntry::new("input"),
                            CatalogEntry::new("badge"),
                            CatalogEntry::new("avatar"),
                        ],
                    },
                    CatalogCategory {
                        name: "media".to_owned(),
                        entries: vec![CatalogEntry::new("image"), CatalogEntry::new("video")],
                    },
                ],
            },
        ],
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;
