//! Category store: user-defined categories and the keywords that select them
//!
//! The store is a JSON object mapping category name to a list of keywords:
//!
//! ```json
//! { "Uncategorized": [], "Entertainment": ["NETFLIX"] }
//! ```
//!
//! Category order in the file is the order categories are tried during
//! categorization, and is preserved across save/load. The store is rewritten
//! after every mutation.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::UNCATEGORIZED;

/// A category and its keywords, in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Ordered category → keywords mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMap {
    categories: Vec<Category>,
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self {
            categories: vec![Category {
                name: UNCATEGORIZED.to_string(),
                keywords: Vec::new(),
            }],
        }
    }
}

impl CategoryMap {
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Keywords for a category, if it exists
    pub fn keywords(&self, name: &str) -> Option<&[String]> {
        self.get(name).map(|c| c.keywords.as_slice())
    }

    /// Category names in stored order
    pub fn names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Append a category with no keywords. Returns false for empty or existing names.
    pub fn insert_category(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.categories.push(Category {
            name: name.to_string(),
            keywords: Vec::new(),
        });
        true
    }

    /// Append a trimmed keyword to a category.
    ///
    /// Returns false if the category is missing, the keyword is empty, or the
    /// category already has it (compared case-insensitively).
    pub fn insert_keyword(&mut self, category: &str, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return false;
        }
        let Some(entry) = self.categories.iter_mut().find(|c| c.name == category) else {
            return false;
        };
        let folded = keyword.to_lowercase();
        if entry
            .keywords
            .iter()
            .any(|k| k.trim().to_lowercase() == folded)
        {
            return false;
        }
        entry.keywords.push(keyword.to_string());
        true
    }

    /// Put "Uncategorized" back at the front if a loaded file dropped it
    fn ensure_uncategorized(&mut self) -> bool {
        if self.contains(UNCATEGORIZED) {
            return false;
        }
        self.categories.insert(
            0,
            Category {
                name: UNCATEGORIZED.to_string(),
                keywords: Vec::new(),
            },
        );
        true
    }
}

impl Serialize for CategoryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.keywords)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct CategoryMapVisitor;

        impl<'de> Visitor<'de> for CategoryMapVisitor {
            type Value = CategoryMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping category names to keyword lists")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut categories: Vec<Category> = Vec::new();
                while let Some((name, keywords)) = access.next_entry::<String, Vec<String>>()? {
                    // Repeated keys merge into the first occurrence
                    match categories.iter_mut().find(|c| c.name == name) {
                        Some(existing) => existing.keywords.extend(keywords),
                        None => categories.push(Category { name, keywords }),
                    }
                }
                Ok(CategoryMap { categories })
            }
        }

        deserializer.deserialize_map(CategoryMapVisitor)
    }
}

/// Category map bound to its JSON file
#[derive(Debug)]
pub struct CategoryStore {
    path: PathBuf,
    map: CategoryMap,
}

impl CategoryStore {
    /// Load the store from `path`, or start from `{"Uncategorized": []}` if the file does not exist
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let map = match fs::read_to_string(&path) {
            Ok(content) => {
                let mut map: CategoryMap = serde_json::from_str(&content)?;
                if map.ensure_uncategorized() {
                    warn!(
                        "{} had no '{}' category; added it",
                        path.display(),
                        UNCATEGORIZED
                    );
                }
                debug!("Loaded {} categories from {}", map.len(), path.display());
                map
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No category store at {}, using defaults", path.display());
                CategoryMap::default()
            }
            Err(e) => return Err(Error::Io(e)),
        };

        Ok(Self { path, map })
    }

    /// Write the full mapping to disk, replacing the previous file atomically
    pub fn save(&self) -> Result<()> {
        write_map(&self.path, &self.map)
    }

    /// Add an empty category and persist.
    ///
    /// Returns `Ok(false)` without touching the store if the name already exists.
    pub fn add_category(&mut self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("Category name cannot be empty".into()));
        }
        let mut updated = self.map.clone();
        if !updated.insert_category(name) {
            return Ok(false);
        }
        self.commit(updated)?;
        info!("Added category '{}'", name);
        Ok(true)
    }

    /// Add a keyword to an existing category and persist.
    ///
    /// Returns `Ok(false)` if the trimmed keyword is empty or already present.
    pub fn add_keyword(&mut self, category: &str, keyword: &str) -> Result<bool> {
        if !self.map.contains(category) {
            return Err(Error::InvalidInput(format!(
                "Unknown category: {}",
                category
            )));
        }
        let mut updated = self.map.clone();
        if !updated.insert_keyword(category, keyword) {
            return Ok(false);
        }
        self.commit(updated)?;
        info!("Learned keyword '{}' for '{}'", keyword.trim(), category);
        Ok(true)
    }

    /// Add several `(category, keyword)` pairs with a single write.
    ///
    /// Either every new keyword is persisted or none is. Returns how many
    /// pairs taught the store a keyword it did not have.
    pub fn add_keywords(&mut self, pairs: &[(&str, &str)]) -> Result<usize> {
        if let Some((category, _)) = pairs.iter().find(|(c, _)| !self.map.contains(c)) {
            return Err(Error::InvalidInput(format!(
                "Unknown category: {}",
                category
            )));
        }

        let mut updated = self.map.clone();
        let mut learned = 0;
        for (category, keyword) in pairs {
            if updated.insert_keyword(category, keyword) {
                learned += 1;
            }
        }
        if learned == 0 {
            return Ok(0);
        }

        self.commit(updated)?;
        info!("Learned {} keywords", learned);
        Ok(learned)
    }

    /// Persist `updated`, then adopt it. On a failed write the in-memory map is unchanged.
    fn commit(&mut self, updated: CategoryMap) -> Result<()> {
        write_map(&self.path, &updated)?;
        self.map = updated;
        Ok(())
    }

    /// Category names in stored order, for selection lists
    pub fn category_names(&self) -> Vec<String> {
        self.map.names()
    }

    pub fn keywords(&self, category: &str) -> Option<&[String]> {
        self.map.keywords(category)
    }

    pub fn map(&self) -> &CategoryMap {
        &self.map
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_map(path: &Path, map: &CategoryMap) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, map)?;
    tmp.write_all(b"\n")?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    debug!("Saved {} categories to {}", map.len(), path.display());
    Ok(())
}
