//! Loads a catalog directory: an index document plus one definition document per operation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{LoadError, ValidationError};
use crate::parser::{parse_document_str, DocumentFormat};
use crate::types::{CatalogIndex, OperationDefinition};
use crate::validate::rules;
use crate::validate::{validate_definitions, Validator};

const INDEX_FILES: [&str; 3] = ["index.json", "index.yaml", "index.yml"];

/// Validated operation definitions, in index order.
#[derive(Debug, Clone)]
pub struct Catalog {
    definitions: Vec<OperationDefinition>,
    disabled: Vec<String>,
}

impl Catalog {
    /// Builds a catalog from definitions that did not come from disk.
    pub fn from_definitions(definitions: Vec<OperationDefinition>) -> Result<Self, ValidationError> {
        validate_definitions(&definitions)?;
        Ok(Self {
            definitions,
            disabled: Vec::new(),
        })
    }

    pub fn definitions(&self) -> &[OperationDefinition] {
        &self.definitions
    }

    pub fn into_definitions(self) -> Vec<OperationDefinition> {
        self.definitions
    }

    /// Names of index entries skipped because they are disabled.
    pub fn disabled(&self) -> &[String] {
        &self.disabled
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

pub fn load(dir: &Path) -> Result<Catalog, LoadError> {
    let index_path = find_index(dir)?;
    let index: CatalogIndex = read_document(&index_path)?;

    let mut v = Validator::new();
    rules::index::validate_index(&mut v, &index);
    v.finish()?;

    let mut v = Validator::new();
    let mut definitions = Vec::new();
    let mut disabled = Vec::new();
    for entry in &index.operations {
        if !entry.enabled {
            tracing::debug!(operation = %entry.name, "skipping disabled operation");
            disabled.push(entry.name.clone());
            continue;
        }
        let def_path = dir.join(&entry.definition);
        let def: OperationDefinition = match read_document(&def_path) {
            Err(LoadError::Io { path, source }) if source.kind() == ErrorKind::NotFound => {
                return Err(LoadError::MissingDefinition {
                    operation: entry.name.clone(),
                    path,
                });
            }
            other => other?,
        };
        let path = format!("{}#$", entry.definition);
        rules::definition::validate_definition(&mut v, &path, &def, Some(&entry.name));
        definitions.push(def);
    }
    v.finish()?;

    tracing::debug!(
        catalog = %dir.display(),
        loaded = definitions.len(),
        disabled = disabled.len(),
        "catalog loaded"
    );
    Ok(Catalog {
        definitions,
        disabled,
    })
}

fn find_index(dir: &Path) -> Result<PathBuf, LoadError> {
    INDEX_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
        .ok_or_else(|| LoadError::MissingIndex(dir.to_path_buf()))
}

fn read_document<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let format = DocumentFormat::from_extension(path.extension().and_then(|e| e.to_str()));
    parse_document_str::<T>(&content, format)
        .map(|parsed| parsed.document)
        .map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
