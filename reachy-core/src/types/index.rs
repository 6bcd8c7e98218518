/// Top-level catalog index: which operations exist and where their definitions live.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CatalogIndex {
    #[serde(default)]
    pub operations: Vec<IndexEntry>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IndexEntry {
    pub name: String,

    /// Path of the definition document, relative to the catalog directory.
    pub definition: String,

    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}
