mod definition;
mod index;

pub use definition::*;
pub use index::*;

/// Parameter map handed to execution units and echoed in results.
pub type Params = serde_json::Map<String, serde_json::Value>;
