#![forbid(unsafe_code)]

pub mod error;
pub mod loader;
pub mod parser;
pub mod schema;
pub mod types;
pub mod validate;

pub use crate::error::{LoadError, ParseError, ValidationError, Violation};
pub use crate::loader::{load, Catalog};
pub use crate::parser::{parse_document_str, DocumentFormat, ParsedDocument};
pub use crate::schema::{tool_schema, tool_schemas};
pub use crate::types::{
    CatalogIndex, ExecutionKind, ExecutionRef, IndexEntry, OperationDefinition, ParamType,
    ParameterLists, ParameterSpec, Params,
};
pub use crate::validate::{validate_definitions, Validate};
