use serde::de::DeserializeOwned;

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

impl DocumentFormat {
    /// Picks a format from a file extension, falling back to auto-detection.
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext.map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Self::Json,
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Auto,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParsedDocument<T> {
    pub document: T,
    pub format: DocumentFormat,
}

pub fn parse_document_str<T: DeserializeOwned>(
    input: &str,
    format: DocumentFormat,
) -> Result<ParsedDocument<T>, ParseError> {
    match format {
        DocumentFormat::Json => Ok(ParsedDocument {
            document: serde_json::from_str::<T>(input)?,
            format,
        }),
        DocumentFormat::Yaml => Ok(ParsedDocument {
            document: serde_yaml::from_str::<T>(input)?,
            format,
        }),
        DocumentFormat::Auto => parse_document_auto(input),
    }
}

/// Tries the likelier format first. When both fail, the first format's error wins.
fn parse_document_auto<T: DeserializeOwned>(input: &str) -> Result<ParsedDocument<T>, ParseError> {
    let trimmed = input.trim_start();
    let (first, second) = if trimmed.starts_with('{') || trimmed.starts_with('[') {
        (DocumentFormat::Json, DocumentFormat::Yaml)
    } else {
        (DocumentFormat::Yaml, DocumentFormat::Json)
    };
    parse_document_str(input, first)
        .or_else(|first_err| parse_document_str(input, second).map_err(|_| first_err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn auto(input: &str) -> Result<ParsedDocument<Value>, ParseError> {
        parse_document_str(input, DocumentFormat::Auto)
    }

    #[test]
    fn braces_are_read_as_json() {
        let parsed = auto("  {\"name\": \"nod_head\"}").unwrap();
        assert_eq!(parsed.format, DocumentFormat::Json);
        assert_eq!(parsed.document["name"], "nod_head");
    }

    #[test]
    fn plain_mappings_are_read_as_yaml() {
        let parsed = auto("name: nod_head\nenabled: true\n").unwrap();
        assert_eq!(parsed.format, DocumentFormat::Yaml);
        assert_eq!(parsed.document["enabled"], true);
    }

    #[test]
    fn yaml_flow_mapping_falls_back_from_json() {
        let parsed = auto("{name: nod_head}").unwrap();
        assert_eq!(parsed.format, DocumentFormat::Yaml);
        assert_eq!(parsed.document["name"], "nod_head");
    }

    #[test]
    fn broken_json_reports_the_json_error() {
        assert!(matches!(auto("{\"name\": "), Err(ParseError::Json(_))));
    }

    #[test]
    fn extension_picks_format() {
        assert_eq!(DocumentFormat::from_extension(Some("YML")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_extension(Some("json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_extension(None), DocumentFormat::Auto);
    }
}
