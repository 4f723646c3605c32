//! CLI command implementations
//!
//! - definitions: list resource names with their kinds
//! - normalize: decode stdin against a definition and re-encode it sparse

use std::path::Path;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_input, write_lines, write_output};
use crate::codec::{CodecConfig, ObjectSerializer, Serializer};
use crate::resolver::TypeRegistry;
use crate::schema::{SchemaNode, Specification, SpecificationLoader};

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Definitions { spec } => definitions(&spec),
        Command::Normalize {
            spec,
            type_name,
            config,
        } => normalize(&spec, &type_name, config.as_deref()),
    }
}

/// List the definitions of a specification, one per line
pub fn definitions(spec_path: &Path) -> CliResult<()> {
    let specification = load_specification(spec_path)?;
    write_lines(&describe_definitions(&specification))
}

/// Normalize one document from stdin
pub fn normalize(spec_path: &Path, type_name: &str, config_path: Option<&Path>) -> CliResult<()> {
    let config = match config_path {
        Some(path) => CodecConfig::load(path)?,
        None => CodecConfig::default(),
    };
    config.apply_logging()?;

    let specification = load_specification(spec_path)?;
    let input = read_input()?;
    let output = normalize_document(&input, type_name, &specification, config)?;
    write_output(&output)
}

/// Decodes `input` against `type_name` and re-encodes it.
///
/// Undeclared keys and empty fields are dropped.
pub fn normalize_document(
    input: &str,
    type_name: &str,
    specification: &Specification,
    config: CodecConfig,
) -> CliResult<String> {
    let codec = ObjectSerializer::new(TypeRegistry::new().with_dynamic_fallback()).with_config(config);

    let value = codec.deserialize(input, type_name, specification)?;
    Ok(codec.serialize_as(&value, type_name, specification)?)
}

/// One `name<TAB>kind` line per definition, sorted by name
pub fn describe_definitions(specification: &Specification) -> Vec<String> {
    specification
        .names()
        .into_iter()
        .filter_map(|name| {
            let node = specification.get_resource_definition(name).ok()?;
            Some(format!("{}\t{}", name, describe_node(node)))
        })
        .collect()
}

fn describe_node(node: &SchemaNode) -> String {
    match node {
        SchemaNode::Object(schema) => format!("object ({} properties)", schema.properties.len()),
        SchemaNode::Array { items } => format!("array of {}", describe_node(items)),
        SchemaNode::Reference(reference) => format!("$ref {}", reference),
        other => match other.format() {
            Some(format) => format!("{} ({})", other.type_name(), format),
            None => other.type_name().to_string(),
        },
    }
}

/// Load a specification file, or every `*.json` file of a directory
fn load_specification(path: &Path) -> CliResult<Specification> {
    if !path.exists() {
        return Err(CliError::specification_error(format!(
            "Specification not found: {}",
            path.display()
        )));
    }

    if path.is_dir() {
        let mut loader = SpecificationLoader::new();
        loader.load_dir(path)?;
        return Ok(loader.into_specification());
    }
    Ok(SpecificationLoader::load(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn petstore() -> Specification {
        Specification::from_document(&json!({
            "swagger": "2.0",
            "definitions": {
                "Pet": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "age": {"type": "integer"},
                        "tags": {"type": "array", "items": {"$ref": "#/definitions/Tag"}}
                    }
                },
                "Tag": {
                    "type": "object",
                    "properties": {"label": {"type": "string"}}
                },
                "Names": {"type": "array", "items": {"type": "string"}}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_describe_definitions() {
        assert_eq!(
            describe_definitions(&petstore()),
            vec![
                "Names\tarray of string".to_string(),
                "Pet\tobject (3 properties)".to_string(),
                "Tag\tobject (1 properties)".to_string(),
            ]
        );
    }

    #[test]
    fn test_normalize_drops_empty_and_unknown_fields() {
        let out = normalize_document(
            r#"{"name":"","age":"5","legacy":true,"tags":[{"label":"a"},{"label":""}]}"#,
            "Pet",
            &petstore(),
            CodecConfig::default(),
        )
        .unwrap();
        assert_eq!(out, r#"{"age":5,"tags":[{"label":"a"},{}]}"#);
    }

    #[test]
    fn test_normalize_array_root() {
        let out = normalize_document(r#"["b","a"]"#, "Names", &petstore(), CodecConfig::default())
            .unwrap();
        assert_eq!(out, r#"["b","a"]"#);
    }

    #[test]
    fn test_normalize_unknown_type() {
        let err = normalize_document("{}", "Owner", &petstore(), CodecConfig::default()).unwrap_err();
        assert_eq!(err.code_str(), "CLI_CODEC_ERROR");
        assert!(err.message().contains("CODEC_SCHEMA_NOT_FOUND"));
    }

    #[test]
    fn test_load_specification_from_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("pet.json"),
            r#"{"definitions": {"Pet": {"type": "object"}}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("tag.json"),
            r#"{"definitions": {"Tag": {"type": "object"}}}"#,
        )
        .unwrap();

        let specification = load_specification(dir.path()).unwrap();
        assert_eq!(specification.names(), vec!["Pet", "Tag"]);
    }

    #[test]
    fn test_load_missing_specification() {
        let dir = TempDir::new().unwrap();
        let err = load_specification(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.code_str(), "CLI_SPECIFICATION_ERROR");
    }
}
